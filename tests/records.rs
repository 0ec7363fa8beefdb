#[cfg(test)]
mod tests {
    use chrono::{Local, NaiveDate};
    use pmt::db::db::{Db, DB_FILE_NAME};
    use pmt::db::records::SqliteStore;
    use pmt::libs::clock::FixedClock;
    use pmt::libs::config::Config;
    use pmt::libs::data_center::DataCenter;
    use pmt::libs::error::StoreError;
    use pmt::libs::project::ProjectDraft;
    use pmt::libs::store::{seal, RecordStore};
    use std::path::PathBuf;
    use tempfile::TempDir;
    use test_context::{test_context, AsyncTestContext};

    struct RecordsTestContext {
        _temp_dir: TempDir,
        db_path: PathBuf,
    }

    impl AsyncTestContext for RecordsTestContext {
        async fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let db_path = temp_dir.path().join(DB_FILE_NAME);
            RecordsTestContext { _temp_dir: temp_dir, db_path }
        }
    }

    impl RecordsTestContext {
        fn store(&self, collection: &str) -> SqliteStore {
            SqliteStore::new(Db::open(&self.db_path).unwrap(), collection).unwrap()
        }
    }

    #[test_context(RecordsTestContext)]
    #[tokio::test]
    async fn test_save_get_delete(ctx: &mut RecordsTestContext) {
        let store = ctx.store("projects");
        assert_eq!(store.collection(), "projects");

        store.save("p1", r#"{"data":1}"#).await.unwrap();
        store.save("p1", r#"{"data":2}"#).await.unwrap();
        store.save("p2", r#"{"data":3}"#).await.unwrap();

        assert_eq!(store.get("p1").await.unwrap().as_deref(), Some(r#"{"data":2}"#));
        assert_eq!(store.get("missing").await.unwrap(), None);

        let ids: Vec<String> = store.get_all().await.unwrap().into_iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec!["p1", "p2"]);

        assert!(store.delete("p1").await.unwrap());
        assert!(!store.delete("p1").await.unwrap());
        assert_eq!(store.get_all().await.unwrap().len(), 1);
    }

    #[test_context(RecordsTestContext)]
    #[tokio::test]
    async fn test_records_persist_across_connections(ctx: &mut RecordsTestContext) {
        ctx.store("projects").save("p1", "payload").await.unwrap();
        assert_eq!(ctx.store("projects").get("p1").await.unwrap().as_deref(), Some("payload"));
    }

    #[test_context(RecordsTestContext)]
    #[tokio::test]
    async fn test_collections_are_isolated(ctx: &mut RecordsTestContext) {
        let projects = ctx.store("projects");
        let archive = ctx.store("archive");

        projects.save("p1", "live").await.unwrap();
        archive.save("p1", "old").await.unwrap();

        assert_eq!(projects.get("p1").await.unwrap().as_deref(), Some("live"));
        assert_eq!(archive.get("p1").await.unwrap().as_deref(), Some("old"));
        assert!(archive.delete("p1").await.unwrap());
        assert_eq!(projects.get_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_max_records_quota() {
        let store = SqliteStore::new(Db::in_memory().unwrap(), "projects").unwrap().with_max_records(Some(1));

        store.save("p1", "one").await.unwrap();
        store.save("p1", "one again").await.unwrap();
        assert!(matches!(store.save("p2", "two").await, Err(StoreError::QuotaExceeded)));
    }

    #[tokio::test]
    async fn test_cleanup_removes_unreadable_records() {
        let store = SqliteStore::new(Db::in_memory().unwrap(), "projects").unwrap();
        let now = Local::now().naive_local();
        store.save("good", &seal(&serde_json::json!({"id": "good"}), now).unwrap()).await.unwrap();
        store.save("bad", "{broken").await.unwrap();

        assert_eq!(store.cleanup().await.unwrap(), 1);
        assert!(store.get("good").await.unwrap().is_some());
        assert!(store.get("bad").await.unwrap().is_none());
    }

    #[test_context(RecordsTestContext)]
    #[tokio::test]
    async fn test_data_center_over_sqlite(ctx: &mut RecordsTestContext) {
        let today = NaiveDate::from_ymd_opt(2024, 6, 12).unwrap();
        let start = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 7, 10).unwrap();

        let mut center = DataCenter::new(ctx.store("projects"), FixedClock::on(today), &Config::default()).unwrap();
        let id = center.create_project(ProjectDraft::new("Alpha", start, end)).await.unwrap().id().to_string();

        let mut reopened = DataCenter::new(ctx.store("projects"), FixedClock::on(today), &Config::default()).unwrap();
        let loaded = reopened.load_all_projects().await.unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].id(), id);
        assert_eq!(loaded[0].project().planned_end, Some(end));
    }
}
