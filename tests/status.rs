#[cfg(test)]
mod tests {
    use chrono::{Days, NaiveDate};
    use pmt::libs::project::{Project, ProjectDraft, ProjectStatus};
    use pmt::libs::status::{
        calculate_project_status, calculate_task_stats, clear_invalid_actual_end, effective_task_status, is_project_overdue, is_task_overdue, percentage, terminal_task,
        ProcessedProject,
    };
    use pmt::libs::task::{Task, TaskDraft, TaskStatus};

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn today() -> NaiveDate {
        d(2024, 6, 12)
    }

    fn days_ago(n: u64) -> NaiveDate {
        today() - Days::new(n)
    }

    fn days_ahead(n: u64) -> NaiveDate {
        today() + Days::new(n)
    }

    fn task(id: &str, start: NaiveDate, end: NaiveDate) -> Task {
        Task::from_draft("p1", TaskDraft::new(&format!("Task {}", id), start, end).with_id(id))
    }

    fn project(end: NaiveDate, tasks: Vec<Task>) -> Project {
        let mut project = Project::from_draft("p1", ProjectDraft::new("Alpha", days_ago(30), end), today().and_hms_opt(9, 0, 0).unwrap());
        project.tasks = tasks;
        project
    }

    #[test]
    fn test_empty_project_past_end_is_overdue_not_started() {
        let project = project(days_ago(1), Vec::new());
        assert!(is_project_overdue(&project, today()));
        assert_eq!(calculate_project_status(&project, today()), ProjectStatus::OverdueNotStarted);
    }

    #[test]
    fn test_empty_project_before_end_is_not_started() {
        let project = project(days_ahead(1), Vec::new());
        assert_eq!(calculate_project_status(&project, today()), ProjectStatus::NotStarted);
    }

    #[test]
    fn test_one_started_task_is_in_progress() {
        let mut started = task("a", days_ago(5), days_ahead(1));
        started.actual_start = Some(days_ago(4));
        let idle = task("b", days_ago(5), days_ahead(1));

        let project = project(days_ahead(1), vec![started, idle]);
        assert_eq!(calculate_project_status(&project, today()), ProjectStatus::InProgress);
    }

    #[test]
    fn test_started_task_past_project_end_is_overdue_in_progress() {
        let mut started = task("a", days_ago(10), days_ago(2));
        started.actual_start = Some(days_ago(9));

        let project = project(days_ago(2), vec![started]);
        assert_eq!(calculate_project_status(&project, today()), ProjectStatus::OverdueInProgress);
    }

    #[test]
    fn test_task_overdue_without_actual_end() {
        let late = task("a", days_ago(10), days_ago(3));
        assert!(is_task_overdue(&late, today()));
    }

    #[test]
    fn test_task_finished_on_time_is_not_overdue() {
        let mut done = task("a", days_ago(10), days_ago(3));
        done.actual_start = Some(days_ago(10));
        done.actual_end = Some(days_ago(3));
        assert!(!is_task_overdue(&done, today()));

        done.actual_end = Some(days_ago(5));
        assert!(!is_task_overdue(&done, today()));
    }

    #[test]
    fn test_task_finished_late_stays_overdue() {
        let mut done = task("a", days_ago(10), days_ago(3));
        done.actual_start = Some(days_ago(10));
        done.actual_end = Some(today());
        assert!(is_task_overdue(&done, today()));
    }

    #[test]
    fn test_task_due_today_is_not_overdue() {
        let due = task("a", days_ago(3), today());
        assert!(!is_task_overdue(&due, today()));
        assert!(is_task_overdue(&due, days_ahead(1)));
    }

    #[test]
    fn test_task_without_planned_end_is_never_overdue() {
        let mut open = task("a", days_ago(3), days_ago(1));
        open.planned_end = None;
        for offset in [0, 1, 100, 1000] {
            assert!(!is_task_overdue(&open, days_ahead(offset)));
        }
    }

    #[test]
    fn test_future_actual_end_behaves_as_absent() {
        let mut with_future_end = task("a", days_ago(10), days_ago(3));
        with_future_end.actual_start = Some(days_ago(10));
        with_future_end.actual_end = Some(days_ahead(2));

        let mut without_end = with_future_end.clone();
        without_end.actual_end = None;

        assert_eq!(clear_invalid_actual_end(&with_future_end, today()).actual_end, None);
        assert_eq!(is_task_overdue(&with_future_end, today()), is_task_overdue(&without_end, today()));
        assert_eq!(effective_task_status(&with_future_end, today()), effective_task_status(&without_end, today()));
        assert_eq!(calculate_task_stats(&[with_future_end.clone()], today()), calculate_task_stats(&[without_end.clone()], today()));

        let a = project(days_ahead(5), vec![with_future_end]);
        let b = project(days_ahead(5), vec![without_end]);
        assert_eq!(calculate_project_status(&a, today()), calculate_project_status(&b, today()));
    }

    #[test]
    fn test_clear_invalid_actual_end_keeps_valid_value() {
        let mut done = task("a", days_ago(10), days_ago(3));
        done.actual_end = Some(today());
        assert_eq!(clear_invalid_actual_end(&done, today()).actual_end, Some(today()));
    }

    #[test]
    fn test_terminal_task_tie_goes_to_lowest_id() {
        let tasks = vec![task("b", days_ago(5), days_ahead(3)), task("a", days_ago(4), days_ahead(3)), task("c", days_ago(4), days_ahead(1))];
        assert_eq!(terminal_task(&tasks).map(|t| t.id.as_str()), Some("a"));
        assert!(terminal_task(&[]).is_none());
    }

    #[test]
    fn test_completed_project_uses_terminal_task_for_overdue() {
        let mut first = task("a", days_ago(20), days_ago(15));
        first.complete(days_ago(14));
        let mut last = task("b", days_ago(14), days_ago(6));
        last.complete(days_ago(6));

        let on_time = project(days_ago(5), vec![first.clone(), last.clone()]);
        assert_eq!(calculate_project_status(&on_time, today()), ProjectStatus::Completed);

        last.actual_end = Some(days_ago(2));
        let late = project(days_ago(5), vec![first, last]);
        assert_eq!(calculate_project_status(&late, today()), ProjectStatus::CompletedOverdue);
    }

    #[test]
    fn test_project_without_planned_end_is_never_overdue() {
        let mut project = project(days_ago(1), Vec::new());
        project.planned_end = None;
        assert!(!is_project_overdue(&project, today()));
    }

    #[test]
    fn test_task_stats_counts() {
        let mut done = task("a", days_ago(10), days_ago(5));
        done.complete(days_ago(6));
        let mut running = task("b", days_ago(4), days_ahead(4));
        running.start(days_ago(4));
        let late = task("c", days_ago(10), days_ago(1));

        let stats = calculate_task_stats(&[done, running, late], today());
        assert_eq!(stats.total, 3);
        assert_eq!(stats.completed, 1);
        assert_eq!(stats.in_progress, 1);
        assert_eq!(stats.overdue, 1);
        assert_eq!(stats.completion_rate, 33);
    }

    #[test]
    fn test_completion_rate_bounds_and_idempotence() {
        assert_eq!(calculate_task_stats(&[], today()).completion_rate, 0);
        assert_eq!(percentage(0, 0), 0);
        assert_eq!(percentage(2, 3), 67);
        assert_eq!(percentage(1, 2), 50);
        assert_eq!(percentage(3, 3), 100);

        let mut done = task("a", days_ago(10), days_ago(5));
        done.complete(days_ago(6));
        let tasks = vec![done, task("b", days_ago(1), days_ahead(3))];
        let first = calculate_task_stats(&tasks, today());
        let second = calculate_task_stats(&tasks, today());
        assert_eq!(first, second);
        assert!(first.completion_rate <= 100);
    }

    #[test]
    fn test_effective_status_prefers_actual_dates() {
        let mut marked = task("a", days_ago(10), days_ahead(5));
        marked.status = TaskStatus::Completed;
        assert_eq!(effective_task_status(&marked, today()), TaskStatus::Completed);

        let mut started = task("b", days_ago(10), days_ahead(5));
        started.actual_start = Some(days_ago(2));
        assert_eq!(effective_task_status(&started, today()), TaskStatus::InProgress);

        assert_eq!(effective_task_status(&task("c", days_ago(1), days_ahead(1)), today()), TaskStatus::NotStarted);
    }

    #[test]
    fn test_processed_project_reevaluates_on_new_day() {
        let processed = ProcessedProject::evaluate(project(today(), Vec::new()), today());
        assert_eq!(processed.calculated_status(), ProjectStatus::NotStarted);
        assert!(!processed.is_overdue());

        let same_day = processed.current(today());
        assert_eq!(same_day.evaluated_on(), today());

        let next_day = processed.current(days_ahead(1));
        assert_eq!(next_day.calculated_status(), ProjectStatus::OverdueNotStarted);
        assert!(next_day.is_overdue());
    }

    #[test]
    fn test_processed_project_serializes_derived_fields() {
        let processed = ProcessedProject::evaluate(project(days_ago(1), Vec::new()), today());
        let json = serde_json::to_value(&processed).unwrap();
        assert_eq!(json["calculatedStatus"], "overdue_not_started");
        assert_eq!(json["taskStats"]["completionRate"], 0);
        assert_eq!(json["name"], "Alpha");
    }
}
