#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use pmt::libs::error::TrackerError;
    use pmt::libs::graph::{topological_order, DependencyGraph};
    use pmt::libs::task::{Task, TaskDraft};

    fn task(id: &str, deps: &[&str]) -> Task {
        let start = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 6, 14).unwrap();
        let draft = deps.iter().fold(TaskDraft::new(&format!("Task {}", id), start, end).with_id(id), |draft, dep| draft.depends_on(dep));
        Task::from_draft("p1", draft)
    }

    fn position(order: &[String], id: &str) -> usize {
        order.iter().position(|x| x == id).unwrap()
    }

    #[test]
    fn test_topological_order_respects_every_edge() {
        let tasks = vec![task("d", &["a"]), task("c", &["b", "a"]), task("b", &["a"]), task("a", &[]), task("e", &[])];
        let order = DependencyGraph::build(&tasks).topological_order().unwrap();

        assert_eq!(order.len(), tasks.len());
        for t in &tasks {
            assert_eq!(order.iter().filter(|id| **id == t.id).count(), 1);
            for dep in &t.dependencies {
                assert!(position(&order, dep) < position(&order, &t.id), "{} must precede {}", dep, t.id);
            }
        }
    }

    #[test]
    fn test_topological_order_is_deterministic_and_follows_input() {
        let tasks = vec![task("x", &[]), task("y", &[]), task("z", &[])];
        let graph = DependencyGraph::build(&tasks);
        assert_eq!(graph.topological_order().unwrap(), vec!["x", "y", "z"]);
        assert_eq!(graph.topological_order().unwrap(), graph.topological_order().unwrap());

        let chain = vec![task("c", &["b"]), task("b", &["a"]), task("a", &[])];
        assert_eq!(DependencyGraph::build(&chain).topological_order().unwrap(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_topological_order_of_tasks() {
        let tasks = vec![task("b", &["a"]), task("a", &[])];
        let ordered: Vec<&str> = topological_order(&tasks).unwrap().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ordered, vec!["a", "b"]);
    }

    #[test]
    fn test_cycle_fails_without_partial_order() {
        let tasks = vec![task("root", &[]), task("a", &["b"]), task("b", &["c"]), task("c", &["a"])];
        let result = DependencyGraph::build(&tasks).topological_order();

        match result {
            Err(TrackerError::CircularDependency { cycle }) => {
                assert_eq!(cycle.first(), cycle.last());
                assert_eq!(cycle.len(), 4);
            }
            other => panic!("expected a circular dependency, got {:?}", other),
        }
        assert!(topological_order(&tasks).is_err());
    }

    #[test]
    fn test_cycle_edges_identify_offenders() {
        let tasks = vec![task("a", &["b"]), task("b", &["a"])];
        let err = DependencyGraph::build(&tasks).topological_order().unwrap_err();
        assert_eq!(err.cycle_edges(), vec![("a".to_string(), "b".to_string()), ("b".to_string(), "a".to_string())]);
        assert!(err.to_string().contains("a -> b -> a"));
    }

    #[test]
    fn test_detect_cycle_from_task() {
        let tasks = vec![task("a", &["b"]), task("b", &["a"]), task("c", &[]), task("d", &["a"])];
        let graph = DependencyGraph::build(&tasks);

        assert!(graph.detect_cycle("c").is_none());
        assert!(graph.detect_cycle("d").is_some());
        assert!(graph.detect_cycle("missing").is_none());
        assert!(graph.find_cycle().is_some());
    }

    #[test]
    fn test_dependency_chain_nearest_first() {
        let tasks = vec![task("a", &[]), task("b", &["a"]), task("c", &["b"]), task("d", &["c", "a"])];
        let graph = DependencyGraph::build(&tasks);

        assert_eq!(graph.dependency_chain("d"), vec!["a", "c", "b"]);
        assert_eq!(graph.dependency_chain("c"), vec!["b", "a"]);
        assert!(graph.dependency_chain("a").is_empty());
    }

    #[test]
    fn test_dependents_and_would_create_cycle() {
        let tasks = vec![task("a", &[]), task("b", &["a"]), task("c", &["b"]), task("d", &["a"])];
        let graph = DependencyGraph::build(&tasks);

        assert_eq!(graph.dependents("a"), vec!["b", "d"]);
        assert!(graph.dependents("c").is_empty());
        assert!(graph.would_create_cycle("a", "c"));
        assert!(graph.would_create_cycle("b", "b"));
        assert!(!graph.would_create_cycle("c", "d"));
    }

    #[test]
    fn test_dangling_dependencies_are_reported() {
        let tasks = vec![task("a", &["ghost"]), task("b", &["a"])];
        let graph = DependencyGraph::build(&tasks);

        assert_eq!(graph.dangling(), &[("a".to_string(), "ghost".to_string())]);
        assert!(graph.dependencies_of("a").is_empty());
        assert_eq!(graph.topological_order().unwrap(), vec!["a", "b"]);
    }

    #[test]
    fn test_long_chain_does_not_overflow() {
        let mut tasks = vec![task("t0", &[])];
        for i in 1..20_000 {
            tasks.push(task(&format!("t{}", i), &[format!("t{}", i - 1).as_str()]));
        }
        tasks.reverse();
        let order = DependencyGraph::build(&tasks).topological_order().unwrap();
        assert_eq!(order.first().map(String::as_str), Some("t0"));
        assert_eq!(order.len(), 20_000);
    }
}
