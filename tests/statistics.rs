#[cfg(test)]
mod tests {
    use chrono::{Days, NaiveDate, NaiveDateTime};
    use pmt::libs::calendar::WorkWeek;
    use pmt::libs::project::{Project, ProjectDraft, ProjectStatus};
    use pmt::libs::statistics::{gantt, overdue_tasks, project_statistics, reminder_lists, time_range_stats, reminders, task_progress, task_statistics, GanttUnit, Urgency, EMPTY_GANTT_DAYS};
    use pmt::libs::status::ProcessedProject;
    use pmt::libs::task::{Priority, Task, TaskDraft, TaskStatus};

    // 2024-06-12 is a Wednesday.
    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 12).unwrap()
    }

    fn now() -> NaiveDateTime {
        today().and_hms_opt(12, 0, 0).unwrap()
    }

    fn ahead(n: u64) -> NaiveDate {
        today() + Days::new(n)
    }

    fn ago(n: u64) -> NaiveDate {
        today() - Days::new(n)
    }

    fn task(id: &str, start: NaiveDate, end: NaiveDate) -> Task {
        Task::from_draft("p1", TaskDraft::new(&format!("Task {}", id), start, end).with_id(id))
    }

    fn project(id: &str, start: NaiveDate, end: NaiveDate, tasks: Vec<Task>) -> Project {
        let mut project = Project::from_draft(id, ProjectDraft::new(&format!("Project {}", id), start, end), ago(60).and_hms_opt(9, 0, 0).unwrap());
        project.tasks = tasks;
        project
    }

    fn processed(projects: Vec<Project>) -> Vec<ProcessedProject> {
        projects.into_iter().map(|p| ProcessedProject::evaluate(p, today())).collect()
    }

    #[test]
    fn test_reminders_sorted_by_days_left() {
        let mut done = task("done", ago(5), ahead(2));
        done.complete(ago(1));
        let tasks = vec![task("six", ago(3), ahead(6)), task("five", ago(3), ahead(5)), task("ten", ago(3), ahead(10)), task("today", ago(3), today()), done];
        let projects = processed(vec![project("p1", ago(10), ahead(20), tasks)]);

        let found = reminders(&projects, 7, today());
        let ids: Vec<&str> = found.iter().map(|r| r.task_id.as_str()).collect();
        assert_eq!(ids, vec!["five", "six"]);
        assert_eq!(found[0].days_left, 5);
        assert_eq!(found[0].project_name, "Project p1");
    }

    #[test]
    fn test_reminder_window_upper_bound_is_inclusive() {
        let projects = processed(vec![project("p1", ago(10), ahead(20), vec![task("seven", ago(1), ahead(7)), task("eight", ago(1), ahead(8))])]);
        let ids: Vec<String> = reminders(&projects, 7, today()).into_iter().map(|r| r.task_id).collect();
        assert_eq!(ids, vec!["seven"]);
    }

    #[test]
    fn test_reminder_lists_per_threshold() {
        let projects = processed(vec![project("p1", ago(10), ahead(20), vec![task("a", ago(1), ahead(3)), task("b", ago(1), ahead(12))])]);
        let lists = reminder_lists(&projects, &[7, 14], today());

        assert_eq!(lists.len(), 2);
        assert_eq!((lists[0].days, lists[0].reminders.len()), (7, 1));
        assert_eq!((lists[1].days, lists[1].reminders.len()), (14, 2));
    }

    #[test]
    fn test_urgency_levels() {
        assert_eq!(Urgency::from_days_left(1), Urgency::Critical);
        assert_eq!(Urgency::from_days_left(2), Urgency::High);
        assert_eq!(Urgency::from_days_left(3), Urgency::High);
        assert_eq!(Urgency::from_days_left(7), Urgency::Medium);
        assert_eq!(Urgency::from_days_left(8), Urgency::Low);
    }

    #[test]
    fn test_project_statistics_buckets() {
        let mut finished = task("f", ago(20), ago(10));
        finished.complete(ago(10));
        let mut finished_late = task("l", ago(20), ago(10));
        finished_late.complete(ago(3));
        let mut running = task("r", ago(20), ago(5));
        running.start(ago(20));

        let projects = processed(vec![
            project("completed", ago(30), ago(5), vec![finished]),
            project("late", ago(30), ago(5), vec![finished_late]),
            project("running", ago(30), ago(5), vec![running]),
            project("fresh", ago(1), ahead(20), vec![task("n", ahead(1), ahead(5))]),
        ]);
        let stats = project_statistics(&projects, now());

        assert_eq!(stats.total, 4);
        assert_eq!(stats.completed, 2);
        assert_eq!(stats.in_progress, 1);
        assert_eq!(stats.not_started, 1);
        assert_eq!(stats.overdue, 2);
        assert_eq!(stats.completion_rate, 50);
        assert_eq!(stats.overdue_rate, 50);
        assert_eq!(stats.distribution.len(), ProjectStatus::ALL.len());
        assert_eq!(stats.distribution[&ProjectStatus::CompletedOverdue], 1);
        assert_eq!(stats.distribution[&ProjectStatus::OverdueInProgress], 1);
        assert_eq!(stats.distribution[&ProjectStatus::OverdueNotStarted], 0);
    }

    #[test]
    fn test_created_projects_per_time_range() {
        let created = |id: &str, days_ago: u64| {
            let mut p = project(id, ago(1), ahead(20), vec![]);
            p.created_at = Some(now() - Days::new(days_ago));
            p
        };
        let mut undated = project("undated", ago(1), ahead(20), vec![]);
        undated.created_at = None;

        let projects = processed(vec![created("a", 2), created("b", 7), created("c", 20), created("d", 89), created("e", 120), undated]);
        let ranges = time_range_stats(&projects, now());

        // Exactly seven days ago is outside the week.
        assert_eq!(ranges.this_week, 1);
        assert_eq!(ranges.this_month, 3);
        assert_eq!(ranges.this_quarter, 4);
        assert_eq!(project_statistics(&projects, now()).created, ranges);
    }

    #[test]
    fn test_statistics_of_nothing() {
        let stats = project_statistics(&[], now());
        assert_eq!(stats.total, 0);
        assert_eq!(stats.completion_rate, 0);
        assert_eq!(stats.overdue_rate, 0);

        let tasks = task_statistics(&[], today());
        assert_eq!(tasks.total, 0);
        assert_eq!(tasks.completion_rate, 0);
        assert_eq!(tasks.milestones.completion_rate, 0);
    }

    #[test]
    fn test_task_statistics_breakdowns() {
        let mut milestone = task("m", ago(10), ago(2));
        milestone.is_milestone = true;
        milestone.priority = Priority::High;
        milestone.complete(ago(2));

        let mut open_milestone = task("o", ago(1), ahead(4));
        open_milestone.is_milestone = true;
        open_milestone.assignee = Some("ana@example.com".to_string());

        let mut late = task("l", ago(10), ago(1));
        late.priority = Priority::High;
        late.assignee = Some("ana@example.com".to_string());
        late.start(ago(9));

        let projects = processed(vec![project("p1", ago(20), ahead(20), vec![milestone, open_milestone, late])]);
        let stats = task_statistics(&projects, today());

        assert_eq!(stats.total, 3);
        assert_eq!(stats.completed, 1);
        assert_eq!(stats.in_progress, 1);
        assert_eq!(stats.not_started, 1);
        assert_eq!(stats.overdue, 1);
        assert_eq!(stats.completion_rate, 33);
        assert_eq!(stats.overdue_rate, 33);
        assert_eq!((stats.milestones.total, stats.milestones.completed, stats.milestones.completion_rate), (2, 1, 50));

        let high = stats.by_priority[&Priority::High];
        assert_eq!((high.total, high.completed, high.in_progress, high.overdue), (2, 1, 1, 1));
        assert_eq!(stats.by_priority[&Priority::Low].total, 0);

        let ana = stats.by_assignee["ana@example.com"];
        assert_eq!((ana.total, ana.overdue), (2, 1));
    }

    #[test]
    fn test_task_statistics_ignores_future_actual_end() {
        let mut claimed = task("c", ago(5), ahead(5));
        claimed.actual_start = Some(ago(5));
        claimed.actual_end = Some(ahead(1));

        let stats = task_statistics(&processed(vec![project("p1", ago(10), ahead(10), vec![claimed])]), today());
        assert_eq!(stats.completed, 0);
        assert_eq!(stats.in_progress, 1);
    }

    #[test]
    fn test_overdue_tasks_longest_first() {
        let tasks = vec![task("one", ago(10), ago(1)), task("four", ago(10), ago(4)), task("future", ago(1), ahead(1))];
        let found = overdue_tasks(&processed(vec![project("p1", ago(20), ahead(20), tasks)]), today());

        let summary: Vec<(&str, i64)> = found.iter().map(|t| (t.task_id.as_str(), t.days_overdue)).collect();
        assert_eq!(summary, vec![("four", 4), ("one", 1)]);
    }

    #[test]
    fn test_task_progress() {
        let mut running = task("r", ago(2), ahead(8));
        running.start(ago(2));
        assert_eq!(task_progress(&running, today()), 20);
        assert_eq!(task_progress(&running, ago(5)), 0);
        assert_eq!(task_progress(&running, ahead(30)), 100);

        let mut done = task("d", ago(2), ahead(8));
        done.complete(today());
        assert_eq!(task_progress(&done, today()), 100);

        assert_eq!(task_progress(&task("n", ago(2), ahead(8)), today()), 0);

        let mut marked = task("m", ago(2), ahead(8));
        marked.status = TaskStatus::InProgress;
        assert_eq!(task_progress(&marked, today()), 20);
    }

    #[test]
    fn test_gantt_calendar_layout() {
        let start = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
        let tasks = vec![task("a", start, start + Days::new(4)), task("b", start + Days::new(5), start + Days::new(9))];
        let chart = gantt(&project("p1", start, start + Days::new(9), tasks), GanttUnit::Calendar, &WorkWeek::default(), today());

        assert_eq!(chart.total_units, 10);
        assert_eq!(chart.timeline.len(), 10);
        assert_eq!(chart.timeline.iter().filter(|day| day.is_today).count(), 1);

        let (a, b) = (&chart.rows[0], &chart.rows[1]);
        assert_eq!((a.offset, a.length), (0, 5));
        assert_eq!((b.offset, b.length), (5, 5));
        assert!((a.width - 0.5).abs() < 1e-9);
        assert!((b.left - 0.5).abs() < 1e-9);
        assert!(a.left + a.width <= 1.0 && b.left + b.width <= 1.0 + 1e-9);
    }

    #[test]
    fn test_gantt_workday_layout() {
        let monday = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
        let tasks = vec![task("a", monday, monday + Days::new(4)), task("b", monday + Days::new(7), monday + Days::new(11))];
        let chart = gantt(&project("p1", monday, monday + Days::new(11), tasks), GanttUnit::Workday, &WorkWeek::default(), today());

        assert_eq!(chart.unit, GanttUnit::Workday);
        assert_eq!(chart.total_units, 10);
        assert_eq!((chart.rows[1].offset, chart.rows[1].length), (5, 5));
        assert!((chart.rows[1].left - 0.5).abs() < 1e-9);
        assert_eq!(chart.timeline.iter().filter(|day| !day.is_workday).count(), 2);
    }

    #[test]
    fn test_gantt_without_dates_spans_default_window() {
        let mut project = project("p1", today(), ahead(1), Vec::new());
        project.planned_start = None;
        project.planned_end = None;
        let chart = gantt(&project, GanttUnit::Calendar, &WorkWeek::default(), today());

        assert!(chart.rows.is_empty());
        assert_eq!(chart.start, today());
        assert_eq!(chart.end, ahead(EMPTY_GANTT_DAYS));
    }
}
