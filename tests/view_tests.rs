//! Integration tests for the view projections.

use taskdash::fields::Status;
use taskdash::store::TaskStore;
use taskdash::task::{TaskDraft, TaskRecord};
use taskdash::views;

fn record(name: &str, draft: TaskDraft) -> TaskRecord {
    let mut store = TaskStore::default();
    store
        .insert(TaskDraft {
            name: name.to_string(),
            ..draft
        })
        .clone()
}

/// The one-record scenario used throughout: a venue booking shared by
/// Alice and Bob, 40% done, 500 planned / 200 used.
fn venue_booking() -> TaskRecord {
    record(
        "Venue booking",
        TaskDraft {
            assignees: "Alice / Bob".into(),
            status: Status::InProgress,
            percent_complete: 40,
            budget_planned: 500.0,
            budget_used: 200.0,
            ..Default::default()
        },
    )
}

mod filter_tests {
    use super::*;

    #[test]
    fn incomplete_tasks_drops_done() {
        let tasks = vec![
            record("a", TaskDraft { status: Status::Done, ..Default::default() }),
            record("b", TaskDraft { status: Status::InProgress, ..Default::default() }),
            record("c", TaskDraft { status: Status::NotStarted, ..Default::default() }),
        ];

        let remaining = views::incomplete_tasks(&tasks);
        let names: Vec<&str> = remaining.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["b", "c"]);
    }

    #[test]
    fn owner_filter_is_exact_and_case_sensitive() {
        let tasks = vec![
            record("a", TaskDraft { budget_owner: Some("BDE".into()), ..Default::default() }),
            record("b", TaskDraft { budget_owner: Some("bde".into()), ..Default::default() }),
            record("c", TaskDraft::default()),
        ];

        let mine = views::filter_by_owner(&tasks, "BDE");
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].name, "a");
    }

    #[test]
    fn owner_sentinel_all_returns_everything() {
        let tasks = vec![record("a", TaskDraft::default()), record("b", TaskDraft::default())];
        assert_eq!(views::filter_by_owner(&tasks, views::ALL_OWNERS).len(), 2);
    }
}

mod grouping_tests {
    use super::*;

    fn sample() -> Vec<TaskRecord> {
        vec![
            record("a", TaskDraft { compartment: Some("Logistics".into()), status: Status::Done, ..Default::default() }),
            record("b", TaskDraft { compartment: Some("Logistics".into()), status: Status::Done, ..Default::default() }),
            record("c", TaskDraft { compartment: Some("Comms".into()), status: Status::InProgress, ..Default::default() }),
            record("d", TaskDraft::default()),
        ]
    }

    #[test]
    fn compartment_groups_cover_every_record_once() {
        let tasks = sample();
        let groups = views::group_by_compartment_and_status(&tasks);

        let total: usize = groups.iter().map(|(_, _, n)| n).sum();
        assert_eq!(total, tasks.len());
        // Zero-member groups are never materialized.
        assert!(groups.iter().all(|(_, _, n)| *n > 0));
    }

    #[test]
    fn compartment_groups_count_pairs() {
        let groups = views::group_by_compartment_and_status(&sample());
        assert!(groups.contains(&(Some("Logistics".into()), Status::Done, 2)));
        assert!(groups.contains(&(Some("Comms".into()), Status::InProgress, 1)));
        assert!(groups.contains(&(None, Status::NotStarted, 1)));
    }

    #[test]
    fn status_distribution_counts_the_whole_table() {
        let dist = views::status_distribution(&sample());
        assert_eq!(
            dist,
            vec![
                (Status::NotStarted, 1),
                (Status::InProgress, 1),
                (Status::Done, 2),
            ]
        );
    }

    #[test]
    fn empty_table_projections_are_empty() {
        let tasks: Vec<TaskRecord> = Vec::new();
        assert!(views::group_by_compartment_and_status(&tasks).is_empty());
        assert!(views::status_distribution(&tasks).is_empty());
        assert!(views::budget_by_category(&tasks).is_empty());
        assert!(views::unique_assignees(&tasks).is_empty());
        assert!(views::incomplete_tasks(&tasks).is_empty());
    }
}

mod budget_tests {
    use super::*;

    #[test]
    fn summary_totals_and_variance() {
        let tasks = vec![venue_booking()];
        let s = views::budget_summary(&tasks);
        assert_eq!((s.planned, s.used, s.variance), (500.0, 200.0, 300.0));
    }

    #[test]
    fn summary_of_nothing_is_zero() {
        let s = views::budget_summary(&[]);
        assert_eq!((s.planned, s.used, s.variance), (0.0, 0.0, 0.0));
    }

    #[test]
    fn summary_is_additive_over_disjoint_tables() {
        let t1 = vec![
            record("a", TaskDraft { budget_planned: 100.0, budget_used: 30.0, ..Default::default() }),
            record("b", TaskDraft { budget_planned: 50.0, budget_used: 50.0, ..Default::default() }),
        ];
        let t2 = vec![record(
            "c",
            TaskDraft { budget_planned: 10.0, budget_used: 25.0, ..Default::default() },
        )];

        let union: Vec<TaskRecord> = t1.iter().chain(t2.iter()).cloned().collect();
        let (s1, s2, s) = (
            views::budget_summary(&t1),
            views::budget_summary(&t2),
            views::budget_summary(&union),
        );

        assert_eq!(s.planned, s1.planned + s2.planned);
        assert_eq!(s.used, s1.used + s2.used);
        assert_eq!(s.variance, s1.variance + s2.variance);
    }

    #[test]
    fn planned_sums_group_by_category() {
        let tasks = vec![
            record("a", TaskDraft { budget_includes: Some("catering".into()), budget_planned: 100.0, ..Default::default() }),
            record("b", TaskDraft { budget_includes: Some("catering".into()), budget_planned: 40.0, ..Default::default() }),
            record("c", TaskDraft { budget_includes: Some("transport".into()), budget_planned: 25.0, ..Default::default() }),
        ];

        let by_category = views::budget_by_category(&tasks);
        assert_eq!(
            by_category,
            vec![
                (Some("catering".into()), 140.0),
                (Some("transport".into()), 25.0),
            ]
        );
    }
}

mod person_tests {
    use super::*;

    #[test]
    fn unique_assignees_splits_and_trims() {
        let tasks = vec![
            venue_booking(),
            record("c", TaskDraft { assignees: "Bob/ Carol".into(), ..Default::default() }),
            record("d", TaskDraft::default()),
        ];

        let people: Vec<String> = views::unique_assignees(&tasks).into_iter().collect();
        assert_eq!(people, vec!["Alice", "Bob", "Carol"]);
    }

    #[test]
    fn person_match_is_case_insensitive() {
        let tasks = vec![venue_booking()];
        let mine = views::tasks_for_person(&tasks, "alice");
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].name, "Venue booking");
    }

    #[test]
    fn person_match_is_substring_based() {
        // Documented leniency: "Ann" also matches "Annabel".
        let tasks = vec![record(
            "a",
            TaskDraft { assignees: "Annabel".into(), ..Default::default() },
        )];
        assert_eq!(views::tasks_for_person(&tasks, "Ann").len(), 1);
    }

    #[test]
    fn person_summary_breaks_down_by_status() {
        let tasks = vec![
            record("a", TaskDraft { assignees: "Alice".into(), status: Status::Done, ..Default::default() }),
            record("b", TaskDraft { assignees: "Alice / Bob".into(), status: Status::InProgress, ..Default::default() }),
            record("c", TaskDraft { assignees: "Alice".into(), ..Default::default() }),
            record("d", TaskDraft { assignees: "Bob".into(), status: Status::Done, ..Default::default() }),
        ];

        let s = views::person_summary(&tasks, "Alice");
        assert_eq!(s.total, 3);
        assert_eq!(s.not_started, 1);
        assert_eq!(s.in_progress, 1);
        assert_eq!(s.done, 1);

        let nobody = views::person_summary(&tasks, "Zoe");
        assert_eq!(nobody.total, 0);
    }
}
