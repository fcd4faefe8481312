//! Read-only projections of the task table.
//!
//! Every function here is a pure transformation over a table snapshot:
//! filters for the list views, groupings for the dashboard charts, and the
//! budget and per-person aggregates. Nothing mutates the store, and every
//! projection of an empty table yields an empty result rather than an error.

use std::collections::{BTreeMap, BTreeSet};

use crate::fields::Status;
use crate::task::TaskRecord;

/// Overall budget totals across a table.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BudgetSummary {
    pub planned: f64,
    pub used: f64,
    /// planned - used; negative when the table is over budget.
    pub variance: f64,
}

/// Per-person status breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PersonSummary {
    pub total: usize,
    pub not_started: usize,
    pub in_progress: usize,
    pub done: usize,
}

/// Sentinel owner value meaning "no owner filter".
pub const ALL_OWNERS: &str = "All";

/// Tasks that still need work (status != Done).
pub fn incomplete_tasks(tasks: &[TaskRecord]) -> Vec<&TaskRecord> {
    tasks.iter().filter(|t| t.status != Status::Done).collect()
}

/// Count tasks per (compartment, status) pair, in compartment order.
///
/// Records without a compartment group under `None`. Only pairs with at
/// least one member appear, so the counts always sum to the table size.
pub fn group_by_compartment_and_status(
    tasks: &[TaskRecord],
) -> Vec<(Option<String>, Status, usize)> {
    let mut groups: BTreeMap<(Option<String>, Status), usize> = BTreeMap::new();
    for t in tasks {
        *groups.entry((t.compartment.clone(), t.status)).or_default() += 1;
    }
    groups
        .into_iter()
        .map(|((compartment, status), n)| (compartment, status, n))
        .collect()
}

/// Count tasks per status across the whole table.
pub fn status_distribution(tasks: &[TaskRecord]) -> Vec<(Status, usize)> {
    let mut counts: BTreeMap<Status, usize> = BTreeMap::new();
    for t in tasks {
        *counts.entry(t.status).or_default() += 1;
    }
    counts.into_iter().collect()
}

/// Sum planned and used budgets over the table.
pub fn budget_summary(tasks: &[TaskRecord]) -> BudgetSummary {
    let planned: f64 = tasks.iter().map(|t| t.budget_planned).sum();
    let used: f64 = tasks.iter().map(|t| t.budget_used).sum();
    BudgetSummary {
        planned,
        used,
        variance: planned - used,
    }
}

/// Sum planned budget per `budget_includes` category.
pub fn budget_by_category(tasks: &[TaskRecord]) -> Vec<(Option<String>, f64)> {
    let mut groups: BTreeMap<Option<String>, f64> = BTreeMap::new();
    for t in tasks {
        *groups.entry(t.budget_includes.clone()).or_default() += t.budget_planned;
    }
    groups.into_iter().collect()
}

/// Filter by budget owner. The `"All"` sentinel returns the table
/// unchanged; otherwise matching is exact and case-sensitive, as stored.
pub fn filter_by_owner<'a>(tasks: &'a [TaskRecord], owner: &str) -> Vec<&'a TaskRecord> {
    if owner == ALL_OWNERS {
        return tasks.iter().collect();
    }
    tasks
        .iter()
        .filter(|t| t.budget_owner.as_deref() == Some(owner))
        .collect()
}

/// Split a stored assignees field on `/` into trimmed, non-empty names.
pub fn split_assignees(assignees: &str) -> Vec<String> {
    assignees
        .split('/')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Every distinct person named anywhere in an assignees field.
pub fn unique_assignees(tasks: &[TaskRecord]) -> BTreeSet<String> {
    let mut people = BTreeSet::new();
    for t in tasks {
        people.extend(split_assignees(&t.assignees));
    }
    people
}

/// Tasks whose assignees field mentions the person.
///
/// Matching is a case-insensitive substring test, so a name contained in a
/// longer name over-matches. The per-person views rely on this leniency.
pub fn tasks_for_person<'a>(tasks: &'a [TaskRecord], person: &str) -> Vec<&'a TaskRecord> {
    let needle = person.to_lowercase();
    tasks
        .iter()
        .filter(|t| t.assignees.to_lowercase().contains(&needle))
        .collect()
}

/// Status breakdown of one person's tasks.
pub fn person_summary(tasks: &[TaskRecord], person: &str) -> PersonSummary {
    let mine = tasks_for_person(tasks, person);
    let mut summary = PersonSummary {
        total: mine.len(),
        ..Default::default()
    };
    for t in mine {
        match t.status {
            Status::NotStarted => summary.not_started += 1,
            Status::InProgress => summary.in_progress += 1,
            Status::Done => summary.done += 1,
        }
    }
    summary
}
