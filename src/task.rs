//! Task record data structure.
//!
//! This module defines the core `TaskRecord` struct that represents a single
//! row of the dashboard table, plus the `TaskPatch` used to overwrite fields
//! on an existing record.

use chrono::NaiveDate;

use crate::fields::{Priority, Status};

/// A single task row with progress, scheduling, and budget metadata.
///
/// Records map one-to-one onto rows of the backing CSV file. The `assignees`
/// field keeps the stored `/`-delimited text form; the view layer parses it
/// into a proper set where needed.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskRecord {
    pub id: String,
    pub name: String,
    pub description: String,
    pub status: Status,
    pub percent_complete: u8,
    pub priority: Priority,
    pub assignees: String,
    pub validator: Option<String>,
    pub compartment: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub tags: String,
    pub budget_planned: f64,
    pub budget_used: f64,
    pub budget_includes: Option<String>,
    pub budget_owner: Option<String>,
}

/// Field values for a record about to be inserted.
///
/// Everything except `name` is optional on the way in; the store fills the
/// defaults and generates the id.
#[derive(Debug, Clone, Default)]
pub struct TaskDraft {
    pub name: String,
    pub description: String,
    pub status: Status,
    pub percent_complete: u8,
    pub priority: Priority,
    pub assignees: String,
    pub validator: Option<String>,
    pub compartment: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub tags: String,
    pub budget_planned: f64,
    pub budget_used: f64,
    pub budget_includes: Option<String>,
    pub budget_owner: Option<String>,
}

/// A set of field overwrites for an existing record.
///
/// `None` means "leave the stored value alone"; the store applies whatever
/// is present and clamps numeric fields on the way in.
#[derive(Debug, Clone, Default)]
pub struct TaskPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<Status>,
    pub percent_complete: Option<u8>,
    pub priority: Option<Priority>,
    pub assignees: Option<String>,
    pub validator: Option<String>,
    pub compartment: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub tags: Option<String>,
    pub budget_planned: Option<f64>,
    pub budget_used: Option<f64>,
    pub budget_includes: Option<String>,
    pub budget_owner: Option<String>,
}

impl TaskPatch {
    /// True when the patch carries no overwrites at all.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.status.is_none()
            && self.percent_complete.is_none()
            && self.priority.is_none()
            && self.assignees.is_none()
            && self.validator.is_none()
            && self.compartment.is_none()
            && self.start_date.is_none()
            && self.end_date.is_none()
            && self.tags.is_none()
            && self.budget_planned.is_none()
            && self.budget_used.is_none()
            && self.budget_includes.is_none()
            && self.budget_owner.is_none()
    }
}
