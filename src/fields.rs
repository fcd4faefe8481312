//! Enumerations for task categorisation.
//!
//! This module defines the structured field types shared by the store, the
//! view projections, and the CLI: task progress status and priority level.
//! The `parse_*`/`format_*` helpers are the single source of the names
//! these values carry in the backing file.

use clap::ValueEnum;

/// Task completion status.
#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Status {
    #[default]
    NotStarted,
    InProgress,
    Done,
}

/// Priority classification for task importance.
#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

/// Parse a status string from the backing file. Unknown values fall back
/// to NotStarted rather than erroring.
pub fn parse_status(s: &str) -> Status {
    match s.trim().to_lowercase().as_str() {
        "not-started" | "notstarted" => Status::NotStarted,
        "in-progress" | "inprogress" => Status::InProgress,
        "done" => Status::Done,
        _ => Status::NotStarted, // Default fallback
    }
}

/// Parse a priority string from the backing file.
pub fn parse_priority(s: &str) -> Priority {
    match s.trim().to_lowercase().as_str() {
        "low" => Priority::Low,
        "medium" => Priority::Medium,
        "high" => Priority::High,
        _ => Priority::Medium, // Default fallback
    }
}

/// Format a task status for display and persistence.
pub fn format_status(s: Status) -> &'static str {
    match s {
        Status::NotStarted => "not-started",
        Status::InProgress => "in-progress",
        Status::Done => "done",
    }
}

/// Format a priority level for display and persistence.
pub fn format_priority(p: Priority) -> &'static str {
    match p {
        Priority::Low => "low",
        Priority::Medium => "medium",
        Priority::High => "high",
    }
}
