//! Command implementations for the CLI interface.
//!
//! This module contains the handlers behind each subcommand: the dashboard
//! and list views, the add/update/delete forms, the per-person and budget
//! views, and the explicit save. Handlers render projections from
//! `crate::views` as fixed-width text tables; mutation handlers write the
//! table back to the backing file before returning.

use std::io;
use std::path::Path;

use chrono::{Local, NaiveDate};
use clap::{CommandFactory, Subcommand};
use clap_complete::{generate, Shell};

use crate::cli::Cli;
use crate::fields::*;
use crate::store::{parse_date_lenient, TaskStore};
use crate::task::{TaskDraft, TaskPatch, TaskRecord};
use crate::views;

#[derive(Subcommand)]
pub enum Commands {
    /// Show the dashboard: counts per compartment and status, the status
    /// distribution, and per-task progress bars.
    Dashboard,

    /// List tasks that are not done yet.
    Remaining,

    /// List the full table.
    List,

    /// Add a new task.
    Add {
        /// Task name.
        name: String,
        /// Longer description.
        #[arg(long, default_value = "")]
        desc: String,
        /// Status: not-started | in-progress | done.
        #[arg(long, value_enum, default_value_t = Status::NotStarted)]
        status: Status,
        /// Percent complete, 0-100.
        #[arg(long, default_value_t = 0)]
        percent: u8,
        /// Priority: low | medium | high.
        #[arg(long, value_enum, default_value_t = Priority::Medium)]
        priority: Priority,
        /// Assigned people, separated by "/".
        #[arg(long, default_value = "")]
        assignees: String,
        /// Person who approves the task.
        #[arg(long)]
        validator: Option<String>,
        /// Compartment (grouping key for the dashboard).
        #[arg(long)]
        compartment: Option<String>,
        /// Start date: YYYY-MM-DD or "today". Defaults to today.
        #[arg(long)]
        start: Option<String>,
        /// End date: YYYY-MM-DD or "today". Defaults to today.
        #[arg(long)]
        end: Option<String>,
        /// Comma-separated tags.
        #[arg(long, default_value = "")]
        tags: String,
        /// Planned budget.
        #[arg(long, default_value_t = 0.0)]
        budget_planned: f64,
        /// Budget spent so far.
        #[arg(long, default_value_t = 0.0)]
        budget_used: f64,
        /// What the budget covers (e.g. catering, transport).
        #[arg(long)]
        budget_includes: Option<String>,
        /// Who carries the cost (e.g. committee, sponsors).
        #[arg(long)]
        budget_owner: Option<String>,
    },

    /// Update fields on a task, selected by name (first match) or --id.
    Update {
        /// Name of the task to update. Ignored when --id is given.
        name: Option<String>,
        /// Target by record id instead of name.
        #[arg(long)]
        id: Option<String>,
        /// New task name.
        #[arg(long)]
        rename: Option<String>,
        #[arg(long)]
        desc: Option<String>,
        #[arg(long, value_enum)]
        status: Option<Status>,
        #[arg(long)]
        percent: Option<u8>,
        #[arg(long, value_enum)]
        priority: Option<Priority>,
        #[arg(long)]
        assignees: Option<String>,
        #[arg(long)]
        validator: Option<String>,
        #[arg(long)]
        compartment: Option<String>,
        /// Start date: YYYY-MM-DD or "today".
        #[arg(long)]
        start: Option<String>,
        /// End date: YYYY-MM-DD or "today".
        #[arg(long)]
        end: Option<String>,
        #[arg(long)]
        tags: Option<String>,
        #[arg(long)]
        budget_planned: Option<f64>,
        #[arg(long)]
        budget_used: Option<f64>,
        #[arg(long)]
        budget_includes: Option<String>,
        #[arg(long)]
        budget_owner: Option<String>,
    },

    /// Delete tasks by name (all matches) or a single record by --id.
    Delete {
        /// Name of the task(s) to delete. Ignored when --id is given.
        name: Option<String>,
        /// Target by record id instead of name.
        #[arg(long)]
        id: Option<String>,
    },

    /// Show one person's tasks and their status summary.
    Person {
        /// Person name; matched case-insensitively inside assignee fields.
        name: String,
    },

    /// List every person named in an assignees field.
    People,

    /// Show the budget view: per-task budgets, per-category planned sums,
    /// and overall totals.
    Budget {
        /// Only tasks whose budget owner matches exactly. "All" disables
        /// the filter.
        #[arg(long, default_value = views::ALL_OWNERS)]
        owner: String,
    },

    /// Rewrite the backing file from the in-memory table.
    Save {
        /// Write to this path instead of the source file.
        #[arg(long)]
        out: Option<std::path::PathBuf>,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Parse a date argument from the command line. Accepts "today" and the
/// same formats the backing file does.
fn parse_date_input(s: &str) -> Option<NaiveDate> {
    if s.trim().eq_ignore_ascii_case("today") {
        return Some(Local::now().date_naive());
    }
    parse_date_lenient(s)
}

fn parse_date_or_exit(s: &str, flag: &str) -> NaiveDate {
    match parse_date_input(s) {
        Some(d) => d,
        None => {
            eprintln!("Invalid {flag} date '{s}'. Use YYYY-MM-DD or \"today\".");
            std::process::exit(1);
        }
    }
}

fn save_or_exit(store: &TaskStore, path: &Path) {
    if let Err(e) = store.save(path) {
        eprintln!("Failed to save table: {e}");
        std::process::exit(1);
    }
}

/// Truncate a string to a maximum width, adding ellipsis if needed.
fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let mut out = String::new();
        for (i, ch) in s.chars().enumerate() {
            if i + 1 >= width {
                out.push('…');
                break;
            }
            out.push(ch);
        }
        out
    }
}

fn format_date(d: Option<NaiveDate>) -> String {
    d.map(|d| d.to_string()).unwrap_or_else(|| "-".into())
}

/// Print tasks in a formatted table.
fn print_table(tasks: &[&TaskRecord]) {
    println!(
        "{:<24} {:<12} {:>4} {:<7} {:<20} {:<14} {:<11} {}",
        "Name", "Status", "%", "Pri", "Assignees", "Compartment", "End", "Tags"
    );
    for t in tasks {
        println!(
            "{:<24} {:<12} {:>4} {:<7} {:<20} {:<14} {:<11} {}",
            truncate(&t.name, 24),
            format_status(t.status),
            t.percent_complete,
            format_priority(t.priority),
            truncate(&t.assignees, 20),
            truncate(t.compartment.as_deref().unwrap_or("-"), 14),
            format_date(t.end_date),
            t.tags,
        );
    }
    if tasks.is_empty() {
        println!("(no tasks)");
    }
}

/// Render the dashboard view.
pub fn cmd_dashboard(store: &TaskStore) {
    println!("Tasks by compartment and status");
    println!("{:<20} {:<12} {:>5}", "Compartment", "Status", "Count");
    for (compartment, status, n) in views::group_by_compartment_and_status(&store.tasks) {
        println!(
            "{:<20} {:<12} {:>5}",
            truncate(compartment.as_deref().unwrap_or("-"), 20),
            format_status(status),
            n
        );
    }

    println!();
    println!("Status distribution");
    for (status, n) in views::status_distribution(&store.tasks) {
        println!("{:<12} {:>5}", format_status(status), n);
    }

    println!();
    println!("Progress");
    for t in &store.tasks {
        let filled = (t.percent_complete as usize * 20) / 100;
        let bar: String = "#".repeat(filled) + &"-".repeat(20 - filled);
        println!(
            "{:<24} [{}] {:>3}%",
            truncate(&t.name, 24),
            bar,
            t.percent_complete
        );
        if !t.description.is_empty() {
            println!("    {}", t.description);
        }
    }
}

/// List the tasks that are not done yet.
pub fn cmd_remaining(store: &TaskStore) {
    print_table(&views::incomplete_tasks(&store.tasks));
}

/// List the full table.
pub fn cmd_list(store: &TaskStore) {
    let all: Vec<&TaskRecord> = store.tasks.iter().collect();
    print_table(&all);
}

/// Add a task and persist the table.
#[allow(clippy::too_many_arguments)]
pub fn cmd_add(
    store: &mut TaskStore,
    path: &Path,
    name: String,
    desc: String,
    status: Status,
    percent: u8,
    priority: Priority,
    assignees: String,
    validator: Option<String>,
    compartment: Option<String>,
    start: Option<String>,
    end: Option<String>,
    tags: String,
    budget_planned: f64,
    budget_used: f64,
    budget_includes: Option<String>,
    budget_owner: Option<String>,
) {
    let today = Local::now().date_naive();
    let start_date = match start {
        Some(s) => Some(parse_date_or_exit(&s, "--start")),
        None => Some(today),
    };
    let end_date = match end {
        Some(s) => Some(parse_date_or_exit(&s, "--end")),
        None => Some(today),
    };

    let record = store.insert(TaskDraft {
        name,
        description: desc,
        status,
        percent_complete: percent,
        priority,
        assignees,
        validator,
        compartment,
        start_date,
        end_date,
        tags,
        budget_planned,
        budget_used,
        budget_includes,
        budget_owner,
    });
    let added = record.name.clone();
    save_or_exit(store, path);
    println!("Added task '{added}'");
}

/// Update a task and persist the table.
#[allow(clippy::too_many_arguments)]
pub fn cmd_update(
    store: &mut TaskStore,
    path: &Path,
    name: Option<String>,
    id: Option<String>,
    rename: Option<String>,
    desc: Option<String>,
    status: Option<Status>,
    percent: Option<u8>,
    priority: Option<Priority>,
    assignees: Option<String>,
    validator: Option<String>,
    compartment: Option<String>,
    start: Option<String>,
    end: Option<String>,
    tags: Option<String>,
    budget_planned: Option<f64>,
    budget_used: Option<f64>,
    budget_includes: Option<String>,
    budget_owner: Option<String>,
) {
    let patch = TaskPatch {
        name: rename,
        description: desc,
        status,
        percent_complete: percent,
        priority,
        assignees,
        validator,
        compartment,
        start_date: start.map(|s| parse_date_or_exit(&s, "--start")),
        end_date: end.map(|s| parse_date_or_exit(&s, "--end")),
        tags,
        budget_planned,
        budget_used,
        budget_includes,
        budget_owner,
    };
    if patch.is_empty() {
        eprintln!("Nothing to update; pass at least one field flag.");
        std::process::exit(1);
    }

    let result = match (&id, &name) {
        (Some(id), _) => store.update_by_id(id, patch),
        (None, Some(name)) => {
            if store.count_named(name) > 1 {
                eprintln!(
                    "Warning: several tasks named '{name}'; updating the first. \
                     Use --id to pick one."
                );
            }
            store.update(name, patch)
        }
        (None, None) => {
            eprintln!("Pass a task name or --id.");
            std::process::exit(1);
        }
    };

    if let Err(e) = result {
        eprintln!("Update failed: {e}");
        std::process::exit(1);
    }
    save_or_exit(store, path);
    println!("Updated.");
}

/// Delete tasks and persist the table.
pub fn cmd_delete(store: &mut TaskStore, path: &Path, name: Option<String>, id: Option<String>) {
    let removed = match (id, name) {
        (Some(id), _) => usize::from(store.delete_by_id(&id)),
        (None, Some(name)) => store.delete(&name),
        (None, None) => {
            eprintln!("Pass a task name or --id.");
            std::process::exit(1);
        }
    };
    save_or_exit(store, path);
    println!("Removed {removed} task(s).");
}

/// Show one person's tasks with a status summary.
pub fn cmd_person(store: &TaskStore, name: String) {
    let mine = views::tasks_for_person(&store.tasks, &name);
    let summary = views::person_summary(&store.tasks, &name);
    println!(
        "{}: {} task(s) ({} not started, {} in progress, {} done)",
        name, summary.total, summary.not_started, summary.in_progress, summary.done
    );
    println!();
    print_table(&mine);
}

/// List every distinct assignee.
pub fn cmd_people(store: &TaskStore) {
    let people = views::unique_assignees(&store.tasks);
    if people.is_empty() {
        println!("(no assignees)");
        return;
    }
    for p in people {
        println!("{p}");
    }
}

/// Render the budget view, optionally filtered by owner.
pub fn cmd_budget(store: &TaskStore, owner: String) {
    let filtered = views::filter_by_owner(&store.tasks, &owner);
    println!(
        "{:<24} {:>10} {:>10} {:<18} {}",
        "Name", "Planned", "Used", "Includes", "Owner"
    );
    for t in &filtered {
        println!(
            "{:<24} {:>10.2} {:>10.2} {:<18} {}",
            truncate(&t.name, 24),
            t.budget_planned,
            t.budget_used,
            truncate(t.budget_includes.as_deref().unwrap_or("-"), 18),
            t.budget_owner.as_deref().unwrap_or("-"),
        );
    }

    let owned: Vec<TaskRecord> = filtered.into_iter().cloned().collect();
    println!();
    println!("Planned by category");
    for (category, planned) in views::budget_by_category(&owned) {
        println!(
            "{:<18} {:>10.2}",
            category.as_deref().unwrap_or("-"),
            planned
        );
    }

    let summary = views::budget_summary(&owned);
    println!();
    println!(
        "Total planned {:.2}, used {:.2}, variance {:.2}",
        summary.planned, summary.used, summary.variance
    );
}

/// Rewrite the backing file, optionally to a different destination.
pub fn cmd_save(store: &TaskStore, path: &Path, out: Option<std::path::PathBuf>) {
    let dest = out.as_deref().unwrap_or(path);
    save_or_exit(store, dest);
    println!("Saved {} task(s) to {}", store.tasks.len(), dest.display());
}

/// Generate shell completion scripts.
pub fn cmd_completions(shell: Shell) {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "td", &mut io::stdout());
}
