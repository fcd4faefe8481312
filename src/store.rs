//! The in-memory task table and its CSV persistence.
//!
//! This module provides the `TaskStore` struct that owns the table of task
//! records for a session, along with the lenient row parsing used when
//! loading the backing file. The table is loaded once at session start and
//! written back in full on an explicit save; nothing here touches the file
//! in between.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::error::{StoreError, StoreResult};
use crate::fields::*;
use crate::task::{TaskDraft, TaskPatch, TaskRecord};

/// Column order of the backing CSV file.
pub const COLUMNS: [&str; 16] = [
    "Id",
    "Name",
    "Description",
    "Status",
    "PercentComplete",
    "Priority",
    "Assignees",
    "Validator",
    "Compartment",
    "StartDate",
    "EndDate",
    "Tags",
    "BudgetPlanned",
    "BudgetUsed",
    "BudgetIncludes",
    "BudgetOwner",
];

/// In-memory table of task records.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct TaskStore {
    pub tasks: Vec<TaskRecord>,
}

impl TaskStore {
    /// Load the store from a CSV file.
    ///
    /// An absent file yields an empty store, not an error. Rows with
    /// unparseable dates or numbers are kept with those fields defaulted;
    /// missing columns default for every row; unknown columns are ignored.
    /// Only a genuine I/O failure on an existing file is surfaced.
    pub fn load(path: &Path) -> StoreResult<Self> {
        if !path.exists() {
            return Ok(TaskStore::default());
        }
        let content = fs::read_to_string(path).map_err(|e| StoreError::Persistence {
            path: path.display().to_string(),
            source: e,
        })?;

        let mut records = parse_csv(&content).into_iter();
        let Some(header_fields) = records.next() else {
            return Ok(TaskStore::default());
        };

        // Column positions by name, so a file with reordered or missing
        // columns still loads.
        let col = |name: &str| header_fields.iter().position(|h| h.trim() == name);
        let cols: Vec<Option<usize>> = COLUMNS.iter().map(|c| col(c)).collect();

        let mut tasks = Vec::new();
        for fields in records {
            let field = |i: usize| -> &str {
                cols[i]
                    .and_then(|idx| fields.get(idx))
                    .map(String::as_str)
                    .unwrap_or("")
            };
            let opt = |i: usize| -> Option<String> {
                let v = field(i).trim();
                if v.is_empty() {
                    None
                } else {
                    Some(v.to_string())
                }
            };

            let name = field(1).trim().to_string();
            if name.is_empty() {
                continue;
            }
            let id = match opt(0) {
                Some(id) => id,
                None => Uuid::new_v4().to_string(),
            };
            tasks.push(TaskRecord {
                id,
                name,
                description: field(2).to_string(),
                status: parse_status(field(3)),
                percent_complete: parse_percent(field(4)),
                priority: parse_priority(field(5)),
                assignees: field(6).trim().to_string(),
                validator: opt(7),
                compartment: opt(8),
                start_date: parse_date_lenient(field(9)),
                end_date: parse_date_lenient(field(10)),
                tags: field(11).trim().to_string(),
                budget_planned: parse_amount(field(12)),
                budget_used: parse_amount(field(13)),
                budget_includes: opt(14),
                budget_owner: opt(15),
            });
        }
        Ok(TaskStore { tasks })
    }

    /// Write the full table to a CSV file, replacing any existing content.
    ///
    /// Uses a temp file + rename so a failed write leaves the previous file
    /// intact. The in-memory table is never modified by a failed save.
    pub fn save(&self, path: &Path) -> StoreResult<()> {
        let mut out = String::new();
        out.push_str(&COLUMNS.join(","));
        out.push('\n');
        for t in &self.tasks {
            let date = |d: Option<NaiveDate>| d.map(|d| d.to_string()).unwrap_or_default();
            let row = [
                t.id.clone(),
                t.name.clone(),
                t.description.clone(),
                format_status(t.status).to_string(),
                t.percent_complete.to_string(),
                format_priority(t.priority).to_string(),
                t.assignees.clone(),
                t.validator.clone().unwrap_or_default(),
                t.compartment.clone().unwrap_or_default(),
                date(t.start_date),
                date(t.end_date),
                t.tags.clone(),
                format_amount(t.budget_planned),
                format_amount(t.budget_used),
                t.budget_includes.clone().unwrap_or_default(),
                t.budget_owner.clone().unwrap_or_default(),
            ];
            let line: Vec<String> = row.iter().map(|f| escape_csv(f)).collect();
            out.push_str(&line.join(","));
            out.push('\n');
        }

        let persist = |e: std::io::Error| StoreError::Persistence {
            path: path.display().to_string(),
            source: e,
        };
        // Atomic-ish write via temp + rename.
        let tmp = path.with_extension("csv.tmp");
        let mut f = File::create(&tmp).map_err(persist)?;
        f.write_all(out.as_bytes()).map_err(persist)?;
        f.flush().map_err(persist)?;
        fs::rename(&tmp, path).map_err(persist)?;
        Ok(())
    }

    /// Append a new record built from the draft, with a fresh id.
    /// Always succeeds; numeric fields are clamped on the way in.
    pub fn insert(&mut self, draft: TaskDraft) -> &TaskRecord {
        let record = TaskRecord {
            id: Uuid::new_v4().to_string(),
            name: draft.name,
            description: draft.description,
            status: draft.status,
            percent_complete: draft.percent_complete.min(100),
            priority: draft.priority,
            assignees: draft.assignees,
            validator: draft.validator,
            compartment: draft.compartment,
            start_date: draft.start_date,
            end_date: draft.end_date,
            tags: draft.tags,
            budget_planned: draft.budget_planned.max(0.0),
            budget_used: draft.budget_used.max(0.0),
            budget_includes: draft.budget_includes,
            budget_owner: draft.budget_owner,
        };
        let idx = self.tasks.len();
        self.tasks.push(record);
        &self.tasks[idx]
    }

    /// Get the first record with the given name, in table order.
    pub fn get(&self, name: &str) -> Option<&TaskRecord> {
        self.tasks.iter().find(|t| t.name == name)
    }

    /// Get a record by id.
    pub fn get_by_id(&self, id: &str) -> Option<&TaskRecord> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Count records sharing the given name. Names are soft identifiers;
    /// callers that see a count above one should switch to id-keyed calls.
    pub fn count_named(&self, name: &str) -> usize {
        self.tasks.iter().filter(|t| t.name == name).count()
    }

    /// Overwrite fields on the first record whose name matches.
    ///
    /// Fails with `NotFound` when no record matches; the table is left
    /// unchanged in that case. When several records share the name, only
    /// the first (by position) is touched.
    pub fn update(&mut self, name: &str, patch: TaskPatch) -> StoreResult<()> {
        let idx = self
            .tasks
            .iter()
            .position(|t| t.name == name)
            .ok_or_else(|| StoreError::NotFound {
                name: name.to_string(),
            })?;
        apply_patch(&mut self.tasks[idx], patch);
        Ok(())
    }

    /// Overwrite fields on the record with the given id.
    pub fn update_by_id(&mut self, id: &str, patch: TaskPatch) -> StoreResult<()> {
        let idx = self
            .tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| StoreError::NotFound {
                name: id.to_string(),
            })?;
        apply_patch(&mut self.tasks[idx], patch);
        Ok(())
    }

    /// Remove every record with the given name. Returns how many were
    /// removed; zero matches is a no-op, not an error.
    pub fn delete(&mut self, name: &str) -> usize {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.name != name);
        before - self.tasks.len()
    }

    /// Remove the record with the given id, if present.
    pub fn delete_by_id(&mut self, id: &str) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        before != self.tasks.len()
    }
}

fn apply_patch(t: &mut TaskRecord, patch: TaskPatch) {
    if let Some(v) = patch.name {
        t.name = v;
    }
    if let Some(v) = patch.description {
        t.description = v;
    }
    if let Some(v) = patch.status {
        t.status = v;
    }
    if let Some(v) = patch.percent_complete {
        t.percent_complete = v.min(100);
    }
    if let Some(v) = patch.priority {
        t.priority = v;
    }
    if let Some(v) = patch.assignees {
        t.assignees = v;
    }
    if let Some(v) = patch.validator {
        t.validator = Some(v);
    }
    if let Some(v) = patch.compartment {
        t.compartment = Some(v);
    }
    if let Some(v) = patch.start_date {
        t.start_date = Some(v);
    }
    if let Some(v) = patch.end_date {
        t.end_date = Some(v);
    }
    if let Some(v) = patch.tags {
        t.tags = v;
    }
    if let Some(v) = patch.budget_planned {
        t.budget_planned = v.max(0.0);
    }
    if let Some(v) = patch.budget_used {
        t.budget_used = v.max(0.0);
    }
    if let Some(v) = patch.budget_includes {
        t.budget_includes = Some(v);
    }
    if let Some(v) = patch.budget_owner {
        t.budget_owner = Some(v);
    }
}

/// Parse a date leniently: ISO first, then the spreadsheet-style formats
/// the backing file has been seen to carry. Anything else is "unset".
pub fn parse_date_lenient(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    for fmt in ["%Y-%m-%d", "%Y-%m-%d %H:%M:%S", "%d/%m/%Y", "%m/%d/%Y"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }
    None
}

/// Parse a percentage cell into [0,100]; junk becomes 0.
fn parse_percent(s: &str) -> u8 {
    let v = s.trim().parse::<f64>().unwrap_or(0.0);
    v.clamp(0.0, 100.0).round() as u8
}

/// Parse a monetary cell; junk or negatives become 0.
fn parse_amount(s: &str) -> f64 {
    let v = s.trim().parse::<f64>().unwrap_or(0.0);
    if v.is_finite() {
        v.max(0.0)
    } else {
        0.0
    }
}

fn format_amount(v: f64) -> String {
    if v == v.trunc() {
        format!("{:.0}", v)
    } else {
        format!("{}", v)
    }
}

/// Quote a CSV field when it contains a delimiter, quote, or newline.
fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

/// Simple CSV parser that handles quoted fields.
///
/// Splits the whole file into records rather than going line by line: a
/// newline inside a quoted field belongs to the field, not to the record
/// boundary, so multi-line descriptions survive a reload.
fn parse_csv(content: &str) -> Vec<Vec<String>> {
    let mut records = Vec::new();
    let mut fields = Vec::new();
    let mut current_field = String::new();
    let mut in_quotes = false;
    let mut chars = content.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' => {
                if in_quotes && chars.peek() == Some(&'"') {
                    // Escaped quote
                    current_field.push('"');
                    chars.next();
                } else {
                    in_quotes = !in_quotes;
                }
            }
            ',' if !in_quotes => {
                fields.push(std::mem::take(&mut current_field));
            }
            '\n' if !in_quotes => {
                if current_field.ends_with('\r') {
                    current_field.pop();
                }
                fields.push(std::mem::take(&mut current_field));
                if fields.iter().any(|f| !f.is_empty()) {
                    records.push(std::mem::take(&mut fields));
                } else {
                    // Blank line between records.
                    fields.clear();
                }
            }
            _ => {
                current_field.push(ch);
            }
        }
    }
    if !current_field.is_empty() || !fields.is_empty() {
        fields.push(current_field);
        records.push(fields);
    }
    records
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_parsing_accepts_common_formats() {
        let iso = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
        assert_eq!(parse_date_lenient("2025-03-14"), Some(iso));
        assert_eq!(parse_date_lenient("2025-03-14 00:00:00"), Some(iso));
        assert_eq!(parse_date_lenient("14/03/2025"), Some(iso));
        assert_eq!(parse_date_lenient(""), None);
        assert_eq!(parse_date_lenient("not a date"), None);
    }

    #[test]
    fn percent_is_clamped() {
        assert_eq!(parse_percent("40"), 40);
        assert_eq!(parse_percent("250"), 100);
        assert_eq!(parse_percent("-3"), 0);
        assert_eq!(parse_percent("abc"), 0);
    }

    #[test]
    fn amounts_never_go_negative() {
        assert_eq!(parse_amount("500.5"), 500.5);
        assert_eq!(parse_amount("-20"), 0.0);
        assert_eq!(parse_amount(""), 0.0);
    }

    #[test]
    fn csv_round_trips_quotes_and_commas() {
        let raw = "food, drinks";
        let escaped = escape_csv(raw);
        assert_eq!(escaped, "\"food, drinks\"");
        let parsed = parse_csv(&format!("a,{},b", escaped));
        assert_eq!(parsed, vec![vec!["a", "food, drinks", "b"]]);
    }

    #[test]
    fn csv_keeps_newlines_inside_quoted_fields() {
        let parsed = parse_csv("a,\"line one\nline two\",b\nc,d,e\n");
        assert_eq!(
            parsed,
            vec![
                vec!["a", "line one\nline two", "b"],
                vec!["c", "d", "e"],
            ]
        );
    }

    #[test]
    fn csv_tolerates_crlf_and_blank_lines() {
        let parsed = parse_csv("a,b\r\n\nc,d\n");
        assert_eq!(parsed, vec![vec!["a", "b"], vec!["c", "d"]]);
    }
}
