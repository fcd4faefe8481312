//! # taskdash - project-task dashboard
//!
//! A file-backed task dashboard for small projects: a flat table of tasks
//! (progress, priority, assignees, dates, tags, budget) persisted to a CSV
//! file, with text views mirroring a dashboard - charts by compartment and
//! status, remaining-work and full lists, per-person views, and budget
//! tracking.
//!
//! The crate splits into a small core and a CLI shell:
//!
//! - [`store`] owns the in-memory table and its load/save lifecycle;
//! - [`views`] holds the pure projections the views are built from;
//! - [`cmd`] renders those projections and applies form-style mutations.
//!
//! Data lives in a single CSV (default `tasks.csv`, override with
//! `--file`). The table is read once per invocation and written back in
//! full after a mutation or an explicit `save`.

pub mod cli;
pub mod cmd;
pub mod error;
pub mod fields;
pub mod store;
pub mod task;
pub mod views;
