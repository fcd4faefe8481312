//! CLI entry point.
//!
//! Resolves the backing file path, loads the table once, and dispatches to
//! the command handlers. Each invocation is one session: read at start,
//! write back on mutation or explicit save.

use std::path::PathBuf;

use clap::Parser;

use taskdash::cli::Cli;
use taskdash::cmd::{self, Commands};
use taskdash::store::TaskStore;

fn main() {
    let cli = Cli::parse();

    // Completions need no table at all.
    if let Commands::Completions { shell } = &cli.command {
        cmd::cmd_completions(*shell);
        return;
    }

    let path = cli.file.unwrap_or_else(|| PathBuf::from("tasks.csv"));
    let mut store = match TaskStore::load(&path) {
        Ok(store) => store,
        Err(e) => {
            eprintln!("Failed to load table: {e}");
            std::process::exit(1);
        }
    };

    match cli.command {
        Commands::Completions { .. } => unreachable!("handled above"),

        Commands::Dashboard => cmd::cmd_dashboard(&store),

        Commands::Remaining => cmd::cmd_remaining(&store),

        Commands::List => cmd::cmd_list(&store),

        Commands::Add {
            name,
            desc,
            status,
            percent,
            priority,
            assignees,
            validator,
            compartment,
            start,
            end,
            tags,
            budget_planned,
            budget_used,
            budget_includes,
            budget_owner,
        } => cmd::cmd_add(
            &mut store,
            &path,
            name,
            desc,
            status,
            percent,
            priority,
            assignees,
            validator,
            compartment,
            start,
            end,
            tags,
            budget_planned,
            budget_used,
            budget_includes,
            budget_owner,
        ),

        Commands::Update {
            name,
            id,
            rename,
            desc,
            status,
            percent,
            priority,
            assignees,
            validator,
            compartment,
            start,
            end,
            tags,
            budget_planned,
            budget_used,
            budget_includes,
            budget_owner,
        } => cmd::cmd_update(
            &mut store,
            &path,
            name,
            id,
            rename,
            desc,
            status,
            percent,
            priority,
            assignees,
            validator,
            compartment,
            start,
            end,
            tags,
            budget_planned,
            budget_used,
            budget_includes,
            budget_owner,
        ),

        Commands::Delete { name, id } => cmd::cmd_delete(&mut store, &path, name, id),

        Commands::Person { name } => cmd::cmd_person(&store, name),

        Commands::People => cmd::cmd_people(&store),

        Commands::Budget { owner } => cmd::cmd_budget(&store, owner),

        Commands::Save { out } => cmd::cmd_save(&store, &path, out),
    }
}
