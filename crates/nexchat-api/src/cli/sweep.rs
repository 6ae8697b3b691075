//! `nexchat sweep`: run one liveness sweep from the command line.
//!
//! Local runs go straight to the sweeper without the bearer check, the same
//! way the in-process schedule does.

use anyhow::Result;
use console::style;

use crate::cli::spinner;
use crate::state::AppState;

pub async fn run_sweep(state: &AppState, json: bool, quiet: bool) -> Result<()> {
    let spinner = spinner("Probing chats...", "yellow")?;
    let result = state.sweeper.sweep().await;
    spinner.finish_and_clear();
    let summary = result?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }
    if quiet {
        return Ok(());
    }

    println!();
    println!(
        "  {} Checked {} of {} chats, deleted {}.",
        style("✓").green().bold(),
        summary.checked,
        summary.total,
        summary.deleted
    );
    for name in &summary.deleted_chats {
        println!("    {} {}", style("✗").red(), name);
    }
    println!();

    Ok(())
}
