//! Chat directory CLI commands: list, create, rename, delete.

use anyhow::Result;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;
use dialoguer::Confirm;

use nexchat_types::chat::{CreateChatRequest, RenameChatRequest};

use crate::cli::spinner;
use crate::state::AppState;

/// List one page of chats in a table.
pub async fn list_chats(
    state: &AppState,
    page: i64,
    page_size: Option<i64>,
    json: bool,
) -> Result<()> {
    let page_size = page_size.unwrap_or(state.directory.settings().default_page_size);
    let result = state.directory.list(page, page_size).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    if result.data.is_empty() {
        println!();
        if result.pagination.total == 0 {
            println!(
                "  {} No chats registered. Add one with: {}",
                style("i").blue().bold(),
                style("nexchat create <name> <url>").yellow()
            );
        } else {
            println!(
                "  {} Page {} is empty ({} pages in total).",
                style("i").blue().bold(),
                result.pagination.page,
                result.pagination.total_pages
            );
        }
        println!();
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("Name").fg(Color::White),
        Cell::new("URL").fg(Color::White),
        Cell::new("Created").fg(Color::White),
        Cell::new("ID").fg(Color::White),
    ]);

    for chat in &result.data {
        table.add_row(vec![
            Cell::new(&chat.name).fg(Color::Cyan),
            Cell::new(&chat.url),
            Cell::new(format_relative_time(&chat.created_at)).fg(Color::DarkGrey),
            Cell::new(chat.id.to_string()).fg(Color::DarkGrey),
        ]);
    }

    println!();
    println!("{table}");
    println!(
        "  {}",
        style(format!(
            "Page {} of {} · {} chats",
            result.pagination.page,
            result.pagination.total_pages.max(1),
            result.pagination.total
        ))
        .dim()
    );
    println!();

    Ok(())
}

/// Register a chat and print its secret key once.
pub async fn create_chat(state: &AppState, name: String, url: String, json: bool) -> Result<()> {
    let spinner = spinner("Registering chat...", "cyan")?;

    let request = CreateChatRequest {
        name: Some(name),
        url: Some(url),
    };
    let result = state.directory.create(request).await;
    spinner.finish_and_clear();
    let created = result?;

    if json {
        println!("{}", serde_json::to_string_pretty(&created)?);
        return Ok(());
    }

    println!();
    println!("  {} Chat registered!", style("✓").green().bold());
    println!();
    println!("  {}  {}", style("Name:").bold(), style(&created.name).cyan());
    println!("  {}   {}", style("URL:").bold(), &created.url);
    println!("  {}    {}", style("ID:").bold(), style(created.id.to_string()).dim());
    println!();
    println!(
        "  {} Secret key (save this -- it won't be shown again):",
        style("🔑").bold()
    );
    println!();
    println!("  {}", style(created.secret_key.expose()).yellow().bold());
    println!();

    Ok(())
}

/// Rename the chat owning `secret_key`.
pub async fn rename_chat(state: &AppState, secret_key: String, name: String, json: bool) -> Result<()> {
    let request = RenameChatRequest {
        secret_key: Some(secret_key),
        name: Some(name.clone()),
    };
    state.directory.rename(request).await?;

    if json {
        println!("{}", serde_json::json!({ "renamed": true, "name": name.trim() }));
    } else {
        println!("  {} Chat renamed to '{}'.", style("✓").green().bold(), name.trim());
    }

    Ok(())
}

/// Delete the chat owning `secret_key`, with confirmation.
pub async fn delete_chat(state: &AppState, secret_key: String, force: bool, json: bool) -> Result<()> {
    if !force && !json {
        let confirmed = Confirm::new()
            .with_prompt(format!(
                "{} delete the chat owning this key?",
                style("Permanently").red().bold()
            ))
            .default(false)
            .interact()?;

        if !confirmed {
            println!("  Cancelled.");
            return Ok(());
        }
    }

    state.directory.delete(Some(secret_key)).await?;

    if json {
        println!("{}", serde_json::json!({ "deleted": true }));
    } else {
        println!("  {} Chat deleted.", style("✓").red().bold());
    }

    Ok(())
}

fn format_relative_time(dt: &chrono::DateTime<chrono::Utc>) -> String {
    let diff = chrono::Utc::now() - *dt;

    if diff.num_minutes() < 1 {
        "just now".to_string()
    } else if diff.num_hours() < 1 {
        format!("{}m ago", diff.num_minutes())
    } else if diff.num_days() < 1 {
        format!("{}h ago", diff.num_hours())
    } else if diff.num_days() < 30 {
        format!("{}d ago", diff.num_days())
    } else {
        dt.format("%Y-%m-%d").to_string()
    }
}
