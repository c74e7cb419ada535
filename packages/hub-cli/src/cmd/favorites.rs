//! Favorite toggling, notes and the favorites list

use anyhow::Result;
use catalog::{FavoritesStore, ToggleOutcome};
use colored::Colorize;

use crate::context::HubContext;

pub async fn toggle(ctx: &HubContext, resource_id: &str) -> Result<()> {
    let mut store = FavoritesStore::new();
    store
        .refresh(&ctx.client, &[resource_id.to_string()])
        .await;

    let outcome = store.toggle(&ctx.client, resource_id).await;
    if let Some(notification) = outcome.notification() {
        ctx.print_notification(notification);
    }

    match outcome {
        ToggleOutcome::Applied { favorited, .. } | ToggleOutcome::Reverted { favorited, .. } => {
            let state = if favorited { "★ favorited" } else { "☆ not favorited" };
            ctx.print_info(&format!("{} is {}", resource_id, state));
        }
        ToggleOutcome::Busy => {}
    }
    Ok(())
}

pub async fn note(ctx: &HubContext, resource_id: &str, text: &str) -> Result<()> {
    let response = ctx.client.update_note(resource_id, text).await?;
    if response.success {
        ctx.print_success(&response.message);
    } else {
        ctx.print_error(&response.message);
    }
    Ok(())
}

pub async fn list(ctx: &HubContext) -> Result<()> {
    let response = ctx.client.user_favorites().await?;

    if response.favorites.is_empty() {
        ctx.print_info("No favorites yet");
        return Ok(());
    }

    ctx.print_header(&format!("Favorites ({})", response.count));
    for entry in &response.favorites {
        println!(
            "  {} {} {} {}",
            "★".bright_yellow(),
            entry.resource.name.bold(),
            format!("({})", entry.resource.id).dimmed(),
            entry.favorited_at.dimmed()
        );
        if let Some(note) = entry.user_note.as_deref().filter(|n| !n.is_empty()) {
            println!("      {}", note.italic());
        }
    }
    Ok(())
}
