//! `hub suggest`: the homepage search box

use anyhow::Result;
use catalog::{Autocomplete, AutocompleteEvent, NavKey};
use colored::Colorize;

use crate::context::HubContext;
use crate::render;

pub async fn run(ctx: &HubContext, query: &str, pick: Option<usize>) -> Result<()> {
    let mut autocomplete = Autocomplete::load(&ctx.client).await;
    let results = autocomplete.input_changed(query).clone();

    if results.is_empty() {
        ctx.print_info("No suggestions");
        return Ok(());
    }

    ctx.print_header(&format!("Suggestions for \"{}\"", query));
    for (i, item) in results.items.iter().enumerate() {
        println!(
            "  {:>2}. {} {}  {}",
            i + 1,
            item.category_icon,
            render::highlight(&item.highlighted_name),
            item.tags.join(", ").dimmed()
        );
    }
    if let (Some(footer), Some(target)) = (results.footer(), results.footer_target()) {
        println!("  {} {}", footer.bright_blue(), target.dimmed());
    }

    let target = match pick {
        Some(n) if n >= 1 && n <= results.items.len() => {
            autocomplete.hover(n - 1);
            autocomplete.handle_key(NavKey::Enter)
        }
        Some(n) => anyhow::bail!("No suggestion #{} (showing {})", n, results.items.len()),
        None => autocomplete.handle_key(NavKey::Enter),
    };
    if let AutocompleteEvent::Navigate(url) = target {
        println!();
        println!("  {} {}", "→".bright_green(), url);
    }
    Ok(())
}
