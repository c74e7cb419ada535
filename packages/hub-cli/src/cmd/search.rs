//! `hub search`: scored search over the catalog

use anyhow::Result;
use colored::Colorize;

use crate::context::HubContext;

pub async fn run(
    ctx: &HubContext,
    query: &str,
    fields: Option<&str>,
    limit: Option<usize>,
) -> Result<()> {
    let response = ctx.client.search(query, fields, limit).await?;

    ctx.print_header(&format!(
        "{} result(s) for \"{}\"",
        response.count, response.query
    ));
    for hit in &response.results {
        println!(
            "  {} {} {} {}",
            format!("{:>3}", hit.relevance_score).bright_magenta(),
            hit.resource.category_icon,
            hit.resource.name.bold(),
            format!("({})", hit.resource.id).dimmed()
        );
    }
    Ok(())
}
