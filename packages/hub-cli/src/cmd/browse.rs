//! `hub browse`: the resources directory page

use anyhow::Result;
use catalog::{load_resources, Directory, FacetSelection, FacetValue, FavoritesStore, SortOrder};
use colored::Colorize;

use crate::context::HubContext;
use crate::render;

pub struct BrowseOptions {
    pub search: Option<String>,
    pub tag: Option<String>,
    pub filters: Vec<FacetValue>,
    pub sort: SortOrder,
    pub url: Option<String>,
}

pub async fn run(ctx: &HubContext, options: BrowseOptions) -> Result<()> {
    let resources = load_resources(&ctx.client).await;
    let settings = ctx.prefs.load();
    let mut directory = Directory::new(resources);

    for name in &settings.collapsed_categories {
        directory.set_expanded(name, false);
    }
    if let Some(url) = &options.url {
        directory.apply_url_search(url);
    }
    if let Some(search) = &options.search {
        directory.set_search(search);
    }
    if let Some(tag) = &options.tag {
        directory.set_tag(tag);
    }
    if !options.filters.is_empty() {
        directory.set_facets(FacetSelection::only(options.filters.iter().copied()));
    }
    directory.sort(options.sort);

    let ids: Vec<String> = directory.resources().map(|r| r.id.clone()).collect();
    let mut favorites = FavoritesStore::new();
    favorites.refresh(&ctx.client, &ids).await;

    if let Some(pills) = render::pills(&directory.pills()) {
        println!("{}", pills.bright_blue());
    }
    let outcome = directory.outcome();
    println!("{}", render::stats(outcome).dimmed());
    println!();

    if outcome.is_empty() {
        ctx.print_error("No resources match your filters.");
        return Ok(());
    }

    for section in directory.sections() {
        let Some(visibility) = outcome.section(&section.name) else {
            continue;
        };
        if !visibility.is_visible() {
            continue;
        }

        ctx.print_header(&format!(
            "{} {} ({})",
            section.icon,
            section.name,
            visibility.visible.len()
        ));
        if !section.expanded {
            ctx.print_info(&format!("collapsed, {} to show", "hub collapse".bold()));
            println!();
            continue;
        }

        for resource in section
            .resources
            .iter()
            .filter(|r| outcome.is_visible(&r.id))
        {
            for line in render::card(resource, &settings, favorites.is_favorited(&resource.id)) {
                println!("  {}", line);
            }
        }
        println!();
    }
    Ok(())
}
