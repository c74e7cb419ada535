//! Display settings persisted in local storage

use anyhow::{anyhow, Result};
use catalog::DisplaySettings;
use clap::Subcommand;
use colored::Colorize;

use crate::context::HubContext;

#[derive(Subcommand)]
pub enum PrefsCommand {
    /// Print the current settings
    Show,

    /// Change one setting: view, compact, showDescriptions, showTags, highContrast
    Set { field: String, value: String },

    /// Forget saved settings
    Reset,
}

pub fn run(ctx: &mut HubContext, command: PrefsCommand) -> Result<()> {
    match command {
        PrefsCommand::Show => {
            let settings = ctx.prefs.load();
            show(ctx, &settings);
            Ok(())
        }
        PrefsCommand::Set { field, value } => {
            let mut settings = ctx.prefs.load();
            settings.set_field(&field, &value).map_err(|e| anyhow!(e))?;
            ctx.prefs.save(&settings)?;
            ctx.print_success(&format!("{} = {}", field, value));
            Ok(())
        }
        PrefsCommand::Reset => {
            ctx.prefs.reset()?;
            ctx.print_success("Display settings reset");
            Ok(())
        }
    }
}

/// Flip a category's collapsed flag and remember it
pub fn collapse(ctx: &mut HubContext, category: &str) -> Result<()> {
    let settings = ctx.prefs.update(|settings| {
        settings.toggle_collapsed(category);
    })?;

    let state = if settings.is_collapsed(category) {
        "collapsed"
    } else {
        "expanded"
    };
    ctx.print_success(&format!("{} {}", category, state));
    Ok(())
}

fn show(ctx: &HubContext, settings: &DisplaySettings) {
    ctx.print_header("Display settings");
    let view = format!("{:?}", settings.view).to_lowercase();
    let rows = [
        ("view", view),
        ("compact", settings.compact.to_string()),
        ("showDescriptions", settings.show_descriptions.to_string()),
        ("showTags", settings.show_tags.to_string()),
        ("highContrast", settings.high_contrast.to_string()),
        ("collapsedCategories", settings.collapsed_categories.join(", ")),
    ];
    for (name, value) in rows {
        println!("  {:<20} {}", name.bright_white(), value);
    }

    let classes: Vec<String> = settings.css_classes().into_iter().collect();
    if !classes.is_empty() {
        ctx.print_info(&format!("classes: {}", classes.join(" ")));
    }
    ctx.print_info(&ctx.prefs.storage().path().display().to_string());
}
