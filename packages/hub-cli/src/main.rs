//! Terminal front end for the Teaching Resources Hub
//!
//! Drives the catalog stores against a running server. Display settings are
//! kept in a JSON file under the user's config directory.

use std::process::ExitCode;

use anyhow::Result;
use catalog::{FacetValue, SortOrder};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cmd;
mod context;
mod render;

use context::HubContext;

#[derive(Parser)]
#[command(name = "hub")]
#[command(about = "Browse and bookmark teaching resources")]
#[command(version)]
struct Cli {
    /// Hub server root
    #[arg(long, env = "HUB_API_URL", default_value = "http://localhost:8080", global = true)]
    api_url: String,

    /// Skip the banner
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Live suggestions for a partial query
    Suggest {
        query: String,

        /// Pick a suggestion (1-based) and show where it leads
        #[arg(short, long)]
        pick: Option<usize>,
    },

    /// The resources directory with filters applied
    Browse {
        /// Name/description search
        #[arg(short, long)]
        search: Option<String>,

        /// Legacy tag button (`all` for none)
        #[arg(short, long)]
        tag: Option<String>,

        /// Facet values to keep checked, e.g. `free` or `subject:math`
        #[arg(short, long = "filter")]
        filters: Vec<FacetValue>,

        /// Section order: default, az, za
        #[arg(long, default_value = "default")]
        sort: SortOrder,

        /// Apply the `search` parameter of a page URL
        #[arg(long)]
        url: Option<String>,
    },

    /// Add or remove a favorite
    Favorite { resource_id: String },

    /// Attach a note to a favorite
    Note { resource_id: String, text: String },

    /// List favorites, newest first
    Favorites,

    /// Scored search over the catalog
    Search {
        query: String,

        /// Comma-separated fields: name, description, tags
        #[arg(long)]
        fields: Option<String>,

        #[arg(long)]
        limit: Option<usize>,
    },

    /// Flip a category between collapsed and expanded
    Collapse { category: String },

    /// Display settings
    #[command(subcommand)]
    Prefs(cmd::prefs::PrefsCommand),
}

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn,hub_cli=info".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {:#}", e);
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    let mut ctx = HubContext::new(&cli.api_url);

    if !cli.quiet {
        ctx.print_banner()?;
    }

    match cli.command {
        Commands::Suggest { query, pick } => cmd::suggest::run(&ctx, &query, pick).await,
        Commands::Browse {
            search,
            tag,
            filters,
            sort,
            url,
        } => {
            let options = cmd::browse::BrowseOptions {
                search,
                tag,
                filters,
                sort,
                url,
            };
            cmd::browse::run(&ctx, options).await
        }
        Commands::Favorite { resource_id } => cmd::favorites::toggle(&ctx, &resource_id).await,
        Commands::Note { resource_id, text } => {
            cmd::favorites::note(&ctx, &resource_id, &text).await
        }
        Commands::Favorites => cmd::favorites::list(&ctx).await,
        Commands::Search {
            query,
            fields,
            limit,
        } => cmd::search::run(&ctx, &query, fields.as_deref(), limit).await,
        Commands::Collapse { category } => cmd::prefs::collapse(&mut ctx, &category),
        Commands::Prefs(command) => cmd::prefs::run(&mut ctx, command),
    }
}
