use std::path::PathBuf;

use anyhow::Result;
use catalog::{FileStorage, Notification, NotificationKind, PreferenceStore};
use colored::Colorize;
use console::Term;
use hub_client::{HubClient, HubClientOptions};

const APP_DIR: &str = "teaching-hub";

/// Shared state for one command invocation
pub struct HubContext {
    pub client: HubClient,
    pub prefs: PreferenceStore<FileStorage>,
    term: Term,
}

impl HubContext {
    pub fn new(api_url: &str) -> Self {
        let storage = storage_location();
        tracing::debug!(path = %storage.path().display(), api_url, "Hub CLI context");

        Self {
            client: HubClient::new(HubClientOptions::new(api_url)),
            prefs: PreferenceStore::new(storage),
            term: Term::stdout(),
        }
    }

    pub fn print_banner(&self) -> Result<()> {
        if !self.term.is_term() {
            return Ok(());
        }
        println!("{}", "╔════════════════════════════════════════╗".bright_cyan());
        println!("{}", "║        Teaching Resources Hub          ║".bright_cyan());
        println!("{}", "╚════════════════════════════════════════╝".bright_cyan());
        println!();
        Ok(())
    }

    pub fn print_header(&self, title: &str) {
        println!("{}", title.bright_cyan().bold());
    }

    pub fn print_success(&self, message: &str) {
        println!("  {} {}", "✓".bright_green(), message);
    }

    pub fn print_error(&self, message: &str) {
        println!("  {} {}", "✗".bright_red(), message);
    }

    pub fn print_info(&self, message: &str) {
        println!("  {}", message.dimmed());
    }

    pub fn print_notification(&self, notification: &Notification) {
        match notification.kind {
            NotificationKind::Success => self.print_success(&notification.message),
            NotificationKind::Error => self.print_error(&notification.message),
            NotificationKind::Info => println!("  {} {}", "ℹ".bright_blue(), notification.message),
        }
    }
}

/// `<config dir>/teaching-hub/storage.json`, or the working directory when
/// the platform has no config dir
fn storage_location() -> FileStorage {
    match dirs::config_dir() {
        Some(dir) => FileStorage::in_dir(&dir, APP_DIR),
        None => FileStorage::new(PathBuf::from(format!("{}-storage.json", APP_DIR))),
    }
}
