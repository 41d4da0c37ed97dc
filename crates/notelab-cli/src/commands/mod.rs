//! Command handlers

pub mod account;
pub mod config;
pub mod status;
pub mod sync;

use std::sync::Arc;

use anyhow::{bail, Context, Result};

use notelab_core::{CommandOutcome, Config, HttpSyncClient, StatusView, SyncClient};

/// Open the configured sync client and mount a status view on it
pub fn open_view(config: &Config) -> Result<StatusView> {
    config.ensure_data_dir()?;
    let client = HttpSyncClient::open(config).context("Failed to open sync client")?;
    Ok(StatusView::mount(Arc::new(client) as Arc<dyn SyncClient>))
}

/// Turn a command outcome into a CLI result
///
/// Failures already carry a user-facing message; that message becomes the
/// error so the process exits non-zero.
pub fn finish(view: &StatusView, outcome: Option<CommandOutcome>) -> Result<Option<String>> {
    match outcome {
        Some(CommandOutcome::Succeeded) => Ok(view.message().map(str::to_string)),
        Some(CommandOutcome::Failed) => {
            bail!("{}", view.message().unwrap_or("Command failed"))
        }
        Some(CommandOutcome::Skipped) | None => Ok(None),
    }
}
