//! Sync command handler

use anyhow::{bail, Result};

use notelab_core::{Config, ViewState};

use crate::output::{format_last_sync, Output};

use super::{finish, open_view};

/// Ask the sync service to sync now
pub async fn sync(config: &Config, output: &Output) -> Result<()> {
    let mut view = open_view(config)?;

    if view.state() != ViewState::LoggedIn {
        bail!("Not signed in. Sign in first with:\n  notelab login <email>");
    }

    output.message("Triggering sync...");
    let outcome = view.force_sync().await;
    if let Some(message) = finish(&view, outcome)? {
        output.success(&message);
    }

    let status = view.status();
    output.message(&format!(
        "  Status: {}, last sync: {}",
        status.label(),
        format_last_sync(status.last_sync)
    ));
    Ok(())
}
