//! Sign in / sign out command handlers

use anyhow::{bail, Result};

use notelab_core::{CommandOutcome, Config, ViewState};

use crate::output::Output;

use super::{finish, open_view};

/// Request a login link for `email`
pub async fn login(config: &Config, email: String, output: &Output) -> Result<()> {
    let mut view = open_view(config)?;

    if view.state() == ViewState::LoggedIn {
        let message = match view.identity().email.as_deref() {
            Some(email) => format!("Already signed in as {}", email),
            None => "Already signed in".to_string(),
        };
        output.message(&message);
        return Ok(());
    }

    view.toggle_form();
    view.set_email(email);

    let outcome = view.submit_sign_in().await;
    if outcome == Some(CommandOutcome::Skipped) {
        bail!("An email address is required: notelab login <email>");
    }

    if let Some(message) = finish(&view, outcome)? {
        output.success(&message);
    }
    if view.state() == ViewState::LoggedIn {
        output.message("Signed in.");
    }
    Ok(())
}

/// Sign out of the sync service
pub async fn logout(config: &Config, output: &Output) -> Result<()> {
    let mut view = open_view(config)?;

    if view.state() != ViewState::LoggedIn {
        output.message("Not signed in.");
        return Ok(());
    }

    let outcome = view.sign_out().await;
    if let Some(message) = finish(&view, outcome)? {
        output.success(&message);
    }
    Ok(())
}
