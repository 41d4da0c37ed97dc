//! Status view model
//!
//! State machine behind the account/sync panel. It owns the reconciled status
//! and the command dispatcher, and re-runs the reconciler after every command
//! so the rendered status always reflects a fresh read of the client.
//!
//! ```text
//!   LoggedOut <--toggle--> LoggedOutFormOpen
//!       ^                         |
//!       |  sign out          sign in + refresh
//!       |                         v
//!       +------------------- LoggedIn
//! ```

use std::sync::Arc;

use tracing::debug;

use crate::dispatch::{Command, CommandDispatcher, CommandOutcome};
use crate::session::Identity;
use crate::status::{reconcile_client, SyncStatus};
use crate::sync::{Phase, SyncClient};

/// Which panel the view shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    LoggedOut,
    LoggedOutFormOpen,
    LoggedIn,
}

/// View model for the sync status panel
pub struct StatusView {
    client: Arc<dyn SyncClient>,
    dispatcher: CommandDispatcher,
    identity: Identity,
    status: SyncStatus,
    form_open: bool,
}

impl StatusView {
    /// Create the view and run the first reconciliation
    pub fn mount(client: Arc<dyn SyncClient>) -> Self {
        let dispatcher = CommandDispatcher::new(Arc::clone(&client));
        let mut view = Self {
            client,
            dispatcher,
            identity: Identity::anonymous(),
            status: SyncStatus {
                is_online: false,
                is_syncing: false,
                phase: Phase::Unknown,
                last_sync: None,
                is_logged_in: false,
            },
            form_open: false,
        };
        view.refresh();
        view
    }

    /// Re-read the client and reconcile
    pub fn refresh(&mut self) {
        let (identity, status) = reconcile_client(self.client.as_ref());
        debug!(
            "Reconciled status: logged_in={}, phase={}, label={}",
            identity.is_logged_in,
            status.phase,
            status.label()
        );

        if identity.is_logged_in {
            self.form_open = false;
        }
        self.identity = identity;
        self.status = status;
    }

    pub fn state(&self) -> ViewState {
        if self.identity.is_logged_in {
            ViewState::LoggedIn
        } else if self.form_open {
            ViewState::LoggedOutFormOpen
        } else {
            ViewState::LoggedOut
        }
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    pub fn status(&self) -> &SyncStatus {
        &self.status
    }

    pub fn is_busy(&self) -> bool {
        self.dispatcher.is_busy()
    }

    pub fn message(&self) -> Option<&str> {
        self.dispatcher.message()
    }

    pub fn email(&self) -> &str {
        self.dispatcher.email()
    }

    pub fn email_mut(&mut self) -> &mut String {
        self.dispatcher.email_mut()
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.dispatcher.set_email(email);
    }

    /// Show or hide the login form; only while logged out
    pub fn toggle_form(&mut self) {
        if !self.identity.is_logged_in {
            self.form_open = !self.form_open;
        }
    }

    pub fn close_form(&mut self) {
        self.form_open = false;
    }

    /// Commands offered in the current state
    pub fn available_commands(&self) -> Vec<Command> {
        match self.state() {
            ViewState::LoggedOut => Vec::new(),
            ViewState::LoggedOutFormOpen => vec![Command::SignIn],
            ViewState::LoggedIn => vec![Command::SignOut, Command::ForceSync],
        }
    }

    /// Submit the login form
    ///
    /// Returns `None` if sign-in is not offered right now.
    pub async fn submit_sign_in(&mut self) -> Option<CommandOutcome> {
        self.execute(Command::SignIn).await
    }

    pub async fn sign_out(&mut self) -> Option<CommandOutcome> {
        self.execute(Command::SignOut).await
    }

    pub async fn force_sync(&mut self) -> Option<CommandOutcome> {
        self.execute(Command::ForceSync).await
    }

    /// Dispatch a command if it is offered, then reconcile
    pub async fn execute(&mut self, command: Command) -> Option<CommandOutcome> {
        if !self.available_commands().contains(&command) {
            debug!("Ignoring {:?} in state {:?}", command, self.state());
            return None;
        }

        let outcome = match command {
            Command::SignIn => self.dispatcher.sign_in().await,
            Command::SignOut => self.dispatcher.sign_out().await,
            Command::ForceSync => self.dispatcher.force_sync().await,
        };

        // Skipped commands changed nothing
        if outcome != CommandOutcome::Skipped {
            self.refresh();
        }
        Some(outcome)
    }
}
