//! Command dispatch
//!
//! Issues sign-in, sign-out and manual sync commands to the sync client and
//! turns their outcome into a message for the user. Failures never escape
//! this module.

use std::sync::Arc;

use tracing::{info, warn};

use crate::error::ClientError;
use crate::sync::SyncClient;

pub const SIGN_IN_MESSAGE: &str = "Check your email for the login link!";
pub const SIGN_OUT_MESSAGE: &str = "Signed out successfully";
pub const SYNC_MESSAGE: &str = "Sync triggered";

/// Commands the dispatcher can issue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    SignIn,
    SignOut,
    ForceSync,
}

impl Command {
    /// Name used in failure messages
    pub fn action(self) -> &'static str {
        match self {
            Command::SignIn => "Sign in",
            Command::SignOut => "Sign out",
            Command::ForceSync => "Sync",
        }
    }

    fn success_message(self) -> &'static str {
        match self {
            Command::SignIn => SIGN_IN_MESSAGE,
            Command::SignOut => SIGN_OUT_MESSAGE,
            Command::ForceSync => SYNC_MESSAGE,
        }
    }

    /// `"<Action> failed: <description>"`
    pub fn failure_message(self, error: &ClientError) -> String {
        format!("{} failed: {}", self.action(), error)
    }
}

/// How a dispatched command ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    Succeeded,
    Failed,
    /// Rejected locally, the client was not called
    Skipped,
}

/// Clears the busy flag when dropped, on every exit path
struct BusyGuard<'a>(&'a mut bool);

impl<'a> BusyGuard<'a> {
    fn acquire(flag: &'a mut bool) -> Self {
        *flag = true;
        Self(flag)
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        *self.0 = false;
    }
}

/// Issues commands and holds the resulting message
pub struct CommandDispatcher {
    client: Arc<dyn SyncClient>,
    busy: bool,
    message: Option<String>,
    email: String,
}

impl CommandDispatcher {
    pub fn new(client: Arc<dyn SyncClient>) -> Self {
        Self {
            client,
            busy: false,
            message: None,
            email: String::new(),
        }
    }

    /// Whether a command is in flight
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Message from the last command, if any
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// The email input buffer
    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.email = email.into();
    }

    pub fn email_mut(&mut self) -> &mut String {
        &mut self.email
    }

    /// Start the email login flow for the buffered address
    ///
    /// A blank address is a no-op. On success the buffer is cleared.
    pub async fn sign_in(&mut self) -> CommandOutcome {
        let email = self.email.trim().to_string();
        if email.is_empty() {
            return CommandOutcome::Skipped;
        }

        let client = Arc::clone(&self.client);
        let outcome = self
            .run(Command::SignIn, async move { client.login(&email).await })
            .await;

        if outcome == CommandOutcome::Succeeded {
            self.email.clear();
        }
        outcome
    }

    pub async fn sign_out(&mut self) -> CommandOutcome {
        let client = Arc::clone(&self.client);
        self.run(Command::SignOut, async move { client.logout().await })
            .await
    }

    pub async fn force_sync(&mut self) -> CommandOutcome {
        let client = Arc::clone(&self.client);
        self.run(Command::ForceSync, async move { client.trigger_sync().await })
            .await
    }

    async fn run<F>(&mut self, command: Command, call: F) -> CommandOutcome
    where
        F: std::future::Future<Output = Result<(), ClientError>>,
    {
        let _busy = BusyGuard::acquire(&mut self.busy);
        self.message = None;

        info!("{} requested", command.action());
        match call.await {
            Ok(()) => {
                info!("{} succeeded", command.action());
                self.message = Some(command.success_message().to_string());
                CommandOutcome::Succeeded
            }
            Err(e) => {
                warn!("{} failed: {}", command.action(), e);
                self.message = Some(command.failure_message(&e));
                CommandOutcome::Failed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeSyncClient;

    fn dispatcher(client: &Arc<FakeSyncClient>) -> CommandDispatcher {
        CommandDispatcher::new(Arc::clone(client) as Arc<dyn SyncClient>)
    }

    #[tokio::test]
    async fn test_sign_in_with_empty_email_is_skipped() {
        let client = Arc::new(FakeSyncClient::new());
        let mut dispatcher = dispatcher(&client);
        dispatcher.set_email("   ");

        assert_eq!(dispatcher.sign_in().await, CommandOutcome::Skipped);
        assert_eq!(client.login_count(), 0);
        assert_eq!(dispatcher.message(), None);
        assert_eq!(dispatcher.email(), "   ");
        assert!(!dispatcher.is_busy());
    }

    #[tokio::test]
    async fn test_sign_in_success() {
        let client = Arc::new(FakeSyncClient::new());
        let mut dispatcher = dispatcher(&client);
        dispatcher.set_email(" a@b.com ");

        assert_eq!(dispatcher.sign_in().await, CommandOutcome::Succeeded);
        assert_eq!(dispatcher.message(), Some("Check your email for the login link!"));
        assert_eq!(dispatcher.email(), "");
        assert!(!dispatcher.is_busy());
        assert_eq!(client.logins.lock().unwrap().as_slice(), ["a@b.com"]);
    }

    #[tokio::test]
    async fn test_sign_in_failure_keeps_email() {
        let client = Arc::new(FakeSyncClient::new().failing_commands("network down"));
        let mut dispatcher = dispatcher(&client);
        dispatcher.set_email("a@b.com");

        assert_eq!(dispatcher.sign_in().await, CommandOutcome::Failed);
        assert_eq!(dispatcher.message(), Some("Sign in failed: network down"));
        assert_eq!(dispatcher.email(), "a@b.com");
        assert!(!dispatcher.is_busy());
    }

    #[tokio::test]
    async fn test_sign_out() {
        let client = Arc::new(FakeSyncClient::new().with_user("u-1", None));
        let mut dispatcher = dispatcher(&client);

        assert_eq!(dispatcher.sign_out().await, CommandOutcome::Succeeded);
        assert_eq!(dispatcher.message(), Some("Signed out successfully"));
        assert_eq!(client.logout_count(), 1);
    }

    #[tokio::test]
    async fn test_force_sync() {
        let client = Arc::new(FakeSyncClient::new());
        let mut dispatcher = dispatcher(&client);

        assert_eq!(dispatcher.force_sync().await, CommandOutcome::Succeeded);
        assert_eq!(dispatcher.message(), Some("Sync triggered"));
        assert_eq!(client.sync_count(), 1);
    }

    #[tokio::test]
    async fn test_failures_report_action_and_release_busy() {
        let client = Arc::new(FakeSyncClient::new().failing_commands("network down"));
        let mut dispatcher = dispatcher(&client);

        assert_eq!(dispatcher.sign_out().await, CommandOutcome::Failed);
        assert_eq!(dispatcher.message(), Some("Sign out failed: network down"));
        assert!(!dispatcher.is_busy());

        assert_eq!(dispatcher.force_sync().await, CommandOutcome::Failed);
        assert_eq!(dispatcher.message(), Some("Sync failed: network down"));
        assert!(!dispatcher.is_busy());
    }

    #[tokio::test]
    async fn test_new_command_replaces_message() {
        let client = Arc::new(FakeSyncClient::new());
        let mut dispatcher = dispatcher(&client);

        dispatcher.force_sync().await;
        dispatcher.sign_out().await;
        assert_eq!(dispatcher.message(), Some("Signed out successfully"));
    }

    #[test]
    fn test_busy_guard_releases_on_drop() {
        let mut busy = false;
        {
            let _guard = BusyGuard::acquire(&mut busy);
        }
        assert!(!busy);
    }
}
