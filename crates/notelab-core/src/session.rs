//! Session identity
//!
//! Classifies the sync client's cached user as signed in or anonymous.

use serde::Serialize;
use tracing::debug;

use crate::error::ClientError;
use crate::sync::SyncClient;

/// User id the sync service hands out to sessions that are not signed in
pub const UNAUTHORIZED_USER_ID: &str = "unauthorized";

/// Identity derived from the client's cached session
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Identity {
    pub id: Option<String>,
    pub email: Option<String>,
    pub is_logged_in: bool,
}

impl Identity {
    /// Build an identity from raw fields
    ///
    /// Signed in only if an id is present and it is not the unauthorized
    /// sentinel. The email has no say.
    pub fn new(id: Option<String>, email: Option<String>) -> Self {
        let is_logged_in = id.as_deref().is_some_and(|id| id != UNAUTHORIZED_USER_ID);
        Self {
            id,
            email,
            is_logged_in,
        }
    }

    pub fn anonymous() -> Self {
        Self::default()
    }
}

/// Reads the [`Identity`] from a sync client
pub struct SessionReader;

impl SessionReader {
    /// Read the identity; never fails
    ///
    /// Any read error is treated as not signed in.
    pub fn read(client: &dyn SyncClient) -> Identity {
        Self::try_read(client).unwrap_or_else(|e| {
            debug!("Session unavailable, treating as anonymous: {}", e);
            Identity::anonymous()
        })
    }

    /// Read the identity, surfacing client errors
    pub fn try_read(client: &dyn SyncClient) -> Result<Identity, ClientError> {
        let id = client.current_user_id()?;
        let email = client.current_user_email()?;
        Ok(Identity::new(id, email))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeSyncClient;

    #[test]
    fn test_signed_in_user() {
        let client = FakeSyncClient::new().with_user("u-123", Some("ada@example.com"));
        let identity = SessionReader::read(&client);

        assert!(identity.is_logged_in);
        assert_eq!(identity.id.as_deref(), Some("u-123"));
        assert_eq!(identity.email.as_deref(), Some("ada@example.com"));
    }

    #[test]
    fn test_unauthorized_is_not_logged_in() {
        let client = FakeSyncClient::new().with_user("unauthorized", Some("ada@example.com"));
        let identity = SessionReader::read(&client);

        assert!(!identity.is_logged_in);
        assert_eq!(identity.email.as_deref(), Some("ada@example.com"));
    }

    #[test]
    fn test_email_without_id_is_not_logged_in() {
        let client = FakeSyncClient::new().with_email("ada@example.com");
        assert!(!SessionReader::read(&client).is_logged_in);
    }

    #[test]
    fn test_no_session() {
        let client = FakeSyncClient::new();
        assert_eq!(SessionReader::read(&client), Identity::anonymous());
    }

    #[test]
    fn test_read_never_fails() {
        let client = FakeSyncClient::new()
            .with_user("u-123", None)
            .failing_session_reads("keychain locked");

        assert_eq!(SessionReader::read(&client), Identity::anonymous());

        let err = SessionReader::try_read(&client).unwrap_err();
        assert_eq!(err.to_string(), "keychain locked");
    }
}
