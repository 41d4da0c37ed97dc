//! Sync client capability
//!
//! Everything this crate knows about the hosted sync service goes through
//! [`SyncClient`]. Reads are synchronous views of state the client already
//! holds; commands are async round trips to the service.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ClientError;

/// Raw sync state record as the client reports it
///
/// Both fields may be missing; the phase reader applies the defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncStateRecord {
    #[serde(default)]
    pub phase: Option<String>,
    #[serde(default)]
    pub last_sync: Option<DateTime<Utc>>,
}

impl SyncStateRecord {
    pub fn with_phase(phase: impl Into<String>) -> Self {
        Self {
            phase: Some(phase.into()),
            last_sync: None,
        }
    }
}

/// Capability interface over the hosted sync service's client
///
/// The service's state can change between any two reads, so callers should
/// re-read rather than cache.
#[async_trait]
pub trait SyncClient: Send + Sync {
    /// Identifier of the signed-in user, if the client has one cached
    fn current_user_id(&self) -> Result<Option<String>, ClientError>;

    /// Email of the cached user object
    fn current_user_email(&self) -> Result<Option<String>, ClientError>;

    /// State reported by the running client in this process
    fn live_sync_state(&self) -> Result<Option<SyncStateRecord>, ClientError>;

    /// State persisted by an earlier run of the client
    fn persisted_sync_state(&self) -> Result<Option<SyncStateRecord>, ClientError>;

    /// Start the email login flow (the service delivers the link out of band)
    async fn login(&self, email: &str) -> Result<(), ClientError>;

    async fn logout(&self) -> Result<(), ClientError>;

    /// Ask the client to sync now
    async fn trigger_sync(&self) -> Result<(), ClientError>;
}
