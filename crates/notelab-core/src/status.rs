//! Status reconciliation
//!
//! Combines the session identity and the sync phase into one status the UI
//! can render. The two inputs are read independently and may disagree; the
//! rules below decide what to show.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::warn;

use crate::session::{Identity, SessionReader};
use crate::sync::{Phase, PhaseInfo, PhaseReader, SyncClient};

/// Status shown to the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncStatus {
    pub is_online: bool,
    pub is_syncing: bool,
    pub phase: Phase,
    pub last_sync: Option<DateTime<Utc>>,
    pub is_logged_in: bool,
}

impl SyncStatus {
    /// Status used when the client state could not be read
    pub fn error() -> Self {
        Self {
            is_online: false,
            is_syncing: false,
            phase: Phase::Error,
            last_sync: None,
            is_logged_in: false,
        }
    }

    /// One-word summary: syncing, online or offline
    pub fn label(&self) -> &'static str {
        if self.is_syncing {
            "syncing"
        } else if self.is_online {
            "online"
        } else {
            "offline"
        }
    }
}

/// Derive the status from an identity and phase
///
/// A signed-in session whose phase is still unknown counts as online: right
/// after sign-in the client has not reported a phase yet.
pub fn reconcile(identity: &Identity, info: &PhaseInfo) -> SyncStatus {
    let is_syncing = info.phase == Phase::Syncing;
    let is_online =
        info.phase == Phase::Online || (identity.is_logged_in && info.phase == Phase::Unknown);

    SyncStatus {
        is_online,
        is_syncing,
        phase: info.phase.clone(),
        last_sync: info.last_sync,
        is_logged_in: identity.is_logged_in,
    }
}

/// Read the client and reconcile
///
/// If either read fails the error is logged and the anonymous identity with
/// [`SyncStatus::error`] is returned instead.
pub fn reconcile_client(client: &dyn SyncClient) -> (Identity, SyncStatus) {
    let reads = SessionReader::try_read(client)
        .and_then(|identity| PhaseReader::try_read(client).map(|info| (identity, info)));

    match reads {
        Ok((identity, info)) => {
            let status = reconcile(&identity, &info);
            (identity, status)
        }
        Err(e) => {
            warn!("Failed to read sync client state: {}", e);
            (Identity::anonymous(), SyncStatus::error())
        }
    }
}
