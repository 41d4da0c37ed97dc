//! Sync phase reading
//!
//! Reads the client's self-reported phase, preferring the live state and
//! falling back to what an earlier run persisted.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::client::{SyncClient, SyncStateRecord};
use crate::error::ClientError;

/// Connection phase reported by the sync client
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Phase {
    Online,
    Syncing,
    Offline,
    /// The client has not reported a phase
    Unknown,
    /// Reading the client state failed
    Error,
    /// Any phase string this crate has no variant for
    Other(String),
}

impl Phase {
    pub fn as_str(&self) -> &str {
        match self {
            Phase::Online => "online",
            Phase::Syncing => "syncing",
            Phase::Offline => "offline",
            Phase::Unknown => "unknown",
            Phase::Error => "error",
            Phase::Other(s) => s,
        }
    }

    /// Parse a raw phase, treating a missing value as `Unknown`
    pub fn from_raw(raw: Option<&str>) -> Self {
        raw.map(Phase::from).unwrap_or(Phase::Unknown)
    }
}

impl From<&str> for Phase {
    fn from(s: &str) -> Self {
        match s {
            "online" => Phase::Online,
            "syncing" => Phase::Syncing,
            "offline" => Phase::Offline,
            "unknown" => Phase::Unknown,
            "error" => Phase::Error,
            other => Phase::Other(other.to_string()),
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Phase {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Phase {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(Phase::from(s.as_str()))
    }
}

/// Phase and last sync time, with defaults applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseInfo {
    pub phase: Phase,
    pub last_sync: Option<DateTime<Utc>>,
}

impl Default for PhaseInfo {
    fn default() -> Self {
        Self {
            phase: Phase::Unknown,
            last_sync: None,
        }
    }
}

impl From<SyncStateRecord> for PhaseInfo {
    fn from(record: SyncStateRecord) -> Self {
        Self {
            phase: Phase::from_raw(record.phase.as_deref()),
            last_sync: record.last_sync,
        }
    }
}

/// Reads [`PhaseInfo`] from a sync client
pub struct PhaseReader;

impl PhaseReader {
    /// Read the phase; never fails
    ///
    /// Any read error yields the empty record (`Unknown`, no last sync).
    pub fn read(client: &dyn SyncClient) -> PhaseInfo {
        Self::try_read(client).unwrap_or_else(|e| {
            debug!("Sync state unavailable, assuming unknown phase: {}", e);
            PhaseInfo::default()
        })
    }

    /// Read the phase, surfacing client errors
    pub fn try_read(client: &dyn SyncClient) -> Result<PhaseInfo, ClientError> {
        let record = match client.live_sync_state()? {
            Some(live) => Some(live),
            None => client.persisted_sync_state()?,
        };

        Ok(record.map(PhaseInfo::from).unwrap_or_default())
    }
}
