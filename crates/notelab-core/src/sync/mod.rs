//! Sync client access
//!
//! The [`SyncClient`] trait is the only way this crate reaches the hosted
//! sync service. [`HttpSyncClient`] implements it over HTTP with an on-disk
//! cache; [`PhaseReader`] turns its raw state into a [`PhaseInfo`].
//!
//! ## Usage
//!
//! ```ignore
//! let client = HttpSyncClient::open(&config)?;
//! let info = PhaseReader::read(&client);
//! ```

mod cache;
mod client;
mod phase;
mod remote;

pub use cache::{CachedSession, SessionCache};
pub use client::{SyncClient, SyncStateRecord};
pub use phase::{Phase, PhaseInfo, PhaseReader};
pub use remote::HttpSyncClient;
