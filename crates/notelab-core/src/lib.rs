//! NoteLab Core Library
//!
//! Account and sync status for the NoteLab notes app. Syncing, conflict
//! resolution and authentication all happen in a hosted sync service; this
//! crate reads that service's client state and turns it into something a UI
//! can show.
//!
//! # Architecture
//!
//! - **SyncClient**: capability trait over the hosted service's client
//! - **SessionReader** / **PhaseReader**: raw reads with explicit defaults
//! - **reconcile**: one consistent status from both reads
//! - **CommandDispatcher**: sign in, sign out, sync now
//! - **StatusView**: the state machine a UI renders
//!
//! # Quick Start
//!
//! ```text
//! let config = Config::load()?;
//! let client = Arc::new(HttpSyncClient::open(&config)?);
//! let mut view = StatusView::mount(client);
//!
//! view.toggle_form();
//! view.set_email("ada@example.com");
//! view.submit_sign_in().await;
//! println!("{}", view.status().label());
//! ```
//!
//! # Modules
//!
//! - `config`: Application configuration
//! - `session`: Identity classification
//! - `sync`: Sync client trait, HTTP client, phase reading
//! - `status`: Status reconciliation
//! - `dispatch`: Command dispatch and messages
//! - `view`: Status view state machine

pub mod config;
pub mod dispatch;
pub mod error;
pub mod session;
pub mod status;
pub mod sync;
pub mod view;

#[cfg(test)]
mod testing;

pub use config::Config;
pub use dispatch::{Command, CommandDispatcher, CommandOutcome};
pub use error::ClientError;
pub use session::{Identity, SessionReader, UNAUTHORIZED_USER_ID};
pub use status::{reconcile, reconcile_client, SyncStatus};
pub use sync::{HttpSyncClient, Phase, PhaseInfo, PhaseReader, SyncClient, SyncStateRecord};
pub use view::{StatusView, ViewState};
