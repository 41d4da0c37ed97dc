//! HTTP sync client
//!
//! Talks to the hosted sync service over a small JSON command API and keeps
//! the service's answers in a local cache:
//!
//! - `POST {base}/auth/login` with `{"email": ...}` starts the email login flow
//! - `POST {base}/auth/logout` ends the session
//! - `POST {base}/sync` asks the service to sync now
//!
//! Every successful reply is a snapshot (`userId`, `email`, `accessToken`,
//! `phase`, `lastSync`, all optional) that is applied to the cache. Reads never
//! touch the network.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::cache::{CachedSession, SessionCache};
use super::client::{SyncClient, SyncStateRecord};
use super::phase::Phase;
use crate::config::Config;
use crate::error::ClientError;

/// Snapshot returned by the service after a command
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ServiceReply {
    #[serde(default)]
    user_id: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    access_token: Option<String>,
    #[serde(default)]
    phase: Option<String>,
    #[serde(default)]
    last_sync: Option<DateTime<Utc>>,
}

impl ServiceReply {
    fn sync_state(&self) -> Option<SyncStateRecord> {
        if self.phase.is_none() && self.last_sync.is_none() {
            return None;
        }
        Some(SyncStateRecord {
            phase: self.phase.clone(),
            last_sync: self.last_sync,
        })
    }
}

#[derive(Debug, Deserialize)]
struct ErrorReply {
    error: Option<String>,
}

/// [`SyncClient`] backed by the hosted service's HTTP API
pub struct HttpSyncClient {
    base_url: String,
    http: reqwest::Client,
    cache: SessionCache,
    session: watch::Sender<CachedSession>,
    /// Why the cached session could not be loaded, until a reply replaces it
    session_fault: Mutex<Option<String>>,
    live: watch::Sender<Option<SyncStateRecord>>,
}

impl HttpSyncClient {
    /// Create a client for `base_url`, loading the cached session
    ///
    /// An unreadable session file does not stop the client from opening:
    /// session reads report the failure until a command replaces the session.
    pub fn new(base_url: &str, cache: SessionCache) -> Result<Self, ClientError> {
        let (session, fault) = match cache.load_session() {
            Ok(session) => (session.unwrap_or_default(), None),
            Err(e) => {
                warn!("Cached session unreadable: {}", e);
                (CachedSession::default(), Some(e.to_string()))
            }
        };
        let (session_tx, _) = watch::channel(session);
        let (live_tx, _) = watch::channel(None);

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
            cache,
            session: session_tx,
            session_fault: Mutex::new(fault),
            live: live_tx,
        })
    }

    /// Create a client from the configured sync URL and data directory
    pub fn open(config: &Config) -> Result<Self, ClientError> {
        let Some(ref url) = config.sync_url else {
            return Err(ClientError::NotConfigured);
        };
        Self::new(url, SessionCache::from_config(config))
    }

    /// Subscribe to live sync state changes
    pub fn subscribe_live(&self) -> watch::Receiver<Option<SyncStateRecord>> {
        self.live.subscribe()
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    async fn post(
        &self,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<ServiceReply, ClientError> {
        let url = self.endpoint(path);
        debug!("POST {}", url);

        let token = self.session.borrow().access_token.clone();
        let mut request = self.http.post(&url);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ErrorReply>()
                .await
                .ok()
                .and_then(|reply| reply.error)
                .unwrap_or_else(|| {
                    status
                        .canonical_reason()
                        .unwrap_or("Request failed")
                        .to_string()
                });
            return Err(ClientError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let bytes = response.bytes().await?;
        if bytes.is_empty() {
            return Ok(ServiceReply::default());
        }
        serde_json::from_slice(&bytes)
            .map_err(|e| ClientError::Service(format!("Invalid reply from sync service: {}", e)))
    }

    fn check_session(&self) -> Result<(), ClientError> {
        let fault = self
            .session_fault
            .lock()
            .unwrap_or_else(|e| e.into_inner());
        match fault.as_ref() {
            Some(description) => Err(ClientError::Service(description.clone())),
            None => Ok(()),
        }
    }

    fn replace_session(&self, session: CachedSession) {
        self.session_fault
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .take();
        self.session.send_replace(session);
    }

    fn set_session(&self, session: CachedSession) {
        if let Err(e) = self.cache.save_session(&session) {
            warn!("Failed to cache session: {}", e);
        }
        self.replace_session(session);
    }

    fn clear_session(&self) {
        if let Err(e) = self.cache.clear_session() {
            warn!("Failed to clear cached session: {}", e);
        }
        self.replace_session(CachedSession::default());
    }

    fn set_live(&self, state: SyncStateRecord, persist: bool) {
        if persist {
            if let Err(e) = self.cache.save_state(&state) {
                warn!("Failed to persist sync state: {}", e);
            }
        }
        self.live.send_replace(Some(state));
    }

    /// Publish the phase a failed command leaves behind
    ///
    /// An unreachable service is offline whatever the command. A rejection
    /// only marks the sync phase as failed when the command was a sync.
    fn mark_failed(&self, error: &ClientError, syncing: bool) {
        let phase = if error.is_transport() {
            Phase::Offline
        } else if syncing {
            Phase::Error
        } else {
            return;
        };
        let last_sync = self.live.borrow().as_ref().and_then(|s| s.last_sync);
        self.set_live(
            SyncStateRecord {
                phase: Some(phase.to_string()),
                last_sync,
            },
            false,
        );
    }
}

#[async_trait]
impl SyncClient for HttpSyncClient {
    fn current_user_id(&self) -> Result<Option<String>, ClientError> {
        self.check_session()?;
        Ok(self.session.borrow().user_id.clone())
    }

    fn current_user_email(&self) -> Result<Option<String>, ClientError> {
        self.check_session()?;
        Ok(self.session.borrow().email.clone())
    }

    fn live_sync_state(&self) -> Result<Option<SyncStateRecord>, ClientError> {
        Ok(self.live.borrow().clone())
    }

    fn persisted_sync_state(&self) -> Result<Option<SyncStateRecord>, ClientError> {
        self.cache.load_state()
    }

    async fn login(&self, email: &str) -> Result<(), ClientError> {
        info!("Requesting login link for {}", email);
        let reply = match self
            .post("auth/login", Some(serde_json::json!({ "email": email })))
            .await
        {
            Ok(reply) => reply,
            Err(e) => {
                self.mark_failed(&e, false);
                return Err(e);
            }
        };

        // The service may sign the session in straight away; otherwise the
        // link in the email finishes the flow and a later reply carries the id
        if reply.user_id.is_some() {
            self.set_session(CachedSession {
                user_id: reply.user_id.clone(),
                email: reply.email.clone().or_else(|| Some(email.to_string())),
                access_token: reply.access_token.clone(),
            });
        }
        if let Some(state) = reply.sync_state() {
            self.set_live(state, true);
        }
        Ok(())
    }

    async fn logout(&self) -> Result<(), ClientError> {
        info!("Signing out");
        let reply = match self.post("auth/logout", None).await {
            Ok(reply) => reply,
            Err(e) => {
                self.mark_failed(&e, false);
                return Err(e);
            }
        };

        self.clear_session();
        if let Some(state) = reply.sync_state() {
            self.set_live(state, true);
        }
        Ok(())
    }

    async fn trigger_sync(&self) -> Result<(), ClientError> {
        info!("Triggering sync");
        let previous = self.live.borrow().as_ref().and_then(|s| s.last_sync);
        self.set_live(
            SyncStateRecord {
                phase: Some(Phase::Syncing.to_string()),
                last_sync: previous,
            },
            false,
        );

        let reply = match self.post("sync", None).await {
            Ok(reply) => reply,
            Err(e) => {
                self.mark_failed(&e, true);
                return Err(e);
            }
        };

        if reply.user_id.is_some() {
            let current = self.session.borrow().clone();
            self.set_session(CachedSession {
                user_id: reply.user_id.clone(),
                email: reply.email.clone().or(current.email),
                access_token: reply.access_token.clone().or(current.access_token),
            });
        }

        let state = SyncStateRecord {
            phase: Some(
                reply
                    .phase
                    .clone()
                    .unwrap_or_else(|| Phase::Online.to_string()),
            ),
            last_sync: reply.last_sync.or_else(|| Some(Utc::now())),
        };
        self.set_live(state, true);
        Ok(())
    }
}
