//! Deterministic in-memory sync client for tests

use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::ClientError;
use crate::sync::{SyncClient, SyncStateRecord};

#[derive(Default)]
struct FakeState {
    user_id: Option<String>,
    email: Option<String>,
    live: Option<SyncStateRecord>,
    persisted: Option<SyncStateRecord>,
}

/// Scriptable [`SyncClient`] that records the commands it receives
#[derive(Default)]
pub struct FakeSyncClient {
    state: Mutex<FakeState>,
    session_read_failure: Option<String>,
    phase_read_failure: Option<String>,
    command_failure: Option<String>,
    login_user_id: Option<String>,
    pub logins: Mutex<Vec<String>>,
    pub logouts: Mutex<usize>,
    pub syncs: Mutex<usize>,
}

impl FakeSyncClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(self, id: &str, email: Option<&str>) -> Self {
        {
            let mut state = self.state.lock().unwrap();
            state.user_id = Some(id.to_string());
            state.email = email.map(str::to_string);
        }
        self
    }

    pub fn with_email(self, email: &str) -> Self {
        self.state.lock().unwrap().email = Some(email.to_string());
        self
    }

    pub fn with_live(self, record: SyncStateRecord) -> Self {
        self.state.lock().unwrap().live = Some(record);
        self
    }

    pub fn with_persisted(self, record: SyncStateRecord) -> Self {
        self.state.lock().unwrap().persisted = Some(record);
        self
    }

    /// Replace the persisted record after construction
    pub fn set_persisted(&self, record: SyncStateRecord) {
        self.state.lock().unwrap().persisted = Some(record);
    }

    pub fn failing_session_reads(mut self, description: &str) -> Self {
        self.session_read_failure = Some(description.to_string());
        self
    }

    pub fn failing_phase_reads(mut self, description: &str) -> Self {
        self.phase_read_failure = Some(description.to_string());
        self
    }

    pub fn failing_reads(self, description: &str) -> Self {
        self.failing_session_reads(description)
            .failing_phase_reads(description)
    }

    /// Every command rejects with the given description
    pub fn failing_commands(mut self, description: &str) -> Self {
        self.command_failure = Some(description.to_string());
        self
    }

    /// A successful login signs the session in as `id`
    pub fn login_signs_in_as(mut self, id: &str) -> Self {
        self.login_user_id = Some(id.to_string());
        self
    }

    pub fn login_count(&self) -> usize {
        self.logins.lock().unwrap().len()
    }

    pub fn logout_count(&self) -> usize {
        *self.logouts.lock().unwrap()
    }

    pub fn sync_count(&self) -> usize {
        *self.syncs.lock().unwrap()
    }

    fn check_command(&self) -> Result<(), ClientError> {
        match &self.command_failure {
            Some(description) => Err(ClientError::Service(description.clone())),
            None => Ok(()),
        }
    }

    fn check_read(failure: &Option<String>) -> Result<(), ClientError> {
        match failure {
            Some(description) => Err(ClientError::Service(description.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl SyncClient for FakeSyncClient {
    fn current_user_id(&self) -> Result<Option<String>, ClientError> {
        Self::check_read(&self.session_read_failure)?;
        Ok(self.state.lock().unwrap().user_id.clone())
    }

    fn current_user_email(&self) -> Result<Option<String>, ClientError> {
        Self::check_read(&self.session_read_failure)?;
        Ok(self.state.lock().unwrap().email.clone())
    }

    fn live_sync_state(&self) -> Result<Option<SyncStateRecord>, ClientError> {
        Self::check_read(&self.phase_read_failure)?;
        Ok(self.state.lock().unwrap().live.clone())
    }

    fn persisted_sync_state(&self) -> Result<Option<SyncStateRecord>, ClientError> {
        Self::check_read(&self.phase_read_failure)?;
        Ok(self.state.lock().unwrap().persisted.clone())
    }

    async fn login(&self, email: &str) -> Result<(), ClientError> {
        self.logins.lock().unwrap().push(email.to_string());
        self.check_command()?;

        if let Some(ref id) = self.login_user_id {
            let mut state = self.state.lock().unwrap();
            state.user_id = Some(id.clone());
            state.email = Some(email.to_string());
        }
        Ok(())
    }

    async fn logout(&self) -> Result<(), ClientError> {
        *self.logouts.lock().unwrap() += 1;
        self.check_command()?;

        let mut state = self.state.lock().unwrap();
        state.user_id = None;
        state.email = None;
        state.live = None;
        Ok(())
    }

    async fn trigger_sync(&self) -> Result<(), ClientError> {
        *self.syncs.lock().unwrap() += 1;
        self.check_command()?;

        self.state.lock().unwrap().live = Some(SyncStateRecord::with_phase("syncing"));
        Ok(())
    }
}
