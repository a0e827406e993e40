//! Client for the Todoist Sync API.
//!
//! The client keeps a local [`SyncState`] that successive sync responses
//! advance. Reads and writes share one endpoint: committing label changes
//! is a sync request with commands attached, and the response folds the
//! acknowledged changes straight back into the local state.

pub mod cache;
pub mod protocol;

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{StoreError, StoreResult};
use crate::reconcile::ItemUpdate;
use crate::snapshot::Snapshot;
use crate::types::{Item, ItemId, Label, LabelId, Project, ProjectId};
use protocol::{Command, FULL_SYNC_TOKEN, SyncRequest, SyncResponse};

/// Production endpoint.
const API_BASE_URL: &str = "https://api.todoist.com";
const SYNC_PATH: &str = "/sync/v8/sync";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Accumulated resource state, advanced by successive sync responses.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SyncState {
    pub sync_token: String,
    pub projects: HashMap<ProjectId, Project>,
    pub items: HashMap<ItemId, Item>,
    pub labels: HashMap<LabelId, Label>,
}

impl SyncState {
    /// Folds one response into the state. A full sync replaces everything;
    /// an incremental one upserts changed resources and drops tombstones.
    fn apply(&mut self, response: SyncResponse) {
        if response.full_sync {
            self.projects.clear();
            self.items.clear();
            self.labels.clear();
        }
        for project in response.projects {
            if project.is_deleted {
                self.projects.remove(&project.id);
            } else {
                self.projects.insert(project.id, project);
            }
        }
        for item in response.items {
            if item.is_deleted {
                self.items.remove(&item.id);
            } else {
                self.items.insert(item.id, item);
            }
        }
        for label in response.labels {
            if label.is_deleted {
                self.labels.remove(&label.id);
            } else {
                self.labels.insert(label.id, label);
            }
        }
        self.sync_token = response.sync_token;
    }
}

pub struct TodoistApi {
    http: Client,
    base_url: String,
    token: String,
    cache_path: Option<PathBuf>,
    state: SyncState,
}

impl TodoistApi {
    /// `cache_path` carries state across restarts; `None` means every run
    /// starts from a full sync.
    pub fn new(token: impl Into<String>, cache_path: Option<PathBuf>) -> StoreResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()?;
        let state = cache_path
            .as_deref()
            .and_then(cache::load)
            .unwrap_or_default();
        Ok(Self {
            http,
            base_url: API_BASE_URL.to_string(),
            token: token.into(),
            cache_path,
            state,
        })
    }

    /// Points the client at a different endpoint. Used by tests.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Pulls the latest changes into the local state.
    pub async fn sync(&mut self) -> StoreResult<()> {
        let request = SyncRequest::new(self.current_token(), Vec::new());
        let response = self.post(&request).await?;
        let full = response.full_sync;
        self.state.apply(response);
        self.persist();
        debug!(
            full_sync = full,
            projects = self.state.projects.len(),
            items = self.state.items.len(),
            "synced"
        );
        Ok(())
    }

    /// Sends queued label rewrites. Acknowledged changes are folded back
    /// into the local state even when some commands are rejected; rejected
    /// ones surface as an error and the next cycle re-derives them.
    pub async fn commit(&mut self, updates: &[ItemUpdate]) -> StoreResult<()> {
        let commands: Vec<Command> = updates.iter().map(Command::item_update).collect();
        let total = commands.len();
        let request = SyncRequest::new(self.current_token(), commands);
        let response = self.post(&request).await?;

        let mut rejected = 0;
        for (uuid, status) in &response.sync_status {
            if !status.is_ok() {
                rejected += 1;
                warn!(
                    %uuid,
                    error = status.error_message().unwrap_or("unknown"),
                    "change rejected by the store"
                );
            }
        }

        self.state.apply(response);
        self.persist();

        if rejected > 0 {
            return Err(StoreError::Rejected { rejected, total });
        }
        Ok(())
    }

    /// Exact-name lookup of a label.
    pub fn resolve_label(&self, name: &str) -> Option<LabelId> {
        self.state
            .labels
            .values()
            .find(|label| label.name == name)
            .map(|label| label.id)
    }

    /// Working copy of the current state for one propagation cycle.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::new(
            self.state.projects.values().cloned().collect(),
            self.state.items.values().cloned().collect(),
        )
    }

    fn current_token(&self) -> &str {
        if self.state.sync_token.is_empty() {
            FULL_SYNC_TOKEN
        } else {
            &self.state.sync_token
        }
    }

    async fn post(&self, request: &SyncRequest) -> StoreResult<SyncResponse> {
        let url = format!("{}{}", self.base_url, SYNC_PATH);
        debug!(url = %url, commands = request.commands.len(), "sync request");
        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.token)
            .json(request)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(StoreError::Api {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response.json().await?)
    }

    fn persist(&self) {
        if let Some(path) = &self.cache_path {
            cache::save(path, &self.state);
        }
    }
}
