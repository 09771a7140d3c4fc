//! Per-item generation state machine.
//!
//! ```text
//! Idle ──start──▶ Generating ──complete──▶ Done
//!   ▲                 │  │                  │
//!   └────cancel───────┘  └──fail──▶ Error   │
//!                                     │     │
//!          start (regenerate) ◀───────┴─────┘
//! ```
//!
//! Every generation gets a fresh epoch. Asynchronous updates carry the epoch they were
//! started with and are dropped unless it is still the active one.

use crate::catalog::{CatalogItem, ItemId};
use crate::error::ApiError;
use serde::{Deserialize, Serialize};

/// Generation counter, bumped on every start.
pub type Epoch = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Idle,
    Generating,
    Done,
    Error,
}

impl JobStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            JobStatus::Idle => "idle",
            JobStatus::Generating => "generating",
            JobStatus::Done => "done",
            JobStatus::Error => "error",
        }
    }

    /// Done or Error.
    pub fn is_terminal(self) -> bool {
        matches!(self, JobStatus::Done | JobStatus::Error)
    }
}

/// Read-only view of a job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobSnapshot {
    pub item_id: ItemId,
    pub item_name: String,
    pub prompt: String,
    pub status: JobStatus,
    pub text: String,
    pub epoch: Epoch,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Generation state for one selected item.
#[derive(Debug, Clone)]
pub struct GenerationJob {
    item: CatalogItem,
    prompt: String,
    status: JobStatus,
    text: String,
    epoch: Epoch,
    active_epoch: Option<Epoch>,
    error: Option<String>,
}

impl GenerationJob {
    pub fn new(item: CatalogItem) -> Self {
        Self {
            item,
            prompt: String::new(),
            status: JobStatus::Idle,
            text: String::new(),
            epoch: 0,
            active_epoch: None,
            error: None,
        }
    }

    pub fn item(&self) -> &CatalogItem {
        &self.item
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn status(&self) -> JobStatus {
        self.status
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn epoch(&self) -> Epoch {
        self.epoch
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Edit the prompt. Rejected while a generation is running.
    pub fn set_prompt(&mut self, prompt: impl Into<String>) -> Result<(), ApiError> {
        if self.status == JobStatus::Generating {
            return Err(ApiError::JobBusy(self.item.id.to_string()));
        }
        self.prompt = prompt.into();
        Ok(())
    }

    /// Enter `Generating` with a fresh epoch, clearing previous output.
    ///
    /// Allowed from every state; from `Generating` the running generation is superseded.
    /// A blank prompt is rejected before anything changes.
    pub fn start_generation(&mut self, prompt: &str) -> Result<Epoch, ApiError> {
        if prompt.trim().is_empty() {
            return Err(ApiError::InvalidPrompt(format!(
                "prompt for '{}' is empty",
                self.item.id
            )));
        }
        self.epoch += 1;
        self.active_epoch = Some(self.epoch);
        self.prompt = prompt.to_string();
        self.status = JobStatus::Generating;
        self.text.clear();
        self.error = None;
        Ok(self.epoch)
    }

    /// True when `epoch` is the generation currently allowed to write.
    pub fn accepts(&self, epoch: Epoch) -> bool {
        self.status == JobStatus::Generating && self.active_epoch == Some(epoch)
    }

    /// Append a delta from generation `epoch`. Returns false for stale updates.
    pub fn append(&mut self, epoch: Epoch, delta: &str) -> bool {
        if !self.accepts(epoch) {
            return false;
        }
        self.text.push_str(delta);
        true
    }

    /// Freeze the text as `Done`. Returns false for stale updates.
    pub fn complete(&mut self, epoch: Epoch) -> bool {
        if !self.accepts(epoch) {
            return false;
        }
        self.status = JobStatus::Done;
        self.active_epoch = None;
        true
    }

    /// Move to `Error`, keeping the partial text. Returns false for stale updates.
    pub fn fail(&mut self, epoch: Epoch, reason: impl Into<String>) -> bool {
        if !self.accepts(epoch) {
            return false;
        }
        self.status = JobStatus::Error;
        self.active_epoch = None;
        self.error = Some(reason.into());
        true
    }

    /// Abandon a running generation and return to `Idle`.
    ///
    /// No-op (false) unless `Generating`. Partial output is discarded.
    pub fn cancel(&mut self) -> bool {
        if self.status != JobStatus::Generating {
            return false;
        }
        self.status = JobStatus::Idle;
        self.active_epoch = None;
        self.text.clear();
        true
    }

    pub fn snapshot(&self) -> JobSnapshot {
        JobSnapshot {
            item_id: self.item.id.clone(),
            item_name: self.item.name.clone(),
            prompt: self.prompt.clone(),
            status: self.status,
            text: self.text.clone(),
            epoch: self.epoch,
            error: self.error.clone(),
        }
    }
}
