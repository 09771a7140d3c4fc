//! Skill-building session
//!
//! [`SkillSession`] is the single owner of everything a user builds up in one run: the
//! instance settings, the selection, the per-item jobs and the current wizard step.
//! Every mutation goes through one of its methods so the selection and the job table can
//! never drift apart.

use crate::catalog::{CatalogItem, CatalogPage, CatalogQuery, CatalogSource, ItemId};
use crate::config::{DeploymentMode, SkillwrightConfig};
use crate::error::ApiError;
use crate::job::{Epoch, JobSnapshot, JobStatus};
use crate::registry::{
    register_agent, RegistrationReceipt, RegistrationRequest, RegistrationService,
    TransactionSigner,
};
use crate::scheduler::{GenerationScheduler, JobEvent};
use crate::selection::{SelectionSet, ToggleOutcome};
use crate::transport::GenerationTransport;
use crate::wizard::{GateInput, WizardGate, WizardStep};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{debug, info};

/// Where the agent the skills are built for is running.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceSettings {
    pub mode: DeploymentMode,
    pub instance_url: String,
}

impl InstanceSettings {
    pub fn from_config(config: &SkillwrightConfig) -> Self {
        Self {
            mode: config.instance.mode,
            instance_url: config.instance.instance_url.clone(),
        }
    }
}

pub struct SkillSession {
    settings: Option<InstanceSettings>,
    catalog: Arc<dyn CatalogSource>,
    selection: SelectionSet,
    scheduler: GenerationScheduler,
    step: WizardStep,
}

impl SkillSession {
    pub fn new(
        config: &SkillwrightConfig,
        catalog: Arc<dyn CatalogSource>,
        transport: Arc<dyn GenerationTransport>,
    ) -> Self {
        Self {
            settings: None,
            catalog,
            selection: SelectionSet::new(config.selection.capacity),
            scheduler: GenerationScheduler::with_event_capacity(
                transport,
                config.generation.event_capacity,
            ),
            step: WizardStep::Configure,
        }
    }

    pub fn configure(&mut self, settings: InstanceSettings) {
        debug!(mode = ?settings.mode, instance_url = %settings.instance_url, "Instance configured");
        self.settings = Some(settings);
    }

    pub fn settings(&self) -> Option<&InstanceSettings> {
        self.settings.as_ref()
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn browse(&self, query: &CatalogQuery) -> CatalogPage {
        self.catalog.query(query)
    }

    /// Add or remove an item, creating or destroying its job.
    ///
    /// Adding beyond capacity is silently ignored. An id unknown to the catalog is
    /// rejected with `ItemNotFound` unless it is already selected.
    pub fn toggle(&mut self, item_id: &ItemId) -> Result<ToggleOutcome, ApiError> {
        if self.selection.contains(item_id) {
            self.selection.toggle(item_id);
            self.scheduler.detach(item_id);
            debug!(item_id = %item_id, "Item deselected");
            return Ok(ToggleOutcome::Removed);
        }

        let item = self
            .catalog
            .get(item_id)
            .ok_or_else(|| ApiError::ItemNotFound(item_id.to_string()))?;
        let outcome = self.selection.toggle(item_id);
        match outcome {
            ToggleOutcome::Added => {
                self.scheduler.attach(item);
                debug!(item_id = %item_id, selected = self.selection.len(), "Item selected");
            }
            ToggleOutcome::Ignored => {
                debug!(item_id = %item_id, capacity = self.selection.capacity(), "Selection full");
            }
            ToggleOutcome::Removed => {}
        }
        Ok(outcome)
    }

    pub fn selection(&self) -> &[ItemId] {
        self.selection.items()
    }

    /// Catalog entries of the selected items, in selection order.
    pub fn selected_items(&self) -> Vec<CatalogItem> {
        self.selection
            .items()
            .iter()
            .filter_map(|id| self.catalog.get(id))
            .collect()
    }

    pub fn is_selection_full(&self) -> bool {
        self.selection.is_full()
    }

    pub fn set_prompt(&self, item_id: &ItemId, prompt: impl Into<String>) -> Result<(), ApiError> {
        self.scheduler.set_prompt(item_id, prompt)
    }

    pub fn generate(&self, item_id: &ItemId, prompt: &str) -> Result<Epoch, ApiError> {
        self.scheduler.generate(item_id, prompt)
    }

    pub fn regenerate(&self, item_id: &ItemId) -> Result<Epoch, ApiError> {
        self.scheduler.regenerate(item_id)
    }

    pub fn cancel(&self, item_id: &ItemId) -> bool {
        self.scheduler.cancel(item_id)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<JobEvent> {
        self.scheduler.subscribe()
    }

    pub async fn wait_settled(&self, item_id: &ItemId) -> Option<JobSnapshot> {
        self.scheduler.wait_settled(item_id).await
    }

    /// Job snapshots in selection order.
    pub fn jobs(&self) -> Vec<JobSnapshot> {
        self.scheduler.snapshots()
    }

    pub fn job(&self, item_id: &ItemId) -> Option<JobSnapshot> {
        self.scheduler.snapshot(item_id)
    }

    /// Jobs the registration step may use: `Done` only.
    pub fn completed_skills(&self) -> Vec<JobSnapshot> {
        self.jobs()
            .into_iter()
            .filter(|job| job.status == JobStatus::Done)
            .collect()
    }

    pub fn gate_input(&self) -> GateInput {
        GateInput {
            configured: self.settings.is_some(),
            selected: self.selection.len(),
            done_jobs: self.scheduler.done_count(),
        }
    }

    pub fn can_advance(&self) -> bool {
        WizardGate::can_advance(self.step, &self.gate_input())
    }

    /// Move to the next step if the gate allows it.
    pub fn advance(&mut self) -> Result<WizardStep, ApiError> {
        let input = self.gate_input();
        if let Some(reason) = WizardGate::blocked_reason(self.step, &input) {
            return Err(ApiError::StepBlocked(format!("{}: {}", self.step.label(), reason)));
        }
        if let Some(next) = self.step.next() {
            debug!(from = %self.step, to = %next, "Advancing");
            self.step = next;
        }
        Ok(self.step)
    }

    /// Move to the previous step. Selection and jobs are left untouched.
    pub fn back(&mut self) -> WizardStep {
        if let Some(previous) = self.step.previous() {
            debug!(from = %self.step, to = %previous, "Going back");
            self.step = previous;
        }
        self.step
    }

    /// Registration request for the current state.
    ///
    /// `skills_count` counts `Done` jobs; the metadata document lists every selected app
    /// and the completed skills.
    pub fn registration_request(
        &self,
        agent_name: &str,
        signer_address: Option<String>,
    ) -> Result<RegistrationRequest, ApiError> {
        let settings = self
            .settings
            .as_ref()
            .ok_or_else(|| ApiError::StepBlocked("instance is not configured".to_string()))?;
        let completed = self.completed_skills();

        let metadata = serde_json::json!({
            "agent": agent_name,
            "deployedAt": chrono::Utc::now().to_rfc3339(),
            "apps": self.selection.items(),
            "skills": completed.iter().map(|job| job.item_name.as_str()).collect::<Vec<_>>(),
            "instanceUrl": settings.instance_url,
        });

        Ok(RegistrationRequest {
            name: agent_name.to_string(),
            instance_url: settings.instance_url.clone(),
            skills_count: completed.len() as u64,
            metadata_uri: metadata.to_string(),
            wallet_address: signer_address,
        })
    }

    /// Register the agent. Only allowed on the final step.
    pub async fn register(
        &self,
        service: &dyn RegistrationService,
        signer: &dyn TransactionSigner,
        agent_name: &str,
        signer_address: Option<String>,
        explorer_url: &str,
    ) -> Result<RegistrationReceipt, ApiError> {
        if self.step != WizardStep::Register {
            return Err(ApiError::StepBlocked(format!(
                "registration is only available at step {}",
                WizardStep::Register
            )));
        }
        let request = self.registration_request(agent_name, signer_address)?;
        let receipt = register_agent(service, signer, &request, explorer_url).await?;
        info!(
            agent = %agent_name,
            skills = request.skills_count,
            tx_hash = %receipt.tx_hash,
            "Session registered"
        );
        Ok(receipt)
    }

    /// Cancel every stream and drop every job. The selection is cleared too.
    pub fn shutdown(&mut self) {
        self.scheduler.shutdown();
        self.selection.clear();
    }
}
