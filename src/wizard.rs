//! Wizard steps and the forward gate.
//!
//! The gate is a pure function of [`GateInput`]; it is re-evaluated on every query and
//! never caches or mutates anything.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WizardStep {
    Configure,
    Browse,
    Build,
    Register,
}

impl WizardStep {
    pub const ALL: [WizardStep; 4] = [
        WizardStep::Configure,
        WizardStep::Browse,
        WizardStep::Build,
        WizardStep::Register,
    ];

    /// Following step; `None` from `Register`.
    pub fn next(self) -> Option<WizardStep> {
        match self {
            WizardStep::Configure => Some(WizardStep::Browse),
            WizardStep::Browse => Some(WizardStep::Build),
            WizardStep::Build => Some(WizardStep::Register),
            WizardStep::Register => None,
        }
    }

    /// Preceding step; `None` from `Configure`.
    pub fn previous(self) -> Option<WizardStep> {
        match self {
            WizardStep::Configure => None,
            WizardStep::Browse => Some(WizardStep::Configure),
            WizardStep::Build => Some(WizardStep::Browse),
            WizardStep::Register => Some(WizardStep::Build),
        }
    }

    /// One-based position.
    pub fn number(self) -> u8 {
        match self {
            WizardStep::Configure => 1,
            WizardStep::Browse => 2,
            WizardStep::Build => 3,
            WizardStep::Register => 4,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            WizardStep::Configure => "Setup",
            WizardStep::Browse => "Browse",
            WizardStep::Build => "Build",
            WizardStep::Register => "Register",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            WizardStep::Configure => "Configure the agent instance",
            WizardStep::Browse => "Pick ecosystem apps",
            WizardStep::Build => "Generate skills",
            WizardStep::Register => "Register on-chain",
        }
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}. {}", self.number(), self.label())
    }
}

/// Aggregate state the gate looks at.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GateInput {
    pub configured: bool,
    pub selected: usize,
    pub done_jobs: usize,
}

pub struct WizardGate;

impl WizardGate {
    /// Whether `step` may move forward given `input`.
    pub fn can_advance(step: WizardStep, input: &GateInput) -> bool {
        Self::blocked_reason(step, input).is_none()
    }

    /// Why moving forward from `step` is denied, if it is.
    pub fn blocked_reason(step: WizardStep, input: &GateInput) -> Option<&'static str> {
        match step {
            WizardStep::Configure if !input.configured => Some("instance is not configured"),
            WizardStep::Browse if input.selected == 0 => Some("select at least one app"),
            WizardStep::Build if input.done_jobs == 0 => Some("build at least one skill"),
            WizardStep::Register => Some("registration is the final step"),
            _ => None,
        }
    }

    /// Backward navigation is allowed from every step but the first.
    pub fn can_retreat(step: WizardStep) -> bool {
        step.previous().is_some()
    }
}
