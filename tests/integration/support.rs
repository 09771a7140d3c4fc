//! Shared helpers for integration tests
//!
//! Catalog lookups, a session wired to the in-process transport, and environment
//! isolation for configuration tests.

use skillwright::catalog::{CatalogItem, CatalogSource, ItemId, StaticCatalog};
use skillwright::config::SkillwrightConfig;
use skillwright::error::ApiError;
use skillwright::registry::{TransactionDescriptor, TransactionSigner};
use skillwright::scheduler::{JobEvent, JobEventKind};
use skillwright::session::{InstanceSettings, SkillSession};
use skillwright::transport::{ChannelTransport, OpenedStream};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::TempDir;
use tokio::sync::{broadcast, mpsc};

pub fn id(value: &str) -> ItemId {
    ItemId::from(value)
}

pub fn item(value: &str) -> CatalogItem {
    StaticCatalog::builtin()
        .get(&id(value))
        .unwrap_or_else(|| panic!("'{}' is not in the builtin catalog", value))
}

/// Configured session backed by a [`ChannelTransport`].
pub fn channel_session() -> (SkillSession, mpsc::UnboundedReceiver<OpenedStream>) {
    let config = SkillwrightConfig::default();
    let (transport, opened) = ChannelTransport::new();
    let mut session = SkillSession::new(
        &config,
        Arc::new(StaticCatalog::builtin()),
        Arc::new(transport),
    );
    session.configure(InstanceSettings::from_config(&config));
    (session, opened)
}

/// Wait for the next event of `item_id` matching `pred`, failing after a second.
pub async fn wait_for_event<F>(
    events: &mut broadcast::Receiver<JobEvent>,
    item_id: &ItemId,
    pred: F,
) -> JobEvent
where
    F: Fn(&JobEventKind) -> bool,
{
    tokio::time::timeout(Duration::from_secs(1), async {
        loop {
            let event = events.recv().await.expect("event channel closed");
            if &event.item_id == item_id && pred(&event.kind) {
                return event;
            }
        }
    })
    .await
    .expect("timed out waiting for job event")
}

/// Give spawned stream tasks a chance to run.
pub async fn settle() {
    for _ in 0..10 {
        tokio::task::yield_now().await;
    }
    tokio::time::sleep(Duration::from_millis(10)).await;
}

/// Signer that records what it was asked to sign.
#[derive(Default)]
pub struct RecordingSigner {
    pub signed: Mutex<Vec<TransactionDescriptor>>,
    pub fail: bool,
}

#[async_trait::async_trait]
impl TransactionSigner for RecordingSigner {
    async fn sign_and_submit(&self, payload: &TransactionDescriptor) -> Result<String, ApiError> {
        if self.fail {
            return Err(ApiError::SigningFailed("user rejected".to_string()));
        }
        let mut signed = self.signed.lock().unwrap();
        signed.push(payload.clone());
        Ok(format!("0x{:064x}", signed.len()))
    }
}

/// Serialises every test that touches process environment variables.
static ENV_MUTEX: Mutex<()> = Mutex::new(());

const ISOLATED_VARS: &[&str] = &[
    "HOME",
    "XDG_CONFIG_HOME",
    "SKILLWRIGHT_ENV",
    "SKILLWRIGHT__SELECTION__CAPACITY",
    "SKILLWRIGHT__GENERATION__ENDPOINT",
];

/// Run `f` with `XDG_CONFIG_HOME` and `HOME` pointing into `test_dir`, plus `vars`.
///
/// Every touched variable is restored afterwards.
pub fn with_env<F, R>(test_dir: &TempDir, vars: &[(&str, &str)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    let saved: Vec<(&str, Option<String>)> = ISOLATED_VARS
        .iter()
        .map(|name| (*name, std::env::var(name).ok()))
        .collect();

    let config_home = test_dir.path().join("xdg");
    let home = test_dir.path().join("home");
    std::fs::create_dir_all(&config_home).unwrap();
    std::fs::create_dir_all(&home).unwrap();

    for name in ISOLATED_VARS {
        std::env::remove_var(name);
    }
    std::env::set_var("HOME", &home);
    std::env::set_var("XDG_CONFIG_HOME", &config_home);
    for (name, value) in vars {
        std::env::set_var(name, value);
    }

    let result = f();

    for (name, value) in saved {
        match value {
            Some(value) => std::env::set_var(name, value),
            None => std::env::remove_var(name),
        }
    }
    result
}
