//! Agent registration
//!
//! The registration service turns an agent description into an unsigned entry-function
//! transaction for the on-chain agent registry. The core never interprets that payload;
//! it hands it to a [`TransactionSigner`] and reports the identifier that comes back.

use crate::config::RegistryConfig;
use crate::error::ApiError;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

/// Fully qualified entry function, relative to the registry address.
pub const REGISTER_FUNCTION: &str = "agent_registry::register_agent";

const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Agent description sent to the registration service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRequest {
    pub name: String,
    pub instance_url: String,
    pub skills_count: u64,
    /// Opaque metadata string stored alongside the agent
    #[serde(default)]
    pub metadata_uri: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wallet_address: Option<String>,
}

impl RegistrationRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.name.trim().is_empty() || self.instance_url.trim().is_empty() {
            return Err(ApiError::InvalidRequest(
                "name and instanceUrl are required".to_string(),
            ));
        }
        if let Some(address) = &self.wallet_address {
            if !is_account_address(address) {
                return Err(ApiError::InvalidRequest(format!(
                    "wallet address '{}' is not a 0x-prefixed hex address",
                    address
                )));
            }
        }
        Ok(())
    }
}

/// `0x` followed by 1 to 64 hex digits.
pub fn is_account_address(address: &str) -> bool {
    let Some(digits) = address.strip_prefix("0x") else {
        return false;
    };
    if digits.is_empty() || digits.len() > 64 {
        return false;
    }
    let padded = if digits.len() % 2 == 1 {
        format!("0{}", digits)
    } else {
        digits.to_string()
    };
    hex::decode(padded).is_ok()
}

/// One typed entry-function argument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MoveArgument {
    /// `vector<u8>`, serialised as an array of numbers
    Bytes(Vec<u8>),
    U64(u64),
}

impl MoveArgument {
    pub fn utf8(value: &str) -> Self {
        MoveArgument::Bytes(value.as_bytes().to_vec())
    }
}

/// Unsigned transaction payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionDescriptor {
    pub function: String,
    #[serde(default)]
    pub type_arguments: Vec<String>,
    pub function_arguments: Vec<MoveArgument>,
}

/// Agent as recorded by the registration service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentInfo {
    pub name: String,
    pub instance_url: String,
    pub skills_count: u64,
    #[serde(default)]
    pub metadata_uri: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wallet_address: Option<String>,
    pub registered_at: String,
}

/// Registration service response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationPlan {
    pub transaction_payload: TransactionDescriptor,
    pub node_url: String,
    pub registry_address: String,
    pub agent_info: AgentInfo,
}

/// Outcome of a signed and submitted registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistrationReceipt {
    pub tx_hash: String,
    pub explorer_url: String,
    pub agent: AgentInfo,
}

/// Builds the registration transaction for an agent.
#[async_trait]
pub trait RegistrationService: Send + Sync {
    async fn prepare(&self, request: &RegistrationRequest) -> Result<RegistrationPlan, ApiError>;
}

/// Signs and submits a transaction, returning its identifier.
#[async_trait]
pub trait TransactionSigner: Send + Sync {
    async fn sign_and_submit(&self, payload: &TransactionDescriptor) -> Result<String, ApiError>;
}

/// Builds the payload in process from [`RegistryConfig`].
pub struct LocalRegistrationService {
    registry_address: String,
    node_url: String,
}

impl LocalRegistrationService {
    pub fn new(config: &RegistryConfig) -> Result<Self, ApiError> {
        if !is_account_address(&config.registry_address) {
            return Err(ApiError::ConfigError(format!(
                "registry_address '{}' is not a 0x-prefixed hex address",
                config.registry_address
            )));
        }
        Ok(Self {
            registry_address: config.registry_address.clone(),
            node_url: config.node_url.clone(),
        })
    }

    pub fn descriptor(&self, request: &RegistrationRequest) -> TransactionDescriptor {
        TransactionDescriptor {
            function: format!("{}::{}", self.registry_address, REGISTER_FUNCTION),
            type_arguments: Vec::new(),
            function_arguments: vec![
                MoveArgument::utf8(&request.name),
                MoveArgument::utf8(&request.instance_url),
                MoveArgument::U64(request.skills_count),
                MoveArgument::utf8(&request.metadata_uri),
            ],
        }
    }
}

#[async_trait]
impl RegistrationService for LocalRegistrationService {
    async fn prepare(&self, request: &RegistrationRequest) -> Result<RegistrationPlan, ApiError> {
        request.validate()?;
        Ok(RegistrationPlan {
            transaction_payload: self.descriptor(request),
            node_url: self.node_url.clone(),
            registry_address: self.registry_address.clone(),
            agent_info: AgentInfo {
                name: request.name.clone(),
                instance_url: request.instance_url.clone(),
                skills_count: request.skills_count,
                metadata_uri: request.metadata_uri.clone(),
                wallet_address: request.wallet_address.clone(),
                registered_at: chrono::Utc::now().to_rfc3339(),
            },
        })
    }
}

/// Remote registration service over HTTP.
pub struct HttpRegistrationService {
    client: Client,
    endpoint: String,
}

impl HttpRegistrationService {
    pub fn new(endpoint: impl Into<String>) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()
            .map_err(|e| ApiError::ProviderError(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }
}

#[async_trait]
impl RegistrationService for HttpRegistrationService {
    async fn prepare(&self, request: &RegistrationRequest) -> Result<RegistrationPlan, ApiError> {
        request.validate()?;

        let response = self
            .client
            .post(&self.endpoint)
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| ApiError::TransportFailure(format!("Registration request: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(match status.as_u16() {
                400 => ApiError::InvalidRequest(error_text),
                _ => ApiError::RegistrationFailed(format!(
                    "Request failed with status {}: {}",
                    status, error_text
                )),
            });
        }

        response
            .json()
            .await
            .map_err(|e| ApiError::RegistrationFailed(format!("Failed to parse response: {}", e)))
    }
}

/// Prepare the transaction, relay it to the signer and report the receipt.
pub async fn register_agent(
    service: &dyn RegistrationService,
    signer: &dyn TransactionSigner,
    request: &RegistrationRequest,
    explorer_url: &str,
) -> Result<RegistrationReceipt, ApiError> {
    let plan = service.prepare(request).await?;
    debug!(
        function = %plan.transaction_payload.function,
        node_url = %plan.node_url,
        "Registration payload prepared"
    );

    let tx_hash = signer.sign_and_submit(&plan.transaction_payload).await?;
    let explorer_url = format!("{}/{}", explorer_url.trim_end_matches('/'), tx_hash);
    info!(agent = %plan.agent_info.name, tx_hash = %tx_hash, "Agent registered");

    Ok(RegistrationReceipt {
        tx_hash,
        explorer_url,
        agent: plan.agent_info,
    })
}
