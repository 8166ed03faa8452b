//! User-provisioning platform integration.
//!
//! One remote operation: create an account for a registered user. The live
//! platform is reached through [`api::HttpProvisioningApi`]; mock mode swaps
//! in [`mock::MockProvisioningApi`]. No idempotency key is sent, so a call
//! that succeeds remotely but times out locally can leave a duplicate remote
//! account behind.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;

pub mod api;
pub mod error;
pub mod mock;

pub use error::ProvisioningError;

/// Account creation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProvisionRequest {
    #[serde(rename = "name")]
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub crm_contact_id: String,
}

/// Account created by the provisioning platform.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProvisionedAccount {
    /// Platform-assigned account id. `None` when a successful response did
    /// not include one.
    pub external_account_id: Option<String>,
}

/// Account creation offered by the provisioning platform.
#[async_trait]
pub trait ProvisioningApi: Send + Sync {
    async fn provision(&self, request: &ProvisionRequest)
        -> Result<ProvisionedAccount, ProvisioningError>;
}

/// Connection settings for the live provisioning platform.
#[derive(Debug, Clone)]
pub struct ProvisioningConfig {
    /// Base URL, e.g. `http://localhost:3000`.
    pub base_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

/// Which [`ProvisioningApi`] implementation to run against.
#[derive(Debug, Clone)]
pub enum ProvisioningBackend {
    Live(ProvisioningConfig),
    Mock { latency: Duration },
}

/// Build the [`ProvisioningApi`] implementation selected by `backend`.
pub fn connect(backend: ProvisioningBackend) -> Result<Arc<dyn ProvisioningApi>, ProvisioningError> {
    match backend {
        ProvisioningBackend::Live(config) => Ok(Arc::new(api::HttpProvisioningApi::new(config)?)),
        ProvisioningBackend::Mock { latency } => {
            Ok(Arc::new(mock::MockProvisioningApi::with_latency(latency)))
        }
    }
}
