//! Provisioning stand-in for mock mode.
//!
//! Hands out `app_mock_1`, `app_mock_2`, ... and counts calls, after an
//! optional fixed delay that simulates the remote round trip.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use crate::error::ProvisioningError;
use crate::{ProvisionRequest, ProvisionedAccount, ProvisioningApi};

/// Deterministic [`ProvisioningApi`] implementation.
#[derive(Debug, Default)]
pub struct MockProvisioningApi {
    calls: AtomicU64,
    latency: Duration,
}

impl MockProvisioningApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_latency(latency: Duration) -> Self {
        Self {
            latency,
            ..Self::default()
        }
    }

    /// Number of accounts provisioned so far.
    pub fn call_count(&self) -> u64 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProvisioningApi for MockProvisioningApi {
    async fn provision(
        &self,
        request: &ProvisionRequest,
    ) -> Result<ProvisionedAccount, ProvisioningError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        let seq = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::debug!(email = %request.email, seq, "Mock provisioning created account");

        Ok(ProvisionedAccount {
            external_account_id: Some(format!("app_mock_{seq}")),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> ProvisionRequest {
        ProvisionRequest {
            full_name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            phone: "2345678900".to_string(),
            crm_contact_id: "c1".to_string(),
        }
    }

    #[tokio::test]
    async fn hands_out_sequential_ids_and_counts_calls() {
        let api = MockProvisioningApi::new();

        let first = api.provision(&request()).await.unwrap();
        let second = api.provision(&request()).await.unwrap();

        assert_eq!(first.external_account_id.as_deref(), Some("app_mock_1"));
        assert_eq!(second.external_account_id.as_deref(), Some("app_mock_2"));
        assert_eq!(api.call_count(), 2);
    }
}
