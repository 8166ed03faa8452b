//! CRM contact integration.
//!
//! The remote CRM is reached through the [`CrmApi`] capability: search,
//! create and update of contacts. [`api::HttpCrmApi`] talks to the live
//! platform over HTTP; [`mock::MockCrmApi`] is a deterministic in-memory
//! stand-in selected by configuration. [`sync::CrmSyncClient`] implements the
//! create-or-update algorithm on top of either.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

pub mod api;
pub mod error;
pub mod mock;
pub mod sync;
pub mod types;

pub use error::{CrmApiError, CrmSyncError};
pub use sync::CrmSyncClient;
pub use types::{ContactSync, ContactUpdate, CrmContact, NewContact};

/// Contact operations offered by the CRM platform.
#[async_trait]
pub trait CrmApi: Send + Sync {
    /// Free-text contact search. The remote matching is fuzzy, so results may
    /// include contacts whose email only partially matches `query`.
    async fn search_contacts(&self, query: &str) -> Result<Vec<CrmContact>, CrmApiError>;

    /// Create a contact and return it with its CRM-assigned id.
    async fn create_contact(&self, contact: &NewContact) -> Result<CrmContact, CrmApiError>;

    /// Update the mutable fields of an existing contact.
    async fn update_contact(
        &self,
        contact_id: &str,
        update: &ContactUpdate,
    ) -> Result<(), CrmApiError>;
}

/// Connection settings for the live CRM.
#[derive(Debug, Clone)]
pub struct CrmConfig {
    /// Base URL, e.g. `https://services.leadconnectorhq.com`.
    pub base_url: String,
    /// Bearer credential.
    pub api_key: String,
    /// Location (tenant) every contact belongs to.
    pub location_id: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

/// Which [`CrmApi`] implementation to run against.
#[derive(Debug, Clone)]
pub enum CrmBackend {
    Live(CrmConfig),
    Mock { latency: Duration },
}

/// Build the [`CrmApi`] implementation selected by `backend`.
pub fn connect(backend: CrmBackend) -> Result<Arc<dyn CrmApi>, CrmApiError> {
    match backend {
        CrmBackend::Live(config) => Ok(Arc::new(api::HttpCrmApi::new(config)?)),
        CrmBackend::Mock { latency } => Ok(Arc::new(mock::MockCrmApi::with_latency(latency))),
    }
}
