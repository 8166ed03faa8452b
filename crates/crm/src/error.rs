//! CRM error types.
//!
//! [`CrmApiError`] describes why a single remote call failed.
//! [`CrmSyncError`] tags it with the sync step. Every sync error renders with
//! the `CRM sync failed:` prefix, which is what log searches and the HTTP
//! error detail key on.

/// Failure of one call to the CRM.
#[derive(Debug, thiserror::Error)]
pub enum CrmApiError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The CRM returned a non-2xx status code.
    #[error("CRM API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// A 2xx response that is missing something the contract requires.
    #[error("Remote contract violation: {0}")]
    RemoteContractViolation(String),
}

/// Failure of a contact sync, by step.
#[derive(Debug, thiserror::Error)]
pub enum CrmSyncError {
    #[error("CRM sync failed: CRM search failed: {0}")]
    Search(#[source] CrmApiError),

    #[error("CRM sync failed: CRM contact creation failed: {0}")]
    Create(#[source] CrmApiError),

    #[error("CRM sync failed: CRM contact update failed: {0}")]
    Update(#[source] CrmApiError),
}

impl CrmSyncError {
    /// The underlying call failure.
    pub fn api_error(&self) -> &CrmApiError {
        match self {
            Self::Search(err) | Self::Create(err) | Self::Update(err) => err,
        }
    }

    /// Whether the CRM answered successfully but broke its response contract.
    pub fn is_contract_violation(&self) -> bool {
        matches!(self.api_error(), CrmApiError::RemoteContractViolation(_))
    }
}
