use bridge_core::error::CoreError;
use bridge_crm::CrmSyncError;
use bridge_provisioning::ProvisioningError;

use crate::store::StoreError;

/// Why an onboarding run ended without a result.
///
/// Each variant corresponds to one failing step. The rendered message keeps
/// the step's own prefix (`Validation failed:`, `CRM sync failed:`,
/// `Provisioning failed:`, `Store failed:`).
#[derive(Debug, thiserror::Error)]
pub enum OnboardingError {
    /// The registration payload was rejected. Never retried.
    #[error(transparent)]
    Validation(#[from] CoreError),

    /// Search, create or update against the CRM failed.
    #[error(transparent)]
    CrmSync(#[from] CrmSyncError),

    /// The provisioning platform call failed. Any CRM change made earlier in
    /// the same run is left in place.
    #[error(transparent)]
    Provisioning(#[from] ProvisioningError),

    /// The local store was unreachable or rejected the write.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl OnboardingError {
    /// Validation messages, if this is a validation failure.
    pub fn validation_errors(&self) -> Option<&[String]> {
        match self {
            Self::Validation(CoreError::Validation(errors)) => Some(errors),
            _ => None,
        }
    }
}
