//! The onboarding workflow.
//!
//! [`Onboarder`] turns one registration into a provisioned user:
//!
//! ```text
//! validate -> CRM sync -> duplicate check -> remote provisioning -> persist
//! ```
//!
//! The steps run strictly in sequence and nothing between them is persisted,
//! so a crash mid-way loses progress and the caller simply retries. The
//! unique email constraint behind [`ProvisioningStore::insert`] is the only
//! idempotency guard; a duplicate insert is reported to the caller as
//! `already_provisioned`, not as an error.

pub mod error;
pub mod orchestrator;
pub mod store;

pub use error::OnboardingError;
pub use orchestrator::{Onboarder, OnboardingResult, ProvisioningStatus};
pub use store::{PgProvisioningStore, ProvisioningStore, StoreError};
