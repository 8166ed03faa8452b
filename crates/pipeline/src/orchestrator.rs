//! The single onboarding workflow.

use std::sync::Arc;

use bridge_core::registration::{Registration, RegistrationInput};
use bridge_crm::{CrmSyncClient, NewContact};
use bridge_db::models::provisioned_user::{CreateProvisionedUser, ProvisionedUser};
use bridge_provisioning::{ProvisionRequest, ProvisioningApi};
use serde::Serialize;

use crate::error::OnboardingError;
use crate::store::{ProvisioningStore, StoreError};

/// How a successful run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProvisioningStatus {
    /// This run created the record.
    Success,
    /// A record for the email already existed, or a concurrent run created
    /// it first.
    AlreadyProvisioned,
}

/// Result of a successful run.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingResult {
    /// Contact id returned by this run's CRM sync.
    pub crm_contact_id: String,
    pub provisioning_status: ProvisioningStatus,
    pub record: ProvisionedUser,
}

/// Runs the onboarding workflow against injected collaborators.
///
/// Cheap to clone; every collaborator sits behind an `Arc`.
#[derive(Clone)]
pub struct Onboarder {
    crm: CrmSyncClient,
    provisioning: Arc<dyn ProvisioningApi>,
    store: Arc<dyn ProvisioningStore>,
}

impl Onboarder {
    pub fn new(
        crm: CrmSyncClient,
        provisioning: Arc<dyn ProvisioningApi>,
        store: Arc<dyn ProvisioningStore>,
    ) -> Self {
        Self {
            crm,
            provisioning,
            store,
        }
    }

    /// Onboard one registration.
    ///
    /// 1. Trim and validate the input (every failing field is reported).
    /// 2. Create or update the CRM contact.
    /// 3. If a record for the email exists, stop with `already_provisioned`.
    /// 4. Create the remote account.
    /// 5. Persist the record. Losing an insert race to a concurrent run is
    ///    also `already_provisioned`.
    ///
    /// Any failure ends the run. Nothing done by earlier steps is rolled back.
    pub async fn onboard(
        &self,
        input: RegistrationInput,
    ) -> Result<OnboardingResult, OnboardingError> {
        let registration = input.into_registration()?;
        let email = registration.email.as_str();
        tracing::info!(%email, "Starting onboarding");

        let sync = self.crm.sync_contact(&contact_for(&registration)).await?;
        tracing::info!(
            %email,
            crm_contact_id = %sync.crm_contact_id,
            is_new = sync.is_new,
            "CRM contact synced"
        );

        if let Some(existing) = self.store.find_by_email(email).await? {
            tracing::info!(%email, user_id = existing.id, "User already provisioned");
            return Ok(already_provisioned(sync.crm_contact_id, existing));
        }

        let account = self
            .provisioning
            .provision(&ProvisionRequest {
                full_name: registration.full_name(),
                email: registration.email.clone(),
                phone: registration.phone.clone(),
                crm_contact_id: sync.crm_contact_id.clone(),
            })
            .await?;
        tracing::info!(
            %email,
            external_account_id = ?account.external_account_id,
            "Remote account provisioned"
        );

        let new_record = CreateProvisionedUser {
            first_name: registration.first_name.clone(),
            last_name: registration.last_name.clone(),
            email: registration.email.clone(),
            phone: registration.phone.clone(),
            crm_contact_id: sync.crm_contact_id.clone(),
            external_account_id: account.external_account_id,
        };

        match self.store.insert(&new_record).await {
            Ok(record) => {
                tracing::info!(%email, user_id = record.id, "Provisioned user saved");
                Ok(OnboardingResult {
                    crm_contact_id: sync.crm_contact_id,
                    provisioning_status: ProvisioningStatus::Success,
                    record,
                })
            }
            Err(StoreError::Duplicate { .. }) => {
                tracing::info!(%email, "Concurrent onboarding saved the user first");
                let existing = self.store.find_by_email(email).await?.ok_or_else(|| {
                    StoreError::MissingAfterConflict {
                        email: email.to_string(),
                    }
                })?;
                Ok(already_provisioned(sync.crm_contact_id, existing))
            }
            Err(err) => Err(err.into()),
        }
    }
}

fn contact_for(registration: &Registration) -> NewContact {
    NewContact {
        first_name: registration.first_name.clone(),
        last_name: registration.last_name.clone(),
        email: registration.email.clone(),
        phone: registration.phone.clone(),
        tags: registration.tags.clone(),
    }
}

fn already_provisioned(crm_contact_id: String, record: ProvisionedUser) -> OnboardingResult {
    OnboardingResult {
        crm_contact_id,
        provisioning_status: ProvisioningStatus::AlreadyProvisioned,
        record,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
