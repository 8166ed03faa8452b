//! Create-or-update contact sync.

use std::sync::Arc;

use crate::error::CrmSyncError;
use crate::types::{ContactSync, ContactUpdate, NewContact};
use crate::CrmApi;

/// Syncs a registration's contact details into the CRM.
#[derive(Clone)]
pub struct CrmSyncClient {
    api: Arc<dyn CrmApi>,
}

impl CrmSyncClient {
    pub fn new(api: Arc<dyn CrmApi>) -> Self {
        Self { api }
    }

    /// Make sure the CRM holds a contact for `contact.email`.
    ///
    /// 1. Search by email and keep the first result whose email matches
    ///    exactly, ignoring case. Fuzzy hits are discarded.
    /// 2. If one exists, update its names, phone and tags.
    /// 3. Otherwise create it.
    ///
    /// Nothing is retried; the first failing call ends the sync.
    pub async fn sync_contact(&self, contact: &NewContact) -> Result<ContactSync, CrmSyncError> {
        let candidates = self
            .api
            .search_contacts(&contact.email)
            .await
            .map_err(CrmSyncError::Search)?;

        let existing = candidates
            .into_iter()
            .find(|candidate| candidate.email_matches(&contact.email));

        match existing {
            Some(existing) => {
                tracing::info!(contact_id = %existing.id, "Updating existing CRM contact");
                self.api
                    .update_contact(&existing.id, &ContactUpdate::from(contact))
                    .await
                    .map_err(CrmSyncError::Update)?;

                Ok(ContactSync {
                    crm_contact_id: existing.id,
                    is_new: false,
                })
            }
            None => {
                tracing::info!(email = %contact.email, "Creating new CRM contact");
                let created = self
                    .api
                    .create_contact(contact)
                    .await
                    .map_err(CrmSyncError::Create)?;

                Ok(ContactSync {
                    crm_contact_id: created.id,
                    is_new: true,
                })
            }
        }
    }
}
