//! In-memory CRM stand-in for mock mode.
//!
//! Behaves like a tiny CRM: contacts live in a list, ids are handed out in
//! sequence (`contact_mock_1`, `contact_mock_2`, ...), and search matches by
//! case-insensitive substring the way the real platform's fuzzy search does.
//! An optional fixed latency simulates the remote round trip.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::CrmApiError;
use crate::types::{ContactUpdate, CrmContact, NewContact};
use crate::CrmApi;

/// Deterministic [`CrmApi`] implementation backed by memory.
#[derive(Debug, Default)]
pub struct MockCrmApi {
    contacts: Mutex<Vec<CrmContact>>,
    next_id: AtomicU64,
    latency: Duration,
}

impl MockCrmApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stand-in that sleeps for `latency` before answering each call.
    pub fn with_latency(latency: Duration) -> Self {
        Self {
            latency,
            ..Self::default()
        }
    }

    /// Snapshot of all stored contacts, in creation order.
    pub fn contacts(&self) -> Vec<CrmContact> {
        self.lock().clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<CrmContact>> {
        // A poisoned lock only means another caller panicked mid-push; the
        // list itself is still usable.
        self.contacts.lock().unwrap_or_else(|e| e.into_inner())
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

#[async_trait]
impl CrmApi for MockCrmApi {
    async fn search_contacts(&self, query: &str) -> Result<Vec<CrmContact>, CrmApiError> {
        self.simulate_latency().await;
        let needle = query.to_lowercase();

        Ok(self
            .lock()
            .iter()
            .filter(|c| {
                c.email
                    .as_deref()
                    .is_some_and(|email| email.to_lowercase().contains(&needle))
            })
            .cloned()
            .collect())
    }

    async fn create_contact(&self, contact: &NewContact) -> Result<CrmContact, CrmApiError> {
        self.simulate_latency().await;
        let seq = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;

        let created = CrmContact {
            id: format!("contact_mock_{seq}"),
            email: Some(contact.email.clone()),
            first_name: Some(contact.first_name.clone()),
            last_name: Some(contact.last_name.clone()),
            phone: Some(contact.phone.clone()),
            tags: contact.tags.clone(),
        };
        tracing::debug!(contact_id = %created.id, "Mock CRM created contact");

        self.lock().push(created.clone());
        Ok(created)
    }

    async fn update_contact(
        &self,
        contact_id: &str,
        update: &ContactUpdate,
    ) -> Result<(), CrmApiError> {
        self.simulate_latency().await;
        let mut contacts = self.lock();

        let contact = contacts
            .iter_mut()
            .find(|c| c.id == contact_id)
            .ok_or_else(|| CrmApiError::Api {
                status: 404,
                body: format!("Contact {contact_id} not found"),
            })?;

        contact.first_name = Some(update.first_name.clone());
        contact.last_name = Some(update.last_name.clone());
        contact.phone = Some(update.phone.clone());
        contact.tags = update.tags.clone();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn contact(email: &str) -> NewContact {
        NewContact {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: email.to_string(),
            phone: "2345678900".to_string(),
            tags: vec![],
        }
    }

    #[tokio::test]
    async fn ids_are_sequential() {
        let api = MockCrmApi::new();
        let first = api.create_contact(&contact("a@example.com")).await.unwrap();
        let second = api.create_contact(&contact("b@example.com")).await.unwrap();

        assert_eq!(first.id, "contact_mock_1");
        assert_eq!(second.id, "contact_mock_2");
    }

    #[tokio::test]
    async fn search_is_fuzzy() {
        let api = MockCrmApi::new();
        api.create_contact(&contact("ada@example.com")).await.unwrap();
        api.create_contact(&contact("ada@example.com.au")).await.unwrap();

        let hits = api.search_contacts("ADA@example.com").await.unwrap();
        assert_eq!(hits.len(), 2);
    }

    #[tokio::test]
    async fn update_changes_mutable_fields_only() {
        let api = MockCrmApi::new();
        let created = api.create_contact(&contact("ada@example.com")).await.unwrap();

        let update = ContactUpdate {
            first_name: "Augusta".to_string(),
            last_name: "King".to_string(),
            phone: "9876543210".to_string(),
            tags: vec!["vip".to_string()],
        };
        api.update_contact(&created.id, &update).await.unwrap();

        let stored = &api.contacts()[0];
        assert_eq!(stored.id, created.id);
        assert_eq!(stored.email.as_deref(), Some("ada@example.com"));
        assert_eq!(stored.first_name.as_deref(), Some("Augusta"));
        assert_eq!(stored.tags, vec!["vip"]);
    }

    #[tokio::test]
    async fn update_of_unknown_contact_is_404() {
        let api = MockCrmApi::new();
        let update = ContactUpdate::from(&contact("ada@example.com"));

        let err = api.update_contact("missing", &update).await.unwrap_err();
        assert_matches!(err, CrmApiError::Api { status: 404, .. });
    }
}
