//! Contact shapes exchanged with the CRM.

use serde::Serialize;

/// A contact as held by the CRM. Only `id` is guaranteed by the platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrmContact {
    pub id: String,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub tags: Vec<String>,
}

/// Fields sent when creating a contact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewContact {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub tags: Vec<String>,
}

/// Fields sent when updating a contact. Email and id are never changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactUpdate {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub tags: Vec<String>,
}

impl From<&NewContact> for ContactUpdate {
    fn from(contact: &NewContact) -> Self {
        Self {
            first_name: contact.first_name.clone(),
            last_name: contact.last_name.clone(),
            phone: contact.phone.clone(),
            tags: contact.tags.clone(),
        }
    }
}

/// Result of syncing a contact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSync {
    pub crm_contact_id: String,
    /// `true` when the contact was created, `false` when an existing one was
    /// updated.
    pub is_new: bool,
}

impl CrmContact {
    /// Whether this contact's email equals `email`, ignoring case.
    pub fn email_matches(&self, email: &str) -> bool {
        self.email
            .as_deref()
            .is_some_and(|own| own.to_lowercase() == email.to_lowercase())
    }
}
