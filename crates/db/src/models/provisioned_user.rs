//! Provisioned user entity model and DTO.

use bridge_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `provisioned_users` table.
///
/// Serialized in camelCase because it is returned verbatim as the `user`
/// field of the onboarding response.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProvisionedUser {
    pub id: DbId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub crm_contact_id: String,
    pub external_account_id: Option<String>,
    pub created_at: Timestamp,
}

/// DTO for inserting a provisioned user. `id` and `created_at` are generated
/// by the database.
#[derive(Debug, Clone)]
pub struct CreateProvisionedUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub crm_contact_id: String,
    pub external_account_id: Option<String>,
}
