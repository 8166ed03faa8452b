//! Local record of provisioned users.
//!
//! [`ProvisioningStore`] is what the workflow needs from persistence: an
//! exact lookup by email and an insert that reports a duplicate email as
//! [`StoreError::Duplicate`]. The duplicate is detected by the database's
//! unique constraint at insert time, never by a prior lookup, so it holds
//! under concurrent requests for the same email.

use async_trait::async_trait;
use bridge_db::models::provisioned_user::{CreateProvisionedUser, ProvisionedUser};
use bridge_db::repositories::provisioned_user_repo::is_email_conflict;
use bridge_db::repositories::ProvisionedUserRepo;
use bridge_db::DbPool;

/// Store failures. Everything except `Duplicate` is a real failure.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A row with this email already exists.
    #[error("Store failed: duplicate record for {email}")]
    Duplicate { email: String },

    /// The row that caused a duplicate insert could not be read back.
    #[error("Store failed: record for {email} missing after duplicate insert")]
    MissingAfterConflict { email: String },

    /// The database was unreachable or rejected the query.
    #[error("Store failed: {0}")]
    Database(#[from] sqlx::Error),
}

/// Persistence used by the onboarding workflow.
#[async_trait]
pub trait ProvisioningStore: Send + Sync {
    /// Exact, case-sensitive lookup by email.
    async fn find_by_email(&self, email: &str) -> Result<Option<ProvisionedUser>, StoreError>;

    /// Insert a new record. Fails with [`StoreError::Duplicate`] if the
    /// email is already taken.
    async fn insert(&self, user: &CreateProvisionedUser) -> Result<ProvisionedUser, StoreError>;
}

/// [`ProvisioningStore`] backed by the `provisioned_users` table.
#[derive(Clone)]
pub struct PgProvisioningStore {
    pool: DbPool,
}

impl PgProvisioningStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProvisioningStore for PgProvisioningStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<ProvisionedUser>, StoreError> {
        Ok(ProvisionedUserRepo::find_by_email(&self.pool, email).await?)
    }

    async fn insert(&self, user: &CreateProvisionedUser) -> Result<ProvisionedUser, StoreError> {
        ProvisionedUserRepo::create(&self.pool, user)
            .await
            .map_err(|err| {
                if is_email_conflict(&err) {
                    StoreError::Duplicate {
                        email: user.email.clone(),
                    }
                } else {
                    StoreError::Database(err)
                }
            })
    }
}
