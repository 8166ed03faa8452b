//! Repository for the `provisioned_users` table.
//!
//! Rows are insert-only: this service never updates or deletes them. The
//! `uq_provisioned_users_email` constraint is the idempotency guard for the
//! whole onboarding flow, so callers must be able to tell a duplicate insert
//! apart from any other failure (see [`is_email_conflict`]).

use sqlx::PgPool;

use crate::models::provisioned_user::{CreateProvisionedUser, ProvisionedUser};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, first_name, last_name, email, phone, crm_contact_id, \
                       external_account_id, created_at";

/// Name of the unique constraint on `provisioned_users.email`.
pub const EMAIL_UNIQUE_CONSTRAINT: &str = "uq_provisioned_users_email";

/// PostgreSQL SQLSTATE for `unique_violation`.
const UNIQUE_VIOLATION: &str = "23505";

/// Provides insert and lookup operations for provisioned users.
pub struct ProvisionedUserRepo;

impl ProvisionedUserRepo {
    /// Insert a new provisioned user, returning the created row.
    ///
    /// Fails with a unique violation if a row with the same email already
    /// exists; use [`is_email_conflict`] to detect that case.
    pub async fn create(
        pool: &PgPool,
        input: &CreateProvisionedUser,
    ) -> Result<ProvisionedUser, sqlx::Error> {
        let query = format!(
            "INSERT INTO provisioned_users \
                (first_name, last_name, email, phone, crm_contact_id, external_account_id) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProvisionedUser>(&query)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(&input.crm_contact_id)
            .bind(&input.external_account_id)
            .fetch_one(pool)
            .await
    }

    /// Find a provisioned user by email (case-sensitive, exact match).
    pub async fn find_by_email(
        pool: &PgPool,
        email: &str,
    ) -> Result<Option<ProvisionedUser>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM provisioned_users WHERE email = $1");
        sqlx::query_as::<_, ProvisionedUser>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Count rows stored for an email (case-sensitive).
    pub async fn count_by_email(pool: &PgPool, email: &str) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM provisioned_users WHERE email = $1")
                .bind(email)
                .fetch_one(pool)
                .await?;
        Ok(count)
    }
}

/// Whether `err` is a unique violation on the email constraint.
pub fn is_email_conflict(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => {
            db_err.code().as_deref() == Some(UNIQUE_VIOLATION)
                && db_err.constraint() == Some(EMAIL_UNIQUE_CONSTRAINT)
        }
        _ => false,
    }
}
