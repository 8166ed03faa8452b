//! Integration tests for the `provisioned_users` repository.
//!
//! Runs against a real database so the unique constraint, the case-sensitive
//! lookup and the generated columns are exercised as deployed.

use bridge_db::models::provisioned_user::CreateProvisionedUser;
use bridge_db::repositories::provisioned_user_repo::is_email_conflict;
use bridge_db::repositories::ProvisionedUserRepo;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_user(email: &str) -> CreateProvisionedUser {
    CreateProvisionedUser {
        first_name: "Ada".to_string(),
        last_name: "Lovelace".to_string(),
        email: email.to_string(),
        phone: "+1 (234) 567-8900".to_string(),
        crm_contact_id: "contact_123".to_string(),
        external_account_id: Some("acct_456".to_string()),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn health_check_passes(pool: PgPool) {
    bridge_db::health_check(&pool).await.unwrap();
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_returns_generated_columns(pool: PgPool) {
    let user = ProvisionedUserRepo::create(&pool, &new_user("ada@example.com"))
        .await
        .unwrap();

    assert!(user.id > 0);
    assert_eq!(user.email, "ada@example.com");
    assert_eq!(user.crm_contact_id, "contact_123");
    assert_eq!(user.external_account_id.as_deref(), Some("acct_456"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn external_account_id_is_nullable(pool: PgPool) {
    let mut input = new_user("grace@example.com");
    input.external_account_id = None;

    let user = ProvisionedUserRepo::create(&pool, &input).await.unwrap();
    assert!(user.external_account_id.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn duplicate_email_is_reported_as_conflict(pool: PgPool) {
    ProvisionedUserRepo::create(&pool, &new_user("ada@example.com"))
        .await
        .unwrap();

    let err = ProvisionedUserRepo::create(&pool, &new_user("ada@example.com"))
        .await
        .unwrap_err();

    assert!(is_email_conflict(&err), "expected email conflict, got {err}");
    assert_eq!(
        ProvisionedUserRepo::count_by_email(&pool, "ada@example.com")
            .await
            .unwrap(),
        1
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn find_by_email_is_case_sensitive(pool: PgPool) {
    let created = ProvisionedUserRepo::create(&pool, &new_user("ada@example.com"))
        .await
        .unwrap();

    let found = ProvisionedUserRepo::find_by_email(&pool, "ada@example.com")
        .await
        .unwrap();
    assert_eq!(found, Some(created));

    let other_case = ProvisionedUserRepo::find_by_email(&pool, "ADA@example.com")
        .await
        .unwrap();
    assert!(other_case.is_none());
}
