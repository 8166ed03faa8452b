//! End-to-end onboarding against a real database with mock remotes.
//!
//! The in-memory CRM and provisioning fakes stand in for the remote
//! platforms; persistence goes through [`PgProvisioningStore`] so the unique
//! email constraint is what arbitrates concurrent runs.

use std::sync::Arc;
use std::time::Duration;

use bridge_core::registration::RegistrationInput;
use bridge_crm::mock::MockCrmApi;
use bridge_crm::CrmSyncClient;
use bridge_db::repositories::ProvisionedUserRepo;
use bridge_pipeline::{Onboarder, PgProvisioningStore, ProvisioningStatus};
use bridge_provisioning::mock::MockProvisioningApi;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn onboarder(pool: PgPool, provisioning: Arc<MockProvisioningApi>) -> Onboarder {
    Onboarder::new(
        CrmSyncClient::new(Arc::new(MockCrmApi::with_latency(Duration::from_millis(2)))),
        provisioning,
        Arc::new(PgProvisioningStore::new(pool)),
    )
}

fn payload(email: &str) -> RegistrationInput {
    RegistrationInput {
        first_name: Some("Grace".to_string()),
        last_name: Some("Hopper".to_string()),
        email: Some(email.to_string()),
        phone: Some("234-567-8900".to_string()),
        tags: None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn mock_run_leaves_a_queryable_row(pool: PgPool) {
    let provisioning = Arc::new(MockProvisioningApi::new());
    let onboarder = onboarder(pool.clone(), provisioning);

    let result = onboarder.onboard(payload("grace@example.com")).await.unwrap();

    assert_eq!(result.provisioning_status, ProvisioningStatus::Success);
    let row = ProvisionedUserRepo::find_by_email(&pool, "grace@example.com")
        .await
        .unwrap()
        .expect("row persisted");
    assert_eq!(row, result.record);
    assert_eq!(row.crm_contact_id, result.crm_contact_id);
    assert_eq!(row.external_account_id.as_deref(), Some("app_mock_1"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn repeat_run_is_already_provisioned(pool: PgPool) {
    let provisioning = Arc::new(MockProvisioningApi::new());
    let onboarder = onboarder(pool.clone(), provisioning.clone());

    let first = onboarder.onboard(payload("grace@example.com")).await.unwrap();
    let second = onboarder.onboard(payload("grace@example.com")).await.unwrap();

    assert_eq!(first.provisioning_status, ProvisioningStatus::Success);
    assert_eq!(second.provisioning_status, ProvisioningStatus::AlreadyProvisioned);
    assert_eq!(second.record.id, first.record.id);
    assert_eq!(provisioning.call_count(), 1);
    assert_eq!(
        ProvisionedUserRepo::count_by_email(&pool, "grace@example.com")
            .await
            .unwrap(),
        1
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn concurrent_runs_persist_one_row(pool: PgPool) {
    let provisioning = Arc::new(MockProvisioningApi::with_latency(Duration::from_millis(5)));
    let onboarder = onboarder(pool.clone(), provisioning);

    let runs = (0..6).map(|_| onboarder.onboard(payload("grace@example.com")));
    let results = futures::future::join_all(runs).await;

    let statuses: Vec<_> = results
        .into_iter()
        .map(|r| r.unwrap().provisioning_status)
        .collect();
    let successes = statuses
        .iter()
        .filter(|s| **s == ProvisioningStatus::Success)
        .count();
    assert_eq!(successes, 1);
    assert_eq!(
        ProvisionedUserRepo::count_by_email(&pool, "grace@example.com")
            .await
            .unwrap(),
        1
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn email_case_variants_are_distinct_records(pool: PgPool) {
    let onboarder = onboarder(pool.clone(), Arc::new(MockProvisioningApi::new()));

    let lower = onboarder.onboard(payload("grace@example.com")).await.unwrap();
    let upper = onboarder.onboard(payload("Grace@Example.com")).await.unwrap();

    // The CRM matches emails case-insensitively, the local store does not.
    assert_eq!(lower.crm_contact_id, upper.crm_contact_id);
    assert_eq!(upper.provisioning_status, ProvisioningStatus::Success);
    assert_ne!(lower.record.id, upper.record.id);
}
