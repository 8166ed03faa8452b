//! Handler for the onboarding endpoint.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use bridge_core::registration::RegistrationInput;
use bridge_db::models::provisioned_user::ProvisionedUser;
use bridge_pipeline::ProvisioningStatus;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::response::ApiResponse;
use crate::state::AppState;

pub const ONBOARDING_COMPLETED: &str = "Onboarding completed successfully";

/// `data` payload of a successful onboarding response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardData {
    pub crm_contact_id: String,
    pub provisioning_status: ProvisioningStatus,
    pub user: ProvisionedUser,
}

/// POST /api/onboard
///
/// Runs the onboarding workflow for one registration. Returns 201 both when
/// the user is newly provisioned and when they already were; the
/// `provisioningStatus` field tells the two apart.
pub async fn onboard(
    State(state): State<AppState>,
    payload: Result<Json<RegistrationInput>, JsonRejection>,
) -> AppResult<(StatusCode, Json<ApiResponse<OnboardData>>)> {
    let Json(input) = payload?;

    let result = state
        .onboarder
        .onboard(input)
        .await
        .map_err(|err| AppError::from_onboarding(err, !state.config.is_production()))?;

    tracing::info!(
        email = %result.record.email,
        status = ?result.provisioning_status,
        "Onboarding request completed",
    );

    let data = OnboardData {
        crm_contact_id: result.crm_contact_id,
        provisioning_status: result.provisioning_status,
        user: result.record,
    };

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(ONBOARDING_COMPLETED, data)),
    ))
}
