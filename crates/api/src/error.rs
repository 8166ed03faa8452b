use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use bridge_core::error::CoreError;
use bridge_pipeline::OnboardingError;
use serde_json::{json, Value};

pub const VALIDATION_FAILED: &str = "Validation failed";
pub const INVALID_BODY: &str = "Invalid request body";
pub const CRM_FAILED: &str = "CRM integration failed. Please try again later.";
pub const PROVISIONING_FAILED: &str = "Provisioning platform failed. Please try again later.";
pub const ONBOARDING_FAILED: &str = "Onboarding failed";
pub const NOT_FOUND: &str = "Endpoint not found";

/// Application-level error type for HTTP handlers.
///
/// Implements [`IntoResponse`] to produce the `{ success: false, message,
/// error }` envelope.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The registration payload failed validation.
    #[error("Validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    /// The request body could not be parsed as a registration.
    #[error("Invalid request body: {0}")]
    BadRequest(String),

    /// A remote integration failed. `message` names which one.
    #[error("{message} ({detail})")]
    Upstream {
        message: &'static str,
        detail: String,
    },

    /// Any other failure. `detail` is `None` when it must not be exposed.
    #[error("Onboarding failed: {}", .detail.as_deref().unwrap_or("details withheld"))]
    Internal { detail: Option<String> },

    /// No route matched.
    #[error("Endpoint not found")]
    NotFound,
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Classify a workflow failure into its HTTP shape.
    ///
    /// Remote integration failures always carry their component message;
    /// internal failures carry it only when `expose_internal` is set.
    pub fn from_onboarding(err: OnboardingError, expose_internal: bool) -> Self {
        match err {
            OnboardingError::Validation(CoreError::Validation(errors)) => {
                AppError::Validation(errors)
            }
            OnboardingError::CrmSync(e) => AppError::Upstream {
                message: CRM_FAILED,
                detail: e.to_string(),
            },
            OnboardingError::Provisioning(e) => AppError::Upstream {
                message: PROVISIONING_FAILED,
                detail: e.to_string(),
            },
            OnboardingError::Store(e) => {
                tracing::error!(error = %e, "Onboarding store failure");
                AppError::Internal {
                    detail: expose_internal.then(|| e.to_string()),
                }
            }
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, error): (StatusCode, &str, Value) = match self {
            AppError::Validation(errors) => {
                (StatusCode::BAD_REQUEST, VALIDATION_FAILED, json!(errors))
            }
            AppError::BadRequest(detail) => (StatusCode::BAD_REQUEST, INVALID_BODY, json!(detail)),
            AppError::Upstream { message, detail } => {
                tracing::error!(error = %detail, "{message}");
                (StatusCode::BAD_GATEWAY, message, json!(detail))
            }
            AppError::Internal { detail } => {
                (StatusCode::INTERNAL_SERVER_ERROR, ONBOARDING_FAILED, json!(detail))
            }
            AppError::NotFound => (StatusCode::NOT_FOUND, NOT_FOUND, Value::Null),
        };

        let body = json!({
            "success": false,
            "message": message,
            "error": error,
        });

        (status, axum::Json(body)).into_response()
    }
}
