use axum::routing::post;
use axum::Router;

use crate::handlers::onboard;
use crate::state::AppState;

/// Onboarding route, mounted under `/api`.
///
/// ```text
/// POST /onboard -> onboard
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/onboard", post(onboard::onboard))
}
