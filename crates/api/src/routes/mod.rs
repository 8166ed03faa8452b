pub mod health;
pub mod onboard;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// ```text
/// GET  /health    liveness
/// POST /onboard   onboarding workflow
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(onboard::router())
}
