//! Shared response envelope for API handlers.
//!
//! Successful responses use `{ "success": true, "message": ..., "data": ... }`.
//! Failures use the matching `{ "success": false, "message": ..., "error": ... }`
//! shape produced by [`crate::error::AppError`].

use serde::Serialize;

/// Standard success envelope.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub message: &'static str,
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(message: &'static str, data: T) -> Self {
        Self {
            success: true,
            message,
            data,
        }
    }
}
