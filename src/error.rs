use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use thiserror::Error;
use tracing::error;

use crate::views;

/// Application error taxonomy.
///
/// `NotFound` and `BadCredential` are distinct internally (and in logs) but
/// render as the same generic message, so a login response never reveals
/// whether the email exists. `NotOwnedOrMissing` deliberately conflates
/// "no such task" with "not your task" for the same reason.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("email already registered")]
    AlreadyExists,

    #[error("no account for that email")]
    NotFound,

    #[error("password mismatch")]
    BadCredential,

    #[error("task not found for this user")]
    NotOwnedOrMissing,

    #[error("store error: {0}")]
    Store(#[from] sqlx::Error),

    #[error("password hash error: {0}")]
    Hash(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::AlreadyExists => (
                StatusCode::CONFLICT,
                Html(views::render_register(Some("Email already registered."))),
            )
                .into_response(),
            // Same user-facing message for both login failures.
            AppError::NotFound | AppError::BadCredential => (
                StatusCode::UNAUTHORIZED,
                Html(views::render_login(Some("Invalid email or password."))),
            )
                .into_response(),
            AppError::NotOwnedOrMissing => Redirect::to("/").into_response(),
            AppError::Store(e) => {
                error!(error = %e, "store operation failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Html(views::render_error("Something went wrong. Please try again.")),
                )
                    .into_response()
            }
            AppError::Hash(e) => {
                error!(error = %e, "password hashing failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Html(views::render_error("Something went wrong. Please try again.")),
                )
                    .into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn already_exists_is_conflict() {
        assert_eq!(status_of(AppError::AlreadyExists), StatusCode::CONFLICT);
    }

    #[test]
    fn login_failures_share_a_status() {
        assert_eq!(status_of(AppError::NotFound), StatusCode::UNAUTHORIZED);
        assert_eq!(status_of(AppError::BadCredential), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn not_owned_redirects_home() {
        let res = AppError::NotOwnedOrMissing.into_response();
        assert!(res.status().is_redirection());
        assert_eq!(res.headers()["location"], "/");
    }

    #[test]
    fn internal_failures_are_500() {
        assert_eq!(
            status_of(AppError::Hash("boom".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
