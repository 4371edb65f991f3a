use crate::api::v1::handler::ApiResponse;
use crate::application_port::*;
use serde::Serialize;
use std::convert::Infallible;
use thiserror::Error;
use tracing::warn;
use warp::http::StatusCode;
use warp::{Rejection, reject};

pub async fn recover_error(err: Rejection) -> Result<impl warp::Reply, Infallible> {
    if let Some(err) = err.find::<ApiErrorCode>() {
        let status = match err {
            ApiErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        };
        let json = warp::reply::json(&ApiResponse::<()>::err(err.clone(), err.to_string()));
        Ok(warp::reply::with_status(json, status))
    } else {
        let json = warp::reply::json(&ApiResponse::<()> {
            success: false,
            data: None,
            error: Some(ApiError {
                code: ApiErrorCode::InternalError,
                message: format!("Unhandled error: {:?}", err),
            }),
        });
        Ok(warp::reply::with_status(
            json,
            StatusCode::INTERNAL_SERVER_ERROR,
        ))
    }
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub code: ApiErrorCode,
    pub message: String,
}

#[derive(Debug, Clone, Error, Serialize)]
pub enum ApiErrorCode {
    #[error("User not found")]
    UserNotFound,
    #[error("Session already exists")]
    SessionAlreadyExists,
    #[error("Access token is not valid")]
    InvalidAccessToken,
    #[error("Refresh token not found")]
    RefreshTokenNotFound,
    #[error("Refresh token already used")]
    RefreshTokenAlreadyUsed,
    #[error("Refresh token expired")]
    RefreshTokenExpired,
    #[error("No sessions found for this user")]
    NoSessionsFound,
    #[error("Client IP is not a valid address")]
    BadClientIp,
    #[error("Internal error")]
    InternalError,
}

impl ApiErrorCode {
    pub fn internal<E: std::fmt::Display>(error: E) -> ApiErrorCode {
        warn!("Internal error: {}", error);
        ApiErrorCode::InternalError
    }
}

impl reject::Reject for ApiErrorCode {}

impl From<AuthError> for ApiErrorCode {
    fn from(error: AuthError) -> Self {
        match error {
            AuthError::UserNotFound => ApiErrorCode::UserNotFound,
            AuthError::SessionAlreadyExists => ApiErrorCode::SessionAlreadyExists,
            AuthError::ParsingAccessToken => ApiErrorCode::InvalidAccessToken,
            AuthError::RefreshTokenNotFound => ApiErrorCode::RefreshTokenNotFound,
            AuthError::RefreshTokenAlreadyUsed => ApiErrorCode::RefreshTokenAlreadyUsed,
            AuthError::RefreshTokenExpired => ApiErrorCode::RefreshTokenExpired,
            AuthError::NoSessionsFoundWithThisUserID => ApiErrorCode::NoSessionsFound,
            AuthError::Store(e) => ApiErrorCode::internal(e),
            AuthError::InternalError(e) => ApiErrorCode::internal(e),
        }
    }
}
