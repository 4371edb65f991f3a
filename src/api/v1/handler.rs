use super::error::*;
use crate::application_port::{TokenPair, TokenService};
use crate::domain_model::UserId;
use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use std::sync::Arc;
use warp::{self, reject};

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<ApiError>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        ApiResponse {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(code: ApiErrorCode, message: impl Into<String>) -> Self {
        ApiResponse {
            success: false,
            data: None,
            error: Some(ApiError {
                code,
                message: message.into(),
            }),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateTokensRequest {
    pub user_id: UserId,
    pub client_ip: String,
}

pub async fn create_tokens(
    body: CreateTokensRequest,
    token_service: Arc<dyn TokenService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    if body.client_ip.parse::<IpAddr>().is_err() {
        return Err(reject::custom(ApiErrorCode::BadClientIp));
    }

    let pair: TokenPair = token_service
        .create_tokens(body.user_id, &body.client_ip)
        .await
        .map_err(ApiErrorCode::from)
        .map_err(reject::custom)?;

    Ok(warp::reply::json(&ApiResponse::ok(pair)))
}

#[derive(Debug, Deserialize)]
pub struct RefreshTokensRequest {
    pub access_token: String,
    pub refresh_token: String,
}

pub async fn refresh_tokens(
    body: RefreshTokensRequest,
    token_service: Arc<dyn TokenService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let pair: TokenPair = token_service
        .refresh_tokens(&body.refresh_token, &body.access_token)
        .await
        .map_err(ApiErrorCode::from)
        .map_err(reject::custom)?;

    Ok(warp::reply::json(&ApiResponse::ok(pair)))
}
