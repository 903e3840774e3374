use axum::Json;
use serde::{Deserialize, Serialize};

use crate::auth;
use crate::database::models::User;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::{AccountService, SignInOutcome};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Identity token minted by the trusted identity layer.
    pub token: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
    pub expires_in: i64,
}

/// POST /auth/login - exchange a verified identity token for a session token
pub async fn login(Json(body): Json<LoginRequest>) -> ApiResult<LoginResponse> {
    let identity = auth::verify_identity_token(&body.token)?;

    let service = AccountService::new().await?;

    match service.sign_in(&identity).await? {
        SignInOutcome::Admitted {
            user,
            token,
            expires_in,
        } => Ok(ApiResponse::success(LoginResponse {
            token,
            user,
            expires_in,
        })),
        // One generic message for every denial; the reason stays in the log.
        SignInOutcome::Denied(_) => Err(ApiError::forbidden("Sign-in not permitted")),
    }
}
