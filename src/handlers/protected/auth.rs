use axum::Extension;
use serde::Serialize;
use uuid::Uuid;

use crate::database::models::UserRole;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WhoamiResponse {
    pub user_id: Uuid,
    pub email: String,
    pub role: UserRole,
}

/// GET /api/auth/whoami - identity as seen by the session token
pub async fn whoami(Extension(user): Extension<AuthUser>) -> ApiResult<WhoamiResponse> {
    Ok(ApiResponse::success(WhoamiResponse {
        user_id: user.user_id,
        email: user.email,
        role: user.role,
    }))
}
