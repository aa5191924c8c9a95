use crate::services::user::UserService;
use crate::types::response::{ApiResponse, ApiResult};
use crate::types::user::{RPasswordReset, RPasswordResetRequest, RPasswordUpdate};
use crate::utils::jwt::Claims;
use crate::utils::webutils::ensure_subject;
use actix_web::{post, web, http::StatusCode};
use std::sync::Arc;
use uuid::Uuid;

#[post("/{user_id}/password-update")]
pub async fn update_password(
    _req: actix_web::HttpRequest,
    users: web::Data<Arc<UserService>>,
    claims: web::ReqData<Claims>,
    path: web::Path<Uuid>,
    body: web::Json<RPasswordUpdate>,
) -> ApiResult {
    let user_id = path.into_inner();
    ensure_subject(&claims, user_id)?;

    users.update_password(user_id, &body.password).await?;

    Ok(ApiResponse::Status(StatusCode::OK))
}

/// Forgot-password: mails a reset link if `email` belongs to the user.
#[post("/{user_id}/password-update/request")]
pub async fn request_password_reset(
    _req: actix_web::HttpRequest,
    users: web::Data<Arc<UserService>>,
    path: web::Path<Uuid>,
    body: web::Json<RPasswordResetRequest>,
) -> ApiResult {
    users.request_password_reset(path.into_inner(), &body.email).await?;

    Ok(ApiResponse::Status(StatusCode::OK))
}

#[post("/password-update/verification")]
pub async fn verify_password_reset(
    _req: actix_web::HttpRequest,
    users: web::Data<Arc<UserService>>,
    body: web::Json<RPasswordReset>,
) -> ApiResult {
    users.reset_password(&body.token, &body.password).await?;

    Ok(ApiResponse::Status(StatusCode::OK))
}
