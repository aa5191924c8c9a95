use crate::services::user::UserService;
use crate::types::response::{ApiResponse, ApiResult};
use crate::types::token::TokenQuery;
use crate::types::user::REmailUpdate;
use crate::utils::jwt::Claims;
use crate::utils::webutils::ensure_subject;
use actix_web::{get, post, web, http::StatusCode};
use std::sync::Arc;
use uuid::Uuid;

/// Changes the address and mails a confirmation link to the new one.
#[post("/{user_id}/email-update")]
pub async fn update_email(
    _req: actix_web::HttpRequest,
    users: web::Data<Arc<UserService>>,
    claims: web::ReqData<Claims>,
    path: web::Path<Uuid>,
    body: web::Json<REmailUpdate>,
) -> ApiResult {
    let user_id = path.into_inner();
    ensure_subject(&claims, user_id)?;

    users.update_email(user_id, &body.email).await?;

    Ok(ApiResponse::Status(StatusCode::OK))
}

#[get("/email-update/verification")]
pub async fn verify_email_update(
    _req: actix_web::HttpRequest,
    users: web::Data<Arc<UserService>>,
    query: web::Query<TokenQuery>,
) -> ApiResult {
    users.verify_user_with_token(&query.token).await?;

    Ok(ApiResponse::Status(StatusCode::OK))
}
