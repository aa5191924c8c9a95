use crate::services::auth::AuthService;
use crate::types::response::{ApiResponse, ApiResult};
use crate::types::user::RCredentials;
use actix_web::{post, web, http::StatusCode};
use std::sync::Arc;

#[post("/register")]
pub async fn register(
    _req: actix_web::HttpRequest,
    auth: web::Data<Arc<AuthService>>,
    body: web::Json<RCredentials>,
) -> ApiResult {
    auth.register(&body.email, &body.password).await?;

    Ok(ApiResponse::Status(StatusCode::CREATED))
}
