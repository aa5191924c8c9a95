use crate::services::auth::AuthService;
use crate::types::response::{ApiResponse, ApiResult};
use crate::types::token::TokenQuery;
use actix_web::{get, web, http::StatusCode};
use std::sync::Arc;

#[get("/verify")]
pub async fn verify(
    _req: actix_web::HttpRequest,
    auth: web::Data<Arc<AuthService>>,
    query: web::Query<TokenQuery>,
) -> ApiResult {
    auth.verify(&query.token).await?;

    Ok(ApiResponse::Status(StatusCode::OK))
}
