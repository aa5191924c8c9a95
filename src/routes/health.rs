use actix_web::{get, http::StatusCode};

use crate::types::response::{ApiResponse, ApiResult};

#[get("")]
pub async fn health(
    _req: actix_web::HttpRequest
) -> ApiResult {
    Ok(ApiResponse::Status(StatusCode::OK))
}
