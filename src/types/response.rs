use actix_web::{http::StatusCode, HttpRequest, HttpResponse, Responder};
use serde::Serialize;

use crate::types::error::AppError;

/// What a handler hands back on success: a JSON body with 200/201, or a bare
/// status.
pub enum ApiResponse<T> {
    Ok(T),
    Created(T),
    Status(StatusCode),
}

impl<T> ApiResponse<T> {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiResponse::Ok(_) => StatusCode::OK,
            ApiResponse::Created(_) => StatusCode::CREATED,
            ApiResponse::Status(code) => *code,
        }
    }
}

impl<T: Serialize> Responder for ApiResponse<T> {
    type Body = actix_web::body::BoxBody;

    fn respond_to(self, _: &HttpRequest) -> HttpResponse {
        let mut res = HttpResponse::build(self.status());
        match self {
            ApiResponse::Ok(body) | ApiResponse::Created(body) => res.json(body),
            ApiResponse::Status(_) => res.finish(),
        }
    }
}

/// Handlers without a body use the default `()`.
pub type ApiResult<T = ()> = Result<ApiResponse<T>, AppError>;
