use crate::services::auth::AuthService;
use crate::types::response::{ApiResponse, ApiResult};
use crate::types::user::{LoginRes, RCredentials};
use actix_web::{post, web};
use std::sync::Arc;

#[post("/login")]
pub async fn login(
    _req: actix_web::HttpRequest,
    auth: web::Data<Arc<AuthService>>,
    body: web::Json<RCredentials>,
) -> ApiResult<LoginRes> {
    let token = auth.login(&body.email, &body.password).await?;

    Ok(ApiResponse::Ok(LoginRes { token }))
}
