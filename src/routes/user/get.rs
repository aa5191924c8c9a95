use crate::services::user::UserService;
use crate::types::response::{ApiResponse, ApiResult};
use crate::types::user::UserRes;
use crate::utils::jwt::Claims;
use crate::utils::webutils::ensure_subject;
use actix_web::{get, web};
use std::sync::Arc;
use uuid::Uuid;

#[get("/{user_id}")]
pub async fn get_user(
    _req: actix_web::HttpRequest,
    users: web::Data<Arc<UserService>>,
    claims: web::ReqData<Claims>,
    path: web::Path<Uuid>,
) -> ApiResult<UserRes> {
    let user_id = path.into_inner();
    ensure_subject(&claims, user_id)?;

    let user = users.get_user(user_id).await?;

    Ok(ApiResponse::Ok(user.into()))
}
