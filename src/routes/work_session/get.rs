use crate::db::postgres_service::PostgresService;
use crate::types::response::{ApiResponse, ApiResult};
use crate::types::work_session::WorkSessionRes;
use crate::utils::jwt::Claims;
use actix_web::{get, web};
use std::sync::Arc;
use uuid::Uuid;

#[get("/{work_session_id}")]
pub async fn get_work_session(
    _req: actix_web::HttpRequest,
    db: web::Data<Arc<PostgresService>>,
    claims: web::ReqData<Claims>,
    path: web::Path<Uuid>,
) -> ApiResult<WorkSessionRes> {
    let (ws, tabs) = db.get_work_session(claims.sub, path.into_inner()).await?;

    Ok(ApiResponse::Ok(WorkSessionRes::new(ws, tabs)))
}
