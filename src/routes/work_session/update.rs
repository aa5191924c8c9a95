use crate::db::postgres_service::PostgresService;
use crate::types::response::{ApiResponse, ApiResult};
use crate::types::work_session::{RWorkSessionUpdate, WorkSessionRes};
use crate::utils::jwt::Claims;
use actix_web::{put, web};
use std::sync::Arc;
use uuid::Uuid;

#[put("/{work_session_id}")]
pub async fn update_work_session(
    _req: actix_web::HttpRequest,
    db: web::Data<Arc<PostgresService>>,
    claims: web::ReqData<Claims>,
    path: web::Path<Uuid>,
    data: web::Json<RWorkSessionUpdate>,
) -> ApiResult<WorkSessionRes> {
    let id = path.into_inner();
    db.update_work_session(claims.sub, id, data.into_inner()).await?;
    let (ws, tabs) = db.get_work_session(claims.sub, id).await?;

    Ok(ApiResponse::Ok(WorkSessionRes::new(ws, tabs)))
}
