use crate::db::postgres_service::PostgresService;
use crate::types::response::{ApiResponse, ApiResult};
use crate::types::work_session::{RWorkSessionCreate, RWorkSessionFromTemplate, WorkSessionRes};
use crate::utils::jwt::Claims;
use actix_web::{post, web};
use std::sync::Arc;

#[post("")]
pub async fn create_work_session(
    _req: actix_web::HttpRequest,
    db: web::Data<Arc<PostgresService>>,
    claims: web::ReqData<Claims>,
    data: web::Json<RWorkSessionCreate>,
) -> ApiResult<WorkSessionRes> {
    let ws = db.create_work_session(claims.sub, data.into_inner().name).await?;

    Ok(ApiResponse::Created(WorkSessionRes::new(ws, vec![])))
}

/// New session seeded with copies of an existing session's tabs.
#[post("/from-template")]
pub async fn create_from_template(
    _req: actix_web::HttpRequest,
    db: web::Data<Arc<PostgresService>>,
    claims: web::ReqData<Claims>,
    data: web::Json<RWorkSessionFromTemplate>,
) -> ApiResult<WorkSessionRes> {
    let data = data.into_inner();
    let (ws, tabs) = db
        .create_work_session_from_template(claims.sub, data.template_id, data.name)
        .await?;

    Ok(ApiResponse::Created(WorkSessionRes::new(ws, tabs)))
}
