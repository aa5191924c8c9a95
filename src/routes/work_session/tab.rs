use crate::db::postgres_service::PostgresService;
use crate::types::response::{ApiResponse, ApiResult};
use crate::types::work_session::{RTabCreate, RTabUpdate, TabRes};
use crate::utils::jwt::Claims;
use actix_web::{delete, post, put, web, http::StatusCode};
use std::sync::Arc;
use uuid::Uuid;

#[post("/{work_session_id}/tabs")]
pub async fn create_tab(
    _req: actix_web::HttpRequest,
    db: web::Data<Arc<PostgresService>>,
    claims: web::ReqData<Claims>,
    path: web::Path<Uuid>,
    data: web::Json<RTabCreate>,
) -> ApiResult<TabRes> {
    let tab = db.create_tab(claims.sub, path.into_inner(), data.into_inner()).await?;

    Ok(ApiResponse::Created(tab.into()))
}

#[put("/{work_session_id}/tabs/{tab_id}")]
pub async fn update_tab(
    _req: actix_web::HttpRequest,
    db: web::Data<Arc<PostgresService>>,
    claims: web::ReqData<Claims>,
    path: web::Path<(Uuid, Uuid)>,
    data: web::Json<RTabUpdate>,
) -> ApiResult<TabRes> {
    let (work_session_id, tab_id) = path.into_inner();
    let tab = db.update_tab(claims.sub, work_session_id, tab_id, data.into_inner()).await?;

    Ok(ApiResponse::Ok(tab.into()))
}

#[delete("/{work_session_id}/tabs/{tab_id}")]
pub async fn delete_tab(
    _req: actix_web::HttpRequest,
    db: web::Data<Arc<PostgresService>>,
    claims: web::ReqData<Claims>,
    path: web::Path<(Uuid, Uuid)>,
) -> ApiResult {
    let (work_session_id, tab_id) = path.into_inner();
    db.delete_tab(claims.sub, work_session_id, tab_id).await?;

    Ok(ApiResponse::Status(StatusCode::NO_CONTENT))
}
