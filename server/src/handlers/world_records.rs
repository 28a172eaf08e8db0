use crate::db::Db;
use crate::error::AppError;
use crate::services::world_records as service;
use crate::validation;
use ntex::web::{self, HttpResponse};
use std::sync::Arc;

pub async fn get_world_records(
    db: web::types::State<Arc<Db>>,
    path: web::types::Path<String>,
) -> Result<HttpResponse, AppError> {
    let user_id = validation::validate_user_id(&path.into_inner())?;
    tracing::info!(%user_id, "world records requested");
    let db: &Db = &db;
    let summary = service::compute_world_records(db, &user_id)?;
    Ok(HttpResponse::Ok().json(&summary))
}

pub async fn get_world_records_detailed(
    db: web::types::State<Arc<Db>>,
    path: web::types::Path<String>,
) -> Result<HttpResponse, AppError> {
    let user_id = validation::validate_user_id(&path.into_inner())?;
    tracing::info!(%user_id, "detailed world records requested");
    let db: &Db = &db;
    let detailed = service::compute_world_records_detailed(db, &user_id)?;
    Ok(HttpResponse::Ok().json(&detailed))
}
