//! Handlers for the academic record resource.
use actix_web::{web, HttpResponse};

use crate::db::models::academic::{self, Academic};
use crate::db::DatabaseTransaction;
use crate::server::errors::ApiError;
use crate::utils::validation::WriteMode;

use self::request::AcademicPayload;
use super::state::{App as AppState, Global as _};
use super::{commit_or_rollback, ensure_professor};

/// Module that maps the HTTP web request body to structs.
pub mod request;

/// Module that maps the HTTP web response to structs.
pub mod response;

/// List every academic record.
#[tracing::instrument(skip(data))]
pub async fn list(data: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let academics: Vec<response::Academic> = academic::Manager::find_all(data.db())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(HttpResponse::Ok().json(academics))
}

/// Retrieve one academic record.
#[tracing::instrument(skip(data))]
pub async fn retrieve(
    data: web::Data<AppState>,
    id: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let found = academic::Manager::find_by_id(data.db(), *id).await?;
    Ok(HttpResponse::Ok().json(response::Academic::from(found)))
}

/// Create an academic record for an existing professor.
#[tracing::instrument(skip(data, payload))]
pub async fn create(
    data: web::Data<AppState>,
    payload: web::Json<AcademicPayload>,
) -> Result<HttpResponse, ApiError> {
    let mut new_academic = payload.into_inner().validate(WriteMode::Create)?;
    let mut tx = data.db().begin().await?;
    let result = insert(&mut tx, &new_academic).await;
    new_academic.id = commit_or_rollback(tx, result).await?;
    Ok(HttpResponse::Created().json(response::Academic::from(new_academic)))
}

/// Replace every field of an academic record.
#[tracing::instrument(skip(data, payload))]
pub async fn update(
    data: web::Data<AppState>,
    id: web::Path<i64>,
    payload: web::Json<AcademicPayload>,
) -> Result<HttpResponse, ApiError> {
    save(&data, *id, payload.into_inner(), false).await
}

/// Update only the fields present in the body.
#[tracing::instrument(skip(data, payload))]
pub async fn partial_update(
    data: web::Data<AppState>,
    id: web::Path<i64>,
    payload: web::Json<AcademicPayload>,
) -> Result<HttpResponse, ApiError> {
    save(&data, *id, payload.into_inner(), true).await
}

/// Delete an academic record.
#[tracing::instrument(skip(data))]
pub async fn destroy(
    data: web::Data<AppState>,
    id: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let mut tx = data.db().begin().await?;
    let result = match academic::TxManager::delete(&mut tx, *id).await {
        Ok(0) => Err(ApiError::NotFound),
        Ok(_) => Ok(()),
        Err(err) => Err(err.into()),
    };
    commit_or_rollback(tx, result).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Insert a validated record, returning its id.
async fn insert(tx: &mut DatabaseTransaction, new_academic: &Academic) -> Result<i64, ApiError> {
    ensure_professor(tx, &new_academic.professor_id).await?;
    let id = academic::TxManager::create(
        tx,
        &new_academic.professor_id,
        new_academic.degree_type,
        &new_academic.university,
        new_academic.year,
    )
    .await?;
    Ok(id)
}

/// Shared body of `PUT` and `PATCH`.
async fn save(
    data: &AppState,
    id: i64,
    payload: AcademicPayload,
    partial: bool,
) -> Result<HttpResponse, ApiError> {
    let mut tx = data.db().begin().await?;
    let result = write_update(&mut tx, id, payload, partial).await;
    let updated = commit_or_rollback(tx, result).await?;
    Ok(HttpResponse::Ok().json(response::Academic::from(updated)))
}

/// Merge the payload into the stored record and write it back.
async fn write_update(
    tx: &mut DatabaseTransaction,
    id: i64,
    payload: AcademicPayload,
    partial: bool,
) -> Result<Academic, ApiError> {
    let stored = academic::TxManager::find_by_id(tx, id).await?;
    let mode = if partial {
        WriteMode::Patch(&stored)
    } else {
        WriteMode::Replace(&stored)
    };
    let updated = payload.validate(mode)?;
    ensure_professor(tx, &updated.professor_id).await?;
    academic::TxManager::update(tx, &updated).await?;
    Ok(updated)
}
