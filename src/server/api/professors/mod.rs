//! Handlers for the professor resource.
//!
//! Reads go through [`queries`] so that academics and publications arrive
//! nested; writes only touch the professor's own columns.
use actix_web::{web, HttpResponse};

use crate::db::models::professor::{self, Professor};
use crate::db::{queries, DatabaseTransaction};
use crate::server::errors::ApiError;
use crate::utils::validation::WriteMode;

use self::request::{ProfessorPayload, ProfessorQuery};
use super::commit_or_rollback;
use super::state::{App as AppState, Global as _};

/// Module that maps the HTTP web request body to structs.
pub mod request;

/// Module that maps the HTTP web response to structs.
pub mod response;

/// List professors with their academics and publications.
#[tracing::instrument(skip(data))]
pub async fn list(
    data: web::Data<AppState>,
    query: web::Query<ProfessorQuery>,
) -> Result<HttpResponse, ApiError> {
    let date_filter_enabled = data.config().professors.publication_date_filter;
    let filter = query.into_inner().into_filter(date_filter_enabled)?;
    let professors: Vec<response::Professor> = queries::find_professors(data.db(), &filter)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(HttpResponse::Ok().json(professors))
}

/// Retrieve one professor with its academics and publications.
#[tracing::instrument(skip(data))]
pub async fn retrieve(
    data: web::Data<AppState>,
    employee_code: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let found = queries::find_professor(data.db(), &employee_code).await?;
    Ok(HttpResponse::Ok().json(response::Professor::from(found)))
}

/// Create a professor. Nested records are never written here.
#[tracing::instrument(skip(data, payload))]
pub async fn create(
    data: web::Data<AppState>,
    payload: web::Json<ProfessorPayload>,
) -> Result<HttpResponse, ApiError> {
    let new_professor = payload.into_inner().validate(WriteMode::Create)?;
    let mut tx = data.db().begin().await?;
    let result = professor::TxManager::create(&mut tx, &new_professor)
        .await
        .map_err(ApiError::from);
    commit_or_rollback(tx, result).await?;
    tracing::info!("Created professor {}", new_professor.employee_code);
    Ok(HttpResponse::Created().json(response::Professor::from(new_professor)))
}

/// Replace every flat field of a professor.
#[tracing::instrument(skip(data, payload))]
pub async fn update(
    data: web::Data<AppState>,
    employee_code: web::Path<String>,
    payload: web::Json<ProfessorPayload>,
) -> Result<HttpResponse, ApiError> {
    save(&data, &employee_code, payload.into_inner(), false).await
}

/// Update only the flat fields present in the body.
#[tracing::instrument(skip(data, payload))]
pub async fn partial_update(
    data: web::Data<AppState>,
    employee_code: web::Path<String>,
    payload: web::Json<ProfessorPayload>,
) -> Result<HttpResponse, ApiError> {
    save(&data, &employee_code, payload.into_inner(), true).await
}

/// Delete a professor together with its academics and publications.
#[tracing::instrument(skip(data))]
pub async fn destroy(
    data: web::Data<AppState>,
    employee_code: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let mut tx = data.db().begin().await?;
    let result = match professor::TxManager::delete(&mut tx, &employee_code).await {
        Ok(0) => Err(ApiError::NotFound),
        Ok(_) => Ok(()),
        Err(err) => Err(err.into()),
    };
    commit_or_rollback(tx, result).await?;
    tracing::info!("Deleted professor {employee_code} and its records");
    Ok(HttpResponse::NoContent().finish())
}

/// Shared body of `PUT` and `PATCH`. Responds with the stored relations.
async fn save(
    data: &AppState,
    employee_code: &str,
    payload: ProfessorPayload,
    partial: bool,
) -> Result<HttpResponse, ApiError> {
    let mut tx = data.db().begin().await?;
    let result = write_update(&mut tx, employee_code, payload, partial).await;
    let updated = commit_or_rollback(tx, result).await?;
    let reloaded = queries::find_professor(data.db(), &updated.employee_code).await?;
    Ok(HttpResponse::Ok().json(response::Professor::from(reloaded)))
}

/// Merge the payload into the stored professor and write it back.
async fn write_update(
    tx: &mut DatabaseTransaction,
    employee_code: &str,
    payload: ProfessorPayload,
    partial: bool,
) -> Result<Professor, ApiError> {
    let stored = professor::TxManager::find_by_employee_code(tx, employee_code).await?;
    let mode = if partial {
        WriteMode::Patch(&stored)
    } else {
        WriteMode::Replace(&stored)
    };
    let updated = payload.validate(mode)?;
    professor::TxManager::update(tx, &updated).await?;
    Ok(updated)
}
