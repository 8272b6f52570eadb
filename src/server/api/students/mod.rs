//! Handlers for the student resource.
//!
//! Students are served exactly as stored; there is no filtering and no
//! nested data.
use actix_web::{web, HttpResponse};

use crate::db::models::student::{self, Student};
use crate::db::DatabaseTransaction;
use crate::server::errors::ApiError;
use crate::utils::validation::WriteMode;

use self::request::StudentPayload;
use super::commit_or_rollback;
use super::state::{App as AppState, Global as _};

/// Module that maps the HTTP web request body to structs.
pub mod request;

/// List every student.
#[tracing::instrument(skip(data))]
pub async fn list(data: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let students = student::Manager::find_all(data.db()).await?;
    Ok(HttpResponse::Ok().json(students))
}

/// Retrieve one student by roll number.
#[tracing::instrument(skip(data))]
pub async fn retrieve(
    data: web::Data<AppState>,
    roll_number: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let found = student::Manager::find_by_roll_number(data.db(), &roll_number).await?;
    Ok(HttpResponse::Ok().json(found))
}

/// Create a student.
#[tracing::instrument(skip(data, payload))]
pub async fn create(
    data: web::Data<AppState>,
    payload: web::Json<StudentPayload>,
) -> Result<HttpResponse, ApiError> {
    let new_student = payload.into_inner().validate(WriteMode::Create)?;
    let mut tx = data.db().begin().await?;
    let result = student::TxManager::create(&mut tx, &new_student)
        .await
        .map_err(ApiError::from);
    commit_or_rollback(tx, result).await?;
    tracing::info!("Created student {}", new_student.roll_number);
    Ok(HttpResponse::Created().json(new_student))
}

/// Replace every mutable field of a student.
#[tracing::instrument(skip(data, payload))]
pub async fn update(
    data: web::Data<AppState>,
    roll_number: web::Path<String>,
    payload: web::Json<StudentPayload>,
) -> Result<HttpResponse, ApiError> {
    save(&data, &roll_number, payload.into_inner(), false).await
}

/// Update only the fields present in the body.
#[tracing::instrument(skip(data, payload))]
pub async fn partial_update(
    data: web::Data<AppState>,
    roll_number: web::Path<String>,
    payload: web::Json<StudentPayload>,
) -> Result<HttpResponse, ApiError> {
    save(&data, &roll_number, payload.into_inner(), true).await
}

/// Delete a student.
#[tracing::instrument(skip(data))]
pub async fn destroy(
    data: web::Data<AppState>,
    roll_number: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let mut tx = data.db().begin().await?;
    let result = match student::TxManager::delete(&mut tx, &roll_number).await {
        Ok(0) => Err(ApiError::NotFound),
        Ok(_) => Ok(()),
        Err(err) => Err(err.into()),
    };
    commit_or_rollback(tx, result).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Shared body of `PUT` and `PATCH`.
async fn save(
    data: &AppState,
    roll_number: &str,
    payload: StudentPayload,
    partial: bool,
) -> Result<HttpResponse, ApiError> {
    let mut tx = data.db().begin().await?;
    let result = write_update(&mut tx, roll_number, payload, partial).await;
    let updated = commit_or_rollback(tx, result).await?;
    Ok(HttpResponse::Ok().json(updated))
}

/// Merge the payload into the stored student and write it back.
async fn write_update(
    tx: &mut DatabaseTransaction,
    roll_number: &str,
    payload: StudentPayload,
    partial: bool,
) -> Result<Student, ApiError> {
    let stored = student::TxManager::find_by_roll_number(tx, roll_number).await?;
    let mode = if partial {
        WriteMode::Patch(&stored)
    } else {
        WriteMode::Replace(&stored)
    };
    let updated = payload.validate(mode)?;
    student::TxManager::update(tx, &updated).await?;
    Ok(updated)
}
