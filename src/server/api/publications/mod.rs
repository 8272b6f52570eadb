//! Handlers for the publication resource.
use actix_web::{web, HttpResponse};

use crate::db::models::publication::{self, Publication};
use crate::db::DatabaseTransaction;
use crate::server::errors::ApiError;
use crate::utils::validation::WriteMode;

use self::request::PublicationPayload;
use super::state::{App as AppState, Global as _};
use super::{commit_or_rollback, ensure_professor};

/// Module that maps the HTTP web request body to structs.
pub mod request;

/// Module that maps the HTTP web response to structs.
pub mod response;

/// List every publication.
#[tracing::instrument(skip(data))]
pub async fn list(data: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let publications: Vec<response::Publication> = publication::Manager::find_all(data.db())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(HttpResponse::Ok().json(publications))
}

/// Retrieve one publication.
#[tracing::instrument(skip(data))]
pub async fn retrieve(
    data: web::Data<AppState>,
    id: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let found = publication::Manager::find_by_id(data.db(), *id).await?;
    Ok(HttpResponse::Ok().json(response::Publication::from(found)))
}

/// Create a publication for an existing professor.
#[tracing::instrument(skip(data, payload))]
pub async fn create(
    data: web::Data<AppState>,
    payload: web::Json<PublicationPayload>,
) -> Result<HttpResponse, ApiError> {
    let mut new_publication = payload.into_inner().validate(WriteMode::Create)?;
    let mut tx = data.db().begin().await?;
    let result = insert(&mut tx, &new_publication).await;
    new_publication.id = commit_or_rollback(tx, result).await?;
    Ok(HttpResponse::Created().json(response::Publication::from(new_publication)))
}

/// Replace every field of a publication.
#[tracing::instrument(skip(data, payload))]
pub async fn update(
    data: web::Data<AppState>,
    id: web::Path<i64>,
    payload: web::Json<PublicationPayload>,
) -> Result<HttpResponse, ApiError> {
    save(&data, *id, payload.into_inner(), false).await
}

/// Update only the fields present in the body.
#[tracing::instrument(skip(data, payload))]
pub async fn partial_update(
    data: web::Data<AppState>,
    id: web::Path<i64>,
    payload: web::Json<PublicationPayload>,
) -> Result<HttpResponse, ApiError> {
    save(&data, *id, payload.into_inner(), true).await
}

/// Delete a publication.
#[tracing::instrument(skip(data))]
pub async fn destroy(
    data: web::Data<AppState>,
    id: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let mut tx = data.db().begin().await?;
    let result = match publication::TxManager::delete(&mut tx, *id).await {
        Ok(0) => Err(ApiError::NotFound),
        Ok(_) => Ok(()),
        Err(err) => Err(err.into()),
    };
    commit_or_rollback(tx, result).await?;
    Ok(HttpResponse::NoContent().finish())
}

async fn insert(
    tx: &mut DatabaseTransaction,
    new_publication: &Publication,
) -> Result<i64, ApiError> {
    ensure_professor(tx, &new_publication.professor_id).await?;
    let id = publication::TxManager::create(
        tx,
        &new_publication.professor_id,
        &new_publication.title,
        new_publication.publication_type,
        &new_publication.publication_date,
        &new_publication.venue_name,
    )
    .await?;
    Ok(id)
}

async fn save(
    data: &AppState,
    id: i64,
    payload: PublicationPayload,
    partial: bool,
) -> Result<HttpResponse, ApiError> {
    let mut tx = data.db().begin().await?;
    let result = write_update(&mut tx, id, payload, partial).await;
    let updated = commit_or_rollback(tx, result).await?;
    Ok(HttpResponse::Ok().json(response::Publication::from(updated)))
}

async fn write_update(
    tx: &mut DatabaseTransaction,
    id: i64,
    payload: PublicationPayload,
    partial: bool,
) -> Result<Publication, ApiError> {
    let stored = publication::TxManager::find_by_id(tx, id).await?;
    let mode = if partial {
        WriteMode::Patch(&stored)
    } else {
        WriteMode::Replace(&stored)
    };
    let updated = payload.validate(mode)?;
    ensure_professor(tx, &updated.professor_id).await?;
    publication::TxManager::update(tx, &updated).await?;
    Ok(updated)
}
