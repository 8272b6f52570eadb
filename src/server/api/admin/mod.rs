//! Handlers serving the admin registry.
use actix_web::{web, HttpResponse};

use crate::admin;
use crate::server::errors::ApiError;

use super::state::{App as AppState, Global as _};

/// Serve every registered model.
#[tracing::instrument]
pub async fn index() -> HttpResponse {
    HttpResponse::Ok().json(admin::SITE)
}

/// Serve the changelist of one registered model.
#[tracing::instrument(skip(data))]
pub async fn changelist(
    data: web::Data<AppState>,
    model: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let entry = admin::find(&model).ok_or(ApiError::NotFound)?;
    let rows = admin::changelist(data.db(), entry).await?;
    Ok(HttpResponse::Ok().json(rows))
}
