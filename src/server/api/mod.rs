//! This module contains the API endpoints for the server.
use actix_web::{HttpRequest, HttpResponse};
use serde_json::json;

use crate::db::models::professor;
use crate::db::{DatabaseTransaction, Tx as _};
use crate::server::errors::ApiError;
use crate::utils::validation::FieldErrors;

pub mod academics;
pub mod admin;
pub mod professors;
pub mod publications;
pub mod routes;
pub mod state;
pub mod students;

/// Resources listed on the API root, in display order.
const RESOURCES: [&str; 4] = ["students", "professors", "academics", "publications"];

/// Handler for the API root: links to every resource collection.
#[tracing::instrument(skip(req))]
pub async fn api_root(req: HttpRequest) -> HttpResponse {
    let info = req.connection_info();
    let base = format!("{}://{}/api", info.scheme(), info.host());
    let mut links = serde_json::Map::new();
    for resource in RESOURCES {
        links.insert(resource.to_owned(), json!(format!("{base}/{resource}/")));
    }
    HttpResponse::Ok().json(links)
}

/// Commit `tx` if `result` succeeded, roll it back otherwise.
///
/// # Errors
/// Errors with the write's own error, or if the commit or rollback fails.
pub async fn commit_or_rollback<T>(
    tx: DatabaseTransaction,
    result: Result<T, ApiError>,
) -> Result<T, ApiError> {
    match result {
        Ok(value) => {
            tx.commit().await?;
            Ok(value)
        }
        Err(err) => {
            tx.rollback().await?;
            Err(err)
        }
    }
}

/// Check that the professor a child record points to exists.
///
/// # Errors
/// Errors with a validation failure on `professor` if it does not.
pub async fn ensure_professor(
    tx: &mut DatabaseTransaction,
    employee_code: &str,
) -> Result<(), ApiError> {
    match professor::TxManager::find_by_employee_code(tx, employee_code).await {
        Ok(_) => Ok(()),
        Err(err) => match ApiError::from(err) {
            ApiError::NotFound => Err(FieldErrors::single(
                "professor",
                format!("Invalid pk \"{employee_code}\" - object does not exist."),
            )
            .into()),
            other => Err(other),
        },
    }
}
