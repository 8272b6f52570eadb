//! Run the admin backend's HTTP server.
#![allow(clippy::exit, clippy::module_name_repetitions)]
use crate::db;
use crate::server::api::state::App as AppState;
use crate::server::tracing::UnidashRootSpanBuilder;
use crate::utils::config::Config;
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::{App, Error, HttpServer};
use tracing_actix_web::TracingLogger;

use std::{io, process};

use actix_http::body::MessageBody;
use actix_service::ServiceFactory;

use crate::server::api::routes;

/// Connect to the database and serve the API until shut down.
#[actix_web::main]
pub async fn serve(config: Config) -> io::Result<()> {
    let bind = config.server.bind.clone();
    let port = config.server.port;

    let db = match db::init::connect(&config.database).await {
        Ok(db) => db,
        Err(err) => {
            tracing::error!(
                "error: could not connect to database. Confirm that DATABASE_URL env var is set correctly."
            );
            tracing::error!("Error: {:?}", err);
            process::exit(1);
        }
    };
    tracing::info!("Running admin server on http://{bind}:{port}/api/.");
    let state = AppState { db, config };

    HttpServer::new(move || init_app(&state).wrap(TracingLogger::<UnidashRootSpanBuilder>::new()))
        .bind((bind, port))?
        .run()
        .await
}

/// Initialize the application and all routing at start-up time.
///
/// # Arguments
/// * `state` - The application state
pub fn init_app(
    state: &AppState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Response = ServiceResponse<impl MessageBody>,
        Config = (),
        InitError = (),
        Error = Error,
    >,
> {
    routes::register_app(App::new(), state)
}
