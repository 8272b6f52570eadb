//! A central place to register App routes.
use actix_service::ServiceFactory;
use actix_web::{
    body::MessageBody,
    dev::{ServiceRequest, ServiceResponse},
    web, App, Error,
};

use crate::server::errors::ApiError;

use super::state::App as AppState;
use super::{academics, admin, api_root, professors, publications, students};

#[expect(
    clippy::literal_string_with_formatting_args,
    reason = "Actix Web resource path uses `{param}` syntax which is not formatting but route pattern matching"
)]
/// Central place to register all the App routing.
///
/// Every collection answers `GET` and `POST`; every item answers `GET`,
/// `PUT`, `PATCH` and `DELETE`. Paths carry a trailing slash.
#[tracing::instrument(skip(app, state))]
pub fn register_app<
    U: MessageBody,
    V: ServiceFactory<
        ServiceRequest,
        Response = ServiceResponse<U>,
        Config = (),
        InitError = (),
        Error = Error,
    >,
>(
    app: App<V>,
    state: &AppState,
) -> App<V> {
    app.app_data(web::Data::new(state.clone()))
        .app_data(
            web::JsonConfig::default()
                .error_handler(|err, _req| ApiError::BadRequest(err.to_string()).into()),
        )
        .app_data(
            web::QueryConfig::default()
                .error_handler(|err, _req| ApiError::BadRequest(err.to_string()).into()),
        )
        .app_data(web::PathConfig::default().error_handler(|_err, _req| ApiError::NotFound.into()))
        .service(
            web::scope("/api")
                .service(web::resource("/").route(web::get().to(api_root)))
                .service(
                    web::resource("/students/")
                        .route(web::get().to(students::list))
                        .route(web::post().to(students::create)),
                )
                .service(
                    web::resource("/students/{roll_number}/")
                        .route(web::get().to(students::retrieve))
                        .route(web::put().to(students::update))
                        .route(web::patch().to(students::partial_update))
                        .route(web::delete().to(students::destroy)),
                )
                .service(
                    web::resource("/professors/")
                        .route(web::get().to(professors::list))
                        .route(web::post().to(professors::create)),
                )
                .service(
                    web::resource("/professors/{employee_code}/")
                        .route(web::get().to(professors::retrieve))
                        .route(web::put().to(professors::update))
                        .route(web::patch().to(professors::partial_update))
                        .route(web::delete().to(professors::destroy)),
                )
                .service(
                    web::resource("/academics/")
                        .route(web::get().to(academics::list))
                        .route(web::post().to(academics::create)),
                )
                .service(
                    web::resource("/academics/{id}/")
                        .route(web::get().to(academics::retrieve))
                        .route(web::put().to(academics::update))
                        .route(web::patch().to(academics::partial_update))
                        .route(web::delete().to(academics::destroy)),
                )
                .service(
                    web::resource("/publications/")
                        .route(web::get().to(publications::list))
                        .route(web::post().to(publications::create)),
                )
                .service(
                    web::resource("/publications/{id}/")
                        .route(web::get().to(publications::retrieve))
                        .route(web::put().to(publications::update))
                        .route(web::patch().to(publications::partial_update))
                        .route(web::delete().to(publications::destroy)),
                ),
        )
        .service(
            web::scope("/admin")
                .service(web::resource("/").route(web::get().to(admin::index)))
                .service(web::resource("/{model}/").route(web::get().to(admin::changelist))),
        )
}
