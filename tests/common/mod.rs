use actix_http::{body::MessageBody, Request};
use actix_service::Service;
use actix_web::{dev::ServiceResponse, http::StatusCode, test, Error};
use serde_json::{json, Value};
use tempfile::{tempdir, TempDir};

use unidash::db::{self, DatabaseConnection};
use unidash::server::api::state::App as AppState;
use unidash::server::app::init_app;
use unidash::utils::config::{Config, DatabaseConfig};

/// Config pointing at a fresh `SQLite` file inside `dir`.
pub fn test_config(dir: &TempDir, publication_date_filter: bool) -> Config {
    let mut config = Config::default();
    config.database = DatabaseConfig {
        url: Some(format!(
            "sqlite://{}?mode=rwc",
            dir.path().join("unidash.sqlite3").display()
        )),
        max_connections: 5,
    };
    config.professors.publication_date_filter = publication_date_filter;
    config
}

/// Connect to a migrated database in a new temporary directory. Keep the
/// returned directory alive for as long as the database is used.
pub async fn initialize_db() -> (TempDir, DatabaseConnection) {
    let dir = tempdir().unwrap();
    let config = test_config(&dir, false);
    let conn = db::init::connect(&config.database).await.unwrap();
    (dir, conn)
}

/// Application state over a migrated database in a new temporary directory.
pub async fn initialize_state(publication_date_filter: bool) -> (TempDir, AppState) {
    let dir = tempdir().unwrap();
    let config = test_config(&dir, publication_date_filter);
    let db = db::init::connect(&config.database).await.unwrap();
    (dir, AppState { db, config })
}

pub async fn initialize_app(
    state: &AppState,
) -> impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = Error> {
    test::init_service(init_app(state)).await
}

/// Send `req` and return the status with the body parsed as JSON.
/// An empty body is returned as `Value::Null`.
pub async fn send<S, B>(app: &S, req: Request) -> (StatusCode, Value)
where
    S: Service<Request, Response = ServiceResponse<B>, Error = Error>,
    B: MessageBody,
{
    let resp = test::call_service(app, req).await;
    let status = resp.status();
    let body = test::read_body(resp).await;
    if body.is_empty() {
        return (status, Value::Null);
    }
    (status, serde_json::from_slice(&body).unwrap())
}

pub async fn get<S, B>(app: &S, uri: &str) -> (StatusCode, Value)
where
    S: Service<Request, Response = ServiceResponse<B>, Error = Error>,
    B: MessageBody,
{
    send(app, test::TestRequest::get().uri(uri).to_request()).await
}

pub async fn post<S, B>(app: &S, uri: &str, body: Value) -> (StatusCode, Value)
where
    S: Service<Request, Response = ServiceResponse<B>, Error = Error>,
    B: MessageBody,
{
    send(app, test::TestRequest::post().uri(uri).set_json(body).to_request()).await
}

pub async fn put<S, B>(app: &S, uri: &str, body: Value) -> (StatusCode, Value)
where
    S: Service<Request, Response = ServiceResponse<B>, Error = Error>,
    B: MessageBody,
{
    send(app, test::TestRequest::put().uri(uri).set_json(body).to_request()).await
}

pub async fn patch<S, B>(app: &S, uri: &str, body: Value) -> (StatusCode, Value)
where
    S: Service<Request, Response = ServiceResponse<B>, Error = Error>,
    B: MessageBody,
{
    send(app, test::TestRequest::patch().uri(uri).set_json(body).to_request()).await
}

pub async fn delete<S, B>(app: &S, uri: &str) -> (StatusCode, Value)
where
    S: Service<Request, Response = ServiceResponse<B>, Error = Error>,
    B: MessageBody,
{
    send(app, test::TestRequest::delete().uri(uri).to_request()).await
}

pub fn student_body(roll_number: &str, name: &str, email: &str) -> Value {
    json!({
        "roll_number": roll_number,
        "name": name,
        "email": email,
        "branch_code": "CSE",
    })
}

pub fn professor_body(employee_code: &str, name: &str, department: &str) -> Value {
    json!({
        "employee_code": employee_code,
        "name": name,
        "email": format!("{}@example.edu", employee_code.to_lowercase()),
        "department": department,
    })
}

pub fn academic_body(professor: &str, degree_type: &str, university: &str, year: i64) -> Value {
    json!({
        "professor": professor,
        "degree_type": degree_type,
        "university": university,
        "year": year,
    })
}

pub fn publication_body(professor: &str, title: &str, publication_date: &str) -> Value {
    json!({
        "professor": professor,
        "title": title,
        "publication_type": "Journal",
        "publication_date": publication_date,
        "venue_name": "IEEE",
    })
}

/// Create a professor through the API, panicking on failure.
pub async fn seed_professor<S, B>(app: &S, employee_code: &str, name: &str, department: &str)
where
    S: Service<Request, Response = ServiceResponse<B>, Error = Error>,
    B: MessageBody,
{
    let (status, body) = post(
        app,
        "/api/professors/",
        professor_body(employee_code, name, department),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
}

/// Create a publication through the API and return its id.
pub async fn seed_publication<S, B>(
    app: &S,
    professor: &str,
    title: &str,
    publication_date: &str,
) -> i64
where
    S: Service<Request, Response = ServiceResponse<B>, Error = Error>,
    B: MessageBody,
{
    let (status, body) = post(
        app,
        "/api/publications/",
        publication_body(professor, title, publication_date),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body["id"].as_i64().unwrap()
}

/// Employee codes of a professor listing, in order.
pub fn employee_codes(listing: &Value) -> Vec<&str> {
    listing
        .as_array()
        .unwrap()
        .iter()
        .map(|professor| professor["employee_code"].as_str().unwrap())
        .collect()
}
