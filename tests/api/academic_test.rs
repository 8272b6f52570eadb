use crate::common::{self, academic_body};
use actix_web::http::StatusCode;
use serde_json::json;

#[actix_web::test]
async fn test_create_academic_when_valid_expect_code_and_label() {
    let (_dir, state) = common::initialize_state(false).await;
    let app = common::initialize_app(&state).await;
    common::seed_professor(&app, "P01", "Ravi Iyer", "CSE").await;

    let (status, actual) = common::post(
        &app,
        "/api/academics/",
        academic_body("P01", "PHD", "MIT", 2010),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = actual["id"].as_i64().unwrap();
    let expected = json!({
        "id": id,
        "professor": "P01",
        "degree_type": "PHD",
        "degree_type_display": "PhD",
        "university": "MIT",
        "year": 2010,
    });
    assert_eq!(actual, expected);

    let (status, retrieved) = common::get(&app, &format!("/api/academics/{id}/")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(retrieved, expected);
}

#[actix_web::test]
async fn test_create_academic_when_professor_unknown_expect_professor_error() {
    let (_dir, state) = common::initialize_state(false).await;
    let app = common::initialize_app(&state).await;

    let (status, actual) = common::post(
        &app,
        "/api/academics/",
        academic_body("P404", "UG", "MIT", 2010),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        actual,
        json!({"professor": ["Invalid pk \"P404\" - object does not exist."]})
    );
}

#[actix_web::test]
async fn test_create_academic_when_year_not_a_number_expect_year_error() {
    let (_dir, state) = common::initialize_state(false).await;
    let app = common::initialize_app(&state).await;
    common::seed_professor(&app, "P01", "Ravi Iyer", "CSE").await;
    let mut body = academic_body("P01", "PHD", "MIT", 2010);
    body["year"] = json!("twenty");

    let (status, actual) = common::post(&app, "/api/academics/", body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(actual, json!({"year": ["A valid integer is required."]}));

    let (_, listing) = common::get(&app, "/api/academics/").await;
    assert_eq!(listing, json!([]));
}

#[actix_web::test]
async fn test_create_academic_when_degree_and_year_invalid_expect_both_errors() {
    let (_dir, state) = common::initialize_state(false).await;
    let app = common::initialize_app(&state).await;
    common::seed_professor(&app, "P01", "Ravi Iyer", "CSE").await;

    let (status, actual) = common::post(
        &app,
        "/api/academics/",
        academic_body("P01", "MBA", "MIT", -1),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        actual,
        json!({
            "degree_type": ["\"MBA\" is not a valid choice."],
            "year": ["Ensure this value is greater than or equal to 0."],
        })
    );
}

#[actix_web::test]
async fn test_partial_update_academic_when_moved_to_other_professor_expect_nested_under_new_owner() {
    let (_dir, state) = common::initialize_state(false).await;
    let app = common::initialize_app(&state).await;
    common::seed_professor(&app, "P01", "Ravi Iyer", "CSE").await;
    common::seed_professor(&app, "P02", "Meera Nair", "EEE").await;
    let (_, created) = common::post(
        &app,
        "/api/academics/",
        academic_body("P01", "PG", "IISc", 2004),
    )
    .await;
    let uri = format!("/api/academics/{}/", created["id"]);

    let (status, actual) = common::patch(&app, &uri, json!({"professor": "P02"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(actual["professor"], "P02");
    assert_eq!(actual["university"], "IISc");

    let (_, old_owner) = common::get(&app, "/api/professors/P01/").await;
    assert_eq!(old_owner["academics"], json!([]));
    let (_, new_owner) = common::get(&app, "/api/professors/P02/").await;
    assert_eq!(
        new_owner["academics"],
        json!([{"degree_type": "Postgraduate", "university": "IISc", "year": 2004}])
    );
}

#[actix_web::test]
async fn test_partial_update_academic_when_professor_unknown_expect_unchanged() {
    let (_dir, state) = common::initialize_state(false).await;
    let app = common::initialize_app(&state).await;
    common::seed_professor(&app, "P01", "Ravi Iyer", "CSE").await;
    let (_, created) = common::post(
        &app,
        "/api/academics/",
        academic_body("P01", "PG", "IISc", 2004),
    )
    .await;
    let uri = format!("/api/academics/{}/", created["id"]);

    let (status, _) = common::patch(&app, &uri, json!({"professor": "P404"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, actual) = common::get(&app, &uri).await;
    assert_eq!(actual, created);
}

#[actix_web::test]
async fn test_update_academic_when_all_fields_given_expect_replaced() {
    let (_dir, state) = common::initialize_state(false).await;
    let app = common::initialize_app(&state).await;
    common::seed_professor(&app, "P01", "Ravi Iyer", "CSE").await;
    let (_, created) = common::post(
        &app,
        "/api/academics/",
        academic_body("P01", "UG", "NIT Trichy", 1999),
    )
    .await;
    let uri = format!("/api/academics/{}/", created["id"]);

    let (status, actual) = common::put(&app, &uri, academic_body("P01", "PG", "IISc", 2003)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(actual["id"], created["id"]);
    assert_eq!(actual["degree_type_display"], "Postgraduate");
    assert_eq!(actual["year"], 2003);
}

#[actix_web::test]
async fn test_delete_academic_when_exists_expect_gone_from_professor() {
    let (_dir, state) = common::initialize_state(false).await;
    let app = common::initialize_app(&state).await;
    common::seed_professor(&app, "P01", "Ravi Iyer", "CSE").await;
    let (_, created) = common::post(
        &app,
        "/api/academics/",
        academic_body("P01", "PHD", "MIT", 2010),
    )
    .await;
    let uri = format!("/api/academics/{}/", created["id"]);

    let (status, _) = common::delete(&app, &uri).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = common::delete(&app, &uri).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, professor) = common::get(&app, "/api/professors/P01/").await;
    assert_eq!(professor["academics"], json!([]));
}

#[actix_web::test]
async fn test_retrieve_academic_when_id_not_a_number_expect_not_found() {
    let (_dir, state) = common::initialize_state(false).await;
    let app = common::initialize_app(&state).await;

    let (status, actual) = common::get(&app, "/api/academics/abc/").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(actual, json!({"detail": "Not found."}));
}
