use crate::common::{self, academic_body, professor_body, publication_body};
use actix_web::http::StatusCode;
use serde_json::json;

#[actix_web::test]
async fn test_list_professors_when_academic_and_publication_added_expect_nested_labels() {
    let (_dir, state) = common::initialize_state(false).await;
    let app = common::initialize_app(&state).await;
    common::seed_professor(&app, "P01", "Ravi Iyer", "CSE").await;
    let (status, _) = common::post(
        &app,
        "/api/academics/",
        academic_body("P01", "PHD", "MIT", 2010),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    common::seed_publication(&app, "P01", "X", "2020-01-01").await;

    let (status, actual) = common::get(&app, "/api/professors/").await;
    assert_eq!(status, StatusCode::OK);
    let expected = json!([{
        "employee_code": "P01",
        "name": "Ravi Iyer",
        "email": "p01@example.edu",
        "department": "CSE",
        "academics": [{"degree_type": "PhD", "university": "MIT", "year": 2010}],
        "publications": [{
            "title": "X",
            "publication_type": "Journal",
            "publication_date": "2020-01-01",
            "venue_name": "IEEE",
        }],
    }]);
    assert_eq!(actual, expected);
}

#[actix_web::test]
async fn test_retrieve_professor_when_many_records_expect_exact_counts_in_order() {
    let (_dir, state) = common::initialize_state(false).await;
    let app = common::initialize_app(&state).await;
    common::seed_professor(&app, "P01", "Ravi Iyer", "CSE").await;
    common::seed_professor(&app, "P02", "Meera Nair", "EEE").await;
    for (degree_type, year) in [("UG", 2000), ("PG", 2004), ("PHD", 2010)] {
        common::post(
            &app,
            "/api/academics/",
            academic_body("P01", degree_type, "IIT Madras", year),
        )
        .await;
    }
    common::post(
        &app,
        "/api/academics/",
        academic_body("P02", "PG", "IISc", 2001),
    )
    .await;
    for title in ["First", "Second"] {
        common::seed_publication(&app, "P01", title, "2019-05-05").await;
    }

    let (status, actual) = common::get(&app, "/api/professors/P01/").await;
    assert_eq!(status, StatusCode::OK);
    let labels: Vec<&str> = actual["academics"]
        .as_array()
        .unwrap()
        .iter()
        .map(|academic| academic["degree_type"].as_str().unwrap())
        .collect();
    assert_eq!(labels, ["Undergraduate", "Postgraduate", "PhD"]);
    let titles: Vec<&str> = actual["publications"]
        .as_array()
        .unwrap()
        .iter()
        .map(|publication| publication["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, ["First", "Second"]);

    let (_, other) = common::get(&app, "/api/professors/P02/").await;
    assert_eq!(other["academics"].as_array().unwrap().len(), 1);
    assert_eq!(other["publications"], json!([]));
}

#[actix_web::test]
async fn test_retrieve_professor_when_missing_expect_not_found() {
    let (_dir, state) = common::initialize_state(false).await;
    let app = common::initialize_app(&state).await;

    let (status, actual) = common::get(&app, "/api/professors/P404/").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(actual, json!({"detail": "Not found."}));
}

#[actix_web::test]
async fn test_create_professor_when_valid_expect_empty_nested_lists() {
    let (_dir, state) = common::initialize_state(false).await;
    let app = common::initialize_app(&state).await;

    let (status, actual) = common::post(
        &app,
        "/api/professors/",
        professor_body("P01", "Ravi Iyer", "CSE"),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(actual["academics"], json!([]));
    assert_eq!(actual["publications"], json!([]));
}

#[actix_web::test]
async fn test_create_professor_when_nested_records_sent_expect_them_ignored() {
    let (_dir, state) = common::initialize_state(false).await;
    let app = common::initialize_app(&state).await;
    let mut body = professor_body("P01", "Ravi Iyer", "CSE");
    body["academics"] = json!([{"degree_type": "PHD", "university": "MIT", "year": 2010}]);

    let (status, _) = common::post(&app, "/api/professors/", body).await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, actual) = common::get(&app, "/api/professors/P01/").await;
    assert_eq!(actual["academics"], json!([]));
}

#[actix_web::test]
async fn test_create_professor_when_email_taken_expect_validation_error() {
    let (_dir, state) = common::initialize_state(false).await;
    let app = common::initialize_app(&state).await;
    common::seed_professor(&app, "P01", "Ravi Iyer", "CSE").await;
    let mut body = professor_body("P02", "Meera Nair", "EEE");
    body["email"] = json!("p01@example.edu");

    let (status, actual) = common::post(&app, "/api/professors/", body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        actual,
        json!({"email": ["professor with this email already exists."]})
    );
}

#[actix_web::test]
async fn test_partial_update_professor_when_department_changed_expect_relations_kept() {
    let (_dir, state) = common::initialize_state(false).await;
    let app = common::initialize_app(&state).await;
    common::seed_professor(&app, "P01", "Ravi Iyer", "CSE").await;
    common::seed_publication(&app, "P01", "X", "2020-01-01").await;

    let (status, actual) = common::patch(
        &app,
        "/api/professors/P01/",
        json!({"department": "Mathematics"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(actual["department"], "Mathematics");
    assert_eq!(actual["name"], "Ravi Iyer");
    assert_eq!(actual["publications"].as_array().unwrap().len(), 1);
}

#[actix_web::test]
async fn test_update_professor_when_employee_code_changed_expect_immutable_error() {
    let (_dir, state) = common::initialize_state(false).await;
    let app = common::initialize_app(&state).await;
    common::seed_professor(&app, "P01", "Ravi Iyer", "CSE").await;

    let (status, actual) = common::put(
        &app,
        "/api/professors/P01/",
        professor_body("P09", "Ravi Iyer", "CSE"),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        actual,
        json!({"employee_code": ["This field cannot be changed."]})
    );
}

#[actix_web::test]
async fn test_delete_professor_when_records_attached_expect_cascade() {
    let (_dir, state) = common::initialize_state(false).await;
    let app = common::initialize_app(&state).await;
    common::seed_professor(&app, "P01", "Ravi Iyer", "CSE").await;
    common::seed_professor(&app, "P02", "Meera Nair", "EEE").await;
    common::post(
        &app,
        "/api/academics/",
        academic_body("P01", "PHD", "MIT", 2010),
    )
    .await;
    common::post(
        &app,
        "/api/academics/",
        academic_body("P02", "PG", "IISc", 2001),
    )
    .await;
    let publication_id = common::seed_publication(&app, "P01", "X", "2020-01-01").await;

    let (status, _) = common::delete(&app, "/api/professors/P01/").await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, academics) = common::get(&app, "/api/academics/").await;
    let owners: Vec<&str> = academics
        .as_array()
        .unwrap()
        .iter()
        .map(|academic| academic["professor"].as_str().unwrap())
        .collect();
    assert_eq!(owners, ["P02"]);
    let (_, publications) = common::get(&app, "/api/publications/").await;
    assert_eq!(publications, json!([]));
    let (status, _) =
        common::get(&app, &format!("/api/publications/{publication_id}/")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_list_professors_when_date_filter_disabled_expect_same_set_as_unfiltered() {
    let (_dir, state) = common::initialize_state(false).await;
    let app = common::initialize_app(&state).await;
    common::seed_professor(&app, "P01", "Ravi Iyer", "CSE").await;
    common::seed_professor(&app, "P02", "Meera Nair", "EEE").await;
    common::seed_professor(&app, "P03", "Arjun Menon", "CSE").await;
    common::seed_publication(&app, "P01", "Old", "2001-01-01").await;
    common::seed_publication(&app, "P02", "New", "2022-03-04").await;

    let (_, unfiltered) = common::get(&app, "/api/professors/").await;
    let (status, filtered) = common::get(
        &app,
        "/api/professors/?start_date=2020-01-01&end_date=2023-12-31",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(filtered, unfiltered);
    assert_eq!(common::employee_codes(&filtered), ["P01", "P02", "P03"]);

    let (status, malformed) =
        common::get(&app, "/api/professors/?start_date=yesterday&end_date=x").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(malformed, unfiltered);
}

#[actix_web::test]
async fn test_list_professors_when_date_filter_enabled_expect_inclusive_distinct_matches() {
    let (_dir, state) = common::initialize_state(true).await;
    let app = common::initialize_app(&state).await;
    common::seed_professor(&app, "P01", "Ravi Iyer", "CSE").await;
    common::seed_professor(&app, "P02", "Meera Nair", "EEE").await;
    common::seed_professor(&app, "P03", "Arjun Menon", "CSE").await;
    common::seed_publication(&app, "P01", "On the boundary", "2020-01-01").await;
    common::seed_publication(&app, "P01", "Inside", "2021-06-15").await;
    common::seed_publication(&app, "P02", "End boundary", "2021-12-31").await;
    common::seed_publication(&app, "P03", "Too late", "2022-01-01").await;

    let (status, actual) = common::get(
        &app,
        "/api/professors/?start_date=2020-01-01&end_date=2021-12-31",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(common::employee_codes(&actual), ["P01", "P02"]);
    assert_eq!(actual[0]["publications"].as_array().unwrap().len(), 2);
}

#[actix_web::test]
async fn test_list_professors_when_date_filter_enabled_and_one_bound_expect_unfiltered() {
    let (_dir, state) = common::initialize_state(true).await;
    let app = common::initialize_app(&state).await;
    common::seed_professor(&app, "P01", "Ravi Iyer", "CSE").await;
    common::seed_professor(&app, "P02", "Meera Nair", "EEE").await;
    common::seed_publication(&app, "P01", "Inside", "2021-06-15").await;

    let (status, actual) = common::get(&app, "/api/professors/?start_date=2021-01-01").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(common::employee_codes(&actual), ["P01", "P02"]);
}

#[actix_web::test]
async fn test_list_professors_when_date_filter_enabled_and_bad_date_expect_bad_request() {
    let (_dir, state) = common::initialize_state(true).await;
    let app = common::initialize_app(&state).await;

    let (status, actual) = common::get(
        &app,
        "/api/professors/?start_date=2021-02-30&end_date=2021-12-31",
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(actual["start_date"].is_array());
}

#[actix_web::test]
async fn test_list_professors_when_department_given_expect_only_that_department() {
    let (_dir, state) = common::initialize_state(false).await;
    let app = common::initialize_app(&state).await;
    common::seed_professor(&app, "P01", "Ravi Iyer", "CSE").await;
    common::seed_professor(&app, "P02", "Meera Nair", "EEE").await;
    common::seed_professor(&app, "P03", "Arjun Menon", "CSE").await;

    let (_, actual) = common::get(&app, "/api/professors/?department=CSE").await;
    assert_eq!(common::employee_codes(&actual), ["P01", "P03"]);

    let (_, everyone) = common::get(&app, "/api/professors/?department=all").await;
    assert_eq!(common::employee_codes(&everyone), ["P01", "P02", "P03"]);
}

#[actix_web::test]
async fn test_create_professor_when_publication_body_posted_to_professors_expect_required_errors() {
    let (_dir, state) = common::initialize_state(false).await;
    let app = common::initialize_app(&state).await;

    let (status, actual) = common::post(
        &app,
        "/api/professors/",
        publication_body("P01", "X", "2020-01-01"),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    for field in ["employee_code", "name", "email", "department"] {
        assert_eq!(actual[field], json!(["This field is required."]), "{field}");
    }
}
