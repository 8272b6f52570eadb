use crate::common::{self, academic_body, student_body};
use actix_web::http::StatusCode;
use serde_json::json;

#[actix_web::test]
async fn test_admin_index_when_requested_expect_every_model_registered() {
    let (_dir, state) = common::initialize_state(false).await;
    let app = common::initialize_app(&state).await;

    let (status, actual) = common::get(&app, "/admin/").await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = actual
        .as_array()
        .unwrap()
        .iter()
        .map(|entry| entry["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["student", "professor", "academic", "publication"]);
    assert_eq!(
        actual[1]["inlines"],
        json!([
            {"model": "academic", "extra": 1},
            {"model": "publication", "extra": 1},
        ])
    );
}

#[actix_web::test]
async fn test_admin_changelist_when_records_exist_expect_display_strings() {
    let (_dir, state) = common::initialize_state(false).await;
    let app = common::initialize_app(&state).await;
    common::post(
        &app,
        "/api/students/",
        student_body("S101", "Asha Rao", "asha@example.edu"),
    )
    .await;
    common::seed_professor(&app, "P01", "Ravi Iyer", "CSE").await;
    let (_, academic) = common::post(
        &app,
        "/api/academics/",
        academic_body("P01", "PHD", "MIT", 2010),
    )
    .await;
    let publication_id = common::seed_publication(&app, "P01", "On Graphs", "2020-01-01").await;

    let (_, students) = common::get(&app, "/admin/student/").await;
    assert_eq!(students, json!([{"pk": "S101", "display": "Asha Rao"}]));
    let (_, professors) = common::get(&app, "/admin/professor/").await;
    assert_eq!(professors, json!([{"pk": "P01", "display": "Ravi Iyer"}]));
    let (_, academics) = common::get(&app, "/admin/academic/").await;
    assert_eq!(
        academics,
        json!([{"pk": academic["id"].to_string(), "display": "Ravi Iyer - PhD"}])
    );
    let (_, publications) = common::get(&app, "/admin/publication/").await;
    assert_eq!(
        publications,
        json!([{"pk": publication_id.to_string(), "display": "On Graphs"}])
    );
}

#[actix_web::test]
async fn test_admin_changelist_when_model_unknown_expect_not_found() {
    let (_dir, state) = common::initialize_state(false).await;
    let app = common::initialize_app(&state).await;

    let (status, _) = common::get(&app, "/admin/department/").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
