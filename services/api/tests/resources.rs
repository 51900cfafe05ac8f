mod common;

use axum::http::StatusCode;
use common::{TestApp, ids};
use serde_json::{Value, json};

fn image(id: &str, side: &str, order: i32) -> Value {
    json!({"id": id, "url": format!("http://x/{id}.png"), "type": side, "order": order})
}

fn program(id: &str, start: &str) -> Value {
    json!({
        "id": id,
        "title": "Hackathon",
        "startDate": start,
        "endDate": "2030-12-31",
        "maxParticipants": 40,
        "department": "CS",
        "coordinator": "c1",
    })
}

fn coordinator(id: &str, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "email": format!("{id}@uni.edu"),
        "phone": "555",
        "department": "CS",
        "position": "Lead",
    })
}

fn report(id: &str) -> Value {
    json!({
        "id": id,
        "studentId": "s1",
        "studentName": "Asha",
        "department": "CS",
        "year": "2",
    })
}

/// One valid create body per resource, keyed by its route
fn samples() -> Vec<(&'static str, Value)> {
    vec![
        ("/api/departments", json!({"id": "d1", "name": "Physics"})),
        ("/api/coordinators", coordinator("c1", "Ravi")),
        (
            "/api/students",
            json!({
                "id": "s1", "name": "Asha", "email": "a@uni.edu", "phone": "1",
                "department": "CS", "year": "1", "enrollmentNumber": "EN-1"
            }),
        ),
        (
            "/api/officers",
            json!({"id": "o1", "username": "u", "passwordHash": "h", "name": "N", "email": "e"}),
        ),
        ("/api/programs", program("p1", "2030-01-01")),
        ("/api/homepage-images", image("i1", "left", 0)),
        ("/api/student-reports", report("r1")),
    ]
}

#[tokio::test]
async fn every_resource_rejects_duplicate_ids() {
    let app = TestApp::new();

    for (route, body) in samples() {
        let (status, first) = app.post(route, body.clone()).await;
        assert_eq!(status, StatusCode::CREATED, "{route}");

        let (status, err) = app.post(route, body).await;
        assert_eq!(status, StatusCode::CONFLICT, "{route}");
        assert!(err["error"].as_str().unwrap().contains("already exists"));

        let (_, list) = app.get(route).await;
        assert_eq!(list.as_array().unwrap().len(), 1, "{route}");
        assert_eq!(list[0]["createdAt"], first["createdAt"], "{route}");
    }
}

#[tokio::test]
async fn every_resource_reports_unknown_ids_as_not_found() {
    let app = TestApp::new();

    for (route, _) in samples() {
        let uri = format!("{route}/missing");

        let (status, body) = app.put(&uri, json!({})).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{route}");
        assert!(body["error"].as_str().unwrap().ends_with("not found"));

        let (status, _) = app.delete(&uri).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{route}");

        let (_, list) = app.get(route).await;
        assert!(list.as_array().unwrap().is_empty(), "{route}");
    }
}

#[tokio::test]
async fn invalid_image_type_is_rejected_before_storing() {
    let app = TestApp::new();

    let (status, body) = app
        .post(
            "/api/homepage-images",
            json!({"id": "img1", "url": "http://x/1.png", "type": "top"}),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], r#"Type must be either "left" or "right""#);

    let (status, list) = app.get("/api/homepage-images").await;
    assert_eq!(status, StatusCode::OK);
    assert!(!ids(&list).contains(&"img1".to_string()));
}

#[tokio::test]
async fn invalid_image_type_on_update_is_rejected() {
    let app = TestApp::new();
    app.post("/api/homepage-images", image("img1", "left", 0)).await;

    let (status, body) = app
        .put("/api/homepage-images/img1", json!({"type": "center"}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(
        body["error"]
            .as_str()
            .unwrap()
            .contains(r#"Type must be either "left" or "right""#)
    );

    let (_, list) = app.get("/api/homepage-images").await;
    assert_eq!(list[0]["type"], "left");
}

#[tokio::test]
async fn images_list_active_in_order_with_optional_side() {
    let app = TestApp::new();
    app.post("/api/homepage-images", image("b", "right", 2)).await;
    app.post("/api/homepage-images", image("a", "left", 1)).await;
    app.post("/api/homepage-images", image("c", "left", 3)).await;
    let mut hidden = image("h", "left", 0);
    hidden["isActive"] = json!(false);
    app.post("/api/homepage-images", hidden).await;

    let (_, all) = app.get("/api/homepage-images").await;
    assert_eq!(ids(&all), ["a", "b", "c"]);

    let (_, left) = app.get("/api/homepage-images?type=left").await;
    assert_eq!(ids(&left), ["a", "c"]);

    let (status, unknown) = app.get("/api/homepage-images?type=top").await;
    assert_eq!(status, StatusCode::OK);
    assert!(unknown.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn programs_normalize_dates_and_list_latest_first() {
    let app = TestApp::new();

    let (status, body) = app.post("/api/programs", program("early", "2030-01-01")).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["startDate"], "2030-01-01T00:00:00Z");
    assert_eq!(body["type"], "academic");
    assert_eq!(body["registrationOpen"], true);

    app.post("/api/programs", program("late", "2030-06-01T09:30:00Z"))
        .await;

    let (_, list) = app.get("/api/programs").await;
    assert_eq!(ids(&list), ["late", "early"]);

    let (status, updated) = app
        .put("/api/programs/early", json!({"endDate": "2031-01-15"}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["endDate"], "2031-01-15T00:00:00Z");
    assert_eq!(updated["startDate"], "2030-01-01T00:00:00Z");
}

#[tokio::test]
async fn malformed_image_query_gets_a_json_error() {
    let app = TestApp::new();

    let (status, body) = app.get("/api/homepage-images?type=left&type=right").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn program_description_is_cleared_by_null_and_kept_when_absent() {
    let app = TestApp::new();
    let mut payload = program("p1", "2030-01-01");
    payload["description"] = json!("old");
    app.post("/api/programs", payload).await;

    let (status, updated) = app
        .put("/api/programs/p1", json!({"title": "Renamed"}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["description"], "old");

    let (status, updated) = app
        .put("/api/programs/p1", json!({"description": null}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["description"], Value::Null);
    assert_eq!(updated["title"], "Renamed");
}

#[tokio::test]
async fn incomplete_creates_use_each_resource_message() {
    let app = TestApp::new();

    let cases = [
        ("/api/departments", json!({"id": "CS"}), "ID and name are required"),
        ("/api/coordinators", json!({"id": "c1"}), "All fields except isActive are required"),
        ("/api/students", json!({"id": "s1"}), "All fields are required"),
        (
            "/api/officers",
            json!({"id": "o1"}),
            "All fields except role and isActive are required",
        ),
        ("/api/homepage-images", json!({"id": "i1"}), "ID, URL, and type are required"),
        ("/api/programs", json!({"id": "p1"}), "Required fields missing"),
        ("/api/student-reports", json!({"id": "r1"}), "Required fields missing"),
    ];

    for (uri, body, message) in cases {
        let (status, body) = app.post(uri, body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body, json!({"error": message}), "{uri}");
    }
}

#[tokio::test]
async fn program_with_unparseable_date_is_a_bad_request() {
    let app = TestApp::new();

    let (status, _) = app.post("/api/programs", program("p1", "someday")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, list) = app.get("/api/programs").await;
    assert!(list.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn coordinators_list_only_active_by_name() {
    let app = TestApp::new();
    app.post("/api/coordinators", coordinator("c2", "Zara")).await;
    app.post("/api/coordinators", coordinator("c1", "Ravi")).await;
    let mut away = coordinator("c3", "Anil");
    away["isActive"] = json!(false);
    app.post("/api/coordinators", away).await;

    let (_, list) = app.get("/api/coordinators").await;
    assert_eq!(ids(&list), ["c1", "c2"]);
}

#[tokio::test]
async fn student_reports_default_lists_and_fetch_by_id() {
    let app = TestApp::new();

    let (status, created) = app.post("/api/student-reports", report("r1")).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["activities"], json!([]));
    assert_eq!(created["coordinatedPrograms"], json!([]));

    let (status, updated) = app
        .put(
            "/api/student-reports/r1",
            json!({"activities": ["debate", {"name": "chess", "rank": 2}]}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["activities"][0], "debate");
    assert_eq!(updated["activities"][1]["rank"], 2);

    let (status, fetched) = app.get("/api/student-reports/r1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["studentName"], "Asha");
    assert_eq!(fetched["activities"], updated["activities"]);

    let (status, body) = app.get("/api/student-reports/none").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Student report not found");
}

#[tokio::test]
async fn student_reports_list_most_recently_updated_first() {
    let app = TestApp::new();
    app.post("/api/student-reports", report("r1")).await;
    app.post("/api/student-reports", report("r2")).await;

    app.put("/api/student-reports/r1", json!({"year": "3"})).await;

    let (_, list) = app.get("/api/student-reports").await;
    assert_eq!(ids(&list)[0], "r1");
}
