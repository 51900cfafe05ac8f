mod common;

use axum::http::StatusCode;
use common::{TestApp, ids};
use serde_json::{Value, json};

fn student(id: &str, email: &str, enrollment: &str) -> Value {
    json!({
        "id": id,
        "name": "Asha Rao",
        "email": email,
        "phone": "555-0100",
        "department": "CS",
        "year": "2",
        "enrollmentNumber": enrollment,
    })
}

fn with_password(mut body: Value, password: &str) -> Value {
    body["password"] = json!(password);
    body
}

async fn login(app: &TestApp, email: &str, password: &str) -> (StatusCode, Value) {
    app.post(
        "/api/students/login",
        json!({"email": email, "password": password}),
    )
    .await
}

#[tokio::test]
async fn login_rejects_wrong_password_and_accepts_the_right_one() {
    let app = TestApp::new();
    let (status, created) = app
        .post(
            "/api/students",
            with_password(student("s1", "asha@uni.edu", "EN-1"), "s3cret"),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(created.get("passwordHash").is_none());

    let (status, body) = login(&app, "asha@uni.edu", "wrong").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid credentials");

    let (status, body) = login(&app, "asha@uni.edu", "s3cret").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["student"]["id"], "s1");
    assert!(body["student"].get("passwordHash").is_none());
}

#[tokio::test]
async fn login_without_a_password_set_has_its_own_message() {
    let app = TestApp::new();
    app.post("/api/students", student("s1", "asha@uni.edu", "EN-1"))
        .await;

    let (status, body) = login(&app, "asha@uni.edu", "anything").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(
        body["error"],
        "Password not set. Please set your password first."
    );

    let (status, body) = login(&app, "nobody@uni.edu", "anything").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid credentials");
}

#[tokio::test]
async fn login_requires_email_and_password() {
    let app = TestApp::new();

    let (status, body) = app
        .post("/api/students/login", json!({"email": "asha@uni.edu"}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Email and password are required");
}

#[tokio::test]
async fn inactive_students_cannot_log_in() {
    let app = TestApp::new();
    let mut body = with_password(student("s1", "asha@uni.edu", "EN-1"), "pw");
    body["isActive"] = json!(false);
    app.post("/api/students", body).await;

    let (status, _) = login(&app, "asha@uni.edu", "pw").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn set_password_enables_login() {
    let app = TestApp::new();
    app.post("/api/students", student("s1", "asha@uni.edu", "EN-1"))
        .await;

    let (status, body) = app
        .post(
            "/api/students/set-password",
            json!({"email": "asha@uni.edu", "enrollmentNumber": "EN-1", "password": "first"}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Password set successfully");

    let (status, _) = login(&app, "asha@uni.edu", "first").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn set_password_requires_matching_enrollment_number() {
    let app = TestApp::new();
    app.post("/api/students", student("s1", "asha@uni.edu", "EN-1"))
        .await;

    let (status, body) = app
        .post(
            "/api/students/set-password",
            json!({"email": "asha@uni.edu", "enrollmentNumber": "EN-9", "password": "first"}),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body["error"],
        "Student not found or credentials do not match"
    );

    let (status, _) = app
        .post(
            "/api/students/set-password",
            json!({"email": "asha@uni.edu", "password": "first"}),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn change_password_with_wrong_current_password_keeps_the_old_one() {
    let app = TestApp::new();
    app.post(
        "/api/students",
        with_password(student("s1", "asha@uni.edu", "EN-1"), "old"),
    )
    .await;

    let (status, body) = app
        .post(
            "/api/students/change-password",
            json!({"email": "asha@uni.edu", "currentPassword": "guess", "newPassword": "new"}),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Current password is incorrect");

    assert_eq!(login(&app, "asha@uni.edu", "old").await.0, StatusCode::OK);
    assert_eq!(
        login(&app, "asha@uni.edu", "new").await.0,
        StatusCode::UNAUTHORIZED
    );
}

#[tokio::test]
async fn change_password_replaces_the_hash() {
    let app = TestApp::new();
    app.post(
        "/api/students",
        with_password(student("s1", "asha@uni.edu", "EN-1"), "old"),
    )
    .await;

    let (status, body) = app
        .post(
            "/api/students/change-password",
            json!({"email": "asha@uni.edu", "currentPassword": "old", "newPassword": "new"}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Password changed successfully");

    assert_eq!(login(&app, "asha@uni.edu", "new").await.0, StatusCode::OK);
    assert_eq!(
        login(&app, "asha@uni.edu", "old").await.0,
        StatusCode::UNAUTHORIZED
    );
}

#[tokio::test]
async fn change_password_without_a_stored_hash_is_unauthorized() {
    let app = TestApp::new();
    app.post("/api/students", student("s1", "asha@uni.edu", "EN-1"))
        .await;

    let (status, body) = app
        .post(
            "/api/students/change-password",
            json!({"email": "asha@uni.edu", "currentPassword": "x", "newPassword": "y"}),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid credentials");
}

#[tokio::test]
async fn responses_never_contain_the_hash() {
    let app = TestApp::new();
    app.post(
        "/api/students",
        with_password(student("s1", "asha@uni.edu", "EN-1"), "pw"),
    )
    .await;

    let (_, list) = app.get("/api/students").await;
    let (_, updated) = app
        .put("/api/students/s1", json!({"name": "Asha R."}))
        .await;

    for body in [&list[0], &updated] {
        assert!(body.get("passwordHash").is_none());
        assert!(body.get("password").is_none());
    }
}

#[tokio::test]
async fn update_ignores_a_supplied_hash_but_rehashes_a_password() {
    let app = TestApp::new();
    app.post(
        "/api/students",
        with_password(student("s1", "asha@uni.edu", "EN-1"), "pw"),
    )
    .await;

    let (status, body) = app
        .put(
            "/api/students/s1",
            json!({"id": "s2", "passwordHash": "forged"}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], "s1");
    assert_eq!(login(&app, "asha@uni.edu", "pw").await.0, StatusCode::OK);

    app.put("/api/students/s1", json!({"password": "reset"}))
        .await;
    assert_eq!(login(&app, "asha@uni.edu", "reset").await.0, StatusCode::OK);
}

#[tokio::test]
async fn duplicate_email_or_enrollment_number_is_a_conflict() {
    let app = TestApp::new();
    app.post("/api/students", student("s1", "asha@uni.edu", "EN-1"))
        .await;

    let (status, body) = app
        .post("/api/students", student("s2", "asha@uni.edu", "EN-2"))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(
        body["error"],
        "Student with this ID, email, or enrollment number already exists"
    );

    let (status, _) = app
        .post("/api/students", student("s3", "other@uni.edu", "EN-1"))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (_, list) = app.get("/api/students").await;
    assert_eq!(ids(&list), ["s1"]);
}

#[tokio::test]
async fn list_includes_inactive_students() {
    let app = TestApp::new();
    let mut inactive = student("s1", "a@uni.edu", "EN-1");
    inactive["isActive"] = json!(false);
    app.post("/api/students", inactive).await;
    app.post("/api/students", student("s2", "b@uni.edu", "EN-2"))
        .await;

    let (_, list) = app.get("/api/students").await;
    let mut listed = ids(&list);
    listed.sort();
    assert_eq!(listed, ["s1", "s2"]);
}

#[tokio::test]
async fn missing_fields_use_the_student_message() {
    let app = TestApp::new();

    let (status, body) = app
        .post("/api/students", json!({"id": "s1", "name": "Asha"}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "All fields are required");
}
