use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use eduadmin::config::{AdminSeed, AppConfig};
use eduadmin::services::auth;
use eduadmin::state::AppState;
use eduadmin::{build_router, db};

pub async fn setup_app() -> Router {
    let pool = db::connect_in_memory()
        .await
        .expect("Failed to create test db");
    let config = AppConfig::from_lookup(|_| None).expect("Failed to build default config");
    build_router(AppState { db: pool }, &config)
}

/// App whose database already holds the given admin account.
pub async fn setup_app_with_admin(email: &str, password: &str) -> Router {
    let pool = db::connect_in_memory()
        .await
        .expect("Failed to create test db");
    let seed = AdminSeed {
        email: email.to_string(),
        password: password.to_string(),
    };
    auth::seed_admin(&pool, &seed)
        .await
        .expect("Failed to seed admin");
    let config = AppConfig::from_lookup(|_| None).expect("Failed to build default config");
    build_router(AppState { db: pool }, &config)
}

pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("Failed to build request");

    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("Failed to call router");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("Response was not JSON")
    };
    (status, json)
}

pub fn course_body(name: &str, max_students: i64) -> Value {
    serde_json::json!({
        "name": name,
        "level": "Beginner",
        "ageRange": "5-7",
        "location": "Online",
        "schedule": "Mon, Wed",
        "time": "10:00 AM - 11:00 AM",
        "teacher": "",
        "maxStudents": max_students,
        "fee": 1200,
        "description": "Letters and sounds"
    })
}

pub async fn create_course(app: &Router, name: &str, max_students: i64) -> i64 {
    let (status, body) = send(app, Method::POST, "/courses", Some(course_body(name, max_students))).await;
    assert_eq!(status, StatusCode::CREATED, "course creation failed: {}", body);
    body["id"].as_i64().expect("course id")
}

pub async fn signup_parent(app: &Router, email: &str) -> i64 {
    let (status, body) = send(
        app,
        Method::POST,
        "/signup",
        Some(serde_json::json!({
            "userType": "parent",
            "formData": {
                "firstName": "Sarah",
                "lastName": "Wong",
                "email": email,
                "password": "secret-pass",
                "childName": "Emily",
                "childAge": 7
            }
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "signup failed: {}", body);
    body["user"]["id"].as_i64().expect("user id")
}
