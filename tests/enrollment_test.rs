mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;

use common::{create_course, send, setup_app, signup_parent};

fn enroll_body(course_id: i64, parent_id: i64, student_id: Option<i64>) -> serde_json::Value {
    match student_id {
        Some(id) => json!({"courseId": course_id, "parentId": parent_id, "studentId": id}),
        None => json!({"courseId": course_id.to_string(), "parentId": parent_id}),
    }
}

#[tokio::test]
async fn test_enroll_auto_creates_student_each_time() {
    let app = setup_app().await;
    let parent = signup_parent(&app, "sarah@example.com").await;
    let phonics = create_course(&app, "Phonics", 5).await;
    let reading = create_course(&app, "Reading", 5).await;

    let (status, first) = send(&app, Method::POST, "/enroll", Some(enroll_body(phonics, parent, None))).await;
    assert_eq!(status, StatusCode::CREATED, "{}", first);
    assert_eq!(first["studentCreated"], true);

    let (status, second) = send(&app, Method::POST, "/enroll", Some(enroll_body(reading, parent, None))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_ne!(first["studentId"], second["studentId"]);

    let (_, students) = send(&app, Method::GET, "/students", None).await;
    assert_eq!(students.as_array().map(Vec::len), Some(2));
    assert_eq!(students[0]["name"], "Emily Wong");
    assert_eq!(students[0]["parent"], "Sarah Wong");

    let (_, roster) = send(&app, Method::GET, &format!("/course-students/{}", phonics), None).await;
    assert_eq!(roster.as_array().map(Vec::len), Some(1));
    assert_eq!(roster[0]["age"], 7);
}

#[tokio::test]
async fn test_capacity_and_duplicate_rules() {
    let app = setup_app().await;
    let course = create_course(&app, "Solo", 1).await;

    let (status, _) = send(&app, Method::POST, "/enroll", Some(enroll_body(course, 1, Some(10)))).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(&app, Method::POST, "/enroll", Some(enroll_body(course, 1, Some(10)))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "course is full");

    let group = create_course(&app, "Group", 5).await;
    send(&app, Method::POST, "/enroll", Some(enroll_body(group, 1, Some(10)))).await;
    let (status, body) = send(&app, Method::POST, "/enroll", Some(enroll_body(group, 1, Some(11)))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "already enrolled");
}

#[tokio::test]
async fn test_enroll_validation_and_missing_rows() {
    let app = setup_app().await;

    let (status, _) = send(&app, Method::POST, "/enroll", Some(json!({"parentId": 1}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, Method::POST, "/enroll", Some(json!({"courseId": "abc", "parentId": 1}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(&app, Method::POST, "/enroll", Some(enroll_body(42, 1, Some(1)))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "course not found");

    let course = create_course(&app, "Phonics", 5).await;
    let (status, body) = send(&app, Method::POST, "/enroll", Some(enroll_body(course, 99, None))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "parent not found");
}

#[tokio::test]
async fn test_cancel_and_reenroll() {
    let app = setup_app().await;
    let course = create_course(&app, "Solo", 1).await;

    let (_, first) = send(&app, Method::POST, "/enroll", Some(enroll_body(course, 1, Some(10)))).await;
    let id = first["enrollmentId"].as_i64().expect("enrollment id");

    let (status, _) = send(&app, Method::PATCH, &format!("/enrollments/{}/cancel", id), None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&app, Method::PATCH, &format!("/enrollments/{}/cancel", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::POST, "/enroll", Some(enroll_body(course, 2, Some(20)))).await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_user_enrollments_calendar() {
    let app = setup_app().await;
    let course = create_course(&app, "Phonics", 5).await;
    send(&app, Method::POST, "/enroll", Some(enroll_body(course, 7, Some(1)))).await;

    let (status, events) = send(&app, Method::GET, "/user-enrollments?parentId=7", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(events[0]["title"], "Phonics");
    assert!(events[0]["start"].as_str().unwrap_or_default().ends_with("T10:00:00"));
    assert_eq!(events[0]["extendedProps"]["zoomLink"], "https://zoom.us/j/123456789");

    let (status, _) = send(&app, Method::GET, "/user-enrollments", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, Method::DELETE, &format!("/courses/{}", course), None).await;
    assert_eq!(status, StatusCode::OK);
    let (_, events) = send(&app, Method::GET, "/user-enrollments?parentId=7", None).await;
    assert_eq!(events, json!([]));
}
