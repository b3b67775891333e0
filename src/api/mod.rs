//! HTTP surface: router assembly and per-resource handlers.

mod attendance;
mod auth;
mod courses;
mod enrollments;
mod grades;
mod reports;
mod students;
mod teachers;

use axum::routing::{get, patch, post};
use axum::{Router, extract::State, http::StatusCode};
use chrono::{Local, NaiveDate};
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::AppConfig;
use crate::error::AppError;
use crate::state::AppState;

pub fn router(state: AppState, config: &AppConfig) -> Router {
    let cors = if config.cors_permissive {
        CorsLayer::permissive()
    } else {
        CorsLayer::new()
    };

    Router::new()
        .route("/health", get(health))
        .route("/signup", post(auth::signup))
        .route("/login", post(auth::login))
        .route("/students", get(students::list_students).post(students::create_student))
        .route("/students/{id}", axum::routing::delete(students::delete_student))
        .route("/teachers", get(teachers::list_teachers).post(teachers::create_teacher))
        .route("/teachers/{id}", axum::routing::delete(teachers::delete_teacher))
        .route("/courses", get(courses::list_courses).post(courses::create_course))
        .route("/courses/{id}", axum::routing::delete(courses::delete_course))
        .route("/course-students/{id}", get(courses::course_students))
        .route("/course-names", get(courses::course_names))
        .route("/grades", get(grades::list_grades).post(grades::create_grade))
        .route("/grades/batch", post(grades::create_grades_batch))
        .route("/attendance", get(attendance::list_attendance).post(attendance::submit_attendance))
        .route("/enroll", post(enrollments::enroll))
        .route("/enrollments/{id}/cancel", patch(enrollments::cancel_enrollment))
        .route("/user-enrollments", get(enrollments::user_enrollments))
        .route("/locations", get(reports::locations))
        .route("/student-grade-levels", get(reports::student_grade_levels))
        .route("/admin/dashboard-stats", get(reports::dashboard_stats))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn health(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    sqlx::query("select 1").execute(&state.db).await?;
    Ok(StatusCode::OK)
}

#[derive(Debug, Serialize)]
pub(crate) struct Message {
    pub message: String,
}

impl Message {
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

/// Local calendar date used for ages and enrollment dates.
pub(crate) fn today() -> NaiveDate {
    Local::now().date_naive()
}
