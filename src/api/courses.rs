use axum::{Json, extract::State, http::StatusCode};
use tracing::info;

use super::{Message, today};
use crate::db::{courses, students, teachers};
use crate::error::AppError;
use crate::extract::{IdPath, JsonBody};
use crate::models::{CourseName, CourseSummary, NewCourseRequest, RosterEntry};
use crate::state::AppState;

pub(super) async fn list_courses(State(state): State<AppState>) -> Result<Json<Vec<CourseSummary>>, AppError> {
    let rows = courses::fetch_courses_with_counts(&state.db).await?;
    Ok(Json(rows.into_iter().map(CourseSummary::from).collect()))
}

pub(super) async fn create_course(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<NewCourseRequest>,
) -> Result<(StatusCode, Json<CourseSummary>), AppError> {
    let course = req.validate()?;

    let teacher_name = match course.teacher_id {
        Some(id) => match teachers::find_teacher_by_id(&state.db, id).await? {
            Some(teacher) => teacher.full_name(),
            None => format!("Teacher ID: {}", id),
        },
        None => "Unassigned".to_string(),
    };

    let created = courses::insert_course(&state.db, &course, &teacher_name).await?;
    info!("Created course {} taught by {}", created.id, teacher_name);
    Ok((StatusCode::CREATED, Json(CourseSummary::new(created, 0))))
}

pub(super) async fn delete_course(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<Json<Message>, AppError> {
    if !courses::delete_course(&state.db, id).await? {
        return Err(AppError::NotFound("course"));
    }
    info!("Deleted course {}", id);
    Ok(Json(Message::new("Course deleted successfully")))
}

pub(super) async fn course_students(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<Json<Vec<RosterEntry>>, AppError> {
    let today = today();
    let roster = students::fetch_course_roster(&state.db, id).await?;
    Ok(Json(
        roster.iter().map(|s| RosterEntry::from_student(s, today)).collect(),
    ))
}

pub(super) async fn course_names(State(state): State<AppState>) -> Result<Json<Vec<CourseName>>, AppError> {
    Ok(Json(courses::fetch_course_names(&state.db).await?))
}
