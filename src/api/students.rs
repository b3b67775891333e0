use axum::{Json, extract::State, http::StatusCode};
use tracing::info;

use super::{Message, today};
use crate::db::students;
use crate::error::AppError;
use crate::extract::{IdPath, JsonBody};
use crate::models::{NewStudentRequest, StudentSummary};
use crate::state::AppState;

pub(super) async fn list_students(State(state): State<AppState>) -> Result<Json<Vec<StudentSummary>>, AppError> {
    let today = today();
    let rows = students::fetch_students(&state.db).await?;
    Ok(Json(
        rows.into_iter()
            .map(|s| StudentSummary::from_student(s, today))
            .collect(),
    ))
}

pub(super) async fn create_student(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<NewStudentRequest>,
) -> Result<(StatusCode, Json<StudentSummary>), AppError> {
    let today = today();
    let student = req.validate(today)?;
    let created = students::insert_student(&state.db, &student).await?;
    info!("Created student {}", created.id);
    Ok((StatusCode::CREATED, Json(StudentSummary::from_student(created, today))))
}

pub(super) async fn delete_student(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<Json<Message>, AppError> {
    if !students::delete_student(&state.db, id).await? {
        return Err(AppError::NotFound("student"));
    }
    info!("Deleted student {}", id);
    Ok(Json(Message::new("Student deleted successfully")))
}
