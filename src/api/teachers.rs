use axum::{Json, extract::State, http::StatusCode};
use tracing::info;

use super::Message;
use crate::db::teachers;
use crate::error::AppError;
use crate::extract::{IdPath, JsonBody};
use crate::models::{NewTeacherRequest, TeacherSummary};
use crate::state::AppState;

pub(super) async fn list_teachers(State(state): State<AppState>) -> Result<Json<Vec<TeacherSummary>>, AppError> {
    let rows = teachers::fetch_teachers(&state.db).await?;
    Ok(Json(rows.into_iter().map(TeacherSummary::from).collect()))
}

pub(super) async fn create_teacher(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<NewTeacherRequest>,
) -> Result<(StatusCode, Json<TeacherSummary>), AppError> {
    let teacher = req.validate()?;
    let created = teachers::insert_teacher(&state.db, &teacher).await?;
    info!("Created teacher {}", created.id);
    Ok((StatusCode::CREATED, Json(created.into())))
}

pub(super) async fn delete_teacher(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<Json<Message>, AppError> {
    if !teachers::delete_teacher(&state.db, id).await? {
        return Err(AppError::NotFound("teacher"));
    }
    info!("Deleted teacher {}", id);
    Ok(Json(Message::new("Teacher deleted successfully")))
}
