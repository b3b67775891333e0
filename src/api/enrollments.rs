use axum::{Json, extract::State, http::StatusCode};

use super::{Message, today};
use crate::db::enrollments;
use crate::error::AppError;
use crate::extract::{IdPath, JsonBody, QueryParams};
use crate::models::{CalendarEvent, EnrollRequest, EnrollResponse, UserEnrollmentsQuery};
use crate::services::EnrollmentService;
use crate::state::AppState;

pub(super) async fn enroll(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<EnrollRequest>,
) -> Result<(StatusCode, Json<EnrollResponse>), AppError> {
    let cmd = req.validate()?;
    let service = EnrollmentService::new(state.db.clone());
    let res = service.enroll(cmd, today()).await?;
    Ok((StatusCode::CREATED, Json(res)))
}

pub(super) async fn cancel_enrollment(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<Json<Message>, AppError> {
    let service = EnrollmentService::new(state.db.clone());
    service.cancel(id).await?;
    Ok(Json(Message::new("Enrollment cancelled")))
}

pub(super) async fn user_enrollments(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<UserEnrollmentsQuery>,
) -> Result<Json<Vec<CalendarEvent>>, AppError> {
    let parent_id = query.validate()?;
    let rows = enrollments::fetch_active_enrollments_for_parent(&state.db, parent_id).await?;
    Ok(Json(rows.into_iter().map(CalendarEvent::from_enrollment).collect()))
}
