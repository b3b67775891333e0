use axum::{Json, extract::State};
use tracing::info;

use crate::db::attendance;
use crate::error::AppError;
use crate::extract::{JsonBody, QueryParams};
use crate::models::{AttendancePayload, AttendanceQuery, AttendanceRecord, AttendanceSubmitted, NewAttendance};
use crate::state::AppState;

pub(super) async fn list_attendance(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<AttendanceQuery>,
) -> Result<Json<Vec<AttendanceRecord>>, AppError> {
    let filter = query.validate()?;
    Ok(Json(attendance::fetch_attendance(&state.db, &filter).await?))
}

/// All records are validated before anything is written.
pub(super) async fn submit_attendance(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<AttendancePayload>,
) -> Result<Json<AttendanceSubmitted>, AppError> {
    let records = payload
        .into_vec()
        .into_iter()
        .map(|r| r.validate())
        .collect::<Result<Vec<NewAttendance>, _>>()?;

    let mut tx = state.db.begin().await?;
    let mut saved = Vec::with_capacity(records.len());
    for record in &records {
        saved.push(attendance::upsert_attendance(&mut *tx, record).await?);
    }
    tx.commit().await?;

    info!("Saved {} attendance records", saved.len());
    Ok(Json(AttendanceSubmitted {
        message: "Attendance submitted successfully".to_string(),
        records: saved,
    }))
}
