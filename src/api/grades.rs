use axum::{Json, extract::State, http::StatusCode};
use serde_json::Value;
use tracing::{info, warn};

use crate::db::grades;
use crate::error::AppError;
use crate::extract::JsonBody;
use crate::models::{Grade, NewGrade, NewGradeRequest};
use crate::state::AppState;

pub(super) async fn list_grades(State(state): State<AppState>) -> Result<Json<Vec<Grade>>, AppError> {
    Ok(Json(grades::fetch_grades(&state.db).await?))
}

pub(super) async fn create_grade(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<NewGradeRequest>,
) -> Result<(StatusCode, Json<Grade>), AppError> {
    let grade = req.validate()?;
    let created = grades::insert_grade(&state.db, &grade).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Inserts every valid entry of the array in one transaction; invalid
/// entries are skipped.
pub(super) async fn create_grades_batch(
    State(state): State<AppState>,
    JsonBody(entries): JsonBody<Vec<Value>>,
) -> Result<(StatusCode, Json<Vec<Grade>>), AppError> {
    let total = entries.len();
    let valid: Vec<NewGrade> = entries
        .into_iter()
        .enumerate()
        .filter_map(|(idx, entry)| {
            let parsed = serde_json::from_value::<NewGradeRequest>(entry)
                .map_err(|e| e.to_string())
                .and_then(|req| req.validate().map_err(|e| e.to_string()));
            match parsed {
                Ok(grade) => Some(grade),
                Err(reason) => {
                    warn!("Skipping grade entry {}: {}", idx, reason);
                    None
                }
            }
        })
        .collect();

    let mut tx = state.db.begin().await?;
    let mut created = Vec::with_capacity(valid.len());
    for grade in &valid {
        created.push(grades::insert_grade(&mut *tx, grade).await?);
    }
    tx.commit().await?;

    info!("Inserted {} of {} grades", created.len(), total);
    Ok((StatusCode::CREATED, Json(created)))
}
