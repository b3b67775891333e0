use axum::{Json, extract::State};
use chrono::Utc;

use crate::db::students;
use crate::error::AppError;
use crate::models::{DashboardStats, Location};
use crate::services::stats;
use crate::state::AppState;

const DEFAULT_GRADE_LEVELS: [&str; 6] = ["Grade 1", "Grade 2", "Grade 3", "Grade 4", "Grade 5", "Grade 6"];

pub(super) async fn locations(State(state): State<AppState>) -> Result<Json<Vec<Location>>, AppError> {
    let names = students::fetch_distinct_locations(&state.db).await?;
    Ok(Json(names.into_iter().map(Location::from_name).collect()))
}

/// Falls back to Grade 1 through Grade 6 when no student has a grade yet.
pub(super) async fn student_grade_levels(State(state): State<AppState>) -> Result<Json<Vec<String>>, AppError> {
    let levels = students::fetch_distinct_grade_levels(&state.db).await?;
    if levels.is_empty() {
        return Ok(Json(DEFAULT_GRADE_LEVELS.iter().map(|g| g.to_string()).collect()));
    }
    Ok(Json(levels))
}

pub(super) async fn dashboard_stats(State(state): State<AppState>) -> Result<Json<DashboardStats>, AppError> {
    let stats = stats::dashboard_stats(&state.db, Utc::now().naive_utc()).await?;
    Ok(Json(stats))
}
