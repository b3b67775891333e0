use axum::{Json, extract::State, http::StatusCode};

use crate::error::AppError;
use crate::extract::JsonBody;
use crate::models::{AuthResponse, LoginRequest, SignupRequest};
use crate::services::auth;
use crate::state::AppState;

pub(super) async fn signup(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<SignupRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), AppError> {
    let account = req.validate()?;
    let user = auth::signup(&state.db, account).await?;
    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            message: "Signup successful".to_string(),
            user,
        }),
    ))
}

pub(super) async fn login(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let credentials = req.validate()?;
    let user = auth::login(&state.db, credentials).await?;
    Ok(Json(AuthResponse {
        message: "Login successful".to_string(),
        user,
    }))
}
