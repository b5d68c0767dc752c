use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use tracing::{info, instrument, warn};

use super::{
    dto::{CredentialsRequest, LoginResponse, RegisterResponse},
    jwt::{JwtKeys, Principal},
    password::{hash_password, verify_password},
    repo::User,
};
use crate::{error::ApiError, state::AppState};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<CredentialsRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), ApiError> {
    let (username, password) = payload.validated()?;

    // Early check for a friendlier failure; the unique constraint still
    // decides the winner when two registrations race.
    if User::find_by_username(&state.db, &username).await?.is_some() {
        warn!(%username, "username already registered");
        return Err(ApiError::Conflict);
    }

    let hash = hash_password(&password)?;
    let user = User::create(&state.db, &username, &hash).await?;

    info!(user_id = user.id, %username, "user registered");
    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "user registered".into(),
            user_id: user.id,
        }),
    ))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<CredentialsRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let (username, password) = payload.validated()?;

    // Unknown username and wrong password are indistinguishable on the wire.
    let user = User::find_by_username(&state.db, &username)
        .await?
        .ok_or(ApiError::BadCredentials)?;

    if !verify_password(&password, &user.password_hash)? {
        warn!(user_id = user.id, "login with wrong password");
        return Err(ApiError::BadCredentials);
    }

    let keys = JwtKeys::from_ref(&state);
    let token = keys.sign(&Principal {
        id: user.id,
        username: user.username.clone(),
    })?;

    info!(user_id = user.id, %username, "user logged in");
    Ok(Json(LoginResponse {
        token,
        username: user.username,
    }))
}
