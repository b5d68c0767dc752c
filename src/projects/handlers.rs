use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use tracing::{debug, info, instrument};

use super::{
    dto::{CreateProjectRequest, CreatedProjectResponse, MessageResponse, UpdateProjectRequest},
    repo::Project,
};
use crate::{auth::extractors::AuthUser, error::ApiError, state::AppState};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/projects", get(list_projects).post(create_project))
        .route("/projects/:id", put(update_project).delete(delete_project))
}

#[instrument(skip(state, principal), fields(user_id = principal.0.id))]
pub async fn list_projects(
    State(state): State<AppState>,
    principal: AuthUser,
) -> Result<Json<Vec<Project>>, ApiError> {
    let projects = Project::list_by_owner(&state.db, principal.0.id).await?;
    Ok(Json(projects))
}

#[instrument(skip(state, principal, payload), fields(user_id = principal.0.id))]
pub async fn create_project(
    State(state): State<AppState>,
    principal: AuthUser,
    Json(payload): Json<CreateProjectRequest>,
) -> Result<(StatusCode, Json<CreatedProjectResponse>), ApiError> {
    let new = payload.validated()?;
    let project = Project::create(&state.db, principal.0.id, new).await?;

    info!(owner_id = project.owner_id, id = %project.id, "project created");
    Ok((
        StatusCode::CREATED,
        Json(CreatedProjectResponse {
            message: "project created".into(),
            id: project.id,
        }),
    ))
}

// A zero-row match (unknown id, or another owner's project) still answers
// with the success body, so the response never reveals whether the id exists.
#[instrument(skip(state, principal, payload), fields(user_id = principal.0.id))]
pub async fn update_project(
    State(state): State<AppState>,
    principal: AuthUser,
    Path(id): Path<String>,
    Json(payload): Json<UpdateProjectRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let (preference, completed) = payload.validated()?;
    let affected = Project::update(&state.db, principal.0.id, &id, preference, completed).await?;

    debug!(%id, affected, "project update");
    Ok(Json(MessageResponse {
        message: "project updated".into(),
    }))
}

#[instrument(skip(state, principal), fields(user_id = principal.0.id))]
pub async fn delete_project(
    State(state): State<AppState>,
    principal: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let affected = Project::delete(&state.db, principal.0.id, &id).await?;

    debug!(%id, affected, "project delete");
    Ok(Json(MessageResponse {
        message: "project deleted".into(),
    }))
}
