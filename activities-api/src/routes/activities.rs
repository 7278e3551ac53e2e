use axum::{
    extract::{Path, Query, State},
    routing::{delete, get, post},
    Json, Router,
};
use axum_extra::extract::WithRejection;
use serde::Deserialize;
use tracing::instrument;

use super::ApiError;
use crate::{
    adapters::inbound::http::{activities_response, ActivitiesResponse, MessageResponse},
    app_state::AppState,
    domain::ports::inbound::ActivityService,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_activities))
        .route("/:activity_name/signup", post(signup_for_activity))
        .route("/:activity_name/unregister", delete(unregister_from_activity))
}

/// A missing `email` parameter is treated like an empty one.
#[derive(Debug, Deserialize)]
pub(crate) struct EmailQuery {
    #[serde(default)]
    email: String,
}

#[instrument(name = "GET /activities", skip(app_state))]
async fn list_activities(
    State(app_state): State<AppState>,
) -> Result<Json<ActivitiesResponse>, ApiError> {
    let activities = app_state.activity_service.list().await?;

    Ok(Json(activities_response(activities)))
}

#[instrument(name = "POST /activities/:activity_name/signup", skip(app_state))]
async fn signup_for_activity(
    State(app_state): State<AppState>,
    WithRejection(Path(activity_name), _): WithRejection<Path<String>, ApiError>,
    WithRejection(Query(query), _): WithRejection<Query<EmailQuery>, ApiError>,
) -> Result<Json<MessageResponse>, ApiError> {
    let registration = app_state
        .activity_service
        .signup(&activity_name, &query.email)
        .await
        .inspect_err(|err| tracing::debug!("Signup rejected: {}", err))?;

    Ok(Json(MessageResponse::signed_up(&registration)))
}

#[instrument(name = "DELETE /activities/:activity_name/unregister", skip(app_state))]
async fn unregister_from_activity(
    State(app_state): State<AppState>,
    WithRejection(Path(activity_name), _): WithRejection<Path<String>, ApiError>,
    WithRejection(Query(query), _): WithRejection<Query<EmailQuery>, ApiError>,
) -> Result<Json<MessageResponse>, ApiError> {
    let registration = app_state
        .activity_service
        .unregister(&activity_name, &query.email)
        .await
        .inspect_err(|err| tracing::debug!("Unregister rejected: {}", err))?;

    Ok(Json(MessageResponse::unregistered(&registration)))
}
