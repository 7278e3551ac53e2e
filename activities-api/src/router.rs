use axum::{response::Redirect, routing::get, Router};
use tower_http::{
    services::ServeDir,
    trace::{DefaultMakeSpan, TraceLayer},
};
use tracing::instrument;

use crate::{app_state::AppState, config::ApplicationSettings, routes};

const LANDING_PAGE: &str = "/static/index.html";

pub fn create(app_state: AppState, config: &ApplicationSettings) -> Router<()> {
    Router::new()
        .route("/", get(root))
        .nest("/activities", routes::activities::router())
        .nest_service("/static", ServeDir::new(&config.static_dir))
        .with_state(app_state)
        .layer(TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::default()))
}

#[instrument(name = "GET /")]
async fn root() -> Redirect {
    Redirect::temporary(LANDING_PAGE)
}
