use axum::routing::post;
use axum::Router;

use crate::handlers::converse;
use crate::state::AppState;

/// `POST /converse -> converse`
pub fn router() -> Router<AppState> {
    Router::new().route("/converse", post(converse::converse))
}
