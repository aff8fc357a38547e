use axum::routing::{get, post};
use axum::Router;

use crate::handlers::survey;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/surveys", post(survey::create_survey))
        .route("/surveys/{id}", get(survey::get_survey))
}
