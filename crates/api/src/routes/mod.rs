pub mod health;
pub mod survey;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /surveys          create (POST)
/// /surveys/{id}     get
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().merge(survey::router())
}
