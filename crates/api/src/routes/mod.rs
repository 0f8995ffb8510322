pub mod health;
pub mod vendor;

use axum::Router;

use crate::state::AppState;

/// Build the resource route tree.
///
/// Route hierarchy:
///
/// ```text
/// /vendors                       list, create
/// /vendors/stats/summary         aggregate statistics
/// /vendors/{id}                  get, update, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/vendors", vendor::router())
}
