//! Route definitions for the `/vendors` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::vendor;
use crate::state::AppState;

/// Routes mounted at `/vendors`.
///
/// ```text
/// GET    /                  -> list
/// POST   /                  -> create
/// GET    /stats/summary     -> summary
/// GET    /{id}              -> get_by_id
/// PUT    /{id}              -> update
/// DELETE /{id}              -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(vendor::list).post(vendor::create))
        .route("/stats/summary", get(vendor::summary))
        .route(
            "/{id}",
            get(vendor::get_by_id)
                .put(vendor::update)
                .delete(vendor::delete),
        )
}
