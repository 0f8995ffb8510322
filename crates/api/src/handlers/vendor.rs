//! Handlers for the `/vendors` resource.
//!
//! Listing with search, sort and pagination, single-record CRUD, and the
//! aggregate summary used by the dashboard header.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use vendorhub_core::error::CoreError;
use vendorhub_core::types::DbId;
use vendorhub_core::vendor::VendorSummary;
use vendorhub_core::vendor_query::{VendorListParams, VendorQuery};
use vendorhub_db::models::vendor::{CreateVendor, UpdateVendor, Vendor, VendorPage};
use vendorhub_db::repositories::VendorRepo;

use crate::error::{AppError, AppResult};
use crate::extract::{ValidJson, ValidQuery};
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Vendor",
        id,
    })
}

// ---------------------------------------------------------------------------
// GET /vendors
// ---------------------------------------------------------------------------

/// List vendors with optional search, sorting and pagination.
///
/// `total` counts every vendor matching the search, ignoring `skip` and
/// `limit`.
pub async fn list(
    State(state): State<AppState>,
    ValidQuery(params): ValidQuery<VendorListParams>,
) -> AppResult<Json<VendorPage>> {
    let query = VendorQuery::from_params(&params)?;

    let vendors = VendorRepo::list(&state.pool, &query).await?;
    let total = VendorRepo::count(&state.pool, &query.filter).await?;

    tracing::debug!(
        count = vendors.len(),
        total,
        skip = query.page.skip,
        limit = query.page.limit,
        "Listed vendors"
    );

    Ok(Json(VendorPage {
        vendors,
        total,
        skip: query.page.skip,
        limit: query.page.limit,
    }))
}

// ---------------------------------------------------------------------------
// GET /vendors/{id}
// ---------------------------------------------------------------------------

/// Get a single vendor by ID.
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Vendor>> {
    let vendor = VendorRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(vendor))
}

// ---------------------------------------------------------------------------
// POST /vendors
// ---------------------------------------------------------------------------

/// Create a vendor. Returns 201 with the stored record.
pub async fn create(
    State(state): State<AppState>,
    ValidJson(input): ValidJson<CreateVendor>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

    let vendor = VendorRepo::create(&state.pool, &input).await?;

    tracing::info!(vendor_id = vendor.id, name = %vendor.name, "Vendor created");

    Ok((StatusCode::CREATED, Json(vendor)))
}

// ---------------------------------------------------------------------------
// PUT /vendors/{id}
// ---------------------------------------------------------------------------

/// Partially update a vendor. Only supplied fields change.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    ValidJson(input): ValidJson<UpdateVendor>,
) -> AppResult<Json<Vendor>> {
    input.validate()?;

    let vendor = VendorRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(vendor_id = id, "Vendor updated");

    Ok(Json(vendor))
}

// ---------------------------------------------------------------------------
// DELETE /vendors/{id}
// ---------------------------------------------------------------------------

/// Delete a vendor. Returns 204 on success.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !VendorRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }

    tracing::info!(vendor_id = id, "Vendor deleted");

    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// GET /vendors/stats/summary
// ---------------------------------------------------------------------------

/// Aggregate vendor counts and total spend.
pub async fn summary(State(state): State<AppState>) -> AppResult<Json<VendorSummary>> {
    let summary = VendorRepo::summary(&state.pool).await?;

    tracing::debug!(
        total = summary.total_vendors,
        active = summary.active_vendors,
        "Computed vendor summary"
    );

    Ok(Json(summary))
}
