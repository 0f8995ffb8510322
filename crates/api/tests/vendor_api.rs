//! End-to-end tests for the `/vendors` endpoints.
//!
//! Requires a PostgreSQL `DATABASE_URL`.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, delete, get, post_json, put_json};
use serde_json::{json, Value};
use sqlx::PgPool;

async fn create_vendor(pool: &PgPool, body: Value) -> Value {
    let response = post_json(build_test_app(pool.clone()), "/vendors", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

fn names(page: &Value) -> Vec<&str> {
    page["vendors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["name"].as_str().unwrap())
        .collect()
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_returns_201_with_defaults(pool: PgPool) {
    let json = create_vendor(&pool, json!({ "name": "LinkedIn", "category": "SaaS / Software" })).await;

    assert!(json["id"].as_i64().unwrap() > 0);
    assert_eq!(json["name"], "LinkedIn");
    assert_eq!(json["status"], "active");
    assert_eq!(json["total_spend"], 0.0);
    assert!(json["payment_method"].is_null());
    assert!(json["creation_date"].is_string());
    assert!(json["updated_at"].is_null());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn get_returns_created_vendor(pool: PgPool) {
    let created = create_vendor(&pool, json!({ "name": "FedEx", "payment_method": "ach" })).await;
    assert_eq!(created["payment_method"], "ach");
    let id = created["id"].as_i64().unwrap();

    let response = get(build_test_app(pool), &format!("/vendors/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let fetched = body_json(response).await;
    assert_eq!(fetched["payment_method"], "ach");
    assert_eq!(fetched, created);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn get_missing_vendor_returns_404(pool: PgPool) {
    let response = get(build_test_app(pool), "/vendors/999999").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "Vendor with id 999999 not found");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_on_empty_store_uses_default_window(pool: PgPool) {
    let response = get(build_test_app(pool), "/vendors").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["vendors"], json!([]));
    assert_eq!(json["total"], 0);
    assert_eq!(json["skip"], 0);
    assert_eq!(json["limit"], 100);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_search_counts_all_matches(pool: PgPool) {
    for name in ["Amazon", "Amazon Web Services", "FedEx"] {
        create_vendor(&pool, json!({ "name": name })).await;
    }

    let response = get(
        build_test_app(pool),
        "/vendors?search=amazon&limit=1&sort_by=name&sort_order=asc",
    )
    .await;
    let json = body_json(response).await;

    assert_eq!(json["total"], 2);
    assert_eq!(json["limit"], 1);
    assert_eq!(names(&json), vec!["Amazon"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_sorts_by_spend_descending(pool: PgPool) {
    create_vendor(&pool, json!({ "name": "Small", "total_spend": 10.0 })).await;
    create_vendor(&pool, json!({ "name": "Large", "total_spend": 1000.0 })).await;
    create_vendor(&pool, json!({ "name": "Medium", "total_spend": 100.0 })).await;

    let response = get(build_test_app(pool), "/vendors?sort_by=total_spend&sort_order=desc").await;
    let json = body_json(response).await;

    assert_eq!(names(&json), vec!["Large", "Medium", "Small"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_changes_only_supplied_fields(pool: PgPool) {
    let created = create_vendor(
        &pool,
        json!({ "name": "Slack", "category": "SaaS / Software", "owner": "HR Team" }),
    )
    .await;
    let id = created["id"].as_i64().unwrap();

    let response = put_json(
        build_test_app(pool),
        &format!("/vendors/{id}"),
        json!({ "status": "inactive", "owner": null }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "inactive");
    assert!(json["owner"].is_null());
    assert_eq!(json["category"], "SaaS / Software");
    assert_eq!(json["name"], "Slack");
    assert_eq!(json["creation_date"], created["creation_date"]);
    assert!(json["updated_at"].is_string());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_missing_vendor_returns_404(pool: PgPool) {
    let response = put_json(build_test_app(pool), "/vendors/424242", json!({ "name": "X" })).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn delete_returns_204_then_404(pool: PgPool) {
    let created = create_vendor(&pool, json!({ "name": "Starbucks" })).await;
    let uri = format!("/vendors/{}", created["id"]);

    let response = delete(build_test_app(pool.clone()), &uri).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get(build_test_app(pool.clone()), &uri).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = delete(build_test_app(pool), &uri).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn summary_counts_pending_as_inactive(pool: PgPool) {
    create_vendor(&pool, json!({ "name": "A", "status": "active", "total_spend": 100.0 })).await;
    create_vendor(&pool, json!({ "name": "B", "status": "inactive", "total_spend": 50.0 })).await;
    create_vendor(&pool, json!({ "name": "C", "status": "pending", "total_spend": 25.0 })).await;

    let response = get(build_test_app(pool), "/vendors/stats/summary").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["total_vendors"], 3);
    assert_eq!(json["active_vendors"], 1);
    assert_eq!(json["inactive_vendors"], 2);
    assert_eq!(json["total_spend"], 175.0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn health_reports_ok_with_database(pool: PgPool) {
    let response = get(build_test_app(pool), "/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["db_healthy"], true);
}
