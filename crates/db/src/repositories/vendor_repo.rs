//! Repository for the `vendors` table.

use sqlx::postgres::PgArguments;
use sqlx::{PgExecutor, PgPool, Postgres};
use vendorhub_core::types::DbId;
use vendorhub_core::vendor::VendorSummary;
use vendorhub_core::vendor_query::{VendorFilter, VendorQuery, SEARCH_COLUMNS};

use crate::models::vendor::{CreateVendor, PaymentMethod, UpdateVendor, Vendor, VendorStatus};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "\
    id, name, category, owner, \
    total_spend, thirty_day_spend, ninety_day_spend, \
    payment_method, location, department, status, \
    tax_details_submitted, vendor_1099_2024, vendor_1099_2025, \
    creation_date, updated_at";

/// Column list for INSERT (excludes store-assigned `id` and timestamps).
const INSERT_COLUMNS: &str = "\
    name, category, owner, \
    total_spend, thirty_day_spend, ninety_day_spend, \
    payment_method, location, department, status, \
    tax_details_submitted, vendor_1099_2024, vendor_1099_2025";

/// Provides list/count, CRUD and summary operations for vendors.
pub struct VendorRepo;

impl VendorRepo {
    /// List vendors matching the query: filter, then sort, then offset/limit.
    ///
    /// Returns an empty vector when nothing matches or the offset runs past
    /// the end of the result set.
    pub async fn list(pool: &PgPool, query: &VendorQuery) -> Result<Vec<Vendor>, sqlx::Error> {
        let (where_clause, pattern, bind_idx) = build_vendor_filter(&query.filter);

        let sql = format!(
            "SELECT {COLUMNS} FROM vendors {where_clause} \
             ORDER BY {order_by} \
             LIMIT ${bind_idx} OFFSET ${next_idx}",
            order_by = query.sort.order_by_clause(),
            next_idx = bind_idx + 1,
        );

        let mut q = sqlx::query_as::<_, Vendor>(&sql);
        if let Some(ref pattern) = pattern {
            q = q.bind(pattern.as_str());
        }
        q.bind(query.page.limit)
            .bind(query.page.skip)
            .fetch_all(pool)
            .await
    }

    /// Count vendors matching the filter (for pagination metadata).
    ///
    /// Uses the same predicate as [`VendorRepo::list`].
    pub async fn count(pool: &PgPool, filter: &VendorFilter) -> Result<i64, sqlx::Error> {
        let (where_clause, pattern, _) = build_vendor_filter(filter);

        let sql = format!("SELECT COUNT(*)::BIGINT FROM vendors {where_clause}");

        let mut q = sqlx::query_scalar::<_, i64>(&sql);
        if let Some(ref pattern) = pattern {
            q = q.bind(pattern.as_str());
        }
        q.fetch_one(pool).await
    }

    /// Find a vendor by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Vendor>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM vendors WHERE id = $1");
        sqlx::query_as::<_, Vendor>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Insert a new vendor, returning the created row with its assigned id
    /// and `creation_date`.
    pub async fn create(pool: &PgPool, input: &CreateVendor) -> Result<Vendor, sqlx::Error> {
        insert(pool, input).await
    }

    /// Insert several vendors in a single transaction.
    ///
    /// Either every row is inserted or none is. The whole batch shares one
    /// transaction timestamp, so every row gets the same `creation_date`.
    pub async fn create_many(
        pool: &PgPool,
        inputs: &[CreateVendor],
    ) -> Result<Vec<Vendor>, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let mut created = Vec::with_capacity(inputs.len());
        for input in inputs {
            created.push(insert(&mut *tx, input).await?);
        }
        tx.commit().await?;
        Ok(created)
    }

    /// Update a vendor. Only fields present in `input` are written;
    /// `updated_at` is always refreshed, even when `input` is empty.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateVendor,
    ) -> Result<Option<Vendor>, sqlx::Error> {
        let (assignments, bind_values) = build_vendor_assignments(input);

        let query = format!(
            "UPDATE vendors SET {assignments} WHERE id = $1 RETURNING {COLUMNS}"
        );

        let q = sqlx::query_as::<_, Vendor>(&query).bind(id);
        bind_vendor_values(q, &bind_values)
            .fetch_optional(pool)
            .await
    }

    /// Delete a vendor by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM vendors WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Replace every vendor with `inputs` in a single transaction.
    ///
    /// Returns the number of rows removed and the inserted rows. If any
    /// insert fails the previous contents are kept.
    pub async fn replace_all(
        pool: &PgPool,
        inputs: &[CreateVendor],
    ) -> Result<(u64, Vec<Vendor>), sqlx::Error> {
        let mut tx = pool.begin().await?;
        let removed = sqlx::query("DELETE FROM vendors")
            .execute(&mut *tx)
            .await?
            .rows_affected();
        let mut created = Vec::with_capacity(inputs.len());
        for input in inputs {
            created.push(insert(&mut *tx, input).await?);
        }
        tx.commit().await?;
        Ok((removed, created))
    }

    /// Aggregate counts and spend across all vendors.
    pub async fn summary(pool: &PgPool) -> Result<VendorSummary, sqlx::Error> {
        let (total, active, spend): (i64, i64, Option<f64>) = sqlx::query_as(
            "SELECT \
                COUNT(*), \
                COUNT(*) FILTER (WHERE status = $1), \
                SUM(total_spend) \
             FROM vendors",
        )
        .bind(VendorStatus::Active)
        .fetch_one(pool)
        .await?;

        Ok(VendorSummary::from_totals(total, active, spend))
    }
}

/// Insert one vendor using any Postgres executor (pool or transaction).
async fn insert<'e, E>(executor: E, input: &CreateVendor) -> Result<Vendor, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    let query = format!(
        "INSERT INTO vendors ({INSERT_COLUMNS}) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13) \
         RETURNING {COLUMNS}"
    );
    sqlx::query_as::<_, Vendor>(&query)
        .bind(&input.name)
        .bind(input.category.as_deref())
        .bind(input.owner.as_deref())
        .bind(input.total_spend)
        .bind(input.thirty_day_spend)
        .bind(input.ninety_day_spend)
        .bind(input.payment_method)
        .bind(input.location.as_deref())
        .bind(input.department.as_deref())
        .bind(input.status)
        .bind(input.tax_details_submitted.as_deref())
        .bind(input.vendor_1099_2024.as_deref())
        .bind(input.vendor_1099_2025.as_deref())
        .fetch_one(executor)
        .await
}

// ---------------------------------------------------------------------------
// Dynamic SQL helpers
// ---------------------------------------------------------------------------

/// Build the WHERE clause for a vendor filter.
///
/// Returns `(where_clause, like_pattern, next_bind_index)`. The clause is
/// empty for a match-all filter; otherwise the single pattern parameter `$1`
/// is compared against every column in [`SEARCH_COLUMNS`] with `ILIKE`.
fn build_vendor_filter(filter: &VendorFilter) -> (String, Option<String>, u32) {
    match filter.like_pattern() {
        None => (String::new(), None, 1),
        Some(pattern) => {
            let conditions: Vec<String> = SEARCH_COLUMNS
                .iter()
                .map(|column| format!("{column} ILIKE $1 ESCAPE '\\'"))
                .collect();
            (
                format!("WHERE ({})", conditions.join(" OR ")),
                Some(pattern),
                2,
            )
        }
    }
}

/// Typed bind value for the dynamically-built UPDATE statement.
#[derive(Debug, Clone, PartialEq)]
enum BindValue {
    Text(Option<String>),
    Float(f64),
    Status(VendorStatus),
    Payment(Option<PaymentMethod>),
}

/// Build the SET list and bind values for a partial vendor update.
///
/// `$1` is reserved for the row id, so field parameters start at `$2`.
/// `updated_at = NOW()` is always the last assignment.
fn build_vendor_assignments(input: &UpdateVendor) -> (String, Vec<BindValue>) {
    let mut assignments: Vec<String> = Vec::new();
    let mut bind_values: Vec<BindValue> = Vec::new();

    let mut push = |column: &str, value: BindValue| {
        bind_values.push(value);
        assignments.push(format!("{column} = ${}", bind_values.len() + 1));
    };

    if let Some(ref name) = input.name {
        push("name", BindValue::Text(Some(name.clone())));
    }
    if let Some(ref category) = input.category {
        push("category", BindValue::Text(category.clone()));
    }
    if let Some(ref owner) = input.owner {
        push("owner", BindValue::Text(owner.clone()));
    }
    if let Some(amount) = input.total_spend {
        push("total_spend", BindValue::Float(amount));
    }
    if let Some(amount) = input.thirty_day_spend {
        push("thirty_day_spend", BindValue::Float(amount));
    }
    if let Some(amount) = input.ninety_day_spend {
        push("ninety_day_spend", BindValue::Float(amount));
    }
    if let Some(method) = input.payment_method {
        push("payment_method", BindValue::Payment(method));
    }
    if let Some(ref location) = input.location {
        push("location", BindValue::Text(location.clone()));
    }
    if let Some(ref department) = input.department {
        push("department", BindValue::Text(department.clone()));
    }
    if let Some(status) = input.status {
        push("status", BindValue::Status(status));
    }
    if let Some(ref value) = input.tax_details_submitted {
        push("tax_details_submitted", BindValue::Text(value.clone()));
    }
    if let Some(ref value) = input.vendor_1099_2024 {
        push("vendor_1099_2024", BindValue::Text(value.clone()));
    }
    if let Some(ref value) = input.vendor_1099_2025 {
        push("vendor_1099_2025", BindValue::Text(value.clone()));
    }

    assignments.push("updated_at = NOW()".to_string());

    (assignments.join(", "), bind_values)
}

/// Bind a slice of `BindValue` to a sqlx `QueryAs`.
fn bind_vendor_values<'q, O>(
    mut q: sqlx::query::QueryAs<'q, Postgres, O, PgArguments>,
    bind_values: &'q [BindValue],
) -> sqlx::query::QueryAs<'q, Postgres, O, PgArguments> {
    for val in bind_values {
        match val {
            BindValue::Text(v) => q = q.bind(v.as_deref()),
            BindValue::Float(v) => q = q.bind(*v),
            BindValue::Status(v) => q = q.bind(*v),
            BindValue::Payment(v) => q = q.bind(*v),
        }
    }
    q
}
