//! Query builder for vendor listing.
//!
//! Turns untrusted request parameters (search text, sort column, sort
//! direction, pagination) into a [`VendorQuery`] that the repository layer
//! renders into SQL. Nothing here performs I/O.
//!
//! Each input is resolved independently:
//!
//! - `skip` / `limit` are checked by [`validate_pagination`] at the HTTP
//!   boundary before the builder runs.
//! - `search` becomes a [`VendorFilter`] matching `name`, `category` or
//!   `owner` case-insensitively as a substring.
//! - `sort_by` is looked up in [`SORTABLE_COLUMNS`]. Unknown names fall back
//!   to the default sort (`creation_date DESC`) instead of failing.
//! - `sort_order` accepts `asc` / `desc` in any case; anything else is `asc`.
//!
//! Rows that compare equal on the sort key have no secondary ordering, so
//! their relative order is not deterministic across queries.

use serde::Deserialize;

use crate::error::CoreError;
use crate::vendor::validate_text;

// ---------------------------------------------------------------------------
// Pagination
// ---------------------------------------------------------------------------

/// Default number of vendors per page.
pub const DEFAULT_LIMIT: i64 = 100;

/// Smallest accepted page size.
pub const MIN_LIMIT: i64 = 1;

/// Largest accepted page size.
pub const MAX_LIMIT: i64 = 500;

/// Offset/limit window applied after filtering and sorting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub skip: i64,
    pub limit: i64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: DEFAULT_LIMIT,
        }
    }
}

/// Validate caller-supplied pagination, applying defaults for absent values.
///
/// `skip` must be >= 0 and has no upper bound. `limit` must lie within
/// [`MIN_LIMIT`]..=[`MAX_LIMIT`].
pub fn validate_pagination(skip: Option<i64>, limit: Option<i64>) -> Result<Pagination, CoreError> {
    let skip = skip.unwrap_or(0);
    if skip < 0 {
        return Err(CoreError::Validation(format!(
            "skip must be >= 0, got {skip}"
        )));
    }

    let limit = limit.unwrap_or(DEFAULT_LIMIT);
    if !(MIN_LIMIT..=MAX_LIMIT).contains(&limit) {
        return Err(CoreError::Validation(format!(
            "limit must be between {MIN_LIMIT} and {MAX_LIMIT}, got {limit}"
        )));
    }

    Ok(Pagination { skip, limit })
}

// ---------------------------------------------------------------------------
// Search filter
// ---------------------------------------------------------------------------

/// Columns matched by the free-text search, OR-ed together.
pub const SEARCH_COLUMNS: &[&str] = &["name", "category", "owner"];

/// Row predicate shared by the list and count queries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VendorFilter {
    /// Raw search text. `None` matches every row.
    pub search: Option<String>,
}

impl VendorFilter {
    /// Build a filter from an optional search string.
    ///
    /// Absent or empty input yields a match-all filter. The text is kept
    /// verbatim otherwise, whitespace included.
    pub fn from_search(search: Option<&str>) -> Self {
        Self {
            search: search.filter(|s| !s.is_empty()).map(str::to_string),
        }
    }

    /// Whether this filter restricts the result set at all.
    pub fn is_match_all(&self) -> bool {
        self.search.is_none()
    }

    /// The `ILIKE` pattern for the search text, if any.
    ///
    /// LIKE metacharacters are escaped with `\` so the input is matched as a
    /// literal, unanchored substring.
    pub fn like_pattern(&self) -> Option<String> {
        self.search
            .as_deref()
            .map(|s| format!("%{}%", escape_like(s)))
    }
}

/// Escape `\`, `%` and `_` for use inside a LIKE pattern.
fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

// ---------------------------------------------------------------------------
// Sorting
// ---------------------------------------------------------------------------

/// Every vendor attribute that may be used as a sort key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortColumn {
    Id,
    Name,
    Category,
    Owner,
    TotalSpend,
    ThirtyDaySpend,
    NinetyDaySpend,
    PaymentMethod,
    Location,
    Department,
    Status,
    TaxDetailsSubmitted,
    Vendor1099For2024,
    Vendor1099For2025,
    CreationDate,
    UpdatedAt,
}

/// Accepted `sort_by` values and the column each one resolves to.
pub const SORTABLE_COLUMNS: &[(&str, SortColumn)] = &[
    ("id", SortColumn::Id),
    ("name", SortColumn::Name),
    ("category", SortColumn::Category),
    ("owner", SortColumn::Owner),
    ("total_spend", SortColumn::TotalSpend),
    ("thirty_day_spend", SortColumn::ThirtyDaySpend),
    ("ninety_day_spend", SortColumn::NinetyDaySpend),
    ("payment_method", SortColumn::PaymentMethod),
    ("location", SortColumn::Location),
    ("department", SortColumn::Department),
    ("status", SortColumn::Status),
    ("tax_details_submitted", SortColumn::TaxDetailsSubmitted),
    ("vendor_1099_2024", SortColumn::Vendor1099For2024),
    ("vendor_1099_2025", SortColumn::Vendor1099For2025),
    ("creation_date", SortColumn::CreationDate),
    ("updated_at", SortColumn::UpdatedAt),
];

impl SortColumn {
    /// Resolve a field name against [`SORTABLE_COLUMNS`].
    pub fn from_field(name: &str) -> Option<Self> {
        SORTABLE_COLUMNS
            .iter()
            .find(|(field, _)| *field == name)
            .map(|(_, column)| *column)
    }

    /// The database column backing this sort key.
    pub fn column_name(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Name => "name",
            Self::Category => "category",
            Self::Owner => "owner",
            Self::TotalSpend => "total_spend",
            Self::ThirtyDaySpend => "thirty_day_spend",
            Self::NinetyDaySpend => "ninety_day_spend",
            Self::PaymentMethod => "payment_method",
            Self::Location => "location",
            Self::Department => "department",
            Self::Status => "status",
            Self::TaxDetailsSubmitted => "tax_details_submitted",
            Self::Vendor1099For2024 => "vendor_1099_2024",
            Self::Vendor1099For2025 => "vendor_1099_2025",
            Self::CreationDate => "creation_date",
            Self::UpdatedAt => "updated_at",
        }
    }

    /// Whether the column holds free text (compared case-insensitively).
    pub fn is_text(self) -> bool {
        matches!(
            self,
            Self::Name
                | Self::Category
                | Self::Owner
                | Self::Location
                | Self::Department
                | Self::TaxDetailsSubmitted
                | Self::Vendor1099For2024
                | Self::Vendor1099For2025
        )
    }

    /// SQL expression to order by.
    ///
    /// Text columns are lower-cased; numbers, timestamps and enums use their
    /// natural ordering (enums follow their declaration order).
    pub fn order_expr(self) -> String {
        if self.is_text() {
            format!("LOWER({})", self.column_name())
        } else {
            self.column_name().to_string()
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// Parse a `sort_order` value leniently: `desc` in any case is
    /// descending, everything else (including absence) is ascending.
    pub fn from_param(value: Option<&str>) -> Self {
        match value {
            Some(v) if v.eq_ignore_ascii_case("desc") => Self::Desc,
            _ => Self::Asc,
        }
    }

    pub fn as_sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// Resolved sort key and direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub column: SortColumn,
    pub direction: SortDirection,
}

impl Default for SortSpec {
    /// Newest vendors first.
    fn default() -> Self {
        Self {
            column: SortColumn::CreationDate,
            direction: SortDirection::Desc,
        }
    }
}

impl SortSpec {
    /// Resolve `sort_by` / `sort_order` request parameters.
    ///
    /// An absent or unrecognised `sort_by` yields [`SortSpec::default`] and
    /// the `sort_order` value is ignored in that case.
    pub fn resolve(sort_by: Option<&str>, sort_order: Option<&str>) -> Self {
        match sort_by.and_then(SortColumn::from_field) {
            Some(column) => Self {
                column,
                direction: SortDirection::from_param(sort_order),
            },
            None => Self::default(),
        }
    }

    /// Render the body of an `ORDER BY` clause.
    pub fn order_by_clause(&self) -> String {
        format!("{} {}", self.column.order_expr(), self.direction.as_sql())
    }
}

// ---------------------------------------------------------------------------
// Request parameters and the combined query
// ---------------------------------------------------------------------------

/// Raw `GET /vendors` query-string parameters.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VendorListParams {
    pub skip: Option<i64>,
    pub limit: Option<i64>,
    pub search: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

/// Filter, sort and pagination plan handed to the repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VendorQuery {
    pub filter: VendorFilter,
    pub sort: SortSpec,
    pub page: Pagination,
}

impl VendorQuery {
    /// Combine already-validated pagination with the search and sort inputs.
    pub fn new(
        page: Pagination,
        search: Option<&str>,
        sort_by: Option<&str>,
        sort_order: Option<&str>,
    ) -> Self {
        Self {
            filter: VendorFilter::from_search(search),
            sort: SortSpec::resolve(sort_by, sort_order),
            page,
        }
    }

    /// Validate pagination and search text, then build the query from raw
    /// request parameters.
    pub fn from_params(params: &VendorListParams) -> Result<Self, CoreError> {
        let page = validate_pagination(params.skip, params.limit)?;
        if let Some(ref search) = params.search {
            validate_text("search", search)?;
        }
        Ok(Self::new(
            page,
            params.search.as_deref(),
            params.sort_by.as_deref(),
            params.sort_order.as_deref(),
        ))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
