//! Vendor field rules and summary statistics.

use serde::Serialize;

use crate::error::CoreError;

/// Validate free text bound into a query. NUL characters cannot be stored
/// in a Postgres `TEXT` value.
pub fn validate_text(field: &str, value: &str) -> Result<(), CoreError> {
    if value.contains('\0') {
        return Err(CoreError::Validation(format!(
            "{field} must not contain NUL characters"
        )));
    }
    Ok(())
}

/// Validate that a vendor name is present.
///
/// Names consisting only of whitespace are treated as empty.
pub fn validate_vendor_name(name: &str) -> Result<(), CoreError> {
    if name.trim().is_empty() {
        return Err(CoreError::Validation("name must not be empty".to_string()));
    }
    validate_text("name", name)
}

/// Validate a spend amount. Amounts must be finite and non-negative.
pub fn validate_spend(field: &str, amount: f64) -> Result<(), CoreError> {
    if !amount.is_finite() {
        return Err(CoreError::Validation(format!(
            "{field} must be a finite number"
        )));
    }
    if amount < 0.0 {
        return Err(CoreError::Validation(format!(
            "{field} must be >= 0, got {amount}"
        )));
    }
    Ok(())
}

/// Round a currency amount to two decimal places.
pub fn round_currency(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// Aggregate statistics over every vendor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VendorSummary {
    pub total_vendors: i64,
    pub active_vendors: i64,
    /// Every vendor that is not active, pending ones included.
    pub inactive_vendors: i64,
    /// Sum of `total_spend`, rounded to cents.
    pub total_spend: f64,
}

impl VendorSummary {
    /// Build a summary from raw aggregates.
    ///
    /// `inactive_vendors` is derived as `total - active` rather than counted
    /// separately, so `pending` vendors are reported as inactive. A missing
    /// spend sum (empty table) reports as `0.0`.
    pub fn from_totals(total: i64, active: i64, spend_sum: Option<f64>) -> Self {
        Self {
            total_vendors: total,
            active_vendors: active,
            inactive_vendors: total - active,
            total_spend: round_currency(spend_sum.unwrap_or(0.0)),
        }
    }
}
