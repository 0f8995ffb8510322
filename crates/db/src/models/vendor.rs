//! Vendor entity model, enums and DTOs.

use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;
use vendorhub_core::error::CoreError;
use vendorhub_core::types::{DbId, Timestamp};
use vendorhub_core::vendor::{validate_spend, validate_text, validate_vendor_name};

/// Vendor lifecycle status, stored as the `vendor_status` Postgres enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "vendor_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum VendorStatus {
    #[default]
    Active,
    Inactive,
    Pending,
}

/// How a vendor is paid, stored as the `payment_method` Postgres enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "payment_method", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Card,
    Ach,
    Check,
    Wire,
}

/// A vendor row from the `vendors` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Vendor {
    pub id: DbId,
    pub name: String,
    pub category: Option<String>,
    pub owner: Option<String>,
    pub total_spend: f64,
    pub thirty_day_spend: f64,
    pub ninety_day_spend: f64,
    pub payment_method: Option<PaymentMethod>,
    pub location: Option<String>,
    pub department: Option<String>,
    pub status: VendorStatus,
    /// Display-only; conventionally `"Yes"` / `"No"`.
    pub tax_details_submitted: Option<String>,
    pub vendor_1099_2024: Option<String>,
    pub vendor_1099_2025: Option<String>,
    pub creation_date: Timestamp,
    /// NULL until the first update.
    pub updated_at: Option<Timestamp>,
}

/// DTO for creating a new vendor.
///
/// Spend amounts default to `0.0` and status to `active` when omitted.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateVendor {
    pub name: String,
    pub category: Option<String>,
    pub owner: Option<String>,
    #[serde(default)]
    pub total_spend: f64,
    #[serde(default)]
    pub thirty_day_spend: f64,
    #[serde(default)]
    pub ninety_day_spend: f64,
    pub payment_method: Option<PaymentMethod>,
    pub location: Option<String>,
    pub department: Option<String>,
    #[serde(default)]
    pub status: VendorStatus,
    pub tax_details_submitted: Option<String>,
    pub vendor_1099_2024: Option<String>,
    pub vendor_1099_2025: Option<String>,
}

impl CreateVendor {
    /// Check the required name and the spend amounts.
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_vendor_name(&self.name)?;
        validate_spend("total_spend", self.total_spend)?;
        validate_spend("thirty_day_spend", self.thirty_day_spend)?;
        validate_spend("ninety_day_spend", self.ninety_day_spend)?;
        for (field, value) in [
            ("category", &self.category),
            ("owner", &self.owner),
            ("location", &self.location),
            ("department", &self.department),
            ("tax_details_submitted", &self.tax_details_submitted),
            ("vendor_1099_2024", &self.vendor_1099_2024),
            ("vendor_1099_2025", &self.vendor_1099_2025),
        ] {
            if let Some(value) = value {
                validate_text(field, value)?;
            }
        }
        Ok(())
    }
}

/// DTO for partially updating a vendor.
///
/// An absent key leaves the column untouched. For nullable columns the outer
/// `Option` records presence and the inner one the new value, so an explicit
/// JSON `null` clears the column. `name`, `status` and the spend amounts are
/// not nullable; `null` for them is treated as absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateVendor {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub category: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub owner: Option<Option<String>>,
    pub total_spend: Option<f64>,
    pub thirty_day_spend: Option<f64>,
    pub ninety_day_spend: Option<f64>,
    #[serde(default, deserialize_with = "present")]
    pub payment_method: Option<Option<PaymentMethod>>,
    #[serde(default, deserialize_with = "present")]
    pub location: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub department: Option<Option<String>>,
    pub status: Option<VendorStatus>,
    #[serde(default, deserialize_with = "present")]
    pub tax_details_submitted: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub vendor_1099_2024: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub vendor_1099_2025: Option<Option<String>>,
}

impl UpdateVendor {
    /// Check whichever constrained fields were supplied.
    pub fn validate(&self) -> Result<(), CoreError> {
        if let Some(ref name) = self.name {
            validate_vendor_name(name)?;
        }
        for (field, amount) in [
            ("total_spend", self.total_spend),
            ("thirty_day_spend", self.thirty_day_spend),
            ("ninety_day_spend", self.ninety_day_spend),
        ] {
            if let Some(amount) = amount {
                validate_spend(field, amount)?;
            }
        }
        for (field, value) in [
            ("category", &self.category),
            ("owner", &self.owner),
            ("location", &self.location),
            ("department", &self.department),
            ("tax_details_submitted", &self.tax_details_submitted),
            ("vendor_1099_2024", &self.vendor_1099_2024),
            ("vendor_1099_2025", &self.vendor_1099_2025),
        ] {
            if let Some(Some(value)) = value {
                validate_text(field, value)?;
            }
        }
        Ok(())
    }
}

/// Mark a key as present, keeping an explicit `null` as `Some(None)`.
fn present<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Response body for `GET /vendors`.
#[derive(Debug, Clone, Serialize)]
pub struct VendorPage {
    pub vendors: Vec<Vendor>,
    pub total: i64,
    pub skip: i64,
    pub limit: i64,
}
