use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::collections::HashMap;
use uuid::Uuid;

use crate::error::ApiError;

/// Business classification of a deal. Controls which filtered dashboard
/// view the deal surfaces in.
///
/// Stored as TEXT (with a CHECK constraint) so filter params can bind as
/// plain strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DealType {
    Acquisition,
    Merger,
    AssetSale,
    Franchise,
    Other,
}

impl DealType {
    pub const ALL: [DealType; 5] = [
        DealType::Acquisition,
        DealType::Merger,
        DealType::AssetSale,
        DealType::Franchise,
        DealType::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DealType::Acquisition => "ACQUISITION",
            DealType::Merger => "MERGER",
            DealType::AssetSale => "ASSET_SALE",
            DealType::Franchise => "FRANCHISE",
            DealType::Other => "OTHER",
        }
    }

    pub fn parse(raw: &str) -> Option<DealType> {
        let raw = raw.trim();
        Self::ALL.iter().copied().find(|t| t.as_str() == raw)
    }
}

impl std::fmt::Display for DealType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A deal row. Money fields are dollars; all of them are optional because
/// bulk-loaded listings routinely omit financials.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Deal {
    pub id: Uuid,
    pub title: String,
    pub deal_caption: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub work_phone: Option<String>,
    pub revenue: Option<f64>,
    pub ebitda: Option<f64>,
    pub ebitda_margin: Option<f64>,
    pub gross_revenue: Option<f64>,
    pub asking_price: Option<f64>,
    pub deal_type: DealType,
    pub company_location: Option<String>,
    pub industry: Option<String>,
    pub source_website: Option<String>,
    pub brokerage: Option<String>,
    /// Set when the deal was synced from the external CRM; the raw listing
    /// only shows rows where this is present.
    pub bitrix_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create/update payload. PUT replaces every editable field with these
/// values, so optional fields that are omitted become NULL.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DealInput {
    pub title: String,
    pub deal_caption: String,
    pub deal_type: DealType,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub work_phone: Option<String>,
    #[serde(default)]
    pub revenue: Option<f64>,
    #[serde(default)]
    pub ebitda: Option<f64>,
    #[serde(default)]
    pub ebitda_margin: Option<f64>,
    #[serde(default)]
    pub gross_revenue: Option<f64>,
    #[serde(default)]
    pub asking_price: Option<f64>,
    #[serde(default)]
    pub company_location: Option<String>,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub source_website: Option<String>,
    #[serde(default)]
    pub brokerage: Option<String>,
    #[serde(default)]
    pub bitrix_id: Option<String>,
}

impl DealInput {
    /// Field-level validation for create and update.
    pub fn validate(&self) -> Result<(), ApiError> {
        let mut field_errors = HashMap::new();

        if self.title.trim().is_empty() {
            field_errors.insert("title".to_string(), "This field is required".to_string());
        }
        if self.deal_caption.trim().is_empty() {
            field_errors.insert("dealCaption".to_string(), "This field is required".to_string());
        }

        if field_errors.is_empty() {
            Ok(())
        } else {
            Err(ApiError::validation_error(
                "Missing required fields",
                Some(field_errors),
            ))
        }
    }
}
