use axum::{
    extract::{Path, Query},
    Extension, Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use super::parse_uuid;
use crate::config;
use crate::database::models::{Deal, DealInput, DealType};
use crate::error::ApiError;
use crate::filter::{parse_amount, parse_deal_types, DealFilter, FilterError, PageWindow};
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::services::{DealPage, DealService};

/// Listing parameters as the frontend sends them. Everything is an optional
/// string: numeric fields are parsed leniently (§ parse_amount) and an
/// unusable page/limit falls back to the default instead of rejecting the
/// request.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DealListQuery {
    pub query: Option<String>,
    pub revenue: Option<String>,
    pub ebitda: Option<String>,
    pub asking_price: Option<String>,
    pub max_revenue: Option<String>,
    pub max_ebitda: Option<String>,
    pub location: Option<String>,
    pub industry: Option<String>,
    pub deal_type: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
    pub user_id: Option<String>,
}

impl DealListQuery {
    fn to_filter(&self, external_only: bool) -> Result<DealFilter, FilterError> {
        if let Some(user_id) = self.user_id.as_deref() {
            // Sent by the frontend alongside the real filters; never a predicate.
            tracing::debug!("Ignoring userId listing parameter: {}", user_id);
        }

        Ok(DealFilter {
            search: self.query.clone(),
            deal_types: parse_deal_types(self.deal_type.as_deref())?,
            min_revenue: parse_amount(self.revenue.as_deref()),
            min_ebitda: parse_amount(self.ebitda.as_deref()),
            min_asking_price: parse_amount(self.asking_price.as_deref()),
            max_revenue: parse_amount(self.max_revenue.as_deref()),
            max_ebitda: parse_amount(self.max_ebitda.as_deref()),
            location: self.location.clone(),
            industry: self.industry.clone(),
            external_only,
        })
    }

    fn window(&self, default_limit: i64) -> PageWindow {
        PageWindow::resolve(self.page.as_deref(), self.limit.as_deref(), default_limit)
    }
}

/// GET /api/deals - filtered, paginated listing of externally-sourced deals
pub async fn deals_get(Query(query): Query<DealListQuery>) -> ApiResult<DealPage> {
    let filter = query.to_filter(true)?;
    let window = query.window(config::config().pagination.default_limit);

    let service = DealService::new().await?;
    let page = service.list(&filter, window).await?;

    Ok(ApiResponse::success(page))
}

/// GET /api/deals/screened - per-deal-type listing for the screening dashboard
pub async fn screened_get(Query(query): Query<DealListQuery>) -> ApiResult<DealPage> {
    let deal_type = screened_deal_type(query.deal_type.as_deref())?;
    let filter = DealFilter {
        search: query.query.clone(),
        deal_types: vec![deal_type],
        ..Default::default()
    };
    let window = query.window(config::config().pagination.screened_default_limit);

    let service = DealService::new().await?;
    let page = service.list(&filter, window).await?;

    Ok(ApiResponse::success(page))
}

/// The screened view requires exactly one deal type.
fn screened_deal_type(raw: Option<&str>) -> Result<DealType, FilterError> {
    let raw = raw
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or(FilterError::MissingDealType)?;

    DealType::parse(raw).ok_or_else(|| FilterError::UnknownDealType(raw.to_string()))
}

/// GET /api/deals/:id - single deal by id
pub async fn deal_get(Path(id): Path<String>) -> ApiResult<Deal> {
    let id = parse_uuid(&id, "deal")?;

    let service = DealService::new().await?;
    let deal = service.get(id).await?;

    Ok(ApiResponse::success(deal))
}

/// POST /api/deals - create one deal (admin)
pub async fn deals_post(
    Extension(user): Extension<AuthUser>,
    Json(input): Json<DealInput>,
) -> ApiResult<Deal> {
    user.require_admin()?;
    input.validate()?;

    let service = DealService::new().await?;
    let deal = service.create(&input).await?;

    Ok(ApiResponse::created(deal))
}

/// POST /api/deals/bulk - transactional multi-insert (admin)
pub async fn deals_bulk_post(
    Extension(user): Extension<AuthUser>,
    Json(inputs): Json<Vec<DealInput>>,
) -> ApiResult<Vec<Deal>> {
    user.require_admin()?;

    if inputs.is_empty() {
        return Err(ApiError::bad_request("No deals to insert"));
    }
    for input in &inputs {
        input.validate()?;
    }

    let service = DealService::new().await?;
    let deals = service.create_many(&inputs).await?;

    Ok(ApiResponse::created(deals))
}

/// PUT /api/deals/:id - full update of editable fields (admin)
pub async fn deal_put(
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    Json(input): Json<DealInput>,
) -> ApiResult<Deal> {
    user.require_admin()?;
    let id = parse_uuid(&id, "deal")?;
    input.validate()?;

    let service = DealService::new().await?;
    let deal = service.update(id, &input).await?;

    Ok(ApiResponse::success(deal))
}

/// DELETE /api/deals/:id - delete a deal; its screenings cascade (admin)
pub async fn deal_delete(
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> ApiResult<Value> {
    user.require_admin()?;
    let id = parse_uuid(&id, "deal")?;

    let service = DealService::new().await?;
    service.delete(id).await?;

    Ok(ApiResponse::success(json!({ "deleted": true })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_query_maps_onto_filter() {
        let query = DealListQuery {
            query: Some("dental".to_string()),
            revenue: Some("1000000".to_string()),
            ebitda: Some("junk".to_string()),
            deal_type: Some("ACQUISITION,MERGER".to_string()),
            user_id: Some("ignored".to_string()),
            ..Default::default()
        };

        let filter = query.to_filter(true).unwrap();
        assert_eq!(filter.search.as_deref(), Some("dental"));
        assert_eq!(filter.min_revenue, Some(1_000_000.0));
        assert_eq!(filter.min_ebitda, None);
        assert_eq!(
            filter.deal_types,
            vec![DealType::Acquisition, DealType::Merger]
        );
        assert!(filter.external_only);
    }

    #[test]
    fn test_unknown_deal_type_is_an_error() {
        let query = DealListQuery {
            deal_type: Some("TAKEOVER".to_string()),
            ..Default::default()
        };
        assert!(query.to_filter(true).is_err());
    }

    #[test]
    fn test_screened_deal_type_must_be_single_and_known() {
        assert_eq!(
            screened_deal_type(Some("FRANCHISE")).unwrap(),
            DealType::Franchise
        );
        assert!(screened_deal_type(None).is_err());
        assert!(screened_deal_type(Some("  ")).is_err());
        assert!(screened_deal_type(Some("ACQUISITION,MERGER")).is_err());
    }
}
