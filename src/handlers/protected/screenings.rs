use axum::{extract::Path, Json};

use super::parse_uuid;
use crate::database::models::{AiScreening, ScreeningInput};
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::{MutationOutcome, ScreeningService};

/// GET /api/deals/:id/screenings - screenings for one deal, newest first
pub async fn screenings_get(Path(id): Path<String>) -> ApiResult<Vec<AiScreening>> {
    let deal_id = parse_uuid(&id, "deal")?;

    let service = ScreeningService::new().await?;
    let screenings = service.list(deal_id).await?;

    Ok(ApiResponse::success(screenings))
}

/// PUT /api/deals/:id/screenings/:screening_id - edit title, explanation, or sentiment
pub async fn screening_put(
    Path((id, screening_id)): Path<(String, String)>,
    Json(input): Json<ScreeningInput>,
) -> ApiResult<AiScreening> {
    let deal_id = parse_uuid(&id, "deal")?;
    let screening_id = parse_uuid(&screening_id, "screening")?;

    let service = ScreeningService::new().await?;
    let screening = service.update(deal_id, screening_id, &input).await?;

    Ok(ApiResponse::success(screening))
}

/// DELETE /api/deals/:id/screenings/:screening_id - discriminated result at 200
///
/// The client turns the outcome into a toast, so failures here must never
/// become a fault response. Anything that goes wrong past id parsing is
/// reported as the error outcome.
pub async fn screening_delete(
    Path((id, screening_id)): Path<(String, String)>,
) -> ApiResult<MutationOutcome> {
    let deal_id = parse_uuid(&id, "deal")?;
    let screening_id = parse_uuid(&screening_id, "screening")?;

    let outcome = match ScreeningService::new().await {
        Ok(service) => service.delete(deal_id, screening_id).await,
        Err(e) => {
            tracing::error!("Screening delete could not reach the database: {}", e);
            MutationOutcome::error("Failed to delete screening")
        }
    };

    Ok(ApiResponse::success(outcome))
}
