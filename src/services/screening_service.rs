use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::models::{AiScreening, ScreeningInput};
use crate::database::{DealRepository, ScreeningRepository};

/// Discriminated result for screening mutations. The dashboard renders it
/// as a toast, so failures travel inside a 200 instead of an error status.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum MutationOutcome {
    Success,
    Error { message: String },
}

impl MutationOutcome {
    pub fn error(message: impl Into<String>) -> Self {
        MutationOutcome::Error { message: message.into() }
    }
}

pub struct ScreeningService {
    pool: PgPool,
}

impl ScreeningService {
    pub async fn new() -> Result<Self, DatabaseError> {
        let pool = DatabaseManager::pool().await?;
        Ok(Self { pool })
    }

    /// Screenings for a deal; 404s on an unknown deal rather than showing
    /// an empty list for a typo'd id.
    pub async fn list(&self, deal_id: Uuid) -> Result<Vec<AiScreening>, DatabaseError> {
        if DealRepository::find_by_id(&self.pool, deal_id).await?.is_none() {
            return Err(DatabaseError::NotFound(format!("Deal {} not found", deal_id)));
        }
        ScreeningRepository::list_for_deal(&self.pool, deal_id).await
    }

    pub async fn update(
        &self,
        deal_id: Uuid,
        screening_id: Uuid,
        input: &ScreeningInput,
    ) -> Result<AiScreening, DatabaseError> {
        ScreeningRepository::update(&self.pool, screening_id, deal_id, input)
            .await?
            .ok_or_else(|| {
                DatabaseError::NotFound(format!("Screening {} not found", screening_id))
            })
    }

    /// Delete one screening. Every failure, including an id that matches
    /// nothing, is caught here and reported as the error outcome; the
    /// caller never sees a fault.
    pub async fn delete(&self, deal_id: Uuid, screening_id: Uuid) -> MutationOutcome {
        match ScreeningRepository::delete(&self.pool, screening_id, deal_id).await {
            Ok(0) => MutationOutcome::error("Screening not found"),
            Ok(_) => MutationOutcome::Success,
            Err(e) => {
                tracing::error!("Failed to delete screening {}: {}", screening_id, e);
                MutationOutcome::error("Failed to delete screening")
            }
        }
    }
}
