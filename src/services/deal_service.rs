use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::models::{Deal, DealInput};
use crate::database::DealRepository;
use crate::filter::{DealFilter, PageWindow};

/// One listing response: the page plus the metadata the table UI needs to
/// render its pager.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DealPage {
    pub deals: Vec<Deal>,
    pub total_count: i64,
    pub total_pages: i64,
}

pub struct DealService {
    pool: PgPool,
}

impl DealService {
    pub async fn new() -> Result<Self, DatabaseError> {
        let pool = DatabaseManager::pool().await?;
        Ok(Self { pool })
    }

    /// Run the page query and the count query concurrently; both share the
    /// filter, so the pager metadata always matches the rows.
    pub async fn list(&self, filter: &DealFilter, window: PageWindow) -> Result<DealPage, DatabaseError> {
        let (deals, total_count) = futures::try_join!(
            DealRepository::fetch_page(&self.pool, filter, window.limit, window.offset),
            DealRepository::count(&self.pool, filter),
        )?;

        Ok(DealPage {
            total_pages: window.total_pages(total_count),
            deals,
            total_count,
        })
    }

    pub async fn get(&self, id: Uuid) -> Result<Deal, DatabaseError> {
        DealRepository::find_by_id(&self.pool, id)
            .await?
            .ok_or_else(|| DatabaseError::NotFound(format!("Deal {} not found", id)))
    }

    pub async fn create(&self, input: &DealInput) -> Result<Deal, DatabaseError> {
        DealRepository::insert(&self.pool, input).await
    }

    pub async fn create_many(&self, inputs: &[DealInput]) -> Result<Vec<Deal>, DatabaseError> {
        DealRepository::insert_all(&self.pool, inputs).await
    }

    pub async fn update(&self, id: Uuid, input: &DealInput) -> Result<Deal, DatabaseError> {
        DealRepository::update(&self.pool, id, input)
            .await?
            .ok_or_else(|| DatabaseError::NotFound(format!("Deal {} not found", id)))
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), DatabaseError> {
        if DealRepository::delete(&self.pool, id).await? {
            Ok(())
        } else {
            Err(DatabaseError::NotFound(format!("Deal {} not found", id)))
        }
    }
}
