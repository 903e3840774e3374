use sqlx::PgPool;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::{AiScreening, ScreeningInput};

pub struct ScreeningRepository;

impl ScreeningRepository {
    /// Screenings for one deal, newest first.
    pub async fn list_for_deal(pool: &PgPool, deal_id: Uuid) -> Result<Vec<AiScreening>, DatabaseError> {
        let rows = sqlx::query_as::<_, AiScreening>(
            "SELECT * FROM \"ai_screenings\" WHERE deal_id = $1 \
             ORDER BY created_at DESC, id DESC",
        )
        .bind(deal_id)
        .fetch_all(pool)
        .await?;
        Ok(rows)
    }

    /// Edit title/explanation/sentiment; None when no row matches both ids.
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        deal_id: Uuid,
        input: &ScreeningInput,
    ) -> Result<Option<AiScreening>, DatabaseError> {
        let row = sqlx::query_as::<_, AiScreening>(
            "UPDATE \"ai_screenings\" SET title = $1, explanation = $2, sentiment = $3, \
             updated_at = now() WHERE id = $4 AND deal_id = $5 RETURNING *",
        )
        .bind(&input.title)
        .bind(&input.explanation)
        .bind(input.sentiment)
        .bind(id)
        .bind(deal_id)
        .fetch_optional(pool)
        .await?;
        Ok(row)
    }

    /// Rows removed. Scoped by both ids so a screening can only be deleted
    /// through its own deal.
    pub async fn delete(pool: &PgPool, id: Uuid, deal_id: Uuid) -> Result<u64, DatabaseError> {
        let result = sqlx::query("DELETE FROM \"ai_screenings\" WHERE id = $1 AND deal_id = $2")
            .bind(id)
            .bind(deal_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
