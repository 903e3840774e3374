use serde_json::Value;
use sqlx::{postgres::PgArguments, FromRow, PgPool, Row};
use uuid::Uuid;

use crate::config;
use crate::database::manager::DatabaseError;
use crate::database::models::{Deal, DealInput};
use crate::filter::{DealFilter, SqlResult};

const INSERT_SQL: &str = "INSERT INTO \"deals\" \
    (id, title, deal_caption, deal_type, first_name, last_name, email, work_phone, \
     revenue, ebitda, ebitda_margin, gross_revenue, asking_price, company_location, \
     industry, source_website, brokerage, bitrix_id, created_at, updated_at) \
     VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18, now(), now()) \
     RETURNING *";

const UPDATE_SQL: &str = "UPDATE \"deals\" SET \
     title = $1, deal_caption = $2, deal_type = $3, first_name = $4, last_name = $5, \
     email = $6, work_phone = $7, revenue = $8, ebitda = $9, ebitda_margin = $10, \
     gross_revenue = $11, asking_price = $12, company_location = $13, industry = $14, \
     source_website = $15, brokerage = $16, bitrix_id = $17, updated_at = now() \
     WHERE id = $18 RETURNING *";

pub struct DealRepository;

impl DealRepository {
    /// One page of the filtered listing.
    pub async fn fetch_page(
        pool: &PgPool,
        filter: &DealFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Deal>, DatabaseError> {
        let SqlResult { query, params } = filter.to_select_sql(limit, offset);
        log_query(&query, &params);

        let mut q = sqlx::query_as::<_, Deal>(&query);
        for p in params.iter() {
            q = bind_param_query_as(q, p);
        }
        Ok(q.fetch_all(pool).await?)
    }

    /// Total row count under the same filter as `fetch_page`.
    pub async fn count(pool: &PgPool, filter: &DealFilter) -> Result<i64, DatabaseError> {
        let SqlResult { query, params } = filter.to_count_sql();
        log_query(&query, &params);

        let mut q = sqlx::query(&query);
        for p in params.iter() {
            q = bind_param_query(q, p);
        }
        let row = q.fetch_one(pool).await?;
        Ok(row.try_get("count")?)
    }

    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Deal>, DatabaseError> {
        let deal = sqlx::query_as::<_, Deal>("SELECT * FROM \"deals\" WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(deal)
    }

    pub async fn insert(pool: &PgPool, input: &DealInput) -> Result<Deal, DatabaseError> {
        insert_with(pool, input).await
    }

    /// Bulk create, all-or-nothing.
    pub async fn insert_all(pool: &PgPool, inputs: &[DealInput]) -> Result<Vec<Deal>, DatabaseError> {
        let mut tx = pool.begin().await?;
        let mut created = Vec::with_capacity(inputs.len());
        for input in inputs {
            created.push(insert_with(&mut *tx, input).await?);
        }
        tx.commit().await?;
        Ok(created)
    }

    /// Full replace of editable fields; None when the id is unknown.
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        input: &DealInput,
    ) -> Result<Option<Deal>, DatabaseError> {
        let deal = sqlx::query_as::<_, Deal>(UPDATE_SQL)
            .bind(&input.title)
            .bind(&input.deal_caption)
            .bind(input.deal_type)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(&input.email)
            .bind(&input.work_phone)
            .bind(input.revenue)
            .bind(input.ebitda)
            .bind(input.ebitda_margin)
            .bind(input.gross_revenue)
            .bind(input.asking_price)
            .bind(&input.company_location)
            .bind(&input.industry)
            .bind(&input.source_website)
            .bind(&input.brokerage)
            .bind(&input.bitrix_id)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(deal)
    }

    /// True when a row was deleted. Screenings go with it via FK cascade.
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, DatabaseError> {
        let result = sqlx::query("DELETE FROM \"deals\" WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

async fn insert_with<'e, E>(executor: E, input: &DealInput) -> Result<Deal, DatabaseError>
where
    E: sqlx::PgExecutor<'e>,
{
    let deal = sqlx::query_as::<_, Deal>(INSERT_SQL)
        .bind(Uuid::new_v4())
        .bind(&input.title)
        .bind(&input.deal_caption)
        .bind(input.deal_type)
        .bind(&input.first_name)
        .bind(&input.last_name)
        .bind(&input.email)
        .bind(&input.work_phone)
        .bind(input.revenue)
        .bind(input.ebitda)
        .bind(input.ebitda_margin)
        .bind(input.gross_revenue)
        .bind(input.asking_price)
        .bind(&input.company_location)
        .bind(&input.industry)
        .bind(&input.source_website)
        .bind(&input.brokerage)
        .bind(&input.bitrix_id)
        .fetch_one(executor)
        .await?;
    Ok(deal)
}

fn log_query(query: &str, params: &[Value]) {
    if config::config().database.enable_query_logging {
        tracing::debug!(query, param_count = params.len(), "deal query");
    }
}

fn bind_param_query<'q>(
    q: sqlx::query::Query<'q, sqlx::Postgres, PgArguments>,
    v: &'q Value,
) -> sqlx::query::Query<'q, sqlx::Postgres, PgArguments> {
    match v {
        Value::Null => {
            let none: Option<String> = None;
            q.bind(none)
        }
        Value::Bool(b) => q.bind(*b),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                q.bind(i)
            } else if let Some(u) = n.as_u64() {
                // Postgres doesn't have u64; cast down if safe
                q.bind(u as i64)
            } else if let Some(f) = n.as_f64() {
                q.bind(f)
            } else {
                q.bind(n.to_string())
            }
        }
        Value::String(s) => q.bind(s),
        Value::Array(_) => {
            // Arrays are expanded into individual placeholders by FilterWhere
            q
        }
        Value::Object(_) => q.bind(v.clone()), // JSONB
    }
}

fn bind_param_query_as<'q, O>(
    q: sqlx::query::QueryAs<'q, sqlx::Postgres, O, PgArguments>,
    v: &'q Value,
) -> sqlx::query::QueryAs<'q, sqlx::Postgres, O, PgArguments>
where
    O: for<'r> FromRow<'r, sqlx::postgres::PgRow>,
{
    match v {
        Value::Null => {
            let none: Option<String> = None;
            q.bind(none)
        }
        Value::Bool(b) => q.bind(*b),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                q.bind(i)
            } else if let Some(u) = n.as_u64() {
                q.bind(u as i64)
            } else if let Some(f) = n.as_f64() {
                q.bind(f)
            } else {
                q.bind(n.to_string())
            }
        }
        Value::String(s) => q.bind(s),
        Value::Array(_) => q,
        Value::Object(_) => q.bind(v.clone()),
    }
}
