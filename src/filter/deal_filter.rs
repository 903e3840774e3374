use serde_json::Value;

use super::error::FilterError;
use super::filter_where::{like_pattern, FilterWhere, SqlResult};
use crate::database::models::DealType;

const TABLE: &str = "deals";
const ORDER: &str = "\"created_at\" DESC, \"id\" DESC";

/// Typed filter for deal listings. Each field contributes at most one WHERE
/// condition; `to_select_sql`/`to_count_sql` run the same ordered builder
/// list so page and count always agree.
#[derive(Debug, Clone, Default)]
pub struct DealFilter {
    /// Containment match against the deal caption.
    pub search: Option<String>,
    /// Membership filter; empty means "all types".
    pub deal_types: Vec<DealType>,
    pub min_revenue: Option<f64>,
    pub min_ebitda: Option<f64>,
    pub min_asking_price: Option<f64>,
    pub max_revenue: Option<f64>,
    pub max_ebitda: Option<f64>,
    /// Containment match against the company location.
    pub location: Option<String>,
    /// Containment match against the industry.
    pub industry: Option<String>,
    /// Restrict to externally-synced rows (`bitrix_id IS NOT NULL`); the
    /// raw listing sets this, the screened listing does not.
    pub external_only: bool,
}

impl DealFilter {
    /// The ordered predicate-builder list. Every arm appends zero or one
    /// condition to the conjunction.
    fn apply(&self, w: &mut FilterWhere) {
        if self.external_only {
            w.push_static("\"bitrix_id\" IS NOT NULL");
        }
        if let Some(needle) = non_blank(self.search.as_deref()) {
            let p = w.param(Value::String(like_pattern(needle)));
            w.push(format!("\"deal_caption\" ILIKE {}", p));
        }
        if !self.deal_types.is_empty() {
            let placeholders: Vec<String> = self
                .deal_types
                .iter()
                .map(|t| w.param(Value::String(t.as_str().to_string())))
                .collect();
            w.push(format!("\"deal_type\" IN ({})", placeholders.join(", ")));
        }
        self.numeric(w, "revenue", ">=", self.min_revenue);
        self.numeric(w, "ebitda", ">=", self.min_ebitda);
        self.numeric(w, "asking_price", ">=", self.min_asking_price);
        self.numeric(w, "revenue", "<=", self.max_revenue);
        self.numeric(w, "ebitda", "<=", self.max_ebitda);
        if let Some(needle) = non_blank(self.location.as_deref()) {
            let p = w.param(Value::String(like_pattern(needle)));
            w.push(format!("\"company_location\" ILIKE {}", p));
        }
        if let Some(needle) = non_blank(self.industry.as_deref()) {
            let p = w.param(Value::String(like_pattern(needle)));
            w.push(format!("\"industry\" ILIKE {}", p));
        }
    }

    fn numeric(&self, w: &mut FilterWhere, column: &str, op: &str, value: Option<f64>) {
        let Some(value) = value else { return };
        // Non-finite values cannot become JSON numbers; skip them the same
        // way unparsable input is skipped.
        let Some(number) = serde_json::Number::from_f64(value) else { return };
        let p = w.param(Value::Number(number));
        w.push(format!("\"{}\" {} {}", column, op, p));
    }

    /// Page query: stable newest-first order, window inlined as integers.
    pub fn to_select_sql(&self, limit: i64, offset: i64) -> SqlResult {
        let mut w = FilterWhere::new(0);
        self.apply(&mut w);
        let (where_clause, params) = w.build();
        let query = format!(
            "SELECT * FROM \"{}\" WHERE {} ORDER BY {} LIMIT {} OFFSET {}",
            TABLE, where_clause, ORDER, limit, offset
        );
        SqlResult { query, params }
    }

    /// Count query over the same conjunction.
    pub fn to_count_sql(&self) -> SqlResult {
        let mut w = FilterWhere::new(0);
        self.apply(&mut w);
        let (where_clause, params) = w.build();
        let query = format!("SELECT COUNT(*) as count FROM \"{}\" WHERE {}", TABLE, where_clause);
        SqlResult { query, params }
    }
}

fn non_blank(raw: Option<&str>) -> Option<&str> {
    let trimmed = raw?.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

/// Parse a numeric filter input from its query-string form.
///
/// Anything that does not parse to a finite number yields None and the
/// filter is silently dropped: the listing runs without it rather than
/// erroring. This is intentional UX - a half-typed number in a filter box
/// must not break the page.
pub fn parse_amount(raw: Option<&str>) -> Option<f64> {
    let trimmed = raw?.trim();
    if trimmed.is_empty() {
        return None;
    }
    match trimmed.parse::<f64>() {
        Ok(n) if n.is_finite() => Some(n),
        _ => None,
    }
}

/// Normalize the `dealType` input: a single value or a comma-separated
/// list, deduplicated, order preserved. Unknown variants are an error
/// rather than a silently empty filter.
pub fn parse_deal_types(raw: Option<&str>) -> Result<Vec<DealType>, FilterError> {
    let Some(raw) = raw else {
        return Ok(Vec::new());
    };

    let mut types = Vec::new();
    for part in raw.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        match DealType::parse(part) {
            Some(t) => {
                if !types.contains(&t) {
                    types.push(t);
                }
            }
            None => return Err(FilterError::UnknownDealType(part.to_string())),
        }
    }
    Ok(types)
}
