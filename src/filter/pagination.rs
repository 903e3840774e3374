use crate::config;

/// Resolved listing window.
///
/// Construction clamps instead of rejecting: a missing or unparsable page
/// becomes 1, pages below 1 become 1, and the limit is forced into
/// [1, pagination.max_limit]. Unusable input degrades to the default view
/// rather than a 400.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub page: i64,
    pub limit: i64,
    pub offset: i64,
}

impl PageWindow {
    pub fn resolve(page: Option<&str>, limit: Option<&str>, default_limit: i64) -> Self {
        let max_limit = config::config().pagination.max_limit;
        Self::resolve_with_max(page, limit, default_limit, max_limit)
    }

    fn resolve_with_max(
        page: Option<&str>,
        limit: Option<&str>,
        default_limit: i64,
        max_limit: i64,
    ) -> Self {
        let page = parse_index(page).unwrap_or(1).max(1);
        let limit = parse_index(limit).unwrap_or(default_limit).clamp(1, max_limit);
        Self {
            page,
            limit,
            offset: (page - 1) * limit,
        }
    }

    /// ceil(total / limit); an empty result set has zero pages.
    pub fn total_pages(&self, total_count: i64) -> i64 {
        if total_count <= 0 {
            0
        } else {
            (total_count + self.limit - 1) / self.limit
        }
    }
}

fn parse_index(raw: Option<&str>) -> Option<i64> {
    raw?.trim().parse::<i64>().ok()
}
