pub mod deal_filter;
pub mod error;
pub mod filter_where;
pub mod pagination;

pub use deal_filter::{parse_amount, parse_deal_types, DealFilter};
pub use error::FilterError;
pub use filter_where::{like_pattern, FilterWhere, SqlResult};
pub use pagination::PageWindow;
