pub mod account_service;
pub mod deal_service;
pub mod screening_service;

pub use account_service::{AccountError, AccountService, SignInOutcome};
pub use deal_service::{DealPage, DealService};
pub use screening_service::{MutationOutcome, ScreeningService};
