pub mod deal;
pub mod screening;
pub mod user;

pub use deal::{Deal, DealInput, DealType};
pub use screening::{AiScreening, ScreeningInput, Sentiment};
pub use user::{User, UserRole};
