pub mod deals;
pub mod manager;
pub mod models;
pub mod screenings;
pub mod users;

pub use deals::DealRepository;
pub use manager::{DatabaseError, DatabaseManager};
pub use screenings::ScreeningRepository;
pub use users::UserRepository;
