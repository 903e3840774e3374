use thiserror::Error;

#[derive(Error, Debug)]
pub enum FilterError {
    #[error("Unknown dealType value: {0}")]
    UnknownDealType(String),

    #[error("dealType is required")]
    MissingDealType,
}
