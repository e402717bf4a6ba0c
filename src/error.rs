use thiserror::Error;

/// Errors raised by the housing market core
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MarketError {
    /// A caller-supplied value is outside its valid domain (e.g. a non-positive price)
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

pub type Result<T> = std::result::Result<T, MarketError>;
