use thiserror::Error;

/// Errors raised by the order record itself.
#[derive(Debug, Error)]
pub enum OrderError {
    /// A field the requested operation depends on has not been set yet.
    #[error("order incomplete: {0} is not set")]
    Incomplete(&'static str),

    /// The order has not been priced by the remote service.
    #[error("price not available: the order has not been priced")]
    PriceNotAvailable,

    /// Validation was requested; the product list can no longer change.
    #[error("products are locked once validation has been requested")]
    ProductsLocked,

    #[error("line item {0} is already in the order")]
    DuplicateLineItem(u32),

    #[error("unrecognised pizza size: {0:?}")]
    UnresolvedSize(String),

    #[error("failed to serialize order: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Errors raised while loading configuration from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
