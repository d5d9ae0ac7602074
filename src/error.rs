/// Errors raised around the compiler core: option parsing, direction names
/// and JSON encoding for the foreign bindings. Compilation itself never fails.
pub type HypeResult<T> = Result<T, HypeError>;

#[derive(Debug, thiserror::Error)]
pub enum HypeError {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("unknown direction '{0}', expected forward or backward")]
    UnknownDirection(String),
}
