/// Convenience result type used across arrayviz.
pub type VizResult<T> = Result<T, VizError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Every variant is a local, synchronous failure reported to the immediate caller.
/// None of them leaves the engine in a modified state.
#[derive(thiserror::Error, Debug)]
pub enum VizError {
    /// An index outside `0..len` was passed to a positional operation.
    #[error("invalid index: {index} is out of range for {len} item(s)")]
    InvalidIndex { index: usize, len: usize },

    /// A removal was requested on an empty collection.
    #[error("empty collection: nothing to remove")]
    EmptyCollection,

    /// An operation was requested while another one is still in flight.
    #[error("operation rejected: {0}")]
    OperationRejected(String),

    /// Invalid user-provided configuration or arguments.
    #[error("validation error: {0}")]
    Validation(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl VizError {
    /// Build a [`VizError::InvalidIndex`] value.
    pub fn invalid_index(index: usize, len: usize) -> Self {
        Self::InvalidIndex { index, len }
    }

    /// Build a [`VizError::OperationRejected`] value.
    pub fn rejected(msg: impl Into<String>) -> Self {
        Self::OperationRejected(msg.into())
    }

    /// Build a [`VizError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// `true` for [`VizError::OperationRejected`].
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::OperationRejected(_))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
