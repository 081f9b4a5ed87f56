use thiserror::Error;

/// Convenience result type for filtering operations.
pub type FilterResult<T> = Result<T, FilterError>;

/// Error type returned by path resolution, filtering and decoding.
///
/// Unresolvable filter paths and non-matching records are never errors; only a target type
/// that is not record-shaped, or a matching record that cannot be decoded, is reported.
#[derive(Debug, Error)]
pub enum FilterError {
    /// The target type is not a record (it has no fields to resolve paths against).
    #[error("schema error: type '{type_name}' {message}")]
    Schema { type_name: String, message: String },

    /// A dynamic value could not be converted into the target type.
    #[error("conversion error: {0}")]
    Conversion(#[from] serde_json::Error),

    /// A record that satisfied every predicate could not be decoded into the target type.
    #[error("conversion error: failed to decode record '{key}': {source}")]
    Decode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

impl FilterError {
    /// Returns `true` for both conversion variants.
    pub fn is_conversion(&self) -> bool {
        matches!(self, Self::Conversion(_) | Self::Decode { .. })
    }
}
