use thiserror::Error;

/// Errors raised by the domain model layer: malformed serialized indices,
/// unknown strategy tags, and the like. Maps to the INVALID_ARGUMENT error
/// kind at the application boundary.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("malformed search index '{value}' for type '{index_type}'")]
    MalformedIndex { index_type: String, value: String },

    #[error("unknown search index type '{0}'")]
    UnknownIndexType(String),

    #[error("cannot compare indices of different types: '{0}' vs '{1}'")]
    IncomparableIndexTypes(String, String),
}
