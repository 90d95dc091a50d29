//! Error types for the law gate's own boundary.
//!
//! Law violations are not errors: they are reported as failures inside a
//! [`LawResult`](crate::witness::LawResult). `KanError` covers what stops a
//! check from running at all, plus the explicit conversion of a rejected
//! result via [`LawResult::ensure_accepted`](crate::witness::LawResult::ensure_accepted).

/// Errors arising while parsing or running a law check.
#[derive(Debug, thiserror::Error)]
pub enum KanError {
    /// The fixture names a world the registry does not know.
    #[error("unknown world: {0}")]
    UnknownWorld(String),

    /// A check object is missing a field or has one of the wrong type.
    #[error("malformed check: {0}")]
    MalformedCheck(String),

    /// A sample does not decode into the world's value type.
    #[error("malformed sample at index {index}: {source}")]
    MalformedSample {
        index: usize,
        #[source]
        source: serde_json::Error,
    },

    /// The world lacks the capability the check needs.
    #[error("world `{world}` does not support `{check}` checks")]
    Unsupported { world: String, check: String },

    /// A rejected result, surfaced as an error.
    #[error("law violation {law_ref}: {message}")]
    Violation { law_ref: String, message: String },
}
