//! Error taxonomy for dataset operations.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SemantizerError {
    /// A requested sub-graph or named graph has no statements in the dataset
    #[error("Not found: {0}")]
    NotFound(String),

    /// An object term does not have the kind or datatype the accessor expects
    #[error("Invalid term type when getting object value: expected {expected}, found {found}")]
    InvalidTermType { expected: String, found: String },

    /// The lexical form of a literal cannot be read (or written) for its datatype
    #[error("Invalid {datatype} literal: {value:?}")]
    InvalidLiteral { datatype: String, value: String },

    /// The accessor exists but is intentionally not supported
    #[error("Method not implemented: {0}")]
    NotImplemented(&'static str),

    /// An operation needed the origin IRI of a dataset but none is set
    #[error("Resource origin is undefined")]
    ResourceOriginUndefined,

    #[error("Invalid IRI {iri:?}: {reason}")]
    InvalidIri { iri: String, reason: String },

    /// Network access was requested while the configuration is offline
    #[error("Failed to fetch {0}: offline mode is enabled")]
    Offline(String),

    /// Failure reported by a loader, propagated unchanged
    #[error(transparent)]
    Load(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, SemantizerError>;

impl SemantizerError {
    pub(crate) fn invalid_term(expected: &str, found: &oxigraph::model::Term) -> Self {
        SemantizerError::InvalidTermType {
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }

    /// Unwraps errors that a loader raised from this taxonomy (e.g. `Offline`) and wraps
    /// everything else as `Load`.
    pub(crate) fn from_loader(err: anyhow::Error) -> Self {
        match err.downcast::<SemantizerError>() {
            Ok(e) => e,
            Err(e) => SemantizerError::Load(e),
        }
    }
}
