//! Error types for scaffolding and persistence.

use thiserror::Error;

/// Errors raised while converting, generating or saving a procedure model.
#[derive(Debug, Error)]
pub enum ScaffoldError {
    /// A caller supplied an argument the scaffolder cannot work with
    #[error("invalid argument `{argument}`: {reason}")]
    InvalidArgument {
        argument: &'static str,
        reason: String,
    },

    /// The procedure model breaks one of its own invariants
    #[error("invalid procedure model: {0}")]
    InvalidModel(String),

    /// A store type could not be tokenized
    #[error("malformed store type `{store_type}`: {reason}")]
    StoreType { store_type: String, reason: String },

    /// The type resolver has no mapping for a store type
    #[error("no CLR type mapping for store type `{0}`")]
    UnsupportedType(String),

    /// Two procedures produce the same generated identifier
    #[error("procedures `{first}` and `{second}` both scaffold to `{identifier}`")]
    NameCollision {
        identifier: String,
        first: String,
        second: String,
    },

    #[error("invalid scaffolder options: {0}")]
    Options(#[from] serde_json::Error),

    #[error("failed to decode request: {0}")]
    Decode(#[from] prost::DecodeError),

    #[error("failed to encode response: {0}")]
    Encode(#[from] prost::EncodeError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ScaffoldError {
    pub(crate) fn invalid_argument(argument: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            argument,
            reason: reason.into(),
        }
    }
}

pub type Result<T, E = ScaffoldError> = std::result::Result<T, E>;
