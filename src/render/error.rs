// ABOUTME: Error types raised while rendering a syntax tree
// ABOUTME: Unresolved paths are never errors; only helper faults and misuse abort a render

use thiserror::Error;

use crate::helpers::ParamKind;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Helper '{name}' failed: {source}")]
    HelperFailed {
        name: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("Helper '{name}' expects {expected} positional parameter(s), found {found}")]
    ArityMismatch {
        name: String,
        expected: usize,
        found: usize,
    },

    #[error("Helper '{name}' parameter {index} expects {expected}, found {found}")]
    ParamType {
        name: String,
        index: usize,
        expected: ParamKind,
        found: &'static str,
    },

    #[error("Raw helper '{name}' can only be used as a raw block")]
    RawHelperMisuse { name: String },

    #[error("Helper '{name}' is not registered as raw and cannot take a raw block")]
    RawBodyRejected { name: String },

    #[error("Partial '{name}' cannot be rendered: partials are not supported")]
    UnsupportedPartial { name: String },
}

pub type Result<T> = std::result::Result<T, RenderError>;
