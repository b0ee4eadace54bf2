// ABOUTME: Error types for syntax trees handed over as serialized documents
// ABOUTME: Wraps the YAML and JSON decoding failures of an external tree source

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TreeError {
    #[error("Failed to parse YAML syntax tree: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON syntax tree: {0}")]
    JsonError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TreeError>;
