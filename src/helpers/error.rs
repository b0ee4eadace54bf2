// ABOUTME: Error types for helper registration
// ABOUTME: Signature faults are reported when a helper is registered, not when it is first used

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("Helper name must not be empty")]
    EmptyName,

    #[error("Invalid helper name '{name}': names may not contain whitespace")]
    InvalidName { name: String },

    #[error("Raw helper '{name}' must declare an options parameter to receive its body")]
    RawWithoutOptions { name: String },
}

pub type Result<T> = std::result::Result<T, RegistryError>;
