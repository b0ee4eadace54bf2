// ABOUTME: Helper functions: typed signatures, the registry and the built-in helpers
// ABOUTME: Helpers are plain Send + Sync closures shared read-only across render calls

pub mod builtins;
pub mod error;
mod helper;
pub mod registry;
mod signature;

pub use error::RegistryError;
pub(crate) use helper::CallError;
pub use helper::{Helper, HelperResult};
pub use registry::{HelperEntry, HelperRegistry};
pub use signature::{FromValue, ParamKind, Signature};
