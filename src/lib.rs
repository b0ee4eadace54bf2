// ABOUTME: Main library module for the mustachio template rendering engine
// ABOUTME: Exports the syntax tree, value model, helpers, scope chains and renderer

pub mod ast;
pub mod engine;
pub mod helpers;
pub mod render;
pub mod scope;
pub mod value;

// Re-export commonly used types
pub use ast::{
    Block, Body, Expr, Literal, Mustache, Node, Partial, PathExpr, SubExpr, Template, TreeError,
};
pub use engine::{ConfigError, Engine, EngineConfig};
pub use helpers::{
    FromValue, Helper, HelperEntry, HelperRegistry, HelperResult, ParamKind, RegistryError,
    Signature,
};
pub use render::{render, render_with_data, EscapePolicy, Hash, Options, RenderError};
pub use scope::DataFrame;
pub use value::{Map, Value};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
