// ABOUTME: Rendering of syntax trees: dispatch, block execution and output escaping
// ABOUTME: One Renderer per top-level call owns its scope chains; helpers see it through Options

pub mod error;
mod escape;
mod invocation;
mod options;
mod renderer;

pub use error::RenderError;
pub use escape::{escape_html, EscapePolicy};
pub use options::{Hash, Options};
pub use renderer::{render, render_with_data, Renderer};
