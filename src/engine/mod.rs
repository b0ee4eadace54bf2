// ABOUTME: Engine facade owning the helper registry and configuration
// ABOUTME: Entry point for rendering syntax trees against JSON or native values

pub mod config;

use serde_json::Value as JsonValue;
use tracing::{debug, info};

use crate::ast::Template;
use crate::helpers::{self, Helper, HelperRegistry, RegistryError};
use crate::render::{self, RenderError};
use crate::scope::DataFrame;
use crate::value::Value;

pub use config::{ConfigError, EngineConfig};

/// A configured set of helpers; rendering only borrows it, so one engine can
/// serve any number of concurrent render calls.
#[derive(Debug, Clone)]
pub struct Engine {
    registry: HelperRegistry,
    config: EngineConfig,
}

impl Engine {
    /// Create an engine with the default configuration and the built-in helpers
    pub fn new() -> helpers::error::Result<Self> {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> helpers::error::Result<Self> {
        let registry = if config.builtin_helpers {
            HelperRegistry::with_builtins()?
        } else {
            HelperRegistry::new()
        };

        info!(
            "Created template engine with {} helpers (escape: {:?})",
            registry.len(),
            config.escape
        );
        Ok(Self { registry, config })
    }

    /// Register a custom helper
    pub fn register_helper(&mut self, name: &str, helper: Helper) -> Result<(), RegistryError> {
        self.registry.register(name, helper)
    }

    /// Register a helper for raw blocks (`{{{{name}}}}...{{{{/name}}}}`)
    pub fn register_raw_helper(&mut self, name: &str, helper: Helper) -> Result<(), RegistryError> {
        self.registry.register_raw(name, helper)
    }

    pub fn registry(&self) -> &HelperRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut HelperRegistry {
        &mut self.registry
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Render a template against the given root context
    pub fn render(&self, template: &Template, context: &Value) -> Result<String, RenderError> {
        render::render(template, context, &self.registry, &self.config)
    }

    /// Render a template with a JSON root context
    pub fn render_json(&self, template: &Template, context: &JsonValue) -> Result<String, RenderError> {
        self.render(template, &Value::from(context))
    }

    /// Render with initial private data, visible to the template as `@name`
    pub fn render_with_data(
        &self,
        template: &Template,
        context: &Value,
        data: DataFrame,
    ) -> Result<String, RenderError> {
        debug!("Rendering with {} private data entries", data.len());
        render::render_with_data(template, context, data, &self.registry, &self.config)
    }
}
