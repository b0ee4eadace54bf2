// ABOUTME: Name-to-helper registry consulted by the renderer for call-site heads
// ABOUTME: Populated before rendering and shared read-only across concurrent render calls

use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

use super::builtins;
use super::error::{RegistryError, Result};
use super::helper::Helper;

/// A registered helper with its name and raw-block flag
#[derive(Debug, Clone)]
pub struct HelperEntry {
    name: String,
    helper: Arc<Helper>,
    raw: bool,
}

impl HelperEntry {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn helper(&self) -> &Helper {
        &self.helper
    }

    /// Raw helpers receive their block body as literal text
    pub fn is_raw(&self) -> bool {
        self.raw
    }
}

#[derive(Debug, Clone, Default)]
pub struct HelperRegistry {
    entries: HashMap<String, HelperEntry>,
}

impl HelperRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the built-in helpers (`if`, `unless`, `each`, ...)
    pub fn with_builtins() -> Result<Self> {
        let mut registry = Self::new();
        builtins::register_builtins(&mut registry)?;
        Ok(registry)
    }

    /// Register a helper, replacing any previous helper of the same name
    pub fn register(&mut self, name: &str, helper: Helper) -> Result<()> {
        self.insert(name, helper, false)
    }

    /// Register a helper for raw blocks. It must declare an options parameter.
    pub fn register_raw(&mut self, name: &str, helper: Helper) -> Result<()> {
        if !helper.signature().takes_options() {
            return Err(RegistryError::RawWithoutOptions {
                name: name.to_string(),
            });
        }
        self.insert(name, helper, true)
    }

    fn insert(&mut self, name: &str, helper: Helper, raw: bool) -> Result<()> {
        if name.is_empty() {
            return Err(RegistryError::EmptyName);
        }
        if name.chars().any(char::is_whitespace) {
            return Err(RegistryError::InvalidName {
                name: name.to_string(),
            });
        }

        debug!(
            "Registering helper '{}' with signature {}{}",
            name,
            helper.signature(),
            if raw { " (raw)" } else { "" }
        );

        let entry = HelperEntry {
            name: name.to_string(),
            helper: Arc::new(helper),
            raw,
        };
        if self.entries.insert(name.to_string(), entry).is_some() {
            warn!("Helper '{}' replaced an existing registration", name);
        }
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&HelperEntry> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn unregister(&mut self, name: &str) -> Option<HelperEntry> {
        self.entries.remove(name)
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
