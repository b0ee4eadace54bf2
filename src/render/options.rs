// ABOUTME: The Options object handed to helpers at each call site
// ABOUTME: Gives access to the hash, evaluated parameters, the current scope and the block bodies

use crate::ast::{PathExpr, Template};
use crate::helpers::FromValue;
use crate::scope::{Cursor, DataFrame};
use crate::value::{Map, Value};

use super::error::Result;
use super::renderer::Renderer;

/// Evaluated `key=value` arguments of one call site
pub type Hash = Map;

/// Primary body of a block call: a sub-tree, or the literal text of a raw block
#[derive(Debug, Clone, Copy)]
pub(crate) enum BodyRef<'a> {
    Template(&'a Template),
    Raw(&'a str),
}

/// Per-call bundle passed to helpers that declare an options parameter.
///
/// Bodies render against the scope that was active at the call site. Frames
/// pushed by `render_body_with` and `render_body_with_data` live only for the
/// duration of that call.
pub struct Options<'a> {
    renderer: &'a Renderer<'a>,
    name: String,
    cursor: Cursor,
    params: Vec<Value>,
    hash: Hash,
    body: Option<BodyRef<'a>>,
    inverse: Option<&'a Template>,
}

impl<'a> Options<'a> {
    pub(crate) fn new(
        renderer: &'a Renderer<'a>,
        name: String,
        cursor: Cursor,
        params: Vec<Value>,
        hash: Hash,
        body: Option<BodyRef<'a>>,
        inverse: Option<&'a Template>,
    ) -> Self {
        Self {
            renderer,
            name,
            cursor,
            params,
            hash,
            body,
            inverse,
        }
    }

    /// Name the helper was invoked under
    pub fn name(&self) -> &str {
        &self.name
    }

    /// True when invoked as a block rather than a plain mustache or sub-expression
    pub fn is_block(&self) -> bool {
        self.body.is_some()
    }

    pub fn has_inverse(&self) -> bool {
        self.inverse.is_some()
    }

    /// Render the primary body against the current scope.
    ///
    /// For a raw block this is the literal body text.
    pub fn render_body(&self) -> Result<String> {
        self.render_body_in(None, None)
    }

    /// Render the primary body with `context` pushed as the new current context
    pub fn render_body_with(&self, context: Value) -> Result<String> {
        self.render_body_in(Some(context), None)
    }

    /// Render the primary body with a new context and private data layered over
    /// the current data frame
    pub fn render_body_with_data(&self, context: Value, data: DataFrame) -> Result<String> {
        self.render_body_in(Some(context), Some(data))
    }

    /// Render the primary body in the current context with private data layered
    /// over the current data frame. `../` inside the body still reaches the real parent.
    pub fn render_body_in_data(&self, data: DataFrame) -> Result<String> {
        self.render_body_in(None, Some(data))
    }

    fn render_body_in(&self, context: Option<Value>, data: Option<DataFrame>) -> Result<String> {
        match self.body {
            Some(body) => self.renderer.render_body(self.cursor, body, context, data),
            None => Ok(String::new()),
        }
    }

    /// Render the inverse (`{{^}}`) body against the unmodified current context
    pub fn render_inverse(&self) -> Result<String> {
        self.renderer.render_inverse(self.cursor, self.inverse)
    }

    pub fn hash(&self) -> &Hash {
        &self.hash
    }

    /// Hash value in its natural type, `Absent` when missing
    pub fn hash_prop(&self, key: &str) -> Value {
        self.hash.get(key).cloned().unwrap_or_default()
    }

    pub fn hash_str(&self, key: &str) -> String {
        self.hash.get(key).map(Value::render).unwrap_or_default()
    }

    pub fn hash_bool(&self, key: &str) -> bool {
        self.hash.get(key).is_some_and(Value::is_truthy)
    }

    /// Hash value as an integer. Fractional, out-of-range and non-numeric values give 0.
    pub fn hash_int(&self, key: &str) -> i64 {
        self.hash
            .get(key)
            .cloned()
            .and_then(i64::from_value)
            .unwrap_or(0)
    }

    /// Positional argument `index` in its natural type, regardless of the declared signature
    pub fn param(&self, index: usize) -> Value {
        self.params.get(index).cloned().unwrap_or_default()
    }

    pub fn params(&self) -> &[Value] {
        &self.params
    }

    /// The current context value
    pub fn context(&self) -> Value {
        self.renderer.context_value(self.cursor)
    }

    /// Resolve `path` against the current context (`id`, `author.name`, `../title`)
    pub fn value(&self, path: &str) -> Value {
        self.renderer.resolve(self.cursor, &PathExpr::parse(path))
    }

    pub fn value_str(&self, path: &str) -> String {
        self.value(path).render()
    }

    /// Private data visible at the call site, nearest frames taking precedence
    pub fn data_frame(&self) -> DataFrame {
        self.renderer.data_snapshot(self.cursor)
    }

    /// Single private data entry, e.g. `index` for `@index`
    pub fn data(&self, key: &str) -> Value {
        self.renderer.resolve(
            self.cursor,
            &PathExpr {
                data: true,
                segments: vec![key.to_string()],
                ..PathExpr::default()
            },
        )
    }
}
