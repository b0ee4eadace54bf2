// ABOUTME: Depth-first renderer walking a syntax tree against a scope stack
// ABOUTME: Handles text, mustaches and blocks, including the default block rules for plain values

use std::cell::RefCell;
use tracing::{debug, trace};

use crate::ast::{Block, Body, Mustache, Node, PathExpr, Template};
use crate::engine::EngineConfig;
use crate::helpers::HelperRegistry;
use crate::scope::{Cursor, DataFrame, Mark, ScopeStack};
use crate::value::Value;

use super::error::{RenderError, Result};
use super::invocation::{CallSite, Head};
use super::options::BodyRef;

/// State for one top-level render call
pub struct Renderer<'r> {
    pub(super) registry: &'r HelperRegistry,
    config: &'r EngineConfig,
    stack: RefCell<ScopeStack>,
}

/// Releases frames pushed for a body once it has rendered, on every exit path
struct FrameGuard<'s> {
    stack: &'s RefCell<ScopeStack>,
    mark: Mark,
}

impl Drop for FrameGuard<'_> {
    fn drop(&mut self) {
        if let Ok(mut stack) = self.stack.try_borrow_mut() {
            stack.release(self.mark);
        }
    }
}

impl<'r> Renderer<'r> {
    pub fn new(
        registry: &'r HelperRegistry,
        config: &'r EngineConfig,
        context: Value,
        data: DataFrame,
    ) -> Self {
        Self {
            registry,
            config,
            stack: RefCell::new(ScopeStack::new(context, data)),
        }
    }

    /// Render a whole template from the root scope
    pub fn render(&self, template: &Template) -> Result<String> {
        debug!("Rendering template with {} top-level nodes", template.len());
        let output = self.render_template_at(self.root_cursor(), template)?;
        debug!("Rendered {} bytes", output.len());
        Ok(output)
    }

    pub(crate) fn root_cursor(&self) -> Cursor {
        self.stack.borrow().root_cursor()
    }

    pub(crate) fn resolve(&self, cursor: Cursor, path: &PathExpr) -> Value {
        self.stack.borrow().resolve(cursor, path)
    }

    pub(crate) fn context_value(&self, cursor: Cursor) -> Value {
        self.stack.borrow().context_value(cursor).clone()
    }

    pub(crate) fn data_snapshot(&self, cursor: Cursor) -> DataFrame {
        self.stack.borrow().data_snapshot(cursor)
    }

    fn render_template_at(&self, cursor: Cursor, template: &Template) -> Result<String> {
        let mut output = String::new();
        for node in &template.nodes {
            output.push_str(&self.render_node(cursor, node)?);
        }
        Ok(output)
    }

    fn render_node(&self, cursor: Cursor, node: &Node) -> Result<String> {
        match node {
            Node::Text(text) => Ok(text.clone()),
            Node::Mustache(mustache) => self.render_mustache(cursor, mustache),
            Node::Block(block) => self.render_block(cursor, block),
            Node::Partial(partial) => Err(RenderError::UnsupportedPartial {
                name: partial.name.clone(),
            }),
        }
    }

    fn render_mustache(&self, cursor: Cursor, mustache: &Mustache) -> Result<String> {
        let text = match self.resolve_head(cursor, &mustache.head) {
            Head::Helper(callee) => {
                if callee.is_raw() {
                    return Err(RenderError::RawHelperMisuse {
                        name: callee.name().to_string(),
                    });
                }
                let site = CallSite {
                    params: &mustache.params,
                    hash: &mustache.hash,
                    body: None,
                    inverse: None,
                };
                self.invoke(cursor, &callee, site)?
            }
            Head::Value(value) => {
                if !mustache.params.is_empty() || !mustache.hash.is_empty() {
                    trace!(path = %mustache.head, "arguments ignored: head is not a helper");
                }
                value.render()
            }
        };

        if mustache.escaped {
            Ok(self.config.escape.apply(text))
        } else {
            Ok(text)
        }
    }

    fn render_block(&self, cursor: Cursor, block: &Block) -> Result<String> {
        let body = match &block.body {
            Body::Template(template) => BodyRef::Template(template),
            Body::Raw(text) => BodyRef::Raw(text),
        };

        match self.resolve_head(cursor, &block.head) {
            Head::Helper(callee) => match (callee.is_raw(), block.is_raw()) {
                (true, false) => Err(RenderError::RawHelperMisuse {
                    name: callee.name().to_string(),
                }),
                (false, true) => Err(RenderError::RawBodyRejected {
                    name: callee.name().to_string(),
                }),
                _ => {
                    let site = CallSite {
                        params: &block.params,
                        hash: &block.hash,
                        body: Some(body),
                        inverse: block.inverse.as_ref(),
                    };
                    self.invoke(cursor, &callee, site)
                }
            },
            Head::Value(value) => {
                self.render_value_block(cursor, value, body, block.inverse.as_ref())
            }
        }
    }

    /// Block whose head is a plain value: iterate sequences, enter truthy values,
    /// fall back to the inverse otherwise
    fn render_value_block(
        &self,
        cursor: Cursor,
        value: Value,
        body: BodyRef<'_>,
        inverse: Option<&Template>,
    ) -> Result<String> {
        match value {
            Value::Sequence(items) if !items.is_empty() => {
                let len = items.len();
                let mut output = String::new();
                for (index, item) in items.into_iter().enumerate() {
                    let data = DataFrame::for_iteration(index, len);
                    output.push_str(&self.render_body(cursor, body, Some(item), Some(data))?);
                }
                Ok(output)
            }
            Value::Bool(true) => self.render_body(cursor, body, None, None),
            value if value.is_truthy() => self.render_body(cursor, body, Some(value), None),
            _ => self.render_inverse(cursor, inverse),
        }
    }

    /// Render a block body, optionally pushing a context and a data frame first.
    /// Raw bodies are returned verbatim.
    pub(crate) fn render_body(
        &self,
        cursor: Cursor,
        body: BodyRef<'_>,
        context: Option<Value>,
        data: Option<DataFrame>,
    ) -> Result<String> {
        let template = match body {
            BodyRef::Raw(text) => return Ok(text.to_string()),
            BodyRef::Template(template) => template,
        };

        if context.is_none() && data.is_none() {
            return self.render_template_at(cursor, template);
        }

        let mark = self.stack.borrow().mark();
        let _guard = FrameGuard {
            stack: &self.stack,
            mark,
        };

        let inner = {
            let mut stack = self.stack.borrow_mut();
            let mut inner = cursor;
            if let Some(context) = context {
                inner = stack.push_context(inner, context);
            }
            if let Some(data) = data {
                inner = stack.push_data(inner, data);
            }
            inner
        };

        self.render_template_at(inner, template)
    }

    pub(crate) fn render_inverse(&self, cursor: Cursor, inverse: Option<&Template>) -> Result<String> {
        match inverse {
            Some(template) => self.render_template_at(cursor, template),
            None => Ok(String::new()),
        }
    }
}

/// Render `template` against `context` with the given helpers and configuration
pub fn render(
    template: &Template,
    context: &Value,
    registry: &HelperRegistry,
    config: &EngineConfig,
) -> Result<String> {
    render_with_data(template, context, DataFrame::new(), registry, config)
}

/// Like [`render`], with initial private data visible as `@name` paths
pub fn render_with_data(
    template: &Template,
    context: &Value,
    data: DataFrame,
    registry: &HelperRegistry,
    config: &EngineConfig,
) -> Result<String> {
    Renderer::new(registry, config, context.clone(), data).render(template)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Expr;
    use crate::helpers::Helper;
    use crate::render::Options;
    use serde_json::json;

    fn render_plain(nodes: Vec<Node>, context: serde_json::Value) -> Result<String> {
        render(
            &Template::new(nodes),
            &Value::from(context),
            &HelperRegistry::new(),
            &EngineConfig::default(),
        )
    }

    #[test]
    fn test_text_and_values() {
        let output = render_plain(
            vec![Node::text("Hello "), Node::expr("name"), Node::expr("missing"), Node::text("!")],
            json!({"name": "Alan"}),
        )
        .unwrap();
        assert_eq!(output, "Hello Alan!");
    }

    #[test]
    fn test_escaping_follows_mustache_flag() {
        let context = json!({"html": "<b>'hi'</b>"});
        let escaped = render_plain(vec![Node::expr("html")], context.clone()).unwrap();
        assert_eq!(escaped, "&lt;b&gt;&apos;hi&apos;&lt;/b&gt;");

        let raw = render_plain(vec![Mustache::new("html").unescaped().into()], context).unwrap();
        assert_eq!(raw, "<b>'hi'</b>");
    }

    #[test]
    fn test_value_block_iterates_sequences() {
        let output = render_plain(
            vec![Block::new("people")
                .body(vec![Node::expr("@index"), Node::expr("name"), Node::text(" ")])
                .into()],
            json!({"people": [{"name": "Alan"}, {"name": "Yehuda"}]}),
        )
        .unwrap();
        assert_eq!(output, "0Alan 1Yehuda ");
    }

    #[test]
    fn test_value_block_inverse_uses_parent_context() {
        let block = Block::new("people")
            .body(vec![Node::text("Hello")])
            .inverse(vec![Node::expr("message")]);

        let output = render_plain(vec![block.into()], json!({"people": [], "message": "none"})).unwrap();
        assert_eq!(output, "none");
    }

    #[test]
    fn test_value_block_true_keeps_context() {
        let output = render_plain(
            vec![Block::new("flag").body(vec![Node::expr("name")]).into()],
            json!({"flag": true, "name": "Alan"}),
        )
        .unwrap();
        assert_eq!(output, "Alan");
    }

    #[test]
    fn test_raw_block_without_helper_is_literal() {
        let output = render_plain(
            vec![Block::raw("shown", " {{test}} ").into()],
            json!({"shown": "yes"}),
        )
        .unwrap();
        assert_eq!(output, " {{test}} ");
    }

    #[test]
    fn test_partial_is_unsupported() {
        let result = render_plain(vec![Node::partial("header")], json!({}));
        assert!(matches!(result, Err(RenderError::UnsupportedPartial { ref name }) if name == "header"));
    }

    #[test]
    fn test_frames_released_after_helper_error() {
        let mut registry = HelperRegistry::new();
        registry
            .register(
                "fail",
                Helper::block(|options: &Options| {
                    options.render_body_with(Value::from("inner"))?;
                    anyhow::bail!("boom")
                }),
            )
            .unwrap();
        let config = EngineConfig::default();
        let renderer = Renderer::new(&registry, &config, Value::from(json!({})), DataFrame::new());
        let template = Template::new(vec![Block::new("fail").body(vec![Node::expr("this")]).into()]);

        let result = renderer.render(&template);
        assert!(matches!(result, Err(RenderError::HelperFailed { ref name, .. }) if name == "fail"));
        assert_eq!(renderer.stack.borrow().depth(), 1);
    }

    #[test]
    fn test_subexpression_result_is_argument() {
        let mut registry = HelperRegistry::new();
        registry
            .register("upper", Helper::unary(|s: String| Ok(s.to_uppercase())))
            .unwrap();
        registry
            .register("bar", Helper::unary(|s: String| Ok(format!("bar {}", s))))
            .unwrap();

        let template = Template::new(vec![Mustache::new("bar")
            .param(Expr::from(crate::ast::SubExpr::new("upper").param(Expr::path("name"))))
            .into()]);
        let output = render(
            &template,
            &Value::from(json!({"name": "baz"})),
            &registry,
            &EngineConfig::default(),
        )
        .unwrap();
        assert_eq!(output, "bar BAZ");
    }
}
