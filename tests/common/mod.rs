// ABOUTME: Common utilities and helpers for integration tests
// ABOUTME: Provides tree shorthands, an engine fixture and the helpers shared across test files

#![allow(dead_code)]

use serde_json::Value as JsonValue;

use mustachio::{Engine, EngineConfig, Helper, HelperResult, Node, Options, Template, Value};

/// Build a plain engine (no built-ins) with the given helpers registered
pub fn engine_with(helpers: Vec<(&str, Helper)>) -> Engine {
    let config = EngineConfig {
        builtin_helpers: false,
        ..EngineConfig::default()
    };
    let mut engine = Engine::with_config(config).unwrap();
    for (name, helper) in helpers {
        engine.register_helper(name, helper).unwrap();
    }
    engine
}

/// Render a list of nodes against a JSON context, panicking on render errors
pub fn render(engine: &Engine, nodes: Vec<Node>, context: JsonValue) -> String {
    engine
        .render_json(&Template::new(nodes), &context)
        .unwrap_or_else(|e| panic!("render failed: {}", e))
}

/// Render against a native value, for contexts holding helper values
pub fn render_value(engine: &Engine, nodes: Vec<Node>, context: Value) -> String {
    engine
        .render(&Template::new(nodes), &context)
        .unwrap_or_else(|e| panic!("render failed: {}", e))
}

pub fn text(text: &str) -> Node {
    Node::text(text)
}

pub fn var(path: &str) -> Node {
    Node::expr(path)
}

/// Native mapping from key/value pairs
pub fn mapping(entries: Vec<(&str, Value)>) -> Value {
    Value::Mapping(
        entries
            .into_iter()
            .map(|(key, value)| (key.to_string(), value))
            .collect(),
    )
}

pub fn link_helper(prefix: String, options: &Options) -> HelperResult {
    Ok(format!(
        r#"<a href="{}/{}">{}</a>"#,
        prefix,
        options.value_str("url"),
        options.value_str("text")
    ))
}

pub fn raw_helper(options: &Options) -> HelperResult {
    Ok(options.render_body()?)
}

pub fn raw_three_helper(a: String, b: String, c: String, options: &Options) -> HelperResult {
    Ok(options.render_body()? + &a + &b + &c)
}

pub fn form_helper(options: &Options) -> HelperResult {
    Ok(format!("<form>{}</form>", options.render_body()?))
}

pub fn form_ctx_helper(context: Value, options: &Options) -> HelperResult {
    Ok(format!("<form>{}</form>", options.render_body_with(context)?))
}

pub fn list_helper(context: Value, options: &Options) -> HelperResult {
    if let Some(items) = context.as_sequence().filter(|items| !items.is_empty()) {
        let mut result = String::from("<ul>");
        for item in items {
            result.push_str("<li>");
            result.push_str(&options.render_body_with(item.clone())?);
            result.push_str("</li>");
        }
        result.push_str("</ul>");
        return Ok(result);
    }

    Ok(format!("<p>{}</p>", options.render_inverse()?))
}

pub fn detect_data_helper(options: &Options) -> HelperResult {
    Ok(options
        .data_frame()
        .get("exclaim")
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_default())
}
