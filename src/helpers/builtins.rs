// ABOUTME: Built-in block and lookup helpers registered on every default engine
// ABOUTME: Implements if, unless, each, with, lookup and log on top of the Options contract

use tracing::{debug, error, info, trace, warn};

use super::error::Result;
use super::helper::{Helper, HelperResult};
use super::registry::HelperRegistry;
use crate::render::Options;
use crate::scope::DataFrame;
use crate::value::Value;

/// Conditional block. With `includeZero=true` a numeric zero counts as true.
fn if_helper(condition: Value, options: &Options) -> HelperResult {
    let include_zero = options.hash_bool("includeZero");
    let zero = condition.as_f64() == Some(0.0);

    if condition.is_truthy() || (include_zero && zero) {
        Ok(options.render_body()?)
    } else {
        Ok(options.render_inverse()?)
    }
}

fn unless_helper(condition: Value, options: &Options) -> HelperResult {
    if condition.is_truthy() {
        Ok(options.render_inverse()?)
    } else {
        Ok(options.render_body()?)
    }
}

/// Iterate a sequence or mapping, exposing `@index`, `@first`, `@last`
/// and, for mappings, `@key` to the body.
fn each_helper(items: Value, options: &Options) -> HelperResult {
    let mut output = String::new();

    match items {
        Value::Sequence(elements) if !elements.is_empty() => {
            let len = elements.len();
            for (index, element) in elements.into_iter().enumerate() {
                let data = DataFrame::for_iteration(index, len);
                output.push_str(&options.render_body_with_data(element, data)?);
            }
        }
        Value::Mapping(entries) if !entries.is_empty() => {
            let len = entries.len();
            for (index, (key, element)) in entries.into_iter().enumerate() {
                let data = DataFrame::for_iteration(index, len).with("key", key);
                output.push_str(&options.render_body_with_data(element, data)?);
            }
        }
        _ => return Ok(options.render_inverse()?),
    }

    Ok(output)
}

fn with_helper(context: Value, options: &Options) -> HelperResult {
    if context.is_truthy() {
        Ok(options.render_body_with(context)?)
    } else {
        Ok(options.render_inverse()?)
    }
}

/// `lookup obj key`: index into a value by a dynamic key
fn lookup_helper(target: Value, key: Value) -> HelperResult {
    Ok(target
        .get(&key.render())
        .map(Value::render)
        .unwrap_or_default())
}

/// Emit a message through tracing at the level named by `level` (default info)
fn log_helper(message: Value, options: &Options) -> HelperResult {
    let message = message.render();
    match options.hash_str("level").to_lowercase().as_str() {
        "trace" => trace!(target: "mustachio::log", "{}", message),
        "debug" => debug!(target: "mustachio::log", "{}", message),
        "warn" => warn!(target: "mustachio::log", "{}", message),
        "error" => error!(target: "mustachio::log", "{}", message),
        _ => info!(target: "mustachio::log", "{}", message),
    }
    Ok(String::new())
}

/// Register all built-in helpers
pub fn register_builtins(registry: &mut HelperRegistry) -> Result<()> {
    registry.register("if", Helper::unary_block(if_helper))?;
    registry.register("unless", Helper::unary_block(unless_helper))?;
    registry.register("each", Helper::unary_block(each_helper))?;
    registry.register("with", Helper::unary_block(with_helper))?;
    registry.register("lookup", Helper::binary(lookup_helper))?;
    registry.register("log", Helper::unary_block(log_helper))?;

    Ok(())
}
