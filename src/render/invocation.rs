// ABOUTME: Call-site dispatch: decides whether a head names a helper and invokes it
// ABOUTME: Evaluates positional and hash arguments with their literal kinds preserved

use indexmap::IndexMap;
use std::sync::Arc;
use tracing::trace;

use crate::ast::{Expr, Literal, PathExpr, SubExpr, Template};
use crate::helpers::{CallError, Helper, HelperEntry};
use crate::scope::Cursor;
use crate::value::Value;

use super::error::{RenderError, Result};
use super::options::{BodyRef, Hash, Options};
use super::renderer::Renderer;

/// Helper selected for a call site
pub(crate) enum Callee<'r> {
    Registered(&'r HelperEntry),
    /// Helper-function value found in the context (`{{./helper 1}}`, `{{hash/helper 1}}`)
    Lambda { name: String, helper: Arc<Helper> },
}

impl Callee<'_> {
    pub fn name(&self) -> &str {
        match self {
            Callee::Registered(entry) => entry.name(),
            Callee::Lambda { name, .. } => name.as_str(),
        }
    }

    pub fn helper(&self) -> &Helper {
        match self {
            Callee::Registered(entry) => entry.helper(),
            Callee::Lambda { helper, .. } => helper.as_ref(),
        }
    }

    pub fn is_raw(&self) -> bool {
        matches!(self, Callee::Registered(entry) if entry.is_raw())
    }
}

/// What the head of a mustache, block or sub-expression refers to
pub(crate) enum Head<'r> {
    Helper(Callee<'r>),
    Value(Value),
}

/// Call-site arguments that stay unevaluated until the helper is invoked
pub(crate) struct CallSite<'a> {
    pub params: &'a [Expr],
    pub hash: &'a IndexMap<String, Expr>,
    pub body: Option<BodyRef<'a>>,
    pub inverse: Option<&'a Template>,
}

impl<'r> Renderer<'r> {
    /// Registered helpers win for bare single-segment heads. Scoped, parent and
    /// data paths always resolve against the scope chains.
    pub(crate) fn resolve_head(&self, cursor: Cursor, head: &PathExpr) -> Head<'r> {
        if let Some(entry) = head.helper_name().and_then(|name| self.registry.get(name)) {
            trace!(helper = entry.name(), "head resolved to registered helper");
            return Head::Helper(Callee::Registered(entry));
        }

        match self.resolve(cursor, head) {
            Value::Helper(helper) => {
                trace!(path = %head, "head resolved to helper value in context");
                Head::Helper(Callee::Lambda {
                    name: head.to_string(),
                    helper,
                })
            }
            value => Head::Value(value),
        }
    }

    pub(crate) fn eval_expr(&self, cursor: Cursor, expr: &Expr) -> Result<Value> {
        match expr {
            Expr::Path(path) => Ok(self.resolve(cursor, path)),
            Expr::Literal(literal) => Ok(literal_value(literal)),
            Expr::SubExpr(sub) => self.eval_subexpr(cursor, sub),
        }
    }

    fn eval_subexpr(&self, cursor: Cursor, sub: &SubExpr) -> Result<Value> {
        match self.resolve_head(cursor, &sub.head) {
            Head::Helper(callee) => {
                if callee.is_raw() {
                    return Err(RenderError::RawHelperMisuse {
                        name: callee.name().to_string(),
                    });
                }
                let site = CallSite {
                    params: &sub.params,
                    hash: &sub.hash,
                    body: None,
                    inverse: None,
                };
                self.invoke(cursor, &callee, site).map(Value::String)
            }
            Head::Value(value) => Ok(value),
        }
    }

    fn eval_params(&self, cursor: Cursor, params: &[Expr]) -> Result<Vec<Value>> {
        params
            .iter()
            .map(|expr| self.eval_expr(cursor, expr))
            .collect()
    }

    fn eval_hash(&self, cursor: Cursor, hash: &IndexMap<String, Expr>) -> Result<Hash> {
        let mut evaluated = Hash::with_capacity(hash.len());
        for (key, expr) in hash {
            evaluated.insert(key.clone(), self.eval_expr(cursor, expr)?);
        }
        Ok(evaluated)
    }

    /// Check arity, evaluate arguments, build Options and call the helper
    pub(crate) fn invoke<'a>(
        &'a self,
        cursor: Cursor,
        callee: &Callee<'_>,
        site: CallSite<'a>,
    ) -> Result<String> {
        let name = callee.name();
        let helper = callee.helper();
        let expected = helper.signature().arity();
        if site.params.len() != expected {
            return Err(RenderError::ArityMismatch {
                name: name.to_string(),
                expected,
                found: site.params.len(),
            });
        }

        let params = self.eval_params(cursor, site.params)?;
        let hash = self.eval_hash(cursor, site.hash)?;
        trace!(helper = name, params = params.len(), hash = hash.len(), "invoking helper");

        let options = Options::new(
            self,
            name.to_string(),
            cursor,
            params,
            hash,
            site.body,
            site.inverse,
        );

        helper.call(&options).map_err(|err| match err {
            CallError::Param {
                index,
                expected,
                found,
            } => RenderError::ParamType {
                name: name.to_string(),
                index,
                expected,
                found,
            },
            CallError::Failed(source) => match source.downcast::<RenderError>() {
                Ok(inner) => inner,
                Err(source) => RenderError::HelperFailed {
                    name: name.to_string(),
                    source,
                },
            },
        })
    }
}

fn literal_value(literal: &Literal) -> Value {
    match literal {
        Literal::String(s) => Value::String(s.clone()),
        Literal::Integer(i) => Value::Integer(*i),
        Literal::Float(f) => Value::Float(*f),
        Literal::Boolean(b) => Value::Bool(*b),
        Literal::Null => Value::Null,
    }
}
