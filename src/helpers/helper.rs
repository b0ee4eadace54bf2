// ABOUTME: Helper function values and the typed adapters that build them
// ABOUTME: Each constructor records an explicit signature and converts arguments by position

use std::fmt;

use super::signature::{FromValue, ParamKind, Signature};
use crate::render::Options;
use crate::value::Value;

/// What a helper body returns: rendered text or a failure
pub type HelperResult = anyhow::Result<String>;

/// Failure raised while calling through a typed adapter
#[derive(Debug)]
pub(crate) enum CallError {
    Param {
        index: usize,
        expected: ParamKind,
        found: &'static str,
    },
    Failed(anyhow::Error),
}

type Callback = dyn Fn(&[Value], &Options<'_>) -> Result<String, CallError> + Send + Sync;

/// A callable extension with a declared signature.
///
/// ```
/// use mustachio::{Helper, Options};
///
/// let echo = Helper::unary(|text: String| Ok(text));
/// let form = Helper::block(|options: &Options| {
///     Ok(format!("<form>{}</form>", options.render_body()?))
/// });
/// assert_eq!(echo.signature().arity(), 1);
/// assert!(form.signature().takes_options());
/// ```
pub struct Helper {
    signature: Signature,
    callback: Box<Callback>,
}

fn arg<A: FromValue>(args: &[Value], index: usize) -> Result<A, CallError> {
    let value = args.get(index).cloned().unwrap_or_default();
    let found = value.type_name();
    A::from_value(value).ok_or(CallError::Param {
        index,
        expected: A::KIND,
        found,
    })
}

impl Helper {
    fn from_parts<F>(signature: Signature, callback: F) -> Self
    where
        F: Fn(&[Value], &Options<'_>) -> Result<String, CallError> + Send + Sync + 'static,
    {
        Self {
            signature,
            callback: Box::new(callback),
        }
    }

    pub fn nullary<F>(f: F) -> Self
    where
        F: Fn() -> HelperResult + Send + Sync + 'static,
    {
        Self::from_parts(Signature::new(Vec::new(), false), move |_, _| {
            f().map_err(CallError::Failed)
        })
    }

    pub fn unary<A, F>(f: F) -> Self
    where
        A: FromValue,
        F: Fn(A) -> HelperResult + Send + Sync + 'static,
    {
        Self::from_parts(Signature::new(vec![A::KIND], false), move |args, _| {
            f(arg(args, 0)?).map_err(CallError::Failed)
        })
    }

    pub fn binary<A, B, F>(f: F) -> Self
    where
        A: FromValue,
        B: FromValue,
        F: Fn(A, B) -> HelperResult + Send + Sync + 'static,
    {
        Self::from_parts(Signature::new(vec![A::KIND, B::KIND], false), move |args, _| {
            f(arg(args, 0)?, arg(args, 1)?).map_err(CallError::Failed)
        })
    }

    pub fn ternary<A, B, C, F>(f: F) -> Self
    where
        A: FromValue,
        B: FromValue,
        C: FromValue,
        F: Fn(A, B, C) -> HelperResult + Send + Sync + 'static,
    {
        let signature = Signature::new(vec![A::KIND, B::KIND, C::KIND], false);
        Self::from_parts(signature, move |args, _| {
            f(arg(args, 0)?, arg(args, 1)?, arg(args, 2)?).map_err(CallError::Failed)
        })
    }

    /// No positional parameters, Options only
    pub fn block<F>(f: F) -> Self
    where
        F: Fn(&Options<'_>) -> HelperResult + Send + Sync + 'static,
    {
        Self::from_parts(Signature::new(Vec::new(), true), move |_, options| {
            f(options).map_err(CallError::Failed)
        })
    }

    pub fn unary_block<A, F>(f: F) -> Self
    where
        A: FromValue,
        F: Fn(A, &Options<'_>) -> HelperResult + Send + Sync + 'static,
    {
        Self::from_parts(Signature::new(vec![A::KIND], true), move |args, options| {
            f(arg(args, 0)?, options).map_err(CallError::Failed)
        })
    }

    pub fn binary_block<A, B, F>(f: F) -> Self
    where
        A: FromValue,
        B: FromValue,
        F: Fn(A, B, &Options<'_>) -> HelperResult + Send + Sync + 'static,
    {
        Self::from_parts(Signature::new(vec![A::KIND, B::KIND], true), move |args, options| {
            f(arg(args, 0)?, arg(args, 1)?, options).map_err(CallError::Failed)
        })
    }

    pub fn ternary_block<A, B, C, F>(f: F) -> Self
    where
        A: FromValue,
        B: FromValue,
        C: FromValue,
        F: Fn(A, B, C, &Options<'_>) -> HelperResult + Send + Sync + 'static,
    {
        let signature = Signature::new(vec![A::KIND, B::KIND, C::KIND], true);
        Self::from_parts(signature, move |args, options| {
            f(arg(args, 0)?, arg(args, 1)?, arg(args, 2)?, options).map_err(CallError::Failed)
        })
    }

    /// Any number of parameters described by `signature`. Arguments arrive
    /// already coerced to the declared kinds.
    pub fn with_signature<F>(signature: Signature, f: F) -> Self
    where
        F: Fn(&[Value], &Options<'_>) -> HelperResult + Send + Sync + 'static,
    {
        let kinds = signature.params().to_vec();
        Self::from_parts(signature, move |args, options| {
            let mut coerced = Vec::with_capacity(kinds.len());
            for (index, kind) in kinds.iter().enumerate() {
                let value = args.get(index).cloned().unwrap_or_default();
                let found = value.type_name();
                let value = kind.coerce(value).ok_or(CallError::Param {
                    index,
                    expected: *kind,
                    found,
                })?;
                coerced.push(value);
            }
            f(&coerced, options).map_err(CallError::Failed)
        })
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    pub(crate) fn call(&self, options: &Options<'_>) -> Result<String, CallError> {
        (self.callback)(options.params(), options)
    }
}

impl fmt::Debug for Helper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Helper")
            .field("signature", &self.signature)
            .finish_non_exhaustive()
    }
}
