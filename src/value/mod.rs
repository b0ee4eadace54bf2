// ABOUTME: Runtime value model for template-visible data
// ABOUTME: Closed set of variants with literal-kind aware numbers and opaque helper values

mod convert;

use indexmap::IndexMap;
use std::fmt;
use std::sync::Arc;

use crate::helpers::Helper;

/// Keyed mapping used for context objects, hashes and private data.
pub type Map = IndexMap<String, Value>;

/// A template-visible value.
///
/// Integers and floats are kept apart so helpers can tell `-12` from `-1.2`.
/// `Absent` is what a failed lookup produces; `Null` is an explicit null coming
/// from the data or a literal.
#[derive(Debug, Clone, Default)]
pub enum Value {
    #[default]
    Absent,
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    Sequence(Vec<Value>),
    Mapping(Map),
    Helper(Arc<Helper>),
}

impl Value {
    /// Wrap a helper so it can live inside a context ("pathed lambda")
    pub fn helper(helper: Helper) -> Self {
        Value::Helper(Arc::new(helper))
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Value::Absent)
    }

    /// Absent, null, false, zero, empty strings and empty collections are falsy
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Absent | Value::Null => false,
            Value::Bool(b) => *b,
            Value::Integer(i) => *i != 0,
            Value::Float(f) => *f != 0.0 && !f.is_nan(),
            Value::String(s) => !s.is_empty(),
            Value::Sequence(items) => !items.is_empty(),
            Value::Mapping(map) => !map.is_empty(),
            Value::Helper(_) => true,
        }
    }

    /// Short name of the variant, used in diagnostics
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Absent => "absent",
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::Sequence(_) => "sequence",
            Value::Mapping(_) => "mapping",
            Value::Helper(_) => "helper",
        }
    }

    /// Text form used when a value lands in the output
    pub fn render(&self) -> String {
        match self {
            Value::Absent | Value::Null | Value::Helper(_) => String::new(),
            Value::Bool(b) => b.to_string(),
            Value::Integer(i) => i.to_string(),
            Value::Float(f) => f.to_string(),
            Value::String(s) => s.clone(),
            Value::Sequence(items) => items.iter().map(Value::render).collect(),
            Value::Mapping(_) => "[object Object]".to_string(),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[Value]> {
        match self {
            Value::Sequence(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&Map> {
        match self {
            Value::Mapping(map) => Some(map),
            _ => None,
        }
    }

    /// Look up one path segment: a mapping key or a sequence index
    pub fn get(&self, segment: &str) -> Option<&Value> {
        match self {
            Value::Mapping(map) => map.get(segment),
            Value::Sequence(items) => {
                let canonical = !segment.is_empty()
                    && segment.bytes().all(|b| b.is_ascii_digit())
                    && (segment == "0" || !segment.starts_with('0'));
                if !canonical {
                    return None;
                }
                segment.parse::<usize>().ok().and_then(|i| items.get(i))
            }
            _ => None,
        }
    }

    /// Follow the remaining segments of a path, yielding `Absent` on any miss
    pub fn get_path<S: AsRef<str>>(&self, segments: &[S]) -> Value {
        let mut current = self;
        for (position, segment) in segments.iter().enumerate() {
            let segment = segment.as_ref();
            match current.get(segment) {
                Some(next) => current = next,
                None => {
                    let is_last = position + 1 == segments.len();
                    return match current {
                        Value::Sequence(items) if is_last && segment == "length" => {
                            Value::from(items.len())
                        }
                        _ => Value::Absent,
                    };
                }
            }
        }
        current.clone()
    }

    /// Dotted (or slash separated) property lookup, e.g. `"author.name"`
    pub fn lookup(&self, dotted: &str) -> Value {
        let segments: Vec<&str> = dotted
            .split(['.', '/'])
            .filter(|segment| !segment.is_empty())
            .collect();
        self.get_path(&segments)
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Absent, Value::Absent) | (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Sequence(a), Value::Sequence(b)) => a == b,
            (Value::Mapping(a), Value::Mapping(b)) => a == b,
            (Value::Helper(a), Value::Helper(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
