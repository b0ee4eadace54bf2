// ABOUTME: Syntax tree consumed by the renderer, as produced by an external parser
// ABOUTME: Plain serde-friendly node types plus fluent constructors for building trees in code

pub mod error;
mod path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

pub use error::TreeError;
pub use path::PathExpr;

/// A sequence of nodes: a whole template or the body of a block.
///
/// Enum nodes are written as single-key maps (`text: "..."`, `block: {...}`)
/// in both JSON and YAML documents.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Template {
    pub nodes: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Node {
    Text(String),
    Mustache(Mustache),
    Block(Block),
    Partial(Partial),
}

/// `{{head params... key=value...}}`, or `{{{...}}}` when not escaped
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mustache {
    pub head: PathExpr,
    #[serde(default)]
    pub params: Vec<Expr>,
    #[serde(default)]
    pub hash: IndexMap<String, Expr>,
    #[serde(default = "default_escaped")]
    pub escaped: bool,
}

/// `{{#head ...}}body{{^}}inverse{{/head}}` or a raw `{{{{head}}}}text{{{{/head}}}}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub head: PathExpr,
    #[serde(default)]
    pub params: Vec<Expr>,
    #[serde(default)]
    pub hash: IndexMap<String, Expr>,
    pub body: Body,
    #[serde(default)]
    pub inverse: Option<Template>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Body {
    Template(Template),
    /// Unparsed source text of a raw block
    Raw(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Partial {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Expr {
    Path(PathExpr),
    Literal(Literal),
    SubExpr(Box<SubExpr>),
}

/// Literal parameter with its kind decided at parse time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Literal {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Null,
}

/// `(head params... key=value...)` used as an argument
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubExpr {
    pub head: PathExpr,
    #[serde(default)]
    pub params: Vec<Expr>,
    #[serde(default)]
    pub hash: IndexMap<String, Expr>,
}

fn default_escaped() -> bool {
    true
}

impl Template {
    pub fn new(nodes: Vec<Node>) -> Self {
        Self { nodes }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Read a tree from YAML, accepting the same single-key map form as JSON
    /// rather than YAML `!tag` enums
    pub fn from_yaml_str(yaml: &str) -> error::Result<Self> {
        let deserializer = serde_yaml::Deserializer::from_str(yaml);
        Ok(serde_yaml::with::singleton_map_recursive::deserialize(
            deserializer,
        )?)
    }

    /// Write the tree as YAML in the single-key map form
    pub fn to_yaml_string(&self) -> error::Result<String> {
        let mut buffer = Vec::new();
        {
            let mut serializer = serde_yaml::Serializer::new(&mut buffer);
            serde_yaml::with::singleton_map_recursive::serialize(self, &mut serializer)?;
        }
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }

    pub fn from_json_str(json: &str) -> error::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl From<Vec<Node>> for Template {
    fn from(nodes: Vec<Node>) -> Self {
        Self::new(nodes)
    }
}

impl Node {
    pub fn text(text: impl Into<String>) -> Self {
        Node::Text(text.into())
    }

    /// Escaped `{{path}}` with no arguments
    pub fn expr(head: impl Into<PathExpr>) -> Self {
        Node::Mustache(Mustache::new(head))
    }

    pub fn partial(name: impl Into<String>) -> Self {
        Node::Partial(Partial { name: name.into() })
    }
}

impl Mustache {
    pub fn new(head: impl Into<PathExpr>) -> Self {
        Self {
            head: head.into(),
            params: Vec::new(),
            hash: IndexMap::new(),
            escaped: true,
        }
    }

    pub fn param(mut self, expr: impl Into<Expr>) -> Self {
        self.params.push(expr.into());
        self
    }

    pub fn hash(mut self, key: impl Into<String>, expr: impl Into<Expr>) -> Self {
        self.hash.insert(key.into(), expr.into());
        self
    }

    /// Triple-stash form: output is not escaped
    pub fn unescaped(mut self) -> Self {
        self.escaped = false;
        self
    }
}

impl Block {
    pub fn new(head: impl Into<PathExpr>) -> Self {
        Self {
            head: head.into(),
            params: Vec::new(),
            hash: IndexMap::new(),
            body: Body::Template(Template::default()),
            inverse: None,
        }
    }

    /// A raw block whose body is handed over verbatim
    pub fn raw(head: impl Into<PathExpr>, text: impl Into<String>) -> Self {
        Self {
            body: Body::Raw(text.into()),
            ..Self::new(head)
        }
    }

    pub fn param(mut self, expr: impl Into<Expr>) -> Self {
        self.params.push(expr.into());
        self
    }

    pub fn hash(mut self, key: impl Into<String>, expr: impl Into<Expr>) -> Self {
        self.hash.insert(key.into(), expr.into());
        self
    }

    pub fn body(mut self, nodes: Vec<Node>) -> Self {
        self.body = Body::Template(Template::new(nodes));
        self
    }

    pub fn inverse(mut self, nodes: Vec<Node>) -> Self {
        self.inverse = Some(Template::new(nodes));
        self
    }

    pub fn is_raw(&self) -> bool {
        matches!(self.body, Body::Raw(_))
    }
}

impl SubExpr {
    pub fn new(head: impl Into<PathExpr>) -> Self {
        Self {
            head: head.into(),
            params: Vec::new(),
            hash: IndexMap::new(),
        }
    }

    pub fn param(mut self, expr: impl Into<Expr>) -> Self {
        self.params.push(expr.into());
        self
    }

    pub fn hash(mut self, key: impl Into<String>, expr: impl Into<Expr>) -> Self {
        self.hash.insert(key.into(), expr.into());
        self
    }
}

impl Expr {
    pub fn path(path: impl Into<PathExpr>) -> Self {
        Expr::Path(path.into())
    }

    pub fn string(s: impl Into<String>) -> Self {
        Expr::Literal(Literal::String(s.into()))
    }

    pub fn int(i: i64) -> Self {
        Expr::Literal(Literal::Integer(i))
    }

    pub fn float(f: f64) -> Self {
        Expr::Literal(Literal::Float(f))
    }

    pub fn bool(b: bool) -> Self {
        Expr::Literal(Literal::Boolean(b))
    }

    pub fn null() -> Self {
        Expr::Literal(Literal::Null)
    }
}

impl From<Mustache> for Node {
    fn from(mustache: Mustache) -> Self {
        Node::Mustache(mustache)
    }
}

impl From<Block> for Node {
    fn from(block: Block) -> Self {
        Node::Block(block)
    }
}

impl From<PathExpr> for Expr {
    fn from(path: PathExpr) -> Self {
        Expr::Path(path)
    }
}

impl From<Literal> for Expr {
    fn from(literal: Literal) -> Self {
        Expr::Literal(literal)
    }
}

impl From<SubExpr> for Expr {
    fn from(sub: SubExpr) -> Self {
        Expr::SubExpr(Box::new(sub))
    }
}
