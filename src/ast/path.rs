// ABOUTME: Path expressions with up-navigation, this-rooting and private-data flags
// ABOUTME: Includes a small splitter turning "../a/b" style strings into path expressions

use serde::{Deserialize, Serialize};
use std::fmt;

/// A path reference such as `name`, `this.name`, `../prefix`, `yehuda/cat` or `@index`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PathExpr {
    /// Number of `../` steps taken before the lookup starts
    #[serde(default)]
    pub up: usize,
    /// Explicitly anchored to the context (`this`, `./`); never treated as a helper name
    #[serde(default)]
    pub scoped: bool,
    /// Private data reference (`@index`, `@root`)
    #[serde(default)]
    pub data: bool,
    #[serde(default)]
    pub segments: Vec<String>,
}

impl PathExpr {
    /// Split a path string. Accepts `.` and `/` as separators.
    pub fn parse(input: &str) -> Self {
        let mut path = PathExpr::default();
        let mut rest = input.trim();

        if let Some(stripped) = rest.strip_prefix('@') {
            path.data = true;
            rest = stripped;
        }

        loop {
            if let Some(stripped) = rest.strip_prefix("../") {
                path.up += 1;
                rest = stripped;
            } else if rest == ".." {
                path.up += 1;
                rest = "";
            } else {
                break;
            }
        }

        if rest == "this" || rest == "." {
            path.scoped = true;
            rest = "";
        } else if let Some(stripped) = rest
            .strip_prefix("this.")
            .or_else(|| rest.strip_prefix("this/"))
            .or_else(|| rest.strip_prefix("./"))
        {
            path.scoped = true;
            rest = stripped;
        }

        if path.up > 0 {
            path.scoped = true;
        }

        path.segments = rest
            .split(['.', '/'])
            .filter(|segment| !segment.is_empty())
            .map(str::to_string)
            .collect();
        path
    }

    /// The name to look up in the helper registry, if this path may name a helper
    pub fn helper_name(&self) -> Option<&str> {
        if self.scoped || self.data || self.up > 0 {
            return None;
        }
        match self.segments.as_slice() {
            [name] => Some(name.as_str()),
            _ => None,
        }
    }

    /// `this` (or `..`) with no further segments
    pub fn is_this(&self) -> bool {
        self.segments.is_empty()
    }
}

impl From<&str> for PathExpr {
    fn from(input: &str) -> Self {
        PathExpr::parse(input)
    }
}

impl fmt::Display for PathExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.data {
            f.write_str("@")?;
        }
        for _ in 0..self.up {
            f.write_str("../")?;
        }
        if self.scoped && self.up == 0 {
            if self.segments.is_empty() {
                return f.write_str("this");
            }
            f.write_str("this.")?;
        }
        f.write_str(&self.segments.join("."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bare_identifier() {
        let path = PathExpr::parse("lookup");
        assert_eq!(path.segments, vec!["lookup"]);
        assert_eq!(path.helper_name(), Some("lookup"));
        assert!(!path.scoped);
    }

    #[test]
    fn test_parse_scoped_forms() {
        for input in ["this.goodbye", "./goodbye", "this/goodbye"] {
            let path = PathExpr::parse(input);
            assert!(path.scoped, "{} should be scoped", input);
            assert_eq!(path.segments, vec!["goodbye"]);
            assert_eq!(path.helper_name(), None);
        }

        let this = PathExpr::parse("this");
        assert!(this.scoped);
        assert!(this.is_this());
    }

    #[test]
    fn test_parse_up_navigation() {
        let path = PathExpr::parse("../../prefix");
        assert_eq!(path.up, 2);
        assert!(path.scoped);
        assert_eq!(path.segments, vec!["prefix"]);

        let parent = PathExpr::parse("..");
        assert_eq!(parent.up, 1);
        assert!(parent.is_this());
    }

    #[test]
    fn test_parse_multi_segment_paths() {
        assert_eq!(PathExpr::parse("yehuda/cat").segments, vec!["yehuda", "cat"]);
        assert_eq!(PathExpr::parse("hash.helper").segments, vec!["hash", "helper"]);
        assert_eq!(PathExpr::parse("hash/helper").helper_name(), None);
    }

    #[test]
    fn test_parse_data_paths() {
        let index = PathExpr::parse("@index");
        assert!(index.data);
        assert_eq!(index.segments, vec!["index"]);

        let outer = PathExpr::parse("@../index");
        assert!(outer.data);
        assert_eq!(outer.up, 1);
    }

    #[test]
    fn test_display() {
        assert_eq!(PathExpr::parse("./helper").to_string(), "this.helper");
        assert_eq!(PathExpr::parse("../prefix").to_string(), "../prefix");
        assert_eq!(PathExpr::parse("@index").to_string(), "@index");
        assert_eq!(PathExpr::parse("this").to_string(), "this");
    }
}
