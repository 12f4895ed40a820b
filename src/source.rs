//! Declaring source locations.
//!
//! Every [`crate::resource::Value`] and every [`crate::resource::Symbol`] remembers where it
//! was declared so that collisions and id conflicts can point at both offending definitions.

use std::fmt;

/// A location in a resource-definition input: a path and an optional 1-based line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Source {
    /// Path of the declaring input, as given by the caller
    pub path: String,
    /// Optional line within the input
    pub line: Option<usize>,
}

impl Source {
    /// Creates a source pointing at a whole file.
    pub fn new(path: impl Into<String>) -> Self {
        Source {
            path: path.into(),
            line: None,
        }
    }

    /// Returns a copy of this source pointing at the given line.
    #[must_use]
    pub fn with_line(&self, line: usize) -> Self {
        Source {
            path: self.path.clone(),
            line: Some(line),
        }
    }
}

impl From<&str> for Source {
    fn from(path: &str) -> Self {
        Source::new(path)
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "{}:{}", self.path, line),
            None => write!(f, "{}", self.path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_display() {
        let source = Source::new("res/values/strings.xml");
        assert_eq!(source.to_string(), "res/values/strings.xml");
        assert_eq!(source.with_line(12).to_string(), "res/values/strings.xml:12");
    }
}
