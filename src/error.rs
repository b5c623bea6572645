//! Error types for compilation and host-data conversion.
//!
//! Compilation never stops at the first problem: every [CompileError] found
//! is collected and returned next to the (possibly partial) template, so a
//! caller can report them all at once. Rendering has no error type, missing
//! keys simply render as nothing.

use thiserror::Error;


#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    /// A close tag whose key differs from the innermost open section, or a
    /// close tag with no open section at all (`expected` is `None`).
    #[error("section {found:?} closed but {} is open", display_open(.expected))]
    MismatchedSectionClose {
        expected: Option<String>,
        found: String,
        offset: usize,
    },
    #[error("section {key:?} is not closed")]
    UnclosedSection {
        key: String,
        offset: usize,
    },
    #[error("partial {name:?} not found")]
    PartialNotFound {
        name: String,
        offset: usize,
    },
    /// `chain` lists the partials being compiled when the cycle was found,
    /// outermost first.
    #[error("partial {name:?} includes itself through {}", .chain.join(" > "))]
    PartialCycle {
        name: String,
        chain: Vec<String>,
        offset: usize,
    },
    #[error("partial {name:?} exceeds the maximum inclusion depth of {depth}")]
    PartialDepthExceeded {
        name: String,
        depth: usize,
        offset: usize,
    },
    #[error("invalid delimiters tag {tag:?}")]
    MalformedDelimiterTag {
        tag: String,
        offset: usize,
    },
    #[error("missing close delimiter")]
    UnclosedTag {
        offset: usize,
    },
    #[error("missing tag name")]
    EmptyTag {
        offset: usize,
    },
}

fn display_open(expected: &Option<String>) -> String {
    match expected {
        Some(key) => format!("{:?}", key),
        None => "no section".to_owned()
    }
}

impl CompileError {
    /// Byte offset of the offending tag in the text that was compiled.
    pub fn offset(&self) -> usize {
        match self {
            CompileError::MismatchedSectionClose { offset, .. }
            | CompileError::UnclosedSection { offset, .. }
            | CompileError::PartialNotFound { offset, .. }
            | CompileError::PartialCycle { offset, .. }
            | CompileError::PartialDepthExceeded { offset, .. }
            | CompileError::MalformedDelimiterTag { offset, .. }
            | CompileError::UnclosedTag { offset }
            | CompileError::EmptyTag { offset } => *offset
        }
    }

    /// 1-based line and column of the error within `source`.
    pub fn line_col(&self, source: &str) -> (usize, usize) {
        let offset = self.offset().min(source.len());
        let before = source.get(..offset).unwrap_or(source);
        let line = before.matches('\n').count() + 1;
        let column = match before.rfind('\n') {
            Some(p) => before[p + 1..].chars().count() + 1,
            None => before.chars().count() + 1
        };
        (line, column)
    }
}


/// Raised by [Value::from_serialize](crate::Value::from_serialize) when a
/// host type has no [Value](crate::Value) representation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SerializeError {
    #[error("map key must be a string or a scalar, got {0}")]
    KeyNotScalar(&'static str),
    #[error("map value serialized without a key")]
    MissingKey,
    #[error("{0}")]
    Custom(String),
}

impl serde::ser::Error for SerializeError {
    fn custom<T: std::fmt::Display>(msg: T) -> Self {
        SerializeError::Custom(msg.to_string())
    }
}
