use std::fmt;


pub const DEFAULT_OPEN: &str = "{{";
pub const DEFAULT_CLOSE: &str = "}}";

/// The active open and close tag markers of one compile pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delimiters {
    open: String,
    close: String,
}

impl Delimiters {
    pub fn new(open: &str, close: &str) -> Option<Self> {
        if open.is_empty() || close.is_empty() {
            None
        } else {
            Some(Delimiters {
                open: open.to_owned(),
                close: close.to_owned(),
            })
        }
    }

    /// Parse the body of a `{{=open close=}}` tag, without its leading `=`.
    ///
    /// The trailing `=` is optional. Exactly two whitespace-separated
    /// markers are required and neither may contain whitespace or `=`.
    pub(crate) fn parse(body: &str) -> Option<Self> {
        let body = body.trim();
        let body = body.strip_suffix('=').unwrap_or(body);
        let words = body.split_whitespace().collect::<Vec<_>>();
        match words.as_slice() {
            [open, close] if !open.contains('=') && !close.contains('=') =>
                Delimiters::new(open, close),
            _ => None
        }
    }

    pub fn open(&self) -> &str {
        &self.open
    }

    pub fn close(&self) -> &str {
        &self.close
    }
}

impl Default for Delimiters {
    fn default() -> Self {
        Delimiters {
            open: DEFAULT_OPEN.to_owned(),
            close: DEFAULT_CLOSE.to_owned(),
        }
    }
}

impl fmt::Display for Delimiters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.open, self.close)
    }
}
