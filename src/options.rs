/// Settings of a compile pass.
///
/// ```
/// use moustache::CompileOptions;
///
/// let options = CompileOptions::new()
///     .inherit_delimiters(false)
///     .max_partial_depth(8);
/// assert!(options.escape_html);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileOptions {
    /// When `true`, an included partial is scanned with the delimiters
    /// active at its `>` tag, otherwise with the default `{{ }}`. Changes
    /// made inside a partial never leak back into the includer.
    pub inherit_delimiters: bool,

    /// When `false`, every variable renders unescaped.
    pub escape_html: bool,

    /// Maximum nesting of partial inclusions. `None` means unlimited,
    /// cycles are reported either way.
    pub max_partial_depth: Option<usize>,
}

impl CompileOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn inherit_delimiters(mut self, inherit: bool) -> Self {
        self.inherit_delimiters = inherit;
        self
    }

    pub fn escape_html(mut self, escape: bool) -> Self {
        self.escape_html = escape;
        self
    }

    pub fn max_partial_depth(mut self, depth: usize) -> Self {
        self.max_partial_depth = Some(depth);
        self
    }
}

impl Default for CompileOptions {
    fn default() -> Self {
        CompileOptions {
            inherit_delimiters: true,
            escape_html: true,
            max_partial_depth: None,
        }
    }
}
