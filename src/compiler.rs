use std::borrow::Cow;
use std::vec::IntoIter;

use tracing::{debug, warn};

use crate::delimiters::Delimiters;
use crate::error::CompileError;
use crate::node::Node;
use crate::options::CompileOptions;
use crate::reader::{Reader, Tag, TagKind, Token};
use crate::standalone::trim_standalone;
use crate::template::{Compiled, PartialLoader, Template};


/// Turns template text into a [Template].
///
/// Partials are resolved while compiling: their text is fetched from the
/// [PartialLoader], compiled in turn and spliced into the tree.
///
/// ```
/// use moustache::{Compiler, CompileError, PartialMap, Value};
///
/// let partials = PartialMap::new().with("user", "<b>{{name}}</b>");
/// let compiled = Compiler::new()
///     .with_partials(&partials)
///     .compile("{{#users}}{{>user}}{{/users}}{{>missing}}");
///
/// assert!(matches!(
///     compiled.errors.as_slice(),
///     [CompileError::PartialNotFound { name, .. }] if name == "missing"
/// ));
/// let data = Value::from(serde_json::json!({"users": [{"name": "ann"}, {"name": "bob"}]}));
/// assert_eq!(compiled.template.render(&data), "<b>ann</b><b>bob</b>");
/// ```
#[derive(Clone, Default)]
pub struct Compiler<'p> {
    partials: Option<&'p dyn PartialLoader>,
    options: CompileOptions,
}

impl<'p> Compiler<'p> {
    pub fn new() -> Self {
        Compiler {
            partials: None,
            options: CompileOptions::default(),
        }
    }

    pub fn with_partials(mut self, partials: &'p dyn PartialLoader) -> Self {
        self.partials = Some(partials);
        self
    }

    pub fn with_options(mut self, options: CompileOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &CompileOptions {
        &self.options
    }

    /// Compile `input`, collecting every error instead of stopping at the
    /// first one. Branches that could not be built are left out of the
    /// returned template.
    pub fn compile(&self, input: &str) -> Compiled {
        let mut pass = Pass {
            compiler: self,
            chain: Vec::new(),
            errors: Vec::new(),
        };
        let nodes = pass.compile_text(input, Delimiters::default());
        debug!(nodes = nodes.len(), errors = pass.errors.len(), "template compiled");
        Compiled {
            template: Template::new(nodes),
            errors: pass.errors,
        }
    }
}


// State of one `compile` call, shared by the partials it includes.
struct Pass<'c, 'p> {
    compiler: &'c Compiler<'p>,
    // partials being compiled, outermost first
    chain: Vec<String>,
    errors: Vec<CompileError>,
}

impl Pass<'_, '_> {
    fn compile_text(&mut self, input: &str, delimiters: Delimiters) -> Vec<Node> {
        let mut reader = Reader::new(input, delimiters);
        let tokens = reader.by_ref().collect::<Vec<_>>();
        for error in reader.into_errors() {
            self.error(error);
        }
        let mut tokens = trim_standalone(tokens).into_iter();
        // without an open section the tree is always usable
        self.parse(&mut tokens, None).unwrap_or_default()
    }

    // Returns `None` when the section opened by `open` cannot be closed.
    fn parse<'a>(
        &mut self, tokens: &mut IntoIter<Token<'a>>, open: Option<&Tag<'a>>
    ) -> Option<Vec<Node>> {
        let mut nodes = Vec::new();
        while let Some(token) = tokens.next() {
            let tag = match token {
                Token::Text(text) => {
                    push_text(&mut nodes, text);
                    continue;
                },
                Token::Tag(tag) => tag
            };
            match &tag.kind {
                TagKind::Variable { escaped } => {
                    nodes.push(Node::Variable {
                        key: tag.key.to_owned(),
                        escape: *escaped && self.compiler.options.escape_html,
                    })
                },
                TagKind::Section => {
                    if let Some(children) = self.parse(tokens, Some(&tag)) {
                        nodes.push(Node::Section { key: tag.key.to_owned(), children })
                    }
                },
                TagKind::InvertedSection => {
                    if let Some(children) = self.parse(tokens, Some(&tag)) {
                        nodes.push(Node::InvertedSection { key: tag.key.to_owned(), children })
                    }
                },
                TagKind::EndSection => match open {
                    Some(section) if section.key == tag.key => return Some(nodes),
                    // the wrong close ends the open section, so its own close
                    // later on has nothing to match
                    Some(section) => {
                        self.error(CompileError::MismatchedSectionClose {
                            expected: Some(section.key.to_owned()),
                            found: tag.key.to_owned(),
                            offset: tag.offset,
                        });
                        return None;
                    },
                    None => {
                        self.error(CompileError::MismatchedSectionClose {
                            expected: None,
                            found: tag.key.to_owned(),
                            offset: tag.offset,
                        });
                    }
                },
                TagKind::Partial(delimiters) => {
                    if let Some(children) = self.include(&tag, delimiters) {
                        nodes.push(Node::Partial { name: tag.key.to_owned(), children })
                    }
                },
                TagKind::Parent | TagKind::Delimiters | TagKind::Comment => {}
            }
        }
        match open {
            Some(section) => {
                self.error(CompileError::UnclosedSection {
                    key: section.key.to_owned(),
                    offset: section.offset,
                });
                None
            },
            None => Some(nodes)
        }
    }

    fn include(&mut self, tag: &Tag<'_>, active: &Delimiters) -> Option<Vec<Node>> {
        let name = tag.key;
        if self.chain.iter().any(|it| it == name) {
            self.error(CompileError::PartialCycle {
                name: name.to_owned(),
                chain: self.chain.clone(),
                offset: tag.offset,
            });
            return None;
        }
        if let Some(depth) = self.compiler.options.max_partial_depth {
            if self.chain.len() >= depth {
                self.error(CompileError::PartialDepthExceeded {
                    name: name.to_owned(),
                    depth,
                    offset: tag.offset,
                });
                return None;
            }
        }
        let text = match self.compiler.partials.and_then(|partials| partials.load(name)) {
            Some(text) => text,
            None => {
                self.error(CompileError::PartialNotFound {
                    name: name.to_owned(),
                    offset: tag.offset,
                });
                return None;
            }
        };
        let text = indent_lines(&text, tag.indent);
        let delimiters = if self.compiler.options.inherit_delimiters {
            active.clone()
        } else {
            Delimiters::default()
        };
        self.chain.push(name.to_owned());
        debug!(partial = name, depth = self.chain.len(), "compiling partial");
        let children = self.compile_text(&text, delimiters);
        self.chain.pop();
        Some(children)
    }

    fn error(&mut self, error: CompileError) {
        warn!(%error, "compile error");
        self.errors.push(error);
    }
}

fn push_text(nodes: &mut Vec<Node>, text: &str) {
    match nodes.last_mut() {
        Some(Node::Text(last)) => last.push_str(text),
        _ => nodes.push(Node::Text(text.to_owned()))
    }
}

// prefix every line of a standalone partial with the indentation of its tag
fn indent_lines<'t>(text: &'t str, indent: &str) -> Cow<'t, str> {
    if indent.is_empty() {
        return Cow::Borrowed(text);
    }
    let mut indented = String::with_capacity(text.len() + indent.len());
    for line in text.split_inclusive('\n') {
        indented.push_str(indent);
        indented.push_str(line);
    }
    Cow::Owned(indented)
}
