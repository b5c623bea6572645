use std::collections::HashMap;

use crate::compiler::Compiler;
use crate::context::ContextStack;
use crate::error::CompileError;
use crate::node::Node;
use crate::render::render_nodes;
use crate::Value;


/// A compiled template, ready to be rendered any number of times.
///
/// The tree is never modified after compilation, so a template can be
/// shared and rendered from several threads at once.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Template {
    nodes: Vec<Node>
}

impl Template {
    pub(crate) fn new(nodes: Vec<Node>) -> Self {
        Template { nodes }
    }

    /// Compile `input`, failing with every error found.
    ///
    /// Partial tags fail with [CompileError::PartialNotFound]; use
    /// [Template::from_with_partials] or [Compiler] to provide them.
    pub fn from(input: &str) -> Result<Self, Vec<CompileError>> {
        Compiler::new().compile(input).into_result()
    }

    pub fn from_with_partials(
        input: &str, partials: &dyn PartialLoader
    ) -> Result<Self, Vec<CompileError>> {
        Compiler::new()
            .with_partials(partials)
            .compile(input)
            .into_result()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn render(&self, context: &Value) -> String {
        self.render_stack(std::slice::from_ref(context))
    }

    /// Render with all `contexts` pushed, the last one innermost.
    pub fn render_stack(&self, contexts: &[Value]) -> String {
        let mut result = String::new();
        self.render_to(contexts, &mut result);
        result
    }

    pub fn render_to(&self, contexts: &[Value], out: &mut String) {
        let mut stack = ContextStack::new(contexts);
        render_nodes(&self.nodes, &mut stack, out);
    }
}


/// Template text and the errors found while compiling it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Compiled {
    pub template: Template,
    pub errors: Vec<CompileError>,
}

impl Compiled {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn into_result(self) -> Result<Template, Vec<CompileError>> {
        if self.errors.is_empty() {
            Ok(self.template)
        } else {
            Err(self.errors)
        }
    }

    pub fn into_parts(self) -> (Template, Vec<CompileError>) {
        (self.template, self.errors)
    }
}


/// Source of partial template text, queried during compilation.
pub trait PartialLoader {
    fn load(&self, name: &str) -> Option<String>;
}


/// Partial text held in memory.
#[derive(Debug, Clone, Default)]
pub struct PartialMap {
    partials: HashMap<String, String>
}

impl PartialMap {
    pub fn new() -> Self {
        PartialMap { partials: HashMap::new() }
    }

    pub fn insert(&mut self, name: &str, text: &str) {
        self.partials.insert(name.to_owned(), text.to_owned());
    }

    pub fn with(mut self, name: &str, text: &str) -> Self {
        self.insert(name, text);
        self
    }
}

impl<'a> FromIterator<(&'a str, &'a str)> for PartialMap {
    fn from_iter<I: IntoIterator<Item = (&'a str, &'a str)>>(iter: I) -> Self {
        let mut partials = PartialMap::new();
        for (name, text) in iter {
            partials.insert(name, text);
        }
        partials
    }
}

impl PartialLoader for PartialMap {
    fn load(&self, name: &str) -> Option<String> {
        self.partials.get(name).cloned()
    }
}

impl PartialLoader for HashMap<String, String> {
    fn load(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}


/// Adapts a closure into a [PartialLoader].
///
/// ```
/// use moustache::{PartialFn, Template, Value};
///
/// let loader = PartialFn(|name: &str| (name == "who").then(|| "world".to_owned()));
/// let template = Template::from_with_partials("hello {{>who}}", &loader).unwrap();
/// assert_eq!(template.render(&Value::Null), "hello world");
/// ```
pub struct PartialFn<F>(pub F);

impl<F> PartialLoader for PartialFn<F>
where F: Fn(&str) -> Option<String> {
    fn load(&self, name: &str) -> Option<String> {
        (self.0)(name)
    }
}
