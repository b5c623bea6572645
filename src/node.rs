/// One element of a compiled template tree.
///
/// Comments and delimiter changes are consumed by the compiler and never
/// appear here. A `Partial` holds the already compiled tree of the included
/// template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Text(String),
    Variable {
        key: String,
        escape: bool,
    },
    Section {
        key: String,
        children: Vec<Node>,
    },
    InvertedSection {
        key: String,
        children: Vec<Node>,
    },
    Partial {
        name: String,
        children: Vec<Node>,
    },
}

impl Node {
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Section { children, .. }
            | Node::InvertedSection { children, .. }
            | Node::Partial { children, .. } => children,
            Node::Text(_) | Node::Variable { .. } => &[]
        }
    }

    /// The key of a variable or section, the name of a partial.
    pub fn key(&self) -> Option<&str> {
        match self {
            Node::Variable { key, .. }
            | Node::Section { key, .. }
            | Node::InvertedSection { key, .. } => Some(key),
            Node::Partial { name, .. } => Some(name),
            Node::Text(_) => None
        }
    }
}
