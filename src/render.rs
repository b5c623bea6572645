use crate::{ContextStack, Node, Value};


pub(crate) fn render_nodes<'a>(nodes: &[Node], stack: &mut ContextStack<'a>, out: &mut String) {
    for node in nodes {
        render_node(node, stack, out);
    }
}

fn render_node<'a>(node: &Node, stack: &mut ContextStack<'a>, out: &mut String) {
    match node {
        Node::Text(text) => out.push_str(text),
        Node::Variable { key, escape } => {
            if let Some(value) = stack.resolve(key) {
                if *escape {
                    html_escape(&value.to_text(), out);
                } else {
                    value.write_text(out);
                }
            }
        },
        Node::Section { key, children } => match stack.resolve(key) {
            Some(Value::List(items)) => {
                for item in items {
                    stack.push(item);
                    render_nodes(children, stack, out);
                    stack.pop();
                }
            },
            Some(value) if value.is_object() && value.is_truthy() => {
                stack.push(value);
                render_nodes(children, stack, out);
                stack.pop();
            },
            Some(value) if value.is_truthy() => render_nodes(children, stack, out),
            _ => {}
        },
        Node::InvertedSection { key, children } => {
            if !stack.resolve(key).is_some_and(Value::is_truthy) {
                render_nodes(children, stack, out);
            }
        },
        Node::Partial { children, .. } => render_nodes(children, stack, out)
    }
}

pub(crate) fn html_escape(input: &str, out: &mut String) {
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c)
        }
    }
}
