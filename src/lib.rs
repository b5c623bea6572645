//! A Mustache engine that compiles templates into reusable trees.
//!
//! A [Template] compiled from source is rendered by resolving keys in a
//! [ContextStack] of [Value]s. Partials are fetched from a [PartialLoader]
//! at compile time and spliced into the tree, so rendering needs nothing
//! but the data.
//!
//! Host data comes in as a [Value]: from JSON or YAML documents, from any
//! type implementing `serde::Serialize` through [Value::from_serialize], or
//! built by hand.
//!
//! Lambdas and template inheritance are not supported. `{{<name}}` tags are
//! accepted and ignored.
//!
//!
//! # Samples
//!
//! ## Hello world
//!
//! ```
//! use moustache::{Template, JsonValue, Value};
//!
//! let text = "hello, {{you}}!";
//! let data = r#"{
//!     "you": "world"
//! }"#;
//!
//! let template = Template::from(text).unwrap();
//! let context = Value::from(serde_json::from_str::<JsonValue>(data).unwrap());
//!
//! let result = template.render(&context);
//!
//! assert_eq!(result, "hello, world!")
//! ```
//!
//! ## Hello team
//!
//! ```
//! use moustache::{Template, YamlValue, Value};
//! let text = r#"
//!   {{#team}}
//!   hello, {{address}} {{name}}!
//!   {{/team}}
//! "#;
//! let data = r#"
//!   team:
//!     - name: john
//!       address: little
//!     - name: 42
//!       address: citizen
//! "#;
//!
//! let template = Template::from(text).unwrap();
//! let context = Value::from(serde_yaml::from_str::<YamlValue>(data).unwrap());
//!
//! let result = template.render(&context);
//! assert_eq!(result, r#"
//!   hello, little john!
//!   hello, citizen 42!
//! "#);
//! ```
//!
//! ## Errors
//!
//! Compilation reports every problem it finds, next to what could be built:
//!
//! ```
//! use moustache::CompileError;
//!
//! let (output, errors) = moustache::render("{{#a}}x{{/b}}{{c}}", &[]);
//! assert_eq!(output, "");
//! assert!(matches!(errors[0], CompileError::MismatchedSectionClose { .. }));
//! ```
mod compiler;
mod context;
mod delimiters;
mod error;
mod json;
mod node;
mod options;
mod reader;
mod render;
mod serializer;
mod standalone;
mod template;
mod value;
mod yaml;

pub use self::compiler::Compiler;
pub use self::context::ContextStack;
pub use self::delimiters::Delimiters;
pub use self::error::{CompileError, SerializeError};
pub use self::json::JsonValue;
pub use self::node::Node;
pub use self::options::CompileOptions;
pub use self::template::{Compiled, PartialFn, PartialLoader, PartialMap, Template};
pub use self::value::{Number, Value};
pub use self::yaml::YamlValue;


/// Compile `text` without partials, returning the template and every
/// error found.
pub fn compile(text: &str) -> (Template, Vec<CompileError>) {
    Compiler::new().compile(text).into_parts()
}

/// Compile and render `text` in one go.
///
/// The output is rendered from whatever part of the template compiled.
pub fn render(text: &str, contexts: &[Value]) -> (String, Vec<CompileError>) {
    let (template, errors) = compile(text);
    (template.render_stack(contexts), errors)
}
