//! Property-based tests for compiling and rendering.
//!
//! These check laws that hold for any input: literal text passes through,
//! compilation is deterministic, falsey values hide sections, and the
//! alternative spellings of a tag render alike.

use moustache::{Template, Value};
use proptest::prelude::*;
use std::collections::BTreeMap;

fn falsey() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        Just(Value::Bool(false)),
        Just(Value::from("")),
        Just(Value::List(vec![])),
        Just(Value::Map(BTreeMap::new())),
        Just(Value::Record(vec![])),
    ]
}

fn fragments() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            Just("text "),
            Just("\n"),
            Just("  "),
            Just("{{a}}"),
            Just("{{{b}}}"),
            Just("{{#s}}"),
            Just("{{^s}}"),
            Just("{{/s}}"),
            Just("{{! note }}"),
            Just("{{=<% %>=}}"),
            Just("<%={{ }}=%>"),
            Just("{{>p}}"),
        ],
        0..12,
    )
    .prop_map(|pieces| pieces.concat())
}

fn unescape(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

proptest! {
    #[test]
    fn literal_text_renders_unchanged(text in "[a-z \n\t{}<>&]{0,40}") {
        prop_assume!(!text.contains("{{"));
        let (output, errors) = moustache::render(&text, &[]);
        prop_assert!(errors.is_empty());
        prop_assert_eq!(output, text);
    }

    #[test]
    fn compilation_is_deterministic(text in fragments()) {
        prop_assert_eq!(moustache::compile(&text), moustache::compile(&text));
    }

    #[test]
    fn falsey_values_hide_sections(value in falsey()) {
        let data = Value::from_iter([("k", value)]);
        let (shown, _) = moustache::render("{{#k}}X{{/k}}", std::slice::from_ref(&data));
        let (inverted, _) = moustache::render("{{^k}}X{{/k}}", std::slice::from_ref(&data));
        prop_assert_eq!(shown, "");
        prop_assert_eq!(inverted, "X");
    }

    #[test]
    fn numbers_are_truthy(n in any::<i64>()) {
        let data = [Value::from_iter([("k", n)])];
        let (output, _) = moustache::render("{{#k}}X{{/k}}{{^k}}Y{{/k}}", &data);
        prop_assert_eq!(output, "X");
    }

    #[test]
    fn escaping_is_reversible(text in "\\PC{0,30}") {
        let data = [Value::from_iter([("v", text.as_str())])];
        let (escaped, _) = moustache::render("{{v}}", &data);
        let (raw, _) = moustache::render("{{{v}}}", &data);
        prop_assert!(!escaped.contains(|c: char| matches!(c, '<' | '>' | '"' | '\'')));
        prop_assert_eq!(unescape(&escaped), text.clone());
        prop_assert_eq!(raw, text);
    }

    #[test]
    fn dotted_name_matches_nested_section(
        a in "[a-z]{1,6}", b in "[a-z]{1,6}", v in "[a-z ]{0,10}"
    ) {
        let data = [Value::from_iter([(a.as_str(), Value::from_iter([(b.as_str(), v.as_str())]))])];
        let (dotted, _) = moustache::render(&format!("{{{{{a}.{b}}}}}"), &data);
        let (nested, _) = moustache::render(&format!("{{{{#{a}}}}}{{{{{b}}}}}{{{{/{a}}}}}"), &data);
        prop_assert_eq!(&dotted, &v);
        prop_assert_eq!(dotted, nested);
    }

    #[test]
    fn switched_delimiters_render_alike(x in "[a-z<&]{0,10}") {
        let data = [Value::from_iter([("x", x.as_str())])];
        let (plain, _) = moustache::render("[{{x}}]", &data);
        let (switched, _) = moustache::render("{{=<% %>=}}[<%x%>]", &data);
        prop_assert_eq!(plain, switched);
    }

    #[test]
    fn standalone_section_lines_vanish(
        indent in "[ \t]{0,4}", newline in prop_oneof![Just("\n"), Just("\r\n")]
    ) {
        let text = format!("{indent}{{{{#b}}}}{newline}X{newline}{indent}{{{{/b}}}}{newline}");
        let template = Template::from(&text).unwrap();
        prop_assert_eq!(template.render(&Value::from_iter([("b", true)])), format!("X{newline}"));
    }
}
