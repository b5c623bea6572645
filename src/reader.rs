use tracing::trace;

use crate::delimiters::Delimiters;
use crate::error::CompileError;


// Recognized whatever the active delimiters are.
const TRIPLE_OPEN: &str = "{{{";
const TRIPLE_CLOSE: &str = "}}}";

/// Splits template text into literal text and tags.
///
/// Delimiter changes are applied as soon as their tag is read, so the
/// rest of the input is scanned with the new markers. Errors are kept
/// aside and the scan goes on.
pub(crate) struct Reader<'a> {
    input: &'a str,
    pos: usize,
    delimiters: Delimiters,
    errors: Vec<CompileError>,
}

impl<'a> Reader<'a> {
    pub(crate) fn new(input: &'a str, delimiters: Delimiters) -> Self {
        Reader {
            input,
            pos: 0,
            delimiters,
            errors: Vec::new(),
        }
    }

    pub(crate) fn into_errors(self) -> Vec<CompileError> {
        self.errors
    }

    fn read_text(&mut self, tail: &'a str) -> Token<'a> {
        let after_text = [tail.find(self.delimiters.open()), tail.find(TRIPLE_OPEN)]
            .into_iter()
            .flatten()
            .min()
            .unwrap_or(tail.len());
        self.pos += after_text;
        Token::Text(&tail[..after_text])
    }

    fn read_tag(&mut self, tail: &'a str) -> Option<Token<'a>> {
        let offset = self.pos;
        let odl = self.delimiters.open().len();
        let body = &tail[odl..];
        let is_triple = body.starts_with('{');
        // a delimiters tag ends at the first close marker too, its
        // trailing `=` stays in the body
        let close = if is_triple {
            format!("{}{}", '}', self.delimiters.close())
        } else {
            self.delimiters.close().to_owned()
        };
        let (inner, after_tag) = match body.find(&close) {
            Some(p) => (&body[..p], odl + p + close.len()),
            None => return Some(self.unclosed(tail, offset))
        };
        self.pos += after_tag;
        if is_triple {
            self.tag(TagKind::Variable { escaped: false }, inner[1..].trim(), offset)
        } else {
            self.classify(inner.trim(), offset)
        }
    }

    fn read_triple(&mut self, tail: &'a str) -> Option<Token<'a>> {
        let offset = self.pos;
        let body = &tail[TRIPLE_OPEN.len()..];
        match body.find(TRIPLE_CLOSE) {
            Some(p) => {
                self.pos += TRIPLE_OPEN.len() + p + TRIPLE_CLOSE.len();
                self.tag(TagKind::Variable { escaped: false }, body[..p].trim(), offset)
            },
            None => Some(self.unclosed(tail, offset))
        }
    }

    // the remainder of the input is kept as text
    fn unclosed(&mut self, tail: &'a str, offset: usize) -> Token<'a> {
        self.errors.push(CompileError::UnclosedTag { offset });
        self.pos = self.input.len();
        Token::Text(tail)
    }

    fn classify(&mut self, text: &'a str, offset: usize) -> Option<Token<'a>> {
        let kind = match text.chars().next() {
            Some('#') => TagKind::Section,
            Some('^') => TagKind::InvertedSection,
            Some('/') => TagKind::EndSection,
            Some('>') => TagKind::Partial(self.delimiters.clone()),
            Some('<') => TagKind::Parent,
            Some('=') => return Some(self.set_delimiters(text, offset)),
            Some('!') => TagKind::Comment,
            Some('&') => TagKind::Variable { escaped: false },
            _ => return self.tag(TagKind::Variable { escaped: true }, text, offset)
        };
        self.tag(kind, text.trim_sigil(), offset)
    }

    fn tag(&mut self, kind: TagKind, key: &'a str, offset: usize) -> Option<Token<'a>> {
        if key.is_empty() && kind != TagKind::Comment {
            self.errors.push(CompileError::EmptyTag { offset });
            None
        } else {
            Some(Token::Tag(Tag { kind, key, offset, indent: "" }))
        }
    }

    fn set_delimiters(&mut self, text: &'a str, offset: usize) -> Token<'a> {
        match Delimiters::parse(text.trim_sigil()) {
            Some(delimiters) => {
                self.delimiters = delimiters;
                trace!(delimiters = %self.delimiters, offset, "delimiters changed");
            },
            None => {
                self.errors.push(CompileError::MalformedDelimiterTag {
                    tag: text.to_owned(),
                    offset,
                });
            }
        }
        Token::Tag(Tag { kind: TagKind::Delimiters, key: "", offset, indent: "" })
    }
}

impl<'a> Iterator for Reader<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        let input = self.input;
        while self.pos < input.len() {
            let tail = &input[self.pos..];
            let token = if tail.starts_with(self.delimiters.open()) {
                self.read_tag(tail)
            } else if tail.starts_with(TRIPLE_OPEN) {
                self.read_triple(tail)
            } else {
                Some(self.read_text(tail))
            };
            if token.is_some() {
                return token;
            }
        }
        None
    }
}


#[derive(PartialEq, Debug, Clone)]
pub(crate) enum Token<'a> {
    Text(&'a str),
    Tag(Tag<'a>),
}

#[derive(PartialEq, Debug, Clone)]
pub(crate) struct Tag<'a> {
    pub(crate) kind: TagKind,
    pub(crate) key: &'a str,
    pub(crate) offset: usize,
    // leading whitespace of a standalone partial line
    pub(crate) indent: &'a str,
}

#[derive(PartialEq, Debug, Clone)]
pub(crate) enum TagKind {
    Variable { escaped: bool },
    Section,
    InvertedSection,
    EndSection,
    // carries the delimiters active where the partial is included
    Partial(Delimiters),
    Parent,
    Delimiters,
    Comment,
}

impl TagKind {
    /// Tags that may stand alone on a line and have it removed from output.
    pub(crate) fn is_standalone(&self) -> bool {
        !matches!(self, TagKind::Variable { .. })
    }
}


trait ReaderStringOps {
    fn trim_sigil(&self) -> &str;
}

impl ReaderStringOps for str {
    fn trim_sigil(&self) -> &str {
        self[1..].trim()
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn tag<'a>(kind: TagKind, key: &'a str, offset: usize) -> Token<'a> {
        Token::Tag(Tag { kind, key, offset, indent: "" })
    }

    fn value(key: &str, escaped: bool, offset: usize) -> Token<'_> {
        tag(TagKind::Variable { escaped }, key, offset)
    }

    #[test]
    fn text_only() {
        expect_sequence(
            " 123456 ",
            vec![
                Token::Text(" 123456 ")
            ]
        );
    }

    #[test]
    fn text_and_values() {
        expect_sequence(
            "hello {{name}}, goodbye {{  name  }}",
            vec![
                Token::Text("hello "),
                value("name", true, 6),
                Token::Text(", goodbye "),
                value("name", true, 24),
            ]
        );
    }

    #[test]
    fn sigils_are_excluded_from_keys() {
        expect_sequence(
            "{{# a }}{{^b}}{{/ b }}{{> p }}{{<q}}{{!note}}{{&c}}",
            vec![
                tag(TagKind::Section, "a", 0),
                tag(TagKind::InvertedSection, "b", 8),
                tag(TagKind::EndSection, "b", 14),
                tag(TagKind::Partial(Delimiters::default()), "p", 22),
                tag(TagKind::Parent, "q", 30),
                tag(TagKind::Comment, "note", 36),
                value("c", false, 45),
            ]
        );
    }

    #[test]
    fn value_with_escape() {
        expect_sequence(
            "{{ v }}",
            vec![
                value("v", true, 0)
            ]
        )
    }

    #[test]
    fn value_without_escape() {
        expect_sequence(
            "{{{ v }}}",
            vec![
                value("v", false, 0)
            ]
        )
    }

    #[test]
    fn update_delimiters() {
        expect_sequence(
            "{{=<% %>=}}<% x %><%={{ }}=%>{{y}}",
            vec![
                tag(TagKind::Delimiters, "", 0),
                value("x", true, 11),
                tag(TagKind::Delimiters, "", 18),
                value("y", true, 29),
            ]
        )
    }

    #[test]
    fn triple_mustache_ignores_custom_delimiters() {
        expect_sequence(
            "{{=| |=}}{{{a}}}|{b}||c|",
            vec![
                tag(TagKind::Delimiters, "", 0),
                value("a", false, 9),
                value("b", false, 16),
                value("c", true, 21),
            ]
        )
    }

    #[test]
    fn old_delimiters_are_text_after_change() {
        expect_sequence(
            "{{=| |=}}{{x}}",
            vec![
                tag(TagKind::Delimiters, "", 0),
                Token::Text("{{x}}"),
            ]
        )
    }

    #[test]
    fn partial_remembers_delimiters() {
        expect_sequence(
            "{{=| |=}}|>p|",
            vec![
                tag(TagKind::Delimiters, "", 0),
                tag(TagKind::Partial(Delimiters::new("|", "|").unwrap()), "p", 9),
            ]
        )
    }

    #[test]
    fn delimiters_without_trailing_equal() {
        let mut reader = Reader::new("{{= +++   --- }}+++x---", Delimiters::default());
        let tokens = reader.by_ref().collect::<Vec<_>>();
        assert_eq!(tokens[1], value("x", true, 16));
        assert!(reader.into_errors().is_empty());
    }

    #[test]
    fn invalid_delimiters_value() {
        let mut reader = Reader::new("{{= |=   | =}}{{x}}", Delimiters::default());
        let tokens = reader.by_ref().collect::<Vec<_>>();
        assert_eq!(tokens[1], value("x", true, 14));
        assert_eq!(
            reader.into_errors(),
            vec![CompileError::MalformedDelimiterTag { tag: "= |=   | =".to_owned(), offset: 0 }]
        );
    }

    #[test]
    fn delimiters_tag_ends_at_first_close() {
        let mut reader = Reader::new("{{= <% %> }}<%x%>=}}", Delimiters::default());
        let tokens = reader.by_ref().collect::<Vec<_>>();
        assert_eq!(tokens, vec![
            tag(TagKind::Delimiters, "", 0),
            value("x", true, 12),
            Token::Text("=}}"),
        ]);
        assert!(reader.into_errors().is_empty());
    }

    #[test]
    fn delimiters_tag_without_markers() {
        for (input, body) in [("{{=}}", "="), ("{{= =}}", "= ="), ("{{==}}", "==")] {
            let mut reader = Reader::new(input, Delimiters::default());
            let tokens = reader.by_ref().collect::<Vec<_>>();
            assert_eq!(tokens, vec![tag(TagKind::Delimiters, "", 0)]);
            assert_eq!(
                reader.into_errors(),
                vec![CompileError::MalformedDelimiterTag { tag: body.to_owned(), offset: 0 }]
            );
        }
    }

    #[test]
    fn missing_close_delimiter() {
        let mut reader = Reader::new("a {{b", Delimiters::default());
        let tokens = reader.by_ref().collect::<Vec<_>>();
        assert_eq!(tokens, vec![Token::Text("a "), Token::Text("{{b")]);
        assert_eq!(reader.into_errors(), vec![CompileError::UnclosedTag { offset: 2 }]);
    }

    #[test]
    fn value_missing_name() {
        let mut reader = Reader::new("{{ & }}x", Delimiters::default());
        let tokens = reader.by_ref().collect::<Vec<_>>();
        assert_eq!(tokens, vec![Token::Text("x")]);
        assert_eq!(reader.into_errors(), vec![CompileError::EmptyTag { offset: 0 }]);
    }

    #[test]
    fn empty_comment_is_fine() {
        expect_sequence(
            "{{!}}",
            vec![
                tag(TagKind::Comment, "", 0)
            ]
        )
    }


    fn expect_sequence(input: &str, tokens: Vec<Token<'_>>) {
        let mut reader = Reader::new(input, Delimiters::default());
        let mut expected = tokens.into_iter();
        loop {
            let token = reader.next();
            assert_eq!(token, expected.next());
            if token.is_none() {
                break;
            }
        }
    }
}
