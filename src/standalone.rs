//! Removal of standalone lines.
//!
//! A line holding nothing but whitespace and structural tags (sections,
//! closes, partials, comments, delimiter changes) disappears from the
//! output together with its line ending. Any interpolation or literal
//! text on the line keeps it intact.

use crate::reader::Token;


pub(crate) fn trim_standalone(tokens: Vec<Token<'_>>) -> Vec<Token<'_>> {
    let mut trimmed = Vec::with_capacity(tokens.len());
    let mut line = Vec::new();
    for token in tokens {
        match token {
            Token::Text(text) => {
                for piece in text.split_inclusive('\n') {
                    line.push(Token::Text(piece));
                    if piece.ends_with('\n') {
                        flush_line(&mut line, &mut trimmed);
                    }
                }
            },
            tag => line.push(tag)
        }
    }
    flush_line(&mut line, &mut trimmed);
    trimmed
}

fn flush_line<'a>(line: &mut Vec<Token<'a>>, trimmed: &mut Vec<Token<'a>>) {
    if is_standalone(line) {
        let indent = match line.first() {
            Some(Token::Text(text)) => *text,
            _ => ""
        };
        trimmed.extend(
            line.drain(..).filter_map(|token| match token {
                Token::Tag(mut tag) => {
                    tag.indent = indent;
                    Some(Token::Tag(tag))
                },
                Token::Text(_) => None
            })
        );
    } else {
        trimmed.append(line);
    }
}

fn is_standalone(line: &[Token<'_>]) -> bool {
    let mut has_tag = false;
    for token in line {
        match token {
            Token::Text(text) if is_blank(text) => {},
            Token::Tag(tag) if tag.kind.is_standalone() => has_tag = true,
            _ => return false
        }
    }
    has_tag
}

// spaces and tabs, optionally closed by `\n` or `\r\n`
fn is_blank(text: &str) -> bool {
    let text = match text.strip_suffix('\n') {
        Some(text) => text.strip_suffix('\r').unwrap_or(text),
        None => text
    };
    text.chars().all(|c| c == ' ' || c == '\t')
}
