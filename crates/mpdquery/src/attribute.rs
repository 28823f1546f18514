//! Attributes and the tag content tokenizer

use std::borrow::Cow;
use std::fmt;

use crate::error::{Error, ErrorKind, Result};

/// A name/value pair attached to one element
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

impl Attribute {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}=\"{}\"", self.name, self.value)
    }
}

/// Split the text of an opening tag (everything between `<` and `>`, without
/// the self-closing `/`) into the element name and its attributes.
///
/// Tokens are separated by single spaces. Values containing spaces are
/// reassembled from consecutive tokens, so `img alt="a b c" src="d.png"`
/// yields two attributes. A tab or line break, together with the spaces
/// around it, counts as one separator.
pub fn parse_tag_content(content: &str) -> Result<(String, Vec<Attribute>)> {
    let content = collapse_line_breaks(content);
    let mut tokens = content.split(' ');
    let name = tokens.next().unwrap_or_default();
    if name.is_empty() {
        return Err(Error::new(ErrorKind::EmptyNodeContent));
    }

    let mut attributes: Vec<Attribute> = Vec::new();
    let mut closed = name.ends_with('"');

    for token in tokens {
        closed = if token.contains('=') {
            let (attribute, closed) = split_attribute(token);
            attributes.push(attribute);
            closed
        } else if !closed {
            continue_value(&mut attributes, token)?
        } else {
            return Err(Error::new(ErrorKind::UnparsableAttribute {
                token: token.to_string(),
            }));
        };
    }

    Ok((name.to_string(), attributes))
}

const fn is_line_break(c: char) -> bool {
    matches!(c, '\t' | '\r' | '\n')
}

/// Replace every whitespace run holding a tab or line break with one space,
/// dropping such runs at either end. Space-only text is returned as is.
fn collapse_line_breaks(content: &str) -> Cow<'_, str> {
    if !content.contains(is_line_break) {
        return Cow::Borrowed(content);
    }

    let mut out = String::with_capacity(content.len());
    let mut run = String::new();
    for c in content.chars() {
        if c == ' ' || is_line_break(c) {
            run.push(c);
            continue;
        }
        if run.contains(is_line_break) {
            if !out.is_empty() {
                out.push(' ');
            }
        } else {
            out.push_str(&run);
        }
        run.clear();
        out.push(c);
    }
    if !run.contains(is_line_break) {
        out.push_str(&run);
    }

    Cow::Owned(out)
}

/// Returns the attribute and whether its value ends with a closing quote
fn split_attribute(token: &str) -> (Attribute, bool) {
    let (name, raw) = token.split_once('=').unwrap_or((token, ""));
    let raw = raw.trim();

    // A lone `"` opens a value that continues in the next token.
    let closed = raw.ends_with('"') && raw != "\"";

    let value = raw.strip_prefix('"').unwrap_or(raw);
    let value = value.strip_suffix('"').unwrap_or(value);
    (Attribute::new(name, value), closed)
}

/// Append `token` to the last attribute's value, returning whether the token
/// closed it
fn continue_value(attributes: &mut [Attribute], token: &str) -> Result<bool> {
    let Some(last) = attributes.last_mut() else {
        return Err(Error::new(ErrorKind::UnparsableAttribute {
            token: token.to_string(),
        }));
    };

    last.value.push(' ');
    match token.strip_suffix('"') {
        Some(rest) => {
            last.value.push_str(rest);
            Ok(true)
        }
        None => {
            last.value.push_str(token);
            Ok(false)
        }
    }
}
