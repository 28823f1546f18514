//! Path queries over a parsed document
//!
//! Supported grammar:
//!
//! ```text
//! path    = ["//"] segment ("/" segment)*
//! segment = ("*" | name) ["[@" attr "=\"" value "\"]"]
//! ```
//!
//! A leading `//` starts from every node of the subtree instead of the node
//! itself. Each further segment selects direct children of the current set.

pub mod segment;

pub use segment::{Predicate, Segment};

use tracing::trace;

use crate::error::{Error, ErrorKind, Result};
use crate::node::Node;

const DESCENDANT: &str = "//";
const SEPARATOR: char = '/';

/// A compiled path expression
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Path<'p> {
    descendant: bool,
    segments: Vec<Segment<'p>>,
}

impl<'p> Path<'p> {
    /// Compile `expression`, validating every segment
    pub fn parse(expression: &'p str) -> Result<Self> {
        if expression.is_empty() {
            return Err(Error::new(ErrorKind::InvalidPath));
        }

        let (descendant, rest) = match expression.strip_prefix(DESCENDANT) {
            Some(rest) => (true, rest),
            None => (false, expression),
        };

        let segments = split_outside_quotes(rest, SEPARATOR)
            .into_iter()
            .map(Segment::parse)
            .collect::<Result<Vec<_>>>()?;
        // A bare `//` selects nothing; an absolute path needs a first segment.
        if segments.is_empty() && !descendant {
            return Err(Error::with_message(
                ErrorKind::InvalidExpression,
                format!("invalid expression: {expression:?}"),
            ));
        }

        Ok(Self {
            descendant,
            segments,
        })
    }

    pub const fn is_descendant(&self) -> bool {
        self.descendant
    }

    pub fn segments(&self) -> &[Segment<'p>] {
        &self.segments
    }

    /// Evaluate the path from `node`, returning the matches of the last
    /// segment in parent order, then child order
    pub fn evaluate<'a>(&self, node: Node<'a>) -> Vec<Node<'a>> {
        if self.segments.is_empty() {
            return Vec::new();
        }

        let (mut working, remaining) = if self.descendant {
            (node.all_nodes(0), self.segments.as_slice())
        } else {
            let Some((first, rest)) = self.segments.split_first() else {
                return Vec::new();
            };
            if !first.matches(node) {
                return Vec::new();
            }
            (vec![node], rest)
        };

        for segment in remaining {
            working = working
                .iter()
                .flat_map(Node::children)
                .filter(|child| segment.matches(*child))
                .collect();
            trace!(segment = %segment, matches = working.len(), "path level evaluated");
        }

        working
    }
}

/// Split `text` on `separator`, ignoring separators inside double quotes.
///
/// The last part is trimmed and dropped when empty; inner parts are kept as
/// they are.
pub fn split_outside_quotes(text: &str, separator: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut inside_string = false;
    let mut part_start = 0;

    for (index, c) in text.char_indices() {
        if c == '"' {
            inside_string = !inside_string;
        } else if c == separator && !inside_string {
            parts.push(text.get(part_start..index).unwrap_or_default());
            part_start = index + c.len_utf8();
        }
    }

    let last = text.get(part_start..).unwrap_or_default().trim();
    if !last.is_empty() {
        parts.push(last);
    }

    parts
}
