//! One step of a path expression: a name test with an optional attribute predicate

use std::fmt;

use crate::error::{Error, ErrorKind, Result};
use crate::node::Node;

const WILDCARD: &str = "*";
const PREDICATE_OPEN: &str = "[@";
const PREDICATE_CLOSE: char = ']';

/// `[@name="value"]`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Predicate<'p> {
    pub attribute: &'p str,
    pub value: &'p str,
}

/// A compiled path segment such as `AdaptationSet[@mimeType="video/mp4"]`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Segment<'p> {
    name: &'p str,
    predicate: Option<Predicate<'p>>,
}

impl<'p> Segment<'p> {
    pub fn parse(text: &'p str) -> Result<Self> {
        if text.is_empty() {
            return Err(Error::new(ErrorKind::InvalidExpression));
        }

        let Some(open) = text.find(PREDICATE_OPEN) else {
            return Ok(Self {
                name: text,
                predicate: None,
            });
        };

        let name = text.get(..open).unwrap_or_default();
        let inner = text.get(open + PREDICATE_OPEN.len()..).unwrap_or_default();
        let Some(close) = inner.find(PREDICATE_CLOSE) else {
            return Err(Error::with_message(
                ErrorKind::UnterminatedPredicate,
                format!(
                    "attribute selector has no closing bracket: {}",
                    text.get(open..).unwrap_or_default()
                ),
            ));
        };

        let selector = inner.get(..close).unwrap_or_default();
        let Some((attribute, value)) = selector.split_once('=') else {
            return Err(Error::new(ErrorKind::InvalidAttributeSelector {
                selector: selector.to_string(),
            }));
        };
        let value = value.strip_prefix('"').unwrap_or(value);
        let value = value.strip_suffix('"').unwrap_or(value);

        Ok(Self {
            name,
            predicate: Some(Predicate { attribute, value }),
        })
    }

    pub const fn name(&self) -> &'p str {
        self.name
    }

    pub const fn predicate(&self) -> Option<Predicate<'p>> {
        self.predicate
    }

    pub fn is_wildcard(&self) -> bool {
        self.name == WILDCARD
    }

    pub fn matches(&self, node: Node<'_>) -> bool {
        if !self.is_wildcard() && self.name != node.name() {
            return false;
        }

        match self.predicate {
            Some(predicate) => node.attributes().iter().any(|attribute| {
                attribute.name == predicate.attribute && attribute.value == predicate.value
            }),
            None => true,
        }
    }
}

impl fmt::Display for Segment<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)?;
        if let Some(predicate) = self.predicate {
            write!(f, "[@{}=\"{}\"]", predicate.attribute, predicate.value)?;
        }
        Ok(())
    }
}
