//! Recursive element construction over byte offsets of the preprocessed text

use tracing::trace;

use crate::attribute::parse_tag_content;
use crate::document::Config;
use crate::error::{Error, ErrorKind, Result};
use crate::node::{Element, NodeId};

/// Builds the element arena for one document
#[derive(Debug)]
pub(crate) struct TreeBuilder<'a> {
    text: &'a str,
    config: Config,
    elements: Vec<Element>,
}

impl<'a> TreeBuilder<'a> {
    pub(crate) const fn new(text: &'a str, config: Config) -> Self {
        Self {
            text,
            config,
            elements: Vec::new(),
        }
    }

    /// Build the first element of the text and all of its descendants
    pub(crate) fn build(mut self) -> Result<Vec<Element>> {
        self.element(0, self.text.len(), None, 1)?;
        Ok(self.elements)
    }

    /// Build the first element found in `text[start..end]`.
    ///
    /// Returns the new node and the number of bytes of the span it consumed,
    /// counted from `start`, so any text before the opening tag is consumed
    /// with the element.
    fn element(
        &mut self,
        start: usize,
        end: usize,
        parent: Option<NodeId>,
        depth: u16,
    ) -> Result<(NodeId, usize)> {
        if self.config.max_depth > 0 && depth > self.config.max_depth {
            return Err(Error::at(
                ErrorKind::MaxDepthExceeded {
                    max: self.config.max_depth,
                },
                start,
            ));
        }

        let span = self.slice(start, end);
        let Some(open) = span.find('<') else {
            return Err(Error::at(ErrorKind::NoNodeContent, start));
        };
        let Some(close) = span
            .get(open..)
            .and_then(|rest| rest.find('>'))
            .map(|found| open + found)
        else {
            return Err(Error::at(ErrorKind::NoNodeContent, start + open));
        };

        let tag_start = start + open + 1;
        let tag_content = span.get(open + 1..close).unwrap_or_default();
        trace!(tag = tag_content, offset = tag_start, "parsing tag");

        let id = NodeId(self.elements.len());

        if let Some(tag_content) = tag_content.strip_suffix('/') {
            let (name, attributes) =
                parse_tag_content(tag_content).map_err(|err| err.with_offset(tag_start))?;
            self.elements.push(Element::new(name, attributes, parent));
            return Ok((id, close + 1));
        }

        let (name, attributes) =
            parse_tag_content(tag_content).map_err(|err| err.with_offset(tag_start))?;

        // First textual occurrence: a nested element with the same name closes
        // this one early.
        let end_tag = format!("</{name}>");
        let body_start = close + 1;
        let Some(body_end) = span
            .get(body_start..)
            .and_then(|rest| rest.find(&end_tag))
            .map(|found| body_start + found)
        else {
            return Err(Error::at(ErrorKind::NoClosingTag { name }, tag_start));
        };

        self.elements.push(Element::new(name, attributes, parent));

        let content_end = start + body_end;
        let mut cursor = start + body_start;
        while self.slice(cursor, content_end).contains('<') {
            let (child, consumed) =
                self.element(cursor, content_end, Some(id), depth.saturating_add(1))?;
            if let Some(element) = self.elements.get_mut(id.index()) {
                element.children.push(child);
            }
            cursor += consumed;
        }

        let value = self.slice(cursor, content_end).trim();
        if !value.is_empty() {
            if let Some(element) = self.elements.get_mut(id.index()) {
                element.value = Some(value.to_string());
            }
        }

        Ok((id, body_end + end_tag.len()))
    }

    fn slice(&self, start: usize, end: usize) -> &'a str {
        self.text.get(start..end).unwrap_or_default()
    }
}
