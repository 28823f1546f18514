//! Text rendering of nodes, for display and debugging

use std::fmt::{self, Write};

use crate::node::Node;

const INDENT: &str = "  ";

impl Node<'_> {
    /// `<name attr="val" attr2="val2" >`
    pub fn to_open_tag_xml(&self) -> String {
        let mut out = format!("<{} ", self.name());
        for attribute in self.attributes() {
            out.push_str(&format!("{attribute} "));
        }
        out.push('>');
        out
    }

    /// `</name>`
    pub fn to_close_tag_xml(&self) -> String {
        format!("</{}>", self.name())
    }

    /// Render the subtree, indenting each level by two more spaces.
    ///
    /// A text value is shown as a `value="..."` pseudo attribute on nodes
    /// without element children.
    pub fn print_content(&self, indent: &str) -> String {
        Content { node: self, indent }.to_string()
    }

    fn write_content<W: Write>(&self, out: &mut W, indent: &str) -> fmt::Result {
        write!(out, "{indent}<{} ", self.name())?;
        for attribute in self.attributes() {
            write!(out, "{attribute} ")?;
        }
        if let Some(value) = self.value().filter(|_| !self.has_children()) {
            write!(out, "value=\"{value}\"")?;
        }
        out.write_char('>')?;

        let child_indent = format!("{indent}{INDENT}");
        for child in self.children() {
            out.write_char('\n')?;
            child.write_content(out, &child_indent)?;
        }

        write!(out, "</{}>", self.name())
    }
}

/// A subtree rendered below a given indentation
struct Content<'n, 'a> {
    node: &'n Node<'a>,
    indent: &'n str,
}

impl fmt::Display for Content<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.node.write_content(f, self.indent)
    }
}

impl fmt::Display for Node<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_content(f, "")
    }
}
