//! Element storage and the borrowed node handle

use std::fmt;

use tracing::debug;

use crate::attribute::Attribute;
use crate::document::Document;
use crate::error::Result;
use crate::path::{Path, Segment};

/// Index of an element inside its [`Document`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Id of the document root
    pub const ROOT: Self = Self(0);

    pub const fn index(self) -> usize {
        self.0
    }
}

/// One parsed element, as stored in the document arena
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Element {
    pub(crate) name: String,
    pub(crate) attributes: Vec<Attribute>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) value: Option<String>,
    pub(crate) parent: Option<NodeId>,
}

impl Element {
    pub(crate) fn new(name: String, attributes: Vec<Attribute>, parent: Option<NodeId>) -> Self {
        Self {
            name,
            attributes,
            children: Vec::new(),
            value: None,
            parent,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }
}

/// A read-only handle to one element of a [`Document`]
#[derive(Clone, Copy)]
pub struct Node<'a> {
    doc: &'a Document,
    id: NodeId,
    element: &'a Element,
}

impl<'a> Node<'a> {
    pub(crate) fn new(doc: &'a Document, id: NodeId, element: &'a Element) -> Self {
        Self { doc, id, element }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn document(&self) -> &'a Document {
        self.doc
    }

    pub fn element(&self) -> &'a Element {
        self.element
    }

    pub fn name(&self) -> &'a str {
        &self.element.name
    }

    pub fn attributes(&self) -> &'a [Attribute] {
        &self.element.attributes
    }

    /// Value of the first attribute called `name`
    pub fn attribute(&self, name: &str) -> Option<&'a str> {
        let found = self
            .element
            .attributes
            .iter()
            .find(|attribute| attribute.name == name)
            .map(|attribute| attribute.value.as_str());
        if found.is_none() {
            debug!(attribute = name, node = self.name(), "attribute not found");
        }
        found
    }

    /// Text content, present only when the element encloses text after its
    /// last child element
    pub fn value(&self) -> Option<&'a str> {
        self.element.value.as_deref()
    }

    pub fn parent(&self) -> Option<Self> {
        self.element.parent.and_then(|id| self.doc.get(id))
    }

    pub fn children(&self) -> impl Iterator<Item = Node<'a>> + 'a {
        let (doc, element) = (self.doc, self.element);
        element.children.iter().filter_map(move |&id| doc.get(id))
    }

    pub fn child_count(&self) -> usize {
        self.element.children.len()
    }

    pub fn has_children(&self) -> bool {
        !self.element.children.is_empty()
    }

    /// Breadth-first list of this node and its descendants, one level per
    /// iteration, stopping after `max_depth` levels (`0` means unbounded).
    pub fn all_nodes(&self, max_depth: usize) -> Vec<Self> {
        let mut nodes = Vec::new();
        let mut level = vec![*self];
        let mut expanded = 0;

        while !level.is_empty() && (max_depth == 0 || expanded < max_depth) {
            let next: Vec<Self> = level.iter().flat_map(Self::children).collect();
            nodes.append(&mut level);
            level = next;
            expanded += 1;
        }

        nodes
    }

    /// All nodes matching `path`, starting from this node
    pub fn query(&self, path: &str) -> Result<Vec<Self>> {
        Ok(Path::parse(path)?.evaluate(*self))
    }

    /// Whether this node satisfies one path segment such as `a[@k="v"]`
    pub fn matches(&self, segment: &str) -> Result<bool> {
        Ok(Segment::parse(segment)?.matches(*self))
    }
}

impl PartialEq for Node<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.doc, other.doc) && self.id == other.id
    }
}

impl Eq for Node<'_> {}

impl fmt::Debug for Node<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("id", &self.id)
            .field("name", &self.element.name)
            .field("attributes", &self.element.attributes)
            .field("value", &self.element.value)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use crate::{Document, Result};

    const MANIFEST: &str = r#"<MPD type="static">
  <Period id="p0">
    <AdaptationSet mimeType="video/mp4">
      <Representation id="v1" height="720"/>
      <Representation id="v2" height="1080"/>
    </AdaptationSet>
  </Period>
  <BaseURL>https://cdn.example.com/</BaseURL>
</MPD>"#;

    #[test]
    fn test_accessors() -> Result<()> {
        let doc = Document::parse(MANIFEST)?;
        let root = doc.root();
        assert_eq!(root.name(), "MPD");
        assert_eq!(root.attribute("type"), Some("static"));
        assert_eq!(root.attribute("missing"), None);
        assert_eq!(root.child_count(), 2);
        assert!(root.parent().is_none());
        assert!(root.value().is_none());
        Ok(())
    }

    #[test]
    fn test_parent_links() -> Result<()> {
        let doc = Document::parse(MANIFEST)?;
        for node in doc.root().all_nodes(0) {
            for child in node.children() {
                assert_eq!(child.parent(), Some(node));
            }
        }
        Ok(())
    }

    #[test]
    fn test_all_nodes_levels() -> Result<()> {
        let doc = Document::parse(MANIFEST)?;
        let root = doc.root();

        assert_eq!(root.all_nodes(1), vec![root]);

        let names: Vec<&str> = root.all_nodes(2).iter().map(|n| n.name()).collect();
        assert_eq!(names, ["MPD", "Period", "BaseURL"]);

        let names: Vec<&str> = root.all_nodes(0).iter().map(|n| n.name()).collect();
        assert_eq!(
            names,
            [
                "MPD",
                "Period",
                "BaseURL",
                "AdaptationSet",
                "Representation",
                "Representation"
            ]
        );
        assert_eq!(root.all_nodes(0).len(), doc.node_count());
        Ok(())
    }

    #[test]
    fn test_text_value() -> Result<()> {
        let doc = Document::parse(MANIFEST)?;
        let base = doc.query("MPD/BaseURL")?;
        assert_eq!(base.len(), 1);
        assert_eq!(base[0].value(), Some("https://cdn.example.com/"));
        Ok(())
    }

    #[test]
    fn test_matches_segment() -> Result<()> {
        let doc = Document::parse(MANIFEST)?;
        let root = doc.root();
        assert!(root.matches("MPD")?);
        assert!(root.matches("*")?);
        assert!(root.matches(r#"*[@type="static"]"#)?);
        assert!(!root.matches(r#"MPD[@type="dynamic"]"#)?);
        assert!(!root.matches("Period")?);
        Ok(())
    }
}
