//! Document parsing: declaration and comment removal, then tree construction

mod builder;

use tracing::{debug, instrument, trace};

use crate::error::{Error, ErrorKind, Result};
use crate::node::{Element, Node, NodeId};
use builder::TreeBuilder;

const DECLARATION_OPEN: &str = "<?xml";
const DECLARATION_CLOSE: &str = "?>";
const COMMENT_OPEN: &str = "<!--";
const COMMENT_CLOSE: &str = "-->";

/// Parse limits for untrusted manifests
///
/// A limit of `0` disables that check.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    /// Deepest element nesting accepted, counting the root as level 1
    pub max_depth: u16,
    /// Largest manifest accepted, in bytes of raw text
    pub max_size: usize,
}

impl Default for Config {
    /// 128 nested elements, 10 MiB of text
    fn default() -> Self {
        Self::new(128, 10 * 1024 * 1024)
    }
}

impl Config {
    /// No depth or size checks
    pub const fn unlimited() -> Self {
        Self::new(0, 0)
    }

    pub const fn new(max_depth: u16, max_size: usize) -> Self {
        Self {
            max_depth,
            max_size,
        }
    }
}

/// A parsed document: an arena of elements in document order, rooted at
/// [`NodeId::ROOT`]
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Document {
    elements: Vec<Element>,
}

impl Document {
    /// Parse a document with the default [`Config`]
    pub fn parse(text: &str) -> Result<Self> {
        Self::parse_with_config(text, Config::default())
    }

    #[instrument(level = "debug", skip(text), fields(len = text.len()))]
    pub fn parse_with_config(text: &str, config: Config) -> Result<Self> {
        if config.max_size > 0 && text.len() > config.max_size {
            return Err(Error::new(ErrorKind::MaxSizeExceeded {
                max: config.max_size,
            }));
        }

        let content = strip_comments(strip_declaration(text)?)?;
        let elements = TreeBuilder::new(&content, config).build()?;
        debug!(nodes = elements.len(), "document parsed");

        Ok(Self { elements })
    }

    #[allow(clippy::indexing_slicing)]
    pub fn root(&self) -> Node<'_> {
        // The builder always stores the root first.
        Node::new(self, NodeId::ROOT, &self.elements[NodeId::ROOT.index()])
    }

    pub fn get(&self, id: NodeId) -> Option<Node<'_>> {
        self.elements
            .get(id.index())
            .map(|element| Node::new(self, id, element))
    }

    /// Every node in document order
    pub fn nodes(&self) -> impl Iterator<Item = Node<'_>> {
        self.elements
            .iter()
            .enumerate()
            .map(move |(index, element)| Node::new(self, NodeId(index), element))
    }

    pub fn node_count(&self) -> usize {
        self.elements.len()
    }

    /// All nodes matching `path`, starting from the root
    pub fn query(&self, path: &str) -> Result<Vec<Node<'_>>> {
        self.root().query(path)
    }
}

/// Drop a leading `<?xml ... ?>` declaration together with everything before it
pub fn strip_declaration(text: &str) -> Result<&str> {
    let Some(start) = text.find(DECLARATION_OPEN) else {
        return Ok(text);
    };

    let after_open = start + DECLARATION_OPEN.len();
    let Some(close) = text
        .get(after_open..)
        .and_then(|rest| rest.find(DECLARATION_CLOSE))
    else {
        return Err(Error::at(ErrorKind::MalformedDeclaration, start));
    };

    let end = after_open + close + DECLARATION_CLOSE.len();
    trace!(start, end, "removing xml declaration");
    Ok(text.get(end..).unwrap_or_default())
}

/// Remove every `<!-- ... -->` comment
///
/// Removal repeats until no opener is left, so running it on its own output
/// changes nothing.
pub fn strip_comments(text: &str) -> Result<String> {
    let mut content = text.to_string();
    let mut search_from = 0;

    while let Some(found) = content
        .get(search_from..)
        .and_then(|rest| rest.find(COMMENT_OPEN))
    {
        let start = search_from + found;
        let after_open = start + COMMENT_OPEN.len();
        let Some(close) = content
            .get(after_open..)
            .and_then(|rest| rest.find(COMMENT_CLOSE))
        else {
            return Err(Error::at(ErrorKind::UnterminatedComment, start));
        };

        let end = after_open + close + COMMENT_CLOSE.len();
        trace!(start, end, "removing comment");
        content.replace_range(start..end, "");

        // Splicing can only form a new opener across the removed range.
        search_from =
            floor_char_boundary(&content, start.saturating_sub(COMMENT_OPEN.len() - 1));
    }

    Ok(content)
}

fn floor_char_boundary(text: &str, mut index: usize) -> usize {
    while index > 0 && !text.is_char_boundary(index) {
        index -= 1;
    }
    index
}
