//! mpdquery - manifest parser with XPath-like path queries
//!
//! Parses the XML-like text of a streaming-media manifest (such as a DASH
//! MPD) into an element tree and answers structural queries against it.
//!
//! # Quick Start
//!
//! ```
//! # fn main() -> Result<(), mpdquery::Error> {
//! let doc = mpdquery::parse(r#"<?xml version="1.0"?>
//! <MPD>
//!   <Period>
//!     <AdaptationSet mimeType="video/mp4">
//!       <Representation id="720p" height="720"/>
//!       <Representation id="1080p" height="1080"/>
//!     </AdaptationSet>
//!   </Period>
//! </MPD>"#)?;
//!
//! let found = doc.query(
//!     r#"MPD/Period/AdaptationSet[@mimeType="video/mp4"]/Representation[@height="1080"]"#,
//! )?;
//! assert_eq!(found.len(), 1);
//! assert_eq!(found[0].attribute("id"), Some("1080p"));
//!
//! let all = doc.query("//Representation")?;
//! assert_eq!(all.len(), 2);
//! # Ok(())
//! # }
//! ```
//!
//! This is not a conforming XML parser: namespaces, CDATA, DOCTYPE and
//! entities are not interpreted, and an element nested inside another element
//! of the same name closes its parent early.

#![forbid(unsafe_code)]

pub mod error;
pub use error::{Error, ErrorKind, Result};

pub mod attribute;
pub use attribute::{parse_tag_content, Attribute};

pub mod node;
pub use node::{Element, Node, NodeId};

pub mod document;
pub use document::{strip_comments, strip_declaration, Config, Document};

pub mod path;
pub use path::{split_outside_quotes, Path, Predicate, Segment};

mod render;

/// Parse a document with the default [`Config`]
pub fn parse(text: &str) -> Result<Document> {
    Document::parse(text)
}

/// Parse a document with custom limits
pub fn parse_with_config(text: &str, config: Config) -> Result<Document> {
    Document::parse_with_config(text, config)
}
