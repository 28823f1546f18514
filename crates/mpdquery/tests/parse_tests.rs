#![allow(clippy::panic_in_result_fn)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::indexing_slicing)]

use mpdquery::{
    parse, parse_with_config, strip_comments, Attribute, Config, Document, ErrorKind, NodeId,
    Result,
};

const MANIFEST: &str = include_str!("fixtures/valid/manifest.mpd");

#[test]
fn test_parse_manifest_structure() -> Result<()> {
    let doc = parse(MANIFEST)?;
    let root = doc.root();

    assert_eq!(root.name(), "MPD");
    assert_eq!(root.attribute("type"), Some("static"));
    assert_eq!(
        root.attribute("profiles"),
        Some("urn:mpeg:dash:profile:isoff-on-demand:2011")
    );

    let children: Vec<&str> = root.children().map(|c| c.name()).collect();
    assert_eq!(children, ["Period", "BaseURL"]);
    assert_eq!(doc.node_count(), 11);
    Ok(())
}

#[test]
fn test_comments_never_become_nodes() -> Result<()> {
    let doc = parse(MANIFEST)?;
    assert!(doc.nodes().all(|node| !node.name().starts_with('!')));

    let periods = doc.query("MPD/Period")?;
    let sets: Vec<&str> = periods[0]
        .children()
        .filter_map(|c| c.attribute("mimeType"))
        .collect();
    assert_eq!(sets, ["video/mp4", "audio/mp4"]);
    Ok(())
}

#[test]
fn test_self_closing_element() -> Result<()> {
    let doc = parse(r#"<a x="1"/>"#)?;
    let root = doc.root();
    assert_eq!(root.name(), "a");
    assert_eq!(root.attributes(), [Attribute::new("x", "1")]);
    assert!(!root.has_children());
    assert_eq!(root.value(), None);
    assert_eq!(root.to_open_tag_xml(), r#"<a x="1" >"#);
    Ok(())
}

#[test]
fn test_text_values() -> Result<()> {
    let doc = parse(MANIFEST)?;
    let base = doc.query("MPD/BaseURL")?;
    assert_eq!(base[0].value(), Some("https://cdn.example.com/stream/"));
    assert_eq!(doc.root().value(), None);
    Ok(())
}

#[test]
fn test_multiline_tags() -> Result<()> {
    let doc = parse(include_str!("fixtures/valid/live.mpd"))?;
    let root = doc.root();
    assert_eq!(root.attribute("type"), Some("dynamic"));
    assert_eq!(root.attribute("minimumUpdatePeriod"), Some("PT2S"));

    let label = doc.query("//Label")?;
    assert_eq!(label[0].value(), Some("English subtitles"));
    Ok(())
}

#[test]
fn test_attribute_lookup_returns_first_duplicate() -> Result<()> {
    let doc = parse(r#"<a k="first" k="second"/>"#)?;
    assert_eq!(doc.root().attribute("k"), Some("first"));
    assert_eq!(doc.root().attributes().len(), 2);
    Ok(())
}

#[test]
fn test_missing_end_tag() {
    let err = parse("<a><b></a>").unwrap_err();
    assert_eq!(
        err.kind(),
        &ErrorKind::NoClosingTag {
            name: "b".to_string()
        }
    );
    assert!(!err.kind().is_query_error());
}

#[test]
fn test_declaration_errors() {
    let err = parse(r#"<?xml version="1.0" <a/>"#).unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::MalformedDeclaration);

    let err = parse("<a><!-- open </a>").unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::UnterminatedComment);
}

#[test]
fn test_comment_stripping_is_idempotent() -> Result<()> {
    let once = strip_comments(MANIFEST)?;
    assert_eq!(strip_comments(&once)?, once);
    assert!(!once.contains("<!--"));
    Ok(())
}

#[test]
fn test_parent_ids() -> Result<()> {
    let doc = parse("<r><a><b/></a></r>")?;
    let b = doc.get(NodeId::ROOT).unwrap().all_nodes(0)[2];
    assert_eq!(b.name(), "b");
    assert_eq!(b.parent().map(|p| p.name()), Some("a"));
    assert_eq!(
        b.parent().and_then(|p| p.parent()).map(|p| p.id()),
        Some(NodeId::ROOT)
    );
    assert!(doc.get(NodeId::ROOT).unwrap().parent().is_none());
    Ok(())
}

#[test]
fn test_depth_limit() {
    let open: String = (0..5).map(|i| format!("<n{i}>")).collect();
    let close: String = (0..5).rev().map(|i| format!("</n{i}>")).collect();
    let nested = format!("{open}{close}");
    assert!(parse_with_config(&nested, Config::new(5, 0)).is_ok());

    let err = parse_with_config(&nested, Config::new(3, 0)).unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::MaxDepthExceeded { max: 3 });
}

#[test]
fn test_reparse_replaces_tree() -> Result<()> {
    let mut doc = Document::parse("<a/>")?;
    assert_eq!(doc.root().name(), "a");
    doc = Document::parse("<b><c/></b>")?;
    assert_eq!(doc.root().name(), "b");
    assert_eq!(doc.node_count(), 2);
    Ok(())
}

#[cfg(feature = "serde")]
#[test]
fn test_serialize_document() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let doc = parse(r#"<a k="v"><b>t</b></a>"#)?;
    let json = serde_json::to_value(&doc)?;
    assert_eq!(json["elements"][0]["name"], "a");
    assert_eq!(json["elements"][0]["attributes"][0]["value"], "v");
    assert_eq!(json["elements"][1]["value"], "t");
    assert_eq!(json["elements"][1]["parent"], 0);
    Ok(())
}
