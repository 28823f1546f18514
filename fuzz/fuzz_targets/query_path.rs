#![no_main]
use libfuzzer_sys::fuzz_target;

const MANIFEST: &str = r#"<MPD type="static">
  <Period id="0">
    <AdaptationSet mimeType="video/mp4">
      <Representation id="720" height="720"/>
      <Representation id="1080" height="1080"/>
    </AdaptationSet>
    <AdaptationSet mimeType="audio/mp4" lang="en">
      <Representation id="audio"/>
    </AdaptationSet>
  </Period>
</MPD>"#;

fuzz_target!(|data: &[u8]| {
    let Ok(path) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(doc) = mpdquery::parse(MANIFEST) else {
        return;
    };
    if let Ok(found) = doc.query(path) {
        assert!(found.len() <= doc.node_count());
    }
});
