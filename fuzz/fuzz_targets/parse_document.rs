#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(doc) = mpdquery::parse(s) {
            let root = doc.root();
            assert_eq!(root.all_nodes(0).len(), doc.node_count());
            let _ = root.print_content("");
        }
    }
});
