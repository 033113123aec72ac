#![no_main]

use libfuzzer_sys::fuzz_target;
use std::io::Cursor;

fuzz_target!(|data: &[u8]| {
    // Header reading must fail cleanly on anything that is not a list file.
    let mut cursor = Cursor::new(data);
    if let Ok((header, offset)) = mpalist::header::read_and_parse(&mut cursor, 1 << 20) {
        assert!(offset as usize <= data.len());
        let _ = serde_json::to_string(&header);
    }
});
