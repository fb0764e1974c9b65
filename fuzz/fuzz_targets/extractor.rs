#![no_main]

use libfuzzer_sys::fuzz_target;

use zerowash::extractor::{MAX_TEXT_CHARS, extract_text};

fuzz_target!(|data: &[u8]| {
    let html = String::from_utf8_lossy(data);

    // Never panics, never exceeds the bound, never emits blank lines
    if let Ok(text) = extract_text(&html) {
        assert!(text.chars().count() <= MAX_TEXT_CHARS);
        assert!(text.is_empty() || text.lines().all(|line| !line.trim().is_empty()));
    }
});
