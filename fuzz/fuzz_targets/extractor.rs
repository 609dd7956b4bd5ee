#![no_main]

use libfuzzer_sys::fuzz_target;

use postscope::extractor::analyze;

fuzz_target!(|data: &[u8]| {
    // Convert raw bytes to string, handling invalid UTF-8 gracefully
    let html = String::from_utf8_lossy(data);

    // Feature extraction should never panic regardless of input, and the
    // reported word count must always agree with the normalized text
    let features = analyze(&html, None);
    assert_eq!(
        features.word_count,
        features.post_text.split_whitespace().count()
    );
});
