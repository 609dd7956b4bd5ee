use chrono::{NaiveDate, Weekday};
use std::fs;

use crate::extractor::analyze;

fn fixture(name: &str) -> String {
    fs::read_to_string(format!("src/extractor/tests/fixtures/{name}"))
        .expect("Failed to read test fixture")
}

#[test]
fn analyze_share_page_with_link_and_media() {
    let html = fixture("share_page.html");
    let published = NaiveDate::from_ymd_opt(2024, 3, 6).unwrap(); // a Wednesday

    let features = analyze(&html, Some(published));

    assert_eq!(features.tag_count, 3);
    assert!(features.has_external_link);
    assert!(features.has_media);
    assert_eq!(features.day_of_week, Some(Weekday::Wed));

    assert!(features.post_text.starts_with("Shipping week is here!"));
    assert!(!features.post_text.contains('<'));
    assert!(!features.post_text.contains("lnkd"));
    assert!(!features.post_text.contains("http"));
    assert!(!features.post_text.contains('#'));
    assert!(!features.post_text.contains("  "));

    assert_eq!(
        features.word_count,
        features.post_text.split_whitespace().count()
    );
    assert!(features.word_count > 30);
}

#[test]
fn analyze_plain_text_post() {
    let html = fixture("text_only_post.html");

    let features = analyze(&html, None);

    assert_eq!(features.tag_count, 0);
    assert!(!features.has_external_link);
    // The og:image points at a profile photo, not the media CDN
    assert!(!features.has_media);
    assert_eq!(features.day_of_week, None);
    assert!(features.post_text.starts_with("We are hiring"));
    assert!(features.word_count > 10);
}

#[test]
fn analyze_login_wall_degrades_to_zero() {
    let html = fixture("login_wall.html");
    let published = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();

    let features = analyze(&html, Some(published));

    assert_eq!(features.post_text, "");
    assert_eq!(features.word_count, 0);
    assert_eq!(features.tag_count, 0);
    assert!(!features.has_external_link);
    assert!(!features.has_media);
    // The weekday only needs the input record, so it survives
    assert_eq!(features.day_of_week, Some(Weekday::Mon));
}

#[test]
fn analyze_empty_document_degrades_to_zero() {
    let features = analyze("", None);

    assert_eq!(features.post_text, "");
    assert_eq!(features.word_count, 0);
    assert_eq!(features.tag_count, 0);
    assert!(!features.has_external_link);
    assert!(!features.has_media);
    assert_eq!(features.day_of_week, None);
}

#[test]
fn analyze_malformed_html() {
    let html = "<html><head><meta name=\"description\" content=\"Unclosed #doc\"><body><div>More";
    let features = analyze(html, None);

    assert_eq!(features.post_text, "Unclosed doc");
    assert_eq!(features.word_count, 2);
    assert_eq!(features.tag_count, 1);
}

#[cfg(feature = "fuzz")]
mod fuzz {
    use super::*;
    use crate::extractor::cleaner::normalize;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn analyze_never_panics(html in ".*") {
            let features = analyze(&html, None);
            // Word count always agrees with the normalized text
            prop_assert_eq!(features.word_count, features.post_text.split_whitespace().count());
        }

        #[test]
        fn normalize_is_idempotent(raw in ".*") {
            let once = normalize(&raw);
            prop_assert_eq!(normalize(&once), once);
        }

        #[test]
        fn normalize_leaves_no_short_links(raw in ".*") {
            let normalized = normalize(&raw);
            prop_assert!(!normalized.contains("https://lnkd.in/"));
            prop_assert!(!normalized.contains('<'));
        }
    }
}
