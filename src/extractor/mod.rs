pub mod cleaner;
pub mod features;
pub mod model;
pub mod reader;

#[cfg(test)]
mod tests;

pub use model::PostFeatures;

use chrono::NaiveDate;

/// Derive the full feature set for one post page.
///
/// Deterministic and side-effect free: the same HTML and publish date always
/// produce the same features. An empty or junk document degrades to the
/// all-zero feature set rather than erroring.
pub fn analyze(html: &str, publish_date: Option<NaiveDate>) -> PostFeatures {
    // 1. Locate the raw, still markup-bearing post body
    let raw_text = reader::extract(html);

    // 2. Structural detectors run on raw text / full HTML, never on the
    //    normalized form
    let tag_count = features::count_tags(&raw_text);
    let has_external_link = features::has_external_link(&raw_text);
    let has_media = features::has_media(html);

    // 3. Normalize and count words over the normalized text
    let post_text = cleaner::normalize(&raw_text);
    let word_count = cleaner::word_count(&post_text);

    PostFeatures {
        post_text,
        word_count,
        tag_count,
        has_external_link,
        has_media,
        day_of_week: features::day_of_week(publish_date),
    }
}
