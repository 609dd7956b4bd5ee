//! Structural feature detectors.
//!
//! Each detector is a pure function over either the raw extracted text or
//! the full page HTML — never over normalized text, which has already lost
//! the markup and URLs the detectors look for. Detectors never fail:
//! absent or unparseable input maps to the type's no-signal value.

use chrono::{Datelike, NaiveDate, Weekday};
use regex::Regex;
use scraper::{Html, Selector};
use std::sync::LazyLock;

use crate::extractor::cleaner::strip_tags;

/// Outbound links are wrapped in the platform's short-link redirector; its
/// literal prefix in the raw content is the external-link signal.
const SHORT_LINK_PREFIX: &str = "https://lnkd.in";

/// Preview image URL for a post with an attached image or shared article.
static ARTICLE_SHARE_IMAGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https://media\.licdn\.com/dms/image/sync/v2/.+/articleshare").unwrap()
});

/// Fallback static-asset variant of the same signal.
const STATIC_MEDIA_PREFIX: &str = "https://static.licdn.com/aero-v1";

static HASHTAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"#\w+").unwrap());

/// Count hashtags in the raw post content.
///
/// Markup is stripped first so tags inside elements still count once, then
/// non-overlapping `#word` matches are counted. Mentions and "thanks to"
/// style phrases deliberately do not count; see DESIGN.md.
pub fn count_tags(raw_content: &str) -> usize {
    if raw_content.is_empty() {
        return 0;
    }
    let text = strip_tags(raw_content);
    HASHTAG.find_iter(&text).count()
}

/// True iff the raw (pre-normalization) content carries the short-link
/// redirector. Normalized text can no longer answer this.
pub fn has_external_link(raw_content: &str) -> bool {
    raw_content.contains(SHORT_LINK_PREFIX)
}

/// True iff the page's og:image preview points at the platform's media CDN,
/// either the article-share render or the static-asset variant.
pub fn has_media(html: &str) -> bool {
    if html.is_empty() {
        return false;
    }

    let document = Html::parse_document(html);
    let Ok(selector) = Selector::parse("meta[property='og:image']") else {
        return false;
    };

    if let Some(element) = document.select(&selector).next()
        && let Some(content) = element.value().attr("content")
    {
        return ARTICLE_SHARE_IMAGE.is_match(content) || content.contains(STATIC_MEDIA_PREFIX);
    }

    false
}

/// Calendar weekday of the publish date, when one is known.
pub fn day_of_week(publish_date: Option<NaiveDate>) -> Option<Weekday> {
    publish_date.map(|date| date.weekday())
}

/// English weekday name as reported in the dataset.
pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}
