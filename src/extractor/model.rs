use chrono::Weekday;

/// Features derived from one fetched post page.
///
/// Every field is computed from that row's own HTML and publish date; no
/// field depends on any other row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostFeatures {
    /// Post body after markup stripping and text normalization.
    pub post_text: String,
    /// Whitespace-delimited token count of `post_text`.
    pub word_count: usize,
    /// Number of hashtags in the raw (pre-normalization) post body.
    pub tag_count: usize,
    /// Whether the raw body carries the site's outbound-link redirector.
    pub has_external_link: bool,
    /// Whether the page advertises an attached image or article share.
    pub has_media: bool,
    /// Calendar weekday the post was published, when the date is known.
    pub day_of_week: Option<Weekday>,
}

impl PostFeatures {
    /// The degraded feature set for a failed or empty fetch. The weekday is
    /// still derived because it depends only on the input record.
    pub fn empty(day_of_week: Option<Weekday>) -> Self {
        Self {
            post_text: String::new(),
            word_count: 0,
            tag_count: 0,
            has_external_link: false,
            has_media: false,
            day_of_week,
        }
    }
}
