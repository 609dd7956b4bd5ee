use scraper::{Html, Selector};

/// Pull the raw post body out of a fetched share page.
///
/// The unauthenticated share page carries the full post text in its
/// `<meta name="description">` tag; the interactive post-body containers
/// only exist in the client-rendered DOM and never reach us. Returns the
/// trimmed attribute value, still markup/URL-bearing, or an empty string
/// when the tag is missing or empty.
pub fn extract(html: &str) -> String {
    if html.is_empty() {
        return String::new();
    }

    let document = Html::parse_document(html);
    let Ok(selector) = Selector::parse("meta[name='description']") else {
        return String::new();
    };

    if let Some(element) = document.select(&selector).next()
        && let Some(content) = element.value().attr("content")
    {
        return content.trim().to_string();
    }

    String::new()
}
