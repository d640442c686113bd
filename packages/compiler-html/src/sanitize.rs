//! URL and markup sanitization for exported HTML

/// Normalize a link target for an `href`
///
/// - empty (after trimming) → `#`
/// - `http://`, `https://`, `mailto:` and `tel:` targets are kept as given
/// - anything else is treated as a bare host and prefixed with `https://`
///
/// Scheme matching is case-insensitive. The result still has to be
/// attribute-escaped by the caller.
pub fn sanitize_url(url: &str) -> String {
    let trimmed = url.trim();
    if trimmed.is_empty() {
        return "#".to_string();
    }

    let lower = trimmed.to_ascii_lowercase();
    let keep = ["http://", "https://", "mailto:", "tel:"]
        .iter()
        .any(|scheme| lower.starts_with(scheme));

    if keep {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    }
}

/// Strip script-executing constructs from user-supplied markup
///
/// Uses ammonia's default allow-list, extended with `h1` and `button` and the
/// generic attributes `style`, `class` and `align`. Scripts, event handler
/// attributes and `javascript:` URLs never survive.
pub fn sanitize_html(markup: &str) -> String {
    let mut builder = ammonia::Builder::default();
    builder
        .add_tags(&["h1", "button"])
        .add_generic_attributes(&["style", "class", "align"]);

    builder.clean(markup).to_string()
}

pub(crate) fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
