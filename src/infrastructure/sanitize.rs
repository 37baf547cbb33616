//! Form input cleanup and HTML escaping

use once_cell::sync::Lazy;
use regex::Regex;

static SCRIPT_OR_STYLE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<script[^>]*>.*?</script\s*>|<style[^>]*>.*?</style\s*>")
        .expect("valid script/style pattern")
});

static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("valid tag pattern"));

static PERCENT_OCTET: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"%[a-fA-F0-9]{2}").expect("valid octet pattern"));

static WHITESPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\r\n\t ]+").expect("valid whitespace pattern"));

/// Clean a single-line text field submitted through the settings form
///
/// Removes markup (including the content of `script`/`style` elements),
/// percent-encoded octets, line breaks and tabs, collapses runs of
/// whitespace and trims the result.
pub fn sanitize_text_field(input: &str) -> String {
    let without_scripts = SCRIPT_OR_STYLE.replace_all(input, "");
    let without_tags = TAG.replace_all(&without_scripts, "");

    let mut text = without_tags.into_owned();

    // Removing one octet can expose another ("%%4141")
    while PERCENT_OCTET.is_match(&text) {
        text = PERCENT_OCTET.replace_all(&text, "").into_owned();
    }

    WHITESPACE.replace_all(&text, " ").trim().to_string()
}

/// Sanitize an optional field; blank input becomes `None`
pub fn sanitize_optional_field(input: Option<&str>) -> Option<String> {
    input
        .map(sanitize_text_field)
        .filter(|value| !value.is_empty())
}

/// Escape text for use in HTML element content and quoted attribute values
pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());

    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }

    escaped
}
