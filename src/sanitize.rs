//! Text sanitization shared by all field/record text emission.
//!
//! Three steps, in order: HTML-unescape, blank out control characters, then
//! HTML-escape the three characters that are unsafe inside slim XML
//! (`<`, `>`, `&`). Because step 3 only re-escapes what step 1 would
//! undo, sanitizing an already-sanitized string is the identity.

use quick_xml::escape::unescape;

/// Sanitize `s` for storage/emission. Returns `None` when `s` is empty.
///
/// Never fails: unescaping input that isn't valid XML-entity syntax falls
/// back to the original text rather than erroring.
#[must_use]
pub fn sanitize(s: Option<&str>) -> Option<String> {
    let s = s?;
    if s.is_empty() {
        return None;
    }

    let unescaped = unescape(s).map(std::borrow::Cow::into_owned).unwrap_or_else(|_| s.to_string());
    let stripped: String = unescaped
        .chars()
        .map(|c| if is_control(c) { ' ' } else { c })
        .collect();
    Some(escape_marc(&stripped))
}

fn is_control(c: char) -> bool {
    let code = u32::from(c);
    (0x00..=0x1F).contains(&code) || (0x7F..=0x9F).contains(&code)
}

fn escape_marc(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
