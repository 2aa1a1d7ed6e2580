//! Helpers for combining several XML documents into one envelope.
//!
//! A well-formed document may carry only one XML declaration, so each part
//! has its declaration stripped before being placed under `<envelope>`.

use std::sync::LazyLock;

use regex::Regex;

/// Root element of the combined document.
pub const ENVELOPE_ROOT: &str = "envelope";

static XML_DECLARATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<\?xml[^>]*\?>").expect("valid regex"));

/// Remove every `<?xml ... ?>` declaration and surrounding whitespace.
pub fn strip_xml_declaration(document: &str) -> String {
    XML_DECLARATION_RE
        .replace_all(document, "")
        .trim()
        .to_string()
}

/// Wrap already-serialized parts in a single `<envelope>` document.
///
/// Parts are inserted in the given order after their declarations have
/// been removed.
pub fn wrap_in_envelope<'a>(parts: impl IntoIterator<Item = &'a str>) -> String {
    let mut out = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    out.push('<');
    out.push_str(ENVELOPE_ROOT);
    out.push_str(">\n");
    for part in parts {
        out.push_str(&strip_xml_declaration(part));
        out.push('\n');
    }
    out.push_str("</");
    out.push_str(ENVELOPE_ROOT);
    out.push('>');
    out
}
