//! Small text helpers shared by the importer, the transform pipeline and
//! the DOCX exporter.

use std::borrow::Cow;

use caseless::default_case_fold_str;

/// Case-insensitive sort key for an index entry: the full Unicode case
/// fold (`ß` folds to `ss`).
///
/// Absent entries sort as the empty string, i.e. before everything else.
pub fn sort_key(entry: Option<&str>) -> String {
    entry.map(default_case_fold_str).unwrap_or_default()
}

/// Uppercase form of the first character of `entry`, or `""` when the
/// entry is absent or empty.
///
/// Some characters uppercase to more than one character (`ß` → `SS`), so
/// the result is a `String` rather than a `char`.
pub fn first_letter(entry: Option<&str>) -> String {
    entry
        .and_then(|s| s.chars().next())
        .map(|c| c.to_uppercase().collect())
        .unwrap_or_default()
}

/// Divider heading for a letter group: upper + lower, e.g. `"Aa"`.
///
/// Returns `None` for the empty-letter group, which gets no heading.
pub fn letter_heading(letter: &str) -> Option<String> {
    if letter.is_empty() {
        return None;
    }
    let lower = letter.to_lowercase();
    // Take the first lowercase char only, so "SS" (from ß) reads "SSs"
    // rather than doubling up.
    let lower_first: String = lower.chars().take(1).collect();
    Some(format!("{letter}{lower_first}"))
}

/// Format a spreadsheet number the way it is usually typed: integral
/// values without a decimal point.
pub fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

/// Trim a cell value and map whitespace-only text to `None`.
pub fn non_blank(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Escape XML special characters.
///
/// Characters XML 1.0 does not allow (C0 controls other than tab, LF and
/// CR, and U+FFFE/U+FFFF) are dropped.
pub fn escape_xml(s: &str) -> Cow<'_, str> {
    if !s.contains(|c: char| matches!(c, '&' | '<' | '>' | '"' | '\'') || !is_xml_char(c)) {
        return Cow::Borrowed(s);
    }
    let mut out = String::with_capacity(s.len() + 16);
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c if is_xml_char(c) => out.push(c),
            _ => {}
        }
    }
    Cow::Owned(out)
}

/// `Char` production of XML 1.0.
fn is_xml_char(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n' | '\r'
            | '\u{20}'..='\u{D7FF}'
            | '\u{E000}'..='\u{FFFD}'
            | '\u{10000}'..='\u{10FFFF}'
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_key_casefolds() {
        assert_eq!(sort_key(Some("Apple")), "apple");
        assert_eq!(sort_key(Some("apple")), "apple");
        assert_eq!(sort_key(None), "");
    }

    #[test]
    fn test_sort_key_full_case_fold() {
        assert_eq!(sort_key(Some("Straße")), "strasse");
        // Final and medial sigma fold alike.
        assert_eq!(sort_key(Some("ΟΔΟΣ")), sort_key(Some("οδος")));
        assert_eq!(sort_key(Some("οδος")), sort_key(Some("οδοσ")));
        assert!(sort_key(Some("ßa")) < sort_key(Some("sz")));
    }

    #[test]
    fn test_first_letter() {
        assert_eq!(first_letter(Some("ant")), "A");
        assert_eq!(first_letter(Some("Émile")), "É");
        assert_eq!(first_letter(Some("")), "");
        assert_eq!(first_letter(None), "");
        assert_eq!(first_letter(Some("3D printing")), "3");
    }

    #[test]
    fn test_letter_heading() {
        assert_eq!(letter_heading("A").as_deref(), Some("Aa"));
        assert_eq!(letter_heading("Z").as_deref(), Some("Zz"));
        assert_eq!(letter_heading("3").as_deref(), Some("33"));
        assert_eq!(letter_heading(""), None);
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(12.0), "12");
        assert_eq!(format_number(-3.0), "-3");
        assert_eq!(format_number(12.5), "12.5");
    }

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank("  Zebra "), Some("Zebra".to_string()));
        assert_eq!(non_blank("   "), None);
        assert_eq!(non_blank(""), None);
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("Hello & World"), "Hello &amp; World");
        assert_eq!(escape_xml("<tag>"), "&lt;tag&gt;");
        assert_eq!(escape_xml("\"quoted\""), "&quot;quoted&quot;");
        assert!(matches!(escape_xml("plain"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_escape_xml_drops_control_chars() {
        assert_eq!(escape_xml("Ant\u{0B}eater"), "Anteater");
        assert_eq!(escape_xml("a\u{1}b & c\u{0}"), "ab &amp; c");
        assert_eq!(escape_xml("\u{FFFE}x\u{FFFF}"), "x");
        // Whitespace controls are legal XML.
        assert_eq!(escape_xml("a\tb\nc\rd"), "a\tb\nc\rd");
        assert!(matches!(escape_xml("a\tb"), Cow::Borrowed(_)));
        assert_eq!(escape_xml("Émile \u{1F4D6}"), "Émile \u{1F4D6}");
    }
}
