//! Canonicalization of exotic whitespace and dash characters.
//!
//! Chat and notes apps sprinkle non-breaking spaces, zero-width joiners and
//! typographic dashes into hand-typed text. Every later pattern assumes plain
//! ASCII spaces and `-`, so this runs on each line before anything else.

/// Map a fixed set of unicode spaces to ` `, dashes to `-`, and drop
/// zero-width and bidirectional control characters.
///
/// The mapping only ever produces ASCII, so applying it twice gives the same
/// result as applying it once.
pub fn normalize_unicode(text: &str) -> String {
    text.chars().filter_map(map_char).collect()
}

fn map_char(c: char) -> Option<char> {
    match c {
        // No-break, en/em quads and spaces, figure, punctuation, thin, hair,
        // narrow no-break, line and paragraph separators
        '\u{00A0}' | '\u{2000}'..='\u{200A}' | '\u{202F}' | '\u{2028}' | '\u{2029}' => Some(' '),

        // Zero-width space/joiners, BOM, directional marks, embeddings,
        // overrides and isolates
        '\u{200B}'..='\u{200F}' | '\u{FEFF}' | '\u{202A}'..='\u{202E}' | '\u{2066}'..='\u{2069}' => {
            None
        }

        // Hyphen, non-breaking hyphen, figure/en/em dash, horizontal bar,
        // minus sign, small and fullwidth hyphen-minus, soft hyphen
        '\u{2010}'..='\u{2015}' | '\u{2212}' | '\u{FE63}' | '\u{FF0D}' | '\u{00AD}' => Some('-'),

        other => Some(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spaces_become_ascii() {
        assert_eq!(normalize_unicode("Alice\u{00A0}+62\u{2009}811"), "Alice +62 811");
        assert_eq!(normalize_unicode("a\u{2028}b\u{2029}c"), "a b c");
    }

    #[test]
    fn test_zero_width_removed() {
        assert_eq!(normalize_unicode("\u{FEFF}Bo\u{200B}b\u{200E}"), "Bob");
        assert_eq!(normalize_unicode("\u{202A}0812\u{202C}"), "0812");
        assert_eq!(normalize_unicode("\u{2066}x\u{2069}"), "x");
    }

    #[test]
    fn test_dashes_become_hyphen() {
        assert_eq!(
            normalize_unicode("0812\u{2013}3456\u{2014}7890\u{2212}1"),
            "0812-3456-7890-1"
        );
        assert_eq!(normalize_unicode("a\u{00AD}b\u{FF0D}c\u{2011}d"), "a-b-c-d");
    }

    #[test]
    fn test_plain_text_unchanged() {
        assert_eq!(normalize_unicode(""), "");
        assert_eq!(normalize_unicode("Kue lapis (pandan) 150rb"), "Kue lapis (pandan) 150rb");
    }

    #[test]
    fn test_idempotent() {
        let samples = [
            "\u{00A0}\u{200B}\u{2013}mixed\u{2009}text\u{FEFF}",
            "- [x] Budi\u{202F}+62\u{00A0}812\u{2011}3456\u{2011}7890",
            "plain",
            "",
        ];
        for sample in samples {
            let once = normalize_unicode(sample);
            assert_eq!(normalize_unicode(&once), once);
        }
    }
}
