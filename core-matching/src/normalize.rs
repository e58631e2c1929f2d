//! Text normalization for fuzzy track comparison
//!
//! Catalogs disagree on casing, punctuation, and how featuring artists are
//! annotated ("feat.", "ft.", bracketed or not). Normalizing both sides
//! before scoring keeps those cosmetic differences from dragging down the
//! similarity of genuinely identical tracks.

use unicode_normalization::UnicodeNormalization;

/// Markers that introduce a featuring-artist annotation. Everything from the
/// marker onward is dropped, which also removes trailing brackets.
const FEATURING_MARKERS: &[&str] = &[
    "(feat", "[feat", "(ft.", "[ft.", " feat.", " feat ", " ft. ", " featuring ",
];

/// Normalize a title or artist string for comparison.
///
/// Applies NFKC folding, lowercases, strips featuring-artist annotations,
/// replaces punctuation with spaces, and collapses whitespace.
///
/// # Example
///
/// ```
/// use core_matching::normalize;
///
/// assert_eq!(normalize("MONTERO (feat. Jack Harlow)"), "montero");
/// assert_eq!(normalize("Don't Stop Me Now"), "don t stop me now");
/// ```
pub fn normalize(text: &str) -> String {
    let folded: String = text.nfkc().collect();
    let lower = folded.to_lowercase();
    let stripped = strip_featuring(&lower);

    let mut cleaned = String::with_capacity(stripped.len());
    for ch in stripped.chars() {
        if ch.is_alphanumeric() {
            cleaned.push(ch);
        } else {
            cleaned.push(' ');
        }
    }

    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn strip_featuring(text: &str) -> &str {
    let mut cut = text.len();
    for marker in FEATURING_MARKERS {
        if let Some(idx) = text.find(marker) {
            cut = cut.min(idx);
        }
    }
    &text[..cut]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercases_and_strips_punctuation() {
        assert_eq!(normalize("Karma Police!"), "karma police");
        assert_eq!(normalize("R.E.M."), "r e m");
    }

    #[test]
    fn test_strips_featuring_annotations() {
        assert_eq!(normalize("Song Title (feat. Someone)"), "song title");
        assert_eq!(normalize("Song Title feat. Someone"), "song title");
        assert_eq!(normalize("Song Title ft. Someone"), "song title");
        assert_eq!(normalize("Song Title [feat. A & B]"), "song title");
    }

    #[test]
    fn test_collapses_whitespace() {
        assert_eq!(normalize("  spaced   out  "), "spaced out");
    }

    #[test]
    fn test_nfkc_folds_fullwidth_forms() {
        // Fullwidth Latin letters fold to ASCII under NFKC
        assert_eq!(normalize("ＡＢＣ"), "abc");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_does_not_cut_words_containing_feat() {
        // "defeat" contains "feat" but no marker matches mid-word
        assert_eq!(normalize("Defeat"), "defeat");
    }
}
