//! Hyperlink carving.
//!
//! Finished comment, string and preprocessor tokens are re-scanned for
//! clickable substrings. A match splits the token into plain pieces and
//! hyperlink pieces that share the token's kind; the pieces always cover the
//! original token exactly.

use std::ops::Range;

use once_cell::sync::Lazy;
use regex::Regex;

/// Generic URL pattern for comments and strings.
const URL_PATTERN: &str = r"(https?|ftp|file)://[-a-zA-Z0-9+&@#/%?=~_|!:,.;]*[-a-zA-Z0-9+&@#/%=~_|]";

/// Quoted path pattern for preprocessor lines (`#include "file.dh"`).
const QUOTED_PATH_PATTERN: &str = r#"".+""#;

static URL: Lazy<Regex> = Lazy::new(|| Regex::new(URL_PATTERN).expect("valid URL pattern"));
static QUOTED_PATH: Lazy<Regex> =
    Lazy::new(|| Regex::new(QUOTED_PATH_PATTERN).expect("valid quoted path pattern"));

/// Which pattern a hyperlinkable token is scanned with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkPattern {
    /// `http://`, `https://`, `ftp://` and `file://` URLs.
    Url,
    /// A double-quoted path; the link excludes the quotes.
    QuotedPath,
}

impl LinkPattern {
    fn regex(self) -> &'static Regex {
        match self {
            LinkPattern::Url => &URL,
            LinkPattern::QuotedPath => &QUOTED_PATH,
        }
    }

    /// Shrinks a match to the part that becomes the link.
    fn link_range(self, found: Range<usize>) -> Range<usize> {
        match self {
            LinkPattern::Url => found,
            LinkPattern::QuotedPath => found.start + 1..found.end - 1,
        }
    }
}

/// One piece of a carved token, relative to the token's text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    /// Byte range within the token text.
    pub range: Range<usize>,
    /// Whether this piece is the hyperlink itself.
    pub hyperlink: bool,
}

/// Splits `text` into plain and hyperlink pieces.
///
/// Returns a single plain piece when nothing matches. Empty pieces are never
/// produced.
///
/// # Example
///
/// ```
/// use dtk_lex::hyperlink::{carve, LinkPattern};
///
/// let pieces = carve("// see http://example.com/x now", LinkPattern::Url);
/// assert_eq!(pieces.len(), 3);
/// assert_eq!(pieces[1].range, 7..27);
/// assert!(pieces[1].hyperlink);
/// ```
pub fn carve(text: &str, pattern: LinkPattern) -> Vec<Piece> {
    let mut pieces = Vec::new();
    let mut scanned = 0;

    for found in pattern.regex().find_iter(text) {
        let link = pattern.link_range(found.range());
        if link.is_empty() {
            continue;
        }
        if scanned < link.start {
            pieces.push(Piece {
                range: scanned..link.start,
                hyperlink: false,
            });
        }
        scanned = link.end;
        pieces.push(Piece {
            range: link,
            hyperlink: true,
        });
    }

    if scanned < text.len() {
        pieces.push(Piece {
            range: scanned..text.len(),
            hyperlink: false,
        });
    }
    pieces
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts<'a>(text: &'a str, pieces: &[Piece]) -> Vec<(&'a str, bool)> {
        pieces
            .iter()
            .map(|piece| (&text[piece.range.clone()], piece.hyperlink))
            .collect()
    }

    #[test]
    fn test_patterns_compile() {
        assert!(LinkPattern::Url.regex().is_match("https://example.com"));
        assert!(LinkPattern::QuotedPath.regex().is_match("\"a.dh\""));
    }

    #[test]
    fn test_no_match_is_single_plain_piece() {
        let text = "// nothing to see";
        let pieces = carve(text, LinkPattern::Url);
        assert_eq!(texts(text, &pieces), vec![(text, false)]);
    }

    #[test]
    fn test_url_in_middle() {
        let text = "// docs at https://example.com/a?b=c. done";
        let pieces = carve(text, LinkPattern::Url);
        assert_eq!(
            texts(text, &pieces),
            vec![
                ("// docs at ", false),
                ("https://example.com/a?b=c", true),
                (". done", false),
            ]
        );
    }

    #[test]
    fn test_url_at_end_has_no_trailing_piece() {
        let text = "# ftp://host/file";
        let pieces = carve(text, LinkPattern::Url);
        assert_eq!(
            texts(text, &pieces),
            vec![("# ", false), ("ftp://host/file", true)]
        );
    }

    #[test]
    fn test_multiple_urls() {
        let text = "http://a.b x file:///c";
        let pieces = carve(text, LinkPattern::Url);
        assert_eq!(
            texts(text, &pieces),
            vec![("http://a.b", true), (" x ", false), ("file:///c", true)]
        );
    }

    #[test]
    fn test_quoted_path_excludes_quotes() {
        let text = "#include \"lib/weapons.dh\"";
        let pieces = carve(text, LinkPattern::QuotedPath);
        assert_eq!(
            texts(text, &pieces),
            vec![
                ("#include \"", false),
                ("lib/weapons.dh", true),
                ("\"", false),
            ]
        );
    }

    #[test]
    fn test_quoted_path_needs_content() {
        let text = "#include \"\"";
        let pieces = carve(text, LinkPattern::QuotedPath);
        assert_eq!(texts(text, &pieces), vec![(text, false)]);
    }

    #[test]
    fn test_pieces_cover_text() {
        let text = "/* http://x.y/z and http://q.r */";
        let pieces = carve(text, LinkPattern::Url);
        let mut next = 0;
        for piece in &pieces {
            assert_eq!(piece.range.start, next);
            assert!(!piece.range.is_empty());
            next = piece.range.end;
        }
        assert_eq!(next, text.len());
    }

    #[test]
    fn test_scheme_without_body_is_not_a_link() {
        let text = "http://";
        let pieces = carve(text, LinkPattern::Url);
        assert_eq!(texts(text, &pieces), vec![(text, false)]);
    }
}
