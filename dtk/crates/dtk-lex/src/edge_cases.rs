//! Edge case tests for dtk-lex

#[cfg(test)]
mod tests {
    use crate::{Language, LexError, LineState, TokenKind};

    fn lex_all(language: Language, source: &str) -> Vec<(&'static str, String)> {
        language
            .tokenize(source, LineState::Neutral, 0)
            .iter()
            .map(|t| (t.kind.name(), t.text(source).to_string()))
            .collect()
    }

    fn kinds(language: Language, source: &str) -> Vec<&'static str> {
        lex_all(language, source).into_iter().map(|(kind, _)| kind).collect()
    }

    fn lex_from(
        language: Language,
        source: &str,
        state: LineState,
    ) -> (Vec<&'static str>, LineState) {
        let stream = language.tokenize(source, state, 0);
        let kinds = stream.iter().map(|t| t.kind.name()).collect();
        (kinds, stream.next_state())
    }

    // ==================== EDGE CASES ====================

    #[test]
    fn test_edge_empty_segment() {
        for language in Language::ALL {
            let stream = language.tokenize("", LineState::Neutral, 0);
            assert!(stream.is_empty());
            assert_eq!(stream.next_state(), LineState::Neutral);
            assert!(stream.into_iter().next().is_none());
        }
    }

    #[test]
    fn test_edge_newline_only() {
        for language in Language::ALL {
            assert_eq!(kinds(language, "\n"), vec!["Whitespace"], "{}", language);
        }
    }

    #[test]
    fn test_edge_long_identifier() {
        let name = "a".repeat(10000);
        assert_eq!(lex_all(Language::WadScript, &name), vec![("Identifier", name)]);
    }

    #[test]
    fn test_edge_many_separators() {
        let source = "{".repeat(1000);
        let found = kinds(Language::DecoHack, &source);
        assert_eq!(found.len(), 1000);
        assert!(found.iter().all(|kind| *kind == "Separator"));
    }

    #[test]
    fn test_edge_crlf() {
        assert_eq!(
            kinds(Language::DecoHack, "x\r\ny"),
            vec!["Identifier", "Whitespace", "Whitespace", "Identifier"]
        );
    }

    #[test]
    fn test_edge_unicode_comment() {
        let source = "// héllo → ünïcode";
        let stream = Language::DecoHack.tokenize(source, LineState::Neutral, 0);
        assert_eq!(stream.len(), 1);
        assert_eq!(stream.tokens()[0].end, source.len() - 1);
    }

    #[test]
    fn test_edge_unicode_identifier() {
        assert_eq!(lex_all(Language::RookScript, "größe")[0], ("Identifier", "größe".into()));
    }

    #[test]
    fn test_edge_control_characters() {
        for language in Language::ALL {
            let source = "\0\u{7}\u{1b}[0m";
            let stream = language.tokenize(source, LineState::Neutral, 0);
            let covered: usize = stream.iter().map(|t| t.len()).sum();
            assert_eq!(covered, source.len());
        }
    }

    #[test]
    fn test_edge_large_document_offset() {
        let base = usize::MAX - 16;
        let stream = Language::DoomMake.tokenize("a b", LineState::Neutral, base);
        assert_eq!(stream.tokens()[2].document_offset, base + 2);
    }

    #[test]
    fn test_edge_preprocessor_continuation() {
        let (found, state) = lex_from(Language::DecoHack, "#define X \\  ", LineState::Neutral);
        assert_eq!(found, vec!["Preprocessor"]);
        assert_eq!(state, LineState::Preprocessor);

        let (found, state) = lex_from(Language::DecoHack, "  1", LineState::Preprocessor);
        assert_eq!(found, vec!["Preprocessor"]);
        assert_eq!(state, LineState::Neutral);
    }

    #[test]
    fn test_edge_doubled_backslash_does_not_continue() {
        let (_, state) = lex_from(Language::RookScript, "#x \\\\", LineState::Neutral);
        assert_eq!(state, LineState::Neutral);

        let (_, state) = lex_from(Language::DecoHack, "#x \\\\\\ ", LineState::Neutral);
        assert_eq!(state, LineState::Preprocessor);
    }

    #[test]
    fn test_edge_backslash_mid_line_does_not_continue() {
        let (_, state) = lex_from(Language::RookScript, "#x \\ y", LineState::Neutral);
        assert_eq!(state, LineState::Neutral);
    }

    #[test]
    fn test_edge_preprocessor_ends_at_empty_line() {
        let (found, state) = lex_from(Language::DecoHack, "", LineState::Preprocessor);
        assert!(found.is_empty());
        assert_eq!(state, LineState::Neutral);
    }

    #[test]
    fn test_edge_comment_survives_empty_line() {
        let (found, state) = lex_from(Language::WadScript, "", LineState::BlockComment);
        assert!(found.is_empty());
        assert_eq!(state, LineState::BlockComment);
    }

    #[test]
    fn test_edge_backquote_spans_lines() {
        let (found, state) = lex_from(Language::DecoHack, "`abc", LineState::Neutral);
        assert_eq!(found, vec!["Backquote"]);
        assert_eq!(state, LineState::Backquote);

        let (found, state) = lex_from(Language::DecoHack, "def` x", state);
        assert_eq!(found, vec!["Backquote", "Whitespace", "Identifier"]);
        assert_eq!(state, LineState::Neutral);
    }

    #[test]
    fn test_edge_empty_doc_comment() {
        let (found, state) = lex_from(Language::DecoHack, "/**/", LineState::Neutral);
        assert_eq!(found, vec!["CommentDoc"]);
        assert_eq!(state, LineState::Neutral);
    }

    #[test]
    fn test_edge_lone_slash() {
        assert_eq!(kinds(Language::RookScript, "/"), vec!["Operator"]);
        assert_eq!(
            kinds(Language::RookScript, "a/b"),
            vec!["Identifier", "Operator", "Identifier"]
        );
    }

    #[test]
    fn test_edge_lone_dollar() {
        assert_eq!(lex_all(Language::WadMerge, "$"), vec![("Variable", "$".into())]);
        assert_eq!(
            kinds(Language::WadMerge, "$ x"),
            vec!["Variable", "Whitespace", "Identifier"]
        );
    }

    #[test]
    fn test_edge_argument_inside_word() {
        assert_eq!(
            lex_all(Language::WadMerge, "map$1x"),
            vec![
                ("Identifier", "map".into()),
                ("Variable", "$1".into()),
                ("Identifier", "x".into()),
            ]
        );
    }

    #[test]
    fn test_edge_patch_marker_with_tab() {
        assert_eq!(
            kinds(Language::DeuTex, "*\tP 0 0")[..3],
            ["PatchMarker", "Whitespace", "PatchName"]
        );
    }

    #[test]
    fn test_edge_comment_marker_only() {
        assert_eq!(kinds(Language::DefSwAni, "#"), vec!["CommentEol"]);
        assert_eq!(kinds(Language::DeuTex, ";"), vec!["CommentEol"]);
        assert_eq!(kinds(Language::WadMerge, "#"), vec!["CommentEol"]);
    }

    // ==================== ERROR CASES ====================

    #[test]
    fn test_error_hex_prefix_without_digits() {
        let stream = Language::RookScript.tokenize("0x", LineState::Neutral, 0);
        assert_eq!(stream.tokens()[0].kind.error(), Some(LexError::MalformedNumber));
    }

    #[test]
    fn test_error_bad_hex_digit() {
        assert_eq!(
            lex_all(Language::DecoHack, "0x1G"),
            vec![("ErrorNumber", "0x1G".into())]
        );
    }

    #[test]
    fn test_error_number_resynchronizes_at_delimiter() {
        assert_eq!(
            kinds(Language::DecoHack, "12ab+3"),
            vec!["ErrorNumber", "Operator", "NumberDecimal"]
        );
    }

    #[test]
    fn test_error_bad_escape_consumes_closing_quote() {
        let source = "\"\\xZZ\" rest";
        let stream = Language::DecoHack.tokenize(source, LineState::Neutral, 0);
        let first = stream.tokens()[0];
        assert_eq!(first.text(source), "\"\\xZZ\"");
        assert_eq!(first.kind.error(), Some(LexError::BadEscapeSequence));
        assert_eq!(stream.last_kind().map(|k| k.name()), Some("Identifier"));
    }

    #[test]
    fn test_error_string_does_not_cross_newline() {
        assert_eq!(
            lex_all(Language::WadScript, "\"abc\nx"),
            vec![
                ("ErrorString", "\"abc".into()),
                ("Whitespace", "\n".into()),
                ("Identifier", "x".into()),
            ]
        );
    }

    #[test]
    fn test_error_deutex_lowercase_name() {
        let stream = Language::DeuTex.tokenize("wall 1", LineState::Neutral, 0);
        assert_eq!(
            stream.tokens()[0].kind.error(),
            Some(LexError::UnterminatedIdentifierChar)
        );
    }

    #[test]
    fn test_error_whole_segment_worst_case() {
        let source = "\"".to_string() + &"\\".repeat(7);
        let stream = Language::RookScript.tokenize(&source, LineState::Neutral, 0);
        assert_eq!(stream.len(), 1);
        assert!(stream.tokens()[0].kind.is_error());
    }
}
