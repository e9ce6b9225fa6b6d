//! Edge case tests for tinct-lex

#[cfg(test)]
mod tests {
    use crate::{scan, BoundaryIndex, ScanOptions, Scanner, Token, TokenKind};
    use tinct_lang::{Delimiter, GroupId, GroupSpec, LanguageDefinition, LanguageSpec};
    use tinct_util::{Buffer, Encoding};

    fn c_like() -> LanguageDefinition {
        LanguageDefinition::build(
            LanguageSpec::new("C")
                .line_comment("//")
                .block_comment("/*", "*/")
                .group(GroupSpec::from_words("keywords", "if int")),
        )
    }

    fn lex(text: &str) -> Vec<Token> {
        let buffer = Buffer::from_text("t", text);
        let lang = c_like();
        scan(&buffer, &lang, 0).collect()
    }

    // ==================== EDGE CASES ====================

    #[test]
    fn test_edge_empty_source() {
        assert!(lex("").is_empty());
    }

    #[test]
    fn test_edge_only_whitespace() {
        assert_eq!(lex(" \t\r\n "), vec![Token::new(0, 5, TokenKind::Whitespace)]);
    }

    #[test]
    fn test_edge_lone_quote_at_end() {
        assert_eq!(lex("\""), vec![Token::new(0, 1, TokenKind::UnterminatedString)]);
    }

    #[test]
    fn test_edge_lone_block_start() {
        assert_eq!(lex("/*"), vec![Token::new(0, 2, TokenKind::UnterminatedBlockComment)]);
    }

    #[test]
    fn test_edge_comment_marker_inside_string() {
        let tokens = lex("\"// not\" x");
        assert_eq!(tokens[0], Token::new(0, 8, TokenKind::StringLiteral));
        assert_eq!(tokens[2].kind, TokenKind::Identifier);
    }

    #[test]
    fn test_edge_quote_inside_comment() {
        let tokens = lex("/* \" */ x");
        assert_eq!(tokens[0], Token::new(0, 7, TokenKind::BlockComment));
    }

    #[test]
    fn test_edge_long_identifier() {
        let name = "a".repeat(10_000);
        let tokens = lex(&format!("int {};", name));
        assert_eq!(tokens[2], Token::new(4, 10_000, TokenKind::Identifier));
    }

    #[test]
    fn test_edge_nul_and_control_chars() {
        let tokens = lex("a\0\u{7}b");
        assert_eq!(tokens[1], Token::new(1, 2, TokenKind::Whitespace));
        assert_eq!(tokens[2], Token::new(3, 1, TokenKind::Identifier));
    }

    #[test]
    fn test_edge_crlf_in_line_comment() {
        let tokens = lex("// a\r\n// b");
        assert_eq!(tokens[0], Token::new(0, 4, TokenKind::LineComment));
        assert_eq!(tokens[2], Token::new(6, 4, TokenKind::LineComment));
    }

    #[test]
    fn test_edge_undecodable_bytes_scan() {
        let buffer = Buffer::with_encoding("t", b"if \xff x".to_vec(), Encoding::Utf8);
        let lang = c_like();
        let tokens: Vec<Token> = scan(&buffer, &lang, 0).collect();
        assert_eq!(tokens[0].kind, TokenKind::Keyword(GroupId(0)));
        assert_eq!(tokens.last().map(|t| t.end()), Some(buffer.len()));
    }

    #[test]
    fn test_edge_utf16_buffer() {
        let mut bytes = vec![0xFF, 0xFE];
        for unit in "int x".encode_utf16() {
            bytes.extend_from_slice(&unit.to_le_bytes());
        }
        let buffer = Buffer::from_bytes("t", bytes);
        let lang = c_like();
        let kinds: Vec<TokenKind> = scan(&buffer, &lang, 0).map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![TokenKind::Keyword(GroupId(0)), TokenKind::Whitespace, TokenKind::Identifier]
        );
    }

    #[test]
    fn test_edge_restart_at_token_start() {
        let buffer = Buffer::from_text("t", "x /* a */ \"s\" y");
        let lang = c_like();
        let full: Vec<Token> = scan(&buffer, &lang, 0).collect();
        for (i, token) in full.iter().enumerate() {
            let resumed: Vec<Token> = scan(&buffer, &lang, token.start).collect();
            assert_eq!(resumed, full[i..].to_vec());
        }
    }

    #[test]
    fn test_edge_skip_whitespace_in_viewport() {
        let buffer = Buffer::from_text("t", "a b\nc d");
        let lang = c_like();
        let index = BoundaryIndex::build(&buffer, &lang);
        let options = ScanOptions {
            emit_whitespace: false,
        };
        let texts: Vec<String> = index
            .tokens_in_lines(&buffer, &lang, 1..2, options)
            .unwrap()
            .map(|t| t.text(&buffer))
            .collect();
        assert_eq!(texts, vec!["c", "d"]);
    }

    #[test]
    fn test_edge_delimiter_char_also_operator() {
        let lang = LanguageDefinition::build(
            LanguageSpec::new("T").delimiters(vec![Delimiter::new("pipe", '|', Some('\\'))]),
        );
        let buffer = Buffer::from_text("t", "|a\\|b|");
        let tokens: Vec<Token> = Scanner::new(&buffer, &lang, 0).collect();
        assert_eq!(tokens, vec![Token::new(0, 6, TokenKind::StringLiteral)]);
    }
}
