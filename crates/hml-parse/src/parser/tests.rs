use super::*;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn parse(source: &str) -> Vec<NodeLine> {
    init_tracing();
    Parser::new(source)
        .parse_to_vec()
        .unwrap_or_else(|error| panic!("failed to parse {:?}: {}", source, error))
}

fn parse_error(source: &str) -> ParseError {
    init_tracing();
    match Parser::new(source).parse_to_vec() {
        Ok(lines) => panic!("expected {:?} to fail, got {:?}", source, lines),
        Err(error) => error,
    }
}

fn props(pairs: &[(&str, &str)]) -> Properties {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn test_empty_document() {
    assert!(parse("").is_empty());
}

#[test]
fn test_blank_document() {
    assert!(parse("\n   \n\r\n  ").is_empty());
}

#[test]
fn test_single_node() {
    let lines = parse("test");
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].name(), "test");
    assert_eq!(lines[0].indent, 0);
    assert_eq!(lines[0].text, None);
    assert!(lines[0].properties.is_empty());
    assert_eq!(lines[0].position(), Position::new(0, 0, 0, 4));
}

#[test]
fn test_single_node_with_text() {
    let lines = parse("test: great sample!");
    assert_eq!(lines[0].name(), "test");
    assert_eq!(lines[0].text.as_deref(), Some("great sample!"));
    assert!(lines[0].properties.is_empty());
}

#[test]
fn test_single_node_with_property() {
    let lines = parse("test(prop=\"propv\")");
    assert_eq!(lines[0].properties, props(&[("prop", "propv")]));
    assert_eq!(lines[0].text, None);
}

#[test]
fn test_properties_and_text() {
    let lines = parse("test(prop1=\"propv1\", prop2=\"propv2\"): great sample!");
    assert_eq!(
        lines[0].properties,
        props(&[("prop1", "propv1"), ("prop2", "propv2")])
    );
    assert_eq!(lines[0].text.as_deref(), Some("great sample!"));
}

#[test]
fn test_extra_spaces_are_ignored() {
    let spaced = parse("test  (    prop1 =  \"propv1\"   ,   prop2  =\"propv2\"   )  :    great sample!");
    let compact = parse("test(prop1=\"propv1\",prop2=\"propv2\"):great sample!");
    assert_eq!(spaced[0].name(), compact[0].name());
    assert_eq!(spaced[0].properties, compact[0].properties);
    assert_eq!(spaced[0].text, compact[0].text);
}

#[test]
fn test_empty_properties() {
    let lines = parse("test(): text");
    assert!(lines[0].properties.is_empty());
    assert_eq!(lines[0].text.as_deref(), Some("text"));
}

#[test]
fn test_property_order_is_kept() {
    let lines = parse("n(z=\"1\", a=\"2\", m=\"3\")");
    let keys: Vec<_> = lines[0].properties.keys().map(String::as_str).collect();
    assert_eq!(keys, ["z", "a", "m"]);
}

#[test]
fn test_duplicate_property_last_wins() {
    let lines = parse("n(a=\"1\", b=\"2\", a=\"3\")");
    assert_eq!(lines[0].properties, props(&[("a", "3"), ("b", "2")]));
    assert_eq!(lines[0].properties.get_index(0), Some((&"a".to_string(), &"3".to_string())));
}

#[test]
fn test_escaped_quote_in_value() {
    let lines = parse(r#"n(v="test\"test")"#);
    assert_eq!(lines[0].properties["v"], "test\"test");
}

#[test]
fn test_indentation() {
    let lines = parse("root\n  child\n    grandchild\n  other");
    let shape: Vec<_> = lines.iter().map(|l| (l.name(), l.indent)).collect();
    assert_eq!(
        shape,
        [("root", 0), ("child", 2), ("grandchild", 4), ("other", 2)]
    );
}

#[test]
fn test_blank_lines_reset_indent() {
    let lines = parse("root\n      \n\n  child\n");
    let shape: Vec<_> = lines.iter().map(|l| (l.name(), l.indent)).collect();
    assert_eq!(shape, [("root", 0), ("child", 2)]);
}

#[test]
fn test_indented_first_line() {
    let lines = parse("   root");
    assert_eq!(lines[0].indent, 3);
    assert_eq!(lines[0].position(), Position::new(0, 3, 3, 4));
}

#[test]
fn test_line_positions() {
    let lines = parse("test(prop1=\"propv1\", prop2=\"propv2\"): great sample!\n  child(cp=\"v\"): child text");
    assert_eq!((lines[0].position().line, lines[0].position().column), (0, 0));
    assert_eq!((lines[1].position().line, lines[1].position().column), (1, 2));
}

#[test]
fn test_crlf_lines() {
    let lines = parse("root: a\r\n  child: b\r\n");
    assert_eq!(lines[0].text.as_deref(), Some("a"));
    assert_eq!(lines[1].text.as_deref(), Some("b"));
    assert_eq!(lines[1].indent, 2);
}

#[test]
fn test_trailing_spaces_after_properties() {
    let lines = parse("root(a=\"1\")   \nchild");
    assert_eq!(lines[0].properties, props(&[("a", "1")]));
    assert_eq!(lines[1].name(), "child");
}

#[test]
fn test_text_keeps_trailing_spaces() {
    let lines = parse("root: text  ");
    assert_eq!(lines[0].text.as_deref(), Some("text  "));
}

#[test]
fn test_lines_are_pulled_one_at_a_time() {
    let mut parser = Parser::new("a\nb\n  c");
    assert_eq!(parser.next_line().unwrap().map(|l| l.token.content), Some("a".into()));
    assert_eq!(parser.next_line().unwrap().map(|l| l.token.content), Some("b".into()));
    assert_eq!(parser.next_line().unwrap().map(|l| l.token.content), Some("c".into()));
    assert_eq!(parser.next_line().unwrap(), None);
    assert_eq!(parser.next_line().unwrap(), None);
}

#[test]
fn test_iterator() {
    let names: Vec<_> = Parser::new("a\n b\n c")
        .map(|line| line.map(|l| l.token.content))
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(names, ["a", "b", "c"]);
}

#[test]
fn test_tokens_are_all_kept() {
    let source = "root (a = \"1\") :  text\n  child\n";
    let mut parser = Parser::new(source);
    while parser.next_line().unwrap().is_some() {}
    let tokens = parser.into_tokens();

    let rebuilt: String = tokens.iter().map(|t| t.position.slice(source)).collect();
    assert_eq!(rebuilt, source);
    assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::EndOfDocument));

    let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        [
            TokenKind::Identifier,
            TokenKind::Whitespace,
            TokenKind::PropertiesStart,
            TokenKind::Identifier,
            TokenKind::Whitespace,
            TokenKind::Equals,
            TokenKind::Whitespace,
            TokenKind::PropertyValue,
            TokenKind::PropertiesEnd,
            TokenKind::Whitespace,
            TokenKind::Text,
            TokenKind::LineReturn,
            TokenKind::Indent,
            TokenKind::Identifier,
            TokenKind::LineReturn,
            TokenKind::EndOfDocument,
        ]
    );
}

#[test]
fn test_leading_whitespace_of_document_is_indent() {
    let mut parser = Parser::new("  a");
    parser.next_line().unwrap();
    assert_eq!(parser.tokens()[0].kind, TokenKind::Indent);
    assert_eq!(parser.tokens()[0].content, "  ");
}

#[test]
fn test_error_unknown_after_name() {
    let error = parse_error("test\t");
    insta::assert_snapshot!(
        error,
        @"got token ? at position [0, 4] (following <identifier>), expected: '(', :'<value>, <line return>, <end of document>"
    );
}

#[test]
fn test_error_unquoted_value() {
    let error = parse_error("test(a=b)");
    insta::assert_snapshot!(
        error,
        @r#"got token <identifier> at position [0, 7] (following '='), expected: '"'<value>'"'"#
    );
}

#[test]
fn test_error_at_start() {
    let error = parse_error("=x");
    insta::assert_snapshot!(
        error,
        @"got token '=' at position [0, 0] (following start), expected: <identifier>, ' ', <line return>, <end of document>"
    );
}

#[test]
fn test_error_content_after_properties() {
    let error = parse_error("test(a=\"1\") x");
    insta::assert_snapshot!(
        error,
        @"got token <identifier> at position [0, 12] (following ')'), expected: :'<value>, <line return>, <end of document>"
    );
}

#[test]
fn test_error_tab_indentation() {
    let error = parse_error("  \tnode");
    insta::assert_snapshot!(
        error,
        @"got token ? at position [0, 2] (following ' '), expected: <identifier>, <line return>, <end of document>"
    );
}

#[test]
fn test_error_trailing_separator() {
    let error = parse_error("test(a=\"1\",)");
    insta::assert_snapshot!(
        error,
        @"got token ')' at position [0, 11] (following ','), expected: <identifier>"
    );
}

#[test]
fn test_error_unclosed_properties_at_end() {
    let error = parse_error("test\n  child(");
    insta::assert_snapshot!(
        error,
        @"got token <end of document> at position [1, 8] (following '('), expected: <identifier>, ')'"
    );
}

#[test]
fn test_error_properties_after_text() {
    let error = parse_error("test: a\n  b: c(d=\"e\")\nf(");
    assert!(matches!(error, ParseError::InvalidToken { .. }));
    assert_eq!(error.token().kind, TokenKind::EndOfDocument);

    let error = parse_error("test() ()");
    assert_eq!(error.token().kind, TokenKind::PropertiesStart);
    assert_eq!(error.position(), Position::new(0, 7, 7, 1));
}

#[test]
fn test_error_carries_tokens() {
    let error = parse_error("test(a=b)");
    let ParseError::InvalidToken {
        token,
        previous,
        expected,
    } = error
    else {
        panic!("expected an invalid token error");
    };
    assert_eq!(token.content, "b");
    assert_eq!(previous.map(|t| t.kind), Some(TokenKind::Equals));
    assert_eq!(expected, [TokenKind::PropertyValue]);
}

#[test]
fn test_parser_stops_after_error() {
    let mut parser = Parser::new("a\n=\nb");
    assert!(parser.next_line().unwrap().is_some());
    assert!(parser.next_line().is_err());
    assert_eq!(parser.next_line().unwrap(), None);
}
