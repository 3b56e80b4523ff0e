/// Split a command line into shell-like tokens.
///
/// Single- and double-quoted runs keep their inner whitespace and the quote
/// characters themselves are dropped. Quoted and unquoted text that touch
/// each other end up in the same token (`-H'A: b'` is one token). There is no
/// escape handling: a backslash is an ordinary character, and a quote only
/// closes on the same character that opened it. An unterminated quote runs
/// to the end of the input.
pub fn tokenize(command: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;

    for ch in command.chars() {
        match quote {
            Some(open) if ch == open => quote = None,
            Some(_) => current.push(ch),
            None if ch == '"' || ch == '\'' => quote = Some(ch),
            None if ch.is_whitespace() => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            None => current.push(ch),
        }
    }

    if !current.is_empty() {
        tokens.push(current);
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   \t ").is_empty());
    }

    #[test]
    fn test_whitespace_separates_tokens() {
        assert_eq!(
            tokenize("-X  POST\thttps://a.test"),
            vec!["-X", "POST", "https://a.test"]
        );
    }

    #[test]
    fn test_double_quoted_header_is_single_token() {
        assert_eq!(
            tokenize(r#"-H "Authorization: Bearer abc def""#),
            vec!["-H", "Authorization: Bearer abc def"]
        );
    }

    #[test]
    fn test_single_quotes_preserve_double_quotes() {
        assert_eq!(
            tokenize(r#"-d '{"name": "a b"}'"#),
            vec!["-d", r#"{"name": "a b"}"#]
        );
    }

    #[test]
    fn test_adjacent_quoted_text_joins() {
        assert_eq!(tokenize(r#"a"b c"d"#), vec!["ab cd"]);
    }

    #[test]
    fn test_backslash_is_literal() {
        assert_eq!(tokenize(r#""a\"b"#), vec![r"a\b"]);
    }

    #[test]
    fn test_unterminated_quote_runs_to_end() {
        assert_eq!(tokenize("x 'y z"), vec!["x", "y z"]);
    }

    #[test]
    fn test_empty_quotes_produce_no_token() {
        // `-d ''` therefore consumes the next token as its argument
        assert_eq!(tokenize("a '' b"), vec!["a", "b"]);
    }
}
