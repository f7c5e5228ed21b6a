#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Quote {
    Single,
    Double,
    Backtick,
}

impl Quote {
    fn from_byte(b: u8) -> Option<Quote> {
        match b {
            b'\'' => Some(Quote::Single),
            b'"' => Some(Quote::Double),
            b'`' => Some(Quote::Backtick),
            _ => None,
        }
    }
}

pub fn is_inside_string_literal(line: &str, pos: usize) -> bool {
    let bytes = line.as_bytes();
    let mut open: Option<Quote> = None;

    for i in 0..pos.min(bytes.len()) {
        if i > 0 && bytes[i - 1] == b'\\' {
            continue;
        }
        let Some(quote) = Quote::from_byte(bytes[i]) else {
            continue;
        };
        open = match open {
            None => Some(quote),
            Some(current) if current == quote => None,
            Some(current) => Some(current),
        };
    }

    open.is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets_inside_each_quote_kind() {
        let line = r#"a "b" 'c' `d` e"#;
        assert!(is_inside_string_literal(line, 3));
        assert!(!is_inside_string_literal(line, 5));
        assert!(is_inside_string_literal(line, 7));
        assert!(is_inside_string_literal(line, 11));
        assert!(!is_inside_string_literal(line, 14));
    }

    #[test]
    fn comment_token_inside_double_quotes() {
        let line = r#"fmt.Println("Hello // World")"#;
        let pos = line.find("//").unwrap();
        assert!(is_inside_string_literal(line, pos));
    }

    #[test]
    fn other_quote_kinds_do_not_toggle_while_open() {
        let line = r#"x = "it's" // c"#;
        let pos = line.find("//").unwrap();
        assert!(!is_inside_string_literal(line, pos));

        let line = r#"x = 'say "hi' // c"#;
        let pos = line.find("//").unwrap();
        assert!(!is_inside_string_literal(line, pos));
    }

    #[test]
    fn escaped_quote_does_not_close() {
        let line = r#"s := "a \" // b""#;
        let pos = line.find("//").unwrap();
        assert!(is_inside_string_literal(line, pos));
    }

    #[test]
    fn offset_past_end_is_clamped() {
        assert!(is_inside_string_literal("\"open", 100));
        assert!(!is_inside_string_literal("", 3));
    }
}
