//! Whitespace tokenizer with source positions.

use std::fmt;

/// A word of configuration text and where it starts (1-based).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub value: String,
    pub line: usize,
    pub column: usize,
}

impl Token {
    pub fn new(value: impl Into<String>, line: usize, column: usize) -> Self {
        Self {
            value: value.into(),
            line,
            column,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn is(&self, keyword: &str) -> bool {
        self.value == keyword
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "'{}' at line {}, column {}",
            self.value, self.line, self.column
        )
    }
}

/// Split one line into tokens. `line_no` is 1-based.
pub fn tokenize_line(line_no: usize, text: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut start = None;
    for (col, ch) in text.chars().enumerate() {
        match (ch.is_whitespace(), start) {
            (false, None) => start = Some(col),
            (true, Some(s)) => {
                tokens.push(word(text, line_no, s, col));
                start = None;
            }
            _ => {}
        }
    }
    if let Some(s) = start {
        tokens.push(word(text, line_no, s, text.chars().count()));
    }
    tokens
}

fn word(text: &str, line_no: usize, start: usize, end: usize) -> Token {
    let value: String = text.chars().skip(start).take(end - start).collect();
    Token::new(value, line_no, start + 1)
}

/// Whether a line carries no configuration (blank or `#` comment).
pub fn is_blank_or_comment(text: &str) -> bool {
    let trimmed = text.trim();
    trimmed.is_empty() || trimmed.starts_with('#')
}

/// Tokenize text line by line, dropping blank and comment lines.
pub fn tokenize_lines(input: &str) -> Vec<Vec<Token>> {
    input
        .lines()
        .enumerate()
        .filter(|(_, text)| !is_blank_or_comment(text))
        .map(|(idx, text)| tokenize_line(idx + 1, text))
        .collect()
}

/// Tokenize text into one flat token stream.
pub fn tokenize(input: &str) -> Vec<Token> {
    tokenize_lines(input).into_iter().flatten().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positions() {
        let tokens = tokenize_line(3, "  set  interfaces ethernet");
        assert_eq!(
            tokens,
            vec![
                Token::new("set", 3, 3),
                Token::new("interfaces", 3, 8),
                Token::new("ethernet", 3, 19),
            ]
        );
    }

    #[test]
    fn test_skips_blank_and_comments() {
        let text = "# header\n\nset a b\n   # indented comment\nset c\n";
        let lines = tokenize_lines(text);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0][0].line, 3);
        assert_eq!(lines[1][1], Token::new("c", 5, 5));
        assert_eq!(tokenize(text).len(), 5);
    }

    #[test]
    fn test_display() {
        let token = Token::new("eth9", 2, 25);
        assert_eq!(token.to_string(), "'eth9' at line 2, column 25");
    }
}
