use std::iter::Peekable;
use std::str::Chars;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LexError {
    #[error("Unterminated quote in line: {line}")]
    UnterminatedQuote { line: String },
}

/// Splits one line into words. Whitespace outside quotes separates words;
/// text inside single quotes is kept verbatim as a single word.
pub struct Lexer<'a> {
    line: &'a str,
    chars: Peekable<Chars<'a>>,
}

impl<'a> Lexer<'a> {
    pub fn new(line: &'a str) -> Self {
        Self {
            line,
            chars: line.chars().peekable(),
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(&c) = self.chars.peek() {
            if c == ' ' || c == '\t' {
                self.chars.next();
            } else {
                break;
            }
        }
    }

    fn read_quoted(&mut self) -> Result<String, LexError> {
        let mut s = String::new();
        loop {
            match self.chars.next() {
                Some('\'') => return Ok(s),
                Some(c) => s.push(c),
                None => {
                    return Err(LexError::UnterminatedQuote {
                        line: self.line.to_string(),
                    });
                }
            }
        }
    }

    fn read_bare(&mut self) -> String {
        let mut s = String::new();
        while let Some(&c) = self.chars.peek() {
            if c == ' ' || c == '\t' || c == '\'' {
                break;
            }
            s.push(c);
            self.chars.next();
        }
        s
    }

    pub fn next_word(&mut self) -> Result<Option<String>, LexError> {
        self.skip_whitespace();

        match self.chars.peek() {
            None => Ok(None),
            Some('\'') => {
                self.chars.next();
                self.read_quoted().map(Some)
            }
            Some(_) => Ok(Some(self.read_bare())),
        }
    }

    pub fn tokenize(mut self) -> Result<Vec<String>, LexError> {
        let mut words = Vec::new();
        while let Some(word) = self.next_word()? {
            words.push(word);
        }
        Ok(words)
    }
}

/// Quote-aware split of a single line.
pub fn special_split_line(line: &str) -> Result<Vec<String>, LexError> {
    Lexer::new(line).tokenize()
}

/// Whitespace-only split, for lines that never carry quoted values.
pub fn plain_split(line: &str) -> Vec<String> {
    line.split_whitespace().map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_words() {
        let words = special_split_line("name = john").unwrap();
        assert_eq!(words, vec!["name", "=", "john"]);
        assert_eq!(words, plain_split("name = john"));
    }

    #[test]
    fn test_tabs_and_repeated_spaces() {
        let words = special_split_line("  a\t\tb    c  ").unwrap();
        assert_eq!(words, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_quoted_word() {
        let words = special_split_line("'hello world' done").unwrap();
        assert_eq!(words, vec!["hello world", "done"]);
    }

    #[test]
    fn test_quoted_word_after_bare_word() {
        let words = special_split_line("set 'hello world' done").unwrap();
        assert_eq!(words, vec!["set", "hello world", "done"]);
    }

    #[test]
    fn test_quote_ends_bare_word() {
        let words = special_split_line("abc'd e'f").unwrap();
        assert_eq!(words, vec!["abc", "d e", "f"]);
    }

    #[test]
    fn test_empty_quotes() {
        let words = special_split_line("name = ''").unwrap();
        assert_eq!(words, vec!["name", "=", ""]);
    }

    #[test]
    fn test_quoted_keeps_tabs() {
        let words = special_split_line("'a\tb'").unwrap();
        assert_eq!(words, vec!["a\tb"]);
    }

    #[test]
    fn test_unterminated_quote() {
        let err = special_split_line("name = 'john").unwrap_err();
        assert_eq!(
            err,
            LexError::UnterminatedQuote {
                line: "name = 'john".into()
            }
        );
    }

    #[test]
    fn test_empty_line() {
        assert!(special_split_line("").unwrap().is_empty());
        assert!(special_split_line(" \t ").unwrap().is_empty());
    }
}
