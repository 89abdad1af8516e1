//! Lexer for mylang.

use crate::error::CoreError;
use crate::value::Value;

/// Kind of a token produced by the lexer.
///
/// The lexer is intentionally simple: it recognizes keywords, numeric
/// literals, identifiers, and single-character punctuation, and nothing
/// else. Higher layers interpret the structure.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // Literals and identifiers
    Number(Value),
    Ident(String),

    // Keywords
    Let,
    Print,

    // Punctuation
    Assign, // =
    Plus,   // +
    LParen, // (
    RParen, // )
    Semi,   // ;

    // Synthetic terminator
    Eof,
}

impl TokenKind {
    /// Grammar-level name of this kind, used in parse error messages.
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::Number(_) => "NUMBER",
            TokenKind::Ident(_) => "IDENT",
            TokenKind::Let => "'let'",
            TokenKind::Print => "'print'",
            TokenKind::Assign => "'='",
            TokenKind::Plus => "'+'",
            TokenKind::LParen => "'('",
            TokenKind::RParen => "')'",
            TokenKind::Semi => "';'",
            TokenKind::Eof => "end of input",
        }
    }
}

/// A single token with its kind and byte offset into the source.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub position: usize,
}

/// Lex a source string into tokens.
///
/// The returned sequence is finite and always terminated by a single
/// `Eof` sentinel. Whitespace and newlines produce no tokens; the first
/// byte that starts no rule fails the whole scan with its position.
pub fn lex(source: &str) -> Result<Vec<Token>, CoreError> {
    let mut lexer = Lexer {
        source,
        chars: source.as_bytes(),
        len: source.len(),
        index: 0,
    };
    lexer.run()
}

struct Lexer<'src> {
    source: &'src str,
    chars: &'src [u8],
    len: usize,
    index: usize,
}

impl<'src> Lexer<'src> {
    fn run(&mut self) -> Result<Vec<Token>, CoreError> {
        let mut tokens = Vec::new();

        while let Some(ch) = self.peek_char() {
            if is_whitespace(ch) {
                self.consume_char();
                continue;
            }

            let start = self.index;
            let token = match ch {
                b'=' => self.simple_token(TokenKind::Assign, start),
                b'+' => self.simple_token(TokenKind::Plus, start),
                b'(' => self.simple_token(TokenKind::LParen, start),
                b')' => self.simple_token(TokenKind::RParen, start),
                b';' => self.simple_token(TokenKind::Semi, start),
                b'0'..=b'9' => self.lex_number(start),
                _ if is_ident_start(ch) => self.lex_ident_or_keyword(start),
                _ => {
                    let character = self.source[start..].chars().next().unwrap_or(ch as char);
                    return Err(CoreError::LexError {
                        position: start,
                        character,
                    });
                }
            };
            tokens.push(token);
        }

        // EOF sentinel at end
        tokens.push(Token {
            kind: TokenKind::Eof,
            position: self.len,
        });

        Ok(tokens)
    }

    fn simple_token(&mut self, kind: TokenKind, start: usize) -> Token {
        self.consume_char();
        Token {
            kind,
            position: start,
        }
    }

    fn lex_number(&mut self, start: usize) -> Token {
        // digits [ '.' digits* ]? -- a trailing bare '.' still makes a float
        while let Some(b'0'..=b'9') = self.peek_char() {
            self.consume_char();
        }

        let mut is_float = false;
        if self.peek_char() == Some(b'.') {
            is_float = true;
            self.consume_char();
            while let Some(b'0'..=b'9') = self.peek_char() {
                self.consume_char();
            }
        }

        let text = &self.source[start..self.index];
        let value = if is_float {
            Value::Float(text.parse().unwrap_or(0.0))
        } else {
            // literals wider than i64 fall back to the float representation
            text.parse::<i64>()
                .map(Value::Int)
                .unwrap_or_else(|_| Value::Float(text.parse().unwrap_or(0.0)))
        };

        Token {
            kind: TokenKind::Number(value),
            position: start,
        }
    }

    fn lex_ident_or_keyword(&mut self, start: usize) -> Token {
        while let Some(ch) = self.peek_char() {
            if is_ident_continue(ch) {
                self.consume_char();
            } else {
                break;
            }
        }

        let text = &self.source[start..self.index];
        let kind = match text {
            "let" => TokenKind::Let,
            "print" => TokenKind::Print,
            _ => TokenKind::Ident(text.to_string()),
        };

        Token {
            kind,
            position: start,
        }
    }

    fn peek_char(&self) -> Option<u8> {
        self.chars.get(self.index).copied()
    }

    fn consume_char(&mut self) {
        if self.index < self.len {
            self.index += 1;
        }
    }
}

fn is_whitespace(ch: u8) -> bool {
    matches!(ch, b' ' | b'\t' | b'\n' | b'\r')
}

fn is_ident_start(ch: u8) -> bool {
    ch.is_ascii_lowercase() || ch.is_ascii_uppercase() || ch == b'_'
}

fn is_ident_continue(ch: u8) -> bool {
    is_ident_start(ch) || ch.is_ascii_digit()
}
