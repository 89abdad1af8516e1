//! Recursive-descent parser for mylang.
//!
//! Single-token lookahead over the lexer's output:
//!
//! ```text
//! Program    := Statement* EOF
//! Statement  := 'let' ID '=' Expr ';'  |  'print' '(' Expr ')' ';'
//! Expr       := Term ( '+' Term )?
//! Term       := NUMBER | ID
//! ```
//!
//! `Expr` admits at most one addition. A chain like `a + b + c` fails
//! when the statement rule looks for its `';'` and finds the second
//! `'+'` instead.

use crate::ast::{BinOp, Expr, Program, Stmt};
use crate::error::CoreError;
use crate::lexer::{Token, TokenKind};

static EOF: TokenKind = TokenKind::Eof;

/// Parse a token sequence into a program.
///
/// Total over any finite input: returns a complete `Program` or the
/// first grammar violation, and never loops.
pub fn parse(tokens: &[Token]) -> Result<Program, CoreError> {
    let mut parser = Parser { tokens, pos: 0 };
    parser.program()
}

struct Parser<'t> {
    tokens: &'t [Token],
    pos: usize,
}

impl<'t> Parser<'t> {
    fn program(&mut self) -> Result<Program, CoreError> {
        let mut body = Vec::new();
        while !matches!(self.peek(), TokenKind::Eof) {
            body.push(self.statement()?);
        }
        Ok(Program { body })
    }

    fn statement(&mut self) -> Result<Stmt, CoreError> {
        match self.peek() {
            TokenKind::Let => {
                self.eat(TokenKind::Let)?;
                let name = self.eat_ident()?;
                self.eat(TokenKind::Assign)?;
                let expr = self.expr()?;
                self.eat(TokenKind::Semi)?;
                Ok(Stmt::VarDecl { name, expr })
            }
            TokenKind::Print => {
                self.eat(TokenKind::Print)?;
                self.eat(TokenKind::LParen)?;
                let expr = self.expr()?;
                self.eat(TokenKind::RParen)?;
                self.eat(TokenKind::Semi)?;
                Ok(Stmt::Print { expr })
            }
            other => Err(CoreError::UnknownStatement {
                found: other.name().to_string(),
            }),
        }
    }

    fn expr(&mut self) -> Result<Expr, CoreError> {
        let left = self.term()?;
        if matches!(self.peek(), TokenKind::Plus) {
            self.eat(TokenKind::Plus)?;
            let right = self.term()?;
            return Ok(Expr::binary(BinOp::Add, left, right));
        }
        Ok(left)
    }

    fn term(&mut self) -> Result<Expr, CoreError> {
        match self.peek() {
            TokenKind::Number(value) => {
                let value = *value;
                self.pos += 1;
                Ok(Expr::Number(value))
            }
            TokenKind::Ident(name) => {
                let name = name.clone();
                self.pos += 1;
                Ok(Expr::Identifier(name))
            }
            other => Err(CoreError::ParseError {
                expected: "NUMBER or IDENT".to_string(),
                found: other.name().to_string(),
            }),
        }
    }

    /// Consume the current token if its kind matches, else fail naming
    /// both the expected and the encountered kind.
    fn eat(&mut self, expected: TokenKind) -> Result<(), CoreError> {
        if *self.peek() == expected {
            self.pos += 1;
            Ok(())
        } else {
            Err(CoreError::ParseError {
                expected: expected.name().to_string(),
                found: self.peek().name().to_string(),
            })
        }
    }

    fn eat_ident(&mut self) -> Result<String, CoreError> {
        match self.peek() {
            TokenKind::Ident(name) => {
                let name = name.clone();
                self.pos += 1;
                Ok(name)
            }
            other => Err(CoreError::ParseError {
                expected: "IDENT".to_string(),
                found: other.name().to_string(),
            }),
        }
    }

    // The lexer guarantees an Eof sentinel; the fallback keeps the
    // parser total over hand-built token slices as well.
    fn peek(&self) -> &TokenKind {
        self.tokens.get(self.pos).map(|t| &t.kind).unwrap_or(&EOF)
    }
}
