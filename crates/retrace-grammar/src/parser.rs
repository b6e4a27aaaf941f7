//! Recursive-descent parser for the restricted function grammar.
//!
//! ```text
//! program   := function* EOF
//! function  := 'function' Identifier '(' param* ')' '{' return* '}'
//! param     := Identifier | Other
//! return    := 'return' expr* ';'
//! expr      := Identifier | Other | '(' expr* ')'
//! ```
//!
//! Parameters are consumed but never bound. The parser stops at the first
//! violation; there is no recovery.
//!
//! A line break directly after `return`, or before a `++`/`--` inside the
//! expression, would end the statement under automatic semicolon insertion.
//! Both are rejected rather than given a meaning the host language does not
//! share.

use std::ops::Range;

use retrace_core::ParseError;

use crate::cst::{Block, FunctionDecl, Program, ReturnStmt};
use crate::lexer::{Token, TokenKind};

/// Parses a token stream produced by [`crate::tokenize`] from `source`.
///
/// # Errors
///
/// Returns a [`ParseError`] describing the first token that does not fit
/// the grammar.
pub fn parse_program(source: &str, tokens: &[Token]) -> Result<Program, ParseError> {
    let mut parser = Parser {
        source,
        tokens,
        cursor: 0,
    };

    let mut functions = Vec::new();
    while parser.peek().is_some() {
        functions.push(parser.function()?);
    }
    Ok(Program::new(functions))
}

struct Parser<'a> {
    source: &'a str,
    tokens: &'a [Token],
    cursor: usize,
}

impl Parser<'_> {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.cursor)
    }

    fn peek_kind(&self) -> Option<TokenKind> {
        self.peek().map(Token::kind)
    }

    fn advance(&mut self) {
        self.cursor += 1;
    }

    fn expect(&mut self, kind: TokenKind, expected: &str) -> Result<Range<usize>, ParseError> {
        match self.peek() {
            Some(token) if token.kind() == kind => {
                let span = token.span();
                self.advance();
                Ok(span)
            }
            found => Err(self.unexpected(expected, found.copied())),
        }
    }

    fn unexpected(&self, expected: &str, found: Option<Token>) -> ParseError {
        match found {
            Some(token) => ParseError::at(
                self.source,
                token.start(),
                format!("expected {expected}, found `{}`", token.text(self.source)),
            ),
            None => ParseError::at(
                self.source,
                self.source.len(),
                format!("expected {expected}, found end of input"),
            ),
        }
    }

    fn function(&mut self) -> Result<FunctionDecl, ParseError> {
        let keyword = self.expect(TokenKind::FunctionKw, "`function`")?;
        let name = self.expect(TokenKind::Identifier, "function name")?;
        let parameters = self.parameters()?;
        let body = self.block()?;
        Ok(FunctionDecl {
            keyword,
            name,
            parameters,
            body,
        })
    }

    fn parameters(&mut self) -> Result<Range<usize>, ParseError> {
        let open = self.expect(TokenKind::LParen, "`(`")?;
        while matches!(
            self.peek_kind(),
            Some(TokenKind::Identifier | TokenKind::Other)
        ) {
            self.advance();
        }
        let close = self.expect(TokenKind::RParen, "`)` to close the parameter list")?;
        Ok(open.start..close.end)
    }

    fn block(&mut self) -> Result<Block, ParseError> {
        let open = self.expect(TokenKind::LCurly, "`{`")?;
        let mut statements = Vec::new();
        while self.peek_kind() == Some(TokenKind::ReturnKw) {
            statements.push(self.return_statement()?);
        }
        let close = self.expect(
            TokenKind::RCurly,
            "`return` or `}` to close the function body",
        )?;
        Ok(Block {
            open,
            statements,
            close,
        })
    }

    fn return_statement(&mut self) -> Result<ReturnStmt, ParseError> {
        let keyword = self.expect(TokenKind::ReturnKw, "`return`")?;
        if let Some(next) = self.peek().copied()
            && next.kind() != TokenKind::Semicolon
            && self.line_break_between(keyword.end, next.start())
        {
            return Err(ParseError::at(
                self.source,
                next.start(),
                "line break after `return` ends the statement",
            ));
        }
        let expression = self.expression(keyword.end)?;
        let terminator = self.expect(TokenKind::Semicolon, "`;` after return statement")?;
        Ok(ReturnStmt {
            keyword,
            expression,
            terminator,
        })
    }

    /// Consumes `expr*`, returning the span it covered.
    ///
    /// Parentheses are tracked with a counter, so nesting depth is bounded
    /// only by the input.
    fn expression(&mut self, after: usize) -> Result<Option<Range<usize>>, ParseError> {
        let first = self.cursor;
        let mut previous_end = after;
        let mut open_parens: usize = 0;
        loop {
            let Some(token) = self.peek().copied() else {
                if open_parens > 0 {
                    return Err(self.unexpected("`)` to close the expression", None));
                }
                break;
            };
            match token.kind() {
                TokenKind::Identifier => {}
                TokenKind::Other => {
                    let text = token.text(self.source);
                    if let Some(operator) = ["++", "--"].into_iter().find(|op| text.starts_with(op))
                        && self.line_break_between(previous_end, token.start())
                    {
                        return Err(ParseError::at(
                            self.source,
                            token.start(),
                            format!("line break before `{operator}` ends the return statement"),
                        ));
                    }
                }
                TokenKind::LParen => open_parens += 1,
                TokenKind::RParen if open_parens > 0 => open_parens -= 1,
                _ if open_parens > 0 => {
                    return Err(self.unexpected("`)` to close the expression", Some(token)));
                }
                _ => break,
            }
            previous_end = token.end();
            self.advance();
        }

        if self.cursor == first {
            return Ok(None);
        }
        Ok(self
            .tokens
            .get(first)
            .map(|token| token.start()..previous_end))
    }

    fn line_break_between(&self, start: usize, end: usize) -> bool {
        self.source
            .get(start..end)
            .is_some_and(|gap| gap.chars().any(is_line_terminator))
    }
}

const fn is_line_terminator(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}
