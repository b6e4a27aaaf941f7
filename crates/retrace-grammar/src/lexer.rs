//! Whitespace-skipping lexer for the restricted function grammar.
//!
//! The lexer recognises just enough of JavaScript to find function
//! declarations and return statements. Everything that is not a keyword,
//! identifier or delimiter becomes an opaque [`TokenKind::Other`] token.
//! Whitespace and comments are trivia and produce no tokens.

use std::ops::Range;

use retrace_core::ParseError;

/// Kinds of token produced by [`tokenize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// The `function` keyword.
    FunctionKw,
    /// The `return` keyword.
    ReturnKw,
    /// A word that is not a keyword.
    Identifier,
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `{`
    LCurly,
    /// `}`
    RCurly,
    /// `;`
    Semicolon,
    /// Any other run of source text, including string literals.
    Other,
}

/// A token with its half-open byte span in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    kind: TokenKind,
    start: usize,
    end: usize,
}

impl Token {
    const fn new(kind: TokenKind, start: usize, end: usize) -> Self {
        Self { kind, start, end }
    }

    /// Kind of the token.
    #[must_use]
    pub const fn kind(&self) -> TokenKind {
        self.kind
    }

    /// Inclusive start offset.
    #[must_use]
    pub const fn start(&self) -> usize {
        self.start
    }

    /// Exclusive end offset.
    #[must_use]
    pub const fn end(&self) -> usize {
        self.end
    }

    /// Byte span of the token.
    #[must_use]
    pub const fn span(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Source text covered by the token.
    #[must_use]
    pub fn text<'src>(&self, source: &'src str) -> &'src str {
        source.get(self.span()).unwrap_or_default()
    }
}

/// Splits `source` into tokens.
///
/// # Errors
///
/// Returns a [`ParseError`] for an unterminated string literal or block
/// comment.
pub fn tokenize(source: &str) -> Result<Vec<Token>, ParseError> {
    Lexer::new(source).run()
}

struct Lexer<'src> {
    source: &'src str,
    pos: usize,
    tokens: Vec<Token>,
}

impl<'src> Lexer<'src> {
    const fn new(source: &'src str) -> Self {
        Self {
            source,
            pos: 0,
            tokens: Vec::new(),
        }
    }

    fn run(mut self) -> Result<Vec<Token>, ParseError> {
        while let Some(ch) = self.peek() {
            let start = self.pos;
            if ch.is_whitespace() {
                self.advance_while(char::is_whitespace);
                continue;
            }
            if self.skip_comment()? {
                continue;
            }

            let kind = match ch {
                '(' => self.single(TokenKind::LParen),
                ')' => self.single(TokenKind::RParen),
                '{' => self.single(TokenKind::LCurly),
                '}' => self.single(TokenKind::RCurly),
                ';' => self.single(TokenKind::Semicolon),
                '"' | '\'' | '`' => self.string(ch)?,
                c if is_word_start(c) => self.word(),
                _ => self.other(),
            };
            self.tokens.push(Token::new(kind, start, self.pos));
        }

        Ok(self.tokens)
    }

    fn rest(&self) -> &'src str {
        self.source.get(self.pos..).unwrap_or_default()
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += ch.len_utf8();
        Some(ch)
    }

    fn advance_while(&mut self, predicate: impl Fn(char) -> bool) {
        let len: usize = self
            .rest()
            .chars()
            .take_while(|c| predicate(*c))
            .map(char::len_utf8)
            .sum();
        self.pos += len;
    }

    fn single(&mut self, kind: TokenKind) -> TokenKind {
        self.bump();
        kind
    }

    fn word(&mut self) -> TokenKind {
        let start = self.pos;
        self.advance_while(is_word_continue);
        match self.source.get(start..self.pos) {
            Some("function") => TokenKind::FunctionKw,
            Some("return") => TokenKind::ReturnKw,
            _ => TokenKind::Identifier,
        }
    }

    fn string(&mut self, quote: char) -> Result<TokenKind, ParseError> {
        let start = self.pos;
        self.bump();
        loop {
            match self.bump() {
                None => {
                    return Err(ParseError::at(
                        self.source,
                        start,
                        "unterminated string literal",
                    ));
                }
                Some('\\') => {
                    self.bump();
                }
                Some(c) if c == quote => return Ok(TokenKind::Other),
                Some(_) => {}
            }
        }
    }

    fn other(&mut self) -> TokenKind {
        self.bump();
        self.advance_while(|c| is_other(c) && c != '/');
        TokenKind::Other
    }

    /// Skips a `//` or `/* */` comment at the cursor, if there is one.
    fn skip_comment(&mut self) -> Result<bool, ParseError> {
        let rest = self.rest();
        if rest.starts_with("//") {
            self.advance_while(|c| c != '\n');
            return Ok(true);
        }
        if rest.starts_with("/*") {
            let Some(close) = rest.get(2..).and_then(|body| body.find("*/")) else {
                return Err(ParseError::at(
                    self.source,
                    self.pos,
                    "unterminated block comment",
                ));
            };
            self.pos += close + 4;
            return Ok(true);
        }
        Ok(false)
    }
}

const fn is_word_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || c == '$'
}

const fn is_word_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '$'
}

const fn is_delimiter(c: char) -> bool {
    matches!(c, '(' | ')' | '{' | '}' | ';')
}

const fn is_quote(c: char) -> bool {
    matches!(c, '"' | '\'' | '`')
}

fn is_other(c: char) -> bool {
    !c.is_whitespace() && !is_delimiter(c) && !is_word_start(c) && !is_quote(c)
}
