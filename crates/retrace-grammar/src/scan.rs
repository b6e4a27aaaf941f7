//! Token-stream matcher.
//!
//! Runs over the flat token stream after the grammar has accepted it. Every
//! `function` token followed by an identifier opens a function; the scan
//! then walks forward from the body's `{`, tracking brace depth, and records
//! each `return` seen directly inside the body (depth 1).

use retrace_core::{FunctionMatch, ReturnMatch};

use crate::lexer::{Token, TokenKind};

/// Matches found in one source text.
#[derive(Debug, Default)]
pub(crate) struct Matches<'src> {
    pub(crate) functions: Vec<FunctionMatch<'src>>,
    pub(crate) returns: Vec<ReturnMatch<'src>>,
}

pub(crate) fn scan<'src>(source: &'src str, tokens: &[Token]) -> Matches<'src> {
    let mut matches = Matches::default();

    for (index, token) in tokens.iter().enumerate() {
        if token.kind() != TokenKind::FunctionKw {
            continue;
        }
        let Some(name) = tokens
            .get(index + 1)
            .filter(|next| next.kind() == TokenKind::Identifier)
        else {
            continue;
        };
        let Some((brace_index, brace)) = tokens
            .iter()
            .enumerate()
            .skip(index + 2)
            .find(|(_, candidate)| candidate.kind() == TokenKind::LCurly)
        else {
            continue;
        };

        let function = name.text(source);
        matches
            .functions
            .push(FunctionMatch::new(function, brace.end()));
        scan_body(
            source,
            tokens,
            brace_index + 1,
            function,
            &mut matches.returns,
        );
    }

    matches
}

fn scan_body<'src>(
    source: &'src str,
    tokens: &[Token],
    from: usize,
    function: &'src str,
    returns: &mut Vec<ReturnMatch<'src>>,
) {
    let mut depth: usize = 1;
    for (index, token) in tokens.iter().enumerate().skip(from) {
        match token.kind() {
            TokenKind::LCurly => depth += 1,
            TokenKind::RCurly => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return;
                }
            }
            TokenKind::ReturnKw if depth == 1 => {
                if let Some(found) = return_at(source, tokens, index, function) {
                    returns.push(found);
                }
            }
            _ => {}
        }
    }
}

/// Builds the match for the `return` token at `keyword_index`.
///
/// The expression is everything between the keyword and the next `;`. A bare
/// `return;` yields nothing.
fn return_at<'src>(
    source: &'src str,
    tokens: &[Token],
    keyword_index: usize,
    function: &'src str,
) -> Option<ReturnMatch<'src>> {
    let keyword = tokens.get(keyword_index)?;
    let body = tokens.get(keyword_index + 1..)?;
    let terminator_offset = body
        .iter()
        .position(|token| token.kind() == TokenKind::Semicolon)?;
    let expression = body.get(..terminator_offset)?;
    let (first, last) = (expression.first()?, expression.last()?);
    let terminator = body.get(terminator_offset)?;

    Some(ReturnMatch::new(
        function,
        source.get(first.start()..last.end())?,
        keyword.start()..terminator.end(),
    ))
}
