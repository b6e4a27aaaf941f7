//! Engine selection.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// The two interchangeable matching engines.
#[derive(
    Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, Hash, EnumString, Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Engine {
    /// Hand-written lexer and recursive-descent parser over a restricted
    /// grammar. Rejects anything outside it.
    Grammar,
    /// Tree-sitter parse plus structural queries. Accepts full JavaScript,
    /// TypeScript and TSX.
    #[default]
    Query,
}

impl Engine {
    /// Every engine, grammar first.
    pub const ALL: [Self; 2] = [Self::Grammar, Self::Query];
}

/// Errors encountered while parsing an [`Engine`] from text.
pub type EngineParseError = strum::ParseError;
