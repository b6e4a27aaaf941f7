//! JavaScript dialects and their Tree-sitter grammars.

use std::path::Path;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Dialect of the source handed to the query engine.
///
/// All three grammars share the `function_declaration` and
/// `return_statement` node kinds, so one pair of queries serves them all.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize, EnumString, Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(ascii_case_insensitive)]
pub enum SupportedLanguage {
    /// Plain JavaScript, including JSX.
    #[default]
    #[serde(alias = "js")]
    #[strum(to_string = "javascript", serialize = "js")]
    JavaScript,
    /// TypeScript without JSX.
    #[serde(alias = "ts")]
    #[strum(to_string = "typescript", serialize = "ts")]
    TypeScript,
    /// TypeScript with JSX.
    #[strum(to_string = "tsx")]
    Tsx,
}

/// Errors encountered while parsing a [`SupportedLanguage`] from text.
pub type LanguageParseError = strum::ParseError;

const EXTENSIONS: &[(&str, SupportedLanguage)] = &[
    ("js", SupportedLanguage::JavaScript),
    ("mjs", SupportedLanguage::JavaScript),
    ("cjs", SupportedLanguage::JavaScript),
    ("jsx", SupportedLanguage::JavaScript),
    ("ts", SupportedLanguage::TypeScript),
    ("mts", SupportedLanguage::TypeScript),
    ("cts", SupportedLanguage::TypeScript),
    ("tsx", SupportedLanguage::Tsx),
];

impl SupportedLanguage {
    /// Maps a file extension (without the dot) to a dialect.
    #[must_use]
    pub fn from_extension(ext: &str) -> Option<Self> {
        EXTENSIONS
            .iter()
            .find(|(candidate, _)| candidate.eq_ignore_ascii_case(ext))
            .map(|&(_, language)| language)
    }

    /// Maps a file path to a dialect by its extension.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    /// Returns the Tree-sitter grammar for this dialect.
    #[must_use]
    pub fn tree_sitter_language(self) -> tree_sitter::Language {
        match self {
            Self::JavaScript => tree_sitter_javascript::LANGUAGE.into(),
            Self::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            Self::Tsx => tree_sitter_typescript::LANGUAGE_TSX.into(),
        }
    }
}
