//! Instrumentation templates.
//!
//! An [`Instrumenter`] turns matches into edits. Each function body gains an
//! output-holder declaration, and each qualifying return statement becomes
//! an assignment to the holder, a report call, and a return of the holder.
//!
//! With the default [`InstrumentConfig`], `function foo() { return 1; }`
//! gains `let fooOutput;` and the return becomes
//! `fooOutput = 1; console.log(fooOutput); return fooOutput;`.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::edit::Edit;
use crate::matches::{FunctionMatch, ReturnMatch};

/// Default suffix appended to a function name to form its holder name.
pub const DEFAULT_HOLDER_SUFFIX: &str = "Output";

/// Default callee used to report a returned value.
pub const DEFAULT_REPORT_CALLEE: &str = "console.log";

/// Default indentation of the injected declaration.
pub const DEFAULT_INDENT: &str = "  ";

/// Keyword used to declare the output-holder.
#[derive(
    Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, EnumString, Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum DeclarationKeyword {
    /// Block-scoped `let` declaration.
    #[default]
    Let,
    /// Function-scoped `var` declaration.
    Var,
}

/// Shape of the injected instrumentation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct InstrumentConfig {
    holder_suffix: String,
    declaration: DeclarationKeyword,
    report_callee: String,
    indent: String,
}

impl InstrumentConfig {
    /// Suffix appended to function names to form holder names.
    #[must_use]
    pub fn holder_suffix(&self) -> &str {
        &self.holder_suffix
    }

    /// Keyword used for the holder declaration.
    #[must_use]
    pub const fn declaration(&self) -> DeclarationKeyword {
        self.declaration
    }

    /// Callee receiving the holder in the report call.
    #[must_use]
    pub fn report_callee(&self) -> &str {
        &self.report_callee
    }

    /// Indentation placed before the holder declaration.
    #[must_use]
    pub fn indent(&self) -> &str {
        &self.indent
    }

    /// Replaces the holder suffix.
    #[must_use]
    pub fn with_holder_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.holder_suffix = suffix.into();
        self
    }

    /// Replaces the declaration keyword.
    #[must_use]
    pub const fn with_declaration(mut self, keyword: DeclarationKeyword) -> Self {
        self.declaration = keyword;
        self
    }

    /// Replaces the report callee.
    #[must_use]
    pub fn with_report_callee(mut self, callee: impl Into<String>) -> Self {
        self.report_callee = callee.into();
        self
    }

    /// Replaces the declaration indentation.
    #[must_use]
    pub fn with_indent(mut self, indent: impl Into<String>) -> Self {
        self.indent = indent.into();
        self
    }
}

impl Default for InstrumentConfig {
    fn default() -> Self {
        Self {
            holder_suffix: DEFAULT_HOLDER_SUFFIX.to_owned(),
            declaration: DeclarationKeyword::default(),
            report_callee: DEFAULT_REPORT_CALLEE.to_owned(),
            indent: DEFAULT_INDENT.to_owned(),
        }
    }
}

/// Renders matches into edits using an [`InstrumentConfig`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Instrumenter {
    config: InstrumentConfig,
}

impl Instrumenter {
    /// Creates an instrumenter for the given configuration.
    #[must_use]
    pub const fn new(config: InstrumentConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration in use.
    #[must_use]
    pub const fn config(&self) -> &InstrumentConfig {
        &self.config
    }

    /// Name of the output-holder for `function`.
    #[must_use]
    pub fn holder_name(&self, function: &str) -> String {
        format!("{function}{}", self.config.holder_suffix)
    }

    /// Insertion declaring the holder just inside the function body.
    #[must_use]
    pub fn declare(&self, function: &FunctionMatch<'_>) -> Edit {
        let holder = self.holder_name(function.name());
        Edit::insert(
            function.body_start(),
            format!(
                "\n{}{} {holder};\n",
                self.config.indent, self.config.declaration
            ),
        )
    }

    /// Replacement turning a return statement into assign, report, return.
    #[must_use]
    pub fn rewrite(&self, statement: &ReturnMatch<'_>) -> Edit {
        let holder = self.holder_name(statement.function());
        let span = statement.span();
        Edit::replace(
            span.start,
            span.len(),
            format!(
                "{holder} = {}; {}({holder}); return {holder};",
                statement.expression(),
                self.config.report_callee
            ),
        )
    }
}
