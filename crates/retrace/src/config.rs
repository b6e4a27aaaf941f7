//! Host-supplied configuration.
//!
//! Every field has a default, so an empty document deserialises to the
//! behaviour of the engines' free `transform` functions.

use std::path::Path;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use tracing::debug;

use retrace_core::InstrumentConfig;
use retrace_query::SupportedLanguage;

use crate::{Engine, FACADE_TARGET};

/// Default tracing filter applied when none is configured.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Supported logging output formats.
#[derive(
    Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, EnumString, Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum LogFormat {
    /// Structured JSON suitable for ingestion by logging stacks.
    #[default]
    Json,
    /// Human-readable single line output.
    Compact,
}

/// Errors encountered while parsing a [`LogFormat`] from text.
pub type LogFormatParseError = strum::ParseError;

/// Logging configuration consumed by [`crate::telemetry::initialise`].
///
/// The filter uses `EnvFilter` directive syntax; engine events are emitted
/// under `retrace::grammar`, `retrace::query` and `retrace`.
///
/// # Example
///
/// ```no_run
/// use retrace::{LogFormat, TelemetryConfig, telemetry};
///
/// let config = TelemetryConfig::default()
///     .with_log_filter("retrace::query=debug,warn")
///     .with_log_format(LogFormat::Compact);
/// let handle = telemetry::initialise(&config)?;
/// assert_eq!(handle.format(), LogFormat::Compact);
/// # Ok::<(), retrace::telemetry::TelemetryError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct TelemetryConfig {
    log_filter: String,
    log_format: LogFormat,
}

impl TelemetryConfig {
    /// Returns the `EnvFilter` directive string.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        &self.log_filter
    }

    /// Returns the output format.
    #[must_use]
    pub const fn log_format(&self) -> LogFormat {
        self.log_format
    }

    /// Replaces the filter directive.
    #[must_use]
    pub fn with_log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = filter.into();
        self
    }

    /// Replaces the output format.
    #[must_use]
    pub const fn with_log_format(mut self, format: LogFormat) -> Self {
        self.log_format = format;
        self
    }
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_filter: DEFAULT_LOG_FILTER.to_owned(),
            log_format: LogFormat::default(),
        }
    }
}

/// Top-level configuration for [`crate::build_transformer`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct RetraceConfig {
    engine: Engine,
    language: SupportedLanguage,
    instrument: InstrumentConfig,
    telemetry: TelemetryConfig,
}

impl RetraceConfig {
    /// Returns the selected engine.
    #[must_use]
    pub const fn engine(&self) -> Engine {
        self.engine
    }

    /// Returns the source language. Only the query engine reads it.
    #[must_use]
    pub const fn language(&self) -> SupportedLanguage {
        self.language
    }

    /// Returns the instrumentation templates.
    #[must_use]
    pub const fn instrument(&self) -> &InstrumentConfig {
        &self.instrument
    }

    /// Returns the logging configuration.
    #[must_use]
    pub const fn telemetry(&self) -> &TelemetryConfig {
        &self.telemetry
    }

    /// Selects an engine.
    #[must_use]
    pub const fn with_engine(mut self, engine: Engine) -> Self {
        self.engine = engine;
        self
    }

    /// Selects a source language.
    #[must_use]
    pub const fn with_language(mut self, language: SupportedLanguage) -> Self {
        self.language = language;
        self
    }

    /// Selects the source language from the extension of `path`.
    ///
    /// An unrecognised or missing extension keeps the current language.
    #[must_use]
    pub fn with_language_for_path(self, path: &Path) -> Self {
        match SupportedLanguage::from_path(path) {
            Some(language) => self.with_language(language),
            None => {
                debug!(
                    target: FACADE_TARGET,
                    path = %path.display(),
                    language = %self.language,
                    "unrecognised extension; keeping configured language"
                );
                self
            }
        }
    }

    /// Replaces the instrumentation templates.
    #[must_use]
    pub fn with_instrument(mut self, instrument: InstrumentConfig) -> Self {
        self.instrument = instrument;
        self
    }

    /// Replaces the logging configuration.
    #[must_use]
    pub fn with_telemetry(mut self, telemetry: TelemetryConfig) -> Self {
        self.telemetry = telemetry;
        self
    }
}
