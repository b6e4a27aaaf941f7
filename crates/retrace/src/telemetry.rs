//! Process-wide log output for hosts embedding `retrace`.
//!
//! The engines only emit `tracing` events under the `retrace::*` targets.
//! Nothing is printed until the host either installs its own subscriber or
//! calls [`initialise`] once at start-up.

use std::io::{self, IsTerminal};

use once_cell::sync::OnceCell;
use tracing::subscriber::SetGlobalDefaultError;
use tracing::{Subscriber, debug};
use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{EnvFilter, Layer, fmt};

use crate::config::{LogFormat, TelemetryConfig};

const TELEMETRY_TARGET: &str = "retrace::telemetry";

/// Format chosen by the call that installed the subscriber.
static INSTALLED_FORMAT: OnceCell<LogFormat> = OnceCell::new();

/// Describes the subscriber that is in effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TelemetryHandle {
    format: LogFormat,
}

impl TelemetryHandle {
    /// Returns the output format of the installed subscriber.
    ///
    /// After the first call this may differ from the format a later
    /// [`initialise`] call asked for.
    #[must_use]
    pub const fn format(&self) -> LogFormat {
        self.format
    }
}

/// Errors encountered while configuring telemetry.
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    /// The filter directive string did not parse.
    #[error("invalid log filter: {0}")]
    Filter(String),
    /// Another global subscriber was installed outside [`initialise`].
    #[error("failed to install telemetry subscriber: {0}")]
    Subscriber(SetGlobalDefaultError),
}

/// Installs a global subscriber writing to stderr on first call.
///
/// Later calls leave the subscriber untouched and report the format that is
/// in effect.
///
/// # Errors
///
/// Returns [`TelemetryError::Filter`] for an unparseable filter and
/// [`TelemetryError::Subscriber`] if a subscriber was already installed
/// elsewhere. A failed first call may be retried.
pub fn initialise(config: &TelemetryConfig) -> Result<TelemetryHandle, TelemetryError> {
    let format = INSTALLED_FORMAT.get_or_try_init(|| install(config))?;
    Ok(TelemetryHandle { format: *format })
}

/// Parses the filter directives of `config`.
pub(crate) fn build_filter(config: &TelemetryConfig) -> Result<EnvFilter, TelemetryError> {
    EnvFilter::try_new(config.log_filter())
        .map_err(|error| TelemetryError::Filter(error.to_string()))
}

fn install(config: &TelemetryConfig) -> Result<LogFormat, TelemetryError> {
    let filter = build_filter(config)?;
    let format = config.log_format();
    let registry = tracing_subscriber::registry().with(filter);
    let subscriber: Box<dyn Subscriber + Send + Sync> = match format {
        LogFormat::Json => Box::new(registry.with(json_layer())),
        LogFormat::Compact => Box::new(registry.with(compact_layer(io::stderr().is_terminal()))),
    };
    tracing::subscriber::set_global_default(subscriber)
        .map_err(TelemetryError::Subscriber)?;

    debug!(
        target: TELEMETRY_TARGET,
        %format,
        filter = config.log_filter(),
        "telemetry initialised"
    );
    Ok(format)
}

/// One flattened JSON object per event, with an RFC 3339 timestamp.
fn json_layer<S>() -> impl Layer<S>
where
    S: Subscriber + for<'span> LookupSpan<'span>,
{
    fmt::layer()
        .json()
        .flatten_event(true)
        .with_timer(UtcTime::rfc_3339())
        .with_ansi(false)
        .with_writer(io::stderr)
}

/// One line per event; coloured only when stderr is a terminal.
fn compact_layer<S>(ansi: bool) -> impl Layer<S>
where
    S: Subscriber + for<'span> LookupSpan<'span>,
{
    fmt::layer()
        .compact()
        .with_timer(UtcTime::rfc_3339())
        .with_ansi(ansi)
        .with_writer(io::stderr)
}
