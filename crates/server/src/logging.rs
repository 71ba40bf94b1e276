//! Application-wide logging setup.
//!
//! Records are written one per line as
//! `YYYY-MM-DD HH:MM:SS - target - LEVEL - message`.

use std::fmt;
use std::io;

use chrono::Local;
use tracing::Event;
use tracing::Level;
use tracing::Subscriber;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::FmtContext;
use tracing_subscriber::fmt::FormatEvent;
use tracing_subscriber::fmt::FormatFields;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::prelude::*;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::TryInitError;

use crate::settings::LogLevel;

/// The target of the per-request access records.
pub const ACCESS_TARGET: &str = "overload::access";

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Installs the global subscriber writing to stdout.
///
/// `RUST_LOG` directives, when present, replace the ones derived from `level`.
pub fn init(level: LogLevel) -> Result<(), TryInitError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(directives(level)));
    build_subscriber(filter, io::stdout).try_init()
}

/// Builds the subscriber used by [init], writing to `writer`.
pub fn build_subscriber<W>(filter: EnvFilter, writer: W) -> impl Subscriber + Send + Sync
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let fmt_layer = tracing_subscriber::fmt::layer()
        .event_format(LineFormat)
        .with_writer(writer);

    tracing_subscriber::registry().with(filter).with(fmt_layer)
}

/// The filter directives for `level`.
///
/// The access records are noisy, so they are held at `WARN` unless the
/// level is stricter than that.
pub fn directives(level: LogLevel) -> String {
    let access_level = level.max(LogLevel::Warn);
    format!(
        "{},{ACCESS_TARGET}={}",
        directive(level),
        directive(access_level)
    )
}

fn directive(level: LogLevel) -> &'static str {
    match level {
        LogLevel::Trace => "trace",
        LogLevel::Debug => "debug",
        LogLevel::Info => "info",
        LogLevel::Warn => "warn",
        LogLevel::Error => "error",
    }
}

fn level_name(level: &Level) -> &'static str {
    if *level == Level::WARN {
        "WARNING"
    } else {
        level.as_str()
    }
}

struct LineFormat;

impl<S, N> FormatEvent<S, N> for LineFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let metadata = event.metadata();

        write!(
            writer,
            "{} - {} - {} - ",
            Local::now().format(DATE_FORMAT),
            metadata.target(),
            level_name(metadata.level())
        )?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}
