// Copyright 2025 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

use crate::appender;
use crate::error::{Error, Result};
use crate::{LogFormat, LogOutputDest};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_core::{Event, Level, Subscriber};
use tracing_subscriber::{
    filter::Targets,
    fmt::{
        self as tracing_fmt,
        format::Writer,
        time::{FormatTime, SystemTime},
        FmtContext, FormatEvent, FormatFields, MakeWriter,
    },
    registry::LookupSpan,
    Layer, Registry,
};

/// Environment variable that overrides the default logging targets.
pub const LOG_ENV_VAR: &str = "CHAIN_GALLERY_LOG";

/// Crates enabled by the `all` keyword.
const ALL_CRATES: [&str; 3] = ["gallery_deploy", "gallery_evm", "gallery_logging"];

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

#[derive(Default)]
pub(crate) struct TracingLayers {
    pub(crate) layers: Vec<BoxedLayer>,
    pub(crate) log_appender_guard: Option<WorkerGuard>,
}

impl TracingLayers {
    pub(crate) fn fmt_layer(
        &mut self,
        default_logging_targets: Vec<(String, Level)>,
        output_dest: &LogOutputDest,
        format: LogFormat,
    ) -> Result<()> {
        let targets = match std::env::var(LOG_ENV_VAR) {
            Ok(value) => get_logging_targets(&value)?,
            Err(_) => default_logging_targets,
        };
        let target_filters = Targets::new().with_targets(targets);

        let layer = match output_dest {
            LogOutputDest::Stdout => boxed_fmt_layer(std::io::stdout, format, target_filters),
            LogOutputDest::Stderr => boxed_fmt_layer(std::io::stderr, format, target_filters),
            LogOutputDest::Path(dir) => {
                let (writer, guard) = appender::file_rotater(dir)?;
                self.log_appender_guard = Some(guard);
                boxed_fmt_layer(writer, format, target_filters)
            }
        };
        self.layers.push(layer);
        Ok(())
    }
}

fn boxed_fmt_layer<W>(writer: W, format: LogFormat, target_filters: Targets) -> BoxedLayer
where
    W: for<'writer> MakeWriter<'writer> + Send + Sync + 'static,
{
    match format {
        LogFormat::Json => tracing_fmt::layer()
            .json()
            .flatten_event(true)
            .with_writer(writer)
            .with_filter(target_filters)
            .boxed(),
        LogFormat::Default => tracing_fmt::layer()
            .with_ansi(false)
            .with_target(false)
            .event_format(LogFormatter)
            .with_writer(writer)
            .with_filter(target_filters)
            .boxed(),
    }
}

/// Parses `crate=LEVEL` pairs separated by commas.
///
/// The keyword `all` enables every crate of the workspace at `TRACE`. A bare level, such as
/// `CHAIN_GALLERY_LOG=debug`, applies to those same crates.
pub fn get_logging_targets(logging_env_value: &str) -> Result<Vec<(String, Level)>> {
    let mut targets = Vec::new();

    for directive in logging_env_value
        .split(',')
        .map(str::trim)
        .filter(|directive| !directive.is_empty())
    {
        if directive.eq_ignore_ascii_case("all") {
            targets.extend(
                ALL_CRATES
                    .iter()
                    .map(|name| (name.to_string(), Level::TRACE)),
            );
            continue;
        }

        match directive.split_once('=') {
            Some((target, level)) => targets.push((target.trim().to_string(), parse_level(level)?)),
            None => {
                let level = parse_level(directive)?;
                targets.extend(ALL_CRATES.iter().map(|name| (name.to_string(), level)));
            }
        }
    }

    Ok(targets)
}

fn parse_level(value: &str) -> Result<Level> {
    value.trim().parse::<Level>().map_err(|_| {
        Error::LoggingConfiguration(format!(
            "{value:?} is not a log level, use one of TRACE, DEBUG, INFO, WARN or ERROR"
        ))
    })
}

/// `[<time> <LEVEL> <module> <line>/<span>...] <fields>`
pub struct LogFormatter;

impl<S, N> FormatEvent<S, N> for LogFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let level = *event.metadata().level();
        let module = event.metadata().module_path().unwrap_or("<unknown module>");
        let lno = event.metadata().line().unwrap_or(0);

        write!(writer, "[")?;
        SystemTime.format_time(&mut writer)?;
        write!(writer, " {level} {module} {lno}")?;
        ctx.visit_spans(|span| write!(writer, "/{}", span.name()))?;
        write!(writer, "] ")?;

        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}
