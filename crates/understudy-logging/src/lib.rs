//! Subscriber setup for understudy's `tracing` events.
//!
//! The engine never installs a subscriber itself. Stub registration, dispatch
//! and verification failures are plain `tracing` events; a test suite (or a
//! harness binary) decides where they go by calling one of the initializers
//! here.
//!
//! ```rust,ignore
//! // In a #[test]: output is captured per test, repeat calls are no-ops
//! understudy_logging::init_test();
//!
//! // Every dispatched invocation on stderr, with event targets
//! understudy_logging::init(LogConfig::engine_trace().output(LogOutput::Stderr));
//! ```

use std::io::IsTerminal;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub use tracing::{debug, error, info, span, trace, warn, Level};

pub use tracing;

/// Filter used when neither `RUST_LOG` nor any directive is given.
pub const DEFAULT_DIRECTIVE: &str = "warn";

/// Where formatted events are written
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogOutput {
    #[default]
    Stdout,
    Stderr,
}

impl LogOutput {
    fn is_terminal(self) -> bool {
        match self {
            LogOutput::Stdout => std::io::stdout().is_terminal(),
            LogOutput::Stderr => std::io::stderr().is_terminal(),
        }
    }

    fn make_writer(self) -> BoxMakeWriter {
        match self {
            LogOutput::Stdout => BoxMakeWriter::new(std::io::stdout),
            LogOutput::Stderr => BoxMakeWriter::new(std::io::stderr),
        }
    }
}

/// Subscriber settings, built by value.
#[derive(Debug, Clone, Default)]
pub struct LogConfig {
    /// Force everything to `debug`, ignoring `RUST_LOG` and directives
    pub debug: bool,
    /// `EnvFilter` directives applied when `RUST_LOG` is unset
    pub directives: Vec<String>,
    pub output: LogOutput,
    /// Print the event target (`understudy_engine::dispatch`, ...)
    pub show_target: bool,
}

impl LogConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn debug(mut self, enabled: bool) -> Self {
        self.debug = enabled;
        self
    }

    /// Add a filter directive such as `understudy_engine=trace`.
    pub fn directive(mut self, directive: impl Into<String>) -> Self {
        self.directives.push(directive.into());
        self
    }

    pub fn output(mut self, output: LogOutput) -> Self {
        self.output = output;
        self
    }

    pub fn show_target(mut self, show: bool) -> Self {
        self.show_target = show;
        self
    }

    /// Every engine event, including the `trace!` lines emitted for mocks
    /// that do not log their invocations.
    pub fn engine_trace() -> Self {
        Self::new()
            .directive(DEFAULT_DIRECTIVE)
            .directive("understudy_engine=trace")
            .show_target(true)
    }

    fn filter(&self) -> EnvFilter {
        if self.debug {
            return EnvFilter::new("debug");
        }
        EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            if self.directives.is_empty() {
                EnvFilter::new(DEFAULT_DIRECTIVE)
            } else {
                EnvFilter::new(self.directives.join(","))
            }
        })
    }
}

/// Install the global subscriber.
///
/// # Panics
///
/// Panics if a subscriber is already installed; see [`try_init`].
pub fn init(config: LogConfig) {
    if let Err(e) = try_init(config) {
        panic!("failed to initialize logging: {}", e);
    }
}

/// Install the global subscriber, failing if one is already set.
pub fn try_init(config: LogConfig) -> Result<(), TryInitError> {
    let layer = fmt::layer()
        .with_writer(config.output.make_writer())
        .with_target(config.show_target)
        .with_ansi(config.output.is_terminal());

    tracing_subscriber::registry()
        .with(config.filter())
        .with(layer)
        .try_init()
}

/// Subscriber for `#[test]` functions.
///
/// Writes through the test harness so output only shows for failing tests.
/// Defaults to `debug` so logged mocks are visible; `RUST_LOG` still wins.
/// Later calls are no-ops.
pub fn init_test() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_test_writer())
        .try_init();
}
