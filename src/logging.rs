//! Run logging
//!
//! Every run writes the same messages to the console and to a run-log file
//! that is truncated at start, so a failed run can be diagnosed afterwards.
//! The context is built explicitly and only active while entered.

use std::fs::File;
use std::path::Path;

use tracing::Dispatch;
use tracing::dispatcher::DefaultGuard;
use tracing::level_filters::LevelFilter;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{EnvFilter, fmt};

pub struct LogContext {
    dispatch: Dispatch,
    /// Flushes the log file when the context is dropped
    _file_guard: Option<WorkerGuard>,
}

impl LogContext {
    /// Logs to stderr and to `log_file`
    pub fn new(log_file: &Path, verbose: bool) -> std::io::Result<Self> {
        let file = File::create(log_file)?;
        let (writer, guard) = tracing_appender::non_blocking(file);

        let subscriber = tracing_subscriber::registry()
            .with(env_filter(verbose))
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .without_time()
                    .with_target(false),
            )
            .with(
                fmt::layer()
                    .with_writer(writer)
                    .with_ansi(false)
                    .with_target(false),
            );

        Ok(Self {
            dispatch: Dispatch::new(subscriber),
            _file_guard: Some(guard),
        })
    }

    /// Logs to stderr only
    pub fn console(verbose: bool) -> Self {
        let subscriber = tracing_subscriber::registry().with(env_filter(verbose)).with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .without_time()
                .with_target(false),
        );

        Self {
            dispatch: Dispatch::new(subscriber),
            _file_guard: None,
        }
    }

    /// Makes this context the current thread's logger until the guard drops
    pub fn enter(&self) -> DefaultGuard {
        tracing::dispatcher::set_default(&self.dispatch)
    }
}

fn env_filter(verbose: bool) -> EnvFilter {
    let level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };

    EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy()
}
