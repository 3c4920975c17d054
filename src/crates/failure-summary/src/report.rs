//! Entry points for emitting summaries

use crate::config::SummaryConfig;
use crate::error::Result;
use crate::render::render;
use std::fmt;
use std::io::{self, Write};
use unwrap_chain::{in_flight, Failure};

/// A failure summary, rendered when displayed
///
/// Without a root, the summary covers the failures currently being handled
/// on the displaying thread (see [`unwrap_chain::in_flight`]).
///
/// # Example
///
/// ```rust
/// use failure_summary::{Summary, SummaryConfig};
/// use unwrap_chain::{AggregateError, PlainError, Stack};
///
/// let agg = AggregateError::new()
///     .with(PlainError::with_stack("A", Stack::empty()))
///     .with(PlainError::with_stack("B", Stack::empty()));
/// let text = Summary::of(&agg)
///     .with_config(SummaryConfig::new().with_stack(false))
///     .to_string();
///
/// assert!(text.contains("aggregate failure (2 items):"));
/// ```
#[derive(Clone)]
pub struct Summary<'a> {
    root: Option<&'a dyn Failure>,
    config: SummaryConfig,
}

impl<'a> Summary<'a> {
    /// Summarize the tree rooted at `root`
    pub fn of(root: &'a dyn Failure) -> Self {
        Self {
            root: Some(root),
            config: SummaryConfig::default(),
        }
    }

    /// Summarize the failures in flight on the current thread
    pub fn current() -> Self {
        Self {
            root: None,
            config: SummaryConfig::default(),
        }
    }

    /// Use `config` instead of the defaults
    pub fn with_config(mut self, config: SummaryConfig) -> Self {
        self.config = config;
        self
    }

    /// Render the summary text
    pub fn render(&self) -> String {
        match self.root {
            Some(root) => render(root, &self.config),
            None => render(&in_flight::current(), &self.config),
        }
    }
}

impl fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl fmt::Debug for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Summary")
            .field("root", &self.root.map(|root| root.to_string()))
            .field("config", &self.config)
            .finish()
    }
}

/// Write a summary of `root` (or of the failures in flight) to `sink`, or stderr
///
/// Never fails: a write error is logged and dropped.
pub fn summarize(sink: Option<&mut dyn Write>, root: Option<&dyn Failure>) {
    summarize_with(sink, root, &SummaryConfig::default());
}

/// [`summarize`] with an explicit configuration
pub fn summarize_with(
    sink: Option<&mut dyn Write>,
    root: Option<&dyn Failure>,
    config: &SummaryConfig,
) {
    let written = match sink {
        Some(sink) => write_summary(sink, root, config),
        None => write_summary(&mut io::stderr().lock(), root, config),
    };
    if let Err(e) = written {
        tracing::warn!(error = %e, "failed to write failure summary");
    }
}

/// Write a summary of `root` (or of the failures in flight) to `sink`
///
/// Unlike [`summarize`], a failed write is returned as [`SummaryError::Io`].
///
/// [`SummaryError::Io`]: crate::SummaryError::Io
pub fn write_summary(
    sink: &mut dyn Write,
    root: Option<&dyn Failure>,
    config: &SummaryConfig,
) -> Result<()> {
    let summary = Summary {
        root,
        config: config.clone(),
    };
    let text = summary.render();

    sink.write_all(text.as_bytes())?;
    sink.flush()?;
    tracing::debug!(bytes = text.len(), "wrote failure summary");
    Ok(())
}

/// Emit a summary of `root` (or of the failures in flight) as one error event
pub fn log_summary(root: Option<&dyn Failure>) {
    let summary = Summary {
        root,
        config: SummaryConfig::default(),
    };
    tracing::error!(summary = %summary, "failure summary");
}
