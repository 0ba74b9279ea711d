//! Log parsers
//!
//! Both parsers are small state machines driven by [`LineEvent`]s:
//!
//! ```text
//!            RunStart                 RunStart (row := 0)
//! awaiting ───────────> in-run ─────────────────────────┐
//!                         │  ^                           │
//!                         │  └───────────────────────────┘
//!                         └── Epoch: write row, row += 1
//! ```
//!
//! - [`RunSeriesParser`]: one chart per size with a "train" and a "test" trace.
//! - [`AggregateParser`]: three charts per size (mean, min, max) with one
//!   trace per algorithm, merged online across repeated runs.
//!
//! A run start whose grouping key did not change still rewinds the row
//! cursor, so a repeated run overwrites the rows of the previous one instead
//! of adding new series. Existing chart pages depend on that layout.

mod aggregate;
mod runs;

pub use aggregate::{AggregateParser, Stat};
pub use runs::RunSeriesParser;

use std::fmt;
use std::str::FromStr;

use crate::classify::{LineClassifier, LineEvent};
use crate::series::PlotGroup;
use crate::Error;

/// Consumes classified lines and produces plot groups.
pub trait LogParser {
    /// Feed the next event, in log order.
    fn observe(&mut self, event: &LineEvent);

    /// Hand over the groups built so far.
    fn finish(self) -> Vec<PlotGroup>;
}

/// Classify `text` line by line and feed it through `parser`.
pub fn parse_with<P: LogParser>(classifier: &LineClassifier, text: &str, mut parser: P) -> Vec<PlotGroup> {
    for event in classifier.events(text) {
        parser.observe(&event);
    }
    parser.finish()
}

/// Which grouping a pipeline applies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Variant {
    /// One train/test chart per size ([`RunSeriesParser`]).
    #[default]
    PerRun,
    /// Mean/min/max charts per size and algorithm ([`AggregateParser`]).
    Aggregate,
}

impl Variant {
    /// Parse `text` with the parser this variant selects.
    #[must_use]
    pub fn parse(self, classifier: &LineClassifier, text: &str) -> Vec<PlotGroup> {
        match self {
            Self::PerRun => parse_with(classifier, text, RunSeriesParser::new()),
            Self::Aggregate => parse_with(classifier, text, AggregateParser::new()),
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PerRun => f.write_str("per-run"),
            Self::Aggregate => f.write_str("aggregate"),
        }
    }
}

impl FromStr for Variant {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "per-run" | "runs" => Ok(Self::PerRun),
            "aggregate" | "stats" => Ok(Self::Aggregate),
            other => Err(Error::Config(format!(
                "unknown variant '{other}' (expected 'per-run' or 'aggregate')"
            ))),
        }
    }
}

/// Cursor shared by both parsers.
///
/// `group_key` is the size of the current chart (group triplet for the
/// aggregate parser), `trace_key` the algorithm of the current trace, `row`
/// the next row to write.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseState {
    group_key: Option<u64>,
    trace_key: Option<String>,
    row: usize,
}

impl ParseState {
    /// Start in the awaiting-run state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// `true` once a run start has been seen.
    #[must_use]
    pub const fn in_run(&self) -> bool {
        self.group_key.is_some()
    }

    /// Current group key.
    #[must_use]
    pub const fn group_key(&self) -> Option<u64> {
        self.group_key
    }

    /// Current trace key.
    #[must_use]
    pub fn trace_key(&self) -> Option<&str> {
        self.trace_key.as_deref()
    }

    /// Next row to write.
    #[must_use]
    pub const fn row(&self) -> usize {
        self.row
    }

    /// Switch to the group for `size`. Returns `true` if the key changed,
    /// in which case the trace key is cleared.
    pub fn enter_group(&mut self, size: u64) -> bool {
        if self.group_key == Some(size) {
            return false;
        }
        self.group_key = Some(size);
        self.trace_key = None;
        true
    }

    /// Switch to the trace for `label`. Returns `true` if the key changed.
    pub fn enter_trace(&mut self, label: &str) -> bool {
        if self.trace_key.as_deref() == Some(label) {
            return false;
        }
        self.trace_key = Some(label.to_string());
        true
    }

    /// Rewind the row cursor for a new run.
    pub fn rewind(&mut self) {
        self.row = 0;
    }

    /// Return the current row and advance the cursor.
    pub fn advance(&mut self) -> usize {
        let row = self.row;
        self.row += 1;
        row
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_starts_awaiting_run() {
        let state = ParseState::new();
        assert!(!state.in_run());
        assert_eq!(state.row(), 0);
    }

    #[test]
    fn test_enter_group_clears_trace_key() {
        let mut state = ParseState::new();
        assert!(state.enter_group(10));
        assert!(state.enter_trace("sgd"));
        assert!(!state.enter_group(10));
        assert_eq!(state.trace_key(), Some("sgd"));
        assert!(state.enter_group(20));
        assert_eq!(state.trace_key(), None);
    }

    #[test]
    fn test_advance_and_rewind() {
        let mut state = ParseState::new();
        assert_eq!(state.advance(), 0);
        assert_eq!(state.advance(), 1);
        state.rewind();
        assert_eq!(state.advance(), 0);
    }

    #[test]
    fn test_variant_from_str() {
        assert_eq!("per-run".parse::<Variant>().unwrap(), Variant::PerRun);
        assert_eq!("aggregate".parse::<Variant>().unwrap(), Variant::Aggregate);
        assert!("histogram".parse::<Variant>().is_err());
        assert_eq!(Variant::Aggregate.to_string(), "aggregate");
    }
}
