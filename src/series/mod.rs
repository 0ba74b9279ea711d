//! Chart data model
//!
//! ```text
//! PlotGroup (1) ──< Trace (N)
//!                      ├── x: epoch per row
//!                      ├── y: value per row
//!                      └── n: samples per row (running mean only)
//! ```
//!
//! Rows are written through [`Trace::set`], which overwrites an existing row
//! or appends the next one. Parsers only ever advance the row cursor by one,
//! so the parallel vectors never have gaps.

use serde::Serialize;

/// Plotly trace type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TraceKind {
    /// Line/marker series
    #[default]
    Scatter,
}

/// A named (x, y) series within a [`PlotGroup`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trace {
    x: Vec<u64>,
    y: Vec<f64>,
    #[serde(skip)]
    n: Vec<u32>,
    #[serde(rename = "type")]
    kind: TraceKind,
    name: String,
}

impl Trace {
    /// Create an empty trace.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            x: Vec::new(),
            y: Vec::new(),
            n: Vec::new(),
            kind: TraceKind::Scatter,
            name: name.into(),
        }
    }

    /// Trace name shown in the chart legend.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Epoch indices, one per row.
    #[must_use]
    pub fn x(&self) -> &[u64] {
        &self.x
    }

    /// Values, one per row.
    #[must_use]
    pub fn y(&self) -> &[f64] {
        &self.y
    }

    /// Sample counts backing a running mean, one per row.
    ///
    /// Empty for traces that are not running means.
    #[must_use]
    pub fn samples(&self) -> &[u32] {
        &self.n
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// Check if the trace has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Value at `row`, or `None` if nothing was observed there yet.
    #[must_use]
    pub fn value_at(&self, row: usize) -> Option<f64> {
        self.y.get(row).copied()
    }

    /// Sample count at `row`; zero when unset.
    #[must_use]
    pub fn samples_at(&self, row: usize) -> u32 {
        self.n.get(row).copied().unwrap_or(0)
    }

    /// Write `(epoch, value)` at `row`.
    ///
    /// # Panics
    ///
    /// Panics if `row` skips past the next free row.
    pub fn set(&mut self, row: usize, epoch: u64, value: f64) {
        put(&mut self.x, row, epoch);
        put(&mut self.y, row, value);
    }

    /// Write the sample count at `row`.
    ///
    /// # Panics
    ///
    /// Panics if `row` skips past the next free row.
    pub fn set_samples(&mut self, row: usize, count: u32) {
        put(&mut self.n, row, count);
    }
}

fn put<T>(values: &mut Vec<T>, row: usize, value: T) {
    assert!(row <= values.len(), "row {row} skips past {}", values.len());
    if row == values.len() {
        values.push(value);
    } else {
        values[row] = value;
    }
}

/// One chart: every trace that shares a `div` identifier.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlotGroup {
    div_id: String,
    traces: Vec<Trace>,
}

impl PlotGroup {
    /// Create a group with no traces.
    #[must_use]
    pub fn new(div_id: impl Into<String>) -> Self {
        Self {
            div_id: div_id.into(),
            traces: Vec::new(),
        }
    }

    /// Create a group with one empty trace per name.
    #[must_use]
    pub fn with_traces(div_id: impl Into<String>, names: &[&str]) -> Self {
        Self {
            div_id: div_id.into(),
            traces: names.iter().map(|name| Trace::new(*name)).collect(),
        }
    }

    /// Chart identifier (`chart-<size>` or `chart-<size>-<stat>`).
    #[must_use]
    pub fn div_id(&self) -> &str {
        &self.div_id
    }

    /// Traces in insertion order.
    #[must_use]
    pub fn traces(&self) -> &[Trace] {
        &self.traces
    }

    /// Find a trace by name.
    #[must_use]
    pub fn trace(&self, name: &str) -> Option<&Trace> {
        self.traces.iter().find(|t| t.name() == name)
    }

    /// Append a trace and return its index.
    pub fn push_trace(&mut self, trace: Trace) -> usize {
        self.traces.push(trace);
        self.traces.len() - 1
    }

    pub(crate) fn trace_mut(&mut self, index: usize) -> &mut Trace {
        &mut self.traces[index]
    }
}
