//! Mean/min/max charts per size, one trace per algorithm
//!
//! Repeated runs of the same algorithm are merged online: every epoch value
//! is folded into the running statistic at its row, so any number of runs
//! can be combined without keeping raw samples.

use tracing::{debug, trace};

use super::{LogParser, ParseState};
use crate::classify::{EpochRecord, LineEvent};
use crate::series::{PlotGroup, Trace};

/// Statistic charted by one group of a triplet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stat {
    /// Running arithmetic mean (`chart-<size>-0`)
    Mean,
    /// Running minimum (`chart-<size>-1`)
    Min,
    /// Running maximum (`chart-<size>-2`)
    Max,
}

impl Stat {
    /// Triplet order.
    pub const ALL: [Self; 3] = [Self::Mean, Self::Min, Self::Max];

    /// Suffix of the group's div id.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Mean => 0,
            Self::Min => 1,
            Self::Max => 2,
        }
    }

    /// Fold `value` into the statistic.
    ///
    /// `prior` is `None` when the row has no observation yet; `samples` is
    /// the number of observations behind `prior` and only matters for the
    /// mean.
    #[must_use]
    pub fn fold(self, prior: Option<f64>, samples: u32, value: f64) -> f64 {
        let Some(prior) = prior else {
            return value;
        };
        match self {
            Self::Mean => {
                let n = f64::from(samples);
                prior.mul_add(n, value) / (n + 1.0)
            }
            Self::Min => prior.min(value),
            Self::Max => prior.max(value),
        }
    }
}

/// Builds `chart-<size>-{0,1,2}` triplets, one trace per algorithm label.
///
/// Trace `i` of each group in a triplet always belongs to the same
/// algorithm. Run starts without an algorithm label and epoch lines without
/// a bracketed averaged rate are skipped.
#[derive(Debug, Default)]
pub struct AggregateParser {
    state: ParseState,
    groups: Vec<PlotGroup>,
    trace: Option<usize>,
}

impl AggregateParser {
    /// Create a parser awaiting its first run start.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn triplet(&mut self) -> &mut [PlotGroup] {
        let start = self.groups.len().saturating_sub(Stat::ALL.len());
        &mut self.groups[start..]
    }

    fn run_start(&mut self, size: u64, algorithm: &str) {
        if self.state.enter_group(size) {
            debug!(size, "new plot group triplet");
            self.groups.extend(
                Stat::ALL
                    .iter()
                    .map(|stat| PlotGroup::new(format!("chart-{size}-{}", stat.index()))),
            );
            self.trace = None;
        }
        if self.state.enter_trace(algorithm) {
            debug!(size, algorithm, "new trace");
            let mut index = 0;
            for group in self.triplet() {
                index = group.push_trace(Trace::new(algorithm));
            }
            self.trace = Some(index);
        }
        self.state.rewind();
    }

    fn epoch(&mut self, record: &EpochRecord) {
        let Some(value) = record.averaged_test_error_rate else {
            trace!(epoch = record.epoch, "epoch line without averaged rate");
            return;
        };
        let Some(index) = self.trace else {
            trace!(epoch = record.epoch, "epoch line before any run start");
            return;
        };
        let row = self.state.advance();
        let triplet = self.triplet();
        let samples = triplet[Stat::Mean.index()].traces()[index].samples_at(row);
        for stat in Stat::ALL {
            let trace = triplet[stat.index()].trace_mut(index);
            let folded = stat.fold(trace.value_at(row), samples, value);
            trace.set(row, record.epoch, folded);
            if stat == Stat::Mean {
                trace.set_samples(row, samples + 1);
            }
        }
    }
}

impl LogParser for AggregateParser {
    fn observe(&mut self, event: &LineEvent) {
        match event {
            LineEvent::RunStart {
                size,
                algorithm: Some(algorithm),
            } => self.run_start(*size, algorithm),
            LineEvent::RunStart { algorithm: None, .. } => {
                trace!("run start without algorithm label");
            }
            LineEvent::Epoch(record) => self.epoch(record),
            LineEvent::Unrecognized => {}
        }
    }

    fn finish(self) -> Vec<PlotGroup> {
        self.groups
    }
}
