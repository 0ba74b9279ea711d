//! One train/test chart per size

use tracing::{debug, trace};

use super::{LogParser, ParseState};
use crate::classify::{EpochRecord, LineEvent};
use crate::series::PlotGroup;

const TRAIN: usize = 0;
const TEST: usize = 1;

/// Builds a `chart-<size>` group holding a "train" and a "test" trace for
/// every change of size.
///
/// The algorithm label of a run start is ignored, as is the bracketed
/// averaged rate of an epoch line.
#[derive(Debug, Default)]
pub struct RunSeriesParser {
    state: ParseState,
    groups: Vec<PlotGroup>,
}

impl RunSeriesParser {
    /// Create a parser awaiting its first run start.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn run_start(&mut self, size: u64) {
        if self.state.enter_group(size) {
            let div_id = format!("chart-{size}");
            debug!(%div_id, "new plot group");
            self.groups
                .push(PlotGroup::with_traces(div_id, &["train", "test"]));
        }
        self.state.rewind();
    }

    fn epoch(&mut self, record: &EpochRecord) {
        let (Some(train), Some(test)) = (record.train_error_rate, record.test_error_rate) else {
            trace!(epoch = record.epoch, "epoch line without train/test rates");
            return;
        };
        let Some(group) = self.groups.last_mut() else {
            trace!(epoch = record.epoch, "epoch line before any run start");
            return;
        };
        let row = self.state.advance();
        group.trace_mut(TRAIN).set(row, record.epoch, train);
        group.trace_mut(TEST).set(row, record.epoch, test);
    }
}

impl LogParser for RunSeriesParser {
    fn observe(&mut self, event: &LineEvent) {
        match event {
            LineEvent::RunStart { size, .. } => self.run_start(*size),
            LineEvent::Epoch(record) => self.epoch(record),
            LineEvent::Unrecognized => {}
        }
    }

    fn finish(self) -> Vec<PlotGroup> {
        self.groups
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::LineClassifier;
    use crate::parse::parse_with;

    fn parse(text: &str) -> Vec<PlotGroup> {
        parse_with(&LineClassifier::new().unwrap(), text, RunSeriesParser::new())
    }

    #[test]
    fn test_single_run() {
        let groups = parse(
            "Starting test with speed X (10.0), volume 5, Opt: sgd\n\
             epoch is 0 done. Error rate is: 5.0%. Test error rate is: 6.0%\n\
             epoch is 1 done. Error rate is: 4.0%. Test error rate is: 5.0%\n",
        );
        assert_eq!(groups.len(), 1);
        let group = &groups[0];
        assert_eq!(group.div_id(), "chart-10");
        let train = group.trace("train").unwrap();
        let test = group.trace("test").unwrap();
        assert_eq!(train.x(), &[0, 1]);
        assert_eq!(train.y(), &[5.0, 4.0]);
        assert_eq!(test.x(), &[0, 1]);
        assert_eq!(test.y(), &[6.0, 5.0]);
    }

    #[test]
    fn test_no_run_start_no_groups() {
        let groups = parse("epoch is 0 done. Error rate is: 5.0%. Test error rate is: 6.0%\nnoise\n");
        assert!(groups.is_empty());
    }

    #[test]
    fn test_same_size_overwrites_rows() {
        let groups = parse(
            "Starting test with speed 1(10.0)\n\
             epoch is 0 done. Error rate is: 5.0%. Test error rate is: 6.0%\n\
             epoch is 1 done. Error rate is: 4.0%. Test error rate is: 5.0%\n\
             Starting test with speed 2(10.0)\n\
             epoch is 0 done. Error rate is: 3.0%. Test error rate is: 3.5%\n",
        );
        assert_eq!(groups.len(), 1);
        let train = groups[0].trace("train").unwrap();
        assert_eq!(train.y(), &[3.0, 4.0]);
        assert_eq!(groups[0].trace("test").unwrap().y(), &[3.5, 5.0]);
    }

    #[test]
    fn test_size_change_starts_new_group() {
        let groups = parse(
            "Starting test with speed 1(10.0)\n\
             epoch is 0 done. Error rate is: 5.0%. Test error rate is: 6.0%\n\
             Starting test with speed 1(20.0)\n\
             epoch is 0 done. Error rate is: 2.0%. Test error rate is: 2.5%\n\
             Starting test with speed 1(10.0)\n",
        );
        let ids: Vec<_> = groups.iter().map(PlotGroup::div_id).collect();
        assert_eq!(ids, ["chart-10", "chart-20", "chart-10"]);
        assert_eq!(groups[1].trace("train").unwrap().y(), &[2.0]);
        assert!(groups[2].trace("train").unwrap().is_empty());
    }

    #[test]
    fn test_bracketed_value_is_ignored() {
        let groups = parse(
            "Starting test with speed 1(10.0)\n\
             epoch is 0 done. 10 ms. Error rate is: 5.0%. speed was: 1. Test error rate is: 6.0%. (5.5%)\n",
        );
        assert_eq!(groups[0].trace("test").unwrap().y(), &[6.0]);
    }
}
