//! Line classification
//!
//! Every log line is mapped to exactly one [`LineEvent`]. The parsers never
//! look at raw text; they only react to run starts and epoch records.
//!
//! ## Recognized shapes
//!
//! ```text
//! Starting test with speed 0.1(10.0), volume 5, Opt: Sgd      -> RunStart { size: 10, algorithm: Some("Sgd") }
//! Starting test with speed 0.1(10.0)                          -> RunStart { size: 10, algorithm: None }
//! epoch is 3 done. ... Error rate is: 5.0%. ... Test error rate is: 6.0%. (5.5%)
//!                                                             -> Epoch { train, test, averaged }
//! epoch is 3 done. ... Error rate is: 5.0%. ... Test error rate is: 6.0%
//!                                                             -> Epoch { train, test }
//! epoch is 3 ... Test error rate is: 6.0%. (5.5%)             -> Epoch { test, averaged }
//! ```
//!
//! Epoch patterns are tried in that order and the first match wins.

use regex::{Captures, Regex};

use crate::Result;

const RUN_START_LABELLED: &str =
    r"Starting test with speed.*\((\d+).0\), volume \d+, (Opt|optimizer): (\w*)";
const RUN_START_PLAIN: &str = r"Starting test with speed.*\((\d+).0\)";
const EPOCH_FULL: &str = r"epoch is (\d+) done.*Error rate is: ([\d.]+)%.*Test error rate is: ([\d.]+)%. \(([\d.]+)%\)";
const EPOCH_RATES: &str =
    r"epoch is (\d+) done.*Error rate is: ([\d.]+)%.*Test error rate is: ([\d.]+)%";
const EPOCH_AVERAGED: &str = r"epoch is (\d+).*Test error rate is: ([\d.]+)%. \(([\d.]+)%\)";

/// One epoch result extracted from a log line.
///
/// Rates are percentages as printed in the log. Which fields are present
/// depends on the line format that matched.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpochRecord {
    /// Epoch index within the current run
    pub epoch: u64,
    /// Training-set error rate
    pub train_error_rate: Option<f64>,
    /// Test-set error rate
    pub test_error_rate: Option<f64>,
    /// Bracketed test error rate (averaged over the last epochs)
    pub averaged_test_error_rate: Option<f64>,
}

/// Classification of a single log line.
#[derive(Debug, Clone, PartialEq)]
pub enum LineEvent {
    /// A new run begins.
    RunStart {
        /// Configuration magnitude printed as `(<size>.0)`
        size: u64,
        /// Optimizer/algorithm label, when the line carries one
        algorithm: Option<String>,
    },
    /// An epoch finished.
    Epoch(EpochRecord),
    /// Anything else; skipped by the parsers.
    Unrecognized,
}

/// Compiled line patterns.
#[derive(Debug, Clone)]
pub struct LineClassifier {
    run_start_labelled: Regex,
    run_start_plain: Regex,
    epoch_full: Regex,
    epoch_rates: Regex,
    epoch_averaged: Regex,
}

impl LineClassifier {
    /// Compile the line patterns.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Pattern`] if a pattern fails to compile.
    pub fn new() -> Result<Self> {
        Ok(Self {
            run_start_labelled: Regex::new(RUN_START_LABELLED)?,
            run_start_plain: Regex::new(RUN_START_PLAIN)?,
            epoch_full: Regex::new(EPOCH_FULL)?,
            epoch_rates: Regex::new(EPOCH_RATES)?,
            epoch_averaged: Regex::new(EPOCH_AVERAGED)?,
        })
    }

    /// Classify one line.
    ///
    /// Captures that fail numeric parsing (e.g. `1.2.3`) make the whole line
    /// [`LineEvent::Unrecognized`].
    #[must_use]
    pub fn classify(&self, line: &str) -> LineEvent {
        self.run_start(line)
            .or_else(|| self.epoch(line).map(LineEvent::Epoch))
            .unwrap_or(LineEvent::Unrecognized)
    }

    /// Classify every line of `text`, in order.
    pub fn events<'a>(&'a self, text: &'a str) -> impl Iterator<Item = LineEvent> + 'a {
        text.lines().map(move |line| self.classify(line))
    }

    fn run_start(&self, line: &str) -> Option<LineEvent> {
        if let Some(caps) = self.run_start_labelled.captures(line) {
            return Some(LineEvent::RunStart {
                size: int(&caps, 1)?,
                algorithm: Some(caps[3].to_string()),
            });
        }
        let caps = self.run_start_plain.captures(line)?;
        Some(LineEvent::RunStart {
            size: int(&caps, 1)?,
            algorithm: None,
        })
    }

    fn epoch(&self, line: &str) -> Option<EpochRecord> {
        if let Some(caps) = self.epoch_full.captures(line) {
            return Some(EpochRecord {
                epoch: int(&caps, 1)?,
                train_error_rate: Some(float(&caps, 2)?),
                test_error_rate: Some(float(&caps, 3)?),
                averaged_test_error_rate: Some(float(&caps, 4)?),
            });
        }
        if let Some(caps) = self.epoch_rates.captures(line) {
            return Some(EpochRecord {
                epoch: int(&caps, 1)?,
                train_error_rate: Some(float(&caps, 2)?),
                test_error_rate: Some(float(&caps, 3)?),
                averaged_test_error_rate: None,
            });
        }
        let caps = self.epoch_averaged.captures(line)?;
        Some(EpochRecord {
            epoch: int(&caps, 1)?,
            train_error_rate: None,
            test_error_rate: Some(float(&caps, 2)?),
            averaged_test_error_rate: Some(float(&caps, 3)?),
        })
    }
}

fn int(caps: &Captures<'_>, group: usize) -> Option<u64> {
    caps.get(group)?.as_str().parse().ok()
}

fn float(caps: &Captures<'_>, group: usize) -> Option<f64> {
    caps.get(group)?.as_str().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> LineClassifier {
        LineClassifier::new().unwrap()
    }

    #[test]
    fn test_run_start_with_optimizer_label() {
        let event = classifier().classify("Starting test with speed 0.05(10.0), volume 5, Opt: Adam");
        assert_eq!(
            event,
            LineEvent::RunStart {
                size: 10,
                algorithm: Some("Adam".to_string())
            }
        );
    }

    #[test]
    fn test_run_start_long_optimizer_keyword() {
        let event = classifier()
            .classify("Starting test with speed 0.05(20.0), volume 3, optimizer: Momentum");
        assert_eq!(
            event,
            LineEvent::RunStart {
                size: 20,
                algorithm: Some("Momentum".to_string())
            }
        );
    }

    #[test]
    fn test_run_start_without_label() {
        let event = classifier().classify("Starting test with speed 0.1(400.0)");
        assert_eq!(
            event,
            LineEvent::RunStart {
                size: 400,
                algorithm: None
            }
        );
    }

    #[test]
    fn test_run_start_with_dropout_suffix_has_no_label() {
        let line = "Starting test with speed 0.1(100.0, 1.0E-6), volume 4, dropout I: None, 0.2";
        // `(100.0, ...` does not close right after `.0`
        assert_eq!(classifier().classify(line), LineEvent::Unrecognized);
    }

    #[test]
    fn test_epoch_full_format() {
        let line = "epoch is 4 done. 1200 ms. Error rate is: 3.5%. speed was: 0.1. Test error rate is: 4.25%. (4.5%)";
        assert_eq!(
            classifier().classify(line),
            LineEvent::Epoch(EpochRecord {
                epoch: 4,
                train_error_rate: Some(3.5),
                test_error_rate: Some(4.25),
                averaged_test_error_rate: Some(4.5),
            })
        );
    }

    #[test]
    fn test_epoch_rates_format() {
        let line = "epoch is 0 done. Error rate is: 5.0%. Test error rate is: 6.0%";
        assert_eq!(
            classifier().classify(line),
            LineEvent::Epoch(EpochRecord {
                epoch: 0,
                train_error_rate: Some(5.0),
                test_error_rate: Some(6.0),
                averaged_test_error_rate: None,
            })
        );
    }

    #[test]
    fn test_epoch_averaged_format_without_done() {
        let line = "epoch is 7 summary. Test error rate is: 8.0%. (7.5%)";
        assert_eq!(
            classifier().classify(line),
            LineEvent::Epoch(EpochRecord {
                epoch: 7,
                train_error_rate: None,
                test_error_rate: Some(8.0),
                averaged_test_error_rate: Some(7.5),
            })
        );
    }

    #[test]
    fn test_best_result_summary_is_unrecognized() {
        let line = "Best test result epoch is 12. Test error rate is: 3.1";
        assert_eq!(classifier().classify(line), LineEvent::Unrecognized);
    }

    #[test]
    fn test_malformed_number_is_unrecognized() {
        let line = "epoch is 1 done. Error rate is: 1.2.3%. Test error rate is: 6.0%";
        assert_eq!(classifier().classify(line), LineEvent::Unrecognized);
    }

    #[test]
    fn test_events_preserve_line_order() {
        let text = "noise\nStarting test with speed 1(10.0)\nepoch is 0 done. Error rate is: 1%. Test error rate is: 2%\n";
        let c = classifier();
        let events: Vec<_> = c.events(text).collect();
        assert_eq!(events.len(), 3);
        assert_eq!(events[0], LineEvent::Unrecognized);
        assert!(matches!(events[1], LineEvent::RunStart { size: 10, .. }));
        assert!(matches!(events[2], LineEvent::Epoch(_)));
    }
}
