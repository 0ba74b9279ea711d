//! # runplot: charts from training logs
//!
//! runplot scrapes the plain-text output of training runs (`Starting test
//! with speed ...` / `epoch is N done ... Error rate is: ...`) and turns the
//! epoch error rates into charts.
//!
//! ## Pipeline
//!
//! ```text
//! LogSource::fetch ──> LineClassifier ──> LogParser ──> Renderer
//!   (file / HTTP)       (LineEvent)      (PlotGroup)   (Plotly / SVG)
//! ```
//!
//! - [`Variant::PerRun`]: one `chart-<size>` with "train" and "test" traces.
//! - [`Variant::Aggregate`]: `chart-<size>-0/1/2` holding the running
//!   mean/min/max of the averaged test error rate, one trace per algorithm.
//!
//! ## Example
//!
//! ```rust
//! use runplot::Pipeline;
//!
//! let log = "Starting test with speed X (10.0), volume 5, Opt: sgd\n\
//!            epoch is 0 done. Error rate is: 5.0%. Test error rate is: 6.0%\n\
//!            epoch is 1 done. Error rate is: 4.0%. Test error rate is: 5.0%\n";
//!
//! let pipeline = Pipeline::builder().build()?;
//! let groups = pipeline.parse(log);
//! assert_eq!(groups[0].div_id(), "chart-10");
//! assert_eq!(groups[0].trace("train").unwrap().y(), &[5.0, 4.0]);
//! # Ok::<(), runplot::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

pub mod classify;
pub mod error;
pub mod fetch;
pub mod parse;
pub mod render;
pub mod series;

pub use error::{Error, Result};
pub use parse::Variant;
pub use render::LayoutConfig;

use tracing::{info, warn};

use crate::classify::LineClassifier;
use crate::fetch::{load, LogSource};
use crate::render::Renderer;
use crate::series::PlotGroup;

/// Outcome of [`Pipeline::run`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Plot groups produced by the parser
    pub groups: usize,
    /// Groups the renderer accepted
    pub rendered: usize,
    /// Groups the renderer failed on
    pub failed: usize,
}

/// Fetch → parse → render.
#[derive(Debug, Clone)]
pub struct Pipeline {
    classifier: LineClassifier,
    variant: Variant,
    layout: LayoutConfig,
}

impl Pipeline {
    /// Create a new pipeline builder
    #[must_use]
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::default()
    }

    /// Grouping applied by [`Pipeline::parse`].
    #[must_use]
    pub const fn variant(&self) -> Variant {
        self.variant
    }

    /// Layout handed to the renderer.
    #[must_use]
    pub const fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Parse log text into plot groups.
    #[must_use]
    pub fn parse(&self, text: &str) -> Vec<PlotGroup> {
        self.variant.parse(&self.classifier, text)
    }

    /// Draw every group, in order. A failing group is logged and skipped.
    pub fn render<R: Renderer + ?Sized>(&self, groups: &[PlotGroup], renderer: &mut R) -> RunSummary {
        let mut summary = RunSummary {
            groups: groups.len(),
            ..RunSummary::default()
        };
        for group in groups {
            match renderer.render(group.div_id(), group.traces(), &self.layout) {
                Ok(()) => summary.rendered += 1,
                Err(err) => {
                    warn!(div_id = group.div_id(), error = %err, "render failed");
                    summary.failed += 1;
                }
            }
        }
        summary
    }

    /// Fetch `path` from `source`, parse it and render the result.
    ///
    /// Returns `None` when the fetch fails: nothing is parsed or rendered.
    pub async fn run<S, R>(&self, source: &S, path: &str, renderer: &mut R) -> Option<RunSummary>
    where
        S: LogSource,
        R: Renderer + ?Sized,
    {
        let summary = load(source, path, |text| {
            let groups = self.parse(&text);
            self.render(&groups, renderer)
        })
        .await?;
        info!(
            path,
            variant = %self.variant,
            groups = summary.groups,
            rendered = summary.rendered,
            failed = summary.failed,
            "log charted"
        );
        Some(summary)
    }
}

/// Pipeline builder
#[derive(Debug, Clone, Default)]
pub struct PipelineBuilder {
    variant: Variant,
    layout: LayoutConfig,
}

impl PipelineBuilder {
    /// Set the grouping variant
    #[must_use]
    pub const fn variant(mut self, variant: Variant) -> Self {
        self.variant = variant;
        self
    }

    /// Set the chart layout
    #[must_use]
    pub fn layout(mut self, layout: LayoutConfig) -> Self {
        self.layout = layout;
        self
    }

    /// Build the pipeline
    ///
    /// # Errors
    ///
    /// Returns error if the line patterns fail to compile
    pub fn build(self) -> Result<Pipeline> {
        Ok(Pipeline {
            classifier: LineClassifier::new()?,
            variant: self.variant,
            layout: self.layout,
        })
    }
}
