//! SVG files via `plotters`
//!
//! A logarithmic value axis is drawn by plotting `log10(y)` on a linear axis
//! and labelling ticks with `10^v`; non-positive values have no logarithm
//! and are left out of such charts.

use std::ops::Range;
use std::path::{Path, PathBuf};

use plotters::prelude::*;
use tracing::debug;

use super::{LayoutConfig, Renderer};
use crate::series::Trace;
use crate::{Error, Result};

type Points = Vec<(f64, f64)>;

/// Writes `<dir>/<div_id>.svg` for every chart.
#[derive(Debug, Clone)]
pub struct SvgRenderer {
    dir: PathBuf,
    size: (u32, u32),
    written: Vec<PathBuf>,
}

impl SvgRenderer {
    /// Write charts into `dir`, which must exist.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            size: (800, 480),
            written: Vec::new(),
        }
    }

    /// Set the image size in pixels.
    #[must_use]
    pub const fn with_size(mut self, width: u32, height: u32) -> Self {
        self.size = (width, height);
        self
    }

    /// Files written so far.
    #[must_use]
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    fn draw(
        &self,
        path: &Path,
        div_id: &str,
        traces: &[Trace],
        log_y: bool,
    ) -> std::result::Result<(), Box<dyn std::error::Error>> {
        let series: Vec<(&str, Points)> = traces
            .iter()
            .map(|t| (t.name(), points(t, log_y)))
            .collect();
        let (x_range, y_range) = bounds(&series);

        let root = SVGBackend::new(path, self.size).into_drawing_area();
        root.fill(&WHITE)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(div_id, ("sans-serif", 24))
            .margin(10)
            .x_label_area_size(40)
            .y_label_area_size(60)
            .build_cartesian_2d(x_range, y_range)?;

        let y_label = |v: &f64| {
            if log_y {
                format!("{:.3}", 10f64.powf(*v))
            } else {
                format!("{v:.3}")
            }
        };
        chart
            .configure_mesh()
            .x_desc("epoch")
            .y_desc("error rate (%)")
            .y_label_formatter(&y_label)
            .draw()?;

        for (i, (name, pts)) in series.iter().enumerate() {
            let style = Palette99::pick(i).stroke_width(2);
            chart
                .draw_series(LineSeries::new(pts.iter().copied(), style))?
                .label(*name)
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], style));
        }

        chart
            .configure_series_labels()
            .border_style(&BLACK)
            .background_style(&WHITE.mix(0.8))
            .draw()?;

        root.present()?;
        Ok(())
    }
}

impl Renderer for SvgRenderer {
    fn render(&mut self, div_id: &str, traces: &[Trace], layout: &LayoutConfig) -> Result<()> {
        let path = self.dir.join(format!("{div_id}.svg"));
        self.draw(&path, div_id, traces, layout.yaxis.is_log())
            .map_err(|e| Error::Render {
                div_id: div_id.to_string(),
                reason: e.to_string(),
            })?;
        debug!(path = %path.display(), "chart written");
        self.written.push(path);
        Ok(())
    }
}

#[allow(clippy::cast_precision_loss)]
fn points(trace: &Trace, log_y: bool) -> Points {
    trace
        .x()
        .iter()
        .zip(trace.y())
        .filter(|&(_, &y)| !log_y || y > 0.0)
        .map(|(&x, &y)| (x as f64, if log_y { y.log10() } else { y }))
        .collect()
}

fn bounds(series: &[(&str, Points)]) -> (Range<f64>, Range<f64>) {
    let all = series.iter().flat_map(|(_, pts)| pts.iter());
    let (mut x_lo, mut x_hi, mut y_lo, mut y_hi) = (f64::MAX, f64::MIN, f64::MAX, f64::MIN);
    for &(x, y) in all {
        x_lo = x_lo.min(x);
        x_hi = x_hi.max(x);
        y_lo = y_lo.min(y);
        y_hi = y_hi.max(y);
    }
    (widen(x_lo, x_hi), widen(y_lo, y_hi))
}

fn widen(lo: f64, hi: f64) -> Range<f64> {
    if lo > hi {
        return 0.0..1.0;
    }
    let pad = if (hi - lo).abs() < f64::EPSILON {
        0.5
    } else {
        (hi - lo) * 0.05
    };
    (lo - pad)..(hi + pad)
}
