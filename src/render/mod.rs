//! Chart rendering
//!
//! A [`Renderer`] draws one chart per [`crate::series::PlotGroup`] once the
//! whole log has been parsed. Renderers only read the traces.
//!
//! - [`PlotlyHtmlRenderer`]: standalone HTML page with one `Plotly.newPlot`
//!   call per chart.
//! - [`SvgRenderer`] (feature `svg`): one SVG file per chart.

mod plotly;
#[cfg(feature = "svg")]
mod svg;

pub use plotly::PlotlyHtmlRenderer;
#[cfg(feature = "svg")]
pub use svg::SvgRenderer;

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::series::Trace;
use crate::Result;

/// Draws a chart.
pub trait Renderer {
    /// Draw `traces` into the chart identified by `div_id`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Render`] (or the underlying IO/JSON error) if
    /// the backend fails.
    fn render(&mut self, div_id: &str, traces: &[Trace], layout: &LayoutConfig) -> Result<()>;
}

/// Axis scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisScale {
    /// Linear axis
    Linear,
    /// Base-10 logarithmic axis
    Log,
}

/// One axis of a [`LayoutConfig`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisConfig {
    /// Scale; backend default (linear) when unset
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<AxisScale>,
    /// Fit the range to the data
    #[serde(default = "autorange_default")]
    pub autorange: bool,
}

const fn autorange_default() -> bool {
    true
}

impl AxisConfig {
    /// Auto-ranged axis with the given scale.
    #[must_use]
    pub const fn auto(scale: Option<AxisScale>) -> Self {
        Self {
            scale,
            autorange: true,
        }
    }

    /// `true` if the axis is logarithmic.
    #[must_use]
    pub fn is_log(&self) -> bool {
        self.scale == Some(AxisScale::Log)
    }
}

/// Static chart layout, serialized in Plotly's layout shape.
///
/// The default auto-ranges both axes and plots error rates on a log scale:
///
/// ```json
/// { "xaxis": { "autorange": true }, "yaxis": { "type": "log", "autorange": true } }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Epoch axis
    pub xaxis: AxisConfig,
    /// Value axis
    pub yaxis: AxisConfig,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            xaxis: AxisConfig::auto(None),
            yaxis: AxisConfig::auto(Some(AxisScale::Log)),
        }
    }
}

impl LayoutConfig {
    /// Load a layout from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid layout.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout_json() {
        let json = serde_json::to_value(LayoutConfig::default()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "xaxis": { "autorange": true },
                "yaxis": { "type": "log", "autorange": true }
            })
        );
    }

    #[test]
    fn test_layout_from_partial_json() {
        let layout: LayoutConfig =
            serde_json::from_str(r#"{ "xaxis": {}, "yaxis": { "type": "linear" } }"#).unwrap();
        assert!(layout.xaxis.autorange);
        assert!(!layout.yaxis.is_log());
        assert_eq!(layout.yaxis.scale, Some(AxisScale::Linear));
    }

    #[test]
    fn test_layout_from_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("layout.json");
        std::fs::write(&path, r#"{ "xaxis": { "autorange": false }, "yaxis": { "type": "log" } }"#)
            .unwrap();
        let layout = LayoutConfig::from_json_file(&path).unwrap();
        assert!(!layout.xaxis.autorange);
        assert!(layout.yaxis.is_log());
    }
}
