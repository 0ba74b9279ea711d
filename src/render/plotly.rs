//! Plotly HTML page

use std::fmt::Write as _;

use super::{LayoutConfig, Renderer};
use crate::series::Trace;
use crate::Result;

/// Plotly bundle loaded by generated pages.
pub const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

#[derive(Debug, Clone)]
struct Chart {
    div_id: String,
    traces: String,
    layout: String,
}

/// Collects charts into a single HTML page.
#[derive(Debug, Clone)]
pub struct PlotlyHtmlRenderer {
    title: String,
    script_src: String,
    charts: Vec<Chart>,
}

impl Default for PlotlyHtmlRenderer {
    fn default() -> Self {
        Self::new("runplot")
    }
}

impl PlotlyHtmlRenderer {
    /// Create a renderer for a page titled `title`.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            script_src: PLOTLY_CDN.to_string(),
            charts: Vec::new(),
        }
    }

    /// Load Plotly from `src` instead of the CDN.
    #[must_use]
    pub fn with_script_src(mut self, src: impl Into<String>) -> Self {
        self.script_src = src.into();
        self
    }

    /// Number of charts rendered so far.
    #[must_use]
    pub fn chart_count(&self) -> usize {
        self.charts.len()
    }

    /// Build the page.
    #[must_use]
    pub fn into_html(self) -> String {
        let mut html = String::new();
        let _ = writeln!(html, "<!DOCTYPE html>");
        let _ = writeln!(html, "<html>\n<head>\n<meta charset=\"utf-8\">");
        let _ = writeln!(html, "<title>{}</title>", escape_html(&self.title));
        let _ = writeln!(html, "<script src=\"{}\"></script>", escape_html(&self.script_src));
        let _ = writeln!(html, "</head>\n<body>");
        for chart in &self.charts {
            let _ = writeln!(html, "<div id=\"{}\"></div>", escape_html(&chart.div_id));
        }
        let _ = writeln!(html, "<script>");
        for chart in &self.charts {
            let _ = writeln!(
                html,
                "Plotly.newPlot({}, {}, {});",
                script_json(&chart.div_id),
                chart.traces,
                chart.layout
            );
        }
        let _ = writeln!(html, "</script>\n</body>\n</html>");
        html
    }
}

impl Renderer for PlotlyHtmlRenderer {
    fn render(&mut self, div_id: &str, traces: &[Trace], layout: &LayoutConfig) -> Result<()> {
        self.charts.push(Chart {
            div_id: div_id.to_string(),
            traces: serde_json::to_string(traces)?.replace("</", "<\\/"),
            layout: serde_json::to_string(layout)?,
        });
        Ok(())
    }
}

fn script_json(value: &str) -> String {
    // A JSON string literal is a valid JS string literal.
    serde_json::Value::from(value).to_string().replace("</", "<\\/")
}

fn escape_html(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
