//! runplot CLI - chart the error rates of a training log
//!
//! Usage:
//!   runplot [LOG] [--variant per-run|aggregate] [--html <FILE>] [--svg-dir <DIR>]
//!
//! Example:
//!   runplot ../log/test3.log --html charts.html
//!   runplot test5.log --variant aggregate --svg-dir charts/
//!   runplot log/test3.log --base-url http://localhost:8000 -v

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use runplot::fetch::FileSource;
#[cfg(feature = "http")]
use runplot::fetch::HttpSource;
use runplot::render::PlotlyHtmlRenderer;
#[cfg(feature = "svg")]
use runplot::render::SvgRenderer;
use runplot::{LayoutConfig, Pipeline, Variant};
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG: &str = "../log/test3.log";

#[derive(Parser, Debug)]
#[command(name = "runplot")]
#[command(version)]
#[command(about = "Chart epoch error rates scraped from training logs")]
struct Args {
    /// Log to chart, relative to the working directory or --base-url
    #[arg(value_name = "LOG", default_value = DEFAULT_LOG)]
    log: String,

    /// Grouping: one chart per size (per-run) or mean/min/max per algorithm (aggregate)
    #[arg(long, default_value_t = Variant::PerRun)]
    variant: Variant,

    /// Fetch the log over HTTP from this base URL
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,

    /// Write a Plotly HTML page
    #[arg(long, value_name = "FILE")]
    html: Option<PathBuf>,

    /// Write one SVG per chart into this directory
    #[arg(long, value_name = "DIR")]
    svg_dir: Option<PathBuf>,

    /// Layout override (Plotly layout JSON)
    #[arg(long, value_name = "FILE")]
    layout: Option<PathBuf>,

    /// Verbose logging (overridden by RUST_LOG)
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let layout = match &args.layout {
        Some(path) => LayoutConfig::from_json_file(path)
            .with_context(|| format!("Failed to load layout {}", path.display()))?,
        None => LayoutConfig::default(),
    };
    let pipeline = Pipeline::builder()
        .variant(args.variant)
        .layout(layout)
        .build()
        .context("Failed to build pipeline")?;

    let Some(text) = fetch(&args).await? else {
        // Already reported by the fetcher; nothing to chart.
        return Ok(());
    };
    let groups = pipeline.parse(&text);
    info!(log = %args.log, groups = groups.len(), "log parsed");

    let html_path = match (&args.html, &args.svg_dir) {
        (None, None) => Some(PathBuf::from("runplot.html")),
        (html, _) => html.clone(),
    };

    if let Some(path) = html_path {
        let mut renderer = PlotlyHtmlRenderer::new(&args.log);
        let summary = pipeline.render(&groups, &mut renderer);
        std::fs::write(&path, renderer.into_html())
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!(path = %path.display(), charts = summary.rendered, "HTML written");
    }

    if let Some(dir) = &args.svg_dir {
        render_svg(&pipeline, &groups, dir)?;
    }

    Ok(())
}

/// Fetch the log; `None` when it cannot be retrieved.
async fn fetch(args: &Args) -> Result<Option<String>> {
    let text = match &args.base_url {
        #[cfg(feature = "http")]
        Some(url) => runplot::fetch::load(&HttpSource::new(url.as_str()), &args.log, |t| t).await,
        #[cfg(not(feature = "http"))]
        Some(_) => anyhow::bail!("--base-url requires the 'http' feature"),
        None => runplot::fetch::load(&FileSource::current_dir(), &args.log, |t| t).await,
    };
    Ok(text)
}

#[cfg(feature = "svg")]
fn render_svg(pipeline: &Pipeline, groups: &[runplot::series::PlotGroup], dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))?;
    let mut renderer = SvgRenderer::new(dir);
    let summary = pipeline.render(groups, &mut renderer);
    info!(dir = %dir.display(), charts = summary.rendered, failed = summary.failed, "SVG written");
    Ok(())
}

#[cfg(not(feature = "svg"))]
fn render_svg(_: &Pipeline, _: &[runplot::series::PlotGroup], _: &Path) -> Result<()> {
    anyhow::bail!("--svg-dir requires the 'svg' feature")
}
