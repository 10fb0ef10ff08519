//! SiteView - Site Traffic Analytics API & Line Chart Dashboard
//!
//! `siteview serve` runs the metrics API, `siteview render` fetches a range
//! and writes a chart image, `siteview gui` opens the dashboard.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use eframe::egui;
use siteview::api::{self, AppState};
use siteview::charts::StaticChartRenderer;
use siteview::client::{ApiClient, DashboardController};
use siteview::config::Settings;
use siteview::data::{Metric, MetricStore, RandomStore};
use siteview::gui::SiteviewApp;
use siteview::logging;
use siteview::stats::StatsCalculator;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "siteview")]
#[command(about = "Site traffic analytics API and line chart dashboard")]
struct Args {
    /// Path to a TOML config file (defaults to ./siteview.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the metrics API
    Serve {
        /// Address to bind, e.g. 127.0.0.1:5000
        #[arg(long)]
        bind: Option<String>,

        /// Seed for repeatable random data
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Fetch a date range from the API and write a chart image
    Render {
        /// Output file (.png or .svg)
        #[arg(short, long)]
        out: PathBuf,

        /// First day (YYYY-mm-dd)
        #[arg(long)]
        start: Option<NaiveDate>,

        /// Last day, inclusive (YYYY-mm-dd)
        #[arg(long)]
        end: Option<NaiveDate>,

        /// Metric to include; repeat for several (default: all)
        #[arg(long = "metric")]
        metrics: Vec<Metric>,

        /// API endpoint, e.g. http://127.0.0.1:5000/api
        #[arg(long)]
        api_url: Option<String>,

        #[arg(long)]
        width: Option<u32>,

        #[arg(long)]
        height: Option<u32>,

        /// Open the image with the system viewer afterwards
        #[arg(long)]
        open: bool,
    },

    /// Open the desktop dashboard
    Gui,
}

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init_tracing("info");

    let settings = Settings::load(args.config.as_deref()).context("loading settings")?;

    match args.command.unwrap_or(Command::Gui) {
        Command::Serve { bind, seed } => run_server(settings, bind, seed),
        Command::Render {
            out,
            start,
            end,
            metrics,
            api_url,
            width,
            height,
            open,
        } => {
            let mut settings = settings;
            if let Some(url) = api_url {
                settings.client.api_url = url;
            }
            if let Some(width) = width {
                settings.chart.width = width;
            }
            if let Some(height) = height {
                settings.chart.height = height;
            }
            run_render(&settings, out, start, end, &metrics, open)
        }
        Command::Gui => run_gui(settings),
    }
}

fn run_server(mut settings: Settings, bind: Option<String>, seed: Option<u64>) -> Result<()> {
    if let Some(bind) = bind {
        settings.server.bind = bind;
    }
    if seed.is_some() {
        settings.server.seed = seed;
    }

    let store: Arc<dyn MetricStore> = match settings.server.seed {
        Some(seed) => {
            info!(seed, "using seeded random store");
            Arc::new(RandomStore::with_seed(seed))
        }
        None => Arc::new(RandomStore::new()),
    };
    let state = AppState::from_settings(store, &settings);

    let runtime = tokio::runtime::Runtime::new().context("starting tokio runtime")?;
    runtime.block_on(api::start_server(&settings.server.bind, state))?;
    Ok(())
}

fn run_render(
    settings: &Settings,
    out: PathBuf,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    metrics: &[Metric],
    open: bool,
) -> Result<()> {
    let mut controller = DashboardController::new(&settings.defaults);
    if let Some(start) = start {
        controller.start_date = start;
    }
    if let Some(end) = end {
        controller.end_date = end;
    }
    if !metrics.is_empty() {
        for metric in Metric::ALL {
            controller.set_metric(metric, metrics.contains(&metric));
        }
    }

    let client = ApiClient::new(&settings.client.api_url)?;
    controller
        .update_data(&client)
        .with_context(|| format!("fetching from {}", client.base_url()))?;

    let Some(chart) = &controller.chart_data else {
        warn!("no series data for the selected range; nothing rendered");
        return Ok(());
    };

    for s in StatsCalculator::summarize_chart(chart) {
        println!(
            "{:<16} days={:<4} total={:<6.0} mean={:<8.2} median={:<8.2} max={:.0}",
            s.name, s.count, s.total, s.mean, s.median, s.max
        );
    }

    StaticChartRenderer::render_to_file(
        chart,
        &out,
        "Site Traffic",
        settings.chart.width,
        settings.chart.height,
    )?;
    println!("Chart written to {}", out.display());

    if open {
        open::that(&out).with_context(|| format!("opening {}", out.display()))?;
    }
    Ok(())
}

fn run_gui(settings: Settings) -> Result<()> {
    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 760.0])
            .with_min_inner_size([960.0, 600.0])
            .with_title("SiteView"),
        ..Default::default()
    };

    eframe::run_native(
        "SiteView",
        options,
        Box::new(move |cc| Ok(Box::new(SiteviewApp::new(cc, settings)))),
    )
    .map_err(|e| anyhow::anyhow!("GUI error: {e}"))
}
