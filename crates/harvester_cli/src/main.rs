//! Command-line entry point: fetch the vendor product pages and download every
//! linked PDF that is not already in the output directory.
mod logging;
mod seeds;
mod settings;

use std::path::PathBuf;

use anyhow::{bail, Context};
use engine_logging::{engine_info, engine_warn};
use harvester_engine::{HarvestReport, Harvester};

use crate::logging::LogDestination;
use crate::settings::{Settings, DEFAULT_SETTINGS_FILE};

fn main() -> anyhow::Result<()> {
    let explicit_path = std::env::args_os().nth(1).map(PathBuf::from);
    let settings_path = explicit_path
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SETTINGS_FILE));
    let settings = match Settings::load(&settings_path)? {
        Some(settings) => settings,
        None if explicit_path.is_some() => {
            bail!("settings file {} not found", settings_path.display())
        }
        None => Settings::default(),
    };

    let level = settings.log_level();
    match settings.log_file() {
        Some(path) => logging::initialize(LogDestination::Both(&path), level),
        None => logging::initialize(LogDestination::Terminal, level),
    }

    let config = settings.into_config();
    engine_info!(
        "Harvesting {} seed pages into {}",
        config.seeds.len(),
        config.output_dir.display()
    );
    let harvester = Harvester::new(config)?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;
    let report = runtime.block_on(harvester.run());

    log_summary(&report);
    Ok(())
}

fn log_summary(report: &HarvestReport) {
    engine_info!(
        "Pages: {} fetched, {} failed. Links: {} found, {} dropped.",
        report.pages_fetched,
        report.page_failures.len(),
        report.links_found,
        report.dropped_links.len()
    );
    engine_info!(
        "Documents: {} downloaded, {} already present, {} failed.",
        report.downloaded_count(),
        report.already_present_count(),
        report.failed_count()
    );
    if let Some(err) = &report.output_dir_error {
        engine_warn!("Output directory problem during this run: {}", err);
    }
}
