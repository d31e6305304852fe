use std::path::PathBuf;
use std::sync::mpsc::Sender;

use super::channel_mapper::ChannelMapper;
use super::config::Config;
use super::converter::Converter;
use super::error::PipelineError;
use super::layout::Layout;
use super::locator::{select_source, Selection};
use super::plotter::Plotter;
use super::stage_status::{Stage, StageStatus};
use super::tool::{ToolOutcome, ToolRunner};

/// Everything a finished run produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineReport {
    pub source: PathBuf,
    pub converted: PathBuf,
    pub relocated: PathBuf,
    pub by_channels: PathBuf,
    pub conversion: ToolOutcome,
    pub channel_mapping: ToolOutcome,
    /// None when plotting is disabled
    pub plot: Option<ToolOutcome>,
}

/// The main loop of tof_pipeline.
///
/// Runs Locate -> Convert -> Relocate -> Map -> Plot on a single source file. The first stage
/// that fails ends the run; files produced by earlier stages are left where they are.
pub fn process(
    config: &Config,
    selection: &Selection,
    runner: &mut impl ToolRunner,
    tx: &Sender<StageStatus>,
) -> Result<PipelineReport, PipelineError> {
    let root = config.resolve_root()?;
    spdlog::info!("Working in {}", root.display());

    tx.send(StageStatus::new(Stage::Locate, false))?;
    let source = select_source(&root, &config.source_extension, selection)?;
    spdlog::info!("Using source file {}", source.display());
    tx.send(StageStatus::new(Stage::Locate, true))?;

    config.channel_map.log_values();

    tx.send(StageStatus::new(Stage::Convert, false))?;
    let conversion = Converter::new(config, &root).run(runner, &source)?;
    tx.send(StageStatus::new(Stage::Convert, true))?;

    tx.send(StageStatus::new(Stage::Relocate, false))?;
    let layout = Layout::new(config, &root);
    let converted = layout.find_converted()?;
    spdlog::info!("Found converted file {}", converted.display());
    layout.ensure_directories()?;
    let relocated = layout.relocate(&converted)?;
    tx.send(StageStatus::new(Stage::Relocate, true))?;

    tx.send(StageStatus::new(Stage::MapChannels, false))?;
    let (expected, channel_mapping) = ChannelMapper::new(config, &root).run(runner, &relocated)?;
    tx.send(StageStatus::new(Stage::MapChannels, true))?;

    tx.send(StageStatus::new(Stage::Plot, false))?;
    let plotter = Plotter::new(config, &root);
    let by_channels = plotter.locate_input(&expected)?;
    spdlog::info!("Found by_channels file {}", by_channels.display());
    let plot = if config.plot {
        Some(plotter.run(runner, &by_channels)?)
    } else {
        spdlog::info!("Plotting is disabled, skipping...");
        None
    };
    tx.send(StageStatus::new(Stage::Plot, true))?;

    Ok(PipelineReport {
        source,
        converted,
        relocated,
        by_channels,
        conversion,
        channel_mapping,
        plot,
    })
}
