use std::path::PathBuf;
use thiserror::Error;

use super::stage_status::StageStatus;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration as file {0:?} does not exist")]
    BadFilePath(PathBuf),
    #[error("Configured root directory {0:?} does not exist or is not a directory")]
    BadRootPath(PathBuf),
    #[error("Config failed due to IO error: {0}")]
    IOError(#[from] std::io::Error),
    #[error("Config failed to parse YAML: {0}")]
    ParsingError(#[from] serde_yaml::Error),
}

#[derive(Debug, Error)]
pub enum LocatorError {
    #[error("Locator failed due to IO error: {0}")]
    IOError(#[from] std::io::Error),
    #[error("No .{1} files found in {0:?}")]
    NoMatchingFiles(PathBuf, String),
    #[error("Ambiguous output: {2} candidate .{1} files found in {0:?}")]
    AmbiguousMatch(PathBuf, String, usize),
    #[error("The file {0:?} does not exist")]
    MissingFile(PathBuf),
}

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Failed to launch `{0}`: {1}")]
    SpawnFailed(String, #[source] std::io::Error),
    #[error("Command `{0}` finished with {status}", status = describe_exit(.1))]
    ExitFailure(String, Option<i32>),
}

/// Exit codes are missing when a process is killed by a signal
fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(c) => format!("exit status {c}"),
        None => String::from("no exit status (terminated by signal)"),
    }
}

#[derive(Debug, Error)]
pub enum ConverterError {
    #[error("Converter failed due to tool error: {0}")]
    Tool(#[from] ToolError),
    #[error("Converter was given a source file without a valid path: {0:?}")]
    BadSourcePath(PathBuf),
}

#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("Layout failed due to IO error: {0}")]
    IOError(#[from] std::io::Error),
    #[error("Layout could not find the converted file: {0}")]
    Locator(#[from] LocatorError),
    #[error("Layout was given a file without a file name: {0:?}")]
    BadFileName(PathBuf),
}

#[derive(Debug, Error)]
pub enum ChannelMapperError {
    #[error("Channel mapper failed due to tool error: {0}")]
    Tool(#[from] ToolError),
    #[error("Channel mapper was given a file without a file name: {0:?}")]
    BadFileName(PathBuf),
}

#[derive(Debug, Error)]
pub enum PlotterError {
    #[error("No by_channels files available: {0}")]
    Locator(#[from] LocatorError),
    #[error("Plotter failed due to tool error: {0}")]
    Tool(#[from] ToolError),
}

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Pipeline failed due to Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("Source selection failed: {0}")]
    Source(#[from] LocatorError),
    #[error("Conversion stage failed: {0}")]
    Convert(#[from] ConverterError),
    #[error("Relocation stage failed: {0}")]
    Relocate(#[from] LayoutError),
    #[error("Channel mapping stage failed: {0}")]
    MapChannels(#[from] ChannelMapperError),
    #[error("Plot stage failed: {0}")]
    Plot(#[from] PlotterError),
    #[error("Pipeline failed due to Send error: {0}")]
    SendError(#[from] std::sync::mpsc::SendError<StageStatus>),
}
