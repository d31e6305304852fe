use std::path::{Path, PathBuf};

use super::config::Config;
use super::error::PlotterError;
use super::locator::find_single;
use super::tool::{ToolCommand, ToolOutcome, ToolRunner};

/// Plotter opens the time-of-flight analysis macro on a channel-mapped file.
///
/// The macro draws to a window, so it runs interactively and holds the pipeline until the
/// operator quits ROOT.
pub struct Plotter {
    root_executable: PathBuf,
    macro_path: PathBuf,
    working_dir: PathBuf,
    by_channels_dir: PathBuf,
    extension: String,
}

impl Plotter {
    pub fn new(config: &Config, root: &Path) -> Self {
        Self {
            root_executable: config.root_executable.clone(),
            macro_path: config.plot_macro.clone(),
            working_dir: root.to_path_buf(),
            by_channels_dir: config.get_by_channels_directory(root),
            extension: config.converted_extension.clone(),
        }
    }

    /// Find the file to plot.
    ///
    /// The path the mapper was told to write wins. If the macro named its output something
    /// else, accept the by_channels directory's only file.
    pub fn locate_input(&self, expected: &Path) -> Result<PathBuf, PlotterError> {
        if expected.is_file() {
            return Ok(expected.to_path_buf());
        }
        spdlog::warn!(
            "Expected {} was not written, searching {}",
            expected.display(),
            self.by_channels_dir.display()
        );
        Ok(find_single(&self.by_channels_dir, &self.extension)?)
    }

    /// `root -l '<macro>("<input>")'`
    pub fn command(&self, input: &Path) -> ToolCommand {
        let call = format!("{}(\"{}\")", self.macro_path.display(), input.display());
        ToolCommand::new(&self.root_executable)
            .arg("-l")
            .arg(call)
            .working_dir(&self.working_dir)
            .interactive(true)
    }

    pub fn run(
        &self,
        runner: &mut impl ToolRunner,
        input: &Path,
    ) -> Result<ToolOutcome, PlotterError> {
        let outcome = runner.run(&self.command(input))?;
        if !outcome.success() {
            spdlog::warn!("Plot macro exited with {:?}", outcome.exit_code);
        }
        Ok(outcome)
    }
}
