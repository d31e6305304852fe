use std::path::{Path, PathBuf};

use super::config::Config;
use super::error::ConverterError;
use super::tool::{check_outcome, ToolCommand, ToolOutcome, ToolRunner};

/// Converter runs the external .ade -> .root conversion tool.
///
/// The converter writes into the root directory under a name we cannot predict, so finding
/// its output is left to the layout stage.
pub struct Converter {
    program: PathBuf,
    root: PathBuf,
    check_exit_status: bool,
}

impl Converter {
    pub fn new(config: &Config, root: &Path) -> Self {
        Self {
            program: config.get_converter_program(),
            root: root.to_path_buf(),
            check_exit_status: config.check_exit_status,
        }
    }

    /// `<converter> <source-file> <root>`, run from the root directory
    pub fn command(&self, source: &Path) -> Result<ToolCommand, ConverterError> {
        let source_str = source
            .to_str()
            .ok_or_else(|| ConverterError::BadSourcePath(source.to_path_buf()))?;
        Ok(ToolCommand::new(&self.program)
            .arg(source_str)
            .arg(self.root.to_string_lossy())
            .working_dir(&self.root))
    }

    pub fn run(
        &self,
        runner: &mut impl ToolRunner,
        source: &Path,
    ) -> Result<ToolOutcome, ConverterError> {
        let command = self.command(source)?;
        let outcome = runner.run(&command)?;
        if self.check_exit_status {
            check_outcome(&command, &outcome)?;
        } else if !outcome.success() {
            spdlog::warn!(
                "Converter exited with {:?}, continuing as exit status checks are disabled",
                outcome.exit_code
            );
        }
        Ok(outcome)
    }
}
