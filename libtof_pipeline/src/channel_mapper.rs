use std::path::{Path, PathBuf};

use super::channel_map::ChannelMap;
use super::config::Config;
use super::constants::{BY_CHANNELS_TAG, EVENTS_TAG};
use super::error::ChannelMapperError;
use super::tool::{check_outcome, ToolCommand, ToolOutcome, ToolRunner};

/// Output name for a relocated file: every `events` becomes `by_channels`
pub fn output_name(file_name: &str) -> String {
    file_name.replace(EVENTS_TAG, BY_CHANNELS_TAG)
}

/// ChannelMapper runs the ROOT macro that reorganizes events by DAQ channel.
pub struct ChannelMapper {
    root_executable: PathBuf,
    macro_path: PathBuf,
    channel_map: ChannelMap,
    working_dir: PathBuf,
    by_channels_dir: PathBuf,
    check_exit_status: bool,
}

impl ChannelMapper {
    pub fn new(config: &Config, root: &Path) -> Self {
        Self {
            root_executable: config.root_executable.clone(),
            macro_path: config.channel_macro.clone(),
            channel_map: config.channel_map,
            working_dir: root.to_path_buf(),
            by_channels_dir: config.get_by_channels_directory(root),
            check_exit_status: config.check_exit_status,
        }
    }

    /// Where the macro is told to write its output for this input
    pub fn output_path(&self, relocated: &Path) -> Result<PathBuf, ChannelMapperError> {
        let file_name = relocated
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| ChannelMapperError::BadFileName(relocated.to_path_buf()))?;
        Ok(self.by_channels_dir.join(output_name(file_name)))
    }

    /// `root -l -q '<macro>("<in>", "<out>", n, mcp, x1, x2, y1, y2)'`
    pub fn command(&self, input: &Path, output: &Path) -> ToolCommand {
        let params = self
            .channel_map
            .as_args()
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        let call = format!(
            "{}(\"{}\", \"{}\", {})",
            self.macro_path.display(),
            input.display(),
            output.display(),
            params
        );
        ToolCommand::new(&self.root_executable)
            .arg("-l")
            .arg("-q")
            .arg(call)
            .working_dir(&self.working_dir)
    }

    /// Run the macro on a relocated file. Returns the computed output path and the outcome.
    pub fn run(
        &self,
        runner: &mut impl ToolRunner,
        relocated: &Path,
    ) -> Result<(PathBuf, ToolOutcome), ChannelMapperError> {
        let output = self.output_path(relocated)?;
        let command = self.command(relocated, &output);
        let outcome = runner.run(&command)?;
        if self.check_exit_status {
            check_outcome(&command, &outcome)?;
        } else if !outcome.success() {
            spdlog::warn!(
                "Channel mapping exited with {:?}, continuing as exit status checks are disabled",
                outcome.exit_code
            );
        }
        Ok((output, outcome))
    }
}
