//! Launching the external converter and ROOT macros.
//!
//! Every invocation goes through a [`ToolRunner`] and comes back as a [`ToolOutcome`], so the
//! pipeline decides pass/fail from the exit status rather than from what files happen to be
//! lying around afterwards.
use std::fmt;
use std::path::PathBuf;
use std::process::Command;
use std::time::{Duration, Instant};

use super::error::ToolError;

/// A single external program invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCommand {
    pub program: PathBuf,
    pub args: Vec<String>,
    pub working_dir: Option<PathBuf>,
    /// Interactive tools inherit the terminal instead of having their output captured
    pub interactive: bool,
}

impl ToolCommand {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: vec![],
            working_dir: None,
            interactive: false,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    pub fn interactive(mut self, interactive: bool) -> Self {
        self.interactive = interactive;
        self
    }
}

impl fmt::Display for ToolCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", shell_quote(&self.program.to_string_lossy()))?;
        for arg in &self.args {
            write!(f, " {}", shell_quote(arg))?;
        }
        Ok(())
    }
}

/// Quote an argument the way it would have to be typed at a shell prompt
fn shell_quote(arg: &str) -> String {
    let plain = !arg.is_empty()
        && arg
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./~=:,+@%".contains(c));
    if plain {
        arg.to_string()
    } else {
        format!("'{}'", arg.replace('\'', r"'\''"))
    }
}

/// What happened when a tool ran
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ToolOutcome {
    /// None if the process was killed by a signal
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
    pub elapsed: Duration,
}

impl ToolOutcome {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Turn a failed outcome into an error
pub fn check_outcome(command: &ToolCommand, outcome: &ToolOutcome) -> Result<(), ToolError> {
    if outcome.success() {
        Ok(())
    } else {
        Err(ToolError::ExitFailure(command.to_string(), outcome.exit_code))
    }
}

/// Something that can execute a [`ToolCommand`]
pub trait ToolRunner {
    fn run(&mut self, command: &ToolCommand) -> Result<ToolOutcome, ToolError>;
}

/// Runs tools as child processes, blocking until they exit
#[derive(Debug, Clone, Default)]
pub struct ProcessRunner;

impl ToolRunner for ProcessRunner {
    fn run(&mut self, command: &ToolCommand) -> Result<ToolOutcome, ToolError> {
        spdlog::info!("Executing: {}", command);
        let mut cmd = Command::new(&command.program);
        cmd.args(&command.args);
        if let Some(dir) = &command.working_dir {
            cmd.current_dir(dir);
        }

        let start = Instant::now();
        let outcome = if command.interactive {
            let status = cmd
                .status()
                .map_err(|e| ToolError::SpawnFailed(command.to_string(), e))?;
            ToolOutcome {
                exit_code: status.code(),
                elapsed: start.elapsed(),
                ..Default::default()
            }
        } else {
            let output = cmd
                .output()
                .map_err(|e| ToolError::SpawnFailed(command.to_string(), e))?;
            ToolOutcome {
                exit_code: output.status.code(),
                stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
                elapsed: start.elapsed(),
            }
        };

        for line in outcome.stdout.lines() {
            spdlog::info!("[{}] {}", command.program.to_string_lossy(), line);
        }
        for line in outcome.stderr.lines() {
            spdlog::warn!("[{}] {}", command.program.to_string_lossy(), line);
        }
        spdlog::info!(
            "Finished in {:.2} s with exit code {:?}",
            outcome.elapsed.as_secs_f64(),
            outcome.exit_code
        );
        Ok(outcome)
    }
}
