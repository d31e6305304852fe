use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::channel_map::ChannelMap;
use super::constants::*;
use super::error::ConfigError;

/// Structure representing the pipeline configuration. Contains pathing, tool and channel information
/// Configs are seralizable and deserializable to YAML using serde and serde_yaml. Missing
/// fields take their default values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub root_path: PathBuf,
    pub source_extension: String,
    pub converted_extension: String,
    pub raw_root_dir: String,
    pub by_channels_dir: String,
    pub converter_path: PathBuf,
    pub root_executable: PathBuf,
    pub channel_macro: PathBuf,
    pub plot_macro: PathBuf,
    pub channel_map: ChannelMap,
    pub check_exit_status: bool,
    pub plot: bool,
}

impl Default for Config {
    /// Generate a new Config matching the standard acquisition setup
    fn default() -> Self {
        Self {
            root_path: PathBuf::from("."),
            source_extension: String::from(DEFAULT_SOURCE_EXTENSION),
            converted_extension: String::from(DEFAULT_CONVERTED_EXTENSION),
            raw_root_dir: String::from(DEFAULT_RAW_ROOT_DIR),
            by_channels_dir: String::from(DEFAULT_BY_CHANNELS_DIR),
            converter_path: PathBuf::from(DEFAULT_CONVERTER_PATH),
            root_executable: PathBuf::from(DEFAULT_ROOT_EXECUTABLE),
            channel_macro: PathBuf::from(DEFAULT_CHANNEL_MACRO),
            plot_macro: PathBuf::from(DEFAULT_PLOT_MACRO),
            channel_map: ChannelMap::default(),
            check_exit_status: true,
            plot: true,
        }
    }
}

impl Config {
    /// Read the configuration in a YAML file
    /// Returns a Config if successful
    pub fn read_config_file(config_path: &Path) -> Result<Self, ConfigError> {
        if !config_path.exists() {
            return Err(ConfigError::BadFilePath(config_path.to_path_buf()));
        }

        let yaml_str = std::fs::read_to_string(config_path)?;

        Ok(serde_yaml::from_str::<Self>(&yaml_str)?)
    }

    /// Write the configuration to a YAML file, replacing anything already there
    pub fn write_config_file(&self, config_path: &Path) -> Result<(), ConfigError> {
        let yaml_str = serde_yaml::to_string(self)?;
        std::fs::write(config_path, yaml_str)?;
        Ok(())
    }

    /// Get the absolute root directory every stage works relative to
    pub fn resolve_root(&self) -> Result<PathBuf, ConfigError> {
        if !self.root_path.is_dir() {
            return Err(ConfigError::BadRootPath(self.root_path.clone()));
        }
        Ok(std::fs::canonicalize(&self.root_path)?)
    }

    /// Get the directory converted files are moved into
    pub fn get_raw_root_directory(&self, root: &Path) -> PathBuf {
        root.join(&self.raw_root_dir)
    }

    /// Get the directory the channel mapper writes into
    pub fn get_by_channels_directory(&self, root: &Path) -> PathBuf {
        root.join(&self.by_channels_dir)
    }

    /// Get the converter program, with a leading `~/` expanded to the home directory
    pub fn get_converter_program(&self) -> PathBuf {
        expand_home(&self.converter_path)
    }
}

/// Shells expand `~`, but we launch tools directly
fn expand_home(path: &Path) -> PathBuf {
    match path.strip_prefix("~") {
        Ok(rest) => match std::env::var_os("HOME") {
            Some(home) => PathBuf::from(home).join(rest),
            None => path.to_path_buf(),
        },
        Err(_) => path.to_path_buf(),
    }
}
