use std::path::{Path, PathBuf};

use super::config::Config;
use super::error::LayoutError;
use super::locator::find_single;

/// Layout owns the two destination directories under the root and moves converted files
/// into place.
#[derive(Debug, Clone)]
pub struct Layout {
    root: PathBuf,
    raw_root_dir: PathBuf,
    by_channels_dir: PathBuf,
    converted_extension: String,
}

impl Layout {
    pub fn new(config: &Config, root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
            raw_root_dir: config.get_raw_root_directory(root),
            by_channels_dir: config.get_by_channels_directory(root),
            converted_extension: config.converted_extension.clone(),
        }
    }

    /// Find the converter's output in the root directory. Does not touch the filesystem.
    pub fn find_converted(&self) -> Result<PathBuf, LayoutError> {
        Ok(find_single(&self.root, &self.converted_extension)?)
    }

    /// Create both destination directories if they are missing
    pub fn ensure_directories(&self) -> Result<(), LayoutError> {
        std::fs::create_dir_all(&self.raw_root_dir)?;
        std::fs::create_dir_all(&self.by_channels_dir)?;
        Ok(())
    }

    /// Move a converted file into the raw_root directory, replacing any file of the same name.
    ///
    /// Returns the new location.
    pub fn relocate(&self, converted: &Path) -> Result<PathBuf, LayoutError> {
        let file_name = converted
            .file_name()
            .ok_or_else(|| LayoutError::BadFileName(converted.to_path_buf()))?;
        let destination = self.raw_root_dir.join(file_name);
        if destination.exists() {
            spdlog::warn!("Overwriting existing file {}", destination.display());
            std::fs::remove_file(&destination)?;
        }
        let bytes = converted.metadata()?.len();
        move_file(converted, &destination)?;
        spdlog::info!(
            "Moved {} ({}) to {}",
            converted.display(),
            human_bytes::human_bytes(bytes as f64),
            self.raw_root_dir.display()
        );
        Ok(destination)
    }
}

/// Rename, or copy then delete when the destination is on another filesystem
fn move_file(src: &Path, dst: &Path) -> std::io::Result<()> {
    match std::fs::rename(src, dst) {
        Ok(()) => Ok(()),
        Err(e) => {
            spdlog::warn!(
                "Could not rename {} to {} ({e}), copying instead",
                src.display(),
                dst.display()
            );
            copy_and_remove(src, dst)
        }
    }
}

fn copy_and_remove(src: &Path, dst: &Path) -> std::io::Result<()> {
    std::fs::copy(src, dst)?;
    std::fs::remove_file(src)
}
