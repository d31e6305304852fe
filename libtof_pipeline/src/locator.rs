use std::path::{Path, PathBuf};

use super::error::LocatorError;

/// How the operator chose the source file
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    /// Use the file with the greatest name
    #[default]
    Latest,
    /// Use a file with this name inside the root directory
    Named(String),
}

/// List the regular files directly inside `dir` ending in `.extension`, sorted by name.
///
/// Hidden files are skipped, matching what a shell glob would return.
pub fn find_matching(dir: &Path, extension: &str) -> Result<Vec<PathBuf>, LocatorError> {
    let suffix = format!(".{extension}");
    let mut file_list: Vec<PathBuf> = Vec::new();
    for item in dir.read_dir()? {
        let item_path = item?.path();
        if !item_path.is_file() {
            continue;
        }
        let name = match item_path.file_name().and_then(|n| n.to_str()) {
            Some(n) => n,
            None => continue,
        };
        if !name.starts_with('.') && name.ends_with(&suffix) {
            file_list.push(item_path);
        }
    }
    file_list.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(file_list)
}

/// Find the file whose name is greatest by plain string ordering.
///
/// Modification times and embedded run numbers play no part: `run10` sorts before `run9`.
pub fn find_latest(dir: &Path, extension: &str) -> Result<Option<PathBuf>, LocatorError> {
    Ok(find_matching(dir, extension)?.pop())
}

/// Find the one file with the extension. Zero or several matches are errors.
pub fn find_single(dir: &Path, extension: &str) -> Result<PathBuf, LocatorError> {
    let mut matches = find_matching(dir, extension)?;
    match matches.len() {
        0 => Err(LocatorError::NoMatchingFiles(
            dir.to_path_buf(),
            extension.to_string(),
        )),
        1 => Ok(matches.remove(0)),
        n => Err(LocatorError::AmbiguousMatch(
            dir.to_path_buf(),
            extension.to_string(),
            n,
        )),
    }
}

/// Resolve the operator's selection to an existing source file
pub fn select_source(
    dir: &Path,
    extension: &str,
    selection: &Selection,
) -> Result<PathBuf, LocatorError> {
    match selection {
        Selection::Latest => find_latest(dir, extension)?.ok_or_else(|| {
            LocatorError::NoMatchingFiles(dir.to_path_buf(), extension.to_string())
        }),
        Selection::Named(name) => {
            let path = dir.join(name);
            if !name.is_empty() && path.is_file() {
                Ok(path)
            } else {
                Err(LocatorError::MissingFile(path))
            }
        }
    }
}
