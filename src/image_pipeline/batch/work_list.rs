use std::path::{Path, PathBuf};

use crate::image_pipeline::common::error::BatchError;

/// Read the input paths listed in `path`, one per line.
pub fn read_work_list(path: &Path) -> Result<Vec<PathBuf>, BatchError> {
    let contents = std::fs::read_to_string(path).map_err(|source| BatchError::WorkListUnreadable {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse_work_list(&contents))
}

/// Trailing whitespace is trimmed; empty lines are ignored.
pub fn parse_work_list(contents: &str) -> Vec<PathBuf> {
    contents
        .lines()
        .map(str::trim_end)
        .filter(|line| !line.is_empty())
        .map(PathBuf::from)
        .collect()
}
