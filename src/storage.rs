// SPDX-License-Identifier: MPL-2.0

//! Storage locations for filters and captured photos

use crate::constants::{APP_DIR_NAME, CAPTURED_PHOTO_FILE, FILTERS_DIR_NAME};
use crate::errors::{AppError, AppResult};
use std::path::{Path, PathBuf};
use tracing::debug;

/// System-wide filter location shipped by packages
const SYSTEM_FILTERS_DIR: &str = "/usr/share/picture-a-state/filters";

/// Application-local data directory (`$XDG_DATA_HOME/picture-a-state`)
pub fn data_directory() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR_NAME)
}

/// Folder captured photos are written to
pub fn output_directory() -> PathBuf {
    data_directory()
}

/// Full path of the saved capture inside `dir`
pub fn captured_photo_path(dir: &Path) -> PathBuf {
    dir.join(CAPTURED_PHOTO_FILE)
}

/// Candidate filter folders in lookup order
pub fn filter_search_paths(override_folder: Option<&str>) -> Vec<PathBuf> {
    let mut paths = Vec::with_capacity(3);
    if let Some(folder) = override_folder.filter(|f| !f.trim().is_empty()) {
        paths.push(expand_home(folder));
    }
    paths.push(data_directory().join(FILTERS_DIR_NAME));
    paths.push(PathBuf::from(SYSTEM_FILTERS_DIR));
    paths
}

/// Resolve the filter folder
///
/// The first existing candidate wins. When none exists the user data
/// location is returned so it can be created and opened.
pub fn filters_directory(override_folder: Option<&str>) -> PathBuf {
    let candidates = filter_search_paths(override_folder);
    first_existing(&candidates).unwrap_or_else(|| data_directory().join(FILTERS_DIR_NAME))
}

/// First directory in `candidates` that exists
pub fn first_existing(candidates: &[PathBuf]) -> Option<PathBuf> {
    let found = candidates.iter().find(|path| path.is_dir()).cloned();
    debug!(?found, "Resolved directory");
    found
}

/// Create `dir` and its parents if missing
pub async fn ensure_directory(dir: &Path) -> AppResult<()> {
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| AppError::Storage(format!("{}: {}", dir.display(), e)))
}

fn expand_home(path: &str) -> PathBuf {
    match path.strip_prefix("~/") {
        Some(rest) => dirs::home_dir()
            .map(|home| home.join(rest))
            .unwrap_or_else(|| PathBuf::from(path)),
        None => PathBuf::from(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_override_comes_first() {
        let paths = filter_search_paths(Some("/tmp/booth-filters"));
        assert_eq!(paths[0], PathBuf::from("/tmp/booth-filters"));
        assert_eq!(paths.len(), 3);
        assert_eq!(paths[2], PathBuf::from(SYSTEM_FILTERS_DIR));
    }

    #[test]
    fn test_blank_override_is_ignored() {
        assert_eq!(filter_search_paths(Some("  ")).len(), 2);
        assert_eq!(filter_search_paths(None).len(), 2);
    }

    #[test]
    fn test_first_existing_skips_missing() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing");
        let present = dir.path().join("present");
        std::fs::create_dir(&present).unwrap();

        assert_eq!(
            first_existing(&[missing.clone(), present.clone()]),
            Some(present)
        );
        assert_eq!(first_existing(&[missing]), None);
    }

    #[test]
    fn test_captured_photo_name() {
        assert_eq!(
            captured_photo_path(Path::new("/data")),
            PathBuf::from("/data/captured-photo.png")
        );
    }
}
