// SPDX-License-Identifier: GPL-3.0-only

//! Filter catalog
//!
//! Filters are static decorative images laid over the camera feed. The
//! catalog is enumerated once from a folder and stays immutable for the
//! session; filters are addressed by their position.

use crate::constants::file_formats;
use image::RgbaImage;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// A single decoded filter image
#[derive(Debug, Clone)]
pub struct FilterAsset {
    /// Display name (file stem)
    pub name: String,
    /// Source file
    pub path: PathBuf,
    /// Decoded RGBA pixels
    pub image: Arc<RgbaImage>,
}

/// Ordered, immutable set of filters
#[derive(Debug, Clone, Default)]
pub struct FilterCatalog {
    assets: Vec<FilterAsset>,
}

impl FilterCatalog {
    /// Build a catalog from already decoded assets
    pub fn from_assets(assets: Vec<FilterAsset>) -> Self {
        Self { assets }
    }

    /// Enumerate and decode every supported image in `folder`
    ///
    /// Entries are ordered by file name. A missing folder yields an empty
    /// catalog; undecodable files are skipped.
    pub fn load(folder: &Path) -> Self {
        let entries = match std::fs::read_dir(folder) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(folder = %folder.display(), error = %e, "Filter folder not readable");
                return Self::default();
            }
        };

        let mut paths: Vec<PathBuf> = entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| path.is_file())
            .filter(|path| {
                path.extension()
                    .map(|ext| file_formats::is_image_extension(&ext.to_string_lossy()))
                    .unwrap_or(false)
            })
            .collect();
        paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

        let assets: Vec<FilterAsset> = paths
            .into_iter()
            .filter_map(|path| match image::open(&path) {
                Ok(img) => {
                    let name = path
                        .file_stem()
                        .map(|s| s.to_string_lossy().to_string())
                        .unwrap_or_default();
                    debug!(name = %name, width = img.width(), height = img.height(), "Loaded filter");
                    Some(FilterAsset {
                        name,
                        path,
                        image: Arc::new(img.to_rgba8()),
                    })
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Skipping undecodable filter");
                    None
                }
            })
            .collect();

        info!(folder = %folder.display(), count = assets.len(), "Filter catalog loaded");

        Self { assets }
    }

    /// Load on a blocking thread (decoding can be slow)
    pub async fn load_async(folder: PathBuf) -> Self {
        tokio::task::spawn_blocking(move || Self::load(&folder))
            .await
            .unwrap_or_else(|e| {
                warn!(error = %e, "Filter loading task failed");
                Self::default()
            })
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&FilterAsset> {
        self.assets.get(index)
    }

    /// Display names in catalog order
    pub fn names(&self) -> Vec<String> {
        self.assets.iter().map(|a| a.name.clone()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FilterAsset> {
        self.assets.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn write_png(dir: &Path, name: &str) {
        RgbaImage::from_pixel(4, 4, Rgba([255, 0, 0, 128]))
            .save(dir.join(name))
            .unwrap();
    }

    #[test]
    fn test_load_orders_by_file_name() {
        let dir = tempfile::tempdir().unwrap();
        write_png(dir.path(), "b-hat.png");
        write_png(dir.path(), "a-glasses.png");
        write_png(dir.path(), "c-frame.PNG");

        let catalog = FilterCatalog::load(dir.path());
        assert_eq!(catalog.names(), vec!["a-glasses", "b-hat", "c-frame"]);
    }

    #[test]
    fn test_load_skips_unsupported_and_broken_files() {
        let dir = tempfile::tempdir().unwrap();
        write_png(dir.path(), "ok.png");
        std::fs::write(dir.path().join("notes.txt"), "hello").unwrap();
        std::fs::write(dir.path().join("broken.png"), b"not a png").unwrap();
        std::fs::create_dir(dir.path().join("nested.png")).unwrap();

        let catalog = FilterCatalog::load(dir.path());
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get(0).unwrap().name, "ok");
    }

    #[test]
    fn test_missing_folder_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = FilterCatalog::load(&dir.path().join("does-not-exist"));
        assert!(catalog.is_empty());
        assert!(catalog.get(0).is_none());
    }
}
