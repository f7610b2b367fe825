// SPDX-License-Identifier: GPL-3.0-only

//! PNG encoding and file output
//!
//! Encoding is CPU-bound and runs on a blocking task; writes replace the
//! previous file in place.

use crate::constants::CAPTURED_PHOTO_FILE;
use crate::errors::PhotoError;
use image::RgbaImage;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Encoded image data ready for saving
#[derive(Debug, Clone)]
pub struct EncodedImage {
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// Photo encoder
pub struct PhotoEncoder;

impl PhotoEncoder {
    /// Encode `image` as PNG on a blocking task
    pub async fn encode_png(image: RgbaImage) -> Result<EncodedImage, PhotoError> {
        let (width, height) = image.dimensions();
        info!(width, height, "Starting PNG encoding");

        tokio::task::spawn_blocking(move || {
            let data = Self::encode_png_sync(&image)?;
            debug!(size = data.len(), "Encoding complete");
            Ok::<_, PhotoError>(EncodedImage {
                data,
                width,
                height,
            })
        })
        .await
        .map_err(|e| PhotoError::EncodingFailed(format!("Encoding task error: {}", e)))?
    }

    /// Encode `image` as PNG on the current thread
    pub fn encode_png_sync(image: &RgbaImage) -> Result<Vec<u8>, PhotoError> {
        let mut buffer = Vec::new();
        image.write_to(
            &mut std::io::Cursor::new(&mut buffer),
            image::ImageFormat::Png,
        )?;
        Ok(buffer)
    }

    /// Write the capture as `captured-photo.png` in `output_dir`
    ///
    /// Any earlier capture is replaced.
    pub async fn save(encoded: &EncodedImage, output_dir: &Path) -> Result<PathBuf, PhotoError> {
        Self::write_file(encoded, output_dir, CAPTURED_PHOTO_FILE).await
    }

    /// Write `encoded` to `output_dir/file_name`, creating the directory
    ///
    /// The data goes to a temporary sibling first and is renamed over the
    /// target, so readers never see a half-written file.
    pub async fn write_file(
        encoded: &EncodedImage,
        output_dir: &Path,
        file_name: &str,
    ) -> Result<PathBuf, PhotoError> {
        tokio::fs::create_dir_all(output_dir).await?;

        let filepath = output_dir.join(file_name);
        let partial = output_dir.join(format!(".{}.part", file_name));
        info!(path = %filepath.display(), "Saving photo");

        let written = match tokio::fs::write(&partial, &encoded.data).await {
            Ok(()) => tokio::fs::rename(&partial, &filepath).await,
            Err(e) => Err(e),
        };
        if let Err(e) = written {
            if let Err(cleanup) = tokio::fs::remove_file(&partial).await {
                debug!(path = %partial.display(), error = %cleanup, "No partial file to remove");
            }
            return Err(e.into());
        }

        info!(path = %filepath.display(), bytes = encoded.data.len(), "Photo saved successfully");
        Ok(filepath)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[tokio::test]
    async fn test_encode_produces_png() {
        let image = RgbaImage::from_pixel(3, 2, Rgba([1, 2, 3, 4]));
        let encoded = PhotoEncoder::encode_png(image.clone()).await.unwrap();
        assert_eq!((encoded.width, encoded.height), (3, 2));
        assert_eq!(&encoded.data[..8], b"\x89PNG\r\n\x1a\n");

        let decoded = image::load_from_memory(&encoded.data).unwrap().to_rgba8();
        assert_eq!(decoded, image);
    }

    #[tokio::test]
    async fn test_save_overwrites_previous_capture() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("nested");

        let first = PhotoEncoder::encode_png(RgbaImage::new(4, 4)).await.unwrap();
        let path = PhotoEncoder::save(&first, &output).await.unwrap();
        assert_eq!(path, output.join("captured-photo.png"));

        let second = PhotoEncoder::encode_png(RgbaImage::new(8, 2)).await.unwrap();
        let path = PhotoEncoder::save(&second, &output).await.unwrap();

        let saved = image::open(&path).unwrap();
        assert_eq!((saved.width(), saved.height()), (8, 2));
        let files: Vec<_> = std::fs::read_dir(&output).unwrap().flatten().collect();
        assert_eq!(files.len(), 1);
    }

    #[tokio::test]
    async fn test_failed_rename_removes_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        // A non-empty directory in the way makes the final rename fail
        let blocker = dir.path().join("captured-photo.png");
        std::fs::create_dir(&blocker).unwrap();
        std::fs::write(blocker.join("keep"), b"x").unwrap();

        let encoded = PhotoEncoder::encode_png(RgbaImage::new(2, 2)).await.unwrap();
        let result = PhotoEncoder::save(&encoded, dir.path()).await;

        assert!(result.is_err());
        assert!(!dir.path().join(".captured-photo.png.part").exists());
        assert!(blocker.is_dir());
    }
}
