// SPDX-License-Identifier: MPL-2.0

//! Photo pipeline
//!
//! ```text
//! Camera frame → RGBA image (stride removed, optional mirror)
//!              → overlays flattened by the session
//!              → PNG encoding (blocking task) → captured-photo.png
//! ```

pub mod encoding;

pub use encoding::{EncodedImage, PhotoEncoder};

use crate::backends::camera::types::CameraFrame;
use crate::errors::PhotoError;
use image::RgbaImage;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Convert a camera frame to an owned RGBA image
///
/// Row padding is dropped. With `mirror` the image is flipped horizontally
/// so the still matches a mirrored preview.
pub fn frame_to_image(frame: &CameraFrame, mirror: bool) -> Result<RgbaImage, PhotoError> {
    let row_bytes = frame.width as usize * 4;
    let stride = if frame.stride == 0 {
        row_bytes
    } else {
        frame.stride as usize
    };
    if stride < row_bytes {
        return Err(PhotoError::InvalidFrame(format!(
            "stride {} shorter than row {}",
            stride, row_bytes
        )));
    }

    let height = frame.height as usize;
    let needed = if height == 0 {
        0
    } else {
        stride * (height - 1) + row_bytes
    };
    if frame.data.len() < needed {
        return Err(PhotoError::InvalidFrame(format!(
            "expected at least {} bytes, got {}",
            needed,
            frame.data.len()
        )));
    }

    let pixels: Vec<u8> = if stride == row_bytes {
        frame.data[..row_bytes * height].to_vec()
    } else {
        debug!(stride, row_bytes, "Removing row padding");
        frame
            .data
            .chunks(stride)
            .take(height)
            .flat_map(|row| &row[..row_bytes])
            .copied()
            .collect()
    };

    let mut image = RgbaImage::from_raw(frame.width, frame.height, pixels)
        .ok_or_else(|| PhotoError::InvalidFrame("buffer size mismatch".to_string()))?;
    if mirror {
        image::imageops::flip_horizontal_in_place(&mut image);
    }
    Ok(image)
}

/// Encode and write the capture to `output_dir`
pub async fn save_photo(image: RgbaImage, output_dir: &Path) -> Result<PathBuf, PhotoError> {
    let encoded = PhotoEncoder::encode_png(image).await?;
    PhotoEncoder::save(&encoded, output_dir).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;
    use std::sync::Arc;

    fn frame(width: u32, height: u32, stride: u32, data: Vec<u8>) -> CameraFrame {
        CameraFrame {
            width,
            height,
            stride,
            data: Arc::from(data),
        }
    }

    #[test]
    fn test_padded_rows_are_trimmed() {
        // 2x2 image, 12-byte stride (4 bytes padding per row)
        let data = vec![
            1, 1, 1, 255, 2, 2, 2, 255, 0, 0, 0, 0, //
            3, 3, 3, 255, 4, 4, 4, 255, 0, 0, 0, 0,
        ];
        let image = frame_to_image(&frame(2, 2, 12, data), false).unwrap();
        assert_eq!(image.get_pixel(1, 0), &Rgba([2, 2, 2, 255]));
        assert_eq!(image.get_pixel(0, 1), &Rgba([3, 3, 3, 255]));
    }

    #[test]
    fn test_mirror_flips_horizontally() {
        let data = vec![1, 1, 1, 255, 2, 2, 2, 255];
        let image = frame_to_image(&frame(2, 1, 8, data), true).unwrap();
        assert_eq!(image.get_pixel(0, 0), &Rgba([2, 2, 2, 255]));
    }

    #[test]
    fn test_short_buffer_is_rejected() {
        let result = frame_to_image(&frame(4, 4, 16, vec![0; 20]), false);
        assert!(matches!(result, Err(PhotoError::InvalidFrame(_))));
    }

    #[test]
    fn test_last_row_without_padding_is_accepted() {
        // Some sources omit the padding after the final row
        let data = vec![9, 9, 9, 255, 0, 0, 0, 0, 8, 8, 8, 255];
        let image = frame_to_image(&frame(1, 2, 8, data), false).unwrap();
        assert_eq!(image.get_pixel(0, 1), &Rgba([8, 8, 8, 255]));
    }
}
