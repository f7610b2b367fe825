// SPDX-License-Identifier: GPL-3.0-only

//! CPU compositor
//!
//! Flattens a base image and a stack of overlays into a single RGBA image.
//! Each overlay is rotated, resized to its placement and alpha blended onto
//! the canvas. An overlay that only partly covers the canvas is resampled
//! for the visible window alone, so no buffer exceeds the canvas size.

use super::{Overlay, Rect, Rotation};
use crate::filters::FilterCatalog;
use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// Maximum resized overlays kept between frames
const CACHE_LIMIT: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct CacheKey {
    filter_index: usize,
    rotation: Rotation,
    width: u32,
    height: u32,
    /// Visible window, relative to the placement origin
    window: Rect,
}

/// Compositor with a cache of resized overlay images
///
/// The live preview recomposites every frame while the overlays rarely
/// change, so resized images are cached by filter, rotation and size.
#[derive(Debug, Default)]
pub struct Compositor {
    cache: HashMap<CacheKey, Arc<RgbaImage>>,
}

impl Compositor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop cached images (call after the catalog changes)
    pub fn clear(&mut self) {
        self.cache.clear();
    }

    pub fn cached_len(&self) -> usize {
        self.cache.len()
    }

    /// Draw `layers` over a copy of `base`
    pub fn compose<'a>(
        &mut self,
        base: &RgbaImage,
        layers: impl IntoIterator<Item = &'a Overlay>,
        catalog: &FilterCatalog,
    ) -> RgbaImage {
        let mut canvas = base.clone();
        self.draw(&mut canvas, layers, catalog);
        canvas
    }

    /// Draw `layers` onto `canvas` in order
    pub fn draw<'a>(
        &mut self,
        canvas: &mut RgbaImage,
        layers: impl IntoIterator<Item = &'a Overlay>,
        catalog: &FilterCatalog,
    ) {
        let (canvas_w, canvas_h) = canvas.dimensions();

        for overlay in layers {
            let Some(asset) = catalog.get(overlay.filter_index) else {
                warn!(index = overlay.filter_index, "Overlay refers to a missing filter");
                continue;
            };
            let Some(rect) =
                overlay.placement(canvas_w, canvas_h, asset.image.width(), asset.image.height())
            else {
                debug!(index = overlay.filter_index, "Overlay slot is empty, skipping");
                continue;
            };

            let Some(visible) = rect.clip(canvas_w, canvas_h) else {
                debug!(index = overlay.filter_index, "Overlay is off the canvas, skipping");
                continue;
            };

            let key = CacheKey {
                filter_index: overlay.filter_index,
                rotation: overlay.rotation,
                width: rect.width,
                height: rect.height,
                window: Rect {
                    x: visible.x - rect.x,
                    y: visible.y - rect.y,
                    ..visible
                },
            };
            let sized = match self.cache.get(&key) {
                Some(img) => Arc::clone(img),
                None => {
                    let rotated = rotate(&asset.image, overlay.rotation);
                    let resized = if visible == rect {
                        imageops::resize(&rotated, rect.width, rect.height, FilterType::Triangle)
                    } else {
                        resample_window(&rotated, rect, visible)
                    };
                    let resized = Arc::new(resized);
                    if self.cache.len() >= CACHE_LIMIT {
                        self.cache.clear();
                    }
                    self.cache.insert(key, Arc::clone(&resized));
                    resized
                }
            };

            imageops::overlay(canvas, sized.as_ref(), visible.x, visible.y);
        }
    }
}

/// Flatten without keeping a cache around
pub fn flatten<'a>(
    base: &RgbaImage,
    layers: impl IntoIterator<Item = &'a Overlay>,
    catalog: &FilterCatalog,
) -> RgbaImage {
    Compositor::new().compose(base, layers, catalog)
}

/// Bilinear sample of `source` stretched over `rect`, restricted to `window`
fn resample_window(source: &RgbaImage, rect: Rect, window: Rect) -> RgbaImage {
    let offset_x = (window.x - rect.x) as f64 + 0.5;
    let offset_y = (window.y - rect.y) as f64 + 0.5;
    let width = f64::from(rect.width);
    let height = f64::from(rect.height);

    RgbaImage::from_fn(window.width, window.height, |x, y| {
        let u = (offset_x + f64::from(x)) / width;
        let v = (offset_y + f64::from(y)) / height;
        imageops::sample_bilinear(source, u as f32, v as f32).unwrap_or(Rgba([0, 0, 0, 0]))
    })
}

fn rotate(image: &RgbaImage, rotation: Rotation) -> RgbaImage {
    match rotation {
        Rotation::None => image.clone(),
        Rotation::Cw90 => imageops::rotate90(image),
        Rotation::Cw180 => imageops::rotate180(image),
        Rotation::Cw270 => imageops::rotate270(image),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::FilterAsset;
    use std::path::PathBuf;

    fn catalog_of(images: Vec<RgbaImage>) -> FilterCatalog {
        FilterCatalog::from_assets(
            images
                .into_iter()
                .enumerate()
                .map(|(i, image)| FilterAsset {
                    name: format!("filter-{i}"),
                    path: PathBuf::from(format!("filter-{i}.png")),
                    image: Arc::new(image),
                })
                .collect(),
        )
    }

    #[test]
    fn test_opaque_overlay_covers_fitted_area() {
        let catalog = catalog_of(vec![RgbaImage::from_pixel(10, 10, Rgba([255, 0, 0, 255]))]);
        let base = RgbaImage::from_pixel(40, 20, Rgba([0, 0, 0, 255]));

        let out = flatten(&base, &[Overlay::new(0)], &catalog);

        // 20x20 square centred on a 40x20 canvas
        assert_eq!(out.get_pixel(0, 10), &Rgba([0, 0, 0, 255]));
        assert_eq!(out.get_pixel(20, 10), &Rgba([255, 0, 0, 255]));
        assert_eq!(out.get_pixel(39, 10), &Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn test_transparent_overlay_leaves_base() {
        let catalog = catalog_of(vec![RgbaImage::from_pixel(8, 8, Rgba([255, 255, 255, 0]))]);
        let base = RgbaImage::from_pixel(8, 8, Rgba([10, 20, 30, 255]));

        let out = flatten(&base, &[Overlay::new(0)], &catalog);
        assert!(out.pixels().all(|p| *p == Rgba([10, 20, 30, 255])));
    }

    #[test]
    fn test_off_canvas_overlay_is_clipped() {
        let catalog = catalog_of(vec![RgbaImage::from_pixel(10, 10, Rgba([0, 255, 0, 255]))]);
        let base = RgbaImage::from_pixel(10, 10, Rgba([0, 0, 0, 255]));
        let mut overlay = Overlay::new(0);
        for _ in 0..5 {
            overlay.move_left(1);
        }

        let out = flatten(&base, &[overlay], &catalog);
        assert_eq!(out.dimensions(), (10, 10));
        assert_eq!(out.get_pixel(0, 5), &Rgba([0, 255, 0, 255]));
        assert_eq!(out.get_pixel(9, 5), &Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn test_oversized_overlay_is_resampled_at_canvas_size() {
        // Wide filter stretched far past a small canvas
        let catalog = catalog_of(vec![RgbaImage::from_pixel(10, 1, Rgba([255, 0, 0, 255]))]);
        let base = RgbaImage::from_pixel(64, 64, Rgba([0, 0, 0, 255]));
        let mut overlay = Overlay::new(0);
        for _ in 0..600 {
            overlay.scale_up(5);
        }
        let rect = overlay.placement(64, 64, 10, 1).unwrap();
        assert!(rect.width > 64);

        let mut compositor = Compositor::new();
        let out = compositor.compose(&base, &[overlay], &catalog);

        assert_eq!(out.dimensions(), (64, 64));
        assert!(compositor
            .cache
            .values()
            .all(|img| img.width() <= 64 && img.height() <= 64));
        assert_eq!(out.get_pixel(32, 32), &Rgba([255, 0, 0, 255]));
    }

    #[test]
    fn test_later_layers_draw_on_top() {
        let catalog = catalog_of(vec![
            RgbaImage::from_pixel(4, 4, Rgba([255, 0, 0, 255])),
            RgbaImage::from_pixel(4, 4, Rgba([0, 0, 255, 255])),
        ]);
        let base = RgbaImage::from_pixel(4, 4, Rgba([0, 0, 0, 255]));

        let out = flatten(&base, &[Overlay::new(0), Overlay::new(1)], &catalog);
        assert_eq!(out.get_pixel(2, 2), &Rgba([0, 0, 255, 255]));
    }

    #[test]
    fn test_rotation_turns_overlay() {
        // Left column red, rest transparent
        let mut img = RgbaImage::from_pixel(2, 2, Rgba([0, 0, 0, 0]));
        img.put_pixel(0, 0, Rgba([255, 0, 0, 255]));
        img.put_pixel(0, 1, Rgba([255, 0, 0, 255]));
        let catalog = catalog_of(vec![img]);
        let base = RgbaImage::from_pixel(2, 2, Rgba([0, 0, 0, 255]));
        let mut overlay = Overlay::new(0);
        overlay.rotate_right();

        let out = flatten(&base, &[overlay], &catalog);
        // Clockwise quarter turn moves the left column to the top row
        assert_eq!(out.get_pixel(0, 0), &Rgba([255, 0, 0, 255]));
        assert_eq!(out.get_pixel(1, 0), &Rgba([255, 0, 0, 255]));
        assert_eq!(out.get_pixel(0, 1), &Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn test_cache_reuses_resized_images() {
        let catalog = catalog_of(vec![RgbaImage::from_pixel(10, 10, Rgba([255, 0, 0, 255]))]);
        let base = RgbaImage::new(50, 50);
        let mut compositor = Compositor::new();

        compositor.compose(&base, &[Overlay::new(0)], &catalog);
        compositor.compose(&base, &[Overlay::new(0)], &catalog);
        assert_eq!(compositor.cached_len(), 1);

        compositor.clear();
        assert_eq!(compositor.cached_len(), 0);
    }

    #[test]
    fn test_missing_filter_is_skipped() {
        let catalog = FilterCatalog::default();
        let base = RgbaImage::from_pixel(4, 4, Rgba([1, 2, 3, 255]));
        let out = flatten(&base, &[Overlay::new(3)], &catalog);
        assert_eq!(out, base);
    }
}
