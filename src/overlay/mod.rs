// SPDX-License-Identifier: GPL-3.0-only

//! Overlay elements and the applied overlay stack
//!
//! An overlay is a filter image placed over the canvas. Its placement is
//! expressed as a margin from each canvas edge: the image is fitted
//! uniformly into the remaining slot and centred there. Moving shifts the
//! slot. Scaling widens or narrows it through the left and right margins
//! only. Positions are not clamped, so an overlay can be pushed off the
//! canvas; margin arithmetic saturates instead of overflowing.

pub mod compositor;

pub use compositor::Compositor;

use crate::constants::MAX_APPLIED_OVERLAYS;
use crate::errors::FilterError;

/// Distance of the overlay slot from each canvas edge, in canvas pixels
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Margin {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Margin {
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }
}

/// Quarter-turn rotation, clockwise
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Rotation {
    #[default]
    None,
    Cw90,
    Cw180,
    Cw270,
}

impl Rotation {
    pub fn clockwise(self) -> Self {
        match self {
            Self::None => Self::Cw90,
            Self::Cw90 => Self::Cw180,
            Self::Cw180 => Self::Cw270,
            Self::Cw270 => Self::None,
        }
    }

    pub fn counter_clockwise(self) -> Self {
        match self {
            Self::None => Self::Cw270,
            Self::Cw90 => Self::None,
            Self::Cw180 => Self::Cw90,
            Self::Cw270 => Self::Cw180,
        }
    }

    /// Whether width and height swap under this rotation
    pub fn is_sideways(self) -> bool {
        matches!(self, Self::Cw90 | Self::Cw270)
    }
}

/// Integer rectangle in canvas coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: i64,
    pub y: i64,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    /// Part of the rectangle inside a `width` x `height` canvas
    pub fn clip(&self, width: u32, height: u32) -> Option<Rect> {
        let x0 = self.x.max(0);
        let y0 = self.y.max(0);
        let x1 = (self.x + i64::from(self.width)).min(i64::from(width));
        let y1 = (self.y + i64::from(self.height)).min(i64::from(height));
        if x1 <= x0 || y1 <= y0 {
            return None;
        }

        Some(Rect {
            x: x0,
            y: y0,
            width: u32::try_from(x1 - x0).ok()?,
            height: u32::try_from(y1 - y0).ok()?,
        })
    }
}

/// A filter image positioned over the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Overlay {
    pub filter_index: usize,
    pub margin: Margin,
    pub rotation: Rotation,
}

impl Overlay {
    /// Fresh overlay at default placement: fitted to the whole canvas
    pub fn new(filter_index: usize) -> Self {
        Self {
            filter_index,
            margin: Margin::default(),
            rotation: Rotation::None,
        }
    }

    pub fn move_up(&mut self, step: i32) {
        let m = &mut self.margin;
        m.top = m.top.saturating_sub(step);
        m.bottom = m.bottom.saturating_add(step);
    }

    pub fn move_down(&mut self, step: i32) {
        let m = &mut self.margin;
        m.top = m.top.saturating_add(step);
        m.bottom = m.bottom.saturating_sub(step);
    }

    pub fn move_left(&mut self, step: i32) {
        let m = &mut self.margin;
        m.left = m.left.saturating_sub(step);
        m.right = m.right.saturating_add(step);
    }

    pub fn move_right(&mut self, step: i32) {
        let m = &mut self.margin;
        m.left = m.left.saturating_add(step);
        m.right = m.right.saturating_sub(step);
    }

    /// Widen the slot; top and bottom margins stay put
    pub fn scale_up(&mut self, step: i32) {
        let m = &mut self.margin;
        m.left = m.left.saturating_sub(step);
        m.right = m.right.saturating_sub(step);
    }

    /// Narrow the slot; top and bottom margins stay put
    pub fn scale_down(&mut self, step: i32) {
        let m = &mut self.margin;
        m.left = m.left.saturating_add(step);
        m.right = m.right.saturating_add(step);
    }

    pub fn rotate_left(&mut self) {
        self.rotation = self.rotation.counter_clockwise();
    }

    pub fn rotate_right(&mut self) {
        self.rotation = self.rotation.clockwise();
    }

    /// Where the overlay lands on a `canvas_width` x `canvas_height` canvas
    ///
    /// `image_width`/`image_height` are the source filter dimensions before
    /// rotation. Returns `None` when the slot or the fitted image is empty.
    pub fn placement(
        &self,
        canvas_width: u32,
        canvas_height: u32,
        image_width: u32,
        image_height: u32,
    ) -> Option<Rect> {
        let (img_w, img_h) = if self.rotation.is_sideways() {
            (image_height, image_width)
        } else {
            (image_width, image_height)
        };
        if img_w == 0 || img_h == 0 {
            return None;
        }

        let slot_x = self.margin.left as i64;
        let slot_y = self.margin.top as i64;
        let slot_w = canvas_width as i64 - self.margin.left as i64 - self.margin.right as i64;
        let slot_h = canvas_height as i64 - self.margin.top as i64 - self.margin.bottom as i64;
        if slot_w <= 0 || slot_h <= 0 {
            return None;
        }

        let scale = (slot_w as f64 / img_w as f64).min(slot_h as f64 / img_h as f64);
        let width = (img_w as f64 * scale).round() as i64;
        let height = (img_h as f64 * scale).round() as i64;
        if width <= 0 || height <= 0 {
            return None;
        }

        Some(Rect {
            x: slot_x + (slot_w - width) / 2,
            y: slot_y + (slot_h - height) / 2,
            width: u32::try_from(width).ok()?,
            height: u32::try_from(height).ok()?,
        })
    }
}

/// Overlays committed to the photo, capped at [`MAX_APPLIED_OVERLAYS`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppliedOverlays {
    items: Vec<Overlay>,
}

impl AppliedOverlays {
    pub fn new() -> Self {
        Self {
            items: Vec::with_capacity(MAX_APPLIED_OVERLAYS),
        }
    }

    /// Commit an overlay; rejected once the stack is full
    pub fn push(&mut self, overlay: Overlay) -> Result<(), FilterError> {
        if self.is_full() {
            return Err(FilterError::LimitReached);
        }
        self.items.push(overlay);
        Ok(())
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= MAX_APPLIED_OVERLAYS
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &Overlay> {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_shifts_opposite_sides() {
        let mut overlay = Overlay::new(0);
        overlay.move_up(5);
        assert_eq!(overlay.margin, Margin::new(0, -5, 0, 5));
        overlay.move_right(5);
        overlay.move_right(5);
        assert_eq!(overlay.margin, Margin::new(10, -5, -10, 5));
        overlay.move_down(5);
        overlay.move_left(10);
        assert_eq!(overlay.margin, Margin::default());
    }

    #[test]
    fn test_scale_changes_horizontal_margins_only() {
        let mut overlay = Overlay::new(2);
        overlay.scale_up(5);
        assert_eq!(overlay.margin, Margin::new(-5, 0, -5, 0));
        overlay.scale_down(5);
        overlay.scale_down(5);
        assert_eq!(overlay.margin, Margin::new(5, 0, 5, 0));
    }

    #[test]
    fn test_huge_steps_saturate() {
        let mut overlay = Overlay::new(0);
        overlay.scale_down(i32::MAX);
        overlay.scale_down(i32::MAX);
        assert_eq!(overlay.margin, Margin::new(i32::MAX, 0, i32::MAX, 0));
        overlay.move_up(i32::MAX);
        overlay.move_up(i32::MAX);
        assert_eq!(overlay.margin.top, i32::MIN);
        assert_eq!(overlay.margin.bottom, i32::MAX);
        assert!(overlay.placement(100, 100, 10, 10).is_none());
    }

    #[test]
    fn test_clip_keeps_visible_part() {
        let rect = Rect {
            x: -20,
            y: 10,
            width: 50,
            height: 200,
        };
        assert_eq!(
            rect.clip(100, 100),
            Some(Rect {
                x: 0,
                y: 10,
                width: 30,
                height: 90
            })
        );

        let gone = Rect {
            x: 100,
            y: 0,
            width: 10,
            height: 10,
        };
        assert_eq!(gone.clip(100, 100), None);
    }

    #[test]
    fn test_rotation_wraps() {
        let mut overlay = Overlay::new(0);
        overlay.rotate_left();
        assert_eq!(overlay.rotation, Rotation::Cw270);
        for _ in 0..5 {
            overlay.rotate_right();
        }
        assert_eq!(overlay.rotation, Rotation::None);
    }

    #[test]
    fn test_default_placement_fits_and_centres() {
        let overlay = Overlay::new(0);
        // Square image on a 200x100 canvas is height-limited
        let rect = overlay.placement(200, 100, 50, 50).unwrap();
        assert_eq!(
            rect,
            Rect {
                x: 50,
                y: 0,
                width: 100,
                height: 100
            }
        );
    }

    #[test]
    fn test_placement_follows_moves_off_canvas() {
        let mut overlay = Overlay::new(0);
        for _ in 0..30 {
            overlay.move_left(5);
        }
        let rect = overlay.placement(100, 100, 10, 10).unwrap();
        assert_eq!(rect.x, -150);
        assert_eq!(rect.width, 100);
    }

    #[test]
    fn test_sideways_rotation_swaps_aspect() {
        let mut overlay = Overlay::new(0);
        overlay.rotate_right();
        let rect = overlay.placement(100, 100, 100, 50).unwrap();
        assert_eq!((rect.width, rect.height), (50, 100));
        assert_eq!((rect.x, rect.y), (25, 0));
    }

    #[test]
    fn test_collapsed_slot_is_not_drawn() {
        let mut overlay = Overlay::new(0);
        for _ in 0..10 {
            overlay.scale_down(5);
        }
        assert!(overlay.placement(100, 100, 10, 10).is_none());
        assert!(Overlay::new(0).placement(100, 100, 0, 10).is_none());
    }

    #[test]
    fn test_applied_stack_rejects_sixth() {
        let mut applied = AppliedOverlays::new();
        for i in 0..MAX_APPLIED_OVERLAYS {
            applied.push(Overlay::new(i)).unwrap();
        }
        assert!(applied.is_full());
        assert_eq!(applied.push(Overlay::new(9)), Err(FilterError::LimitReached));
        assert_eq!(applied.len(), MAX_APPLIED_OVERLAYS);
    }
}
