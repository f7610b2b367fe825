// SPDX-License-Identifier: GPL-3.0-only

//! Booth session state
//!
//! Tracks the filter being browsed, the pending overlay, the overlays
//! committed so far and the captured still. Every operation is a guard
//! followed by a small mutation; guard failures come back as errors that
//! callers are expected to log and otherwise ignore.

use crate::errors::{FilterError, PhotoError};
use crate::filters::FilterCatalog;
use crate::overlay::{compositor, AppliedOverlays, Overlay};
use crate::constants::{DEFAULT_OVERLAY_STEP, MAX_OVERLAY_STEP};
use image::RgbaImage;
use std::sync::Arc;
use tracing::{debug, info};

/// One-shot message for the status line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    FilterLimitReached,
}

/// Result of committing the pending overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// Committed; a fresh overlay for the same filter is pending
    Applied { count: usize },
    /// Committed the last allowed overlay; filters are now locked
    LimitReached,
}

#[derive(Debug, Clone)]
pub struct BoothSession {
    catalog: Arc<FilterCatalog>,
    current_index: usize,
    pending: Option<Overlay>,
    applied: AppliedOverlays,
    can_add_filter: bool,
    captured: Option<RgbaImage>,
    status: Option<SessionStatus>,
    step: i32,
}

impl BoothSession {
    pub fn new(catalog: Arc<FilterCatalog>) -> Self {
        let can_add_filter = !catalog.is_empty();
        Self {
            catalog,
            current_index: 0,
            pending: None,
            applied: AppliedOverlays::new(),
            can_add_filter,
            captured: None,
            status: None,
            step: DEFAULT_OVERLAY_STEP,
        }
    }

    /// Swap in a new catalog, discarding overlays that referred to the old one
    pub fn set_catalog(&mut self, catalog: Arc<FilterCatalog>) {
        self.pending = None;
        self.applied.clear();
        self.current_index = 0;
        self.can_add_filter = !catalog.is_empty() && (self.captured.is_none() || self.can_add_filter);
        self.catalog = catalog;
    }

    /// Pixels moved or grown per adjustment
    pub fn set_step(&mut self, step: i32) {
        self.step = step.clamp(1, MAX_OVERLAY_STEP);
    }

    pub fn catalog(&self) -> &Arc<FilterCatalog> {
        &self.catalog
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn pending(&self) -> Option<&Overlay> {
        self.pending.as_ref()
    }

    pub fn applied(&self) -> &AppliedOverlays {
        &self.applied
    }

    pub fn can_add_filter(&self) -> bool {
        self.can_add_filter
    }

    pub fn is_captured(&self) -> bool {
        self.captured.is_some()
    }

    /// The captured still, if any
    pub fn captured(&self) -> Option<&RgbaImage> {
        self.captured.as_ref()
    }

    /// Take the pending status message, clearing it
    pub fn take_status(&mut self) -> Option<SessionStatus> {
        self.status.take()
    }

    fn ensure_browsable(&self) -> Result<(), FilterError> {
        if self.catalog.is_empty() {
            return Err(FilterError::NoFilters);
        }
        if !self.can_add_filter {
            return Err(FilterError::Locked);
        }
        Ok(())
    }

    /// Show the pending overlay for the current filter at default placement
    pub fn show_filters(&mut self) -> Result<(), FilterError> {
        self.ensure_browsable()?;
        self.pending = Some(Overlay::new(self.current_index));
        debug!(index = self.current_index, "Showing filter");
        Ok(())
    }

    pub fn next_filter(&mut self) -> Result<(), FilterError> {
        self.ensure_browsable()?;
        if self.current_index + 1 >= self.catalog.len() {
            return Err(FilterError::AtLastFilter);
        }
        self.current_index += 1;
        self.pending = Some(Overlay::new(self.current_index));
        Ok(())
    }

    pub fn previous_filter(&mut self) -> Result<(), FilterError> {
        self.ensure_browsable()?;
        if self.current_index == 0 {
            return Err(FilterError::AtFirstFilter);
        }
        self.current_index -= 1;
        self.pending = Some(Overlay::new(self.current_index));
        Ok(())
    }

    /// Jump straight to a catalog entry
    pub fn select_filter(&mut self, index: usize) -> Result<(), FilterError> {
        self.ensure_browsable()?;
        if index >= self.catalog.len() {
            return Err(FilterError::IndexOutOfRange {
                index,
                len: self.catalog.len(),
            });
        }
        self.current_index = index;
        self.pending = Some(Overlay::new(index));
        Ok(())
    }

    /// Commit the pending overlay
    pub fn apply_filter(&mut self) -> Result<ApplyOutcome, FilterError> {
        if self.applied.is_full() {
            return Err(FilterError::LimitReached);
        }
        self.ensure_browsable()?;
        let overlay = self.pending.ok_or(FilterError::NoPendingOverlay)?;

        self.applied.push(overlay)?;
        info!(
            index = overlay.filter_index,
            applied = self.applied.len(),
            "Filter applied"
        );

        if self.applied.is_full() {
            self.can_add_filter = false;
            self.pending = None;
            self.status = Some(SessionStatus::FilterLimitReached);
            info!("Filter limit reached");
            return Ok(ApplyOutcome::LimitReached);
        }

        self.pending = Some(Overlay::new(self.current_index));
        Ok(ApplyOutcome::Applied {
            count: self.applied.len(),
        })
    }

    fn edit_pending(&mut self, edit: impl FnOnce(&mut Overlay, i32)) -> Result<(), FilterError> {
        let step = self.step;
        let overlay = self.pending.as_mut().ok_or(FilterError::NoPendingOverlay)?;
        edit(overlay, step);
        Ok(())
    }

    pub fn move_up(&mut self) -> Result<(), FilterError> {
        self.edit_pending(Overlay::move_up)
    }

    pub fn move_down(&mut self) -> Result<(), FilterError> {
        self.edit_pending(Overlay::move_down)
    }

    pub fn move_left(&mut self) -> Result<(), FilterError> {
        self.edit_pending(Overlay::move_left)
    }

    pub fn move_right(&mut self) -> Result<(), FilterError> {
        self.edit_pending(Overlay::move_right)
    }

    pub fn scale_up(&mut self) -> Result<(), FilterError> {
        self.edit_pending(Overlay::scale_up)
    }

    pub fn scale_down(&mut self) -> Result<(), FilterError> {
        self.edit_pending(Overlay::scale_down)
    }

    pub fn rotate_left(&mut self) -> Result<(), FilterError> {
        self.edit_pending(|overlay, _| overlay.rotate_left())
    }

    pub fn rotate_right(&mut self) -> Result<(), FilterError> {
        self.edit_pending(|overlay, _| overlay.rotate_right())
    }

    /// Freeze `frame` as the photo; overlays stay editable on top of it
    pub fn capture(&mut self, frame: RgbaImage) {
        info!(width = frame.width(), height = frame.height(), "Photo captured");
        self.captured = Some(frame);
        self.can_add_filter = !self.applied.is_full();
    }

    /// Flatten the photo for saving
    ///
    /// Locks filters and drops the pending overlay. The flattened image
    /// becomes the new base and the applied stack is cleared.
    pub fn save(&mut self) -> Result<RgbaImage, PhotoError> {
        let base = self.captured.as_ref().ok_or(PhotoError::NotCaptured)?;

        let flattened = compositor::flatten(base, self.applied.iter(), &self.catalog);
        self.can_add_filter = false;
        self.pending = None;
        self.applied.clear();
        self.captured = Some(flattened.clone());
        info!("Photo flattened for saving");
        Ok(flattened)
    }

    /// Back to a clean live session
    pub fn reset(&mut self) {
        self.pending = None;
        self.current_index = 0;
        self.captured = None;
        self.applied.clear();
        self.status = None;
        self.can_add_filter = !self.catalog.is_empty();
        debug!("Session reset");
    }

    /// Captured photo with the applied overlays drawn on it
    pub fn flattened(&self) -> Option<RgbaImage> {
        self.captured
            .as_ref()
            .map(|base| compositor::flatten(base, self.applied.iter(), &self.catalog))
    }

    /// Layers to draw over the current base: applied first, then pending
    pub fn scene(&self) -> impl Iterator<Item = &Overlay> {
        self.applied.iter().chain(self.pending.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::MAX_APPLIED_OVERLAYS;
    use crate::filters::FilterAsset;
    use image::Rgba;
    use std::path::PathBuf;

    fn session_with(count: usize) -> BoothSession {
        let assets = (0..count)
            .map(|i| FilterAsset {
                name: format!("f{i}"),
                path: PathBuf::from(format!("f{i}.png")),
                image: Arc::new(RgbaImage::from_pixel(2, 2, Rgba([255, 255, 255, 255]))),
            })
            .collect();
        BoothSession::new(Arc::new(FilterCatalog::from_assets(assets)))
    }

    #[test]
    fn test_show_filters_starts_at_first() {
        let mut session = session_with(3);
        session.show_filters().unwrap();
        assert_eq!(session.pending(), Some(&Overlay::new(0)));
    }

    #[test]
    fn test_show_filters_resets_placement() {
        let mut session = session_with(1);
        session.show_filters().unwrap();
        session.move_up().unwrap();
        session.show_filters().unwrap();
        assert_eq!(session.pending(), Some(&Overlay::new(0)));
        assert_eq!(session.scene().count(), 1);
    }

    #[test]
    fn test_empty_catalog_refuses_everything() {
        let mut session = session_with(0);
        assert!(!session.can_add_filter());
        assert_eq!(session.show_filters(), Err(FilterError::NoFilters));
        assert_eq!(session.next_filter(), Err(FilterError::NoFilters));
        assert_eq!(session.apply_filter(), Err(FilterError::NoFilters));
    }

    #[test]
    fn test_cycling_stops_at_ends() {
        let mut session = session_with(2);
        assert_eq!(session.previous_filter(), Err(FilterError::AtFirstFilter));
        session.next_filter().unwrap();
        assert_eq!(session.current_index(), 1);
        assert_eq!(session.pending().map(|o| o.filter_index), Some(1));
        assert_eq!(session.next_filter(), Err(FilterError::AtLastFilter));
        session.previous_filter().unwrap();
        assert_eq!(session.current_index(), 0);
    }

    #[test]
    fn test_adjustments_need_pending_overlay() {
        let mut session = session_with(1);
        assert_eq!(session.move_left(), Err(FilterError::NoPendingOverlay));
        assert_eq!(session.rotate_right(), Err(FilterError::NoPendingOverlay));
    }

    #[test]
    fn test_step_is_configurable() {
        let mut session = session_with(1);
        session.set_step(12);
        session.show_filters().unwrap();
        session.scale_up().unwrap();
        assert_eq!(session.pending().map(|o| o.margin.left), Some(-12));
    }

    #[test]
    fn test_oversized_step_is_clamped() {
        let mut session = session_with(1);
        session.set_step(i32::MAX);
        session.show_filters().unwrap();
        session.scale_down().unwrap();
        session.scale_down().unwrap();
        let margin = session.pending().map(|o| o.margin).unwrap();
        assert_eq!(margin.left, 2 * MAX_OVERLAY_STEP);
        assert_eq!(margin.right, 2 * MAX_OVERLAY_STEP);
        assert_eq!(margin.top, 0);
    }

    #[test]
    fn test_fifth_apply_locks_and_sixth_is_rejected() {
        let mut session = session_with(2);
        session.show_filters().unwrap();
        for expected in 1..MAX_APPLIED_OVERLAYS {
            assert_eq!(
                session.apply_filter(),
                Ok(ApplyOutcome::Applied { count: expected })
            );
        }
        assert_eq!(session.apply_filter(), Ok(ApplyOutcome::LimitReached));
        assert!(!session.can_add_filter());
        assert!(session.pending().is_none());
        assert_eq!(session.take_status(), Some(SessionStatus::FilterLimitReached));
        assert_eq!(session.take_status(), None);

        assert_eq!(session.apply_filter(), Err(FilterError::LimitReached));
        assert_eq!(session.applied().len(), MAX_APPLIED_OVERLAYS);
    }

    #[test]
    fn test_save_requires_capture() {
        let mut session = session_with(1);
        assert!(matches!(session.save(), Err(PhotoError::NotCaptured)));
        assert!(session.flattened().is_none());
    }

    #[test]
    fn test_save_flattens_and_locks() {
        let mut session = session_with(1);
        session.capture(RgbaImage::from_pixel(4, 4, Rgba([0, 0, 0, 255])));
        session.show_filters().unwrap();
        session.apply_filter().unwrap();

        let saved = session.save().unwrap();
        assert_eq!(saved.get_pixel(1, 1), &Rgba([255, 255, 255, 255]));
        assert!(!session.can_add_filter());
        assert!(session.pending().is_none());
        assert!(session.applied().is_empty());
        assert_eq!(session.captured(), Some(&saved));
        assert_eq!(session.show_filters(), Err(FilterError::Locked));
        assert_eq!(session.next_filter(), Err(FilterError::Locked));
        assert_eq!(session.previous_filter(), Err(FilterError::Locked));
    }

    #[test]
    fn test_reset_unlocks_filters() {
        let mut session = session_with(1);
        session.capture(RgbaImage::new(2, 2));
        session.save().unwrap();
        session.reset();
        assert!(!session.is_captured());
        assert!(session.can_add_filter());
        assert_eq!(session.current_index(), 0);
        session.show_filters().unwrap();
    }

    #[test]
    fn test_scene_orders_applied_before_pending() {
        let mut session = session_with(2);
        session.show_filters().unwrap();
        session.apply_filter().unwrap();
        session.next_filter().unwrap();
        let order: Vec<usize> = session.scene().map(|o| o.filter_index).collect();
        assert_eq!(order, vec![0, 1]);
    }
}
