// SPDX-License-Identifier: GPL-3.0-only

//! Filter and overlay handlers
//!
//! Session failures are expected user input (pressing "next" on the last
//! filter, editing without a pending overlay) and are only logged.

use crate::app::state::{AppModel, Message, OverlayAdjustment};
use crate::errors::FilterError;
use crate::filters::FilterCatalog;
use crate::fl;
use crate::session::{ApplyOutcome, SessionStatus};
use cosmic::Task;
use cosmic::widget::image::Handle;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info, warn};

impl AppModel {
    pub(crate) fn handle_filters_loaded(
        &mut self,
        folder: PathBuf,
        catalog: Arc<FilterCatalog>,
    ) -> Task<cosmic::Action<Message>> {
        info!(folder = %folder.display(), count = catalog.len(), "Filters loaded");

        self.filter_thumbnails = catalog
            .iter()
            .map(|asset| {
                let (width, height) = asset.image.dimensions();
                Handle::from_rgba(width, height, asset.image.as_raw().clone())
            })
            .collect();
        self.filters_folder = folder;
        self.compositor.clear();
        self.session.set_catalog(catalog);
        self.refresh_preview();
        Task::none()
    }

    pub(crate) fn handle_reload_filters(&mut self) -> Task<cosmic::Action<Message>> {
        let folder = crate::storage::filters_directory(self.config.filters_folder.as_deref());
        info!(folder = %folder.display(), "Reloading filters");
        Self::load_filters_task(folder)
    }

    pub(crate) fn handle_show_filters(&mut self) -> Task<cosmic::Action<Message>> {
        let result = self.session.show_filters();
        self.after_filter_change("show filters", result)
    }

    pub(crate) fn handle_next_filter(&mut self) -> Task<cosmic::Action<Message>> {
        let result = self.session.next_filter();
        self.after_filter_change("next filter", result)
    }

    pub(crate) fn handle_previous_filter(&mut self) -> Task<cosmic::Action<Message>> {
        let result = self.session.previous_filter();
        self.after_filter_change("previous filter", result)
    }

    pub(crate) fn handle_select_filter(&mut self, index: usize) -> Task<cosmic::Action<Message>> {
        let result = self.session.select_filter(index);
        self.after_filter_change("select filter", result)
    }

    pub(crate) fn handle_apply_filter(&mut self) -> Task<cosmic::Action<Message>> {
        match self.session.apply_filter() {
            Ok(ApplyOutcome::Applied { count }) => {
                info!(count, "Filter applied");
            }
            Ok(ApplyOutcome::LimitReached) => {
                info!("Filter applied, limit reached");
            }
            Err(e) => {
                warn!(error = %e, "Cannot apply filter");
            }
        }

        self.refresh_preview();

        match self.session.take_status() {
            Some(SessionStatus::FilterLimitReached) => {
                self.show_status(fl!("filter-limit-reached"))
            }
            None => Task::none(),
        }
    }

    pub(crate) fn handle_adjust_overlay(
        &mut self,
        adjustment: OverlayAdjustment,
    ) -> Task<cosmic::Action<Message>> {
        let result = match adjustment {
            OverlayAdjustment::MoveUp => self.session.move_up(),
            OverlayAdjustment::MoveDown => self.session.move_down(),
            OverlayAdjustment::MoveLeft => self.session.move_left(),
            OverlayAdjustment::MoveRight => self.session.move_right(),
            OverlayAdjustment::ScaleUp => self.session.scale_up(),
            OverlayAdjustment::ScaleDown => self.session.scale_down(),
            OverlayAdjustment::RotateLeft => self.session.rotate_left(),
            OverlayAdjustment::RotateRight => self.session.rotate_right(),
        };

        match result {
            Ok(()) => {
                debug!(?adjustment, pending = ?self.session.pending(), "Overlay adjusted");
                self.refresh_preview();
            }
            Err(e) => debug!(?adjustment, error = %e, "Overlay not adjusted"),
        }
        Task::none()
    }

    fn after_filter_change(
        &mut self,
        action: &str,
        result: Result<(), FilterError>,
    ) -> Task<cosmic::Action<Message>> {
        match result {
            Ok(()) => {
                debug!(action, index = self.session.current_index(), "Filter shown");
                self.refresh_preview();
            }
            Err(e) => debug!(action, error = %e, "Filter unchanged"),
        }
        Task::none()
    }
}
