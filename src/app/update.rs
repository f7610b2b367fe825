// SPDX-License-Identifier: GPL-3.0-only

//! Message update handling
//!
//! This module handles all application messages by routing them to focused handler methods.
//! The main `update()` function acts as a dispatcher, while specific handlers are implemented
//! in the `handlers` submodules organized by functional domain.
//!
//! # Handler Modules
//!
//! - `handlers::camera`: Camera selection, start/stop, frames, keep-awake
//! - `handlers::filters`: Filter catalog and the pending overlay
//! - `handlers::capture`: Countdown, snapshot and save
//! - `handlers::print`: Print submission
//! - `handlers::system`: URLs, context pages, settings, status line

use crate::app::state::{AppModel, Message};
use cosmic::Task;

impl AppModel {
    /// Main message handler - routes messages to appropriate handler methods.
    pub fn update(&mut self, message: Message) -> Task<cosmic::Action<Message>> {
        match message {
            // ===== UI Navigation =====
            Message::LaunchUrl(url) => self.handle_launch_url(url),
            Message::ToggleContextPage(page) => self.handle_toggle_context_page(page),
            Message::UpdateConfig(config) => self.handle_update_config(config),
            Message::ClearStatus(id) => self.handle_clear_status(id),

            // ===== Startup =====
            Message::CamerasInitialized(cameras, index) => {
                self.handle_cameras_initialized(cameras, index)
            }
            Message::FiltersLoaded(folder, catalog) => self.handle_filters_loaded(folder, catalog),
            Message::ReloadFilters => self.handle_reload_filters(),

            // ===== Camera Control =====
            Message::SelectCamera(index) => self.handle_select_camera(index),
            Message::StartCamera => self.handle_start_camera(),
            Message::StopCamera => self.handle_stop_camera(),
            Message::CameraFrame(frame) => self.handle_camera_frame(frame),
            Message::CameraFailed(error) => self.handle_camera_failed(error),
            Message::InhibitAcquired(result) => self.handle_inhibit_acquired(result),
            Message::InhibitReleased(result) => self.handle_inhibit_released(result),

            // ===== Filters =====
            Message::ShowFilters => self.handle_show_filters(),
            Message::NextFilter => self.handle_next_filter(),
            Message::PreviousFilter => self.handle_previous_filter(),
            Message::SelectFilter(index) => self.handle_select_filter(index),
            Message::ApplyFilter => self.handle_apply_filter(),
            Message::AdjustOverlay(adjustment) => self.handle_adjust_overlay(adjustment),

            // ===== Capture =====
            Message::Capture => self.handle_capture(),
            Message::CountdownTick(id) => self.handle_countdown_tick(id),
            Message::SavePhoto => self.handle_save_photo(),
            Message::PhotoSaved(result) => self.handle_photo_saved(result),
            Message::PrintPhoto => self.handle_print_photo(),
            Message::PrintFinished(completion) => self.handle_print_finished(completion),

            // ===== Settings =====
            Message::SelectTheme(index) => self.handle_set_app_theme(index),
            Message::SelectCountdown(index) => self.handle_select_countdown(index),
            Message::ToggleMirrorPreview => self.handle_toggle_mirror_preview(),
            Message::OpenFiltersFolder => self.handle_open_filters_folder(),
            Message::OpenOutputFolder => self.handle_open_output_folder(),
        }
    }
}
