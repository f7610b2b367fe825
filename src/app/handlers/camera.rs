// SPDX-License-Identifier: GPL-3.0-only

//! Camera control handlers
//!
//! Handles camera selection, start/stop, frame processing, initialization
//! and the display keep-awake request that lives as long as the camera runs.

use crate::app::state::{AppModel, Message};
use crate::backends::camera::types::{CameraDevice, CameraFrame};
use crate::constants::timing;
use crate::inhibit;
use crate::pipelines::photo::frame_to_image;
use cosmic::Task;
use cosmic::widget::image::Handle;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

impl AppModel {
    // =========================================================================
    // Camera Control Handlers
    // =========================================================================

    pub(crate) fn handle_cameras_initialized(
        &mut self,
        cameras: Vec<CameraDevice>,
        index: usize,
    ) -> Task<cosmic::Action<Message>> {
        info!(count = cameras.len(), index, "Cameras initialized");

        self.camera_dropdown_options = cameras.iter().map(|cam| cam.name.clone()).collect();
        self.available_cameras = cameras;
        self.current_camera_index = index.min(self.available_cameras.len().saturating_sub(1));

        if self.available_cameras.is_empty() {
            warn!("No cameras found");
            return Task::none();
        }

        self.handle_start_camera()
    }

    pub(crate) fn handle_select_camera(&mut self, index: usize) -> Task<cosmic::Action<Message>> {
        let Some(camera) = self.available_cameras.get(index) else {
            warn!(index, "Camera index out of range");
            return Task::none();
        };
        info!(index, camera = %camera.name, "Selected camera");

        self.current_camera_index = index;
        self.config.last_camera_path = Some(camera.path.clone());
        self.save_config();

        if self.camera_active {
            // New generation restarts the preview subscription on the new device
            self.camera_generation = self.camera_generation.wrapping_add(1);
            self.current_frame = None;
            self.preview = None;
        }
        Task::none()
    }

    pub(crate) fn handle_start_camera(&mut self) -> Task<cosmic::Action<Message>> {
        if self.available_cameras.is_empty() {
            warn!("Start requested without any camera");
            return Task::none();
        }

        if self.session.is_captured() {
            self.session.reset();
            self.compositor.clear();
        }

        if self.camera_active {
            debug!("Camera already running");
            return Task::none();
        }

        self.camera_active = true;
        self.camera_generation = self.camera_generation.wrapping_add(1);
        self.current_frame = None;
        self.preview = None;
        info!(generation = self.camera_generation, "Starting camera");

        if self.inhibit_cookie.is_some() {
            return Task::none();
        }
        Task::perform(
            inhibit::inhibit(
                crate::fl!("app-title"),
                crate::fl!("inhibit-reason"),
            ),
            |result| cosmic::Action::App(Message::InhibitAcquired(result)),
        )
    }

    pub(crate) fn handle_stop_camera(&mut self) -> Task<cosmic::Action<Message>> {
        info!("Stopping camera");
        self.release_camera();
        self.refresh_preview();
        self.release_inhibit()
    }

    /// Drop the preview subscription (and with it the pipeline)
    pub(crate) fn release_camera(&mut self) {
        self.camera_active = false;
        self.current_frame = None;
        self.countdown.cancel();
    }

    pub(crate) fn release_inhibit(&mut self) -> Task<cosmic::Action<Message>> {
        match self.inhibit_cookie.take() {
            Some(cookie) => Task::perform(inhibit::uninhibit(cookie), |result| {
                cosmic::Action::App(Message::InhibitReleased(result))
            }),
            None => Task::none(),
        }
    }

    pub(crate) fn handle_camera_frame(
        &mut self,
        frame: Arc<CameraFrame>,
    ) -> Task<cosmic::Action<Message>> {
        static FRAME_MSG_COUNT: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(0);
        let count = FRAME_MSG_COUNT.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
        if count % timing::FRAME_LOG_INTERVAL == 0 {
            debug!(
                message = count,
                width = frame.width,
                height = frame.height,
                bytes = frame.data.len(),
                "CameraFrame message received in update()"
            );
        }

        // Late frames from a stopped pipeline or a frozen capture are ignored
        if !self.camera_active || self.session.is_captured() {
            return Task::none();
        }

        self.current_frame = Some(frame);
        self.refresh_preview();
        Task::none()
    }

    pub(crate) fn handle_camera_failed(&mut self, error: String) -> Task<cosmic::Action<Message>> {
        error!(%error, "Camera failed to start");
        self.release_camera();
        self.preview = None;
        self.release_inhibit()
    }

    pub(crate) fn handle_inhibit_acquired(
        &mut self,
        result: Result<u32, String>,
    ) -> Task<cosmic::Action<Message>> {
        match result {
            Ok(cookie) if !self.camera_active => {
                // Camera stopped while the request was in flight
                debug!(cookie, "Releasing late keep-awake request");
                Task::perform(inhibit::uninhibit(cookie), |result| {
                    cosmic::Action::App(Message::InhibitReleased(result))
                })
            }
            Ok(cookie) => {
                debug!(cookie, "Display keep-awake acquired");
                self.inhibit_cookie = Some(cookie);
                Task::none()
            }
            Err(error) => {
                warn!(%error, "Failed to keep the display awake");
                Task::none()
            }
        }
    }

    pub(crate) fn handle_inhibit_released(
        &mut self,
        result: Result<(), String>,
    ) -> Task<cosmic::Action<Message>> {
        if let Err(error) = result {
            warn!(%error, "Failed to release display keep-awake");
        }
        Task::none()
    }

    // =========================================================================
    // Preview
    // =========================================================================

    /// Rebuild the preview image from the captured photo or the latest frame
    pub(crate) fn refresh_preview(&mut self) {
        let live;
        let base = if let Some(captured) = self.session.captured() {
            captured
        } else if let Some(frame) = &self.current_frame {
            live = match frame_to_image(frame, self.config.mirror_preview) {
                Ok(image) => image,
                Err(e) => {
                    debug!(error = %e, "Skipping unusable frame");
                    return;
                }
            };
            &live
        } else {
            self.preview = None;
            return;
        };

        let composed = self
            .compositor
            .compose(base, self.session.scene(), self.session.catalog());
        let (width, height) = composed.dimensions();
        self.preview = Some(Handle::from_rgba(width, height, composed.into_raw()));
    }
}
