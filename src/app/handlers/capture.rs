// SPDX-License-Identifier: GPL-3.0-only

//! Capture operations handlers
//!
//! Handles the countdown, the snapshot and saving the flattened photo.

use crate::app::state::{AppModel, Message};
use crate::countdown::CountdownAction;
use crate::pipelines::photo::{frame_to_image, save_photo};
use crate::storage;
use cosmic::Task;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{error, info, warn};

impl AppModel {
    // =========================================================================
    // Helpers
    // =========================================================================

    /// Create a delayed task that sends a message after `delay`
    pub(crate) fn delay_task(delay: Duration, message: Message) -> Task<cosmic::Action<Message>> {
        Task::perform(
            async move {
                tokio::time::sleep(delay).await;
                message
            },
            cosmic::Action::App,
        )
    }

    // =========================================================================
    // Countdown and snapshot
    // =========================================================================

    pub(crate) fn handle_capture(&mut self) -> Task<cosmic::Action<Message>> {
        if !self.countdown.is_running() && !self.capture_enabled() {
            warn!(
                camera_active = self.camera_active,
                has_frame = self.current_frame.is_some(),
                captured = self.session.is_captured(),
                "Capture ignored"
            );
            return Task::none();
        }

        let action = self.countdown.press(self.config.countdown_seconds);
        self.run_countdown_action(action)
    }

    pub(crate) fn handle_countdown_tick(&mut self, id: u64) -> Task<cosmic::Action<Message>> {
        let action = self.countdown.tick(id);
        self.run_countdown_action(action)
    }

    fn run_countdown_action(&mut self, action: CountdownAction) -> Task<cosmic::Action<Message>> {
        match action {
            CountdownAction::Schedule { id, delay } => {
                Self::delay_task(delay, Message::CountdownTick(id))
            }
            CountdownAction::Capture => self.take_snapshot(),
            CountdownAction::Ignore => Task::none(),
        }
    }

    /// Freeze the current frame as the photo and release the camera
    fn take_snapshot(&mut self) -> Task<cosmic::Action<Message>> {
        let Some(frame) = self.current_frame.clone() else {
            warn!("No frame available for capture");
            return Task::none();
        };

        let image = match frame_to_image(&frame, self.config.mirror_preview) {
            Ok(image) => image,
            Err(e) => {
                error!(error = %e, "Failed to convert frame");
                return Task::none();
            }
        };

        self.session.capture(image);
        self.release_camera();
        self.refresh_preview();
        self.release_inhibit()
    }

    // =========================================================================
    // Save
    // =========================================================================

    pub(crate) fn handle_save_photo(&mut self) -> Task<cosmic::Action<Message>> {
        if self.is_saving {
            return Task::none();
        }

        let image = match self.session.save() {
            Ok(image) => image,
            Err(e) => {
                warn!(error = %e, "Nothing to save");
                return Task::none();
            }
        };

        self.compositor.clear();
        self.refresh_preview();
        self.is_saving = true;

        let output_dir = storage::output_directory();
        info!(dir = %output_dir.display(), "Saving photo");

        Task::perform(
            async move {
                save_photo(image, &output_dir)
                    .await
                    .map_err(|e| e.to_string())
            },
            |result| cosmic::Action::App(Message::PhotoSaved(result)),
        )
    }

    pub(crate) fn handle_photo_saved(
        &mut self,
        result: Result<PathBuf, String>,
    ) -> Task<cosmic::Action<Message>> {
        self.is_saving = false;
        match result {
            Ok(path) => {
                info!(path = %path.display(), "Photo saved");
                self.last_saved_path = Some(path);
            }
            Err(error) => error!(%error, "Failed to save photo"),
        }
        Task::none()
    }
}
