// SPDX-License-Identifier: GPL-3.0-only

//! System and settings handlers
//!
//! Handles URLs, context pages, configuration changes, folders and the
//! status line.

use crate::app::state::{AppModel, ContextPage, Message};
use crate::config::{AppTheme, Config};
use crate::constants::{COUNTDOWN_CHOICES, timing};
use crate::storage;
use cosmic::Task;
use cosmic::cosmic_config::CosmicConfigEntry;
use std::path::Path;
use tracing::{error, info, warn};

impl AppModel {
    // =========================================================================
    // UI Navigation
    // =========================================================================

    pub(crate) fn handle_launch_url(&mut self, url: String) -> Task<cosmic::Action<Message>> {
        if let Err(err) = open::that_detached(&url) {
            error!(?err, %url, "Failed to open URL");
        }
        Task::none()
    }

    pub(crate) fn handle_toggle_context_page(
        &mut self,
        context_page: ContextPage,
    ) -> Task<cosmic::Action<Message>> {
        if self.context_page == context_page {
            self.core.window.show_context = !self.core.window.show_context;
        } else {
            self.context_page = context_page;
            self.core.window.show_context = true;
        }
        Task::none()
    }

    // =========================================================================
    // Configuration
    // =========================================================================

    pub(crate) fn handle_update_config(&mut self, config: Config) -> Task<cosmic::Action<Message>> {
        info!("UpdateConfig received");
        let folder_changed = config.filters_folder != self.config.filters_folder;
        let theme_changed = config.app_theme != self.config.app_theme;
        let mirror_changed = config.mirror_preview != self.config.mirror_preview;

        self.config = config;
        self.session.set_step(self.config.effective_overlay_step());

        let mut tasks = Vec::new();
        if folder_changed {
            tasks.push(self.handle_reload_filters());
        }
        if theme_changed {
            tasks.push(cosmic::command::set_theme(self.config.app_theme.theme()));
        }
        if mirror_changed {
            self.refresh_preview();
        }
        Task::batch(tasks)
    }

    /// Persist the current configuration
    pub(crate) fn save_config(&self) {
        if let Some(handler) = self.config_handler.as_ref()
            && let Err(err) = self.config.write_entry(handler)
        {
            error!(?err, "Failed to save configuration");
        }
    }

    pub(crate) fn handle_set_app_theme(&mut self, index: usize) -> Task<cosmic::Action<Message>> {
        let Some(&app_theme) = AppTheme::ALL.get(index) else {
            return Task::none();
        };

        info!(?app_theme, "Setting application theme");
        self.config.app_theme = app_theme;
        self.save_config();

        cosmic::command::set_theme(app_theme.theme())
    }

    pub(crate) fn handle_select_countdown(&mut self, index: usize) -> Task<cosmic::Action<Message>> {
        let Some(&seconds) = COUNTDOWN_CHOICES.get(index) else {
            return Task::none();
        };

        info!(seconds, "Countdown changed");
        self.config.countdown_seconds = seconds;
        self.save_config();
        Task::none()
    }

    pub(crate) fn handle_toggle_mirror_preview(&mut self) -> Task<cosmic::Action<Message>> {
        self.config.mirror_preview = !self.config.mirror_preview;
        info!(enabled = self.config.mirror_preview, "Mirror preview toggled");
        self.save_config();
        self.refresh_preview();
        Task::none()
    }

    // =========================================================================
    // Folders
    // =========================================================================

    pub(crate) fn handle_open_filters_folder(&mut self) -> Task<cosmic::Action<Message>> {
        let folder = self.filters_folder.clone();
        Self::open_folder_task(folder)
    }

    pub(crate) fn handle_open_output_folder(&mut self) -> Task<cosmic::Action<Message>> {
        Self::open_folder_task(storage::output_directory())
    }

    /// Create `folder` if needed, then hand it to the file manager
    fn open_folder_task(folder: std::path::PathBuf) -> Task<cosmic::Action<Message>> {
        Task::future(async move {
            if let Err(e) = storage::ensure_directory(&folder).await {
                warn!(error = %e, folder = %folder.display(), "Cannot create folder");
                return;
            }
            open_path(&folder);
        })
        .discard()
    }

    // =========================================================================
    // Status line
    // =========================================================================

    /// Show `text` on the preview for a few seconds
    pub(crate) fn show_status(&mut self, text: String) -> Task<cosmic::Action<Message>> {
        self.status_generation = self.status_generation.wrapping_add(1);
        let id = self.status_generation;
        info!(status = %text, "Status");
        self.status = Some((text, id));
        Self::delay_task(timing::STATUS_DISPLAY, Message::ClearStatus(id))
    }

    pub(crate) fn handle_clear_status(&mut self, id: u64) -> Task<cosmic::Action<Message>> {
        if self.status.as_ref().is_some_and(|(_, current)| *current == id) {
            self.status = None;
        }
        Task::none()
    }
}

fn open_path(path: &Path) {
    if let Err(err) = open::that_detached(path) {
        error!(?err, path = %path.display(), "Failed to open folder");
    }
}
