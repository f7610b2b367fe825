// SPDX-License-Identifier: MPL-2.0

//! Main application module
//!
//! - `state`: application state (`AppModel`, `Message`, `ContextPage`)
//! - `update`: message dispatcher
//! - `handlers`: message handlers grouped by concern
//! - `view`: preview, status line and booth controls
//! - `controls`: capture button and overlay adjustment buttons
//! - `filter_picker`: filter grid in the context drawer
//! - `settings`: settings drawer

mod controls;
mod filter_picker;
mod handlers;
pub mod settings;
mod state;
mod update;
mod view;

use crate::backends::camera::{self, CameraFormat};
use crate::config::Config;
use crate::constants::pipeline;
use crate::countdown::CountdownTimer;
use crate::filters::FilterCatalog;
use crate::fl;
use crate::overlay::Compositor;
use crate::session::BoothSession;
use cosmic::app::context_drawer;
use cosmic::iced::Subscription;
use cosmic::widget::{self, about::About};
use cosmic::{Element, Task};
pub use state::{AppModel, ContextPage, Message, OverlayAdjustment};
use std::sync::Arc;
use tracing::{error, info, warn};

/// Application id, also the config namespace
pub const APP_ID: &str = "io.github.pictureastate.PictureAState";
const REPOSITORY: &str = "https://github.com/picture-a-state/picture-a-state";
const APP_ICON: &[u8] = include_bytes!(
    "../../resources/icons/hicolor/scalable/apps/io.github.pictureastate.PictureAState.svg"
);

impl cosmic::Application for AppModel {
    /// The async executor that will be used to run your application's commands.
    type Executor = cosmic::executor::Default;

    /// Data that your application receives to its init method.
    type Flags = ();

    /// Messages which the application and its widgets will emit.
    type Message = Message;

    /// Unique identifier in RDNN (reverse domain name notation) format.
    const APP_ID: &'static str = APP_ID;

    fn core(&self) -> &cosmic::Core {
        &self.core
    }

    fn core_mut(&mut self) -> &mut cosmic::Core {
        &mut self.core
    }

    /// Initializes the application with any given flags and startup commands.
    fn init(
        core: cosmic::Core,
        _flags: Self::Flags,
    ) -> (Self, Task<cosmic::Action<Self::Message>>) {
        let about = About::default()
            .name(fl!("app-title"))
            .icon(widget::icon::from_svg_bytes(APP_ICON))
            .version(env!("GIT_VERSION"))
            .links([(fl!("repository"), REPOSITORY)])
            .license(env!("CARGO_PKG_LICENSE"));

        let (config_handler, config) = Config::load(Self::APP_ID);

        // GStreamer must be initialized before any pipeline is built
        if let Err(e) = gstreamer::init() {
            error!(error = %e, "Failed to initialize GStreamer");
        }

        let mut session = BoothSession::new(Arc::new(FilterCatalog::default()));
        session.set_step(config.effective_overlay_step());

        let filters_folder = crate::storage::filters_directory(config.filters_folder.as_deref());

        let app = AppModel {
            core,
            context_page: ContextPage::default(),
            about,
            theme_dropdown_options: vec![
                fl!("theme-system"),
                fl!("theme-dark"),
                fl!("theme-light"),
            ],
            countdown_dropdown_options: Self::countdown_options(),
            config,
            config_handler,
            session,
            compositor: Compositor::new(),
            filters_folder: filters_folder.clone(),
            filter_thumbnails: Vec::new(),
            preview: None,
            status: None,
            status_generation: 0,
            available_cameras: Vec::new(),
            camera_dropdown_options: Vec::new(),
            current_camera_index: 0,
            camera_active: false,
            camera_generation: 0,
            current_frame: None,
            inhibit_cookie: None,
            countdown: CountdownTimer::new(),
            is_saving: false,
            is_printing: false,
            last_saved_path: None,
        };

        let last_camera_path = app.config.last_camera_path.clone();
        let cameras_task = Task::perform(
            async move {
                info!("Enumerating cameras asynchronously");
                let cameras = tokio::task::spawn_blocking(|| camera::get_backend().enumerate_cameras())
                    .await
                    .unwrap_or_else(|e| {
                        warn!(error = %e, "Camera enumeration task failed");
                        vec![camera::CameraDevice::default_camera()]
                    });

                let index = last_camera_path
                    .as_ref()
                    .and_then(|last| cameras.iter().position(|cam| &cam.path == last))
                    .unwrap_or(0);
                (cameras, index)
            },
            |(cameras, index)| cosmic::Action::App(Message::CamerasInitialized(cameras, index)),
        );

        let filters_task = Self::load_filters_task(filters_folder);
        let theme_task = cosmic::command::set_theme(app.config.app_theme.theme());

        (app, Task::batch([cameras_task, filters_task, theme_task]))
    }

    /// Elements to pack at the end of the header bar.
    fn header_end(&self) -> Vec<Element<'_, Self::Message>> {
        vec![
            widget::button::icon(widget::icon::from_name("view-grid-symbolic"))
                .on_press(Message::ToggleContextPage(ContextPage::Filters))
                .into(),
            widget::button::icon(widget::icon::from_name("preferences-system-symbolic"))
                .on_press(Message::ToggleContextPage(ContextPage::Settings))
                .into(),
            widget::button::icon(widget::icon::from_name("help-about-symbolic"))
                .on_press(Message::ToggleContextPage(ContextPage::About))
                .into(),
        ]
    }

    /// Display a context drawer if the context page is requested.
    fn context_drawer(&self) -> Option<context_drawer::ContextDrawer<'_, Self::Message>> {
        if !self.core.window.show_context {
            return None;
        }

        Some(match self.context_page {
            ContextPage::About => context_drawer::about(
                &self.about,
                |url| Message::LaunchUrl(url.to_string()),
                Message::ToggleContextPage(ContextPage::About),
            ),
            ContextPage::Settings => self.settings_view(),
            ContextPage::Filters => self.filters_view(),
        })
    }

    /// Describes the interface based on the current state of the application model.
    fn view(&self) -> Element<'_, Self::Message> {
        self.view()
    }

    /// Register subscriptions for this application.
    fn subscription(&self) -> Subscription<Self::Message> {
        use cosmic::iced::futures::{SinkExt, StreamExt};

        let config_sub = self
            .core()
            .watch_config::<Config>(Self::APP_ID)
            .map(|update| Message::UpdateConfig(update.config));

        let device = self
            .available_cameras
            .get(self.current_camera_index)
            .cloned();

        // The pipeline lives inside the subscription: it starts when the
        // camera is switched on and is dropped with the subscription.
        let camera_sub = match (self.camera_active, device) {
            (true, Some(device)) => Subscription::run_with_id(
                ("camera", self.camera_generation),
                cosmic::iced::stream::channel(
                    pipeline::FRAME_CHANNEL_CAPACITY,
                    move |mut output| async move {
                        info!(name = %device.name, path = %device.path, "Camera subscription started");

                        let backend = camera::get_backend();
                        let (sender, mut receiver) = camera::frame_channel();
                        let pipeline =
                            match backend.start_preview(&device, &CameraFormat::default(), sender) {
                                Ok(pipeline) => pipeline,
                                Err(e) => {
                                    error!(error = %e, "Failed to initialize pipeline");
                                    let _ = output.send(Message::CameraFailed(e.to_string())).await;
                                    return;
                                }
                            };

                        while let Some(frame) = receiver.next().await {
                            // Dropping frames is fine for live preview
                            if let Err(e) = output.try_send(Message::CameraFrame(Arc::new(frame)))
                                && e.is_disconnected()
                            {
                                break;
                            }
                        }

                        info!("Camera subscription finished");
                        drop(pipeline);
                    },
                ),
            ),
            _ => Subscription::none(),
        };

        Subscription::batch([config_sub, camera_sub])
    }

    /// Handles messages emitted by the application and its widgets.
    fn update(&mut self, message: Self::Message) -> Task<cosmic::Action<Self::Message>> {
        self.update(message)
    }
}

impl AppModel {
    /// Decode the filter folder in the background
    pub(crate) fn load_filters_task(
        folder: std::path::PathBuf,
    ) -> Task<cosmic::Action<Message>> {
        Task::perform(
            async move {
                let catalog = FilterCatalog::load_async(folder.clone()).await;
                (folder, Arc::new(catalog))
            },
            |(folder, catalog)| cosmic::Action::App(Message::FiltersLoaded(folder, catalog)),
        )
    }

    fn countdown_options() -> Vec<String> {
        crate::constants::COUNTDOWN_CHOICES
            .iter()
            .map(|&seconds| {
                if seconds == 0 {
                    fl!("countdown-off")
                } else {
                    fl!("countdown-seconds", seconds = seconds)
                }
            })
            .collect()
    }
}
