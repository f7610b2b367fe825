// SPDX-License-Identifier: MPL-2.0

//! Settings drawer view

use crate::app::state::{AppModel, ContextPage, Message};
use crate::config::AppTheme;
use crate::constants::{COUNTDOWN_CHOICES, app_info};
use crate::fl;
use crate::storage;
use cosmic::Element;
use cosmic::app::context_drawer;
use cosmic::iced::{Alignment, Length};
use cosmic::widget;

impl AppModel {
    /// Create the settings view for the context drawer
    pub fn settings_view(&self) -> context_drawer::ContextDrawer<'_, Message> {
        let spacing = cosmic::theme::spacing();

        let camera_dropdown = widget::dropdown(
            &self.camera_dropdown_options,
            Some(self.current_camera_index),
            Message::SelectCamera,
        );

        let current_theme_index = AppTheme::ALL
            .iter()
            .position(|t| *t == self.config.app_theme)
            .unwrap_or(0);
        let theme_dropdown = widget::dropdown(
            &self.theme_dropdown_options,
            Some(current_theme_index),
            Message::SelectTheme,
        );

        // Unknown values (hand-edited config) show no selection
        let current_countdown_index = COUNTDOWN_CHOICES
            .iter()
            .position(|s| *s == self.config.countdown_seconds);
        let countdown_dropdown = widget::dropdown(
            &self.countdown_dropdown_options,
            current_countdown_index,
            Message::SelectCountdown,
        );

        let mirror_toggle =
            widget::toggler(self.config.mirror_preview).on_toggle(|_| Message::ToggleMirrorPreview);

        let filters_row = widget::row()
            .push(widget::button::standard(fl!("open-folder")).on_press(Message::OpenFiltersFolder))
            .push(widget::horizontal_space().width(spacing.space_xs))
            .push(widget::button::standard(fl!("reload-filters")).on_press(Message::ReloadFilters));

        let output_row = widget::row().push(
            widget::button::standard(fl!("open-folder")).on_press(Message::OpenOutputFolder),
        );

        let last_saved = self
            .last_saved_path
            .as_ref()
            .map(|path| fl!("last-saved", path = path.display().to_string()))
            .unwrap_or_else(|| fl!("nothing-saved"));

        let version_info = if app_info::is_flatpak() {
            format!("{} {} (Flatpak)", fl!("version"), app_info::version())
        } else {
            format!("{} {}", fl!("version"), app_info::version())
        };

        let settings_column: Element<'_, Message> = widget::column()
            .push(Self::settings_heading(fl!("camera")))
            .push(widget::vertical_space().height(spacing.space_xxs))
            .push(camera_dropdown)
            .push(widget::vertical_space().height(spacing.space_s))
            .push(
                widget::row()
                    .push(Self::settings_heading(fl!("mirror-preview")))
                    .push(widget::horizontal_space().width(Length::Fill))
                    .push(mirror_toggle)
                    .align_y(Alignment::Center),
            )
            .push(widget::vertical_space().height(spacing.space_s))
            .push(Self::settings_heading(fl!("countdown")))
            .push(widget::vertical_space().height(spacing.space_xxs))
            .push(countdown_dropdown)
            .push(widget::vertical_space().height(spacing.space_l))
            .push(widget::divider::horizontal::default())
            .push(widget::vertical_space().height(spacing.space_s))
            .push(Self::settings_heading(fl!("appearance")))
            .push(widget::vertical_space().height(spacing.space_xxs))
            .push(theme_dropdown)
            .push(widget::vertical_space().height(spacing.space_l))
            .push(widget::divider::horizontal::default())
            .push(widget::vertical_space().height(spacing.space_s))
            .push(Self::settings_heading(fl!("filters-folder")))
            .push(widget::vertical_space().height(spacing.space_xxs))
            .push(widget::text(self.filters_folder.display().to_string()).size(12))
            .push(widget::vertical_space().height(spacing.space_xxs))
            .push(filters_row)
            .push(widget::vertical_space().height(spacing.space_s))
            .push(Self::settings_heading(fl!("photos-folder")))
            .push(widget::vertical_space().height(spacing.space_xxs))
            .push(widget::text(storage::output_directory().display().to_string()).size(12))
            .push(widget::text(last_saved).size(12))
            .push(widget::vertical_space().height(spacing.space_xxs))
            .push(output_row)
            .push(widget::vertical_space().height(spacing.space_s))
            .push(Self::settings_heading(fl!("printer")))
            .push(widget::vertical_space().height(spacing.space_xxs))
            .push(widget::text(self.config.print_command.as_str()).size(12))
            .push(widget::vertical_space().height(spacing.space_l))
            .push(widget::divider::horizontal::default())
            .push(widget::vertical_space().height(spacing.space_s))
            .push(
                widget::text(version_info)
                    .size(12)
                    .class(cosmic::theme::Text::Accent),
            )
            .spacing(0)
            .into();

        context_drawer::context_drawer(
            settings_column,
            Message::ToggleContextPage(ContextPage::Settings),
        )
        .title(fl!("settings"))
    }

    fn settings_heading<'a>(label: String) -> Element<'a, Message> {
        widget::text(label).size(16).font(cosmic::font::bold()).into()
    }
}
