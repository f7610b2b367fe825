// SPDX-License-Identifier: GPL-3.0-only

//! Main application view
//!
//! This module composes the main UI:
//! - Preview (live composite or the captured photo) with countdown and status overlays
//! - Filter row (show, previous, next, apply)
//! - Overlay adjustment buttons (controls module)
//! - Bottom row with camera toggle, capture, save and print

use crate::app::state::{AppModel, Message};
use crate::constants::{MAX_APPLIED_OVERLAYS, ui};
use crate::fl;
use cosmic::Element;
use cosmic::iced::{Alignment, Background, Color, ContentFit, Length};
use cosmic::widget::{self, icon};

impl AppModel {
    /// Build the main application view
    pub fn view(&self) -> Element<'_, Message> {
        let spacing = cosmic::theme::spacing();

        let preview_stack = cosmic::iced::widget::stack![
            self.build_preview(),
            self.build_countdown_overlay(),
            self.build_status_overlay(),
        ]
        .width(Length::Fill)
        .height(Length::Fill);

        let preview_area = widget::container(preview_stack)
            .width(Length::Fill)
            .height(Length::Fill)
            .style(|_theme| widget::container::Style {
                background: Some(Background::Color(Color::BLACK)),
                ..Default::default()
            });

        let controls = widget::column()
            .push(self.build_filter_row())
            .push(widget::vertical_space().height(spacing.space_xxs))
            .push(
                widget::container(self.build_adjust_buttons())
                    .width(Length::Fill)
                    .center_x(Length::Fill),
            )
            .push(self.build_bottom_row())
            .padding([spacing.space_xs, spacing.space_s]);

        widget::column()
            .push(preview_area)
            .push(controls)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    /// Composited preview, or a hint when there is nothing to show
    fn build_preview(&self) -> Element<'_, Message> {
        match &self.preview {
            Some(handle) => widget::image::Image::new(handle.clone())
                .content_fit(ContentFit::Contain)
                .width(Length::Fill)
                .height(Length::Fill)
                .into(),
            None => {
                let hint = if self.camera_active {
                    fl!("camera-starting")
                } else {
                    fl!("camera-off")
                };
                widget::container(widget::text(hint).size(ui::STATUS_TEXT_SIZE))
                    .width(Length::Fill)
                    .height(Length::Fill)
                    .center(Length::Fill)
                    .into()
            }
        }
    }

    /// Large digit in the middle of the preview while counting down
    fn build_countdown_overlay(&self) -> Element<'_, Message> {
        let Some(digit) = self.countdown.displayed() else {
            return widget::Space::new(Length::Fill, Length::Fill).into();
        };

        let badge = widget::container(
            widget::text(digit.to_string())
                .size(ui::COUNTDOWN_TEXT_SIZE)
                .font(cosmic::font::bold()),
        )
        .padding([8, 32])
        .style(|_theme| widget::container::Style {
            background: Some(Background::Color(Color::from_rgba(
                0.0,
                0.0,
                0.0,
                ui::OVERLAY_BACKGROUND_ALPHA,
            ))),
            text_color: Some(Color::WHITE),
            border: cosmic::iced::Border {
                radius: [16.0; 4].into(),
                ..Default::default()
            },
            ..Default::default()
        });

        widget::container(badge)
            .width(Length::Fill)
            .height(Length::Fill)
            .center(Length::Fill)
            .into()
    }

    /// Status line pinned to the bottom of the preview
    fn build_status_overlay(&self) -> Element<'_, Message> {
        let Some((text, _)) = &self.status else {
            return widget::Space::new(Length::Fill, Length::Fill).into();
        };

        let label = widget::container(widget::text(text.as_str()).size(ui::STATUS_TEXT_SIZE))
            .padding([6, 16])
            .style(|_theme| widget::container::Style {
                background: Some(Background::Color(Color::from_rgba(
                    0.0,
                    0.0,
                    0.0,
                    ui::OVERLAY_BACKGROUND_ALPHA,
                ))),
                text_color: Some(Color::WHITE),
                border: cosmic::iced::Border {
                    radius: [8.0; 4].into(),
                    ..Default::default()
                },
                ..Default::default()
            });

        widget::container(label)
            .width(Length::Fill)
            .height(Length::Fill)
            .align_x(Alignment::Center)
            .align_y(Alignment::End)
            .padding(16)
            .into()
    }

    fn build_filter_row(&self) -> Element<'_, Message> {
        let spacing = cosmic::theme::spacing();
        let has_filters = !self.session.catalog().is_empty();
        let can_add = self.session.can_add_filter() && has_filters;
        let has_pending = self.session.pending().is_some();

        let show_button = widget::button::standard(fl!("show-filters"))
            .on_press_maybe(can_add.then_some(Message::ShowFilters));

        let previous_button = widget::button::icon(icon::from_name("go-previous-symbolic"))
            .on_press_maybe(can_add.then_some(Message::PreviousFilter));

        let next_button = widget::button::icon(icon::from_name("go-next-symbolic"))
            .on_press_maybe(can_add.then_some(Message::NextFilter));

        let apply_button = widget::button::suggested(fl!("apply-filter"))
            .on_press_maybe((can_add && has_pending).then_some(Message::ApplyFilter));

        let current_name = if has_pending {
            self.session
                .catalog()
                .get(self.session.current_index())
                .map(|asset| asset.name.clone())
                .unwrap_or_default()
        } else {
            String::new()
        };

        let counter = widget::text(format!(
            "{}/{}",
            self.session.applied().len(),
            MAX_APPLIED_OVERLAYS
        ))
        .class(cosmic::theme::Text::Accent);

        widget::row()
            .push(show_button)
            .push(previous_button)
            .push(widget::text(current_name))
            .push(next_button)
            .push(apply_button)
            .push(widget::horizontal_space())
            .push(counter)
            .spacing(spacing.space_xs)
            .align_y(Alignment::Center)
            .into()
    }

    fn build_bottom_row(&self) -> Element<'_, Message> {
        let spacing = cosmic::theme::spacing();
        let captured = self.session.is_captured();

        let camera_button = if self.camera_active {
            widget::button::standard(fl!("stop-camera")).on_press(Message::StopCamera)
        } else {
            widget::button::standard(fl!("start-camera")).on_press_maybe(
                (!self.available_cameras.is_empty()).then_some(Message::StartCamera),
            )
        };

        let save_button = widget::button::suggested(fl!("save-photo"))
            .on_press_maybe((captured && !self.is_saving).then_some(Message::SavePhoto));

        let print_button = widget::button::standard(fl!("print-photo"))
            .on_press_maybe((captured && !self.is_printing).then_some(Message::PrintPhoto));

        // Fill on both sides keeps the shutter centred
        widget::row()
            .push(
                widget::container(camera_button)
                    .width(Length::Fill)
                    .align_x(Alignment::Start),
            )
            .push(self.build_capture_button())
            .push(
                widget::container(
                    widget::row()
                        .push(save_button)
                        .push(print_button)
                        .spacing(spacing.space_xs),
                )
                .width(Length::Fill)
                .align_x(Alignment::End),
            )
            .align_y(Alignment::Center)
            .width(Length::Fill)
            .into()
    }
}
