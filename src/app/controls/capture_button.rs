// SPDX-License-Identifier: MPL-2.0

//! Capture button widget implementation

use crate::app::state::{AppModel, Message};
use crate::constants::ui;
use cosmic::Element;
use cosmic::iced::{Background, Color, Length};
use cosmic::widget;

impl AppModel {
    /// Whether pressing the shutter would do anything
    pub(crate) fn capture_enabled(&self) -> bool {
        self.camera_active && self.current_frame.is_some() && !self.session.is_captured()
    }

    /// Build the capture button widget
    ///
    /// - White circle when ready
    /// - Gray and pressed down while the countdown runs
    /// - Grayed out and non-interactive without a live frame
    pub fn build_capture_button(&self) -> Element<'_, Message> {
        let spacing = cosmic::theme::spacing();
        let is_disabled = !self.capture_enabled();
        let counting = self.countdown.is_running();

        let capture_button_color = if is_disabled {
            Color::from_rgba(0.5, 0.5, 0.5, 0.3)
        } else if counting {
            Color::from_rgb(0.7, 0.7, 0.7)
        } else {
            Color::WHITE
        };

        let (inner_size, outer_size) = if counting {
            (
                ui::CAPTURE_BUTTON_INNER * 0.85,
                ui::CAPTURE_BUTTON_OUTER * 0.85,
            )
        } else {
            (ui::CAPTURE_BUTTON_INNER, ui::CAPTURE_BUTTON_OUTER)
        };

        let button_inner = widget::container(widget::Space::new(
            Length::Fixed(inner_size),
            Length::Fixed(inner_size),
        ))
        .style(move |_theme| widget::container::Style {
            background: Some(Background::Color(capture_button_color)),
            border: cosmic::iced::Border {
                radius: [ui::CAPTURE_BUTTON_RADIUS * (inner_size / ui::CAPTURE_BUTTON_INNER); 4]
                    .into(),
                ..Default::default()
            },
            ..Default::default()
        });

        let button = widget::button::custom(button_inner)
            .on_press_maybe((!is_disabled).then_some(Message::Capture))
            .padding(0)
            .width(Length::Fixed(outer_size))
            .height(Length::Fixed(outer_size));

        // Fixed-size wrapper keeps the row from shifting when the button shrinks
        let button_wrapper = widget::container(button)
            .width(Length::Fixed(ui::CAPTURE_BUTTON_OUTER))
            .height(Length::Fixed(ui::CAPTURE_BUTTON_OUTER))
            .center_x(ui::CAPTURE_BUTTON_OUTER)
            .center_y(ui::CAPTURE_BUTTON_OUTER);

        widget::container(button_wrapper)
            .padding([spacing.space_xs, 0])
            .into()
    }
}
