// SPDX-License-Identifier: MPL-2.0

//! Overlay adjustment buttons

use crate::app::state::{AppModel, Message, OverlayAdjustment};
use crate::constants::ui;
use cosmic::Element;
use cosmic::iced::Alignment;
use cosmic::widget;

/// Button order and icons
const ADJUSTMENTS: [(OverlayAdjustment, &str); 8] = [
    (OverlayAdjustment::MoveLeft, "go-previous-symbolic"),
    (OverlayAdjustment::MoveUp, "go-up-symbolic"),
    (OverlayAdjustment::MoveDown, "go-down-symbolic"),
    (OverlayAdjustment::MoveRight, "go-next-symbolic"),
    (OverlayAdjustment::ScaleDown, "zoom-out-symbolic"),
    (OverlayAdjustment::ScaleUp, "zoom-in-symbolic"),
    (OverlayAdjustment::RotateLeft, "object-rotate-left-symbolic"),
    (OverlayAdjustment::RotateRight, "object-rotate-right-symbolic"),
];

impl AppModel {
    /// Row of move/scale/rotate buttons, active only while a filter is pending
    pub fn build_adjust_buttons(&self) -> Element<'_, Message> {
        let spacing = cosmic::theme::spacing();
        let enabled = self.session.pending().is_some();

        let mut row = widget::row()
            .spacing(spacing.space_xxs)
            .align_y(Alignment::Center);

        for (adjustment, icon_name) in ADJUSTMENTS {
            let icon = widget::icon::from_name(icon_name).size(ui::ADJUST_ICON_SIZE);
            row = row.push(
                widget::button::icon(icon)
                    .on_press_maybe(enabled.then_some(Message::AdjustOverlay(adjustment))),
            );
        }

        row.into()
    }
}
