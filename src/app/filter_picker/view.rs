// SPDX-License-Identifier: GPL-3.0-only

//! Filter picker UI view
//!
//! Grid-style filter selector using COSMIC context drawer with catalog thumbnails.

use crate::app::state::{AppModel, ContextPage, Message};
use crate::constants::MAX_APPLIED_OVERLAYS;
use crate::fl;
use cosmic::Element;
use cosmic::app::context_drawer;
use cosmic::iced::{Alignment, Background, Border, Color, ContentFit, Length};
use cosmic::widget;

/// Spacing between filter thumbnails in grid
const FILTER_GRID_SPACING: f32 = 6.0;
/// Border width for selected filter
const FILTER_BORDER_WIDTH: f32 = 2.0;
/// Number of columns in the filter grid
const FILTER_GRID_COLUMNS: usize = 3;
/// Context drawer content width
const DRAWER_CONTENT_WIDTH: f32 = 420.0;
/// Calculated thumbnail size: (drawer_width - (columns-1) * spacing) / columns
const FILTER_THUMBNAIL_SIZE: f32 = (DRAWER_CONTENT_WIDTH
    - (FILTER_GRID_COLUMNS as f32 - 1.0) * FILTER_GRID_SPACING)
    / FILTER_GRID_COLUMNS as f32;

impl AppModel {
    /// Build the filter picker as a COSMIC context drawer
    pub fn filters_view(&self) -> context_drawer::ContextDrawer<'_, Message> {
        let spacing = cosmic::theme::spacing();
        let catalog = self.session.catalog();

        let summary = widget::text(fl!(
            "filters-applied",
            count = self.session.applied().len(),
            max = MAX_APPLIED_OVERLAYS
        ))
        .class(cosmic::theme::Text::Accent);

        let folder = widget::text(self.filters_folder.display().to_string()).size(12);

        let content: Element<'_, Message> = if catalog.is_empty() {
            widget::column()
                .push(summary)
                .push(widget::vertical_space().height(spacing.space_s))
                .push(widget::text(fl!("filters-empty")))
                .push(widget::vertical_space().height(spacing.space_xxs))
                .push(folder)
                .into()
        } else {
            let grid_spacing = FILTER_GRID_SPACING as u16;
            let mut grid_column = widget::column().spacing(grid_spacing);
            let mut current_row = widget::row().spacing(grid_spacing);
            let mut items_in_row = 0;

            let inner_size = FILTER_THUMBNAIL_SIZE - FILTER_BORDER_WIDTH * 2.0;
            let can_pick = self.session.can_add_filter();

            for (index, asset) in catalog.iter().enumerate() {
                let is_selected =
                    self.session.pending().is_some() && self.session.current_index() == index;

                let thumbnail: Element<'_, Message> = match self.filter_thumbnails.get(index) {
                    Some(handle) => widget::image::Image::new(handle.clone())
                        .content_fit(ContentFit::Contain)
                        .width(Length::Fixed(inner_size))
                        .height(Length::Fixed(inner_size))
                        .into(),
                    None => widget::Space::new(
                        Length::Fixed(inner_size),
                        Length::Fixed(inner_size),
                    )
                    .into(),
                };

                let bordered_thumbnail = widget::container(thumbnail)
                    .width(Length::Fixed(FILTER_THUMBNAIL_SIZE))
                    .height(Length::Fixed(FILTER_THUMBNAIL_SIZE))
                    .center(FILTER_THUMBNAIL_SIZE)
                    .style(move |_theme| widget::container::Style {
                        // Gray backdrop keeps transparent frames visible
                        background: Some(Background::Color(Color::from_rgba(0.5, 0.5, 0.5, 0.2))),
                        border: Border {
                            radius: [10.0; 4].into(),
                            width: if is_selected {
                                FILTER_BORDER_WIDTH
                            } else {
                                0.0
                            },
                            color: if is_selected {
                                Color::from_rgb(0.3, 0.6, 1.0)
                            } else {
                                Color::TRANSPARENT
                            },
                        },
                        ..Default::default()
                    });

                let thumbnail_button = widget::button::custom(bordered_thumbnail)
                    .on_press_maybe(can_pick.then_some(Message::SelectFilter(index)))
                    .padding(0)
                    .class(cosmic::theme::Button::Image);

                let name_label = widget::text(asset.name.as_str())
                    .width(Length::Fixed(FILTER_THUMBNAIL_SIZE))
                    .align_x(cosmic::iced::alignment::Horizontal::Center);

                let filter_button = widget::column()
                    .push(thumbnail_button)
                    .push(widget::vertical_space().height(Length::Fixed(4.0)))
                    .push(name_label)
                    .align_x(Alignment::Center);

                current_row = current_row.push(filter_button);
                items_in_row += 1;

                if items_in_row >= FILTER_GRID_COLUMNS {
                    grid_column = grid_column.push(current_row);
                    current_row = widget::row().spacing(grid_spacing);
                    items_in_row = 0;
                }
            }

            if items_in_row > 0 {
                grid_column = grid_column.push(current_row);
            }

            widget::column()
                .push(summary)
                .push(widget::vertical_space().height(spacing.space_s))
                .push(grid_column)
                .push(widget::vertical_space().height(spacing.space_s))
                .push(folder)
                .into()
        };

        context_drawer::context_drawer(content, Message::ToggleContextPage(ContextPage::Filters))
            .title(fl!("filters-title"))
    }
}
