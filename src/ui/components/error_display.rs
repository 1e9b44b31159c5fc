// SPDX-License-Identifier: MPL-2.0
//! Inline error region with a title, a message and an optional action.
//!
//! # Usage
//!
//! ```ignore
//! use crate::ui::components::error_display::ErrorDisplay;
//!
//! ErrorDisplay::new(i18n.tr("error_title"))
//!     .message(i18n.tr("error_network"))
//!     .action(i18n.tr("dismiss_label"), Message::DismissError)
//!     .view()
//! ```

use crate::ui::design_tokens::{palette, spacing, typography};
use crate::ui::styles;
use iced::widget::{button, text, Column, Container, Row, Space, Text};
use iced::{alignment, Color, Element, Length, Theme};

/// Builder for the error region.
#[derive(Debug, Clone)]
pub struct ErrorDisplay<Message> {
    title: String,
    message: Option<String>,
    action: Option<(String, Message)>,
    accent: Color,
}

impl<Message: Clone + 'static> ErrorDisplay<Message> {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: None,
            action: None,
            accent: palette::ERROR_500,
        }
    }

    #[must_use]
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Adds a button that emits `on_press`.
    #[must_use]
    pub fn action(mut self, label: impl Into<String>, on_press: Message) -> Self {
        self.action = Some((label.into(), on_press));
        self
    }

    pub fn accent(&self) -> Color {
        self.accent
    }

    pub fn view<'a>(self) -> Element<'a, Message> {
        let accent = self.accent;
        let title = Text::new(self.title)
            .size(typography::TITLE_SM)
            .style(move |_theme: &Theme| text::Style {
                color: Some(accent),
            });

        let mut body = Column::new().spacing(spacing::XXS).push(title);
        if let Some(message) = self.message {
            body = body.push(Text::new(message).size(typography::BODY));
        }

        let mut content = Row::new()
            .spacing(spacing::SM)
            .align_y(alignment::Vertical::Center)
            .push(Text::new("!").size(typography::TITLE_MD).style(
                move |_theme: &Theme| text::Style {
                    color: Some(accent),
                },
            ))
            .push(body.width(Length::Fill));

        if let Some((label, on_press)) = self.action {
            content = content.push(
                button(Text::new(label).size(typography::BODY_SM))
                    .on_press(on_press)
                    .style(styles::button::unselected),
            );
        } else {
            content = content.push(Space::new().width(Length::Shrink));
        }

        Container::new(content)
            .width(Length::Fill)
            .padding(spacing::SM)
            .style(styles::container::callout(accent))
            .into()
    }
}
