// SPDX-License-Identifier: MPL-2.0
//! Header bar with the application title and the language toggle.

use crate::i18n::fluent::I18n;
use crate::i18n::Language;
use crate::ui::design_tokens::{palette, spacing, typography};
use crate::ui::styles;
use iced::widget::{button, Column, Container, Row, Text};
use iced::{alignment, Element, Length};

/// Contextual data needed to render the navbar.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
}

/// Messages emitted by the navbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    LanguageSelected(Language),
}

/// Events propagated to the parent application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    None,
    LanguageChanged(Language),
}

/// Process a navbar message and return the corresponding event.
///
/// Selecting the language already in use is not a change.
pub fn update(message: Message, current: Language) -> Event {
    match message {
        Message::LanguageSelected(language) if language == current => Event::None,
        Message::LanguageSelected(language) => Event::LanguageChanged(language),
    }
}

/// Render the navigation bar.
pub fn view<'a>(ctx: ViewContext<'a>) -> Element<'a, Message> {
    let i18n = ctx.i18n;
    let current = i18n.current_language();

    let titles = Column::new()
        .spacing(spacing::XXS)
        .width(Length::Fill)
        .push(Text::new(i18n.tr("header")).size(typography::TITLE_LG))
        .push(
            Text::new(i18n.tr("header_subtitle"))
                .size(typography::BODY_SM)
                .color(palette::GRAY_400),
        );

    let toggle = Language::ALL.iter().fold(
        Row::new()
            .spacing(spacing::XXS)
            .align_y(alignment::Vertical::Center)
            .push(Text::new(i18n.tr("language_label")).size(typography::BODY_SM)),
        |row, &language| {
            let label = Text::new(language.code().to_uppercase()).size(typography::BODY_SM);
            let entry = button(label)
                .padding([spacing::XXS, spacing::SM])
                .on_press(Message::LanguageSelected(language));
            row.push(if language == current {
                entry.style(styles::button::selected)
            } else {
                entry.style(styles::button::unselected)
            })
        },
    );

    Container::new(
        Row::new()
            .spacing(spacing::MD)
            .align_y(alignment::Vertical::Center)
            .push(titles)
            .push(toggle),
    )
    .width(Length::Fill)
    .padding([spacing::SM, spacing::LG])
    .style(styles::container::panel)
    .into()
}
