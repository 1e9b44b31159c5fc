// SPDX-License-Identifier: MPL-2.0
//! Left-hand panel: image drop zone or preview, the analyze button, tips and
//! the disclaimer.

use crate::i18n::fluent::I18n;
use crate::intake::ImageReference;
use crate::ui::design_tokens::{palette, sizing, spacing, typography};
use crate::ui::styles;
use crate::ui::widgets::AnimatedSpinner;
use iced::widget::image::{Handle, Image};
use iced::widget::{button, mouse_area, Column, Container, Row, Stack, Text};
use iced::{alignment, Color, ContentFit, Element, Length};
use std::time::Duration;

/// Contextual data needed to render the panel.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub image: Option<&'a ImageReference>,
    pub preview: Option<&'a Handle>,
    pub max_upload_bytes: usize,
    pub analyzing: bool,
    /// Time since the analysis started, drives the spinner.
    pub analyzing_for: Duration,
}

/// Messages emitted by the panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    OpenFileDialog,
    RemoveImage,
    Analyze,
}

/// Upload limit in whole megabytes, for the hints.
pub fn max_mb(max_upload_bytes: usize) -> String {
    (max_upload_bytes / (1024 * 1024)).to_string()
}

pub fn view<'a>(ctx: ViewContext<'a>) -> Element<'a, Message> {
    let i18n = ctx.i18n;

    let source: Element<'a, Message> = match (ctx.image, ctx.preview) {
        (Some(image), Some(handle)) => preview(i18n, image, handle, ctx.analyzing),
        _ => drop_zone(i18n, ctx.max_upload_bytes),
    };

    let analyze_label = if ctx.analyzing {
        i18n.tr("analyzing_btn")
    } else {
        i18n.tr("analyze_btn")
    };
    let mut analyze_button = button(
        Container::new(Text::new(analyze_label).size(typography::BODY))
            .width(Length::Fill)
            .align_x(alignment::Horizontal::Center),
    )
    .width(Length::Fill)
    .height(Length::Fixed(sizing::BUTTON_HEIGHT))
    .padding([spacing::XS, spacing::MD])
    .style(styles::button::primary);
    if ctx.image.is_some() && !ctx.analyzing {
        analyze_button = analyze_button.on_press(Message::Analyze);
    }

    let mut content = Column::new()
        .spacing(spacing::MD)
        .push(Text::new(i18n.tr("input_label")).size(typography::TITLE_SM))
        .push(source)
        .push(analyze_button);

    if ctx.analyzing {
        content = content.push(
            Container::new(AnimatedSpinner::at(palette::PRIMARY_500, ctx.analyzing_for).into_element())
                .width(Length::Fill)
                .align_x(alignment::Horizontal::Center),
        );
    }

    content
        .push(
            Column::new()
                .spacing(spacing::XXS)
                .push(Text::new(i18n.tr("tips_title")).size(typography::BODY))
                .push(Text::new(i18n.tr("tips_content")).size(typography::BODY_SM)),
        )
        .push(
            Container::new(
                Column::new()
                    .spacing(spacing::XXS)
                    .push(Text::new(i18n.tr("disclaimer_title")).size(typography::BODY))
                    .push(Text::new(i18n.tr("disclaimer_text")).size(typography::CAPTION)),
            )
            .padding(spacing::SM)
            .width(Length::Fill)
            .style(styles::container::callout(palette::WARNING_500)),
        )
        .into()
}

/// Clickable zone inviting the user to pick or drop an image.
fn drop_zone<'a>(i18n: &'a I18n, max_upload_bytes: usize) -> Element<'a, Message> {
    let hint_color = Color {
        a: 0.7,
        ..palette::GRAY_400
    };

    let content = Column::new()
        .spacing(spacing::XS)
        .align_x(alignment::Horizontal::Center)
        .push(Text::new("+").size(typography::TITLE_LG).color(palette::PRIMARY_500))
        .push(Text::new(i18n.tr("click_upload")).size(typography::BODY))
        .push(
            Text::new(i18n.tr("drop_hint"))
                .size(typography::BODY_SM)
                .color(palette::GRAY_400),
        )
        .push(
            Text::new(i18n.tr_with_args(
                "file_hint",
                &[("max_mb", max_mb(max_upload_bytes).as_str())],
            ))
            .size(typography::CAPTION)
            .color(hint_color),
        );

    mouse_area(
        Container::new(content)
            .width(Length::Fill)
            .height(Length::Fixed(sizing::PREVIEW_HEIGHT))
            .align_x(alignment::Horizontal::Center)
            .align_y(alignment::Vertical::Center)
            .style(styles::container::drop_zone),
    )
    .on_press(Message::OpenFileDialog)
    .interaction(iced::mouse::Interaction::Pointer)
    .into()
}

/// Selected image with the remove button in its top-right corner.
fn preview<'a>(
    i18n: &'a I18n,
    image: &'a ImageReference,
    handle: &'a Handle,
    analyzing: bool,
) -> Element<'a, Message> {
    let picture = Container::new(
        Image::new(handle.clone())
            .content_fit(ContentFit::Contain)
            .width(Length::Fill)
            .height(Length::Fixed(sizing::PREVIEW_HEIGHT)),
    )
    .width(Length::Fill)
    .style(styles::container::drop_zone);

    let mut remove = button(Text::new("×").size(typography::TITLE_SM))
        .padding([0.0, spacing::XS])
        .style(styles::button::remove_overlay);
    if !analyzing {
        remove = remove.on_press(Message::RemoveImage);
    }

    let overlay = Container::new(remove)
        .width(Length::Fill)
        .align_x(alignment::Horizontal::Right)
        .padding(spacing::XS);

    let caption = match image.dimensions {
        Some((width, height)) => format!("{} · {}×{}", image.filename, width, height),
        None => image.filename.clone(),
    };

    Column::new()
        .spacing(spacing::XXS)
        .push(Stack::new().push(picture).push(overlay))
        .push(
            Row::new()
                .spacing(spacing::XS)
                .push(
                    Text::new(caption)
                        .size(typography::CAPTION)
                        .color(palette::GRAY_400)
                        .width(Length::Fill),
                )
                .push(
                    Text::new(i18n.tr("remove_label"))
                        .size(typography::CAPTION)
                        .color(palette::GRAY_400),
                ),
        )
        .into()
}
