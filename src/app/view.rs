// SPDX-License-Identifier: MPL-2.0
//! View rendering for the application.
//!
//! Layout: navbar on top, intake panel on the left, result region and tabbed
//! gallery/model information on the right, toast floating above everything.

use super::{update, Message, Tab};
use crate::client::ModelDetails;
use crate::i18n::fluent::I18n;
use crate::intake::ImageIntake;
use crate::ui::analysis::{AnalysisState, Status};
use crate::ui::components::error_display::ErrorDisplay;
use crate::ui::design_tokens::{palette, sizing, spacing, typography};
use crate::ui::gallery::Gallery;
use crate::ui::intake_panel;
use crate::ui::model_info;
use crate::ui::navbar;
use crate::ui::notifications::{self, Toast};
use crate::ui::results;
use crate::ui::styles;
use iced::widget::{button, scrollable, Column, Container, Row, Stack, Text};
use iced::{alignment, Element, Length};
use std::time::{Duration, Instant};

/// Context required to render the application view.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub intake: &'a ImageIntake,
    pub analysis: &'a AnalysisState,
    pub analysis_started_at: Option<Instant>,
    pub gallery: &'a Gallery,
    pub model_details: Option<&'a ModelDetails>,
    pub tab: Tab,
    pub notifications: &'a notifications::Manager,
}

pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    let now = Instant::now();
    let i18n = ctx.i18n;

    let navbar_view = navbar::view(navbar::ViewContext { i18n }).map(Message::Navbar);

    let intake_view = intake_panel::view(intake_panel::ViewContext {
        i18n,
        image: ctx.intake.current(),
        preview: ctx.intake.preview(),
        max_upload_bytes: ctx.intake.max_bytes(),
        analyzing: ctx.analysis.is_analyzing(),
        analyzing_for: ctx
            .analysis_started_at
            .map(|started| now.saturating_duration_since(started))
            .unwrap_or(Duration::ZERO),
    })
    .map(Message::Intake);

    let sidebar = Container::new(scrollable(Container::new(intake_view).padding(spacing::MD)))
        .width(Length::Fixed(sizing::SIDEBAR_WIDTH))
        .height(Length::Fill)
        .style(styles::container::panel);

    let main = Column::new()
        .spacing(spacing::MD)
        .padding(spacing::MD)
        .push(
            Container::new(result_region(i18n, ctx.analysis, now))
                .width(Length::Fill)
                .padding(spacing::MD)
                .style(styles::container::panel),
        )
        .push(tab_bar(i18n, ctx.tab))
        .push(
            Container::new(tab_content(i18n, ctx.tab, ctx.gallery, ctx.model_details))
                .width(Length::Fill)
                .padding(spacing::MD)
                .style(styles::container::panel),
        )
        .push(
            Text::new(i18n.tr("footer"))
                .size(typography::CAPTION)
                .color(palette::GRAY_400),
        );

    let body = Row::new()
        .spacing(spacing::MD)
        .padding(spacing::MD)
        .push(sidebar)
        .push(scrollable(main).width(Length::Fill).height(Length::Fill));

    let base = Column::new()
        .push(navbar_view)
        .push(body)
        .width(Length::Fill)
        .height(Length::Fill);

    Stack::new()
        .push(base)
        .push(Toast::view_overlay(ctx.notifications, i18n).map(Message::Notification))
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

/// Placeholder, progress, result or error, depending on the analysis status.
fn result_region<'a>(
    i18n: &'a I18n,
    analysis: &'a AnalysisState,
    now: Instant,
) -> Element<'a, Message> {
    match (analysis.status(), analysis.result(), analysis.error()) {
        (Status::Success, Some(result), _) => results::view(results::ViewContext {
            i18n,
            result,
            ring_percent: analysis.ring().percent_at(now),
            age: analysis.result_age(now).unwrap_or(Duration::ZERO),
        }),
        (Status::Error, _, Some(error)) => {
            ErrorDisplay::new(i18n.tr("error_title"))
                .message(update::analysis_error_notification(error).message(i18n))
                .action(i18n.tr("dismiss_label"), Message::DismissError)
                .view()
        }
        (Status::Analyzing, _, _) => placeholder(i18n, "loading_title", "loading_desc"),
        _ => placeholder(i18n, "ready_title", "ready_desc"),
    }
}

fn placeholder<'a>(i18n: &'a I18n, title_key: &str, desc_key: &str) -> Element<'a, Message> {
    Container::new(
        Column::new()
            .spacing(spacing::XS)
            .align_x(alignment::Horizontal::Center)
            .push(Text::new(i18n.tr(title_key)).size(typography::TITLE_MD))
            .push(
                Text::new(i18n.tr(desc_key))
                    .size(typography::BODY)
                    .color(palette::GRAY_400),
            ),
    )
    .width(Length::Fill)
    .padding(spacing::LG)
    .align_x(alignment::Horizontal::Center)
    .into()
}

fn tab_bar(i18n: &I18n, current: Tab) -> Element<'_, Message> {
    Tab::ALL
        .iter()
        .fold(Row::new().spacing(spacing::XS), |row, &tab| {
            let entry = button(Text::new(i18n.tr(tab.i18n_key())).size(typography::BODY))
                .padding([spacing::XS, spacing::MD])
                .on_press(Message::TabSelected(tab));
            row.push(if tab == current {
                entry.style(styles::button::selected)
            } else {
                entry.style(styles::button::unselected)
            })
        })
        .into()
}

fn tab_content<'a>(
    i18n: &'a I18n,
    tab: Tab,
    gallery: &'a Gallery,
    model_details: Option<&'a ModelDetails>,
) -> Element<'a, Message> {
    match tab {
        Tab::Examples => gallery.view(i18n).map(Message::Gallery),
        Tab::Info => model_info::view(i18n, model_details),
    }
}
