// SPDX-License-Identifier: MPL-2.0
//! Projection of an [`AnalysisResult`] into what the result panel draws:
//! confidence ring and text, severity badge and probability bars.
//!
//! Everything here except [`view`] is pure and renderer-free.

pub mod ring;

use crate::client::AnalysisResult;
use crate::config::{BAR_ANIMATION_DURATION_MS, BAR_STAGGER_MS};
use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{palette, sizing, spacing, typography};
use crate::ui::styles;
use iced::widget::{column, container, row, text, Column, Container, Space};
use iced::{alignment, Color, Element, Length};
use std::f32::consts::PI;
use std::time::Duration;

/// Circumference of the confidence ring (radius 40).
pub const CIRCUMFERENCE: f32 = 2.0 * PI * sizing::RING_RADIUS;

/// Highest percent the ring is filled to.
pub const RING_CAP: f32 = 99.0;

/// Confidence as a percentage.
pub fn confidence_percent(confidence: f64) -> f64 {
    confidence * 100.0
}

/// Text shown in the middle of the ring: `"99+%"` above 99, else one decimal.
pub fn confidence_text(confidence: f64) -> String {
    let percent = confidence_percent(confidence);
    if percent > 99.0 {
        "99+%".to_string()
    } else {
        format!("{:.1}%", percent)
    }
}

/// Percent the ring animates to, capped at [`RING_CAP`].
pub fn ring_percent(confidence: f64) -> f32 {
    let percent = confidence_percent(confidence) as f32;
    if percent.is_finite() {
        percent.clamp(0.0, RING_CAP)
    } else {
        0.0
    }
}

/// Stroke offset of the ring for `percent`: `C - percent/100 * C`.
pub fn dash_offset(percent: f32) -> f32 {
    CIRCUMFERENCE - (percent / 100.0) * CIRCUMFERENCE
}

/// Badge tone for a severity label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeverityTone {
    Green,
    Yellow,
    Red,
    Blue,
    Orange,
}

impl SeverityTone {
    /// Exact match on the English or Indonesian label; unknown labels are blue.
    pub fn from_label(label: &str) -> Self {
        match label {
            "Mild" | "Ringan" => SeverityTone::Green,
            "Moderate" | "Sedang" => SeverityTone::Yellow,
            "Severe" | "Parah" => SeverityTone::Red,
            "Variable" | "Bervariasi" => SeverityTone::Blue,
            "Chronic" | "Kronis" => SeverityTone::Orange,
            _ => SeverityTone::Blue,
        }
    }

    pub fn color(self) -> Color {
        match self {
            SeverityTone::Green => palette::SEVERITY_GREEN,
            SeverityTone::Yellow => palette::SEVERITY_YELLOW,
            SeverityTone::Red => palette::SEVERITY_RED,
            SeverityTone::Blue => palette::SEVERITY_BLUE,
            SeverityTone::Orange => palette::SEVERITY_ORANGE,
        }
    }
}

pub fn severity_color(label: &str) -> Color {
    SeverityTone::from_label(label).color()
}

/// Parses `#rrggbb`.
pub fn parse_hex_color(value: &str) -> Option<Color> {
    let hex = value.trim().strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
    Some(Color::from_rgb8(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

/// Localized class name, or the raw name when no translation exists.
pub fn class_label(i18n: &I18n, class_name: &str) -> String {
    let key = format!("classes.{}", class_name);
    let label = i18n.tr(&key);
    if label == key {
        class_name.to_string()
    } else {
        label
    }
}

/// One row of the probability list.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbabilityBar {
    pub class_name: String,
    pub label: String,
    /// Final width in percent of the track.
    pub width_percent: f32,
    /// `width_percent` with one decimal, e.g. `"60.0%"`.
    pub width_text: String,
    pub color: Color,
    /// Delay before this bar starts growing.
    pub delay: Duration,
}

/// Builds the bars in `sorted_probs` order.
pub fn bars(result: &AnalysisResult, i18n: &I18n) -> Vec<ProbabilityBar> {
    result
        .sorted_probs
        .iter()
        .enumerate()
        .map(|(index, (class_name, probability))| {
            let percent = probability * 100.0;
            ProbabilityBar {
                class_name: class_name.clone(),
                label: class_label(i18n, class_name),
                width_percent: (percent as f32).clamp(0.0, 100.0),
                width_text: format!("{:.1}%", percent),
                color: result
                    .class_colors
                    .get(class_name)
                    .and_then(|hex| parse_hex_color(hex))
                    .unwrap_or(palette::SLATE_500),
                delay: bar_delay(index),
            }
        })
        .collect()
}

pub fn bar_delay(index: usize) -> Duration {
    Duration::from_millis(BAR_STAGGER_MS * index as u64)
}

/// Time after which every one of `count` bars has reached full width.
pub fn bars_settle_time(count: usize) -> Duration {
    match count {
        0 => Duration::ZERO,
        n => bar_delay(n - 1) + Duration::from_millis(BAR_ANIMATION_DURATION_MS),
    }
}

/// Growth of a bar, in `[0, 1]`, `age` after the result arrived.
pub fn bar_progress(delay: Duration, age: Duration) -> f32 {
    match age.checked_sub(delay) {
        Some(elapsed) => {
            ease_out(elapsed.as_secs_f32() / (BAR_ANIMATION_DURATION_MS as f32 / 1000.0))
        }
        None => 0.0,
    }
}

/// Cubic ease-out on `t` clamped to `[0, 1]`.
pub fn ease_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

/// Contextual data needed to render the result panel.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub result: &'a AnalysisResult,
    /// Percent the ring shows right now.
    pub ring_percent: f32,
    /// Time since the result arrived.
    pub age: Duration,
}

/// Renders the result panel.
pub fn view<'a, Message: 'static>(ctx: ViewContext<'a>) -> Element<'a, Message> {
    let i18n = ctx.i18n;
    let result = ctx.result;
    let accent = result
        .sorted_probs
        .first()
        .and_then(|(name, _)| result.class_colors.get(name))
        .and_then(|hex| parse_hex_color(hex))
        .unwrap_or(palette::PRIMARY_500);

    let ring_widget = container(
        iced::widget::stack![
            ring::ConfidenceRing::new(ctx.ring_percent, accent).into_element(),
            Container::new(text(confidence_text(result.confidence)).size(typography::TITLE_SM))
                .width(Length::Fixed(sizing::RING_BOX))
                .height(Length::Fixed(sizing::RING_BOX))
                .align_x(alignment::Horizontal::Center)
                .align_y(alignment::Vertical::Center),
        ],
    );

    let severity_badge = Container::new(text(result.severity.clone()).size(typography::CAPTION))
        .padding([spacing::XXS, spacing::SM])
        .style(styles::container::badge(severity_color(&result.severity)));

    let header = row![
        ring_widget,
        column![
            text(i18n.tr("primary_diagnosis")).size(typography::CAPTION),
            text(result.name.clone()).size(typography::TITLE_MD),
            row![
                text(i18n.tr("severity_label")).size(typography::BODY_SM),
                severity_badge,
            ]
            .spacing(spacing::XS)
            .align_y(alignment::Vertical::Center),
            text(format!(
                "{}: {}",
                i18n.tr("confidence_label"),
                confidence_text(result.confidence)
            ))
            .size(typography::BODY_SM),
        ]
        .spacing(spacing::XXS),
    ]
    .spacing(spacing::LG)
    .align_y(alignment::Vertical::Center);

    let mut probabilities = Column::new()
        .spacing(spacing::XS)
        .push(text(i18n.tr("output_title")).size(typography::TITLE_SM));
    for bar in bars(result, i18n) {
        let grown = bar.width_percent * bar_progress(bar.delay, ctx.age);
        probabilities = probabilities.push(bar_row(bar, grown));
    }

    column![
        header,
        text(result.description.clone()).size(typography::BODY),
        column![
            text(i18n.tr("consult_label")).size(typography::BODY_SM),
            text(result.action.clone()).size(typography::BODY),
        ]
        .spacing(spacing::XXS),
        probabilities,
    ]
    .spacing(spacing::MD)
    .into()
}

fn bar_row<'a, Message: 'a>(bar: ProbabilityBar, grown_percent: f32) -> Element<'a, Message> {
    // FillPortion needs integers; per-mille keeps one decimal of precision.
    let filled = (grown_percent * 10.0).round() as u16;
    let empty = 1000u16.saturating_sub(filled);

    let mut track = iced::widget::Row::new().height(Length::Fixed(sizing::BAR_HEIGHT));
    if filled > 0 {
        track = track.push(
            Container::new(Space::new())
                .width(Length::FillPortion(filled))
                .height(Length::Fill)
                .style(styles::container::bar_fill(bar.color)),
        );
    }
    if empty > 0 {
        track = track.push(Space::new().width(Length::FillPortion(empty)));
    }

    column![
        row![
            text(bar.label).size(typography::BODY_SM).width(Length::Fill),
            text(bar.width_text).size(typography::BODY_SM),
        ],
        Container::new(track)
            .width(Length::Fill)
            .style(styles::container::bar_track),
    ]
    .spacing(spacing::XXS)
    .into()
}
