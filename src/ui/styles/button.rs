// SPDX-License-Identifier: MPL-2.0
//! Centralized button styles.

use crate::ui::design_tokens::{
    opacity,
    palette::{self, BLACK, WHITE},
    radius, shadow,
};
use iced::widget::button;
use iced::{Background, Border, Color, Theme};

fn is_light(theme: &Theme) -> bool {
    !theme.extended_palette().is_dark
}

/// Main call to action (the analyze button).
pub fn primary(theme: &Theme, status: button::Status) -> button::Style {
    let base = button::Style {
        background: Some(Background::Color(palette::PRIMARY_500)),
        text_color: WHITE,
        border: Border {
            color: palette::PRIMARY_600,
            width: 1.0,
            radius: radius::MD.into(),
        },
        shadow: shadow::SM,
        snap: true,
    };

    match status {
        button::Status::Active => base,
        button::Status::Hovered => button::Style {
            background: Some(Background::Color(palette::PRIMARY_400)),
            shadow: shadow::MD,
            ..base
        },
        button::Status::Pressed => button::Style {
            background: Some(Background::Color(palette::PRIMARY_700)),
            ..base
        },
        button::Status::Disabled => button::Style {
            background: Some(Background::Color(if is_light(theme) {
                palette::GRAY_200
            } else {
                palette::GRAY_700
            })),
            text_color: palette::GRAY_400,
            border: Border {
                color: palette::GRAY_400,
                width: 1.0,
                radius: radius::MD.into(),
            },
            shadow: shadow::NONE,
            snap: true,
        },
    }
}

/// Selected entry of a toggle group (active tab, active language).
pub fn selected(_theme: &Theme, status: button::Status) -> button::Style {
    let background = match status {
        button::Status::Hovered => palette::PRIMARY_400,
        _ => palette::PRIMARY_500,
    };
    button::Style {
        background: Some(Background::Color(background)),
        text_color: WHITE,
        border: Border {
            color: palette::PRIMARY_600,
            width: 1.0,
            radius: radius::SM.into(),
        },
        shadow: shadow::NONE,
        snap: true,
    }
}

/// Unselected entry of a toggle group.
pub fn unselected(theme: &Theme, status: button::Status) -> button::Style {
    let (bg_color, hover_bg, text_color) = if is_light(theme) {
        (palette::GRAY_100, palette::GRAY_200, palette::GRAY_900)
    } else {
        (palette::GRAY_700, Color::from_rgb(0.3, 0.34, 0.4), WHITE)
    };

    let (background, border_color) = match status {
        button::Status::Hovered => (hover_bg, palette::PRIMARY_500),
        _ => (bg_color, palette::GRAY_400),
    };

    button::Style {
        background: Some(Background::Color(background)),
        text_color,
        border: Border {
            color: border_color,
            width: 1.0,
            radius: radius::SM.into(),
        },
        shadow: shadow::NONE,
        snap: true,
    }
}

/// Round remove button drawn over the image preview.
pub fn remove_overlay(_theme: &Theme, status: button::Status) -> button::Style {
    let alpha = match status {
        button::Status::Hovered => opacity::OVERLAY_STRONG,
        button::Status::Pressed => opacity::OPAQUE,
        _ => opacity::OVERLAY_MEDIUM,
    };

    button::Style {
        background: Some(Background::Color(Color { a: alpha, ..BLACK })),
        text_color: WHITE,
        border: Border {
            radius: radius::FULL.into(),
            ..Default::default()
        },
        shadow: shadow::SM,
        snap: true,
    }
}

/// Gallery thumbnail; highlights its border on hover.
pub fn gallery_item(theme: &Theme, status: button::Status) -> button::Style {
    let palette_ext = theme.extended_palette();
    let border_color = match status {
        button::Status::Hovered | button::Status::Pressed => palette::PRIMARY_500,
        _ => palette_ext.background.strong.color,
    };

    button::Style {
        background: Some(Background::Color(palette_ext.background.weak.color)),
        text_color: palette_ext.background.base.text,
        border: Border {
            color: border_color,
            width: 2.0,
            radius: radius::MD.into(),
        },
        shadow: shadow::NONE,
        snap: true,
    }
}
