// SPDX-License-Identifier: MPL-2.0
//! Toast content.

use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::palette;
use iced::Color;

/// Visual kind of a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToastKind {
    #[default]
    Success,
    Error,
}

impl ToastKind {
    /// Accent color of the toast border and glyph.
    #[must_use]
    pub fn color(self) -> Color {
        match self {
            ToastKind::Success => palette::SUCCESS_500,
            ToastKind::Error => palette::ERROR_500,
        }
    }

    #[must_use]
    pub fn glyph(self) -> &'static str {
        match self {
            ToastKind::Success => "✓",
            ToastKind::Error => "!",
        }
    }
}

/// Message shown by a toast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationText {
    /// Translation key resolved at render time, so it follows language switches.
    Key {
        key: String,
        args: Vec<(String, String)>,
    },
    /// Text shown as is, such as an error string sent by the server.
    Verbatim(String),
}

/// A toast to be displayed to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    kind: ToastKind,
    text: NotificationText,
}

impl Notification {
    pub fn new(kind: ToastKind, key: impl Into<String>) -> Self {
        Self {
            kind,
            text: NotificationText::Key {
                key: key.into(),
                args: Vec::new(),
            },
        }
    }

    pub fn success(key: impl Into<String>) -> Self {
        Self::new(ToastKind::Success, key)
    }

    pub fn error(key: impl Into<String>) -> Self {
        Self::new(ToastKind::Error, key)
    }

    /// Creates a toast whose message is not a translation key.
    pub fn verbatim(kind: ToastKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: NotificationText::Verbatim(text.into()),
        }
    }

    /// Adds an argument for message interpolation. No effect on verbatim text.
    #[must_use]
    pub fn with_arg(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        if let NotificationText::Key { args, .. } = &mut self.text {
            args.push((name.into(), value.into()));
        }
        self
    }

    #[must_use]
    pub fn kind(&self) -> ToastKind {
        self.kind
    }

    #[must_use]
    pub fn text(&self) -> &NotificationText {
        &self.text
    }

    /// Resolves the message in the active language.
    pub fn message(&self, i18n: &I18n) -> String {
        match &self.text {
            NotificationText::Verbatim(text) => text.clone(),
            NotificationText::Key { key, args } if args.is_empty() => i18n.tr(key),
            NotificationText::Key { key, args } => {
                let args: Vec<(&str, &str)> = args
                    .iter()
                    .map(|(name, value)| (name.as_str(), value.as_str()))
                    .collect();
                i18n.tr_with_args(key, &args)
            }
        }
    }
}
