// SPDX-License-Identifier: MPL-2.0
//! Lifecycle of the single visible toast.

use super::notification::Notification;
use crate::config::TOAST_DURATION_MS;
use std::time::{Duration, Instant};

/// Messages for toast state changes.
#[derive(Debug, Clone)]
pub enum Message {
    /// The user closed the toast.
    Dismiss,
}

/// Owns the visible toast and the deadline at which it hides.
#[derive(Debug)]
pub struct Manager {
    current: Option<Notification>,
    hide_at: Option<Instant>,
    duration: Duration,
}

impl Default for Manager {
    fn default() -> Self {
        Self::new()
    }
}

impl Manager {
    #[must_use]
    pub fn new() -> Self {
        Self::with_duration(Duration::from_millis(TOAST_DURATION_MS))
    }

    #[must_use]
    pub fn with_duration(duration: Duration) -> Self {
        Self {
            current: None,
            hide_at: None,
            duration,
        }
    }

    /// Shows `notification` now, replacing any visible toast.
    pub fn show(&mut self, notification: Notification) {
        self.show_at(notification, Instant::now());
    }

    /// Shows `notification` as of `now`; it hides at `now + duration`.
    pub fn show_at(&mut self, notification: Notification, now: Instant) {
        self.current = Some(notification);
        self.hide_at = Some(now + self.duration);
    }

    /// Hides the toast once its deadline has passed.
    pub fn tick(&mut self, now: Instant) {
        if self.hide_at.is_some_and(|deadline| now >= deadline) {
            self.dismiss();
        }
    }

    pub fn dismiss(&mut self) {
        self.current = None;
        self.hide_at = None;
    }

    pub fn handle_message(&mut self, message: &Message) {
        match message {
            Message::Dismiss => self.dismiss(),
        }
    }

    /// The visible toast, if any.
    pub fn current(&self) -> Option<&Notification> {
        self.current.as_ref()
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.current.is_some()
    }

    pub fn hide_at(&self) -> Option<Instant> {
        self.hide_at
    }
}
