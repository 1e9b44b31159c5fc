// SPDX-License-Identifier: MPL-2.0
//! Event subscriptions for the application.

use super::Message;
use iced::{event, time, Subscription};
use std::time::Duration;

/// Period of the tick driving toast expiry and animations.
pub const TICK_INTERVAL: Duration = Duration::from_millis(100);

/// Routes files dropped onto the window to the intake.
pub fn create_event_subscription() -> Subscription<Message> {
    event::listen_with(|event, _status, _window_id| {
        if let event::Event::Window(iced::window::Event::FileDropped(path)) = event {
            return Some(Message::FileDropped(path));
        }
        None
    })
}

/// Creates the periodic tick while a toast is visible, an analysis is in
/// flight or the result is still animating.
pub fn create_tick_subscription(
    has_notification: bool,
    is_analyzing: bool,
    is_animating: bool,
) -> Subscription<Message> {
    if has_notification || is_analyzing || is_animating {
        time::every(TICK_INTERVAL).map(Message::Tick)
    } else {
        Subscription::none()
    }
}
