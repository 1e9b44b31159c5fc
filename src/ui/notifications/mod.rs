// SPDX-License-Identifier: MPL-2.0
//! Toast notification for transient user feedback.
//!
//! A single toast is shown at a time. Showing a new one replaces the current
//! toast immediately and restarts the hide deadline (last write wins).
//!
//! # Components
//!
//! - [`notification`] - `Notification` content and `ToastKind`
//! - [`manager`] - `Manager` owning the visible toast and its deadline
//! - [`toast`] - Widget rendering the toast overlay
//!
//! # Usage
//!
//! ```ignore
//! use crate::ui::notifications::{Manager, Notification};
//!
//! let mut manager = Manager::new();
//! manager.show(Notification::success("toast_removed"));
//!
//! // On every tick of the subscription
//! manager.tick(Instant::now());
//! ```

mod manager;
mod notification;
mod toast;

pub use manager::{Manager, Message as NotificationMessage};
pub use notification::{Notification, NotificationText, ToastKind};
pub use toast::Toast;
