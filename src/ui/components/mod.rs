// SPDX-License-Identifier: MPL-2.0
//! Reusable UI components shared across panels.
//!
//! - [`error_display`] - Inline error region with an optional action

pub mod error_display;
