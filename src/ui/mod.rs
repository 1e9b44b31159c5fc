// SPDX-License-Identifier: MPL-2.0
//! User interface components and state management.
//!
//! Components follow the Elm-style "state down, messages up" pattern: each
//! one exposes a `view` taking a context struct and, where it has behavior,
//! its own `Message` type that the application maps into its own.
//!
//! # Panels
//!
//! - [`navbar`] - Title bar with the language toggle
//! - [`intake_panel`] - Drop zone, preview, analyze button, tips
//! - [`results`] - Confidence ring, severity badge and probability bars
//! - [`gallery`] - Example gallery fed by the backend
//! - [`model_info`] - Model description and per-class metrics
//!
//! # State
//!
//! - [`analysis`] - Analysis state machine with request tickets
//! - [`notifications`] - Single auto-expiring toast
//!
//! # Shared Infrastructure
//!
//! - [`components`] - Reusable UI components (error region)
//! - [`widgets`] - Custom Iced widgets (spinner)
//! - [`styles`] - Centralized styling (buttons, containers)
//! - [`design_tokens`] - Design system constants (colors, spacing, sizing)
//! - [`theming`] - Light/Dark/System theme mode

pub mod analysis;
pub mod components;
pub mod design_tokens;
pub mod gallery;
pub mod intake_panel;
pub mod model_info;
pub mod navbar;
pub mod notifications;
pub mod results;
pub mod styles;
pub mod theming;
pub mod widgets;
