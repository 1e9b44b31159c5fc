// SPDX-License-Identifier: MPL-2.0
//! `skin_lens` is a desktop client for an image-based skin-condition
//! classification service, built with the Iced GUI framework.
//!
//! The user picks or drops a photo (or chooses a gallery example), the
//! client uploads it to the backend's `/predict` endpoint and renders the
//! diagnosis, confidence, severity and per-class probabilities. The UI is
//! available in Indonesian and English.

pub mod app;
pub mod client;
pub mod config;
pub mod error;
pub mod i18n;
pub mod icon;
pub mod intake;
pub mod ui;
