// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the application.

use crate::client::{AnalysisResult, ClientError, FetchedImage, ModelDetails};
use crate::error::AnalysisError;
use crate::intake::{Candidate, IntakeError};
use crate::ui::analysis::Ticket;
use crate::ui::gallery;
use crate::ui::intake_panel;
use crate::ui::navbar;
use crate::ui::notifications;
use std::path::PathBuf;
use std::time::Instant;

use super::Tab;

/// Top-level messages consumed by `App::update`. The variants forward
/// lower-level component messages while keeping a single update entrypoint.
#[derive(Debug, Clone)]
pub enum Message {
    Navbar(navbar::Message),
    Intake(intake_panel::Message),
    Gallery(gallery::Message),
    Notification(notifications::NotificationMessage),
    TabSelected(Tab),
    /// Result from the open file dialog.
    OpenFileDialogResult(Option<PathBuf>),
    /// A file was dropped on the window.
    FileDropped(PathBuf),
    /// A file from the dialog, a drop or the command line has been read.
    CandidateLoaded(Result<Candidate, IntakeError>),
    /// A gallery example has been downloaded.
    ExampleDownloaded {
        label: String,
        result: Result<FetchedImage, ClientError>,
    },
    AnalysisFinished {
        ticket: Ticket,
        result: Result<AnalysisResult, AnalysisError>,
    },
    /// Reply of `/set_language` for `generation`.
    LanguageSynced {
        generation: u64,
        result: Result<Option<ModelDetails>, ClientError>,
    },
    /// The user closed the error region.
    DismissError,
    Tick(Instant), // drives toast expiry and animations
}

/// Runtime flags passed in from the CLI to tweak startup behavior.
#[derive(Debug, Default)]
pub struct Flags {
    /// Optional language override (`en` or `id`).
    pub lang: Option<String>,
    /// Optional backend base URL, takes precedence over the config file.
    pub server: Option<String>,
    /// Optional image path to preload on startup.
    pub file_path: Option<String>,
    /// Optional config directory override (for settings.toml).
    /// Takes precedence over `SKIN_LENS_CONFIG_DIR` environment variable.
    pub config_dir: Option<String>,
}
