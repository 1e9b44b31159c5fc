// SPDX-License-Identifier: MPL-2.0
//! Update logic and message handlers for the application.
//!
//! Handlers mutate the state holders through [`UpdateContext`] and return the
//! follow-up work as Iced tasks.

use super::{persistence, Message};
use crate::client::{AnalysisResult, ClientError, FetchedImage, ModelDetails, PredictionClient};
use crate::config::Config;
use crate::error::AnalysisError;
use crate::i18n::fluent::I18n;
use crate::i18n::Language;
use crate::intake::{mime, Candidate, ImageIntake, IntakeError};
use crate::ui::analysis::{AnalysisState, BeginError, Outcome, Ticket};
use crate::ui::gallery::{self, Effect as GalleryEffect, Gallery};
use crate::ui::intake_panel;
use crate::ui::navbar::{self, Event as NavbarEvent};
use crate::ui::notifications::{self, Notification, ToastKind};
use iced::Task;
use std::path::PathBuf;
use std::time::Instant;

/// Why a `/set_language` request was sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncReason {
    /// Initial sync of the resolved startup language; failures are only logged.
    Startup,
    /// The user picked a language.
    UserChoice,
}

/// The `/set_language` request awaiting its reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingSync {
    pub generation: u64,
    pub reason: SyncReason,
}

/// Mutable view of the application state handed to the handlers.
pub struct UpdateContext<'a> {
    pub i18n: &'a mut I18n,
    pub config: &'a mut Config,
    pub client: &'a Option<PredictionClient>,
    pub intake: &'a mut ImageIntake,
    pub analysis: &'a mut AnalysisState,
    pub analysis_started_at: &'a mut Option<Instant>,
    pub gallery: &'a mut Gallery,
    pub model_details: &'a mut Option<ModelDetails>,
    pub notifications: &'a mut notifications::Manager,
    pub pending_sync: &'a mut Option<PendingSync>,
    pub sync_generation: &'a mut u64,
}

/// Toast for a failed analysis: the server's message verbatim when it sent
/// one, otherwise the localized generic message.
pub fn analysis_error_notification(error: &AnalysisError) -> Notification {
    match error.server_message() {
        Some(message) => Notification::verbatim(ToastKind::Error, message),
        None => Notification::error(error.i18n_key()),
    }
}

/// Toast for a rejected or unreadable candidate.
pub fn intake_error_notification(error: &IntakeError, max_upload_bytes: usize) -> Notification {
    Notification::error(error.i18n_key())
        .with_arg("max_mb", intake_panel::max_mb(max_upload_bytes))
}

fn reset_analysis(ctx: &mut UpdateContext<'_>) {
    ctx.analysis.reset();
    *ctx.analysis_started_at = None;
}

// =============================================================================
// Intake
// =============================================================================

pub fn handle_intake_message(
    ctx: &mut UpdateContext<'_>,
    message: intake_panel::Message,
) -> Task<Message> {
    match message {
        intake_panel::Message::OpenFileDialog => handle_open_file_dialog(),
        intake_panel::Message::RemoveImage => handle_remove_image(ctx),
        intake_panel::Message::Analyze => handle_analyze(ctx),
    }
}

/// Opens the native file picker filtered to image types.
pub fn handle_open_file_dialog() -> Task<Message> {
    Task::perform(
        async move {
            rfd::AsyncFileDialog::new()
                .add_filter("Images", mime::IMAGE_EXTENSIONS)
                .pick_file()
                .await
                .map(|handle| handle.path().to_path_buf())
        },
        Message::OpenFileDialogResult,
    )
}

/// Reads `path` in the background.
pub fn load_path(path: PathBuf, max_bytes: usize) -> Task<Message> {
    Task::perform(Candidate::load(path, max_bytes), Message::CandidateLoaded)
}

pub fn handle_open_file_dialog_result(path: Option<PathBuf>, max_bytes: usize) -> Task<Message> {
    match path {
        Some(path) => load_path(path, max_bytes),
        // User cancelled the dialog
        None => Task::none(),
    }
}

pub fn handle_file_dropped(path: PathBuf, max_bytes: usize) -> Task<Message> {
    if path.is_dir() {
        tracing::debug!(path = %path.display(), "ignoring dropped directory");
        return Task::none();
    }
    load_path(path, max_bytes)
}

pub fn handle_candidate_loaded(
    ctx: &mut UpdateContext<'_>,
    result: Result<Candidate, IntakeError>,
) -> Task<Message> {
    match result {
        Ok(candidate) => accept_candidate(ctx, candidate),
        Err(error) => {
            tracing::warn!(%error, "failed to read image");
            ctx.notifications
                .show(intake_error_notification(&error, ctx.intake.max_bytes()));
        }
    }
    Task::none()
}

/// Submits `candidate`; on acceptance the analysis goes back to idle.
fn accept_candidate(ctx: &mut UpdateContext<'_>, candidate: Candidate) {
    let filename = candidate.filename.clone();
    match ctx.intake.submit(candidate).map(|image| image.id) {
        Ok(id) => {
            tracing::info!(id, filename = %filename, "image selected");
            reset_analysis(ctx);
        }
        Err(error) => {
            tracing::info!(%error, filename = %filename, "image rejected");
            ctx.notifications
                .show(intake_error_notification(&error, ctx.intake.max_bytes()));
        }
    }
}

fn handle_remove_image(ctx: &mut UpdateContext<'_>) -> Task<Message> {
    if let Some(id) = ctx.intake.remove() {
        tracing::debug!(id, "image removed");
        reset_analysis(ctx);
        ctx.notifications.show(Notification::success("toast_removed"));
    }
    Task::none()
}

// =============================================================================
// Analysis
// =============================================================================

fn handle_analyze(ctx: &mut UpdateContext<'_>) -> Task<Message> {
    let ticket = match ctx.analysis.begin(ctx.intake.current_id()) {
        Ok(ticket) => ticket,
        Err(BeginError::NoImage) => return Task::none(),
        Err(BeginError::InFlight) => {
            tracing::debug!("analysis already in flight");
            return Task::none();
        }
    };
    *ctx.analysis_started_at = Some(Instant::now());

    let Some(client) = ctx.client.clone() else {
        return handle_analysis_finished(ctx, ticket, Err(AnalysisError::NetworkFailure));
    };
    let Some(image) = ctx.intake.current() else {
        return Task::none();
    };
    let upload = image.upload();
    tracing::info!(id = image.id, size = image.size(), "sending image for analysis");

    Task::perform(
        async move { client.predict(upload).await.map_err(AnalysisError::from) },
        move |result| Message::AnalysisFinished { ticket, result },
    )
}

pub fn handle_analysis_finished(
    ctx: &mut UpdateContext<'_>,
    ticket: Ticket,
    result: Result<AnalysisResult, AnalysisError>,
) -> Task<Message> {
    match ctx.analysis.complete(ticket, result, Instant::now()) {
        Outcome::Succeeded => {
            *ctx.analysis_started_at = None;
        }
        Outcome::Failed(error) => {
            *ctx.analysis_started_at = None;
            tracing::warn!(%error, "analysis failed");
            ctx.notifications.show(analysis_error_notification(&error));
        }
        Outcome::Discarded => {}
    }
    Task::none()
}

pub fn handle_dismiss_error(ctx: &mut UpdateContext<'_>) -> Task<Message> {
    if ctx.analysis.error().is_some() {
        reset_analysis(ctx);
    }
    Task::none()
}

// =============================================================================
// Gallery
// =============================================================================

/// Starts a fresh load of the example list.
pub fn load_gallery(ctx: &mut UpdateContext<'_>) -> Task<Message> {
    let generation = ctx.gallery.begin_load();
    match ctx.client.clone() {
        Some(client) => Task::perform(async move { client.examples().await }, move |result| {
            Message::Gallery(gallery::Message::Loaded { generation, result })
        }),
        None => {
            ctx.gallery.update(gallery::Message::Loaded {
                generation,
                result: Err(ClientError::InvalidUrl("no backend configured".to_string())),
            });
            Task::none()
        }
    }
}

pub fn handle_gallery_message(
    ctx: &mut UpdateContext<'_>,
    message: gallery::Message,
) -> Task<Message> {
    let effect = ctx.gallery.update(message);
    let Some(client) = ctx.client.clone() else {
        return Task::none();
    };
    let max_bytes = ctx.intake.max_bytes();

    match effect {
        GalleryEffect::None => Task::none(),
        GalleryEffect::FetchThumbnails { generation, urls } => {
            Task::batch(urls.into_iter().map(|(index, url)| {
                let client = client.clone();
                Task::perform(
                    async move { client.fetch_image(&url, max_bytes).await },
                    move |result| {
                        Message::Gallery(gallery::Message::ThumbnailLoaded {
                            generation,
                            index,
                            result,
                        })
                    },
                )
            }))
        }
        GalleryEffect::LoadExample { url, label } => {
            tracing::info!(url = %url, "loading example");
            Task::perform(
                async move { client.fetch_image(&url, max_bytes).await },
                move |result| Message::ExampleDownloaded { label, result },
            )
        }
    }
}

/// Feeds a downloaded example into the intake. Failures leave the current
/// image and analysis untouched.
pub fn handle_example_downloaded(
    ctx: &mut UpdateContext<'_>,
    label: &str,
    result: Result<FetchedImage, ClientError>,
) -> Task<Message> {
    let candidate = result
        .map_err(|error| error.to_string())
        .and_then(|fetched| Candidate::from_download(fetched, label).map_err(|e| e.to_string()));

    match candidate {
        Ok(candidate) => accept_candidate(ctx, candidate),
        Err(error) => {
            tracing::warn!(%error, label, "failed to load example");
            ctx.notifications
                .show(Notification::error("error_example_load"));
        }
    }
    Task::none()
}

// =============================================================================
// Language
// =============================================================================

pub fn handle_navbar_message(ctx: &mut UpdateContext<'_>, message: navbar::Message) -> Task<Message> {
    match navbar::update(message, ctx.i18n.current_language()) {
        NavbarEvent::None => Task::none(),
        NavbarEvent::LanguageChanged(language) => {
            tracing::info!(%language, "language changed");
            persistence::apply_language(ctx.i18n, ctx.config, language);
            if let Some(key) = persistence::persist_config(ctx.config) {
                ctx.notifications.show(Notification::error(key));
            }
            sync_language(ctx, language, SyncReason::UserChoice)
        }
    }
}

/// Posts `language` to the backend session.
pub fn sync_language(
    ctx: &mut UpdateContext<'_>,
    language: Language,
    reason: SyncReason,
) -> Task<Message> {
    let Some(client) = ctx.client.clone() else {
        return Task::none();
    };

    *ctx.sync_generation += 1;
    let generation = *ctx.sync_generation;
    *ctx.pending_sync = Some(PendingSync { generation, reason });

    Task::perform(
        async move { client.set_language(language).await },
        move |result| Message::LanguageSynced { generation, result },
    )
}

/// A successful reply replaces the server's model description. After a user
/// choice the stale-language result is also cleared and the gallery
/// reloaded. Replies to superseded requests are ignored.
pub fn handle_language_synced(
    ctx: &mut UpdateContext<'_>,
    generation: u64,
    result: Result<Option<ModelDetails>, ClientError>,
) -> Task<Message> {
    let Some(pending) = *ctx.pending_sync else {
        return Task::none();
    };
    if pending.generation != generation {
        tracing::debug!(generation, "ignoring superseded language sync");
        return Task::none();
    }
    *ctx.pending_sync = None;

    match (result, pending.reason) {
        (Ok(details), SyncReason::UserChoice) => {
            *ctx.model_details = details;
            reset_analysis(ctx);
            load_gallery(ctx)
        }
        (Ok(details), SyncReason::Startup) => {
            *ctx.model_details = details;
            Task::none()
        }
        (Err(error), SyncReason::UserChoice) => {
            tracing::warn!(%error, "failed to sync language with backend");
            ctx.notifications
                .show(Notification::error("error_language_sync"));
            Task::none()
        }
        (Err(error), SyncReason::Startup) => {
            tracing::warn!(%error, "initial language sync failed");
            Task::none()
        }
    }
}

pub fn handle_tick(ctx: &mut UpdateContext<'_>, now: Instant) -> Task<Message> {
    ctx.notifications.tick(now);
    Task::none()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::analysis::Status;
    use crate::ui::notifications::NotificationText;
    use std::collections::BTreeMap;

    struct Fixture {
        i18n: I18n,
        config: Config,
        client: Option<PredictionClient>,
        intake: ImageIntake,
        analysis: AnalysisState,
        analysis_started_at: Option<Instant>,
        gallery: Gallery,
        model_details: Option<ModelDetails>,
        notifications: notifications::Manager,
        pending_sync: Option<PendingSync>,
        sync_generation: u64,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                i18n: I18n::new(Language::En),
                config: Config::default(),
                client: None,
                intake: ImageIntake::new(1024),
                analysis: AnalysisState::new(),
                analysis_started_at: None,
                gallery: Gallery::new(),
                model_details: None,
                notifications: notifications::Manager::new(),
                pending_sync: None,
                sync_generation: 0,
            }
        }

        fn ctx(&mut self) -> UpdateContext<'_> {
            UpdateContext {
                i18n: &mut self.i18n,
                config: &mut self.config,
                client: &self.client,
                intake: &mut self.intake,
                analysis: &mut self.analysis,
                analysis_started_at: &mut self.analysis_started_at,
                gallery: &mut self.gallery,
                model_details: &mut self.model_details,
                notifications: &mut self.notifications,
                pending_sync: &mut self.pending_sync,
                sync_generation: &mut self.sync_generation,
            }
        }
    }

    fn candidate() -> Candidate {
        Candidate::new(vec![1, 2, 3], "image/png", "a.png")
    }

    fn result() -> AnalysisResult {
        AnalysisResult {
            name: "Panu".to_string(),
            description: String::new(),
            confidence: 0.8,
            severity: "Ringan".to_string(),
            action: String::new(),
            sorted_probs: vec![("panu".to_string(), 0.8)],
            class_colors: BTreeMap::new(),
            color: None,
            image_url: None,
        }
    }

    #[test]
    fn server_message_is_shown_verbatim() {
        let notification =
            analysis_error_notification(&AnalysisError::BackendRejected("Bad image".to_string()));
        assert_eq!(
            notification.text(),
            &NotificationText::Verbatim("Bad image".to_string())
        );
    }

    #[test]
    fn generic_errors_use_their_key() {
        let notification = analysis_error_notification(&AnalysisError::NetworkFailure);
        assert!(matches!(
            notification.text(),
            NotificationText::Key { key, .. } if key == "error_network"
        ));
    }

    #[test]
    fn accepted_image_resets_analysis() {
        let mut fixture = Fixture::new();
        let mut ctx = fixture.ctx();
        let _ = handle_candidate_loaded(&mut ctx, Ok(candidate()));
        let id = ctx.intake.current_id();
        let ticket = ctx.analysis.begin(id).expect("begin");
        let _ = handle_analysis_finished(&mut ctx, ticket, Ok(result()));
        assert_eq!(ctx.analysis.status(), Status::Success);

        let _ = handle_candidate_loaded(&mut ctx, Ok(candidate()));
        assert_eq!(ctx.analysis.status(), Status::Idle);
        assert!(ctx.intake.current().is_some());
    }

    #[test]
    fn rejected_image_keeps_state_and_shows_toast() {
        let mut fixture = Fixture::new();
        let mut ctx = fixture.ctx();
        let _ = handle_candidate_loaded(&mut ctx, Ok(candidate()));
        let before = ctx.intake.current_id();

        let _ = handle_candidate_loaded(
            &mut ctx,
            Ok(Candidate::new(vec![0; 10], "text/plain", "notes.txt")),
        );
        assert_eq!(ctx.intake.current_id(), before);
        assert!(ctx.notifications.is_visible());
    }

    #[test]
    fn remove_resets_and_confirms() {
        let mut fixture = Fixture::new();
        let mut ctx = fixture.ctx();
        let _ = handle_candidate_loaded(&mut ctx, Ok(candidate()));
        let _ = handle_intake_message(&mut ctx, intake_panel::Message::RemoveImage);

        assert!(ctx.intake.current().is_none());
        assert_eq!(ctx.analysis.status(), Status::Idle);
        let toast = ctx.notifications.current().expect("toast");
        assert_eq!(toast.kind(), ToastKind::Success);
    }

    #[test]
    fn analyze_without_backend_fails_with_network_error() {
        let mut fixture = Fixture::new();
        let mut ctx = fixture.ctx();
        let _ = handle_candidate_loaded(&mut ctx, Ok(candidate()));
        let _ = handle_intake_message(&mut ctx, intake_panel::Message::Analyze);

        assert_eq!(ctx.analysis.error(), Some(&AnalysisError::NetworkFailure));
        assert!(ctx.notifications.is_visible());
        assert!(ctx.analysis_started_at.is_none());
    }

    #[test]
    fn dismiss_error_returns_to_idle() {
        let mut fixture = Fixture::new();
        let mut ctx = fixture.ctx();
        let _ = handle_candidate_loaded(&mut ctx, Ok(candidate()));
        let _ = handle_intake_message(&mut ctx, intake_panel::Message::Analyze);
        let _ = handle_dismiss_error(&mut ctx);
        assert_eq!(ctx.analysis.status(), Status::Idle);
    }

    #[test]
    fn failed_example_download_keeps_current_image() {
        let mut fixture = Fixture::new();
        let mut ctx = fixture.ctx();
        let _ = handle_candidate_loaded(&mut ctx, Ok(candidate()));
        let before = ctx.intake.current_id();

        let _ = handle_example_downloaded(
            &mut ctx,
            "acne",
            Err(ClientError::Network("refused".to_string())),
        );
        assert_eq!(ctx.intake.current_id(), before);
        assert!(matches!(
            ctx.notifications.current().map(Notification::text),
            Some(NotificationText::Key { key, .. }) if key == "error_example_load"
        ));
    }

    #[test]
    fn language_sync_success_clears_result_and_reloads_gallery() {
        let mut fixture = Fixture::new();
        let mut ctx = fixture.ctx();
        let _ = handle_candidate_loaded(&mut ctx, Ok(candidate()));
        let ticket = ctx.analysis.begin(ctx.intake.current_id()).expect("begin");
        let _ = handle_analysis_finished(&mut ctx, ticket, Ok(result()));

        *ctx.pending_sync = Some(PendingSync {
            generation: 1,
            reason: SyncReason::UserChoice,
        });
        let generation_before = ctx.gallery.generation();
        let _ = handle_language_synced(&mut ctx, 1, Ok(None));

        assert_eq!(ctx.analysis.status(), Status::Idle);
        assert!(ctx.intake.current().is_some());
        assert_eq!(ctx.gallery.generation(), generation_before + 1);
        assert!(ctx.pending_sync.is_none());
    }

    #[test]
    fn language_sync_stores_model_details() {
        let mut fixture = Fixture::new();
        let mut ctx = fixture.ctx();
        let details = ModelDetails::from_markup("<strong>Model Size:</strong> 9.8 MB");
        *ctx.pending_sync = Some(PendingSync {
            generation: 1,
            reason: SyncReason::Startup,
        });

        let _ = handle_language_synced(&mut ctx, 1, Ok(details.clone()));
        assert!(details.is_some());
        assert_eq!(*ctx.model_details, details);

        // A later reply without a description drops the old-language one.
        *ctx.pending_sync = Some(PendingSync {
            generation: 2,
            reason: SyncReason::UserChoice,
        });
        let _ = handle_language_synced(&mut ctx, 2, Ok(None));
        assert!(ctx.model_details.is_none());
    }

    #[test]
    fn failed_language_sync_keeps_model_details() {
        let mut fixture = Fixture::new();
        let mut ctx = fixture.ctx();
        let details = ModelDetails::from_markup("Model File: best.pt");
        *ctx.model_details = details.clone();
        *ctx.pending_sync = Some(PendingSync {
            generation: 1,
            reason: SyncReason::UserChoice,
        });

        let _ = handle_language_synced(&mut ctx, 1, Err(ClientError::Rejected(None)));
        assert_eq!(*ctx.model_details, details);
    }

    #[test]
    fn language_sync_failure_shows_toast_but_keeps_language() {
        let mut fixture = Fixture::new();
        let mut ctx = fixture.ctx();
        persistence::apply_language(ctx.i18n, ctx.config, Language::Id);
        *ctx.pending_sync = Some(PendingSync {
            generation: 3,
            reason: SyncReason::UserChoice,
        });

        let _ = handle_language_synced(&mut ctx, 3, Err(ClientError::Rejected(None)));
        assert_eq!(ctx.i18n.current_language(), Language::Id);
        assert!(ctx.notifications.is_visible());
    }

    #[test]
    fn superseded_language_sync_is_ignored() {
        let mut fixture = Fixture::new();
        let mut ctx = fixture.ctx();
        *ctx.pending_sync = Some(PendingSync {
            generation: 2,
            reason: SyncReason::UserChoice,
        });

        let _ = handle_language_synced(&mut ctx, 1, Err(ClientError::Rejected(None)));
        assert!(!ctx.notifications.is_visible());
        assert!(ctx.pending_sync.is_some());
    }

    #[test]
    fn startup_sync_failure_is_silent() {
        let mut fixture = Fixture::new();
        let mut ctx = fixture.ctx();
        *ctx.pending_sync = Some(PendingSync {
            generation: 1,
            reason: SyncReason::Startup,
        });

        let _ = handle_language_synced(&mut ctx, 1, Err(ClientError::Network("down".into())));
        assert!(!ctx.notifications.is_visible());
    }
}
