// SPDX-License-Identifier: MPL-2.0
//! Application root state and orchestration.
//!
//! The `App` struct composes the independent state holders (intake, analysis,
//! gallery, toast, localization) and translates messages into side effects
//! like HTTP requests or config persistence. Handlers live in [`update`].

mod message;
pub mod paths;
mod persistence;
mod subscription;
mod tab;
mod update;
mod view;

pub use message::{Flags, Message};
pub use tab::Tab;

use crate::client::{ModelDetails, PredictionClient};
use crate::config::{self, Config};
use crate::i18n::fluent::I18n;
use crate::i18n;
use crate::intake::ImageIntake;
use crate::ui::analysis::AnalysisState;
use crate::ui::gallery::Gallery;
use crate::ui::notifications::{self, Notification};
use crate::ui::theming::ThemeMode;
use iced::{window, Element, Subscription, Task, Theme};
use std::fmt;
use std::path::PathBuf;
use std::time::Instant;
use update::{PendingSync, SyncReason, UpdateContext};

/// Root Iced application state.
pub struct App {
    i18n: I18n,
    /// Config as loaded from disk; CLI overrides are not written back.
    config: Config,
    theme_mode: ThemeMode,
    /// `None` when the backend URL is unusable; every request then fails.
    client: Option<PredictionClient>,
    intake: ImageIntake,
    analysis: AnalysisState,
    analysis_started_at: Option<Instant>,
    gallery: Gallery,
    /// Model description from the last `/set_language` reply.
    model_details: Option<ModelDetails>,
    tab: Tab,
    notifications: notifications::Manager,
    pending_sync: Option<PendingSync>,
    sync_generation: u64,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("language", &self.i18n.current_language())
            .field("has_image", &self.intake.current().is_some())
            .field("status", &self.analysis.status())
            .field("tab", &self.tab)
            .finish()
    }
}

pub const WINDOW_DEFAULT_HEIGHT: u32 = 760;
pub const WINDOW_DEFAULT_WIDTH: u32 = 1100;
pub const MIN_WINDOW_HEIGHT: u32 = 560;
pub const MIN_WINDOW_WIDTH: u32 = 820;

/// Builds the window settings.
pub fn window_settings() -> window::Settings {
    let icon = crate::icon::load_window_icon();

    window::Settings {
        size: iced::Size::new(WINDOW_DEFAULT_WIDTH as f32, WINDOW_DEFAULT_HEIGHT as f32),
        min_size: Some(iced::Size::new(
            MIN_WINDOW_WIDTH as f32,
            MIN_WINDOW_HEIGHT as f32,
        )),
        icon,
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    use std::cell::RefCell;

    // iced 0.14 requires a `Fn` boot function; the flags are consumed once
    // and later calls fall back to defaults.
    let boot_state = RefCell::new(Some(flags));
    let boot = move || {
        let flags = boot_state.borrow_mut().take().unwrap_or_default();
        App::new(flags)
    };

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(window_settings())
        .subscription(App::subscription)
        .run()
}

impl App {
    /// Initializes application state and kicks off the startup requests:
    /// language sync, example list and the optional preloaded image.
    fn new(flags: Flags) -> (Self, Task<Message>) {
        let (config, config_warning) = config::load();
        let language = i18n::resolve_language(flags.lang.as_deref(), &config);
        let base_url = flags
            .server
            .clone()
            .unwrap_or_else(|| config.server.base_url().to_string());

        let client = match PredictionClient::new(&base_url, config.server.request_timeout()) {
            Ok(client) => {
                tracing::info!(base_url = %client.base_url(), "backend configured");
                Some(client)
            }
            Err(error) => {
                tracing::error!(%error, base_url = %base_url, "unusable backend url");
                None
            }
        };

        let mut app = App {
            i18n: I18n::new(language),
            theme_mode: config.general.theme_mode,
            intake: ImageIntake::new(config.server.max_upload_bytes()),
            config,
            client,
            analysis: AnalysisState::new(),
            analysis_started_at: None,
            gallery: Gallery::new(),
            model_details: None,
            tab: Tab::default(),
            notifications: notifications::Manager::new(),
            pending_sync: None,
            sync_generation: 0,
        };

        if let Some(key) = config_warning {
            app.notifications.show(Notification::error(key));
        }

        let mut tasks = Vec::new();
        {
            let mut ctx = app.update_context();
            tasks.push(update::sync_language(&mut ctx, language, SyncReason::Startup));
            tasks.push(update::load_gallery(&mut ctx));
        }
        if let Some(path) = flags.file_path {
            tasks.push(update::load_path(PathBuf::from(path), app.intake.max_bytes()));
        }

        (app, Task::batch(tasks))
    }

    fn title(&self) -> String {
        self.i18n.tr("title")
    }

    fn theme(&self) -> Theme {
        self.theme_mode.theme()
    }

    fn update_context(&mut self) -> UpdateContext<'_> {
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

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Navbar(navbar_message) => {
                update::handle_navbar_message(&mut self.update_context(), navbar_message)
            }
            Message::Intake(intake_message) => {
                update::handle_intake_message(&mut self.update_context(), intake_message)
            }
            Message::Gallery(gallery_message) => {
                update::handle_gallery_message(&mut self.update_context(), gallery_message)
            }
            Message::Notification(notification_message) => {
                self.notifications.handle_message(&notification_message);
                Task::none()
            }
            Message::TabSelected(tab) => {
                self.tab = tab;
                Task::none()
            }
            Message::OpenFileDialogResult(path) => {
                update::handle_open_file_dialog_result(path, self.intake.max_bytes())
            }
            Message::FileDropped(path) => {
                update::handle_file_dropped(path, self.intake.max_bytes())
            }
            Message::CandidateLoaded(result) => {
                update::handle_candidate_loaded(&mut self.update_context(), result)
            }
            Message::ExampleDownloaded { label, result } => {
                update::handle_example_downloaded(&mut self.update_context(), &label, result)
            }
            Message::AnalysisFinished { ticket, result } => {
                update::handle_analysis_finished(&mut self.update_context(), ticket, result)
            }
            Message::LanguageSynced { generation, result } => {
                update::handle_language_synced(&mut self.update_context(), generation, result)
            }
            Message::DismissError => update::handle_dismiss_error(&mut self.update_context()),
            Message::Tick(now) => update::handle_tick(&mut self.update_context(), now),
        }
    }

    fn view(&self) -> Element<'_, Message> {
        view::view(view::ViewContext {
            i18n: &self.i18n,
            intake: &self.intake,
            analysis: &self.analysis,
            analysis_started_at: self.analysis_started_at,
            gallery: &self.gallery,
            model_details: self.model_details.as_ref(),
            tab: self.tab,
            notifications: &self.notifications,
        })
    }

    fn subscription(&self) -> Subscription<Message> {
        Subscription::batch([
            subscription::create_event_subscription(),
            subscription::create_tick_subscription(
                self.notifications.is_visible(),
                self.analysis.is_analyzing(),
                self.analysis.is_animating(Instant::now()),
            ),
        ])
    }
}
