// SPDX-License-Identifier: MPL-2.0
//! Configuration persistence logic.
//!
//! The only preference changed from the UI is the language.

use crate::config::{self, Config};
use crate::i18n::fluent::I18n;
use crate::i18n::Language;

/// Key of the toast shown when the config file cannot be written.
pub const SAVE_ERROR_KEY: &str = "notification_config_save_error";

/// Applies `language` at once and records it in `config`.
pub fn apply_language(i18n: &mut I18n, config: &mut Config, language: Language) {
    i18n.set_language(language);
    config.general.language = Some(language.code().to_string());
}

/// Writes `config` to `settings.toml`.
///
/// Returns the warning key to show when saving fails. Skipped under test so
/// unit tests never touch the user's config directory.
pub fn persist_config(config: &Config) -> Option<&'static str> {
    if cfg!(test) {
        return None;
    }

    match config::save(config) {
        Ok(()) => None,
        Err(error) => {
            tracing::warn!(%error, "failed to save config");
            Some(SAVE_ERROR_KEY)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_language_switches_lookup_and_config() {
        let mut i18n = I18n::new(Language::Id);
        let mut config = Config::default();

        apply_language(&mut i18n, &mut config, Language::En);

        assert_eq!(i18n.current_language(), Language::En);
        assert_eq!(config.general.language.as_deref(), Some("en"));
        assert_eq!(persist_config(&config), None);
    }
}
