// SPDX-License-Identifier: MPL-2.0
//! Internationalization (i18n) support for the application.
//!
//! Translations are Fluent (`.ftl`) resources embedded in the binary. Keys are
//! dot paths: `"tabs.examples"` names the `examples` attribute of the `tabs`
//! message. Unknown keys resolve to themselves.

pub mod fluent;

use crate::config::Config;
use std::fmt;
use unic_langid::LanguageIdentifier;

/// A UI language supported by both the client and the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Language {
    /// English.
    En,
    /// Indonesian, the default.
    #[default]
    Id,
}

impl Language {
    /// Every supported language, in the order shown by the language switcher.
    pub const ALL: [Language; 2] = [Language::Id, Language::En];

    /// Two-letter code used on the wire and in the config file.
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Id => "id",
        }
    }

    /// Parses a language code or a full locale tag (`en-US`, `id_ID`).
    ///
    /// Returns `None` for anything that is not English or Indonesian.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        let normalized = code.trim().replace('_', "-");
        let langid = normalized.parse::<LanguageIdentifier>().ok()?;
        match langid.language.as_str() {
            "en" => Some(Language::En),
            "id" => Some(Language::Id),
            _ => None,
        }
    }

    /// Locale identifier of the embedded bundle for this language.
    #[must_use]
    pub fn langid(self) -> LanguageIdentifier {
        self.code().parse().unwrap_or_default()
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Picks the startup language: CLI, then config, then the OS locale, then
/// the default.
pub fn resolve_language(cli_lang: Option<&str>, config: &Config) -> Language {
    resolve_language_with_os(cli_lang, config, sys_locale::get_locale().as_deref())
}

fn resolve_language_with_os(
    cli_lang: Option<&str>,
    config: &Config,
    os_locale: Option<&str>,
) -> Language {
    cli_lang
        .and_then(Language::from_code)
        .or_else(|| {
            config
                .general
                .language
                .as_deref()
                .and_then(Language::from_code)
        })
        .or_else(|| os_locale.and_then(Language::from_code))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_language(lang: Option<&str>) -> Config {
        let mut config = Config::default();
        config.general.language = lang.map(str::to_string);
        config
    }

    #[test]
    fn from_code_accepts_locale_tags() {
        assert_eq!(Language::from_code("en"), Some(Language::En));
        assert_eq!(Language::from_code("en-US"), Some(Language::En));
        assert_eq!(Language::from_code("id_ID"), Some(Language::Id));
        assert_eq!(Language::from_code("fr"), None);
        assert_eq!(Language::from_code(""), None);
    }

    #[test]
    fn cli_language_wins() {
        let config = config_with_language(Some("id"));
        assert_eq!(
            resolve_language_with_os(Some("en"), &config, Some("id-ID")),
            Language::En
        );
    }

    #[test]
    fn config_language_beats_os_locale() {
        let config = config_with_language(Some("en"));
        assert_eq!(
            resolve_language_with_os(None, &config, Some("id-ID")),
            Language::En
        );
    }

    #[test]
    fn unsupported_values_fall_through_to_os_locale() {
        let config = config_with_language(Some("de"));
        assert_eq!(
            resolve_language_with_os(Some("fr"), &config, Some("en-GB")),
            Language::En
        );
    }

    #[test]
    fn default_is_indonesian() {
        let config = config_with_language(None);
        assert_eq!(
            resolve_language_with_os(None, &config, Some("ja-JP")),
            Language::Id
        );
        assert_eq!(resolve_language_with_os(None, &config, None), Language::Id);
    }
}
