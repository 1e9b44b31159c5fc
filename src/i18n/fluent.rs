// SPDX-License-Identifier: MPL-2.0
use super::Language;
use fluent_bundle::{FluentArgs, FluentBundle, FluentResource, FluentValue};
use rust_embed::RustEmbed;
use std::collections::HashMap;

#[derive(RustEmbed)]
#[folder = "assets/i18n/"]
struct Asset;

/// Translation lookup for the active language.
pub struct I18n {
    bundles: HashMap<Language, FluentBundle<FluentResource>>,
    current: Language,
}

impl Default for I18n {
    fn default() -> Self {
        Self::new(Language::default())
    }
}

impl std::fmt::Debug for I18n {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("I18n")
            .field("current", &self.current)
            .field("bundles", &self.bundles.len())
            .finish()
    }
}

impl I18n {
    /// Loads every embedded bundle and activates `language`.
    pub fn new(language: Language) -> Self {
        let mut bundles = HashMap::new();

        for lang in Language::ALL {
            let filename = format!("{}.ftl", lang.code());
            let Some(content) = Asset::get(&filename) else {
                tracing::error!(file = %filename, "translation file missing");
                continue;
            };
            let source = String::from_utf8_lossy(content.data.as_ref()).to_string();
            let resource = match FluentResource::try_new(source) {
                Ok(resource) => resource,
                Err((resource, errors)) => {
                    tracing::warn!(file = %filename, count = errors.len(), "translation file has syntax errors");
                    resource
                }
            };
            let mut bundle = FluentBundle::new(vec![lang.langid()]);
            bundle.set_use_isolating(false);
            if let Err(errors) = bundle.add_resource(resource) {
                tracing::warn!(file = %filename, count = errors.len(), "duplicate translation entries");
            }
            bundles.insert(lang, bundle);
        }

        Self {
            bundles,
            current: language,
        }
    }

    /// Switches the active language. Takes effect on the next lookup.
    pub fn set_language(&mut self, language: Language) {
        if self.bundles.contains_key(&language) {
            self.current = language;
        }
    }

    /// Switches the active language from a code; unsupported codes are ignored.
    pub fn set_language_code(&mut self, code: &str) {
        if let Some(language) = Language::from_code(code) {
            self.set_language(language);
        }
    }

    pub fn current_language(&self) -> Language {
        self.current
    }

    /// Resolves a dot-path key, or returns the key itself when it cannot.
    pub fn tr(&self, key: &str) -> String {
        self.format(key, None).unwrap_or_else(|| key.to_string())
    }

    pub fn tr_with_args(&self, key: &str, args: &[(&str, &str)]) -> String {
        let mut fluent_args = FluentArgs::new();
        for (name, value) in args {
            fluent_args.set(*name, FluentValue::from(*value));
        }
        self.format(key, Some(&fluent_args))
            .unwrap_or_else(|| key.to_string())
    }

    fn format(&self, key: &str, args: Option<&FluentArgs>) -> Option<String> {
        let bundle = self.bundles.get(&self.current)?;

        let mut segments = key.split('.');
        let message_id = segments.next()?;
        let attribute = segments.next();
        if segments.next().is_some() {
            return None;
        }

        let message = bundle.get_message(message_id)?;
        let pattern = match attribute {
            Some(name) => message.get_attribute(name)?.value(),
            None => message.value()?,
        };

        let mut errors = vec![];
        let value = bundle.format_pattern(pattern, args, &mut errors);
        if !errors.is_empty() {
            tracing::debug!(key, count = errors.len(), "translation formatting failed");
            return None;
        }
        Some(value.into_owned())
    }
}
