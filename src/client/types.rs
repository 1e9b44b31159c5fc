// SPDX-License-Identifier: MPL-2.0
//! Wire types of the classification backend.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Outcome of one successful prediction.
///
/// Unknown fields sent by the backend (for example its own translation
/// table) are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Localized display name of the top class.
    pub name: String,

    #[serde(default)]
    pub description: String,

    /// Probability of the top class, in `[0, 1]`.
    #[serde(deserialize_with = "deserialize_confidence")]
    pub confidence: f64,

    /// Localized severity label, used to colour the badge.
    #[serde(default)]
    pub severity: String,

    /// Recommended next step.
    #[serde(default)]
    pub action: String,

    /// `(class_name, probability)` pairs, highest probability first.
    #[serde(default)]
    pub sorted_probs: Vec<(String, f64)>,

    /// Class name to `#rrggbb` colour.
    #[serde(default)]
    pub class_colors: BTreeMap<String, String>,

    /// Colour of the top class. Accepted but not used by the renderer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    /// Server-side location of the uploaded image. Accepted but not used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl AnalysisResult {
    /// Returns `true` when every probability is a finite number.
    pub(crate) fn is_well_formed(&self) -> bool {
        self.confidence.is_finite() && self.sorted_probs.iter().all(|(_, p)| p.is_finite())
    }
}

/// Body of `POST /predict`, on success and on failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct PredictResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub result: Option<serde_json::Value>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Body of a non-2xx response; only the `error` field matters.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct ErrorResponse {
    #[serde(default)]
    pub error: Option<String>,
}

/// One entry of `GET /examples`, with `url` already made absolute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExampleEntry {
    pub url: String,
    #[serde(rename = "class")]
    pub class_name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct ExamplesResponse {
    #[serde(default)]
    pub examples: Vec<ExampleEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct SetLanguageRequest<'a> {
    pub lang: &'a str,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct SetLanguageResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub translations: LanguageTranslations,
}

/// The part of the server's translation table the client uses.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct LanguageTranslations {
    /// HTML fragment describing the deployed model.
    #[serde(default)]
    pub model_info_text: Option<String>,
}

/// Model description reported by the server, one `Label: value` per line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelDetails {
    lines: Vec<String>,
}

impl ModelDetails {
    /// Extracts the text lines of the server's HTML fragment.
    ///
    /// `<br>`, `<div>`, `<p>`, `<li>` and `<tr>` end a line; every other tag
    /// is dropped. Returns `None` when no text is left.
    pub fn from_markup(markup: &str) -> Option<Self> {
        let mut text = String::with_capacity(markup.len());
        let mut rest = markup;

        while let Some(start) = rest.find('<') {
            text.push_str(&rest[..start]);
            let Some(end) = rest[start..].find('>') else {
                rest = "";
                break;
            };
            let tag = &rest[start + 1..start + end];
            let name: String = tag
                .trim_start_matches('/')
                .chars()
                .take_while(char::is_ascii_alphanumeric)
                .collect::<String>()
                .to_ascii_lowercase();
            if matches!(name.as_str(), "br" | "div" | "p" | "li" | "tr") {
                text.push('\n');
            }
            rest = &rest[start + end + 1..];
        }
        text.push_str(rest);

        let lines: Vec<String> = decode_entities(&text)
            .lines()
            .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
            .filter(|line| !line.is_empty())
            .collect();

        (!lines.is_empty()).then_some(Self { lines })
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Splits each line at its first colon into `(label, value)`.
    ///
    /// Lines without a colon yield an empty label.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.lines.iter().map(|line| match line.split_once(':') {
            Some((label, value)) => (label.trim(), value.trim()),
            None => ("", line.as_str()),
        })
    }
}

fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

/// Raw bytes of a downloaded image.
#[derive(Debug, Clone)]
pub struct FetchedImage {
    pub bytes: Vec<u8>,
    /// `Content-Type` header, without parameters.
    pub content_type: Option<String>,
}

/// Accepts the confidence either as a JSON number or as a numeric string.
fn deserialize_confidence<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(f64),
        Text(String),
    }

    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(value) => Ok(value),
        NumberOrString::Text(text) => text
            .trim()
            .parse::<f64>()
            .map_err(|_| D::Error::custom(format!("invalid confidence: {}", text))),
    }
}
