// SPDX-License-Identifier: MPL-2.0
//! Model information tab: description and per-class test metrics.
//!
//! The architecture and file details come from the server when its
//! `/set_language` reply carried them; the bundled text is the fallback.

use crate::client::ModelDetails;
use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{palette, spacing, typography};
use crate::ui::results::class_label;
use crate::ui::styles;
use iced::widget::{rule, Column, Container, Row, Text};
use iced::{Element, Length};

/// Test-set metrics of one class, in percent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassPerformance {
    pub class_name: &'static str,
    pub precision: f32,
    pub recall: f32,
    pub f1: f32,
}

/// Metrics of the deployed classifier.
pub const MODEL_PERFORMANCE: [ClassPerformance; 5] = [
    ClassPerformance {
        class_name: "acne",
        precision: 100.0,
        recall: 100.0,
        f1: 100.0,
    },
    ClassPerformance {
        class_name: "eksim",
        precision: 100.0,
        recall: 96.77,
        f1: 98.36,
    },
    ClassPerformance {
        class_name: "herpes",
        precision: 96.77,
        recall: 100.0,
        f1: 98.36,
    },
    ClassPerformance {
        class_name: "panu",
        precision: 100.0,
        recall: 100.0,
        f1: 100.0,
    },
    ClassPerformance {
        class_name: "rosacea",
        precision: 100.0,
        recall: 100.0,
        f1: 100.0,
    },
];

/// Header keys, in column order.
const COLUMN_KEYS: [&str; 4] = [
    "table_cols.condition",
    "table_cols.precision",
    "table_cols.recall",
    "table_cols.f1",
];

fn percent(value: f32) -> String {
    format!("{:.2}%", value)
}

/// Cells of one table row, localized.
pub fn row_cells(i18n: &I18n, performance: &ClassPerformance) -> [String; 4] {
    [
        class_label(i18n, performance.class_name),
        percent(performance.precision),
        percent(performance.recall),
        percent(performance.f1),
    ]
}

fn table_row<'a, Message: 'a>(cells: [String; 4], size: f32) -> Element<'a, Message> {
    cells
        .into_iter()
        .enumerate()
        .fold(Row::new().spacing(spacing::SM), |row, (index, cell)| {
            let portion = if index == 0 { 2 } else { 1 };
            row.push(
                Text::new(cell)
                    .size(size)
                    .width(Length::FillPortion(portion)),
            )
        })
        .into()
}

/// `(label, value)` rows describing the model. The bundled fallback is a
/// single row without label.
pub fn detail_rows(i18n: &I18n, details: Option<&ModelDetails>) -> Vec<(String, String)> {
    match details {
        Some(details) => details
            .entries()
            .map(|(label, value)| (label.to_string(), value.to_string()))
            .collect(),
        None => vec![(String::new(), i18n.tr("model_info_details"))],
    }
}

fn details_view<'a, Message: 'a>(rows: Vec<(String, String)>) -> Element<'a, Message> {
    rows.into_iter()
        .fold(Column::new().spacing(spacing::XXS), |column, (label, value)| {
            let value = Text::new(value).size(typography::BODY_SM);
            if label.is_empty() {
                column.push(value.color(palette::GRAY_400))
            } else {
                column.push(
                    Row::new()
                        .spacing(spacing::XS)
                        .push(
                            Text::new(format!("{}:", label))
                                .size(typography::BODY_SM)
                                .color(palette::GRAY_400),
                        )
                        .push(value),
                )
            }
        })
        .into()
}

pub fn view<'a, Message: 'a>(
    i18n: &'a I18n,
    details: Option<&'a ModelDetails>,
) -> Element<'a, Message> {
    let header = COLUMN_KEYS.map(|key| i18n.tr(key));

    let mut table = Column::new()
        .spacing(spacing::XS)
        .push(table_row(header, typography::BODY_SM))
        .push(rule::horizontal(1));
    for performance in &MODEL_PERFORMANCE {
        table = table.push(table_row(row_cells(i18n, performance), typography::BODY));
    }

    Column::new()
        .spacing(spacing::MD)
        .push(Text::new(i18n.tr("model_stats")).size(typography::TITLE_SM))
        .push(Text::new(i18n.tr("model_info_text")).size(typography::BODY))
        .push(details_view(detail_rows(i18n, details)))
        .push(
            Container::new(table)
                .padding(spacing::SM)
                .width(Length::Fill)
                .style(styles::container::panel),
        )
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::Language;

    #[test]
    fn rows_use_localized_class_names() {
        let i18n = I18n::new(Language::En);
        let cells = row_cells(&i18n, &MODEL_PERFORMANCE[1]);
        assert_eq!(cells[0], "Eczema");
        assert_eq!(cells[1], "100.00%");
        assert_eq!(cells[2], "96.77%");
        assert_eq!(cells[3], "98.36%");
    }

    #[test]
    fn server_details_replace_bundled_text() {
        let i18n = I18n::new(Language::Id);
        let details = ModelDetails::from_markup(
            "<strong>Arsitektur:</strong> YOLOv8 Small<br><strong>Ukuran Model:</strong> 9.8 MB",
        );

        let rows = detail_rows(&i18n, details.as_ref());
        assert_eq!(
            rows,
            vec![
                ("Arsitektur".to_string(), "YOLOv8 Small".to_string()),
                ("Ukuran Model".to_string(), "9.8 MB".to_string()),
            ]
        );
    }

    #[test]
    fn bundled_details_without_server_reply() {
        let i18n = I18n::new(Language::En);
        let rows = detail_rows(&i18n, None);
        assert_eq!(rows.len(), 1);
        assert!(rows[0].0.is_empty());
        assert_eq!(rows[0].1, i18n.tr("model_info_details"));
    }

    #[test]
    fn header_keys_resolve_in_both_languages() {
        for language in Language::ALL {
            let i18n = I18n::new(language);
            for key in COLUMN_KEYS {
                assert_ne!(i18n.tr(key), key, "{} missing in {}", key, language);
            }
        }
    }
}
