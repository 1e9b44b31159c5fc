// SPDX-License-Identifier: MPL-2.0
//! Example gallery fed by `GET /examples`.
//!
//! The list is fetched once at startup (and again after a language switch).
//! Thumbnails are then fetched one task per entry. Every load bumps a
//! generation counter so that replies from an earlier load are ignored.

use crate::client::{ClientError, ExampleEntry, FetchedImage};
use crate::i18n::fluent::I18n;
use crate::intake::mime;
use crate::ui::design_tokens::{palette, sizing, spacing, typography};
use crate::ui::results::class_label;
use crate::ui::styles;
use iced::widget::image::{Handle, Image};
use iced::widget::{button, Column, Container, Row, Text};
use iced::{alignment, ContentFit, Element, Length};

/// Thumbnails per gallery row.
const COLUMNS: usize = 3;

/// State of one thumbnail.
#[derive(Debug, Clone)]
pub enum Thumbnail {
    Pending,
    Ready(Handle),
    Failed,
}

#[derive(Debug, Clone)]
pub struct Example {
    pub entry: ExampleEntry,
    pub thumbnail: Thumbnail,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Load {
    Pending,
    Done,
}

#[derive(Debug, Clone)]
pub enum Message {
    Loaded {
        generation: u64,
        result: Result<Vec<ExampleEntry>, ClientError>,
    },
    ThumbnailLoaded {
        generation: u64,
        index: usize,
        result: Result<FetchedImage, ClientError>,
    },
    Select(usize),
}

/// Work the gallery asks the application to perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Fetch each `(index, url)` thumbnail for `generation`.
    FetchThumbnails {
        generation: u64,
        urls: Vec<(usize, String)>,
    },
    /// Download `url` and submit it to the intake as `<label>.jpg`.
    LoadExample { url: String, label: String },
}

#[derive(Debug, Clone)]
pub struct Gallery {
    load: Load,
    examples: Vec<Example>,
    generation: u64,
}

impl Default for Gallery {
    fn default() -> Self {
        Self::new()
    }
}

impl Gallery {
    pub fn new() -> Self {
        Self {
            load: Load::Pending,
            examples: Vec::new(),
            generation: 0,
        }
    }

    /// Starts a new load and returns its generation.
    pub fn begin_load(&mut self) -> u64 {
        self.generation += 1;
        self.load = Load::Pending;
        self.examples.clear();
        self.generation
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_loading(&self) -> bool {
        self.load == Load::Pending
    }

    pub fn examples(&self) -> &[Example] {
        &self.examples
    }

    pub fn update(&mut self, message: Message) -> Effect {
        match message {
            Message::Loaded { generation, result } => {
                if generation != self.generation {
                    return Effect::None;
                }
                self.load = Load::Done;
                match result {
                    Ok(entries) => {
                        self.examples = entries
                            .into_iter()
                            .map(|entry| Example {
                                entry,
                                thumbnail: Thumbnail::Pending,
                            })
                            .collect();
                        if self.examples.is_empty() {
                            return Effect::None;
                        }
                        Effect::FetchThumbnails {
                            generation,
                            urls: self
                                .examples
                                .iter()
                                .enumerate()
                                .map(|(index, example)| (index, example.entry.url.clone()))
                                .collect(),
                        }
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "failed to load examples");
                        self.examples.clear();
                        Effect::None
                    }
                }
            }
            Message::ThumbnailLoaded {
                generation,
                index,
                result,
            } => {
                if generation != self.generation {
                    return Effect::None;
                }
                if let Some(example) = self.examples.get_mut(index) {
                    example.thumbnail = match result {
                        Ok(fetched) if mime::header_dimensions(&fetched.bytes).is_some() => {
                            Thumbnail::Ready(Handle::from_bytes(fetched.bytes))
                        }
                        Ok(_) => {
                            tracing::warn!(url = %example.entry.url, "thumbnail is not an image");
                            Thumbnail::Failed
                        }
                        Err(e) => {
                            tracing::warn!(url = %example.entry.url, error = %e, "thumbnail fetch failed");
                            Thumbnail::Failed
                        }
                    };
                }
                Effect::None
            }
            Message::Select(index) => match self.examples.get(index) {
                Some(example) => Effect::LoadExample {
                    url: example.entry.url.clone(),
                    label: example.entry.class_name.clone(),
                },
                None => Effect::None,
            },
        }
    }

    pub fn view<'a>(&'a self, i18n: &'a I18n) -> Element<'a, Message> {
        if self.is_loading() {
            return status_text(i18n.tr("loading_examples"));
        }
        if self.examples.is_empty() {
            return status_text(i18n.tr("examples_empty"));
        }

        let mut grid = Column::new().spacing(spacing::SM);
        for (row_index, chunk) in self.examples.chunks(COLUMNS).enumerate() {
            let mut row = Row::new().spacing(spacing::SM);
            for (offset, example) in chunk.iter().enumerate() {
                row = row.push(item(i18n, example, row_index * COLUMNS + offset));
            }
            grid = grid.push(row);
        }
        grid.into()
    }
}

fn status_text<'a>(label: String) -> Element<'a, Message> {
    Container::new(
        Text::new(label)
            .size(typography::BODY)
            .color(palette::GRAY_400),
    )
    .width(Length::Fill)
    .padding(spacing::LG)
    .align_x(alignment::Horizontal::Center)
    .into()
}

fn item<'a>(i18n: &'a I18n, example: &'a Example, index: usize) -> Element<'a, Message> {
    let picture: Element<'a, Message> = match &example.thumbnail {
        Thumbnail::Ready(handle) => Image::new(handle.clone())
            .content_fit(ContentFit::Cover)
            .width(Length::Fixed(sizing::THUMBNAIL))
            .height(Length::Fixed(sizing::THUMBNAIL))
            .into(),
        Thumbnail::Pending => placeholder(String::from("…")),
        Thumbnail::Failed => placeholder(i18n.tr("thumbnail_unavailable")),
    };

    button(
        Column::new()
            .spacing(spacing::XXS)
            .align_x(alignment::Horizontal::Center)
            .push(picture)
            .push(Text::new(class_label(i18n, &example.entry.class_name)).size(typography::CAPTION)),
    )
    .padding(spacing::XS)
    .style(styles::button::gallery_item)
    .on_press(Message::Select(index))
    .into()
}

fn placeholder<'a>(label: String) -> Element<'a, Message> {
    Container::new(
        Text::new(label)
            .size(typography::CAPTION)
            .color(palette::GRAY_400),
    )
    .width(Length::Fixed(sizing::THUMBNAIL))
    .height(Length::Fixed(sizing::THUMBNAIL))
    .align_x(alignment::Horizontal::Center)
    .align_y(alignment::Vertical::Center)
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(class_name: &str) -> ExampleEntry {
        ExampleEntry {
            url: format!("http://127.0.0.1:5001/static/examples/{}.jpg", class_name),
            class_name: class_name.to_string(),
        }
    }

    fn png_bytes() -> Vec<u8> {
        let mut bytes = Vec::new();
        image_rs::DynamicImage::new_rgb8(2, 2)
            .write_to(&mut std::io::Cursor::new(&mut bytes), image_rs::ImageFormat::Png)
            .expect("encode png");
        bytes
    }

    #[test]
    fn starts_pending() {
        let gallery = Gallery::new();
        assert!(gallery.is_loading());
        assert!(gallery.examples().is_empty());
    }

    #[test]
    fn loaded_list_requests_every_thumbnail() {
        let mut gallery = Gallery::new();
        let generation = gallery.begin_load();
        let effect = gallery.update(Message::Loaded {
            generation,
            result: Ok(vec![entry("acne"), entry("panu")]),
        });

        assert!(!gallery.is_loading());
        assert_eq!(gallery.examples().len(), 2);
        match effect {
            Effect::FetchThumbnails { generation: g, urls } => {
                assert_eq!(g, generation);
                assert_eq!(urls.len(), 2);
                assert_eq!(urls[1].0, 1);
                assert!(urls[1].1.ends_with("panu.jpg"));
            }
            other => panic!("unexpected effect {:?}", other),
        }
    }

    #[test]
    fn failed_list_leaves_gallery_empty() {
        let mut gallery = Gallery::new();
        let generation = gallery.begin_load();
        let effect = gallery.update(Message::Loaded {
            generation,
            result: Err(ClientError::Network("refused".to_string())),
        });

        assert_eq!(effect, Effect::None);
        assert!(!gallery.is_loading());
        assert!(gallery.examples().is_empty());
    }

    #[test]
    fn replies_from_previous_load_are_ignored() {
        let mut gallery = Gallery::new();
        let old = gallery.begin_load();
        let _current = gallery.begin_load();

        let effect = gallery.update(Message::Loaded {
            generation: old,
            result: Ok(vec![entry("acne")]),
        });
        assert_eq!(effect, Effect::None);
        assert!(gallery.is_loading());
    }

    #[test]
    fn thumbnails_become_ready_or_failed() {
        let mut gallery = Gallery::new();
        let generation = gallery.begin_load();
        gallery.update(Message::Loaded {
            generation,
            result: Ok(vec![entry("acne"), entry("eksim"), entry("herpes")]),
        });

        gallery.update(Message::ThumbnailLoaded {
            generation,
            index: 0,
            result: Ok(FetchedImage {
                bytes: png_bytes(),
                content_type: Some("image/png".to_string()),
            }),
        });
        gallery.update(Message::ThumbnailLoaded {
            generation,
            index: 1,
            result: Ok(FetchedImage {
                bytes: b"<html>".to_vec(),
                content_type: Some("text/html".to_string()),
            }),
        });
        gallery.update(Message::ThumbnailLoaded {
            generation,
            index: 2,
            result: Err(ClientError::Status {
                status: 404,
                message: None,
            }),
        });

        let examples = gallery.examples();
        assert!(matches!(examples[0].thumbnail, Thumbnail::Ready(_)));
        assert!(matches!(examples[1].thumbnail, Thumbnail::Failed));
        assert!(matches!(examples[2].thumbnail, Thumbnail::Failed));
    }

    #[test]
    fn select_yields_url_and_class() {
        let mut gallery = Gallery::new();
        let generation = gallery.begin_load();
        gallery.update(Message::Loaded {
            generation,
            result: Ok(vec![entry("rosacea")]),
        });

        assert_eq!(
            gallery.update(Message::Select(0)),
            Effect::LoadExample {
                url: "http://127.0.0.1:5001/static/examples/rosacea.jpg".to_string(),
                label: "rosacea".to_string(),
            }
        );
        assert_eq!(gallery.update(Message::Select(7)), Effect::None);
    }
}
