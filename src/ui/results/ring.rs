// SPDX-License-Identifier: MPL-2.0
//! Confidence ring drawn on a canvas.

use super::{dash_offset, CIRCUMFERENCE};
use crate::ui::design_tokens::{opacity, sizing};
use iced::widget::canvas::{self, Canvas, Frame, Geometry, Path, Stroke};
use iced::{mouse, Color, Element, Length, Point, Rectangle, Renderer, Theme};
use std::f32::consts::PI;

/// Ring filled to `percent`, starting at twelve o'clock, clockwise.
pub struct ConfidenceRing {
    percent: f32,
    color: Color,
}

impl ConfidenceRing {
    #[must_use]
    pub fn new(percent: f32, color: Color) -> Self {
        Self { percent, color }
    }

    /// Fraction of the circumference that is drawn.
    fn filled_fraction(&self) -> f32 {
        ((CIRCUMFERENCE - dash_offset(self.percent)) / CIRCUMFERENCE).clamp(0.0, 1.0)
    }

    pub fn into_element<Message: 'static>(self) -> Element<'static, Message> {
        Canvas::new(self)
            .width(Length::Fixed(sizing::RING_BOX))
            .height(Length::Fixed(sizing::RING_BOX))
            .into()
    }
}

impl<Message> canvas::Program<Message> for ConfidenceRing {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        let center = frame.center();
        let radius = sizing::RING_RADIUS;

        frame.stroke(
            &Path::circle(center, radius),
            Stroke::default()
                .with_width(sizing::RING_STROKE)
                .with_color(Color {
                    a: opacity::TRACK,
                    ..theme.palette().text
                }),
        );

        let fraction = self.filled_fraction();
        if fraction > 0.0 {
            let start_angle = -PI / 2.0;
            let sweep = 2.0 * PI * fraction;
            let segments = ((fraction * 72.0).ceil() as usize).max(2);

            let mut arc = canvas::path::Builder::new();
            arc.move_to(Point::new(
                center.x + radius * start_angle.cos(),
                center.y + radius * start_angle.sin(),
            ));
            for i in 1..=segments {
                let angle = start_angle + sweep * (i as f32 / segments as f32);
                arc.line_to(Point::new(
                    center.x + radius * angle.cos(),
                    center.y + radius * angle.sin(),
                ));
            }

            frame.stroke(
                &arc.build(),
                Stroke::default()
                    .with_width(sizing::RING_STROKE)
                    .with_color(self.color)
                    .with_line_cap(canvas::LineCap::Round),
            );
        }

        vec![frame.into_geometry()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn fraction_follows_percent() {
        let color = Color::BLACK;
        assert_relative_eq!(ConfidenceRing::new(0.0, color).filled_fraction(), 0.0);
        assert_relative_eq!(
            ConfidenceRing::new(50.0, color).filled_fraction(),
            0.5,
            epsilon = 1e-5
        );
        assert_relative_eq!(
            ConfidenceRing::new(99.0, color).filled_fraction(),
            0.99,
            epsilon = 1e-5
        );
    }
}
