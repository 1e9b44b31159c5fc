// SPDX-License-Identifier: MPL-2.0
//! Spinner shown while an analysis is in flight.

use crate::ui::design_tokens::sizing;
use iced::widget::canvas::{self, Canvas, Frame, Geometry, Path, Stroke};
use iced::{mouse, Color, Length, Point, Rectangle, Renderer, Theme};
use std::f32::consts::PI;
use std::time::Duration;

/// One full turn per second.
const TURN: Duration = Duration::from_secs(1);

/// Half-circle arc rotating around a faint track.
pub struct AnimatedSpinner {
    rotation: f32, // radians
    color: Color,
    size: f32,
}

impl AnimatedSpinner {
    #[must_use]
    pub fn new(color: Color, rotation: f32) -> Self {
        Self {
            rotation,
            color,
            size: sizing::SPINNER,
        }
    }

    /// Spinner rotated by the time elapsed since the analysis started.
    #[must_use]
    pub fn at(color: Color, elapsed: Duration) -> Self {
        Self::new(color, rotation_at(elapsed))
    }

    pub fn into_element<Message: 'static>(self) -> iced::Element<'static, Message> {
        let size = self.size;
        Canvas::new(self)
            .width(Length::Fixed(size))
            .height(Length::Fixed(size))
            .into()
    }
}

/// Rotation angle after `elapsed`, in `[0, 2π)`.
pub fn rotation_at(elapsed: Duration) -> f32 {
    let turns = elapsed.as_secs_f32() / TURN.as_secs_f32();
    turns.fract() * 2.0 * PI
}

impl<Message> canvas::Program<Message> for AnimatedSpinner {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        let center = frame.center();
        let radius = frame.width().min(frame.height()) / 2.0 - 4.0;

        frame.stroke(
            &Path::circle(center, radius),
            Stroke::default().with_width(3.0).with_color(Color {
                a: 0.25,
                ..self.color
            }),
        );

        // -90° so that rotation 0 starts at the top
        let start_angle = self.rotation - PI / 2.0;
        let end_angle = start_angle + PI;

        let mut arc_path = canvas::path::Builder::new();
        arc_path.move_to(Point::new(
            center.x + radius * start_angle.cos(),
            center.y + radius * start_angle.sin(),
        ));
        let segments = 30;
        #[allow(clippy::cast_precision_loss)]
        for i in 1..=segments {
            let t = i as f32 / segments as f32;
            let angle = start_angle + (end_angle - start_angle) * t;
            arc_path.line_to(Point::new(
                center.x + radius * angle.cos(),
                center.y + radius * angle.sin(),
            ));
        }

        frame.stroke(
            &arc_path.build(),
            Stroke::default()
                .with_width(3.0)
                .with_color(self.color)
                .with_line_cap(canvas::LineCap::Round),
        );

        vec![frame.into_geometry()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn rotation_wraps_every_turn() {
        assert_relative_eq!(rotation_at(Duration::ZERO), 0.0);
        assert_relative_eq!(rotation_at(Duration::from_millis(250)), PI / 2.0, epsilon = 1e-4);
        assert_relative_eq!(
            rotation_at(Duration::from_millis(1250)),
            PI / 2.0,
            epsilon = 1e-4
        );
    }
}
