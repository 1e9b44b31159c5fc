// SPDX-License-Identifier: MPL-2.0
//! Window icon, rasterized at runtime from the embedded SVG.

use iced::window::{icon, Icon};
use resvg::usvg;

/// Edge of the rasterized icon, in pixels.
const ICON_SIZE: u32 = 128;

const SVG_SOURCE: &str = include_str!("../assets/branding/skin_lens.svg");

/// Renders the SVG to an `ICON_SIZE` square RGBA buffer.
fn render_rgba() -> Option<Vec<u8>> {
    let tree = usvg::Tree::from_data(SVG_SOURCE.as_bytes(), &usvg::Options::default()).ok()?;

    let size = tree.size();
    let transform = tiny_skia::Transform::from_scale(
        ICON_SIZE as f32 / size.width(),
        ICON_SIZE as f32 / size.height(),
    );
    let mut pixmap = tiny_skia::Pixmap::new(ICON_SIZE, ICON_SIZE)?;
    resvg::render(&tree, transform, &mut pixmap.as_mut());

    Some(pixmap.take())
}

/// Returns the window icon, or `None` if rendering fails.
pub fn load_window_icon() -> Option<Icon> {
    let rgba = render_rgba();
    if rgba.is_none() {
        tracing::warn!("failed to render window icon");
    }
    icon::from_rgba(rgba?, ICON_SIZE, ICON_SIZE).ok()
}
