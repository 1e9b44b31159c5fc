// SPDX-License-Identifier: MPL-2.0
#![doc = r#"
# Design Tokens

Shared visual constants for every view.

## Organization

- **Palette**: Base, brand, semantic and severity colors
- **Opacity**: Standardized opacity levels
- **Spacing**: Spacing scale (8px grid)
- **Sizing**: Component sizes
- **Typography**: Font size scale
- **Border**: Border width scale
- **Radius**: Border radii
- **Shadow**: Shadow definitions

## Examples

```
use skin_lens::ui::design_tokens::{palette, spacing, opacity};
use iced::Color;

let overlay_bg = Color {
    a: opacity::OVERLAY_STRONG,
    ..palette::BLACK
};

let padding = spacing::MD; // 16px
```
"#]

use iced::Color;

// ============================================================================
// Color Palette
// ============================================================================

pub mod palette {
    use super::Color;

    // Grayscale
    pub const BLACK: Color = Color::BLACK;
    pub const WHITE: Color = Color::WHITE;
    pub const GRAY_900: Color = Color::from_rgb(0.067, 0.094, 0.153);
    pub const GRAY_700: Color = Color::from_rgb(0.216, 0.255, 0.318);
    pub const GRAY_400: Color = Color::from_rgb(0.612, 0.639, 0.686);
    pub const GRAY_200: Color = Color::from_rgb(0.898, 0.906, 0.922);
    pub const GRAY_100: Color = Color::from_rgb(0.953, 0.957, 0.965);

    /// Slate 500 (`#64748b`), the colour of bars for classes without one.
    pub const SLATE_500: Color = Color::from_rgb(
        0x64 as f32 / 255.0,
        0x74 as f32 / 255.0,
        0x8b as f32 / 255.0,
    );

    // Brand colors (teal scale)
    pub const PRIMARY_100: Color = Color::from_rgb(0.8, 0.984, 0.945);
    pub const PRIMARY_400: Color = Color::from_rgb(0.176, 0.831, 0.749);
    pub const PRIMARY_500: Color = Color::from_rgb(0.078, 0.722, 0.651);
    pub const PRIMARY_600: Color = Color::from_rgb(0.051, 0.58, 0.533);
    pub const PRIMARY_700: Color = Color::from_rgb(0.059, 0.463, 0.431);

    // Semantic colors
    pub const ERROR_500: Color = Color::from_rgb(0.937, 0.267, 0.267);
    pub const WARNING_500: Color = Color::from_rgb(0.918, 0.702, 0.031);
    pub const SUCCESS_500: Color = Color::from_rgb(0.133, 0.773, 0.369);
    pub const INFO_500: Color = Color::from_rgb(0.231, 0.51, 0.965);

    // Severity badge colors
    pub const SEVERITY_GREEN: Color = SUCCESS_500;
    pub const SEVERITY_YELLOW: Color = WARNING_500;
    pub const SEVERITY_RED: Color = ERROR_500;
    pub const SEVERITY_BLUE: Color = INFO_500;
    pub const SEVERITY_ORANGE: Color = Color::from_rgb(0.976, 0.451, 0.086);
}

// ============================================================================
// Opacity Scale
// ============================================================================

pub mod opacity {
    pub const TRANSPARENT: f32 = 0.0;
    pub const OVERLAY_SUBTLE: f32 = 0.2;
    pub const OVERLAY_MEDIUM: f32 = 0.5;
    pub const OVERLAY_STRONG: f32 = 0.7;
    pub const OPAQUE: f32 = 1.0;

    /// Track behind the confidence ring and probability bars.
    pub const TRACK: f32 = 0.15;
}

// ============================================================================
// Spacing Scale (8px baseline grid)
// ============================================================================

pub mod spacing {
    pub const XXS: f32 = 4.0; // 0.5 unit
    pub const XS: f32 = 8.0; // 1 unit
    pub const SM: f32 = 12.0; // 1.5 units
    pub const MD: f32 = 16.0; // 2 units
    pub const LG: f32 = 24.0; // 3 units
    pub const XL: f32 = 32.0; // 4 units
}

// ============================================================================
// Sizing Scale
// ============================================================================

pub mod sizing {
    // Interactive element heights
    pub const BUTTON_HEIGHT: f32 = 40.0;

    // Component widths
    pub const SIDEBAR_WIDTH: f32 = 360.0;
    pub const TOAST_WIDTH: f32 = 340.0;

    /// Height of the selected image preview.
    pub const PREVIEW_HEIGHT: f32 = 260.0;

    /// Edge of a gallery thumbnail.
    pub const THUMBNAIL: f32 = 96.0;

    /// Radius of the confidence ring's centre line.
    pub const RING_RADIUS: f32 = 40.0;

    /// Stroke width of the confidence ring.
    pub const RING_STROKE: f32 = 8.0;

    /// Edge of the square canvas hosting the ring.
    pub const RING_BOX: f32 = 2.0 * (RING_RADIUS + RING_STROKE);

    /// Height of one probability bar.
    pub const BAR_HEIGHT: f32 = 8.0;

    /// Edge of the analyzing spinner.
    pub const SPINNER: f32 = 48.0;
}

// ============================================================================
// Typography Scale
// ============================================================================

pub mod typography {
    /// Large title - Window heading
    pub const TITLE_LG: f32 = 26.0;

    /// Medium title - Diagnosis name
    pub const TITLE_MD: f32 = 20.0;

    /// Small title - Section headers
    pub const TITLE_SM: f32 = 17.0;

    /// Standard body - Most UI text
    pub const BODY: f32 = 14.0;

    /// Small body - Hints, secondary labels
    pub const BODY_SM: f32 = 13.0;

    /// Caption - Badges, footer
    pub const CAPTION: f32 = 12.0;
}

// ============================================================================
// Border Scale
// ============================================================================

pub mod border {
    pub const WIDTH_SM: f32 = 1.0;
    pub const WIDTH_MD: f32 = 2.0;
}

// ============================================================================
// Border Radius Scale
// ============================================================================

pub mod radius {
    pub const SM: f32 = 4.0;
    pub const MD: f32 = 8.0;
    pub const LG: f32 = 12.0;
    pub const FULL: f32 = 9999.0; // Pill shape
}

// ============================================================================
// Shadow Definitions
// ============================================================================

pub mod shadow {
    use super::palette;
    use iced::{Color, Shadow, Vector};

    pub const NONE: Shadow = Shadow {
        color: palette::BLACK,
        offset: Vector::ZERO,
        blur_radius: 0.0,
    };

    pub const SM: Shadow = Shadow {
        color: Color {
            a: 0.15,
            ..palette::BLACK
        },
        offset: Vector { x: 0.0, y: 1.0 },
        blur_radius: 3.0,
    };

    pub const MD: Shadow = Shadow {
        color: Color {
            a: 0.25,
            ..palette::BLACK
        },
        offset: Vector { x: 0.0, y: 4.0 },
        blur_radius: 10.0,
    };
}

// ============================================================================
// Compile-time Validation
// ============================================================================

const _: () = {
    assert!(spacing::XS > 0.0);
    assert!(spacing::SM > spacing::XS);
    assert!(spacing::MD > spacing::SM);
    assert!(spacing::LG > spacing::MD);

    assert!(opacity::TRANSPARENT == 0.0);
    assert!(opacity::OPAQUE == 1.0);
    assert!(opacity::TRACK > 0.0 && opacity::TRACK < 1.0);

    assert!(typography::TITLE_LG > typography::TITLE_MD);
    assert!(typography::TITLE_MD > typography::TITLE_SM);
    assert!(typography::BODY > typography::BODY_SM);
    assert!(typography::BODY_SM > typography::CAPTION);

    assert!(sizing::RING_BOX > 2.0 * sizing::RING_RADIUS);
    assert!(border::WIDTH_MD > border::WIDTH_SM);
};
