use serde::{Deserialize, Serialize};

/// An RGB color with components in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Color {
    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0);
    pub const RED: Color = Color::new(1.0, 0.0, 0.0);
    pub const GREEN: Color = Color::new(0.0, 1.0, 0.0);
    pub const BLUE: Color = Color::new(0.0, 0.0, 1.0);

    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    pub const fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f64 / 255.0,
            g: g as f64 / 255.0,
            b: b as f64 / 255.0,
        }
    }

    pub fn to_rgb8(self) -> (u8, u8, u8) {
        let scale = |c: f64| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        (scale(self.r), scale(self.g), scale(self.b))
    }

    /// Midpoint of two colors, used to color a segment by its endpoints.
    pub fn average(self, other: Color) -> Color {
        Color::new(
            0.5 * (self.r + other.r),
            0.5 * (self.g + other.g),
            0.5 * (self.b + other.b),
        )
    }
}

/// The nine-color qualitative palette used for DOS and transport traces.
pub const SET1: [Color; 9] = [
    Color::from_rgb8(0xe4, 0x1a, 0x1c), // red
    Color::from_rgb8(0x37, 0x7e, 0xb8), // blue
    Color::from_rgb8(0x4d, 0xaf, 0x4a), // green
    Color::from_rgb8(0x98, 0x4e, 0xa3), // purple
    Color::from_rgb8(0xff, 0x7f, 0x00), // orange
    Color::from_rgb8(0xff, 0xff, 0x33), // yellow
    Color::from_rgb8(0xa6, 0x56, 0x28), // brown
    Color::from_rgb8(0xf7, 0x81, 0xbf), // pink
    Color::from_rgb8(0x99, 0x99, 0x99), // gray
];

/// Palette color for trace `index`, cycling past the palette length.
pub fn palette_color(index: usize) -> Color {
    SET1[index % SET1.len()]
}
