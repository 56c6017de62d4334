//! Display style shared by every scene node

use serde::{Deserialize, Serialize};

/// An RGBA color with 8-bit channels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const GREEN: Color = Color::rgb(0, 255, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    /// Create an opaque color
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Create a color with an explicit alpha channel
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Same color channels with the given alpha
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

/// Per-node display style: visibility flags, colors, opacities and point size.
///
/// Opacities are in `[0, 1]`. `point_radius` is measured in world units, while
/// `pixel_radius` is the on-screen radius filled in by the projectors while a
/// frame is being rendered.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Attributes {
    pub fill_color: Color,
    pub edge_color: Color,
    pub point_color: Color,

    pub show_fill: bool,
    pub show_edges: bool,
    pub show_points: bool,

    pub fill_opacity: f64,
    pub edge_opacity: f64,
    pub point_opacity: f64,

    pub point_radius: f64,
    #[serde(skip)]
    pub pixel_radius: u32,
}

impl Default for Attributes {
    fn default() -> Self {
        Self {
            fill_color: Color::RED,
            edge_color: Color::BLACK,
            point_color: Color::BLUE,

            show_fill: true,
            show_edges: true,
            show_points: true,

            fill_opacity: 0.75,
            edge_opacity: 1.00,
            point_opacity: 0.50,

            point_radius: 0.05,
            pixel_radius: 1,
        }
    }
}

impl Attributes {
    /// Composite fill color: alpha is zero when fill is hidden
    pub fn composite_fill_color(&self) -> Color {
        composite_color(self.fill_color, self.fill_opacity, self.show_fill)
    }

    /// Composite edge color: alpha is zero when edges are hidden
    pub fn composite_edge_color(&self) -> Color {
        composite_color(self.edge_color, self.edge_opacity, self.show_edges)
    }

    /// Composite point color: alpha is zero when points are hidden
    pub fn composite_point_color(&self) -> Color {
        composite_color(self.point_color, self.point_opacity, self.show_points)
    }

    /// Copy with fill disabled
    pub fn without_fill(mut self) -> Self {
        self.show_fill = false;
        self
    }
}

fn composite_color(color: Color, opacity: f64, show: bool) -> Color {
    let opacity = if show { opacity.clamp(0.0, 1.0) } else { 0.0 };
    color.with_alpha((opacity * 255.0).round() as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hidden_fill_is_transparent() {
        let attr = Attributes {
            show_fill: false,
            fill_opacity: 0.75,
            ..Attributes::default()
        };
        assert_eq!(attr.composite_fill_color().a, 0);
    }

    #[test]
    fn test_shown_fill_uses_opacity() {
        let attr = Attributes {
            show_fill: true,
            fill_opacity: 0.75,
            ..Attributes::default()
        };
        let color = attr.composite_fill_color();
        assert_eq!(color.a, (0.75_f64 * 255.0).round() as u8);
        assert_eq!((color.r, color.g, color.b), (255, 0, 0));
    }

    #[test]
    fn test_composite_clamps_opacity() {
        let attr = Attributes {
            edge_opacity: 1.5,
            point_opacity: -0.5,
            ..Attributes::default()
        };
        assert_eq!(attr.composite_edge_color().a, 255);
        assert_eq!(attr.composite_point_color().a, 0);
    }

    #[test]
    fn test_defaults() {
        let attr = Attributes::default();
        assert!(attr.show_fill && attr.show_edges && attr.show_points);
        assert_eq!(attr.edge_color, Color::BLACK);
        assert_eq!(attr.point_color, Color::BLUE);
        assert_eq!(attr.pixel_radius, 1);
        assert_eq!(attr.composite_edge_color().a, 255);
        assert_eq!(attr.composite_point_color().a, 128);
    }
}
