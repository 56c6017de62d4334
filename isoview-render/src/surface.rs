//! 2D drawing surface abstraction
//!
//! The renderer needs only a handful of primitives, so any backend (a
//! rasterizer, an SVG writer, a GUI canvas) can be plugged in by implementing
//! [`PaintSurface`]. [`RecordingSurface`] captures the calls for headless use.

use isoview_core::Color;
use nalgebra::Point2;

/// Drawing primitives used by the renderer, in screen pixels
pub trait PaintSurface {
    /// Set the color for subsequent drawing calls
    fn set_color(&mut self, color: Color);

    fn fill_polygon(&mut self, points: &[Point2<f64>]);

    /// Closed outline through `points`
    fn stroke_polygon(&mut self, points: &[Point2<f64>]);

    fn fill_circle(&mut self, center: Point2<f64>, radius: f64);

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64);

    /// Draw a line of text with its baseline starting at `at`
    fn draw_text(&mut self, _text: &str, _at: Point2<f64>) {}
}

/// One recorded drawing call
#[derive(Debug, Clone, PartialEq)]
pub enum PaintCommand {
    SetColor(Color),
    FillPolygon(Vec<Point2<f64>>),
    StrokePolygon(Vec<Point2<f64>>),
    FillCircle { center: Point2<f64>, radius: f64 },
    FillRect { x: f64, y: f64, width: f64, height: f64 },
    Text { text: String, at: Point2<f64> },
}

/// Surface that records every call in order
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    commands: Vec<PaintCommand>,
}

impl RecordingSurface {
    /// Create an empty recording
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[PaintCommand] {
        &self.commands
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn polygon_fills(&self) -> usize {
        self.count(|c| matches!(c, PaintCommand::FillPolygon(_)))
    }

    pub fn polygon_strokes(&self) -> usize {
        self.count(|c| matches!(c, PaintCommand::StrokePolygon(_)))
    }

    /// Circles and unit rectangles
    pub fn markers(&self) -> usize {
        self.count(|c| {
            matches!(
                c,
                PaintCommand::FillCircle { .. } | PaintCommand::FillRect { .. }
            )
        })
    }

    /// Recorded text lines
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                PaintCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    fn count(&self, pred: impl Fn(&PaintCommand) -> bool) -> usize {
        self.commands.iter().filter(|c| pred(c)).count()
    }
}

impl PaintSurface for RecordingSurface {
    fn set_color(&mut self, color: Color) {
        self.commands.push(PaintCommand::SetColor(color));
    }

    fn fill_polygon(&mut self, points: &[Point2<f64>]) {
        self.commands.push(PaintCommand::FillPolygon(points.to_vec()));
    }

    fn stroke_polygon(&mut self, points: &[Point2<f64>]) {
        self.commands.push(PaintCommand::StrokePolygon(points.to_vec()));
    }

    fn fill_circle(&mut self, center: Point2<f64>, radius: f64) {
        self.commands.push(PaintCommand::FillCircle { center, radius });
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.commands.push(PaintCommand::FillRect {
            x,
            y,
            width,
            height,
        });
    }

    fn draw_text(&mut self, text: &str, at: Point2<f64>) {
        self.commands.push(PaintCommand::Text {
            text: text.to_string(),
            at,
        });
    }
}
