//! View camera: angles, zoom, pan and projection settings
//!
//! The camera owns every piece of view state the renderer reads each frame.
//! Like [`Group`](isoview_core::Group), it batches change notifications with a
//! hold/release depth counter so compound edits (zoom about a point, fit to a
//! rectangle) reach listeners as a single update.

use crate::projector::{Projector, ProjectorKind};
use crate::renderer::Renderer;
use crate::surface::PaintSurface;
use isoview_core::{Color, Drawable, Point2D, Point3D, SceneNode, UpdateNotifier};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Rendering pipeline cost/fidelity trade-off
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RenderQuality {
    /// Outlines only, constant point size, no depth sort
    Low,
    /// Depth-sorted, zoom-proportional point size
    #[default]
    Med,
    /// As `Med`, with triangle subdivision
    High,
}

/// Granularity of a camera change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CameraUpdate {
    All,
    /// Only the zoom factor changed
    Zoom,
}

/// Axis-aligned screen rectangle in pixels
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScreenRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl ScreenRect {
    /// Create a new rectangle
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle anchored at the screen origin
    pub fn from_size(width: f64, height: f64) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    pub fn center(&self) -> Point2D {
        Point2D::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Shrink by `fraction` of the size, keeping the center
    pub fn inset(&self, fraction: f64) -> ScreenRect {
        let dx = self.width * fraction / 2.0;
        let dy = self.height * fraction / 2.0;
        ScreenRect::new(
            self.x + dx,
            self.y + dy,
            self.width - 2.0 * dx,
            self.height - 2.0 * dy,
        )
    }
}

/// Number of offscreen renders auto-fit tries before giving up on a tiny object
const FIT_ATTEMPTS: usize = 5;
const FIT_ZOOM_STEP: f64 = 100.0;

/// A view camera
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Camera {
    view_angles: Point3D,
    zoom: f64,
    rotate_origin: Point3D,
    screen_origin: Point2D,
    rotate_radius: f64,
    projector: ProjectorKind,
    quality: RenderQuality,

    // Perspective settings
    extents_max_range: f64,
    range_multiplier: f64,
    perspective_unit: f64,

    #[serde(skip)]
    notifier: UpdateNotifier<CameraUpdate>,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            view_angles: Point3D::origin(),
            zoom: 1.0,
            rotate_origin: Point3D::origin(),
            screen_origin: Point2D::origin(),
            rotate_radius: 1e3,
            projector: ProjectorKind::Perspective,
            quality: RenderQuality::Med,
            extents_max_range: 1.0,
            range_multiplier: 2.0,
            perspective_unit: 2.0,
            notifier: UpdateNotifier::new(),
        }
    }
}

impl Camera {
    /// Create a new camera with default view settings
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view_angles(&self) -> Point3D {
        self.view_angles.clone()
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn rotate_origin(&self) -> Point3D {
        self.rotate_origin.clone()
    }

    pub fn screen_origin(&self) -> Point2D {
        self.screen_origin.clone()
    }

    pub fn rotate_radius(&self) -> f64 {
        self.rotate_radius
    }

    /// The active projection strategy
    pub fn projector(&self) -> &'static dyn Projector {
        self.projector.projector()
    }

    pub fn projector_kind(&self) -> ProjectorKind {
        self.projector
    }

    pub fn render_quality(&self) -> RenderQuality {
        self.quality
    }

    pub fn extents_max_range(&self) -> f64 {
        self.extents_max_range
    }

    pub fn range_multiplier(&self) -> f64 {
        self.range_multiplier
    }

    pub fn perspective_unit(&self) -> f64 {
        self.perspective_unit
    }

    /// World position of the eye at the camera's own rotate radius
    pub fn camera_location(&self) -> Point3D {
        self.camera_location_with_radius(self.rotate_radius)
    }

    /// World position of the eye at `radius` from the rotate origin.
    ///
    /// The Y view angle is the elevation and the Z view angle the azimuth.
    pub fn camera_location_with_radius(&self, radius: f64) -> Point3D {
        let elevation = self.view_angles.y().to_radians();
        let azimuth = self.view_angles.z().to_radians();

        let offset = Point3D::new(
            radius * elevation.cos() * azimuth.cos(),
            radius * elevation.cos() * azimuth.sin(),
            radius * elevation.sin(),
        );
        offset.sum(&self.rotate_origin)
    }

    /// Set the view angles; each is renormalized to `[0, 360)`
    pub fn set_view_angles(&mut self, angles: &Point3D) {
        self.hold_updates(true);

        self.view_angles.set(angles);
        self.simplify_view_angles();

        self.hold_updates(false);
    }

    /// Set the zoom without moving the screen origin
    pub fn set_zoom(&mut self, zoom: f64) {
        self.hold_updates(true);
        self.zoom = zoom;
        self.notifier.release(CameraUpdate::Zoom);
    }

    /// Zoom while keeping the rotate origin's screen position fixed
    pub fn set_zoom_to(&mut self, zoom: f64) {
        self.hold_updates(true);

        let before = self.project(&self.rotate_origin);
        self.set_zoom(zoom);
        let after = self.project(&self.rotate_origin);
        self.set_screen_origin(&self.screen_origin.sum(&before.difference(&after)));

        self.hold_updates(false);
    }

    /// Zoom while keeping the screen point `fixed` in place
    pub fn set_zoom_to_point(&mut self, zoom: f64, fixed: &Point2D) {
        self.hold_updates(true);

        let offset = self.screen_origin.difference(fixed).product(zoom / self.zoom);
        self.set_screen_origin(&fixed.sum(&offset));
        self.set_zoom(zoom);

        self.hold_updates(false);
    }

    /// Zoom and pan so `node` is centered in and fills `rect`.
    ///
    /// The node is rendered offscreen at the current zoom; while its projected
    /// range is not above one pixel the zoom is raised a hundredfold, up to a
    /// fixed number of tries. A node that still has no projected extent keeps
    /// the current zoom and is only recentered.
    pub fn zoom_to_fit(&mut self, node: &SceneNode, rect: &ScreenRect) {
        self.hold_updates(true);

        let start_zoom = self.zoom;
        let mut renderer = Renderer::new();
        let mut object_range = 0.0;
        for _ in 0..FIT_ATTEMPTS {
            object_range = renderer.render(node, self).extents_max_range();
            if object_range > 1.0 {
                break;
            }
            self.zoom *= FIT_ZOOM_STEP;
        }

        if object_range > 0.0 {
            let screen_range = rect.width.min(rect.height);
            self.set_zoom(self.zoom * screen_range / object_range);
        } else {
            self.zoom = start_zoom;
            tracing::warn!(
                zoom = self.zoom,
                "auto-fit target has no projected extent; zoom left unchanged"
            );
        }

        self.center_on_node(&rect.center(), node);

        self.hold_updates(false);
    }

    pub fn set_rotate_origin(&mut self, origin: &Point3D) {
        self.hold_updates(true);
        self.rotate_origin.set(origin);
        self.hold_updates(false);
    }

    pub fn set_screen_origin(&mut self, origin: &Point2D) {
        self.hold_updates(true);
        self.screen_origin.set(origin);
        self.hold_updates(false);
    }

    pub fn set_rotate_radius(&mut self, radius: f64) {
        self.hold_updates(true);
        self.rotate_radius = radius;
        self.hold_updates(false);
    }

    pub fn set_projector(&mut self, projector: ProjectorKind) {
        self.hold_updates(true);
        self.projector = projector;
        self.hold_updates(false);
    }

    pub fn set_render_quality(&mut self, quality: RenderQuality) {
        self.hold_updates(true);
        self.quality = quality;
        self.hold_updates(false);
    }

    pub fn set_extents_max_range(&mut self, range: f64) {
        self.hold_updates(true);
        self.extents_max_range = range;
        self.hold_updates(false);
    }

    pub fn set_range_multiplier(&mut self, multiplier: f64) {
        self.hold_updates(true);
        self.range_multiplier = multiplier;
        self.hold_updates(false);
    }

    pub fn set_perspective_unit(&mut self, unit: f64) {
        self.hold_updates(true);
        self.perspective_unit = unit;
        self.hold_updates(false);
    }

    /// Copy every view setting from `other`; listeners are not copied
    pub fn set(&mut self, other: &Camera) {
        self.hold_updates(true);

        self.set_view_angles(&other.view_angles);
        self.set_zoom(other.zoom);
        self.set_rotate_origin(&other.rotate_origin);
        self.set_screen_origin(&other.screen_origin);
        self.set_rotate_radius(other.rotate_radius);
        self.set_projector(other.projector);
        self.set_render_quality(other.quality);
        self.set_extents_max_range(other.extents_max_range);
        self.set_range_multiplier(other.range_multiplier);
        self.set_perspective_unit(other.perspective_unit);

        self.hold_updates(false);
    }

    /// Renormalize all three view angles to `[0, 360)`
    pub fn simplify_view_angles(&mut self) {
        self.hold_updates(true);

        let angles = &self.view_angles;
        let (x, y, z) = (
            Self::simplified_angle(angles.x()),
            Self::simplified_angle(angles.y()),
            Self::simplified_angle(angles.z()),
        );
        self.view_angles.set_coords(x, y, z);

        self.hold_updates(false);
    }

    /// Normalize `angle` to `[0, 360)`.
    ///
    /// Whole turns are removed with an exact floating-point remainder, the
    /// same result as subtracting 360 by sign until in range, then a negative
    /// remainder is moved up by one turn. Non-finite input maps to zero.
    pub fn simplified_angle(angle: f64) -> f64 {
        if !angle.is_finite() {
            return 0.0;
        }

        let mut angle = angle % 360.0;
        if angle < 0.0 {
            angle += 360.0;
        }
        // -1e-20 + 360 rounds to 360
        if angle >= 360.0 {
            angle = 0.0;
        }
        angle
    }

    /// Put the rotate origin's projection on the screen point `pt`
    pub fn center_on(&mut self, pt: &Point2D) {
        self.hold_updates(true);

        self.set_screen_origin(pt);
        let origin = self.project(&self.rotate_origin);
        let shift = self.screen_origin.difference(&origin);
        self.set_screen_origin(&self.screen_origin.sum(&shift));

        self.hold_updates(false);
    }

    /// Move the rotate origin to `node`'s center, then center it on `pt`
    pub fn center_on_node(&mut self, pt: &Point2D, node: &SceneNode) {
        self.hold_updates(true);

        self.set_rotate_origin(&node.center());
        self.center_on(pt);

        self.hold_updates(false);
    }

    /// Register a change listener
    pub fn add_listener(&mut self, listener: impl FnMut(CameraUpdate) + 'static) {
        self.notifier.add_listener(listener);
    }

    /// Notify listeners of a full change unless updates are held
    pub fn update(&mut self) {
        self.notifier.notify(CameraUpdate::All);
    }

    /// `true` opens a hold, `false` closes one and flushes at depth zero
    pub fn hold_updates(&mut self, do_hold: bool) {
        self.notifier.hold_updates(do_hold, CameraUpdate::All);
    }

    /// Run `f` inside a single hold/release pair
    pub fn batch<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        self.hold_updates(true);
        let result = f(self);
        self.hold_updates(false);
        result
    }

    /// Screen position of a point node; `None` for anything else
    pub fn render_point(&self, node: &SceneNode) -> Option<Point2D> {
        match node {
            SceneNode::Point3(p) => Some(self.project(p)),
            SceneNode::Point2(p) => Some(self.projector().project_2d_to_screen(p, self)),
            SceneNode::Group(_) => None,
        }
    }

    /// Screen position of a world point through the active projector
    pub fn project(&self, point: &Point3D) -> Point2D {
        self.projector().project_3d_to_screen(point, self)
    }

    /// Heads-up display text: view angles and zoom
    pub fn status_lines(&self) -> Vec<String> {
        let percent = self.zoom * 100.0;
        let zoom = if self.zoom >= 1.0 {
            format!("{} %", percent as i64)
        } else if self.zoom >= 0.01 {
            format!("{:.2} %", percent)
        } else {
            format!("{:.3} %", percent)
        };

        vec![
            format!(
                "View: ({:.2}°, {:.2}°)",
                self.view_angles.z(),
                self.view_angles.y()
            ),
            format!("Zoom: {}", zoom),
        ]
    }

    /// Draw the status lines in the top-left corner
    pub fn paint(&self, surface: &mut dyn PaintSurface) {
        surface.set_color(Color::BLACK);
        for (i, line) in self.status_lines().iter().enumerate() {
            surface.draw_text(line, nalgebra::Point2::new(10.0, 20.0 * (i + 1) as f64));
        }
    }
}

impl fmt::Display for Camera {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Camera dump:")?;
        writeln!(f, "View   = {}", self.view_angles)?;
        writeln!(f, "Zoom   = {}", self.zoom)?;
        writeln!(f, "Rotate = {}", self.rotate_origin)?;
        writeln!(f, "Screen = {}", self.screen_origin)
    }
}
