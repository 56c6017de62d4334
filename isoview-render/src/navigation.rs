//! Interactive navigation: mouse and keyboard input mapped to camera edits
//!
//! The navigator knows nothing about any windowing toolkit. A host translates
//! its own events into the calls below; each call is one camera transaction
//! and therefore produces at most one camera notification.

use crate::camera::{Camera, ScreenRect};
use isoview_core::{Point2D, Point3D, SceneNode};
use serde::{Deserialize, Serialize};

/// Input sensitivity settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NavigationConfig {
    /// Rotation per pixel of mouse drag
    pub degrees_per_pixel: f64,
    /// Rotation per arrow key press
    pub degrees_per_key: f64,
    /// Zoom factor per zoom key press
    pub zoom_per_key: f64,
    /// Zoom factor per wheel click
    pub zoom_per_wheel: f64,
    /// Fraction of the viewport left empty around a fitted model
    pub zoom_inset: f64,
    /// Pan distance per arrow key press
    pub pixels_per_key: f64,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            degrees_per_pixel: 0.40,
            degrees_per_key: 2.0,
            zoom_per_key: 1.05,
            zoom_per_wheel: 1.02,
            zoom_inset: 0.50,
            pixels_per_key: 5.0,
        }
    }
}

/// Modifier keys held during an input event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub alt: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        alt: false,
    };
    pub const SHIFT: Modifiers = Modifiers {
        shift: true,
        alt: false,
    };
    pub const ALT: Modifiers = Modifiers {
        shift: false,
        alt: true,
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Primary,
    /// Always pans
    Secondary,
}

/// Arrow keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    Left,
    Right,
    Up,
    Down,
}

/// Typed zoom shortcuts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomCommand {
    /// `=`: zoom in about the viewport center
    InAtCenter,
    /// `-`: zoom out about the viewport center
    OutAtCenter,
    /// `+`: zoom in about the rotate origin
    InAtOrigin,
    /// `_`: zoom out about the rotate origin
    OutAtOrigin,
}

impl ZoomCommand {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '=' => Some(ZoomCommand::InAtCenter),
            '-' => Some(ZoomCommand::OutAtCenter),
            '+' => Some(ZoomCommand::InAtOrigin),
            '_' => Some(ZoomCommand::OutAtOrigin),
            _ => None,
        }
    }
}

/// Stateful input-to-camera controller
#[derive(Debug, Clone, Default)]
pub struct Navigator {
    config: NavigationConfig,
    prev_mouse: Option<Point2D>,
    viewport: Option<ScreenRect>,
}

impl Navigator {
    /// Create a navigator with default sensitivity
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: NavigationConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &NavigationConfig {
        &self.config
    }

    pub fn viewport(&self) -> Option<ScreenRect> {
        self.viewport
    }

    fn viewport_center(&self) -> Point2D {
        self.viewport
            .map(|rect| rect.center())
            .unwrap_or_else(Point2D::origin)
    }

    /// Mouse moved to `pt` with a button held.
    ///
    /// The first event of a drag only records the position. Shift or the
    /// secondary button pans; Alt rolls about X; otherwise the view orbits in
    /// Y (vertical motion) and Z (horizontal motion).
    pub fn drag(&mut self, camera: &mut Camera, pt: Point2D, button: MouseButton, mods: Modifiers) {
        camera.hold_updates(true);

        if let Some(prev) = self.prev_mouse.take() {
            let dx = pt.x() - prev.x();
            let dy = pt.y() - prev.y();
            let dpp = self.config.degrees_per_pixel;

            if mods.shift || button == MouseButton::Secondary {
                let origin = camera.screen_origin();
                camera.set_screen_origin(&origin.sum(&Point2D::new(dx, dy)));
            } else if mods.alt {
                let mut angles = camera.view_angles();
                angles.set_x(angles.x() + dx * dpp);
                camera.set_view_angles(&angles);
            } else {
                let mut angles = camera.view_angles();
                let direction = orbit_direction(&angles);
                angles.set_y(angles.y() + dy * dpp);
                angles.set_z(angles.z() - dx * dpp * direction);
                camera.set_view_angles(&angles);
            }
        }
        self.prev_mouse = Some(pt);

        camera.hold_updates(false);
    }

    /// Mouse button released
    pub fn end_drag(&mut self) {
        self.prev_mouse = None;
    }

    /// Wheel turned by `clicks` (positive zooms in). Shift zooms about the
    /// rotate origin, otherwise about the viewport center.
    pub fn wheel(&mut self, camera: &mut Camera, clicks: i32, mods: Modifiers) {
        camera.hold_updates(true);

        let zoom = camera.zoom() * self.config.zoom_per_wheel.powi(clicks);
        if mods.shift {
            camera.set_zoom_to(zoom);
        } else {
            camera.set_zoom_to_point(zoom, &self.viewport_center());
        }

        camera.hold_updates(false);
    }

    /// Arrow key pressed
    pub fn key(&mut self, camera: &mut Camera, key: NavKey, mods: Modifiers) {
        camera.hold_updates(true);

        let step = self.config.pixels_per_key;
        let dpk = self.config.degrees_per_key;
        let mut angles = camera.view_angles();
        let direction = orbit_direction(&angles);

        if mods.shift {
            let mut origin = camera.screen_origin();
            match key {
                NavKey::Right => origin.set_x(origin.x() - step),
                NavKey::Left => origin.set_x(origin.x() + step),
                NavKey::Up => origin.set_y(origin.y() + step),
                NavKey::Down => origin.set_y(origin.y() - step),
            }
            camera.set_screen_origin(&origin);
        } else {
            match (key, mods.alt) {
                (NavKey::Right, true) => angles.set_x(angles.x() + dpk),
                (NavKey::Left, true) => angles.set_x(angles.x() - dpk),
                (NavKey::Right, false) => angles.set_z(angles.z() + dpk * direction),
                (NavKey::Left, false) => angles.set_z(angles.z() - dpk * direction),
                (NavKey::Up, _) => angles.set_y(angles.y() + dpk),
                (NavKey::Down, _) => angles.set_y(angles.y() - dpk),
            }
            camera.set_view_angles(&angles);
        }

        camera.hold_updates(false);
    }

    /// Zoom shortcut
    pub fn zoom_command(&mut self, camera: &mut Camera, command: ZoomCommand) {
        camera.hold_updates(true);

        let zoom = camera.zoom();
        let factor = self.config.zoom_per_key;
        match command {
            ZoomCommand::InAtCenter => camera.set_zoom_to_point(zoom * factor, &self.viewport_center()),
            ZoomCommand::OutAtCenter => camera.set_zoom_to_point(zoom / factor, &self.viewport_center()),
            ZoomCommand::InAtOrigin => camera.set_zoom_to(zoom * factor),
            ZoomCommand::OutAtOrigin => camera.set_zoom_to(zoom / factor),
        }

        camera.hold_updates(false);
    }

    /// Viewport resized to `width` x `height`.
    ///
    /// The view stays centered and the zoom scales with the square root of
    /// the area change. The first call only records the size.
    pub fn resize(&mut self, camera: &mut Camera, width: f64, height: f64) {
        camera.hold_updates(true);

        let rect = ScreenRect::from_size(width, height);
        if let Some(prev) = self.viewport.filter(|prev| prev.area() > 0.0) {
            let shift = rect.center().difference(&prev.center());
            camera.set_screen_origin(&camera.screen_origin().sum(&shift));

            let zoom = camera.zoom() * (rect.area() / prev.area()).sqrt();
            camera.set_zoom_to(zoom);
        }
        self.viewport = Some(rect);

        camera.hold_updates(false);
    }

    /// Fit `model` into the inset viewport as seen head-on, then restore the
    /// view angles. Does nothing before the first resize.
    pub fn fit_model(&mut self, camera: &mut Camera, model: &SceneNode) {
        let Some(viewport) = self.viewport.filter(|rect| rect.area() > 0.0) else {
            tracing::debug!("fit requested before the viewport has a size; ignored");
            return;
        };

        camera.hold_updates(true);

        // Keeps zoom independent of the view angles
        let angles = camera.view_angles();
        camera.set_view_angles(&Point3D::origin());
        camera.zoom_to_fit(model, &viewport.inset(self.config.zoom_inset));
        camera.set_view_angles(&angles);

        camera.hold_updates(false);
    }
}

/// Horizontal orbit flips while the view is upside down
fn orbit_direction(angles: &Point3D) -> f64 {
    let elevation = angles.y().abs();
    if 90.0 < elevation && elevation < 270.0 {
        -1.0
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use isoview_core::{Drawable, Group};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn drag(nav: &mut Navigator, camera: &mut Camera, from: (f64, f64), to: (f64, f64), mods: Modifiers) {
        nav.drag(camera, Point2D::new(from.0, from.1), MouseButton::Primary, mods);
        nav.drag(camera, Point2D::new(to.0, to.1), MouseButton::Primary, mods);
        nav.end_drag();
    }

    #[test]
    fn test_drag_orbits() {
        let mut nav = Navigator::new();
        let mut camera = Camera::new();
        drag(&mut nav, &mut camera, (0.0, 0.0), (10.0, 5.0), Modifiers::NONE);

        let angles = camera.view_angles();
        assert_relative_eq!(angles.y(), 2.0, epsilon = 1e-9);
        assert_relative_eq!(angles.z(), 356.0, epsilon = 1e-9);
    }

    #[test]
    fn test_drag_orbit_flips_upside_down() {
        let mut nav = Navigator::new();
        let mut camera = Camera::new();
        camera.set_view_angles(&Point3D::new(0.0, 180.0, 0.0));
        drag(&mut nav, &mut camera, (0.0, 0.0), (10.0, 0.0), Modifiers::NONE);
        assert_relative_eq!(camera.view_angles().z(), 4.0, epsilon = 1e-9);
    }

    #[test]
    fn test_drag_pans_and_rolls() {
        let mut nav = Navigator::new();
        let mut camera = Camera::new();
        drag(&mut nav, &mut camera, (0.0, 0.0), (7.0, -3.0), Modifiers::SHIFT);
        assert_eq!(camera.screen_origin(), Point2D::new(7.0, -3.0));

        nav.drag(&mut camera, Point2D::new(0.0, 0.0), MouseButton::Secondary, Modifiers::NONE);
        nav.drag(&mut camera, Point2D::new(1.0, 1.0), MouseButton::Secondary, Modifiers::NONE);
        nav.end_drag();
        assert_eq!(camera.screen_origin(), Point2D::new(8.0, -2.0));

        drag(&mut nav, &mut camera, (0.0, 0.0), (5.0, 0.0), Modifiers::ALT);
        assert_relative_eq!(camera.view_angles().x(), 2.0, epsilon = 1e-9);
    }

    #[test]
    fn test_first_drag_event_only_records() {
        let mut nav = Navigator::new();
        let mut camera = Camera::new();
        nav.drag(&mut camera, Point2D::new(50.0, 50.0), MouseButton::Primary, Modifiers::NONE);
        assert_eq!(camera.view_angles(), Point3D::origin());
    }

    #[test]
    fn test_arrow_keys() {
        let mut nav = Navigator::new();
        let mut camera = Camera::new();

        nav.key(&mut camera, NavKey::Right, Modifiers::SHIFT);
        nav.key(&mut camera, NavKey::Up, Modifiers::SHIFT);
        assert_eq!(camera.screen_origin(), Point2D::new(-5.0, 5.0));

        nav.key(&mut camera, NavKey::Up, Modifiers::NONE);
        nav.key(&mut camera, NavKey::Right, Modifiers::NONE);
        nav.key(&mut camera, NavKey::Left, Modifiers::ALT);
        assert_eq!(camera.view_angles(), Point3D::new(358.0, 2.0, 2.0));
    }

    #[test]
    fn test_wheel_zooms_about_center() {
        let mut nav = Navigator::new();
        let mut camera = Camera::new();
        nav.resize(&mut camera, 200.0, 100.0);

        nav.wheel(&mut camera, 3, Modifiers::NONE);
        assert_relative_eq!(camera.zoom(), 1.02_f64.powi(3), epsilon = 1e-12);

        nav.wheel(&mut camera, -3, Modifiers::SHIFT);
        assert_relative_eq!(camera.zoom(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_zoom_commands() {
        assert_eq!(ZoomCommand::from_char('+'), Some(ZoomCommand::InAtOrigin));
        assert_eq!(ZoomCommand::from_char('x'), None);

        let mut nav = Navigator::new();
        let mut camera = Camera::new();
        nav.zoom_command(&mut camera, ZoomCommand::InAtCenter);
        nav.zoom_command(&mut camera, ZoomCommand::InAtOrigin);
        nav.zoom_command(&mut camera, ZoomCommand::OutAtOrigin);
        assert_relative_eq!(camera.zoom(), 1.05, epsilon = 1e-12);
    }

    #[test]
    fn test_resize_keeps_center_and_scales_zoom() {
        let mut nav = Navigator::new();
        let mut camera = Camera::new();
        nav.resize(&mut camera, 100.0, 100.0);
        camera.set_screen_origin(&Point2D::new(50.0, 50.0));

        nav.resize(&mut camera, 200.0, 200.0);
        assert_relative_eq!(camera.zoom(), 2.0, epsilon = 1e-12);
        let center = camera.project(&camera.rotate_origin());
        assert_relative_eq!(center.x(), 100.0, epsilon = 1e-9);
        assert_relative_eq!(center.y(), 100.0, epsilon = 1e-9);
    }

    #[test]
    fn test_each_event_notifies_once() {
        let mut nav = Navigator::new();
        let mut camera = Camera::new();
        let log = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&log);
        camera.add_listener(move |_| *sink.borrow_mut() += 1);

        nav.resize(&mut camera, 100.0, 100.0);
        nav.resize(&mut camera, 300.0, 200.0);
        nav.key(&mut camera, NavKey::Down, Modifiers::NONE);
        nav.wheel(&mut camera, 1, Modifiers::NONE);
        assert_eq!(*log.borrow(), 4);
    }

    #[test]
    fn test_fit_model_fills_inset_and_restores_angles() {
        let model: SceneNode = Group::from_nodes(vec![
            Point3D::new(0.0, 0.0, 0.0).into(),
            Point3D::new(0.0, 10.0, 0.0).into(),
            Point3D::new(0.0, 0.0, 10.0).into(),
        ])
        .into();

        let mut nav = Navigator::new();
        let mut camera = Camera::new();
        camera.set_projector(crate::projector::ProjectorKind::Isometric);
        camera.set_view_angles(&Point3D::new(0.0, 30.0, 45.0));

        // Ignored without a viewport
        nav.fit_model(&mut camera, &model);
        assert_eq!(camera.zoom(), 1.0);

        nav.resize(&mut camera, 400.0, 300.0);
        nav.fit_model(&mut camera, &model);

        // Inset viewport is 200 x 150; a 10-unit model fills 150 pixels
        assert_relative_eq!(camera.zoom(), 15.0, epsilon = 1e-9);
        assert_eq!(camera.view_angles(), Point3D::new(0.0, 30.0, 45.0));
        assert_eq!(camera.rotate_origin(), model.center());
    }
}
