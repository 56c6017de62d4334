//! 3D to screen projection strategies

use crate::camera::{Camera, RenderQuality};
use isoview_core::{Attributes, Point2D, Point3D};
use serde::{Deserialize, Serialize};

/// Converts world points to 2D Cartesian points and then to screen pixels
pub trait Projector: Send + Sync {
    /// Short name of the projection type
    fn name(&self) -> &'static str;

    /// World point to 2D Cartesian point; attributes are carried over and the
    /// pixel radius is filled in
    fn project_3d_to_2d(&self, point: &Point3D, camera: &Camera) -> Point2D;

    /// 2D Cartesian point to screen pixels. Screen Y grows downward.
    fn project_2d_to_screen(&self, point: &Point2D, camera: &Camera) -> Point2D {
        let origin = camera.screen_origin();
        let zoom = camera.zoom();

        let mut screen = point.clone();
        screen.set_coords(
            origin.x() + point.x() * zoom,
            origin.y() - point.y() * zoom,
        );
        screen
    }

    fn project_3d_to_screen(&self, point: &Point3D, camera: &Camera) -> Point2D {
        self.project_2d_to_screen(&self.project_3d_to_2d(point, camera), camera)
    }
}

/// Orthographic projection onto the view plane
#[derive(Debug, Clone, Copy, Default)]
pub struct IsometricProjector;

/// Perspective projection with exponential size falloff toward a vanishing point
#[derive(Debug, Clone, Copy, Default)]
pub struct PerspectiveProjector;

/// Selects one of the built-in projectors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ProjectorKind {
    Isometric,
    #[default]
    Perspective,
}

impl ProjectorKind {
    pub fn projector(self) -> &'static dyn Projector {
        match self {
            ProjectorKind::Isometric => &IsometricProjector,
            ProjectorKind::Perspective => &PerspectiveProjector,
        }
    }
}

/// Rotate `point` by the camera view about the rotate origin and drop the
/// depth axis, keeping (Y, Z) as the planar coordinates
fn view_plane(point: &Point3D, camera: &Camera) -> Point2D {
    let rotated = point.rotated(&camera.view_angles(), &camera.rotate_origin());
    Point2D::new(rotated.y(), rotated.z())
}

/// Attributes with the on-screen point radius for this frame
fn with_pixel_radius(attr: Attributes, quality: RenderQuality, scaled_radius: f64) -> Attributes {
    if !attr.show_points {
        return attr;
    }

    let radius = match quality {
        RenderQuality::Low => attr.point_radius,
        RenderQuality::Med | RenderQuality::High => scaled_radius,
    };
    Attributes {
        pixel_radius: radius as u32,
        ..attr
    }
}

impl Projector for IsometricProjector {
    fn name(&self) -> &'static str {
        "isometric"
    }

    fn project_3d_to_2d(&self, point: &Point3D, camera: &Camera) -> Point2D {
        let attr = point.attributes();
        let attr = with_pixel_radius(
            attr,
            camera.render_quality(),
            attr.point_radius * camera.zoom(),
        );
        view_plane(point, camera).with_attributes(attr)
    }
}

impl PerspectiveProjector {
    /// Size factor for `point`: 0.5 raised to its distance from the eye, in
    /// units of `perspective_unit` virtual radii
    pub fn scaling(point: &Point3D, camera: &Camera) -> f64 {
        let radius = camera.range_multiplier() * camera.extents_max_range();
        if radius <= 0.0 {
            return 1.0;
        }

        let eye = camera.camera_location_with_radius(radius);
        let distance = point.distance_from(&eye) / (camera.perspective_unit() * radius);
        0.5_f64.powf(distance)
    }
}

impl Projector for PerspectiveProjector {
    fn name(&self) -> &'static str {
        "perspective"
    }

    fn project_3d_to_2d(&self, point: &Point3D, camera: &Camera) -> Point2D {
        let scaling = Self::scaling(point, camera);

        // Pull the naive projection toward the vanishing point
        let origin = camera.rotate_origin();
        let vanish = Point2D::new(origin.y(), origin.z());
        let shift = view_plane(point, camera).difference(&vanish).product(scaling);

        let attr = point.attributes();
        let attr = with_pixel_radius(
            attr,
            camera.render_quality(),
            attr.point_radius * camera.zoom() * scaling,
        );
        vanish.sum(&shift).with_attributes(attr)
    }
}
