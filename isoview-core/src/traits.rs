//! Core traits shared by every scene node

use crate::attributes::Attributes;
use crate::point::Point3D;

/// Capabilities of anything that can be drawn: style, extents and center
pub trait Drawable {
    /// A copy of the node's own attributes
    fn attributes(&self) -> Attributes;

    /// Replace the node's own attributes
    fn set_attributes(&mut self, attr: &Attributes);

    /// Replace the attributes of the node and of every descendant
    fn set_attributes_to_all(&mut self, attr: &Attributes);

    /// Fold the per-axis extremes of the node.
    ///
    /// `more_extreme(candidate, current)` returns true when `candidate` should
    /// replace `current`. A leaf point is its own extents.
    fn extents(&self, more_extreme: &dyn Fn(f64, f64) -> bool) -> Point3D;

    /// Smallest coordinate on each axis
    fn min_extents(&self) -> Point3D {
        self.extents(&|candidate, current| candidate < current)
    }

    /// Largest coordinate on each axis
    fn max_extents(&self) -> Point3D {
        self.extents(&|candidate, current| candidate > current)
    }

    /// Widest span across X, Y and Z
    fn extents_max_range(&self) -> f64 {
        let span = self.max_extents().position - self.min_extents().position;
        span.x.max(span.y.max(span.z))
    }

    /// Geometric center
    fn center(&self) -> Point3D;
}

/// Objects that can be rotated in place
pub trait Transformable {
    /// Rotate clockwise about `origin` by per-axis angles in degrees
    fn rotate(&mut self, angles: &Point3D, origin: &Point3D);

    /// Rotate clockwise about the world origin
    fn rotate_about_origin(&mut self, angles: &Point3D) {
        self.rotate(angles, &Point3D::origin());
    }
}
