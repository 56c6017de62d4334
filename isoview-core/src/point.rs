//! Point types and related functionality
//!
//! Points are values: every arithmetic helper returns a new point carrying a
//! copy of the receiver's attributes, and only the explicit setters mutate.

use crate::attributes::Attributes;
use nalgebra as na;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Planar rotation of the `(a, b)` pair by `degrees` clockwise.
///
/// The pair is converted to polar form, the angle is reduced by the rotation
/// and the pair is rebuilt from the radius.
#[inline]
fn rotate_pair(a: &mut f64, b: &mut f64, degrees: f64) {
    let angle = b.atan2(*a) - degrees.to_radians();
    let radius = a.hypot(*b);
    *a = radius * angle.cos();
    *b = radius * angle.sin();
}

/// A 2D point with display attributes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Point2D {
    pub position: na::Point2<f64>,
    attr: Attributes,
}

impl Point2D {
    /// Create a point with default attributes
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            position: na::Point2::new(x, y),
            attr: Attributes::default(),
        }
    }

    /// The point at (0, 0)
    pub fn origin() -> Self {
        Self::new(0.0, 0.0)
    }

    /// Builder-style attribute assignment
    pub fn with_attributes(mut self, attr: Attributes) -> Self {
        self.attr = attr;
        self
    }

    pub fn x(&self) -> f64 {
        self.position.x
    }

    pub fn y(&self) -> f64 {
        self.position.y
    }

    pub fn set_x(&mut self, x: f64) {
        self.position.x = x;
    }

    pub fn set_y(&mut self, y: f64) {
        self.position.y = y;
    }

    /// Replace both coordinates
    pub fn set_coords(&mut self, x: f64, y: f64) {
        self.position = na::Point2::new(x, y);
    }

    /// Replace the coordinates only, keeping the current attributes
    pub fn set(&mut self, other: &Point2D) {
        self.position = other.position;
    }

    /// Replace the coordinates and the attributes
    pub fn set_all(&mut self, other: &Point2D) {
        self.position = other.position;
        self.attr = other.attr;
    }

    /// A copy of this point's attributes
    pub fn attributes(&self) -> Attributes {
        self.attr
    }

    pub fn set_attributes(&mut self, attr: &Attributes) {
        self.attr = *attr;
    }

    /// Euclidean distance between two points
    pub fn distance_from(&self, other: &Point2D) -> f64 {
        na::distance(&self.position, &other.position)
    }

    pub fn sum(&self, other: &Point2D) -> Point2D {
        self.with_position(self.position + other.position.coords)
    }

    pub fn difference(&self, other: &Point2D) -> Point2D {
        self.with_position(self.position - other.position.coords)
    }

    pub fn product(&self, factor: f64) -> Point2D {
        self.with_position(na::Point2::from(self.position.coords * factor))
    }

    pub fn quotient(&self, factor: f64) -> Point2D {
        self.with_position(na::Point2::from(self.position.coords / factor))
    }

    pub fn negative(&self) -> Point2D {
        self.with_position(na::Point2::from(-self.position.coords))
    }

    pub fn set_sum(&mut self, other: &Point2D) {
        self.position += other.position.coords;
    }

    pub fn set_difference(&mut self, other: &Point2D) {
        self.position -= other.position.coords;
    }

    pub fn set_product(&mut self, factor: f64) {
        self.position.coords *= factor;
    }

    pub fn set_quotient(&mut self, factor: f64) {
        self.position.coords /= factor;
    }

    pub fn set_negative(&mut self) {
        self.position.coords = -self.position.coords;
    }

    /// Rotate clockwise about `origin`.
    ///
    /// Planar geometry has a single rotational degree of freedom, so only the
    /// X component of `angles` is used. A zero angle leaves the point untouched.
    pub fn rotate(&mut self, angles: &Point2D, origin: &Point2D) {
        self.set_difference(origin);

        if angles.x() != 0.0 {
            let (mut x, mut y) = (self.position.x, self.position.y);
            rotate_pair(&mut x, &mut y, angles.x());
            self.set_coords(x, y);
        }

        self.set_sum(origin);
    }

    /// Rotate clockwise about (0, 0)
    pub fn rotate_about_origin(&mut self, angles: &Point2D) {
        self.rotate(angles, &Point2D::origin());
    }

    /// Rotated copy of this point
    pub fn rotated(&self, angles: &Point2D, origin: &Point2D) -> Point2D {
        let mut p = self.clone();
        p.rotate(angles, origin);
        p
    }

    fn with_position(&self, position: na::Point2<f64>) -> Point2D {
        Point2D {
            position,
            attr: self.attr,
        }
    }
}

impl Default for Point2D {
    fn default() -> Self {
        Self::origin()
    }
}

/// Coordinate equality; attributes are not compared
impl PartialEq for Point2D {
    fn eq(&self, other: &Self) -> bool {
        self.position == other.position
    }
}

impl fmt::Display for Point2D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x(), self.y())
    }
}

/// A 3D point with display attributes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Point3D {
    pub position: na::Point3<f64>,
    attr: Attributes,
}

impl Point3D {
    /// Create a point with default attributes
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self {
            position: na::Point3::new(x, y, z),
            attr: Attributes::default(),
        }
    }

    /// The point at (0, 0, 0)
    pub fn origin() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    /// Builder-style attribute assignment
    pub fn with_attributes(mut self, attr: Attributes) -> Self {
        self.attr = attr;
        self
    }

    pub fn x(&self) -> f64 {
        self.position.x
    }

    pub fn y(&self) -> f64 {
        self.position.y
    }

    pub fn z(&self) -> f64 {
        self.position.z
    }

    pub fn set_x(&mut self, x: f64) {
        self.position.x = x;
    }

    pub fn set_y(&mut self, y: f64) {
        self.position.y = y;
    }

    pub fn set_z(&mut self, z: f64) {
        self.position.z = z;
    }

    /// Replace all three coordinates
    pub fn set_coords(&mut self, x: f64, y: f64, z: f64) {
        self.position = na::Point3::new(x, y, z);
    }

    /// Replace the coordinates only, keeping the current attributes
    pub fn set(&mut self, other: &Point3D) {
        self.position = other.position;
    }

    /// Replace the coordinates and the attributes
    pub fn set_all(&mut self, other: &Point3D) {
        self.position = other.position;
        self.attr = other.attr;
    }

    /// A copy of this point's attributes
    pub fn attributes(&self) -> Attributes {
        self.attr
    }

    pub fn set_attributes(&mut self, attr: &Attributes) {
        self.attr = *attr;
    }

    /// Euclidean distance between two points
    pub fn distance_from(&self, other: &Point3D) -> f64 {
        na::distance(&self.position, &other.position)
    }

    pub fn sum(&self, other: &Point3D) -> Point3D {
        self.with_position(self.position + other.position.coords)
    }

    pub fn difference(&self, other: &Point3D) -> Point3D {
        self.with_position(self.position - other.position.coords)
    }

    pub fn product(&self, factor: f64) -> Point3D {
        self.with_position(na::Point3::from(self.position.coords * factor))
    }

    pub fn quotient(&self, factor: f64) -> Point3D {
        self.with_position(na::Point3::from(self.position.coords / factor))
    }

    pub fn negative(&self) -> Point3D {
        self.with_position(na::Point3::from(-self.position.coords))
    }

    /// Point halfway between this point and `other`, with this point's attributes
    pub fn midpoint(&self, other: &Point3D) -> Point3D {
        self.sum(&other.difference(self).product(0.5))
    }

    pub fn set_sum(&mut self, other: &Point3D) {
        self.position += other.position.coords;
    }

    pub fn set_difference(&mut self, other: &Point3D) {
        self.position -= other.position.coords;
    }

    pub fn set_product(&mut self, factor: f64) {
        self.position.coords *= factor;
    }

    pub fn set_quotient(&mut self, factor: f64) {
        self.position.coords /= factor;
    }

    pub fn set_negative(&mut self) {
        self.position.coords = -self.position.coords;
    }

    /// Rotate clockwise about `origin` by the per-axis angles in degrees.
    ///
    /// The point is moved into the origin's frame and turned about Z, then Y,
    /// then X. Each turn reassigns only the two coordinates of its plane; an
    /// axis whose angle is exactly zero is skipped.
    pub fn rotate(&mut self, angles: &Point3D, origin: &Point3D) {
        self.set_difference(origin);

        let (mut x, mut y, mut z) = (self.x(), self.y(), self.z());
        if angles.z() != 0.0 {
            rotate_pair(&mut x, &mut y, angles.z());
        }
        if angles.y() != 0.0 {
            rotate_pair(&mut x, &mut z, angles.y());
        }
        if angles.x() != 0.0 {
            rotate_pair(&mut y, &mut z, angles.x());
        }
        self.set_coords(x, y, z);

        self.set_sum(origin);
    }

    /// Rotate clockwise about (0, 0, 0)
    pub fn rotate_about_origin(&mut self, angles: &Point3D) {
        self.rotate(angles, &Point3D::origin());
    }

    /// Rotated copy of this point
    pub fn rotated(&self, angles: &Point3D, origin: &Point3D) -> Point3D {
        let mut p = self.clone();
        p.rotate(angles, origin);
        p
    }

    /// Drop the Z coordinate, keeping the attributes
    pub fn to_2d(&self) -> Point2D {
        Point2D::new(self.x(), self.y()).with_attributes(self.attr)
    }

    fn with_position(&self, position: na::Point3<f64>) -> Point3D {
        Point3D {
            position,
            attr: self.attr,
        }
    }
}

/// Lift a planar point into 3D at `z = 0`
impl From<Point2D> for Point3D {
    fn from(p: Point2D) -> Self {
        Point3D::new(p.x(), p.y(), 0.0).with_attributes(p.attributes())
    }
}

impl From<na::Point3<f64>> for Point3D {
    fn from(position: na::Point3<f64>) -> Self {
        Point3D {
            position,
            attr: Attributes::default(),
        }
    }
}

impl From<na::Point2<f64>> for Point2D {
    fn from(position: na::Point2<f64>) -> Self {
        Point2D {
            position,
            attr: Attributes::default(),
        }
    }
}

impl Default for Point3D {
    fn default() -> Self {
        Self::origin()
    }
}

/// Coordinate equality; attributes are not compared
impl PartialEq for Point3D {
    fn eq(&self, other: &Self) -> bool {
        self.position == other.position
    }
}

impl fmt::Display for Point3D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x(), self.y(), self.z())
    }
}
