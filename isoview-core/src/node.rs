//! The polymorphic scene node: a 2D point, a 3D point or a group

use crate::attributes::Attributes;
use crate::error::{Error, Result};
use crate::group::Group;
use crate::point::{Point2D, Point3D};
use crate::traits::{Drawable, Transformable};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A node of the drawable model tree.
///
/// The tree is value-semantic: a group owns its children outright and hands
/// out copies, so no two places ever observe the same node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SceneNode {
    Point2(Point2D),
    Point3(Point3D),
    Group(Group),
}

impl SceneNode {
    /// True for either point variant
    pub fn is_point(&self) -> bool {
        !matches!(self, SceneNode::Group(_))
    }

    pub fn as_group(&self) -> Option<&Group> {
        match self {
            SceneNode::Group(group) => Some(group),
            _ => None,
        }
    }

    pub fn as_group_mut(&mut self) -> Option<&mut Group> {
        match self {
            SceneNode::Group(group) => Some(group),
            _ => None,
        }
    }

    /// Number of leaf points below (or at) this node
    pub fn point_count(&self) -> usize {
        match self {
            SceneNode::Group(group) => group.point_count(),
            _ => 1,
        }
    }

    /// Apply `f` to the attributes of this node and all of its descendants
    pub fn update_attributes_recursive(&mut self, f: &mut dyn FnMut(&mut Attributes)) {
        match self {
            SceneNode::Point2(p) => {
                let mut attr = p.attributes();
                f(&mut attr);
                p.set_attributes(&attr);
            }
            SceneNode::Point3(p) => {
                let mut attr = p.attributes();
                f(&mut attr);
                p.set_attributes(&attr);
            }
            SceneNode::Group(group) => group.update_attributes_recursive(f),
        }
    }

    /// Coordinate-wise sum of two points of the same dimension
    pub fn try_sum(&self, other: &SceneNode) -> Result<SceneNode> {
        match (self, other) {
            (SceneNode::Point2(a), SceneNode::Point2(b)) => Ok(a.sum(b).into()),
            (SceneNode::Point3(a), SceneNode::Point3(b)) => Ok(a.sum(b).into()),
            _ => Err(Error::Unsupported(format!(
                "sum of {} and {}",
                self.kind_name(),
                other.kind_name()
            ))),
        }
    }

    /// Coordinate-wise difference of two points of the same dimension
    pub fn try_difference(&self, other: &SceneNode) -> Result<SceneNode> {
        match (self, other) {
            (SceneNode::Point2(a), SceneNode::Point2(b)) => Ok(a.difference(b).into()),
            (SceneNode::Point3(a), SceneNode::Point3(b)) => Ok(a.difference(b).into()),
            _ => Err(Error::Unsupported(format!(
                "difference of {} and {}",
                self.kind_name(),
                other.kind_name()
            ))),
        }
    }

    pub fn negative(&self) -> SceneNode {
        match self {
            SceneNode::Point2(p) => p.negative().into(),
            SceneNode::Point3(p) => p.negative().into(),
            SceneNode::Group(g) => g.negative().into(),
        }
    }

    pub fn product(&self, factor: f64) -> SceneNode {
        match self {
            SceneNode::Point2(p) => p.product(factor).into(),
            SceneNode::Point3(p) => p.product(factor).into(),
            SceneNode::Group(g) => g.product(factor).into(),
        }
    }

    pub fn quotient(&self, factor: f64) -> SceneNode {
        match self {
            SceneNode::Point2(p) => p.quotient(factor).into(),
            SceneNode::Point3(p) => p.quotient(factor).into(),
            SceneNode::Group(g) => g.quotient(factor).into(),
        }
    }

    fn kind_name(&self) -> &'static str {
        match self {
            SceneNode::Point2(_) => "2D point",
            SceneNode::Point3(_) => "3D point",
            SceneNode::Group(_) => "group",
        }
    }
}

impl Drawable for SceneNode {
    fn attributes(&self) -> Attributes {
        match self {
            SceneNode::Point2(p) => p.attributes(),
            SceneNode::Point3(p) => p.attributes(),
            SceneNode::Group(g) => g.attributes(),
        }
    }

    fn set_attributes(&mut self, attr: &Attributes) {
        match self {
            SceneNode::Point2(p) => p.set_attributes(attr),
            SceneNode::Point3(p) => p.set_attributes(attr),
            SceneNode::Group(g) => g.set_attributes(attr),
        }
    }

    fn set_attributes_to_all(&mut self, attr: &Attributes) {
        match self {
            SceneNode::Point2(p) => p.set_attributes(attr),
            SceneNode::Point3(p) => p.set_attributes(attr),
            SceneNode::Group(g) => g.set_attributes_to_all(attr),
        }
    }

    fn extents(&self, more_extreme: &dyn Fn(f64, f64) -> bool) -> Point3D {
        match self {
            SceneNode::Point2(p) => Drawable::extents(p, more_extreme),
            SceneNode::Point3(p) => Drawable::extents(p, more_extreme),
            SceneNode::Group(g) => g.extents(more_extreme),
        }
    }

    fn center(&self) -> Point3D {
        match self {
            SceneNode::Point2(p) => Drawable::center(p),
            SceneNode::Point3(p) => Drawable::center(p),
            SceneNode::Group(g) => g.center(),
        }
    }
}

impl Transformable for SceneNode {
    fn rotate(&mut self, angles: &Point3D, origin: &Point3D) {
        match self {
            SceneNode::Point2(p) => Transformable::rotate(p, angles, origin),
            SceneNode::Point3(p) => p.rotate(angles, origin),
            SceneNode::Group(g) => Transformable::rotate(g, angles, origin),
        }
    }
}

impl Drawable for Point2D {
    fn attributes(&self) -> Attributes {
        Point2D::attributes(self)
    }

    fn set_attributes(&mut self, attr: &Attributes) {
        Point2D::set_attributes(self, attr);
    }

    fn set_attributes_to_all(&mut self, attr: &Attributes) {
        Point2D::set_attributes(self, attr);
    }

    fn extents(&self, _more_extreme: &dyn Fn(f64, f64) -> bool) -> Point3D {
        Point3D::from(self.clone())
    }

    fn center(&self) -> Point3D {
        Point3D::from(self.clone())
    }
}

/// Uses the X angle and the planar part of `origin`
impl Transformable for Point2D {
    fn rotate(&mut self, angles: &Point3D, origin: &Point3D) {
        Point2D::rotate(self, &angles.to_2d(), &origin.to_2d());
    }
}

impl Drawable for Point3D {
    fn attributes(&self) -> Attributes {
        Point3D::attributes(self)
    }

    fn set_attributes(&mut self, attr: &Attributes) {
        Point3D::set_attributes(self, attr);
    }

    fn set_attributes_to_all(&mut self, attr: &Attributes) {
        Point3D::set_attributes(self, attr);
    }

    fn extents(&self, _more_extreme: &dyn Fn(f64, f64) -> bool) -> Point3D {
        self.clone()
    }

    fn center(&self) -> Point3D {
        self.clone()
    }
}

impl Transformable for Point3D {
    fn rotate(&mut self, angles: &Point3D, origin: &Point3D) {
        Point3D::rotate(self, angles, origin);
    }
}

impl From<Point2D> for SceneNode {
    fn from(p: Point2D) -> Self {
        SceneNode::Point2(p)
    }
}

impl From<Point3D> for SceneNode {
    fn from(p: Point3D) -> Self {
        SceneNode::Point3(p)
    }
}

impl From<Group> for SceneNode {
    fn from(g: Group) -> Self {
        SceneNode::Group(g)
    }
}

/// 2D points are lifted to `z = 0`
impl TryFrom<&SceneNode> for Point3D {
    type Error = Error;

    fn try_from(node: &SceneNode) -> Result<Self> {
        match node {
            SceneNode::Point3(p) => Ok(p.clone()),
            SceneNode::Point2(p) => Ok(Point3D::from(p.clone())),
            SceneNode::Group(_) => Err(Error::InvalidData(
                "expected a point, found a group".to_string(),
            )),
        }
    }
}

impl TryFrom<SceneNode> for Point3D {
    type Error = Error;

    fn try_from(node: SceneNode) -> Result<Self> {
        Point3D::try_from(&node)
    }
}

/// 3D points lose their Z coordinate
impl TryFrom<&SceneNode> for Point2D {
    type Error = Error;

    fn try_from(node: &SceneNode) -> Result<Self> {
        match node {
            SceneNode::Point2(p) => Ok(p.clone()),
            SceneNode::Point3(p) => Ok(p.to_2d()),
            SceneNode::Group(_) => Err(Error::InvalidData(
                "expected a point, found a group".to_string(),
            )),
        }
    }
}

impl TryFrom<SceneNode> for Point2D {
    type Error = Error;

    fn try_from(node: SceneNode) -> Result<Self> {
        Point2D::try_from(&node)
    }
}

impl fmt::Display for SceneNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SceneNode::Point2(p) => p.fmt(f),
            SceneNode::Point3(p) => p.fmt(f),
            SceneNode::Group(g) => g.fmt(f),
        }
    }
}
