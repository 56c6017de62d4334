//! Ordered container of scene nodes with its own attributes and change listeners

use crate::attributes::Attributes;
use crate::error::{Error, Result};
use crate::node::SceneNode;
use crate::notify::{GroupUpdate, UpdateNotifier};
use crate::point::Point3D;
use crate::traits::{Drawable, Transformable};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A group of points and nested groups.
///
/// Children are owned values: [`Group::get`] returns a copy and [`Group::add`]
/// takes ownership of what it is given, so the tree is never aliased. Every
/// mutating operation runs inside one hold/release pair of the group's
/// notifier, so listeners hear about a compound edit exactly once.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Group {
    children: Vec<SceneNode>,
    attr: Attributes,
    #[serde(skip)]
    notifier: UpdateNotifier<GroupUpdate>,
}

impl Group {
    /// Create an empty group with default attributes
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a group from a list of nodes
    pub fn from_nodes(nodes: Vec<SceneNode>) -> Self {
        Self {
            children: nodes,
            ..Self::default()
        }
    }

    /// Create a group from a list of nodes with the given attributes
    pub fn with_attributes(attr: Attributes, nodes: Vec<SceneNode>) -> Self {
        Self {
            children: nodes,
            attr,
            notifier: UpdateNotifier::new(),
        }
    }

    /// A copy of the child at `index`
    pub fn get(&self, index: usize) -> Result<SceneNode> {
        self.children
            .get(index)
            .cloned()
            .ok_or(Error::IndexOutOfRange {
                index,
                len: self.children.len(),
            })
    }

    /// Append one node
    pub fn add(&mut self, node: impl Into<SceneNode>) {
        self.hold_updates(true);
        self.children.push(node.into());
        self.hold_updates(false);
    }

    /// Append several nodes
    pub fn add_all<I>(&mut self, nodes: I)
    where
        I: IntoIterator,
        I::Item: Into<SceneNode>,
    {
        self.hold_updates(true);
        self.children.extend(nodes.into_iter().map(Into::into));
        self.hold_updates(false);
    }

    /// Replace the children only, keeping this group's attributes
    pub fn set(&mut self, other: &Group) {
        let attr = self.attr;
        self.set_with_attributes(other, &attr);
    }

    /// Replace the children and the attributes
    pub fn set_all(&mut self, other: &Group) {
        self.set_with_attributes(other, &other.attr);
    }

    fn set_with_attributes(&mut self, other: &Group, attr: &Attributes) {
        self.hold_updates(true);

        self.clear();
        self.add_all(other.children.iter().cloned());
        self.set_attributes(attr);

        self.hold_updates(false);
    }

    /// Replace the children with `nodes`.
    ///
    /// A single group is adopted wholesale, children and attributes alike.
    /// Anything else becomes the new child list.
    pub fn set_list(&mut self, nodes: Vec<SceneNode>) {
        self.hold_updates(true);

        match <[SceneNode; 1]>::try_from(nodes) {
            Ok([SceneNode::Group(group)]) => self.set_all(&group),
            Ok([node]) => {
                self.clear();
                self.add(node);
            }
            Err(nodes) => {
                self.clear();
                self.add_all(nodes);
            }
        }

        self.hold_updates(false);
    }

    /// Remove every child
    pub fn clear(&mut self) {
        self.hold_updates(true);
        self.children.clear();
        self.hold_updates(false);
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Copy of the children as a list
    pub fn to_vec(&self) -> Vec<SceneNode> {
        self.children.clone()
    }

    /// Read-only view of the children
    pub fn children(&self) -> &[SceneNode] {
        &self.children
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SceneNode> {
        self.children.iter()
    }

    /// Consume the group, returning its children
    pub fn into_nodes(self) -> Vec<SceneNode> {
        self.children
    }

    /// Number of leaf points in the whole subtree
    pub fn point_count(&self) -> usize {
        self.children.iter().map(SceneNode::point_count).sum()
    }

    /// A copy of the group's own attributes
    pub fn attributes(&self) -> Attributes {
        self.attr
    }

    /// Replace the group's own attributes; descendants are untouched
    pub fn set_attributes(&mut self, attr: &Attributes) {
        self.hold_updates(true);
        self.attr = *attr;
        self.notifier.release(GroupUpdate::Attributes);
    }

    /// Replace the attributes of the group and of every descendant
    pub fn set_attributes_to_all(&mut self, attr: &Attributes) {
        self.hold_updates(true);

        self.set_attributes(attr);
        for child in self.children.iter_mut() {
            child.set_attributes_to_all(attr);
        }

        self.notifier.release(GroupUpdate::Attributes);
    }

    /// Apply `f` to the attributes of the group and of every descendant
    pub fn update_attributes_recursive(&mut self, f: &mut dyn FnMut(&mut Attributes)) {
        self.hold_updates(true);

        f(&mut self.attr);
        for child in self.children.iter_mut() {
            child.update_attributes_recursive(f);
        }

        self.notifier.release(GroupUpdate::Attributes);
    }

    /// Register a change listener
    pub fn add_listener(&mut self, listener: impl FnMut(GroupUpdate) + 'static) {
        self.notifier.add_listener(listener);
    }

    /// Notify listeners of a full change unless updates are held
    pub fn update(&mut self) {
        self.notifier.notify(GroupUpdate::All);
    }

    /// `true` opens a hold, `false` closes one and flushes at depth zero
    pub fn hold_updates(&mut self, do_hold: bool) {
        self.notifier.hold_updates(do_hold, GroupUpdate::All);
    }

    /// Run `f` inside a single hold/release pair
    pub fn batch<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        self.hold_updates(true);
        let result = f(self);
        self.hold_updates(false);
        result
    }

    /// Negated copy of every child
    pub fn negative(&self) -> Group {
        self.map_children(SceneNode::negative)
    }

    /// Every child scaled by `factor`
    pub fn product(&self, factor: f64) -> Group {
        self.map_children(|node| node.product(factor))
    }

    /// Every child divided by `factor`
    pub fn quotient(&self, factor: f64) -> Group {
        self.map_children(|node| node.quotient(factor))
    }

    pub fn set_negative(&mut self) {
        let negated = self.negative();
        self.set(&negated);
    }

    pub fn set_product(&mut self, factor: f64) {
        let scaled = self.product(factor);
        self.set(&scaled);
    }

    pub fn set_quotient(&mut self, factor: f64) {
        let scaled = self.quotient(factor);
        self.set(&scaled);
    }

    fn map_children(&self, f: impl Fn(&SceneNode) -> SceneNode) -> Group {
        Group::with_attributes(self.attr, self.children.iter().map(f).collect())
    }
}

impl Drawable for Group {
    fn attributes(&self) -> Attributes {
        self.attr
    }

    fn set_attributes(&mut self, attr: &Attributes) {
        Group::set_attributes(self, attr);
    }

    fn set_attributes_to_all(&mut self, attr: &Attributes) {
        Group::set_attributes_to_all(self, attr);
    }

    /// Starts from the first child's extents; planar point children never
    /// contribute a Z value. An empty group reports the origin.
    fn extents(&self, more_extreme: &dyn Fn(f64, f64) -> bool) -> Point3D {
        let mut extents = match self.children.first() {
            Some(first) => first.extents(more_extreme),
            None => return Point3D::origin(),
        };

        for child in &self.children {
            let sub = child.extents(more_extreme);

            if more_extreme(sub.x(), extents.x()) {
                extents.set_x(sub.x());
            }
            if more_extreme(sub.y(), extents.y()) {
                extents.set_y(sub.y());
            }
            if !matches!(child, SceneNode::Point2(_)) && more_extreme(sub.z(), extents.z()) {
                extents.set_z(sub.z());
            }
        }

        extents
    }

    /// Mean of the children's centers
    fn center(&self) -> Point3D {
        if self.children.is_empty() {
            return Point3D::origin();
        }

        let mut center = Point3D::origin();
        for child in &self.children {
            center.set_sum(&child.center());
        }
        center.quotient(self.children.len() as f64)
    }
}

impl Transformable for Group {
    fn rotate(&mut self, angles: &Point3D, origin: &Point3D) {
        self.hold_updates(true);

        for child in self.children.iter_mut() {
            child.rotate(angles, origin);
        }

        self.hold_updates(false);
    }
}

/// Children and attributes; listeners are not part of a group's value
impl PartialEq for Group {
    fn eq(&self, other: &Self) -> bool {
        self.children == other.children && self.attr == other.attr
    }
}

impl FromIterator<SceneNode> for Group {
    fn from_iter<I: IntoIterator<Item = SceneNode>>(iter: I) -> Self {
        Group::from_nodes(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Group {
    type Item = &'a SceneNode;
    type IntoIter = std::slice::Iter<'a, SceneNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.children.iter()
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Size: {}", self.children.len())?;
        for child in &self.children {
            writeln!(f, "{}", child)?;
        }
        Ok(())
    }
}
