//! Rendering engine
//!
//! [`Renderer::render`] turns a world-space scene and a camera into a screen
//! space frame: a group tree of the same shape whose points are already
//! projected 2D pixels, ordered back to front. [`Renderer::paint`] then walks
//! the most recent frame and draws it on a [`PaintSurface`].

use crate::camera::{Camera, RenderQuality};
use crate::surface::PaintSurface;
use crate::tessellate;
use isoview_core::{Drawable, Group, Point2D, SceneNode};
use nalgebra::Point2;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Renderer configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RenderOptions {
    /// Keep a subdivided triangle (fill off) alongside its four pieces
    pub keep_subdivided_parent: bool,
    /// Edge opacity given to subdivision pieces
    pub subdivided_edge_opacity: f64,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            keep_subdivided_parent: true,
            subdivided_edge_opacity: 0.25,
        }
    }
}

/// Painter's-algorithm scene renderer
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    options: RenderOptions,
    frame: Group,
    last_order: HashMap<RenderQuality, Vec<usize>>,
}

impl Renderer {
    /// Create a new renderer with default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a renderer with the given options
    pub fn with_options(options: RenderOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: RenderOptions) {
        self.options = options;
    }

    /// The most recently rendered frame
    pub fn frame(&self) -> &Group {
        &self.frame
    }

    /// Node order of the last frame rendered at `quality`, as indices into
    /// the (possibly tessellated) top-level node list
    pub fn last_order(&self, quality: RenderQuality) -> Option<&[usize]> {
        self.last_order.get(&quality).map(Vec::as_slice)
    }

    /// Render `scene` as seen by `camera`.
    ///
    /// Neither input is modified. A lone point is rendered as a one-node
    /// scene. The frame is kept for [`Renderer::paint`] and also returned.
    pub fn render(&mut self, scene: &SceneNode, camera: &Camera) -> Group {
        let mut group = match scene {
            SceneNode::Group(group) => group.clone(),
            point => Group::from_nodes(vec![point.clone()]),
        };
        let quality = camera.render_quality();

        // Low quality draws outlines only
        if quality == RenderQuality::Low {
            group.update_attributes_recursive(&mut |attr| attr.show_fill = false);
        }

        let attr = group.attributes();
        let mut nodes = group.into_nodes();

        let split = match quality {
            RenderQuality::High => tessellate::subdivide(&mut nodes, &self.options),
            _ => 0,
        };

        let order: Vec<usize> = match quality {
            RenderQuality::Low => (0..nodes.len()).collect(),
            RenderQuality::Med | RenderQuality::High => depth_order(&nodes, camera),
        };

        let projected = order
            .iter()
            .filter_map(|&index| render_node(&nodes[index], camera))
            .collect();
        self.frame = Group::with_attributes(attr, projected);
        self.last_order.insert(quality, order);

        tracing::debug!(
            ?quality,
            nodes = self.frame.len(),
            tessellated = split,
            "frame rendered"
        );

        self.frame.clone()
    }

    /// Draw the last frame's top-level nodes in order
    pub fn paint(&self, surface: &mut dyn PaintSurface) {
        for node in self.frame.iter() {
            paint_node(node, surface);
        }
    }
}

/// Back-to-front order of `nodes` by distance from the camera eye to each
/// node's center.
///
/// The sort is stable and always starts from source order, so equidistant
/// nodes keep their scene order regardless of earlier frames.
pub fn depth_order(nodes: &[SceneNode], camera: &Camera) -> Vec<usize> {
    let eye = camera.camera_location();
    let distances: Vec<f64> = nodes
        .iter()
        .map(|node| node.center().distance_from(&eye))
        .collect();

    let mut order: Vec<usize> = (0..nodes.len()).collect();
    order.sort_by(|&a, &b| distances[b].total_cmp(&distances[a]));
    order
}


/// Project one node; groups keep their attributes and shape
fn render_node(node: &SceneNode, camera: &Camera) -> Option<SceneNode> {
    match node {
        SceneNode::Group(group) => {
            let children = group
                .iter()
                .filter_map(|child| render_node(child, camera))
                .collect();
            Some(Group::with_attributes(group.attributes(), children).into())
        }
        point => camera.render_point(point).map(SceneNode::from),
    }
}

fn paint_node(node: &SceneNode, surface: &mut dyn PaintSurface) {
    match node {
        SceneNode::Group(group) => paint_group(group, surface),
        SceneNode::Point2(point) => paint_marker(point, surface),
        SceneNode::Point3(point) => {
            tracing::error!(%point, "3D point reached the paint stage; skipped");
        }
    }
}

/// Polygon through the direct 2D children: fill, then edges, then markers.
/// Nested groups are painted after their parent's polygon.
fn paint_group(group: &Group, surface: &mut dyn PaintSurface) {
    let attr = group.attributes();
    let vertices: Vec<&Point2D> = group
        .iter()
        .filter_map(|child| match child {
            SceneNode::Point2(p) => Some(p),
            _ => None,
        })
        .collect();

    if !vertices.is_empty() {
        let polygon: Vec<Point2<f64>> = vertices.iter().map(|p| p.position).collect();

        if attr.show_fill {
            surface.set_color(attr.composite_fill_color());
            surface.fill_polygon(&polygon);
        }
        if attr.show_edges {
            surface.set_color(attr.composite_edge_color());
            surface.stroke_polygon(&polygon);
        }
        if attr.show_points {
            for vertex in &vertices {
                paint_marker(vertex, surface);
            }
        }
    }

    for child in group.iter() {
        match child {
            SceneNode::Point2(_) => {}
            other => paint_node(other, surface),
        }
    }
}

/// Filled circle of the point's pixel radius, or a single pixel
fn paint_marker(point: &Point2D, surface: &mut dyn PaintSurface) {
    let attr = point.attributes();
    surface.set_color(attr.composite_point_color());

    if attr.pixel_radius > 0 {
        surface.fill_circle(point.position, attr.pixel_radius as f64);
    } else {
        surface.fill_rect(point.x(), point.y(), 1.0, 1.0);
    }
}
