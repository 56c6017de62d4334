//! One-level triangle subdivision for the high quality pipeline

use crate::renderer::RenderOptions;
use isoview_core::{Attributes, Group, Point3D, SceneNode};

/// Split every top-level triangle of `nodes` into four.
///
/// A triangle is a group whose only children are exactly three points. Its
/// edge midpoints yield three corner triangles and one center triangle, which
/// are appended after the existing nodes. With `keep_subdivided_parent` the
/// parent stays in place with its fill turned off; otherwise it is removed.
/// Returns the number of triangles split.
pub fn subdivide(nodes: &mut Vec<SceneNode>, options: &RenderOptions) -> usize {
    let mut subdivided = Vec::new();
    let mut split = 0;

    for node in nodes.iter_mut() {
        let Some(group) = node.as_group_mut() else {
            continue;
        };
        let Some(corners) = triangle_corners(group) else {
            continue;
        };

        let pieces = split_triangle(&corners, &group.attributes(), options.subdivided_edge_opacity);
        subdivided.extend(pieces.into_iter().map(SceneNode::from));

        let attr = group.attributes().without_fill();
        group.set_attributes(&attr);
        split += 1;
    }

    if !options.keep_subdivided_parent {
        nodes.retain(|node| node.as_group().and_then(triangle_corners).is_none());
    }
    nodes.extend(subdivided);

    split
}

/// The three vertices of a triangle group, planar points lifted to `z = 0`
pub fn triangle_corners(group: &Group) -> Option<[Point3D; 3]> {
    match group.children() {
        [a, b, c] => Some([
            Point3D::try_from(a).ok()?,
            Point3D::try_from(b).ok()?,
            Point3D::try_from(c).ok()?,
        ]),
        _ => None,
    }
}

/// Four sub-triangles through the edge midpoints.
///
/// Each piece copies `attr` with the edge opacity replaced and point markers
/// turned off.
pub fn split_triangle(corners: &[Point3D; 3], attr: &Attributes, edge_opacity: f64) -> [Group; 4] {
    let [v0, v1, v2] = corners;
    let mid01 = v0.midpoint(v1);
    let mid12 = v1.midpoint(v2);
    let mid20 = v2.midpoint(v0);

    let piece_attr = Attributes {
        edge_opacity,
        show_points: false,
        ..*attr
    };
    let piece = |a: &Point3D, b: &Point3D, c: &Point3D| {
        Group::with_attributes(
            piece_attr,
            vec![a.clone().into(), b.clone().into(), c.clone().into()],
        )
    };

    [
        piece(v0, &mid01, &mid20),
        piece(v1, &mid01, &mid12),
        piece(v2, &mid12, &mid20),
        piece(&mid01, &mid12, &mid20),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use isoview_core::{Drawable, Point2D};

    fn triangle() -> SceneNode {
        Group::from_nodes(vec![
            Point3D::new(0.0, 0.0, 0.0).into(),
            Point3D::new(4.0, 0.0, 0.0).into(),
            Point3D::new(0.0, 4.0, 0.0).into(),
        ])
        .into()
    }

    fn square() -> SceneNode {
        Group::from_nodes(vec![
            Point3D::new(0.0, 0.0, 0.0).into(),
            Point3D::new(1.0, 0.0, 0.0).into(),
            Point3D::new(1.0, 1.0, 0.0).into(),
            Point3D::new(0.0, 1.0, 0.0).into(),
        ])
        .into()
    }

    #[test]
    fn test_keeps_parent_without_fill() {
        let mut nodes = vec![triangle(), square()];
        let split = subdivide(&mut nodes, &RenderOptions::default());

        assert_eq!(split, 1);
        assert_eq!(nodes.len(), 6);
        assert!(!nodes[0].attributes().show_fill);
        assert!(nodes[1].attributes().show_fill);
        assert_eq!(nodes[1], square());
    }

    #[test]
    fn test_drops_parent_when_configured() {
        let options = RenderOptions {
            keep_subdivided_parent: false,
            ..RenderOptions::default()
        };
        let mut nodes = vec![triangle(), square()];
        subdivide(&mut nodes, &options);

        assert_eq!(nodes.len(), 5);
        assert_eq!(nodes[0], square());
    }

    #[test]
    fn test_piece_geometry_and_attributes() {
        let mut nodes = vec![triangle()];
        subdivide(&mut nodes, &RenderOptions::default());

        let center = nodes[4].as_group().unwrap();
        assert_eq!(center.get(0).unwrap(), Point3D::new(2.0, 0.0, 0.0).into());
        assert_eq!(center.get(1).unwrap(), Point3D::new(2.0, 2.0, 0.0).into());
        assert_eq!(center.get(2).unwrap(), Point3D::new(0.0, 2.0, 0.0).into());

        for piece in &nodes[1..] {
            let attr = piece.attributes();
            assert_eq!(attr.edge_opacity, 0.25);
            assert!(!attr.show_points);
            assert!(attr.show_fill);
        }

        // Pieces tile the parent
        let total: f64 = nodes[1..].iter().map(|n| n.extents_max_range()).sum();
        assert_eq!(total, 8.0);
    }

    #[test]
    fn test_non_triangles_untouched() {
        let nested = Group::from_nodes(vec![
            Point3D::origin().into(),
            Point3D::new(1.0, 0.0, 0.0).into(),
            Group::new().into(),
        ]);
        let mut nodes = vec![nested.clone().into(), Point3D::origin().into(), square()];
        assert_eq!(subdivide(&mut nodes, &RenderOptions::default()), 0);
        assert_eq!(nodes.len(), 3);
        assert_eq!(nodes[0], nested.into());
    }

    #[test]
    fn test_planar_triangle_is_lifted() {
        let flat = Group::from_nodes(vec![
            Point2D::new(0.0, 0.0).into(),
            Point2D::new(2.0, 0.0).into(),
            Point2D::new(0.0, 2.0).into(),
        ]);
        let corners = triangle_corners(&flat).unwrap();
        assert_eq!(corners[2], Point3D::new(0.0, 2.0, 0.0));
    }
}
