//! Integration tests for isoview-render
//!
//! These tests drive the full pipeline: loading a file into an environment,
//! projecting it through the camera, depth sorting and painting.

use approx::assert_relative_eq;
use isoview_core::{Attributes, Drawable, Group, GroupUpdate, Point2D, Point3D, SceneNode, Transformable};
use isoview_render::*;
use std::cell::RefCell;
use std::io::Write;
use std::rc::Rc;

/// Triangle parallel to the YZ plane at the given X
fn facing_triangle(x: f64) -> SceneNode {
    Group::from_nodes(vec![
        Point3D::new(x, -1.0, -1.0).into(),
        Point3D::new(x, 1.0, -1.0).into(),
        Point3D::new(x, 0.0, 1.0).into(),
    ])
    .into()
}

/// Binary STL with one facet per X offset
fn write_binary_stl(offsets: &[f32]) -> tempfile::NamedTempFile {
    let mut bytes = vec![0u8; 80];
    bytes.extend_from_slice(&(offsets.len() as u32).to_le_bytes());
    for &x in offsets {
        let values = [
            0.0, 0.0, 1.0, // normal
            x, 0.0, 0.0, //
            x + 4.0, 0.0, 0.0, //
            x, 4.0, 0.0,
        ];
        for v in values {
            bytes.extend_from_slice(&f32::to_le_bytes(v));
        }
        bytes.extend_from_slice(&[0, 0]);
    }

    let mut file = tempfile::Builder::new().suffix(".stl").tempfile().unwrap();
    file.write_all(&bytes).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_painters_order_back_to_front() {
    // Default eye sits at (1000, 0, 0)
    let scene: SceneNode = Group::from_nodes(vec![
        facing_triangle(995.0),
        facing_triangle(999.0),
        facing_triangle(997.0),
    ])
    .into();
    let camera = Camera::new();
    let eye = camera.camera_location();

    let mut renderer = Renderer::new();
    let frame = renderer.render(&scene, &camera);
    assert_eq!(renderer.last_order(RenderQuality::Med), Some(&[0, 2, 1][..]));

    let source = scene.as_group().unwrap();
    let distances: Vec<f64> = renderer
        .last_order(RenderQuality::Med)
        .unwrap()
        .iter()
        .map(|&i| source.get(i).unwrap().center().distance_from(&eye).round())
        .collect();
    assert_eq!(distances, vec![5.0, 3.0, 1.0]);

    // Every frame point is already in screen space
    assert_eq!(frame.len(), 3);
    for node in frame.iter() {
        let group = node.as_group().unwrap();
        assert!(group.iter().all(|child| matches!(child, SceneNode::Point2(_))));
    }

    let mut surface = RecordingSurface::new();
    renderer.paint(&mut surface);
    assert_eq!(surface.polygon_fills(), 3);
    assert_eq!(surface.polygon_strokes(), 3);
}

#[test]
fn test_zoom_to_point_keeps_point_fixed() {
    let mut camera = Camera::new();
    camera.set_projector(ProjectorKind::Isometric);
    camera.set_view_angles(&Point3D::new(10.0, 20.0, 30.0));
    camera.set_screen_origin(&Point2D::new(320.0, 240.0));

    let world = Point3D::new(3.0, -2.0, 7.0);
    let fixed = camera.project(&world);

    camera.set_zoom_to_point(4.5, &fixed);
    let after = camera.project(&world);
    assert_relative_eq!(after.x(), fixed.x(), epsilon = 1e-9);
    assert_relative_eq!(after.y(), fixed.y(), epsilon = 1e-9);
    assert_eq!(camera.zoom(), 4.5);
}

#[test]
fn test_set_zoom_to_keeps_rotate_origin_fixed() {
    let mut camera = Camera::new();
    camera.set_rotate_origin(&Point3D::new(5.0, 5.0, 5.0));
    camera.set_screen_origin(&Point2D::new(100.0, 50.0));
    let before = camera.project(&camera.rotate_origin());

    camera.set_zoom_to(3.0);
    let after = camera.project(&camera.rotate_origin());
    assert_relative_eq!(after.x(), before.x(), epsilon = 1e-9);
    assert_relative_eq!(after.y(), before.y(), epsilon = 1e-9);
}

#[test]
fn test_camera_edits_coalesce() {
    let mut camera = Camera::new();
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    camera.add_listener(move |u| sink.borrow_mut().push(u));

    camera.batch(|camera| {
        camera.set_zoom(2.0);
        camera.set_view_angles(&Point3D::new(0.0, 45.0, 45.0));
        camera.set_screen_origin(&Point2D::new(10.0, 10.0));
    });
    camera.set_zoom(3.0);

    assert_eq!(*log.borrow(), vec![CameraUpdate::All, CameraUpdate::Zoom]);
}

#[test]
fn test_group_edits_coalesce() {
    let mut group = Group::new();
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    group.add_listener(move |u| sink.borrow_mut().push(u));

    group.batch(|group| {
        group.add(Point3D::new(1.0, 0.0, 0.0));
        group.add(Point3D::new(0.0, 1.0, 0.0));
        group.rotate_about_origin(&Point3D::new(0.0, 0.0, 90.0));
    });
    group.set_attributes(&Attributes::default().without_fill());

    assert_eq!(*log.borrow(), vec![GroupUpdate::All, GroupUpdate::Attributes]);
}

#[test]
fn test_rotation_round_trip() {
    let original = Group::from_nodes(vec![
        Point3D::new(1.0, 2.0, 3.0).into(),
        Group::from_nodes(vec![
            Point3D::new(-4.0, 0.5, 2.0).into(),
            Point2D::new(3.0, -1.0).into(),
        ])
        .into(),
    ]);
    let origin = Point3D::new(0.5, 0.5, 0.5);

    for axis in [
        Point3D::new(37.0, 0.0, 0.0),
        Point3D::new(0.0, 37.0, 0.0),
        Point3D::new(0.0, 0.0, 37.0),
    ] {
        let mut group = original.clone();
        group.rotate(&axis, &origin);
        assert_ne!(group, original);
        group.rotate(&axis.negative(), &origin);

        let min = group.min_extents().position;
        let max = group.max_extents().position;
        assert_relative_eq!(min, original.min_extents().position, epsilon = 1e-9);
        assert_relative_eq!(max, original.max_extents().position, epsilon = 1e-9);
    }
}

#[test]
fn test_compound_rotation_undone_in_reverse_order() {
    let original = Point3D::new(2.0, -3.0, 5.0);
    let origin = Point3D::new(1.0, 1.0, 1.0);
    let (a, b, c) = (25.0, -70.0, 130.0);

    let mut p = original.rotated(&Point3D::new(a, b, c), &origin);
    // Turns are applied Z, Y, X; undo X first
    p.rotate(&Point3D::new(-a, 0.0, 0.0), &origin);
    p.rotate(&Point3D::new(0.0, -b, 0.0), &origin);
    p.rotate(&Point3D::new(0.0, 0.0, -c), &origin);

    assert_relative_eq!(p.position, original.position, epsilon = 1e-9);
}

#[test]
fn test_environment_binary_stl_pipeline() {
    let file = write_binary_stl(&[0.0, 10.0]);

    let mut env = Environment::new();
    env.load(file.path()).unwrap();
    assert_eq!(env.model().len(), 2);
    assert_eq!(env.model().point_count(), 6);
    assert_eq!(env.camera().extents_max_range(), 14.0);

    env.fit(&ScreenRect::from_size(800.0, 600.0));
    env.camera_mut().set_render_quality(RenderQuality::High);
    let frame = env.render();

    // Two parents kept without fill plus four pieces each
    assert_eq!(frame.len(), 10);
    let mut surface = RecordingSurface::new();
    env.paint(&mut surface);
    assert_eq!(surface.polygon_fills(), 8);
    assert_eq!(surface.texts().len(), 2);
}

#[test]
fn test_navigation_session() {
    let mut env = Environment::new();
    env.set_model(
        Group::from_nodes(vec![facing_triangle(0.0), facing_triangle(4.0)]).into(),
    );

    let mut nav = Navigator::new();
    nav.resize(env.camera_mut(), 640.0, 480.0);
    let model: SceneNode = env.model().clone().into();
    nav.fit_model(env.camera_mut(), &model);
    let fitted = env.camera().zoom();
    assert!(fitted > 1.0);

    nav.key(env.camera_mut(), NavKey::Up, Modifiers::NONE);
    nav.zoom_command(env.camera_mut(), ZoomCommand::InAtCenter);
    assert_relative_eq!(env.camera().zoom(), fitted * 1.05, epsilon = 1e-9);
    assert_eq!(env.camera().view_angles().y(), 2.0);

    let frame = env.render();
    assert_eq!(frame.len(), 2);
}
