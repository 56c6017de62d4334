//! Projection and painting for isoview scenes
//!
//! This crate turns a scene graph into a flat, depth-sorted list of screen
//! space polygons and paints it onto any [`PaintSurface`]:
//! - Camera with view angles, zoom, pan and auto-fit
//! - Isometric and perspective projectors
//! - Painter's-algorithm renderer with three quality levels
//! - Viewing session ([`Environment`]) and input navigation

pub mod camera;
pub mod environment;
pub mod navigation;
pub mod projector;
pub mod renderer;
pub mod surface;
pub mod tessellate;

pub use camera::*;
pub use environment::*;
pub use navigation::*;
pub use projector::*;
pub use renderer::*;
pub use surface::*;
