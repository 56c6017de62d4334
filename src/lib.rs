//! # isoview
//!
//! A scene-graph viewer core for 3D points and polygons.
//!
//! This is the umbrella crate that provides convenient access to all isoview
//! functionality. You can use this crate to get everything in one place, or use
//! individual crates for more granular control over dependencies.
//!
//! ## Features
//!
//! - **Core**: Scene graph (points, groups, attributes, change notification)
//! - **I/O**: Model loading (ASCII and binary STL, MPP path plans)
//! - **Render**: Camera, projectors, painter's-algorithm renderer, navigation
//!
//! ## Quick Start
//!
//! ```rust
//! use isoview::prelude::*;
//!
//! let triangle = Group::from_nodes(vec![
//!     Point3D::new(0.0, 0.0, 0.0).into(),
//!     Point3D::new(1.0, 0.0, 0.0).into(),
//!     Point3D::new(0.0, 1.0, 0.0).into(),
//! ]);
//!
//! let mut env = Environment::new();
//! env.set_model(Group::from_nodes(vec![triangle.into()]).into());
//! env.fit(&ScreenRect::from_size(800.0, 600.0));
//!
//! let mut surface = RecordingSurface::new();
//! env.render();
//! env.paint(&mut surface);
//! assert_eq!(surface.polygon_fills(), 1);
//! ```
//!
//! ## Feature Flags
//!
//! - `default`: Enables io and render
//! - `io`: Model file loading
//! - `render`: Projection, rendering and navigation (implies `io`)
//! - `all`: Enables all features

// Re-export core functionality
pub use isoview_core::*;

// Re-export sub-crates
#[cfg(feature = "io")]
pub use isoview_io as io;

#[cfg(feature = "render")]
pub use isoview_render as render;

/// Convenient imports for common use cases
pub mod prelude {
    pub use isoview_core::*;

    #[cfg(feature = "io")]
    pub use isoview_io::{load, LoadError, LoaderRegistry, ObjectLoader, ObjectReader};

    #[cfg(feature = "render")]
    pub use isoview_render::*;
}
