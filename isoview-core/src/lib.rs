//! Core data structures and traits for isoview
//!
//! This crate provides the drawable scene model: 2D and 3D points, groups of
//! nodes, display attributes, and the hold/release change notification shared
//! by groups and the camera.

pub mod attributes;
pub mod error;
pub mod group;
pub mod node;
pub mod notify;
pub mod point;
pub mod traits;

pub use attributes::*;
pub use error::*;
pub use group::*;
pub use node::*;
pub use notify::*;
pub use point::*;
pub use traits::*;

/// Re-export commonly used types from nalgebra
pub use nalgebra::{Point2, Point3, Vector2, Vector3};
