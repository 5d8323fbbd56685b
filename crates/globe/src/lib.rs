//! Rotating launch-site globe.
//!
//! The scene (sphere, markers, starfield) is plain data advanced by explicit
//! elapsed time; drawing goes through the [`view::GlobeRenderer`] capability
//! so the host picks the graphics backend.

pub mod camera;
pub mod markers;
pub mod scene;
pub mod view;

pub use camera::*;
pub use markers::*;
pub use scene::*;
pub use view::*;
