//! Coordinate transforms for skydrone.
//!
//! Geographic fixes are projected onto a Web Mercator plane, and planar
//! coordinates are mapped into the renderer's axis convention.

pub mod projection;

// Re-export key functions for convenience.
pub use projection::{project_geographic, render_heading, to_render_space, unproject};
