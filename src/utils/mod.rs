//! Geometry helpers shared by the detector
//!
//! - Perspective transforms between the module grid and image space

/// Perspective transform between quadrilaterals
pub mod geometry;
