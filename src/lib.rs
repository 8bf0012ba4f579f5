//! ShadeScan: A Fast, Parallel Terrain Horizon and Shade Analysis Engine
//!
//! This library computes, for every cell of a digital elevation raster and a
//! compass azimuth, the minimum sun elevation at which the cell is no longer
//! blocked by terrain along that direction. Thresholding the resulting
//! altitude grid against a sun position yields binary shade/sunlight masks.

pub mod core;
pub mod types;

// Re-export main types and functions for easier access
pub use types::{AltitudeGrid, DemGrid, ShadeError, ShadeMask, ShadeResult};

pub use core::{curvature_drop, shade_mask, sunlight_mask, HorizonScanner, ScanParams, StepVector};

#[cfg(feature = "parallel")]
pub use core::sunlight_mask_parallel;
