//! Core horizon scanning modules

pub mod direction;
pub mod horizon;
pub mod shade;

// Re-export main types
pub use direction::StepVector;
pub use horizon::{curvature_drop, HorizonScanner, ScanParams};
pub use shade::{shade_mask, sunlight_mask};

#[cfg(feature = "parallel")]
pub use shade::sunlight_mask_parallel;
