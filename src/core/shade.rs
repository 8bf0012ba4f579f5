//! Binary shade / sunlight masks from a horizon altitude grid

use crate::types::{AltitudeGrid, ShadeMask};

/// Mark cells whose local horizon rises above the sun.
///
/// A cell is shaded (1) when the sun elevation is strictly below the
/// horizon altitude scanned for it; everything else, including missing
/// cells (altitude 0), is 0.
pub fn shade_mask(altitudes: &AltitudeGrid, sun_altitude: f64) -> ShadeMask {
    altitudes.mapv(|horizon| u8::from(sun_altitude < horizon))
}

/// Complement of [`shade_mask`]: 1 where the sun clears the local horizon.
pub fn sunlight_mask(altitudes: &AltitudeGrid, sun_altitude: f64) -> ShadeMask {
    altitudes.mapv(|horizon| u8::from(sun_altitude >= horizon))
}

/// Parallel variant of [`sunlight_mask`] for large rasters.
#[cfg(feature = "parallel")]
pub fn sunlight_mask_parallel(altitudes: &AltitudeGrid, sun_altitude: f64) -> ShadeMask {
    use ndarray::Zip;

    Zip::from(altitudes).par_map_collect(|&horizon| u8::from(sun_altitude >= horizon))
}
