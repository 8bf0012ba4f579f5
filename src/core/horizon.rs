use crate::core::direction::StepVector;
use crate::types::{AltitudeGrid, DemGrid, ShadeError, ShadeResult};
use ndarray::{Array2, Axis};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};

/// Earth radius in meters
const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Degrees of arc subtended per meter of ground distance,
/// 360 / (2 * pi * EARTH_RADIUS_M)
const DEG_PER_METER: f64 = 9.0e-6;

/// Parameters for a horizon altitude scan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanParams {
    /// Compass direction to scan, degrees clockwise from north
    pub azimuth: f64,
    /// Correction between grid north and true north, degrees
    pub grid_convergence: f64,
    /// DEM cell size in meters
    pub resolution: f64,
    /// Subtract the Earth-curvature drop from every elevation difference
    pub correct_curvature: bool,
    /// Step acceleration factor; 1.0 marches one cell at a time, larger
    /// values stride geometrically and trade long-range precision for speed
    pub inc_factor: f64,
}

impl Default for ScanParams {
    fn default() -> Self {
        Self {
            azimuth: 180.0,          // midday sun, northern hemisphere
            grid_convergence: 0.0,
            resolution: 1.0,
            correct_curvature: false,
            inc_factor: 1.0,         // exhaustive unit stepping
        }
    }
}

/// Apparent lowering, in meters, of terrain `distance` meters away due
/// to Earth curvature.
pub fn curvature_drop(distance: f64) -> f64 {
    let total_angle = DEG_PER_METER * distance;
    EARTH_RADIUS_M * (1.0 - total_angle.to_radians().cos())
}

/// Largest non-missing elevation in the grid.
///
/// Returns negative infinity for an all-missing grid; such a grid never
/// reaches the pruning bound because every origin cell is skipped first.
fn max_elevation(dem: &DemGrid) -> f64 {
    dem.iter()
        .copied()
        .filter(|v| !v.is_nan())
        .fold(f64::NEG_INFINITY, f64::max)
}

/// Horizon altitude scanner
///
/// For every DEM cell, marches outward along the azimuth direction and
/// records the steepest elevation angle seen before the ray leaves the
/// grid. The search stops early once not even the grid's highest point
/// could raise the horizon above the angle already found.
pub struct HorizonScanner {
    params: ScanParams,
}

impl HorizonScanner {
    /// Create a new scanner, validating the configuration up front
    pub fn new(params: ScanParams) -> ShadeResult<Self> {
        Self::validate(&params)?;
        Ok(Self { params })
    }

    /// Scanner with default parameters for the given azimuth
    pub fn for_azimuth(azimuth: f64) -> ShadeResult<Self> {
        Self::new(ScanParams {
            azimuth,
            ..ScanParams::default()
        })
    }

    /// The validated scan parameters
    pub fn params(&self) -> &ScanParams {
        &self.params
    }

    fn validate(params: &ScanParams) -> ShadeResult<()> {
        if !params.resolution.is_finite() || params.resolution <= 0.0 {
            return Err(ShadeError::InvalidConfig(format!(
                "resolution must be a positive number of meters, got {}",
                params.resolution
            )));
        }
        if !params.inc_factor.is_finite() || params.inc_factor < 1.0 {
            return Err(ShadeError::InvalidConfig(format!(
                "inc_factor must be >= 1.0 so the march always advances, got {}",
                params.inc_factor
            )));
        }
        if !params.azimuth.is_finite() || !params.grid_convergence.is_finite() {
            return Err(ShadeError::InvalidConfig(format!(
                "azimuth ({}) and grid_convergence ({}) must be finite",
                params.azimuth, params.grid_convergence
            )));
        }
        Ok(())
    }

    /// Scan the whole DEM, returning one horizon altitude per cell.
    ///
    /// Missing cells (NaN) keep altitude `0.0`. The output grid has the
    /// same shape as the input.
    pub fn scan(&self, dem: &DemGrid) -> ShadeResult<AltitudeGrid> {
        let cancel = AtomicBool::new(false);
        self.scan_cancellable(dem, &cancel)
    }

    /// Scan with cooperative cancellation.
    ///
    /// The flag is checked once per column lane, not inside the marching
    /// loop; a raised flag aborts the scan with [`ShadeError::Cancelled`]
    /// and no partial result is returned.
    pub fn scan_cancellable(
        &self,
        dem: &DemGrid,
        cancel: &AtomicBool,
    ) -> ShadeResult<AltitudeGrid> {
        let (height, width) = dem.dim();
        if height == 0 || width == 0 {
            return Err(ShadeError::InvalidConfig(
                "DEM grid must not be empty".to_string(),
            ));
        }

        log::info!(
            "Scanning horizon altitudes for azimuth {:.2} deg",
            self.params.azimuth
        );
        log::debug!(
            "DEM shape: {}x{}, resolution {} m, curvature correction: {}, inc_factor: {}",
            height,
            width,
            self.params.resolution,
            self.params.correct_curvature,
            self.params.inc_factor
        );

        let vector = StepVector::from_azimuth(
            self.params.azimuth,
            self.params.grid_convergence,
            self.params.resolution,
        );
        log::debug!(
            "Step vector: dx={:.6}, dy={:.6}, dxy={:.3} m",
            vector.dx,
            vector.dy,
            vector.dxy
        );

        let max_elev = max_elevation(dem);

        let mut altitudes = Array2::zeros((height, width));
        self.scan_into(dem, &mut altitudes, vector, max_elev, cancel)?;

        log::info!("Horizon scan completed");
        Ok(altitudes)
    }

    /// Parallel dispatch over column lanes.
    ///
    /// Each rayon task owns a disjoint column of the output while sharing
    /// the DEM read-only, so no synchronization is needed and the result
    /// is bit-identical to the sequential path.
    #[cfg(feature = "parallel")]
    fn scan_into(
        &self,
        dem: &DemGrid,
        altitudes: &mut AltitudeGrid,
        vector: StepVector,
        max_elev: f64,
        cancel: &AtomicBool,
    ) -> ShadeResult<()> {
        use rayon::prelude::*;

        altitudes
            .axis_iter_mut(Axis(1))
            .into_par_iter()
            .enumerate()
            .try_for_each(|(col, mut lane)| {
                if cancel.load(Ordering::Relaxed) {
                    return Err(ShadeError::Cancelled);
                }
                for (row, cell) in lane.iter_mut().enumerate() {
                    *cell = self.scan_cell(dem, row, col, vector, max_elev);
                }
                Ok(())
            })
    }

    #[cfg(not(feature = "parallel"))]
    fn scan_into(
        &self,
        dem: &DemGrid,
        altitudes: &mut AltitudeGrid,
        vector: StepVector,
        max_elev: f64,
        cancel: &AtomicBool,
    ) -> ShadeResult<()> {
        for (col, mut lane) in altitudes.axis_iter_mut(Axis(1)).enumerate() {
            if cancel.load(Ordering::Relaxed) {
                return Err(ShadeError::Cancelled);
            }
            for (row, cell) in lane.iter_mut().enumerate() {
                *cell = self.scan_cell(dem, row, col, vector, max_elev);
            }
        }
        Ok(())
    }

    /// March one cell's transect and return its horizon altitude in degrees.
    fn scan_cell(
        &self,
        dem: &DemGrid,
        row: usize,
        col: usize,
        vector: StepVector,
        max_elev: f64,
    ) -> f64 {
        let origin_elevation = dem[[row, col]];
        if origin_elevation.is_nan() {
            return 0.0;
        }

        let (height, width) = dem.dim();
        let mut altitude_min = 0.0_f64;
        let mut step: i32 = 0;

        loop {
            // accelerating schedule: collapses to unit steps for
            // inc_factor == 1, geometrically growing stride otherwise
            let step_factor = f64::from(step) + self.params.inc_factor.powi(step + 1);
            step += 1;

            let distance_step = vector.dxy * step_factor;
            let row_step = row as f64 + (vector.dy * step_factor).round();
            let col_step = col as f64 + (vector.dx * step_factor).round();

            let in_bounds = row_step >= 0.0
                && row_step < height as f64
                && col_step >= 0.0
                && col_step < width as f64;
            if !in_bounds {
                break;
            }

            let elev_step = dem[[row_step as usize, col_step as usize]];
            let correction = if self.params.correct_curvature {
                curvature_drop(distance_step)
            } else {
                0.0
            };
            // a NaN target fails every comparison below, so a missing
            // cell neither raises the horizon nor triggers the prune
            let elev_diff_step = elev_step - origin_elevation - correction;

            if elev_diff_step > 0.0 {
                let altitude_step = (elev_diff_step / distance_step).atan().to_degrees();
                if altitude_step > altitude_min {
                    altitude_min = altitude_step;
                } else {
                    // not even the highest cell in the grid can beat the
                    // current horizon from this distance onwards
                    let altitude_max = ((max_elev - correction - origin_elevation)
                        / distance_step)
                        .atan()
                        .to_degrees();
                    if altitude_max < altitude_min {
                        break;
                    }
                }
            }
        }

        altitude_min
    }
}
