use ndarray::Array2;

/// Elevation raster in meters (rows x cols). Missing cells carry `f64::NAN`.
pub type DemGrid = Array2<f64>;

/// Horizon altitude raster in degrees, same shape as the DEM it was
/// derived from. Cells with no terrain obstruction (or missing input)
/// hold `0.0`.
pub type AltitudeGrid = Array2<f64>;

/// Binary shade or sunlight mask (0/1 per cell).
pub type ShadeMask = Array2<u8>;

/// Error types for horizon and shade processing
#[derive(Debug, thiserror::Error)]
pub enum ShadeError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Processing error: {0}")]
    Processing(String),

    #[error("Scan cancelled")]
    Cancelled,
}

/// Result type for horizon and shade operations
pub type ShadeResult<T> = Result<T, ShadeError>;
