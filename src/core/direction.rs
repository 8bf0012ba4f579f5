//! Azimuth to grid step vector resolution

/// Truncating floating-point modulo: `x - trunc(x/y) * y`.
///
/// The sign follows the dividend, so negative azimuths stay negative
/// instead of wrapping into [0, y). Downstream octant selection depends
/// on this, so it must not be replaced with `rem_euclid`.
fn dmod(x: f64, y: f64) -> f64 {
    x - (x / y).trunc() * y
}

/// Which grid axis receives the tangent-scaled component of the step
/// vector; the other axis advances a full cell per step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OppAxis {
    Col,
    Row,
}

/// One of the eight 45-degree compass sectors used for step vector
/// assembly. Within each sector one axis is fixed to a full cell per
/// step and the other is scaled by the tangent of the reflected angle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Octant {
    Nne,
    Nee,
    See,
    Sse,
    Ssw,
    Sww,
    Nww,
    Nnw,
}

impl Octant {
    /// Sector lookup over eight half-open azimuth ranges.
    ///
    /// Inputs normalized with [`dmod`] can be negative; those fall into
    /// the first range, matching the truncated-modulo semantics.
    fn from_azimuth(azi: f64) -> Self {
        if azi <= 45.0 {
            Octant::Nne
        } else if azi <= 90.0 {
            Octant::Nee
        } else if azi <= 135.0 {
            Octant::See
        } else if azi <= 180.0 {
            Octant::Sse
        } else if azi <= 225.0 {
            Octant::Ssw
        } else if azi <= 270.0 {
            Octant::Sww
        } else if azi <= 315.0 {
            Octant::Nww
        } else {
            Octant::Nnw
        }
    }

    /// Sign of each axis and which axis gets the tangent component.
    ///
    /// Column sign is positive towards east, row sign positive towards
    /// south (row indices grow southwards).
    fn signs(self) -> (f64, f64, OppAxis) {
        match self {
            Octant::Nne => (1.0, -1.0, OppAxis::Col),
            Octant::Nee => (1.0, -1.0, OppAxis::Row),
            Octant::See => (1.0, 1.0, OppAxis::Row),
            Octant::Sse => (1.0, 1.0, OppAxis::Col),
            Octant::Ssw => (-1.0, 1.0, OppAxis::Col),
            Octant::Sww => (-1.0, 1.0, OppAxis::Row),
            Octant::Nww => (-1.0, -1.0, OppAxis::Row),
            Octant::Nnw => (-1.0, -1.0, OppAxis::Col),
        }
    }

    /// Assemble `(dx, dy)` from the sector table and the tangent of the
    /// reflected in-quadrant angle.
    fn components(self, dopp: f64) -> (f64, f64) {
        let (col_sign, row_sign, opp) = self.signs();
        match opp {
            OppAxis::Col => (col_sign * dopp, row_sign),
            OppAxis::Row => (col_sign, row_sign * dopp),
        }
    }
}

/// Per-step displacement along a scan azimuth.
///
/// `dx` multiplies the column index and `dy` the row index per unit
/// step; the longer axis always advances exactly one cell, so a march
/// along the vector can never stall. `dxy` is the physical length of
/// one unit step in meters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepVector {
    /// Column multiplier per unit step (east positive)
    pub dx: f64,
    /// Row multiplier per unit step (south positive)
    pub dy: f64,
    /// Physical distance of one unit step in meters
    pub dxy: f64,
}

impl StepVector {
    /// Resolve the step vector for a compass azimuth.
    ///
    /// `grid_convergence` is added to the azimuth before normalization
    /// to correct grid north to true north. `resolution` is the DEM
    /// cell size in meters and scales `dxy` only.
    pub fn from_azimuth(azimuth: f64, grid_convergence: f64, resolution: f64) -> Self {
        let azi = dmod(azimuth + grid_convergence, 360.0);

        // reflect the in-quadrant angle about 45 degrees; the step
        // vector is symmetric within each quadrant
        let mut azi_rel = dmod(azi, 90.0);
        if azi_rel > 45.0 {
            azi_rel = 90.0 - azi_rel;
        }
        let dopp = azi_rel.to_radians().tan();

        let (dx, dy) = Octant::from_azimuth(azi).components(dopp);
        let dxy = (dx * dx + dy * dy).sqrt() * resolution;

        StepVector { dx, dy, dxy }
    }
}
