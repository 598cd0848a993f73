//! Math type re-exports and planar bounding boxes.
//!
//! Envelopes are computed in double precision on the x/y plane only;
//! z and m ordinates of GeoJSON positions never contribute to an extent.

pub use glam::DVec2;

use std::fmt;

/// 2D bounding box with double precision.
#[derive(Clone, Copy, PartialEq)]
pub struct BBox2d {
    pub min: DVec2,
    pub max: DVec2,
}

impl BBox2d {
    /// Empty bounding box (inverted, will expand on first point).
    pub const EMPTY: Self = Self {
        min: DVec2::splat(f64::INFINITY),
        max: DVec2::splat(f64::NEG_INFINITY),
    };

    /// Check that all four bounds are finite numbers.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.min.is_finite() && self.max.is_finite()
    }

    /// Expand this box to include a point.
    ///
    /// NaN ordinates are carried into the box rather than ignored, so a
    /// single bad coordinate poisons the result and can be detected with
    /// [`BBox2d::is_finite`].
    #[inline]
    pub fn expand_by_point(&mut self, p: DVec2) {
        self.min = DVec2::new(nan_min(self.min.x, p.x), nan_min(self.min.y, p.y));
        self.max = DVec2::new(nan_max(self.max.x, p.x), nan_max(self.max.y, p.y));
    }

    /// Bounds in `[xmin, ymin, xmax, ymax]` order.
    #[inline]
    pub fn to_array(&self) -> [f64; 4] {
        [self.min.x, self.min.y, self.max.x, self.max.y]
    }
}

impl fmt::Debug for BBox2d {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BBox2d({:?} - {:?})", self.min, self.max)
    }
}

// f64::min/max drop NaN in favour of the other operand.
#[inline]
fn nan_min(a: f64, b: f64) -> f64 {
    if a.is_nan() || b.is_nan() {
        f64::NAN
    } else {
        a.min(b)
    }
}

#[inline]
fn nan_max(a: f64, b: f64) -> f64 {
    if a.is_nan() || b.is_nan() {
        f64::NAN
    } else {
        a.max(b)
    }
}
