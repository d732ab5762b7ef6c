pub mod angle_2d;
pub mod intersect_2d;
pub mod polygon_2d;
pub mod triangle_2d;

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// Global geometric tolerance for floating-point comparisons that do not
/// depend on the input's scale.
pub const TOLERANCE: f64 = 1e-10;

/// Default tolerance relative to the outer boundary's bounding-box extent.
pub const DEFAULT_RELATIVE_TOLERANCE: f64 = 1e-9;

/// Epsilons derived from the extent of the geometry being processed.
///
/// A fixed epsilon is meaningless across coordinate scales: a wall measured in
/// millimetres and one measured in metres must behave the same. `length` is
/// `relative * extent` and `area` is `relative * extent²`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerance {
    /// Distance below which two points are considered coincident.
    pub length: f64,
    /// Area below which two areas are considered equal.
    pub area: f64,
}

impl Tolerance {
    /// Builds tolerances for geometry whose bounding box has the given extent
    /// (the larger of its width and height).
    ///
    /// Only a zero or non-finite extent falls back to the unit extent.
    #[must_use]
    pub fn from_extent(extent: f64, relative: f64) -> Self {
        let extent = if extent > 0.0 && extent.is_finite() {
            extent
        } else {
            1.0
        };
        Self {
            length: relative * extent,
            area: relative * extent * extent,
        }
    }

    /// Returns `true` if `a` and `b` lie within `length` of each other.
    #[must_use]
    pub fn coincident(&self, a: &Point2, b: &Point2) -> bool {
        (b - a).norm_squared() <= self.length * self.length
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::from_extent(1.0, DEFAULT_RELATIVE_TOLERANCE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn tolerance_scales_with_extent() {
        let tol = Tolerance::from_extent(1000.0, 1e-9);
        assert_relative_eq!(tol.length, 1e-6);
        assert_relative_eq!(tol.area, 1e-3);
    }

    #[test]
    fn degenerate_extent_falls_back_to_unit() {
        let tol = Tolerance::from_extent(0.0, 1e-9);
        assert_relative_eq!(tol.length, 1e-9);
    }

    #[test]
    fn tiny_extent_is_kept() {
        let tol = Tolerance::from_extent(1e-8, 1e-9);
        assert_relative_eq!(tol.length, 1e-17);
        assert_relative_eq!(tol.area, 1e-25);
    }

    #[test]
    fn coincident_points() {
        let tol = Tolerance::from_extent(1.0, 1e-6);
        assert!(tol.coincident(&Point2::new(0.0, 0.0), &Point2::new(5e-7, 0.0)));
        assert!(!tol.coincident(&Point2::new(0.0, 0.0), &Point2::new(1e-3, 0.0)));
    }
}
