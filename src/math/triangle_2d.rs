use super::Point2;

/// Twice the signed area of triangle `(a, b, c)`.
///
/// Positive when the corners turn counter-clockwise, negative when clockwise,
/// zero when collinear.
#[must_use]
pub fn cross(a: &Point2, b: &Point2, c: &Point2) -> f64 {
    (b.x - a.x) * (c.y - a.y) - (c.x - a.x) * (b.y - a.y)
}

/// Signed area of triangle `(a, b, c)`.
#[must_use]
pub fn signed_area(a: &Point2, b: &Point2, c: &Point2) -> f64 {
    cross(a, b, c) * 0.5
}

/// Unsigned area of triangle `(a, b, c)`.
#[must_use]
pub fn area(a: &Point2, b: &Point2, c: &Point2) -> f64 {
    signed_area(a, b, c).abs()
}

/// Tests whether `p` lies inside triangle `(a, b, c)` or on its boundary.
///
/// The three sub-triangles formed by `p` and each edge cover the triangle
/// exactly when `p` is inside, so their areas sum to the triangle's own area.
/// `epsilon` is the area tolerance of that comparison. Works for either
/// winding.
#[must_use]
pub fn contains(a: &Point2, b: &Point2, c: &Point2, p: &Point2, epsilon: f64) -> bool {
    let abc = area(a, b, c);
    let pbc = area(p, b, c);
    let apc = area(a, p, c);
    let abp = area(a, b, p);
    (pbc + apc + abp - abc).abs() <= epsilon
}

/// Like [`contains`], but rejects points lying on the triangle's boundary.
#[must_use]
pub fn contains_strictly(a: &Point2, b: &Point2, c: &Point2, p: &Point2, epsilon: f64) -> bool {
    contains(a, b, c, p, epsilon)
        && area(p, b, c) > epsilon
        && area(a, p, c) > epsilon
        && area(a, b, p) > epsilon
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const EPS: f64 = 1e-9;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    #[test]
    fn area_of_right_triangle() {
        assert_relative_eq!(area(&p(0.0, 0.0), &p(2.0, 0.0), &p(0.0, 3.0)), 3.0);
    }

    #[test]
    fn signed_area_follows_winding() {
        let (a, b, c) = (p(0.0, 0.0), p(1.0, 0.0), p(0.0, 1.0));
        assert!(signed_area(&a, &b, &c) > 0.0);
        assert!(signed_area(&a, &c, &b) < 0.0);
        assert_relative_eq!(signed_area(&a, &b, &p(2.0, 0.0)), 0.0);
    }

    #[test]
    fn contains_interior_point() {
        let (a, b, c) = (p(0.0, 0.0), p(4.0, 0.0), p(0.0, 4.0));
        assert!(contains(&a, &b, &c, &p(1.0, 1.0), EPS));
        assert!(contains(&c, &b, &a, &p(1.0, 1.0), EPS));
    }

    #[test]
    fn rejects_exterior_point() {
        let (a, b, c) = (p(0.0, 0.0), p(4.0, 0.0), p(0.0, 4.0));
        assert!(!contains(&a, &b, &c, &p(3.0, 3.0), EPS));
        assert!(!contains(&a, &b, &c, &p(-0.1, 1.0), EPS));
    }

    #[test]
    fn boundary_points() {
        let (a, b, c) = (p(0.0, 0.0), p(4.0, 0.0), p(0.0, 4.0));
        let on_edge = p(2.0, 2.0);
        assert!(contains(&a, &b, &c, &on_edge, EPS));
        assert!(!contains_strictly(&a, &b, &c, &on_edge, EPS));
        assert!(contains_strictly(&a, &b, &c, &p(1.0, 1.0), EPS));
    }
}
