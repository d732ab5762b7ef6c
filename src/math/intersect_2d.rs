use super::{Point2, Vector2, TOLERANCE};

/// Parametric 2D line-line intersection.
///
/// Given lines `p1 + t * d1` and `p2 + u * d2`, returns `(t, u)` if not parallel.
/// Parallelism is judged on the sine of the angle between the directions, so
/// the result does not depend on their lengths.
#[must_use]
pub fn line_line_intersect_2d(
    p1: &Point2,
    d1: &Vector2,
    p2: &Point2,
    d2: &Vector2,
) -> Option<(f64, f64)> {
    let cross = d1.x * d2.y - d1.y * d2.x;
    if cross.abs() <= TOLERANCE * d1.norm() * d2.norm() {
        return None;
    }
    let dx = p2.x - p1.x;
    let dy = p2.y - p1.y;
    let t = (dx * d2.y - dy * d2.x) / cross;
    let u = (dx * d1.y - dy * d1.x) / cross;
    Some((t, u))
}

/// Intersection of the ray `origin + t1 * dir` (`t1 >= 0`) with the segment
/// from `a` to `b`.
///
/// Returns `(t1, t2)` where `t2` in `[0, 1]` is the parameter along the
/// segment. Parallel or missed segments yield `None`.
#[must_use]
pub fn ray_segment_intersect_2d(
    origin: &Point2,
    dir: &Vector2,
    a: &Point2,
    b: &Point2,
) -> Option<(f64, f64)> {
    let (t1, t2) = line_line_intersect_2d(origin, dir, a, &(b - a))?;
    (t1 >= 0.0 && (0.0..=1.0).contains(&t2)).then_some((t1, t2))
}

/// Linear interpolation: `origin + dir * t`.
#[must_use]
pub fn point_at(origin: &Point2, dir: &Vector2, t: f64) -> Point2 {
    origin + dir * t
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    #[test]
    fn crossing_lines() {
        let (t, u) = line_line_intersect_2d(
            &p(0.0, 0.0),
            &Vector2::new(1.0, 0.0),
            &p(2.0, -1.0),
            &Vector2::new(0.0, 2.0),
        )
        .unwrap();
        assert_relative_eq!(t, 2.0);
        assert_relative_eq!(u, 0.5);
    }

    #[test]
    fn parallel_lines() {
        let d = Vector2::new(1.0, 1.0);
        assert!(line_line_intersect_2d(&p(0.0, 0.0), &d, &p(0.0, 1.0), &d).is_none());
    }

    #[test]
    fn short_directions_still_intersect() {
        let (t, u) = line_line_intersect_2d(
            &p(0.0, 0.0),
            &Vector2::new(1e-9, 0.0),
            &p(2e-9, -1e-9),
            &Vector2::new(0.0, 2e-9),
        )
        .unwrap();
        assert_relative_eq!(t, 2.0, epsilon = 1e-9);
        assert_relative_eq!(u, 0.5, epsilon = 1e-9);
    }

    #[test]
    fn zero_direction_is_parallel() {
        let zero = Vector2::zeros();
        let hit = line_line_intersect_2d(&p(0.0, 0.0), &zero, &p(1.0, 0.0), &Vector2::y());
        assert!(hit.is_none());
    }

    #[test]
    fn ray_hits_segment() {
        let x = Vector2::new(1.0, 0.0);
        let (t1, t2) = ray_segment_intersect_2d(&p(0.6, 0.6), &x, &p(1.0, 0.0), &p(1.0, 1.0)).unwrap();
        assert_relative_eq!(t1, 0.4, epsilon = 1e-12);
        assert_relative_eq!(t2, 0.6, epsilon = 1e-12);
        let hit = point_at(&p(0.6, 0.6), &x, t1);
        assert_relative_eq!(hit.x, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn ray_misses_segment_behind_origin() {
        let x = Vector2::new(1.0, 0.0);
        assert!(ray_segment_intersect_2d(&p(2.0, 0.5), &x, &p(1.0, 0.0), &p(1.0, 1.0)).is_none());
    }

    #[test]
    fn ray_misses_short_segment() {
        let x = Vector2::new(1.0, 0.0);
        assert!(ray_segment_intersect_2d(&p(0.0, 2.0), &x, &p(1.0, 0.0), &p(1.0, 1.0)).is_none());
    }

    #[test]
    fn ray_hits_segment_endpoint() {
        let x = Vector2::new(1.0, 0.0);
        let (_, t2) = ray_segment_intersect_2d(&p(0.0, 1.0), &x, &p(1.0, 0.0), &p(1.0, 1.0)).unwrap();
        assert_relative_eq!(t2, 1.0);
    }
}
