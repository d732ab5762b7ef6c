use super::Vector2;

/// Counter-clockwise angle in degrees from `from` to `to`, in `[0, 360)`.
///
/// The unsigned angle `atan2(|cross|, dot)` is folded onto the full turn using
/// the sign of the cross product. Zero-length inputs yield `0.0`.
#[must_use]
pub fn full_turn_angle(from: &Vector2, to: &Vector2) -> f64 {
    let (Some(e1), Some(e2)) = (from.try_normalize(0.0), to.try_normalize(0.0)) else {
        return 0.0;
    };
    let cross = e1.x * e2.y - e1.y * e2.x;
    let dot = e1.dot(&e2);
    let theta = cross.abs().atan2(dot).to_degrees();
    if cross < 0.0 {
        360.0 - theta
    } else {
        theta
    }
}

/// Unsigned angle in radians between two vectors, in `[0, π]`.
#[must_use]
pub fn angle_between(a: &Vector2, b: &Vector2) -> f64 {
    let cross = a.x * b.y - a.y * b.x;
    cross.abs().atan2(a.dot(b))
}
