use super::Point2;

/// Orientation of a closed polygon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Winding {
    CounterClockwise,
    Clockwise,
}

impl Winding {
    /// `1.0` for counter-clockwise, `-1.0` for clockwise.
    ///
    /// Multiplying a signed area by this maps "turns with the winding" to
    /// positive values.
    #[must_use]
    pub fn sign(self) -> f64 {
        match self {
            Self::CounterClockwise => 1.0,
            Self::Clockwise => -1.0,
        }
    }
}

/// Computes the signed area of a closed polygon (shoelace formula).
///
/// Positive for counter-clockwise, negative for clockwise.
#[must_use]
pub fn signed_area_2d(points: &[Point2]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        sum += points[i].x * points[j].y - points[j].x * points[i].y;
    }
    sum * 0.5
}

/// Determines the winding of a closed polygon, or `None` if its area does not
/// exceed `epsilon`.
#[must_use]
pub fn winding(points: &[Point2], epsilon: f64) -> Option<Winding> {
    let area = signed_area_2d(points);
    if area > epsilon {
        Some(Winding::CounterClockwise)
    } else if area < -epsilon {
        Some(Winding::Clockwise)
    } else {
        None
    }
}

/// Returns the index of the vertex with the largest x-coordinate.
///
/// Ties resolve to the first such vertex in input order.
#[must_use]
pub fn x_most(points: &[Point2]) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (i, pt) in points.iter().enumerate() {
        if best.is_none_or(|b| pt.x > points[b].x) {
            best = Some(i);
        }
    }
    best
}

/// Axis-aligned bounding box of a point set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds2 {
    pub min: Point2,
    pub max: Point2,
}

impl Bounds2 {
    /// Computes the bounding box of `points`, or `None` if empty.
    #[must_use]
    pub fn of(points: &[Point2]) -> Option<Self> {
        let first = points.first()?;
        let mut bounds = Self {
            min: *first,
            max: *first,
        };
        for pt in &points[1..] {
            bounds.min.x = bounds.min.x.min(pt.x);
            bounds.min.y = bounds.min.y.min(pt.y);
            bounds.max.x = bounds.max.x.max(pt.x);
            bounds.max.y = bounds.max.y.max(pt.y);
        }
        Some(bounds)
    }

    /// The larger of the box's width and height.
    #[must_use]
    pub fn extent(&self) -> f64 {
        (self.max.x - self.min.x).max(self.max.y - self.min.y)
    }
}
