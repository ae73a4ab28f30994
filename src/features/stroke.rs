use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    pub fn distance(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    pub fn lerp(&self, other: &Point, t: f64) -> Point {
        Point::new(self.x + (other.x - self.x) * t, self.y + (other.y - self.y) * t)
    }
}

impl From<[f64; 2]> for Point {
    fn from([x, y]: [f64; 2]) -> Self {
        Point { x, y }
    }
}

impl From<Point> for [f64; 2] {
    fn from(p: Point) -> Self {
        [p.x, p.y]
    }
}

/// One freehand drawing attempt in raw canvas coordinates.
///
/// On the wire a stroke is `[[x, y], ...]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Stroke {
    pub points: Vec<Point>,
}

/// Axis-aligned bounds of a stroke.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Point,
    pub max: Point,
}

impl Bounds {
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }
}

impl Stroke {
    pub fn new(points: Vec<Point>) -> Self {
        Stroke { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// True when the stroke has at least `min_points` points and every
    /// coordinate is finite.
    pub fn is_usable(&self, min_points: usize) -> bool {
        self.points.len() >= min_points.max(1) && self.points.iter().all(Point::is_finite)
    }

    pub fn bounds(&self) -> Option<Bounds> {
        let first = *self.points.first()?;
        let bounds = self.points.iter().fold(
            Bounds { min: first, max: first },
            |b, p| Bounds {
                min: Point::new(b.min.x.min(p.x), b.min.y.min(p.y)),
                max: Point::new(b.max.x.max(p.x), b.max.y.max(p.y)),
            },
        );
        Some(bounds)
    }

    /// Maps the stroke into the unit square with one uniform scale factor.
    ///
    /// The longer bounding-box side spans `[0, 1]`; the shorter side is
    /// centred. A stroke with zero extent collapses to `(0.5, 0.5)`.
    pub fn normalized(&self) -> Stroke {
        let Some(bounds) = self.bounds() else {
            return Stroke::default();
        };
        let extent = bounds.width().max(bounds.height());
        if extent <= f64::EPSILON {
            return Stroke::new(vec![Point::new(0.5, 0.5); self.points.len()]);
        }

        let offset_x = (1.0 - bounds.width() / extent) / 2.0;
        let offset_y = (1.0 - bounds.height() / extent) / 2.0;
        let points = self
            .points
            .iter()
            .map(|p| {
                Point::new(
                    ((p.x - bounds.min.x) / extent + offset_x).clamp(0.0, 1.0),
                    ((p.y - bounds.min.y) / extent + offset_y).clamp(0.0, 1.0),
                )
            })
            .collect();
        Stroke::new(points)
    }

    /// Total polyline length.
    pub fn path_length(&self) -> f64 {
        self.points.windows(2).map(|w| w[0].distance(&w[1])).sum()
    }
}

impl From<Vec<[f64; 2]>> for Stroke {
    fn from(raw: Vec<[f64; 2]>) -> Self {
        Stroke::new(raw.into_iter().map(Point::from).collect())
    }
}

impl From<Vec<Point>> for Stroke {
    fn from(points: Vec<Point>) -> Self {
        Stroke::new(points)
    }
}
