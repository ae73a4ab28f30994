//! Programmatic stroke templates for the built-in shape classes.
//!
//! Used by the demo session and tests to stand in for hand-drawn input.

use rand::Rng;

use crate::features::stroke::{Point, Stroke};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Circle,
    Square,
    Triangle,
}

impl Shape {
    pub const ALL: [Shape; 3] = [Shape::Circle, Shape::Square, Shape::Triangle];

    pub fn label(&self) -> &'static str {
        match self {
            Shape::Circle => "circle",
            Shape::Square => "square",
            Shape::Triangle => "triangle",
        }
    }

    /// Template for a class label, matched the way labels are matched elsewhere.
    pub fn from_label(label: &str) -> Option<Shape> {
        let label = label.trim();
        Shape::ALL.into_iter().find(|s| s.label().eq_ignore_ascii_case(label))
    }

    pub fn stroke(&self, cx: f64, cy: f64, size: f64, points: usize) -> Stroke {
        match self {
            Shape::Circle => circle(cx, cy, size, points),
            Shape::Square => square(cx, cy, size, points),
            Shape::Triangle => triangle(cx, cy, size, points),
        }
    }

    /// A wobbly, hand-drawn looking variant at a random position and scale.
    pub fn jittered<R: Rng + ?Sized>(&self, rng: &mut R, points: usize) -> Stroke {
        let cx = rng.gen_range(100.0..300.0);
        let cy = rng.gen_range(100.0..300.0);
        let size = rng.gen_range(40.0..120.0);
        let wobble = size * 0.04;
        let mut stroke = self.stroke(cx, cy, size, points);
        for p in &mut stroke.points {
            p.x += rng.gen_range(-wobble..=wobble);
            p.y += rng.gen_range(-wobble..=wobble);
        }
        stroke
    }
}

/// Closed circle of radius `r`.
pub fn circle(cx: f64, cy: f64, r: f64, points: usize) -> Stroke {
    let n = points.max(2);
    (0..n)
        .map(|i| {
            let theta = std::f64::consts::TAU * i as f64 / (n - 1) as f64;
            Point::new(cx + r * theta.cos(), cy + r * theta.sin())
        })
        .collect::<Vec<_>>()
        .into()
}

/// Closed axis-aligned square with half-width `half`.
pub fn square(cx: f64, cy: f64, half: f64, points: usize) -> Stroke {
    polygon(
        &[
            Point::new(cx - half, cy - half),
            Point::new(cx + half, cy - half),
            Point::new(cx + half, cy + half),
            Point::new(cx - half, cy + half),
        ],
        points,
    )
}

/// Closed upward-pointing triangle inscribed in a circle of radius `r`.
pub fn triangle(cx: f64, cy: f64, r: f64, points: usize) -> Stroke {
    let corner = |deg: f64| {
        let a = deg.to_radians();
        Point::new(cx + r * a.cos(), cy - r * a.sin())
    };
    polygon(&[corner(90.0), corner(210.0), corner(330.0)], points)
}

/// Walks the closed polygon through `corners` with `points` evenly spaced samples.
fn polygon(corners: &[Point], points: usize) -> Stroke {
    let n = points.max(2);
    let edges: Vec<(Point, Point)> = corners
        .iter()
        .zip(corners.iter().cycle().skip(1))
        .map(|(a, b)| (*a, *b))
        .collect();
    let perimeter: f64 = edges.iter().map(|(a, b)| a.distance(b)).sum();

    let mut out = Vec::with_capacity(n);
    for i in 0..n {
        let mut remaining = perimeter * i as f64 / (n - 1) as f64;
        let mut placed = None;
        for (a, b) in &edges {
            let len = a.distance(b);
            if remaining <= len {
                let t = if len > 0.0 { remaining / len } else { 0.0 };
                placed = Some(a.lerp(b, t));
                break;
            }
            remaining -= len;
        }
        out.push(placed.unwrap_or(corners[0]));
    }
    Stroke::new(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn templates_have_requested_point_count_and_close() {
        for shape in Shape::ALL {
            let s = shape.stroke(0.0, 0.0, 10.0, 25);
            assert_eq!(s.len(), 25);
            let (first, last) = (s.points[0], s.points[24]);
            assert!(first.distance(&last) < 1e-9, "{} not closed", shape.label());
        }
    }

    #[test]
    fn square_corners_are_visited() {
        let s = square(0.0, 0.0, 1.0, 9);
        assert_eq!(s.points[2], Point::new(1.0, -1.0));
        assert_eq!(s.points[4], Point::new(1.0, 1.0));
    }

    #[test]
    fn jitter_is_seed_reproducible() {
        let a = Shape::Triangle.jittered(&mut StdRng::seed_from_u64(4), 20);
        let b = Shape::Triangle.jittered(&mut StdRng::seed_from_u64(4), 20);
        assert_eq!(a, b);
    }
}
