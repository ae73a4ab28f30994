use image::{imageops, GrayImage, Luma};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::features::stroke::{Point, Stroke};

/// Canvas supersampling factor for the raster encoding.
const SUPERSAMPLE: u32 = 4;
/// Brush radius in supersampled pixels.
const BRUSH_RADIUS: i64 = 1;

/// How a normalized stroke is turned into exactly `N` numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureEncoding {
    /// Draw the stroke on a `√N × √N` greyscale grid. `N` must be a perfect square.
    #[default]
    Raster,
    /// Resample `N / 2` points evenly along the stroke, emitted as `x, y` pairs.
    /// `N` must be even.
    Path,
}

/// Fixed-length feature vector; every value lies in `[0, 1]`.
pub type FeatureVector = Vec<f64>;

/// Converts strokes into fixed-length feature vectors.
///
/// Construction validates that the length suits the encoding; after that,
/// extraction cannot fail and is fully deterministic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureExtractor {
    length: usize,
    encoding: FeatureEncoding,
}

impl FeatureExtractor {
    pub fn new(length: usize, encoding: FeatureEncoding) -> Result<Self> {
        if length == 0 {
            return Err(EngineError::validation("feature length must be at least 1"));
        }
        match encoding {
            FeatureEncoding::Raster if grid_side(length).is_none() => Err(EngineError::validation(
                format!("raster encoding needs a square feature length, got {length}"),
            )),
            FeatureEncoding::Path if length % 2 != 0 => Err(EngineError::validation(format!(
                "path encoding needs an even feature length, got {length}"
            ))),
            _ => Ok(FeatureExtractor { length, encoding }),
        }
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn encoding(&self) -> FeatureEncoding {
        self.encoding
    }

    /// Produces exactly `self.length()` values in `[0, 1]`.
    ///
    /// Callers filter out short strokes beforehand; an empty stroke still
    /// yields an all-zero vector rather than panicking.
    pub fn extract(&self, stroke: &Stroke) -> FeatureVector {
        if stroke.is_empty() {
            return vec![0.0; self.length];
        }
        let normalized = stroke.normalized();
        let mut features = match self.encoding {
            FeatureEncoding::Raster => rasterize(&normalized, self.side()),
            FeatureEncoding::Path => resample(&normalized, self.length / 2),
        };
        features.resize(self.length, 0.0);
        for v in &mut features {
            *v = if v.is_finite() { v.clamp(0.0, 1.0) } else { 0.0 };
        }
        features
    }

    fn side(&self) -> u32 {
        grid_side(self.length).unwrap_or(1) as u32
    }
}

fn grid_side(length: usize) -> Option<usize> {
    let side = (length as f64).sqrt().round() as usize;
    (side >= 1 && side * side == length).then_some(side)
}

/// Draws the unit-square stroke onto a supersampled canvas, downsamples it to
/// `side × side` and rescales intensities so the brightest cell is 1.0.
fn rasterize(stroke: &Stroke, side: u32) -> Vec<f64> {
    let size = side * SUPERSAMPLE;
    let mut canvas = GrayImage::new(size, size);
    let margin = 1.0;
    let span = (size as f64 - 1.0 - 2.0 * margin).max(0.0);
    let to_canvas = |p: &Point| Point::new(margin + p.x * span, margin + p.y * span);

    let mut points = stroke.points.iter().map(to_canvas);
    let Some(mut prev) = points.next() else {
        return vec![0.0; (side * side) as usize];
    };
    stamp(&mut canvas, prev);
    for next in points {
        let steps = (prev.distance(&next) * 2.0).ceil().max(1.0) as usize;
        for s in 1..=steps {
            stamp(&mut canvas, prev.lerp(&next, s as f64 / steps as f64));
        }
        prev = next;
    }

    let small = imageops::resize(&canvas, side, side, imageops::FilterType::Triangle);
    let peak = small.pixels().map(|p| p.0[0]).max().unwrap_or(0);
    if peak == 0 {
        return vec![0.0; (side * side) as usize];
    }
    small
        .pixels()
        .map(|p| p.0[0] as f64 / peak as f64)
        .collect()
}

fn stamp(canvas: &mut GrayImage, at: Point) {
    let (w, h) = (canvas.width() as i64, canvas.height() as i64);
    let (cx, cy) = (at.x.round() as i64, at.y.round() as i64);
    for y in (cy - BRUSH_RADIUS)..=(cy + BRUSH_RADIUS) {
        for x in (cx - BRUSH_RADIUS)..=(cx + BRUSH_RADIUS) {
            if (0..w).contains(&x) && (0..h).contains(&y) {
                canvas.put_pixel(x as u32, y as u32, Luma([u8::MAX]));
            }
        }
    }
}

/// Resamples `count` points spaced evenly by arc length and flattens them as
/// `x0, y0, x1, y1, ...`.
fn resample(stroke: &Stroke, count: usize) -> Vec<f64> {
    let points = &stroke.points;
    let total = stroke.path_length();
    if points.len() < 2 || total <= f64::EPSILON {
        let p = points.first().copied().unwrap_or(Point::new(0.5, 0.5));
        return std::iter::repeat([p.x, p.y]).take(count).flatten().collect();
    }

    let mut out = Vec::with_capacity(count * 2);
    let mut seg = 0;
    let mut walked = 0.0;
    for k in 0..count {
        let target = if count > 1 { total * k as f64 / (count - 1) as f64 } else { 0.0 };
        let mut seg_len = points[seg].distance(&points[seg + 1]);
        while walked + seg_len < target && seg + 2 < points.len() {
            walked += seg_len;
            seg += 1;
            seg_len = points[seg].distance(&points[seg + 1]);
        }
        let t = if seg_len > 0.0 { ((target - walked) / seg_len).clamp(0.0, 1.0) } else { 0.0 };
        let p = points[seg].lerp(&points[seg + 1], t);
        out.push(p.x);
        out.push(p.y);
    }
    out
}
