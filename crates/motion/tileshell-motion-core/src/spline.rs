//! Clamped B-spline evaluation over keyframe control points.
//!
//! Control points are assumed evenly spaced in curve parameter `u ∈ [0,1]`
//! (point `i` sits at `i / (n-1)`); [`map_time_to_param`] converts keyframe
//! time into that parameter. The basis uses a clamped-uniform knot vector so
//! the curve starts on the first point and ends on the last.

use serde::{Deserialize, Serialize};

/// Default spline degree (cubic). Lowered automatically for short inputs.
pub const DEFAULT_DEGREE: usize = 3;

/// A control point of a one-dimensional curve.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ControlPoint {
    pub param: f64,
    pub value: f64,
}

/// Build `(param, value)` pairs for evenly spaced control values.
pub fn control_points(values: &[f64]) -> Vec<ControlPoint> {
    let n = values.len();
    values
        .iter()
        .enumerate()
        .map(|(i, &value)| ControlPoint {
            param: if n > 1 {
                i as f64 / (n - 1) as f64
            } else {
                0.0
            },
            value,
        })
        .collect()
}

/// Where a normalized playback time lands on the keyframe curve.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SegmentParam {
    /// Index of the left keyframe of the segment.
    pub segment: usize,
    /// Fractional position inside the segment, in [0,1].
    pub local: f64,
    /// Global curve parameter, `(segment + local) / (n-1)`.
    pub param: f64,
}

impl SegmentParam {
    /// Build from a segment index and local fraction over `count` keyframes.
    pub fn from_segment(segment: usize, local: f64, count: usize) -> Self {
        let local = if local.is_finite() {
            local.clamp(0.0, 1.0)
        } else {
            0.0
        };
        let param = if count > 1 {
            ((segment as f64 + local) / (count - 1) as f64).clamp(0.0, 1.0)
        } else {
            0.0
        };
        Self {
            segment,
            local,
            param,
        }
    }
}

/// Map normalized time `t` onto the curve parameter.
///
/// At an exact keyframe offset `offsets[i]` the result is `i / (n-1)`. With
/// repeated offsets the later keyframe wins, which makes the repeat a jump.
pub fn map_time_to_param(offsets: &[f64], t: f64) -> SegmentParam {
    let n = offsets.len();
    if n < 2 {
        return SegmentParam::from_segment(0, 0.0, n);
    }
    let first = offsets[0];
    let last = offsets[n - 1];
    let t = if t.is_nan() { first } else { t.clamp(first, last) };

    let mut segment = n - 2;
    for i in 0..n - 1 {
        if t < offsets[i + 1] {
            segment = i;
            break;
        }
    }
    let span = offsets[segment + 1] - offsets[segment];
    let local = if span > 0.0 {
        (t - offsets[segment]) / span
    } else {
        0.0
    };
    SegmentParam::from_segment(segment, local, n)
}

/// Clamped-uniform knot vector for `point_count` control points.
///
/// Boundary knots are repeated `degree + 1` times; interior knots are evenly
/// spaced. `degree` is capped at `point_count - 1`.
pub fn build_clamped_knots(point_count: usize, degree: usize) -> Vec<f64> {
    if point_count == 0 {
        return Vec::new();
    }
    let degree = degree.min(point_count - 1);
    let interior = point_count - degree - 1;
    let mut knots = Vec::with_capacity(point_count + degree + 1);
    knots.extend(std::iter::repeat(0.0).take(degree + 1));
    for i in 1..=interior {
        knots.push(i as f64 / (interior + 1) as f64);
    }
    knots.extend(std::iter::repeat(1.0).take(degree + 1));
    knots
}

/// Cox–de Boor basis function `N(i, degree)` evaluated at `t`.
///
/// Zero-width spans contribute nothing (0/0 is treated as 0). The last
/// non-degenerate span is closed on the right so `t` equal to the final knot
/// still has full support.
pub fn spline_basis_point(i: usize, degree: usize, t: f64, knots: &[f64]) -> f64 {
    if i + degree + 1 >= knots.len() {
        return 0.0;
    }
    if degree == 0 {
        let (a, b) = (knots[i], knots[i + 1]);
        if a <= t && t < b {
            return 1.0;
        }
        let end = knots[knots.len() - 1];
        return if t == end && b == end && a < b { 1.0 } else { 0.0 };
    }

    let left_den = knots[i + degree] - knots[i];
    let right_den = knots[i + degree + 1] - knots[i + 1];
    let left = if left_den > 0.0 {
        (t - knots[i]) / left_den * spline_basis_point(i, degree - 1, t, knots)
    } else {
        0.0
    };
    let right = if right_den > 0.0 {
        (knots[i + degree + 1] - t) / right_den * spline_basis_point(i + 1, degree - 1, t, knots)
    } else {
        0.0
    };
    left + right
}

/// Basis weights for every control point at parameter `t`.
pub fn spline_weights(point_count: usize, degree: usize, t: f64) -> Vec<f64> {
    if point_count == 0 {
        return Vec::new();
    }
    let degree = degree.min(point_count - 1);
    let knots = build_clamped_knots(point_count, degree);
    let t = clamp_param(t);
    (0..point_count)
        .map(|i| spline_basis_point(i, degree, t, &knots))
        .collect()
}

/// Evaluate a one-dimensional clamped spline at `t ∈ [0,1]`.
///
/// Two points degrade to linear interpolation, one point to a constant,
/// none to `None`.
pub fn spline_sample(points: &[f64], t: f64) -> Option<f64> {
    spline_sample_with_degree(points, t, DEFAULT_DEGREE)
}

pub fn spline_sample_with_degree(points: &[f64], t: f64, degree: usize) -> Option<f64> {
    match points.len() {
        0 => None,
        1 => Some(points[0]),
        2 => sample_linear(points, t),
        n => {
            let weights = spline_weights(n, degree.max(1), t);
            Some(points.iter().zip(&weights).map(|(p, w)| p * w).sum())
        }
    }
}

/// Evaluate a multi-dimensional clamped spline; each control point is a
/// coordinate vector and all must share the same length.
pub fn spline_sample_nd(points: &[Vec<f64>], t: f64, degree: usize) -> Option<Vec<f64>> {
    let dims = points.first()?.len();
    if points.iter().any(|p| p.len() != dims) {
        return None;
    }
    match points.len() {
        1 => Some(points[0].clone()),
        2 => sample_linear_nd(points, t),
        n => {
            let weights = spline_weights(n, degree.max(1), t);
            let mut out = vec![0.0; dims];
            for (point, w) in points.iter().zip(&weights) {
                if *w == 0.0 {
                    continue;
                }
                for (acc, c) in out.iter_mut().zip(point) {
                    *acc += c * w;
                }
            }
            Some(out)
        }
    }
}

/// Piecewise-linear interpolation across evenly spaced points.
pub fn sample_linear(points: &[f64], t: f64) -> Option<f64> {
    match points.len() {
        0 => None,
        1 => Some(points[0]),
        n => {
            let (i, local) = linear_span(n, t);
            let (a, b) = (points[i], points[i + 1]);
            Some(a * (1.0 - local) + b * local)
        }
    }
}

pub fn sample_linear_nd(points: &[Vec<f64>], t: f64) -> Option<Vec<f64>> {
    match points.len() {
        0 => None,
        1 => Some(points[0].clone()),
        n => {
            let (i, local) = linear_span(n, t);
            let (a, b) = (&points[i], &points[i + 1]);
            if a.len() != b.len() {
                return None;
            }
            Some(a.iter().zip(b).map(|(x, y)| x * (1.0 - local) + y * local).collect())
        }
    }
}

fn linear_span(n: usize, t: f64) -> (usize, f64) {
    let scaled = clamp_param(t) * (n - 1) as f64;
    let i = (scaled.floor() as usize).min(n - 2);
    (i, scaled - i as f64)
}

#[inline]
fn clamp_param(t: f64) -> f64 {
    if t.is_nan() {
        0.0
    } else {
        t.clamp(0.0, 1.0)
    }
}
