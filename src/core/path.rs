use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::PathError;
use crate::math::spline::{catmull_rom_tangent, hermite, hermite_derivative};

/// Whether the curve returns from the last control point to the first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PathClosure {
    /// Knots at `i / (n - 1)`, first and last points are the curve ends
    Open,
    /// Knots at `i / n`, the curve loops back to the first point
    #[default]
    Closed,
}

/// Where a normalized parameter falls on the curve
#[derive(Debug, Clone, Copy, PartialEq)]
enum Location {
    Knot(usize),
    Segment(usize, f32),
}

/// Smooth curve through an ordered set of control points
///
/// Cubic Hermite segments with Catmull-Rom tangents, C1 at every knot. Two
/// control points degenerate to straight segments.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlPath {
    points: Vec<Vec3>,
    tangents: Vec<Vec3>,
    closure: PathClosure,
}

impl ControlPath {
    /// Build a path, control point order is path order
    pub fn build(points: Vec<Vec3>, closure: PathClosure) -> Result<Self, PathError> {
        if points.len() < 2 {
            return Err(PathError::TooFewPoints { got: points.len() });
        }
        if let Some(index) = points.iter().position(|p| !p.is_finite()) {
            return Err(PathError::NonFinitePoint { index });
        }

        let tangents = Self::knot_tangents(&points, closure);
        log::debug!("Built {:?} path through {} control points", closure, points.len());

        Ok(Self {
            points,
            tangents,
            closure,
        })
    }

    fn knot_tangents(points: &[Vec3], closure: PathClosure) -> Vec<Vec3> {
        let n = points.len();
        (0..n)
            .map(|i| {
                let (prev, next) = match closure {
                    PathClosure::Closed => (points[(i + n - 1) % n], points[(i + 1) % n]),
                    // Mirror a phantom point past each end
                    PathClosure::Open => (
                        if i == 0 { points[0] * 2.0 - points[1] } else { points[i - 1] },
                        if i == n - 1 { points[n - 1] * 2.0 - points[n - 2] } else { points[i + 1] },
                    ),
                };
                catmull_rom_tangent(prev, points[i], next)
            })
            .collect()
    }

    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    pub fn closure(&self) -> PathClosure {
        self.closure
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Number of curve segments between knots
    pub fn segment_count(&self) -> usize {
        match self.closure {
            PathClosure::Open => self.points.len() - 1,
            PathClosure::Closed => self.points.len(),
        }
    }

    /// Parameter at which the curve passes through control point `index`
    pub fn knot(&self, index: usize) -> f32 {
        index as f32 / self.segment_count() as f32
    }

    /// Geometric center of the control points
    pub fn centroid(&self) -> Vec3 {
        self.points.iter().copied().sum::<Vec3>() / self.points.len() as f32
    }

    /// Map any `t` into the curve domain
    ///
    /// Open paths accept `[0, 1]` as is so the final knot stays reachable;
    /// everything else wraps into `[0, 1)`.
    pub fn normalize(&self, t: f32) -> f32 {
        if !t.is_finite() {
            return 0.0;
        }
        match self.closure {
            PathClosure::Open if (0.0..=1.0).contains(&t) => t,
            _ => {
                let wrapped = t.rem_euclid(1.0);
                // rem_euclid rounds tiny negatives up to exactly 1.0
                if wrapped >= 1.0 { 0.0 } else { wrapped }
            }
        }
    }

    fn locate(&self, t: f32) -> Location {
        let segments = self.segment_count();
        let u = self.normalize(t) * segments as f32;

        // Only rounding error of `i / segments` lands on a knot
        let nearest = u.round();
        if (u - nearest).abs() <= f32::EPSILON * segments as f32 {
            return Location::Knot(nearest as usize % self.points.len().max(1));
        }

        let segment = (u.floor() as usize).min(segments - 1);
        Location::Segment(segment, u - segment as f32)
    }

    fn segment_ends(&self, segment: usize) -> (usize, usize) {
        (segment, (segment + 1) % self.points.len())
    }

    /// Position on the curve at parameter `t`
    pub fn sample(&self, t: f32) -> Vec3 {
        match self.locate(t) {
            Location::Knot(i) => self.points[i],
            Location::Segment(segment, u) => {
                let (a, b) = self.segment_ends(segment);
                if self.points.len() == 2 {
                    self.points[a].lerp(self.points[b], u)
                } else {
                    hermite(self.points[a], self.tangents[a], self.points[b], self.tangents[b], u)
                }
            }
        }
    }

    /// Unit direction of travel at `t`, zero on constant sub-intervals
    pub fn tangent(&self, t: f32) -> Vec3 {
        let segments = self.segment_count();
        let u = self.normalize(t) * segments as f32;
        let segment = (u.floor() as usize).min(segments - 1);
        let local = (u - segment as f32).clamp(0.0, 1.0);

        let (a, b) = self.segment_ends(segment);
        let derivative = if self.points.len() == 2 {
            self.points[b] - self.points[a]
        } else {
            hermite_derivative(self.points[a], self.tangents[a], self.points[b], self.tangents[b], local)
        };
        derivative.normalize_or_zero()
    }

    /// Tessellate the curve for drawing, `segments_per_span` samples between knots
    pub fn polyline(&self, segments_per_span: usize) -> Vec<Vec3> {
        let total = self.segment_count() * segments_per_span.max(1);
        (0..=total)
            .map(|j| self.sample(j as f32 / total as f32))
            .collect()
    }
}
