//! Cubic Hermite basis used by the travel path.

use glam::Vec3;

/// Point on the cubic Hermite segment from `p0` (tangent `m0`) to `p1` (tangent `m1`)
///
/// `u` is the local segment parameter in `[0, 1]`. At `u == 0` the result is
/// exactly `p0` and at `u == 1` exactly `p1`.
pub fn hermite(p0: Vec3, m0: Vec3, p1: Vec3, m1: Vec3, u: f32) -> Vec3 {
    if u <= 0.0 {
        return p0;
    }
    if u >= 1.0 {
        return p1;
    }

    let u2 = u * u;
    let u3 = u2 * u;

    let h00 = 2.0 * u3 - 3.0 * u2 + 1.0;
    let h10 = u3 - 2.0 * u2 + u;
    let h01 = -2.0 * u3 + 3.0 * u2;
    let h11 = u3 - u2;

    p0 * h00 + m0 * h10 + p1 * h01 + m1 * h11
}

/// First derivative of [`hermite`] with respect to `u`
pub fn hermite_derivative(p0: Vec3, m0: Vec3, p1: Vec3, m1: Vec3, u: f32) -> Vec3 {
    let u = u.clamp(0.0, 1.0);
    let u2 = u * u;

    let d00 = 6.0 * u2 - 6.0 * u;
    let d10 = 3.0 * u2 - 4.0 * u + 1.0;
    let d01 = -6.0 * u2 + 6.0 * u;
    let d11 = 3.0 * u2 - 2.0 * u;

    p0 * d00 + m0 * d10 + p1 * d01 + m1 * d11
}

/// Catmull-Rom tangent at a knot given its neighbours
///
/// Zero when the knot coincides with either neighbour, so a repeated point
/// produces a constant (zero-length) segment instead of a loop.
pub fn catmull_rom_tangent(prev: Vec3, current: Vec3, next: Vec3) -> Vec3 {
    const COINCIDENT: f32 = 1e-12;

    if current.distance_squared(prev) <= COINCIDENT || current.distance_squared(next) <= COINCIDENT {
        return Vec3::ZERO;
    }
    (next - prev) * 0.5
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hermite_hits_endpoints_exactly() {
        let p0 = Vec3::new(-5.0, 5.0, 0.0);
        let p1 = Vec3::new(0.0, 0.0, 0.0);
        let m = Vec3::new(3.0, -1.0, 2.0);
        assert_eq!(hermite(p0, m, p1, m, 0.0), p0);
        assert_eq!(hermite(p0, m, p1, m, 1.0), p1);
    }

    #[test]
    fn hermite_with_chord_tangents_is_linear() {
        let p0 = Vec3::ZERO;
        let p1 = Vec3::new(4.0, 0.0, 0.0);
        let chord = p1 - p0;
        let mid = hermite(p0, chord, p1, chord, 0.25);
        assert!((mid - Vec3::new(1.0, 0.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn hermite_zero_tangents_on_repeated_point_is_constant() {
        let p = Vec3::new(1.0, 2.0, 3.0);
        for i in 0..=10 {
            let u = i as f32 / 10.0;
            assert_eq!(hermite(p, Vec3::ZERO, p, Vec3::ZERO, u), p);
        }
    }

    #[test]
    fn derivative_matches_finite_difference() {
        let p0 = Vec3::new(-10.0, 0.0, 0.0);
        let p1 = Vec3::new(-5.0, 5.0, 0.0);
        let m0 = Vec3::new(5.0, 5.0, 0.0);
        let m1 = Vec3::new(5.0, 0.0, 0.0);
        let u = 0.4;
        let h = 1e-3;
        let numeric = (hermite(p0, m0, p1, m1, u + h) - hermite(p0, m0, p1, m1, u - h)) / (2.0 * h);
        let analytic = hermite_derivative(p0, m0, p1, m1, u);
        assert!((numeric - analytic).length() < 1e-2);
    }

    #[test]
    fn tangent_is_zero_for_coincident_neighbour() {
        let a = Vec3::new(1.0, 1.0, 1.0);
        assert_eq!(catmull_rom_tangent(a, a, Vec3::ZERO), Vec3::ZERO);
        assert_eq!(catmull_rom_tangent(Vec3::ZERO, a, a), Vec3::ZERO);
        assert_eq!(
            catmull_rom_tangent(Vec3::ZERO, a, Vec3::new(2.0, 0.0, 0.0)),
            Vec3::new(1.0, 0.0, 0.0)
        );
    }
}
