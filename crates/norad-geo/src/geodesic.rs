//! Great-circle (geodesic) computations on the WGS-84 ellipsoid.
//!
//! Vincenty's inverse and direct formulae. The inverse falls back to a
//! spherical solution when the iteration does not converge, which happens
//! for nearly antipodal pairs, so callers always get a finite answer.
//! Sampling such a pair stays on the sphere for every point, so the path
//! still ends at the target.

use glam::Vec2;
use norad_core::types::GeoPoint;

use crate::projection::Equirectangular;

/// WGS-84 semi-major axis (meters).
pub const WGS84_A: f64 = 6_378_137.0;

/// WGS-84 flattening.
pub const WGS84_F: f64 = 1.0 / 298.257_223_563;

/// WGS-84 semi-minor axis (meters).
pub const WGS84_B: f64 = WGS84_A * (1.0 - WGS84_F);

/// Radius of the sphere whose meridian length equals the ellipsoid's (meters).
pub const RECTIFYING_RADIUS: f64 = 6_367_449.146;

const MAX_ITERATIONS: usize = 200;
const CONVERGENCE: f64 = 1e-12;

/// Result of the inverse problem.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Inverse {
    /// Ellipsoidal distance (meters).
    pub distance_m: f64,
    /// Initial azimuth at the start point, degrees clockwise from north in [0, 360).
    pub azimuth_deg: f64,
}

/// Solve the inverse problem: distance and initial azimuth from `start` to `end`.
pub fn inverse(start: GeoPoint, end: GeoPoint) -> Inverse {
    vincenty_inverse(start, end).unwrap_or_else(|| spherical_inverse(start, end))
}

/// Vincenty's iteration; `None` when it does not converge.
fn vincenty_inverse(start: GeoPoint, end: GeoPoint) -> Option<Inverse> {
    if start == end {
        return Some(Inverse {
            distance_m: 0.0,
            azimuth_deg: 0.0,
        });
    }

    let f = WGS84_F;
    let l = (end.lon - start.lon).to_radians();
    let u1 = ((1.0 - f) * start.lat.to_radians().tan()).atan();
    let u2 = ((1.0 - f) * end.lat.to_radians().tan()).atan();
    let (sin_u1, cos_u1) = u1.sin_cos();
    let (sin_u2, cos_u2) = u2.sin_cos();

    let mut lambda = l;
    for _ in 0..MAX_ITERATIONS {
        let (sin_lambda, cos_lambda) = lambda.sin_cos();
        let sin_sigma = ((cos_u2 * sin_lambda).powi(2)
            + (cos_u1 * sin_u2 - sin_u1 * cos_u2 * cos_lambda).powi(2))
        .sqrt();
        if sin_sigma == 0.0 {
            // Coincident after reduction (e.g. both on the same pole).
            return Some(Inverse {
                distance_m: 0.0,
                azimuth_deg: 0.0,
            });
        }
        let cos_sigma = sin_u1 * sin_u2 + cos_u1 * cos_u2 * cos_lambda;
        let sigma = sin_sigma.atan2(cos_sigma);
        let sin_alpha = cos_u1 * cos_u2 * sin_lambda / sin_sigma;
        let cos_sq_alpha = 1.0 - sin_alpha * sin_alpha;
        // Equatorial line: cos²α = 0.
        let cos_2sigma_m = if cos_sq_alpha != 0.0 {
            cos_sigma - 2.0 * sin_u1 * sin_u2 / cos_sq_alpha
        } else {
            0.0
        };
        let c = f / 16.0 * cos_sq_alpha * (4.0 + f * (4.0 - 3.0 * cos_sq_alpha));
        let prev = lambda;
        lambda = l
            + (1.0 - c)
                * f
                * sin_alpha
                * (sigma
                    + c * sin_sigma
                        * (cos_2sigma_m + c * cos_sigma * (-1.0 + 2.0 * cos_2sigma_m.powi(2))));

        if !lambda.is_finite() {
            break;
        }
        if (lambda - prev).abs() < CONVERGENCE {
            let u_sq = cos_sq_alpha * (WGS84_A.powi(2) - WGS84_B.powi(2)) / WGS84_B.powi(2);
            let (a_coef, b_coef) = series_coefficients(u_sq);
            let d_sigma = delta_sigma(b_coef, sin_sigma, cos_sigma, cos_2sigma_m);
            let distance_m = WGS84_B * a_coef * (sigma - d_sigma);

            let (sin_lambda, cos_lambda) = lambda.sin_cos();
            let alpha1 = (cos_u2 * sin_lambda).atan2(cos_u1 * sin_u2 - sin_u1 * cos_u2 * cos_lambda);
            return Some(Inverse {
                distance_m,
                azimuth_deg: normalize_azimuth(alpha1.to_degrees()),
            });
        }
    }

    None
}

/// Solve the direct problem: the point reached from `start` after travelling
/// `distance_m` along a geodesic with initial azimuth `azimuth_deg`.
///
/// The returned longitude is normalized to [-180, 180).
pub fn direct(start: GeoPoint, azimuth_deg: f64, distance_m: f64) -> GeoPoint {
    let f = WGS84_F;
    let alpha1 = azimuth_deg.to_radians();
    let (sin_alpha1, cos_alpha1) = alpha1.sin_cos();

    let tan_u1 = (1.0 - f) * start.lat.to_radians().tan();
    let cos_u1 = 1.0 / (1.0 + tan_u1 * tan_u1).sqrt();
    let sin_u1 = tan_u1 * cos_u1;

    let sigma1 = tan_u1.atan2(cos_alpha1);
    let sin_alpha = cos_u1 * sin_alpha1;
    let cos_sq_alpha = 1.0 - sin_alpha * sin_alpha;
    let u_sq = cos_sq_alpha * (WGS84_A.powi(2) - WGS84_B.powi(2)) / WGS84_B.powi(2);
    let (a_coef, b_coef) = series_coefficients(u_sq);

    let base = distance_m / (WGS84_B * a_coef);
    let mut sigma = base;
    let mut cos_2sigma_m = (2.0 * sigma1 + sigma).cos();
    for _ in 0..MAX_ITERATIONS {
        cos_2sigma_m = (2.0 * sigma1 + sigma).cos();
        let (sin_sigma, cos_sigma) = sigma.sin_cos();
        let prev = sigma;
        sigma = base + delta_sigma(b_coef, sin_sigma, cos_sigma, cos_2sigma_m);
        if (sigma - prev).abs() < CONVERGENCE {
            break;
        }
    }

    let (sin_sigma, cos_sigma) = sigma.sin_cos();
    let tmp = sin_u1 * sin_sigma - cos_u1 * cos_sigma * cos_alpha1;
    let lat2 = (sin_u1 * cos_sigma + cos_u1 * sin_sigma * cos_alpha1)
        .atan2((1.0 - f) * (sin_alpha * sin_alpha + tmp * tmp).sqrt());
    let lambda = (sin_sigma * sin_alpha1).atan2(cos_u1 * cos_sigma - sin_u1 * sin_sigma * cos_alpha1);
    let c = f / 16.0 * cos_sq_alpha * (4.0 + f * (4.0 - 3.0 * cos_sq_alpha));
    let l = lambda
        - (1.0 - c)
            * f
            * sin_alpha
            * (sigma
                + c * sin_sigma
                    * (cos_2sigma_m + c * cos_sigma * (-1.0 + 2.0 * cos_2sigma_m.powi(2))));

    GeoPoint::new(lat2.to_degrees(), normalize_lon(start.lon + l.to_degrees()))
}

/// Sample `n + 1` points along the geodesic from `start` to `end` at equal
/// along-track distances. The first and last points are exactly `start`
/// and `end`.
pub fn sample_geodesic(start: GeoPoint, end: GeoPoint, n: usize) -> Vec<GeoPoint> {
    if n == 0 {
        return vec![start];
    }
    let ellipsoidal = vincenty_inverse(start, end);
    let inv = ellipsoidal.unwrap_or_else(|| spherical_inverse(start, end));
    if inv.distance_m == 0.0 {
        return vec![start; n + 1];
    }

    let mut points = Vec::with_capacity(n + 1);
    points.push(start);
    for i in 1..n {
        let d = inv.distance_m * i as f64 / n as f64;
        points.push(if ellipsoidal.is_some() {
            direct(start, inv.azimuth_deg, d)
        } else {
            spherical_direct(start, inv.azimuth_deg, d)
        });
    }
    points.push(end);
    points
}

/// Sample a geodesic and project it: the path of a projectile.
pub fn sample_arc(start: GeoPoint, end: GeoPoint, n: usize, projection: &Equirectangular) -> Vec<Vec2> {
    projection.project_all(&sample_geodesic(start, end, n))
}

/// Normalize a longitude to [-180, 180).
pub fn normalize_lon(lon: f64) -> f64 {
    (lon + 180.0).rem_euclid(360.0) - 180.0
}

fn normalize_azimuth(deg: f64) -> f64 {
    let a = deg.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negatives.
    if a >= 360.0 {
        0.0
    } else {
        a
    }
}

/// Vincenty's A and B series coefficients for a given u².
fn series_coefficients(u_sq: f64) -> (f64, f64) {
    let a = 1.0 + u_sq / 16384.0 * (4096.0 + u_sq * (-768.0 + u_sq * (320.0 - 175.0 * u_sq)));
    let b = u_sq / 1024.0 * (256.0 + u_sq * (-128.0 + u_sq * (74.0 - 47.0 * u_sq)));
    (a, b)
}

fn delta_sigma(b: f64, sin_sigma: f64, cos_sigma: f64, cos_2sigma_m: f64) -> f64 {
    let c2 = cos_2sigma_m * cos_2sigma_m;
    b * sin_sigma
        * (cos_2sigma_m
            + b / 4.0
                * (cos_sigma * (-1.0 + 2.0 * c2)
                    - b / 6.0 * cos_2sigma_m * (-3.0 + 4.0 * sin_sigma * sin_sigma) * (-3.0 + 4.0 * c2)))
}

/// Spherical fallback for pairs where Vincenty fails to converge.
fn spherical_inverse(start: GeoPoint, end: GeoPoint) -> Inverse {
    let phi1 = start.lat.to_radians();
    let phi2 = end.lat.to_radians();
    let dlambda = (end.lon - start.lon).to_radians();

    let y = dlambda.sin() * phi2.cos();
    let x = phi1.cos() * phi2.sin() - phi1.sin() * phi2.cos() * dlambda.cos();
    let azimuth_deg = if y == 0.0 && x == 0.0 {
        0.0
    } else {
        normalize_azimuth(y.atan2(x).to_degrees())
    };

    let dphi = phi2 - phi1;
    let h = (dphi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (dlambda / 2.0).sin().powi(2);
    let central = 2.0 * h.clamp(0.0, 1.0).sqrt().asin();

    Inverse {
        distance_m: central * RECTIFYING_RADIUS,
        azimuth_deg,
    }
}

/// Direct problem on the sphere of `RECTIFYING_RADIUS`, the counterpart
/// of [`spherical_inverse`].
fn spherical_direct(start: GeoPoint, azimuth_deg: f64, distance_m: f64) -> GeoPoint {
    let phi1 = start.lat.to_radians();
    let theta = azimuth_deg.to_radians();
    let delta = distance_m / RECTIFYING_RADIUS;

    let sin_phi2 = phi1.sin() * delta.cos() + phi1.cos() * delta.sin() * theta.cos();
    let phi2 = sin_phi2.clamp(-1.0, 1.0).asin();
    let dlambda = (theta.sin() * delta.sin() * phi1.cos()).atan2(delta.cos() - phi1.sin() * sin_phi2);

    GeoPoint::new(phi2.to_degrees(), normalize_lon(start.lon + dlambda.to_degrees()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use norad_core::types::Viewport;

    const DC: GeoPoint = GeoPoint::new(38.9, -77.0);
    const MOSCOW: GeoPoint = GeoPoint::new(55.75, 37.62);

    #[test]
    fn test_inverse_known_distance() {
        // Flinders Peak -> Buninyong, the classic Vincenty reference pair.
        let a = GeoPoint::new(-37.951_033_416_7, 144.424_867_888_9);
        let b = GeoPoint::new(-37.652_821_138_9, 143.926_495_527_8);
        let inv = inverse(a, b);
        assert!(
            (inv.distance_m - 54_972.271).abs() < 0.01,
            "distance: {}",
            inv.distance_m
        );
        assert!(
            (inv.azimuth_deg - 306.868_159).abs() < 1e-4,
            "azimuth: {}",
            inv.azimuth_deg
        );
    }

    #[test]
    fn test_inverse_coincident() {
        let inv = inverse(DC, DC);
        assert_eq!(inv.distance_m, 0.0);
        assert_eq!(inv.azimuth_deg, 0.0);
    }

    #[test]
    fn test_inverse_antipodal_is_finite() {
        let a = GeoPoint::new(0.0, 0.0);
        let b = GeoPoint::new(0.5, 179.7);
        let inv = inverse(a, b);
        assert!(inv.distance_m.is_finite() && inv.azimuth_deg.is_finite());
        assert!(inv.distance_m > 19_000_000.0, "distance: {}", inv.distance_m);
    }

    #[test]
    fn test_inverse_pole_to_pole() {
        let inv = inverse(GeoPoint::new(90.0, 0.0), GeoPoint::new(-90.0, 0.0));
        let half_meridian = std::f64::consts::PI * RECTIFYING_RADIUS;
        assert!(
            (inv.distance_m - half_meridian).abs() < 1.0,
            "distance: {} vs {half_meridian}",
            inv.distance_m
        );
        assert!(inv.azimuth_deg.is_finite());
    }

    #[test]
    fn test_direct_inverts_inverse() {
        let inv = inverse(DC, MOSCOW);
        let end = direct(DC, inv.azimuth_deg, inv.distance_m);
        assert!((end.lat - MOSCOW.lat).abs() < 1e-6, "lat: {}", end.lat);
        assert!((end.lon - MOSCOW.lon).abs() < 1e-6, "lon: {}", end.lon);
    }

    #[test]
    fn test_direct_normalizes_longitude() {
        // Due east along the equator across the antimeridian.
        let p = direct(GeoPoint::new(0.0, 170.0), 90.0, 2_000_000.0);
        assert!((-180.0..180.0).contains(&p.lon), "lon: {}", p.lon);
        assert!(p.lon < -170.0, "should wrap to the western hemisphere: {}", p.lon);
    }

    #[test]
    fn test_normalize_lon() {
        assert_eq!(normalize_lon(180.0), -180.0);
        assert_eq!(normalize_lon(-180.0), -180.0);
        assert_eq!(normalize_lon(190.0), -170.0);
        assert_eq!(normalize_lon(-190.0), 170.0);
        assert_eq!(normalize_lon(45.0), 45.0);
    }

    #[test]
    fn test_sample_geodesic_pins_endpoints() {
        let pts = sample_geodesic(DC, MOSCOW, 220);
        assert_eq!(pts.len(), 221);
        assert_eq!(pts[0], DC);
        assert_eq!(pts[220], MOSCOW);
        // Great circle DC -> Moscow bends north of both endpoints.
        let max_lat = pts.iter().map(|p| p.lat).fold(f64::MIN, f64::max);
        assert!(max_lat > MOSCOW.lat, "max lat {max_lat}");
    }

    #[test]
    fn test_sample_geodesic_equal_spacing() {
        let pts = sample_geodesic(DC, MOSCOW, 10);
        let step = inverse(DC, MOSCOW).distance_m / 10.0;
        for w in pts.windows(2) {
            let d = inverse(w[0], w[1]).distance_m;
            assert!((d - step).abs() < 1.0, "spacing {d} vs {step}");
        }
    }

    #[test]
    fn test_sample_near_antipodal_reaches_target() {
        let start = GeoPoint::new(0.0, 20.0);
        let end = GeoPoint::new(0.0, -160.2);
        let n = 100;
        let pts = sample_geodesic(start, end, n);
        let step = inverse(start, end).distance_m / n as f64;
        for w in pts.windows(2) {
            let d = spherical_inverse(w[0], w[1]).distance_m;
            assert!((d - step).abs() < step * 0.02, "spacing {d} vs {step}");
        }
        let approach = spherical_inverse(pts[n - 1], end).distance_m;
        assert!(approach < step * 1.02, "last step {approach} vs {step}");
    }

    #[test]
    fn test_sample_arc_identical_endpoints() {
        let proj = Equirectangular::new(Viewport::default());
        let pts = sample_arc(DC, DC, 220, &proj);
        assert_eq!(pts.len(), 221);
        let first = pts[0];
        assert!(first.is_finite());
        assert!(pts.iter().all(|&p| p == first));
    }

    #[test]
    fn test_sample_arc_projects_endpoints() {
        let proj = Equirectangular::new(Viewport::default());
        let pts = sample_arc(DC, MOSCOW, 220, &proj);
        assert_eq!(pts[0], proj.project(DC));
        assert_eq!(pts[220], proj.project(MOSCOW));
    }
}
