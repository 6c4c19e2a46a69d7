//! Synthetic Point Clouds
//!
//! Small samplers for spaces with known local homology:
//! - `intersecting_lines`: two segments crossing at right angles; at the
//!   crossing the local homology in degree 1 has rank 3, elsewhere on an
//!   arm it has rank 1
//! - `circle`: a closed curve; rank 1 in degree 1 at every point
//!
//! Noise is additive isotropic Gaussian. The RNG is supplied by the caller
//! so samples are reproducible under a seeded `StdRng`.

use ndarray::{Array1, Array2};
use rand::Rng;
use rand_distr::{Distribution, Normal};
use std::f64::consts::PI;

use crate::error::{LocalHomologyError, Result};

fn noise(noise_std: f64) -> Result<Normal<f64>> {
    let invalid = LocalHomologyError::InvalidScale {
        name: "noise_std",
        value: noise_std,
        expected: ">= 0",
    };
    // Normal::new accepts a negative standard deviation
    if !(noise_std.is_finite() && noise_std >= 0.0) {
        return Err(invalid);
    }
    Normal::new(0.0, noise_std).map_err(|_| invalid)
}

/// Sample two perpendicular segments crossing at `center`.
///
/// ⌊n/2⌋ points lie on the rising diagonal of the unit square and the rest
/// on the falling one, both shifted so the crossing lands on `center`.
pub fn intersecting_lines<R: Rng + ?Sized>(
    n_points: usize,
    noise_std: f64,
    center: [f64; 2],
    rng: &mut R,
) -> Result<Array2<f64>> {
    let normal = noise(noise_std)?;

    let n_up = n_points / 2;
    let n_down = n_points - n_up;
    let t_up = Array1::linspace(0.0, 1.0, n_up);
    let t_down = Array1::linspace(0.0, 1.0, n_down);

    let mut points = Array2::<f64>::zeros((n_points, 2));
    for (i, &t) in t_up.iter().enumerate() {
        points[[i, 0]] = t;
        points[[i, 1]] = t;
    }
    for (i, &t) in t_down.iter().enumerate() {
        points[[n_up + i, 0]] = t;
        points[[n_up + i, 1]] = 1.0 - t;
    }

    for mut row in points.rows_mut() {
        row[0] += normal.sample(rng) + center[0] - 0.5;
        row[1] += normal.sample(rng) + center[1] - 0.5;
    }
    Ok(points)
}

/// Sample a circle of `radius` around `center` at evenly spaced angles
pub fn circle<R: Rng + ?Sized>(
    n_points: usize,
    radius: f64,
    center: [f64; 2],
    noise_std: f64,
    rng: &mut R,
) -> Result<Array2<f64>> {
    if !(radius.is_finite() && radius > 0.0) {
        return Err(LocalHomologyError::InvalidScale {
            name: "radius",
            value: radius,
            expected: "> 0",
        });
    }
    let normal = noise(noise_std)?;

    let mut points = Array2::<f64>::zeros((n_points, 2));
    for (i, mut row) in points.rows_mut().into_iter().enumerate() {
        let theta = 2.0 * PI * i as f64 / n_points as f64;
        row[0] = center[0] + radius * theta.cos() + normal.sample(rng);
        row[1] = center[1] + radius * theta.sin() + normal.sample(rng);
    }
    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_noiseless_lines_cross_at_center() {
        let mut rng = StdRng::seed_from_u64(7);
        let points = intersecting_lines(11, 0.0, [2.0, -1.0], &mut rng).unwrap();

        assert_eq!(points.dim(), (11, 2));
        // Rising arm: 5 points from (1.5, -1.5) to (2.5, -0.5)
        assert_relative_eq!(points[[0, 0]], 1.5);
        assert_relative_eq!(points[[4, 1]], -0.5);
        // Falling arm: 6 points from (1.5, -0.5) to (2.5, -1.5)
        assert_relative_eq!(points[[5, 1]], -0.5);
        assert_relative_eq!(points[[10, 1]], -1.5);
    }

    #[test]
    fn test_circle_radius() {
        let mut rng = StdRng::seed_from_u64(1);
        let points = circle(64, 2.0, [1.0, 1.0], 0.0, &mut rng).unwrap();
        for row in points.rows() {
            let r = ((row[0] - 1.0).powi(2) + (row[1] - 1.0).powi(2)).sqrt();
            assert_relative_eq!(r, 2.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_rejects_negative_noise() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(matches!(
            intersecting_lines(10, -0.1, [0.0, 0.0], &mut rng),
            Err(LocalHomologyError::InvalidScale { name: "noise_std", .. })
        ));
        assert!(circle(10, 1.0, [0.0, 0.0], -0.1, &mut rng).is_err());
        assert!(circle(10, 1.0, [0.0, 0.0], f64::NAN, &mut rng).is_err());
        assert!(circle(10, 0.0, [0.0, 0.0], 0.0, &mut rng).is_err());
    }
}
