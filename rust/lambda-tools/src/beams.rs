//! Elliptical Gaussian beams in compressed form.
//!
//! A beam with major and minor widths `sigma` rotated by `phi` has the
//! inverse covariance `R(phi) diag(sigma^-2) R(phi)^T`. Being symmetric, it is
//! stored as the three numbers `[C00, C11, C01]`.

use std::f64::consts::PI;

use lambda_common::{Result, verify_arg};

/// Inverse beam covariance `[C00, C11, C01]`.
pub type CompressedBeam = [f64; 3];

/// Compresses a beam with widths `sigma` along its own axes, rotated by
/// `phi` radians.
pub fn compress_beam(sigma: [f64; 2], phi: f64) -> CompressedBeam {
    let (s, c) = phi.sin_cos();
    let (a, b) = (sigma[0].powi(-2), sigma[1].powi(-2));
    [c * c * a + s * s * b, s * s * a + c * c * b, c * s * (a - b)]
}

/// Inverse of [`compress_beam`]: returns the widths, widest first, and the
/// angle of the widest axis in `[0, pi)`.
///
/// # Errors
///
/// Fails if the covariance is not positive definite.
pub fn expand_beam(irads: CompressedBeam) -> Result<([f64; 2], f64)> {
    let [p, q, r] = irads;
    let mean = (p + q) / 2.0;
    let radius = ((p - q) / 2.0).hypot(r);
    let (lo, hi) = (mean - radius, mean + radius);
    verify_arg!(irads, lo > 0.0);

    // Principal axis of the larger eigenvalue, i.e. of the narrowest width.
    let phi = if r == 0.0 && p == q {
        0.0
    } else {
        (0.5 * (2.0 * r).atan2(p - q) + PI / 2.0).rem_euclid(PI)
    };
    Ok(([lo.powf(-0.5), hi.powf(-0.5)], phi))
}

/// Convolves beams: the result is `B_n ... B_1 B_1^T ... B_n^T` with `B_i`
/// the symmetric square root of each compressed covariance.
///
/// # Errors
///
/// Fails if a covariance is not positive definite.
pub fn combine_beams(beams: &[CompressedBeam]) -> Result<CompressedBeam> {
    let mut total = [[1.0, 0.0], [0.0, 1.0]];
    for &beam in beams {
        let root = sqrt_spd(beam)?;
        total = mul(&mul(&root, &total), &root);
    }
    Ok([total[0][0], total[1][1], total[0][1]])
}

type Mat2 = [[f64; 2]; 2];

/// Square root of a symmetric positive definite 2x2 matrix,
/// `(M + sqrt(det M) I) / sqrt(tr M + 2 sqrt(det M))`.
fn sqrt_spd(beam: CompressedBeam) -> Result<Mat2> {
    let [p, q, r] = beam;
    let det = p * q - r * r;
    verify_arg!(beam, p > 0.0 && det > 0.0);

    let s = det.sqrt();
    let t = (p + q + 2.0 * s).sqrt();
    Ok([[(p + s) / t, r / t], [r / t, (q + s) / t]])
}

fn mul(a: &Mat2, b: &Mat2) -> Mat2 {
    let mut out = [[0.0; 2]; 2];
    for (i, row) in out.iter_mut().enumerate() {
        for (j, v) in row.iter_mut().enumerate() {
            *v = a[i][0] * b[0][j] + a[i][1] * b[1][j];
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use std::f64::consts::PI;

    use super::{combine_beams, compress_beam, expand_beam};
    use crate::units::{ARCMIN, FWHM};

    fn assert_close(a: &[f64], b: &[f64], tol: f64) {
        assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(b) {
            assert!((x - y).abs() <= tol * y.abs().max(1.0), "{a:?} != {b:?}");
        }
    }

    #[test]
    fn test_compress_axis_aligned() {
        assert_close(&compress_beam([2.0, 1.0], 0.0), &[0.25, 1.0, 0.0], 1e-15);
        assert_close(&compress_beam([2.0, 1.0], PI / 2.0), &[1.0, 0.25, 0.0], 1e-15);
    }

    #[test]
    fn test_expand_round_trip() {
        fastrand::seed(7);
        for _ in 0..200 {
            let minor = 0.1 + fastrand::f64();
            let major = minor * (1.05 + fastrand::f64());
            let phi = (fastrand::f64() - 0.5) * 4.0 * PI;

            let (sigma, back) = expand_beam(compress_beam([major, minor], phi)).unwrap();
            assert_close(&sigma, &[major, minor], 1e-9);
            let dphi = (back - phi.rem_euclid(PI)).abs();
            assert!(dphi < 1e-9 || (dphi - PI).abs() < 1e-9, "{phi} -> {back}");
            assert!((0.0..=PI).contains(&back));
        }
    }

    #[test]
    fn test_expand_orders_widths() {
        // Minor axis given first: the result swaps widths and turns by 90 degrees.
        let (sigma, phi) = expand_beam(compress_beam([1.0, 3.0], 0.25)).unwrap();
        assert_close(&sigma, &[3.0, 1.0], 1e-12);
        assert!((phi - (0.25 + PI / 2.0)).abs() < 1e-12);

        let (sigma, phi) = expand_beam(compress_beam([2.0, 2.0], 1.0)).unwrap();
        assert_close(&sigma, &[2.0, 2.0], 1e-12);
        assert_eq!(phi, 0.0);

        assert!(expand_beam([1.0, -1.0, 0.0]).is_err());
    }

    #[test]
    fn test_combine_beams() {
        let beam = compress_beam([3.0 * ARCMIN * FWHM, 2.0 * ARCMIN * FWHM], 0.4);
        assert_close(&combine_beams(&[beam]).unwrap(), &beam, 1e-9);
        assert_eq!(combine_beams(&[]).unwrap(), [1.0, 1.0, 0.0]);

        // Axis-aligned beams multiply elementwise.
        let out = combine_beams(&[[4.0, 9.0, 0.0], [0.5, 2.0, 0.0]]).unwrap();
        assert_close(&out, &[2.0, 18.0, 0.0], 1e-12);

        assert!(combine_beams(&[[1.0, 1.0, 2.0]]).is_err());
    }
}
