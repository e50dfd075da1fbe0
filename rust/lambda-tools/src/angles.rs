//! Helpers for cyclic coordinates such as angles, where `a` and `a + period`
//! describe the same point.

use std::{f64::consts::TAU, ops::Range};

/// Default period of angles in radians.
pub const FULL_TURN: f64 = TAU;

/// Adds or subtracts multiples of `period` so that `a` lands in
/// `[reference - period / 2, reference + period / 2)`.
///
/// `reference` is the value furthest away from the wrap-around cut. Values
/// already inside the window are returned unchanged.
#[inline]
pub fn rewind(a: f64, reference: f64, period: f64) -> f64 {
    let half = period / 2.0;
    if reference - half <= a && a < reference + half {
        return a;
    }
    reference + (a - reference + half).rem_euclid(period) - half
}

/// Rewinds every value of `values` around `reference`.
pub fn rewind_all(values: &[f64], reference: f64, period: f64) -> Vec<f64> {
    values.iter().map(|&a| rewind(a, reference, period)).collect()
}

/// Makes a sampled cyclic coordinate continuous by removing the jumps caused
/// by period wrapping.
///
/// The values are first rewound around `reference`; then every jump between
/// consecutive finite samples is rounded to a whole number of periods and
/// undone. Non-finite samples are passed through and do not break the
/// correction of their neighbors.
///
/// `[0.07, 0.02, 6.25, 6.20]` becomes roughly `[0.07, 0.02, -0.03, -0.08]`
/// with a period of `2 pi`.
pub fn unwind(values: &[f64], reference: f64, period: f64) -> Vec<f64> {
    let mut offset = 0.0;
    let mut prev: Option<f64> = None;
    values
        .iter()
        .map(|&a| {
            if !a.is_finite() {
                return a;
            }
            let a = rewind(a, reference, period);
            if let Some(p) = prev {
                offset += ((a - p) / period).round() * period;
            }
            prev = Some(a);
            a - offset
        })
        .collect()
}

/// Returns `true` if `a` lies in `[range.start, range.end)` modulo `period`.
///
/// `a` is rewound around the middle of the range before the comparison, so
/// the range must be shorter than one period.
pub fn between_angles(a: f64, range: Range<f64>, period: f64) -> bool {
    let a = rewind(a, (range.start + range.end) / 2.0, period);
    range.start <= a && a < range.end
}

#[cfg(test)]
mod tests {
    use std::f64::consts::PI;

    use super::{FULL_TURN, between_angles, rewind, rewind_all, unwind};
    use crate::units::DEGREE;

    fn assert_close(a: &[f64], b: &[f64]) {
        assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(b) {
            assert!((x - y).abs() < 1e-12, "{a:?} != {b:?}");
        }
    }

    #[test]
    fn test_rewind() {
        assert!((rewind(3.0 * PI / 2.0, 0.0, FULL_TURN) + PI / 2.0).abs() < 1e-12);
        assert!((rewind(-PI / 4.0, 0.0, FULL_TURN) + PI / 4.0).abs() < 1e-12);
        assert_eq!(rewind(370.0, 0.0, 360.0), 10.0);
        assert_eq!(rewind(-190.0, 0.0, 360.0), 170.0);
        assert_eq!(rewind(180.0, 0.0, 360.0), -180.0);
        assert_eq!(rewind(10.0, 180.0, 360.0), 10.0);
        assert_eq!(rewind(-10.0, 180.0, 360.0), 350.0);
        assert_close(&rewind_all(&[720.0, 45.0], 0.0, 360.0), &[0.0, 45.0]);
    }

    #[test]
    fn test_unwind() {
        let out = unwind(&[0.07, 0.02, 6.25, 6.20], 0.0, FULL_TURN);
        assert_close(
            &out,
            &[0.07, 0.02, 6.25 - FULL_TURN, 6.20 - FULL_TURN],
        );

        let out = unwind(&[350.0, 355.0, 5.0, 15.0, 370.0], 0.0, 360.0);
        assert_close(&out, &[-10.0, -5.0, 5.0, 15.0, 10.0]);

        let out = unwind(&[170.0, 179.0, f64::NAN, -172.0, -160.0], 180.0, 360.0);
        assert_eq!(out[0], 170.0);
        assert_eq!(out[1], 179.0);
        assert!(out[2].is_nan());
        assert_close(&out[3..], &[188.0, 200.0]);

        assert!(unwind(&[], 0.0, 360.0).is_empty());
    }

    #[test]
    fn test_between_angles() {
        let range = -10.0 * DEGREE..10.0 * DEGREE;
        assert!(between_angles(0.0, range.clone(), FULL_TURN));
        assert!(between_angles(355.0 * DEGREE, range.clone(), FULL_TURN));
        assert!(!between_angles(20.0 * DEGREE, range.clone(), FULL_TURN));
        assert!(!between_angles(10.0 * DEGREE, range, FULL_TURN));

        assert!(between_angles(-175.0, 170.0..190.0, 360.0));
        assert!(!between_angles(-165.0, 170.0..190.0, 360.0));
    }

    #[test]
    fn test_between_angles_half_open_at_end() {
        for deg in [1.0, 10.0, 33.3, 90.0, 179.0] {
            let range = -deg * DEGREE..deg * DEGREE;
            assert!(between_angles(range.start, range.clone(), FULL_TURN), "{deg}");
            assert!(!between_angles(range.end, range.clone(), FULL_TURN), "{deg}");
        }
    }

    #[test]
    fn test_rewind_keeps_values_inside_window() {
        for a in [0.1745329251994329, -3.0, 3.14159, 1e-300] {
            assert_eq!(rewind(a, 0.0, FULL_TURN).to_bits(), a.to_bits());
        }
        let r = 0.3;
        let a = r + 0.1;
        assert_eq!(rewind(a, r, FULL_TURN).to_bits(), a.to_bits());
    }
}
