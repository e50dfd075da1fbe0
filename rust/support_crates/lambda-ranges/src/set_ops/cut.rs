use std::ops::Range;

use lambda_common::Result;

use crate::{RangeBound, set_ops::subtract::subtract_ranges};

/// Splits every range of `ranges` at each point of `points` that falls
/// strictly inside it.
///
/// Points outside all ranges, or on a range boundary, have no effect. The
/// output is sorted by start and no output range straddles a cut point. The
/// total covered length is unchanged.
///
/// ```
/// use lambda_ranges::cut_ranges;
///
/// let out = cut_ranges(&[0..10, 20..100], &[0, 2, 7, 30, 200]).unwrap();
/// assert_eq!(out, vec![0..2, 2..7, 7..10, 20..30, 30..100]);
/// ```
///
/// # Errors
///
/// Fails if `ranges` overlap or if any bound or point is incomparable (NaN).
pub fn cut_ranges<T: RangeBound>(ranges: &[Range<T>], points: &[T]) -> Result<Vec<Range<T>>> {
    let cuts = points.iter().map(|&p| p..p).collect::<Vec<_>>();
    subtract_ranges(ranges, &cuts)
}

#[cfg(test)]
mod tests {
    use lambda_common::error::ErrorKind;

    use super::cut_ranges;

    #[test]
    fn test_cut_regression() {
        let out = cut_ranges(&[0..10, 20..100], &[0, 2, 7, 30, 200]).unwrap();
        assert_eq!(out, vec![0..2, 2..7, 7..10, 20..30, 30..100]);
    }

    #[test]
    fn test_cut_unsorted_and_repeated_points() {
        let out = cut_ranges(&[20..100, 0..10], &[30, 7, 2, 7, 0]).unwrap();
        assert_eq!(out, vec![0..2, 2..7, 7..10, 20..30, 30..100]);
    }

    #[test]
    fn test_cut_without_points() {
        let out = cut_ranges(&[5..6, 0..3], &[]).unwrap();
        assert_eq!(out, vec![0..3, 5..6]);
        assert!(cut_ranges::<u8>(&[], &[1, 2]).unwrap().is_empty());
    }

    #[test]
    fn test_cut_boundary_points_do_nothing() {
        let out = cut_ranges(&[0..10, 10..20], &[0, 10, 20]).unwrap();
        assert_eq!(out, vec![0..10, 10..20]);
    }

    #[test]
    fn test_cut_floats() {
        let out = cut_ranges(&[0.0..1.0], &[0.5]).unwrap();
        assert_eq!(out, vec![0.0..0.5, 0.5..1.0]);
        assert!(cut_ranges(&[0.0..1.0], &[f64::NAN]).is_err());
    }

    #[test]
    fn test_cut_rejects_overlapping_ranges() {
        let err = cut_ranges(&[0..10, 5..15], &[7, 7]).unwrap_err();
        match err.kind() {
            ErrorKind::OverlappingRanges { first, second, .. } => {
                assert_eq!((*first, *second), (0, 1));
            }
            kind => panic!("unexpected error: {kind}"),
        }
        // Repeated points alone are fine.
        assert_eq!(cut_ranges(&[0..10], &[7, 7, 7]).unwrap(), vec![0..7, 7..10]);
    }
}
