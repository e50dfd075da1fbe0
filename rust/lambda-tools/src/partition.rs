//! Splitting work (files, samples, detectors) across bins of limited size.

use itertools::Itertools;
use lambda_common::{Result, error::Error, verify_arg};

/// For each capacity, the number of leading `sizes` that fit in the running
/// total of capacities so far, assuming an item may straddle a boundary.
///
/// Equivalently, for every prefix sum of `capacities`, the number of prefix
/// sums of `sizes` that are `<=` it.
///
/// ```
/// use lambda_tools::partition::cumsplit;
///
/// assert_eq!(cumsplit(&[1, 1, 2, 0, 1, 3, 1], &[3, 2, 5]), vec![2, 5, 7]);
/// ```
pub fn cumsplit(sizes: &[u64], capacities: &[u64]) -> Vec<usize> {
    let size_sums = prefix_sums(sizes);
    prefix_sums(capacities)
        .into_iter()
        .map(|cap| size_sums.partition_point(|&s| s <= cap))
        .collect()
}

fn prefix_sums(values: &[u64]) -> Vec<u64> {
    values
        .iter()
        .scan(0u64, |acc, &v| {
            *acc = acc.saturating_add(v);
            Some(*acc)
        })
        .collect()
}

/// Distributes item indices into `nbin` bins so that the total weight per
/// bin is as even as possible.
///
/// Greedy: items are taken heaviest first (equal weights from the highest
/// index down) and each is put in the currently lightest bin (ties go to the
/// lowest bin).
///
/// # Errors
///
/// Fails if `nbin` is zero or a weight is not finite.
pub fn equal_split(weights: &[f64], nbin: usize) -> Result<Vec<Vec<usize>>> {
    verify_arg!(nbin, nbin > 0);
    if let Some(i) = weights.iter().position(|w| !w.is_finite()) {
        return Err(Error::invalid_arg(
            "weights",
            format!("weight {i} is not finite"),
        ));
    }

    let order = (0..weights.len())
        .sorted_by(|&i, &j| weights[j].total_cmp(&weights[i]).then(j.cmp(&i)))
        .collect::<Vec<_>>();

    let mut bins = vec![Vec::new(); nbin];
    let mut totals = vec![0.0f64; nbin];
    for i in order {
        let j = totals
            .iter()
            .position_min_by(|a, b| a.total_cmp(b))
            .unwrap_or(0);
        bins[j].push(i);
        totals[j] += weights[i];
    }
    Ok(bins)
}

/// Search direction of [`nearest_product`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Direction {
    /// Largest product `<= n`.
    #[default]
    Below,
    /// Smallest product `>= n`.
    Above,
}

/// Finds the product of non-negative integer powers of `factors` nearest to
/// `n` in the given direction.
///
/// A factor of 1 makes every `n` reachable and returns `n` itself.
///
/// # Errors
///
/// Fails if `factors` is empty or contains 0, or if `n == 0` with
/// [`Direction::Below`].
pub fn nearest_product(n: u64, factors: &[u64], direction: Direction) -> Result<u64> {
    verify_arg!(factors, !factors.is_empty());
    verify_arg!(factors, factors.iter().all(|&f| f > 0));
    if factors.contains(&1) {
        return Ok(n);
    }

    match direction {
        Direction::Below => {
            verify_arg!(n, n > 0);
            let mut best = 1;
            visit_products(factors, n, &mut |p| best = best.max(p));
            Ok(best)
        }
        Direction::Above => {
            if n <= 1 {
                return Ok(1);
            }
            // Multiplying any product just below `n` by the smallest factor
            // reaches `n`, so the answer is bounded by `n * min(factors)`.
            let min_factor = factors.iter().copied().min().unwrap_or(2);
            let limit = n.saturating_mul(min_factor);
            let mut best = u64::MAX;
            visit_products(factors, limit, &mut |p| {
                if p >= n {
                    best = best.min(p);
                }
            });
            Ok(best)
        }
    }
}

/// Calls `f` with every product of powers of `factors` that is `<= limit`.
fn visit_products(factors: &[u64], limit: u64, f: &mut impl FnMut(u64)) {
    fn recurse(factors: &[u64], cur: u64, limit: u64, f: &mut impl FnMut(u64)) {
        f(cur);
        for (i, &factor) in factors.iter().enumerate() {
            match cur.checked_mul(factor) {
                Some(next) if next <= limit => recurse(&factors[i..], next, limit, f),
                _ => {}
            }
        }
    }
    if limit >= 1 {
        recurse(factors, 1, limit, f);
    }
}

/// Nearest length with only small prime factors, which FFTs handle fast.
pub fn fft_len(n: u64, direction: Direction) -> Result<u64> {
    nearest_product(n, &[2, 3, 5, 7, 11, 13], direction)
}

#[cfg(test)]
mod tests {
    use super::{Direction, cumsplit, equal_split, fft_len, nearest_product};

    #[test]
    fn test_cumsplit() {
        assert_eq!(cumsplit(&[1, 1, 2, 0, 1, 3, 1], &[3, 2, 5]), vec![2, 5, 7]);
        assert_eq!(cumsplit(&[4, 4], &[1, 1]), vec![0, 0]);
        assert!(cumsplit(&[1, 2], &[]).is_empty());
        assert_eq!(cumsplit(&[], &[10]), vec![0]);
    }

    #[test]
    fn test_cumsplit_saturates_large_sizes() {
        let big = u64::MAX / 2;
        assert_eq!(cumsplit(&[big, big, big, 1], &[big, big]), vec![1, 2]);
        assert_eq!(cumsplit(&[1, 2], &[u64::MAX, u64::MAX]), vec![2, 2]);
    }

    #[test]
    fn test_equal_split() {
        let bins = equal_split(&[5.0, 1.0, 4.0, 2.0, 3.0], 2).unwrap();
        // 5 -> bin 0, 4 -> bin 1, 3 -> bin 1, 2 -> bin 0, 1 -> bin 0
        assert_eq!(bins, vec![vec![0, 3, 1], vec![2, 4]]);

        let bins = equal_split(&[1.0, 1.0], 4).unwrap();
        assert_eq!(bins, vec![vec![1], vec![0], vec![], vec![]]);

        // Equal weights are taken from the highest index down.
        let bins = equal_split(&[2.0, 1.0, 2.0, 1.0, 2.0], 3).unwrap();
        assert_eq!(bins, vec![vec![4, 3], vec![2, 1], vec![0]]);

        assert!(equal_split(&[1.0], 0).is_err());
        assert!(equal_split(&[1.0, f64::NAN], 2).is_err());
        assert_eq!(equal_split(&[], 3).unwrap(), vec![Vec::<usize>::new(); 3]);
    }

    #[test]
    fn test_equal_split_random_balance() {
        fastrand::seed(31337);
        for _ in 0..50 {
            let weights = (0..fastrand::usize(1..200))
                .map(|_| fastrand::f64())
                .collect::<Vec<_>>();
            let nbin = fastrand::usize(1..10);
            let bins = equal_split(&weights, nbin).unwrap();

            let mut seen = bins.iter().flatten().copied().collect::<Vec<_>>();
            seen.sort_unstable();
            assert_eq!(seen, (0..weights.len()).collect::<Vec<_>>());

            // Greedy assignment keeps every bin within one max weight of the others.
            let totals = bins
                .iter()
                .map(|b| b.iter().map(|&i| weights[i]).sum::<f64>())
                .collect::<Vec<_>>();
            let max_w = weights.iter().copied().fold(0.0, f64::max);
            let (lo, hi) = totals
                .iter()
                .fold((f64::MAX, f64::MIN), |(lo, hi), &t| (lo.min(t), hi.max(t)));
            assert!(hi - lo <= max_w + 1e-9);
        }
    }

    #[test]
    fn test_nearest_product() {
        assert_eq!(nearest_product(100, &[2], Direction::Below).unwrap(), 64);
        assert_eq!(nearest_product(100, &[2], Direction::Above).unwrap(), 128);
        assert_eq!(nearest_product(7, &[2, 3], Direction::Above).unwrap(), 8);
        assert_eq!(nearest_product(17, &[2, 3], Direction::Below).unwrap(), 16);
        assert_eq!(nearest_product(35, &[2, 3], Direction::Below).unwrap(), 32);
        assert_eq!(nearest_product(35, &[2, 3], Direction::Above).unwrap(), 36);
        assert_eq!(nearest_product(1, &[2, 3], Direction::Below).unwrap(), 1);
        assert_eq!(nearest_product(0, &[2, 3], Direction::Above).unwrap(), 1);
        assert_eq!(nearest_product(97, &[1, 2], Direction::Below).unwrap(), 97);

        assert!(nearest_product(10, &[], Direction::Below).is_err());
        assert!(nearest_product(10, &[0, 2], Direction::Below).is_err());
        assert!(nearest_product(0, &[2], Direction::Below).is_err());
    }

    #[test]
    fn test_fft_len() {
        assert_eq!(fft_len(1000, Direction::Below).unwrap(), 1000);
        assert_eq!(fft_len(1009, Direction::Below).unwrap(), 1008);
        assert_eq!(fft_len(1009, Direction::Above).unwrap(), 1014);
        assert_eq!(fft_len(17, Direction::Above).unwrap(), 18);
    }
}
