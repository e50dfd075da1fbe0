use std::ops::Range;


const DOMAIN: usize = 4096;

/// Random internally non-overlapping ranges, returned in shuffled order.
///
/// Touching neighbors are generated as well as zero-width ranges when
/// `allow_empty` is set.
fn random_disjoint(max_count: usize, allow_empty: bool) -> Vec<Range<u32>> {
    let count = fastrand::usize(0..=max_count);
    let mut res = Vec::with_capacity(count);
    let mut pos = fastrand::usize(0..20);
    for _ in 0..count {
        let len = if allow_empty {
            fastrand::usize(0..40)
        } else {
            fastrand::usize(1..40)
        };
        if pos + len >= DOMAIN {
            break;
        }
        res.push(pos as u32..(pos + len) as u32);
        pos += len + fastrand::usize(0..25);
    }
    fastrand::shuffle(&mut res);
    res
}

/// Random ranges that may overlap each other.
fn random_overlapping(max_count: usize) -> Vec<Range<u32>> {
    (0..fastrand::usize(0..=max_count))
        .map(|_| {
            let start = fastrand::u32(0..2000);
            start..start + fastrand::u32(0..60)
        })
        .collect()
}

fn coverage(ranges: &[Range<u32>]) -> Vec<bool> {
    let mut mask = vec![false; DOMAIN];
    for r in ranges {
        for p in r.start..r.end {
            mask[p as usize] = true;
        }
    }
    mask
}

fn measure(ranges: &[Range<u32>]) -> u32 {
    ranges.iter().map(|r| r.end.saturating_sub(r.start)).sum()
}
