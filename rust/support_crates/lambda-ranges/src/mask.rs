use std::ops::Range;

/// Converts a boolean mask into the list of maximal runs of `true` values.
///
/// Positions outside the mask are treated as `false`, so a run touching
/// either edge is closed there. Output ranges are sorted and non-touching.
///
/// `mask_to_ranges(&[true, true, false, true]) == [0..2, 3..4]`
pub fn mask_to_ranges(mask: &[bool]) -> Vec<Range<usize>> {
    let mut res = Vec::new();
    let mut open: Option<usize> = None;
    for (i, &set) in mask.iter().enumerate() {
        match (open, set) {
            (None, true) => open = Some(i),
            (Some(start), false) => {
                res.push(start..i);
                open = None;
            }
            _ => {}
        }
    }
    if let Some(start) = open {
        res.push(start..mask.len());
    }
    res
}
