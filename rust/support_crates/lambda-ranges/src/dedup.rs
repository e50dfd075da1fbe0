use itertools::Itertools;

/// Removes consecutive equal values, keeping the first of each run.
///
/// Equal values that are not adjacent are all kept:
/// `[1, 1, 2, 1] -> [1, 2, 1]`.
pub fn dedup_consecutive<T, I>(values: I) -> Vec<T>
where
    T: PartialEq,
    I: IntoIterator<Item = T>,
{
    values.into_iter().dedup().collect()
}
