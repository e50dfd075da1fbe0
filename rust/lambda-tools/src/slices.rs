//! Slice descriptors of the form `[start:stop:step]`.
//!
//! Descriptors come from command lines and configuration strings, so they are
//! parsed by a strict grammar:
//!
//! ```text
//! slice  := "[" body "]" | body
//! body   := int? ":" int? ( ":" int? )?
//! int    := ("+" | "-")? digit+
//! ```
//!
//! Whitespace around the integers is ignored. A bare index such as `[3]` is
//! not a slice and is rejected.

use std::{fmt, str::FromStr};

use lambda_common::{Result, error::Error, verify_arg};

/// A parsed, not yet resolved, slice: each part may be omitted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct SliceSpec {
    pub start: Option<i64>,
    pub stop: Option<i64>,
    pub step: Option<i64>,
}

impl SliceSpec {
    pub fn new(start: Option<i64>, stop: Option<i64>, step: Option<i64>) -> SliceSpec {
        SliceSpec { start, stop, step }
    }

    /// The slice selecting everything, `[:]`.
    pub fn full() -> SliceSpec {
        SliceSpec::default()
    }

    /// Parses a descriptor, see the module documentation for the grammar.
    pub fn parse(desc: &str) -> Result<SliceSpec> {
        let body = desc.trim();
        let body = match body.strip_prefix('[') {
            Some(rest) => rest
                .strip_suffix(']')
                .ok_or_else(|| Error::slice_syntax(desc, "missing closing ']'"))?,
            None => body,
        };

        let parts = body.split(':').collect::<Vec<_>>();
        if parts.len() < 2 {
            return Err(Error::slice_syntax(desc, "expected 'start:stop[:step]'"));
        }
        if parts.len() > 3 {
            return Err(Error::slice_syntax(desc, "too many ':' separators"));
        }

        let parse_part = |part: &str| -> Result<Option<i64>> {
            let part = part.trim();
            if part.is_empty() {
                return Ok(None);
            }
            part.parse::<i64>()
                .map(Some)
                .map_err(|_| Error::slice_syntax(desc, format!("expected integer, found '{part}'")))
        };

        Ok(SliceSpec {
            start: parse_part(parts[0])?,
            stop: parse_part(parts[1])?,
            step: parts.get(2).copied().map(parse_part).transpose()?.flatten(),
        })
    }

    /// Resolves defaults and negative indices against a sequence of length `n`.
    ///
    /// Negative indices count from the end and out-of-bounds indices are
    /// clamped. With a negative step the default start is `n - 1` and the
    /// default stop is `-1`, meaning "past the first element".
    ///
    /// # Errors
    ///
    /// Fails if the step is zero.
    pub fn expand(&self, n: usize) -> Result<ExpandedSlice> {
        let step = self.step.unwrap_or(1);
        verify_arg!(step, step != 0);

        let n = n as i64;
        let (lower, upper) = if step < 0 { (-1, n - 1) } else { (0, n) };
        let resolve = |v: Option<i64>, default: i64| match v {
            None => default,
            Some(v) if v < 0 => (v + n).max(lower),
            Some(v) => v.min(upper),
        };

        let (default_start, default_stop) = if step < 0 {
            (upper, lower)
        } else {
            (lower, upper)
        };
        Ok(ExpandedSlice {
            start: resolve(self.start, default_start),
            stop: resolve(self.stop, default_stop),
            step,
        })
    }

    /// Applies the slice to `data`, copying the selected elements.
    pub fn apply<T: Clone>(&self, data: &[T]) -> Result<Vec<T>> {
        let expanded = self.expand(data.len())?;
        Ok(expanded.indices().map(|i| data[i].clone()).collect())
    }
}

impl FromStr for SliceSpec {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        SliceSpec::parse(s)
    }
}

impl fmt::Display for SliceSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let part = |v: Option<i64>| v.map(|v| v.to_string()).unwrap_or_default();
        write!(f, "[{}:{}", part(self.start), part(self.stop))?;
        if let Some(step) = self.step {
            write!(f, ":{step}")?;
        }
        write!(f, "]")
    }
}

/// A slice with every part resolved against a known length.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ExpandedSlice {
    pub start: i64,
    pub stop: i64,
    pub step: i64,
}

impl ExpandedSlice {
    /// Number of selected elements.
    pub fn len(&self) -> usize {
        let span = if self.step > 0 {
            self.stop - self.start
        } else {
            self.start - self.stop
        };
        if span <= 0 {
            0
        } else {
            ((span as u64 - 1) / self.step.unsigned_abs() + 1) as usize
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The selected indices, in selection order.
    pub fn indices(self) -> impl Iterator<Item = usize> {
        // `k * step` stays within `start..stop` for every `k < len`.
        (0..self.len() as i64).map(move |k| (self.start + k * self.step) as usize)
    }
}

/// Slices `data` with `spec`, interpreting the step as a downgrade factor
/// instead of a stride.
///
/// The elements in `start:stop` are taken (reversed when the step is
/// negative), and every complete block of `|step|` consecutive elements is
/// replaced by its mean. A trailing partial block is dropped.
///
/// ```
/// use lambda_tools::slices::{SliceSpec, downgrade};
///
/// let spec: SliceSpec = "[1::2]".parse().unwrap();
/// assert_eq!(downgrade(&[9.0, 1.0, 3.0, 5.0, 7.0, 4.0], &spec).unwrap(), vec![2.0, 6.0]);
/// ```
pub fn downgrade(data: &[f64], spec: &SliceSpec) -> Result<Vec<f64>> {
    let step = spec.step.unwrap_or(1);
    verify_arg!(step, step != 0);

    let direction = SliceSpec::new(spec.start, spec.stop, Some(step.signum()));
    let selected = direction.apply(data)?;
    let factor = step.unsigned_abs() as usize;
    Ok(selected
        .chunks_exact(factor)
        .map(|block| block.iter().sum::<f64>() / factor as f64)
        .collect())
}
