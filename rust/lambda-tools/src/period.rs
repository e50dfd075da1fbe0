//! Period estimation of sampled, approximately periodic signals.
//!
//! Estimation runs in two stages:
//!
//! 1. [`find_period_fourier`] picks the strongest non-zero frequency of the
//!    power spectrum and takes the power-weighted mean frequency around it,
//!    which partially compensates for signals that are not periodic over the
//!    sampled length.
//! 2. [`find_period_exact`] refines that guess by fitting the signal with a
//!    shifted copy of itself, `model[i] = d[(i mod period) + phase]`, and
//!    minimizing the variance of the residual over period and phase.
//!
//! [`find_period`] chains both for a single signal.
//!
//! Periods and phases are measured in samples.

use lambda_common::{Result, error::Error, verify_arg};
use rustfft::{FftPlanner, num_complex::Complex};

/// Most periods of the signal used by the refinement.
const MAX_FIT_PERIODS: f64 = 10.0;
/// Convergence tolerance of the refinement, in samples.
const FIT_TOLERANCE: f64 = 1e-3;
const FIT_MAX_ITERATIONS: usize = 1000;

/// Result of [`find_period_exact`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PeriodFit {
    pub period: f64,
    /// Offset of the fitted template within the whole signal.
    pub phase: f64,
    /// Residual variance of the fit, relative to the variance of the squared
    /// signal.
    pub chisq: f64,
}

/// Estimates the period of `d` in both stages.
pub fn find_period(d: &[f64]) -> Result<PeriodFit> {
    let guess = find_period_fourier(d)?;
    find_period_exact(d, guess)
}

/// Coarse period estimate from the power spectrum of `d`.
///
/// # Errors
///
/// Fails if `d` has fewer than two samples or no power at non-zero
/// frequencies (for example a constant signal).
pub fn find_period_fourier(d: &[f64]) -> Result<f64> {
    verify_arg!(d, d.len() >= 2);
    if let Some(i) = d.iter().position(|v| !v.is_finite()) {
        return Err(Error::invalid_arg("d", format!("sample {i} is not finite")));
    }

    let mut power = power_spectrum(d);
    power[0] = 0.0;

    let peak = power
        .iter()
        .enumerate()
        .fold(0, |best, (k, &p)| if p > power[best] { k } else { best });
    let lo = peak / 2;
    let hi = (peak * 3 / 2 + 1).min(power.len());

    let window = &power[lo..hi];
    let total = window.iter().sum::<f64>();
    let denom = if total > 0.0 { total } else { 1.0 };
    let freq = window
        .iter()
        .enumerate()
        .map(|(k, &p)| (lo + k) as f64 * p)
        .sum::<f64>()
        / denom;
    if freq <= 0.0 {
        return Err(Error::invalid_arg("d", "signal has no periodic component"));
    }

    let period = d.len() as f64 / freq;
    log::trace!("find_period_fourier: n={} peak={peak} period={period}", d.len());
    Ok(period)
}

/// `|rfft(d)|^2`, bins `0..=n/2`.
fn power_spectrum(d: &[f64]) -> Vec<f64> {
    let mut buffer = d
        .iter()
        .map(|&v| Complex::new(v, 0.0))
        .collect::<Vec<_>>();
    FftPlanner::new()
        .plan_fft_forward(buffer.len())
        .process(&mut buffer);
    buffer[..d.len() / 2 + 1]
        .iter()
        .map(|c| c.norm_sqr())
        .collect()
}

/// Refines a period `guess` of `d`.
///
/// At most ten periods from the middle of the signal are fitted. The fit
/// starts at `period = phase = guess`.
///
/// # Errors
///
/// Fails if `guess` is not a positive finite number of samples no longer
/// than the signal.
pub fn find_period_exact(d: &[f64], guess: f64) -> Result<PeriodFit> {
    verify_arg!(guess, guess.is_finite() && guess >= 1.0);
    verify_arg!(guess, guess <= d.len() as f64);

    let n = (MAX_FIT_PERIODS.min(d.len() as f64 / guess) * guess) as usize;
    let offset = (d.len() - n) / 2;
    let span = &d[offset..offset + n];

    let chisq = |x: [f64; 2]| self_fit_residual(span, x[0], x[1]);
    let [period, phase] = nelder_mead(chisq, [guess, guess], 1.0);

    let norm = variance(span.iter().map(|v| v * v));
    let residual = chisq([period, phase]);
    let fit = PeriodFit {
        period,
        phase: phase + offset as f64,
        chisq: if norm > 0.0 { residual / norm } else { residual },
    };
    log::trace!("find_period_exact: guess={guess} fit={fit:?}");
    Ok(fit)
}

/// Variance of `d - model`, with `model[i]` the linear interpolation of `d`
/// at `(i mod period) + phase`.
fn self_fit_residual(d: &[f64], period: f64, phase: f64) -> f64 {
    if period.is_nan() || period <= 0.0 || !phase.is_finite() {
        return f64::INFINITY;
    }
    variance(
        d.iter()
            .enumerate()
            .map(|(i, &v)| v - interpolate(d, (i as f64).rem_euclid(period) + phase)),
    )
}

/// Linear interpolation of `d` at `x`, clamped to the end samples.
fn interpolate(d: &[f64], x: f64) -> f64 {
    let last = d.len() - 1;
    let x = x.clamp(0.0, last as f64);
    let i = (x.floor() as usize).min(last);
    let frac = x - i as f64;
    if i == last {
        d[last]
    } else {
        d[i] * (1.0 - frac) + d[i + 1] * frac
    }
}

fn variance(values: impl Iterator<Item = f64> + Clone) -> f64 {
    let (count, sum) = values
        .clone()
        .fold((0usize, 0.0), |(c, s), v| (c + 1, s + v));
    if count == 0 {
        return 0.0;
    }
    let mean = sum / count as f64;
    values.map(|v| (v - mean) * (v - mean)).sum::<f64>() / count as f64
}

/// Downhill simplex minimization of `f` in two dimensions, starting from
/// `start` with an initial simplex of size `step`. Returns the best vertex.
fn nelder_mead(f: impl Fn([f64; 2]) -> f64, start: [f64; 2], step: f64) -> [f64; 2] {
    let mut simplex = [
        start,
        [start[0] + step, start[1]],
        [start[0], start[1] + step],
    ]
    .map(|x| (x, f(x)));

    for _ in 0..FIT_MAX_ITERATIONS {
        simplex.sort_by(|a, b| a.1.total_cmp(&b.1));
        let [(best, fbest), (_, fsecond), (worst, fworst)] = simplex;

        let size = simplex[1..]
            .iter()
            .map(|(x, _)| (x[0] - best[0]).abs().max((x[1] - best[1]).abs()))
            .fold(0.0, f64::max);
        if size < FIT_TOLERANCE {
            break;
        }

        let centroid = [
            (best[0] + simplex[1].0[0]) / 2.0,
            (best[1] + simplex[1].0[1]) / 2.0,
        ];
        let along = |t: f64| {
            [
                centroid[0] + t * (worst[0] - centroid[0]),
                centroid[1] + t * (worst[1] - centroid[1]),
            ]
        };

        let reflected = along(-1.0);
        let freflected = f(reflected);
        if freflected < fbest {
            let expanded = along(-2.0);
            let fexpanded = f(expanded);
            simplex[2] = if fexpanded < freflected {
                (expanded, fexpanded)
            } else {
                (reflected, freflected)
            };
        } else if freflected < fsecond {
            simplex[2] = (reflected, freflected);
        } else {
            let contracted = if freflected < fworst {
                along(-0.5)
            } else {
                along(0.5)
            };
            let fcontracted = f(contracted);
            if fcontracted < fworst.min(freflected) {
                simplex[2] = (contracted, fcontracted);
            } else {
                for vertex in &mut simplex[1..] {
                    let x = [
                        best[0] + (vertex.0[0] - best[0]) / 2.0,
                        best[1] + (vertex.0[1] - best[1]) / 2.0,
                    ];
                    *vertex = (x, f(x));
                }
            }
        }
    }

    simplex.sort_by(|a, b| a.1.total_cmp(&b.1));
    simplex[0].0
}

#[cfg(test)]
mod tests {
    use std::f64::consts::TAU;

    use lambda_common::error::ErrorKind;

    use super::{find_period, find_period_exact, find_period_fourier, interpolate, nelder_mead};

    fn sine(n: usize, period: f64, phase: f64) -> Vec<f64> {
        (0..n)
            .map(|i| (TAU * (i as f64 + phase) / period).sin())
            .collect()
    }

    #[test]
    fn test_fourier_guess_on_whole_cycles() {
        let d = sine(1024, 32.0, 0.0);
        assert!((find_period_fourier(&d).unwrap() - 32.0).abs() < 1e-6);

        let d = sine(1000, 40.0, 3.0);
        assert!((find_period_fourier(&d).unwrap() - 40.0).abs() < 1e-6);
    }

    #[test]
    fn test_fourier_guess_off_grid() {
        // 1000 / 37.3 is between frequency bins.
        let d = sine(1000, 37.3, 0.0);
        let guess = find_period_fourier(&d).unwrap();
        assert!((guess - 37.3).abs() < 2.0, "{guess}");
    }

    #[test]
    fn test_fourier_rejects_flat_signals() {
        let err = find_period_fourier(&[3.0; 64]).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::InvalidArgument { .. }));
        assert!(find_period_fourier(&[1.0]).is_err());
        assert!(find_period_fourier(&[1.0, f64::NAN, 0.0]).is_err());
    }

    #[test]
    fn test_find_period() {
        let d = sine(1024, 32.0, 5.0);
        let fit = find_period(&d).unwrap();
        assert!((fit.period - 32.0).abs() < 0.5, "{fit:?}");
        assert!(fit.phase.is_finite());
        assert!(fit.chisq < 1e-3, "{fit:?}");

        let d = sine(1024, 25.6, 0.0);
        let fit = find_period(&d).unwrap();
        assert!((fit.period - 25.6).abs() < 0.5, "{fit:?}");
        assert!(fit.chisq < 1e-2, "{fit:?}");
    }

    #[test]
    fn test_find_period_exact_rejects_bad_guess() {
        let d = sine(100, 10.0, 0.0);
        assert!(find_period_exact(&d, 0.0).is_err());
        assert!(find_period_exact(&d, f64::NAN).is_err());
        assert!(find_period_exact(&d, 101.0).is_err());
    }

    #[test]
    fn test_interpolate() {
        let d = [0.0, 10.0, 20.0];
        assert_eq!(interpolate(&d, 0.5), 5.0);
        assert_eq!(interpolate(&d, 2.0), 20.0);
        assert_eq!(interpolate(&d, 7.0), 20.0);
        assert_eq!(interpolate(&d, -1.0), 0.0);
    }

    #[test]
    fn test_nelder_mead_quadratic() {
        let f = |x: [f64; 2]| (x[0] - 3.0).powi(2) + 2.0 * (x[1] + 1.0).powi(2);
        let [x, y] = nelder_mead(f, [0.0, 0.0], 1.0);
        assert!((x - 3.0).abs() < 1e-2 && (y + 1.0).abs() < 1e-2, "{x} {y}");
    }
}
