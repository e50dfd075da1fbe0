//! Angle units and physical constants (SI).

use std::f64::consts::PI;

pub const DEGREE: f64 = PI / 180.0;
pub const ARCMIN: f64 = DEGREE / 60.0;
pub const ARCSEC: f64 = ARCMIN / 60.0;

/// Gaussian sigma per unit full width at half maximum, `1 / sqrt(8 ln 2)`.
pub const FWHM: f64 = 0.424_660_900_144_009_5;

/// CMB monopole temperature in kelvin.
pub const T_CMB: f64 = 2.73;
/// Speed of light, m/s.
pub const C: f64 = 299_792_458.0;
/// Planck constant, J s.
pub const H: f64 = 6.626_069_57e-34;
/// Boltzmann constant, J/K.
pub const K: f64 = 1.380_648_8e-23;
