//! Common.

use crate::pbrt::*;

/// Shortest wavelength in nm handled by spectral rendering.
pub const LAMBDA_MIN: Float = 360.0;

/// Longest wavelength in nm handled by spectral rendering.
pub const LAMBDA_MAX: Float = 830.0;

/// Colour representation the renderer was built for.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum SpectrumVariant {
    /// Single luminance channel.
    Mono,

    /// Three RGB channels.
    Rgb,

    /// Stochastically sampled wavelengths.
    #[default]
    Spectral,
}

impl SpectrumVariant {
    /// Returns true if samples carry wavelengths.
    pub fn is_spectral(&self) -> bool {
        matches!(self, Self::Spectral)
    }
}

impl std::str::FromStr for SpectrumVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mono" => Ok(Self::Mono),
            "rgb" => Ok(Self::Rgb),
            "spectral" => Ok(Self::Spectral),
            v => Err(format!("unknown spectrum variant '{v}'")),
        }
    }
}

/// Whether a spectrum has a continuous density or is a weighted set of
/// lines.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SpectrumCapability {
    /// Energy is spread over a wavelength range.
    Continuous,

    /// Energy exists only at a finite set of wavelengths.
    Discrete,
}

/// Where a spectrum is evaluated.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct SpectralQuery {
    /// The wavelength in nm.
    pub lambda: Float,
}

impl SpectralQuery {
    /// Create a new `SpectralQuery`.
    ///
    /// * `lambda` - The wavelength in nm.
    pub fn new(lambda: Float) -> Self {
        Self { lambda }
    }
}

/// Stores a spectrum sample value at a given wavelenght.
#[derive(Copy, Clone, Default, Debug, PartialEq, PartialOrd)]
pub struct Sample {
    /// The wavelength.
    pub lambda: Float,

    /// The sample value.
    pub value: Float,
}

impl Sample {
    /// Create a new `Sample`.
    ///
    /// * `lambda` - The wavelength.
    /// * `value`  - The sample value.
    pub fn new(lambda: Float, value: Float) -> Self {
        Self { lambda, value }
    }
}

/// Determines if given wavelengths are sorted in ascending order.
///
/// * `lambda` - Wavelengths.
pub fn are_wavelengths_sorted(lambda: &[Float]) -> bool {
    lambda.windows(2).all(|w| w[0] <= w[1])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variant_from_str() {
        assert_eq!("rgb".parse::<SpectrumVariant>(), Ok(SpectrumVariant::Rgb));
        assert_eq!("mono".parse::<SpectrumVariant>(), Ok(SpectrumVariant::Mono));
        assert!("spectral".parse::<SpectrumVariant>().unwrap().is_spectral());
        assert!("hsv".parse::<SpectrumVariant>().is_err());
    }

    #[test]
    fn sorted_wavelengths() {
        assert!(are_wavelengths_sorted(&[]));
        assert!(are_wavelengths_sorted(&[400.0]));
        assert!(are_wavelengths_sorted(&[400.0, 400.0, 500.0]));
        assert!(!are_wavelengths_sorted(&[500.0, 400.0]));
    }
}
