//! Uniform Spectrum

use pbrt_core::error::*;
use pbrt_core::paramset::*;
use pbrt_core::pbrt::*;
use pbrt_core::spectrum::*;
use itertools::Itertools;
use std::fmt;

/// Implements a spectrum with the same value at every wavelength in
/// [`LAMBDA_MIN`, `LAMBDA_MAX`] and zero outside.
#[derive(Clone, Debug)]
pub struct UniformSpectrum {
    /// The spectral value.
    value: Float,

    /// Colour representation the renderer was built for.
    variant: SpectrumVariant,
}

impl UniformSpectrum {
    /// Create a new `UniformSpectrum`.
    ///
    /// * `value`   - The spectral value.
    /// * `variant` - Colour representation the renderer was built for.
    pub fn new(value: Float, variant: SpectrumVariant) -> Self {
        Self { value, variant }
    }

    /// Create a `UniformSpectrum` from the optional `value` parameter
    /// (default 1).
    ///
    /// * `params`  - The parameters.
    /// * `variant` - Colour representation the renderer was built for.
    pub fn from_params(params: &ParamSet, variant: SpectrumVariant) -> Result<Self> {
        let value = match params.find_floats("value")? {
            Some(v) if v.len() == 1 => v[0],
            Some(v) => return Err(SpectrumError::parse("value", &v.iter().join(" "))),
            None => 1.0,
        };
        Ok(Self::new(value, variant))
    }

    /// Returns true if `lambda` lies in the supported wavelength range.
    ///
    /// * `lambda` - Wavelength in nm.
    fn in_range(lambda: Float) -> bool {
        (LAMBDA_MIN..=LAMBDA_MAX).contains(&lambda)
    }
}

impl SpectralTexture for UniformSpectrum {
    fn capability(&self) -> SpectrumCapability {
        SpectrumCapability::Continuous
    }

    fn eval(&self, q: &SpectralQuery) -> Float {
        if Self::in_range(q.lambda) {
            self.value
        } else {
            0.0
        }
    }

    fn pdf(&self, q: &SpectralQuery) -> Float {
        if Self::in_range(q.lambda) {
            1.0 / (LAMBDA_MAX - LAMBDA_MIN)
        } else {
            0.0
        }
    }

    /// Samples a wavelength uniformly in range. The returned value is the
    /// spectral value divided by the sampling density.
    ///
    /// * `_q` - The query.
    /// * `u`  - The random sample in [0, 1).
    fn sample(&self, _q: &SpectralQuery, u: Float) -> Result<Sample> {
        if !self.variant.is_spectral() {
            return Err(SpectrumError::not_supported(
                "sample",
                "only spectral variants can carry a sampled wavelength",
            ));
        }
        Ok(Sample::new(
            lerp(u, LAMBDA_MIN, LAMBDA_MAX),
            self.value * (LAMBDA_MAX - LAMBDA_MIN),
        ))
    }

    fn mean(&self) -> Result<Float> {
        Ok(self.value)
    }

    fn eval_1(&self, _q: &SpectralQuery) -> Result<Float> {
        Ok(self.value)
    }

    fn eval_3(&self, _q: &SpectralQuery) -> Result<[Float; 3]> {
        Ok([self.value; 3])
    }

    fn traverse(&self, callback: &mut dyn TraversalCallback) {
        callback.put_parameter("value", &[self.value], ParamFlags::empty());
    }

    fn set_parameter(&mut self, name: &str, values: &[Float]) -> Result<()> {
        match (name, values) {
            ("value", &[v]) => {
                self.value = v;
                Ok(())
            }
            ("value", v) => Err(SpectrumError::parse("value", &v.iter().join(" "))),
            _ => Err(SpectrumError::not_supported(
                "set_parameter",
                "uniform spectra only expose 'value'",
            )),
        }
    }
}

impl fmt::Display for UniformSpectrum {
    /// Formats the value using the given formatter.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UniformSpectrum[value={}]", self.value)
    }
}
