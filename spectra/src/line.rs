//! Line Spectrum

use pbrt_core::error::*;
use pbrt_core::lanes::*;
use pbrt_core::paramset::*;
use pbrt_core::pbrt::*;
use pbrt_core::sampling::*;
use pbrt_core::spectrum::*;
use itertools::Itertools;
use std::fmt;

/// Implements a spectrum whose energy exists only at a finite set of
/// wavelengths, each carrying its own weight.
///
/// Evaluating the spectrum or its density at any wavelength yields zero since
/// the lines have no extent. Wavelengths are obtained by sampling a line with
/// probability proportional to its weight.
#[derive(Clone, Debug)]
pub struct LineSpectrum {
    /// Wavelengths in nm, one per line.
    wavelengths: Vec<Float>,

    /// Distribution over the lines built from their weights.
    distr: DiscreteDistribution,

    /// Colour representation the renderer was built for.
    variant: SpectrumVariant,

    /// True when the wavelengths were edited since the last refresh.
    stale: bool,
}

impl LineSpectrum {
    /// Create a new `LineSpectrum`.
    ///
    /// * `wavelengths` - Wavelengths in nm.
    /// * `weights`     - Weight per wavelength. Defaults to 1 for every line.
    /// * `variant`     - Colour representation the renderer was built for.
    pub fn new(
        wavelengths: Vec<Float>,
        weights: Option<Vec<Float>>,
        variant: SpectrumVariant,
    ) -> Result<Self> {
        if wavelengths.is_empty() {
            return Err(SpectrumError::DegenerateDistribution(
                "no wavelengths given".to_string(),
            ));
        }

        let weights = match weights {
            Some(w) if w.len() != wavelengths.len() => {
                return Err(SpectrumError::SizeMismatch {
                    wavelengths: wavelengths.len(),
                    weights: w.len(),
                })
            }
            Some(w) => w,
            None => vec![1.0; wavelengths.len()],
        };

        check_wavelengths(&wavelengths);
        let distr = DiscreteDistribution::new(weights)?;

        Ok(Self {
            wavelengths,
            distr,
            variant,
            stale: false,
        })
    }

    /// Create a `LineSpectrum` from the `wavelengths` (required) and
    /// `weights` (optional) parameters.
    ///
    /// * `params`  - The parameters.
    /// * `variant` - Colour representation the renderer was built for.
    pub fn from_params(params: &ParamSet, variant: SpectrumVariant) -> Result<Self> {
        let wavelengths = params
            .find_floats("wavelengths")?
            .ok_or_else(|| SpectrumError::parse("wavelengths", ""))?;
        let weights = params.find_floats("weights")?;
        Self::new(wavelengths, weights, variant)
    }

    /// Returns the wavelengths.
    pub fn wavelengths(&self) -> &[Float] {
        &self.wavelengths
    }

    /// Returns the distribution over the lines.
    pub fn distribution(&self) -> &DiscreteDistribution {
        &self.distr
    }

    /// Returns the colour representation.
    pub fn variant(&self) -> SpectrumVariant {
        self.variant
    }

    /// Returns true if either array was edited since the last refresh.
    pub fn is_stale(&self) -> bool {
        self.stale || self.distr.is_stale()
    }

    /// Returns the wavelengths for editing. Call
    /// `refresh_after_external_edit()` before sampling again.
    pub fn wavelengths_mut(&mut self) -> &mut Vec<Float> {
        self.stale = true;
        &mut self.wavelengths
    }

    /// Returns the unnormalized weights for editing. Call
    /// `refresh_after_external_edit()` before sampling again.
    pub fn weights_mut(&mut self) -> &mut Vec<Float> {
        self.distr.weights_mut()
    }

    /// Rebuilds the distribution after either array was edited and checks
    /// that both still have the same length. The spectrum stays stale on
    /// failure.
    ///
    /// The weights are validated before the lengths, so an edit that is both
    /// mismatched and all zero reports `DegenerateDistribution`.
    pub fn refresh_after_external_edit(&mut self) -> Result<()> {
        self.stale = true;
        self.distr.refresh()?;
        if self.distr.size() != self.wavelengths.len() {
            return Err(SpectrumError::SizeMismatch {
                wavelengths: self.wavelengths.len(),
                weights: self.distr.size(),
            });
        }
        check_wavelengths(&self.wavelengths);
        self.stale = false;
        Ok(())
    }

    /// Sample a wavelength for each lane of `u`. Returns the wavelengths and
    /// their weights, lane by lane identical to `sample()`.
    ///
    /// * `u` - The random samples in [0, 1).
    pub fn sample_lanes<L: FloatLanes>(&self, u: L) -> Result<(L, L)> {
        self.check_sampling()?;
        let (indices, weights) = self.distr.sample_lanes(u);
        Ok((gather(&self.wavelengths, indices), weights))
    }

    /// Fails if a wavelength cannot be sampled in the current variant or if
    /// the arrays were edited without `refresh_after_external_edit()`.
    fn check_sampling(&self) -> Result<()> {
        if !self.variant.is_spectral() {
            return Err(SpectrumError::not_supported(
                "sample",
                "only spectral variants can carry a sampled wavelength",
            ));
        }
        if self.is_stale() {
            return Err(SpectrumError::Stale("sample"));
        }
        Ok(())
    }
}

impl SpectralTexture for LineSpectrum {
    /// Returns `SpectrumCapability::Discrete`.
    fn capability(&self) -> SpectrumCapability {
        SpectrumCapability::Discrete
    }

    /// Always 0; the lines have no extent.
    ///
    /// * `_q` - The query.
    fn eval(&self, _q: &SpectralQuery) -> Float {
        0.0
    }

    /// Always 0; there is no continuous density.
    ///
    /// * `_q` - The query.
    fn pdf(&self, _q: &SpectralQuery) -> Float {
        0.0
    }

    /// Selects a line with probability proportional to its weight and
    /// returns its wavelength along with the normalized weight.
    ///
    /// NOTE: The returned value is the selection probability itself rather
    /// than weight / probability.
    ///
    /// * `_q` - The query.
    /// * `u`  - The random sample in [0, 1).
    fn sample(&self, _q: &SpectralQuery, u: Float) -> Result<Sample> {
        self.check_sampling()?;
        let (index, pmf) = self.distr.sample(u);
        Ok(Sample::new(self.wavelengths[index], pmf))
    }

    fn sample_batch(&self, _q: &SpectralQuery, u: &[Float]) -> Result<Vec<Sample>> {
        self.check_sampling()?;
        Ok(self
            .distr
            .sample_batch(u)
            .into_iter()
            .map(|(index, pmf)| Sample::new(self.wavelengths[index], pmf))
            .collect())
    }

    fn mean(&self) -> Result<Float> {
        self.distr.mean()
    }

    fn eval_1(&self, _q: &SpectralQuery) -> Result<Float> {
        Err(SpectrumError::not_supported(
            "eval_1",
            "a line spectrum has no monochromatic value",
        ))
    }

    fn eval_3(&self, _q: &SpectralQuery) -> Result<[Float; 3]> {
        Err(SpectrumError::not_supported(
            "eval_3",
            "a line spectrum has no RGB value",
        ))
    }

    fn traverse(&self, callback: &mut dyn TraversalCallback) {
        callback.put_parameter(
            "wavelengths",
            &self.wavelengths,
            ParamFlags::NON_DIFFERENTIABLE,
        );
        callback.put_parameter(
            "weights",
            self.distr.weights(),
            ParamFlags::NON_DIFFERENTIABLE,
        );
    }

    fn set_parameter(&mut self, name: &str, values: &[Float]) -> Result<()> {
        match name {
            "wavelengths" => *self.wavelengths_mut() = values.to_vec(),
            "weights" => *self.weights_mut() = values.to_vec(),
            _ => {
                return Err(SpectrumError::not_supported(
                    "set_parameter",
                    "line spectra only expose 'wavelengths' and 'weights'",
                ))
            }
        }
        Ok(())
    }

    fn parameters_changed(&mut self, _keys: &[String]) -> Result<()> {
        self.refresh_after_external_edit()
    }
}

impl fmt::Display for LineSpectrum {
    /// Formats the value using the given formatter.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "LineSpectrum[")?;
        writeln!(
            f,
            "  wavelengths = [{}],",
            self.wavelengths.iter().join(", ")
        )?;
        writeln!(
            f,
            "  distr = {},",
            self.distr.to_string().replace('\n', "\n  ")
        )?;
        write!(f, "]")
    }
}

/// Warns about wavelengths that are valid but probably a mistake.
///
/// * `wavelengths` - Wavelengths in nm.
fn check_wavelengths(wavelengths: &[Float]) {
    if wavelengths.iter().any(|&l| l <= 0.0) {
        warn!("Line spectrum has non-positive wavelengths {:?}.", wavelengths);
    }
    if !are_wavelengths_sorted(wavelengths) {
        debug!("Line spectrum wavelengths are not sorted.");
    }
}
