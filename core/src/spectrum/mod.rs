//! Spectrum

use crate::error::Result;
use crate::paramset::TraversalCallback;
use crate::pbrt::Float;
use std::sync::Arc;

mod common;

// Re-export
pub use common::*;

/// Interface shared by continuous and discrete spectral representations.
///
/// Queries take `&self` and may run concurrently from many workers. Edits go
/// through `set_parameter()` and `parameters_changed()` which need exclusive
/// access, so no query can overlap an edit.
pub trait SpectralTexture {
    /// Returns whether the spectrum has a continuous density or is a weighted
    /// set of lines.
    fn capability(&self) -> SpectrumCapability;

    /// Evaluate the spectral value at the queried wavelength.
    ///
    /// * `q` - The query.
    fn eval(&self, q: &SpectralQuery) -> Float;

    /// Returns the density for sampling the queried wavelength.
    ///
    /// * `q` - The query.
    fn pdf(&self, q: &SpectralQuery) -> Float;

    /// Sample a wavelength and its weight.
    ///
    /// * `q` - The query.
    /// * `u` - The random sample in [0, 1).
    fn sample(&self, q: &SpectralQuery, u: Float) -> Result<Sample>;

    /// Sample a batch of wavelengths. Results match calling `sample()` for
    /// each entry of `u` in order.
    ///
    /// * `q` - The query.
    /// * `u` - The random samples in [0, 1).
    fn sample_batch(&self, q: &SpectralQuery, u: &[Float]) -> Result<Vec<Sample>> {
        u.iter().map(|&u| self.sample(q, u)).collect()
    }

    /// Returns the mean value of the spectrum.
    fn mean(&self) -> Result<Float>;

    /// Evaluate the spectrum as a monochromatic value.
    ///
    /// * `q` - The query.
    fn eval_1(&self, q: &SpectralQuery) -> Result<Float>;

    /// Evaluate the spectrum as an RGB triple.
    ///
    /// * `q` - The query.
    fn eval_3(&self, q: &SpectralQuery) -> Result<[Float; 3]>;

    /// Expose editable parameters to `callback`.
    ///
    /// * `callback` - Receives each parameter.
    fn traverse(&self, _callback: &mut dyn TraversalCallback) {}

    /// Overwrite a parameter exposed by `traverse()`. The spectrum is not
    /// usable until `parameters_changed()` succeeds.
    ///
    /// * `name`   - Parameter name.
    /// * `values` - New values.
    fn set_parameter(&mut self, _name: &str, _values: &[Float]) -> Result<()> {
        Err(crate::error::SpectrumError::not_supported(
            "set_parameter",
            "the spectrum has no editable parameters",
        ))
    }

    /// Called after parameters were overwritten.
    ///
    /// * `keys` - Names of the edited parameters.
    fn parameters_changed(&mut self, _keys: &[String]) -> Result<()> {
        Ok(())
    }
}

/// Atomic reference counted `SpectralTexture`.
pub type ArcSpectralTexture = Arc<dyn SpectralTexture + Send + Sync>;
