//! Spectra

use pbrt_core::error::*;
use pbrt_core::paramset::ParamSet;
use pbrt_core::spectrum::*;
use std::sync::Arc;

#[macro_use]
extern crate log;

mod line;
mod uniform;

// Re-export
pub use line::*;
pub use uniform::*;

/// Creates a spectrum plugin from its type name and parameters.
///
/// * `name`    - Plugin type name (`discrete`, `line` or `uniform`).
/// * `params`  - The parameters.
/// * `variant` - Colour representation the renderer was built for.
pub fn create_spectrum(
    name: &str,
    params: &ParamSet,
    variant: SpectrumVariant,
) -> Result<ArcSpectralTexture> {
    match name {
        "discrete" | "line" => Ok(Arc::new(LineSpectrum::from_params(params, variant)?)),
        "uniform" => Ok(Arc::new(UniformSpectrum::from_params(params, variant)?)),
        n => {
            warn!("Spectrum '{}' unknown.", n);
            Err(SpectrumError::not_supported(
                "create_spectrum",
                "unknown spectrum type",
            ))
        }
    }
}
