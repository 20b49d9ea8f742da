#[macro_use]
extern crate log;

use clap::Parser;
use pbrt_core::error::Result;
use pbrt_core::parallel::par_map_ordered;
use pbrt_core::paramset::ParamSet;
use pbrt_core::pbrt::Float;
use pbrt_core::rng::RNG;
use pbrt_core::spectrum::*;
use itertools::Itertools;
use spectra::create_spectrum;
use std::process::ExitCode;

/// Number of random samples handed to a worker thread at a time.
const CHUNK_SIZE: usize = 4096;

/// Command line options.
#[derive(Parser, Clone)]
#[clap(author, version, about = "Sample wavelengths from a spectrum.", long_about = None)]
struct Options {
    /// Spectrum plugin type.
    #[clap(
        long = "type",
        value_name = "NAME",
        default_value = "discrete",
        help = "Spectrum type (discrete, line or uniform)."
    )]
    spectrum: String,

    /// Wavelengths list.
    #[clap(
        long,
        short = 'l',
        value_name = "LIST",
        help = "Whitespace or comma separated wavelengths in nm."
    )]
    wavelengths: Option<String>,

    /// Weights list.
    #[clap(
        long,
        short = 'w',
        value_name = "LIST",
        help = "Whitespace or comma separated weights, one per wavelength."
    )]
    weights: Option<String>,

    /// Value of a uniform spectrum.
    #[clap(long, value_name = "FLOAT", help = "Value of a uniform spectrum.")]
    value: Option<Float>,

    /// Number of samples to draw.
    #[clap(
        long,
        short = 'n',
        value_name = "NUM",
        default_value_t = 16,
        help = "Number of wavelengths to sample."
    )]
    samples: usize,

    /// Random number generator seed.
    #[clap(long, short = 's', value_name = "NUM", default_value_t = 0)]
    seed: u64,

    /// Number of threads to use for sampling.
    #[clap(
        long = "nthreads",
        short = 't',
        value_name = "NUM",
        default_value_t = 1,
        help = "Use specified number of threads for sampling."
    )]
    n_threads: usize,

    /// Colour representation.
    #[clap(long, value_name = "VARIANT", default_value = "spectral")]
    variant: SpectrumVariant,

    /// Suppress the per-sample output.
    #[clap(long, help = "Only print the summary.")]
    quiet: bool,
}

impl Options {
    /// Returns the spectrum parameters given on the command line.
    fn params(&self) -> ParamSet {
        let mut params = ParamSet::new();
        if let Some(wavelengths) = &self.wavelengths {
            params.add_string("wavelengths", &[wavelengths.clone()]);
        }
        if let Some(weights) = &self.weights {
            params.add_string("weights", &[weights.clone()]);
        }
        if let Some(value) = self.value {
            params.add_float("value", &[value]);
        }
        params
    }
}

fn main() -> ExitCode {
    // Initialize `env_logger`.
    env_logger::init();

    let options = Options::parse();
    match run(&options) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(options: &Options) -> Result<()> {
    let params = options.params();
    debug!("Spectrum '{}' parameters:\n{}", options.spectrum, params);

    let spectrum = create_spectrum(&options.spectrum, &params, options.variant)?;

    let mut rng = RNG::new(options.seed);
    let u = rng.uniform_floats(options.samples);

    let q = SpectralQuery::default();
    let samples = par_map_ordered(&u, options.n_threads, CHUNK_SIZE, |chunk| {
        chunk
            .iter()
            .map(|&u| spectrum.sample(&q, u))
            .collect::<Vec<_>>()
    })
    .into_iter()
    .collect::<Result<Vec<Sample>>>()?;
    info!("Drew {} samples on {} threads.", samples.len(), options.n_threads);

    if !options.quiet {
        for s in samples.iter() {
            println!("{} {}", s.lambda, s.value);
        }
    }

    if spectrum.capability() == SpectrumCapability::Discrete {
        for (lambda, freq) in frequencies(&samples) {
            println!("# {lambda} nm: {freq:.4}");
        }
    }

    Ok(())
}

/// Returns the fraction of samples at each distinct wavelength, sorted by
/// wavelength.
///
/// * `samples` - The samples.
fn frequencies(samples: &[Sample]) -> Vec<(Float, Float)> {
    let n = samples.len() as Float;
    samples
        .iter()
        .map(|s| s.lambda.to_bits())
        .counts()
        .into_iter()
        .map(|(bits, count)| (Float::from_bits(bits), count as Float / n))
        .sorted_by(|a, b| a.0.total_cmp(&b.0))
        .collect()
}
