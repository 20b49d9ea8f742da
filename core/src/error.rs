//! Errors

use thiserror::Error;

/// Errors raised while building, editing or querying spectra.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SpectrumError {
    /// A configuration token is not a valid floating point value. An empty
    /// `token` means the required field was missing altogether.
    #[error("while parsing {field}: could not parse floating point value '{token}'")]
    ParseError { field: String, token: String },

    /// Wavelength and weight arrays differ in length.
    #[error("'weights' and 'wavelengths' arrays must have the same size ({weights} != {wavelengths})")]
    SizeMismatch { wavelengths: usize, weights: usize },

    /// The weights cannot be normalized.
    #[error("degenerate distribution: {0}")]
    DegenerateDistribution(String),

    /// The spectrum was edited and not refreshed before use.
    #[error("{0}: edited without a refresh")]
    Stale(&'static str),

    /// The operation is structurally meaningless for the spectrum.
    #[error("{operation}: not implemented ({reason})")]
    NotSupported {
        operation: &'static str,
        reason: &'static str,
    },
}

impl SpectrumError {
    /// Returns a `ParseError` for the given field and token.
    ///
    /// * `field` - Name of the parameter being parsed.
    /// * `token` - The offending token.
    pub fn parse(field: &str, token: &str) -> Self {
        Self::ParseError {
            field: field.to_string(),
            token: token.to_string(),
        }
    }

    /// Returns a `NotSupported` error.
    ///
    /// * `operation` - Name of the operation.
    /// * `reason`    - Why the operation does not apply.
    pub fn not_supported(operation: &'static str, reason: &'static str) -> Self {
        Self::NotSupported { operation, reason }
    }

    /// Returns true for capability mismatches as opposed to bad input.
    pub fn is_not_supported(&self) -> bool {
        matches!(self, Self::NotSupported { .. })
    }
}

/// Result type used throughout the spectrum code.
pub type Result<T> = std::result::Result<T, SpectrumError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_error_names_field_and_token() {
        let msg = SpectrumError::parse("weights", "abc").to_string();
        assert!(msg.contains("weights"));
        assert!(msg.contains("'abc'"));
    }

    #[test]
    fn not_supported_is_detectable() {
        let e = SpectrumError::not_supported("mean", "point set");
        assert!(e.is_not_supported());
        assert!(e.to_string().contains("not implemented"));
        assert!(!SpectrumError::DegenerateDistribution(String::new()).is_not_supported());
        assert!(!SpectrumError::Stale("sample").is_not_supported());
    }
}
