//! Parameter Traversal

use crate::error::*;
use crate::pbrt::Float;
use crate::spectrum::SpectralTexture;
use std::collections::HashMap;

bitflags! {
    /// Stores combination of flags describing an exposed parameter.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
    pub struct ParamFlags: u8 {
        /// Gradients are never tracked for the parameter.
        const NON_DIFFERENTIABLE = 1;

        /// The parameter cannot be written.
        const READ_ONLY = 2;
    }
}

/// Receives the parameters a spectrum exposes to external tools.
pub trait TraversalCallback {
    /// Record a parameter.
    ///
    /// * `name`   - Parameter name.
    /// * `values` - Current values.
    /// * `flags`  - Parameter flags.
    fn put_parameter(&mut self, name: &str, values: &[Float], flags: ParamFlags);
}

/// A parameter captured by `SceneParameters`.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneParameter {
    /// The values.
    pub values: Vec<Float>,

    /// The flags.
    pub flags: ParamFlags,
}

/// Editable view of the parameters exposed by a spectrum.
///
/// Values are copied out on creation. Edits are staged with `set()` and
/// written back by `update()`, which also asks the spectrum to revalidate.
#[derive(Clone, Debug, Default)]
pub struct SceneParameters {
    /// Parameters by name.
    params: HashMap<String, SceneParameter>,

    /// Names of parameters edited since the last update, in edit order.
    dirty: Vec<String>,
}

impl TraversalCallback for SceneParameters {
    fn put_parameter(&mut self, name: &str, values: &[Float], flags: ParamFlags) {
        self.params.insert(
            name.to_string(),
            SceneParameter {
                values: values.to_vec(),
                flags,
            },
        );
    }
}

impl SceneParameters {
    /// Collects the parameters exposed by `texture`.
    ///
    /// * `texture` - The spectrum.
    pub fn collect(texture: &dyn SpectralTexture) -> Self {
        let mut params = Self::default();
        texture.traverse(&mut params);
        params
    }

    /// Returns the parameter names in sorted order.
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.params.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    /// Returns the values of a parameter.
    ///
    /// * `name` - Parameter name.
    pub fn get(&self, name: &str) -> Option<&[Float]> {
        self.params.get(name).map(|p| p.values.as_slice())
    }

    /// Returns the flags of a parameter.
    ///
    /// * `name` - Parameter name.
    pub fn flags(&self, name: &str) -> Option<ParamFlags> {
        self.params.get(name).map(|p| p.flags)
    }

    /// Returns true if there are staged edits.
    pub fn is_dirty(&self) -> bool {
        !self.dirty.is_empty()
    }

    /// Stages new values for a parameter.
    ///
    /// * `name`   - Parameter name.
    /// * `values` - New values.
    pub fn set(&mut self, name: &str, values: Vec<Float>) -> Result<()> {
        let param = self.params.get_mut(name).ok_or_else(|| {
            SpectrumError::not_supported("set", "the spectrum does not expose this parameter")
        })?;
        if param.flags.contains(ParamFlags::READ_ONLY) {
            return Err(SpectrumError::not_supported("set", "the parameter is read-only"));
        }
        param.values = values;
        if !self.dirty.iter().any(|k| k == name) {
            self.dirty.push(name.to_string());
        }
        Ok(())
    }

    /// Writes staged edits into `texture` and lets it revalidate. The staged
    /// edits are consumed even if the spectrum rejects them.
    ///
    /// * `texture` - The spectrum the parameters were collected from.
    pub fn update(&mut self, texture: &mut dyn SpectralTexture) -> Result<()> {
        let keys = std::mem::take(&mut self.dirty);
        if keys.is_empty() {
            return Ok(());
        }
        for key in keys.iter() {
            let values = &self.params[key].values;
            texture.set_parameter(key, values)?;
        }
        debug!("Updating parameters {:?}.", keys);
        texture.parameters_changed(&keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spectrum::*;

    /// Spectrum with one editable and one read-only parameter.
    #[derive(Default)]
    struct Probe {
        gain: Vec<Float>,
        changed: Vec<String>,
    }

    impl SpectralTexture for Probe {
        fn capability(&self) -> SpectrumCapability {
            SpectrumCapability::Continuous
        }
        fn eval(&self, _q: &SpectralQuery) -> Float {
            self.gain[0]
        }
        fn pdf(&self, _q: &SpectralQuery) -> Float {
            0.0
        }
        fn sample(&self, _q: &SpectralQuery, u: Float) -> Result<Sample> {
            Ok(Sample::new(u, self.gain[0]))
        }
        fn mean(&self) -> Result<Float> {
            Ok(self.gain[0])
        }
        fn eval_1(&self, _q: &SpectralQuery) -> Result<Float> {
            Ok(self.gain[0])
        }
        fn eval_3(&self, _q: &SpectralQuery) -> Result<[Float; 3]> {
            Ok([self.gain[0]; 3])
        }
        fn traverse(&self, callback: &mut dyn TraversalCallback) {
            callback.put_parameter("gain", &self.gain, ParamFlags::NON_DIFFERENTIABLE);
            callback.put_parameter("id", &[7.0], ParamFlags::READ_ONLY);
        }
        fn set_parameter(&mut self, name: &str, values: &[Float]) -> Result<()> {
            assert_eq!(name, "gain");
            self.gain = values.to_vec();
            Ok(())
        }
        fn parameters_changed(&mut self, keys: &[String]) -> Result<()> {
            self.changed = keys.to_vec();
            Ok(())
        }
    }

    #[test]
    fn collect_and_update() {
        let mut probe = Probe {
            gain: vec![1.0],
            ..Default::default()
        };
        let mut params = SceneParameters::collect(&probe);
        assert_eq!(params.keys(), vec!["gain", "id"]);
        assert_eq!(params.get("gain"), Some(&[1.0][..]));
        assert_eq!(params.flags("gain"), Some(ParamFlags::NON_DIFFERENTIABLE));

        params.set("gain", vec![2.0]).unwrap();
        params.set("gain", vec![3.0]).unwrap();
        assert!(params.is_dirty());
        params.update(&mut probe).unwrap();
        assert!(!params.is_dirty());
        assert_eq!(probe.gain, vec![3.0]);
        assert_eq!(probe.changed, vec!["gain".to_string()]);
    }

    #[test]
    fn rejects_unknown_and_read_only() {
        let probe = Probe {
            gain: vec![1.0],
            ..Default::default()
        };
        let mut params = SceneParameters::collect(&probe);
        assert!(params.set("id", vec![1.0]).unwrap_err().is_not_supported());
        assert!(params.set("missing", vec![1.0]).unwrap_err().is_not_supported());
        assert!(!params.is_dirty());
    }

    #[test]
    fn update_without_edits_is_noop() {
        let mut probe = Probe {
            gain: vec![1.0],
            ..Default::default()
        };
        let mut params = SceneParameters::collect(&probe);
        params.update(&mut probe).unwrap();
        assert!(probe.changed.is_empty());
    }
}
