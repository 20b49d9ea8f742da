//! Parameter Sets

use crate::error::*;
use crate::pbrt::*;
use std::collections::HashMap;
use std::fmt;

mod paramset_item;
mod traverse;

// Re-export
pub use paramset_item::*;
pub use traverse::*;

/// A hashmap of parameter sets stored by name.
pub type ParamSetMap<T> = HashMap<String, ParamSetItem<T>>;

/// Stores parameter set items of different types in hashmaps.
#[derive(Clone, Default, Debug)]
pub struct ParamSet {
    pub floats: ParamSetMap<Float>,
    pub strings: ParamSetMap<String>,
}

/// Define a macro that can be used to generate a function for adding/replacing
/// parameter set item.
macro_rules! paramset_add {
    ($func: ident, $t: ty, $paramset: ident) => {
        pub fn $func(&mut self, name: &str, values: &[$t]) {
            self.$paramset
                .insert(name.to_string(), ParamSetItem::new(values.to_vec()));
        }
    };
}

/// Define a macro that can be used to generate a function for removing
/// parameter set item.
macro_rules! paramset_erase {
    ($func: ident, $paramset: ident) => {
        pub fn $func(&mut self, name: &str) -> bool {
            self.$paramset.remove(name).is_some()
        }
    };
}

/// Define a macro that can be used to generate a function for finding
/// parameter set item that is stored as a single item.
macro_rules! paramset_find_one {
    ($func: ident, $t: ty, $paramset: ident) => {
        pub fn $func(&self, name: &str) -> Option<$t> {
            match self.$paramset.get(name) {
                Some(param) if param.values.len() == 1 => Some(param.values[0].clone()),
                _ => None,
            }
        }
    };
}

/// Define a macro that can be used to print parameter set items.
macro_rules! display_param {
    ($params: expr, $param_type: literal, $formatter: expr) => {
        let mut names: Vec<&String> = $params.keys().collect();
        names.sort();
        for name in names {
            let param = &$params[name];
            write!($formatter, "\"{} {}\" [", $param_type, name)?;
            for (i, v) in param.values.iter().enumerate() {
                if i > 0 {
                    write!($formatter, " ")?;
                }
                write!($formatter, "{:?}", v)?;
            }
            writeln!($formatter, "]")?;
        }
    };
}

impl ParamSet {
    /// Returns a new `ParamSet`.
    pub fn new() -> Self {
        Self::default()
    }

    paramset_erase!(erase_float, floats);
    paramset_find_one!(find_one_float, Float, floats);
    paramset_add!(add_float, Float, floats);

    paramset_erase!(erase_string, strings);
    paramset_find_one!(find_one_string, String, strings);
    paramset_add!(add_string, String, strings);

    /// Returns a float list parameter.
    ///
    /// A string parameter holding a whitespace/comma separated list takes
    /// precedence over a float parameter of the same name. Returns `None` if
    /// neither exists.
    ///
    /// * `name` - Parameter name.
    pub fn find_floats(&self, name: &str) -> Result<Option<Vec<Float>>> {
        if let Some(text) = self.find_one_string(name) {
            return parse_float_list(name, &text).map(Some);
        }
        Ok(self.floats.get(name).map(|param| param.values.clone()))
    }

    /// Returns true if a parameter of any type exists with the given name.
    ///
    /// * `name` - Parameter name.
    pub fn has(&self, name: &str) -> bool {
        self.floats.contains_key(name) || self.strings.contains_key(name)
    }

    /// Clear all parameter set items.
    pub fn clear(&mut self) {
        self.floats.clear();
        self.strings.clear();
    }
}

impl fmt::Display for ParamSet {
    /// Formats the value using the given formatter.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        display_param!(self.floats, "float", f);
        display_param!(self.strings, "string", f);
        Ok(())
    }
}

/// Parses a whitespace/comma separated list of floating point values. Empty
/// tokens are skipped. Tokens that are not finite numbers are rejected.
///
/// * `field` - Parameter name used in error messages.
/// * `text`  - The list.
pub fn parse_float_list(field: &str, text: &str) -> Result<Vec<Float>> {
    text.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|token| !token.is_empty())
        .map(|token| match token.parse::<Float>() {
            Ok(v) if v.is_finite() => Ok(v),
            _ => Err(SpectrumError::parse(field, token)),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_commas_and_whitespace() {
        let v = parse_float_list("wavelengths", "300, 400,500  600").unwrap();
        assert_eq!(v, vec![300.0, 400.0, 500.0, 600.0]);

        let v = parse_float_list("weights", "1\t2,\n3\r\n4").unwrap();
        assert_eq!(v, vec![1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn parse_empty_list() {
        assert!(parse_float_list("weights", "").unwrap().is_empty());
        assert!(parse_float_list("weights", " , ").unwrap().is_empty());
    }

    #[test]
    fn parse_bad_token_names_field() {
        let err = parse_float_list("weights", "1, x2, 3").unwrap_err();
        assert_eq!(err, SpectrumError::parse("weights", "x2"));
    }

    #[test]
    fn parse_rejects_non_finite() {
        assert!(parse_float_list("weights", "1, nan").is_err());
        assert!(parse_float_list("weights", "inf").is_err());
    }

    #[test]
    fn find_floats_prefers_string_list() {
        let mut ps = ParamSet::new();
        assert_eq!(ps.find_floats("weights"), Ok(None));

        ps.add_float("weights", &[1.0, 2.0]);
        assert_eq!(ps.find_floats("weights"), Ok(Some(vec![1.0, 2.0])));

        ps.add_string("weights", &["3 4".to_string()]);
        assert_eq!(ps.find_floats("weights"), Ok(Some(vec![3.0, 4.0])));

        assert!(ps.erase_string("weights"));
        assert!(ps.has("weights"));
        ps.clear();
        assert!(!ps.has("weights"));
    }

    #[test]
    fn display_lists_params() {
        let mut ps = ParamSet::new();
        ps.add_string("wavelengths", &["400, 500".to_string()]);
        assert_eq!(ps.to_string(), "\"string wavelengths\" [\"400, 500\"]\n");
    }
}
