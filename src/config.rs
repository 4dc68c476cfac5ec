//! Engine configuration.
//!
//! The defaults reproduce the plain pipeline: no text normalization,
//! sequential counting for anything below a mebibyte, and a decode
//! pass to confirm every report round-trips.

use std::env;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::huffman::text::TextOptions;

/// Default text size, in bytes, from which frequency counting runs in parallel
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 1 << 20;

/// Prefix shared by every environment variable read in [`Config::from_env`]
pub const ENV_PREFIX: &str = "HUFFTEXT_";

/// Settings for [`build_report_with`](crate::huffman::report::build_report_with)
/// and [`build_frequencies_with`](crate::huffman::frequency::build_frequencies_with).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Normalization applied to the text before it is modelled
    pub text: TextOptions,
    /// Minimum text length, in UTF-8 bytes, for parallel frequency counting
    pub parallel_threshold: usize,
    /// Decode the encoded text and compare it with the input
    pub verify_round_trip: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            text: TextOptions::default(),
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
            verify_round_trip: true,
        }
    }
}

impl Config {
    /// Replaces the text normalization options
    pub fn with_text_options(mut self, text: TextOptions) -> Self {
        self.text = text;
        self
    }

    /// Sets the text size at which counting switches to rayon
    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    /// Enables or disables the decode check in reports
    pub fn with_round_trip_check(mut self, verify: bool) -> Self {
        self.verify_round_trip = verify;
        self
    }

    /// Checks that the configuration is usable
    pub fn validate(&self) -> Result<()> {
        if self.parallel_threshold == 0 {
            return Err(Error::InvalidInput(
                "parallel threshold must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Builds a configuration from `HUFFTEXT_*` environment variables,
    /// falling back to the defaults for anything unset.
    ///
    /// Recognised variables are `HUFFTEXT_LOWERCASE`, `HUFFTEXT_STRIP_NEWLINES`,
    /// `HUFFTEXT_PARALLEL_THRESHOLD` and `HUFFTEXT_VERIFY`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`Config::from_env`] but reads values through `lookup`,
    /// which receives the full variable name.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();
        let var = |name: &str| lookup(&format!("{ENV_PREFIX}{name}"));

        let config = Config {
            text: TextOptions {
                lowercase: parse_bool(var("LOWERCASE"), defaults.text.lowercase)?,
                strip_newlines: parse_bool(var("STRIP_NEWLINES"), defaults.text.strip_newlines)?,
            },
            parallel_threshold: parse_value(
                var("PARALLEL_THRESHOLD"),
                defaults.parallel_threshold,
            )?,
            verify_round_trip: parse_bool(var("VERIFY"), defaults.verify_round_trip)?,
        };
        config.validate()?;
        Ok(config)
    }
}

fn parse_value<T: FromStr>(raw: Option<String>, default: T) -> Result<T> {
    match raw {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| Error::InvalidInput(format!("cannot parse {raw:?}"))),
    }
}

fn parse_bool(raw: Option<String>, default: bool) -> Result<bool> {
    match raw.as_deref().map(str::trim) {
        None => Ok(default),
        Some("1") | Some("true") | Some("yes") | Some("on") => Ok(true),
        Some("0") | Some("false") | Some("no") | Some("off") => Ok(false),
        Some(other) => Err(Error::InvalidInput(format!(
            "expected a boolean, got {other:?}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert!(!config.text.lowercase);
        assert!(!config.text.strip_newlines);
        assert!(config.verify_round_trip);
    }

    #[test]
    fn test_zero_threshold_rejected() {
        let config = Config::default().with_parallel_threshold(0);
        assert!(matches!(config.validate(), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_from_lookup_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("HUFFTEXT_LOWERCASE", "true"),
            ("HUFFTEXT_STRIP_NEWLINES", "1"),
            ("HUFFTEXT_PARALLEL_THRESHOLD", "4096"),
            ("HUFFTEXT_VERIFY", "off"),
        ]))
        .unwrap();
        assert!(config.text.lowercase);
        assert!(config.text.strip_newlines);
        assert_eq!(config.parallel_threshold, 4096);
        assert!(!config.verify_round_trip);
    }

    #[test]
    fn test_from_lookup_empty_uses_defaults() {
        let config = Config::from_lookup(|_| None).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_from_env() {
        // The only test that touches HUFFTEXT_* variables.
        let vars = [
            ("HUFFTEXT_LOWERCASE", "yes"),
            ("HUFFTEXT_STRIP_NEWLINES", "0"),
            ("HUFFTEXT_PARALLEL_THRESHOLD", "512"),
            ("HUFFTEXT_VERIFY", "false"),
        ];
        for (key, value) in vars {
            env::set_var(key, value);
        }
        let config = Config::from_env();
        for (key, _) in vars {
            env::remove_var(key);
        }

        let config = config.unwrap();
        assert_eq!(config, Config::from_lookup(lookup_from(&vars)).unwrap());
        assert!(config.text.lowercase);
        assert!(!config.text.strip_newlines);
        assert_eq!(config.parallel_threshold, 512);
        assert!(!config.verify_round_trip);
    }

    #[test]
    fn test_from_lookup_bad_values() {
        let bad_bool = Config::from_lookup(lookup_from(&[("HUFFTEXT_VERIFY", "maybe")]));
        assert!(matches!(bad_bool, Err(Error::InvalidInput(_))));

        let bad_number =
            Config::from_lookup(lookup_from(&[("HUFFTEXT_PARALLEL_THRESHOLD", "lots")]));
        assert!(matches!(bad_number, Err(Error::InvalidInput(_))));

        let zero = Config::from_lookup(lookup_from(&[("HUFFTEXT_PARALLEL_THRESHOLD", "0")]));
        assert!(matches!(zero, Err(Error::InvalidInput(_))));
    }
}
