//! Tunable parameters for pattern matching, read from `parameters.toml`
//! next to the running executable.
// Warning groups (as of rust 1.55)
#![deny(
    future_incompatible,
    nonstandard_style,
    rust_2018_compatibility,
    rust_2021_compatibility,
    rust_2018_idioms,
    unused
)]

use anyhow::{ensure, Context, Result};
use log::warn;
use serde::Deserialize;
use std::path::Path;
use std::sync::OnceLock;

/// File name looked up beside the executable.
pub const PARAMETERS_FILE: &str = "parameters.toml";

/// Every key is optional in the file; missing keys keep their default.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Parameters {
    /// Modulus used by the Karp-Rabin fingerprint. Must be at least 1.
    /// The default is not prime; collisions are resolved by exact verification.
    pub modulus: u64,
    /// Largest number of bases accepted from a sequence or pattern file.
    pub max_sequence_len: usize,
}

/// Built-in values: modulus is i32::MAX, capacity is a 512000 byte
/// buffer less its terminator and truncation sentinel.
pub const DEFAULT_PARAMETERS: Parameters = Parameters {
    modulus: i32::MAX as u64,
    max_sequence_len: 511_998,
};

impl Default for Parameters {
    fn default() -> Self {
        DEFAULT_PARAMETERS
    }
}

impl Parameters {
    /// Parse and validate a TOML document.
    pub fn from_toml(s: &str) -> Result<Parameters> {
        let params: Parameters = toml::from_str(s)?;
        ensure!(
            params.modulus >= 1,
            "modulus must be at least 1, got {}",
            params.modulus
        );
        Ok(params)
    }

    /// Load parameters from `path`, or the defaults if it does not exist.
    pub fn load_or_default(path: &Path) -> Result<Parameters> {
        if !path.exists() {
            warn!(
                "could not find {PARAMETERS_FILE} at {}, falling back to defaults",
                path.display()
            );
            return Ok(DEFAULT_PARAMETERS);
        }
        let s = std::fs::read_to_string(path).with_context(|| path.display().to_string())?;
        Parameters::from_toml(&s).with_context(|| path.display().to_string())
    }
}

static PARAMETERS: OnceLock<Result<Parameters>> = OnceLock::new();

/// Return a reference to the global parameters.
/// The parameters may need to be loaded; if loading fails, return Err.
fn parameters() -> &'static Result<Parameters> {
    PARAMETERS.get_or_init(|| {
        let path = std::env::current_exe()
            .context("Unable to locate the running executable")?
            .with_file_name(PARAMETERS_FILE);
        Parameters::load_or_default(&path)
    })
}

macro_rules! parameter_getter {
    ($a:ident, $t:ty) => {
        /// Global value of this parameter, warning when it is not the default.
        pub fn $a() -> Result<&'static $t> {
            let val = match parameters() {
                Err(e) => return Err(anyhow::anyhow!("{e:#}")),
                Ok(p) => &p.$a,
            };
            if DEFAULT_PARAMETERS.$a != *val {
                warn!("using non-default {} = {:?}", stringify!($a), val);
            }
            Ok(val)
        }
    };
}

parameter_getter!(modulus, u64);
parameter_getter!(max_sequence_len, usize);
