//! Command line arguments.
//!
//! `tinyray [max_depth] [scene.json]`

use std::path::PathBuf;
use std::str::FromStr;

use tinyray_core::{parse_max_depth, SettingsError, DEFAULT_MAX_DEPTH};

pub const DEFAULT_SCENE: &str = "scene.json";
pub const SEED_VAR: &str = "TINYRAY_SEED";
pub const SAMPLES_VAR: &str = "TINYRAY_SAMPLES";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Args {
    pub max_depth: u32,
    pub scene: PathBuf,
}

impl Args {
    /// Parse the arguments after the program name.
    pub fn parse<I, S>(args: I) -> Result<Self, SettingsError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut args = args.into_iter();

        let max_depth = match args.next() {
            Some(arg) => parse_max_depth(arg.as_ref())?,
            None => DEFAULT_MAX_DEPTH,
        };
        let scene = args
            .next()
            .map(|arg| PathBuf::from(arg.as_ref()))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SCENE));

        Ok(Self { max_depth, scene })
    }
}

pub fn usage(program: &str) -> String {
    format!(
        "Usage: {} [max_recursion_depth (0-100, default {})] [scene.json]",
        program, DEFAULT_MAX_DEPTH
    )
}

/// Value of environment variable `name`, if set and parseable as `T`.
///
/// Values that don't parse, including integers out of `T`'s range, are
/// ignored with a warning.
pub fn env_var<T: FromStr>(name: &str) -> Option<T> {
    let value = std::env::var(name).ok()?;
    parse_env(name, &value)
}

fn parse_env<T: FromStr>(name: &str, value: &str) -> Option<T> {
    match value.trim().parse() {
        Ok(n) => Some(n),
        Err(_) => {
            log::warn!(
                "Ignoring {}='{}': expected {}",
                name,
                value,
                std::any::type_name::<T>()
            );
            None
        }
    }
}
