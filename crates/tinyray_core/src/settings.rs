//! Render settings shared by the renderer and the command line.

use thiserror::Error;

/// Recursion depth used when none is given.
pub const DEFAULT_MAX_DEPTH: u32 = 4;

/// Largest accepted recursion depth; bounds the shading call stack.
pub const MAX_DEPTH_LIMIT: u32 = 100;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SettingsError {
    #[error("max depth must be an integer, got '{0}'")]
    InvalidDepth(String),

    #[error("max depth must be in [0, 100], got {0}")]
    DepthOutOfRange(i64),

    #[error("samples per pixel must be at least 1")]
    ZeroSamples,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderSettings {
    /// Maximum number of reflection/refraction bounces
    pub max_depth: u32,
    /// Depth-of-field rays averaged per pixel (pinhole cameras trace one)
    pub samples_per_pixel: u32,
    /// Seed for depth-of-field lens sampling
    pub seed: u64,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            samples_per_pixel: 1,
            seed: 0,
        }
    }
}

impl RenderSettings {
    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_samples(mut self, samples_per_pixel: u32) -> Self {
        self.samples_per_pixel = samples_per_pixel;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.max_depth > MAX_DEPTH_LIMIT {
            return Err(SettingsError::DepthOutOfRange(self.max_depth as i64));
        }
        if self.samples_per_pixel == 0 {
            return Err(SettingsError::ZeroSamples);
        }
        Ok(())
    }
}

/// Parse a max depth argument, accepting integers in `[0, MAX_DEPTH_LIMIT]`.
pub fn parse_max_depth(arg: &str) -> Result<u32, SettingsError> {
    let depth: i64 = arg
        .trim()
        .parse()
        .map_err(|_| SettingsError::InvalidDepth(arg.to_string()))?;

    if !(0..=MAX_DEPTH_LIMIT as i64).contains(&depth) {
        return Err(SettingsError::DepthOutOfRange(depth));
    }

    Ok(depth as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = RenderSettings::default();
        assert_eq!(settings.max_depth, 4);
        assert_eq!(settings.samples_per_pixel, 1);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_parse_max_depth() {
        assert_eq!(parse_max_depth("0"), Ok(0));
        assert_eq!(parse_max_depth("4"), Ok(4));
        assert_eq!(parse_max_depth(" 100 "), Ok(100));
        assert_eq!(parse_max_depth("101"), Err(SettingsError::DepthOutOfRange(101)));
        assert_eq!(parse_max_depth("-1"), Err(SettingsError::DepthOutOfRange(-1)));
        assert_eq!(
            parse_max_depth("deep"),
            Err(SettingsError::InvalidDepth("deep".to_string()))
        );
    }

    #[test]
    fn test_validate() {
        let settings = RenderSettings::default().with_max_depth(101);
        assert_eq!(settings.validate(), Err(SettingsError::DepthOutOfRange(101)));

        let settings = RenderSettings::default().with_samples(0);
        assert_eq!(settings.validate(), Err(SettingsError::ZeroSamples));

        let settings = RenderSettings::default()
            .with_max_depth(100)
            .with_samples(16)
            .with_seed(7);
        assert!(settings.validate().is_ok());
        assert_eq!(settings.seed, 7);
    }
}
