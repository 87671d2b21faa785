//! Compressor configuration module.
//!
//! Reads `imgsqueeze.toml` into a [`CompressorConfig`]. Every field carries a
//! serde default, so a key the file leaves out keeps its stock value.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [defaults]
//! quality = 0.8             # Initial quality, 0.1 - 1.0
//! output_format = "jpeg"    # jpeg | png | webp
//! aspect_locked = true      # Lock state after each new image load
//!
//! [bounds]
//! min_dimension = 100       # Suggested minimum for the width/height inputs
//! max_dimension = 3840      # Suggested maximum for the width/height inputs
//!
//! [rendering]
//! filter = "lanczos3"       # nearest | triangle | catmull_rom | gaussian | lanczos3
//! ```
//!
//! The bounds are advertised to the presentation layer only; the resolver
//! accepts values outside them.
//!
//! ## Partial Configuration
//!
//! Config files are sparse. Override just the values you want:
//!
//! ```toml
//! [defaults]
//! output_format = "webp"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::imaging::{OutputFormat, Quality, ResampleFilter};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// File [`load_config`] looks for.
pub const CONFIG_FILENAME: &str = "imgsqueeze.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Compressor configuration loaded from `imgsqueeze.toml`.
///
/// All fields have defaults. User config files need only specify the values
/// they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CompressorConfig {
    /// Initial compression options.
    pub defaults: DefaultsConfig,
    /// Dimension bounds suggested to the UI.
    pub bounds: BoundsConfig,
    /// Rendering settings.
    pub rendering: RenderingConfig,
}

impl CompressorConfig {
    /// Parse config file content and check it.
    ///
    /// Quality is range-checked while parsing; see [`Quality`].
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the cross-field rules serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bounds.min_dimension == 0 {
            return Err(ConfigError::Validation(
                "bounds.min_dimension must be non-zero".into(),
            ));
        }
        if self.bounds.min_dimension > self.bounds.max_dimension {
            return Err(ConfigError::Validation(
                "bounds.min_dimension must not exceed bounds.max_dimension".into(),
            ));
        }
        Ok(())
    }
}

/// Initial compression options applied to a new session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DefaultsConfig {
    /// Encoding quality as a fraction (0.1 = smallest, 1.0 = best).
    pub quality: Quality,
    /// Output encoding.
    pub output_format: OutputFormat,
    /// Whether width and height start locked to the image's aspect ratio.
    pub aspect_locked: bool,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            quality: Quality::default(),
            output_format: OutputFormat::Jpeg,
            aspect_locked: true,
        }
    }
}

/// Per-axis bounds for the width/height inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BoundsConfig {
    pub min_dimension: u32,
    pub max_dimension: u32,
}

impl Default for BoundsConfig {
    fn default() -> Self {
        Self {
            min_dimension: 100,
            max_dimension: 3840,
        }
    }
}

/// Rendering settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderingConfig {
    /// Resampling filter used to scale into the output box.
    pub filter: ResampleFilter,
}

// =============================================================================
// Loading
// =============================================================================

/// Read `imgsqueeze.toml` from `dir`.
///
/// No file means stock defaults. A file that fails to parse, names an unknown
/// key, or breaks a bounds rule is an error rather than a partial config.
pub fn load_config(dir: &Path) -> Result<CompressorConfig, ConfigError> {
    let path = dir.join(CONFIG_FILENAME);
    if !path.exists() {
        return Ok(CompressorConfig::default());
    }
    let content = fs::read_to_string(&path)?;
    CompressorConfig::from_toml_str(&content)
}

/// Stock `imgsqueeze.toml` with every key set to its default and commented.
pub fn stock_config_toml() -> &'static str {
    r##"# imgsqueeze Configuration
# ========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Initial compression options
# ---------------------------------------------------------------------------
[defaults]
# Encoding quality as a fraction: 0.1 = smallest file, 1.0 = best quality.
# Applies to JPEG and WebP; PNG is lossless and ignores it.
quality = 0.8

# Output encoding: "jpeg", "png" or "webp".
output_format = "jpeg"

# Keep width and height locked to the image's aspect ratio after each load.
aspect_locked = true

# ---------------------------------------------------------------------------
# Dimension bounds suggested to the width/height inputs
# ---------------------------------------------------------------------------
[bounds]
# Advisory only: typed values outside this range are still accepted.
min_dimension = 100
max_dimension = 3840

# ---------------------------------------------------------------------------
# Rendering
# ---------------------------------------------------------------------------
[rendering]
# Resampling filter: "nearest", "triangle", "catmull_rom", "gaussian", "lanczos3".
filter = "lanczos3"
"##
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_values() {
        let config = CompressorConfig::default();
        assert_eq!(config.defaults.quality, Quality::new(0.8));
        assert_eq!(config.defaults.output_format, OutputFormat::Jpeg);
        assert!(config.defaults.aspect_locked);
        assert_eq!(config.bounds.min_dimension, 100);
        assert_eq!(config.bounds.max_dimension, 3840);
        assert_eq!(config.rendering.filter, ResampleFilter::Lanczos3);
    }

    #[test]
    fn parse_partial_config() {
        let toml = r#"
[defaults]
output_format = "webp"
"#;
        let config: CompressorConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.defaults.output_format, OutputFormat::WebP);
        assert_eq!(config.defaults.quality, Quality::new(0.8));
        assert_eq!(config.bounds, BoundsConfig::default());
    }

    #[test]
    fn parse_rendering_filter() {
        let toml = r#"
[rendering]
filter = "catmull_rom"
"#;
        let config: CompressorConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.rendering.filter, ResampleFilter::CatmullRom);
    }

    #[test]
    fn sparse_file_keeps_other_defaults() {
        let config = CompressorConfig::from_toml_str(
            r#"
[bounds]
max_dimension = 1920
"#,
        )
        .unwrap();
        assert_eq!(config.bounds.max_dimension, 1920);
        // untouched keys keep stock values
        assert_eq!(config.bounds.min_dimension, 100);
        assert_eq!(config.defaults, DefaultsConfig::default());
    }

    #[test]
    fn empty_file_is_stock() {
        assert_eq!(
            CompressorConfig::from_toml_str("").unwrap(),
            CompressorConfig::default()
        );
    }

    // =========================================================================
    // Unknown key rejection tests
    // =========================================================================

    #[test]
    fn unknown_key_rejected() {
        let toml_str = r#"
[defaults]
qualty = 0.5
"#;
        let result: Result<CompressorConfig, _> = toml::from_str(toml_str);
        let err = result.unwrap_err().to_string();
        assert!(err.contains("unknown field"));
    }

    #[test]
    fn unknown_section_rejected() {
        let toml_str = r#"
[defualts]
quality = 0.5
"#;
        let result: Result<CompressorConfig, _> = toml::from_str(toml_str);
        assert!(result.is_err());
    }

    #[test]
    fn unknown_format_rejected() {
        let toml_str = r#"
[defaults]
output_format = "gif"
"#;
        let result: Result<CompressorConfig, _> = toml::from_str(toml_str);
        assert!(result.is_err());
    }

    #[test]
    fn unknown_key_rejected_via_load_config() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(CONFIG_FILENAME),
            r#"
[bounds]
maximum = 10
"#,
        )
        .unwrap();

        assert!(matches!(load_config(tmp.path()), Err(ConfigError::Toml(_))));
    }

    // =========================================================================
    // Validation tests
    // =========================================================================

    #[test]
    fn quality_range_edges_accepted() {
        let config = CompressorConfig::from_toml_str("[defaults]\nquality = 1.0").unwrap();
        assert_eq!(config.defaults.quality, Quality::new(1.0));
        let config = CompressorConfig::from_toml_str("[defaults]\nquality = 0.1").unwrap();
        assert_eq!(config.defaults.quality, Quality::new(0.1));
    }

    #[test]
    fn percent_style_quality_rejected() {
        for content in ["[defaults]\nquality = 80", "[defaults]\nquality = 5.0"] {
            let err = CompressorConfig::from_toml_str(content).unwrap_err();
            assert!(
                matches!(err, ConfigError::Toml(ref e) if e.to_string().contains("quality")),
                "{content}: {err}"
            );
        }
    }

    #[test]
    fn out_of_range_quality_never_reaches_a_config() {
        // Plain serde, bypassing from_toml_str and validate.
        let result: Result<CompressorConfig, _> = toml::from_str("[defaults]\nquality = 80");
        assert!(result.is_err());
    }

    #[test]
    fn bounds_rule_checked_when_parsing() {
        let err = CompressorConfig::from_toml_str(
            r#"
[bounds]
min_dimension = 500
max_dimension = 100
"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn validate_bounds() {
        let mut config = CompressorConfig::default();
        config.bounds.min_dimension = 0;
        assert!(config.validate().is_err());

        config.bounds = BoundsConfig {
            min_dimension: 500,
            max_dimension: 100,
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_default_config_passes() {
        assert!(CompressorConfig::default().validate().is_ok());
    }

    // =========================================================================
    // load_config tests
    // =========================================================================

    #[test]
    fn load_config_without_file_is_stock() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(load_config(tmp.path()).unwrap(), CompressorConfig::default());
    }

    #[test]
    fn load_config_reads_user_values() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(CONFIG_FILENAME),
            r#"
[defaults]
quality = 0.55
aspect_locked = false

[rendering]
filter = "nearest"
"#,
        )
        .unwrap();

        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.defaults.quality, Quality::new(0.55));
        assert!(!config.defaults.aspect_locked);
        assert_eq!(config.defaults.output_format, OutputFormat::Jpeg);
        assert_eq!(config.rendering.filter, ResampleFilter::Nearest);
        assert_eq!(config.bounds, BoundsConfig::default());
    }

    #[test]
    fn load_config_rejects_invalid_toml() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILENAME), "[defaults\nquality = ").unwrap();
        assert!(matches!(load_config(tmp.path()), Err(ConfigError::Toml(_))));
    }

    // =========================================================================
    // stock_config_toml tests
    // =========================================================================

    #[test]
    fn stock_config_toml_roundtrips_to_defaults() {
        let config: CompressorConfig = toml::from_str(stock_config_toml()).unwrap();
        assert_eq!(config, CompressorConfig::default());
    }

    #[test]
    fn stock_config_toml_contains_all_sections() {
        let content = stock_config_toml();
        assert!(content.contains("[defaults]"));
        assert!(content.contains("[bounds]"));
        assert!(content.contains("[rendering]"));
    }

    #[test]
    fn stock_config_toml_passes_validation() {
        assert!(CompressorConfig::from_toml_str(stock_config_toml()).is_ok());
    }
}
