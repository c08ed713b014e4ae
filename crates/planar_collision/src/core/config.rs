//! # Detector Configuration
//!
//! Numeric tolerances and selection policies for the narrow phase. Every
//! field has a default matching the detector's historical constants, so an
//! empty configuration file reproduces the stock behavior.
//!
//! ## Configuration Categories
//!
//! - **Tolerances**: Epsilons and fallback magnitudes used by the pair tests
//! - **Policies**: How box-box ties between the two vertex passes are resolved

use serde::{Serialize, Deserialize};

// Re-export from the config module for convenience
pub use crate::config::{Config, ConfigError};

/// # Tolerances
///
/// Compile-time constants of the detector exposed as tunable values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tolerances {
    /// Padding added to every entry of the absolute rotation matrix in the
    /// box-box separating-axis test
    pub box_axis_epsilon: f32,
    /// Squared-distance threshold selecting the circle-box normal branch
    pub proximity_epsilon: f32,
    /// Squared direction length below which a ray is considered degenerate,
    /// and direction component below which a ray is parallel to a box slab
    pub zero_threshold: f32,
    /// Distance substituted for exactly concentric circles
    pub concentric_distance: f32,
    /// Length of the x-axis vector used when a circle centre sits on a box centre
    pub circle_box_fallback_scale: f32,
}

impl Tolerances {
    /// Default box-box axis padding
    pub const BOX_AXIS_EPSILON: f32 = 1e-4;
    /// Default circle-box proximity threshold
    pub const PROXIMITY_EPSILON: f32 = 1e-5;
    /// Default degenerate-direction threshold
    pub const ZERO_THRESHOLD: f32 = 1e-9;
    /// Default concentric circle distance
    pub const CONCENTRIC_DISTANCE: f32 = 0.01;
    /// Default coincident-centre fallback length
    pub const CIRCLE_BOX_FALLBACK_SCALE: f32 = 0.001;

    /// Check every tolerance is finite and non-negative, and that the
    /// fallback magnitudes are strictly positive
    pub fn validate(&self) -> Result<(), ConfigError> {
        let checks = [
            ("box_axis_epsilon", self.box_axis_epsilon, false),
            ("proximity_epsilon", self.proximity_epsilon, false),
            ("zero_threshold", self.zero_threshold, false),
            ("concentric_distance", self.concentric_distance, true),
            ("circle_box_fallback_scale", self.circle_box_fallback_scale, true),
        ];

        for (name, value, strictly_positive) in checks {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be finite and non-negative, got {value}"
                )));
            }
            if strictly_positive && value == 0.0 {
                return Err(ConfigError::Invalid(format!("{name} must be greater than zero")));
            }
        }

        Ok(())
    }
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            box_axis_epsilon: Self::BOX_AXIS_EPSILON,
            proximity_epsilon: Self::PROXIMITY_EPSILON,
            zero_threshold: Self::ZERO_THRESHOLD,
            concentric_distance: Self::CONCENTRIC_DISTANCE,
            circle_box_fallback_scale: Self::CIRCLE_BOX_FALLBACK_SCALE,
        }
    }
}

/// # Tie-Break Policy
///
/// Box-box detection runs the vertex test twice, once with each box as the
/// reference. When both passes report exactly the same minimum penetration
/// this decides what is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TieBreakPolicy {
    /// Emit only the pass that uses the first box as reference
    #[default]
    PreferFirst,
    /// Emit both passes, first-box pass in slot 0 and second-box pass in slot 1
    KeepBoth,
}

/// # Detector Configuration
///
/// Top-level configuration handed to [`crate::CollisionDetector::with_config`].
///
/// ```toml
/// box_tie_break = "KeepBoth"
///
/// [tolerances]
/// proximity_epsilon = 1e-6
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Box-box tie resolution
    pub box_tie_break: TieBreakPolicy,
    /// Numeric tolerances
    pub tolerances: Tolerances,
}

impl DetectorConfig {
    /// Create the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Set custom tolerances
    pub fn with_tolerances(mut self, tolerances: Tolerances) -> Self {
        self.tolerances = tolerances;
        self
    }

    /// Set the box-box tie policy
    pub fn with_box_tie_break(mut self, policy: TieBreakPolicy) -> Self {
        self.box_tie_break = policy;
        self
    }

    /// Validate all contained values
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.tolerances.validate()
    }

    /// Load and validate a configuration file (`.toml` or `.ron`)
    pub fn load_validated(path: &str) -> Result<Self, ConfigError> {
        let config = Self::load_from_file(path)?;
        config.validate()?;
        log::debug!("Detector configuration loaded: {:?}", config);
        Ok(config)
    }
}

impl Config for DetectorConfig {}
