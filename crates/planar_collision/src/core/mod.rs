//! # Core Module
//!
//! Shared configuration types used by the detector and its callers.
//!
//! ## Organization
//!
//! - **Config**: Detector tolerances and policies, loadable from TOML or RON

pub mod config;

// Re-export foundation modules for convenience
pub use crate::foundation;

// Re-export commonly used config types
pub use config::{
    DetectorConfig,
    Tolerances,
    TieBreakPolicy,
    Config,
    ConfigError,
};
