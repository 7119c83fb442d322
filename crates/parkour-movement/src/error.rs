//! Error types for traversal configuration

/// Errors found while validating a [`TraversalConfig`](crate::TraversalConfig)
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("cooldown '{name}' must not be negative (got {value})")]
    NegativeCooldown { name: &'static str, value: f32 },

    #[error("interpolation speed '{name}' must be positive (got {value})")]
    NonPositiveSpeed { name: &'static str, value: f32 },

    #[error("wall normal band must be within (0, 1] (got {0})")]
    InvalidNormalBand(f32),

    #[error("'{name}' must be positive (got {value})")]
    NonPositiveDistance { name: &'static str, value: f32 },
}
