//! Startup configuration errors.

/// Rejected configuration values. Raised before the frame loop starts.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("invalid CRT preset index {0} (expected 0, 1 or 2)")]
    InvalidCrtPreset(u8),

    #[error("invalid viewport {width}x{height} (each dimension must be 1..=8192)")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid curvature {0} (expected a finite value in 0.0..=1.0)")]
    InvalidCurvature(f64),
}
