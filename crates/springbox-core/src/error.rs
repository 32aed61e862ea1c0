use thiserror::Error;

/// Rejected body construction.
///
/// These are caller contract violations; a body that was built successfully
/// never produces an error while it is being stepped.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BodyError {
    #[error("body has {count} particles, the limit is {max}")]
    TooManyParticles { count: usize, max: usize },

    #[error("particle {index} has negative mass {mass}")]
    NegativeMass { index: usize, mass: f32 },

    #[error("particle {index} has a non-finite position, velocity or mass")]
    NonFinite { index: usize },

    #[error("invalid bounding radius {0}")]
    InvalidRadius(f32),
}

/// Rejected [`PhysicsConfig`](crate::config::PhysicsConfig).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be finite")]
    NonFinite(&'static str),

    #[error("{0} must be positive")]
    NonPositive(&'static str),

    #[error("{0} must not be negative")]
    Negative(&'static str),
}
