use glam::Vec3;

use crate::error::ConfigError;

/// Tuning constants for body stepping.
///
/// `Default` reproduces the values the spring network was tuned with; the
/// simulation runs in world units where +Y points down.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PhysicsConfig {
    pub gravity: Vec3,
    /// Linear velocity damping applied to every particle.
    pub linear_damping: f32,
    pub spring_constant: f32,
    pub spring_damping: f32,
    /// Lower bound on particle separation inside the spring term.
    pub min_spring_distance: f32,
    /// Scale on the RK4 position increment.
    pub position_overshoot: f32,
    /// Per-component velocity clamp applied before each substep.
    pub max_velocity: f32,
    /// Converts host frame time into simulation time.
    pub time_scale: f32,
    /// Simulation time consumed by one substep.
    pub tick_threshold: f32,
    pub max_substep_dt: f32,
    pub substep_dt_scale: f32,
    /// Stability count at which a body settles.
    pub settle_threshold: i32,
    pub collision: CollisionConfig,
    pub response: ResponseConfig,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: Vec3::new(0.0, 65.0, 0.0),
            linear_damping: 0.5,
            spring_constant: 15.0,
            spring_damping: 0.99,
            min_spring_distance: 1.0e-6,
            position_overshoot: 1.2,
            max_velocity: 400.0,
            time_scale: 0.0055,
            tick_threshold: 0.18,
            max_substep_dt: 0.11,
            substep_dt_scale: 10.0,
            settle_threshold: 16,
            collision: CollisionConfig::default(),
            response: ResponseConfig::default(),
        }
    }
}

impl PhysicsConfig {
    /// Config with gravity and linear damping switched off, leaving only the
    /// spring network. Handy for isolating spring behaviour.
    pub fn springs_only() -> Self {
        Self {
            gravity: Vec3::ZERO,
            linear_damping: 0.0,
            ..Self::default()
        }
    }

    /// Check that the scheduler and force constants are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let scalars = [
            ("linear_damping", self.linear_damping),
            ("spring_constant", self.spring_constant),
            ("spring_damping", self.spring_damping),
            ("min_spring_distance", self.min_spring_distance),
            ("position_overshoot", self.position_overshoot),
            ("max_velocity", self.max_velocity),
            ("time_scale", self.time_scale),
            ("tick_threshold", self.tick_threshold),
            ("max_substep_dt", self.max_substep_dt),
            ("substep_dt_scale", self.substep_dt_scale),
        ];
        for (name, value) in scalars {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite(name));
            }
        }
        if !self.gravity.is_finite() {
            return Err(ConfigError::NonFinite("gravity"));
        }
        if self.tick_threshold <= 0.0 {
            return Err(ConfigError::NonPositive("tick_threshold"));
        }
        if self.max_substep_dt <= 0.0 {
            return Err(ConfigError::NonPositive("max_substep_dt"));
        }
        if self.min_spring_distance <= 0.0 {
            return Err(ConfigError::NonPositive("min_spring_distance"));
        }
        if self.max_velocity <= 0.0 {
            return Err(ConfigError::NonPositive("max_velocity"));
        }
        if self.time_scale < 0.0 {
            return Err(ConfigError::Negative("time_scale"));
        }
        if self.settle_threshold <= 0 {
            return Err(ConfigError::NonPositive("settle_threshold"));
        }
        self.collision.validate()
    }
}

/// Broad and narrow phase parameters for the collision checks.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CollisionConfig {
    /// Distance at which a particle is considered touching a polygon probe point.
    pub proximity_radius: f32,
    /// Added to the body radius for the polygon-center early reject.
    pub broad_phase_margin: f32,
    /// Polygons with an area at or below this are ignored.
    pub min_polygon_area: f32,
    /// World units per extra tile of broad-phase margin.
    pub tile_span: f32,
    pub field_cylinder_offset: f32,
    pub field_cylinder_radius: f32,
    pub field_cylinder_height: f32,
}

impl Default for CollisionConfig {
    fn default() -> Self {
        Self {
            proximity_radius: 4.0,
            broad_phase_margin: 75.0,
            min_polygon_area: 190.0,
            tile_span: 100.0,
            field_cylinder_offset: 17.5,
            field_cylinder_radius: 35.0,
            field_cylinder_height: -35.0,
        }
    }
}

impl CollisionConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if !(self.proximity_radius.is_finite() && self.proximity_radius >= 0.0) {
            return Err(ConfigError::Negative("proximity_radius"));
        }
        if !(self.tile_span.is_finite() && self.tile_span > 0.0) {
            return Err(ConfigError::NonPositive("tile_span"));
        }
        if !(self.field_cylinder_radius.is_finite() && self.field_cylinder_radius >= 0.0) {
            return Err(ConfigError::Negative("field_cylinder_radius"));
        }
        Ok(())
    }
}

/// Velocity damping and impact sound scaling used after a collision.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResponseConfig {
    /// Factor on the X and Z velocity components.
    pub horizontal_restitution: f32,
    /// Factor on the Y velocity component.
    pub vertical_restitution: f32,
    pub impact_base_volume: f32,
    pub impact_strength_scale: f32,
}

impl Default for ResponseConfig {
    fn default() -> Self {
        Self {
            horizontal_restitution: 0.3,
            vertical_restitution: 0.4,
            impact_base_volume: 0.4,
            impact_strength_scale: 0.01,
        }
    }
}
