use bytemuck::{Pod, Zeroable};
use glam::Vec3;

/// Upper bound on particles per body.
///
/// Force evaluation visits every particle pair, so cost grows with the square
/// of this value. Raising it needs a sparse spring topology first.
pub const MAX_PARTICLES: usize = 32;

/// One point mass of a body.
///
/// Plain-old-data so a whole body can be zero-initialised and copied into
/// RK4 stage buffers without allocation.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct Particle {
    pub position: Vec3,
    /// Reference position captured at creation; spring rest lengths are
    /// measured between these.
    pub rest_position: Vec3,
    pub velocity: Vec3,
    /// Scratch, rewritten by every force evaluation.
    pub force: Vec3,
    /// Force injected from outside, consumed by the next substep.
    pub external_force: Vec3,
    /// Position before the current substep, restored on collision.
    pub snapshot: Vec3,
    /// Position at the start of the last frame, for render interpolation.
    pub frame_start: Vec3,
    /// Zero mass skips gravity but keeps the particle in the spring network.
    pub mass: f32,
}

impl Particle {
    pub fn new(position: Vec3, mass: f32) -> Self {
        Self {
            position,
            rest_position: position,
            snapshot: position,
            frame_start: position,
            mass,
            ..Self::zeroed()
        }
    }

    pub fn with_velocity(mut self, velocity: Vec3) -> Self {
        self.velocity = velocity;
        self
    }

    pub(crate) fn is_finite(&self) -> bool {
        self.position.is_finite()
            && self.rest_position.is_finite()
            && self.velocity.is_finite()
            && self.external_force.is_finite()
            && self.mass.is_finite()
    }
}
