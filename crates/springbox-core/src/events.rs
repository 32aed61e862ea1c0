use crate::materials::Material;

/// Side effects of stepping that the host has to act on.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PhysicsEvent {
    /// A substep ended in a collision; play an impact sound.
    Impact(Impact),
    /// The body stopped simulating; reset the owner's idle-sound timer.
    Settled,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Impact {
    /// Estimate from the speed of particle 0 before the bounce.
    pub strength: f32,
    /// Suggested sound volume, `impact_base_volume + strength`.
    pub volume: f32,
    pub material: Material,
}

/// Receives events emitted while a body is stepped.
pub trait EventSink {
    fn emit(&mut self, event: PhysicsEvent);
}

impl EventSink for Vec<PhysicsEvent> {
    fn emit(&mut self, event: PhysicsEvent) {
        self.push(event);
    }
}

/// Drops every event.
#[derive(Clone, Copy, Debug, Default)]
pub struct Discard;

impl EventSink for Discard {
    fn emit(&mut self, _event: PhysicsEvent) {}
}
