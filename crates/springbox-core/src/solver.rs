use crate::body::Body;
use crate::collision::{self, EntityHandle, Environment};
use crate::config::PhysicsConfig;
use crate::events::{EventSink, PhysicsEvent};
use crate::forces::compute_body_forces;
use crate::integrator::integrate;
use crate::response::respond;
use glam::Vec3;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// What one call to [`advance`] did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StepOutcome {
    /// Number of substeps executed.
    pub substeps: u32,
    /// Number of substeps that ended in a collision.
    pub collisions: u32,
    /// The body settled at the end of this call.
    pub settled: bool,
}

/// Advance one body by a frame.
///
/// Frame time is scaled by `rubber` and `config.time_scale` and added to the
/// body's leftover time; each `config.tick_threshold` of it runs one substep
/// of forces -> RK4 -> collision check -> response. The RK4 step length is
/// `min(max_substep_dt, timing * substep_dt_scale)`. A body whose stability
/// counter reaches `settle_threshold` after at least one substep settles and
/// emits [`PhysicsEvent::Settled`].
///
/// Settled bodies, empty bodies and a zero `frame_dt` are no-ops.
pub fn advance(
    body: &mut Body,
    frame_dt: f32,
    rubber: f32,
    source: Option<EntityHandle>,
    env: &Environment<'_>,
    events: &mut dyn EventSink,
    config: &PhysicsConfig,
) -> StepOutcome {
    let mut outcome = StepOutcome::default();
    if body.is_settled() || body.is_empty() || frame_dt == 0.0 {
        return outcome;
    }

    body.save_frame_start();

    let threshold = config.tick_threshold;
    let mut timing = body.leftover_time + frame_dt * rubber * config.time_scale;
    while timing >= threshold {
        let dt = config.max_substep_dt.min(timing * config.substep_dt_scale);
        compute_body_forces(body, config);
        if substep(body, dt, source, env, events, config) {
            outcome.collisions += 1;
        }
        outcome.substeps += 1;
        timing -= threshold;
    }
    body.leftover_time = timing;

    if outcome.substeps > 0 && body.stability >= config.settle_threshold {
        log::debug!(
            "body {:?} settled after {} substeps this frame",
            source,
            outcome.substeps
        );
        body.settle();
        events.emit(PhysicsEvent::Settled);
        outcome.settled = true;
    }

    outcome
}

/// One integration + collision cycle. Forces must already be computed for
/// the current state. Returns whether the substep collided.
fn substep(
    body: &mut Body,
    dt: f32,
    source: Option<EntityHandle>,
    env: &Environment<'_>,
    events: &mut dyn EventSink,
    config: &PhysicsConfig,
) -> bool {
    body.save_snapshot();
    let limit = Vec3::splat(config.max_velocity);
    for p in body.particles_mut() {
        p.external_force = Vec3::ZERO;
        p.velocity = p.velocity.clamp(-limit, limit);
    }

    integrate(body, dt, config);

    let hit = collision::check(body, env, source, &config.collision);
    respond(body, hit.as_ref(), source, env, events, config);
    hit.is_some()
}

/// Identifies a body inside a [`Solver`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BodyId(usize);

impl BodyId {
    pub fn index(self) -> usize {
        self.0
    }
}

struct Slot {
    body: Body,
    owner: Option<EntityHandle>,
}

/// Owns many independent bodies and steps them together.
///
/// Removed slots are reused by later insertions.
pub struct Solver {
    pub config: PhysicsConfig,
    slots: Vec<Option<Slot>>,
    free: Vec<usize>,
}

impl Solver {
    pub fn new(config: PhysicsConfig) -> Self {
        Self {
            config,
            slots: Vec::new(),
            free: Vec::new(),
        }
    }

    /// Start simulating `body` on behalf of `owner`.
    pub fn add_body(&mut self, body: Body, owner: Option<EntityHandle>) -> BodyId {
        let slot = Some(Slot { body, owner });
        match self.free.pop() {
            Some(index) => {
                self.slots[index] = slot;
                BodyId(index)
            }
            None => {
                self.slots.push(slot);
                BodyId(self.slots.len() - 1)
            }
        }
    }

    /// Stop simulating a body and hand it back.
    pub fn remove_body(&mut self, id: BodyId) -> Option<Body> {
        let slot = self.slots.get_mut(id.0)?.take()?;
        self.free.push(id.0);
        Some(slot.body)
    }

    pub fn body(&self, id: BodyId) -> Option<&Body> {
        self.slots.get(id.0)?.as_ref().map(|s| &s.body)
    }

    pub fn body_mut(&mut self, id: BodyId) -> Option<&mut Body> {
        self.slots.get_mut(id.0)?.as_mut().map(|s| &mut s.body)
    }

    pub fn owner(&self, id: BodyId) -> Option<EntityHandle> {
        self.slots.get(id.0)?.as_ref()?.owner
    }

    pub fn len(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Ids of all live bodies.
    pub fn ids(&self) -> impl Iterator<Item = BodyId> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, s)| s.is_some())
            .map(|(i, _)| BodyId(i))
    }

    pub fn active_count(&self) -> usize {
        self.slots
            .iter()
            .flatten()
            .filter(|s| !s.body.is_settled())
            .count()
    }

    /// Advance every body by one frame and collect the events they emitted,
    /// in body order.
    pub fn step(
        &mut self,
        frame_dt: f32,
        rubber: f32,
        env: &Environment<'_>,
    ) -> Vec<(BodyId, PhysicsEvent)> {
        let config = &self.config;
        let run = |(index, slot): (usize, &mut Option<Slot>)| {
            let mut events = Vec::new();
            if let Some(slot) = slot {
                advance(
                    &mut slot.body,
                    frame_dt,
                    rubber,
                    slot.owner,
                    env,
                    &mut events,
                    config,
                );
            }
            events.into_iter().map(move |e| (BodyId(index), e))
        };

        #[cfg(feature = "parallel")]
        let per_body: Vec<_> = self
            .slots
            .par_iter_mut()
            .enumerate()
            .map(|entry| run(entry).collect::<Vec<_>>())
            .collect();

        #[cfg(not(feature = "parallel"))]
        let per_body: Vec<_> = self
            .slots
            .iter_mut()
            .enumerate()
            .map(|entry| run(entry).collect::<Vec<_>>())
            .collect();

        per_body.into_iter().flatten().collect()
    }
}

impl Default for Solver {
    fn default() -> Self {
        Self::new(PhysicsConfig::default())
    }
}
