use crate::body::Body;

/// Opaque handle of a game entity owning or touching a body.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityHandle(pub u32);

/// Queries answered by the host's entity system.
pub trait EntityCollision: Sync {
    /// Whether `body` overlaps any entity other than `source`.
    fn check_full_collision(&self, body: &Body, source: Option<EntityHandle>) -> bool;

    /// Body chunks (severed parts) do not trigger impact sounds.
    fn is_body_chunk(&self, _entity: EntityHandle) -> bool {
        false
    }
}

/// No entities to collide with.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoEntities;

impl EntityCollision for NoEntities {
    fn check_full_collision(&self, _body: &Body, _source: Option<EntityHandle>) -> bool {
        false
    }
}
