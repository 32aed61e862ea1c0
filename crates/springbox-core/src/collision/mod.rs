//! Discrete collision checks for a body's post-integration state.
//!
//! Three sources are checked in order and the first hit wins: static world
//! polygons, field volumes, then other entities. The checks are proximity
//! based rather than exact mesh intersection.

pub mod entity;
pub mod field;
pub mod geometry;

use glam::Vec3;

use crate::body::Body;
use crate::config::CollisionConfig;
use crate::materials::Material;
use crate::world::{EmptyWorld, WorldGeometry};

pub use entity::{EntityCollision, EntityHandle, NoEntities};
pub use field::{Cylinder, FieldPlatform, FieldRegistry, PlatformShape};

/// What a body ran into.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContactSource {
    World,
    Field,
    Entity,
}

/// Result of a positive collision check.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CollisionSurface {
    /// Face normal when a single surface was hit. `None` means the body should
    /// be pushed back isotropically rather than bounced.
    pub normal: Option<Vec3>,
    pub material: Material,
    pub source: ContactSource,
}

impl CollisionSurface {
    pub fn with_normal(normal: Vec3, material: Material, source: ContactSource) -> Self {
        Self {
            normal: Some(normal),
            material,
            source,
        }
    }

    pub fn without_normal(material: Material, source: ContactSource) -> Self {
        Self {
            normal: None,
            material,
            source,
        }
    }
}

/// External collaborators read during a step.
#[derive(Clone, Copy)]
pub struct Environment<'a> {
    pub geometry: &'a dyn WorldGeometry,
    pub fields: &'a dyn FieldRegistry,
    pub entities: &'a dyn EntityCollision,
}

impl<'a> Environment<'a> {
    pub fn new(
        geometry: &'a dyn WorldGeometry,
        fields: &'a dyn FieldRegistry,
        entities: &'a dyn EntityCollision,
    ) -> Self {
        Self {
            geometry,
            fields,
            entities,
        }
    }

    /// No geometry, no fields, no entities: nothing ever collides.
    pub fn empty() -> Environment<'static> {
        Environment {
            geometry: &EmptyWorld,
            fields: &(),
            entities: &NoEntities,
        }
    }

    pub fn with_geometry(self, geometry: &'a dyn WorldGeometry) -> Self {
        Self { geometry, ..self }
    }

    pub fn with_fields(self, fields: &'a dyn FieldRegistry) -> Self {
        Self { fields, ..self }
    }

    pub fn with_entities(self, entities: &'a dyn EntityCollision) -> Self {
        Self { entities, ..self }
    }
}

/// Check `body` against every collaborator in `env`.
///
/// `source` is the entity owning the body, forwarded to the entity check.
pub fn check(
    body: &Body,
    env: &Environment<'_>,
    source: Option<EntityHandle>,
    config: &CollisionConfig,
) -> Option<CollisionSurface> {
    if body.is_empty() {
        return None;
    }

    geometry::check_static(body, env.geometry, config)
        .or_else(|| field::check_fields(body, env.fields, config))
        .or_else(|| {
            env.entities
                .check_full_collision(body, source)
                .then(|| CollisionSurface::without_normal(Material::Stone, ContactSource::Entity))
        })
}
