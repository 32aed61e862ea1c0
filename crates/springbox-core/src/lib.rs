//! Springbox - small-body mass-spring physics for game objects.
//!
//! A [`Body`] is a cluster of up to [`MAX_PARTICLES`] point masses joined by
//! an implicit spring between every pair. Bodies are stepped on a fixed
//! simulation tick with RK4 and checked against static world polygons, field
//! volumes and other entities after every substep.
//!
//! ```text
//! advance ──► compute_forces ──► integrate (RK4) ──► collision::check ──► respond
//!    ▲                                                                      │
//!    └────────────────────── while leftover time >= tick ───────────────────┘
//! ```
//!
//! World geometry, fields and entities are external collaborators, reached
//! through the traits bundled in [`Environment`]. Sound and idle-timer side
//! effects are reported as [`PhysicsEvent`]s.
//!
//! # Features
//!
//! - `parallel`: step the bodies of a [`Solver`] on the rayon thread pool
//! - `serde`: serialize [`PhysicsConfig`]

pub mod body;
pub mod collision;
pub mod config;
pub mod error;
pub mod events;
pub mod forces;
pub mod grid;
pub mod integrator;
pub mod materials;
pub mod math;
pub mod particle;
pub mod response;
pub mod solver;
pub mod world;

pub use body::{Body, BodyState};
pub use collision::{
    CollisionSurface, ContactSource, Cylinder, EntityCollision, EntityHandle, Environment,
    FieldPlatform, FieldRegistry, NoEntities, PlatformShape,
};
pub use config::{CollisionConfig, PhysicsConfig, ResponseConfig};
pub use error::{BodyError, ConfigError};
pub use events::{Discard, EventSink, Impact, PhysicsEvent};
pub use forces::{compute_body_forces, compute_forces, spring_force};
pub use grid::TileGrid;
pub use integrator::integrate;
pub use materials::Material;
pub use particle::{Particle, MAX_PARTICLES};
pub use response::respond;
pub use solver::{advance, BodyId, Solver, StepOutcome};
pub use world::{EmptyWorld, PolyFlags, WorldGeometry, WorldPolygon};
