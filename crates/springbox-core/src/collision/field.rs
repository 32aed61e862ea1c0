use glam::{Vec2, Vec3};

use crate::body::Body;
use crate::config::CollisionConfig;
use crate::materials::Material;

use super::{CollisionSurface, ContactSource};

/// Vertical cylinder. `height` may be negative, in which case it extends
/// toward -Y from `origin`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cylinder {
    pub origin: Vec3,
    pub radius: f32,
    pub height: f32,
}

impl Cylinder {
    /// Lowest and highest Y covered.
    pub fn y_range(&self) -> (f32, f32) {
        let a = self.origin.y;
        let b = self.origin.y + self.height;
        (a.min(b), a.max(b))
    }
}

/// Collision shape of a field's platform.
pub trait PlatformShape {
    fn overlaps_cylinder(&self, cylinder: &Cylinder) -> bool;
}

/// Active field effects, addressed by slot.
///
/// A slot whose field has no live target entity yields `None`.
pub trait FieldRegistry: Sync {
    fn field_slots(&self) -> usize;
    fn field_platform(&self, slot: usize) -> Option<&dyn PlatformShape>;
}

impl FieldRegistry for () {
    fn field_slots(&self) -> usize {
        0
    }

    fn field_platform(&self, _slot: usize) -> Option<&dyn PlatformShape> {
        None
    }
}

impl<P: PlatformShape + Sync> FieldRegistry for [Option<P>] {
    fn field_slots(&self) -> usize {
        self.len()
    }

    fn field_platform(&self, slot: usize) -> Option<&dyn PlatformShape> {
        self.get(slot)?.as_ref().map(|p| p as &dyn PlatformShape)
    }
}

impl<P: PlatformShape + Sync> FieldRegistry for Vec<Option<P>> {
    fn field_slots(&self) -> usize {
        self.len()
    }

    fn field_platform(&self, slot: usize) -> Option<&dyn PlatformShape> {
        self.as_slice().field_platform(slot)
    }
}

/// Axis-aligned box platform.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FieldPlatform {
    pub min: Vec3,
    pub max: Vec3,
}

impl FieldPlatform {
    pub fn new(a: Vec3, b: Vec3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }
}

impl PlatformShape for FieldPlatform {
    fn overlaps_cylinder(&self, cylinder: &Cylinder) -> bool {
        let (bottom, top) = cylinder.y_range();
        if top < self.min.y || bottom > self.max.y {
            return false;
        }
        let center = Vec2::new(cylinder.origin.x, cylinder.origin.z);
        let closest = center.clamp(
            Vec2::new(self.min.x, self.min.z),
            Vec2::new(self.max.x, self.max.z),
        );
        closest.distance_squared(center) <= cylinder.radius * cylinder.radius
    }
}

/// Check every particle against every live field platform.
///
/// A hit carries no normal: fields push bodies back rather than bounce them.
pub fn check_fields(
    body: &Body,
    fields: &dyn FieldRegistry,
    config: &CollisionConfig,
) -> Option<CollisionSurface> {
    let offset = Vec3::new(0.0, config.field_cylinder_offset, 0.0);
    for slot in 0..fields.field_slots() {
        let Some(platform) = fields.field_platform(slot) else {
            continue;
        };
        for particle in body.particles() {
            let cylinder = Cylinder {
                origin: particle.position + offset,
                radius: config.field_cylinder_radius,
                height: config.field_cylinder_height,
            };
            if platform.overlaps_cylinder(&cylinder) {
                return Some(CollisionSurface::without_normal(
                    Material::Stone,
                    ContactSource::Field,
                ));
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_height_extends_down_in_y() {
        let cyl = Cylinder {
            origin: Vec3::new(0.0, 17.5, 0.0),
            radius: 35.0,
            height: -35.0,
        };
        assert_eq!(cyl.y_range(), (-17.5, 17.5));
    }

    #[test]
    fn test_platform_overlap() {
        let platform = FieldPlatform::new(Vec3::new(-10.0, -5.0, -10.0), Vec3::new(10.0, 5.0, 10.0));
        let touching = Cylinder {
            origin: Vec3::new(40.0, 0.0, 0.0),
            radius: 35.0,
            height: -35.0,
        };
        let beside = Cylinder {
            origin: Vec3::new(50.0, 0.0, 0.0),
            ..touching
        };
        let above = Cylinder {
            origin: Vec3::new(0.0, -45.0, 0.0),
            ..touching
        };
        assert!(platform.overlaps_cylinder(&touching));
        assert!(!platform.overlaps_cylinder(&beside));
        assert!(!platform.overlaps_cylinder(&above));
    }

    #[test]
    fn test_empty_slots_are_skipped() {
        let fields: Vec<Option<FieldPlatform>> = vec![None, None];
        assert_eq!(fields.field_slots(), 2);
        assert!(fields.field_platform(0).is_none());
        assert!(fields.field_platform(5).is_none());
    }
}
