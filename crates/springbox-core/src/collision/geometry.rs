use crate::body::Body;
use crate::config::CollisionConfig;
use crate::materials::Material;
use crate::math::{farther_than, point_near_triangle};
use crate::particle::Particle;
use crate::world::{WorldGeometry, WorldPolygon};

use super::{CollisionSurface, ContactSource};

/// Check a body against static world polygons.
///
/// Broad phase: tiles around particle 0, widened by one tile per
/// `tile_span` units of body radius. Narrow phase per solid polygon:
/// 1. reject when the polygon center is beyond `radius + broad_phase_margin`
/// 2. proximity of every particle and pair midpoint to the polygon's probe
///    points; a hit reports the face normal
/// 3. otherwise a point-in-triangle test of every particle; a hit reports
///    no normal
pub fn check_static(
    body: &Body,
    geometry: &dyn WorldGeometry,
    config: &CollisionConfig,
) -> Option<CollisionSurface> {
    let particles = body.particles();
    let (anchor, radius) = body.bounding_sphere()?;
    let (width, depth) = geometry.tile_extent();
    if width <= 0 || depth <= 0 {
        return None;
    }

    // Tile coordinates and spans saturate for far-away or huge bodies.
    let (tile_x, tile_z) = geometry.tile_of(anchor);
    let span = ((radius / config.tile_span) as i32).saturating_add(1).max(1);
    let min_x = tile_x.saturating_sub(span).max(0);
    let max_x = tile_x.saturating_add(span).min(width - 1);
    let min_z = tile_z.saturating_sub(span).max(0);
    let max_z = tile_z.saturating_add(span).min(depth - 1);

    for z in min_z..=max_z {
        for x in min_x..=max_x {
            for polygon in geometry.polygons_in_tile(x, z) {
                if !polygon.is_solid(config.min_polygon_area) {
                    continue;
                }
                if farther_than(polygon.center, anchor, radius + config.broad_phase_margin) {
                    continue;
                }

                let material = Material::from_flags(polygon.flags);
                if touches_probe_points(particles, polygon, config.proximity_radius) {
                    return Some(CollisionSurface::with_normal(
                        polygon.normal,
                        material,
                        ContactSource::World,
                    ));
                }
                if vertex_inside_polygon(particles, polygon, config.proximity_radius) {
                    return Some(CollisionSurface::without_normal(
                        material,
                        ContactSource::World,
                    ));
                }
            }
        }
    }

    None
}

/// Any particle, or midpoint of a particle pair, within `radius` of one of
/// the polygon's probe points.
fn touches_probe_points(particles: &[Particle], polygon: &WorldPolygon, radius: f32) -> bool {
    let near = |pos| polygon.probe_points().any(|probe| !farther_than(pos, probe, radius));

    for (k, pk) in particles.iter().enumerate() {
        if near(pk.position) {
            return true;
        }
        for pl in &particles[k + 1..] {
            if near((pk.position + pl.position) * 0.5) {
                return true;
            }
        }
    }
    false
}

fn vertex_inside_polygon(particles: &[Particle], polygon: &WorldPolygon, tolerance: f32) -> bool {
    polygon.triangles().any(|tri| {
        particles
            .iter()
            .any(|p| point_near_triangle(p.position, &tri, tolerance))
    })
}
