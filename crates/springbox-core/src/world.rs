use bitflags::bitflags;
use glam::Vec3;

bitflags! {
    /// Type flags carried by a static world polygon.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct PolyFlags: u32 {
        /// Four corners, split into triangles (0, 1, 2) and (0, 2, 3).
        const QUAD = 1 << 0;
        const METAL = 1 << 1;
        const WOOD = 1 << 2;
        const STONE = 1 << 3;
        const GRAVEL = 1 << 4;
        const WATER = 1 << 5;
        const EARTH = 1 << 6;
        const TRANSPARENT = 1 << 7;
        const NO_COLLISION = 1 << 8;
    }
}

/// A static triangle or quad of world geometry.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WorldPolygon {
    /// Corners in perimeter order; the fourth is only meaningful for quads.
    pub vertices: [Vec3; 4],
    pub normal: Vec3,
    pub center: Vec3,
    pub area: f32,
    pub flags: PolyFlags,
}

impl WorldPolygon {
    pub fn triangle(a: Vec3, b: Vec3, c: Vec3, flags: PolyFlags) -> Self {
        let flags = flags - PolyFlags::QUAD;
        Self {
            vertices: [a, b, c, c],
            normal: (b - a).cross(c - a).normalize_or_zero(),
            center: (a + b + c) / 3.0,
            area: triangle_area(a, b, c),
            flags,
        }
    }

    pub fn quad(a: Vec3, b: Vec3, c: Vec3, d: Vec3, flags: PolyFlags) -> Self {
        Self {
            vertices: [a, b, c, d],
            normal: (b - a).cross(c - a).normalize_or_zero(),
            center: (a + b + c + d) / 4.0,
            area: triangle_area(a, b, c) + triangle_area(a, c, d),
            flags: flags | PolyFlags::QUAD,
        }
    }

    /// Replace the computed face normal.
    pub fn with_normal(mut self, normal: Vec3) -> Self {
        self.normal = normal;
        self
    }

    #[inline]
    pub fn is_quad(&self) -> bool {
        self.flags.contains(PolyFlags::QUAD)
    }

    #[inline]
    pub fn corners(&self) -> &[Vec3] {
        if self.is_quad() {
            &self.vertices
        } else {
            &self.vertices[..3]
        }
    }

    /// Whether bodies can collide with this polygon at all.
    pub fn is_solid(&self, min_area: f32) -> bool {
        self.area > min_area
            && !self
                .flags
                .intersects(PolyFlags::WATER | PolyFlags::TRANSPARENT | PolyFlags::NO_COLLISION)
    }

    /// One triangle, or two for quads.
    pub fn triangles(&self) -> impl Iterator<Item = [Vec3; 3]> + '_ {
        let [a, b, c, d] = self.vertices;
        let second = self.is_quad().then_some([a, c, d]);
        std::iter::once([a, b, c]).chain(second)
    }

    /// Center, corners and the three edge midpoints of the first triangle.
    pub fn probe_points(&self) -> impl Iterator<Item = Vec3> + '_ {
        let [a, b, c, _] = self.vertices;
        std::iter::once(self.center)
            .chain(self.corners().iter().copied())
            .chain([(a + b) * 0.5, (c + b) * 0.5, (a + c) * 0.5])
    }
}

fn triangle_area(a: Vec3, b: Vec3, c: Vec3) -> f32 {
    (b - a).cross(c - a).length() * 0.5
}

/// Read-only access to static world geometry, bucketed in an XZ tile grid.
///
/// The simulation never mutates geometry; callers must not change it while a
/// step is running.
pub trait WorldGeometry: Sync {
    /// Tile containing `position`. May lie outside the grid.
    fn tile_of(&self, position: Vec3) -> (i32, i32);

    /// Number of tiles along X and Z.
    fn tile_extent(&self) -> (i32, i32);

    /// Polygons bucketed in tile `(x, z)`; empty outside the grid.
    fn polygons_in_tile(&self, x: i32, z: i32) -> &[WorldPolygon];
}

/// Geometry with no tiles.
#[derive(Clone, Copy, Debug, Default)]
pub struct EmptyWorld;

impl WorldGeometry for EmptyWorld {
    fn tile_of(&self, _position: Vec3) -> (i32, i32) {
        (0, 0)
    }

    fn tile_extent(&self) -> (i32, i32) {
        (0, 0)
    }

    fn polygons_in_tile(&self, _x: i32, _z: i32) -> &[WorldPolygon] {
        &[]
    }
}
