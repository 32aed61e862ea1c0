use glam::Vec3;

use crate::world::{WorldGeometry, WorldPolygon};

/// Uniform XZ tile grid holding static world polygons.
///
/// Each polygon is bucketed into the tile containing its center, clamped to
/// the grid. Built once with a counting sort: count polygons per tile ->
/// prefix sum -> scatter. Lookups return a contiguous slice per tile.
pub struct TileGrid {
    tile_size: f32,
    inv_tile_size: f32,
    width: i32,
    depth: i32,
    /// tile_start[t] = index of the first polygon of tile t in `polygons`
    tile_start: Vec<u32>,
    /// tile_count[t] = number of polygons bucketed in tile t
    tile_count: Vec<u32>,
    /// Polygons sorted by tile
    polygons: Vec<WorldPolygon>,
}

impl TileGrid {
    /// Create an empty grid of `width` x `depth` tiles of `tile_size` world units.
    pub fn new(tile_size: f32, width: i32, depth: i32) -> Self {
        let width = width.max(0);
        let depth = depth.max(0);
        let tiles = (width as usize) * (depth as usize);
        Self {
            tile_size,
            inv_tile_size: 1.0 / tile_size,
            width,
            depth,
            tile_start: vec![0u32; tiles],
            tile_count: vec![0u32; tiles],
            polygons: Vec::new(),
        }
    }

    /// Grid covering `extent` world units along X and Z from the origin.
    pub fn covering(tile_size: f32, extent_x: f32, extent_z: f32) -> Self {
        let width = (extent_x / tile_size).ceil().max(1.0) as i32;
        let depth = (extent_z / tile_size).ceil().max(1.0) as i32;
        Self::new(tile_size, width, depth)
    }

    /// Rebuild the grid from `polygons`, replacing its previous contents.
    /// O(N) using counting sort.
    pub fn build(&mut self, polygons: &[WorldPolygon]) {
        self.polygons.clear();
        let tiles = self.tile_count.len();
        if tiles == 0 {
            return;
        }

        // 1. Count polygons per tile
        self.tile_count.fill(0);
        let mut polygon_tiles = Vec::with_capacity(polygons.len());
        for polygon in polygons {
            let t = self.clamped_tile_index(polygon.center);
            polygon_tiles.push(t);
            self.tile_count[t] += 1;
        }

        // 2. Prefix sum -> tile_start
        self.tile_start[0] = 0;
        for t in 1..tiles {
            self.tile_start[t] = self.tile_start[t - 1] + self.tile_count[t - 1];
        }

        // 3. Scatter, reusing tile_count as the per-tile write offset
        self.tile_count.fill(0);
        let mut sorted = vec![None; polygons.len()];
        for (polygon, &t) in polygons.iter().zip(&polygon_tiles) {
            let idx = (self.tile_start[t] + self.tile_count[t]) as usize;
            sorted[idx] = Some(*polygon);
            self.tile_count[t] += 1;
        }
        self.polygons.extend(sorted.into_iter().flatten());

        log::debug!(
            "built {}x{} tile grid with {} polygons",
            self.width,
            self.depth,
            self.polygons.len()
        );
    }

    pub fn len(&self) -> usize {
        self.polygons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }

    pub fn tile_size(&self) -> f32 {
        self.tile_size
    }

    /// Convert world position to tile coordinates
    #[inline]
    fn tile_coords(&self, pos: Vec3) -> (i32, i32) {
        (
            (pos.x * self.inv_tile_size).floor() as i32,
            (pos.z * self.inv_tile_size).floor() as i32,
        )
    }

    #[inline]
    fn tile_index(&self, x: i32, z: i32) -> Option<usize> {
        if x < 0 || z < 0 || x >= self.width || z >= self.depth {
            return None;
        }
        Some(z as usize * self.width as usize + x as usize)
    }

    #[inline]
    fn clamped_tile_index(&self, pos: Vec3) -> usize {
        let (x, z) = self.tile_coords(pos);
        let x = x.clamp(0, self.width - 1);
        let z = z.clamp(0, self.depth - 1);
        z as usize * self.width as usize + x as usize
    }
}

impl WorldGeometry for TileGrid {
    fn tile_of(&self, position: Vec3) -> (i32, i32) {
        self.tile_coords(position)
    }

    fn tile_extent(&self) -> (i32, i32) {
        (self.width, self.depth)
    }

    fn polygons_in_tile(&self, x: i32, z: i32) -> &[WorldPolygon] {
        match self.tile_index(x, z) {
            Some(t) => {
                let start = self.tile_start[t] as usize;
                let end = start + self.tile_count[t] as usize;
                &self.polygons[start..end]
            }
            None => &[],
        }
    }
}
