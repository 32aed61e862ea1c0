use glam::Vec3;
use springbox_core::{PolyFlags, TileGrid, WorldGeometry, WorldPolygon};

/// Small 10x10 square centered on (x, z).
fn square_at(x: f32, z: f32) -> WorldPolygon {
    WorldPolygon::quad(
        Vec3::new(x - 5.0, 0.0, z - 5.0),
        Vec3::new(x + 5.0, 0.0, z - 5.0),
        Vec3::new(x + 5.0, 0.0, z + 5.0),
        Vec3::new(x - 5.0, 0.0, z + 5.0),
        PolyFlags::STONE,
    )
}

#[test]
fn test_grid_build_and_query() {
    let mut grid = TileGrid::new(100.0, 4, 4);
    grid.build(&[square_at(50.0, 50.0), square_at(60.0, 40.0), square_at(250.0, 350.0)]);

    assert_eq!(grid.len(), 3);
    assert_eq!(grid.polygons_in_tile(0, 0).len(), 2);
    assert_eq!(grid.polygons_in_tile(2, 3).len(), 1);
    assert!(grid.polygons_in_tile(1, 1).is_empty());
    assert_eq!(grid.polygons_in_tile(2, 3)[0].center, Vec3::new(250.0, 0.0, 350.0));
}

#[test]
fn test_grid_all_polygons_found() {
    let mut grid = TileGrid::new(50.0, 8, 8);
    let polygons: Vec<WorldPolygon> = (0..64)
        .map(|i| square_at((i % 8) as f32 * 50.0 + 25.0, (i / 8) as f32 * 50.0 + 25.0))
        .collect();
    grid.build(&polygons);

    let mut found = 0;
    for z in 0..8 {
        for x in 0..8 {
            let tile = grid.polygons_in_tile(x, z);
            assert_eq!(tile.len(), 1, "tile ({}, {})", x, z);
            assert_eq!(grid.tile_of(tile[0].center), (x, z));
            found += tile.len();
        }
    }
    assert_eq!(found, polygons.len());
}

#[test]
fn test_out_of_range_tiles_are_empty() {
    let mut grid = TileGrid::new(100.0, 2, 2);
    grid.build(&[square_at(50.0, 50.0)]);

    assert!(grid.polygons_in_tile(-1, 0).is_empty());
    assert!(grid.polygons_in_tile(0, -1).is_empty());
    assert!(grid.polygons_in_tile(2, 0).is_empty());
    assert!(grid.polygons_in_tile(0, 2).is_empty());
    assert_eq!(grid.tile_extent(), (2, 2));
}

#[test]
fn test_polygons_outside_are_clamped_to_edge_tiles() {
    let mut grid = TileGrid::new(100.0, 2, 2);
    grid.build(&[square_at(-300.0, 50.0), square_at(900.0, 900.0)]);

    assert_eq!(grid.polygons_in_tile(0, 0).len(), 1);
    assert_eq!(grid.polygons_in_tile(1, 1).len(), 1);
    // tile_of itself does not clamp
    assert_eq!(grid.tile_of(Vec3::new(-300.0, 0.0, 50.0)), (-3, 0));
}

#[test]
fn test_rebuild_replaces_contents() {
    let mut grid = TileGrid::new(100.0, 2, 2);
    grid.build(&[square_at(50.0, 50.0), square_at(150.0, 50.0)]);
    assert_eq!(grid.len(), 2);

    grid.build(&[square_at(150.0, 150.0)]);
    assert_eq!(grid.len(), 1);
    assert!(grid.polygons_in_tile(0, 0).is_empty());
    assert!(grid.polygons_in_tile(1, 0).is_empty());
    assert_eq!(grid.polygons_in_tile(1, 1).len(), 1);

    grid.build(&[]);
    assert!(grid.is_empty());
}

#[test]
fn test_covering_rounds_up() {
    let grid = TileGrid::covering(100.0, 250.0, 100.0);
    assert_eq!(grid.tile_extent(), (3, 1));
    assert_eq!(grid.tile_size(), 100.0);

    let mut empty = TileGrid::new(100.0, 0, 0);
    empty.build(&[square_at(0.0, 0.0)]);
    assert!(empty.is_empty());
    assert!(empty.polygons_in_tile(0, 0).is_empty());
}

#[test]
fn test_far_coordinates_saturate() {
    let mut grid = TileGrid::new(100.0, 2, 2);
    grid.build(&[square_at(-1.0e12, 1.0e12)]);

    assert_eq!(grid.tile_of(Vec3::new(-1.0e12, 0.0, 1.0e12)), (i32::MIN, i32::MAX));
    assert_eq!(grid.polygons_in_tile(0, 1).len(), 1);
    assert!(grid.polygons_in_tile(i32::MIN, i32::MAX).is_empty());
}
