//! Cave generation pipeline
//!
//! `generate` runs every stage in order: fill, smooth, segment, link,
//! carve, border, mesh. The result owns the finished grid and meshes and
//! answers "which region is here" queries for the rest of the game.

use std::collections::BTreeSet;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use crate::cave::{
    build_mst, carve_bridges, segment, BridgeNode, CaveSimulator, Cell, GridBuffer, OUTSIDE_CODE,
};
use crate::config::CaveConfig;
use crate::error::Result;
use crate::mesh::{ContourMesher, GridTransform, MeshSet};
use crate::seeds::CaveSeed;

/// What the rest of the game needs to know about a surviving region.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct RegionSummary {
    pub index: u32,
    pub size: usize,
    pub edge_tiles: usize,
    pub is_entry: bool,
}

/// Counters collected while generating.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct GenerationStats {
    pub wall_cells: usize,
    pub open_cells: usize,
    pub dissolved_walls: usize,
    pub discarded_rooms: usize,
    pub bridge_cells: usize,
    pub floor_triangles: usize,
    pub wall_quads: usize,
    pub interior_triangles: usize,
}

/// A finished cave.
#[derive(Clone, Debug)]
pub struct GeneratedCave {
    config: CaveConfig,
    seed: CaveSeed,
    grid: GridBuffer,
    regions: Vec<RegionSummary>,
    bridges: Vec<BridgeNode>,
    meshes: MeshSet,
    transform: GridTransform,
    stats: GenerationStats,
    marked: BTreeSet<u32>,
}

/// Generate a cave. Deterministic for a given seed and configuration.
pub fn generate(config: &CaveConfig) -> Result<GeneratedCave> {
    config.validate()?;
    let seed = CaveSeed::resolve(config.seed.as_deref());
    log::debug!("generating {}x{} cave with seed {}", config.width, config.height, seed);

    let mut grid = GridBuffer::new(config.width, config.height);
    let simulator = CaveSimulator::new(
        config.width,
        config.height,
        config.neighborhood,
        config.fill_percent,
        config.wall_rim,
        config.entry_pocket,
    );
    let mut rng = ChaCha8Rng::seed_from_u64(seed.stage("fill"));
    simulator.random_fill(&mut grid, &mut rng)?;
    simulator.smooth(&mut grid, config.smoothing_iterations)?;

    let segmentation = segment(&mut grid, config.wall_threshold, config.room_threshold)?;
    let bridges = build_mst(&segmentation.regions);
    let bridge_cells = carve_bridges(&mut grid, &bridges, config.bridge_radius)?;

    let regions: Vec<RegionSummary> = segmentation
        .regions
        .iter()
        .map(|r| RegionSummary {
            index: r.index,
            size: r.size(),
            edge_tiles: r.edge_tiles.len(),
            is_entry: r.is_entry,
        })
        .collect();

    grid.set_border(config.border_size)?;

    let mesher = ContourMesher::new(
        &grid,
        config.square_size,
        config.wall_height,
        regions.len() as u32,
    );
    let meshes = mesher.build(config.interior_surface);
    let transform = mesher.transform();

    let stats = GenerationStats {
        wall_cells: grid.count(|c| c.is_wall()),
        open_cells: grid.count(|c| c.is_open()),
        dissolved_walls: segmentation.dissolved_walls,
        discarded_rooms: segmentation.discarded_rooms,
        bridge_cells,
        floor_triangles: meshes.floor.triangle_count(),
        wall_quads: meshes.walls.triangle_count() / 2,
        interior_triangles: meshes.interior.as_ref().map_or(0, |m| m.triangle_count()),
    };

    log::info!(
        "cave {}: {} regions, {} bridges, {} floor triangles, {} wall quads",
        seed,
        regions.len(),
        bridges.len(),
        stats.floor_triangles,
        stats.wall_quads
    );

    Ok(GeneratedCave {
        config: config.clone(),
        seed,
        grid,
        regions,
        bridges,
        meshes,
        transform,
        stats,
        marked: BTreeSet::new(),
    })
}

impl GeneratedCave {
    pub fn config(&self) -> &CaveConfig {
        &self.config
    }

    pub fn seed(&self) -> &CaveSeed {
        &self.seed
    }

    /// The seed text this cave was generated from, for reproducing it.
    pub fn seed_text(&self) -> &str {
        &self.seed.text
    }

    /// The finished, bordered grid.
    pub fn grid(&self) -> &GridBuffer {
        &self.grid
    }

    pub fn regions(&self) -> &[RegionSummary] {
        &self.regions
    }

    pub fn region_count(&self) -> u32 {
        self.regions.len() as u32
    }

    pub fn bridges(&self) -> &[BridgeNode] {
        &self.bridges
    }

    pub fn meshes(&self) -> &MeshSet {
        &self.meshes
    }

    pub fn transform(&self) -> &GridTransform {
        &self.transform
    }

    pub fn stats(&self) -> &GenerationStats {
        &self.stats
    }

    /// Cell at bordered grid coordinates, `None` outside the grid.
    pub fn cell_at(&self, x: i32, y: i32) -> Option<Cell> {
        self.grid.in_range(x, y).then(|| self.grid.get(x, y))
    }

    /// Region code at bordered grid coordinates: 1..=N for a region, N + 1
    /// for a bridge, 0 or below for everything else.
    pub fn region_at(&self, x: i32, y: i32) -> i32 {
        self.cell_at(x, y)
            .map_or(OUTSIDE_CODE, |cell| cell.code(self.region_count()))
    }

    /// Region code under a world position.
    pub fn region_at_world(&self, position: [f32; 3]) -> i32 {
        let (x, y) = self.transform.world_to_grid(position);
        self.region_at(x, y)
    }

    /// Record that a region has been visited. Returns `true` the first time a
    /// valid region index is marked.
    pub fn mark_region(&mut self, index: u32) -> bool {
        if index == 0 || index > self.region_count() {
            log::debug!("ignoring mark for unknown region {}", index);
            return false;
        }
        self.marked.insert(index)
    }

    pub fn is_marked(&self, index: u32) -> bool {
        self.marked.contains(&index)
    }

    pub fn marked_regions(&self) -> impl Iterator<Item = u32> + '_ {
        self.marked.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cave::{Tile, WALL_CODE};
    use crate::config::{CavePreset, Neighborhood};
    use crate::error::CaveError;
    use crate::tilemap::Tilemap;
    use std::collections::VecDeque;

    fn seeded(preset: CavePreset, seed: &str) -> CaveConfig {
        CaveConfig {
            width: 48,
            height: 36,
            seed: Some(seed.to_string()),
            ..preset.config()
        }
    }

    #[test]
    fn test_generation_is_deterministic() {
        for preset in CavePreset::all() {
            let config = seeded(*preset, "determinism");
            let a = generate(&config).unwrap();
            let b = generate(&config).unwrap();

            assert_eq!(a.grid().interior(), b.grid().interior());
            assert_eq!(a.bridges(), b.bridges());
            assert_eq!(a.meshes(), b.meshes());
            assert_eq!(a.stats(), b.stats());
        }
    }

    #[test]
    fn test_different_seeds_differ() {
        let a = generate(&seeded(CavePreset::Classic, "one")).unwrap();
        let b = generate(&seeded(CavePreset::Classic, "two")).unwrap();
        assert_ne!(a.grid().interior(), b.grid().interior());
    }

    #[test]
    fn test_open_grid_scenario() {
        let config = CaveConfig {
            width: 10,
            height: 10,
            seed: Some("open".to_string()),
            fill_percent: 0,
            smoothing_iterations: 0,
            wall_rim: false,
            room_threshold: 0,
            wall_threshold: 0,
            border_size: 0,
            ..CaveConfig::default()
        };
        let cave = generate(&config).unwrap();

        assert_eq!(cave.region_count(), 1);
        assert!(cave.regions()[0].is_entry);
        assert_eq!(cave.regions()[0].size, 100);
        assert!(cave.bridges().is_empty());
        assert_eq!(cave.stats().floor_triangles, 0);
        assert_eq!(cave.stats().wall_quads, 0);
    }

    #[test]
    fn test_solid_grid_scenario() {
        let n = 10;
        let config = CaveConfig {
            width: n,
            height: n,
            seed: Some("solid".to_string()),
            fill_percent: 100,
            wall_threshold: 0,
            room_threshold: 0,
            border_size: 0,
            ..CaveConfig::default()
        };
        let cave = generate(&config).unwrap();

        assert_eq!(cave.region_count(), 0);
        assert_eq!(cave.stats().wall_cells, n * n);
        assert_eq!(cave.stats().floor_triangles, 2 * (n - 1) * (n - 1));
        assert_eq!(cave.stats().wall_quads, 4 * (n - 1));
    }

    #[test]
    fn test_every_cell_is_labelled() {
        for preset in CavePreset::all() {
            let cave = generate(&seeded(*preset, "partition")).unwrap();
            let n = cave.region_count();
            for (_, _, cell) in cave.grid().interior().iter() {
                match cell {
                    Cell::Wall | Cell::Bridge => {}
                    Cell::Region(i) => assert!(*i >= 1 && *i <= n),
                    Cell::Open => panic!("unlabelled open cell"),
                }
            }
        }
    }

    #[test]
    fn test_all_open_cells_are_connected() {
        for (preset, seed) in [
            (CavePreset::Classic, "caves"),
            (CavePreset::Classic, "more caves"),
            (CavePreset::Enhanced, "caves"),
        ] {
            let cave = generate(&seeded(preset, seed)).unwrap();
            let interior = cave.grid().interior();
            let open: Vec<Tile> = interior
                .iter()
                .filter(|(_, _, c)| c.is_open())
                .map(|(x, y, _)| Tile::new(x as i32, y as i32))
                .collect();
            if open.is_empty() {
                continue;
            }

            let mut seen = Tilemap::new_with(interior.width, interior.height, false);
            let mut queue = VecDeque::from([open[0]]);
            seen.set(open[0].x as usize, open[0].y as usize, true);
            let mut reached = 0;
            while let Some(tile) = queue.pop_front() {
                reached += 1;
                for n in tile.neighbors() {
                    if interior.try_get(n.x, n.y).is_some_and(|c| c.is_open())
                        && seen.try_get(n.x, n.y) == Some(&false)
                    {
                        seen.set(n.x as usize, n.y as usize, true);
                        queue.push_back(n);
                    }
                }
            }
            assert_eq!(reached, open.len(), "{} / {}", preset, seed);
            assert_eq!(cave.bridges().len(), cave.regions().len().saturating_sub(1));
        }
    }

    #[test]
    fn test_region_lookup() {
        let mut cave = generate(&seeded(CavePreset::Enhanced, "lookup")).unwrap();
        let n = cave.region_count();
        let border = cave.grid().border() as i32;

        // The entry pocket sits just inside the border
        let entry = cave.region_at(border, border);
        assert!(entry >= 1 && entry <= n as i32 + 1);
        assert_eq!(cave.region_at(0, 0), WALL_CODE);
        assert_eq!(cave.region_at(-1, 3), OUTSIDE_CODE);
        assert_eq!(cave.region_at(10_000, 3), OUTSIDE_CODE);

        let world = cave.transform().grid_to_world(border, border);
        assert_eq!(cave.region_at_world(world), entry);

        assert!(cave.mark_region(1));
        assert!(!cave.mark_region(1));
        assert!(!cave.mark_region(0));
        assert!(!cave.mark_region(n + 1));
        assert!(cave.is_marked(1));
        assert_eq!(cave.marked_regions().collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn test_interior_surface_follows_config() {
        let enhanced = generate(&seeded(CavePreset::Enhanced, "surface")).unwrap();
        let interior = enhanced.meshes().interior.as_ref().unwrap();
        assert_eq!(interior.uvs.len(), interior.vertex_count());
        assert!(interior.uvs.iter().all(|&u| (0.0..=1.0).contains(&u)));

        let classic = generate(&seeded(CavePreset::Classic, "surface")).unwrap();
        assert!(classic.meshes().interior.is_none());
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = CaveConfig {
            neighborhood: Neighborhood::Window { lower: 0.9, upper: 0.1, edge_penalty: 0.5 },
            ..CaveConfig::default()
        };
        assert!(generate(&config).is_err());
    }

    #[test]
    fn test_out_of_range_sizes_are_errors() {
        let config = CaveConfig {
            bridge_radius: 46_341,
            ..seeded(CavePreset::Classic, "determinism")
        };
        assert!(matches!(generate(&config), Err(CaveError::InvalidConfig(_))));

        let config = CaveConfig {
            width: 20,
            height: 20,
            border_size: 1 << 32,
            ..seeded(CavePreset::Classic, "border")
        };
        assert!(matches!(generate(&config), Err(CaveError::InvalidConfig(_))));
    }

    #[test]
    fn test_wide_border_matches_mesh_extent() {
        let config = CaveConfig {
            width: 12,
            height: 10,
            border_size: 6,
            ..seeded(CavePreset::Classic, "border")
        };
        let cave = generate(&config).unwrap();

        assert_eq!(cave.grid().width(), 24);
        assert_eq!(cave.transform().width, 24);
        assert_eq!(cave.region_at(5, 5), WALL_CODE);
        assert_eq!(cave.region_at(24, 5), OUTSIDE_CODE);
    }

    #[test]
    fn test_bordered_grid_is_final() {
        let cave = generate(&seeded(CavePreset::Classic, "final")).unwrap();
        let mut grid = cave.grid().clone();
        assert!(grid.set(1, 1, Cell::Wall).is_err());
        assert_eq!(grid.width(), 48 + 2);
    }
}
