//! ASCII rendering and export module for caves
//!
//! Provides functions to render a cave grid as ASCII text and write a
//! plain-text report next to the other exports.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use chrono::Local;

use crate::cave::{Cell, GridBuffer};
use crate::generator::GeneratedCave;

const REGION_GLYPHS: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Glyph for a region index. Indices wrap around the glyph table.
pub fn region_char(index: u32) -> char {
    if index == 0 {
        return '.';
    }
    REGION_GLYPHS[(index as usize - 1) % REGION_GLYPHS.len()] as char
}

/// Get ASCII character for a cell
pub fn cell_char(cell: Cell) -> char {
    match cell {
        Cell::Wall => '#',
        Cell::Open => '.',
        Cell::Region(index) => region_char(index),
        Cell::Bridge => '=',
    }
}

/// Render a grid to an ASCII string, top row first. Border cells are drawn
/// as `+`.
pub fn render_grid(grid: &GridBuffer) -> String {
    let width = grid.width();
    let height = grid.height();
    let border = grid.border();
    let mut result = String::with_capacity((width + 1) * height);

    for y in (0..height).rev() {
        for x in 0..width {
            let in_border = x < border
                || y < border
                || x >= width - border
                || y >= height - border;
            let ch = if in_border {
                '+'
            } else {
                cell_char(grid.get(x as i32, y as i32))
            };
            result.push(ch);
        }
        result.push('\n');
    }

    result
}

/// Print a grid to stdout
pub fn print_grid(grid: &GridBuffer) {
    print!("{}", render_grid(grid));
}

/// Export a text report: header, map, region table and bridge list.
pub fn export_report(cave: &GeneratedCave, path: impl AsRef<Path>) -> io::Result<()> {
    let mut file = File::create(path)?;
    let grid = cave.grid();
    let stats = cave.stats();

    // Header
    writeln!(file, "=== CAVE GENERATOR REPORT ===")?;
    writeln!(file, "Seed: {} ({})", cave.seed_text(), cave.seed().value)?;
    writeln!(file, "Size: {}x{} (border {})", grid.interior_width(), grid.interior_height(), grid.border())?;
    writeln!(file, "Generated: {}", Local::now().format("%Y-%m-%d %H:%M:%S"))?;
    writeln!(file)?;

    writeln!(file, "=== MAP ===")?;
    write!(file, "{}", render_grid(grid))?;
    writeln!(file)?;

    writeln!(file, "=== REGIONS ===")?;
    writeln!(file, "Regions: {}", cave.region_count())?;
    for region in cave.regions() {
        writeln!(
            file,
            "  {} {:>4}  {:>6} tiles  {:>5} edge{}",
            region_char(region.index),
            region.index,
            region.size,
            region.edge_tiles,
            if region.is_entry { "  (entry)" } else { "" }
        )?;
    }
    writeln!(file)?;

    writeln!(file, "=== BRIDGES ===")?;
    for bridge in cave.bridges() {
        writeln!(
            file,
            "  {} -> {}  ({},{}) -> ({},{})  d2={}",
            bridge.region_a,
            bridge.region_b,
            bridge.tile_a.x,
            bridge.tile_a.y,
            bridge.tile_b.x,
            bridge.tile_b.y,
            bridge.distance_sq
        )?;
    }
    writeln!(file)?;

    writeln!(file, "=== STATISTICS ===")?;
    let total = (stats.wall_cells + stats.open_cells).max(1);
    writeln!(file, "Wall: {} ({:.1}%)", stats.wall_cells, 100.0 * stats.wall_cells as f64 / total as f64)?;
    writeln!(file, "Open: {} ({:.1}%)", stats.open_cells, 100.0 * stats.open_cells as f64 / total as f64)?;
    writeln!(file, "Dissolved wall specks: {}", stats.dissolved_walls)?;
    writeln!(file, "Discarded rooms: {}", stats.discarded_rooms)?;
    writeln!(file, "Bridge cells: {}", stats.bridge_cells)?;
    writeln!(file, "Floor triangles: {}", stats.floor_triangles)?;
    writeln!(file, "Wall quads: {}", stats.wall_quads)?;
    if cave.meshes().interior.is_some() {
        writeln!(file, "Interior triangles: {}", stats.interior_triangles)?;
    }

    Ok(())
}
