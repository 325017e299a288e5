//! PNG, OBJ and JSON exports of a generated cave.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use image::{ImageBuffer, Rgb, RgbImage};
use serde::Serialize;

use crate::cave::{BridgeNode, Cell, GridBuffer};
use crate::error::Result;
use crate::generator::{GeneratedCave, GenerationStats, RegionSummary};
use crate::mesh::{GridTransform, Mesh, MeshKind, MeshSet};

const WALL_COLOR: [u8; 3] = [40, 36, 34];
const BORDER_COLOR: [u8; 3] = [20, 18, 17];
const OPEN_COLOR: [u8; 3] = [150, 150, 150];
const BRIDGE_COLOR: [u8; 3] = [230, 160, 60];

/// Region colour along a blue -> green -> yellow gradient.
fn region_color(index: u32, region_count: u32) -> [u8; 3] {
    let colors: [[f32; 3]; 3] = [
        [0.25, 0.45, 0.85],
        [0.35, 0.75, 0.45],
        [0.95, 0.85, 0.35],
    ];
    let t = if region_count <= 1 {
        0.0
    } else {
        (index.saturating_sub(1)) as f32 / (region_count - 1) as f32
    };
    let t_scaled = t.clamp(0.0, 1.0) * 2.0;
    let idx = (t_scaled as usize).min(1);
    let frac = t_scaled - idx as f32;
    let c1 = colors[idx];
    let c2 = colors[idx + 1];

    [
        ((c1[0] + (c2[0] - c1[0]) * frac) * 255.0) as u8,
        ((c1[1] + (c2[1] - c1[1]) * frac) * 255.0) as u8,
        ((c1[2] + (c2[2] - c1[2]) * frac) * 255.0) as u8,
    ]
}

/// Render the bordered grid as an image, one pixel per cell, top row first.
pub fn render_grid_image(grid: &GridBuffer, region_count: u32) -> RgbImage {
    let width = grid.width() as u32;
    let height = grid.height() as u32;
    let border = grid.border() as u32;
    let mut img: RgbImage = ImageBuffer::new(width, height);

    for (x, y, cell) in grid.iter() {
        let (x, y) = (x as u32, y as u32);
        let in_border = x < border
            || y < border
            || x >= width - border
            || y >= height - border;
        let color = if in_border {
            BORDER_COLOR
        } else {
            match cell {
                Cell::Wall => WALL_COLOR,
                Cell::Open => OPEN_COLOR,
                Cell::Region(index) => region_color(index, region_count),
                Cell::Bridge => BRIDGE_COLOR,
            }
        };
        img.put_pixel(x, height - 1 - y, Rgb(color));
    }

    img
}

/// Export the grid as a PNG, scaled up by an integer factor.
pub fn export_grid_png(grid: &GridBuffer, region_count: u32, scale: u32, path: impl AsRef<Path>) -> Result<()> {
    let img = render_grid_image(grid, region_count);
    let scale = scale.max(1);
    let img = if scale == 1 {
        img
    } else {
        image::imageops::resize(
            &img,
            img.width() * scale,
            img.height() * scale,
            image::imageops::FilterType::Nearest,
        )
    };
    img.save(path)?;
    Ok(())
}

/// Export a mesh set as Wavefront OBJ. Each mesh becomes its own object;
/// interior shades are written as `vt u 0`.
pub fn export_obj(meshes: &MeshSet, path: impl AsRef<Path>) -> Result<()> {
    let mut file = BufWriter::new(File::create(path)?);
    writeln!(file, "# cave_generator mesh export")?;

    let mut offset = 1u32;
    for mesh in meshes.meshes() {
        write_obj_object(&mut file, mesh, offset)?;
        offset += mesh.vertex_count() as u32;
    }

    file.flush()?;
    Ok(())
}

fn write_obj_object(out: &mut impl Write, mesh: &Mesh, offset: u32) -> Result<()> {
    writeln!(out, "o {}", mesh.kind.name())?;
    for v in &mesh.vertices {
        writeln!(out, "v {} {} {}", v[0], v[1], v[2])?;
    }

    // Only the interior carries texture coordinates, so its vt indices start at 1
    let textured = mesh.kind == MeshKind::Interior && !mesh.uvs.is_empty();
    if textured {
        for u in &mesh.uvs {
            writeln!(out, "vt {} 0", u)?;
        }
    }

    for [a, b, c] in mesh.faces() {
        if textured {
            writeln!(
                out,
                "f {}/{} {}/{} {}/{}",
                a + offset,
                a + 1,
                b + offset,
                b + 1,
                c + offset,
                c + 1
            )?;
        } else {
            writeln!(out, "f {} {} {}", a + offset, b + offset, c + offset)?;
        }
    }
    Ok(())
}

/// Everything a level loader needs, in one JSON document.
#[derive(Serialize)]
struct CaveDocument<'a> {
    seed: &'a str,
    width: usize,
    height: usize,
    border: usize,
    region_count: u32,
    regions: &'a [RegionSummary],
    bridges: &'a [BridgeNode],
    transform: &'a GridTransform,
    stats: &'a GenerationStats,
    rows: Vec<String>,
    meshes: &'a MeshSet,
}

/// Export the cave (grid rows, regions, bridges and meshes) as JSON.
pub fn export_json(cave: &GeneratedCave, path: impl AsRef<Path>) -> Result<()> {
    let grid = cave.grid();
    let document = CaveDocument {
        seed: cave.seed_text(),
        width: grid.interior_width(),
        height: grid.interior_height(),
        border: grid.border(),
        region_count: cave.region_count(),
        regions: cave.regions(),
        bridges: cave.bridges(),
        transform: cave.transform(),
        stats: cave.stats(),
        rows: crate::ascii::render_grid(grid).lines().map(str::to_string).collect(),
        meshes: cave.meshes(),
    };

    let file = BufWriter::new(File::create(path)?);
    serde_json::to_writer(file, &document)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CaveConfig, CavePreset};
    use crate::generator::generate;

    fn cave() -> GeneratedCave {
        let config = CaveConfig {
            width: 32,
            height: 24,
            seed: Some("export".to_string()),
            ..CavePreset::Enhanced.config()
        };
        generate(&config).unwrap()
    }

    #[test]
    fn test_grid_image_flips_rows() {
        let grid = GridBuffer::from_rows(&["#.", ".."]);
        let img = render_grid_image(&grid, 0);

        assert_eq!(img.dimensions(), (2, 2));
        assert_eq!(img.get_pixel(0, 0).0, WALL_COLOR);
        assert_eq!(img.get_pixel(0, 1).0, OPEN_COLOR);
    }

    #[test]
    fn test_region_gradient_ends() {
        assert_eq!(region_color(1, 5), [63, 114, 216]);
        assert_eq!(region_color(5, 5), [242, 216, 89]);
        assert_eq!(region_color(1, 1), region_color(1, 5));
    }

    #[test]
    fn test_export_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cave.png");
        let cave = cave();

        export_grid_png(cave.grid(), cave.region_count(), 3, &path).unwrap();
        let img = image::open(&path).unwrap();
        assert_eq!(img.width(), cave.grid().width() as u32 * 3);
        assert_eq!(img.height(), cave.grid().height() as u32 * 3);
    }

    #[test]
    fn test_export_obj() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cave.obj");
        let cave = cave();

        export_obj(cave.meshes(), &path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();

        let vertices: usize = cave.meshes().meshes().map(|m| m.vertex_count()).sum();
        let faces: usize = cave.meshes().meshes().map(|m| m.triangle_count()).sum();
        assert_eq!(text.lines().filter(|l| l.starts_with("v ")).count(), vertices);
        assert_eq!(text.lines().filter(|l| l.starts_with("f ")).count(), faces);
        assert!(text.contains("o floor"));
        assert!(text.contains("o walls"));
        assert!(text.contains("o interior"));
    }

    #[test]
    fn test_export_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cave.json");
        let cave = cave();

        export_json(&cave, &path).unwrap();
        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();

        assert_eq!(value["seed"], "export");
        assert_eq!(value["region_count"], cave.region_count());
        assert_eq!(value["rows"].as_array().unwrap().len(), cave.grid().height());
        assert_eq!(
            value["meshes"]["floor"]["triangles"].as_array().unwrap().len(),
            cave.meshes().floor.triangles.len()
        );
    }
}
