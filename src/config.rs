//! Generation parameters and presets.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CaveError, Result};

/// Largest bordered extent along either axis. Keeps every coordinate and
/// doubled-lattice key comfortably inside `i32`.
const MAX_EXTENT: usize = i32::MAX as usize / 4;

/// Neighbourhood rule used by the smoothing passes.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum Neighborhood {
    /// The 8 surrounding cells with a fixed majority of 4. Cells on the map
    /// edge get one extra wall vote; missing neighbours are not counted.
    Moore,
    /// The 24 other cells of a 5x5 window, as a wall fraction. Window cells
    /// that fall off the map count as `edge_penalty` of a wall.
    Window {
        lower: f32,
        upper: f32,
        edge_penalty: f32,
    },
}

impl Neighborhood {
    pub fn window() -> Self {
        Neighborhood::Window {
            lower: 0.45,
            upper: 0.55,
            edge_penalty: 0.5,
        }
    }
}

/// Rectangle anchored at the grid origin that is forced open and never
/// smoothed, so the level always has an entrance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryPocket {
    pub width: usize,
    pub height: usize,
}

impl EntryPocket {
    pub fn contains(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }
}

/// Parameter presets
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum CavePreset {
    /// Moore smoothing, solid rim, floor and wall meshes only
    #[default]
    Classic,
    /// Window smoothing, entry pocket and an interior surface
    Enhanced,
}

impl CavePreset {
    pub fn all() -> &'static [Self] {
        &[Self::Classic, Self::Enhanced]
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Classic => "Majority-vote caves with a solid rim",
            Self::Enhanced => "Window-smoothed caves with an entrance and interior surface",
        }
    }

    pub fn config(&self) -> CaveConfig {
        match self {
            Self::Classic => CaveConfig::default(),
            Self::Enhanced => CaveConfig {
                fill_percent: 48,
                smoothing_iterations: 6,
                neighborhood: Neighborhood::window(),
                wall_rim: false,
                entry_pocket: Some(EntryPocket { width: 4, height: 4 }),
                interior_surface: true,
                ..CaveConfig::default()
            },
        }
    }
}

impl std::fmt::Display for CavePreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Classic => write!(f, "classic"),
            Self::Enhanced => write!(f, "enhanced"),
        }
    }
}

impl std::str::FromStr for CavePreset {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "classic" => Ok(Self::Classic),
            "enhanced" => Ok(Self::Enhanced),
            other => Err(format!("unknown preset '{}' (expected classic or enhanced)", other)),
        }
    }
}

/// Flat configuration for one generation run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaveConfig {
    /// Interior grid width in cells.
    pub width: usize,

    /// Interior grid height in cells.
    pub height: usize,

    /// Seed text. `None` derives one from the clock.
    pub seed: Option<String>,

    /// Chance (0-100) that an interior cell starts as wall.
    pub fill_percent: u32,

    /// Number of smoothing passes.
    pub smoothing_iterations: usize,

    pub neighborhood: Neighborhood,

    /// Force the outermost ring of cells to wall before smoothing.
    pub wall_rim: bool,

    pub entry_pocket: Option<EntryPocket>,

    /// Wall pockets with fewer tiles are opened up.
    pub wall_threshold: usize,

    /// Rooms with fewer tiles are filled in, unless they hold the entrance.
    pub room_threshold: usize,

    /// Bridges clear every cell strictly closer than this to the line.
    pub bridge_radius: i32,

    /// World size of one grid square.
    pub square_size: f32,

    /// Height of the wall skirt.
    pub wall_height: f32,

    /// Width of the solid padding added around the finished grid.
    pub border_size: usize,

    /// Emit the region-shaded interior surface.
    pub interior_surface: bool,
}

impl Default for CaveConfig {
    fn default() -> Self {
        Self {
            width: 80,
            height: 60,
            seed: None,
            fill_percent: 47,
            smoothing_iterations: 5,
            neighborhood: Neighborhood::Moore,
            wall_rim: true,
            entry_pocket: None,
            wall_threshold: 50,
            room_threshold: 50,
            bridge_radius: 2,
            square_size: 1.0,
            wall_height: 5.0,
            border_size: 1,
            interior_surface: false,
        }
    }
}

impl CaveConfig {
    /// Reject parameter combinations the pipeline cannot honour.
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(CaveError::InvalidConfig(format!(
                "grid must be at least 1x1, got {}x{}",
                self.width, self.height
            )));
        }
        let padded = |extent: usize| {
            self.border_size
                .checked_mul(2)
                .and_then(|b| b.checked_add(extent))
                .filter(|&total| total <= MAX_EXTENT)
        };
        if self.width > MAX_EXTENT || self.height > MAX_EXTENT {
            return Err(CaveError::InvalidConfig("grid is too large".to_string()));
        }
        if padded(self.width).is_none() || padded(self.height).is_none() {
            return Err(CaveError::InvalidConfig(format!(
                "border_size {} makes the {}x{} grid too large",
                self.border_size, self.width, self.height
            )));
        }
        if self.fill_percent > 100 {
            return Err(CaveError::InvalidConfig(format!(
                "fill_percent must be within 0-100, got {}",
                self.fill_percent
            )));
        }
        if self.bridge_radius < 1 {
            return Err(CaveError::InvalidConfig(format!(
                "bridge_radius must be at least 1, got {}",
                self.bridge_radius
            )));
        }
        if self.bridge_radius as usize > self.width.max(self.height) {
            return Err(CaveError::InvalidConfig(format!(
                "bridge_radius must not exceed the grid size {}, got {}",
                self.width.max(self.height),
                self.bridge_radius
            )));
        }
        if self.square_size <= 0.0 || !self.square_size.is_finite() {
            return Err(CaveError::InvalidConfig(format!(
                "square_size must be positive, got {}",
                self.square_size
            )));
        }
        if self.wall_height < 0.0 || !self.wall_height.is_finite() {
            return Err(CaveError::InvalidConfig(format!(
                "wall_height must be non-negative, got {}",
                self.wall_height
            )));
        }
        if let Neighborhood::Window { lower, upper, edge_penalty } = self.neighborhood {
            if !(0.0..=1.0).contains(&lower) || !(0.0..=1.0).contains(&upper) || lower > upper {
                return Err(CaveError::InvalidConfig(format!(
                    "window thresholds must satisfy 0 <= lower <= upper <= 1, got {} and {}",
                    lower, upper
                )));
            }
            if !(0.0..=1.0).contains(&edge_penalty) {
                return Err(CaveError::InvalidConfig(format!(
                    "edge_penalty must be within 0-1, got {}",
                    edge_penalty
                )));
            }
        }
        Ok(())
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    pub fn to_json_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let text = serde_json::to_string_pretty(self)?;
        fs::write(path, text)?;
        Ok(())
    }
}
