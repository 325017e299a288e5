//! Procedural cave generation library
//!
//! Re-exports modules for use by binaries and tools.

pub mod ascii;
pub mod cave;
pub mod config;
pub mod error;
pub mod export;
pub mod generator;
pub mod mesh;
pub mod seeds;
pub mod tilemap;

pub use config::{CaveConfig, CavePreset, EntryPocket, Neighborhood};
pub use error::{CaveError, Result};
pub use generator::{generate, GeneratedCave, GenerationStats, RegionSummary};
