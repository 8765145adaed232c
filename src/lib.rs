pub mod biome;
pub mod climate;
pub mod config;
pub mod elevation;
pub mod engine;
pub mod error;
pub mod grid;
pub mod hydrology;
pub mod lod;
pub mod minerals;
pub mod noise;
pub mod plates;
pub mod render;
pub mod rng;
pub mod world;

pub use biome::{BiomeType, SoilType};
pub use config::SimulationConfig;
pub use engine::{GeoEngine, Timing};
pub use error::GenError;
pub use lod::LodLevel;
pub use minerals::MineralType;
pub use render::{Color, VisualizationMode, recolor};
pub use world::{TerrainCell, WorldData, WorldStats};
