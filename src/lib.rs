pub mod canvas;
pub mod engine;
pub mod error;
pub mod grid;
pub mod level;
pub mod manifest;
pub mod renderer;
pub mod scene;
pub mod tiles;

pub use canvas::{CanvasConfig, Color};
pub use engine::EngineBuilder;
pub use error::{Error, LevelLoadError, ManifestLoadError, MalformedLevel, RenderError};
pub use grid::{Grid, Tile};
pub use level::{Level, load_level};
pub use manifest::{Manifest, TileRegistry, load_manifest};
pub use renderer::{DrawCall, DrawRecorder, DrawTarget, Rect, draw_grid};
pub use scene::Scene;
pub use tiles::{TileKind, resolve};
