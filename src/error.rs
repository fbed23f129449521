use std::path::PathBuf;

use thiserror::Error;

// ── Load-time errors ────────────────────────────────────────────────────────

/// The tile manifest could not be turned into a registry.  Always fatal.
#[derive(Debug, Error)]
pub enum ManifestLoadError {
    #[error("failed to read manifest {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed manifest: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("failed to load image for tile '{name}' from {path:?}: {source}")]
    Image {
        name: String,
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// The level file could not be read.  Always fatal.
#[derive(Debug, Error)]
pub enum LevelLoadError {
    #[error("failed to read level {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Level lines that cannot form a rectangular grid.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MalformedLevel {
    #[error("level has no rows")]
    Empty,

    #[error("first level row has no columns")]
    NoColumns,

    #[error("level row {row} has {found} columns, expected {expected}")]
    Ragged { row: usize, expected: usize, found: usize },
}

// ── GPU errors ──────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to create surface: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),

    #[error("no suitable GPU adapter found: {0}")]
    RequestAdapter(#[from] wgpu::RequestAdapterError),

    #[error("failed to create device: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),

    #[error("surface reports no supported texture formats")]
    NoSurfaceFormat,

    #[error("tile images need a {width}x{height} atlas; the device allows at most {limit}x{limit}")]
    AtlasTooLarge { width: u32, height: u32, limit: u32 },
}

// ── Top-level ───────────────────────────────────────────────────────────────

/// Everything that can stop the engine from starting or running.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Manifest(#[from] ManifestLoadError),

    #[error(transparent)]
    Level(#[from] LevelLoadError),

    #[error(transparent)]
    Malformed(#[from] MalformedLevel),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),
}
