use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use image::RgbaImage;
use serde::Deserialize;

use crate::error::ManifestLoadError;

// ── Manifest ────────────────────────────────────────────────────────────────

/// Parsed manifest: symbolic tile name → image path, before any decoding.
///
/// The on-disk form is a flat JSON object:
///
/// ```json
/// { "grassTile": "tiles/grass.png", "waterTile": "tiles/water.png" }
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Manifest {
    entries: BTreeMap<String, PathBuf>,
}

impl Manifest {
    pub fn parse(text: &str) -> Result<Self, ManifestLoadError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Entries in name order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &Path)> {
        self.entries.iter().map(|(n, p)| (n.as_str(), p.as_path()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ── TileRegistry ────────────────────────────────────────────────────────────

/// Decoded tile images keyed by symbolic name.  Filled once at startup.
#[derive(Clone, Debug, Default)]
pub struct TileRegistry {
    images: HashMap<String, RgbaImage>,
}

impl TileRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `image` under `name`, replacing any previous image of that name.
    pub fn insert(&mut self, name: impl Into<String>, image: RgbaImage) {
        self.images.insert(name.into(), image);
    }

    pub fn get(&self, name: &str) -> Option<&RgbaImage> {
        self.images.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.images.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RgbaImage)> {
        self.images.iter().map(|(n, i)| (n.as_str(), i))
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, RgbaImage)> for TileRegistry {
    fn from_iter<I: IntoIterator<Item = (S, RgbaImage)>>(iter: I) -> Self {
        let mut registry = Self::new();
        for (name, image) in iter {
            registry.insert(name, image);
        }
        registry
    }
}

// ── Loading ─────────────────────────────────────────────────────────────────

/// Read the manifest at `path` and decode every image it names.
///
/// Relative image paths are resolved against the manifest's own directory.
/// Any unreadable or undecodable image aborts the whole load.
pub fn load_manifest(path: impl AsRef<Path>) -> Result<TileRegistry, ManifestLoadError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| ManifestLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let manifest = Manifest::parse(&text)?;
    let base = path.parent().unwrap_or_else(|| Path::new(""));
    load_images(&manifest, base)
}

/// Decode every manifest entry, resolving relative paths against `base`.
pub fn load_images(manifest: &Manifest, base: &Path) -> Result<TileRegistry, ManifestLoadError> {
    let mut registry = TileRegistry::new();

    for (name, rel) in manifest.entries() {
        let image_path = base.join(rel);
        let image = image::open(&image_path).map_err(|source| ManifestLoadError::Image {
            name: name.to_owned(),
            path: image_path.clone(),
            source,
        })?;
        let rgba = image.to_rgba8();
        tracing::debug!(
            tile = name,
            path = %image_path.display(),
            width = rgba.width(),
            height = rgba.height(),
            "tile image decoded"
        );
        registry.insert(name, rgba);
    }

    tracing::info!(tiles = registry.len(), "tile manifest loaded");
    Ok(registry)
}
