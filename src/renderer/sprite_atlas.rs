use std::collections::HashMap;

use image::RgbaImage;
use wgpu::util::DeviceExt;

use crate::error::RenderError;
use crate::manifest::TileRegistry;

// ── SpriteData ───────────────────────────────────────────────────────────────

/// Atlas region of one registered tile image.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SpriteData {
    pub uv_min: [f32; 2],
    pub uv_max: [f32; 2],
}

// ── Shelf packing (pure, GPU-free) ───────────────────────────────────────────

/// One image's position inside the packed atlas.
#[derive(Clone, Debug, PartialEq)]
pub struct Placement {
    pub name: String,
    pub atlas_x: u32,
    pub atlas_y: u32,
    pub pixel_w: u32,
    pub pixel_h: u32,
}

/// Result of [`pack`]: placements plus power-of-two atlas dimensions.
#[derive(Clone, Debug, PartialEq)]
pub struct Packing {
    pub placements: Vec<Placement>,
    pub width: u32,
    pub height: u32,
}

/// Shelf-pack `(name, width, height)` items into rows no wider than
/// `max_width`, tallest first.  Ties keep name order so the layout is stable
/// across runs.  An item wider than `max_width` widens the atlas instead of
/// being dropped.
pub fn pack(items: &[(&str, u32, u32)], max_width: u32) -> Packing {
    let mut order: Vec<&(&str, u32, u32)> = items.iter().collect();
    order.sort_by(|a, b| b.2.cmp(&a.2).then_with(|| a.0.cmp(b.0)));

    let row_limit = items.iter().map(|&(_, w, _)| w).fold(max_width, u32::max);

    let mut placements = Vec::with_capacity(items.len());
    let (mut cur_x, mut cur_y, mut shelf_h) = (0u32, 0u32, 0u32);

    for &&(name, w, h) in &order {
        if cur_x + w > row_limit {
            cur_y += shelf_h;
            cur_x = 0;
            shelf_h = 0;
        }
        placements.push(Placement {
            name: name.to_owned(),
            atlas_x: cur_x,
            atlas_y: cur_y,
            pixel_w: w,
            pixel_h: h,
        });
        cur_x += w;
        shelf_h = shelf_h.max(h);
    }

    Packing {
        placements,
        width: row_limit.next_power_of_two(),
        height: (cur_y + shelf_h).next_power_of_two().max(1),
    }
}

/// Pack `items` so the atlas fits in a `limit`×`limit` texture.
///
/// Starts at `max_width` rows and doubles the row width while the atlas is
/// too tall, trading height for width until it fits or the row reaches
/// `limit`.
pub fn pack_within(
    items: &[(&str, u32, u32)],
    max_width: u32,
    limit: u32,
) -> Result<Packing, RenderError> {
    let mut row_width = max_width.min(limit);
    loop {
        let packing = pack(items, row_width);
        if packing.width <= limit && packing.height <= limit {
            return Ok(packing);
        }
        if packing.width >= limit {
            return Err(RenderError::AtlasTooLarge {
                width: packing.width,
                height: packing.height,
                limit,
            });
        }
        row_width = packing.width * 2;
    }
}

/// UV rectangle for a placement, pulled in by half a texel on every side so
/// nearest sampling never reads a neighbouring sprite.
fn uv_rect(p: &Placement, atlas_w: u32, atlas_h: u32) -> SpriteData {
    let (aw, ah) = (atlas_w as f32, atlas_h as f32);
    SpriteData {
        uv_min: [(p.atlas_x as f32 + 0.5) / aw, (p.atlas_y as f32 + 0.5) / ah],
        uv_max: [
            ((p.atlas_x + p.pixel_w) as f32 - 0.5) / aw,
            ((p.atlas_y + p.pixel_h) as f32 - 0.5) / ah,
        ],
    }
}

/// Copy every registry image into one RGBA atlas image no larger than
/// `limit` on either side.
pub fn composite(
    registry: &TileRegistry,
    max_width: u32,
    limit: u32,
) -> Result<(RgbaImage, HashMap<String, SpriteData>), RenderError> {
    let items: Vec<(&str, u32, u32)> = registry
        .iter()
        .map(|(name, img)| (name, img.width(), img.height()))
        .collect();
    let packing = pack_within(&items, max_width, limit)?;

    let mut atlas = RgbaImage::new(packing.width, packing.height);
    let mut sprites = HashMap::with_capacity(packing.placements.len());

    for p in &packing.placements {
        let Some(img) = registry.get(&p.name) else { continue };
        for (dx, dy, px) in img.enumerate_pixels() {
            atlas.put_pixel(p.atlas_x + dx, p.atlas_y + dy, *px);
        }
        sprites.insert(p.name.clone(), uv_rect(p, packing.width, packing.height));
    }

    Ok((atlas, sprites))
}

// ── SpriteAtlas ──────────────────────────────────────────────────────────────

pub struct SpriteAtlas {
    pub sprites: HashMap<String, SpriteData>,
    pub texture_view: wgpu::TextureView,
    pub sampler: wgpu::Sampler,
}

impl SpriteAtlas {
    /// Preferred maximum row width of the packed atlas in pixels.
    pub const ATLAS_WIDTH: u32 = 512;

    /// Pack every image in `registry` and upload the result to the GPU.
    /// Fails when the packed atlas exceeds the device's 2D texture limit.
    pub fn from_registry(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        registry: &TileRegistry,
    ) -> Result<Self, RenderError> {
        let limit = device.limits().max_texture_dimension_2d;
        let (atlas_img, sprites) = composite(registry, Self::ATLAS_WIDTH, limit)?;
        tracing::debug!(
            sprites = sprites.len(),
            width = atlas_img.width(),
            height = atlas_img.height(),
            "sprite atlas baked"
        );
        let (texture_view, sampler) = Self::upload(device, queue, &atlas_img);
        Ok(Self { sprites, texture_view, sampler })
    }

    pub fn get(&self, name: &str) -> Option<SpriteData> {
        self.sprites.get(name).copied()
    }

    fn upload(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        img: &RgbaImage,
    ) -> (wgpu::TextureView, wgpu::Sampler) {
        let (w, h) = img.dimensions();
        let texture = device.create_texture_with_data(
            queue,
            &wgpu::TextureDescriptor {
                label: Some("sprite_atlas_tex"),
                size: wgpu::Extent3d { width: w, height: h, depth_or_array_layers: 1 },
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format: wgpu::TextureFormat::Rgba8UnormSrgb,
                usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
                view_formats: &[],
            },
            wgpu::util::TextureDataOrder::LayerMajor,
            img.as_raw(),
        );
        let texture_view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });
        (texture_view, sampler)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
