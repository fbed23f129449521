use std::sync::Arc;

use image::RgbaImage;
use wgpu::util::DeviceExt;
use winit::dpi::PhysicalSize;
use winit::window::Window;

use super::pipeline::{
    TilePipeline, TileVertex, create_tile_pipeline, orthographic_projection, quad_vertices,
};
use super::sprite_atlas::SpriteAtlas;
use super::{DrawTarget, Rect};
use crate::canvas::CanvasConfig;
use crate::error::RenderError;
use crate::manifest::TileRegistry;

// ── FrameBatch ──────────────────────────────────────────────────────────────

/// Collects one frame's tile draws as atlas-textured quads.
pub struct FrameBatch<'a> {
    atlas: &'a SpriteAtlas,
    vertices: Vec<TileVertex>,
}

impl<'a> FrameBatch<'a> {
    pub fn new(atlas: &'a SpriteAtlas) -> Self {
        Self { atlas, vertices: Vec::new() }
    }

    pub fn into_vertices(self) -> Vec<TileVertex> {
        self.vertices
    }
}

impl DrawTarget for FrameBatch<'_> {
    fn draw_image(&mut self, name: &'static str, _image: &RgbaImage, rect: Rect) {
        // Every registry image is baked into the atlas, so a miss here means
        // the atlas and the registry came from different scenes.
        let Some(sprite) = self.atlas.get(name) else {
            tracing::trace!(tile = name, "no atlas region; skipping draw");
            return;
        };
        self.vertices.extend_from_slice(&quad_vertices(rect, sprite.uv_min, sprite.uv_max));
    }
}

// ── Renderer ────────────────────────────────────────────────────────────────

pub struct Renderer {
    pub window: Arc<Window>,
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    tile_pipeline: TilePipeline,
    projection_bind_group: wgpu::BindGroup,
    atlas_bind_group: wgpu::BindGroup,
    atlas: SpriteAtlas,
    clear_color: wgpu::Color,
}

impl Renderer {
    /// Set up the surface and pipeline for `window` and bake `registry` into
    /// the sprite atlas.  The projection always spans `canvas`, independent of
    /// the physical window size.
    pub async fn new(
        window: Arc<Window>,
        canvas: &CanvasConfig,
        registry: &TileRegistry,
    ) -> Result<Self, RenderError> {
        let size = window.inner_size();

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(Arc::clone(&window))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                compatible_surface: Some(&surface),
                ..Default::default()
            })
            .await?;

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor::default())
            .await?;

        let caps = surface.get_capabilities(&adapter);
        let format = *caps.formats.first().ok_or(RenderError::NoSurfaceFormat)?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let tile_pipeline = create_tile_pipeline(&device, format);

        let proj = orthographic_projection(canvas.width as f32, canvas.height as f32);
        let projection_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("projection_buffer"),
            contents: bytemuck::cast_slice(&proj),
            usage: wgpu::BufferUsages::UNIFORM,
        });
        let projection_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("projection_bg"),
            layout: &tile_pipeline.projection_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: projection_buffer.as_entire_binding(),
            }],
        });

        let atlas = SpriteAtlas::from_registry(&device, &queue, registry)?;
        let atlas_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("sprite_atlas_bg"),
            layout: &tile_pipeline.atlas_bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&atlas.texture_view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&atlas.sampler),
                },
            ],
        });

        let [r, g, b, a] = canvas.clear_color.0;
        let clear_color = wgpu::Color { r: r as f64, g: g as f64, b: b as f64, a: a as f64 };

        tracing::info!(
            adapter = %adapter.get_info().name,
            ?format,
            width = config.width,
            height = config.height,
            "renderer initialised"
        );

        Ok(Self {
            window,
            surface,
            device,
            queue,
            config,
            tile_pipeline,
            projection_bind_group,
            atlas_bind_group,
            atlas,
            clear_color,
        })
    }

    pub fn atlas(&self) -> &SpriteAtlas {
        &self.atlas
    }

    /// Reconfigure the swapchain for a new physical size.  The canvas
    /// projection is unaffected.
    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }
        self.config.width = new_size.width;
        self.config.height = new_size.height;
        self.surface.configure(&self.device, &self.config);
    }

    /// Clear the canvas and draw `vertices` in submission order.
    pub fn render(&mut self, vertices: &[TileVertex]) -> Result<(), wgpu::SurfaceError> {
        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor { label: Some("frame") });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("tiles"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    depth_slice: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            if !vertices.is_empty() {
                let vbuf = self.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("tile_vertex_buffer"),
                    contents: bytemuck::cast_slice(vertices),
                    usage: wgpu::BufferUsages::VERTEX,
                });
                pass.set_pipeline(&self.tile_pipeline.render_pipeline);
                pass.set_bind_group(0, &self.projection_bind_group, &[]);
                pass.set_bind_group(1, &self.atlas_bind_group, &[]);
                pass.set_vertex_buffer(0, vbuf.slice(..));
                pass.draw(0..vertices.len() as u32, 0..1);
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        frame.present();
        Ok(())
    }
}
