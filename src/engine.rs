use std::path::PathBuf;
use std::sync::Arc;

use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::window::{Window, WindowId};

use crate::canvas::{CanvasConfig, Color};
use crate::error::Error;
use crate::renderer::{FrameBatch, Renderer};
use crate::scene::Scene;

// ── EngineBuilder ───────────────────────────────────────────────────────────

pub struct EngineBuilder {
    title: String,
    canvas: CanvasConfig,
    manifest: PathBuf,
    level: PathBuf,
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self {
            title: "jtiles".into(),
            canvas: CanvasConfig::REFERENCE,
            manifest: PathBuf::from("assets/tiles.json"),
            level: PathBuf::from("assets/level.txt"),
        }
    }
}

impl EngineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_manifest(mut self, path: impl Into<PathBuf>) -> Self {
        self.manifest = path.into();
        self
    }

    pub fn with_level(mut self, path: impl Into<PathBuf>) -> Self {
        self.level = path.into();
        self
    }

    /// Colour shown behind the tiles and through cells that draw nothing.
    pub fn with_clear_color(mut self, color: Color) -> Self {
        self.canvas.clear_color = color;
        self
    }

    pub fn canvas(&self) -> &CanvasConfig {
        &self.canvas
    }

    /// Run the startup phase only: load manifest and level and build the grid.
    pub fn load_scene(&self) -> Result<Scene, Error> {
        Scene::load(&self.manifest, &self.level, &self.canvas)
    }

    /// Load the scene, open the window and redraw every frame until the
    /// window is closed.
    ///
    /// Loading finishes before the event loop exists, so no frame can ever
    /// see a half-loaded scene.  A load error returns before anything is shown.
    pub fn run(self) -> Result<(), Error> {
        let scene = self.load_scene()?;

        let event_loop = EventLoop::new()?;
        let mut app = App {
            title: self.title,
            canvas: self.canvas,
            scene,
            renderer: None,
            fatal: None,
            frames: 0,
        };
        event_loop.run_app(&mut app)?;

        match app.fatal.take() {
            Some(e) => Err(e),
            None => {
                tracing::info!(frames = app.frames, "shut down");
                Ok(())
            }
        }
    }
}

// ── App (winit ApplicationHandler) ──────────────────────────────────────────

struct App {
    title: String,
    canvas: CanvasConfig,
    scene: Scene,
    /// `None` until the first `resumed`.
    renderer: Option<Renderer>,
    /// Set when window or GPU setup fails; returned from `run`.
    fatal: Option<Error>,
    frames: u64,
}

impl App {
    fn init_renderer(&mut self, event_loop: &ActiveEventLoop) -> Result<Renderer, Error> {
        let window = Arc::new(
            event_loop.create_window(
                Window::default_attributes()
                    .with_title(&self.title)
                    .with_inner_size(winit::dpi::PhysicalSize::new(
                        self.canvas.width,
                        self.canvas.height,
                    ))
                    .with_resizable(false),
            )?,
        );
        let renderer =
            pollster::block_on(Renderer::new(window, &self.canvas, self.scene.registry()))?;
        Ok(renderer)
    }

    fn draw_frame(&mut self) {
        let Some(renderer) = self.renderer.as_mut() else { return };

        let mut batch = FrameBatch::new(renderer.atlas());
        self.scene.render(&mut batch);
        let vertices = batch.into_vertices();

        match renderer.render(&vertices) {
            Ok(()) => self.frames += 1,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                let size = renderer.window.inner_size();
                renderer.resize(size);
            }
            Err(e) => tracing::warn!(error = %e, "render error"),
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.renderer.is_some() {
            return;
        }
        match self.init_renderer(event_loop) {
            Ok(renderer) => {
                renderer.window.request_redraw();
                self.renderer = Some(renderer);
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to initialise renderer; exiting");
                self.fatal = Some(e);
                event_loop.exit();
            }
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(renderer) = self.renderer.as_ref() {
            renderer.window.request_redraw();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),

            WindowEvent::Resized(size) => {
                if let Some(renderer) = self.renderer.as_mut() {
                    renderer.resize(size);
                }
            }

            WindowEvent::RedrawRequested => self.draw_frame(),

            _ => {}
        }
    }
}
