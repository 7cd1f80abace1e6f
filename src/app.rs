//! Application object and event loop.
//!
//! An [`Application`] collects the window settings, the layers and the
//! upscaling settings, then [`Application::run`] hands it to winit. The loop
//! follows this pattern:
//!
//! 1. On the first resume, create the window and GPU [`Context`], then call
//!    `on_show` on every layer in registration order.
//! 2. On every redraw, call `on_update` on every layer.
//! 3. Render. Without upscaling a single pass clears the surface and calls
//!    `on_render`. With upscaling `on_render` draws into the off-screen target,
//!    then a surface pass runs `on_render_before_unscaled`, the scaled blit,
//!    and `on_render_after_unscaled`.
//! 4. Present, apply the changes layers queued on the [`Context`], and
//!    request the next frame.
//!
//! [`Application::run_with`] replaces steps 2 and 3 with a caller-supplied
//! frame callback.

use std::{iter, sync::Arc};

use anyhow::Context as _;
use instant::Instant;
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::WindowId,
};

use crate::{
    context::{Context, Request},
    data_structures::texture::RenderTarget,
    error::LayerError,
    geometry::Rect,
    layer::{Layer, LayerRegistry},
    pipelines::upscale::UpscalePipeline,
    resources::managed::Managed,
    upscale::{Upscale, upscaled_target_area},
    window::WindowConfig,
};

/// Everything that only exists while the window is open.
struct Gpu {
    ctx: Context,
    target: Managed<RenderTarget>,
    upscale_pipeline: UpscalePipeline,
}

impl Gpu {
    fn new(ctx: Context, upscale: &Upscale) -> Self {
        let upscale_pipeline = UpscalePipeline::new(&ctx.device, ctx.format());
        let mut gpu = Self {
            ctx,
            target: Managed::empty(),
            upscale_pipeline,
        };
        gpu.sync_target(upscale);
        gpu
    }

    /// Create, resize or drop the off-screen target to match `upscale`.
    fn sync_target(&mut self, upscale: &Upscale) {
        if !upscale.is_active() {
            self.ctx.set_upscale_factor(1.0);
            if self.target.is_loaded() {
                log::debug!("releasing upscale target");
                self.target.release();
                self.upscale_pipeline.unbind();
            }
            return;
        }

        self.ctx.set_upscale_factor(upscale.factor as f32);
        let (width, height) = upscale.target_size();
        let matches = self
            .target
            .get()
            .is_some_and(|t| t.width() == width && t.height() == height);
        if matches {
            return;
        }

        log::info!("creating {}x{} upscale target (x{})", width, height, upscale.factor);
        self.target
            .set(RenderTarget::new(&self.ctx.device, width, height, self.ctx.format(), "Upscale Target"));
        if let Some(target) = self.target.get() {
            self.upscale_pipeline.bind(&self.ctx.device, target);
        }
    }

    fn render(&mut self, layers: &mut LayerRegistry, upscale: &Upscale) -> Result<(), wgpu::SurfaceError> {
        let output = self.ctx.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        let ctx = &self.ctx;
        let clear = ctx.clear_colour;
        match self.target.get() {
            Some(target) if upscale.enabled => {
                {
                    let mut pass = begin_pass(&mut encoder, target.view(), clear, "Upscale Target Pass");
                    layers.for_each_mut(|layer| layer.on_render(ctx, &mut pass));
                }
                {
                    let (width, height) = ctx.size();
                    let area = upscaled_target_area((width, height), upscale.target_size());
                    let mut pass = begin_pass(&mut encoder, &view, clear, "Surface Pass");
                    layers.for_each_mut(|layer| layer.on_render_before_unscaled(ctx, &mut pass));
                    self.upscale_pipeline.draw(&mut pass, area);
                    pass.set_viewport(0.0, 0.0, width as f32, height as f32, 0.0, 1.0);
                    layers.for_each_mut(|layer| layer.on_render_after_unscaled(ctx, &mut pass));
                }
            }
            _ => {
                let mut pass = begin_pass(&mut encoder, &view, clear, "Render Pass");
                layers.for_each_mut(|layer| layer.on_render(ctx, &mut pass));
            }
        }

        self.ctx.queue.submit(iter::once(encoder.finish()));
        output.present();
        Ok(())
    }
}

fn begin_pass<'e>(
    encoder: &'e mut wgpu::CommandEncoder,
    view: &wgpu::TextureView,
    clear: wgpu::Color,
    label: &str,
) -> wgpu::RenderPass<'e> {
    encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
        label: Some(label),
        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
            view,
            resolve_target: None,
            ops: wgpu::Operations {
                load: wgpu::LoadOp::Clear(clear),
                store: wgpu::StoreOp::Store,
            },
            depth_slice: None,
        })],
        depth_stencil_attachment: None,
        occlusion_query_set: None,
        timestamp_writes: None,
        multiview_mask: None,
    })
}

/// The application: window settings, layers, upscaling and, once running,
/// the GPU context.
///
/// There is exactly one per program run; it is created by the caller and
/// consumed by [`Application::run`].
pub struct Application {
    window_config: WindowConfig,
    layers: LayerRegistry,
    upscale: Upscale,
    clear_colour: wgpu::Color,
    gpu: Option<Gpu>,
}

impl Default for Application {
    fn default() -> Self {
        Self::new(WindowConfig::default())
    }
}

impl Application {
    pub fn new(window_config: WindowConfig) -> Self {
        Self {
            window_config,
            layers: LayerRegistry::new(),
            upscale: Upscale::default(),
            clear_colour: wgpu::Color::BLACK,
            gpu: None,
        }
    }

    pub fn window_config(&self) -> &WindowConfig {
        &self.window_config
    }

    pub fn add_layer(&mut self, layer: impl Layer + 'static) -> Result<u32, LayerError> {
        self.layers.add(Box::new(layer))
    }

    pub fn remove_layer(&mut self, identifier: &str) -> Option<Box<dyn Layer>> {
        self.layers.remove(identifier)
    }

    pub fn layers(&self) -> &LayerRegistry {
        &self.layers
    }

    pub fn layers_mut(&mut self) -> &mut LayerRegistry {
        &mut self.layers
    }

    /// Render layers at a fixed `width` x `height` and scale the result to the window.
    pub fn set_upscale(&mut self, factor: u8, width: u32, height: u32) {
        self.upscale = Upscale::new(factor, width, height);
        if let Some(gpu) = &mut self.gpu {
            gpu.sync_target(&self.upscale);
        }
    }

    pub fn disable_upscale(&mut self) {
        self.upscale.enabled = false;
        if let Some(gpu) = &mut self.gpu {
            gpu.sync_target(&self.upscale);
        }
    }

    pub fn upscale(&self) -> &Upscale {
        &self.upscale
    }

    pub fn set_clear_colour(&mut self, colour: impl Into<wgpu::Color>) {
        self.clear_colour = colour.into();
        if let Some(gpu) = &mut self.gpu {
            gpu.ctx.clear_colour = self.clear_colour;
        }
    }

    /// The colour frames are cleared with. Once running, layers may have
    /// changed it through [`Context::set_clear_colour`].
    pub fn clear_colour(&self) -> wgpu::Color {
        self.context().map_or(self.clear_colour, |ctx| ctx.clear_colour)
    }

    pub fn context(&self) -> Option<&Context> {
        self.gpu.as_ref().map(|gpu| &gpu.ctx)
    }

    fn window_size(&self) -> (u32, u32) {
        match &self.gpu {
            Some(gpu) => gpu.ctx.size(),
            None => (self.window_config.width, self.window_config.height),
        }
    }

    /// Part of the window the layers' main rendering ends up in. This is the
    /// whole window unless upscaling is on.
    pub fn upscaled_render_area(&self) -> Rect<f32> {
        let (width, height) = self.window_size();
        if self.upscale.is_active() {
            upscaled_target_area((width, height), self.upscale.target_size())
        } else {
            Rect::from_size(width as f32, height as f32)
        }
    }

    /// Apply one change queued by a layer.
    fn apply(&mut self, request: Request) {
        log::debug!("applying {:?}", request);
        match request {
            Request::AddLayer(layer) => {
                let identifier = layer.identifier().to_string();
                if let Err(e) = self.layers.add(layer) {
                    log::warn!("ignoring layer '{}': {}", identifier, e);
                    return;
                }
                if let (Some(gpu), Some(layer)) = (&mut self.gpu, self.layers.get_mut(&identifier)) {
                    layer.on_show(&mut gpu.ctx);
                }
            }
            Request::RemoveLayer(identifier) => {
                if self.layers.remove(&identifier).is_none() {
                    log::warn!("no layer '{}' to remove", identifier);
                }
            }
            Request::SetUpscale(upscale) => {
                self.upscale = upscale;
                if let Some(gpu) = &mut self.gpu {
                    gpu.sync_target(&self.upscale);
                }
            }
            Request::DisableUpscale => self.disable_upscale(),
        }
    }

    /// Apply everything queued on the context, including requests made while
    /// applying (e.g. from the `on_show` of a layer added at runtime).
    fn apply_requests(&mut self) {
        loop {
            let requests = match &mut self.gpu {
                Some(gpu) => gpu.ctx.take_requests(),
                None => return,
            };
            if requests.is_empty() {
                return;
            }
            for request in requests {
                self.apply(request);
            }
        }
    }

    /// Open the window and run until it is closed or a layer requests exit.
    ///
    /// Errors while creating the event loop, the window or the GPU context are returned.
    pub fn run(self) -> anyhow::Result<()> {
        self.run_loop(None)
    }

    /// Like [`Application::run`], but every frame calls `frame` with the
    /// context and the seconds since the last frame instead of updating and
    /// rendering the layers. `frame` is responsible for presenting; layers
    /// still get `on_show` and queued changes are still applied.
    pub fn run_with(self, frame: impl FnMut(&mut Context, f32) + 'static) -> anyhow::Result<()> {
        self.run_loop(Some(Box::new(frame)))
    }

    fn run_loop(self, frame: Option<FrameFn>) -> anyhow::Result<()> {
        if let Err(e) = env_logger::try_init() {
            println!("Warning: Could not initialize logger: {}", e);
        };

        #[cfg(all(feature = "integration-tests", target_os = "linux"))]
        let event_loop: EventLoop<()> = {
            use winit::platform::wayland::EventLoopBuilderExtWayland;

            EventLoop::with_user_event().with_any_thread(true).build()?
        };

        #[cfg(all(feature = "integration-tests", target_os = "windows"))]
        let event_loop: EventLoop<()> = {
            use winit::platform::windows::EventLoopBuilderExtWindows;

            EventLoop::with_user_event().with_any_thread(true).build()?
        };

        #[cfg(not(all(
            feature = "integration-tests",
            any(target_os = "linux", target_os = "windows")
        )))]
        let event_loop: EventLoop<()> = EventLoop::with_user_event().build()?;

        let mut runner = Runner::new(self, frame)?;
        event_loop.run_app(&mut runner)?;

        match runner.error.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn shutdown(&mut self) {
        log::info!("shutting down {} layer(s)", self.layers.len());
        self.layers.clear();
        self.gpu = None;
    }
}

type FrameFn = Box<dyn FnMut(&mut Context, f32)>;

struct Runner {
    app: Application,
    frame: Option<FrameFn>,
    async_runtime: tokio::runtime::Runtime,
    last_time: Instant,
    error: Option<anyhow::Error>,
}

impl Runner {
    fn new(app: Application, frame: Option<FrameFn>) -> anyhow::Result<Self> {
        let async_runtime = tokio::runtime::Runtime::new().context("failed to start the async runtime")?;
        Ok(Self {
            app,
            frame,
            async_runtime,
            last_time: Instant::now(),
            error: None,
        })
    }

    fn start(&mut self, event_loop: &ActiveEventLoop) -> anyhow::Result<()> {
        let attributes = self.app.window_config.attributes();
        let window = Arc::new(
            event_loop
                .create_window(attributes)
                .context("failed to create the window")?,
        );

        let vsync = self.app.window_config.vsync();
        let mut ctx = self
            .async_runtime
            .block_on(Context::new(window, vsync))
            .context("App initialization failed. Cannot create the main context")?;
        ctx.clear_colour = self.app.clear_colour;

        let mut gpu = Gpu::new(ctx, &self.app.upscale);
        self.app
            .layers
            .for_each_mut(|layer| layer.on_show(&mut gpu.ctx));
        gpu.ctx.window.request_redraw();

        self.app.gpu = Some(gpu);
        self.app.apply_requests();
        self.last_time = Instant::now();
        Ok(())
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: anyhow::Error) {
        log::error!("{:#}", error);
        self.error = Some(error);
        event_loop.exit();
    }
}

impl ApplicationHandler for Runner {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.app.gpu.is_some() {
            return;
        }
        if let Err(e) = self.start(event_loop) {
            self.fail(event_loop, e);
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        let app = &mut self.app;
        let Some(gpu) = &mut app.gpu else {
            return;
        };

        gpu.ctx.mouse.handle_event(&event);

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => gpu.ctx.resize(size.width, size.height),
            WindowEvent::RedrawRequested => {
                let dt = self.last_time.elapsed().as_secs_f32();
                self.last_time = Instant::now();

                if let Some(frame) = &mut self.frame {
                    frame(&mut gpu.ctx, dt);
                } else {
                    app.layers
                        .for_each_mut(|layer| layer.on_update(&mut gpu.ctx, dt));

                    match gpu.render(&mut app.layers, &app.upscale) {
                        Ok(()) => {}
                        // Reconfigure the surface if it's lost or outdated
                        Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => gpu.ctx.reconfigure(),
                        Err(e) => log::error!("Unable to render {}", e),
                    }
                }
                gpu.ctx.mouse.end_frame();

                let exit = gpu.ctx.exit_requested();
                app.apply_requests();
                match (&app.gpu, exit) {
                    (_, true) => event_loop.exit(),
                    (Some(gpu), false) => gpu.ctx.window.request_redraw(),
                    (None, false) => {}
                }
            }
            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.app.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;

    struct Named(&'static str);

    impl Layer for Named {
        fn identifier(&self) -> &str {
            self.0
        }

        fn on_update(&mut self, _ctx: &mut Context, _dt: f32) {}

        fn on_render(&mut self, _ctx: &Context, _pass: &mut wgpu::RenderPass<'_>) {}
    }

    fn app() -> Application {
        Application::new(WindowConfig::default().with_size(800, 600))
    }

    #[test]
    fn render_area_follows_upscale_settings() {
        let mut app = app();
        assert_eq!(app.upscaled_render_area(), Rect::new(0.0, 0.0, 800.0, 600.0));

        app.set_upscale(0, 400, 200);
        assert_eq!(app.upscale().factor, 1);
        assert!(app.upscale().enabled);
        assert_eq!(app.upscaled_render_area(), Rect::new(0.0, 100.0, 800.0, 400.0));

        app.disable_upscale();
        assert!(!app.upscale().enabled);
        assert_eq!(app.upscaled_render_area(), Rect::new(0.0, 0.0, 800.0, 600.0));
    }

    #[test]
    fn clear_colour_is_kept_until_run() {
        let mut app = app();
        assert_eq!(app.clear_colour(), wgpu::Color::BLACK);

        let colour: wgpu::Color = Rgb::new(255, 0, 0).into();
        app.set_clear_colour(Rgb::new(255, 0, 0));
        assert_eq!(app.clear_colour(), colour);
        assert!(app.context().is_none());
    }

    #[test]
    fn queued_layer_changes_apply_in_order() {
        let mut app = app();
        app.add_layer(Named("world")).unwrap();

        app.apply(Request::AddLayer(Box::new(Named("hud"))));
        app.apply(Request::AddLayer(Box::new(Named("hud"))));
        app.apply(Request::RemoveLayer("world".to_string()));
        app.apply(Request::RemoveLayer("missing".to_string()));

        assert_eq!(app.layers().identifiers(), ["hud"]);
    }

    #[test]
    fn queued_upscale_changes_replace_the_settings() {
        let mut app = app();
        app.apply(Request::SetUpscale(Upscale::new(2, 400, 300)));
        assert_eq!(*app.upscale(), Upscale::new(2, 400, 300));
        assert_eq!(app.upscaled_render_area(), Rect::new(0.0, 0.0, 800.0, 600.0));

        app.apply(Request::DisableUpscale);
        assert!(!app.upscale().is_active());
    }
}
