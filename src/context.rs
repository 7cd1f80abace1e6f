use std::{fmt::Debug, sync::Arc};

use anyhow::Context as _;
use winit::window::Window;

use crate::{color::Rgba, layer::Layer, upscale::Upscale, window::MouseState};

/// Change to the application asked for from inside a layer hook.
///
/// Requests are queued on the [`Context`] and applied in order once the
/// current frame has been presented.
pub(crate) enum Request {
    AddLayer(Box<dyn Layer>),
    RemoveLayer(String),
    SetUpscale(Upscale),
    DisableUpscale,
}

impl Debug for Request {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Request::AddLayer(layer) => f.debug_tuple("AddLayer").field(&layer.identifier()).finish(),
            Request::RemoveLayer(identifier) => f.debug_tuple("RemoveLayer").field(identifier).finish(),
            Request::SetUpscale(upscale) => f.debug_tuple("SetUpscale").field(upscale).finish(),
            Request::DisableUpscale => f.write_str("DisableUpscale"),
        }
    }
}

/// Window, surface and device shared with every layer.
///
/// Layers also use it to change the running application: layer and upscale
/// changes are queued and take effect after the current frame.
#[derive(Debug)]
pub struct Context {
    pub window: Arc<Window>,
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    pub clear_colour: wgpu::Color,
    pub mouse: MouseState,
    exit_requested: bool,
    upscale_factor: f32,
    requests: Vec<Request>,
}

impl Context {
    pub async fn new(window: Arc<Window>, vsync: bool) -> anyhow::Result<Self> {
        let size = window.inner_size();

        log::info!("WGPU setup");
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.clone())
            .context("failed to create a surface for the window")?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("no suitable GPU adapter")?;
        log::debug!("adapter: {:?}", adapter.get_info());

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: None,
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
                trace: wgpu::Trace::Off,
                ..Default::default()
            })
            .await
            .context("failed to open the GPU device")?;

        let surface_caps = surface.get_capabilities(&adapter);
        // Colours are given in sRGB, so prefer an sRGB surface.
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first().copied())
            .context("surface reports no supported formats")?;
        let present_mode = if vsync {
            wgpu::PresentMode::AutoVsync
        } else {
            wgpu::PresentMode::AutoNoVsync
        };
        let alpha_mode = surface_caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        Ok(Self {
            window,
            surface,
            device,
            queue,
            config,
            clear_colour: Rgba::new(0, 0, 0, 255).into(),
            mouse: MouseState::default(),
            exit_requested: false,
            upscale_factor: 1.0,
            requests: Vec::new(),
        })
    }

    /// Reconfigure the surface for a new window size. Zero sizes (minimised
    /// windows) are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
    }

    /// Reconfigure with the current size, e.g. after the surface was lost.
    pub fn reconfigure(&self) {
        self.surface.configure(&self.device, &self.config);
    }

    /// Ask the application to close after the current frame.
    pub fn request_exit(&mut self) {
        self.exit_requested = true;
    }

    pub fn exit_requested(&self) -> bool {
        self.exit_requested
    }

    /// Register `layer` after the current frame. Its `on_show` runs right
    /// after registration. Duplicate or empty identifiers are logged and dropped.
    pub fn add_layer(&mut self, layer: impl Layer + 'static) {
        self.requests.push(Request::AddLayer(Box::new(layer)));
    }

    /// Remove the layer tagged `identifier` after the current frame.
    pub fn remove_layer(&mut self, identifier: &str) {
        self.requests
            .push(Request::RemoveLayer(identifier.to_string()));
    }

    /// Switch to upscaled rendering from the next frame on.
    pub fn set_upscale(&mut self, factor: u8, width: u32, height: u32) {
        self.requests
            .push(Request::SetUpscale(Upscale::new(factor, width, height)));
    }

    pub fn disable_upscale(&mut self) {
        self.requests.push(Request::DisableUpscale);
    }

    /// Takes effect immediately, i.e. for the pass of the current frame if
    /// called from `on_update`.
    pub fn set_clear_colour(&mut self, colour: impl Into<wgpu::Color>) {
        self.clear_colour = colour.into();
    }

    /// Zoom layers apply to their 2D content in `on_render` so it fills the
    /// upscale target. `1.0` when upscaling is off.
    pub fn upscale_factor(&self) -> f32 {
        self.upscale_factor
    }

    pub(crate) fn set_upscale_factor(&mut self, factor: f32) {
        self.upscale_factor = factor;
    }

    pub(crate) fn take_requests(&mut self) -> Vec<Request> {
        std::mem::take(&mut self.requests)
    }

    pub fn size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    pub fn format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    pub fn window(&self) -> &Window {
        &self.window
    }
}
