//! rlx
//!
//! A small convenience layer over `wgpu` and `winit` for 2D tools and games.
//! An [`Application`](app::Application) owns a window and an ordered list of
//! layers; each frame every layer is updated and then rendered, optionally
//! into a fixed-resolution target that is scaled up to the window.
//!
//! High-level modules
//! - `app`: the application object and its event loop
//! - `layer`: the `Layer` trait and the ordered layer registry
//! - `context`: window, surface and device handed to layers
//! - `data_structures`: the insertion-ordered map and GPU textures
//! - `resources`: asset loading and scoped ownership of GPU/image resources
//! - `pipelines`: the upscaling blit pipeline
//! - `color`, `geometry`, `align`: packed colours, rectangles and text placement
//! - `window`: window configuration, runtime window controls and mouse state
//! - `fs`: file and directory helpers
//! - `upscale`: upscaling settings and letterbox math
//!

pub mod align;
pub mod app;
pub mod color;
pub mod context;
pub mod data_structures;
pub mod error;
pub mod fs;
pub mod geometry;
pub mod layer;
pub mod pipelines;
pub mod resources;
pub mod upscale;
pub mod window;

// Re-exports commonly used types for convenience in downstream code.
pub use app::Application;
pub use layer::Layer;
pub use winit::dpi::PhysicalPosition;
pub use winit::event::WindowEvent;
