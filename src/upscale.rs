//! Fixed-resolution rendering scaled onto the window.
//!
//! When upscaling is on, layers draw into an off-screen [`RenderTarget`] of a
//! fixed size, which is then stretched onto the window with nearest
//! sampling. The aspect ratio is kept: the image is centred and the
//! leftover space on one axis stays in the clear colour.
//!
//! [`RenderTarget`]: crate::data_structures::texture::RenderTarget

use crate::geometry::Rect;

/// Upscaling settings owned by the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Upscale {
    pub enabled: bool,
    /// Zoom layers draw the target's content with, see
    /// [`Context::upscale_factor`](crate::context::Context::upscale_factor). Never zero.
    pub factor: u8,
    pub width: u32,
    pub height: u32,
}

impl Default for Upscale {
    fn default() -> Self {
        Self {
            enabled: false,
            factor: 1,
            width: 0,
            height: 0,
        }
    }
}

impl Upscale {
    /// Enabled settings for a `width` x `height` target. A zero factor is treated as 1.
    pub fn new(factor: u8, width: u32, height: u32) -> Self {
        Self {
            enabled: true,
            factor: factor.max(1),
            width,
            height,
        }
    }

    pub fn target_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Whether there is anything to render into.
    pub fn is_active(&self) -> bool {
        self.enabled && self.width > 0 && self.height > 0
    }
}

/// Area of a `window`-sized surface covered by a `target`-sized image
/// scaled uniformly to fit and centred.
///
/// A degenerate target covers the whole window.
pub fn upscaled_target_area(window: (u32, u32), target: (u32, u32)) -> Rect<f32> {
    let (ww, wh) = (window.0 as f32, window.1 as f32);
    if target.0 == 0 || target.1 == 0 {
        return Rect::new(0.0, 0.0, ww, wh);
    }
    let (tw, th) = (target.0 as f32, target.1 as f32);

    let scale = (ww / tw).min(wh / th);
    let (w, h) = (tw * scale, th * scale);
    Rect::new((ww - w) / 2.0, (wh - h) / 2.0, w, h)
}
