//! Scoped ownership of externally allocated resources.
//!
//! [`Managed`] binds one GPU or image resource to the lifetime of the wrapper:
//! the kind-specific [`Resource::unload`] runs exactly once, either on an
//! explicit [`Managed::release`] or when the wrapper is dropped, and never for
//! a wrapper that holds nothing.
//!
//! ```
//! use rlx::resources::managed::{Managed, Resource};
//!
//! #[derive(Debug)]
//! struct Handle(u32);
//!
//! impl Resource for Handle {
//!     fn unload(&mut self) {}
//! }
//!
//! let mut texture = Managed::new(Handle(7));
//! assert!(texture.is_loaded());
//!
//! let moved = texture.take();
//! assert!(!texture.is_loaded());
//! assert_eq!(moved.get().map(|h| h.0), Some(7));
//! ```
//!
//! A handle has a single owner, so it can neither be cloned:
//!
//! ```compile_fail
//! use rlx::resources::managed::{Managed, Resource};
//!
//! struct Handle(u32);
//!
//! impl Resource for Handle {
//!     fn unload(&mut self) {}
//! }
//!
//! let original = Managed::new(Handle(7));
//! let copy = original.clone();
//! ```
//!
//! nor be used again after it has been moved out of:
//!
//! ```compile_fail
//! use rlx::resources::managed::{Managed, Resource};
//!
//! struct Handle(u32);
//!
//! impl Resource for Handle {
//!     fn unload(&mut self) {}
//! }
//!
//! let original = Managed::new(Handle(7));
//! let first = original;
//! let second = original;
//! ```

use std::{fmt::Debug, path::Path};

use anyhow::Context as _;
use image::RgbaImage;
use wgpu::util::DeviceExt;

use crate::{
    data_structures::texture::{RenderTarget, Texture},
    resources::load_binary,
};

/// A resource kind with a single release function.
///
/// `unload` is only ever called once per loaded value by [`Managed`].
pub trait Resource {
    fn unload(&mut self);
}

impl Resource for wgpu::Texture {
    fn unload(&mut self) {
        self.destroy();
    }
}

impl Resource for wgpu::Buffer {
    fn unload(&mut self) {
        self.destroy();
    }
}

impl Resource for Texture {
    fn unload(&mut self) {
        self.texture.destroy();
    }
}

impl Resource for RenderTarget {
    fn unload(&mut self) {
        self.texture.unload();
    }
}

impl Resource for RgbaImage {
    fn unload(&mut self) {
        *self = RgbaImage::new(0, 0);
    }
}

/// Exclusive owner of one loaded resource.
pub struct Managed<R: Resource> {
    value: Option<R>,
}

impl<R: Resource> Managed<R> {
    /// A handle in the "not loaded" state. Nothing is allocated.
    pub fn empty() -> Self {
        Self { value: None }
    }

    /// Adopt a resource that was created elsewhere.
    pub fn new(value: R) -> Self {
        Self { value: Some(value) }
    }

    /// Run `loader` and adopt its result.
    ///
    /// Errors from the loader are passed through untouched; the wrapper does
    /// not validate what the loader returns.
    pub fn load<F>(loader: F) -> anyhow::Result<Self>
    where
        F: FnOnce() -> anyhow::Result<R>,
    {
        Ok(Self::new(loader()?))
    }

    pub fn is_loaded(&self) -> bool {
        self.value.is_some()
    }

    pub fn get(&self) -> Option<&R> {
        self.value.as_ref()
    }

    pub fn get_mut(&mut self) -> Option<&mut R> {
        self.value.as_mut()
    }

    /// Unload the held resource, if any. Calling it again is a no-op.
    pub fn release(&mut self) {
        if let Some(mut value) = self.value.take() {
            log::trace!("unloading {}", std::any::type_name::<R>());
            value.unload();
        }
    }

    /// Replace the held resource with `value`, unloading the old one first.
    pub fn set(&mut self, value: R) {
        self.release();
        self.value = Some(value);
    }

    /// Move-assign: unload what `self` holds, then take over `other`'s resource.
    pub fn replace(&mut self, mut other: Managed<R>) {
        self.release();
        self.value = other.value.take();
    }

    /// Move the resource into a new handle, leaving `self` empty.
    pub fn take(&mut self) -> Managed<R> {
        Managed {
            value: self.value.take(),
        }
    }

    /// Give up ownership without unloading. The caller becomes responsible
    /// for releasing the returned value.
    pub fn into_inner(mut self) -> Option<R> {
        self.value.take()
    }
}

impl<R: Resource> Default for Managed<R> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<R: Resource> From<R> for Managed<R> {
    fn from(value: R) -> Self {
        Self::new(value)
    }
}

impl<'a, R: Resource> From<&'a Managed<R>> for Option<&'a R> {
    fn from(managed: &'a Managed<R>) -> Self {
        managed.get()
    }
}

impl<R: Resource + Debug> Debug for Managed<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Managed")
            .field("loaded", &self.is_loaded())
            .field("value", &self.value)
            .finish()
    }
}

impl<R: Resource> Drop for Managed<R> {
    fn drop(&mut self) {
        self.release();
    }
}

impl Managed<RgbaImage> {
    /// Decode an image file into CPU memory.
    pub fn load_image(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        Self::load(|| {
            let data = load_binary(path)?;
            let img = image::load_from_memory(&data)
                .with_context(|| format!("failed to decode image {}", path.display()))?;
            Ok(img.to_rgba8())
        })
    }

    /// Decode an in-memory image file (PNG, JPEG, ...).
    pub fn from_bytes(bytes: &[u8]) -> anyhow::Result<Self> {
        Self::load(|| Ok(image::load_from_memory(bytes)?.to_rgba8()))
    }
}

impl Managed<Texture> {
    /// Load an image file straight into a GPU texture.
    pub fn load_texture(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        path: impl AsRef<Path>,
        is_normal_map: bool,
    ) -> anyhow::Result<Self> {
        let path = path.as_ref();
        Self::load(|| {
            let data = load_binary(path)?;
            let label = path.to_string_lossy();
            Texture::from_bytes(device, queue, &data, &label, None, is_normal_map)
        })
    }

    /// Upload an already decoded image.
    pub fn from_image(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        img: &RgbaImage,
        label: &str,
    ) -> Self {
        Self::new(Texture::from_image(device, queue, img, Some(label), false))
    }
}

impl Managed<RenderTarget> {
    pub fn render_target(
        device: &wgpu::Device,
        width: u32,
        height: u32,
        format: wgpu::TextureFormat,
    ) -> Self {
        Self::new(RenderTarget::new(
            device,
            width,
            height,
            format,
            "managed render target",
        ))
    }
}

impl Managed<wgpu::Buffer> {
    pub fn buffer_init(
        device: &wgpu::Device,
        label: &str,
        contents: &[u8],
        usage: wgpu::BufferUsages,
    ) -> Self {
        Self::new(device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents,
            usage,
        }))
    }

    /// Upload a slice of plain-old-data values, e.g. vertices or a uniform struct.
    pub fn buffer_from<T: bytemuck::Pod>(
        device: &wgpu::Device,
        label: &str,
        data: &[T],
        usage: wgpu::BufferUsages,
    ) -> Self {
        Self::buffer_init(device, label, bytemuck::cast_slice(data), usage)
    }
}
