//! Packed colour values.
//!
//! [`Rgb`] and [`Rgba`] compute their packed encodings once at construction:
//! 8-bit RGB 3-3-2, 16-bit RGB 5-6-5, and a little-endian 32-bit word with red
//! in the lowest byte (`0x00BBGGRR` / `0xAABBGGRR`). They convert into
//! `wgpu::Color` and normalised float vectors for shader uniforms.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    rgb8: u8,
    rgb16: u16,
    rgb32: u32,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self {
            rgb8: pack_332(r, g, b),
            rgb16: pack_565(r, g, b),
            rgb32: (r as u32) | ((g as u32) << 8) | ((b as u32) << 16),
        }
    }

    pub const fn rgb8(&self) -> u8 {
        self.rgb8
    }

    pub const fn rgb16(&self) -> u16 {
        self.rgb16
    }

    pub const fn rgb32(&self) -> u32 {
        self.rgb32
    }

    pub const fn r(&self) -> u8 {
        (self.rgb32 & 0xFF) as u8
    }

    pub const fn g(&self) -> u8 {
        ((self.rgb32 >> 8) & 0xFF) as u8
    }

    pub const fn b(&self) -> u8 {
        ((self.rgb32 >> 16) & 0xFF) as u8
    }

    /// Win32 `COLORREF` layout, which is the same `0x00BBGGRR` word.
    pub const fn colorref(&self) -> u32 {
        self.rgb32
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgba {
    rgba8: u8,
    rgba16: u16,
    rgba32: u32,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            rgba8: pack_332(r, g, b),
            rgba16: pack_565(r, g, b),
            rgba32: (r as u32) | ((g as u32) << 8) | ((b as u32) << 16) | ((a as u32) << 24),
        }
    }

    /// RGB 3-3-2; alpha is dropped.
    pub const fn rgba8(&self) -> u8 {
        self.rgba8
    }

    /// RGB 5-6-5; alpha is dropped.
    pub const fn rgba16(&self) -> u16 {
        self.rgba16
    }

    pub const fn rgba32(&self) -> u32 {
        self.rgba32
    }

    pub const fn r(&self) -> u8 {
        (self.rgba32 & 0xFF) as u8
    }

    pub const fn g(&self) -> u8 {
        ((self.rgba32 >> 8) & 0xFF) as u8
    }

    pub const fn b(&self) -> u8 {
        ((self.rgba32 >> 16) & 0xFF) as u8
    }

    pub const fn a(&self) -> u8 {
        ((self.rgba32 >> 24) & 0xFF) as u8
    }

    pub const fn colorref(&self) -> u32 {
        self.rgba32 & 0x00FF_FFFF
    }
}

const fn pack_332(r: u8, g: u8, b: u8) -> u8 {
    (r & 0xE0) | ((g >> 3) & 0x1C) | (b >> 6)
}

const fn pack_565(r: u8, g: u8, b: u8) -> u16 {
    (((r >> 3) as u16) << 11) | (((g >> 2) as u16) << 5) | ((b >> 3) as u16)
}

fn unit(channel: u8) -> f32 {
    channel as f32 / 255.0
}

impl From<Rgb> for Rgba {
    fn from(rgb: Rgb) -> Self {
        Rgba::new(rgb.r(), rgb.g(), rgb.b(), 255)
    }
}

impl From<Rgb> for u8 {
    fn from(rgb: Rgb) -> Self {
        rgb.rgb8
    }
}

impl From<Rgb> for u16 {
    fn from(rgb: Rgb) -> Self {
        rgb.rgb16
    }
}

impl From<Rgb> for u32 {
    fn from(rgb: Rgb) -> Self {
        rgb.rgb32
    }
}

impl From<Rgb> for [f32; 3] {
    fn from(rgb: Rgb) -> Self {
        [unit(rgb.r()), unit(rgb.g()), unit(rgb.b())]
    }
}

impl From<Rgb> for cgmath::Vector3<f32> {
    fn from(rgb: Rgb) -> Self {
        <[f32; 3]>::from(rgb).into()
    }
}

impl From<Rgb> for wgpu::Color {
    fn from(rgb: Rgb) -> Self {
        Rgba::from(rgb).into()
    }
}

impl From<Rgba> for u8 {
    fn from(rgba: Rgba) -> Self {
        rgba.rgba8
    }
}

impl From<Rgba> for u16 {
    fn from(rgba: Rgba) -> Self {
        rgba.rgba16
    }
}

impl From<Rgba> for u32 {
    fn from(rgba: Rgba) -> Self {
        rgba.rgba32
    }
}

impl From<Rgba> for [f32; 4] {
    fn from(rgba: Rgba) -> Self {
        [
            unit(rgba.r()),
            unit(rgba.g()),
            unit(rgba.b()),
            unit(rgba.a()),
        ]
    }
}

impl From<Rgba> for cgmath::Vector4<f32> {
    fn from(rgba: Rgba) -> Self {
        <[f32; 4]>::from(rgba).into()
    }
}

impl From<Rgba> for wgpu::Color {
    fn from(rgba: Rgba) -> Self {
        let [r, g, b, a] = <[f32; 4]>::from(rgba);
        wgpu::Color {
            r: r as f64,
            g: g as f64,
            b: b as f64,
            a: a as f64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primaries_pack_into_each_layout() {
        let red = Rgb::new(255, 0, 0);
        assert_eq!((red.rgb8(), red.rgb16(), red.rgb32()), (0xE0, 0xF800, 0x0000FF));

        let green = Rgb::new(0, 255, 0);
        assert_eq!(
            (green.rgb8(), green.rgb16(), green.rgb32()),
            (0x1C, 0x07E0, 0x00FF00)
        );

        let blue = Rgb::new(0, 0, 255);
        assert_eq!((blue.rgb8(), blue.rgb16(), blue.rgb32()), (0x03, 0x001F, 0xFF0000));

        let white = Rgb::new(255, 255, 255);
        assert_eq!(u8::from(white), 0xFF);
        assert_eq!(u16::from(white), 0xFFFF);
        assert_eq!(u32::from(white), 0x00FF_FFFF);
    }

    #[test]
    fn rgba_keeps_alpha_in_the_high_byte() {
        let c = Rgba::new(1, 2, 3, 4);
        assert_eq!(c.rgba32(), 0x0403_0201);
        assert_eq!(c.colorref(), 0x0003_0201);
        assert_eq!((c.r(), c.g(), c.b(), c.a()), (1, 2, 3, 4));
    }

    #[test]
    fn converts_to_wgpu_colour() {
        let colour: wgpu::Color = Rgba::new(255, 0, 255, 0).into();
        assert_eq!(colour, wgpu::Color { r: 1.0, g: 0.0, b: 1.0, a: 0.0 });

        let opaque: wgpu::Color = Rgb::new(0, 0, 0).into();
        assert_eq!(opaque, wgpu::Color::BLACK);
    }

    #[test]
    fn normalised_vectors() {
        let v: cgmath::Vector3<f32> = Rgb::new(255, 0, 51).into();
        assert_eq!(v, cgmath::Vector3::new(1.0, 0.0, 0.2));

        let v: [f32; 4] = Rgba::new(0, 255, 0, 255).into();
        assert_eq!(v, [0.0, 1.0, 0.0, 1.0]);
    }
}
