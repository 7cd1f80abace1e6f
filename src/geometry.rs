//! Rectangles with padding and margins.
//!
//! [`Rect`] is generic over any `cgmath` numeric type. Adding a [`Padding`]
//! shrinks a rectangle inward, subtracting a [`Margin`] grows it outward, which
//! is what the box helpers ([`PaddedRect`], [`MarginRect`], [`BoxRect`]) build on.

use std::ops::{Add, Sub};

use cgmath::{BaseNum, Point2, num_traits::NumCast};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect<T> {
    pub x: T,
    pub y: T,
    pub width: T,
    pub height: T,
}

impl<T: BaseNum> Rect<T> {
    pub const fn new(x: T, y: T, width: T, height: T) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// A rectangle of the given size at the origin.
    pub fn from_size(width: T, height: T) -> Self {
        Self::new(T::zero(), T::zero(), width, height)
    }

    pub fn right(&self) -> T {
        self.x + self.width
    }

    pub fn bottom(&self) -> T {
        self.y + self.height
    }

    /// Half-open containment: the left and top edges are inside, the right and bottom are not.
    pub fn contains(&self, px: T, py: T) -> bool {
        px >= self.x && px < self.right() && py >= self.y && py < self.bottom()
    }

    /// True if the two rectangles share some area. Touching edges don't count.
    pub fn intersects(&self, other: &Rect<T>) -> bool {
        !(other.x >= self.right()
            || other.right() <= self.x
            || other.y >= self.bottom()
            || other.bottom() <= self.y)
    }

    /// Convert every component with `NumCast`, failing if any of them doesn't fit.
    pub fn cast<U: NumCast>(&self) -> Option<Rect<U>> {
        Some(Rect {
            x: U::from(self.x)?,
            y: U::from(self.y)?,
            width: U::from(self.width)?,
            height: U::from(self.height)?,
        })
    }

    pub fn shrink(&self, padding: Padding<T>) -> Self {
        Self::new(
            self.x + padding.left,
            self.y + padding.top,
            self.width - padding.horizontal(),
            self.height - padding.vertical(),
        )
    }

    pub fn grow(&self, margin: Margin<T>) -> Self {
        Self::new(
            self.x - margin.left,
            self.y - margin.top,
            self.width + margin.horizontal(),
            self.height + margin.vertical(),
        )
    }
}

impl<T: BaseNum> Add<Padding<T>> for Rect<T> {
    type Output = Rect<T>;

    fn add(self, padding: Padding<T>) -> Self::Output {
        self.shrink(padding)
    }
}

impl<T: BaseNum> Sub<Padding<T>> for Rect<T> {
    type Output = Rect<T>;

    fn sub(self, margin: Padding<T>) -> Self::Output {
        self.grow(margin)
    }
}

/// `(x, y, width, height)` in the order `wgpu::RenderPass::set_viewport` takes them.
impl From<Rect<f32>> for (f32, f32, f32, f32) {
    fn from(rect: Rect<f32>) -> Self {
        (rect.x, rect.y, rect.width, rect.height)
    }
}

impl From<(f32, f32, f32, f32)> for Rect<f32> {
    fn from((x, y, width, height): (f32, f32, f32, f32)) -> Self {
        Rect::new(x, y, width, height)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Padding<T> {
    pub left: T,
    pub top: T,
    pub right: T,
    pub bottom: T,
}

/// Margins are stored the same way as padding; only the direction differs.
pub type Margin<T> = Padding<T>;

impl<T: BaseNum> Padding<T> {
    pub const fn new(left: T, top: T, right: T, bottom: T) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn uniform(value: T) -> Self {
        Self::new(value, value, value, value)
    }

    pub fn horizontal(&self) -> T {
        self.left + self.right
    }

    pub fn vertical(&self) -> T {
        self.top + self.bottom
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PaddedRect<T> {
    pub rect: Rect<T>,
    pub padding: Padding<T>,
}

impl<T: BaseNum> PaddedRect<T> {
    pub fn new(rect: Rect<T>, padding: Padding<T>) -> Self {
        Self { rect, padding }
    }

    /// The content area left inside the padding.
    pub fn with_padding(&self) -> Rect<T> {
        self.rect + self.padding
    }

    pub fn without_padding(&self) -> Rect<T> {
        self.rect
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MarginRect<T> {
    pub rect: Rect<T>,
    pub margin: Margin<T>,
}

impl<T: BaseNum> MarginRect<T> {
    pub fn new(rect: Rect<T>, margin: Margin<T>) -> Self {
        Self { rect, margin }
    }

    /// The outer area including the margin.
    pub fn with_margin(&self) -> Rect<T> {
        self.rect - self.margin
    }

    pub fn without_margin(&self) -> Rect<T> {
        self.rect
    }
}

/// A rectangle with both padding (inside) and margin (outside).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoxRect<T> {
    pub rect: Rect<T>,
    pub padding: Padding<T>,
    pub margin: Margin<T>,
}

impl<T: BaseNum> BoxRect<T> {
    pub fn new(rect: Rect<T>, padding: Padding<T>, margin: Margin<T>) -> Self {
        Self {
            rect,
            padding,
            margin,
        }
    }

    pub fn with_padding(&self) -> Rect<T> {
        self.rect + self.padding
    }

    pub fn without_padding(&self) -> Rect<T> {
        self.rect
    }

    pub fn with_margin(&self) -> Rect<T> {
        self.rect - self.margin
    }

    pub fn without_margin(&self) -> Rect<T> {
        self.rect
    }
}

pub type Line = (Point2<f32>, Point2<f32>);

/// Lines of a `cells` x `cells` grid anchored at the origin.
pub fn grid_lines(cells: u32, cell_size: f32) -> Vec<Line> {
    let size = cells as f32 * cell_size;
    let mut lines = Vec::with_capacity(2 * (cells as usize + 1));
    for i in 0..=cells {
        let offset = i as f32 * cell_size;
        lines.push((Point2::new(offset, 0.0), Point2::new(offset, size)));
        lines.push((Point2::new(0.0, offset), Point2::new(size, offset)));
    }
    lines
}

/// Lines of a grid covering `area`, one column/row per whole cell that fits.
///
/// Vertical lines come first, left to right, then horizontal lines top to bottom.
pub fn grid_lines_in(area: Rect<f32>, cell_size: f32) -> Vec<Line> {
    if cell_size <= 0.0 || area.width < 0.0 || area.height < 0.0 {
        return Vec::new();
    }
    let cols = (area.width / cell_size).floor() as u32;
    let rows = (area.height / cell_size).floor() as u32;

    let vertical = (0..=cols).map(|i| {
        let x = area.x + i as f32 * cell_size;
        (Point2::new(x, area.y), Point2::new(x, area.bottom()))
    });
    let horizontal = (0..=rows).map(|j| {
        let y = area.y + j as f32 * cell_size;
        (Point2::new(area.x, y), Point2::new(area.right(), y))
    });
    vertical.chain(horizontal).collect()
}
