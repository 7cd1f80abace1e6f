//! Text alignment flags and placement.
//!
//! Horizontal and vertical alignment are separate enums whose discriminants
//! are disjoint bits, so any combination fits into one [`TextAlign`] value:
//!
//! ```
//! use rlx::align::{HorizontalAlign, TextAlign, VerticalAlign};
//!
//! let align = HorizontalAlign::Center | VerticalAlign::Bottom;
//! assert!(align.contains(HorizontalAlign::Center));
//! assert!(align.has_vertical());
//! assert_eq!(align.bits(), 2 | 32);
//! ```

use std::ops::{BitOr, BitOrAssign};

use cgmath::Vector2;

use crate::geometry::Rect;

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HorizontalAlign {
    Left = 1,
    Center = 2,
    Right = 4,
}

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VerticalAlign {
    Top = 8,
    Middle = 16,
    Bottom = 32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TextAlign(u8);

const HORIZONTAL_MASK: u8 = 1 | 2 | 4;
const VERTICAL_MASK: u8 = 8 | 16 | 32;

impl TextAlign {
    pub const NONE: TextAlign = TextAlign(0);

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn has_horizontal(self) -> bool {
        self.0 & HORIZONTAL_MASK != 0
    }

    pub const fn has_vertical(self) -> bool {
        self.0 & VERTICAL_MASK != 0
    }

    pub fn contains(self, flag: impl Into<TextAlign>) -> bool {
        let flag = flag.into().0;
        flag != 0 && self.0 & flag == flag
    }
}

impl From<HorizontalAlign> for TextAlign {
    fn from(h: HorizontalAlign) -> Self {
        TextAlign(h as u8)
    }
}

impl From<VerticalAlign> for TextAlign {
    fn from(v: VerticalAlign) -> Self {
        TextAlign(v as u8)
    }
}

impl<T: Into<TextAlign>> BitOr<T> for TextAlign {
    type Output = TextAlign;

    fn bitor(self, rhs: T) -> TextAlign {
        TextAlign(self.0 | rhs.into().0)
    }
}

impl<T: Into<TextAlign>> BitOrAssign<T> for TextAlign {
    fn bitor_assign(&mut self, rhs: T) {
        self.0 |= rhs.into().0;
    }
}

impl BitOr<VerticalAlign> for HorizontalAlign {
    type Output = TextAlign;

    fn bitor(self, rhs: VerticalAlign) -> TextAlign {
        TextAlign::from(self) | rhs
    }
}

impl BitOr<HorizontalAlign> for VerticalAlign {
    type Output = TextAlign;

    fn bitor(self, rhs: HorizontalAlign) -> TextAlign {
        TextAlign::from(self) | rhs
    }
}

impl BitOr<TextAlign> for HorizontalAlign {
    type Output = TextAlign;

    fn bitor(self, rhs: TextAlign) -> TextAlign {
        rhs | self
    }
}

impl BitOr<TextAlign> for VerticalAlign {
    type Output = TextAlign;

    fn bitor(self, rhs: TextAlign) -> TextAlign {
        rhs | self
    }
}

/// Top-left corner for content of size `measured` placed in `rect`.
///
/// Content larger than the rectangle gets a negative offset and overhangs
/// evenly (centre/middle) or on the leading side (right/bottom).
pub fn aligned_position(measured: Vector2<f32>, rect: Rect<f32>, align: TextAlign) -> Vector2<f32> {
    let mut pos = Vector2::new(rect.x, rect.y);

    if align.contains(HorizontalAlign::Center) {
        pos.x += (rect.width - measured.x) / 2.0;
    } else if align.contains(HorizontalAlign::Right) {
        pos.x += rect.width - measured.x;
    }

    if align.contains(VerticalAlign::Middle) {
        pos.y += (rect.height - measured.y) / 2.0;
    } else if align.contains(VerticalAlign::Bottom) {
        pos.y += rect.height - measured.y;
    }

    pos
}

#[cfg(test)]
mod tests {
    use super::*;

    const AREA: Rect<f32> = Rect::new(10.0, 20.0, 100.0, 50.0);
    const TEXT: Vector2<f32> = Vector2 { x: 40.0, y: 10.0 };

    #[test]
    fn combines_from_either_side() {
        let a = HorizontalAlign::Right | VerticalAlign::Top;
        let b = VerticalAlign::Top | HorizontalAlign::Right;
        assert_eq!(a, b);
        assert_eq!(a.bits(), 4 | 8);

        let mut c = TextAlign::NONE;
        assert!(!c.has_horizontal() && !c.has_vertical());
        c |= HorizontalAlign::Left;
        assert!(c.has_horizontal() && !c.has_vertical());
    }

    #[test]
    fn none_and_left_top_stay_at_origin() {
        let origin = Vector2::new(10.0, 20.0);
        assert_eq!(aligned_position(TEXT, AREA, TextAlign::NONE), origin);
        assert_eq!(
            aligned_position(TEXT, AREA, HorizontalAlign::Left | VerticalAlign::Top),
            origin
        );
    }

    #[test]
    fn centre_and_middle() {
        let pos = aligned_position(TEXT, AREA, HorizontalAlign::Center | VerticalAlign::Middle);
        assert_eq!(pos, Vector2::new(10.0 + 30.0, 20.0 + 20.0));
    }

    #[test]
    fn right_and_bottom() {
        let pos = aligned_position(TEXT, AREA, HorizontalAlign::Right | VerticalAlign::Bottom);
        assert_eq!(pos, Vector2::new(10.0 + 60.0, 20.0 + 40.0));
    }

    #[test]
    fn single_axis_leaves_the_other_alone() {
        let pos = aligned_position(TEXT, AREA, HorizontalAlign::Center.into());
        assert_eq!(pos, Vector2::new(40.0, 20.0));
        let pos = aligned_position(TEXT, AREA, VerticalAlign::Bottom.into());
        assert_eq!(pos, Vector2::new(10.0, 60.0));
    }
}
