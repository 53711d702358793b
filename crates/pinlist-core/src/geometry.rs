//! Geometry primitives in surface pixels.

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const ZERO: Size = Size {
        width: 0.0,
        height: 0.0,
    };

    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Child bounds relative to the content origin of the list (not the viewport).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// A child that has been through layout has at least one non-zero side.
    pub fn has_area_or_extent(&self) -> bool {
        self.width != 0.0 || self.height != 0.0
    }

    pub fn translate(&self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edges() {
        let rect = Rect::new(10.0, 40.0, 100.0, 25.0);
        assert_eq!(rect.top(), 40.0);
        assert_eq!(rect.bottom(), 65.0);
        assert_eq!(rect.right(), 110.0);
        assert_eq!(rect.translate(0.0, -40.0).top(), 0.0);
    }

    #[test]
    fn zero_rect_has_no_layout() {
        assert!(!Rect::default().has_area_or_extent());
        assert!(Rect::new(0.0, 0.0, 0.0, 1.0).has_area_or_extent());
    }
}
