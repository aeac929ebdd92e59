//! Page-space value types: [`Point`], [`Size`], [`Bounds`] and [`Insets`].
//!
//! Coordinates follow PDF user space. The origin is the bottom-left corner of
//! the page, x grows rightward, y grows upward, and one unit is one point
//! (1/72 inch).

/// A position on the page.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn x(self) -> f32 {
        self.x
    }

    pub fn y(self) -> f32 {
        self.y
    }
}

/// Width and height in points, or in pixels for decoded images.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    width: f32,
    height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn width(self) -> f32 {
        self.width
    }

    pub fn height(self) -> f32 {
        self.height
    }

    /// The area left after removing `insets`; negative when they overlap.
    ///
    /// ```
    /// # use folio_core::geometry::{Insets, Size};
    /// let interior = Size::new(612.0, 792.0).shrink(Insets::uniform(50.0));
    /// assert_eq!(interior, Size::new(512.0, 692.0));
    /// ```
    pub fn shrink(self, insets: Insets) -> Self {
        Self {
            width: self.width - insets.horizontal_sum(),
            height: self.height - insets.vertical_sum(),
        }
    }

    /// True when there is no positive area to draw into.
    pub fn is_empty(self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    pub fn is_finite(self) -> bool {
        self.width.is_finite() && self.height.is_finite()
    }

    /// Height divided by width.
    pub fn aspect(self) -> f32 {
        self.height / self.width
    }
}

/// An axis-aligned rectangle on the page.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    origin: Point,
    size: Size,
}

impl Bounds {
    /// A rectangle whose bottom-left corner is `origin`.
    pub fn new_from_origin(origin: Point, size: Size) -> Self {
        Self { origin, size }
    }

    pub fn min_x(self) -> f32 {
        self.origin.x
    }

    pub fn min_y(self) -> f32 {
        self.origin.y
    }

    pub fn width(self) -> f32 {
        self.size.width
    }

    pub fn height(self) -> f32 {
        self.size.height
    }
}

/// Margins kept clear on each side of the page.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Insets {
    horizontal: f32,
    vertical: f32,
}

impl Insets {
    /// The same margin on all four sides.
    pub fn uniform(value: f32) -> Self {
        Self {
            horizontal: value,
            vertical: value,
        }
    }

    /// Left plus right margin.
    pub fn horizontal_sum(self) -> f32 {
        self.horizontal * 2.0
    }

    /// Top plus bottom margin.
    pub fn vertical_sum(self) -> f32 {
        self.vertical * 2.0
    }
}
