#![forbid(unsafe_code)]

//! Geometric primitives for hit testing and viewport visibility.

/// A rectangle in cell coordinates (0-indexed, origin at top-left).
///
/// Elements are placed in page space; the viewport is a rectangle in the
/// same space, so visibility is just the overlap of the two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    /// Left edge (inclusive).
    pub x: u16,
    /// Top edge (inclusive).
    pub y: u16,
    /// Width in cells.
    pub width: u16,
    /// Height in cells.
    pub height: u16,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge (exclusive).
    #[inline]
    pub const fn right(&self) -> u16 {
        self.x.saturating_add(self.width)
    }

    /// Bottom edge (exclusive).
    #[inline]
    pub const fn bottom(&self) -> u16 {
        self.y.saturating_add(self.height)
    }

    /// Area in cells.
    #[inline]
    pub const fn area(&self) -> u32 {
        self.width as u32 * self.height as u32
    }

    /// Check if the rectangle has zero area.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Check if a point is inside the rectangle.
    #[inline]
    pub const fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Compute the intersection with another rectangle, returning `None` if
    /// they do not overlap.
    #[inline]
    pub fn intersection_opt(&self, other: &Rect) -> Option<Rect> {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        if x < right && y < bottom {
            Some(Rect::new(x, y, right - x, bottom - y))
        } else {
            None
        }
    }

    /// Fraction of this rectangle's area that lies inside `viewport`, in
    /// `[0.0, 1.0]`.
    ///
    /// An empty rectangle is never visible.
    pub fn visible_fraction(&self, viewport: &Rect) -> f32 {
        if self.is_empty() {
            return 0.0;
        }
        match self.intersection_opt(viewport) {
            Some(overlap) => (overlap.area() as f64 / self.area() as f64) as f32,
            None => 0.0,
        }
    }

    /// Shift the rectangle up by `rows`, returning `None` when it would leave
    /// the top edge entirely.
    ///
    /// Used to map page-space rectangles into screen space after scrolling.
    pub fn scrolled_up(&self, rows: u16) -> Option<Rect> {
        if self.bottom() <= rows {
            return None;
        }
        let y = self.y.saturating_sub(rows);
        let clipped = rows.saturating_sub(self.y);
        Some(Rect::new(self.x, y, self.width, self.height - clipped))
    }
}
