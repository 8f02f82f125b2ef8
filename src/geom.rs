/// Visible rectangle of an image: signed origin, unsigned size.
///
/// Source images may start anywhere; canonical output always starts at
/// (0, 0).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Zero-origin rectangle of the given size.
    pub const fn from_size(width: u32, height: u32) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Exclusive right edge.
    pub fn max_x(&self) -> i32 {
        self.x.saturating_add(i32::try_from(self.width).unwrap_or(i32::MAX))
    }

    /// Exclusive bottom edge.
    pub fn max_y(&self) -> i32 {
        self.y.saturating_add(i32::try_from(self.height).unwrap_or(i32::MAX))
    }

    pub const fn is_zero_origin(&self) -> bool {
        self.x == 0 && self.y == 0
    }

    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Pixel count.
    pub fn area(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.max_x() && y >= self.y && y < self.max_y()
    }

    /// Same size, moved to (0, 0).
    pub const fn at_origin(&self) -> Self {
        Self::from_size(self.width, self.height)
    }

    /// Whether the far corner is representable, so every pixel has an
    /// `i32` coordinate.
    pub(crate) fn fits_i32(&self) -> bool {
        let w = i64::from(self.x) + i64::from(self.width);
        let h = i64::from(self.y) + i64::from(self.height);
        w <= i64::from(i32::MAX) && h <= i64::from(i32::MAX)
    }
}
