pub mod region;

use {
    smallvec::SmallVec,
    std::fmt::{Debug, Formatter},
};

#[derive(Copy, Clone, Eq, PartialEq, Default, Hash)]
pub struct RectRaw {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl Debug for RectRaw {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rect")
            .field("x1", &self.x1)
            .field("y1", &self.y1)
            .field("x2", &self.x2)
            .field("y2", &self.y2)
            .field("width", &(self.x2 - self.x1))
            .field("height", &(self.y2 - self.y1))
            .finish()
    }
}

impl RectRaw {
    pub fn is_empty(&self) -> bool {
        self.x1 >= self.x2 || self.y1 >= self.y2
    }

    pub fn area(&self) -> u64 {
        if self.is_empty() {
            return 0;
        }
        (self.x2 as i64 - self.x1 as i64) as u64 * (self.y2 as i64 - self.y1 as i64) as u64
    }
}

/// Rectangles sorted into y-x bands: every band is a maximal run of rectangles
/// sharing `y1` and `y2`, ordered by `x1`, and no two rectangles overlap.
pub type Container = SmallVec<[RectRaw; 1]>;
