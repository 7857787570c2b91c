use {
    smallvec::SmallVec,
    std::fmt::{Debug, Formatter},
    wlcore_algorithms::rect::RectRaw,
};

mod region;

pub use region::RegionBuilder;

#[derive(Copy, Clone, Eq, PartialEq, Default, Hash)]
#[repr(transparent)]
pub struct Rect {
    raw: RectRaw,
}

/// A set of pixels stored as y-x banded, non-overlapping rectangles.
#[derive(Clone, Eq, PartialEq)]
pub struct Region {
    rects: SmallVec<[RectRaw; 1]>,
    extents: Rect,
}

impl Debug for Rect {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rect")
            .field("x", &self.raw.x1)
            .field("y", &self.raw.y1)
            .field("width", &self.width())
            .field("height", &self.height())
            .finish()
    }
}

impl Debug for Region {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Debug::fmt(&self[..], f)
    }
}

impl Rect {
    pub fn new_empty(x: i32, y: i32) -> Self {
        Self {
            raw: RectRaw {
                x1: x,
                y1: y,
                x2: x,
                y2: y,
            },
        }
    }

    pub fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Option<Self> {
        if x2 < x1 || y2 < y1 {
            return None;
        }
        Some(Self {
            raw: RectRaw { x1, y1, x2, y2 },
        })
    }

    pub fn new_sized(x1: i32, y1: i32, width: i32, height: i32) -> Option<Self> {
        if width < 0 || height < 0 {
            return None;
        }
        Self::new(x1, y1, x1.checked_add(width)?, y1.checked_add(height)?)
    }

    /// Like `new_sized` but clamps the far edges instead of failing on overflow.
    /// Negative extents produce an empty rectangle.
    pub fn new_sized_saturating(x1: i32, y1: i32, width: i32, height: i32) -> Self {
        Self {
            raw: RectRaw {
                x1,
                y1,
                x2: x1.saturating_add(width.max(0)),
                y2: y1.saturating_add(height.max(0)),
            },
        }
    }

    /// Returns the smallest rectangle containing both corners, in any order.
    pub fn from_points(a: (i32, i32), b: (i32, i32)) -> Self {
        Self {
            raw: RectRaw {
                x1: a.0.min(b.0),
                y1: a.1.min(b.1),
                x2: a.0.max(b.0),
                y2: a.1.max(b.1),
            },
        }
    }

    pub fn union(&self, other: Self) -> Self {
        Self {
            raw: RectRaw {
                x1: self.raw.x1.min(other.raw.x1),
                y1: self.raw.y1.min(other.raw.y1),
                x2: self.raw.x2.max(other.raw.x2),
                y2: self.raw.y2.max(other.raw.y2),
            },
        }
    }

    pub fn intersects(&self, other: &Self) -> bool {
        let x1 = self.raw.x1.max(other.raw.x1);
        let y1 = self.raw.y1.max(other.raw.y1);
        let x2 = self.raw.x2.min(other.raw.x2);
        let y2 = self.raw.y2.min(other.raw.y2);
        x1 < x2 && y1 < y2
    }

    pub fn intersect(&self, other: Self) -> Self {
        let x1 = self.raw.x1.max(other.raw.x1);
        let y1 = self.raw.y1.max(other.raw.y1);
        let x2 = self.raw.x2.min(other.raw.x2).max(x1);
        let y2 = self.raw.y2.min(other.raw.y2).max(y1);
        Self {
            raw: RectRaw { x1, y1, x2, y2 },
        }
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        self.raw.x1 <= x && self.raw.y1 <= y && self.raw.x2 > x && self.raw.y2 > y
    }

    pub fn contains_rect(&self, rect: &Self) -> bool {
        self.raw.x1 <= rect.raw.x1
            && self.raw.y1 <= rect.raw.y1
            && rect.raw.x2 <= self.raw.x2
            && rect.raw.y2 <= self.raw.y2
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    pub fn area(&self) -> u64 {
        self.raw.area()
    }

    pub fn move_(&self, dx: i32, dy: i32) -> Self {
        Self {
            raw: RectRaw {
                x1: self.raw.x1.saturating_add(dx),
                y1: self.raw.y1.saturating_add(dy),
                x2: self.raw.x2.saturating_add(dx),
                y2: self.raw.y2.saturating_add(dy),
            },
        }
    }

    pub fn x1(&self) -> i32 {
        self.raw.x1
    }

    pub fn x2(&self) -> i32 {
        self.raw.x2
    }

    pub fn y1(&self) -> i32 {
        self.raw.y1
    }

    pub fn y2(&self) -> i32 {
        self.raw.y2
    }

    pub fn width(&self) -> i32 {
        self.raw.x2 - self.raw.x1
    }

    pub fn height(&self) -> i32 {
        self.raw.y2 - self.raw.y1
    }

    /// `(x, y, width, height)`
    pub fn to_xywh(&self) -> (i32, i32, i32, i32) {
        (self.raw.x1, self.raw.y1, self.width(), self.height())
    }
}
