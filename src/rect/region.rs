use {
    crate::rect::{Rect, Region},
    smallvec::SmallVec,
    std::{mem, ops::Deref, rc::Rc},
    wlcore_algorithms::rect::{
        RectRaw,
        region::{extents, rects_to_bands, subtract, union},
    },
};

thread_local! {
    static EMPTY: Rc<Region> = Rc::new(Region {
        rects: Default::default(),
        extents: Default::default(),
    });
}

impl Region {
    pub fn new(rect: Rect) -> Rc<Self> {
        if rect.is_empty() {
            return Self::empty();
        }
        let mut rects = SmallVec::new();
        rects.push(rect.raw);
        Rc::new(Self {
            rects,
            extents: rect,
        })
    }

    pub fn empty() -> Rc<Self> {
        EMPTY.with(|e| e.clone())
    }

    pub fn from_rects(rects: &[Rect]) -> Rc<Self> {
        if rects.len() == 1 {
            return Self::new(rects[0]);
        }
        // SAFETY: Rect is a transparent wrapper around RectRaw.
        let rects = rects_to_bands(unsafe { mem::transmute::<&[Rect], &[RectRaw]>(rects) });
        if rects.is_empty() {
            return Self::empty();
        }
        Rc::new(Self {
            extents: Rect {
                raw: extents(&rects),
            },
            rects,
        })
    }

    pub fn union(self: &Rc<Self>, other: &Rc<Self>) -> Rc<Self> {
        if self.extents.is_empty() {
            return other.clone();
        }
        if other.extents.is_empty() {
            return self.clone();
        }
        let rects = union(&self.rects, &other.rects);
        Rc::new(Self {
            rects,
            extents: self.extents.union(other.extents),
        })
    }

    pub fn subtract(self: &Rc<Self>, other: &Rc<Self>) -> Rc<Self> {
        if self.extents.is_empty()
            || other.extents.is_empty()
            || !self.extents.intersects(&other.extents)
        {
            return self.clone();
        }
        let rects = subtract(&self.rects, &other.rects);
        if rects.is_empty() {
            return Self::empty();
        }
        Rc::new(Self {
            extents: Rect {
                raw: extents(&rects),
            },
            rects,
        })
    }

    pub fn extents(&self) -> Rect {
        self.extents
    }

    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }

    pub fn area(&self) -> u64 {
        self.rects.iter().map(|r| r.area()).sum()
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        if !self.extents.contains(x, y) {
            return false;
        }
        self.iter().any(|r| r.contains(x, y))
    }

    /// The non-overlapping decomposition of this region as `(x, y, width, height)`.
    pub fn rectangles(&self) -> Vec<(i32, i32, i32, i32)> {
        self.iter().map(|r| r.to_xywh()).collect()
    }
}

impl Deref for Region {
    type Target = [Rect];

    fn deref(&self) -> &Self::Target {
        // SAFETY: Rect is a transparent wrapper around RectRaw.
        unsafe { mem::transmute::<&[RectRaw], &[Rect]>(&self.rects[..]) }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
enum BuilderOp {
    #[default]
    Add,
    Sub,
}

/// Accumulates additions and subtractions and materializes them lazily.
///
/// Consecutive operations of the same kind are batched into a single band conversion.
#[derive(Debug, Clone)]
pub struct RegionBuilder {
    base: Rc<Region>,
    op: BuilderOp,
    pending: Vec<Rect>,
}

impl Default for RegionBuilder {
    fn default() -> Self {
        Self {
            base: Region::empty(),
            op: Default::default(),
            pending: Default::default(),
        }
    }
}

impl RegionBuilder {
    pub fn add(&mut self, rect: Rect) {
        if rect.is_empty() {
            return;
        }
        self.set_op(BuilderOp::Add);
        self.pending.push(rect);
    }

    pub fn sub(&mut self, rect: Rect) {
        if rect.is_empty() {
            return;
        }
        self.set_op(BuilderOp::Sub);
        self.pending.push(rect);
    }

    pub fn add_region(&mut self, region: &Rc<Region>) {
        self.flush();
        self.base = self.base.union(region);
    }

    pub fn get(&mut self) -> Rc<Region> {
        self.flush();
        self.base.clone()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
        self.op = BuilderOp::Add;
        self.base = Region::empty();
    }

    fn set_op(&mut self, op: BuilderOp) {
        if self.op != op {
            self.flush();
            self.op = op;
        }
    }

    fn flush(&mut self) {
        if self.pending.is_empty() {
            return;
        }
        let region = Region::from_rects(&self.pending);
        self.base = match self.op {
            BuilderOp::Add => self.base.union(&region),
            BuilderOp::Sub => self.base.subtract(&region),
        };
        self.pending.clear();
    }
}
