use {
    crate::{affine::Transformation, rect::Rect},
    std::f64::consts::FRAC_PI_2,
};

/// The eight orientations a buffer can be stored in relative to its surface.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Default)]
pub enum BufferTransform {
    #[default]
    Normal,
    Rotate90,
    Rotate180,
    Rotate270,
    Flip,
    FlipRotate90,
    FlipRotate180,
    FlipRotate270,
}

impl BufferTransform {
    pub fn from_wl(wl: i32) -> Option<Self> {
        let tf = match wl {
            0 => Self::Normal,
            1 => Self::Rotate90,
            2 => Self::Rotate180,
            3 => Self::Rotate270,
            4 => Self::Flip,
            5 => Self::FlipRotate90,
            6 => Self::FlipRotate180,
            7 => Self::FlipRotate270,
            _ => return None,
        };
        Some(tf)
    }

    pub fn to_wl(self) -> i32 {
        match self {
            Self::Normal => 0,
            Self::Rotate90 => 1,
            Self::Rotate180 => 2,
            Self::Rotate270 => 3,
            Self::Flip => 4,
            Self::FlipRotate90 => 5,
            Self::FlipRotate180 => 6,
            Self::FlipRotate270 => 7,
        }
    }

    pub fn is_flipped(self) -> bool {
        matches!(
            self,
            Self::Flip | Self::FlipRotate90 | Self::FlipRotate180 | Self::FlipRotate270
        )
    }

    /// Number of counter-clockwise quarter turns.
    pub fn quarter_turns(self) -> u32 {
        match self {
            Self::Normal | Self::Flip => 0,
            Self::Rotate90 | Self::FlipRotate90 => 1,
            Self::Rotate180 | Self::FlipRotate180 => 2,
            Self::Rotate270 | Self::FlipRotate270 => 3,
        }
    }

    pub fn angle(self) -> f64 {
        self.quarter_turns() as f64 * FRAC_PI_2
    }

    pub fn swaps_dimensions(self) -> bool {
        self.quarter_turns() % 2 == 1
    }

    pub fn maybe_swap<T>(self, (a, b): (T, T)) -> (T, T) {
        match self.swaps_dimensions() {
            true => (b, a),
            false => (a, b),
        }
    }
}

/// Size of a surface in surface coordinates for a buffer of the given size.
pub fn logical_size(buffer_size: (i32, i32), transform: BufferTransform, scale: i32) -> (i32, i32) {
    let scale = scale.max(1);
    transform.maybe_swap((buffer_size.0 / scale, buffer_size.1 / scale))
}

/// Maps surface coordinates to buffer coordinates.
///
/// `logical` is the surface size as returned by `logical_size`.
///
/// Quarter turns are applied as `rotate(+angle)`, i.e. clockwise in the y-down
/// surface space, after the flip. This is the opposite direction of wlroots'
/// `wlr_region_transform(invert(t))`: for `Rotate90` and a 20x10 buffer, the surface
/// pixel (0, 0) lands at buffer (19, 0) here and at (0, 9) in wlroots.
pub fn surface_to_buffer(
    logical: (i32, i32),
    transform: BufferTransform,
    scale: i32,
    offset: (i32, i32),
) -> Transformation {
    let (width, height) = (logical.0 as f64, logical.1 as f64);
    let (bwidth, bheight) = transform.maybe_swap((width, height));
    let scale = scale.max(1) as f64;
    let mut t = Transformation::new();
    t.translate(-width / 2.0, -height / 2.0);
    if transform.is_flipped() {
        t.reflect_y();
    }
    t.rotate(transform.angle())
        .translate(bwidth / 2.0, bheight / 2.0)
        .scale(scale, scale)
        .translate(-offset.0 as f64, -offset.1 as f64);
    t
}

pub fn surface_rect_to_buffer(rect: Rect, t: &Transformation) -> Rect {
    let a = t.apply((rect.x1(), rect.y1()));
    let b = t.apply((rect.x2(), rect.y2()));
    Rect::from_points(a, b)
}
