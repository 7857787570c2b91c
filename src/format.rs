use std::fmt::Debug;

#[derive(Copy, Clone, Debug)]
pub struct Format {
    pub name: &'static str,
    pub drm: u32,
    pub wl_id: u32,
    pub bpp: u32,
    pub has_alpha: bool,
}

impl PartialEq for Format {
    fn eq(&self, other: &Self) -> bool {
        self.drm == other.drm
    }
}

impl Eq for Format {}

const fn fourcc_code(a: char, b: char, c: char, d: char) -> u32 {
    (a as u32) | ((b as u32) << 8) | ((c as u32) << 16) | ((d as u32) << 24)
}

const ARGB8888_ID: u32 = 0;
const ARGB8888_DRM: u32 = fourcc_code('A', 'R', '2', '4');

const XRGB8888_ID: u32 = 1;
const XRGB8888_DRM: u32 = fourcc_code('X', 'R', '2', '4');

pub static ARGB8888: &Format = &Format {
    name: "argb8888",
    drm: ARGB8888_DRM,
    wl_id: ARGB8888_ID,
    bpp: 4,
    has_alpha: true,
};

pub static XRGB8888: &Format = &Format {
    name: "xrgb8888",
    drm: XRGB8888_DRM,
    wl_id: XRGB8888_ID,
    bpp: 4,
    has_alpha: false,
};

/// The formats advertised by `wl_shm`.
pub static FORMATS: &[&Format] = &[ARGB8888, XRGB8888];

/// Looks up a format by its `wl_shm.format` value.
pub fn from_wl(id: u32) -> Option<&'static Format> {
    FORMATS.iter().copied().find(|f| f.wl_id == id)
}

/// A pixel that can be read out of client memory.
pub trait Pixel: Copy + Debug + 'static {
    const SIZE: usize;

    fn from_bytes(bytes: &[u8]) -> Self;
}

/// A little-endian `0xAARRGGBB` pixel.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Argb8888 {
    pub a: u8,
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// A little-endian `0xXXRRGGBB` pixel. The padding byte is discarded.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Xrgb8888 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Pixel for Argb8888 {
    const SIZE: usize = 4;

    fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            b: bytes[0],
            g: bytes[1],
            r: bytes[2],
            a: bytes[3],
        }
    }
}

impl Pixel for Xrgb8888 {
    const SIZE: usize = 4;

    fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            b: bytes[0],
            g: bytes[1],
            r: bytes[2],
        }
    }
}

impl Pixel for u8 {
    const SIZE: usize = 1;

    fn from_bytes(bytes: &[u8]) -> Self {
        bytes[0]
    }
}

impl Pixel for u32 {
    const SIZE: usize = 4;

    fn from_bytes(bytes: &[u8]) -> Self {
        u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
    }
}
