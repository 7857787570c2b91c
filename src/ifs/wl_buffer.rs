use {
    crate::{
        client::{Client, ClientError, ErrorClass, RequestError},
        clientmem::{ClientMem, ClientMemError, ClientMemOffset},
        format::{Format, Pixel},
        object::{Object, Version},
        rect::Rect,
        wire::{WlBufferId, wl_buffer::*, wl_shm::INVALID_STRIDE},
    },
    std::{cell::Cell, rc::Rc},
    thiserror::Error,
};

/// A shm buffer. The shape and the memory span are fixed at creation.
pub struct WlBuffer {
    pub id: WlBufferId,
    pub client: Rc<Client>,
    pub rect: Rect,
    pub format: &'static Format,
    width: i32,
    height: i32,
    stride: i32,
    mem: ClientMemOffset,
    destroyed: Cell<bool>,
    version: Version,
}

impl WlBuffer {
    pub fn new_shm(
        id: WlBufferId,
        client: &Rc<Client>,
        offset: usize,
        width: i32,
        height: i32,
        stride: i32,
        format: &'static Format,
        mem: &Rc<ClientMem>,
        version: Version,
    ) -> Result<Self, WlBufferError> {
        let bytes = stride as u64 * height as u64;
        let required = bytes + offset as u64;
        if required > mem.len() as u64 {
            return Err(WlBufferError::OutOfBounds {
                required,
                size: mem.len(),
            });
        }
        let min_row_size = width as u64 * format.bpp as u64;
        if (stride as u64) < min_row_size {
            return Err(WlBufferError::StrideTooSmall { stride, min_row_size });
        }
        let mem = mem.offset(offset, bytes as usize)?;
        Ok(Self {
            id,
            client: client.clone(),
            rect: Rect::new_sized_saturating(0, 0, width, height),
            format,
            width,
            height,
            stride,
            mem,
            destroyed: Cell::new(false),
            version,
        })
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn stride(&self) -> i32 {
        self.stride
    }

    pub fn destroyed(&self) -> bool {
        self.destroyed.get()
    }

    /// The span of pool memory backing this buffer.
    pub fn mem(&self) -> &ClientMemOffset {
        &self.mem
    }

    /// Copies the buffer contents as pixels of type `P`, row padding included.
    pub fn read_pixels<P: Pixel>(&self) -> Result<Vec<P>, WlBufferError> {
        let len = self.mem.len();
        if len % P::SIZE != 0 {
            return Err(WlBufferError::ShapeMismatch {
                pixel_size: P::SIZE,
                len,
            });
        }
        let bytes = self.mem.read()?;
        Ok(bytes.chunks_exact(P::SIZE).map(P::from_bytes).collect())
    }

    pub fn with_bytes<T>(&self, f: impl FnOnce(&[Cell<u8>]) -> T) -> Result<T, WlBufferError> {
        Ok(self.mem.access(f)?)
    }

    /// Tells the client that the buffer is no longer being read.
    pub fn send_release(&self) {
        if !self.destroyed.get() {
            self.client.event(Release { self_id: self.id });
        }
    }
}

impl WlBufferRequestHandler for WlBuffer {
    type Error = WlBufferError;

    fn destroy(&self, _req: Destroy, _slf: &Rc<Self>) -> Result<(), Self::Error> {
        self.destroyed.set(true);
        self.client.remove_obj(self)?;
        Ok(())
    }
}

object_base! {
    self = WlBuffer;
    variant = WlBuffer;
    interface = INTERFACE;
}

impl Object for WlBuffer {}

dedicated_add_obj!(WlBuffer, WlBufferId, buffers, INTERFACE);

#[derive(Debug, Error)]
pub enum WlBufferError {
    #[error("The buffer requires {required} bytes but the pool has {size}")]
    OutOfBounds { required: u64, size: usize },
    #[error("Stride {stride} is smaller than the minimum row size {min_row_size}")]
    StrideTooSmall { stride: i32, min_row_size: u64 },
    #[error("Pixels of size {pixel_size} do not evenly divide a span of {len} bytes")]
    ShapeMismatch { pixel_size: usize, len: usize },
    #[error(transparent)]
    ClientMemError(Box<ClientMemError>),
    #[error(transparent)]
    ClientError(Box<ClientError>),
}
efrom!(WlBufferError, ClientMemError);
efrom!(WlBufferError, ClientError);

impl RequestError for WlBufferError {
    fn class(&self) -> ErrorClass {
        match self {
            WlBufferError::ClientMemError(e) => e.class(),
            WlBufferError::ClientError(e) => e.class(),
            WlBufferError::ShapeMismatch { .. } => ErrorClass::ClientResource,
            _ => ErrorClass::ProtocolViolation,
        }
    }

    fn code(&self) -> Option<u32> {
        match self {
            WlBufferError::OutOfBounds { .. } | WlBufferError::StrideTooSmall { .. } => {
                Some(INVALID_STRIDE)
            }
            WlBufferError::ClientMemError(e) => e.code(),
            WlBufferError::ClientError(e) => e.code(),
            WlBufferError::ShapeMismatch { .. } => None,
        }
    }

    fn display_code(&self) -> u32 {
        match self {
            WlBufferError::ClientError(e) => e.display_code(),
            _ => self.class().display_code(),
        }
    }
}
