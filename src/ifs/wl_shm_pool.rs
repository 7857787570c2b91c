use {
    crate::{
        client::{Client, ClientError, ErrorClass, RequestError},
        clientmem::{ClientMem, ClientMemError},
        format,
        ifs::wl_buffer::{WlBuffer, WlBufferError},
        object::{Object, Version},
        utils::clonecell::CloneCell,
        wire::{
            WlShmPoolId,
            wl_shm::{INVALID_FD, INVALID_FORMAT, INVALID_STRIDE},
            wl_shm_pool::*,
        },
    },
    std::rc::Rc,
    thiserror::Error,
    uapi::OwnedFd,
};

/// A pool of client memory.
///
/// Every resize maps the fd again with the new size. Buffers keep the mapping they were
/// created from, so their memory stays valid until they are released.
pub struct WlShmPool {
    id: WlShmPoolId,
    client: Rc<Client>,
    fd: Rc<OwnedFd>,
    mem: CloneCell<Rc<ClientMem>>,
    version: Version,
}

impl WlShmPool {
    pub fn new(
        id: WlShmPoolId,
        client: &Rc<Client>,
        fd: Rc<OwnedFd>,
        len: usize,
        version: Version,
    ) -> Result<Self, WlShmPoolError> {
        let mem = ClientMem::new(&fd, len)?;
        log::debug!(
            "Client {} created pool {} with {} bytes",
            client.id,
            id,
            len
        );
        Ok(Self {
            id,
            client: client.clone(),
            fd,
            mem: CloneCell::new(Rc::new(mem)),
            version,
        })
    }

    pub fn size(&self) -> usize {
        self.mem.get().len()
    }

    /// The current mapping.
    pub fn mem(&self) -> Rc<ClientMem> {
        self.mem.get()
    }
}

impl WlShmPoolRequestHandler for WlShmPool {
    type Error = WlShmPoolError;

    fn create_buffer(&self, req: CreateBuffer, _slf: &Rc<Self>) -> Result<(), Self::Error> {
        let Some(format) = format::from_wl(req.format) else {
            return Err(WlShmPoolError::InvalidFormat(req.format));
        };
        if req.height < 0 || req.width < 0 || req.stride < 0 || req.offset < 0 {
            return Err(WlShmPoolError::NegativeParameters);
        }
        let mem = self.mem.get();
        self.client.objects.try_create(req.id, || {
            WlBuffer::new_shm(
                req.id,
                &self.client,
                req.offset as usize,
                req.width,
                req.height,
                req.stride,
                format,
                &mem,
                self.version,
            )
        })?;
        Ok(())
    }

    fn destroy(&self, _req: Destroy, _slf: &Rc<Self>) -> Result<(), Self::Error> {
        self.client.remove_obj(self)?;
        Ok(())
    }

    fn resize(&self, req: Resize, _slf: &Rc<Self>) -> Result<(), Self::Error> {
        if req.size < 0 {
            return Err(WlShmPoolError::NegativeSize);
        }
        let size = req.size as usize;
        let old = self.size();
        if size < old {
            return Err(WlShmPoolError::CannotShrink { old, new: size });
        }
        if size == old {
            return Ok(());
        }
        if !self.client.state.config.shm.allows(size) {
            return Err(WlShmPoolError::TooLarge(size));
        }
        let mem = ClientMem::new(&self.fd, size)?;
        log::debug!(
            "Client {} resized pool {} from {} to {} bytes",
            self.client.id,
            self.id,
            old,
            size
        );
        self.mem.set(Rc::new(mem));
        Ok(())
    }
}

object_base! {
    self = WlShmPool;
    variant = WlShmPool;
    interface = INTERFACE;
}

impl Object for WlShmPool {}

dedicated_add_obj!(WlShmPool, WlShmPoolId, shm_pools, INTERFACE);

#[derive(Debug, Error)]
pub enum WlShmPoolError {
    #[error(transparent)]
    ClientError(Box<ClientError>),
    #[error(transparent)]
    ClientMemError(Box<ClientMemError>),
    #[error("Tried to shrink the pool from {old} to {new} bytes")]
    CannotShrink { old: usize, new: usize },
    #[error("Requested size is negative")]
    NegativeSize,
    #[error("The pool size {0} exceeds the configured maximum")]
    TooLarge(usize),
    #[error("Format {0} is not supported")]
    InvalidFormat(u32),
    #[error("All parameters in a create_buffer request must be non-negative")]
    NegativeParameters,
    #[error(transparent)]
    WlBufferError(Box<WlBufferError>),
}
efrom!(WlShmPoolError, ClientError);
efrom!(WlShmPoolError, ClientMemError);
efrom!(WlShmPoolError, WlBufferError);

impl RequestError for WlShmPoolError {
    fn class(&self) -> ErrorClass {
        match self {
            WlShmPoolError::ClientError(e) => e.class(),
            WlShmPoolError::ClientMemError(e) => e.class(),
            WlShmPoolError::TooLarge(_) => ErrorClass::ClientResource,
            WlShmPoolError::WlBufferError(e) => e.class(),
            _ => ErrorClass::ProtocolViolation,
        }
    }

    fn code(&self) -> Option<u32> {
        match self {
            WlShmPoolError::ClientError(e) => e.code(),
            WlShmPoolError::ClientMemError(e) => e.code(),
            WlShmPoolError::CannotShrink { .. } | WlShmPoolError::NegativeSize => {
                Some(INVALID_STRIDE)
            }
            WlShmPoolError::TooLarge(_) => Some(INVALID_FD),
            WlShmPoolError::InvalidFormat(_) => Some(INVALID_FORMAT),
            WlShmPoolError::NegativeParameters => Some(INVALID_STRIDE),
            WlShmPoolError::WlBufferError(e) => e.code(),
        }
    }

    fn display_code(&self) -> u32 {
        match self {
            WlShmPoolError::ClientError(e) => e.display_code(),
            WlShmPoolError::WlBufferError(e) => e.display_code(),
            _ => self.class().display_code(),
        }
    }
}

impl RequestError for ClientMemError {
    fn class(&self) -> ErrorClass {
        match self {
            _ if self.is_system_exhaustion() => ErrorClass::SystemResource,
            ClientMemError::MmapFailed(_) | ClientMemError::Sigbus => ErrorClass::ClientResource,
            _ => ErrorClass::ProtocolViolation,
        }
    }

    fn code(&self) -> Option<u32> {
        match self {
            ClientMemError::OutOfBounds { .. } => Some(INVALID_STRIDE),
            _ if self.class() == ErrorClass::SystemResource => None,
            _ => Some(INVALID_FD),
        }
    }
}
