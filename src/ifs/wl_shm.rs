use {
    crate::{
        client::{Client, ClientError, ErrorClass, RequestError},
        format::FORMATS,
        ifs::wl_shm_pool::{WlShmPool, WlShmPoolError},
        object::{Object, Version},
        wire::{WlShmId, wl_shm::*},
    },
    std::rc::Rc,
    thiserror::Error,
};

pub const WL_SHM_VERSION: u32 = 2;

pub struct WlShm {
    id: WlShmId,
    client: Rc<Client>,
    version: Version,
}

impl WlShm {
    /// Binds the global and advertises the supported formats.
    pub fn bind(client: &Rc<Client>, id: WlShmId, version: u32) -> Result<Rc<Self>, ClientError> {
        let version = Version(version.clamp(1, WL_SHM_VERSION));
        let mut created = false;
        let obj = client.objects.create(id, || {
            created = true;
            WlShm {
                id,
                client: client.clone(),
                version,
            }
        })?;
        if created {
            for format in FORMATS {
                client.event(Format {
                    self_id: id,
                    format: format.wl_id,
                });
            }
        }
        Ok(obj)
    }
}

impl WlShmRequestHandler for WlShm {
    type Error = WlShmError;

    fn create_pool(&self, req: CreatePool, _slf: &Rc<Self>) -> Result<(), Self::Error> {
        if req.size <= 0 {
            return Err(WlShmError::NonPositiveSize(req.size));
        }
        let size = req.size as usize;
        if !self.client.state.config.shm.allows(size) {
            return Err(WlShmError::TooLarge(size));
        }
        let fd = req.fd;
        self.client.objects.try_create(req.id, || {
            WlShmPool::new(req.id, &self.client, fd, size, self.version)
        })?;
        Ok(())
    }

    fn release(&self, _req: Release, _slf: &Rc<Self>) -> Result<(), Self::Error> {
        self.client.remove_obj(self)?;
        Ok(())
    }
}

object_base! {
    self = WlShm;
    variant = WlShm;
    interface = INTERFACE;
}

impl Object for WlShm {}

dedicated_add_obj!(WlShm, WlShmId, shms, INTERFACE);

#[derive(Debug, Error)]
pub enum WlShmError {
    #[error(transparent)]
    ClientError(Box<ClientError>),
    #[error("The pool size {0} is not positive")]
    NonPositiveSize(i32),
    #[error("The pool size {0} exceeds the configured maximum")]
    TooLarge(usize),
    #[error(transparent)]
    WlShmPoolError(Box<WlShmPoolError>),
}
efrom!(WlShmError, ClientError);
efrom!(WlShmError, WlShmPoolError);

impl RequestError for WlShmError {
    fn class(&self) -> ErrorClass {
        match self {
            WlShmError::ClientError(e) => e.class(),
            WlShmError::NonPositiveSize(_) => ErrorClass::ProtocolViolation,
            WlShmError::TooLarge(_) => ErrorClass::ClientResource,
            WlShmError::WlShmPoolError(e) => e.class(),
        }
    }

    fn code(&self) -> Option<u32> {
        match self {
            WlShmError::ClientError(e) => e.code(),
            WlShmError::NonPositiveSize(_) => Some(INVALID_STRIDE),
            WlShmError::TooLarge(_) => Some(INVALID_FD),
            WlShmError::WlShmPoolError(e) => e.code(),
        }
    }

    fn display_code(&self) -> u32 {
        match self {
            WlShmError::ClientError(e) => e.display_code(),
            WlShmError::WlShmPoolError(e) => e.display_code(),
            _ => self.class().display_code(),
        }
    }
}
