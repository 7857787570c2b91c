use {
    crate::{
        client::{Client, ClientError, ErrorClass, RequestError},
        ifs::{wl_region::WlRegion, wl_surface::WlSurface},
        object::{Object, Version},
        wire::{WlCompositorId, wl_compositor::*},
    },
    std::rc::Rc,
    thiserror::Error,
};

pub const WL_COMPOSITOR_VERSION: u32 = 6;

pub struct WlCompositor {
    id: WlCompositorId,
    client: Rc<Client>,
    version: Version,
}

impl WlCompositor {
    pub fn bind(
        client: &Rc<Client>,
        id: WlCompositorId,
        version: u32,
    ) -> Result<Rc<Self>, ClientError> {
        let version = Version(version.clamp(1, WL_COMPOSITOR_VERSION));
        client.objects.create(id, || WlCompositor {
            id,
            client: client.clone(),
            version,
        })
    }
}

impl WlCompositorRequestHandler for WlCompositor {
    type Error = WlCompositorError;

    fn create_surface(&self, req: CreateSurface, _slf: &Rc<Self>) -> Result<(), Self::Error> {
        self.client
            .objects
            .create(req.id, || WlSurface::new(req.id, &self.client, self.version))?;
        Ok(())
    }

    fn create_region(&self, req: CreateRegion, _slf: &Rc<Self>) -> Result<(), Self::Error> {
        self.client
            .objects
            .create(req.id, || WlRegion::new(req.id, &self.client, self.version))?;
        Ok(())
    }
}

object_base! {
    self = WlCompositor;
    variant = WlCompositor;
    interface = INTERFACE;
}

impl Object for WlCompositor {}

dedicated_add_obj!(WlCompositor, WlCompositorId, compositors, INTERFACE);

#[derive(Debug, Error)]
pub enum WlCompositorError {
    #[error(transparent)]
    ClientError(Box<ClientError>),
}
efrom!(WlCompositorError, ClientError);

impl RequestError for WlCompositorError {
    fn class(&self) -> ErrorClass {
        match self {
            WlCompositorError::ClientError(e) => e.class(),
        }
    }

    fn display_code(&self) -> u32 {
        match self {
            WlCompositorError::ClientError(e) => e.display_code(),
        }
    }
}
