use {
    crate::{
        client::{ClientError, LookupError},
        ifs::{
            wl_buffer::WlBuffer,
            wl_callback::WlCallback,
            wl_compositor::WlCompositor,
            wl_region::WlRegion,
            wl_seat::{WlSeat, wl_keyboard::WlKeyboard},
            wl_shm::WlShm,
            wl_shm_pool::WlShmPool,
            wl_surface::WlSurface,
        },
        object::{Interface, Object, ObjectBase, ObjectId},
        utils::copyhashmap::CopyHashMap,
        wire::{
            WlBufferId, WlCallbackId, WlCompositorId, WlKeyboardId, WlRegionId, WlSeatId,
            WlShmId, WlShmPoolId, WlSurfaceId,
        },
    },
    std::{hash::Hash, rc::Rc},
};

pub const MIN_SERVER_ID: u32 = 0xff000000;

/// An object type with a dedicated, typed slot in `Objects`.
pub trait Implementation: Object + Sized {
    type Id: Copy + Eq + Hash + Into<ObjectId> + From<ObjectId>;

    const INTERFACE: Interface;

    fn slot(objects: &Objects) -> &CopyHashMap<Self::Id, Rc<Self>>;
}

/// The objects of one client, keyed by their wire id.
///
/// `registry` holds every object, the typed maps hold the same objects by their
/// concrete type. An id is present in `registry` iff it is present in exactly one typed
/// map.
pub struct Objects {
    registry: CopyHashMap<ObjectId, Rc<dyn Object>>,
    pub compositors: CopyHashMap<WlCompositorId, Rc<WlCompositor>>,
    pub surfaces: CopyHashMap<WlSurfaceId, Rc<WlSurface>>,
    pub regions: CopyHashMap<WlRegionId, Rc<WlRegion>>,
    pub shms: CopyHashMap<WlShmId, Rc<WlShm>>,
    pub shm_pools: CopyHashMap<WlShmPoolId, Rc<WlShmPool>>,
    pub buffers: CopyHashMap<WlBufferId, Rc<WlBuffer>>,
    pub callbacks: CopyHashMap<WlCallbackId, Rc<WlCallback>>,
    pub seats: CopyHashMap<WlSeatId, Rc<WlSeat>>,
    pub keyboards: CopyHashMap<WlKeyboardId, Rc<WlKeyboard>>,
}

impl Objects {
    pub fn new() -> Self {
        Self {
            registry: Default::default(),
            compositors: Default::default(),
            surfaces: Default::default(),
            regions: Default::default(),
            shms: Default::default(),
            shm_pools: Default::default(),
            buffers: Default::default(),
            callbacks: Default::default(),
            seats: Default::default(),
            keyboards: Default::default(),
        }
    }

    /// Breaks all reference cycles and releases every object.
    pub fn destroy(&self) {
        let objects = self.registry.take();
        for (_, obj) in &objects {
            obj.break_loops();
        }
        self.compositors.clear();
        self.surfaces.clear();
        self.regions.clear();
        self.shms.clear();
        self.shm_pools.clear();
        self.buffers.clear();
        self.callbacks.clear();
        self.seats.clear();
        self.keyboards.clear();
    }

    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    pub fn get_obj(&self, id: ObjectId) -> Result<Rc<dyn Object>, ClientError> {
        match self.registry.get(&id) {
            Some(o) => Ok(o),
            _ => Err(ClientError::InvalidObject(id)),
        }
    }

    /// Returns the object bound to `id` or binds the object returned by `f`.
    ///
    /// `f` is not invoked if an object of type `T` is already bound to `id`.
    pub fn create<T: Implementation>(
        &self,
        id: T::Id,
        f: impl FnOnce() -> T,
    ) -> Result<Rc<T>, ClientError> {
        self.try_create(id, || Ok::<_, ClientError>(f()))
    }

    /// Like `create` but with a fallible constructor. Nothing is bound if `f` fails.
    pub fn try_create<T, E, F>(&self, id: T::Id, f: F) -> Result<Rc<T>, E>
    where
        T: Implementation,
        E: From<ClientError>,
        F: FnOnce() -> Result<T, E>,
    {
        let oid: ObjectId = id.into();
        if oid.raw() == 0 || oid.raw() >= MIN_SERVER_ID {
            return Err(ClientError::ClientIdOutOfBounds(oid).into());
        }
        if let Some(obj) = T::slot(self).get(&id) {
            return Ok(obj);
        }
        if let Some(obj) = self.registry.get(&oid) {
            return Err(ClientError::IdAlreadyInUse {
                id: oid,
                interface: obj.interface(),
            }
            .into());
        }
        let obj = Rc::new(f()?);
        if obj.id() != oid {
            return Err(ClientError::IdMismatch(obj.id(), oid).into());
        }
        self.registry.set(oid, obj.clone());
        T::slot(self).set(id, obj.clone());
        Ok(obj)
    }

    pub fn get<T: Implementation>(&self, id: T::Id) -> Result<Rc<T>, ClientError> {
        match T::slot(self).get(&id) {
            Some(obj) => Ok(obj),
            _ => Err(ClientError::NotBound(LookupError {
                interface: T::INTERFACE,
                id: id.into(),
            })),
        }
    }

    pub fn remove<T: Implementation>(&self, id: T::Id) -> Result<Rc<T>, ClientError> {
        let oid = id.into();
        if self.registry.remove(&oid).is_none() {
            return Err(ClientError::UnknownId(oid));
        }
        match T::slot(self).remove(&id) {
            Some(obj) => Ok(obj),
            _ => Err(ClientError::UnknownId(oid)),
        }
    }
}
