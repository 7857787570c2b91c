use {
    crate::{
        client::{Client, ClientError, ErrorClass, RequestError},
        ifs::{wl_buffer::WlBuffer, wl_callback::WlCallback, wl_region::WlRegion},
        object::{Object, Version},
        rect::{Rect, Region, RegionBuilder},
        transform::{BufferTransform, logical_size, surface_rect_to_buffer, surface_to_buffer},
        wire::{WlSurfaceId, wl_surface::*},
    },
    std::{
        cell::RefCell,
        collections::VecDeque,
        mem,
        rc::Rc,
    },
    thiserror::Error,
};


const OFFSET_SINCE: u32 = 5;

/// An immutable snapshot of a surface, produced by `commit`.
pub struct SurfaceState {
    pub buffer: Option<Rc<WlBuffer>>,
    /// Surface-local damage as submitted by the client.
    pub surface_damage: Vec<Rect>,
    /// All damage of this commit in buffer-local coordinates.
    pub buffer_damage: Rc<Region>,
    pub frame_callbacks: Vec<Rc<WlCallback>>,
    pub transform: BufferTransform,
    pub scale: i32,
    pub offset: (i32, i32),
    pub opaque_region: Option<Rc<Region>>,
    pub input_region: Option<Rc<Region>>,
    pub logical_width: i32,
    pub logical_height: i32,
}

struct PendingState {
    buffer: Option<Rc<WlBuffer>>,
    surface_damage: Vec<Rect>,
    buffer_damage: RegionBuilder,
    frame_callbacks: Vec<Rc<WlCallback>>,
    transform: BufferTransform,
    scale: i32,
    offset: (i32, i32),
    opaque_region: Option<Rc<Region>>,
    input_region: Option<Rc<Region>>,
    logical_width: i32,
    logical_height: i32,
}

impl Default for PendingState {
    fn default() -> Self {
        Self {
            buffer: None,
            surface_damage: vec![],
            buffer_damage: Default::default(),
            frame_callbacks: vec![],
            transform: BufferTransform::Normal,
            scale: 1,
            offset: (0, 0),
            opaque_region: None,
            input_region: None,
            logical_width: 0,
            logical_height: 0,
        }
    }
}

impl PendingState {
    fn update_logical_size(&mut self) {
        let size = match &self.buffer {
            Some(b) => (b.width(), b.height()),
            _ => (0, 0),
        };
        (self.logical_width, self.logical_height) = logical_size(size, self.transform, self.scale);
    }

    /// Moves the accumulated state into a snapshot and starts the next generation.
    fn snapshot(&mut self) -> SurfaceState {
        if !self.surface_damage.is_empty() {
            let t = surface_to_buffer(
                (self.logical_width, self.logical_height),
                self.transform,
                self.scale,
                self.offset,
            );
            for rect in &self.surface_damage {
                self.buffer_damage.add(surface_rect_to_buffer(*rect, &t));
            }
        }
        let buffer_damage = self.buffer_damage.get();
        self.buffer_damage.clear();
        SurfaceState {
            buffer: self.buffer.clone(),
            surface_damage: mem::take(&mut self.surface_damage),
            buffer_damage,
            frame_callbacks: mem::take(&mut self.frame_callbacks),
            transform: self.transform,
            scale: self.scale,
            offset: self.offset,
            opaque_region: self.opaque_region.clone(),
            input_region: self.input_region.clone(),
            logical_width: self.logical_width,
            logical_height: self.logical_height,
        }
    }
}

pub struct WlSurface {
    pub id: WlSurfaceId,
    pub client: Rc<Client>,
    pending: RefCell<PendingState>,
    states: RefCell<VecDeque<SurfaceState>>,
    version: Version,
}

impl WlSurface {
    pub fn new(id: WlSurfaceId, client: &Rc<Client>, version: Version) -> Self {
        Self {
            id,
            client: client.clone(),
            pending: Default::default(),
            states: Default::default(),
            version,
        }
    }

    /// Removes the oldest committed state.
    pub fn pop_state(&self) -> Option<SurfaceState> {
        self.states.borrow_mut().pop_front()
    }

    /// The number of committed states that have not been popped.
    pub fn pending_states(&self) -> usize {
        self.states.borrow().len()
    }

    /// Size of the surface in surface coordinates as of the pending state.
    pub fn logical_size(&self) -> (i32, i32) {
        let pending = self.pending.borrow();
        (pending.logical_width, pending.logical_height)
    }

    /// Drops all pending and committed state. Frame callbacks that can no longer be
    /// completed are unbound.
    fn reset(&self) {
        let pending = mem::take(&mut *self.pending.borrow_mut());
        let states = mem::take(&mut *self.states.borrow_mut());
        let callbacks = states
            .iter()
            .flat_map(|s| &s.frame_callbacks)
            .chain(&pending.frame_callbacks);
        for cb in callbacks {
            cb.cancel();
        }
    }
}

impl WlSurfaceRequestHandler for WlSurface {
    type Error = WlSurfaceError;

    fn destroy(&self, _req: Destroy, _slf: &Rc<Self>) -> Result<(), Self::Error> {
        self.reset();
        self.client.remove_obj(self)?;
        Ok(())
    }

    fn attach(&self, req: Attach, _slf: &Rc<Self>) -> Result<(), Self::Error> {
        let offset = if self.version >= OFFSET_SINCE {
            if req.x != 0 || req.y != 0 {
                return Err(WlSurfaceError::OffsetInAttach);
            }
            None
        } else {
            Some((req.x, req.y))
        };
        let buffer = if req.buffer.is_some() {
            Some(self.client.lookup::<WlBuffer>(req.buffer)?)
        } else {
            None
        };
        let pending = &mut *self.pending.borrow_mut();
        if let Some(offset) = offset {
            pending.offset = offset;
        }
        pending.buffer = buffer;
        pending.update_logical_size();
        Ok(())
    }

    fn damage(&self, req: Damage, _slf: &Rc<Self>) -> Result<(), Self::Error> {
        if req.width <= 0 || req.height <= 0 {
            return Ok(());
        }
        let rect = Rect::new_sized_saturating(req.x, req.y, req.width, req.height);
        self.pending.borrow_mut().surface_damage.push(rect);
        Ok(())
    }

    fn frame(&self, req: Frame, _slf: &Rc<Self>) -> Result<(), Self::Error> {
        let cb = self.client.objects.create(req.callback, || {
            WlCallback::new(req.callback, &self.client, self.version)
        })?;
        self.pending.borrow_mut().frame_callbacks.push(cb);
        Ok(())
    }

    fn set_opaque_region(&self, req: SetOpaqueRegion, _slf: &Rc<Self>) -> Result<(), Self::Error> {
        let region = if req.region.is_some() {
            Some(self.client.lookup::<WlRegion>(req.region)?.region())
        } else {
            None
        };
        self.pending.borrow_mut().opaque_region = region;
        Ok(())
    }

    fn set_input_region(&self, req: SetInputRegion, _slf: &Rc<Self>) -> Result<(), Self::Error> {
        let region = if req.region.is_some() {
            Some(self.client.lookup::<WlRegion>(req.region)?.region())
        } else {
            None
        };
        self.pending.borrow_mut().input_region = region;
        Ok(())
    }

    fn commit(&self, _req: Commit, _slf: &Rc<Self>) -> Result<(), Self::Error> {
        let state = self.pending.borrow_mut().snapshot();
        self.states.borrow_mut().push_back(state);
        Ok(())
    }

    fn set_buffer_transform(
        &self,
        req: SetBufferTransform,
        _slf: &Rc<Self>,
    ) -> Result<(), Self::Error> {
        let Some(tf) = BufferTransform::from_wl(req.transform) else {
            return Err(WlSurfaceError::UnknownBufferTransform(req.transform));
        };
        let pending = &mut *self.pending.borrow_mut();
        pending.transform = tf;
        pending.update_logical_size();
        Ok(())
    }

    fn set_buffer_scale(&self, req: SetBufferScale, _slf: &Rc<Self>) -> Result<(), Self::Error> {
        if req.scale < 1 {
            return Err(WlSurfaceError::NonPositiveBufferScale(req.scale));
        }
        let pending = &mut *self.pending.borrow_mut();
        pending.scale = req.scale;
        pending.update_logical_size();
        Ok(())
    }

    fn damage_buffer(&self, req: DamageBuffer, _slf: &Rc<Self>) -> Result<(), Self::Error> {
        if req.width <= 0 || req.height <= 0 {
            return Ok(());
        }
        let rect = Rect::new_sized_saturating(req.x, req.y, req.width, req.height);
        self.pending.borrow_mut().buffer_damage.add(rect);
        Ok(())
    }

    fn offset(&self, req: Offset, _slf: &Rc<Self>) -> Result<(), Self::Error> {
        self.pending.borrow_mut().offset = (req.x, req.y);
        Ok(())
    }
}

object_base! {
    self = WlSurface;
    variant = WlSurface;
    interface = INTERFACE;
}

impl Object for WlSurface {
    fn break_loops(&self) {
        self.reset();
    }
}

dedicated_add_obj!(WlSurface, WlSurfaceId, surfaces, INTERFACE);

#[derive(Debug, Error)]
pub enum WlSurfaceError {
    #[error(transparent)]
    ClientError(Box<ClientError>),
    #[error("Buffer scale {0} is not positive")]
    NonPositiveBufferScale(i32),
    #[error("Unknown buffer transform {0}")]
    UnknownBufferTransform(i32),
    #[error("attach request must not contain offset")]
    OffsetInAttach,
}
efrom!(WlSurfaceError, ClientError);

impl RequestError for WlSurfaceError {
    fn class(&self) -> ErrorClass {
        match self {
            WlSurfaceError::ClientError(e) => e.class(),
            _ => ErrorClass::ProtocolViolation,
        }
    }

    fn code(&self) -> Option<u32> {
        match self {
            WlSurfaceError::ClientError(e) => e.code(),
            WlSurfaceError::NonPositiveBufferScale(_) => Some(INVALID_SCALE),
            WlSurfaceError::UnknownBufferTransform(_) => Some(INVALID_TRANSFORM),
            WlSurfaceError::OffsetInAttach => Some(INVALID_OFFSET),
        }
    }

    fn display_code(&self) -> u32 {
        match self {
            WlSurfaceError::ClientError(e) => e.display_code(),
            _ => self.class().display_code(),
        }
    }
}
