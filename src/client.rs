use {
    crate::{
        object::{ObjectBase, ObjectId, WL_DISPLAY_ID},
        state::State,
        utils::{errorfmt::ErrorFmt, syncqueue::SyncQueue},
        wire::{DynEvent, Event, Request, wl_display},
    },
    std::{
        cell::Cell,
        fmt::{Display, Formatter},
        rc::Rc,
    },
};
pub use {
    error::{ClientError, ErrorClass, LookupError, ObjectError, RequestError},
    objects::{Implementation, Objects},
};

mod error;
pub mod objects;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct ClientId(u64);

impl ClientId {
    pub fn from_raw(id: u64) -> Self {
        Self(id)
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

impl Display for ClientId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

/// One client connection as seen by the protocol core.
pub struct Client {
    pub id: ClientId,
    pub state: Rc<State>,
    pub objects: Objects,
    events: SyncQueue<DynEvent>,
    killed: Cell<bool>,
}

impl Client {
    pub fn new(state: &Rc<State>) -> Rc<Self> {
        let id = state.next_client_id();
        log::debug!("Client {} connected", id);
        Rc::new(Self {
            id,
            state: state.clone(),
            objects: Objects::new(),
            events: Default::default(),
            killed: Cell::new(false),
        })
    }

    /// Runs one request. On error, `wl_display.error` is queued and the client is marked
    /// as killed. The transport should flush the events and disconnect.
    pub fn dispatch(
        self: &Rc<Self>,
        id: impl Into<ObjectId>,
        request: impl Into<Request>,
    ) -> Result<(), ClientError> {
        if self.killed.get() {
            return Err(ClientError::Killed(self.id));
        }
        let id = id.into();
        let request = request.into();
        log::trace!(
            "Client {} -> {}@{}.{}",
            self.id,
            request.interface(),
            id,
            request.name()
        );
        let res = self
            .objects
            .get_obj(id)
            .and_then(|obj| obj.handle_request(request));
        if let Err(e) = &res {
            self.post_error(id, e);
        }
        res
    }

    fn post_error(&self, id: ObjectId, e: &ClientError) {
        let class = e.class();
        let (object_id, code) = match e.code() {
            Some(code) => (id, code),
            _ => (WL_DISPLAY_ID, e.display_code()),
        };
        let message = ErrorFmt(e).to_string();
        if class.is_fatal() {
            log::error!("Client {}: A fatal error occurred: {}", self.id, message);
        } else {
            log::warn!("Client {}: {}", self.id, message);
        }
        self.event(wl_display::Error {
            self_id: WL_DISPLAY_ID.into(),
            object_id,
            code,
            message,
        });
        self.killed.set(true);
    }

    pub fn is_killed(&self) -> bool {
        self.killed.get()
    }

    pub fn event<T: Event>(&self, event: T) {
        log::trace!(
            "Client {} <= {}@{}.{}",
            self.id,
            event.interface(),
            event.id(),
            event.name()
        );
        self.events.push(Box::new(event));
    }

    pub fn pop_event(&self) -> Option<DynEvent> {
        self.events.pop()
    }

    pub fn take_events(&self) -> Vec<DynEvent> {
        self.events.take().into()
    }

    pub fn next_serial(&self) -> u32 {
        self.state.next_serial()
    }

    pub fn lookup<T: Implementation>(&self, id: T::Id) -> Result<Rc<T>, ClientError> {
        self.objects.get(id)
    }

    /// Releases the binding of `obj` and tells the client that its id can be reused.
    pub fn remove_obj<T: Implementation>(&self, obj: &T) -> Result<(), ClientError> {
        let id = obj.id();
        self.objects.remove::<T>(T::Id::from(id))?;
        self.event(wl_display::DeleteId {
            self_id: WL_DISPLAY_ID.into(),
            id: id.raw(),
        });
        Ok(())
    }

    /// Tears down all objects of the client.
    pub fn destroy(&self) {
        log::debug!("Client {} destroyed", self.id);
        self.killed.set(true);
        self.objects.destroy();
        drop(self.events.take());
    }
}
