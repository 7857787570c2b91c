pub mod wl_keyboard;

use {
    crate::{
        client::{Client, ClientError, ErrorClass, RequestError},
        ifs::wl_seat::wl_keyboard::WlKeyboard,
        object::{Object, Version},
        utils::copyhashmap::CopyHashMap,
        wire::{WlKeyboardId, WlSeatId, WlSurfaceId, wl_seat::*},
    },
    std::rc::Rc,
    thiserror::Error,
};

pub const WL_SEAT_VERSION: u32 = 7;

const NAME_SINCE: u32 = 2;

pub struct WlSeat {
    pub id: WlSeatId,
    pub client: Rc<Client>,
    keyboards: CopyHashMap<WlKeyboardId, Rc<WlKeyboard>>,
    pub version: Version,
}

impl WlSeat {
    /// Binds the global and announces the capabilities and the seat name.
    pub fn bind(client: &Rc<Client>, id: WlSeatId, version: u32) -> Result<Rc<Self>, ClientError> {
        let version = Version(version.clamp(1, WL_SEAT_VERSION));
        let mut created = false;
        let obj = client.objects.create(id, || {
            created = true;
            WlSeat {
                id,
                client: client.clone(),
                keyboards: Default::default(),
                version,
            }
        })?;
        if created {
            client.event(Capabilities {
                self_id: id,
                capabilities: KEYBOARD,
            });
            if version >= NAME_SINCE {
                client.event(Name {
                    self_id: id,
                    name: client.state.config.seat.name().to_string(),
                });
            }
        }
        Ok(obj)
    }

    pub fn keyboards(&self) -> Vec<Rc<WlKeyboard>> {
        self.keyboards.lock().values().cloned().collect()
    }

    pub fn keyboard_focus_enter(&self, surface: WlSurfaceId, keys: &[u32]) {
        let serial = self.client.next_serial();
        for kb in self.keyboards() {
            kb.send_enter(serial, surface, keys);
        }
    }

    pub fn keyboard_focus_leave(&self, surface: WlSurfaceId) {
        let serial = self.client.next_serial();
        for kb in self.keyboards() {
            kb.send_leave(serial, surface);
        }
    }

    pub fn key_event(&self, time: u32, key: u32, state: u32) {
        let serial = self.client.next_serial();
        for kb in self.keyboards() {
            kb.send_key(serial, time, key, state);
        }
    }

    pub fn modifiers(&self, depressed: u32, latched: u32, locked: u32, group: u32) {
        let serial = self.client.next_serial();
        for kb in self.keyboards() {
            kb.send_modifiers(serial, depressed, latched, locked, group);
        }
    }

    pub(super) fn remove_keyboard(&self, id: WlKeyboardId) {
        self.keyboards.remove(&id);
    }
}

impl WlSeatRequestHandler for WlSeat {
    type Error = WlSeatError;

    fn get_pointer(&self, _req: GetPointer, _slf: &Rc<Self>) -> Result<(), Self::Error> {
        Err(WlSeatError::MissingCapability("pointer"))
    }

    fn get_keyboard(&self, req: GetKeyboard, slf: &Rc<Self>) -> Result<(), Self::Error> {
        let mut created = false;
        let kb = self.client.objects.create(req.id, || {
            created = true;
            WlKeyboard::new(req.id, slf)
        })?;
        if created {
            self.keyboards.set(req.id, kb.clone());
            kb.send_initial_state();
        }
        Ok(())
    }

    fn get_touch(&self, _req: GetTouch, _slf: &Rc<Self>) -> Result<(), Self::Error> {
        Err(WlSeatError::MissingCapability("touch"))
    }

    fn release(&self, _req: Release, _slf: &Rc<Self>) -> Result<(), Self::Error> {
        self.client.remove_obj(self)?;
        Ok(())
    }
}

object_base! {
    self = WlSeat;
    variant = WlSeat;
    interface = INTERFACE;
}

impl Object for WlSeat {
    fn break_loops(&self) {
        self.keyboards.clear();
    }
}

dedicated_add_obj!(WlSeat, WlSeatId, seats, INTERFACE);

#[derive(Debug, Error)]
pub enum WlSeatError {
    #[error(transparent)]
    ClientError(Box<ClientError>),
    #[error("The seat has no {0} capability")]
    MissingCapability(&'static str),
}
efrom!(WlSeatError, ClientError);

impl RequestError for WlSeatError {
    fn class(&self) -> ErrorClass {
        match self {
            WlSeatError::ClientError(e) => e.class(),
            WlSeatError::MissingCapability(_) => ErrorClass::ProtocolViolation,
        }
    }

    fn code(&self) -> Option<u32> {
        match self {
            WlSeatError::ClientError(e) => e.code(),
            WlSeatError::MissingCapability(_) => Some(MISSING_CAPABILITY),
        }
    }

    fn display_code(&self) -> u32 {
        match self {
            WlSeatError::ClientError(e) => e.display_code(),
            _ => self.class().display_code(),
        }
    }
}
