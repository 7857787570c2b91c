use {
    crate::{
        client::{ClientError, ErrorClass, RequestError},
        ifs::wl_seat::WlSeat,
        object::{Object, Version},
        utils::oserror::OsError,
        wire::{WlKeyboardId, WlSurfaceId, wl_keyboard::*},
    },
    std::{io::Write, rc::Rc},
    thiserror::Error,
    uapi::{OwnedFd, c},
};

pub const REPEAT_INFO_SINCE: u32 = 4;

#[derive(Debug, Error)]
pub enum KeymapError {
    #[error("Could not create a keymap memfd")]
    Memfd(#[source] OsError),
    #[error("Could not write the keymap")]
    Write(#[source] OsError),
    #[error("Could not seal the keymap memfd")]
    Seal(#[source] OsError),
    #[error("The keymap is too large")]
    TooLarge,
}

/// A read-only memfd holding the keymap that is sent to every keyboard.
pub struct KeymapFd {
    pub format: u32,
    pub fd: Rc<OwnedFd>,
    pub size: u32,
}

impl KeymapFd {
    /// Without a keymap, an empty memfd is advertised with the `no_keymap` format.
    pub fn new(keymap: Option<&str>) -> Result<Self, KeymapError> {
        let mut fd = uapi::memfd_create("keymap", c::MFD_CLOEXEC | c::MFD_ALLOW_SEALING)
            .map_err(|e| KeymapError::Memfd(e.into()))?;
        let (format, size) = match keymap {
            Some(text) => {
                let size = u32::try_from(text.len() + 1).map_err(|_| KeymapError::TooLarge)?;
                fd.write_all(text.as_bytes())
                    .and_then(|_| fd.write_all(&[0]))
                    .map_err(|e| KeymapError::Write(e.into()))?;
                uapi::lseek(fd.raw(), 0, c::SEEK_SET).map_err(|e| KeymapError::Write(e.into()))?;
                (XKB_V1, size)
            }
            None => (NO_KEYMAP, 0),
        };
        let seals = c::F_SEAL_SEAL | c::F_SEAL_SHRINK | c::F_SEAL_GROW | c::F_SEAL_WRITE;
        uapi::fcntl_add_seals(fd.raw(), seals).map_err(|e| KeymapError::Seal(e.into()))?;
        Ok(Self {
            format,
            fd: Rc::new(fd),
            size,
        })
    }
}

pub struct WlKeyboard {
    pub id: WlKeyboardId,
    seat: Rc<WlSeat>,
    version: Version,
}

impl WlKeyboard {
    pub fn new(id: WlKeyboardId, seat: &Rc<WlSeat>) -> Self {
        Self {
            id,
            seat: seat.clone(),
            version: seat.version,
        }
    }

    /// Sends the keymap and, if supported, the repeat parameters.
    pub(super) fn send_initial_state(&self) {
        let client = &self.seat.client;
        let keymap = &client.state.keymap;
        client.event(Keymap {
            self_id: self.id,
            format: keymap.format,
            fd: keymap.fd.clone(),
            size: keymap.size,
        });
        if self.version >= REPEAT_INFO_SINCE {
            let seat = &client.state.config.seat;
            client.event(RepeatInfo {
                self_id: self.id,
                rate: seat.repeat_rate(),
                delay: seat.repeat_delay(),
            });
        }
    }

    pub fn send_enter(&self, serial: u32, surface: WlSurfaceId, keys: &[u32]) {
        self.seat.client.event(Enter {
            self_id: self.id,
            serial,
            surface,
            keys: keys.to_vec(),
        });
    }

    pub fn send_leave(&self, serial: u32, surface: WlSurfaceId) {
        self.seat.client.event(Leave {
            self_id: self.id,
            serial,
            surface,
        });
    }

    pub fn send_key(&self, serial: u32, time: u32, key: u32, state: u32) {
        self.seat.client.event(Key {
            self_id: self.id,
            serial,
            time,
            key,
            state,
        });
    }

    pub fn send_modifiers(
        &self,
        serial: u32,
        mods_depressed: u32,
        mods_latched: u32,
        mods_locked: u32,
        group: u32,
    ) {
        self.seat.client.event(Modifiers {
            self_id: self.id,
            serial,
            mods_depressed,
            mods_latched,
            mods_locked,
            group,
        });
    }
}

impl WlKeyboardRequestHandler for WlKeyboard {
    type Error = WlKeyboardError;

    fn release(&self, _req: Release, _slf: &Rc<Self>) -> Result<(), Self::Error> {
        self.seat.remove_keyboard(self.id);
        self.seat.client.remove_obj(self)?;
        Ok(())
    }
}

object_base! {
    self = WlKeyboard;
    variant = WlKeyboard;
    interface = INTERFACE;
}

impl Object for WlKeyboard {}

dedicated_add_obj!(WlKeyboard, WlKeyboardId, keyboards, INTERFACE);

#[derive(Debug, Error)]
pub enum WlKeyboardError {
    #[error(transparent)]
    ClientError(Box<ClientError>),
}
efrom!(WlKeyboardError, ClientError);

impl RequestError for WlKeyboardError {
    fn class(&self) -> ErrorClass {
        match self {
            WlKeyboardError::ClientError(e) => e.class(),
        }
    }

    fn code(&self) -> Option<u32> {
        match self {
            WlKeyboardError::ClientError(e) => e.code(),
        }
    }

    fn display_code(&self) -> u32 {
        match self {
            WlKeyboardError::ClientError(e) => e.display_code(),
        }
    }
}
