use {
    crate::{
        client::ClientId,
        config::CoreConfig,
        ifs::wl_seat::wl_keyboard::{KeymapError, KeymapFd},
        utils::numcell::NumCell,
    },
    std::{cell::Cell, rc::Rc},
    thiserror::Error,
};

#[derive(Debug, Error)]
pub enum StateError {
    #[error("Could not create the keymap")]
    Keymap(#[source] KeymapError),
}

/// Server-wide state shared by all clients.
pub struct State {
    pub config: CoreConfig,
    pub keymap: Rc<KeymapFd>,
    next_client_id: NumCell<u64>,
    serial: Cell<u32>,
}

impl State {
    pub fn new(config: CoreConfig) -> Result<Rc<Self>, StateError> {
        let keymap = KeymapFd::new(config.seat.keymap.as_deref()).map_err(StateError::Keymap)?;
        Ok(Rc::new(Self {
            config,
            keymap: Rc::new(keymap),
            next_client_id: NumCell::new(1),
            serial: Cell::new(1),
        }))
    }

    pub fn next_client_id(&self) -> ClientId {
        ClientId::from_raw(self.next_client_id.fetch_add(1))
    }

    pub fn next_serial(&self) -> u32 {
        let serial = self.serial.get();
        self.serial.set(serial.wrapping_add(1).max(1));
        serial
    }
}
