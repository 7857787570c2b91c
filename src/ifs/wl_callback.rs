use {
    crate::{
        client::{Client, ClientError},
        object::{Object, Version},
        utils::errorfmt::ErrorFmt,
        wire::{WlCallbackId, wl_callback::*},
    },
    std::{cell::Cell, rc::Rc},
};

pub struct WlCallback {
    pub id: WlCallbackId,
    client: Rc<Client>,
    done: Cell<bool>,
    version: Version,
}

impl WlCallback {
    pub fn new(id: WlCallbackId, client: &Rc<Client>, version: Version) -> Self {
        Self {
            id,
            client: client.clone(),
            done: Cell::new(false),
            version,
        }
    }

    /// Sends `done` and releases the callback. Subsequent calls and calls after the
    /// client is gone do nothing.
    pub fn send_done(&self, callback_data: u32) -> Result<(), ClientError> {
        if self.done.replace(true) || self.client.is_killed() {
            return Ok(());
        }
        self.client.event(Done {
            self_id: self.id,
            callback_data,
        });
        self.client.remove_obj(self)
    }

    /// Releases the callback without sending `done`.
    pub fn cancel(&self) {
        if self.done.replace(true) {
            return;
        }
        if let Err(e) = self.client.remove_obj(self) {
            log::debug!("Could not release frame callback {}: {}", self.id, ErrorFmt(e));
        }
    }

    pub fn is_done(&self) -> bool {
        self.done.get()
    }
}

object_base! {
    self = WlCallback;
    interface = INTERFACE;
}

impl Object for WlCallback {}

dedicated_add_obj!(WlCallback, WlCallbackId, callbacks, INTERFACE);
