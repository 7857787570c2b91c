use crate::{object::Interface, wire::WlCallbackId};

pub const INTERFACE: Interface = Interface("wl_callback");

events! {
    id = WlCallbackId;

    Done = done {
        callback_data: u32,
    }
}
