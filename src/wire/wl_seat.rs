use crate::{
    object::Interface,
    wire::{WlKeyboardId, WlPointerId, WlSeatId, WlTouchId},
};

pub const INTERFACE: Interface = Interface("wl_seat");

pub const MISSING_CAPABILITY: u32 = 0;

pub const POINTER: u32 = 1;
pub const KEYBOARD: u32 = 2;
pub const TOUCH: u32 = 4;

requests! {
    variant = WlSeat;
    handler = WlSeatRequestHandler;

    GetPointer = get_pointer {
        id: WlPointerId,
    }
    GetKeyboard = get_keyboard {
        id: WlKeyboardId,
    }
    GetTouch = get_touch {
        id: WlTouchId,
    }
    Release = release since 5 { }
}

events! {
    id = WlSeatId;

    Capabilities = capabilities {
        capabilities: u32,
    }
    Name = name {
        name: String,
    }
}
