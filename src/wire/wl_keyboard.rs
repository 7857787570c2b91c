use {
    crate::{
        object::Interface,
        wire::{WlKeyboardId, WlSurfaceId},
    },
    std::rc::Rc,
    uapi::OwnedFd,
};

pub const INTERFACE: Interface = Interface("wl_keyboard");

pub const NO_KEYMAP: u32 = 0;
pub const XKB_V1: u32 = 1;

pub const RELEASED: u32 = 0;
pub const PRESSED: u32 = 1;

requests! {
    variant = WlKeyboard;
    handler = WlKeyboardRequestHandler;

    Release = release since 3 { }
}

events! {
    id = WlKeyboardId;

    Keymap = keymap {
        format: u32,
        fd: Rc<OwnedFd>,
        size: u32,
    }
    Enter = enter {
        serial: u32,
        surface: WlSurfaceId,
        keys: Vec<u32>,
    }
    Leave = leave {
        serial: u32,
        surface: WlSurfaceId,
    }
    Key = key {
        serial: u32,
        time: u32,
        key: u32,
        state: u32,
    }
    Modifiers = modifiers {
        serial: u32,
        mods_depressed: u32,
        mods_latched: u32,
        mods_locked: u32,
        group: u32,
    }
    RepeatInfo = repeat_info {
        rate: i32,
        delay: i32,
    }
}
