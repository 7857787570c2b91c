use {
    crate::{
        object::Interface,
        wire::{WlShmId, WlShmPoolId},
    },
    std::rc::Rc,
    uapi::OwnedFd,
};

pub const INTERFACE: Interface = Interface("wl_shm");

pub const INVALID_FORMAT: u32 = 0;
pub const INVALID_STRIDE: u32 = 1;
pub const INVALID_FD: u32 = 2;

requests! {
    variant = WlShm;
    handler = WlShmRequestHandler;

    CreatePool = create_pool {
        id: WlShmPoolId,
        fd: Rc<OwnedFd>,
        size: i32,
    }
    Release = release since 2 { }
}

events! {
    id = WlShmId;

    Format = format {
        format: u32,
    }
}
