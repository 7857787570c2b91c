use crate::{object::Interface, wire::WlBufferId};

pub const INTERFACE: Interface = Interface("wl_shm_pool");

requests! {
    variant = WlShmPool;
    handler = WlShmPoolRequestHandler;

    CreateBuffer = create_buffer {
        id: WlBufferId,
        offset: i32,
        width: i32,
        height: i32,
        stride: i32,
        format: u32,
    }
    Destroy = destroy { }
    Resize = resize {
        size: i32,
    }
}
