use crate::{object::Interface, wire::WlBufferId};

pub const INTERFACE: Interface = Interface("wl_buffer");

requests! {
    variant = WlBuffer;
    handler = WlBufferRequestHandler;

    Destroy = destroy { }
}

events! {
    id = WlBufferId;

    Release = release { }
}
