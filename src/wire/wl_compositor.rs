use crate::{
    object::Interface,
    wire::{WlRegionId, WlSurfaceId},
};

pub const INTERFACE: Interface = Interface("wl_compositor");

requests! {
    variant = WlCompositor;
    handler = WlCompositorRequestHandler;

    CreateSurface = create_surface {
        id: WlSurfaceId,
    }
    CreateRegion = create_region {
        id: WlRegionId,
    }
}
