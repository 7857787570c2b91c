use crate::{
    object::Interface,
    wire::{WlBufferId, WlCallbackId, WlRegionId},
};

pub const INTERFACE: Interface = Interface("wl_surface");

pub const INVALID_SCALE: u32 = 0;
pub const INVALID_TRANSFORM: u32 = 1;
pub const INVALID_SIZE: u32 = 2;
pub const INVALID_OFFSET: u32 = 3;

requests! {
    variant = WlSurface;
    handler = WlSurfaceRequestHandler;

    Destroy = destroy { }
    Attach = attach {
        buffer: WlBufferId,
        x: i32,
        y: i32,
    }
    Damage = damage {
        x: i32,
        y: i32,
        width: i32,
        height: i32,
    }
    Frame = frame {
        callback: WlCallbackId,
    }
    SetOpaqueRegion = set_opaque_region {
        region: WlRegionId,
    }
    SetInputRegion = set_input_region {
        region: WlRegionId,
    }
    Commit = commit { }
    SetBufferTransform = set_buffer_transform since 2 {
        transform: i32,
    }
    SetBufferScale = set_buffer_scale since 3 {
        scale: i32,
    }
    DamageBuffer = damage_buffer since 4 {
        x: i32,
        y: i32,
        width: i32,
        height: i32,
    }
    Offset = offset since 5 {
        x: i32,
        y: i32,
    }
}
