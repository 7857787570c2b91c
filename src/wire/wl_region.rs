use crate::object::Interface;

pub const INTERFACE: Interface = Interface("wl_region");

requests! {
    variant = WlRegion;
    handler = WlRegionRequestHandler;

    Destroy = destroy { }
    Add = add {
        x: i32,
        y: i32,
        width: i32,
        height: i32,
    }
    Subtract = subtract {
        x: i32,
        y: i32,
        width: i32,
        height: i32,
    }
}
