use crate::{
    object::{Interface, ObjectId},
    wire::WlDisplayId,
};

pub const INTERFACE: Interface = Interface("wl_display");

pub const INVALID_OBJECT: u32 = 0;
pub const INVALID_METHOD: u32 = 1;
pub const NO_MEMORY: u32 = 2;
pub const IMPLEMENTATION: u32 = 3;

events! {
    id = WlDisplayId;

    Error = error {
        object_id: ObjectId,
        code: u32,
        message: String,
    }
    DeleteId = delete_id {
        id: u32,
    }
}
