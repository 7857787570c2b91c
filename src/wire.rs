//! Typed requests and events of the core interfaces.
//!
//! Marshalling is done by the transport. It hands decoded `Request`s to
//! `Client::dispatch` and drains the client's `DynEvent` queue.

use {
    crate::object::{Interface, ObjectId},
    std::any::Any,
};

macro_rules! requests {
    (
        variant = $variant:ident;
        handler = $handler:ident;
        $(
            $name:ident = $method:ident $(since $since:literal)? {
                $($field:ident: $ty:ty),* $(,)?
            }
        )*
    ) => {
        $(
            pub struct $name {
                $(pub $field: $ty,)*
            }

            impl From<$name> for crate::wire::Request {
                fn from(v: $name) -> Self {
                    crate::wire::Request::$variant(Request::$name(v))
                }
            }
        )*

        pub enum Request {
            $($name($name),)*
        }

        impl Request {
            pub fn name(&self) -> &'static str {
                match self {
                    $(Self::$name(_) => stringify!($method),)*
                }
            }

            /// The first interface version containing this request.
            pub fn since(&self) -> u32 {
                match self {
                    $(Self::$name(_) => requests!(@since $($since)?),)*
                }
            }
        }

        pub trait $handler: Sized {
            type Error: crate::client::RequestError;

            $(
                fn $method(&self, req: $name, slf: &std::rc::Rc<Self>) -> Result<(), Self::Error>;
            )*

            fn handle_request_impl(self: std::rc::Rc<Self>, req: Request) -> Result<(), Self::Error> {
                match req {
                    $(Request::$name(req) => self.$method(req, &self),)*
                }
            }
        }
    };
    (@since) => {
        1
    };
    (@since $since:literal) => {
        $since
    };
}

macro_rules! events {
    (
        id = $id:ty;
        $(
            $name:ident = $ename:ident {
                $($field:ident: $ty:ty),* $(,)?
            }
        )*
    ) => {
        $(
            pub struct $name {
                pub self_id: $id,
                $(pub $field: $ty,)*
            }

            impl crate::wire::Event for $name {
                fn id(&self) -> crate::object::ObjectId {
                    self.self_id.into()
                }

                fn interface(&self) -> crate::object::Interface {
                    INTERFACE
                }

                fn name(&self) -> &'static str {
                    stringify!($ename)
                }

                fn as_any(&self) -> &dyn std::any::Any {
                    self
                }
            }
        )*
    };
}

pub mod wl_buffer;
pub mod wl_callback;
pub mod wl_compositor;
pub mod wl_display;
pub mod wl_keyboard;
pub mod wl_region;
pub mod wl_seat;
pub mod wl_shm;
pub mod wl_shm_pool;
pub mod wl_surface;

id!(WlBufferId);
id!(WlCallbackId);
id!(WlCompositorId);
id!(WlDisplayId);
id!(WlKeyboardId);
id!(WlPointerId);
id!(WlRegionId);
id!(WlSeatId);
id!(WlShmId);
id!(WlShmPoolId);
id!(WlSurfaceId);
id!(WlTouchId);

/// An event addressed to one of the client's objects.
pub trait Event: 'static {
    fn id(&self) -> ObjectId;
    fn interface(&self) -> Interface;
    fn name(&self) -> &'static str;
    fn as_any(&self) -> &dyn Any;
}

pub type DynEvent = Box<dyn Event>;

macro_rules! request_enum {
    ($($variant:ident => $module:ident,)*) => {
        pub enum Request {
            $($variant($module::Request),)*
        }

        impl Request {
            pub fn interface(&self) -> Interface {
                match self {
                    $(Self::$variant(_) => $module::INTERFACE,)*
                }
            }

            pub fn name(&self) -> &'static str {
                match self {
                    $(Self::$variant(r) => r.name(),)*
                }
            }
        }
    };
}

request_enum! {
    WlBuffer => wl_buffer,
    WlCompositor => wl_compositor,
    WlKeyboard => wl_keyboard,
    WlRegion => wl_region,
    WlSeat => wl_seat,
    WlShm => wl_shm,
    WlShmPool => wl_shm_pool,
    WlSurface => wl_surface,
}
