macro_rules! efrom {
    ($ename:ty, $vname:ident) => {
        efrom!($ename, $vname, $vname);
    };
    ($ename:ty, $vname:ident, $sname:ty) => {
        impl From<$sname> for $ename {
            fn from(e: $sname) -> Self {
                Self::$vname(Box::new(e))
            }
        }
    };
}

macro_rules! id {
    ($name:ident) => {
        #[derive(Debug, Copy, Clone, Hash, Ord, PartialOrd, Eq, PartialEq)]
        pub struct $name(u32);

        #[allow(dead_code)]
        impl $name {
            pub const NONE: Self = $name(0);

            pub const fn from_raw(raw: u32) -> Self {
                Self(raw)
            }

            pub fn raw(self) -> u32 {
                self.0
            }

            pub fn is_some(self) -> bool {
                self.0 != 0
            }

            pub fn is_none(self) -> bool {
                self.0 == 0
            }
        }

        impl From<crate::object::ObjectId> for $name {
            fn from(f: crate::object::ObjectId) -> Self {
                Self(f.raw())
            }
        }

        impl From<$name> for crate::object::ObjectId {
            fn from(f: $name) -> Self {
                crate::object::ObjectId::from_raw(f.0)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                std::fmt::Display::fmt(&self.0, f)
            }
        }
    };
}

/// Implements `ObjectBase` by routing the interface's requests to its request handler.
macro_rules! object_base {
    (self = $oname:ty; variant = $variant:ident; interface = $iface:expr;) => {
        impl crate::object::ObjectBase for $oname {
            fn id(&self) -> crate::object::ObjectId {
                self.id.into()
            }

            fn interface(&self) -> crate::object::Interface {
                $iface
            }

            fn version(&self) -> crate::object::Version {
                self.version
            }

            fn handle_request(
                self: std::rc::Rc<Self>,
                request: crate::wire::Request,
            ) -> Result<(), crate::client::ClientError> {
                let method = request.name();
                let crate::wire::Request::$variant(request) = request else {
                    return Err(crate::client::ClientError::InvalidMethod {
                        interface: $iface,
                        method,
                    });
                };
                if self.version < request.since() {
                    return Err(crate::client::ClientError::InvalidMethod {
                        interface: $iface,
                        method,
                    });
                }
                if let Err(e) = self.handle_request_impl(request) {
                    return Err(crate::client::ObjectError::new($iface, e).into());
                }
                Ok(())
            }
        }
    };
    (self = $oname:ty; interface = $iface:expr;) => {
        impl crate::object::ObjectBase for $oname {
            fn id(&self) -> crate::object::ObjectId {
                self.id.into()
            }

            fn interface(&self) -> crate::object::Interface {
                $iface
            }

            fn version(&self) -> crate::object::Version {
                self.version
            }

            fn handle_request(
                self: std::rc::Rc<Self>,
                request: crate::wire::Request,
            ) -> Result<(), crate::client::ClientError> {
                Err(crate::client::ClientError::InvalidMethod {
                    interface: $iface,
                    method: request.name(),
                })
            }
        }
    };
}

/// Binds an implementation type to its typed slot in `Objects`.
macro_rules! dedicated_add_obj {
    ($oname:ty, $idname:ty, $field:ident, $iface:expr) => {
        impl crate::client::objects::Implementation for $oname {
            type Id = $idname;

            const INTERFACE: crate::object::Interface = $iface;

            fn slot(
                objects: &crate::client::objects::Objects,
            ) -> &crate::utils::copyhashmap::CopyHashMap<$idname, std::rc::Rc<Self>> {
                &objects.$field
            }
        }
    };
}
