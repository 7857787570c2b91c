use {
    crate::{client::ClientError, wire::Request},
    std::{
        cmp::Ordering,
        fmt::{Display, Formatter},
        rc::Rc,
    },
};

pub const WL_DISPLAY_ID: ObjectId = ObjectId::from_raw(1);

#[derive(Debug, Copy, Clone, Hash, Ord, PartialOrd, Eq, PartialEq)]
pub struct ObjectId(u32);

impl ObjectId {
    pub const NONE: Self = ObjectId(0);

    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u32 {
        self.0
    }
}

impl Display for ObjectId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

/// The version a client bound an object with.
#[derive(Debug, Copy, Clone, Hash, Ord, PartialOrd, Eq, PartialEq)]
pub struct Version(pub u32);

impl Version {
    pub const ALL: Version = Version(u32::MAX);
}

impl PartialEq<u32> for Version {
    fn eq(&self, other: &u32) -> bool {
        self.0 == *other
    }
}

impl PartialOrd<u32> for Version {
    fn partial_cmp(&self, other: &u32) -> Option<Ordering> {
        self.0.partial_cmp(other)
    }
}

impl Display for Version {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Interface(pub &'static str);

impl Interface {
    pub fn name(self) -> &'static str {
        self.0
    }
}

impl Display for Interface {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0)
    }
}

pub trait ObjectBase {
    fn id(&self) -> ObjectId;
    fn interface(&self) -> Interface;
    fn version(&self) -> Version;
    fn handle_request(self: Rc<Self>, request: Request) -> Result<(), ClientError>;
}

pub trait Object: ObjectBase + 'static {
    /// Drops references that could keep this object or its client alive in a cycle.
    fn break_loops(&self) {}
}
