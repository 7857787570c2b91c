use {
    crate::{
        client::ClientId,
        object::{Interface, ObjectId},
        wire::wl_display::{IMPLEMENTATION, INVALID_METHOD, INVALID_OBJECT, NO_MEMORY},
    },
    std::error::Error,
    thiserror::Error,
};

/// How severe a failed request is.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ErrorClass {
    /// The client broke a protocol rule. Only the client is affected.
    ProtocolViolation,
    /// A resource the client supplied cannot be used, e.g. an fd that cannot be mapped.
    ClientResource,
    /// The system ran out of a resource.
    SystemResource,
    /// A bug in the server.
    InternalInvariant,
}

impl ErrorClass {
    /// Whether the error must be escalated beyond the client that caused it.
    pub fn is_fatal(self) -> bool {
        matches!(self, Self::SystemResource | Self::InternalInvariant)
    }

    pub fn display_code(self) -> u32 {
        match self {
            Self::SystemResource => NO_MEMORY,
            _ => IMPLEMENTATION,
        }
    }
}

/// The error type of a request handler.
pub trait RequestError: Error + 'static {
    fn class(&self) -> ErrorClass;

    /// The interface specific error code. With `None`, the error is posted on `wl_display`.
    fn code(&self) -> Option<u32> {
        None
    }

    /// The `wl_display` error code used if `code` returns `None`.
    fn display_code(&self) -> u32 {
        self.class().display_code()
    }
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Client tried to invoke a non-existent method {}.{}", .interface.name(), .method)]
    InvalidMethod {
        interface: Interface,
        method: &'static str,
    },
    #[error("Client tried to access non-existent object {0}")]
    InvalidObject(ObjectId),
    #[error("The client object id {0} is out of bounds")]
    ClientIdOutOfBounds(ObjectId),
    #[error("The id {id} is already in use by a `{}`", .interface.name())]
    IdAlreadyInUse { id: ObjectId, interface: Interface },
    #[error("Object {0} was constructed with the id {1}")]
    IdMismatch(ObjectId, ObjectId),
    #[error("The object id {0} is unknown")]
    UnknownId(ObjectId),
    #[error("Client {0} has already been killed")]
    Killed(ClientId),
    #[error(transparent)]
    NotBound(LookupError),
    #[error(transparent)]
    ObjectError(ObjectError),
}

impl ClientError {
    pub fn is_fatal(&self) -> bool {
        self.class().is_fatal()
    }
}

impl RequestError for ClientError {
    fn class(&self) -> ErrorClass {
        match self {
            ClientError::IdMismatch(..) | ClientError::UnknownId(_) => {
                ErrorClass::InternalInvariant
            }
            ClientError::ObjectError(e) => e.class,
            _ => ErrorClass::ProtocolViolation,
        }
    }

    fn code(&self) -> Option<u32> {
        match self {
            ClientError::ObjectError(e) => e.code,
            _ => None,
        }
    }

    fn display_code(&self) -> u32 {
        match self {
            ClientError::InvalidMethod { .. } => INVALID_METHOD,
            ClientError::InvalidObject(_)
            | ClientError::ClientIdOutOfBounds(_)
            | ClientError::IdAlreadyInUse { .. }
            | ClientError::NotBound(_) => INVALID_OBJECT,
            ClientError::ObjectError(e) => e.display_code,
            _ => self.class().display_code(),
        }
    }
}

impl From<ObjectError> for ClientError {
    fn from(e: ObjectError) -> Self {
        Self::ObjectError(e)
    }
}

/// A request handler failed.
#[derive(Debug, Error)]
#[error("An error occurred in a `{}`", .interface.name())]
pub struct ObjectError {
    pub interface: Interface,
    pub class: ErrorClass,
    pub code: Option<u32>,
    pub display_code: u32,
    #[source]
    pub error: Box<dyn Error + 'static>,
}

impl ObjectError {
    pub fn new<E: RequestError>(interface: Interface, error: E) -> Self {
        Self {
            interface,
            class: error.class(),
            code: error.code(),
            display_code: error.display_code(),
            error: Box::new(error),
        }
    }
}

#[derive(Debug, Error)]
#[error("There is no `{}` with id {}", .interface.name(), .id)]
pub struct LookupError {
    pub interface: Interface,
    pub id: ObjectId,
}
