use derive_more::Display;
use quarry_core::{
    config::ConfigError,
    error::{ErrorClass, ErrorOrigin as CoreErrorOrigin},
    executor::ExecuteError,
    session::SessionError,
};
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

///
/// Error
/// Public error type with a stable kind + origin taxonomy.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize, ThisError)]
#[error("{message}")]
pub struct Error {
    pub kind: ErrorKind,
    pub origin: ErrorOrigin,
    pub message: String,
}

impl Error {
    pub fn new(kind: ErrorKind, origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self {
            kind,
            origin,
            message: message.into(),
        }
    }

    fn classified(class: ErrorClass, origin: CoreErrorOrigin, message: String) -> Self {
        Self::new(ErrorKind::from_classification(class, origin), origin.into(), message)
    }
}

impl From<ExecuteError> for Error {
    fn from(err: ExecuteError) -> Self {
        Self::classified(err.class(), err.origin(), err.to_string())
    }
}

impl From<SessionError> for Error {
    fn from(err: SessionError) -> Self {
        Self::classified(err.class(), err.origin(), err.to_string())
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Self::classified(err.class(), err.origin(), err.to_string())
    }
}

///
/// ErrorKind
/// Public error taxonomy for callers.
///

#[remain::sorted]
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum ErrorKind {
    /// Configuration is missing or malformed.
    Config,

    /// The caller cannot remediate this.
    Internal,

    Query(QueryErrorKind),
    Store(StoreErrorKind),
}

impl ErrorKind {
    fn from_classification(class: ErrorClass, origin: CoreErrorOrigin) -> Self {
        match origin {
            CoreErrorOrigin::Config => Self::Config,
            CoreErrorOrigin::Store => Self::Store(StoreErrorKind::from_class(class)),
            CoreErrorOrigin::Resolver
            | CoreErrorOrigin::Translator
            | CoreErrorOrigin::Executor
            | CoreErrorOrigin::Session => match class {
                ErrorClass::Internal => Self::Internal,
                _ => Self::Query(QueryErrorKind::from_class(class)),
            },
        }
    }
}

///
/// QueryErrorKind
///

#[remain::sorted]
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum QueryErrorKind {
    /// No entity type answers to the logical name.
    EntityNotFound,

    /// Query shape is invalid (unknown fields, empty composites).
    Invalid,

    /// The operation is explicitly outside the current contract.
    NotImplemented,

    /// The owning session was released.
    SessionClosed,

    /// A literal's runtime kind is incompatible with the target field.
    TypeMismatch,

    /// The condition kind has no translation.
    Unsupported,
}

impl QueryErrorKind {
    const fn from_class(class: ErrorClass) -> Self {
        match class {
            ErrorClass::NotFound => Self::EntityNotFound,
            ErrorClass::NotImplemented => Self::NotImplemented,
            ErrorClass::Closed => Self::SessionClosed,
            ErrorClass::TypeMismatch => Self::TypeMismatch,
            ErrorClass::Unsupported => Self::Unsupported,
            ErrorClass::Conflict | ErrorClass::Invalid | ErrorClass::Internal => Self::Invalid,
        }
    }
}

///
/// StoreErrorKind
///

#[remain::sorted]
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum StoreErrorKind {
    Closed,
    Conflict,
    Invalid,
    NotFound,
    TypeMismatch,
}

impl StoreErrorKind {
    const fn from_class(class: ErrorClass) -> Self {
        match class {
            ErrorClass::Closed => Self::Closed,
            ErrorClass::Conflict => Self::Conflict,
            ErrorClass::NotFound => Self::NotFound,
            ErrorClass::TypeMismatch => Self::TypeMismatch,
            ErrorClass::Unsupported
            | ErrorClass::NotImplemented
            | ErrorClass::Invalid
            | ErrorClass::Internal => Self::Invalid,
        }
    }
}

///
/// ErrorOrigin
/// Public origin taxonomy for callers.
///

#[remain::sorted]
#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, PartialEq, Serialize)]
pub enum ErrorOrigin {
    Config,
    Executor,
    Resolver,
    Session,
    Store,
    Translator,
}

impl From<CoreErrorOrigin> for ErrorOrigin {
    fn from(origin: CoreErrorOrigin) -> Self {
        match origin {
            CoreErrorOrigin::Config => Self::Config,
            CoreErrorOrigin::Executor => Self::Executor,
            CoreErrorOrigin::Resolver => Self::Resolver,
            CoreErrorOrigin::Session => Self::Session,
            CoreErrorOrigin::Store => Self::Store,
            CoreErrorOrigin::Translator => Self::Translator,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_implemented_maps_to_query_kind() {
        let err: Error = ExecuteError::NotImplemented { operation: "exists" }.into();

        assert_eq!(err.kind, ErrorKind::Query(QueryErrorKind::NotImplemented));
        assert_eq!(err.origin, ErrorOrigin::Executor);
        assert!(err.message.contains("exists"));
    }

    #[test]
    fn session_closed_maps_to_query_kind() {
        let err: Error = ExecuteError::SessionClosed.into();

        assert_eq!(err.kind, ErrorKind::Query(QueryErrorKind::SessionClosed));
        assert_eq!(err.origin, ErrorOrigin::Session);
    }

    #[test]
    fn missing_config_maps_to_config_kind() {
        let err: Error = ConfigError::MissingKey {
            key: quarry_core::config::UNIT_KEY,
        }
        .into();

        assert_eq!(err.kind, ErrorKind::Config);
        assert_eq!(err.origin, ErrorOrigin::Config);
    }
}
