use std::fmt;

///
/// ErrorClass
/// Internal error taxonomy for runtime classification.
/// Not a stable API; may change without notice.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorClass {
    NotFound,
    Conflict,
    Unsupported,
    NotImplemented,
    TypeMismatch,
    Closed,
    Invalid,
    Internal,
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::NotFound => "not_found",
            Self::Conflict => "conflict",
            Self::Unsupported => "unsupported",
            Self::NotImplemented => "not_implemented",
            Self::TypeMismatch => "type_mismatch",
            Self::Closed => "closed",
            Self::Invalid => "invalid",
            Self::Internal => "internal",
        };
        write!(f, "{label}")
    }
}

///
/// ErrorOrigin
/// Which engine layer produced a failure.
/// Not a stable API; may change without notice.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorOrigin {
    Config,
    Resolver,
    Translator,
    Executor,
    Store,
    Session,
}

impl fmt::Display for ErrorOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Config => "config",
            Self::Resolver => "resolver",
            Self::Translator => "translator",
            Self::Executor => "executor",
            Self::Store => "store",
            Self::Session => "session",
        };
        write!(f, "{label}")
    }
}
