use alloc::borrow::Cow;
use alloc::boxed::Box;
use alloc::string::String;
use core::{error, fmt};

/// Convenience alias used throughout the codec layer.
pub type Result<T, E = Error> = core::result::Result<T, E>;

// -----------------------------------------------------------------------------
// Error

/// An enumeration of all error outcomes of encoding or decoding.
///
/// Errors surface unchanged from the point they are raised through all
/// recursive codec calls; foreign errors (text parsing, I/O, XML) are
/// wrapped into [`Failure`](Error::Failure) exactly once, at the point they
/// enter the engine. An `Error` is never wrapped in another `Error`.
#[derive(Debug)]
pub enum Error {
    /// No codec exists for a type's shape. On the static paths this is a
    /// compile error; at runtime it is raised when a value behind a
    /// polymorphic slot has no registration to encode through.
    UnsupportedType { type_path: Cow<'static, str> },
    /// A type tag in the document cannot be resolved to a registered type.
    UnregisteredType { name: String },
    /// A member has no writable storage target but the document carries a
    /// value for it.
    ReadOnlyMember {
        type_path: Cow<'static, str>,
        member: Cow<'static, str>,
    },
    /// A member table was addressed with a name it does not contain.
    MemberNotFound {
        type_path: Cow<'static, str>,
        member: Cow<'static, str>,
    },
    /// A required attribute or child is absent and no default applies.
    MissingNode { name: String },
    /// A user-chosen name collides with the reserved `tc:` namespace.
    ReservedName { name: String },
    /// The document was written by an incompatible format version.
    VersionMismatch { found: Option<u32>, supported: u32 },
    /// Any other error raised mid-traversal, carrying the original cause
    /// and the name of the node being processed at failure time.
    Failure {
        node: String,
        cause: Box<dyn error::Error + Send + Sync>,
    },
}

impl Error {
    /// Wraps a foreign error together with the node being processed.
    #[cold]
    pub fn failure(
        node: impl Into<String>,
        cause: impl error::Error + Send + Sync + 'static,
    ) -> Self {
        Error::Failure {
            node: node.into(),
            cause: Box::new(cause),
        }
    }

    /// A [`Failure`](Error::Failure) carrying a plain message as its cause.
    #[cold]
    pub fn malformed(node: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::Failure {
            node: node.into(),
            cause: Box::new(Reason(reason.into())),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UnsupportedType { type_path } => {
                write!(f, "no codec exists for type `{type_path}`")
            }
            Error::UnregisteredType { name } => {
                write!(f, "type tag `{name}` does not resolve to a registered type")
            }
            Error::ReadOnlyMember { type_path, member } => {
                write!(f, "member `{type_path}::{member}` has no writable storage")
            }
            Error::MemberNotFound { type_path, member } => {
                write!(f, "type `{type_path}` has no member named `{member}`")
            }
            Error::MissingNode { name } => {
                write!(f, "required node `{name}` is absent")
            }
            Error::ReservedName { name } => {
                write!(f, "name `{name}` lies in the reserved `tc:` namespace")
            }
            Error::VersionMismatch { found, supported } => match found {
                Some(found) => write!(
                    f,
                    "document has format version {found}, this build supports {supported}"
                ),
                None => write!(
                    f,
                    "document carries no format version, this build supports {supported}"
                ),
            },
            Error::Failure { node, cause } => {
                write!(f, "failed while processing node `{node}`: {cause}")
            }
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Error::Failure { cause, .. } => Some(cause.as_ref()),
            _ => None,
        }
    }
}

// -----------------------------------------------------------------------------
// Reason

// Message-only cause for `Error::malformed`.
#[derive(Debug)]
struct Reason(String);

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl error::Error for Reason {}

#[cfg(test)]
mod tests {
    use super::Error;

    #[test]
    fn failure_preserves_the_cause() {
        let err = Error::failure("count", "12x".parse::<u32>().unwrap_err());
        assert!(matches!(&err, Error::Failure { node, .. } if node == "count"));
        assert!(core::error::Error::source(&err).is_some());
    }

    #[test]
    fn display_names_the_offending_node() {
        let err = Error::malformed("tc:item", "expected an element");
        let text = alloc::format!("{err}");
        assert!(text.contains("tc:item"));
        assert!(text.contains("expected an element"));
    }
}
