use thiserror::Error;

#[derive(Debug, Error)]
#[error(transparent)]
pub struct Error(Box<ErrorKind>);

impl Error {
    pub fn kind(&self) -> &ErrorKind {
        self.0.as_ref()
    }

    pub fn into_kind(self) -> ErrorKind {
        *self.0
    }

    pub fn invalid_format(element: impl Into<String>, message: impl Into<String>) -> Error {
        Error(
            ErrorKind::InvalidFormat {
                element: element.into(),
                message: message.into(),
            }
            .into(),
        )
    }

    pub fn invalid_arg(name: impl Into<String>, message: impl Into<String>) -> Error {
        Error(
            ErrorKind::InvalidArgument {
                name: name.into(),
                message: message.into(),
            }
            .into(),
        )
    }

    pub fn invalid_operation(name: impl Into<String>) -> Error {
        Error(ErrorKind::InvalidOperation { name: name.into() }.into())
    }

    pub fn index_out_of_range(index: usize, len: usize) -> Error {
        Error(ErrorKind::IndexOutOfRange { index, len }.into())
    }

    pub fn capacity_exceeded(requested: usize, limit: usize) -> Error {
        Error(ErrorKind::CapacityExceeded { requested, limit }.into())
    }

    pub fn io(context: impl Into<String>, source: std::io::Error) -> Error {
        Error(
            ErrorKind::Io {
                context: context.into(),
                source,
            }
            .into(),
        )
    }

    /// Returns `true` for contract violations on a descriptor list: mutating
    /// a borrowed view or addressing an element outside of the list.
    pub fn is_misuse(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::InvalidOperation { .. } | ErrorKind::IndexOutOfRange { .. }
        )
    }
}

#[derive(Debug, Error)]
pub enum ErrorKind {
    #[error("invalid argument {name}: {message}")]
    InvalidArgument { name: String, message: String },

    #[error("invalid operation {name}")]
    InvalidOperation { name: String },

    #[error("index {index} is out of range for a list of {len} descriptors")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("invalid encoding for '{element}': {message}")]
    InvalidFormat { element: String, message: String },

    #[error("serialized size {requested} exceeds the configured limit of {limit} bytes")]
    CapacityExceeded { requested: usize, limit: usize },

    #[error("IO error for '{context}': {source}")]
    Io {
        context: String,
        source: std::io::Error,
    },
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Error(kind.into())
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        if e.kind() == std::io::ErrorKind::UnexpectedEof {
            Error::invalid_format("stream", "unexpected end of input")
        } else {
            Error::io("", e)
        }
    }
}
