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

    pub fn invalid_arg(name: impl Into<String>, message: impl Into<String>) -> Error {
        Error(
            ErrorKind::InvalidArgument {
                name: name.into(),
                message: message.into(),
            }
            .into(),
        )
    }

    /// Two ranges of the same input set share at least one position.
    ///
    /// `first` and `second` are the original (caller-visible) indices of the
    /// offending ranges.
    pub fn overlapping_ranges(name: impl Into<String>, first: usize, second: usize) -> Error {
        Error(
            ErrorKind::OverlappingRanges {
                name: name.into(),
                first,
                second,
            }
            .into(),
        )
    }

    pub fn incomparable_bound(name: impl Into<String>, index: usize) -> Error {
        Error(
            ErrorKind::IncomparableBound {
                name: name.into(),
                index,
            }
            .into(),
        )
    }

    pub fn slice_syntax(input: impl Into<String>, message: impl Into<String>) -> Error {
        Error(
            ErrorKind::SliceSyntax {
                input: input.into(),
                message: message.into(),
            }
            .into(),
        )
    }
}

#[derive(Debug, Error)]
pub enum ErrorKind {
    #[error("invalid argument {name}: {message}")]
    InvalidArgument { name: String, message: String },

    #[error("ranges {first} and {second} of '{name}' overlap")]
    OverlappingRanges {
        name: String,
        first: usize,
        second: usize,
    },

    #[error("range {index} of '{name}' has an incomparable bound (NaN?)")]
    IncomparableBound { name: String, index: usize },

    #[error("invalid slice '{input}': {message}")]
    SliceSyntax { input: String, message: String },
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Error(kind.into())
    }
}
