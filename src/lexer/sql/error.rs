use std::error;
use std::fmt;
use std::io;

/// Statement stream errors.
///
/// The tokenizer itself never fails; the only failure mode is a read
/// error from the external chunk source, which is terminal for the
/// iteration that hit it.
#[non_exhaustive]
#[derive(Debug)]
pub enum Error {
    /// I/O error while pulling the next chunk from the source.
    Io(io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(ref err) => err.fmt(f),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::Io(ref err) => Some(err),
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}
