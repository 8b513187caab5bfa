use std::fmt;
use std::io;

/// Shell-level failure: reported to the user, never a crash.
#[derive(Debug)]
pub enum HarnessError {
    Io(io::Error),
    /// A trace, graph, or config file violated its grammar, or a trace
    /// replay stepped outside the live element set.
    Malformed(String),
}

impl fmt::Display for HarnessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HarnessError::Io(err) => write!(f, "{err}"),
            HarnessError::Malformed(message) => write!(f, "{message}"),
        }
    }
}

impl std::error::Error for HarnessError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            HarnessError::Io(err) => Some(err),
            HarnessError::Malformed(_) => None,
        }
    }
}

impl From<io::Error> for HarnessError {
    fn from(err: io::Error) -> Self {
        HarnessError::Io(err)
    }
}
