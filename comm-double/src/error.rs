use std::sync::Arc;

/// The error type returned by every [`Communicator`](crate::Communicator) method.
///
/// In a test these are the failures a handler chooses to simulate. The
/// double passes them through to the component under test unchanged; they
/// never count against [`verify`](crate::testing::CommunicatorDouble::verify).
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    #[error("Remote error: {0}")]
    Remote(String),

    #[error("IO error: {0}")]
    IoError(#[source] Arc<std::io::Error>),

    #[error("External error: {0}")]
    External(#[source] Arc<dyn std::error::Error + Send + Sync>),
}

impl Error {
    pub fn remote(message: impl Into<String>) -> Self {
        Error::Remote(message.into())
    }

    pub fn external(e: impl std::error::Error + Send + Sync + 'static) -> Self {
        Error::External(Arc::new(e))
    }
}

impl PartialEq for Error {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Remote(a), Self::Remote(b)) => a == b,
            (Self::IoError(a), Self::IoError(b)) => Arc::ptr_eq(a, b),
            (Self::External(a), Self::External(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl Eq for Error {}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::IoError(Arc::new(e))
    }
}
