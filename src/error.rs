use std::{error, fmt};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    /// A value was rejected while being constructed.
    InvalidArgument,
    Input,
    Output,
}

pub struct Error {
    kind: ErrorKind,
    message: String,
    source: Option<Box<dyn error::Error + Send + Sync>>,
}

impl Error {
    pub fn invalid_argument<M: Into<String>>(message: M) -> Self {
        let message = message.into();
        tracing::debug!(%message, "rejected invalid argument");
        Self {
            kind: ErrorKind::InvalidArgument,
            message,
            source: None,
        }
    }

    pub fn with_kind<M, E>(kind: ErrorKind, message: M, source: E) -> Self
    where
        M: Into<String>,
        E: error::Error + Send + Sync + 'static,
    {
        Self {
            kind,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_invalid_argument(&self) -> bool {
        self.kind == ErrorKind::InvalidArgument
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?} error: {}", self.kind, self)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.source {
            Some(err) => write!(f, "{}. Source error: {}", self.message, err),
            None => write!(f, "{}", self.message),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self.source {
            Some(ref err) => Some(&**err),
            None => None,
        }
    }
}

impl From<String> for Error {
    fn from(message: String) -> Self {
        Self::invalid_argument(message)
    }
}

impl From<&str> for Error {
    fn from(message: &str) -> Self {
        Self::invalid_argument(message)
    }
}

impl<E: error::Error + Send + Sync + 'static> From<(&str, E)> for Error {
    fn from((message, err): (&str, E)) -> Self {
        Self::with_kind(ErrorKind::Input, message, err)
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_with_source() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "boom");
        let err = Error::with_kind(ErrorKind::Output, "writer failed", io);
        assert_eq!(ErrorKind::Output, err.kind());
        assert_eq!("writer failed. Source error: boom", err.to_string());
        assert!(error::Error::source(&err).is_some());
    }

    #[test]
    fn test_plain_messages_are_invalid_arguments() {
        let err: Error = "bad name".into();
        assert!(err.is_invalid_argument());
        assert_eq!("bad name", err.message());
    }
}
