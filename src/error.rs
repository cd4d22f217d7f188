use std::fmt;
use std::io;

#[derive(Debug)]
pub enum Error {
    /// Output requested before the first reseed.
    NotSeeded,
    RequestTooLarge { requested: usize, max: usize },
    /// Counter values must be positive; 0 marks an unseeded generator.
    InvalidCounter,
    Overflow { size: usize },
    KeySizeMismatch { expected: usize, actual: usize },
    /// Broken internal invariant. Never recover from this.
    Invariant(&'static str),
    CounterExhausted,
    InvalidParameters(String),
    Io(io::Error),
    InvalidArgs(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::NotSeeded => write!(f, "generator must be seeded before use"),
            Error::RequestTooLarge { requested, max } => write!(
                f,
                "request of {} bytes exceeds the {}-byte limit per key",
                requested, max
            ),
            Error::InvalidCounter => write!(f, "invalid counter value: 0"),
            Error::Overflow { size } => write!(f, "counter does not fit in {} bytes", size),
            Error::KeySizeMismatch { expected, actual } => write!(
                f,
                "key size mismatch: expected {} bytes, got {}",
                expected, actual
            ),
            Error::Invariant(msg) => write!(f, "internal invariant violated: {}", msg),
            Error::CounterExhausted => write!(f, "block counter exhausted"),
            Error::InvalidParameters(msg) => write!(f, "invalid generator parameters: {}", msg),
            Error::Io(e) => write!(f, "I/O error: {}", e),
            Error::InvalidArgs(msg) => write!(f, "invalid arguments: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Error::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_not_seeded() {
        let msg = format!("{}", Error::NotSeeded);
        assert!(msg.contains("seeded before use"));
    }

    #[test]
    fn test_display_request_too_large() {
        let err = Error::RequestTooLarge {
            requested: 1_048_577,
            max: 1_048_576,
        };
        let msg = format!("{}", err);
        assert!(msg.contains("1048577"));
        assert!(msg.contains("1048576"));
    }

    #[test]
    fn test_display_key_size_mismatch() {
        let err = Error::KeySizeMismatch {
            expected: 32,
            actual: 20,
        };
        let msg = format!("{}", err);
        assert!(msg.contains("expected 32"));
        assert!(msg.contains("got 20"));
    }

    #[test]
    fn test_display_overflow() {
        let msg = format!("{}", Error::Overflow { size: 4 });
        assert!(msg.contains("4 bytes"));
    }

    #[test]
    fn test_from_io_error() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "missing seed");
        let err: Error = io_err.into();
        match err {
            Error::Io(ref e) => assert_eq!(e.kind(), io::ErrorKind::NotFound),
            _ => panic!("expected Error::Io"),
        }
        assert!(std::error::Error::source(&err).is_some());
    }
}
