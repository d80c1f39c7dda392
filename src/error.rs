use std::io;

#[derive(Debug, Display)]
pub enum SnakeError {
    #[display(fmt = "Invalid argument: {}", _0)]
    InvalidArgument(String),
    #[display(fmt = "Missing element: {}", _0)]
    MissingElement(String),
    #[display(fmt = "Runtime failure: {}", _0)]
    RuntimeFailure(String),
    #[display(fmt = "I/O error: {}", _0)]
    Io(io::Error),
    #[display(fmt = "JSON error: {}", _0)]
    Json(serde_json::Error),
}

impl std::error::Error for SnakeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SnakeError::Io(err) => Some(err),
            SnakeError::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for SnakeError {
    fn from(err: io::Error) -> Self {
        SnakeError::Io(err)
    }
}

impl From<serde_json::Error> for SnakeError {
    fn from(err: serde_json::Error) -> Self {
        SnakeError::Json(err)
    }
}

pub type Result<T> = std::result::Result<T, SnakeError>;

/// Logs a failed operation and turns it into `None`, so the caller can skip
/// the work that depended on it and keep the frame loop running.
pub fn skip_on_error<T>(context: &str, result: Result<T>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            warn!("{} skipped: {}", context, err);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skip_on_error_passes_values_through() {
        assert_eq!(skip_on_error("noop", Ok(3)), Some(3));
    }

    #[test]
    fn skip_on_error_turns_failures_into_none() {
        let failed: Result<u32> = Err(SnakeError::MissingElement("canvas".to_string()));
        assert_eq!(skip_on_error("draw", failed), None);
    }

    #[test]
    fn io_errors_keep_their_source() {
        use std::error::Error;

        let err = SnakeError::from(io::Error::new(io::ErrorKind::NotFound, "gone"));
        assert!(err.source().is_some());
        assert_eq!(err.to_string(), "I/O error: gone");
    }
}
