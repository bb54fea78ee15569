//! Errors from the remote deck and pronunciation backend.

/// Backend errors.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Backend error: {status} - {message}")]
    Backend { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("File error: {0}")]
    File(String),
}

impl SourceError {
    /// Whether the server could not be reached at all (typically still asleep).
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_backend() {
        let error = SourceError::Backend {
            status: 404,
            message: "File not found".to_string(),
        };
        assert_eq!(error.to_string(), "Backend error: 404 - File not found");
    }

    #[test]
    fn test_is_network() {
        assert!(SourceError::Network("connection refused".to_string()).is_network());
        assert!(!SourceError::Parse("bad json".to_string()).is_network());
    }

    #[test]
    fn test_error_display_file() {
        let error = SourceError::File("deck.csv: No such file or directory".to_string());
        assert_eq!(error.to_string(), "File error: deck.csv: No such file or directory");
        assert!(!error.is_network());
    }
}
