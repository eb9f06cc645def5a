use std::fmt;

#[derive(Debug)]
pub enum PollError {
    IoError(std::io::Error),
    ConfigError(String),
    NotRegistered(String),
    AlreadyRegistered(String),
    Corrupted(String),
    WaitError(std::io::Error),
}

impl PollError {
    /// Errors that mean the poller itself can no longer be trusted.
    pub fn is_fatal(&self) -> bool {
        matches!(self, PollError::Corrupted(_) | PollError::WaitError(_))
    }
}

impl fmt::Display for PollError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PollError::IoError(e) => write!(f, "IO error: {}", e),
            PollError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            PollError::NotRegistered(msg) => write!(f, "Not registered: {}", msg),
            PollError::AlreadyRegistered(msg) => write!(f, "Already registered: {}", msg),
            PollError::Corrupted(msg) => write!(f, "Poller corrupted: {}", msg),
            PollError::WaitError(e) => write!(f, "Wait failed: {}", e),
        }
    }
}

impl std::error::Error for PollError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PollError::IoError(e) | PollError::WaitError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for PollError {
    fn from(err: std::io::Error) -> Self {
        PollError::IoError(err)
    }
}

pub type Result<T> = std::result::Result<T, PollError>;
