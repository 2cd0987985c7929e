/// Combines all error types in one enum to ease
/// error propagation. Each stage of the program
/// reports its own variant, the cause is attached.
#[derive(Debug)]
pub enum SmtpSenderError {
    /// The configuration file does not exist or cannot be opened for reading.
    OpenFailure(std::io::Error),
    /// The configuration file was opened but its content could not be read completely.
    ReadFailure(std::io::Error),
    /// The configuration file content is not valid json or does not match the expected shape.
    ParseFailure(serde_json::Error),
    /// The configuration was parsed but did not pass the optional pre flight check.
    InvalidConfiguration(String),
    /// Anything that went wrong while handing the mail to the server:
    /// envelope addresses, connect, authentication, recipient rejection or I/O.
    SubmissionFailure(String),
}

impl std::fmt::Display for SmtpSenderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SmtpSenderError::OpenFailure(e) => write!(f, "cannot open configuration file: {}", e),
            SmtpSenderError::ReadFailure(e) => write!(f, "cannot read configuration file: {}", e),
            SmtpSenderError::ParseFailure(e) => {
                write!(f, "cannot parse configuration file: {}", e)
            }
            SmtpSenderError::InvalidConfiguration(e) => write!(f, "invalid configuration: {}", e),
            SmtpSenderError::SubmissionFailure(e) => write!(f, "submission failed: {}", e),
        }
    }
}

// Make it an error!
impl std::error::Error for SmtpSenderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SmtpSenderError::OpenFailure(e) => Some(e),
            SmtpSenderError::ReadFailure(e) => Some(e),
            SmtpSenderError::ParseFailure(e) => Some(e),
            SmtpSenderError::InvalidConfiguration(_) => None,
            SmtpSenderError::SubmissionFailure(_) => None,
        }
    }
}

impl From<serde_json::Error> for SmtpSenderError {
    fn from(err: serde_json::Error) -> Self {
        SmtpSenderError::ParseFailure(err)
    }
}

impl From<lettre::transport::smtp::Error> for SmtpSenderError {
    fn from(err: lettre::transport::smtp::Error) -> Self {
        SmtpSenderError::SubmissionFailure(err.to_string())
    }
}
