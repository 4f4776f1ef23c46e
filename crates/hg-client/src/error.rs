#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The service could not be reached at all.
    #[error("cannot connect to assessment service: {0}")]
    Connection(String),

    /// The service answered with a non-success HTTP status.
    #[error("service error ({status}): {detail}")]
    Service { status: u16, detail: String },

    /// A response was missing fields the contract requires.
    #[error("unexpected response from assessment service: {0}")]
    Protocol(String),

    /// The service reported that the assessment itself failed.
    #[error("assessment failed: {0}")]
    JobFailed(String),

    /// The attempt cap or deadline was reached while the job was still running.
    /// The job may still complete server-side.
    #[error("assessment {job_id} still running after {attempts} status checks")]
    JobTimedOut { job_id: String, attempts: u32 },

    #[error("assessment polling cancelled")]
    Cancelled,

    #[error("invalid repository URL: {0}")]
    InvalidRepositoryUrl(String),

    #[error("invalid branch: {0}")]
    InvalidBranch(String),
}

impl ClientError {
    /// Time-outs are reported as warnings rather than hard failures.
    pub fn is_warning(&self) -> bool {
        matches!(self, ClientError::JobTimedOut { .. })
    }

    pub fn is_connection_error(&self) -> bool {
        matches!(self, ClientError::Connection(_))
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ClientError::Protocol(err.to_string())
        } else if let Some(status) = err.status() {
            ClientError::Service {
                status: status.as_u16(),
                detail: status.canonical_reason().unwrap_or("unknown status").to_string(),
            }
        } else {
            ClientError::Connection(err.to_string())
        }
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;
