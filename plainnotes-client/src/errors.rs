use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("server answered {status}: {message}")]
    Rejected {
        status: u16,
        message: String,
    },

    #[error("unexpected response: {0}")]
    InvalidResponse(String),
}

impl ClientError {
    /// True when the server was reached and refused the request
    pub fn is_rejection(&self) -> bool {
        matches!(self, ClientError::Rejected { .. })
    }
}
