use thiserror::Error;

#[derive(Error, Debug)]
pub enum GakuError {
    #[error("I/O error: {0}")]
    Io(Box<std::io::Error>),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Reqwest error: {0}")]
    Reqwest(Box<reqwest::Error>),

    #[error("HTTP error {status} from {endpoint}")]
    Status { endpoint: String, status: u16 },

    #[error("Request rejected by server: {0}")]
    Rejected(String),

    #[error("GakuError: {0}")]
    Custom(String),
}

impl From<std::io::Error> for GakuError {
    fn from(error: std::io::Error) -> Self {
        GakuError::Io(Box::new(error))
    }
}

impl From<reqwest::Error> for GakuError {
    fn from(error: reqwest::Error) -> Self {
        GakuError::Reqwest(Box::new(error))
    }
}
