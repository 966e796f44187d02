use shuxiang_kv::KVError;

/// Message used when a failed response carries no usable `message`.
pub const DEFAULT_FAILURE: &str = "request failed";

/// Client-side error.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The backend answered with a failure: a non-success HTTP status, or a
    /// `{success: false}` envelope (reported with the HTTP status it came on).
    #[error("HTTP {status}: {message}")]
    Api { status: u16, message: String },

    #[error("network: {0}")]
    Network(#[from] reqwest::Error),

    #[error("decode: {0}")]
    Decode(String),

    /// Rejected before anything was sent.
    #[error("{0}")]
    Validation(String),

    #[error("storage: {0}")]
    Storage(#[from] KVError),
}

impl ClientError {
    pub fn validation(msg: impl Into<String>) -> Self {
        ClientError::Validation(msg.into())
    }

    /// Business-rule duplicate (collection or category already exists).
    ///
    /// The backend reports these either as 409 or as a failure envelope
    /// whose message says so; both are recoverable.
    pub fn is_duplicate(&self) -> bool {
        match self {
            ClientError::Api { status, message } => {
                *status == 409
                    || message.contains("已存在")
                    || message.contains("已经收藏")
                    || message.to_lowercase().contains("already exists")
            }
            _ => false,
        }
    }

    /// Text shown to the user for this failure.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Api { message, .. } => message.clone(),
            ClientError::Validation(msg) => msg.clone(),
            ClientError::Network(_) | ClientError::Decode(_) => DEFAULT_FAILURE.to_string(),
            ClientError::Storage(e) => e.to_string(),
        }
    }
}
