/// Variants carrying `Option<String>` hold the server's own message when it
/// sent one; the UI prefers that text over its generic fallback.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProfileError {
    #[error("{0}")]
    Validation(String),

    #[error("Please enter or select a category name")]
    EmptyName,

    #[error("A category named \"{0}\" already exists")]
    DuplicateName(String),

    #[error("Your session has expired, please log in again")]
    Auth(Option<String>),

    #[error("Incorrect password")]
    InvalidCredential(Option<String>),

    #[error("The item no longer exists")]
    NotFound(Option<String>),

    #[error("The request was rejected")]
    Rejected(Option<String>),

    #[error("Server error")]
    Server {
        status: Option<u16>,
        message: Option<String>,
    },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Unexpected response: {0}")]
    Decode(String),
}

impl ProfileError {
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ProfileError::Auth(msg)
            | ProfileError::InvalidCredential(msg)
            | ProfileError::NotFound(msg)
            | ProfileError::Rejected(msg)
            | ProfileError::Server { message: msg, .. } => msg.as_deref(),
            _ => None,
        }
    }

    /// Text to show the user: the server's message when present, the
    /// client-side description for client-detected errors, else `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        if let Some(msg) = self.server_message().filter(|m| !m.trim().is_empty()) {
            return msg.to_string();
        }
        match self {
            ProfileError::Validation(_)
            | ProfileError::EmptyName
            | ProfileError::DuplicateName(_)
            | ProfileError::InvalidCredential(_)
            | ProfileError::Auth(_) => self.to_string(),
            _ => fallback.to_string(),
        }
    }
}
