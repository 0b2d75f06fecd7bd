use thiserror::Error;

pub type Result<T> = std::result::Result<T, BCryptError>;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum BCryptError {
    #[error("Invalid cost: must be between 4 and 31, but was {0}")]
    InvalidCost(u32),

    #[error("Invalid salt length: must be exactly 16 bytes, but was {0}")]
    InvalidSaltLength(usize),

    #[error("Invalid password: {0}")]
    InvalidPassword(&'static str),

    #[error("Invalid hash: {0}")]
    InvalidHash(String),

    #[error("Invalid bcrypt base64 character: {0:?}")]
    InvalidEncoding(char),

    #[error("Unsupported bcrypt version: {0:?}")]
    UnsupportedVersion(String),
}

impl BCryptError {
    /// True for errors caused by a malformed hash string rather than a bad argument.
    pub fn is_malformed_hash(&self) -> bool {
        matches!(
            self,
            BCryptError::InvalidHash(_)
                | BCryptError::InvalidEncoding(_)
                | BCryptError::UnsupportedVersion(_)
        )
    }
}
