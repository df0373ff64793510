// Error types for key generation, block encryption and decryption

/// Errors surfaced by the RSA pipeline.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Prime generation failed: {0}")]
    GenerationFailed(String),

    #[error("Invalid modulus: {0}")]
    InvalidModulus(String),

    #[error("Key too small: a {modulus_bits}-bit modulus leaves no room for a plaintext block")]
    KeyTooSmall { modulus_bits: u64 },

    #[error("Decryption of block {index} failed: {reason}")]
    DecryptionFailed { index: usize, reason: String },

    #[error("Decryption cancelled")]
    Cancelled,

    #[error("Decrypted plaintext is not valid UTF-8: {0}")]
    InvalidPlaintext(String),
}

pub type Result<T> = std::result::Result<T, Error>;
