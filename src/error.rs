//! Crate-wide error taxonomy.
//!
//! Every fallible operation in this crate returns `Result<T, Error>`. There
//! is no local recovery and no retry: the three binaries in `src/bin/` are
//! the only place a `Result` is unwrapped, where it becomes a one-line
//! diagnostic on stderr and a nonzero exit code.

use thiserror::Error as ThisError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, ThisError)]
pub enum Error {
    #[error("PEM framing malformed or begin/end label mismatch")]
    BadPem,

    #[error("base64 body could not be decoded: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("hex could not be decoded: {0}")]
    Hex(#[from] hex::FromHexError),

    #[error("ASN.1 cursor walked past the declared container end at offset {offset}")]
    TruncatedInput { offset: usize },

    #[error("bit string padding invalid: {0}")]
    BadPadding(String),

    #[error("ASN.1 child lengths exceed their parent container")]
    OverLongLength,

    #[error("powmod called with a negative exponent")]
    NegativeExponent,

    #[error("{0} has no modular inverse: not coprime with the modulus")]
    NotInvertible(String),

    #[error("supplied prime does not divide the modulus")]
    PrimeMismatch,

    #[error("both sets of random data are the same")]
    SamePad,

    #[error("pad is shorter than offset + payload length")]
    PadTooShort,

    #[error("bad arguments: {0}")]
    BadArgs(String),

    #[error("negative value where a non-negative integer was required")]
    Negative,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
