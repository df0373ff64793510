//! Textbook RSA over a byte buffer split into fixed-size blocks.
//!
//! Keys come from [`rsa::generate_keys`], messages are encrypted block by block
//! with [`rsa::encrypt`] and decrypted with [`rsa::decrypt`], which runs one
//! unit of work per block and reassembles the plaintext in block order.
//!
//! No padding is applied. This is an illustration of the arithmetic, not a
//! secure RSA implementation.
//!
//! ```rust,no_run
//! use textbook_rsa::rsa::{decrypt, encrypt, generate_keys, os_source};
//!
//! let keypair = generate_keys(1024, &mut os_source()).expect("key generation failed");
//! let (n, e, d) = keypair.into_parts();
//!
//! let (ciphertexts, _block_size) = encrypt("hello world", &e, &n).expect("encryption failed");
//! let message = decrypt(&ciphertexts, &d, &n).expect("decryption failed");
//! assert_eq!(message, "hello world");
//! ```

pub mod cli;
pub mod error;
pub mod rsa;
pub mod util;

pub use error::{Error, Result};
