// RSA Decryption Implementation
// Concurrent block decryption with order-preserving reassembly

use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rayon::prelude::*;
use tracing::debug;

use super::bigint::{mod_pow, to_bytes, RsaBigInt};
use crate::error::{Error, Result};

/// Shared flag that stops decryption units which have not started yet.
///
/// Clones observe the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// Decrypt one block: compute c^d mod n and return its minimal big-endian bytes.
///
/// Leading zero bytes of the original block are not restored.
pub fn decrypt_block(ciphertext: &RsaBigInt, d: &RsaBigInt, n: &RsaBigInt) -> Vec<u8> {
    to_bytes(&mod_pow(ciphertext, d, n))
}

/// Decrypt ordered ciphertext blocks into a string
pub fn decrypt(ciphertexts: &[RsaBigInt], d: &RsaBigInt, n: &RsaBigInt) -> Result<String> {
    decrypt_with_cancel(ciphertexts, d, n, &CancellationToken::new())
}

/// Decrypt into a string, stopping early if `cancel` fires
pub fn decrypt_with_cancel(
    ciphertexts: &[RsaBigInt],
    d: &RsaBigInt,
    n: &RsaBigInt,
    cancel: &CancellationToken,
) -> Result<String> {
    let plaintext = decrypt_bytes_with_cancel(ciphertexts, d, n, cancel)?;
    String::from_utf8(plaintext).map_err(|e| Error::InvalidPlaintext(e.to_string()))
}

/// Decrypt ordered ciphertext blocks into raw bytes
pub fn decrypt_bytes(ciphertexts: &[RsaBigInt], d: &RsaBigInt, n: &RsaBigInt) -> Result<Vec<u8>> {
    decrypt_bytes_with_cancel(ciphertexts, d, n, &CancellationToken::new())
}

/// Decrypt into raw bytes, stopping early if `cancel` fires
pub fn decrypt_bytes_with_cancel(
    ciphertexts: &[RsaBigInt],
    d: &RsaBigInt,
    n: &RsaBigInt,
    cancel: &CancellationToken,
) -> Result<Vec<u8>> {
    if n.bits() < 2 {
        return Err(Error::InvalidModulus(format!("modulus must be greater than 1, got {}", n)));
    }
    decrypt_ordered(ciphertexts, cancel, |_, ciphertext| decrypt_block(ciphertext, d, n))
}

/// One logical unit of work per block on the rayon pool.
///
/// Each unit writes the slot at its own index, so completion order never
/// affects the result; slots are concatenated in index order afterwards. A
/// panicking unit becomes `DecryptionFailed` for its index and the lowest
/// failing index is reported.
fn decrypt_ordered<F>(ciphertexts: &[RsaBigInt], cancel: &CancellationToken, unit: F) -> Result<Vec<u8>>
where
    F: Fn(usize, &RsaBigInt) -> Vec<u8> + Sync,
{
    if ciphertexts.is_empty() {
        return Ok(Vec::new());
    }

    debug!(blocks = ciphertexts.len(), "decrypting blocks");

    let slots: Vec<Result<Vec<u8>>> = ciphertexts
        .par_iter()
        .enumerate()
        .map(|(index, ciphertext)| {
            if cancel.is_cancelled() {
                return Err(Error::Cancelled);
            }
            panic::catch_unwind(AssertUnwindSafe(|| unit(index, ciphertext))).map_err(|_| {
                Error::DecryptionFailed {
                    index,
                    reason: "decryption unit panicked".to_string(),
                }
            })
        })
        .collect();

    let mut plaintext = Vec::new();
    for slot in slots {
        plaintext.extend_from_slice(&slot?);
    }

    debug!(bytes = plaintext.len(), "plaintext reassembled");
    Ok(plaintext)
}
