// RSA Encryption Implementation
// Textbook (unpadded) block encryption and fixed-size chunking of a message

use tracing::debug;

use super::bigint::{from_bytes, mod_pow, RsaBigInt};
use crate::error::{Error, Result};

/// Bytes reserved per block, sized like PKCS#1 v1.5 overhead (no padding is applied)
pub const RESERVED_BYTES: u64 = 11;

/// Maximum plaintext block length for a modulus: floor(bits(n) / 8) - 11.
///
/// Fails with `KeyTooSmall` when that leaves no room for a block.
pub fn block_size(n: &RsaBigInt) -> Result<usize> {
    let modulus_bits = n.bits();
    match (modulus_bits / 8).checked_sub(RESERVED_BYTES) {
        Some(size) if size > 0 => Ok(size as usize),
        _ => Err(Error::KeyTooSmall { modulus_bits }),
    }
}

/// Encrypt one block: interpret it as a big-endian integer m and compute m^e mod n
pub fn encrypt_block(block: &[u8], e: &RsaBigInt, n: &RsaBigInt) -> RsaBigInt {
    mod_pow(&from_bytes(block), e, n)
}

/// Encrypt raw bytes block by block, in order.
/// Returns the ciphertext blocks and the block size used.
pub fn encrypt_bytes(plaintext: &[u8], e: &RsaBigInt, n: &RsaBigInt) -> Result<(Vec<RsaBigInt>, usize)> {
    let size = block_size(n)?;
    debug!(block_size = size, "maximum block size in bytes");

    let ciphertexts: Vec<RsaBigInt> = plaintext
        .chunks(size)
        .map(|block| encrypt_block(block, e, n))
        .collect();

    debug!(blocks = ciphertexts.len(), bytes = plaintext.len(), "message encrypted");
    Ok((ciphertexts, size))
}

/// Encrypt a string using its UTF-8 bytes
pub fn encrypt(message: &str, e: &RsaBigInt, n: &RsaBigInt) -> Result<(Vec<RsaBigInt>, usize)> {
    encrypt_bytes(message.as_bytes(), e, n)
}
