// RSA Key Generation
// Implements textbook RSA key pair generation (modulus, public and private exponents)

use tracing::{debug, info, warn};

use super::bigint::{from_u64, generate_prime, mod_inverse, RsaBigInt};
use super::random::RandomSource;
use crate::error::{Error, Result};

/// Fixed public exponent
pub const PUBLIC_EXPONENT: u64 = 65537;

/// Smallest modulus whose half-size range holds two distinct primes
pub const MIN_KEY_BITS: u64 = 10;

/// Attempts at drawing a q different from p
const MAX_PRIME_DRAWS: usize = 64;

/// RSA Public Key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsaPublicKey {
    pub n: RsaBigInt, // Modulus
    pub e: RsaBigInt, // Public exponent
}

/// RSA Private Key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsaPrivateKey {
    pub n: RsaBigInt, // Modulus (same as public)
    pub d: RsaBigInt, // Private exponent
}

/// RSA Key Pair (both public and private keys)
#[derive(Debug, Clone)]
pub struct RsaKeyPair {
    pub public_key: RsaPublicKey,
    pub private_key: RsaPrivateKey,
    pub bit_length: u64,
}

impl RsaPublicKey {
    /// Bit length of the modulus
    pub fn bit_length(&self) -> u64 {
        self.n.bits()
    }

    /// Encrypt a message block-wise with this key.
    /// Returns the ordered ciphertext blocks and the block size used.
    pub fn encrypt(&self, message: &str) -> Result<(Vec<RsaBigInt>, usize)> {
        super::encrypt::encrypt(message, &self.e, &self.n)
    }
}

impl RsaPrivateKey {
    /// Decrypt ordered ciphertext blocks back into the message
    pub fn decrypt(&self, ciphertexts: &[RsaBigInt]) -> Result<String> {
        super::decrypt::decrypt(ciphertexts, &self.d, &self.n)
    }
}

impl RsaKeyPair {
    /// Get the requested bit length of the key
    pub fn bit_length(&self) -> u64 {
        self.bit_length
    }

    /// Split into `(n, e, d)`
    pub fn into_parts(self) -> (RsaBigInt, RsaBigInt, RsaBigInt) {
        (self.public_key.n, self.public_key.e, self.private_key.d)
    }
}

/// Generate an RSA key pair whose modulus has `bit_length` bits.
///
/// Two primes of `bit_length / 2` bits are drawn from `rng`, `e` is fixed at
/// 65537 and `d = e^(-1) mod (p-1)(q-1)`. There is no retry when `e` shares a
/// factor with φ(n); that case surfaces as `Error::InvalidModulus`.
///
/// Sizes below `MIN_KEY_BITS` fail with `Error::GenerationFailed`.
pub fn generate_keys<R: RandomSource + ?Sized>(bit_length: u64, rng: &mut R) -> Result<RsaKeyPair> {
    if bit_length < MIN_KEY_BITS {
        return Err(Error::GenerationFailed(format!(
            "a {}-bit modulus cannot be built from two distinct primes (minimum {} bits)",
            bit_length, MIN_KEY_BITS
        )));
    }

    let half_bits = bit_length / 2;
    debug!(bit_length, half_bits, "generating RSA key pair");

    let p = generate_prime(half_bits, rng)?;
    let q = draw_distinct_prime(&p, half_bits, rng)?;

    let n = &p * &q;
    let phi_n = (&p - 1u8) * (&q - 1u8);

    let e = from_u64(PUBLIC_EXPONENT);
    let d = mod_inverse(&e, &phi_n)?;

    info!(modulus_bits = n.bits(), "RSA key pair generated");

    Ok(RsaKeyPair {
        public_key: RsaPublicKey { n: n.clone(), e },
        private_key: RsaPrivateKey { n, d },
        bit_length,
    })
}

/// Draw a prime of `half_bits` bits that differs from `p`
fn draw_distinct_prime<R: RandomSource + ?Sized>(p: &RsaBigInt, half_bits: u64, rng: &mut R) -> Result<RsaBigInt> {
    for _ in 0..MAX_PRIME_DRAWS {
        let q = generate_prime(half_bits, rng)?;
        if &q != p {
            return Ok(q);
        }
        warn!(half_bits, "drew identical primes, regenerating q");
    }
    Err(Error::GenerationFailed(format!(
        "no prime distinct from p after {} draws of {} bits",
        MAX_PRIME_DRAWS, half_bits
    )))
}
