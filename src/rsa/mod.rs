// RSA Module - Main module file
// Exports all RSA-related functionality

pub mod bigint;
pub mod decrypt;
pub mod encrypt;
pub mod keygen;
pub mod random;

pub use bigint::{generate_prime, mod_inverse, RsaBigInt};
pub use decrypt::{
    decrypt, decrypt_block, decrypt_bytes, decrypt_bytes_with_cancel, decrypt_with_cancel, CancellationToken,
};
pub use encrypt::{block_size, encrypt, encrypt_block, encrypt_bytes};
pub use keygen::{generate_keys, RsaKeyPair, RsaPrivateKey, RsaPublicKey, PUBLIC_EXPONENT};
pub use random::{os_source, RandomSource};
