// RSA Big Integer Operations
// Wrapper around num-bigint: byte conversion, modular arithmetic and prime generation

use num_bigint::{BigInt, RandBigInt};
use num_integer::Integer;
use num_traits::{One, Signed, Zero};

use super::random::RandomSource;
use crate::error::{Error, Result};

/// RSA Big Integer type alias
pub type RsaBigInt = num_bigint::BigUint;

/// Miller-Rabin witness rounds used for generated primes
pub const MILLER_RABIN_ROUNDS: u32 = 20;

/// Odd primes used to reject candidates before Miller-Rabin
const SMALL_PRIMES: &[u32] = &[
    3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67, 71, 73, 79, 83, 89, 97,
    101, 103, 107, 109, 113, 127, 131, 137, 139, 149, 151, 157, 163, 167, 173, 179, 181, 191, 193,
    197, 199, 211, 223, 227, 229, 233, 239, 241, 251,
];

/// Create a big integer from u64
pub fn from_u64(n: u64) -> RsaBigInt {
    RsaBigInt::from(n)
}

/// Create a big integer from bytes (big-endian, unsigned)
pub fn from_bytes(bytes: &[u8]) -> RsaBigInt {
    RsaBigInt::from_bytes_be(bytes)
}

/// Convert big integer to its minimal big-endian bytes.
///
/// Leading zero bytes are not emitted and zero encodes as an empty vector.
pub fn to_bytes(n: &RsaBigInt) -> Vec<u8> {
    if n.is_zero() {
        return Vec::new();
    }
    n.to_bytes_be()
}

/// Modular exponentiation: base^exp mod modulus
pub fn mod_pow(base: &RsaBigInt, exp: &RsaBigInt, modulus: &RsaBigInt) -> RsaBigInt {
    if modulus.is_one() {
        return RsaBigInt::zero();
    }
    base.modpow(exp, modulus)
}

/// Compute the modular inverse a^(-1) mod m with the iterative extended Euclidean algorithm.
///
/// The result lies in `[0, m)`. Fails with `InvalidModulus` when `m <= 1` or
/// when `a` and `m` are not coprime.
pub fn mod_inverse(a: &RsaBigInt, m: &RsaBigInt) -> Result<RsaBigInt> {
    if m <= &RsaBigInt::one() {
        return Err(Error::InvalidModulus(format!("modulus must be greater than 1, got {}", m)));
    }

    let reduced = a % m;
    if !reduced.gcd(m).is_one() {
        return Err(Error::InvalidModulus(format!("{} is not coprime with {}", a, m)));
    }

    let m0 = BigInt::from(m.clone());
    let mut a = BigInt::from(reduced);
    let mut m = m0.clone();
    let mut x0 = BigInt::zero();
    let mut x1 = BigInt::one();

    while a > BigInt::one() {
        let q = &a / &m;
        let t = m.clone();
        m = &a % &m;
        a = t;

        let t = x0.clone();
        x0 = &x1 - &q * &x0;
        x1 = t;
    }

    // Bezout coefficient lies in (-m0, m0)
    if x1.is_negative() {
        x1 += &m0;
    }

    x1.to_biguint()
        .ok_or_else(|| Error::InvalidModulus("inverse normalization produced a negative value".to_string()))
}

/// Miller-Rabin primality test preceded by trial division
/// Returns true if n is probably prime
pub fn is_probable_prime<R: RandomSource + ?Sized>(n: &RsaBigInt, iterations: u32, rng: &mut R) -> bool {
    let two = RsaBigInt::from(2u8);
    if n < &two {
        return false;
    }
    if n == &two {
        return true;
    }
    if n.is_even() {
        return false;
    }

    for &p in SMALL_PRIMES {
        let p = RsaBigInt::from(p);
        if n == &p {
            return true;
        }
        if (n % &p).is_zero() {
            return false;
        }
    }

    // Write n-1 as d * 2^s with d odd
    let n_minus_one = n - 1u8;
    let mut d = n_minus_one.clone();
    let mut s = 0u32;
    while d.is_even() {
        d >>= 1;
        s += 1;
    }

    'witness: for _ in 0..iterations {
        let a = rng.gen_biguint_range(&two, &n_minus_one);
        let mut x = mod_pow(&a, &d, n);

        if x.is_one() || x == n_minus_one {
            continue;
        }

        for _ in 1..s {
            x = mod_pow(&x, &two, n);
            if x == n_minus_one {
                continue 'witness;
            }
        }

        return false;
    }

    true
}

/// Generate a probable prime of exactly `bit_length` bits.
///
/// The two most significant bits are forced on so that the product of two such
/// primes has exactly `2 * bit_length` bits.
pub fn generate_prime<R: RandomSource + ?Sized>(bit_length: u64, rng: &mut R) -> Result<RsaBigInt> {
    if bit_length < 2 {
        return Err(Error::GenerationFailed(format!(
            "cannot generate a {}-bit prime",
            bit_length
        )));
    }

    let top_bits = RsaBigInt::from(3u8) << (bit_length - 2);

    loop {
        let mut candidate = rng.gen_biguint(bit_length);
        candidate |= &top_bits;
        candidate |= RsaBigInt::one();

        if is_probable_prime(&candidate, MILLER_RABIN_ROUNDS, rng) {
            return Ok(candidate);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(0x5eed)
    }

    #[test]
    fn test_mod_pow() {
        // 3^5 mod 7 = 243 mod 7 = 5
        let result = mod_pow(&from_u64(3), &from_u64(5), &from_u64(7));
        assert_eq!(result, from_u64(5));
        assert_eq!(mod_pow(&from_u64(3), &from_u64(5), &from_u64(1)), from_u64(0));
    }

    #[test]
    fn test_mod_inverse() {
        // 3 * 5 = 15 ≡ 1 mod 7, so inverse of 3 mod 7 is 5
        let inv = mod_inverse(&from_u64(3), &from_u64(7)).unwrap();
        assert_eq!(inv, from_u64(5));

        // 17 * 2753 = 46801 = 15 * 3120 + 1
        let inv = mod_inverse(&from_u64(17), &from_u64(3120)).unwrap();
        assert_eq!(inv, from_u64(2753));
    }

    #[test]
    fn test_mod_inverse_range_and_identity() {
        let m = from_u64(1_000_003 * 12);
        for a in [1u64, 5, 7, 11, 65537, 999_999_937] {
            let a = from_u64(a);
            if !a.gcd(&m).is_one() {
                continue;
            }
            let x = mod_inverse(&a, &m).unwrap();
            assert!(x < m);
            assert_eq!((&a * &x) % &m, from_u64(1));
        }
    }

    #[test]
    fn test_mod_inverse_of_one() {
        assert_eq!(mod_inverse(&from_u64(1), &from_u64(97)).unwrap(), from_u64(1));
    }

    #[test]
    fn test_mod_inverse_rejects_non_coprime() {
        let result = mod_inverse(&from_u64(6), &from_u64(9));
        assert!(matches!(result, Err(Error::InvalidModulus(_))));
    }

    #[test]
    fn test_mod_inverse_rejects_trivial_modulus() {
        assert!(matches!(mod_inverse(&from_u64(3), &from_u64(1)), Err(Error::InvalidModulus(_))));
        assert!(matches!(mod_inverse(&from_u64(3), &from_u64(0)), Err(Error::InvalidModulus(_))));
    }

    #[test]
    fn test_is_probable_prime() {
        let mut rng = rng();
        for p in [2u64, 3, 7, 251, 257, 7919, 104_729, 2_147_483_647] {
            assert!(is_probable_prime(&from_u64(p), 10, &mut rng), "{} is prime", p);
        }
        // 561 and 41041 are Carmichael numbers
        for c in [0u64, 1, 4, 9, 561, 41_041, 104_729 * 7919] {
            assert!(!is_probable_prime(&from_u64(c), 10, &mut rng), "{} is composite", c);
        }
    }

    #[test]
    fn test_generate_prime_bit_length() {
        let mut rng = rng();
        for bits in [2u64, 3, 8, 64, 256] {
            let p = generate_prime(bits, &mut rng).unwrap();
            assert_eq!(p.bits(), bits);
            assert!(is_probable_prime(&p, 10, &mut rng));
        }
    }

    #[test]
    fn test_generate_prime_rejects_tiny_lengths() {
        let mut rng = rng();
        assert!(matches!(generate_prime(0, &mut rng), Err(Error::GenerationFailed(_))));
        assert!(matches!(generate_prime(1, &mut rng), Err(Error::GenerationFailed(_))));
    }

    #[test]
    fn test_to_bytes_is_minimal() {
        assert_eq!(to_bytes(&from_bytes(&[0, 0, 0x41, 0x42])), vec![0x41, 0x42]);
        assert!(to_bytes(&from_u64(0)).is_empty());
    }
}
