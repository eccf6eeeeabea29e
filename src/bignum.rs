//! Arbitrary-precision integer arithmetic for RSA key reconstruction.
//!
//! `BigUInt` is `num_bigint::BigUint`, the same bignum representation the
//! teacher crate already builds on (`utils::primes`, `utils::encoding`).
//! `egcd`/`inv`/`powmod` are free functions over it rather than methods, so
//! that signed intermediate state (the extended Euclidean algorithm's `x`,
//! `y` coefficients) stays confined to this module.

use num_bigint::{BigInt, BigUint, ToBigInt, ToBigUint};
use num_traits::{One, Signed, Zero};

use crate::error::{Error, Result};

/// Non-negative arbitrary-precision integer; alias for the crate's single
/// bignum representation.
pub type BigUInt = BigUint;

/// Extended Euclidean descent: returns `(x, y, g)` such that
/// `x*a + y*b == g == gcd(|a|, |b|)`.
///
/// Ported from the tuple-recurrence form in `utils::primes::modular_inverse`,
/// generalized to return both Bezout coefficients instead of only the one
/// needed for inversion. `g` is always non-negative; `x` and `y` may be
/// negative.
pub fn egcd(a: &BigInt, b: &BigInt) -> (BigInt, BigInt, BigInt) {
    let (mut u0, mut u1, mut u2) = (BigInt::one(), BigInt::zero(), a.abs());
    let (mut v0, mut v1, mut v2) = (BigInt::zero(), BigInt::one(), b.abs());

    while !v2.is_zero() {
        let q = &u2 / &v2;
        let (t0, t1, t2) = (&u0 - &q * &v0, &u1 - &q * &v1, &u2 - &q * &v2);
        u0 = v0;
        u1 = v1;
        u2 = v2;
        v0 = t0;
        v1 = t1;
        v2 = t2;
    }

    (u0, u1, u2)
}

/// Inverse of `k` modulo `m`: the unique `r` in `[0, m)` with `k*r ≡ 1 (mod m)`.
pub fn inv(k: &BigUInt, m: &BigUInt) -> Result<BigUInt> {
    let k_int = k.to_bigint().expect("BigUint is always representable as BigInt");
    let m_int = m.to_bigint().expect("BigUint is always representable as BigInt");
    let (x, _y, g) = egcd(&k_int, &m_int);
    if g != BigInt::one() {
        return Err(Error::NotInvertible(format!("{}", k)));
    }

    let mut r = x % &m_int;
    if r.is_negative() {
        r += &m_int;
    }
    Ok(r.to_biguint().expect("non-negative by construction"))
}

/// `a^k mod m` via square-and-multiply, LSB to MSB.
pub fn powmod(a: &BigUInt, k: &BigUInt, m: &BigUInt) -> BigUInt {
    a.modpow(k, m)
}

/// `powmod` guarded against a negative exponent, which has no meaning for
/// modular exponentiation here. `num_bigint::BigUint` cannot itself
/// represent a negative exponent, so this exists for callers working from
/// a signed source (e.g. parsed CLI input); it is the direct analogue of
/// the source's `powexp` guard.
pub fn powmod_checked(a: &BigUInt, k: &BigInt, m: &BigUInt) -> Result<BigUInt> {
    if k.is_negative() {
        return Err(Error::NegativeExponent);
    }
    Ok(powmod(a, &k.to_biguint().expect("non-negative by construction"), m))
}

/// Shortest big-endian byte encoding of a non-negative integer; `0` encodes
/// as a single zero byte.
pub fn to_bytes_be(i: &BigUInt) -> Vec<u8> {
    if i.is_zero() {
        return vec![0];
    }
    i.to_bytes_be()
}

/// Inverse of [`to_bytes_be`].
pub fn from_bytes_be(bytes: &[u8]) -> BigUInt {
    BigUInt::from_bytes_be(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bu(n: u64) -> BigUInt {
        BigUInt::from(n)
    }

    #[test]
    fn byte_round_trip_is_identity() {
        for n in [0u64, 1, 2, 255, 256, 65536, u64::MAX] {
            let v = bu(n);
            let bytes = to_bytes_be(&v);
            assert_eq!(from_bytes_be(&bytes), v);
            let expected_len = if n == 0 {
                1
            } else {
                ((64 - n.leading_zeros()) as usize + 7) / 8
            };
            assert_eq!(bytes.len(), expected_len);
        }
    }

    #[test]
    fn inverse_is_correct_for_coprime_pairs() {
        let k = bu(17);
        let m = bu(3120);
        let r = inv(&k, &m).unwrap();
        assert_eq!((&k * &r) % &m, BigUInt::one());
    }

    #[test]
    fn inverse_fails_for_non_coprime_pairs() {
        assert!(inv(&bu(4), &bu(8)).is_err());
    }

    #[test]
    fn powmod_matches_textbook_rsa() {
        // 65^17 mod 3233 == 2790, per the classic textbook example.
        assert_eq!(powmod(&bu(65), &bu(17), &bu(3233)), bu(2790));
    }

    #[test]
    fn powmod_checked_rejects_negative_exponent() {
        let a = bu(5);
        let m = bu(11);
        assert!(powmod_checked(&a, &BigInt::from(-1), &m).is_err());
    }
}
