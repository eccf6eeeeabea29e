//! The RFC 8017 `RSAPrivateKey` tuple and the algebra that reconstructs it
//! from a modulus, a public exponent, and one secret prime.

use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::{One, Zero};

use crate::asn1::Asn1Node;
use crate::bignum::{self, BigUInt};
use crate::error::{Error, Result};

/// The nine-element PKCS#1 `RSAPrivateKey` sequence:
/// `[version, n, e, d, p, q, dp, dq, qinv]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsaPrivateKey {
    pub version: BigUInt,
    pub n: BigUInt,
    pub e: BigUInt,
    pub d: BigUInt,
    pub p: BigUInt,
    pub q: BigUInt,
    pub dp: BigUInt,
    pub dq: BigUInt,
    pub qinv: BigUInt,
}

impl RsaPrivateKey {
    /// Extracts `(n, e, p)` — the only three fields `regenerate-from-prime`
    /// and `extract-split` actually need — as elements `[1], [2], [4]` of
    /// the parsed sequence, per the source's `pk[1], pk[2], pk[4]`
    /// indexing, here done by field access instead of raw indexing.
    pub fn public_and_first_prime(&self) -> (&BigUInt, &BigUInt, &BigUInt) {
        (&self.n, &self.e, &self.p)
    }

    pub fn to_asn1(&self) -> Asn1Node {
        Asn1Node::Sequence(vec![
            Asn1Node::Integer(self.version.clone()),
            Asn1Node::Integer(self.n.clone()),
            Asn1Node::Integer(self.e.clone()),
            Asn1Node::Integer(self.d.clone()),
            Asn1Node::Integer(self.p.clone()),
            Asn1Node::Integer(self.q.clone()),
            Asn1Node::Integer(self.dp.clone()),
            Asn1Node::Integer(self.dq.clone()),
            Asn1Node::Integer(self.qinv.clone()),
        ])
    }

    pub fn from_asn1(node: &Asn1Node) -> Result<Self> {
        let items = match node {
            Asn1Node::Sequence(items) if items.len() == 9 => items,
            Asn1Node::Sequence(items) => {
                return Err(Error::BadArgs(format!(
                    "RSAPrivateKey sequence must have 9 elements, found {}",
                    items.len()
                )))
            }
            _ => return Err(Error::BadArgs("RSAPrivateKey must be a SEQUENCE".into())),
        };

        let mut ints = Vec::with_capacity(9);
        for item in items {
            match item {
                Asn1Node::Integer(i) => ints.push(i.clone()),
                _ => return Err(Error::BadArgs("RSAPrivateKey elements must all be INTEGER".into())),
            }
        }

        Ok(RsaPrivateKey {
            version: ints[0].clone(),
            n: ints[1].clone(),
            e: ints[2].clone(),
            d: ints[3].clone(),
            p: ints[4].clone(),
            q: ints[5].clone(),
            dp: ints[6].clone(),
            dq: ints[7].clone(),
            qinv: ints[8].clone(),
        })
    }
}

/// Given the public modulus `n`, public exponent `e`, and the first secret
/// prime `p`, reconstructs the full nine-element PKCS#1 private key.
///
/// Uses `(p-1)(q-1)` (Euler's totient), not `lcm(p-1, q-1)` (the
/// Carmichael function), to remain bit-for-bit compatible with the source
/// this crate is modeled on.
pub fn mkprivkey(n: &BigUInt, e: &BigUInt, p: &BigUInt) -> Result<RsaPrivateKey> {
    let (q, r) = n.div_rem(p);
    if !r.is_zero() {
        return Err(Error::PrimeMismatch);
    }

    let one = BigUint::one();
    let p1 = p - &one;
    let q1 = &q - &one;
    let totient = &p1 * &q1;

    let d = bignum::inv(e, &totient)?;
    let dp = bignum::inv(e, &p1)?;
    let dq = bignum::inv(e, &q1)?;
    let qinv = bignum::inv(&q, p)?;

    Ok(RsaPrivateKey {
        version: BigUInt::zero(),
        n: n.clone(),
        e: e.clone(),
        d,
        p: p.clone(),
        q,
        dp,
        dq,
        qinv,
    })
}

/// `(x^e mod n)^d mod n == x`. Requires `0 <= x < n`; returns `false`
/// rather than panicking when that precondition is violated, so the
/// function stays total.
pub fn testprivkey(x: &BigUInt, n: &BigUInt, e: &BigUInt, d: &BigUInt) -> bool {
    if x >= n {
        return false;
    }
    let c = bignum::powmod(x, e, n);
    &bignum::powmod(&c, d, n) == x
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bu(n: u64) -> BigUInt {
        BigUInt::from(n)
    }

    #[test]
    fn textbook_rsa_key_reconstructs_correctly() {
        let key = mkprivkey(&bu(3233), &bu(17), &bu(61)).unwrap();
        assert_eq!(key.version, bu(0));
        assert_eq!(key.n, bu(3233));
        assert_eq!(key.e, bu(17));
        assert_eq!(key.d, bu(2753));
        assert_eq!(key.p, bu(61));
        assert_eq!(key.q, bu(53));
        assert_eq!(key.dp, bu(53));
        assert_eq!(key.dq, bu(49));
        assert_eq!(key.qinv, bu(38));
    }

    #[test]
    fn testprivkey_accepts_valid_roundtrip() {
        let key = mkprivkey(&bu(3233), &bu(17), &bu(61)).unwrap();
        assert!(testprivkey(&bu(65), &key.n, &key.e, &key.d));
        assert!(testprivkey(&bu(123), &key.n, &key.e, &key.d));
    }

    #[test]
    fn mismatched_prime_is_rejected() {
        assert!(matches!(mkprivkey(&bu(3233), &bu(17), &bu(7)), Err(Error::PrimeMismatch)));
    }

    #[test]
    fn asn1_round_trip_preserves_all_nine_fields() {
        let key = mkprivkey(&bu(3233), &bu(17), &bu(61)).unwrap();
        let node = key.to_asn1();
        let parsed = RsaPrivateKey::from_asn1(&node).unwrap();
        assert_eq!(parsed, key);
    }
}
