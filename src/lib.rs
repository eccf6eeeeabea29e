//! Split-custody backup and reassembly of RSA private keys.
//!
//! A key owner holds a full RSA private key; two custodians each hold an
//! independent random pad. The first secret prime is XORed against both
//! pads at caller-supplied offsets so that neither custodian alone can
//! recover it. This crate is the offline data-plane that makes the scheme
//! work: bignum arithmetic, an ASN.1 DER/PEM codec for PKCS#1 RSA private
//! keys, the algebra that reconstructs a full key from `(n, e, p)`, and the
//! XOR split/reassemble protocol itself.
//!
//! Subprocess orchestration (stripping or applying passphrase encryption
//! via an external TLS toolkit) and CLI argument parsing are deliberately
//! left to the binaries in `src/bin/`; this library is the pure data-plane.

pub mod bignum;
pub mod error;
pub mod config;
pub mod asn1;
pub mod key;
pub mod splitxor;
pub mod pipeline;
pub mod cli;

pub use error::{Error, Result};
