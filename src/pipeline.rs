//! The three end-to-end flows that compose the core components:
//! `regenerate-from-prime`, `extract-split`, and `reassemble`.
//!
//! Each driver is a pure function over byte buffers — no file handles, no
//! subprocesses — so the binaries in `src/bin/` stay thin I/O shims and
//! these flows are directly unit-testable. The external TLS-toolkit
//! collaborator (stripping/applying PEM passphrase encryption) is outside
//! this crate's scope; callers are expected to have already decrypted
//! their input and to re-encrypt the unencrypted PEM this crate emits, if
//! they need to, with their own tooling.

use num_bigint::BigUint;
use num_traits::Num;

use crate::asn1::{self, pem::PemFrame};
use crate::bignum;
use crate::config::PipelineConfig;
use crate::error::{Error, Result};
use crate::key::{mkprivkey, RsaPrivateKey};
use crate::splitxor::{self, Pad};

const PRIVATE_KEY_LABEL: &str = "RSA PRIVATE KEY";
const PEM_BEGIN_MARKER: &[u8] = b"-----BEGIN ";

/// Accepts either a PEM-framed key or raw DER, mirroring the source's
/// `tryifpem`: PEM framing is only attempted when the literal
/// `-----BEGIN ` prefix is present.
fn decode_der(input: &[u8], config: &PipelineConfig) -> Result<Vec<u8>> {
    if input.starts_with(PEM_BEGIN_MARKER) {
        let frame = asn1::pem::decode(input)?;
        if config.verbose {
            log::debug!("pipeline: decoded PEM frame labeled '{}'", frame.label);
        }
        Ok(frame.body)
    } else {
        Ok(input.to_vec())
    }
}

fn parse_private_key(input: &[u8], config: &PipelineConfig) -> Result<RsaPrivateKey> {
    let der = decode_der(input, config)?;
    let node = asn1::parse(&der, config)?;
    RsaPrivateKey::from_asn1(&node)
}

/// `regenerate-from-prime`: read an unencrypted PEM/DER private key,
/// discard everything but `(n, e, p)`, and rebuild the remaining six CRT
/// parameters from scratch.
pub fn regenerate_from_prime(input: &[u8], config: &PipelineConfig) -> Result<String> {
    let key = parse_private_key(input, config)?;
    let (n, e, p) = key.public_and_first_prime();
    let rebuilt = mkprivkey(n, e, p)?;

    let der = asn1::write(&rebuilt.to_asn1())?;
    Ok(asn1::pem::encode(&PemFrame { label: PRIVATE_KEY_LABEL.to_string(), body: der }))
}

/// `extract-split`: read a private key, split its first prime across two
/// pads, and produce the three-line intermediate text format.
pub fn extract_split(
    input: &[u8],
    config: &PipelineConfig,
    pad1: &mut Pad,
    offset1: usize,
    pad2: &mut Pad,
    offset2: usize,
) -> Result<String> {
    let key = parse_private_key(input, config)?;
    let (n, e, p) = key.public_and_first_prime();

    let p_hex = hex::encode(bignum::to_bytes_be(p));
    let xor_hex = splitxor::split(&p_hex, pad1, offset1, pad2, offset2)?;

    Ok(format_intermediate(n, e, &xor_hex))
}

/// `reassemble`: parse the three-line intermediate format, XOR the third
/// line's payload back against the same two pads, and reconstruct and
/// PEM-frame the full private key.
pub fn reassemble(
    intermediate: &str,
    pad1: &mut Pad,
    offset1: usize,
    pad2: &mut Pad,
    offset2: usize,
) -> Result<String> {
    let (n, e, xor_hex) = parse_intermediate(intermediate)?;
    let p_hex = splitxor::reassemble(&xor_hex, pad1, offset1, pad2, offset2)?;
    let p = BigUint::from_str_radix(p_hex.trim(), 16).map_err(|_| Error::BadArgs("p1 is not valid hex".into()))?;

    let key = mkprivkey(&n, &e, &p)?;
    let der = asn1::write(&key.to_asn1())?;
    Ok(asn1::pem::encode(&PemFrame { label: PRIVATE_KEY_LABEL.to_string(), body: der }))
}

/// Formats `mod=<hex>`, `exp=<dec>`, ` p1=<hex>` — the leading space on
/// the third line is literal, preserved from the source's accidental
/// `"mod=%x\nexp=%d\n p1=%x\n"` format string, where it keeps all three
/// prefixes a uniform four characters wide for fixed-offset parsing.
fn format_intermediate(n: &BigUint, e: &BigUint, xor_hex: &str) -> String {
    format!("mod={}\nexp={}\n p1={}\n", n.to_str_radix(16), e.to_str_radix(10), xor_hex)
}

fn parse_intermediate(text: &str) -> Result<(BigUint, BigUint, String)> {
    let mut mod_hex = None;
    let mut exp_dec = None;
    let mut p1_hex = None;

    for line in text.lines() {
        let line = line.trim();
        if let Some(rest) = line.strip_prefix("mod=") {
            mod_hex = Some(rest.to_string());
        } else if let Some(rest) = line.strip_prefix("exp=") {
            exp_dec = Some(rest.to_string());
        } else if let Some(rest) = line.strip_prefix("p1=") {
            p1_hex = Some(rest.to_string());
        }
    }

    let mod_hex = mod_hex.ok_or_else(|| Error::BadArgs("missing 'mod=' line".into()))?;
    let exp_dec = exp_dec.ok_or_else(|| Error::BadArgs("missing 'exp=' line".into()))?;
    let p1_hex = p1_hex.ok_or_else(|| Error::BadArgs("missing 'p1=' line".into()))?;

    let n = BigUint::from_str_radix(&mod_hex, 16).map_err(|_| Error::BadArgs("mod is not valid hex".into()))?;
    let e = BigUint::from_str_radix(&exp_dec, 10).map_err(|_| Error::BadArgs("exp is not valid decimal".into()))?;

    Ok((n, e, p1_hex))
}
