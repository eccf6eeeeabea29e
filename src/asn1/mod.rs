//! A minimal recursive-descent DER codec: just enough of ASN.1 to read and
//! write RFC 8017 `RSAPrivateKey` sequences (and anything built from the
//! same small primitive set: SEQUENCE, INTEGER, OID, NULL, BIT STRING).
//!
//! This replaces the source's dynamic type-name dispatch (`type(y).__name__
//! == 'int' | 'list' | 'long'`) with a tagged sum: the writer pattern-matches
//! a variant instead of a runtime type name, and callers extract `(n, e, p)`
//! by pattern matching instead of unchecked list indexing.

pub mod pem;

use num_bigint::BigUint;

use crate::bignum::{self, BigUInt};
use crate::config::PipelineConfig;
use crate::error::{Error, Result};

/// A parsed DER node. `Unknown` records tags the reader doesn't need to
/// fully understand — it skips the value but keeps enough to describe
/// what was skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Asn1Node {
    Integer(BigUInt),
    Sequence(Vec<Asn1Node>),
    Oid(Vec<u64>),
    /// `(value, pad_bits)`; `value` is already shifted right by `pad_bits`.
    BitString(BigUInt, u8),
    Null,
    Unknown { tag: u8, raw_length: usize },
}

/// Parses a full DER buffer as a single top-level TLV. `config.verbose`
/// gates per-TLV tracing (tag, length, and decoded integers), mirroring
/// the source's `debug`-gated tracing inside `readtlvasn1`/`readintvasn1`.
pub fn parse(bytes: &[u8], config: &PipelineConfig) -> Result<Asn1Node> {
    let (node, offs) = read_tlv(bytes, 0, bytes.len(), config)?;
    if offs < bytes.len() {
        log::warn!(
            "asn1: {} trailing byte(s) after the top-level value were ignored",
            bytes.len() - offs
        );
    }
    Ok(node)
}

/// Reads one TLV starting at `offs`, bounded by the enclosing container's
/// end `size`. Returns the node and the offset just past its value.
fn read_tlv(bytes: &[u8], offs: usize, size: usize, config: &PipelineConfig) -> Result<(Asn1Node, usize)> {
    if offs + 2 > size {
        return Err(Error::TruncatedInput { offset: offs });
    }

    let tag = bytes[offs];
    let mut offs = offs + 1;
    let first_len = bytes[offs];
    offs += 1;

    let len = if first_len & 0x80 != 0 {
        let nbytes = (first_len & 0x7f) as usize;
        if nbytes == 0 {
            // Indefinite-length form; not supported by this reader.
            return Err(Error::OverLongLength);
        }
        if offs + nbytes > size {
            return Err(Error::TruncatedInput { offset: offs });
        }
        let mut len = 0usize;
        for _ in 0..nbytes {
            len = (len << 8) | bytes[offs] as usize;
            offs += 1;
        }
        len
    } else {
        first_len as usize
    };

    if config.verbose {
        log::debug!("asn1: read_tlv tag={:#04x} length={} offset={}", tag, len, offs);
    }

    if offs + len > size {
        return Err(Error::OverLongLength);
    }
    let value_end = offs + len;

    let node = match tag {
        0x30 => read_sequence(bytes, offs, value_end, config)?,
        0x02 => Asn1Node::Integer(read_integer(bytes, offs, value_end, config)),
        0x06 => Asn1Node::Oid(read_oid(bytes, offs, value_end)),
        0x05 => {
            if len != 0 {
                log::warn!("asn1: NULL with non-empty value ({} bytes) at offset {}", len, offs);
            }
            Asn1Node::Null
        }
        0x03 => read_bitstring(bytes, offs, value_end)?,
        other => {
            log::warn!("asn1: skipping unrecognised tag {:#04x} at offset {}", other, offs);
            Asn1Node::Unknown { tag: other, raw_length: len }
        }
    };

    Ok((node, value_end))
}

fn read_sequence(bytes: &[u8], offs: usize, end: usize, config: &PipelineConfig) -> Result<Asn1Node> {
    let mut children = Vec::new();
    let mut o = offs;
    while o < end {
        let (child, next) = read_tlv(bytes, o, end, config)?;
        children.push(child);
        o = next;
    }
    if o > end {
        return Err(Error::OverLongLength);
    }
    if o < end {
        log::warn!(
            "asn1: sequence under-read by {} byte(s) at offset {}, resyncing to declared end",
            end - o,
            offs
        );
    }
    Ok(Asn1Node::Sequence(children))
}

fn read_integer(bytes: &[u8], offs: usize, end: usize, config: &PipelineConfig) -> BigUInt {
    let value = BigUInt::from_bytes_be(&bytes[offs..end]);
    if config.verbose {
        log::debug!("asn1: read_integer <= {}", value);
    }
    value
}

fn read_oid(bytes: &[u8], offs: usize, end: usize) -> Vec<u64> {
    let mut arcs = Vec::new();
    let mut i = offs;
    let mut first = true;
    while i < end {
        let mut val: u64 = 0;
        loop {
            let b = bytes[i];
            i += 1;
            val = (val << 7) | (b & 0x7f) as u64;
            if b & 0x80 == 0 {
                break;
            }
        }
        if first {
            let first_arc = if val < 40 {
                0
            } else if val < 80 {
                1
            } else {
                2
            };
            arcs.push(first_arc);
            arcs.push(val - first_arc * 40);
            first = false;
        } else {
            arcs.push(val);
        }
    }
    arcs
}

fn read_bitstring(bytes: &[u8], offs: usize, end: usize) -> Result<Asn1Node> {
    if end - offs < 1 {
        return Err(Error::BadPadding("bit string missing pad-count byte".into()));
    }
    let pad = bytes[offs];
    if pad > 7 {
        return Err(Error::BadPadding(format!("pad count {} exceeds 7", pad)));
    }
    let value = BigUInt::from_bytes_be(&bytes[offs + 1..end]);
    let pad_bits = pad as usize;
    if pad_bits > 0 {
        let mask = (BigUInt::from(1u8) << pad_bits) - BigUInt::from(1u8);
        if &value & &mask != BigUInt::from(0u8) {
            return Err(Error::BadPadding("nonzero padding bits in bit string".into()));
        }
    }
    Ok(Asn1Node::BitString(value >> pad_bits, pad))
}

/// Serializes a node built from `Integer`/`Sequence` only — the two DER
/// shapes this crate ever needs to write (an `RSAPrivateKey` is a
/// SEQUENCE of nine INTEGERs).
pub fn write(node: &Asn1Node) -> Result<Vec<u8>> {
    match node {
        Asn1Node::Integer(i) => Ok(write_integer(i)),
        Asn1Node::Sequence(children) => {
            let mut body = Vec::new();
            for child in children {
                body.extend(write(child)?);
            }
            Ok(write_tlv(0x30, &body))
        }
        _ => Err(Error::BadArgs(
            "asn1 writer only supports INTEGER and SEQUENCE nodes".into(),
        )),
    }
}

fn write_integer(i: &BigUInt) -> Vec<u8> {
    let m = bignum::to_bytes_be(i);
    let mut body = Vec::with_capacity(m.len() + 1);
    if m[0] & 0x80 != 0 {
        body.push(0);
    }
    body.extend_from_slice(&m);
    write_tlv(0x02, &body)
}

fn write_tlv(tag: u8, body: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(body.len() + 6);
    out.push(tag);
    out.extend(write_length(body.len()));
    out.extend_from_slice(body);
    out
}

fn write_length(len: usize) -> Vec<u8> {
    if len < 0x80 {
        return vec![len as u8];
    }
    let be = bignum::to_bytes_be(&BigUInt::from(len as u64));
    let mut out = Vec::with_capacity(be.len() + 1);
    out.push(0x80 | be.len() as u8);
    out.extend(be);
    out
}
