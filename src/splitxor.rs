//! The split-key XOR protocol.
//!
//! The hex-ASCII representation of the first secret prime is combined with
//! two independent pads at caller-supplied offsets. XOR is its own
//! inverse, so the same underlying transform serves both the forward
//! (split) and reverse (reassemble) directions — `xor_bytes` is called
//! identically either way, which is what makes the forward/reverse pair an
//! involution by construction rather than by a separate proof.
//!
//! Every secret buffer this module touches is zeroized in place before it
//! is released, on both success and failure paths.

use zeroize::{Zeroize, Zeroizing};

use crate::error::{Error, Result};

/// Random pad material. `Zeroizing` ensures the backing bytes are
/// overwritten if the pad is ever dropped without an explicit zeroize
/// call (e.g. on an early `?` return).
pub type Pad = Zeroizing<Vec<u8>>;

/// A secret hex string — the plaintext hex of the first prime, or the
/// XOR output derived from it. Zeroized on drop for the same reason
/// `Pad` is.
pub type SecretHex = Zeroizing<String>;

/// Loads pad content per the two-phase detection rule: if the raw bytes
/// are valid ASCII and decode as an even-length hex string, the pad's
/// effective bytes are the unhexlified content; otherwise the bytes are
/// used verbatim as binary. Applied identically for both the forward and
/// reverse directions (the source's diverging behavior between
/// `convert.py` and `convert_revert.py` is a bug this crate does not
/// reproduce).
pub fn decode_pad(raw: &[u8]) -> Result<Pad> {
    if raw.is_ascii() {
        let trimmed = trim_ascii(raw);
        let decoded = hex::decode(trimmed)?;
        Ok(Zeroizing::new(decoded))
    } else {
        Ok(Zeroizing::new(raw.to_vec()))
    }
}

fn trim_ascii(raw: &[u8]) -> &[u8] {
    let start = raw.iter().position(|b| !b.is_ascii_whitespace()).unwrap_or(raw.len());
    let end = raw.iter().rposition(|b| !b.is_ascii_whitespace()).map_or(start, |i| i + 1);
    &raw[start..end]
}

fn check_disjoint(pad1: &Pad, pad2: &Pad) -> Result<()> {
    if pad1.as_slice() == pad2.as_slice() {
        return Err(Error::SamePad);
    }
    Ok(())
}

fn check_bounds(pad: &Pad, offset: usize, len: usize) -> Result<()> {
    if pad.len() < offset + len {
        return Err(Error::PadTooShort);
    }
    Ok(())
}

/// `out[i] = payload[i] ^ pad1[offset1+i] ^ pad2[offset2+i]`.
///
/// `payload`, `pad1`, and `pad2` are all zeroized in place before this
/// function returns, on both the success and the error paths: the
/// caller's own handles read back as all-zero.
pub fn xor_bytes(
    payload: &mut [u8],
    pad1: &mut Pad,
    offset1: usize,
    pad2: &mut Pad,
    offset2: usize,
) -> Result<Vec<u8>> {
    let result = (|| {
        check_disjoint(pad1, pad2)?;
        check_bounds(pad1, offset1, payload.len())?;
        check_bounds(pad2, offset2, payload.len())?;

        let mut out = vec![0u8; payload.len()];
        for i in 0..payload.len() {
            out[i] = payload[i] ^ pad1[offset1 + i] ^ pad2[offset2 + i];
        }
        Ok(out)
    })();

    payload.zeroize();
    pad1.zeroize();
    pad2.zeroize();

    result
}

/// Forward direction: `H = hex(p)` in, `hex(Y)` out.
pub fn split(
    prime_hex: &str,
    pad1: &mut Pad,
    offset1: usize,
    pad2: &mut Pad,
    offset2: usize,
) -> Result<SecretHex> {
    xor_hex(prime_hex, pad1, offset1, pad2, offset2)
}

/// Reverse direction: `hex(Y)` in, `H = hex(p)` out. Identical to [`split`]
/// because XOR is an involution; kept as a distinct name at the call site
/// for readability.
pub fn reassemble(
    xor_hex_in: &str,
    pad1: &mut Pad,
    offset1: usize,
    pad2: &mut Pad,
    offset2: usize,
) -> Result<SecretHex> {
    xor_hex(xor_hex_in, pad1, offset1, pad2, offset2)
}

fn xor_hex(
    input_hex: &str,
    pad1: &mut Pad,
    offset1: usize,
    pad2: &mut Pad,
    offset2: usize,
) -> Result<SecretHex> {
    let mut payload = hex::decode(input_hex.trim())?;
    let out = xor_bytes(&mut payload, pad1, offset1, pad2, offset2);
    payload.zeroize();
    let out = out?;
    let hex_out = Zeroizing::new(hex::encode(&out));
    let mut out = out;
    out.zeroize();
    Ok(hex_out)
}
