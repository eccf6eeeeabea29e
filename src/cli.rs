//! Shared argument and pad-file handling for the three binaries in
//! `src/bin/`. Kept separate from `pipeline`, which stays pure over byte
//! buffers; this module is where the actual file handles and stdin live.

use std::fs;
use std::io::{BufRead, Read};

use crate::error::{Error, Result};
use crate::splitxor::{self, Pad};

/// The two binaries that take pad arguments (`keysplit`, `keymerge`)
/// share the same shape: `<pad1-file> <offset1> [<pad2-file> <offset2>]`.
/// With three arguments, pad2 is read from standard input as one
/// hex-ASCII line and offset2 defaults to 0.
pub struct PadArgs {
    pub pad1: Pad,
    pub offset1: usize,
    pub pad2: Pad,
    pub offset2: usize,
}

/// `args` excludes argv\[0\] (the program name).
pub fn parse_pad_args(args: &[String]) -> Result<PadArgs> {
    match args {
        [pad1_path, offset1] => {
            let offset1 = parse_offset(offset1)?;
            let pad1 = load_pad_file(pad1_path)?;
            let pad2 = load_pad_from_stdin()?;
            Ok(PadArgs { pad1, offset1, pad2, offset2: 0 })
        }
        [pad1_path, offset1, pad2_path, offset2] => {
            let offset1 = parse_offset(offset1)?;
            let offset2 = parse_offset(offset2)?;
            let pad1 = load_pad_file(pad1_path)?;
            let pad2 = load_pad_file(pad2_path)?;
            Ok(PadArgs { pad1, offset1, pad2, offset2 })
        }
        _ => Err(Error::BadArgs(format!(
            "expected '<pad1-file> <offset1> [<pad2-file> <offset2>]', got {} argument(s)",
            args.len()
        ))),
    }
}

fn parse_offset(raw: &str) -> Result<usize> {
    raw.parse::<usize>()
        .map_err(|_| Error::BadArgs(format!("'{}' is not a valid offset", raw)))
}

fn load_pad_file(path: &str) -> Result<Pad> {
    let raw = fs::read(path)?;
    splitxor::decode_pad(&raw)
}

fn load_pad_from_stdin() -> Result<Pad> {
    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    splitxor::decode_pad(line.trim_end_matches('\n').as_bytes())
}

/// Reads everything from standard input, used by all three binaries to
/// pick up their primary payload (a PEM key or the intermediate format).
pub fn read_stdin_to_end() -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    std::io::stdin().read_to_end(&mut buf)?;
    Ok(buf)
}
