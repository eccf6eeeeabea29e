//! `keymerge <pad1-file> <offset1> [<pad2-file> <offset2>]`
//!
//! Reads the three-line intermediate format on standard input, reverses
//! the split against the two pads, and writes the reconstructed PEM
//! private key to standard output.

use std::process::ExitCode;

use rsa_keysplit::cli::{parse_pad_args, read_stdin_to_end};
use rsa_keysplit::pipeline::reassemble;

fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    match run(&args) {
        Ok(output) => {
            print!("{}", output);
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("keymerge: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &[String]) -> rsa_keysplit::Result<String> {
    let mut pad_args = parse_pad_args(args)?;
    let intermediate_bytes = read_stdin_to_end()?;
    let intermediate = String::from_utf8(intermediate_bytes)
        .map_err(|_| rsa_keysplit::Error::BadArgs("intermediate input is not valid UTF-8".into()))?;

    reassemble(
        &intermediate,
        &mut pad_args.pad1,
        pad_args.offset1,
        &mut pad_args.pad2,
        pad_args.offset2,
    )
}
