//! `keysplit <pad1-file> <offset1> [<pad2-file> <offset2>]`
//!
//! Reads a PEM private key on standard input, splits its first prime
//! across the two pads, and writes the three-line intermediate format to
//! standard output.

use std::process::ExitCode;

use rsa_keysplit::cli::{parse_pad_args, read_stdin_to_end};
use rsa_keysplit::config::PipelineConfig;
use rsa_keysplit::pipeline::extract_split;

fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    match run(&args) {
        Ok(output) => {
            print!("{}", output);
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("keysplit: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &[String]) -> rsa_keysplit::Result<String> {
    let mut pad_args = parse_pad_args(args)?;
    let key_input = read_stdin_to_end()?;
    let config = PipelineConfig::default();

    extract_split(
        &key_input,
        &config,
        &mut pad_args.pad1,
        pad_args.offset1,
        &mut pad_args.pad2,
        pad_args.offset2,
    )
}
