//! `keyregen`
//!
//! Reads a PEM or DER private key on standard input, discards everything
//! but `(n, e, p)`, and writes a freshly rebuilt PEM private key to
//! standard output. Takes no pad arguments — there is no split/reassemble
//! step in this flow.

use std::process::ExitCode;

use rsa_keysplit::cli::read_stdin_to_end;
use rsa_keysplit::config::PipelineConfig;
use rsa_keysplit::pipeline::regenerate_from_prime;

fn main() -> ExitCode {
    env_logger::init();

    match run() {
        Ok(output) => {
            print!("{}", output);
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("keyregen: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn run() -> rsa_keysplit::Result<String> {
    let input = read_stdin_to_end()?;
    let config = PipelineConfig::default();
    regenerate_from_prime(&input, &config)
}
