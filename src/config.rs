//! Immutable pipeline configuration.
//!
//! The source this crate is modeled on keeps two module-level mutable
//! flags, `debug` and `maxpubkeyfilesize`. Both are folded into a single
//! value here and threaded explicitly into the pipeline drivers instead of
//! read from global state.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Mirrors the source's `maxpubkeyfilesize`; public-key reading is out
    /// of scope for this crate (see `asn1::ASN1Node`), so this bound is
    /// carried for parity but not currently consulted by any pipeline.
    pub max_pubkey_file_size: usize,
    /// Emits extra `log::debug!` tracing of TLV reads, mirroring the
    /// source's `debug` flag.
    pub verbose: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        PipelineConfig {
            max_pubkey_file_size: 16384,
            verbose: false,
        }
    }
}
