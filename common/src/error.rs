//! Error taxonomy for the baseband TX/RX chain
//!
//! One `thiserror`-derived enum shared by every stage of the chain.

use thiserror::Error;

/// Errors raised by the PHY signal chain.
///
/// Per-frame decode failures (bad SIGNAL parity, an unrecognised rate
/// nibble, an unrecoverable scrambler seed) are not part of this enum:
/// they are treated as "no payload for this frame," surfaced as `None`
/// from the call that detects them, not as a propagated error. This
/// enum covers the failures a caller must act on before a frame can even
/// be built or torn down.
#[derive(Error, Debug)]
pub enum PhyError {
    #[error("payload length {0} out of range (must satisfy 1 <= length < 4096)")]
    LengthOutOfRange(usize),

    #[error("unsupported rate: {0} Mb/s")]
    InvalidRate(u8),

    #[error("shape mismatch: expected {expected}, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },

    #[error("no scrambler seed in [1, 127] reproduced the received SERVICE prefix")]
    UnrecoverableScramblerSeed,
}
