//! 802.11a baseband TX/RX signal-processing chain
//!
//! One module per pipeline stage, leaves first: rate parameters,
//! scrambling, convolutional coding, puncturing, interleaving,
//! subcarrier mapping, OFDM framing and training, SIGNAL coding, PPDU
//! assembly, Viterbi decoding, and the TX/RX orchestrators that wire
//! them into a full transmit/receive pair.

pub mod cfo;
pub mod conv;
pub mod interleave;
pub mod modulate;
pub mod ofdm;
pub mod ppdu;
pub mod puncture;
pub mod rates;
pub mod rx;
pub mod scrambler;
pub mod signal;
pub mod training;
pub mod tx;
pub mod viterbi;

pub use rx::receive;
pub use tx::transmit;
