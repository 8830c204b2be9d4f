//! RX orchestrator
//!
//! Accepts a complex baseband sample vector (preamble, SIGNAL symbol,
//! DATA symbols back to back) and recovers the original payload bytes,
//! or reports nothing if the frame fails to decode.

use crate::rates::rate_parameters;
use crate::{cfo, interleave, modulate, ofdm, ppdu, puncture, signal, viterbi};
use num_complex::Complex64;
use tracing::{debug, info, warn};

const SHORT_TRAINING_LEN: usize = 160;
const LONG_TRAINING_LEN: usize = 160;
const LONG_TRAINING_PREFIX: usize = 32;
const PREAMBLE_LEN: usize = SHORT_TRAINING_LEN + LONG_TRAINING_LEN;

/// Decode one PPDU. Returns `None` if there are not enough samples for
/// a preamble and SIGNAL symbol, if SIGNAL fails to decode (bad parity
/// or unrecognised rate), or if the scrambler seed cannot be recovered
/// from the SERVICE prefix.
pub fn receive(samples: &[Complex64]) -> Option<Vec<u8>> {
    if samples.len() < PREAMBLE_LEN + ofdm::SYMBOL_LEN {
        warn!(len = samples.len(), "too few samples for preamble + SIGNAL");
        return None;
    }

    let mut buf = samples.to_vec();

    // Coarse CFO from the short training sequence, corrected across the
    // whole buffer so the sample index used here stays the absolute
    // index used by every later correction pass.
    let phi_coarse = cfo::estimate_coarse(&buf[0..SHORT_TRAINING_LEN]);
    cfo::correct(&mut buf, phi_coarse);
    debug!(phi_coarse, "coarse CFO corrected");

    // Fine CFO from the long training sequence's two 64-sample copies
    // (its 32-sample cyclic prefix excluded).
    let long_start = SHORT_TRAINING_LEN;
    let long_body_start = long_start + LONG_TRAINING_PREFIX;
    let phi_fine = cfo::estimate_fine(&buf[long_body_start..long_start + LONG_TRAINING_LEN]);
    cfo::correct(&mut buf, phi_fine);
    debug!(phi_fine, "fine CFO corrected");

    let signal_start = PREAMBLE_LEN;
    let signal_symbol = &buf[signal_start..signal_start + ofdm::SYMBOL_LEN];
    let parsed_signal = signal::decode(signal_symbol)?;
    info!(
        rate_mbps = parsed_signal.rate_mbps,
        length = parsed_signal.length,
        "SIGNAL decoded"
    );

    let rate = rate_parameters(parsed_signal.rate_mbps).ok()?;
    let layout = ppdu::compute_layout(rate, parsed_signal.length as usize);

    let data_start = signal_start + ofdm::SYMBOL_LEN;
    let data_end = data_start + layout.n_sym * ofdm::SYMBOL_LEN;
    if buf.len() < data_end {
        warn!(
            have = buf.len(),
            need = data_end,
            "too few samples for the declared number of DATA symbols"
        );
        return None;
    }

    let mut punctured = Vec::with_capacity(layout.n_sym * rate.n_cbps);
    for sym in buf[data_start..data_end].chunks(ofdm::SYMBOL_LEN) {
        let demodulated = ofdm::demodulate_symbol(sym);
        let mut demapped = Vec::with_capacity(rate.n_cbps);
        for value in demodulated {
            demapped.extend(modulate::demap(value, rate.modulation));
        }
        punctured.extend(interleave::deinterleave(&demapped, rate.n_cbps, rate.n_bpsc));
    }

    let (depunctured, valid_mask) = puncture::depuncture(&punctured, rate.coding_rate);
    let data_bits = viterbi::decode(&depunctured, &valid_mask, layout.n_data)?;

    let payload = ppdu::extract_payload(&data_bits, layout, parsed_signal.length as usize)?;
    info!(payload_len = payload.len(), "PPDU decoded");
    Some(payload)
}
