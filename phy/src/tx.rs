//! TX orchestrator
//!
//! Accepts a byte payload and a rate, and produces the complex baseband
//! sample vector for the whole PPDU: preamble, SIGNAL symbol, DATA
//! symbols, back to back with no gaps.

use crate::rates::rate_parameters;
use crate::{conv, interleave, modulate, ofdm, ppdu, puncture, scrambler, signal, training};
use common::PhyError;
use num_complex::Complex64;
use rand::Rng;
use tracing::{debug, info};

/// One transmitted PPDU: preamble + SIGNAL + DATA, as a single
/// contiguous complex sample stream.
pub fn transmit(payload: &[u8], rate_mbps: u8, scrambler_seed: Option<u8>) -> Result<Vec<Complex64>, PhyError> {
    if payload.is_empty() || payload.len() >= 4096 {
        return Err(PhyError::LengthOutOfRange(payload.len()));
    }
    let rate = rate_parameters(rate_mbps)?;

    let seed = scrambler_seed.unwrap_or_else(|| rand::thread_rng().gen_range(1..=127));
    info!(rate_mbps, payload_len = payload.len(), seed, "assembling PPDU");

    let mut samples = Vec::new();
    samples.extend(training::short_training());
    samples.extend(training::long_training());

    let signal_field = signal::Signal {
        rate_mbps,
        length: payload.len() as u16,
    };
    samples.extend(signal::encode(signal_field));

    let layout = ppdu::compute_layout(rate, payload.len());
    debug!(
        n_sym = layout.n_sym,
        n_data = layout.n_data,
        n_pad = layout.n_pad,
        "DATA field layout"
    );

    let data_bits = ppdu::build_data_bits(payload, layout, seed);
    let coded = conv::encode(&data_bits);
    let punctured = puncture::puncture(&coded, rate.coding_rate);

    assert_eq!(
        punctured.len(),
        layout.n_sym * rate.n_cbps,
        "punctured stream must split evenly into N_SYM symbols of N_CBPS bits"
    );

    let mut pilot_scrambler = scrambler::Scrambler::new(127);
    for (sym_idx, chunk) in punctured.chunks(rate.n_cbps).enumerate() {
        let interleaved = interleave::interleave(chunk, rate.n_cbps, rate.n_bpsc);

        let mut data = [Complex64::new(0.0, 0.0); ofdm::NUM_DATA_SUBCARRIERS];
        for (value, bits) in data.iter_mut().zip(interleaved.chunks(rate.n_bpsc)) {
            *value = modulate::map(bits, rate.modulation);
        }

        let mut polarity_bit = [false];
        pilot_scrambler.apply(&mut polarity_bit);
        let polarity = if polarity_bit[0] { -1.0 } else { 1.0 };

        debug!(sym_idx, polarity, "modulating DATA symbol");
        samples.extend(ofdm::modulate_symbol(&data, polarity));
    }

    Ok(samples)
}
