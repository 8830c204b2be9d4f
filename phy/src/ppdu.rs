//! PPDU DATA field layout and bit-buffer assembly
//!
//! Computes the per-frame symbol count from (rate, payload length) and
//! builds/tears down the SERVICE + PSDU + TAIL + PAD bit buffer that
//! the scrambler, encoder, and interleaver operate on.

use crate::rates::RateParameters;
use crate::scrambler::Scrambler;
use common::bits;

pub const SERVICE_BITS: usize = 16;
pub const TAIL_BITS: usize = 6;

/// Per-frame DATA field sizing, determined entirely by (rate, length).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub n_sym: usize,
    pub n_data: usize,
    pub n_pad: usize,
}

pub fn compute_layout(rate: RateParameters, payload_len: usize) -> Layout {
    let payload_bits = SERVICE_BITS + 8 * payload_len + TAIL_BITS;
    let n_sym = payload_bits.div_ceil(rate.n_dbps);
    let n_data = n_sym * rate.n_dbps;
    let n_pad = n_data - payload_bits;
    Layout { n_sym, n_data, n_pad }
}

/// Build the scrambled `n_data`-bit DATA buffer: 16 zero SERVICE bits,
/// the payload (byte j's bit i at position `16 + 8j + i`, LSB first),
/// 6 zero TAIL bits, and zero PAD, scrambled end to end with
/// `scrambler_seed` and then re-zeroed over the TAIL region so the
/// convolutional encoder still terminates at state 0.
pub fn build_data_bits(payload: &[u8], layout: Layout, scrambler_seed: u8) -> Vec<bool> {
    let mut buf = vec![false; layout.n_data];

    let payload_bits = bits::unpack(payload, 8);
    buf[SERVICE_BITS..SERVICE_BITS + payload_bits.len()].copy_from_slice(&payload_bits);
    // TAIL and PAD regions are already zero.

    let mut scrambler = Scrambler::new(scrambler_seed);
    scrambler.apply(&mut buf);

    let tail_start = layout.n_data - layout.n_pad - TAIL_BITS;
    for bit in &mut buf[tail_start..tail_start + TAIL_BITS] {
        *bit = false;
    }

    buf
}

/// Undo [`build_data_bits`]: recover the scrambler seed from the
/// SERVICE prefix, descramble, zero the TAIL region, and extract the
/// PSDU bytes.
pub fn extract_payload(data_bits: &[bool], layout: Layout, payload_len: usize) -> Option<Vec<u8>> {
    assert_eq!(data_bits.len(), layout.n_data);

    let mut prefix = [false; crate::scrambler::SCRAMBLER_PREFIX_BITS];
    prefix.copy_from_slice(&data_bits[0..crate::scrambler::SCRAMBLER_PREFIX_BITS]);
    let seed = crate::scrambler::recover_seed(&prefix)?;

    let mut descrambled = data_bits.to_vec();
    let mut scrambler = Scrambler::new(seed);
    scrambler.apply(&mut descrambled);

    let tail_start = layout.n_data - layout.n_pad - TAIL_BITS;
    for bit in &mut descrambled[tail_start..tail_start + TAIL_BITS] {
        *bit = false;
    }

    let psdu_bits = &descrambled[SERVICE_BITS..SERVICE_BITS + 8 * payload_len];
    Some(bits::pack(psdu_bits, 8))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rates::rate_parameters;

    #[test]
    fn layout_matches_the_defining_formulas() {
        let rate = rate_parameters(6).unwrap();
        let layout = compute_layout(rate, 32);
        let payload_bits = SERVICE_BITS + 8 * 32 + TAIL_BITS;
        assert_eq!(layout.n_data, layout.n_sym * rate.n_dbps);
        assert_eq!(layout.n_pad, layout.n_data - payload_bits);
        assert!(layout.n_pad < rate.n_dbps);
    }

    #[test]
    fn build_and_extract_round_trip() {
        let rate = rate_parameters(24).unwrap();
        let payload: Vec<u8> = (0..20u8).collect();
        let layout = compute_layout(rate, payload.len());

        let bits = build_data_bits(&payload, layout, 73);
        let recovered = extract_payload(&bits, layout, payload.len()).unwrap();
        assert_eq!(recovered, payload);
    }

    #[test]
    fn tail_region_is_always_zero_after_scrambling() {
        let rate = rate_parameters(54).unwrap();
        let payload = vec![0xFFu8; 10];
        let layout = compute_layout(rate, payload.len());
        let bits = build_data_bits(&payload, layout, 5);
        let tail_start = layout.n_data - layout.n_pad - TAIL_BITS;
        assert!(bits[tail_start..tail_start + TAIL_BITS].iter().all(|&b| !b));
    }
}
