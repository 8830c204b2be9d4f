//! SIGNAL field encode/decode
//!
//! 24 bits describing the rate and length of the DATA field that
//! follows, carried as its own BPSK, R=1/2 OFDM symbol so it can always
//! be decoded before the receiver knows the rate of anything else.

use crate::rates::{nibble_to_rate, rate_parameters};
use crate::{conv, interleave, modulate, ofdm, viterbi};
use num_complex::Complex64;

pub const SIGNAL_BITS: usize = 24;

/// A decoded (or to-be-encoded) SIGNAL field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Signal {
    pub rate_mbps: u8,
    pub length: u16,
}

/// Build the 24 raw SIGNAL bits (bit 0 first): rate nibble, reserved
/// bit, 12-bit little-endian length, even parity, 6 zero tail bits.
fn raw_bits(signal: Signal) -> [bool; SIGNAL_BITS] {
    let rate = rate_parameters(signal.rate_mbps).expect("caller supplies a valid rate");
    let mut bits = [false; SIGNAL_BITS];

    for i in 0..4 {
        bits[i] = (rate.signal_nibble >> i) & 1 != 0;
    }
    // bit 4 reserved, stays false
    for i in 0..12 {
        bits[5 + i] = (signal.length >> i) & 1 != 0;
    }
    let parity = bits[0..17].iter().fold(false, |acc, &b| acc ^ b);
    bits[17] = parity;
    // bits 18..24 tail, stay false

    bits
}

/// Encode a SIGNAL field into its one 80-sample OFDM symbol.
pub fn encode(signal: Signal) -> Vec<Complex64> {
    let bits = raw_bits(signal);
    let coded = conv::encode(&bits);
    let interleaved = interleave::interleave(&coded, 48, 1);

    let mut data = [Complex64::new(0.0, 0.0); ofdm::NUM_DATA_SUBCARRIERS];
    for (i, chunk) in interleaved.chunks(1).enumerate() {
        data[i] = modulate::map(chunk, crate::rates::Modulation::Bpsk);
    }

    ofdm::modulate_symbol(&data, 1.0)
}

/// Decode a received SIGNAL OFDM symbol. Returns `None` on a parity
/// mismatch or an unrecognised rate nibble; these conditions abort the
/// frame rather than propagate as an error.
pub fn decode(symbol: &[Complex64]) -> Option<Signal> {
    let data = ofdm::demodulate_symbol(symbol);

    let mut demapped = Vec::with_capacity(ofdm::NUM_DATA_SUBCARRIERS);
    for &sym in data.iter() {
        demapped.extend(modulate::demap(sym, crate::rates::Modulation::Bpsk));
    }

    let deinterleaved = interleave::deinterleave(&demapped, 48, 1);
    let valid_mask = vec![true; deinterleaved.len()];
    let decoded = viterbi::decode(&deinterleaved, &valid_mask, SIGNAL_BITS);

    let bits = decoded?;
    if bits.len() != SIGNAL_BITS {
        return None;
    }

    let nibble = (0..4).fold(0u8, |acc, i| acc | ((bits[i] as u8) << i));
    let rate_mbps = nibble_to_rate(nibble)?;

    let length = (0..12).fold(0u16, |acc, i| acc | ((bits[5 + i] as u16) << i));

    let parity = bits[0..17].iter().fold(false, |acc, &b| acc ^ b);
    if parity != bits[17] {
        return None;
    }

    Some(Signal { rate_mbps, length })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_for_every_rate_and_a_spread_of_lengths() {
        for &rate_mbps in &[6u8, 9, 12, 18, 24, 36, 48, 54] {
            for &length in &[1u16, 100, 1500, 4095] {
                let signal = Signal { rate_mbps, length };
                let symbol = encode(signal);
                assert_eq!(decode(&symbol), Some(signal));
            }
        }
    }

    #[test]
    fn rate_nibble_matches_table_for_36_mbps() {
        let bits = raw_bits(Signal { rate_mbps: 36, length: 100 });
        assert_eq!(&bits[0..4], &[true, false, true, true]);
        let parity = bits[0..17].iter().fold(false, |acc, &b| acc ^ b);
        assert_eq!(bits[17], parity);
    }

    #[test]
    fn flipping_any_bit_in_0_to_17_breaks_decode_or_changes_the_result() {
        let signal = Signal { rate_mbps: 12, length: 42 };
        let symbol = encode(signal);
        let baseline = decode(&symbol);
        assert_eq!(baseline, Some(signal));

        // Flip bit 17 (the parity bit itself): must always break decode.
        let mut bits = raw_bits(signal);
        bits[17] = !bits[17];
        let coded = conv::encode(&bits);
        let interleaved = interleave::interleave(&coded, 48, 1);
        let mut data = [Complex64::new(0.0, 0.0); ofdm::NUM_DATA_SUBCARRIERS];
        for (i, chunk) in interleaved.chunks(1).enumerate() {
            data[i] = modulate::map(chunk, crate::rates::Modulation::Bpsk);
        }
        let flipped_symbol = ofdm::modulate_symbol(&data, 1.0);
        assert_eq!(decode(&flipped_symbol), None);
    }
}
