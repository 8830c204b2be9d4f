//! Short and long training sequences (preamble)
//!
//! Both sequences are built the same way as a data-bearing OFDM symbol
//! (place frequency-domain values on the shifted subcarrier grid,
//! `ifftshift`, IFFT) but from fixed patterns rather than payload data,
//! and tiled rather than cyclic-prefixed.

use crate::ofdm::{self, FFT_SIZE};
use num_complex::Complex64;

/// Nonzero short-training bins (all others null, including ±26 despite
/// appearing in the informal bin range description) with signs per the
/// 802.11a short training table, before the common `sqrt(13/6)` scale.
const SHORT_TRAINING_BINS: [(i32, Complex64); 12] = [
    (-22, Complex64::new(1.0, 1.0)),
    (-18, Complex64::new(-1.0, -1.0)),
    (-14, Complex64::new(1.0, 1.0)),
    (-10, Complex64::new(-1.0, -1.0)),
    (-6, Complex64::new(-1.0, -1.0)),
    (-2, Complex64::new(1.0, 1.0)),
    (2, Complex64::new(-1.0, -1.0)),
    (6, Complex64::new(-1.0, -1.0)),
    (10, Complex64::new(1.0, 1.0)),
    (14, Complex64::new(1.0, 1.0)),
    (18, Complex64::new(1.0, 1.0)),
    (22, Complex64::new(1.0, 1.0)),
];

/// Long-training frequency sequence L, bins -26..=26 in order (DC
/// null), unscaled.
const LONG_TRAINING_L: [f64; 53] = [
    1.0, 1.0, -1.0, -1.0, 1.0, 1.0, -1.0, 1.0, -1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, -1.0, -1.0,
    1.0, 1.0, -1.0, 1.0, -1.0, 1.0, 1.0, 1.0, 1.0, 0.0, 1.0, -1.0, -1.0, 1.0, 1.0, -1.0, 1.0,
    -1.0, 1.0, -1.0, -1.0, -1.0, -1.0, -1.0, 1.0, 1.0, -1.0, -1.0, 1.0, -1.0, 1.0, -1.0, 1.0,
    1.0, 1.0, 1.0,
];

fn bin_to_index(bin: i32) -> usize {
    (bin + (FFT_SIZE as i32) / 2) as usize
}

fn ifft_from_shifted(mut shifted: [Complex64; FFT_SIZE]) -> [Complex64; FFT_SIZE] {
    ofdm::shift64(&mut shifted);
    ofdm::ifft64(&mut shifted);
    shifted
}

/// Build the 160-sample short training sequence (10 repetitions of a
/// 16-sample period, window-tapered at the endpoints).
///
/// The nonzero bins all fall on one residue class mod 4, which is what
/// gives the 64-point IFFT output an exact 16-sample period; repeating
/// that period 10 times is equivalent to the tile-640-then-resample
/// construction but avoids implementing a general resampler for a
/// ratio that always reduces to this.
pub fn short_training() -> Vec<Complex64> {
    let scale = (13.0f64 / 6.0).sqrt();
    let mut shifted = [Complex64::new(0.0, 0.0); FFT_SIZE];
    for (bin, value) in SHORT_TRAINING_BINS {
        shifted[bin_to_index(bin)] = value * scale;
    }

    let time = ifft_from_shifted(shifted);
    let period = &time[0..16];

    let mut seq = Vec::with_capacity(160);
    for _ in 0..10 {
        seq.extend_from_slice(period);
    }
    ofdm::apply_window(&mut seq);
    seq
}

/// Build the 160-sample long training sequence: a 32-sample prefix (the
/// tail of the 64-sample IFFT output) followed by two full copies.
pub fn long_training() -> Vec<Complex64> {
    let mut shifted = [Complex64::new(0.0, 0.0); FFT_SIZE];
    for (i, &bin) in (-26i32..=26).enumerate() {
        shifted[bin_to_index(bin)] = Complex64::new(LONG_TRAINING_L[i], 0.0);
    }

    let time = ifft_from_shifted(shifted);

    let mut seq = Vec::with_capacity(160);
    seq.extend_from_slice(&time[32..64]);
    seq.extend_from_slice(&time);
    seq.extend_from_slice(&time);
    ofdm::apply_window(&mut seq);
    seq
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_training_has_160_samples() {
        assert_eq!(short_training().len(), 160);
    }

    #[test]
    fn long_training_has_160_samples() {
        assert_eq!(long_training().len(), 160);
    }

    #[test]
    fn short_training_repeats_every_16_samples() {
        let s = short_training();
        // compare interior repeats, away from the windowed endpoints
        for period_start in (16..144).step_by(16) {
            for k in 1..15 {
                assert!(
                    (s[period_start + k] - s[16 + k]).norm() < 1e-9,
                    "mismatch at offset {k} in period starting {period_start}"
                );
            }
        }
    }

    #[test]
    fn long_training_prefix_matches_tail_of_first_full_copy() {
        let l = long_training();
        // l[0..32] is the prefix, l[32..96] the first full copy,
        // l[96..160] the second; the prefix equals the last 32 samples
        // of the first full copy, i.e. l[64..96].
        for i in 0..32 {
            assert!((l[i] - l[64 + i]).norm() < 1e-9);
        }
    }

    #[test]
    fn long_training_two_full_copies_are_identical_up_to_window() {
        let l = long_training();
        // interior samples (excluding the windowed very first and last)
        for i in 1..63 {
            assert!((l[32 + i] - l[96 + i]).norm() < 1e-9);
        }
    }
}
