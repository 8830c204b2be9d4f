//! 64-point OFDM modulation and demodulation
//!
//! One OFDM symbol is a 64-sample complex time-domain block: 48 data
//! subcarriers, 4 pilots, a DC null and 11 guard nulls, built by
//! placing values onto a shifted subcarrier grid, `ifftshift`-ing back
//! to natural FFT order, and taking the inverse DFT. A 16-sample
//! cyclic prefix and a half-amplitude endpoint taper complete the
//! 80-sample transmitted frame.

use num_complex::Complex64;
use rustfft::{Fft, FftPlanner};
use std::sync::{Arc, OnceLock};

pub const FFT_SIZE: usize = 64;
pub const CP_LEN: usize = 16;
pub const SYMBOL_LEN: usize = FFT_SIZE + CP_LEN;
pub const NUM_DATA_SUBCARRIERS: usize = 48;

/// Data subcarrier bins, ascending, per the 802.11a subcarrier table.
const DATA_BINS: [i32; NUM_DATA_SUBCARRIERS] = [
    -26, -25, -24, -23, -22, -20, -19, -18, -17, -16, -15, -14, -13, -12, -11, -10, -9, -8, -6,
    -5, -4, -3, -2, -1, 1, 2, 3, 4, 5, 6, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 22,
    23, 24, 25, 26,
];

/// Pilot subcarrier bins, ascending. Nominal polarity pattern
/// `[+1, +1, +1, -1]` is applied in this same order.
const PILOT_BINS: [i32; 4] = [-21, -7, 7, 21];

/// Bin-to-array-index convention: index `i` in a 64-element shifted
/// buffer corresponds to DFT bin `i - 32` (bin -32 = Nyquist at index
/// 0, DC at index 32). This matches `numpy.fft.fftshift`/`ifftshift`
/// for an even FFT size, which is why a single rotate-by-32 serves both
/// directions.
fn bin_to_index(bin: i32) -> usize {
    (bin + (FFT_SIZE as i32) / 2) as usize
}

fn data_indices() -> &'static [usize; NUM_DATA_SUBCARRIERS] {
    static CELL: OnceLock<[usize; NUM_DATA_SUBCARRIERS]> = OnceLock::new();
    CELL.get_or_init(|| {
        let mut out = [0usize; NUM_DATA_SUBCARRIERS];
        for (i, &bin) in DATA_BINS.iter().enumerate() {
            out[i] = bin_to_index(bin);
        }
        out
    })
}

fn pilot_indices() -> &'static [usize; 4] {
    static CELL: OnceLock<[usize; 4]> = OnceLock::new();
    CELL.get_or_init(|| {
        let mut out = [0usize; 4];
        for (i, &bin) in PILOT_BINS.iter().enumerate() {
            out[i] = bin_to_index(bin);
        }
        out
    })
}

/// Swap the two halves of a 64-element buffer in place. Self-inverse,
/// and identical for `fftshift`/`ifftshift` because the FFT size is
/// even.
pub fn shift64(buf: &mut [Complex64; FFT_SIZE]) {
    let (lo, hi) = buf.split_at_mut(FFT_SIZE / 2);
    lo.swap_with_slice(hi);
}

fn planner() -> (&'static Arc<dyn Fft<f64>>, &'static Arc<dyn Fft<f64>>) {
    static CELL: OnceLock<(Arc<dyn Fft<f64>>, Arc<dyn Fft<f64>>)> = OnceLock::new();
    let pair = CELL.get_or_init(|| {
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(FFT_SIZE);
        let ifft = planner.plan_fft_inverse(FFT_SIZE);
        (fft, ifft)
    });
    (&pair.0, &pair.1)
}

/// Halve the first and last sample of a frame. Applied to every OFDM
/// frame, training sequences included.
pub fn apply_window(samples: &mut [Complex64]) {
    let n = samples.len();
    samples[0] *= 0.5;
    samples[n - 1] *= 0.5;
}

/// Invert [`apply_window`].
pub fn unapply_window(samples: &mut [Complex64]) {
    let n = samples.len();
    samples[0] *= 2.0;
    samples[n - 1] *= 2.0;
}

/// Run the unnormalized forward 64-point DFT in place.
pub fn fft64(buf: &mut [Complex64; FFT_SIZE]) {
    let (fft, _) = planner();
    fft.process(buf);
}

/// Run the inverse 64-point DFT in place, normalizing by 1/64 to match
/// the unnormalized forward transform.
pub fn ifft64(buf: &mut [Complex64; FFT_SIZE]) {
    let (_, ifft) = planner();
    ifft.process(buf);
    for s in buf.iter_mut() {
        *s /= FFT_SIZE as f64;
    }
}

/// Build one 80-sample transmitted OFDM symbol from 48 data symbols and
/// the current pilot polarity (`+1.0` or `-1.0`).
pub fn modulate_symbol(data: &[Complex64; NUM_DATA_SUBCARRIERS], pilot_polarity: f64) -> Vec<Complex64> {
    let mut shifted = [Complex64::new(0.0, 0.0); FFT_SIZE];
    for (value, &idx) in data.iter().zip(data_indices().iter()) {
        shifted[idx] = *value;
    }
    const PILOT_PATTERN: [f64; 4] = [1.0, 1.0, 1.0, -1.0];
    for (&p, &idx) in PILOT_PATTERN.iter().zip(pilot_indices().iter()) {
        shifted[idx] = Complex64::new(pilot_polarity * p, 0.0);
    }

    shift64(&mut shifted); // ifftshift == shift64 for even N
    let mut time = shifted;
    ifft64(&mut time);

    let mut symbol = Vec::with_capacity(SYMBOL_LEN);
    symbol.extend_from_slice(&time[FFT_SIZE - CP_LEN..]);
    symbol.extend_from_slice(&time);
    apply_window(&mut symbol);
    symbol
}

/// Recover the 48 data subcarrier values from one received 80-sample
/// OFDM symbol. The channel is assumed ideal (ungained, unrotated); a
/// per-bin equalizer is the caller's responsibility if needed.
pub fn demodulate_symbol(symbol: &[Complex64]) -> [Complex64; NUM_DATA_SUBCARRIERS] {
    assert_eq!(symbol.len(), SYMBOL_LEN);
    let mut windowed = symbol.to_vec();
    unapply_window(&mut windowed);

    let mut time = [Complex64::new(0.0, 0.0); FFT_SIZE];
    time.copy_from_slice(&windowed[CP_LEN..]);

    fft64(&mut time);
    shift64(&mut time); // fftshift == shift64 for even N

    let mut data = [Complex64::new(0.0, 0.0); NUM_DATA_SUBCARRIERS];
    for (value, &idx) in data.iter_mut().zip(data_indices().iter()) {
        *value = time[idx];
    }
    data
}

#[cfg(test)]
mod tests {
    use super::*;

    fn qpsk_block() -> [Complex64; NUM_DATA_SUBCARRIERS] {
        let mut block = [Complex64::new(0.0, 0.0); NUM_DATA_SUBCARRIERS];
        for (i, v) in block.iter_mut().enumerate() {
            let i_bit = if i % 2 == 0 { 1.0 } else { -1.0 };
            let q_bit = if (i / 2) % 2 == 0 { 1.0 } else { -1.0 };
            *v = Complex64::new(i_bit, q_bit) / 2.0_f64.sqrt();
        }
        block
    }

    #[test]
    fn round_trip_recovers_data_subcarriers() {
        let data = qpsk_block();
        let symbol = modulate_symbol(&data, 1.0);
        assert_eq!(symbol.len(), SYMBOL_LEN);
        let recovered = demodulate_symbol(&symbol);
        for (a, b) in data.iter().zip(recovered.iter()) {
            assert!((a - b).norm() < 1e-9, "expected {a}, got {b}");
        }
    }

    #[test]
    fn cyclic_prefix_repeats_tail_of_ifft_output() {
        let data = qpsk_block();
        let symbol = modulate_symbol(&data, 1.0);
        // undo the endpoint window to compare raw samples
        let mut raw = symbol.clone();
        raw[0] *= 2.0;
        raw[SYMBOL_LEN - 1] *= 2.0;
        for i in 0..CP_LEN {
            assert!((raw[i] - raw[i + FFT_SIZE]).norm() < 1e-9);
        }
    }

    #[test]
    fn window_halves_only_the_two_endpoints() {
        let data = qpsk_block();
        let symbol = modulate_symbol(&data, 1.0);
        let mut raw = symbol.clone();
        raw[0] *= 2.0;
        raw[SYMBOL_LEN - 1] *= 2.0;
        assert!((symbol[0] - raw[0] / 2.0).norm() < 1e-12);
        assert!((symbol[SYMBOL_LEN - 1] - raw[SYMBOL_LEN - 1] / 2.0).norm() < 1e-12);
    }

    #[test]
    fn shift64_is_its_own_inverse() {
        let mut buf = [Complex64::new(0.0, 0.0); FFT_SIZE];
        for (i, s) in buf.iter_mut().enumerate() {
            *s = Complex64::new(i as f64, 0.0);
        }
        let original = buf;
        shift64(&mut buf);
        shift64(&mut buf);
        assert_eq!(buf, original);
    }
}
