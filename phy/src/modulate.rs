//! Subcarrier (de)mapper
//!
//! Gray-coded BPSK/QPSK/16-QAM/64-QAM, one complex symbol per
//! subcarrier per OFDM symbol.

use crate::rates::Modulation;
use num_complex::Complex64;

fn k_mod(modulation: Modulation) -> f64 {
    match modulation {
        Modulation::Bpsk => 1.0,
        Modulation::Qpsk => 1.0 / 2.0_f64.sqrt(),
        Modulation::Qam16 => 1.0 / 10.0_f64.sqrt(),
        Modulation::Qam64 => 1.0 / 42.0_f64.sqrt(),
    }
}

/// Gray-code a single constellation axis from its raw bits (MSB first
/// within the axis) to a signed, odd-integer level.
fn axis_map(bits: &[bool]) -> f64 {
    match bits {
        [b] => if *b { 1.0 } else { -1.0 },
        [b0, b1] => match (*b0, *b1) {
            (false, false) => -3.0,
            (false, true) => 3.0,
            (true, false) => -1.0,
            (true, true) => 1.0,
        },
        [b0, b1, b2] => match (*b0, *b1, *b2) {
            (false, false, false) => -7.0,
            (false, false, true) => 7.0,
            (false, true, false) => -1.0,
            (false, true, true) => 1.0,
            (true, false, false) => -5.0,
            (true, false, true) => 5.0,
            (true, true, false) => -3.0,
            (true, true, true) => 3.0,
        },
        _ => unreachable!("at most 3 bits per axis (64-QAM)"),
    }
}

/// Invert [`axis_map`]: nearest odd integer in range, ties toward zero.
fn axis_demap(level: f64, bits_per_axis: usize) -> Vec<bool> {
    let max_n = (1i32 << (bits_per_axis - 1)) - 1;
    let min_n = -(1i32 << (bits_per_axis - 1));
    let raw = round_half_toward_zero((level - 1.0) / 2.0);
    let n = (raw as i32).clamp(min_n, max_n);
    let odd = 2 * n + 1;

    match bits_per_axis {
        1 => vec![odd > 0],
        2 => match odd {
            -3 => vec![false, false],
            3 => vec![false, true],
            -1 => vec![true, false],
            1 => vec![true, true],
            _ => unreachable!("odd in {{-3,-1,1,3}}"),
        },
        3 => match odd {
            -7 => vec![false, false, false],
            7 => vec![false, false, true],
            -1 => vec![false, true, false],
            1 => vec![false, true, true],
            -5 => vec![true, false, false],
            5 => vec![true, false, true],
            -3 => vec![true, true, false],
            3 => vec![true, true, true],
            _ => unreachable!("odd in {{-7,-5,-3,-1,1,3,5,7}}"),
        },
        _ => unreachable!("at most 3 bits per axis (64-QAM)"),
    }
}

fn round_half_toward_zero(v: f64) -> f64 {
    let t = v.trunc();
    if (v - t).abs() == 0.5 {
        t
    } else {
        v.round()
    }
}

/// Map `n_bpsc` coded bits to one complex constellation symbol.
pub fn map(bits: &[bool], modulation: Modulation) -> Complex64 {
    let scale = k_mod(modulation);
    match modulation {
        Modulation::Bpsk => {
            assert_eq!(bits.len(), 1);
            Complex64::new(scale * axis_map(bits), 0.0)
        }
        Modulation::Qpsk => {
            assert_eq!(bits.len(), 2);
            let i = axis_map(&bits[0..1]);
            let q = axis_map(&bits[1..2]);
            Complex64::new(scale * i, scale * q)
        }
        Modulation::Qam16 => {
            assert_eq!(bits.len(), 4);
            let i = axis_map(&bits[0..2]);
            let q = axis_map(&bits[2..4]);
            Complex64::new(scale * i, scale * q)
        }
        Modulation::Qam64 => {
            assert_eq!(bits.len(), 6);
            let i = axis_map(&bits[0..3]);
            let q = axis_map(&bits[3..6]);
            Complex64::new(scale * i, scale * q)
        }
    }
}

/// Invert [`map`]: recover the `n_bpsc` coded bits from a (possibly
/// noisy) received symbol.
pub fn demap(symbol: Complex64, modulation: Modulation) -> Vec<bool> {
    let scale = k_mod(modulation);
    let unscaled = symbol / scale;
    match modulation {
        Modulation::Bpsk => axis_demap(unscaled.re, 1),
        Modulation::Qpsk => {
            let mut out = axis_demap(unscaled.re, 1);
            out.extend(axis_demap(unscaled.im, 1));
            out
        }
        Modulation::Qam16 => {
            let mut out = axis_demap(unscaled.re, 2);
            out.extend(axis_demap(unscaled.im, 2));
            out
        }
        Modulation::Qam64 => {
            let mut out = axis_demap(unscaled.re, 3);
            out.extend(axis_demap(unscaled.im, 3));
            out
        }
    }
}
