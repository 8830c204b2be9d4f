//! Block interleaver
//!
//! Two permutations applied per OFDM symbol's worth of coded bits:
//! the first spreads adjacent coded bits across non-adjacent
//! subcarriers, the second alternates which bits land on the more- and
//! less-significant positions of the constellation.

/// First permutation: `i = (N_CBPS/16) * (k mod 16) + floor(k/16)`.
fn first_perm(k: usize, n_cbps: usize) -> usize {
    (n_cbps / 16) * (k % 16) + k / 16
}

/// Second permutation: `j = s*floor(i/s) + (i + N_CBPS - floor(16*i/N_CBPS)) mod s`,
/// with `s = max(N_BPSC/2, 1)`.
fn second_perm(i: usize, n_cbps: usize, n_bpsc: usize) -> usize {
    let s = (n_bpsc / 2).max(1);
    s * (i / s) + (i + n_cbps - (16 * i) / n_cbps) % s
}

/// Interleave one symbol's worth of coded bits (length `n_cbps`).
pub fn interleave(bits: &[bool], n_cbps: usize, n_bpsc: usize) -> Vec<bool> {
    assert_eq!(bits.len(), n_cbps);
    let mut out = vec![false; n_cbps];
    for k in 0..n_cbps {
        let i = first_perm(k, n_cbps);
        let j = second_perm(i, n_cbps, n_bpsc);
        out[j] = bits[k];
    }
    out
}

/// Invert [`interleave`]: apply inverse-second then inverse-first.
pub fn deinterleave(bits: &[bool], n_cbps: usize, n_bpsc: usize) -> Vec<bool> {
    assert_eq!(bits.len(), n_cbps);
    let mut out = vec![false; n_cbps];
    for k in 0..n_cbps {
        let i = first_perm(k, n_cbps);
        let j = second_perm(i, n_cbps, n_bpsc);
        out[k] = bits[j];
    }
    out
}
