//! Carrier frequency offset estimation and correction
//!
//! Given a run of samples known to consist of repeated copies of a
//! length-`m` period, the phase drift per sample accumulated between
//! adjacent copies is recovered from the autocorrelation at lag `m` and
//! undone by a complex de-rotation.

use num_complex::Complex64;

/// Estimate phase-per-sample `phi` from `count` lag-`m` sample pairs
/// starting at `start`: `phi = (1/m) * arg(sum(conj(s[i]) * s[i+m]))`.
pub fn estimate_phase_per_sample(samples: &[Complex64], m: usize, start: usize, count: usize) -> f64 {
    let mut acc = Complex64::new(0.0, 0.0);
    for i in start..start + count {
        acc += samples[i].conj() * samples[i + m];
    }
    acc.arg() / m as f64
}

/// Coarse CFO from the short training sequence: lag 16, summed over
/// the last 4 of its 10 16-sample repeats (the earliest repeats are
/// more likely to straddle the true start-of-frame boundary).
pub fn estimate_coarse(short_training: &[Complex64]) -> f64 {
    const M: usize = 16;
    const REPEATS: usize = 10;
    let last_four_start = (REPEATS - 4) * M;
    let count = short_training.len() - M - last_four_start;
    estimate_phase_per_sample(short_training, M, last_four_start, count)
}

/// Fine CFO from the long training sequence's two 64-sample copies
/// (the 32-sample cyclic prefix is excluded).
pub fn estimate_fine(long_training_no_prefix: &[Complex64]) -> f64 {
    const M: usize = 64;
    let count = long_training_no_prefix.len() - M;
    estimate_phase_per_sample(long_training_no_prefix, M, 0, count)
}

/// Rotate sample `n` by `exp(-j * phi * n)`, undoing a CFO of `phi`
/// radians/sample. `n` is measured from the start of `samples`.
pub fn correct(samples: &mut [Complex64], phi: f64) {
    for (n, s) in samples.iter_mut().enumerate() {
        *s *= Complex64::from_polar(1.0, -phi * n as f64);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::training::short_training;

    fn rotate(samples: &[Complex64], phi: f64) -> Vec<Complex64> {
        samples
            .iter()
            .enumerate()
            .map(|(n, &s)| s * Complex64::from_polar(1.0, phi * n as f64))
            .collect()
    }

    #[test]
    fn estimator_recovers_known_phase_on_short_training() {
        let s = short_training();
        for phi in [0.0, 0.1, 0.2] {
            let rotated = rotate(&s, phi / 16.0);
            let estimate = estimate_coarse(&rotated);
            assert!((estimate - phi / 16.0).abs() < 1e-6, "phi={phi}");
        }
    }

    #[test]
    fn correction_undoes_a_known_rotation() {
        let s = short_training();
        let phi = 0.02;
        let rotated = rotate(&s, phi);
        let mut corrected = rotated.clone();
        correct(&mut corrected, phi);
        for (a, b) in s.iter().zip(corrected.iter()) {
            assert!((a - b).norm() < 1e-9);
        }
    }

    #[test]
    fn fine_estimator_recovers_known_phase_on_repeated_block() {
        // A synthetic signal made of two identical 64-sample copies,
        // like the long training sequence with its prefix removed.
        let base: Vec<Complex64> = (0..64)
            .map(|n| Complex64::from_polar(1.0, 0.37 * n as f64))
            .collect();
        let mut doubled = base.clone();
        doubled.extend_from_slice(&base);

        for phi in [0.0, 0.05, -0.03] {
            let rotated = rotate(&doubled, phi);
            let estimate = estimate_fine(&rotated);
            assert!((estimate - phi).abs() < 1e-6, "phi={phi}");
        }
    }
}
