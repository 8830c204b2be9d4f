//! Puncturer
//!
//! Static column masks, applied 1-for-1 per coded bit, that drop
//! selected bits to raise the effective code rate above the mother
//! rate-1/2 code. Reverse puncturing re-inserts placeholder bits and
//! hands the Viterbi decoder a mask of which positions are genuine.

use crate::rates::CodingRate;

/// `1` = keep, `0` = erase, read MSB-first per the static table.
fn pattern(rate: CodingRate) -> &'static [bool] {
    const R2_3: [bool; 4] = [true, true, true, false];
    const R3_4: [bool; 6] = [true, true, true, false, false, true];

    if rate == CodingRate::ONE_HALF {
        &[true, true]
    } else if rate == CodingRate::TWO_THIRDS {
        &R2_3
    } else if rate == CodingRate::THREE_QUARTERS {
        &R3_4
    } else {
        unreachable!("no other coding rate is defined")
    }
}

/// Discard bits at the pattern's 0-positions, cycling the pattern over
/// the whole input.
pub fn puncture(bits: &[bool], rate: CodingRate) -> Vec<bool> {
    let mask = pattern(rate);
    bits.iter()
        .zip(mask.iter().cycle())
        .filter_map(|(&bit, &keep)| keep.then_some(bit))
        .collect()
}

/// Re-insert placeholder (`false`) bits at the pattern's 0-positions.
/// Returns the depunctured bit stream and a parallel mask that is `true`
/// at positions that held a genuine received bit and `false` at
/// inserted placeholders, for the Viterbi branch metric to ignore.
pub fn depuncture(bits: &[bool], rate: CodingRate) -> (Vec<bool>, Vec<bool>) {
    let mask = pattern(rate);
    let kept_per_period = mask.iter().filter(|&&k| k).count();
    if kept_per_period == 0 || bits.is_empty() {
        return (Vec::new(), Vec::new());
    }

    let num_full_periods = bits.len() / kept_per_period;
    let remainder = bits.len() % kept_per_period;

    let mut out = Vec::new();
    let mut valid = Vec::new();
    let mut cursor = bits.iter();

    let mut emit_period = |keep_count: usize, out: &mut Vec<bool>, valid: &mut Vec<bool>| {
        let mut kept_seen = 0;
        for &keep in mask.iter() {
            if keep && kept_seen < keep_count {
                out.push(*cursor.next().unwrap());
                valid.push(true);
                kept_seen += 1;
            } else if keep {
                break;
            } else {
                out.push(false);
                valid.push(false);
            }
        }
    };

    for _ in 0..num_full_periods {
        emit_period(kept_per_period, &mut out, &mut valid);
    }
    if remainder > 0 {
        emit_period(remainder, &mut out, &mut valid);
    }

    (out, valid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_half_is_identity() {
        let bits = vec![true, false, true, true, false, false];
        assert_eq!(puncture(&bits, CodingRate::ONE_HALF), bits);
    }

    #[test]
    fn two_thirds_drops_every_fourth_bit() {
        let bits = vec![true, true, true, true, false, false, false, false];
        let out = puncture(&bits, CodingRate::TWO_THIRDS);
        assert_eq!(out, vec![true, true, true, false, false, false]);
    }

    #[test]
    fn three_quarters_keeps_four_of_six() {
        let bits = vec![true, false, true, true, false, true];
        let out = puncture(&bits, CodingRate::THREE_QUARTERS);
        assert_eq!(out, vec![true, false, true, true]);
    }

    #[test]
    fn depuncture_round_trips_shape_and_marks_insertions() {
        let original = vec![true, false, true, true, false, true, true, true, false, false, false, true];
        for rate in [CodingRate::ONE_HALF, CodingRate::TWO_THIRDS, CodingRate::THREE_QUARTERS] {
            let punctured = puncture(&original, rate);
            let (restored, valid) = depuncture(&punctured, rate);
            assert_eq!(restored.len(), valid.len());
            // every genuine position must reproduce the original bit
            let mut src = original.iter().cycle();
            let mask = pattern(rate);
            let mut mask_iter = mask.iter().cycle();
            for (bit, is_valid) in restored.iter().zip(valid.iter()) {
                let keep = *mask_iter.next().unwrap();
                assert_eq!(*is_valid, keep);
                if keep {
                    assert_eq!(*bit, *src.next().unwrap());
                }
            }
        }
    }

    #[test]
    fn depuncture_handles_partial_final_period() {
        // Three punctured bits at R=2/3 (one full kept-triplet) depunctures
        // to exactly one 4-bit period.
        let (restored, valid) = depuncture(&[true, false, true], CodingRate::TWO_THIRDS);
        assert_eq!(restored, vec![true, false, true, false]);
        assert_eq!(valid, vec![true, true, true, false]);
    }
}
