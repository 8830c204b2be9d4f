//! Viterbi decoder for the rate-1/2, K=7 convolutional code
//!
//! The trellis transition table (which two predecessor states feed
//! each state, and what output pair each transition produces) is built
//! once, programmatically, by running the encoder itself over every
//! `(state, input bit)` combination and inverting the resulting
//! `state -> next_state` map. This sidesteps hand-transcribing a
//! closed-form predecessor formula, which the encoder's own bit
//! ordering already determines unambiguously.

use crate::conv::{self, NUM_STATES};
use std::sync::OnceLock;

#[derive(Debug, Clone, Copy)]
struct Edge {
    prev_state: u8,
    bit: bool,
    c0: bool,
    c1: bool,
}

fn transition_table() -> &'static [[Edge; 2]; NUM_STATES] {
    static CELL: OnceLock<[[Edge; 2]; NUM_STATES]> = OnceLock::new();
    CELL.get_or_init(|| {
        let mut incoming: Vec<Vec<Edge>> = vec![Vec::with_capacity(2); NUM_STATES];
        for state in 0..NUM_STATES as u8 {
            for &bit in &[false, true] {
                let (c0, c1, next_state) = conv::step(state, bit);
                incoming[next_state as usize].push(Edge { prev_state: state, bit, c0, c1 });
            }
        }

        let mut table = [[Edge { prev_state: 0, bit: false, c0: false, c1: false }; 2]; NUM_STATES];
        for (next_state, edges) in incoming.into_iter().enumerate() {
            assert_eq!(edges.len(), 2, "every trellis state has exactly two incoming edges");
            table[next_state] = [edges[0], edges[1]];
        }
        table
    })
}

/// Decode a hard-bit coded stream (length `2 * n_data`) with a parallel
/// valid-mask (positions erased by puncturing carry `false` and
/// contribute 0 to the branch metric). Returns `None` only on a shape
/// mismatch between `codeword`, `valid_mask`, and `n_data`.
///
/// Traceback starts from state 0 at time `n_data`, relying on the 6
/// zero tail bits appended by the encoder to force the trellis back to
/// the zero state.
pub fn decode(codeword: &[bool], valid_mask: &[bool], n_data: usize) -> Option<Vec<bool>> {
    if codeword.len() != 2 * n_data || valid_mask.len() != 2 * n_data {
        return None;
    }

    let edges = transition_table();
    let mut metric = [u32::MAX; NUM_STATES];
    metric[0] = 0;

    let mut backptr: Vec<[Option<(u8, bool)>; NUM_STATES]> = vec![[None; NUM_STATES]; n_data];

    for t in 0..n_data {
        let (r0, r1) = (codeword[2 * t], codeword[2 * t + 1]);
        let (v0, v1) = (valid_mask[2 * t], valid_mask[2 * t + 1]);

        let mut next_metric = [u32::MAX; NUM_STATES];
        let mut step_back = [None; NUM_STATES];

        for (next_state, incoming) in edges.iter().enumerate() {
            for edge in incoming {
                let prev_metric = metric[edge.prev_state as usize];
                if prev_metric == u32::MAX {
                    continue;
                }
                let mut distance = 0u32;
                if v0 && edge.c0 != r0 {
                    distance += 1;
                }
                if v1 && edge.c1 != r1 {
                    distance += 1;
                }
                let candidate = prev_metric + distance;
                if candidate < next_metric[next_state] {
                    next_metric[next_state] = candidate;
                    step_back[next_state] = Some((edge.prev_state, edge.bit));
                }
            }
        }

        metric = next_metric;
        backptr[t] = step_back;
    }

    let mut state = 0u8;
    let mut bits = vec![false; n_data];
    for t in (0..n_data).rev() {
        let (prev, bit) = backptr[t][state as usize]?;
        bits[t] = bit;
        state = prev;
    }
    Some(bits)
}
