//! Rate parameter table
//!
//! Static mapping rate (Mb/s) -> {modulation, coding rate, N_BPSC,
//! N_CBPS, N_DBPS} and the 4-bit SIGNAL nibble codes, per IEEE
//! 802.11a-1999 Table 78. Process-wide immutable data, looked up by
//! value rather than precomputed into a singleton: the table is eight
//! entries and a `match` compiles to a jump table anyway.

use common::PhyError;

/// Modulation scheme used to map coded bits onto a subcarrier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modulation {
    Bpsk,
    Qpsk,
    Qam16,
    Qam64,
}

/// Convolutional coding rate, kept as an exact numerator/denominator
/// pair rather than a float so puncture-mask lookups stay exact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodingRate {
    pub num: u32,
    pub den: u32,
}

impl CodingRate {
    pub const ONE_HALF: Self = Self { num: 1, den: 2 };
    pub const TWO_THIRDS: Self = Self { num: 2, den: 3 };
    pub const THREE_QUARTERS: Self = Self { num: 3, den: 4 };
}

/// Immutable per-rate parameter bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateParameters {
    pub rate_mbps: u8,
    pub modulation: Modulation,
    pub coding_rate: CodingRate,
    /// Bits per subcarrier.
    pub n_bpsc: usize,
    /// Coded bits per OFDM symbol. Invariant: n_cbps = 48 * n_bpsc.
    pub n_cbps: usize,
    /// Data bits per OFDM symbol. Invariant: n_dbps = n_cbps * coding_rate.
    pub n_dbps: usize,
    /// 4-bit SIGNAL rate nibble, bit 0 (LSB, sent first) through bit 3.
    pub signal_nibble: u8,
}

const TABLE: [RateParameters; 8] = [
    RateParameters {
        rate_mbps: 6,
        modulation: Modulation::Bpsk,
        coding_rate: CodingRate::ONE_HALF,
        n_bpsc: 1,
        n_cbps: 48,
        n_dbps: 24,
        signal_nibble: 0b1011,
    },
    RateParameters {
        rate_mbps: 9,
        modulation: Modulation::Bpsk,
        coding_rate: CodingRate::THREE_QUARTERS,
        n_bpsc: 1,
        n_cbps: 48,
        n_dbps: 36,
        signal_nibble: 0b1111,
    },
    RateParameters {
        rate_mbps: 12,
        modulation: Modulation::Qpsk,
        coding_rate: CodingRate::ONE_HALF,
        n_bpsc: 2,
        n_cbps: 96,
        n_dbps: 48,
        signal_nibble: 0b1010,
    },
    RateParameters {
        rate_mbps: 18,
        modulation: Modulation::Qpsk,
        coding_rate: CodingRate::THREE_QUARTERS,
        n_bpsc: 2,
        n_cbps: 96,
        n_dbps: 72,
        signal_nibble: 0b1110,
    },
    RateParameters {
        rate_mbps: 24,
        modulation: Modulation::Qam16,
        coding_rate: CodingRate::ONE_HALF,
        n_bpsc: 4,
        n_cbps: 192,
        n_dbps: 96,
        signal_nibble: 0b1001,
    },
    RateParameters {
        rate_mbps: 36,
        modulation: Modulation::Qam16,
        coding_rate: CodingRate::THREE_QUARTERS,
        n_bpsc: 4,
        n_cbps: 192,
        n_dbps: 144,
        signal_nibble: 0b1101,
    },
    RateParameters {
        rate_mbps: 48,
        modulation: Modulation::Qam64,
        coding_rate: CodingRate::TWO_THIRDS,
        n_bpsc: 6,
        n_cbps: 288,
        n_dbps: 192,
        signal_nibble: 0b1000,
    },
    RateParameters {
        rate_mbps: 54,
        modulation: Modulation::Qam64,
        coding_rate: CodingRate::THREE_QUARTERS,
        n_bpsc: 6,
        n_cbps: 288,
        n_dbps: 216,
        signal_nibble: 0b1100,
    },
];

/// Look up the rate parameters for a given rate in Mb/s.
pub fn rate_parameters(rate_mbps: u8) -> Result<RateParameters, PhyError> {
    TABLE
        .iter()
        .find(|r| r.rate_mbps == rate_mbps)
        .copied()
        .ok_or(PhyError::InvalidRate(rate_mbps))
}

/// Decode a 4-bit SIGNAL rate nibble (bit 0 = LSB, as received) to a rate.
pub fn nibble_to_rate(nibble: u8) -> Option<u8> {
    TABLE
        .iter()
        .find(|r| r.signal_nibble == nibble)
        .map(|r| r.rate_mbps)
}
