//! 802.11a baseband TX/RX loopback demonstration
//!
//! Builds a payload, transmits it through the full PHY chain (preamble,
//! SIGNAL, DATA, OFDM), optionally rotates the resulting samples by a
//! synthetic carrier frequency offset, runs them back through the RX
//! chain, and reports whether the payload round-tripped.

use anyhow::{bail, Context, Result};
use clap::Parser;
use num_complex::Complex64;
use phy::rates::rate_parameters;
use phy::{receive, transmit};
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

/// 802.11a baseband TX/RX loopback demonstration
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Payload bytes as hex (e.g. "deadbeef"). Overrides --length.
    #[arg(long)]
    payload: Option<String>,

    /// Number of pseudo-random payload bytes to generate when
    /// --payload is not given.
    #[arg(long, default_value_t = 32)]
    length: usize,

    /// PHY rate in Mb/s: one of 6, 9, 12, 18, 24, 36, 48, 54.
    #[arg(long, default_value_t = 6)]
    rate: u8,

    /// Scrambler seed in 1..=127. A random seed is chosen if omitted.
    #[arg(long)]
    seed: Option<u8>,

    /// Carrier frequency offset to inject, in radians/sample, to
    /// demonstrate CFO estimation and correction on the loopback.
    #[arg(long, default_value_t = 0.0)]
    cfo: f64,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn parse_hex_payload(s: &str) -> Result<Vec<u8>> {
    let s = s.trim();
    if s.len() % 2 != 0 {
        bail!("hex payload must have an even number of digits");
    }
    (0..s.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&s[i..i + 2], 16).context("invalid hex digit in --payload"))
        .collect()
}

fn pseudo_random_payload(length: usize) -> Vec<u8> {
    use rand::Rng;
    let mut rng = rand::thread_rng();
    (0..length).map(|_| rng.gen()).collect()
}

fn apply_cfo(samples: &[Complex64], phi: f64) -> Vec<Complex64> {
    samples
        .iter()
        .enumerate()
        .map(|(n, &s)| s * Complex64::from_polar(1.0, phi * n as f64))
        .collect()
}

fn main() -> Result<()> {
    let args = Args::parse();

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    fmt().with_env_filter(env_filter).with_target(true).init();

    let rate = rate_parameters(args.rate)
        .with_context(|| format!("unsupported rate: {} Mb/s", args.rate))?;

    let payload = match &args.payload {
        Some(hex) => parse_hex_payload(hex)?,
        None => pseudo_random_payload(args.length),
    };

    info!(
        rate_mbps = rate.rate_mbps,
        payload_len = payload.len(),
        cfo = args.cfo,
        "transmitting PPDU"
    );

    let tx_samples = transmit(&payload, args.rate, args.seed).context("TX failed")?;
    info!(samples = tx_samples.len(), "TX produced baseband samples");

    let rx_input = if args.cfo != 0.0 {
        apply_cfo(&tx_samples, args.cfo)
    } else {
        tx_samples
    };

    match receive(&rx_input) {
        Some(recovered) if recovered == payload => {
            info!("loopback OK: {} bytes recovered intact", recovered.len());
        }
        Some(recovered) => {
            error!(
                sent = payload.len(),
                got = recovered.len(),
                "loopback mismatch: payload differs from what was sent"
            );
            bail!("RX payload did not match TX payload");
        }
        None => {
            error!("RX failed to decode the frame");
            bail!("RX returned no payload");
        }
    }

    Ok(())
}
