#![allow(dead_code)]

use ichimoku_ta::{IchimokuValue, Ohlcv, Price, Timestamp};
use serde::{Deserialize, de::DeserializeOwned};

/// OHLCV bar parsed from the hourly CSV fixture.
#[derive(Debug, Clone, Deserialize)]
pub struct RefBar {
    pub open_time: u64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl RefBar {
    /// The bar as a raw exchange row: `[timestamp, open, high, low, close, volume]`.
    #[allow(clippy::cast_precision_loss)]
    pub fn to_row(&self) -> [f64; 6] {
        [
            self.open_time as f64,
            self.open,
            self.high,
            self.low,
            self.close,
            self.volume,
        ]
    }
}

impl Ohlcv for RefBar {
    fn open(&self) -> Price {
        self.open
    }

    fn high(&self) -> Price {
        self.high
    }

    fn low(&self) -> Price {
        self.low
    }

    fn close(&self) -> Price {
        self.close
    }

    fn open_time(&self) -> Timestamp {
        self.open_time
    }

    fn volume(&self) -> f64 {
        self.volume
    }
}

/// Reference Ichimoku row with timestamp.
#[derive(Debug, Deserialize)]
pub struct RefIchimoku {
    pub open_time: u64,
    pub tenkansen: f64,
    pub kijunsen: f64,
    pub leading_span_a: f64,
    pub leading_span_b: f64,
}

const OHLCV_PATH: &str = "tests/fixtures/data/btcusdt-1h.csv";

/// Load reference OHLCV bars.
pub fn load_reference_ohlcvs() -> Vec<RefBar> {
    load_records(OHLCV_PATH, "invalid OHLCV record")
}

/// Load Ichimoku reference data (one row per retained bar).
pub fn load_ichimoku_ref(path: &str) -> Vec<RefIchimoku> {
    load_records(path, "invalid Ichimoku reference record")
}

/// Assert two f64 values are within tolerance.
pub fn assert_near(actual: f64, expected: f64, tolerance: f64, context: &str) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tolerance,
        "{context}: expected {expected:.10}, got {actual:.10}, diff {diff:.2e} > tolerance {tolerance:.2e}"
    );
}

/// Assert every line of `actual` matches the reference row.
pub fn assert_ichimoku_near(
    actual: IchimokuValue,
    expected: &RefIchimoku,
    tolerance: f64,
    context: &str,
) {
    for (line, a, e) in [
        ("tenkansen", actual.tenkansen(), expected.tenkansen),
        ("kijunsen", actual.kijunsen(), expected.kijunsen),
        ("leading_span_a", actual.leading_span_a(), expected.leading_span_a),
        ("leading_span_b", actual.leading_span_b(), expected.leading_span_b),
    ] {
        assert_near(a, e, tolerance, &format!("{context} {line}"));
    }
}

/// Creates perturbed versions of a bar to simulate live repaints.
///
/// Returns 2 intermediate bars (with shifted close/high/low) followed
/// by the original bar. All share the same `open_time`.
pub fn repaint_sequence(bar: &RefBar) -> Vec<RefBar> {
    let t = bar.open_time;
    vec![
        // First tick: only open is known, close near open
        RefBar {
            open: bar.open,
            high: bar.open * 1.001,
            low: bar.open * 0.999,
            close: bar.open * 1.0005,
            volume: bar.volume - 2.0,
            open_time: t,
        },
        // Mid-bar: a spike far outside the final range
        RefBar {
            open: bar.open,
            high: bar.high * 1.05,
            low: bar.low * 0.95,
            close: bar.open.midpoint(bar.close),
            volume: bar.volume - 1.0,
            open_time: t,
        },
        // Final: real OHLCV values
        bar.clone(),
    ]
}

pub fn assert_values_match(
    bar_idx: usize,
    closed: Option<IchimokuValue>,
    repainted: Option<IchimokuValue>,
) {
    match (closed, repainted) {
        (None, None) => {} // both in warm-up, fine
        (Some(c), Some(r)) => {
            assert_eq!(c, r, "diverged at bar {bar_idx}");
        }
        (c, r) => {
            panic!("warm-up mismatch at bar {bar_idx}: closed={c:?}, repainted={r:?}");
        }
    }
}

fn load_records<D>(path: &str, expect_msg: &str) -> Vec<D>
where
    D: DeserializeOwned,
{
    let mut rdr =
        csv::Reader::from_path(path).unwrap_or_else(|e| panic!("failed to open {path}: {e}"));

    rdr.deserialize().map(|r| r.expect(expect_msg)).collect()
}
