use crate::{InvalidInput, Result};

use std::fmt::Display;

/// A price value.
///
/// Semantic alias for [`f64`]. Non-finite values mark a missing price.
pub type Price = f64;

/// Bar open timestamp or sequence number.
///
/// Bars fed to the engine must be strictly ascending by this value.
pub type Timestamp = u64;

/// OHLCV bar data read by the Ichimoku lines.
///
/// Implement this on your own kline/candle type to avoid conversion. Only
/// [`high`](Ohlcv::high), [`low`](Ohlcv::low) and
/// [`open_time`](Ohlcv::open_time) take part in the computation.
///
/// # Example
///
/// ```
/// use ichimoku_ta::{Ohlcv, Price, Timestamp};
///
/// struct MyKline {
///     o: f64, h: f64, l: f64, c: f64,
///     ts: u64,
/// }
///
/// impl Ohlcv for MyKline {
///     fn open(&self) -> Price { self.o }
///     fn high(&self) -> Price { self.h }
///     fn low(&self) -> Price { self.l }
///     fn close(&self) -> Price { self.c }
///     fn open_time(&self) -> Timestamp { self.ts }
/// }
/// ```
pub trait Ohlcv {
    /// Opening price of the bar.
    fn open(&self) -> Price;

    /// Highest price during the bar.
    fn high(&self) -> Price;

    /// Lowest price during the bar.
    fn low(&self) -> Price;

    /// Closing (or latest) price of the bar.
    fn close(&self) -> Price;

    /// Bar open timestamp or sequence number.
    ///
    /// The batch engine rejects series where this value does not strictly
    /// increase. The streaming [`Ichimoku`](crate::Ichimoku) treats a repeated
    /// value as a repaint of the current bar.
    fn open_time(&self) -> Timestamp;

    /// Trade volume during the bar. Defaults to `0.0`.
    fn volume(&self) -> f64 {
        0.0
    }
}

/// Owned bar in the layout delivered by exchange OHLCV endpoints.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Candle {
    pub open_time: Timestamp,
    pub open: Price,
    pub high: Price,
    pub low: Price,
    pub close: Price,
    pub volume: f64,
}

impl Candle {
    /// Column order of a raw row: `[timestamp, open, high, low, close, volume]`.
    pub const COLUMNS: [&'static str; 6] = ["timestamp", "open", "high", "low", "close", "volume"];

    /// Converts one raw matrix row into a candle.
    ///
    /// `row` is only used for error reporting. Columns up to and including
    /// `low` are required; a missing `close` reads as `NaN` and a missing
    /// `volume` as `0.0`.
    ///
    /// # Errors
    ///
    /// [`InvalidInput::MissingField`] if the row ends before `low`, and
    /// [`InvalidInput::InvalidTimestamp`] if the first column is not a
    /// finite, non-negative integer.
    ///
    /// # Example
    ///
    /// ```
    /// use ichimoku_ta::Candle;
    ///
    /// let candle = Candle::from_row(0, &[1_700_000_000_000.0, 10.0, 12.0, 9.0, 11.0]).unwrap();
    /// assert_eq!(candle.high, 12.0);
    /// assert_eq!(candle.volume, 0.0);
    ///
    /// assert!(Candle::from_row(1, &[1.0, 10.0, 12.0]).is_err());
    /// ```
    pub fn from_row(row: usize, values: &[f64]) -> Result<Self> {
        let column = |idx: usize| {
            values
                .get(idx)
                .copied()
                .ok_or(InvalidInput::MissingField {
                    row,
                    field: Self::COLUMNS[idx],
                })
        };

        let timestamp = column(0)?;

        Ok(Self {
            open_time: to_timestamp(row, timestamp)?,
            open: column(1)?,
            high: column(2)?,
            low: column(3)?,
            close: values.get(4).copied().unwrap_or(f64::NAN),
            volume: values.get(5).copied().unwrap_or(0.0),
        })
    }
}

impl Ohlcv for Candle {
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

impl Display for Candle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Candle(t: {}, o: {}, h: {}, l: {}, c: {}, v: {})",
            self.open_time, self.open, self.high, self.low, self.close, self.volume
        )
    }
}

/// Converts a raw OHLCV matrix into candles, one per row.
///
/// # Errors
///
/// The first row failing [`Candle::from_row`], or [`InvalidInput::Empty`]
/// when there are no rows.
pub fn candles_from_rows<R>(rows: &[R]) -> Result<Vec<Candle>>
where
    R: AsRef<[f64]>,
{
    if rows.is_empty() {
        return Err(InvalidInput::Empty.into());
    }

    rows.iter()
        .enumerate()
        .map(|(idx, row)| Candle::from_row(idx, row.as_ref()))
        .collect()
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn to_timestamp(row: usize, value: f64) -> Result<Timestamp, InvalidInput> {
    let valid = value.is_finite() && value >= 0.0 && value.fract() == 0.0 && value <= u64::MAX as f64;

    if valid {
        Ok(value as Timestamp)
    } else {
        Err(InvalidInput::InvalidTimestamp { row, value })
    }
}
