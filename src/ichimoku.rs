use std::{fmt::Display, num::NonZero};

use crate::{
    Indicator, IndicatorConfig, InvalidInput, Ohlcv, Price, Result, Timestamp,
    bar_window::BarWindow, rolling::rolling_midpoints,
};

const TENKANSEN: NonZero<usize> = NonZero::new(9).unwrap();
const KIJUNSEN: NonZero<usize> = NonZero::new(26).unwrap();
const LEADING_SPAN_B: NonZero<usize> = NonZero::new(52).unwrap();

/// Configuration for the Ichimoku Kinko Hyo lines.
///
/// Holds the three look-back windows. Each line is the midpoint of the
/// lowest low and highest high over its window; leading span A averages the
/// conversion and base lines.
///
/// # Example
///
/// ```
/// use ichimoku_ta::{IchimokuConfig, IndicatorConfig};
/// use std::num::NonZero;
///
/// let config = IchimokuConfig::default();
/// assert_eq!(config.to_string(), "IchimokuConfig(9, 26, 52)");
/// assert_eq!(config.warm_up(), 52);
///
/// let faster = IchimokuConfig::builder()
///     .tenkansen(NonZero::new(7).unwrap())
///     .kijunsen(NonZero::new(22).unwrap())
///     .leading_span_b(NonZero::new(44).unwrap())
///     .build();
/// assert_eq!(faster.warm_up(), 44);
/// ```
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IchimokuConfig {
    tenkansen: NonZero<usize>,
    kijunsen: NonZero<usize>,
    leading_span_b: NonZero<usize>,
}

impl IndicatorConfig for IchimokuConfig {
    type Builder = IchimokuConfigBuilder;

    #[inline]
    fn builder() -> Self::Builder {
        IchimokuConfigBuilder::new()
    }

    #[inline]
    fn warm_up(&self) -> usize {
        self.tenkansen
            .max(self.kijunsen)
            .max(self.leading_span_b)
            .get()
    }
}

impl IchimokuConfig {
    /// Conversion line window (short, default 9).
    #[inline]
    #[must_use]
    pub fn tenkansen(&self) -> usize {
        self.tenkansen.get()
    }

    /// Base line window (medium, default 26).
    #[inline]
    #[must_use]
    pub fn kijunsen(&self) -> usize {
        self.kijunsen.get()
    }

    /// Leading span B window (long, default 52).
    #[inline]
    #[must_use]
    pub fn leading_span_b(&self) -> usize {
        self.leading_span_b.get()
    }
}

impl Default for IchimokuConfig {
    /// The classic 9/26/52 setting.
    fn default() -> Self {
        Self::builder().build()
    }
}

impl Display for IchimokuConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "IchimokuConfig({}, {}, {})",
            self.tenkansen, self.kijunsen, self.leading_span_b
        )
    }
}

/// Builder for [`IchimokuConfig`].
///
/// Defaults: tenkansen = 9, kijunsen = 26, leading span B = 52.
pub struct IchimokuConfigBuilder {
    tenkansen: NonZero<usize>,
    kijunsen: NonZero<usize>,
    leading_span_b: NonZero<usize>,
}

impl IchimokuConfigBuilder {
    fn new() -> Self {
        Self {
            tenkansen: TENKANSEN,
            kijunsen: KIJUNSEN,
            leading_span_b: LEADING_SPAN_B,
        }
    }

    /// Sets the conversion line window.
    #[inline]
    #[must_use]
    pub fn tenkansen(mut self, length: NonZero<usize>) -> Self {
        self.tenkansen = length;
        self
    }

    /// Sets the base line window.
    #[inline]
    #[must_use]
    pub fn kijunsen(mut self, length: NonZero<usize>) -> Self {
        self.kijunsen = length;
        self
    }

    /// Sets the leading span B window.
    #[inline]
    #[must_use]
    pub fn leading_span_b(mut self, length: NonZero<usize>) -> Self {
        self.leading_span_b = length;
        self
    }

    #[inline]
    #[must_use]
    pub fn build(self) -> IchimokuConfig {
        IchimokuConfig {
            tenkansen: self.tenkansen,
            kijunsen: self.kijunsen,
            leading_span_b: self.leading_span_b,
        }
    }
}

/// The four Ichimoku lines at one bar.
///
/// ```text
/// tenkansen      = (min(low, short)  + max(high, short))  / 2
/// kijunsen       = (min(low, medium) + max(high, medium)) / 2
/// leading_span_b = (min(low, long)   + max(high, long))   / 2
/// leading_span_a = (tenkansen + kijunsen) / 2
/// ```
///
/// Every window ends at, and includes, the bar the value belongs to.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct IchimokuValue {
    tenkansen: Price,
    kijunsen: Price,
    leading_span_a: Price,
    leading_span_b: Price,
}

impl IchimokuValue {
    fn from_lines(tenkansen: Price, kijunsen: Price, leading_span_b: Price) -> Self {
        Self {
            tenkansen,
            kijunsen,
            leading_span_a: f64::midpoint(tenkansen, kijunsen),
            leading_span_b,
        }
    }

    /// Conversion line.
    #[inline]
    #[must_use]
    pub fn tenkansen(&self) -> Price {
        self.tenkansen
    }

    /// Base line.
    #[inline]
    #[must_use]
    pub fn kijunsen(&self) -> Price {
        self.kijunsen
    }

    /// Leading span A: mean of the conversion and base lines.
    #[inline]
    #[must_use]
    pub fn leading_span_a(&self) -> Price {
        self.leading_span_a
    }

    /// Leading span B: long-window midpoint.
    #[inline]
    #[must_use]
    pub fn leading_span_b(&self) -> Price {
        self.leading_span_b
    }
}

impl Display for IchimokuValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Ichimoku(t: {}, k: {}, a: {}, b: {})",
            self.tenkansen, self.kijunsen, self.leading_span_a, self.leading_span_b
        )
    }
}

/// One retained row of an [`IchimokuSeries`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct IchimokuRow {
    position: usize,
    open_time: Timestamp,
    #[cfg_attr(feature = "serde", serde(flatten))]
    value: IchimokuValue,
}

impl IchimokuRow {
    /// 0-based index of the source bar in the input slice.
    #[inline]
    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    /// `open_time` of the source bar.
    #[inline]
    #[must_use]
    pub fn open_time(&self) -> Timestamp {
        self.open_time
    }

    #[inline]
    #[must_use]
    pub fn value(&self) -> IchimokuValue {
        self.value
    }
}

/// Ichimoku lines computed over a whole OHLCV series.
///
/// Only rows where all four lines are defined are kept. With finite prices
/// that is the suffix starting at position `warm_up - 1`; an input shorter
/// than [`warm_up`](IndicatorConfig::warm_up) gives an empty series.
///
/// # Example
///
/// ```
/// use ichimoku_ta::{IchimokuConfig, IchimokuSeries};
/// # use ichimoku_ta::{Ohlcv, Price, Timestamp};
/// #
/// # struct Bar(f64, u64);
/// # impl Ohlcv for Bar {
/// #     fn open(&self) -> Price { self.0 }
/// #     fn high(&self) -> Price { self.0 }
/// #     fn low(&self) -> Price { self.0 }
/// #     fn close(&self) -> Price { self.0 }
/// #     fn open_time(&self) -> Timestamp { self.1 }
/// # }
///
/// let bars: Vec<Bar> = (0..60_u32).map(|i| Bar(f64::from(i), u64::from(i))).collect();
/// let series = IchimokuSeries::compute(&bars, IchimokuConfig::default()).unwrap();
///
/// assert_eq!(series.len(), 60 - 51);
///
/// let first = series.get(51).unwrap().value();
/// assert_eq!(first.tenkansen(), 47.0);
/// assert_eq!(first.kijunsen(), 38.5);
/// assert_eq!(first.leading_span_a(), 42.75);
/// assert_eq!(first.leading_span_b(), 25.5);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct IchimokuSeries {
    config: IchimokuConfig,
    rows: Vec<IchimokuRow>,
}

impl IchimokuSeries {
    /// Computes the Ichimoku lines for `bars`.
    ///
    /// `bars` must be ordered by strictly increasing
    /// [`open_time`](Ohlcv::open_time); the order is checked, never fixed.
    /// Non-finite highs or lows make every window containing them undefined,
    /// which drops the affected rows.
    ///
    /// # Errors
    ///
    /// [`InvalidInput::Empty`] for an empty slice and
    /// [`InvalidInput::NotAscending`] for the first out-of-order bar.
    pub fn compute<B: Ohlcv>(bars: &[B], config: IchimokuConfig) -> Result<Self> {
        check_order(bars)?;

        let warm_up = config.warm_up();
        if bars.len() < warm_up {
            log::debug!(
                "{config}: {} bars, {warm_up} needed, no complete rows",
                bars.len()
            );
            return Ok(Self {
                config,
                rows: Vec::new(),
            });
        }

        let line = |length: NonZero<usize>| {
            rolling_midpoints(bars.iter().map(|b| (b.high(), b.low())), length.get())
        };
        let tenkansen = line(config.tenkansen);
        let kijunsen = line(config.kijunsen);
        let leading_span_b = line(config.leading_span_b);

        let rows: Vec<IchimokuRow> = bars
            .iter()
            .zip(tenkansen.into_iter().zip(kijunsen).zip(leading_span_b))
            .enumerate()
            .filter_map(|(position, (bar, ((t, k), b)))| {
                Some(IchimokuRow {
                    position,
                    open_time: bar.open_time(),
                    value: IchimokuValue::from_lines(t?, k?, b?),
                })
            })
            .collect();

        let complete = bars.len() - warm_up + 1;
        if rows.len() < complete {
            log::debug!(
                "{config}: {} rows dropped for non-finite prices",
                complete - rows.len()
            );
        }
        log::trace!("{config}: {} rows from {} bars", rows.len(), bars.len());

        Ok(Self { config, rows })
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> IchimokuConfig {
        self.config
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Retained rows in input order.
    #[inline]
    #[must_use]
    pub fn rows(&self) -> &[IchimokuRow] {
        &self.rows
    }

    pub fn iter(&self) -> std::slice::Iter<'_, IchimokuRow> {
        self.rows.iter()
    }

    /// Row computed for the bar at `position` in the input, if retained.
    #[must_use]
    pub fn get(&self, position: usize) -> Option<&IchimokuRow> {
        self.rows
            .binary_search_by_key(&position, IchimokuRow::position)
            .ok()
            .map(|idx| &self.rows[idx])
    }

    /// Row of the most recent bar, if retained.
    #[must_use]
    pub fn last(&self) -> Option<&IchimokuRow> {
        self.rows.last()
    }
}

impl<'a> IntoIterator for &'a IchimokuSeries {
    type Item = &'a IchimokuRow;
    type IntoIter = std::slice::Iter<'a, IchimokuRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

impl IntoIterator for IchimokuSeries {
    type Item = IchimokuRow;
    type IntoIter = std::vec::IntoIter<IchimokuRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}

fn check_order<B: Ohlcv>(bars: &[B]) -> Result<(), InvalidInput> {
    if bars.is_empty() {
        return Err(InvalidInput::Empty);
    }

    for (idx, pair) in bars.windows(2).enumerate() {
        let (previous, current) = (pair[0].open_time(), pair[1].open_time());
        if current <= previous {
            return Err(InvalidInput::NotAscending {
                position: idx + 1,
                previous,
                current,
            });
        }
    }

    Ok(())
}

/// Streaming Ichimoku Kinko Hyo.
///
/// Produces, bar by bar, the same values [`IchimokuSeries::compute`] gives
/// for the whole series. Returns `None` until all four lines are defined,
/// i.e. for the first `warm_up - 1` bars, and while a non-finite price is
/// inside any window.
///
/// Each update scans the long window, O(`warm_up`) per bar. Supports live
/// repainting: feeding a bar with the same `open_time` replaces the current
/// bar without advancing the window.
///
/// # Example
///
/// ```
/// use ichimoku_ta::{Ichimoku, IchimokuConfig};
/// # use ichimoku_ta::{Ohlcv, Price, Timestamp};
/// #
/// # struct Bar(f64, f64, u64);
/// # impl Ohlcv for Bar {
/// #     fn open(&self) -> Price { self.1 }
/// #     fn high(&self) -> Price { self.0 }
/// #     fn low(&self) -> Price { self.1 }
/// #     fn close(&self) -> Price { self.0 }
/// #     fn open_time(&self) -> Timestamp { self.2 }
/// # }
///
/// let mut ichimoku = Ichimoku::new(IchimokuConfig::default());
///
/// for t in 1..52 {
///     assert!(ichimoku.compute(&Bar(10.0, 5.0, t)).is_none());
/// }
///
/// let value = ichimoku.compute(&Bar(10.0, 5.0, 52)).unwrap();
/// assert_eq!(value.tenkansen(), 7.5);
/// assert_eq!(value.leading_span_b(), 7.5);
/// ```
#[derive(Clone, Debug)]
pub struct Ichimoku {
    config: IchimokuConfig,
    window: BarWindow,
    current: Option<IchimokuValue>,
}

impl Indicator for Ichimoku {
    type Config = IchimokuConfig;
    type Output = IchimokuValue;

    fn new(config: Self::Config) -> Self {
        Self {
            config,
            window: BarWindow::new(config.warm_up()),
            current: None,
        }
    }

    #[inline]
    fn compute(&mut self, kline: &impl Ohlcv) -> Option<IchimokuValue> {
        self.window.add(kline);

        let line = |length: NonZero<usize>| self.window.midpoint(length.get());

        self.current = match (
            line(self.config.tenkansen),
            line(self.config.kijunsen),
            line(self.config.leading_span_b),
        ) {
            (Some(t), Some(k), Some(b)) => Some(IchimokuValue::from_lines(t, k, b)),
            _ => None,
        };

        self.current
    }

    #[inline]
    fn value(&self) -> Option<IchimokuValue> {
        self.current
    }
}

impl Display for Ichimoku {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Ichimoku({}, {}, {})",
            self.config.tenkansen, self.config.kijunsen, self.config.leading_span_b
        )
    }
}
