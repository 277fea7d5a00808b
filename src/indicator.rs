use crate::Ohlcv;

use std::{
    fmt::{Debug, Display},
    hash::Hash,
};

/// Configuration for a technical [`Indicator`].
///
/// Configs are value types: cheap to clone, compare, and hash, so they can
/// key caches of computed series in the hosting application.
pub trait IndicatorConfig: Sized + PartialEq + Eq + Hash + Display + Debug {
    /// Builder type for constructing this config.
    type Builder;

    /// Returns a new builder with default values.
    fn builder() -> Self::Builder;

    /// Number of bars needed before the indicator produces its first value.
    fn warm_up(&self) -> usize;
}

/// A streaming technical indicator.
///
/// Indicators maintain internal state and update incrementally on each call to
/// [`compute`](Indicator::compute). Output is `None` until enough data has been
/// received.
///
/// # Example
///
/// ```
/// use ichimoku_ta::{Ichimoku, IchimokuConfig, Indicator, IndicatorConfig};
/// # use ichimoku_ta::{Ohlcv, Price, Timestamp};
/// #
/// # struct Bar(f64, u64);
/// # impl Ohlcv for Bar {
/// #     fn open(&self) -> Price { self.0 }
/// #     fn high(&self) -> Price { self.0 + 1.0 }
/// #     fn low(&self) -> Price { self.0 - 1.0 }
/// #     fn close(&self) -> Price { self.0 }
/// #     fn open_time(&self) -> Timestamp { self.1 }
/// # }
///
/// let config = IchimokuConfig::default();
/// let mut ichimoku = Ichimoku::new(config);
///
/// for t in 1..config.warm_up() as u64 {
///     assert!(ichimoku.compute(&Bar(100.0, t)).is_none());
/// }
/// assert!(ichimoku.compute(&Bar(100.0, 52)).is_some());
/// ```
pub trait Indicator: Sized + Clone + Display + Debug {
    /// Configuration type for this indicator.
    type Config: IndicatorConfig;

    /// Computed output type.
    type Output: Send + Sync + Display + Debug;

    /// Creates a new indicator from the given config.
    fn new(config: Self::Config) -> Self;

    /// Feeds a bar and returns the updated indicator value,
    /// or `None` if not yet defined.
    fn compute(&mut self, kline: &impl Ohlcv) -> Option<Self::Output>;

    /// Returns the last computed indicator value without advancing state.
    ///
    /// This is a cached field read, O(1) with no computation.
    fn value(&self) -> Option<Self::Output>;
}
