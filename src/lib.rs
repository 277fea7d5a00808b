//! Ichimoku Kinko Hyo lines over OHLCV series.
//!
//! [`IchimokuSeries::compute`] turns a whole series into the conversion line
//! (tenkansen), base line (kijunsen), leading span A and leading span B,
//! keeping only the rows where all four are defined. [`Ichimoku`] produces
//! the same values bar by bar for live data.
//!
//! Inputs are any type implementing [`Ohlcv`]; raw exchange matrices can be
//! converted with [`candles_from_rows`]. Window lengths come from
//! [`IchimokuConfig`], 9/26/52 by default.
//!
//! [`Ichimoku`] exposes [`new`](Ichimoku::new), [`compute`](Ichimoku::compute),
//! and [`value`](Ichimoku::value) as inherent methods, no trait import
//! needed. Import [`Indicator`] only for generic code.

mod bar_window;
mod error;
mod ichimoku;
mod indicator;
mod ohlcv;
mod rolling;

pub use crate::error::{Error, InvalidInput, Result};
pub use crate::indicator::{Indicator, IndicatorConfig};
pub use crate::ohlcv::{Candle, Ohlcv, Price, Timestamp, candles_from_rows};

pub use crate::ichimoku::{
    Ichimoku, IchimokuConfig, IchimokuConfigBuilder, IchimokuRow, IchimokuSeries, IchimokuValue,
};

macro_rules! impl_indicator_methods {
    ($type:ty, $config:ty, $output:ty) => {
        impl $type {
            /// See [`Indicator::new`].
            #[must_use]
            pub fn new(config: $config) -> Self {
                <Self as Indicator>::new(config)
            }

            /// See [`Indicator::compute`].
            #[inline]
            pub fn compute(&mut self, kline: &impl Ohlcv) -> Option<$output> {
                <Self as Indicator>::compute(self, kline)
            }

            /// See [`Indicator::value`].
            #[must_use]
            #[inline]
            pub fn value(&self) -> Option<$output> {
                <Self as Indicator>::value(self)
            }
        }
    };
}

impl_indicator_methods!(Ichimoku, IchimokuConfig, IchimokuValue);

#[cfg(test)]
mod test_util;
