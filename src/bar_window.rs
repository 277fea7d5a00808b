use crate::{Ohlcv, Price, Timestamp};
use std::collections::VecDeque;

/// High/low pairs of the most recent `size` bars, with live repaint support.
///
/// Feeding a bar with the same `open_time` as the previous one replaces the
/// newest entry instead of advancing the window.
#[derive(Clone, Debug)]
pub(crate) struct BarWindow {
    size: usize,
    window: VecDeque<(Price, Price)>,
    last_open_time: Option<Timestamp>,
}

impl BarWindow {
    pub(crate) fn new(size: usize) -> Self {
        Self {
            size,
            window: VecDeque::with_capacity(size),
            last_open_time: None,
        }
    }

    #[inline]
    pub(crate) fn add(&mut self, ohlcv: &impl Ohlcv) {
        debug_assert!(
            self.last_open_time.is_none_or(|t| t <= ohlcv.open_time()),
            "open_time must be non-decreasing: last={}, got={}",
            self.last_open_time.unwrap_or(0),
            ohlcv.open_time(),
        );

        let is_next_timeframe = self.last_open_time.is_none_or(|t| t < ohlcv.open_time());

        if is_next_timeframe {
            self.last_open_time = Some(ohlcv.open_time());
            if self.window.len() == self.size {
                self.window.pop_front();
            }
        } else {
            self.window.pop_back();
        }

        self.window.push_back((ohlcv.high(), ohlcv.low()));
    }

    /// Midpoint of the lowest low and highest high over the newest `length`
    /// bars. `None` if fewer bars have been seen or any of them carries a
    /// non-finite price.
    pub(crate) fn midpoint(&self, length: usize) -> Option<Price> {
        debug_assert!(length <= self.size, "length exceeds window size");

        let skip = self.window.len().checked_sub(length)?;
        let mut highest = f64::NEG_INFINITY;
        let mut lowest = f64::INFINITY;

        for &(high, low) in self.window.iter().skip(skip) {
            if !high.is_finite() || !low.is_finite() {
                return None;
            }
            highest = highest.max(high);
            lowest = lowest.min(low);
        }

        Some(f64::midpoint(lowest, highest))
    }
}
