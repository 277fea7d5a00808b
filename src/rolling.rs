use crate::Price;

use std::collections::VecDeque;

/// Rolling `(min(low) + max(high)) / 2` over the last `length` bars.
///
/// Keeps two monotonic deques of `(position, value)`: lows in increasing
/// order, highs in decreasing order. The window extreme is always at the
/// front, so each bar is pushed and popped at most once, O(1) amortized.
///
/// A bar with a non-finite high or low is never queued. Its position is
/// remembered instead, and every window that still contains it yields
/// `None`.
#[derive(Clone, Debug)]
pub(crate) struct RollingMidpoint {
    length: usize,
    next_position: usize,
    lows: VecDeque<(usize, Price)>,
    highs: VecDeque<(usize, Price)>,
    last_missing: Option<usize>,
}

impl RollingMidpoint {
    pub(crate) fn new(length: usize) -> Self {
        debug_assert!(length > 0, "window length must be positive");

        Self {
            length,
            next_position: 0,
            lows: VecDeque::with_capacity(length),
            highs: VecDeque::with_capacity(length),
            last_missing: None,
        }
    }

    /// Appends the next bar and returns the midpoint of the window ending at
    /// it, or `None` during warm-up or while a missing price is in range.
    pub(crate) fn push(&mut self, high: Price, low: Price) -> Option<Price> {
        let position = self.next_position;
        self.next_position += 1;

        if high.is_finite() && low.is_finite() {
            while self.lows.back().is_some_and(|&(_, v)| v >= low) {
                self.lows.pop_back();
            }
            self.lows.push_back((position, low));

            while self.highs.back().is_some_and(|&(_, v)| v <= high) {
                self.highs.pop_back();
            }
            self.highs.push_back((position, high));
        } else {
            self.last_missing = Some(position);
        }

        let start = (position + 1).checked_sub(self.length)?;

        while self.lows.front().is_some_and(|&(p, _)| p < start) {
            self.lows.pop_front();
        }
        while self.highs.front().is_some_and(|&(p, _)| p < start) {
            self.highs.pop_front();
        }

        if self.last_missing.is_some_and(|p| p >= start) {
            return None;
        }

        let &(_, lowest) = self.lows.front()?;
        let &(_, highest) = self.highs.front()?;

        Some(f64::midpoint(lowest, highest))
    }
}

/// Rolling midpoint for every bar of a high/low series.
///
/// Entry `i` is `None` for `i < length - 1` and wherever the window
/// `[i - length + 1, i]` holds a non-finite price.
pub(crate) fn rolling_midpoints<I>(bars: I, length: usize) -> Vec<Option<Price>>
where
    I: IntoIterator<Item = (Price, Price)>,
{
    let mut window = RollingMidpoint::new(length);

    bars.into_iter()
        .map(|(high, low)| window.push(high, low))
        .collect()
}
