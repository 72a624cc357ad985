use crate::Price;

/// Bookkeeping shared by every indicator.
///
/// Tracks how many ticks were received, how many values were emitted, the
/// external index of the first emission and the running extrema of all
/// emitted values. Concrete indicators hold one and report through it.
///
/// # Invariants
///
/// - `valid_from()` is `None` exactly while `length() == 0`, and never
///   changes once set.
/// - `length() == ticks() - (lookback() - 1)` once valid.
/// - `min_value()` and `max_value()` bound every emitted value and are each
///   attained by at least one of them.
#[derive(Clone, Debug)]
pub struct Lifecycle {
    lookback: usize,
    ticks: usize,
    length: usize,
    valid_from: Option<usize>,
    extrema: Option<(Price, Price)>,
    value: Option<Price>,
    last_index: Option<usize>,
}

impl Lifecycle {
    pub(crate) fn new(lookback: usize) -> Self {
        Self {
            lookback,
            ticks: 0,
            length: 0,
            valid_from: None,
            extrema: None,
            value: None,
            last_index: None,
        }
    }

    /// Counts an incoming tick.
    #[inline]
    pub(crate) fn tick(&mut self, index: usize) {
        debug_assert!(
            self.last_index.is_none_or(|last| last < index),
            "index must be strictly increasing: last={}, got={index}",
            self.last_index.unwrap_or(0),
        );

        self.last_index = Some(index);
        self.ticks += 1;
    }

    /// Records an emitted value produced for the tick at `index`.
    #[inline]
    pub(crate) fn emit(&mut self, value: Price, index: usize) {
        self.length += 1;

        if self.valid_from.is_none() {
            self.valid_from = Some(index);
        }

        self.extrema = Some(match self.extrema {
            None => (value, value),
            Some((min, max)) => (
                if value < min { value } else { min },
                if value > max { value } else { max },
            ),
        });

        self.value = Some(value);
    }

    /// Number of values the indicator needs before its first emission.
    #[inline]
    #[must_use]
    pub fn lookback(&self) -> usize {
        self.lookback
    }

    /// Ticks received so far.
    #[inline]
    #[must_use]
    pub fn ticks(&self) -> usize {
        self.ticks
    }

    /// Values emitted so far.
    #[inline]
    #[must_use]
    pub fn length(&self) -> usize {
        self.length
    }

    /// External index of the first emitted value.
    #[inline]
    #[must_use]
    pub fn valid_from(&self) -> Option<usize> {
        self.valid_from
    }

    #[inline]
    #[must_use]
    pub fn min_value(&self) -> Option<Price> {
        self.extrema.map(|(min, _)| min)
    }

    #[inline]
    #[must_use]
    pub fn max_value(&self) -> Option<Price> {
        self.extrema.map(|(_, max)| max)
    }

    /// Most recently emitted value.
    #[inline]
    #[must_use]
    pub fn value(&self) -> Option<Price> {
        self.value
    }
}
