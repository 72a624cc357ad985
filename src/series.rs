use std::{cell::RefCell, fmt::Display, rc::Rc};

use tracing::debug;

use crate::{BarStream, BarSubscriber, Indicator, IndicatorConfig, Ohlcv, Price, ValueSink};

/// An indicator together with every value it has produced.
///
/// Bare indicators keep only their latest value. `Series` appends each
/// produced value to [`data`](Self::data), so `data()[k]` belongs to the
/// external index `valid_from() + k` when indices are consecutive.
///
/// # Example
///
/// ```
/// use tickchain_ta::{Series, Variance, VarianceConfig};
///
/// let mut var = Series::<Variance>::new(VarianceConfig::close(3).unwrap());
///
/// for (i, v) in [5.0, 6.0, 7.0, 8.0, 9.0].into_iter().enumerate() {
///     var.receive_tick(v, i + 1);
/// }
///
/// assert_eq!(var.data().len(), 3);
/// assert_eq!(var.valid_from(), Some(3));
/// ```
#[derive(Clone, Debug)]
pub struct Series<I> {
    indicator: I,
    data: Vec<Price>,
}

impl<I: Indicator> Series<I> {
    #[must_use]
    pub fn new(config: I::Config) -> Self {
        Self {
            indicator: I::new(config),
            data: Vec::new(),
        }
    }

    /// Builds a series and subscribes it to `stream`.
    ///
    /// The returned handle is shared with the stream: every bar published
    /// afterwards reaches the indicator, and the caller reads results
    /// through the same handle.
    pub fn attach<B>(stream: &mut BarStream<B>, config: I::Config) -> Rc<RefCell<Self>>
    where
        I: 'static,
        B: Ohlcv + 'static,
    {
        let series = Rc::new(RefCell::new(Self::new(config)));
        stream.subscribe(series.clone());
        series
    }

    /// Feeds one value, storing and returning the produced result, if any.
    #[inline]
    pub fn receive_tick(&mut self, value: Price, index: usize) -> Option<Price> {
        let mut produced = None;
        self.receive_tick_with(value, index, &mut |value: Price, _: usize| {
            produced = Some(value);
        });
        produced
    }

    #[inline]
    pub fn receive_bar(&mut self, bar: &impl Ohlcv, index: usize) -> Option<Price> {
        let value = IndicatorConfig::source(self.indicator.config()).extract(bar);
        self.receive_tick(value, index)
    }

    /// Feeds one value; a produced result is stored first, then handed to
    /// `sink`.
    pub fn receive_tick_with<S>(&mut self, value: Price, index: usize, sink: &mut S)
    where
        S: ValueSink + ?Sized,
    {
        let Self { indicator, data } = self;
        let was_valid = !data.is_empty();

        indicator.receive_tick_with(value, index, &mut |value: Price, index: usize| {
            data.push(value);
            sink.value_available(value, index);
        });

        if !was_valid && !data.is_empty() {
            debug!(indicator = %indicator, index, "series became valid");
        }
    }

    /// Every value produced so far, oldest first.
    #[inline]
    #[must_use]
    pub fn data(&self) -> &[Price] {
        &self.data
    }

    #[inline]
    #[must_use]
    pub fn indicator(&self) -> &I {
        &self.indicator
    }

    /// Number of stored values.
    #[inline]
    #[must_use]
    pub fn length(&self) -> usize {
        self.data.len()
    }

    #[inline]
    #[must_use]
    pub fn valid_from(&self) -> Option<usize> {
        self.indicator.valid_from()
    }

    #[inline]
    #[must_use]
    pub fn min_value(&self) -> Option<Price> {
        self.indicator.min_value()
    }

    #[inline]
    #[must_use]
    pub fn max_value(&self) -> Option<Price> {
        self.indicator.max_value()
    }

    /// Most recent value.
    #[inline]
    #[must_use]
    pub fn value(&self) -> Option<Price> {
        self.indicator.value()
    }
}

impl<I, B> BarSubscriber<B> for Series<I>
where
    I: Indicator,
    B: Ohlcv,
{
    #[inline]
    fn receive_bar(&mut self, bar: &B, index: usize) {
        Series::receive_bar(self, bar, index);
    }
}

impl<I: Display> Display for Series<I> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.indicator, f)
    }
}
