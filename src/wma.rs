use std::fmt::{Debug, Display};

use crate::{
    Indicator, Lifecycle, Price, ValueSink, indicator::indicator_config, price_window::PriceWindow,
};

indicator_config!(WmaConfig, WmaConfigBuilder, Wma, "WMA");

/// Weighted Moving Average (WMA).
///
/// Averages the last *n* values with linearly increasing weights: the oldest
/// value in the window has weight 1, the newest weight *n*. The result is
/// divided by the weight total `n(n + 1) / 2`.
///
/// The weighted sum is recomputed from the full window on every tick, which
/// is O(n). Produces nothing until *n* values have been received.
///
/// # Example
///
/// ```
/// use tickchain_ta::{Wma, WmaConfig};
///
/// let mut wma = Wma::new(WmaConfig::close(3).unwrap());
///
/// assert_eq!(wma.receive_tick(5.0, 1), None);
/// assert_eq!(wma.receive_tick(6.0, 2), None);
/// assert_eq!(wma.receive_tick(7.0, 3), Some(38.0 / 6.0));
/// assert_eq!(wma.receive_tick(8.0, 4), Some(44.0 / 6.0));
/// ```
#[derive(Clone, Debug)]
pub struct Wma {
    config: WmaConfig,
    window: PriceWindow,
    weight_total: f64,
    lifecycle: Lifecycle,
}

impl Indicator for Wma {
    type Config = WmaConfig;

    fn new(config: Self::Config) -> Self {
        let length = config.length();

        Self {
            config,
            window: PriceWindow::new(length),
            #[allow(clippy::cast_precision_loss)]
            weight_total: (length * (length + 1) / 2) as f64,
            lifecycle: Lifecycle::new(length),
        }
    }

    #[inline]
    fn config(&self) -> &Self::Config {
        &self.config
    }

    #[inline]
    fn lifecycle(&self) -> &Lifecycle {
        &self.lifecycle
    }

    #[inline]
    fn receive_tick_with<S>(&mut self, value: Price, index: usize, sink: &mut S)
    where
        S: ValueSink + ?Sized,
    {
        self.lifecycle.tick(index);
        self.window.push(value);

        if let Some(weighted_sum) = self.window.weighted_sum() {
            let wma = weighted_sum / self.weight_total;

            self.lifecycle.emit(wma, index);
            sink.value_available(wma, index);
        }
    }
}

impl Display for Wma {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "WMA({}, {})", self.config.length(), self.config.source())
    }
}
