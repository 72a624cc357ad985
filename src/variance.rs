use std::fmt::{Debug, Display};

use crate::{
    Indicator, Lifecycle, Price, ValueSink,
    indicator::indicator_config,
    price_window::{PriceWindow, PriceWindowWithSumOfSquares},
};

indicator_config!(VarianceConfig, VarianceConfigBuilder, Variance, "VAR");

/// Running population variance over the last *n* values.
///
/// Keeps running sums of deviations `d = x − shift` and their squares over
/// a fixed window, so each tick is amortised O(1):
///
/// ```text
/// VAR = Σd² / n − (Σd / n)²
/// ```
///
/// The shift is a value from the window, so the sums stay on the scale of
/// the spread rather than the price level. Rounding can still leave the
/// difference a hair below zero on near-constant input; the result is
/// clamped at `0.0`.
///
/// # Example
///
/// ```
/// use tickchain_ta::{Variance, VarianceConfig};
///
/// let mut var = Variance::new(VarianceConfig::close(3).unwrap());
///
/// assert_eq!(var.receive_tick(5.0, 1), None);
/// assert_eq!(var.receive_tick(6.0, 2), None);
///
/// // mean = 6, squared deviations 1 + 0 + 1
/// let value = var.receive_tick(7.0, 3).unwrap();
/// assert!((value - 2.0 / 3.0).abs() < 1e-12);
/// ```
#[derive(Clone, Debug)]
pub struct Variance {
    config: VarianceConfig,
    window: PriceWindowWithSumOfSquares,
    length_reciprocal: f64,
    lifecycle: Lifecycle,
}

impl Indicator for Variance {
    type Config = VarianceConfig;

    fn new(config: Self::Config) -> Self {
        let length = config.length();

        Self {
            config,
            window: PriceWindow::with_sum_of_squares(length),
            #[allow(clippy::cast_precision_loss)]
            length_reciprocal: 1.0 / length as f64,
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

        let Some((deviation_sum, deviation_sum_of_squares)) = self.window.deviation_sums() else {
            return;
        };

        let mean_deviation = deviation_sum * self.length_reciprocal;
        let variance = deviation_sum_of_squares
            .mul_add(self.length_reciprocal, -(mean_deviation * mean_deviation))
            .max(0.0);

        self.lifecycle.emit(variance, index);
        sink.value_available(variance, index);
    }
}

impl Display for Variance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "VAR({}, {})", self.config.length(), self.config.source())
    }
}
