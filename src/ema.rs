use std::fmt::{Debug, Display};

use crate::{
    Indicator, Lifecycle, Price, TemaConfig, ValueSink, indicator::indicator_config,
    price_window::PriceWindow,
};

indicator_config!(EmaConfig, EmaConfigBuilder, Ema, "EMA");

/// Exponential Moving Average (EMA).
///
/// A weighted moving average that gives more weight to recent
/// prices. Uses the standard smoothing factor
/// `α = 2 / (length + 1)`. Each value is computed as:
///
/// ```text
/// EMA = α × price + (1 − α) × prev_EMA
/// ```
///
/// The first `length` values are collected to compute an SMA
/// seed, which is the first emitted value. After seeding, the
/// seed window is dropped and the EMA runs with O(1) constant
/// memory per tick via a single fused multiply-add.
///
/// EMA is also the building block of [`Tema`](crate::Tema), which
/// chains three instances through their value sinks.
///
/// # Example
///
/// ```
/// use tickchain_ta::{Ema, EmaConfig};
///
/// let mut ema = Ema::new(EmaConfig::close(3).unwrap());
///
/// // Seeding phase: collecting SMA
/// assert_eq!(ema.receive_tick(2.0, 1), None);
/// assert_eq!(ema.receive_tick(4.0, 2), None);
///
/// // SMA seed = (2 + 4 + 6) / 3 = 4.0
/// assert_eq!(ema.receive_tick(6.0, 3), Some(4.0));
///
/// // EMA(3) α = 0.5: 8 × 0.5 + 4 × 0.5 = 6.0
/// assert_eq!(ema.receive_tick(8.0, 4), Some(6.0));
/// ```
#[derive(Clone, Debug)]
pub struct Ema {
    config: EmaConfig,
    seed: Option<PriceWindow>,
    alpha: f64,
    previous: Price,
    lifecycle: Lifecycle,
}

impl Indicator for Ema {
    type Config = EmaConfig;

    fn new(config: Self::Config) -> Self {
        let length = config.length();

        Self {
            config,
            seed: Some(PriceWindow::new(length)),
            #[allow(clippy::cast_precision_loss)]
            alpha: 2.0 / (length + 1) as f64,
            previous: 0.0,
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

        let ema = if let Some(seed) = &mut self.seed {
            seed.push(value);

            let Some(sum) = seed.sum() else {
                return;
            };

            self.seed = None;
            #[allow(clippy::cast_precision_loss)]
            let seed_length = self.config.length() as f64;
            sum / seed_length
        } else {
            self.alpha.mul_add(value - self.previous, self.previous)
        };

        self.previous = ema;
        self.lifecycle.emit(ema, index);
        sink.value_available(ema, index);
    }
}

/// Stage config for the EMAs inside a [`Tema`](crate::Tema): same length,
/// same source.
impl From<TemaConfig> for EmaConfig {
    fn from(config: TemaConfig) -> Self {
        Self {
            length: config.length(),
            source: config.source(),
        }
    }
}

impl Display for Ema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "EMA({}, {})", self.config.length(), self.config.source())
    }
}
