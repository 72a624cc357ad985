use std::fmt::{Debug, Display};

use crate::{
    Ema, EmaConfig, Indicator, Lifecycle, Price, ValueSink, indicator::indicator_config,
};

indicator_config!(TemaConfig, TemaConfigBuilder, Tema, "TEMA");

/// Triple Exponential Moving Average (TEMA).
///
/// Three EMA stages of the same length are cascaded: the first smooths the
/// input, the second smooths the first stage's output, and the third
/// smooths the second's. Their latest values are combined as
///
/// ```text
/// TEMA = 3 × EMA₁ − 3 × EMA₂ + EMA₃
/// ```
///
/// Ticks enter the first stage only; each stage forwards its output to the
/// next through its value sink, all within the same
/// [`receive_tick`](Tema::receive_tick) call.
///
/// # Warm-up
///
/// Every stage must fill its own window before it emits, so the first TEMA
/// value arrives on the `3 × (length − 1) + 1`-th tick, `2 × (length − 1)`
/// ticks after a lone EMA of the same length would become valid.
/// [`lookback`](Lifecycle::lookback) reports this effective lookback.
///
/// # Example
///
/// ```
/// use tickchain_ta::{Tema, TemaConfig};
///
/// let mut tema = Tema::new(TemaConfig::close(2).unwrap());
///
/// assert_eq!(tema.receive_tick(1.0, 1), None);
/// assert_eq!(tema.receive_tick(2.0, 2), None);
/// assert_eq!(tema.receive_tick(3.0, 3), None);
/// assert!(tema.receive_tick(4.0, 4).is_some());
/// assert_eq!(tema.valid_from(), Some(4));
/// ```
#[derive(Clone, Debug)]
pub struct Tema {
    config: TemaConfig,
    ema1: Ema,
    ema2: Ema,
    ema3: Ema,
    current_ema: Price,
    current_ema2: Price,
    lifecycle: Lifecycle,
}

impl Indicator for Tema {
    type Config = TemaConfig;

    fn new(config: Self::Config) -> Self {
        let stage = EmaConfig::from(config);

        Self {
            config,
            ema1: Ema::new(stage),
            ema2: Ema::new(stage),
            ema3: Ema::new(stage),
            current_ema: 0.0,
            current_ema2: 0.0,
            lifecycle: Lifecycle::new(3 * (config.length() - 1) + 1),
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

    fn receive_tick_with<S>(&mut self, value: Price, index: usize, sink: &mut S)
    where
        S: ValueSink + ?Sized,
    {
        let Self {
            ema1,
            ema2,
            ema3,
            current_ema,
            current_ema2,
            lifecycle,
            ..
        } = self;

        lifecycle.tick(index);

        ema1.receive_tick_with(value, index, &mut |first: Price, index: usize| {
            *current_ema = first;

            ema2.receive_tick_with(first, index, &mut |second: Price, index: usize| {
                *current_ema2 = second;

                ema3.receive_tick_with(second, index, &mut |third: Price, index: usize| {
                    let tema = 3.0 * *current_ema - 3.0 * *current_ema2 + third;

                    lifecycle.emit(tema, index);
                    sink.value_available(tema, index);
                });
            });
        });
    }
}

impl Display for Tema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TEMA({}, {})", self.config.length(), self.config.source())
    }
}
