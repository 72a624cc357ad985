use crate::{Lifecycle, Ohlcv, Price, PriceSource, Result};

use std::{
    fmt::{Debug, Display},
    hash::Hash,
};

/// Configuration for a technical [`Indicator`].
///
/// Every indicator has a corresponding config type that holds its parameters
/// (length, price source). Configs are value types: cheap to clone,
/// compare, and hash. A config only exists once its length has been
/// validated, so every indicator built from one is usable.
pub trait IndicatorConfig: Sized + PartialEq + Eq + Hash + Display + Debug {
    /// Builder type for constructing this config.
    type Builder: IndicatorConfigBuilder<Self>;

    /// Returns a new builder with default values.
    fn builder() -> Self::Builder;

    /// Lookback period (number of bars).
    fn length(&self) -> usize;

    /// Price source to extract from each bar.
    fn source(&self) -> &PriceSource;
}

/// Builder for an [`IndicatorConfig`].
pub trait IndicatorConfigBuilder<Config>
where
    Config: IndicatorConfig,
{
    /// Sets the lookback period.
    #[must_use]
    fn length(self, length: usize) -> Self;

    /// Sets the price source.
    #[must_use]
    fn source(self, source: PriceSource) -> Self;

    /// Builds the config.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingLength`](crate::Error::MissingLength) when no
    /// length was set and [`Error::InvalidLength`](crate::Error::InvalidLength)
    /// when it is zero.
    fn build(self) -> Result<Config>;
}

/// Receiver of values as an indicator produces them.
///
/// This is the value-available callback: indicators invoke it synchronously,
/// inside the tick call that produced the value, with the value and the
/// external index of the tick. Any `FnMut(Price, usize)` closure is a sink.
pub trait ValueSink {
    /// Called once per produced value, with the index of the tick that
    /// produced it.
    fn value_available(&mut self, value: Price, index: usize);
}

impl<F> ValueSink for F
where
    F: FnMut(Price, usize),
{
    #[inline]
    fn value_available(&mut self, value: Price, index: usize) {
        self(value, index);
    }
}

/// A streaming technical indicator.
///
/// Indicators keep a fixed-size window and update it on every tick. Each
/// tick is tagged with its external index, and indices must be strictly
/// increasing.
///
/// Once the lookback is satisfied every tick produces a value, which is
/// recorded in the indicator's [`Lifecycle`] and then handed to the sink.
/// Indicators themselves keep no output history; wrap one in a
/// [`Series`](crate::Series) for that.
///
/// # Panics
///
/// In debug builds, feeding an index that is not greater than the previous
/// one panics. Release builds do not check the ordering; out-of-order ticks
/// then give wrong results without any report.
///
/// # Example
///
/// ```
/// use tickchain_ta::{Indicator, Wma, WmaConfig};
///
/// let mut wma = Wma::new(WmaConfig::close(3).unwrap());
///
/// assert_eq!(wma.receive_tick(5.0, 1), None);
/// assert_eq!(wma.receive_tick(6.0, 2), None);
/// // (1×5 + 2×6 + 3×7) / 6
/// assert_eq!(wma.receive_tick(7.0, 3), Some(38.0 / 6.0));
/// assert_eq!(wma.valid_from(), Some(3));
/// ```
pub trait Indicator: Sized + Clone + Display + Debug {
    /// Configuration type for this indicator.
    type Config: IndicatorConfig;

    /// Creates a new indicator from the given config.
    fn new(config: Self::Config) -> Self;

    /// Configuration the indicator was built with.
    fn config(&self) -> &Self::Config;

    /// Tick, emission and extrema bookkeeping.
    fn lifecycle(&self) -> &Lifecycle;

    /// Feeds one value, invoking `sink` if the tick produced a result.
    fn receive_tick_with<S>(&mut self, value: Price, index: usize, sink: &mut S)
    where
        S: ValueSink + ?Sized;

    /// Extracts the configured [`PriceSource`] from `bar` and feeds it
    /// through [`receive_tick_with`](Indicator::receive_tick_with).
    #[inline]
    fn receive_bar_with<S>(&mut self, bar: &impl Ohlcv, index: usize, sink: &mut S)
    where
        S: ValueSink + ?Sized,
    {
        let value = self.config().source().extract(bar);
        self.receive_tick_with(value, index, sink);
    }

    /// Feeds one value and returns the produced result, if any.
    #[inline]
    fn receive_tick(&mut self, value: Price, index: usize) -> Option<Price> {
        let mut produced = None;
        self.receive_tick_with(value, index, &mut |value: Price, _: usize| {
            produced = Some(value);
        });
        produced
    }

    /// Feeds one bar and returns the produced result, if any.
    #[inline]
    fn receive_bar(&mut self, bar: &impl Ohlcv, index: usize) -> Option<Price> {
        let value = self.config().source().extract(bar);
        self.receive_tick(value, index)
    }

    /// Last produced value without advancing state.
    #[inline]
    fn value(&self) -> Option<Price> {
        self.lifecycle().value()
    }

    /// Number of values produced so far.
    #[inline]
    fn length(&self) -> usize {
        self.lifecycle().length()
    }

    /// External index of the first produced value, `None` until then.
    #[inline]
    fn valid_from(&self) -> Option<usize> {
        self.lifecycle().valid_from()
    }

    /// Smallest value produced so far.
    #[inline]
    fn min_value(&self) -> Option<Price> {
        self.lifecycle().min_value()
    }

    /// Largest value produced so far.
    #[inline]
    fn max_value(&self) -> Option<Price> {
        self.lifecycle().max_value()
    }
}

/// Generates a length + source config type and its builder.
macro_rules! indicator_config {
    ($config:ident, $builder:ident, $indicator:ident, $name:literal) => {
        #[doc = concat!(
            "Configuration for the [`", stringify!($indicator), "`](crate::",
            stringify!($indicator), ") indicator."
        )]
        ///
        /// Construct with [`new`](Self::new), [`close`](Self::close), or the
        /// builder. The lookback length must be positive.
        #[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
        pub struct $config {
            length: usize,
            source: $crate::PriceSource,
        }

        impl $crate::IndicatorConfig for $config {
            type Builder = $builder;

            #[inline]
            fn builder() -> Self::Builder {
                $builder::new()
            }

            #[inline]
            fn length(&self) -> usize {
                self.length
            }

            #[inline]
            fn source(&self) -> &$crate::PriceSource {
                &self.source
            }
        }

        impl $config {
            /// Config with the given lookback length and price source.
            ///
            /// # Errors
            ///
            /// Returns [`Error::InvalidLength`](crate::Error::InvalidLength)
            /// when `length` is zero.
            pub fn new(length: usize, source: $crate::PriceSource) -> $crate::Result<Self> {
                if length == 0 {
                    return Err($crate::Error::InvalidLength {
                        indicator: $name,
                        length,
                    });
                }

                Ok(Self { length, source })
            }

            /// Config on closing price.
            ///
            /// # Errors
            ///
            /// Returns [`Error::InvalidLength`](crate::Error::InvalidLength)
            /// when `length` is zero.
            pub fn close(length: usize) -> $crate::Result<Self> {
                Self::new(length, $crate::PriceSource::Close)
            }

            /// Lookback period (number of bars).
            #[inline]
            #[must_use]
            pub fn length(&self) -> usize {
                self.length
            }

            /// Price source extracted from each bar.
            #[inline]
            #[must_use]
            pub fn source(&self) -> $crate::PriceSource {
                self.source
            }
        }

        impl std::fmt::Display for $config {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(
                    f,
                    concat!(stringify!($config), "({}, {})"),
                    self.length, self.source
                )
            }
        }

        #[doc = concat!("Builder for [`", stringify!($config), "`].")]
        ///
        /// Defaults: source = [`PriceSource::Close`](crate::PriceSource::Close).
        /// Length must be set before calling
        /// [`build`](crate::IndicatorConfigBuilder::build).
        pub struct $builder {
            length: Option<usize>,
            source: $crate::PriceSource,
        }

        impl $builder {
            fn new() -> Self {
                Self {
                    length: None,
                    source: $crate::PriceSource::Close,
                }
            }
        }

        impl $crate::IndicatorConfigBuilder<$config> for $builder {
            #[inline]
            fn length(mut self, length: usize) -> Self {
                self.length.replace(length);
                self
            }

            #[inline]
            fn source(mut self, source: $crate::PriceSource) -> Self {
                self.source = source;
                self
            }

            fn build(self) -> $crate::Result<$config> {
                let length = self
                    .length
                    .ok_or($crate::Error::MissingLength { indicator: $name })?;

                $config::new(length, self.source)
            }
        }
    };
}

pub(crate) use indicator_config;
