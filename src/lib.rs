//! Streaming, chainable technical analysis indicators.
//!
//! Indicators consume one value (or one [`Ohlcv`] bar) per tick, tagged with
//! a strictly increasing external index. Results are `None` until the
//! lookback window is filled; from then on every tick produces a value.
//!
//! Each value an indicator produces is pushed synchronously to a
//! [`ValueSink`], which is how composites are built: [`Tema`] wires three
//! [`Ema`] stages together through their sinks, all inside one
//! [`receive_tick`](Tema::receive_tick) call.
//!
//! Every indicator tracks its own lifecycle (ticks, produced count, first
//! valid index, running min/max) through [`Lifecycle`]. Wrap one in a
//! [`Series`] to keep its full output history, and subscribe it to a
//! [`BarStream`] to have bars delivered to it.
//!
//! Each indicator type ([`Wma`], [`Ema`], [`Tema`], [`Variance`]) exposes
//! [`new`](Wma::new), [`receive_tick`](Wma::receive_tick),
//! [`receive_bar`](Wma::receive_bar), and [`value`](Wma::value) as inherent
//! methods; no trait import needed. Import [`Indicator`] for generic code
//! and for [`receive_tick_with`](Indicator::receive_tick_with).

mod ema;
mod error;
mod indicator;
mod lifecycle;
mod ohlcv;
mod price_source;
mod price_window;
mod ring_buffer;
mod series;
mod stream;
mod tema;
mod variance;
mod wma;

pub use crate::error::{Error, Result};
pub use crate::indicator::{Indicator, IndicatorConfig, IndicatorConfigBuilder, ValueSink};
pub use crate::lifecycle::Lifecycle;
pub use crate::ohlcv::{Bar, Ohlcv, Price, Timestamp};
pub use crate::price_source::PriceSource;
pub use crate::series::Series;
pub use crate::stream::{BarStream, BarSubscriber, SharedSubscriber};

pub use crate::ema::{Ema, EmaConfig, EmaConfigBuilder};
pub use crate::tema::{Tema, TemaConfig, TemaConfigBuilder};
pub use crate::variance::{Variance, VarianceConfig, VarianceConfigBuilder};
pub use crate::wma::{Wma, WmaConfig, WmaConfigBuilder};

macro_rules! impl_indicator_methods {
    ($type:ty, $config:ty) => {
        impl $type {
            /// See [`Indicator::new`].
            #[must_use]
            pub fn new(config: $config) -> Self {
                <Self as Indicator>::new(config)
            }

            /// See [`Indicator::receive_tick`].
            #[inline]
            pub fn receive_tick(&mut self, value: Price, index: usize) -> Option<Price> {
                <Self as Indicator>::receive_tick(self, value, index)
            }

            /// See [`Indicator::receive_bar`].
            #[inline]
            pub fn receive_bar(&mut self, bar: &impl Ohlcv, index: usize) -> Option<Price> {
                <Self as Indicator>::receive_bar(self, bar, index)
            }

            /// See [`Indicator::value`].
            #[must_use]
            #[inline]
            pub fn value(&self) -> Option<Price> {
                <Self as Indicator>::value(self)
            }

            /// See [`Indicator::valid_from`].
            #[must_use]
            #[inline]
            pub fn valid_from(&self) -> Option<usize> {
                <Self as Indicator>::valid_from(self)
            }

            /// See [`Indicator::length`].
            #[must_use]
            #[inline]
            pub fn length(&self) -> usize {
                <Self as Indicator>::length(self)
            }
        }
    };
}

impl_indicator_methods!(Wma, WmaConfig);
impl_indicator_methods!(Ema, EmaConfig);
impl_indicator_methods!(Tema, TemaConfig);
impl_indicator_methods!(Variance, VarianceConfig);

#[cfg(test)]
mod test_util;
