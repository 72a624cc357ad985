/// A price value.
///
/// Semantic alias for [`f64`]. Documents intent in function signatures
/// without introducing newtype construction overhead.
pub type Price = f64;

/// Bar open timestamp or sequence number.
pub type Timestamp = u64;

/// OHLCV bar data used as input to all indicators.
///
/// Implement this on your own kline/candle type to avoid per-tick
/// conversion. Indicators accept `&impl Ohlcv` and extract the
/// configured [`PriceSource`](crate::PriceSource) internally.
///
/// # Example
///
/// ```
/// use tickchain_ta::{Ohlcv, Price, Timestamp};
///
/// struct MyKline {
///     o: f64, h: f64, l: f64, c: f64,
///     ts: u64,
/// }
///
/// impl Ohlcv for MyKline {
///     fn open(&self) -> Price { self.o }
///     fn high(&self) -> Price { self.h }
///     fn low(&self) -> Price { self.l }
///     fn close(&self) -> Price { self.c }
///     fn open_time(&self) -> Timestamp { self.ts }
/// }
/// ```
pub trait Ohlcv {
    /// Opening price of the bar.
    fn open(&self) -> Price;

    /// Highest price during the bar.
    fn high(&self) -> Price;

    /// Lowest price during the bar.
    fn low(&self) -> Price;

    /// Closing price of the bar.
    fn close(&self) -> Price;

    /// Bar open timestamp or sequence number.
    ///
    /// Indicators do not read this: bars are positioned by the external
    /// index passed alongside them.
    fn open_time(&self) -> Timestamp;

    /// Trade volume during the bar. Defaults to `0.0`.
    fn volume(&self) -> f64 {
        0.0
    }
}

/// Immutable OHLCV bar.
///
/// A ready-made [`Ohlcv`] implementation for callers without their own
/// candle type. Fields are only readable after construction.
///
/// ```
/// use tickchain_ta::{Bar, Ohlcv};
///
/// let bar = Bar::new(1_700_000_000, 10.0, 12.0, 9.5, 11.0, 250.0);
/// assert_eq!(bar.close(), 11.0);
/// assert_eq!(bar.volume(), 250.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bar {
    open_time: Timestamp,
    open: Price,
    high: Price,
    low: Price,
    close: Price,
    volume: f64,
}

impl Bar {
    #[must_use]
    pub const fn new(
        open_time: Timestamp,
        open: Price,
        high: Price,
        low: Price,
        close: Price,
        volume: f64,
    ) -> Self {
        Self {
            open_time,
            open,
            high,
            low,
            close,
            volume,
        }
    }
}

impl Ohlcv for Bar {
    #[inline]
    fn open(&self) -> Price {
        self.open
    }

    #[inline]
    fn high(&self) -> Price {
        self.high
    }

    #[inline]
    fn low(&self) -> Price {
        self.low
    }

    #[inline]
    fn close(&self) -> Price {
        self.close
    }

    #[inline]
    fn open_time(&self) -> Timestamp {
        self.open_time
    }

    #[inline]
    fn volume(&self) -> f64 {
        self.volume
    }
}
