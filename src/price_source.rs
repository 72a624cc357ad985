use crate::{Ohlcv, Price};

use std::fmt::{Debug, Display};

/// Field selector applied to an [`Ohlcv`] bar before feeding an indicator.
///
/// Each indicator is configured with a `PriceSource` that determines which
/// value (or derived value) it computes on. Extraction is pure: the same bar
/// always yields the same scalar, so one source can be shared by every
/// indicator following the same price series.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Default, Debug)]
pub enum PriceSource {
    /// Opening price.
    Open,
    /// Highest price.
    High,
    /// Lowest price.
    Low,
    /// Closing price.
    #[default]
    Close,
    /// Traded volume.
    Volume,
    /// Median price: `(high + low) / 2`.
    HL2,
    /// Typical price: `(high + low + close) / 3`.
    HLC3,
    /// Average price: `(open + high + low + close) / 4`.
    OHLC4,
    /// Weighted close: `(high + low + close + close) / 4`.
    HLCC4,
}

impl Display for PriceSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

impl PriceSource {
    /// Selects this source's scalar from `ohlcv`.
    #[inline]
    #[must_use]
    pub fn extract(self, ohlcv: &impl Ohlcv) -> Price {
        match self {
            Self::Open => ohlcv.open(),
            Self::High => ohlcv.high(),
            Self::Low => ohlcv.low(),
            Self::Close => ohlcv.close(),
            Self::Volume => ohlcv.volume(),
            Self::HL2 => f64::midpoint(ohlcv.high(), ohlcv.low()),
            Self::HLC3 => (ohlcv.high() + ohlcv.low() + ohlcv.close()) / 3.0,
            Self::OHLC4 => (ohlcv.open() + ohlcv.high() + ohlcv.low() + ohlcv.close()) / 4.0,
            Self::HLCC4 => (ohlcv.high() + ohlcv.low() + ohlcv.close() + ohlcv.close()) / 4.0,
        }
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::Bar;
    use crate::test_util::assert_approx;

    // open 10, high 30, low 5, close 20, volume 1000
    const BAR: Bar = Bar::new(0, 10.0, 30.0, 5.0, 20.0, 1_000.0);

    #[test]
    fn raw_fields() {
        for (source, expected) in [
            (PriceSource::Open, 10.0),
            (PriceSource::High, 30.0),
            (PriceSource::Low, 5.0),
            (PriceSource::Close, 20.0),
            (PriceSource::Volume, 1_000.0),
        ] {
            assert_eq!(source.extract(&BAR), expected, "{source}");
        }
    }

    #[test]
    fn derived_prices() {
        // (30 + 5) / 2
        assert_eq!(PriceSource::HL2.extract(&BAR), 17.5);
        // (30 + 5 + 20) / 3
        assert_approx!(PriceSource::HLC3.extract(&BAR), 55.0 / 3.0);
        // (10 + 30 + 5 + 20) / 4
        assert_eq!(PriceSource::OHLC4.extract(&BAR), 16.25);
        // (30 + 5 + 20 + 20) / 4
        assert_eq!(PriceSource::HLCC4.extract(&BAR), 18.75);
    }

    #[test]
    fn extraction_ignores_open_time() {
        let later = Bar::new(99, 10.0, 30.0, 5.0, 20.0, 1_000.0);
        assert_eq!(
            PriceSource::OHLC4.extract(&BAR),
            PriceSource::OHLC4.extract(&later)
        );
    }

    #[test]
    fn close_is_default() {
        assert_eq!(PriceSource::default(), PriceSource::Close);
    }

    #[test]
    fn displays_variant_name() {
        assert_eq!(PriceSource::OHLC4.to_string(), "OHLC4");
    }
}
