#![allow(dead_code)]

use serde::{Deserialize, de::DeserializeOwned};
use tickchain_ta::{Ohlcv, Price, Timestamp};

/// OHLCV bar parsed from the hourly fixture CSV.
#[derive(Debug, Clone, Deserialize)]
pub struct RefBar {
    pub open_time: u64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Ohlcv for RefBar {
    fn open(&self) -> Price {
        self.open
    }

    fn high(&self) -> Price {
        self.high
    }

    fn low(&self) -> Price {
        self.low
    }

    fn close(&self) -> Price {
        self.close
    }

    fn open_time(&self) -> Timestamp {
        self.open_time
    }

    fn volume(&self) -> f64 {
        self.volume
    }
}

/// Reference value with timestamp.
#[derive(Debug, Deserialize)]
pub struct RefValue {
    pub open_time: u64,
    pub expected: f64,
}

const OHLCV_PATH: &str = "tests/fixtures/data/bars.csv";

/// Load the reference OHLCV bars.
pub fn load_reference_ohlcvs() -> Vec<RefBar> {
    load_records(OHLCV_PATH, "invalid OHLCV record")
}

/// Load single-value reference data, one row per produced value.
pub fn load_ref_values(path: &str) -> Vec<RefValue> {
    load_records(path, "invalid reference record")
}

/// External index of each bar: position in the file, starting at 1.
pub fn indexed(bars: &[RefBar]) -> impl Iterator<Item = (usize, &RefBar)> {
    bars.iter().enumerate().map(|(i, bar)| (i + 1, bar))
}

/// Assert two f64 values are within tolerance.
pub fn assert_near(actual: f64, expected: f64, tolerance: f64, context: &str) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tolerance,
        "{context}: expected {expected:.10}, got {actual:.10}, diff {diff:.2e} > tolerance {tolerance:.2e}"
    );
}

/// Smallest and largest of `values`.
pub fn extrema(values: &[f64]) -> (f64, f64) {
    values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), &v| {
            (min.min(v), max.max(v))
        })
}

/// Generate reference, lifecycle and stream tests for an indicator.
///
/// Usage: `reference_test!(wma_10, Wma, WmaConfig::close(10), "tests/fixtures/data/wma-10-close.csv", 1e-6);`
#[allow(unused_macros)]
macro_rules! reference_test {
    ($name:ident, $ind:ty, $config:expr, $ref_path:expr, $tolerance:expr) => {
        mod $name {
            use super::fixtures::*;
            use tickchain_ta::*;

            fn config() -> <$ind as Indicator>::Config {
                ($config).unwrap()
            }

            #[test]
            fn matches_reference() {
                let bars = load_reference_ohlcvs();
                let reference = load_ref_values($ref_path);
                let mut ind = <$ind>::new(config());

                let mut ref_idx = 0;
                for (index, bar) in indexed(&bars) {
                    let produced = ind.receive_bar(bar, index);

                    if ref_idx < reference.len() && bar.open_time == reference[ref_idx].open_time {
                        let value = produced.unwrap_or_else(|| {
                            panic!("{} returned None at t={}", stringify!($name), bar.open_time)
                        });
                        assert_near(
                            value,
                            reference[ref_idx].expected,
                            $tolerance,
                            &format!(
                                "{} at bar {ref_idx} (t={})",
                                stringify!($name),
                                bar.open_time
                            ),
                        );
                        ref_idx += 1;
                    } else {
                        assert_eq!(
                            produced,
                            None,
                            "{} produced a value at t={} with no reference",
                            stringify!($name),
                            bar.open_time
                        );
                    }
                }

                assert_eq!(
                    ref_idx,
                    reference.len(),
                    "not all reference values checked: {ref_idx}/{}",
                    reference.len()
                );
            }

            #[test]
            fn lifecycle_matches_reference() {
                let bars = load_reference_ohlcvs();
                let reference = load_ref_values($ref_path);
                let mut series = Series::<$ind>::new(config());

                for (index, bar) in indexed(&bars) {
                    series.receive_bar(bar, index);
                }

                let first = bars
                    .iter()
                    .position(|bar| bar.open_time == reference[0].open_time)
                    .expect("first reference bar in fixture");
                assert_eq!(series.valid_from(), Some(first + 1));
                assert_eq!(series.length(), reference.len());
                assert_eq!(series.data().len(), reference.len());

                let (min, max) = extrema(series.data());
                assert_eq!(series.min_value(), Some(min));
                assert_eq!(series.max_value(), Some(max));
            }

            #[test]
            fn stream_matches_direct_feed() {
                let bars = load_reference_ohlcvs();
                let mut stream = BarStream::<RefBar>::new();
                let attached = Series::<$ind>::attach(&mut stream, config());
                let mut direct = Series::<$ind>::new(config());

                for (index, bar) in indexed(&bars) {
                    assert_eq!(stream.publish(bar), index);
                    direct.receive_bar(bar, index);
                }

                let attached = attached.borrow();
                assert_eq!(attached.data(), direct.data());
                assert_eq!(attached.valid_from(), direct.valid_from());
                assert_eq!(attached.min_value(), direct.min_value());
                assert_eq!(attached.max_value(), direct.max_value());
            }

            #[test]
            fn sink_sees_every_value_once() {
                let bars = load_reference_ohlcvs();
                let reference = load_ref_values($ref_path);
                let mut ind = <$ind>::new(config());
                let mut seen = Vec::new();

                for (index, bar) in indexed(&bars) {
                    ind.receive_bar_with(bar, index, &mut |value: Price, at: usize| {
                        seen.push((at, value));
                    });
                }

                assert_eq!(seen.len(), reference.len());
                assert_eq!(seen[0].0, ind.valid_from().unwrap());
                assert!(seen.windows(2).all(|w| w[1].0 == w[0].0 + 1));
                assert_eq!(seen.last().map(|&(_, v)| v), ind.value());
            }
        }
    };
}

#[allow(unused_imports)]
pub(crate) use reference_test;

fn load_records<D>(path: &str, expect_msg: &str) -> Vec<D>
where
    D: DeserializeOwned,
{
    let mut rdr =
        csv::Reader::from_path(path).unwrap_or_else(|e| panic!("failed to open {path}: {e}"));

    rdr.deserialize().map(|r| r.expect(expect_msg)).collect()
}
