mod fixtures;

use fixtures::{indexed, load_reference_ohlcvs, reference_test};
use tickchain_ta::{Indicator, Variance, VarianceConfig};

// Tolerance: 1e-6. The reference is a two-pass variance; the indicator
// keeps running sums, so cancellation error grows with the price level
// (about 1e-10 at these prices).
reference_test!(
    var_20_close,
    Variance,
    VarianceConfig::close(20),
    "tests/fixtures/data/var-20-close.csv",
    1e-6
);

reference_test!(
    var_10_hlc3,
    Variance,
    VarianceConfig::new(10, PriceSource::HLC3),
    "tests/fixtures/data/var-10-hlc3.csv",
    1e-6
);

#[test]
fn variance_never_negative() {
    let bars = load_reference_ohlcvs();

    for length in [1, 2, 7, 30] {
        let mut var = Variance::new(VarianceConfig::close(length).unwrap());
        for (index, bar) in indexed(&bars) {
            if let Some(value) = var.receive_bar(bar, index) {
                assert!(value >= 0.0, "VAR({length}) = {value} at index {index}");
            }
        }
        assert!(var.min_value().is_some_and(|min| min >= 0.0));
    }
}
