use crate::{Price, ring_buffer::RingBuffer};

/// Sliding window over the last `size` values with a running sum.
///
/// With `SUM_OF_SQUARES` enabled the window also keeps running sums of
/// deviations from a reference value and of their squares, which is what
/// variance-style indicators need. Squaring raw prices cancels badly when
/// the price level dwarfs the spread, so values are shifted first. The
/// reference is re-anchored to the oldest value, and both deviation sums
/// recomputed exactly, each time the window turns over.
#[derive(Clone, Debug)]
pub(crate) struct PriceWindow<const SUM_OF_SQUARES: bool = false> {
    window: RingBuffer,
    /// Running sum of values in the window. Maintained incrementally via
    /// add/subtract, may accumulate FP rounding drift over very long runs,
    /// but negligible for typical window sizes on financial data.
    sum: Price,
    shift: Price,
    deviation_sum: f64,
    deviation_sum_of_squares: f64,
    pushes_since_rebase: usize,
}

pub(crate) type PriceWindowWithSumOfSquares = PriceWindow<true>;

impl<const SUM_OF_SQUARES: bool> PriceWindow<SUM_OF_SQUARES> {
    fn empty(size: usize) -> Self {
        Self {
            window: RingBuffer::new(size),
            sum: 0.0,
            shift: 0.0,
            deviation_sum: 0.0,
            deviation_sum_of_squares: 0.0,
            pushes_since_rebase: 0,
        }
    }
}

impl PriceWindow {
    pub fn new(size: usize) -> Self {
        Self::empty(size)
    }
}

impl PriceWindow<true> {
    pub fn with_sum_of_squares(size: usize) -> Self {
        Self::empty(size)
    }

    /// `(Σdᵢ, Σdᵢ²)` with `dᵢ = vᵢ − shift`. `None` until the window is
    /// full.
    ///
    /// The shift cancels out of `Σdᵢ²/n − (Σdᵢ/n)²`, so callers can use the
    /// pair directly for the population variance.
    #[inline]
    pub fn deviation_sums(&self) -> Option<(f64, f64)> {
        self.is_ready()
            .then_some((self.deviation_sum, self.deviation_sum_of_squares))
    }

    fn rebase(&mut self) {
        let shift = self.window.iter().next().unwrap_or(0.0);
        let (sum, deviation_sum, deviation_sum_of_squares) = self.window.iter().fold(
            (0.0, 0.0, 0.0),
            |(sum, deviations, squares), price| {
                let deviation = price - shift;
                (
                    sum + price,
                    deviations + deviation,
                    deviation.mul_add(deviation, squares),
                )
            },
        );

        self.sum = sum;
        self.shift = shift;
        self.deviation_sum = deviation_sum;
        self.deviation_sum_of_squares = deviation_sum_of_squares;
        self.pushes_since_rebase = 0;
    }

    fn track_deviations(&mut self, price: Price, evicted: Option<Price>) {
        if let Some(old_price) = evicted {
            let deviation = old_price - self.shift;
            self.deviation_sum -= deviation;
            self.deviation_sum_of_squares -= deviation * deviation;
        }

        let deviation = price - self.shift;
        self.deviation_sum += deviation;
        self.deviation_sum_of_squares += deviation * deviation;

        // first rebase lands exactly when the window fills
        self.pushes_since_rebase += 1;
        if self.pushes_since_rebase == self.window.capacity() {
            self.rebase();
        }
    }
}

impl PriceWindow {
    #[inline]
    pub fn push(&mut self, price: Price) {
        if let Some(old_price) = self.window.push(price) {
            self.sum -= old_price;
        }
        self.sum += price;
    }
}

impl PriceWindow<true> {
    #[inline]
    pub fn push(&mut self, price: Price) {
        let evicted = self.window.push(price);
        if let Some(old_price) = evicted {
            self.sum -= old_price;
        }
        self.sum += price;
        self.track_deviations(price, evicted);
    }
}

impl<const SUM_OF_SQUARES: bool> PriceWindow<SUM_OF_SQUARES> {
    #[inline]
    pub fn sum(&self) -> Option<Price> {
        self.is_ready().then_some(self.sum)
    }

    /// `Σ i·vᵢ` with `i = 1` for the oldest value and `i = size` for the
    /// newest. `None` until the window is full.
    #[inline]
    pub fn weighted_sum(&self) -> Option<Price> {
        self.is_ready().then(|| {
            self.window
                .iter()
                .zip(1_u32..)
                .fold(0.0, |acc, (price, weight)| {
                    f64::from(weight).mul_add(price, acc)
                })
        })
    }

    #[inline]
    pub fn is_ready(&self) -> bool {
        self.window.is_ready()
    }
}
