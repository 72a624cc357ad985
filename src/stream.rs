use std::{cell::RefCell, fmt, rc::Rc};

use tracing::{debug, trace};

use crate::{Indicator, Ohlcv};

/// Anything that consumes bars published on a [`BarStream`].
///
/// Every [`Indicator`] is a subscriber: it extracts its configured price
/// source from each bar. [`Series`](crate::Series) is one as well and
/// additionally stores what its indicator produces.
pub trait BarSubscriber<B> {
    fn receive_bar(&mut self, bar: &B, index: usize);
}

impl<I, B> BarSubscriber<B> for I
where
    I: Indicator,
    B: Ohlcv,
{
    #[inline]
    fn receive_bar(&mut self, bar: &B, index: usize) {
        Indicator::receive_bar(self, bar, index);
    }
}

/// Shared handle to a stream subscriber.
pub type SharedSubscriber<B> = Rc<RefCell<dyn BarSubscriber<B>>>;

/// Publishes bars to subscribed indicators, assigning each bar its index.
///
/// Subscribers are shared with the caller through `Rc<RefCell<_>>`, so the
/// caller keeps querying an indicator while the stream feeds it. Publishing
/// is synchronous: every subscriber, in subscription order, has seen the
/// bar by the time [`publish`](Self::publish) returns.
///
/// # Example
///
/// ```
/// use tickchain_ta::{Bar, BarStream, Series, Wma, WmaConfig};
///
/// let mut stream = BarStream::<Bar>::new();
/// let wma = Series::<Wma>::attach(&mut stream, WmaConfig::close(2).unwrap());
///
/// stream.publish(&Bar::new(1, 0.0, 0.0, 0.0, 10.0, 0.0));
/// stream.publish(&Bar::new(2, 0.0, 0.0, 0.0, 40.0, 0.0));
///
/// // (10 + 2×40) / 3
/// assert_eq!(wma.borrow().value(), Some(30.0));
/// assert_eq!(wma.borrow().valid_from(), Some(2));
/// ```
pub struct BarStream<B> {
    subscribers: Vec<SharedSubscriber<B>>,
    next_index: usize,
}

impl<B: Ohlcv> BarStream<B> {
    /// Stream whose first published bar gets index 1.
    #[must_use]
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    /// Stream whose first published bar gets `index`.
    #[must_use]
    pub fn starting_at(index: usize) -> Self {
        Self {
            subscribers: Vec::new(),
            next_index: index,
        }
    }

    /// Appends `subscriber`; it receives every bar published from now on.
    pub fn subscribe(&mut self, subscriber: SharedSubscriber<B>) {
        self.subscribers.push(subscriber);

        debug!(
            subscribers = self.subscribers.len(),
            next_index = self.next_index,
            "subscriber attached to bar stream"
        );
    }

    /// Delivers `bar` to every subscriber and returns the index it was
    /// published under.
    ///
    /// # Panics
    ///
    /// Panics if a subscriber is mutably borrowed elsewhere while the bar is
    /// delivered.
    pub fn publish(&mut self, bar: &B) -> usize {
        let index = self.next_index;
        self.next_index += 1;

        trace!(
            index,
            open_time = bar.open_time(),
            subscribers = self.subscribers.len(),
            "publishing bar"
        );

        for subscriber in &self.subscribers {
            subscriber.borrow_mut().receive_bar(bar, index);
        }

        index
    }

    /// Number of subscribers.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }

    /// Index the next published bar will get.
    #[inline]
    #[must_use]
    pub fn next_index(&self) -> usize {
        self.next_index
    }
}

impl<B: Ohlcv> Default for BarStream<B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B> fmt::Debug for BarStream<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BarStream")
            .field("subscribers", &self.subscribers.len())
            .field("next_index", &self.next_index)
            .finish()
    }
}
