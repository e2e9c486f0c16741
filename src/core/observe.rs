//! A minimal observable value holder with coalescing notifications.
//!
//! [`Subject`] owns one value. Mutations go through [`Subject::update`], which
//! deliberately does not notify; a separate [`Subject::publish`] flushes all
//! subscribers once. A unit of work that performs several mutations therefore
//! produces at most one notification per subscriber.
//!
//! Subscriptions are projections: [`Subject::subscribe`] takes a function from
//! the state to some `Clone + PartialEq` value and returns the receiving end
//! of a channel. The current projected value is delivered immediately; after
//! that, a flush delivers a value only when it differs from the last one sent
//! to that subscriber, so consecutive duplicates are suppressed per stream.
//!
//! Everything here is single-threaded: state lives behind a [`RefCell`] and
//! receivers are expected to be drained on the same logical thread that
//! mutates the subject.

use std::cell::RefCell;
use std::sync::mpsc::{channel, Receiver, Sender};

/// A value holder that notifies subscribers of distinct changes on `publish`.
pub struct Subject<T: 'static> {
    inner: RefCell<Inner<T>>,
}

struct Inner<T: 'static> {
    value: T,
    subscribers: Vec<Box<dyn Sink<T>>>,
}

/// One registered subscription. `push` returns false once the receiving end
/// is gone, which removes the entry on the next flush.
trait Sink<T> {
    fn push(&mut self, value: &T) -> bool;
}

struct MapSink<T, U> {
    project: Box<dyn Fn(&T) -> U>,
    last: U,
    tx: Sender<U>,
}

impl<T, U: Clone + PartialEq> Sink<T> for MapSink<T, U> {
    fn push(&mut self, value: &T) -> bool {
        let next = (self.project)(value);
        if next == self.last {
            return true;
        }
        self.last = next.clone();
        self.tx.send(next).is_ok()
    }
}

impl<T: 'static> Subject<T> {
    pub fn new(value: T) -> Self {
        Self {
            inner: RefCell::new(Inner {
                value,
                subscribers: Vec::new(),
            }),
        }
    }

    /// Reads the current value without cloning it.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.borrow().value)
    }

    /// Mutates the value. Subscribers are not notified until [`publish`]
    /// is called, so several updates in one turn coalesce.
    ///
    /// [`publish`]: Subject::publish
    pub fn update(&self, f: impl FnOnce(&mut T)) {
        f(&mut self.inner.borrow_mut().value);
    }

    /// Registers a projection of the state as a stream. The current projected
    /// value is sent immediately; each subsequent [`publish`](Subject::publish)
    /// sends the projection only when it differs from the previous emission.
    pub fn subscribe<U>(&self, project: impl Fn(&T) -> U + 'static) -> Receiver<U>
    where
        U: Clone + PartialEq + 'static,
    {
        let (tx, rx) = channel();
        let mut inner = self.inner.borrow_mut();
        let current = project(&inner.value);
        // The receiver is still in scope here, so this send cannot fail.
        let _ = tx.send(current.clone());
        inner.subscribers.push(Box::new(MapSink {
            project: Box::new(project),
            last: current,
            tx,
        }));
        rx
    }

    /// Flushes pending changes to every live subscriber and prunes the ones
    /// whose receivers have been dropped.
    pub fn publish(&self) {
        let mut inner = self.inner.borrow_mut();
        let Inner { value, subscribers } = &mut *inner;
        subscribers.retain_mut(|s| s.push(value));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc::TryRecvError;

    #[test]
    fn test_subscribe_delivers_current_value() {
        let subject = Subject::new(5);
        let rx = subject.subscribe(|v| *v);
        assert_eq!(rx.try_recv().unwrap(), 5);
        assert_eq!(rx.try_recv().unwrap_err(), TryRecvError::Empty);
    }

    #[test]
    fn test_publish_delivers_distinct_changes() {
        let subject = Subject::new(0);
        let rx = subject.subscribe(|v| *v);
        assert_eq!(rx.try_recv().unwrap(), 0);

        subject.update(|v| *v = 1);
        subject.publish();
        assert_eq!(rx.try_recv().unwrap(), 1);
    }

    #[test]
    fn test_duplicate_values_are_suppressed() {
        let subject = Subject::new(1);
        let rx = subject.subscribe(|v| *v);
        rx.try_recv().unwrap();

        subject.update(|v| *v = 2);
        subject.update(|v| *v = 1); // back to the already-published value
        subject.publish();
        assert_eq!(rx.try_recv().unwrap_err(), TryRecvError::Empty);
    }

    #[test]
    fn test_updates_coalesce_into_one_notification() {
        let subject = Subject::new(0);
        let rx = subject.subscribe(|v| *v);
        rx.try_recv().unwrap();

        subject.update(|v| *v = 1);
        subject.update(|v| *v = 2);
        subject.update(|v| *v = 3);
        subject.publish();

        assert_eq!(rx.try_recv().unwrap(), 3);
        assert_eq!(rx.try_recv().unwrap_err(), TryRecvError::Empty);
    }

    #[test]
    fn test_projection_dedup_is_per_subscriber() {
        let subject = Subject::new((0u32, 0u32));
        let left = subject.subscribe(|v| v.0);
        let right = subject.subscribe(|v| v.1);
        left.try_recv().unwrap();
        right.try_recv().unwrap();

        subject.update(|v| v.0 = 7);
        subject.publish();

        assert_eq!(left.try_recv().unwrap(), 7);
        // The right projection did not change, so nothing is emitted there.
        assert_eq!(right.try_recv().unwrap_err(), TryRecvError::Empty);
    }

    #[test]
    fn test_dropped_receivers_are_pruned() {
        let subject = Subject::new(0);
        let rx = subject.subscribe(|v| *v);
        drop(rx);

        subject.update(|v| *v = 1);
        subject.publish();
        assert_eq!(subject.inner.borrow().subscribers.len(), 0);
    }
}
