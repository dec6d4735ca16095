use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::{Rc, Weak};
use tracing::trace;

type Subscriber<T> = Rc<dyn Fn(&T)>;

struct Cell<T> {
    value: T,
    // Last value handed to subscribers; trails `value` while writes are queued.
    delivered: T,
    subscribers: Vec<(usize, Subscriber<T>)>,
    next_id: usize,
    // Values written while subscribers are being notified, delivered in order.
    pending: VecDeque<T>,
    notifying: bool,
}

/// A single-threaded observable cell.
///
/// Holds one value and synchronously notifies every subscriber whenever the
/// value changes. Writing a value equal to the current one is a no-op.
/// Cloned handles share the same cell.
///
/// Writes made from inside a subscriber are queued and delivered after the
/// current round, so every subscriber sees the same values in the same order.
///
/// If a subscriber panics, the round ends there: the value stays committed,
/// but subscribers after the panicking one, and any writes still queued,
/// are not notified of it. Later writes are delivered normally.
///
/// # Example
///
/// ```rust
/// use machine_store::store::Writable;
/// use std::cell::RefCell;
/// use std::rc::Rc;
///
/// let count = Writable::new(0);
/// let seen = Rc::new(RefCell::new(Vec::new()));
///
/// let sink = Rc::clone(&seen);
/// let _subscription = count.subscribe(move |value| sink.borrow_mut().push(*value));
///
/// count.update(|n| n + 1);
/// count.set(10);
///
/// assert_eq!(*seen.borrow(), vec![0, 1, 10]);
/// ```
pub struct Writable<T> {
    inner: Rc<RefCell<Cell<T>>>,
}

impl<T: Clone + PartialEq + 'static> Writable<T> {
    /// Create a new cell holding `initial`.
    pub fn new(initial: T) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Cell {
                delivered: initial.clone(),
                value: initial,
                subscribers: Vec::new(),
                next_id: 0,
                pending: VecDeque::new(),
                notifying: false,
            })),
        }
    }

    /// Get a clone of the current value.
    pub fn get(&self) -> T {
        self.inner.borrow().value.clone()
    }

    /// Read the current value without cloning it.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.borrow().value)
    }

    /// Replace the value and notify subscribers if it changed.
    pub fn set(&self, value: T) {
        self.publish(value);
    }

    /// Replace the value with `f(current)` and notify subscribers if it
    /// changed.
    ///
    /// `f` must not write to this cell.
    pub fn update(&self, f: impl FnOnce(&T) -> T) {
        let next = f(&self.inner.borrow().value);
        self.publish(next);
    }

    /// Like [`update`](Self::update), but `f` may fail.
    ///
    /// On `Err` the value is left untouched and nobody is notified.
    pub fn try_update<E, F>(&self, f: F) -> Result<(), E>
    where
        F: FnOnce(&T) -> Result<T, E>,
    {
        let next = f(&self.inner.borrow().value)?;
        self.publish(next);
        Ok(())
    }

    /// Subscribe to value changes.
    ///
    /// The callback runs immediately with the current value, then after every
    /// write. Delivery stops when the returned [`Subscription`] is dropped.
    ///
    /// Subscribing from inside a subscriber yields the value being delivered
    /// in that round; writes still queued behind it follow in order.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&T) + 'static,
    {
        let callback: Subscriber<T> = Rc::new(callback);
        let (id, current) = {
            let mut cell = self.inner.borrow_mut();
            let id = cell.next_id;
            cell.next_id += 1;
            cell.subscribers.push((id, Rc::clone(&callback)));
            (id, cell.delivered.clone())
        };

        callback(&current);

        let cell: Weak<RefCell<Cell<T>>> = Rc::downgrade(&self.inner);
        Subscription {
            cancel: Some(Box::new(move || {
                if let Some(cell) = cell.upgrade() {
                    cell.borrow_mut().subscribers.retain(|(sid, _)| *sid != id);
                }
            })),
        }
    }

    /// Number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().subscribers.len()
    }

    /// A read-only handle to the same cell.
    pub fn readonly(&self) -> Readable<T> {
        Readable {
            cell: self.clone(),
        }
    }

    fn publish(&self, value: T) {
        {
            let mut cell = self.inner.borrow_mut();
            if cell.value == value {
                return;
            }
            cell.value = value.clone();
            cell.pending.push_back(value);
            if cell.notifying {
                return;
            }
            cell.notifying = true;
        }

        let _round = NotifyRound { cell: &self.inner };
        loop {
            let next = {
                let mut cell = self.inner.borrow_mut();
                let value = cell.pending.pop_front();
                if let Some(value) = &value {
                    cell.delivered = value.clone();
                }
                value.map(|value| {
                    let subscribers: Vec<Subscriber<T>> = cell
                        .subscribers
                        .iter()
                        .map(|(_, subscriber)| Rc::clone(subscriber))
                        .collect();
                    (value, subscribers)
                })
            };
            let Some((value, subscribers)) = next else {
                break;
            };

            trace!(subscribers = subscribers.len(), "notifying subscribers");
            for subscriber in subscribers {
                subscriber(&value);
            }
        }
    }
}

impl<T> Clone for Writable<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: Clone + PartialEq + std::fmt::Debug + 'static> std::fmt::Debug for Writable<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Writable")
            .field("value", &self.inner.borrow().value)
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

/// Resets the notification flag when a round ends, including by unwinding
/// out of a panicking subscriber.
struct NotifyRound<'a, T: Clone> {
    cell: &'a Rc<RefCell<Cell<T>>>,
}

impl<T: Clone> Drop for NotifyRound<'_, T> {
    fn drop(&mut self) {
        if let Ok(mut cell) = self.cell.try_borrow_mut() {
            cell.notifying = false;
            cell.pending.clear();
            cell.delivered = cell.value.clone();
        }
    }
}

/// A read-only view of a [`Writable`].
///
/// Subscribers can observe the value but cannot write it; the owner of the
/// `Writable` stays the only writer.
pub struct Readable<T> {
    cell: Writable<T>,
}

impl<T: Clone + PartialEq + 'static> Readable<T> {
    /// Get a clone of the current value.
    pub fn get(&self) -> T {
        self.cell.get()
    }

    /// Read the current value without cloning it.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        self.cell.with(f)
    }

    /// See [`Writable::subscribe`].
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&T) + 'static,
    {
        self.cell.subscribe(callback)
    }

    pub fn subscriber_count(&self) -> usize {
        self.cell.subscriber_count()
    }
}

impl<T> Clone for Readable<T> {
    fn clone(&self) -> Self {
        Self {
            cell: self.cell.clone(),
        }
    }
}

impl<T: Clone + PartialEq + std::fmt::Debug + 'static> std::fmt::Debug for Readable<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Readable").field(&self.cell).finish()
    }
}

/// RAII guard for a subscription.
///
/// Dropping the guard removes the callback from its cell.
#[must_use = "dropping a Subscription immediately unsubscribes"]
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    /// Remove the callback now.
    pub fn unsubscribe(mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }

    /// Keep the callback registered for as long as the cell lives.
    pub fn detach(mut self) {
        self.cancel = None;
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}
