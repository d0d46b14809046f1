//! Writable reactive container with synchronous subscriber notification.
//!
//! DESIGN
//! ======
//! `Writable<T>` is a shared handle: clones see the same value and the same
//! subscriber list. Every `set`/`update` replaces the value and then calls
//! each subscriber in registration order before returning. `subscribe` calls
//! the new subscriber immediately with the current value.
//!
//! Callbacks are invoked with no internal lock held, so a subscriber may read
//! the container it is attached to, or write to it. A write made from inside a
//! callback does not notify right away: its deliveries are queued behind the
//! ones still pending, so every subscriber's last-seen value is the final one.
//!
//! A subscriber that captures a clone of its own container keeps that
//! container alive for as long as the subscription lasts; a forgotten one
//! keeps it alive forever.
//!
//! The inner state is `Arc`-shared and
//! lock-protected only so the handle can live in Leptos context; the container
//! is still meant to be driven from a single UI thread.

#[cfg(test)]
#[path = "writable_test.rs"]
mod writable_test;

use std::collections::VecDeque;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock, Weak};

type Callback<T> = Arc<dyn Fn(&T) + Send + Sync>;

/// Deliveries waiting to run, and whether a notification pass is draining them.
struct Pending<T> {
    queue: VecDeque<(Callback<T>, Arc<T>)>,
    draining: bool,
}

struct Inner<T> {
    value: RwLock<T>,
    subscribers: Mutex<Vec<(u64, Callback<T>)>>,
    pending: Mutex<Pending<T>>,
    next_id: AtomicU64,
}

impl<T> Inner<T> {
    fn subscribers(&self) -> MutexGuard<'_, Vec<(u64, Callback<T>)>> {
        self.subscribers.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn pending(&self) -> MutexGuard<'_, Pending<T>> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn remove(&self, id: u64) {
        self.subscribers().retain(|(sid, _)| *sid != id);
    }
}

/// Shared value holder that notifies subscribers on every change.
pub struct Writable<T> {
    inner: Arc<Inner<T>>,
}

impl<T> Clone for Writable<T> {
    fn clone(&self) -> Self {
        Self { inner: Arc::clone(&self.inner) }
    }
}

impl<T: fmt::Debug> fmt::Debug for Writable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = self.inner.value.read().unwrap_or_else(PoisonError::into_inner);
        f.debug_struct("Writable")
            .field("value", &*value)
            .field("subscribers", &self.inner.subscribers().len())
            .finish()
    }
}

impl<T> Writable<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn new(value: T) -> Self {
        Self {
            inner: Arc::new(Inner {
                value: RwLock::new(value),
                subscribers: Mutex::new(Vec::new()),
                pending: Mutex::new(Pending { queue: VecDeque::new(), draining: false }),
                next_id: AtomicU64::new(0),
            }),
        }
    }

    /// Clone of the current value.
    pub fn get(&self) -> T {
        self.with(Clone::clone)
    }

    /// Borrow the current value without cloning it.
    ///
    /// `f` must not call `set` or `update` on this container.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        let value = self.inner.value.read().unwrap_or_else(PoisonError::into_inner);
        f(&*value)
    }

    /// Replace the value and notify every subscriber.
    ///
    /// Always notifies, even when `value` equals the current value.
    pub fn set(&self, value: T) {
        {
            let mut current = self.inner.value.write().unwrap_or_else(PoisonError::into_inner);
            *current = value;
        }
        self.notify();
    }

    /// Mutate a copy of the current value in place, then `set` it.
    pub fn update(&self, f: impl FnOnce(&mut T)) {
        let mut next = self.get();
        f(&mut next);
        self.set(next);
    }

    /// Register `f` and call it right away with the current value.
    ///
    /// The returned [`Subscription`] unsubscribes when dropped; call
    /// [`Subscription::forget`] to keep `f` registered for the container's
    /// lifetime.
    pub fn subscribe(&self, f: impl Fn(&T) + Send + Sync + 'static) -> Subscription {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        let callback: Callback<T> = Arc::new(f);
        self.inner.subscribers().push((id, Arc::clone(&callback)));

        let snapshot = self.get();
        callback(&snapshot);

        let weak: Weak<Inner<T>> = Arc::downgrade(&self.inner);
        Subscription {
            cancel: Some(Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    inner.remove(id);
                }
            })),
        }
    }

    /// Number of currently registered subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.inner.subscribers().len()
    }

    /// Queue a delivery of the current value to every subscriber, then drain
    /// the queue unless an outer call is already draining it.
    fn notify(&self) {
        let snapshot = Arc::new(self.get());
        let callbacks: Vec<Callback<T>> =
            self.inner.subscribers().iter().map(|(_, cb)| Arc::clone(cb)).collect();
        {
            let mut pending = self.inner.pending();
            pending.queue.extend(callbacks.into_iter().map(|cb| (cb, Arc::clone(&snapshot))));
            if pending.draining {
                return;
            }
            pending.draining = true;
        }

        loop {
            let next = {
                let mut pending = self.inner.pending();
                let next = pending.queue.pop_front();
                if next.is_none() {
                    pending.draining = false;
                }
                next
            };
            let Some((callback, value)) = next else { break };
            callback(&*value);
        }
    }
}

/// Handle to a registered subscriber.
///
/// Dropping the handle unsubscribes.
#[must_use = "dropping a Subscription unsubscribes immediately; call `forget` to keep it"]
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl Subscription {
    /// Remove the subscriber now.
    pub fn unsubscribe(mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }

    /// Keep the subscriber registered for as long as the container lives.
    pub fn forget(mut self) {
        self.cancel = None;
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").field("active", &self.cancel.is_some()).finish()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}
