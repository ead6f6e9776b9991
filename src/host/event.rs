//! Notification streams and revocation handles

use std::fmt;
use std::sync::{Arc, Mutex};

use super::lock;

type Listener<T> = Arc<Mutex<dyn FnMut(&T) + Send>>;

struct Listeners<T> {
    next_id: u64,
    entries: Vec<(u64, Listener<T>)>,
}

/// A notification stream listeners can subscribe to.
///
/// Listeners run synchronously inside [`Emitter::fire`], in subscription
/// order, over the set registered when `fire` was called. A listener may
/// subscribe or dispose subscriptions; it must not fire the same emitter.
pub struct Emitter<T> {
    listeners: Arc<Mutex<Listeners<T>>>,
}

impl<T: 'static> Emitter<T> {
    pub fn new() -> Self {
        Self {
            listeners: Arc::new(Mutex::new(Listeners {
                next_id: 0,
                entries: Vec::new(),
            })),
        }
    }

    /// Register `listener`; disposing the returned handle unregisters it
    pub fn subscribe<F>(&self, listener: F) -> Disposable
    where
        F: FnMut(&T) + Send + 'static,
    {
        let mut listeners = lock(&self.listeners);
        let id = listeners.next_id;
        listeners.next_id += 1;
        listeners
            .entries
            .push((id, Arc::new(Mutex::new(listener)) as Listener<T>));

        let registry = Arc::downgrade(&self.listeners);
        Disposable::new(move || {
            if let Some(registry) = registry.upgrade() {
                lock(&registry).entries.retain(|(entry_id, _)| *entry_id != id);
            }
        })
    }

    /// Deliver `event` to every current listener
    pub fn fire(&self, event: &T) {
        let snapshot: Vec<Listener<T>> = lock(&self.listeners)
            .entries
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect();
        for listener in snapshot {
            let mut listener = lock(&listener);
            (*listener)(event);
        }
    }

    pub fn listener_count(&self) -> usize {
        lock(&self.listeners).entries.len()
    }
}

impl<T: 'static> Default for Emitter<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Emitter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Emitter")
            .field("listeners", &lock(&self.listeners).entries.len())
            .finish()
    }
}

/// A group of revocation callbacks run together, at most once
#[must_use = "a subscription stays registered until it is disposed"]
#[derive(Default)]
pub struct Disposable {
    actions: Vec<Box<dyn FnOnce() + Send>>,
}

impl Disposable {
    pub fn new<F>(action: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        Self {
            actions: vec![Box::new(action)],
        }
    }

    /// Combine several handles into one
    pub fn from_all(disposables: impl IntoIterator<Item = Disposable>) -> Self {
        Self {
            actions: disposables
                .into_iter()
                .flat_map(|disposable| disposable.actions)
                .collect(),
        }
    }

    /// Run every pending callback; later calls do nothing
    pub fn dispose(&mut self) {
        for action in self.actions.drain(..) {
            action();
        }
    }

    pub fn is_disposed(&self) -> bool {
        self.actions.is_empty()
    }
}

impl fmt::Debug for Disposable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Disposable")
            .field("pending", &self.actions.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_fire_reaches_every_listener() {
        let emitter = Emitter::<u32>::new();
        let total = Arc::new(AtomicUsize::new(0));

        let mut subscriptions = Vec::new();
        for _ in 0..2 {
            let total = total.clone();
            subscriptions.push(emitter.subscribe(move |value| {
                total.fetch_add(*value as usize, Ordering::SeqCst);
            }));
        }

        emitter.fire(&5);
        assert_eq!(total.load(Ordering::SeqCst), 10);
        assert_eq!(emitter.listener_count(), 2);
    }

    #[test]
    fn test_dispose_unsubscribes() {
        let emitter = Emitter::<()>::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let mut subscription = emitter.subscribe(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        emitter.fire(&());
        subscription.dispose();
        emitter.fire(&());

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(emitter.listener_count(), 0);
        assert!(subscription.is_disposed());
    }

    #[test]
    fn test_listener_can_dispose_its_own_subscription() {
        let emitter = Emitter::<()>::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let slot: Arc<Mutex<Option<Disposable>>> = Arc::new(Mutex::new(None));

        let subscription = {
            let calls = calls.clone();
            let slot = slot.clone();
            emitter.subscribe(move |_| {
                calls.fetch_add(1, Ordering::SeqCst);
                if let Some(mut subscription) = lock(&slot).take() {
                    subscription.dispose();
                }
            })
        };
        *lock(&slot) = Some(subscription);

        emitter.fire(&());
        emitter.fire(&());

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(emitter.listener_count(), 0);
    }

    #[test]
    fn test_combined_disposable_runs_once() {
        let runs = Arc::new(AtomicUsize::new(0));
        let parts = (0..3).map(|_| {
            let runs = runs.clone();
            Disposable::new(move || {
                runs.fetch_add(1, Ordering::SeqCst);
            })
        });

        let mut combined = Disposable::from_all(parts);
        combined.dispose();
        combined.dispose();

        assert_eq!(runs.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_dispose_after_emitter_dropped() {
        let emitter = Emitter::<()>::new();
        let mut subscription = emitter.subscribe(|_| {});
        drop(emitter);
        subscription.dispose();
        assert!(subscription.is_disposed());
    }
}
