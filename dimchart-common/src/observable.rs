use std::cell::{Cell, RefCell};
use std::fmt::{Debug, Formatter};
use std::rc::{Rc, Weak};

/// Callback invoked with the new value after every [`Observable::set`].
pub type ChangeListener<V> = Rc<dyn Fn(&V)>;

/// Handle to a listener registered with [`Observable::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

struct ObservableState<V> {
    value: RefCell<V>,
    listeners: RefCell<Vec<(ListenerId, ChangeListener<V>)>>,
    next_listener_id: Cell<u64>,
}

/// A single mutable value with synchronous change notification.
///
/// Cloning an `Observable` yields another handle to the same value, so a
/// model can hand out its observable to any number of subscribers.
///
/// Every call to [`set`](Observable::set) notifies all listeners, including
/// when the new value equals the old one. Listeners run in registration
/// order on the calling thread before `set` returns. A listener may call
/// `set` on the same observable; the nested notification runs to completion
/// before the outer one continues with its remaining listeners.
pub struct Observable<V> {
    state: Rc<ObservableState<V>>,
}

impl<V: Clone + 'static> Observable<V> {
    pub fn new(value: V) -> Self {
        Self {
            state: Rc::new(ObservableState {
                value: RefCell::new(value),
                listeners: RefCell::new(Vec::new()),
                next_listener_id: Cell::new(0),
            }),
        }
    }

    /// Returns a copy of the current value.
    pub fn get(&self) -> V {
        self.state.value.borrow().clone()
    }

    /// Runs `f` against the current value without cloning it.
    pub fn with<R>(&self, f: impl FnOnce(&V) -> R) -> R {
        f(&self.state.value.borrow())
    }

    /// Replaces the value and notifies every listener with it.
    pub fn set(&self, value: V) {
        *self.state.value.borrow_mut() = value.clone();

        // Listeners registered while notifying are only called on later sets
        let listeners = self
            .state
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect::<Vec<_>>();
        for listener in listeners {
            listener(&value);
        }
    }

    /// Registers a listener for all subsequent changes.
    ///
    /// The listener is not called for the current value.
    pub fn on_change(&self, listener: impl Fn(&V) + 'static) {
        self.subscribe(listener);
    }

    /// Like [`on_change`](Self::on_change), returning an id that can be
    /// passed to [`unsubscribe`](Self::unsubscribe).
    pub fn subscribe(&self, listener: impl Fn(&V) + 'static) -> ListenerId {
        let id = ListenerId(self.state.next_listener_id.get());
        self.state.next_listener_id.set(id.0 + 1);
        self.state.listeners.borrow_mut().push((id, Rc::new(listener)));
        id
    }

    /// Removes a listener. Returns `false` if it was already removed.
    ///
    /// A notification that is already running still calls it.
    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        let mut listeners = self.state.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|(listener_id, _)| *listener_id != id);
        listeners.len() != before
    }

    pub fn listener_count(&self) -> usize {
        self.state.listeners.borrow().len()
    }

    pub fn downgrade(&self) -> WeakObservable<V> {
        WeakObservable {
            state: Rc::downgrade(&self.state),
        }
    }
}

impl<V> Clone for Observable<V> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
        }
    }
}

impl<V: Debug> Debug for Observable<V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Observable")
            .field("value", &self.state.value.borrow())
            .field("listeners", &self.state.listeners.borrow().len())
            .finish()
    }
}

impl<V: Clone + Default + 'static> Default for Observable<V> {
    fn default() -> Self {
        Self::new(V::default())
    }
}

/// Non-owning handle to an [`Observable`], used by listeners that must not
/// keep the value they observe alive.
pub struct WeakObservable<V> {
    state: Weak<ObservableState<V>>,
}

impl<V> WeakObservable<V> {
    pub fn upgrade(&self) -> Option<Observable<V>> {
        self.state.upgrade().map(|state| Observable { state })
    }
}

impl<V> Clone for WeakObservable<V> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_get_and_set() {
        let observable = Observable::new(1);
        assert_eq!(observable.get(), 1);
        observable.set(2);
        assert_eq!(observable.get(), 2);
    }

    #[test]
    fn test_listener_not_called_for_initial_value() {
        let observable = Observable::new("initial".to_string());
        let calls = Rc::new(Cell::new(0));
        let counter = calls.clone();
        observable.on_change(move |_| counter.set(counter.get() + 1));
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn test_set_fires_even_when_unchanged() {
        let observable = Observable::new(5);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        observable.on_change(move |v| sink.borrow_mut().push(*v));

        observable.set(5);
        observable.set(5);
        observable.set(6);

        assert_eq!(*seen.borrow(), vec![5, 5, 6]);
    }

    #[test]
    fn test_listeners_fire_in_registration_order() {
        let observable = Observable::new(0);
        let order = Rc::new(RefCell::new(Vec::new()));
        for id in 0..3 {
            let order = order.clone();
            observable.on_change(move |_| order.borrow_mut().push(id));
        }
        observable.set(1);
        assert_eq!(*order.borrow(), vec![0, 1, 2]);
    }

    #[test]
    fn test_reentrant_set_from_listener() {
        let observable = Observable::new(0);
        let weak = observable.downgrade();
        let seen = Rc::new(RefCell::new(Vec::new()));

        // Clamp values above 10 by re-setting from inside the listener
        observable.on_change(move |v| {
            if *v > 10 {
                if let Some(observable) = weak.upgrade() {
                    observable.set(10);
                }
            }
        });
        let sink = seen.clone();
        observable.on_change(move |v| sink.borrow_mut().push(*v));

        observable.set(42);

        assert_eq!(observable.get(), 10);
        assert_eq!(*seen.borrow(), vec![10, 42]);
    }

    #[test]
    fn test_clone_shares_state() {
        let a = Observable::new(vec![1]);
        let b = a.clone();
        b.set(vec![1, 2]);
        assert_eq!(a.get(), vec![1, 2]);
        assert_eq!(a.with(|v| v.len()), 2);
    }

    #[test]
    fn test_unsubscribe() {
        let observable = Observable::new(0);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let first = seen.clone();
        let id = observable.subscribe(move |v| first.borrow_mut().push(("first", *v)));
        let second = seen.clone();
        observable.on_change(move |v| second.borrow_mut().push(("second", *v)));

        observable.set(1);
        assert!(observable.unsubscribe(id));
        assert!(!observable.unsubscribe(id));
        observable.set(2);

        assert_eq!(observable.listener_count(), 1);
        assert_eq!(*seen.borrow(), vec![("first", 1), ("second", 1), ("second", 2)]);
    }

    #[test]
    fn test_weak_handle_does_not_keep_value_alive() {
        let observable = Observable::new(1);
        let weak = observable.downgrade();
        assert!(weak.upgrade().is_some());
        drop(observable);
        assert!(weak.upgrade().is_none());
    }
}
