//! # Pocket Store Runtime
//!
//! The synchronous Store that owns a state tree, runs the reducer for every
//! dispatched action, and notifies subscribers with the committed snapshot.
//!
//! ## Core Components
//!
//! - **Store**: Holds the current `Arc<State>` and the reducer/environment pair
//! - **Dispatch loop**: action → reducer → commit → notify → queued effects
//! - **Subscriptions**: RAII handles that unregister a listener when dropped
//!
//! ## Example
//!
//! ```ignore
//! use pocket_runtime::Store;
//!
//! let store = Store::new(initial_state, my_reducer, environment);
//!
//! let subscription = store.subscribe(|state| render(state));
//! store.dispatch(Action::DoSomething)?;
//!
//! let snapshot = store.state();
//! ```
//!
//! ## Dispatch Rules
//!
//! - Every dispatch commits a brand-new `Arc<State>`; earlier snapshots are
//!   never mutated.
//! - Subscribers run after the commit, in registration order, and always see
//!   the fully-updated tree.
//! - A dispatch issued while another is running (from inside a listener or
//!   from another thread) is rejected with
//!   [`StoreError::DispatchInProgress`].
//! - Follow-up actions returned as [`Effect::Send`](pocket_core::Effect::Send)
//!   are processed FIFO after the current action has notified.

use pocket_core::reducer::Reducer;
use std::sync::atomic::{AtomicBool, Ordering};

/// Error types for the Store runtime
pub mod error {
    use thiserror::Error;

    /// Errors that can occur during Store operations
    #[derive(Error, Debug, Clone, PartialEq, Eq)]
    pub enum StoreError {
        /// Another dispatch is already running on this store
        ///
        /// Returned when a listener dispatches from inside a notification,
        /// or when two threads dispatch at the same time. The rejected
        /// action is dropped; the running dispatch is unaffected.
        #[error("Dispatch already in progress")]
        DispatchInProgress,

        /// Follow-up effects exceeded the per-dispatch budget
        ///
        /// Every action processed before the limit was reached stays
        /// committed; the remaining queued actions are discarded.
        #[error("Queued follow-up actions exceeded the limit of {0}")]
        QueueOverflow(usize),
    }
}

pub use error::StoreError;

/// Configuration for Store instances
///
/// # Example
///
/// ```
/// use pocket_runtime::StoreConfig;
///
/// let config = StoreConfig::default().with_max_chained_actions(8);
/// assert_eq!(config.max_chained_actions, 8);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreConfig {
    /// Maximum number of follow-up actions a single dispatch may queue
    pub max_chained_actions: usize,
}

impl StoreConfig {
    /// Create a new configuration with custom values
    #[must_use]
    pub const fn new(max_chained_actions: usize) -> Self {
        Self {
            max_chained_actions,
        }
    }

    /// Set the follow-up action budget
    #[must_use]
    pub const fn with_max_chained_actions(mut self, limit: usize) -> Self {
        self.max_chained_actions = limit;
        self
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            max_chained_actions: 64,
        }
    }
}

/// Guard that holds the single-writer flag for the duration of a dispatch
///
/// Clears the flag on drop, including when a reducer or listener panics.
struct DispatchGuard<'a>(&'a AtomicBool);

impl<'a> DispatchGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Result<Self, StoreError> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map(|_| Self(flag))
            .map_err(|_| StoreError::DispatchInProgress)
    }
}

impl Drop for DispatchGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Subscriber registry and RAII subscription handles
pub mod subscription {
    use std::sync::{Arc, Mutex, PoisonError, Weak};

    /// A listener invoked with every committed snapshot
    pub type Listener<S> = Arc<dyn Fn(&Arc<S>) + Send + Sync>;

    /// Registered listeners, keyed by a monotonically increasing id
    pub(crate) struct Subscribers<S> {
        next_id: u64,
        listeners: Vec<(u64, Listener<S>)>,
    }

    impl<S> Subscribers<S> {
        pub(crate) const fn new() -> Self {
            Self {
                next_id: 0,
                listeners: Vec::new(),
            }
        }

        pub(crate) fn insert(&mut self, listener: Listener<S>) -> u64 {
            let id = self.next_id;
            self.next_id += 1;
            self.listeners.push((id, listener));
            id
        }

        pub(crate) fn len(&self) -> usize {
            self.listeners.len()
        }

        /// Clone the current listener list so callbacks run without the lock held
        pub(crate) fn snapshot(&self) -> Vec<Listener<S>> {
            self.listeners
                .iter()
                .map(|(_, listener)| Arc::clone(listener))
                .collect()
        }
    }

    /// Type-erased removal so handles don't carry the state type
    pub(crate) trait Registry: Send + Sync {
        fn remove(&self, id: u64) -> bool;
    }

    impl<S> Registry for Mutex<Subscribers<S>> {
        fn remove(&self, id: u64) -> bool {
            let mut subscribers = self.lock().unwrap_or_else(PoisonError::into_inner);
            let before = subscribers.listeners.len();
            subscribers.listeners.retain(|(existing, _)| *existing != id);
            subscribers.listeners.len() != before
        }
    }

    /// Handle returned by [`Store::subscribe`](crate::Store::subscribe)
    ///
    /// The listener stays registered for as long as the handle lives.
    /// Dropping the handle, or calling [`Subscription::unsubscribe`],
    /// removes it. Handles may outlive the store.
    #[must_use = "dropping a Subscription unregisters its listener"]
    pub struct Subscription {
        id: u64,
        registry: Option<Weak<dyn Registry>>,
    }

    impl Subscription {
        pub(crate) fn new(id: u64, registry: Weak<dyn Registry>) -> Self {
            Self {
                id,
                registry: Some(registry),
            }
        }

        /// Unregister the listener now
        ///
        /// Returns `true` if the listener was still registered.
        pub fn unsubscribe(mut self) -> bool {
            self.release()
        }

        fn release(&mut self) -> bool {
            self.registry
                .take()
                .and_then(|registry| registry.upgrade())
                .is_some_and(|registry| registry.remove(self.id))
        }
    }

    impl Drop for Subscription {
        fn drop(&mut self) {
            self.release();
        }
    }

    impl std::fmt::Debug for Subscription {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.debug_struct("Subscription")
                .field("id", &self.id)
                .field("active", &self.registry.is_some())
                .finish()
        }
    }
}

pub use subscription::{Listener, Subscription};

/// Store module - The runtime for reducers
pub mod store {
    use super::subscription::{Registry, Subscribers, Subscription};
    use super::{AtomicBool, DispatchGuard, Reducer, StoreConfig, StoreError};
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex, PoisonError, RwLock};

    /// The Store - runtime coordinator for a reducer
    ///
    /// The Store manages:
    /// 1. State (an `Arc<S>` replaced wholesale on every dispatch)
    /// 2. Reducer (business logic)
    /// 3. Environment (injected dependencies)
    /// 4. Subscribers (notified after each commit)
    ///
    /// # Type Parameters
    ///
    /// - `S`: State type
    /// - `A`: Action type
    /// - `E`: Environment type
    /// - `R`: Reducer implementation
    pub struct Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        state: RwLock<Arc<S>>,
        reducer: R,
        environment: E,
        config: StoreConfig,
        dispatching: AtomicBool,
        subscribers: Arc<Mutex<Subscribers<S>>>,
    }

    impl<S, A, E, R> Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
        S: Clone + Send + Sync + 'static,
        A: std::fmt::Debug,
    {
        /// Create a new store with initial state, reducer, and environment
        #[must_use]
        pub fn new(initial_state: S, reducer: R, environment: E) -> Self {
            Self::with_config(initial_state, reducer, environment, StoreConfig::default())
        }

        /// Create a new Store with custom configuration
        #[must_use]
        pub fn with_config(initial_state: S, reducer: R, environment: E, config: StoreConfig) -> Self {
            Self {
                state: RwLock::new(Arc::new(initial_state)),
                reducer,
                environment,
                config,
                dispatching: AtomicBool::new(false),
                subscribers: Arc::new(Mutex::new(Subscribers::new())),
            }
        }

        /// The environment the reducer runs with
        ///
        /// Action constructors read ids and timestamps from here before the
        /// action is dispatched.
        #[must_use]
        pub const fn environment(&self) -> &E {
            &self.environment
        }

        /// The configuration this store was built with
        #[must_use]
        pub const fn config(&self) -> StoreConfig {
            self.config
        }

        /// Current immutable snapshot of the state tree
        ///
        /// The returned `Arc` never changes; later dispatches commit new
        /// snapshots instead.
        #[must_use]
        pub fn state(&self) -> Arc<S> {
            Arc::clone(&self.state.read().unwrap_or_else(PoisonError::into_inner))
        }

        /// Read current state via a closure
        ///
        /// ```ignore
        /// let open = store.select(|s| s.todos.active_count());
        /// ```
        pub fn select<F, T>(&self, f: F) -> T
        where
            F: FnOnce(&S) -> T,
        {
            let state = self.state();
            f(&state)
        }

        /// Register a listener called with every committed snapshot
        ///
        /// Listeners run synchronously at the end of each dispatch, in the
        /// order they were registered. A listener must not dispatch; doing
        /// so returns [`StoreError::DispatchInProgress`] to the listener.
        pub fn subscribe<F>(&self, listener: F) -> Subscription
        where
            F: Fn(&Arc<S>) + Send + Sync + 'static,
        {
            let id = self
                .subscribers
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .insert(Arc::new(listener));

            tracing::trace!(subscriber_id = id, "Listener subscribed");

            let registry: Arc<dyn Registry> = self.subscribers.clone();
            Subscription::new(id, Arc::downgrade(&registry))
        }

        /// Number of currently registered listeners
        #[must_use]
        pub fn subscriber_count(&self) -> usize {
            self.subscribers
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .len()
        }

        /// Dispatch an action to the store
        ///
        /// 1. Clones the current state into a working copy
        /// 2. Runs the reducer on the copy
        /// 3. Commits the copy as the new snapshot
        /// 4. Notifies subscribers
        /// 5. Repeats for every follow-up action the reducer queued
        ///
        /// # Errors
        ///
        /// - [`StoreError::DispatchInProgress`] if a dispatch is already running
        /// - [`StoreError::QueueOverflow`] if follow-up actions exceed
        ///   [`StoreConfig::max_chained_actions`]
        #[tracing::instrument(skip(self, action), name = "store_dispatch")]
        pub fn dispatch(&self, action: A) -> Result<(), StoreError> {
            let _guard = DispatchGuard::acquire(&self.dispatching).inspect_err(|_| {
                tracing::warn!(?action, "Rejected action: dispatch already in progress");
                metrics::counter!("store.dispatch.rejected").increment(1);
            })?;

            let limit = self.config.max_chained_actions;
            let mut queue = VecDeque::from([action]);
            let mut queued = 0_usize;

            while let Some(action) = queue.pop_front() {
                let pending = queue.len();
                for effect in self.apply(action) {
                    queue.extend(effect.into_actions());
                }

                queued += queue.len() - pending;
                if queued > limit {
                    tracing::error!(
                        limit,
                        dropped = queue.len(),
                        "Follow-up action budget exhausted"
                    );
                    metrics::counter!("store.dispatch.overflow").increment(1);
                    return Err(StoreError::QueueOverflow(limit));
                }
            }

            Ok(())
        }

        /// Run one action through the reducer, commit and notify
        fn apply(&self, action: A) -> pocket_core::SmallVec<[pocket_core::Effect<A>; 4]> {
            tracing::debug!(?action, "Processing action");
            metrics::counter!("store.dispatch.total").increment(1);

            let mut next = S::clone(&self.state());

            let effects = {
                let span = tracing::debug_span!("reducer_execution");
                let _enter = span.enter();

                let start = std::time::Instant::now();
                let effects = self.reducer.reduce(&mut next, action, &self.environment);
                metrics::histogram!("store.reducer.duration_seconds")
                    .record(start.elapsed().as_secs_f64());
                effects
            };

            let next = Arc::new(next);
            *self.state.write().unwrap_or_else(PoisonError::into_inner) = Arc::clone(&next);

            let listeners = self
                .subscribers
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .snapshot();
            tracing::trace!(listeners = listeners.len(), "Notifying subscribers");
            for listener in listeners {
                listener(&next);
            }

            effects
        }
    }

    impl<S, A, E, R> std::fmt::Debug for Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
        S: std::fmt::Debug,
    {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.debug_struct("Store")
                .field("state", &self.state)
                .field("config", &self.config)
                .finish_non_exhaustive()
        }
    }
}

pub use store::Store;
