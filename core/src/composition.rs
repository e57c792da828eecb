//! Reducer composition utilities
//!
//! - **`combine_reducers`**: Run several reducers over the same state and action
//! - **`scope_reducer`**: Focus a slice reducer on one field of a larger state
//!
//! Together they build a root reducer out of independent slices: each slice
//! reducer is scoped onto its field, and the scoped reducers are combined so
//! every action reaches every slice.
//!
//! # Example
//!
//! ```
//! use pocket_core::{Effect, Reducer, SmallVec, smallvec};
//! use pocket_core::composition::{CombinedReducer, combine_reducers, scope_reducer};
//!
//! #[derive(Clone, Debug)]
//! enum AppAction {
//!     Bump,
//!     Rename(String),
//! }
//!
//! #[derive(Clone, Debug, Default)]
//! struct AppState {
//!     hits: u32,
//!     name: String,
//! }
//!
//! struct HitsReducer;
//! struct NameReducer;
//!
//! impl Reducer for HitsReducer {
//!     type State = u32;
//!     type Action = AppAction;
//!     type Environment = ();
//!
//!     fn reduce(&self, state: &mut u32, action: AppAction, _env: &()) -> SmallVec<[Effect<AppAction>; 4]> {
//!         if matches!(action, AppAction::Bump) {
//!             *state += 1;
//!         }
//!         smallvec![Effect::None]
//!     }
//! }
//!
//! impl Reducer for NameReducer {
//!     type State = String;
//!     type Action = AppAction;
//!     type Environment = ();
//!
//!     fn reduce(&self, state: &mut String, action: AppAction, _env: &()) -> SmallVec<[Effect<AppAction>; 4]> {
//!         if let AppAction::Rename(name) = action {
//!             *state = name;
//!         }
//!         smallvec![Effect::None]
//!     }
//! }
//!
//! let root: CombinedReducer<AppState, AppAction, ()> = combine_reducers(vec![
//!     Box::new(scope_reducer(HitsReducer, |s: &mut AppState| &mut s.hits)),
//!     Box::new(scope_reducer(NameReducer, |s: &mut AppState| &mut s.name)),
//! ]);
//!
//! let mut state = AppState::default();
//! let _ = root.reduce(&mut state, AppAction::Bump, &());
//! let _ = root.reduce(&mut state, AppAction::Rename("pocket".into()), &());
//! assert_eq!(state.hits, 1);
//! assert_eq!(state.name, "pocket");
//! ```

use crate::SmallVec;
use crate::effect::Effect;
use crate::reducer::Reducer;

/// Boxed reducer with erased concrete type
pub type BoxedReducer<S, A, E> = Box<dyn Reducer<State = S, Action = A, Environment = E> + Send + Sync>;

/// Combines multiple reducers that operate on the same state and action types.
///
/// Each reducer runs in registration order against the same working state;
/// every reducer receives its own clone of the action. Effects from all
/// reducers are concatenated in the same order.
#[must_use]
pub fn combine_reducers<S, A, E>(reducers: Vec<BoxedReducer<S, A, E>>) -> CombinedReducer<S, A, E>
where
    A: Clone,
{
    CombinedReducer { reducers }
}

/// A combined reducer that runs multiple reducers in sequence.
///
/// Created by [`combine_reducers`].
pub struct CombinedReducer<S, A, E> {
    reducers: Vec<BoxedReducer<S, A, E>>,
}

impl<S, A, E> CombinedReducer<S, A, E> {
    /// Number of reducers combined
    #[must_use]
    pub fn len(&self) -> usize {
        self.reducers.len()
    }

    /// Returns true if no reducers were combined
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.reducers.is_empty()
    }
}

impl<S, A, E> std::fmt::Debug for CombinedReducer<S, A, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CombinedReducer")
            .field("reducers", &self.reducers.len())
            .finish()
    }
}

impl<S, A, E> Reducer for CombinedReducer<S, A, E>
where
    A: Clone,
{
    type State = S;
    type Action = A;
    type Environment = E;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        let mut all_effects = SmallVec::new();

        for reducer in &self.reducers {
            let effects = reducer.reduce(state, action.clone(), env);
            all_effects.extend(effects.into_iter().filter(|effect| !effect.is_none()));
        }

        all_effects
    }
}

/// Scopes a reducer to operate on one field of a larger state.
///
/// `lens` borrows the child state out of the parent. The child reducer works
/// directly on that borrow, so no intermediate copy of the slice is made.
pub fn scope_reducer<S, SubS, R>(reducer: R, lens: fn(&mut S) -> &mut SubS) -> ScopedReducer<S, SubS, R>
where
    R: Reducer<State = SubS>,
{
    ScopedReducer { reducer, lens }
}

/// A scoped reducer that operates on a subset of state.
///
/// Created by [`scope_reducer`].
pub struct ScopedReducer<S, SubS, R> {
    reducer: R,
    lens: fn(&mut S) -> &mut SubS,
}

impl<S, SubS, R> Reducer for ScopedReducer<S, SubS, R>
where
    R: Reducer<State = SubS>,
{
    type State = S;
    type Action = R::Action;
    type Environment = R::Environment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        self.reducer.reduce((self.lens)(state), action, env)
    }
}
