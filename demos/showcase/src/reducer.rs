//! Reducers for the showcase screen.
//!
//! `UiReducer` and `TodoReducer` each own one slice and ignore actions that
//! belong to the other. `AppReducer` scopes both onto [`AppState`] and
//! combines them, so every dispatched action reaches both slices.

use crate::types::{AppAction, AppEnvironment, AppState, TodoRecord, TodoState, UiState};
use pocket_core::composition::{CombinedReducer, combine_reducers, scope_reducer};
use pocket_core::{SmallVec, effect::Effect, reducer::Reducer};

/// Reducer for the UI preference slice
#[derive(Clone, Copy, Debug, Default)]
pub struct UiReducer;

impl UiReducer {
    /// Creates a new `UiReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Reducer for UiReducer {
    type State = UiState;
    type Action = AppAction;
    type Environment = AppEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        _env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            AppAction::ToggleDarkMode => {
                state.dark_mode = !state.dark_mode;
            },
            AppAction::DismissBanner => {
                state.banner_visible = false;
            },
            AppAction::ShowBanner { message } => {
                state.banner_message = message;
                state.banner_visible = true;
            },
            AppAction::AddTodo { .. }
            | AppAction::ToggleTodo { .. }
            | AppAction::RemoveTodo { .. }
            | AppAction::ClearTodos => {},
        }

        SmallVec::new()
    }
}

/// Reducer for the todo list slice
#[derive(Clone, Copy, Debug, Default)]
pub struct TodoReducer;

impl TodoReducer {
    /// Creates a new `TodoReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Stable partition: actives first, then completed, each in current order
    fn repartition(items: Vec<TodoRecord>) -> Vec<TodoRecord> {
        let (mut active, done): (Vec<_>, Vec<_>) = items.into_iter().partition(|todo| !todo.done);
        active.extend(done);
        active
    }
}

impl Reducer for TodoReducer {
    type State = TodoState;
    type Action = AppAction;
    type Environment = AppEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        _env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            AppAction::AddTodo {
                id,
                title,
                created_at,
            } => {
                state.items.insert(0, TodoRecord::new(id, title, created_at));
            },
            AppAction::ToggleTodo { id } => {
                if let Some(index) = state.items.iter().position(|todo| todo.id == id) {
                    state.items[index].done = !state.items[index].done;
                    state.items = Self::repartition(std::mem::take(&mut state.items));
                }
            },
            AppAction::RemoveTodo { id } => {
                state.items.retain(|todo| todo.id != id);
            },
            AppAction::ClearTodos => {
                state.items.clear();
            },
            AppAction::ToggleDarkMode | AppAction::DismissBanner | AppAction::ShowBanner { .. } => {},
        }

        SmallVec::new()
    }
}

/// Root reducer: both slice reducers scoped onto [`AppState`]
pub struct AppReducer {
    inner: CombinedReducer<AppState, AppAction, AppEnvironment>,
}

impl AppReducer {
    /// Creates the root reducer
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: combine_reducers(vec![
                Box::new(scope_reducer(UiReducer::new(), |app: &mut AppState| &mut app.ui)),
                Box::new(scope_reducer(TodoReducer::new(), |app: &mut AppState| &mut app.todos)),
            ]),
        }
    }
}

impl Default for AppReducer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for AppReducer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("AppReducer").field(&self.inner).finish()
    }
}

impl Reducer for AppReducer {
    type State = AppState;
    type Action = AppAction;
    type Environment = AppEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        tracing::trace!(
            action = action.action_type(),
            slice = action.slice().unwrap_or("none"),
            "Routing action to slices"
        );
        self.inner.reduce(state, action, env)
    }
}
