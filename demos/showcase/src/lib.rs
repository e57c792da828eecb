//! Showcase screen state: UI preferences and a todo list behind one store.
//!
//! This crate holds everything the screen's view layer talks to:
//!
//! - Two independent slices, [`UiState`] and [`TodoState`], each with its own
//!   reducer
//! - A root [`AppReducer`] that routes every action to both slices
//! - [`AppStore`], the synchronous store the view dispatches into and
//!   subscribes to
//! - Selectors the view renders from
//!
//! Todo ordering: active todos always precede completed ones. Toggling a
//! todo recomputes that partition from the current order, so relative order
//! inside each group never changes except for the toggled record.
//!
//! # Quick Start
//!
//! ```
//! use showcase::{AppAction, ShowcaseConfig, new_store};
//! use showcase::types::AppEnvironment;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = new_store(&ShowcaseConfig::default(), AppEnvironment::production());
//!
//! let _subscription = store.subscribe(|state| {
//!     println!("{} todos", state.todos.len());
//! });
//!
//! let add = AppAction::add_todo("Buy milk", store.environment())?;
//! let AppAction::AddTodo { id, .. } = add.clone() else { unreachable!() };
//! store.dispatch(add)?;
//! store.dispatch(AppAction::ToggleTodo { id })?;
//!
//! assert!(store.state().todos.items[0].done);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

pub mod command;
pub mod config;
pub mod reducer;
pub mod selectors;
pub mod types;

use pocket_runtime::Store;

// Re-export commonly used types
pub use command::{Command, CommandError};
pub use config::ShowcaseConfig;
pub use reducer::{AppReducer, TodoReducer, UiReducer};
pub use types::{ActionError, AppAction, AppEnvironment, AppState, TodoId, TodoRecord, TodoState, UiState};

/// The screen's store
pub type AppStore = Store<AppState, AppAction, AppEnvironment, AppReducer>;

/// Build a store from configuration and an environment
#[must_use]
pub fn new_store(config: &ShowcaseConfig, environment: AppEnvironment) -> AppStore {
    Store::with_config(
        config.initial_state(),
        AppReducer::new(),
        environment,
        config.store_config(),
    )
}
