//! Domain types for the showcase screen.
//!
//! The screen state is two independent slices: UI preferences (dark mode and
//! a dismissible banner) and an ordered todo list. Both are plain owned data;
//! the store clones and replaces them wholesale on every dispatch.

use chrono::{DateTime, Utc};
use pocket_core::environment::{Clock, IdGenerator};
use pocket_macros::Action;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

/// Banner text shown on first launch unless configured otherwise
pub const DEFAULT_BANNER_MESSAGE: &str = "Welcome! Add a few todos, then tap one to complete it.";

/// Unique identifier for a todo record
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TodoId(Uuid);

impl TodoId {
    /// Creates a `TodoId` from a UUID
    #[must_use]
    pub const fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Returns the inner UUID
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl std::fmt::Display for TodoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single todo record
///
/// `id`, `title` and `created_at` never change after creation; only `done`
/// flips.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoRecord {
    /// Unique identifier
    pub id: TodoId,
    /// Non-empty, trimmed title
    pub title: String,
    /// Whether the todo is completed
    pub done: bool,
    /// When the todo was created
    pub created_at: DateTime<Utc>,
}

impl TodoRecord {
    /// Creates a new, active todo record
    #[must_use]
    pub const fn new(id: TodoId, title: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            title,
            done: false,
            created_at,
        }
    }
}

/// Todo list slice
///
/// Invariant: every active record precedes every completed record.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoState {
    /// Records in display order
    pub items: Vec<TodoRecord>,
}

impl TodoState {
    /// Creates an empty todo list
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Returns the number of todos
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if there are no todos
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns a todo by ID
    #[must_use]
    pub fn get(&self, id: &TodoId) -> Option<&TodoRecord> {
        self.items.iter().find(|todo| todo.id == *id)
    }

    /// Returns the todo at a display position
    #[must_use]
    pub fn at(&self, index: usize) -> Option<&TodoRecord> {
        self.items.get(index)
    }
}

/// UI preference slice
///
/// `banner_message` always holds text; it is only shown while
/// `banner_visible` is true.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiState {
    /// Dark theme enabled
    pub dark_mode: bool,
    /// Banner currently shown
    pub banner_visible: bool,
    /// Last banner text
    pub banner_message: String,
}

impl UiState {
    /// Light mode, banner visible with `message`
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            dark_mode: false,
            banner_visible: true,
            banner_message: message.into(),
        }
    }
}

impl Default for UiState {
    fn default() -> Self {
        Self::new(DEFAULT_BANNER_MESSAGE)
    }
}

/// The whole screen state tree
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppState {
    /// UI preferences
    pub ui: UiState,
    /// Todo list
    pub todos: TodoState,
}

/// Every state-changing event on the screen
///
/// Each variant is owned by exactly one slice; the other slice ignores it.
#[derive(Action, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AppAction {
    /// Flip dark mode
    #[slice(ui)]
    ToggleDarkMode,

    /// Hide the banner, keeping its text
    #[slice(ui)]
    DismissBanner,

    /// Show the banner with new text
    #[slice(ui)]
    ShowBanner {
        /// Text to display
        message: String,
    },

    /// Insert a new active todo at the top of the list
    ///
    /// Build with [`AppAction::add_todo`] so the title is validated and the
    /// id and timestamp come from the environment.
    #[slice(todos)]
    AddTodo {
        /// Pre-generated identifier
        id: TodoId,
        /// Trimmed, non-empty title
        title: String,
        /// Creation instant
        created_at: DateTime<Utc>,
    },

    /// Flip a todo's `done` flag and repartition the list
    #[slice(todos)]
    ToggleTodo {
        /// Todo to toggle
        id: TodoId,
    },

    /// Drop a todo
    #[slice(todos)]
    RemoveTodo {
        /// Todo to remove
        id: TodoId,
    },

    /// Drop every todo
    #[slice(todos)]
    ClearTodos,
}

/// Rejected action construction
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ActionError {
    /// The todo title was empty or only whitespace
    #[error("Todo title cannot be empty")]
    EmptyTitle,
}

impl AppAction {
    /// Build an `AddTodo` action, pulling the id and timestamp from `env`
    ///
    /// The title is trimmed first.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::EmptyTitle`] if the trimmed title is empty.
    pub fn add_todo(title: &str, env: &AppEnvironment) -> Result<Self, ActionError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(ActionError::EmptyTitle);
        }

        Ok(Self::AddTodo {
            id: TodoId::from_uuid(env.ids.next_id()),
            title: title.to_string(),
            created_at: env.clock.now(),
        })
    }

    /// Build a `ShowBanner` action
    #[must_use]
    pub fn show_banner(message: impl Into<String>) -> Self {
        Self::ShowBanner {
            message: message.into(),
        }
    }
}

/// Environment dependencies for the screen
///
/// Only action constructors read it; the reducers never do.
#[derive(Clone)]
pub struct AppEnvironment {
    /// Clock for creation timestamps
    pub clock: Arc<dyn Clock>,
    /// Source of todo identifiers
    pub ids: Arc<dyn IdGenerator>,
}

impl AppEnvironment {
    /// Creates a new `AppEnvironment`
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>, ids: Arc<dyn IdGenerator>) -> Self {
        Self { clock, ids }
    }

    /// System clock and random v4 ids
    #[must_use]
    pub fn production() -> Self {
        Self::new(
            Arc::new(pocket_core::environment::SystemClock),
            Arc::new(pocket_core::environment::UuidGenerator),
        )
    }
}

impl std::fmt::Debug for AppEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppEnvironment").finish_non_exhaustive()
    }
}
