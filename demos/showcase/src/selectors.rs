//! Derived read models for the view layer.
//!
//! Views read these instead of poking at raw slices, so a re-render only
//! needs the latest snapshot.

use crate::types::{AppState, TodoRecord, TodoState, UiState};
use serde::Serialize;

/// Colour scheme the view should render with
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Light palette
    Light,
    /// Dark palette
    Dark,
}

impl Theme {
    /// Lowercase theme name, as used by theme token lookups
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

/// Theme derived from the dark-mode preference
#[must_use]
pub const fn theme(ui: &UiState) -> Theme {
    if ui.dark_mode { Theme::Dark } else { Theme::Light }
}

/// Banner text, only while the banner is visible
#[must_use]
pub fn visible_banner(ui: &UiState) -> Option<&str> {
    ui.banner_visible.then_some(ui.banner_message.as_str())
}

/// Records not yet done, in display order
pub fn active(todos: &TodoState) -> impl Iterator<Item = &TodoRecord> {
    todos.items.iter().filter(|todo| !todo.done)
}

/// Records already done, in display order
pub fn completed(todos: &TodoState) -> impl Iterator<Item = &TodoRecord> {
    todos.items.iter().filter(|todo| todo.done)
}

/// Counts shown in the list header
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct TodoSummary {
    /// Active todos
    pub active: usize,
    /// Completed todos
    pub completed: usize,
    /// All todos
    pub total: usize,
}

/// Header counts for the todo list
#[must_use]
pub fn summary(todos: &TodoState) -> TodoSummary {
    let completed = completed(todos).count();
    TodoSummary {
        active: todos.len() - completed,
        completed,
        total: todos.len(),
    }
}

/// True if active todos precede completed ones
#[must_use]
pub fn is_partitioned(todos: &TodoState) -> bool {
    todos
        .items
        .windows(2)
        .all(|pair| !(pair[0].done && !pair[1].done))
}

/// Everything a screen render needs, in one value
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ScreenModel<'a> {
    /// Colour scheme
    pub theme: Theme,
    /// Banner text, when shown
    pub banner: Option<&'a str>,
    /// Header counts
    pub summary: TodoSummary,
    /// Todos in display order
    pub todos: &'a [TodoRecord],
}

/// Build the screen model from a snapshot
#[must_use]
pub fn screen(state: &AppState) -> ScreenModel<'_> {
    ScreenModel {
        theme: theme(&state.ui),
        banner: visible_banner(&state.ui),
        summary: summary(&state.todos),
        todos: &state.todos.items,
    }
}
