//! Text commands standing in for taps on the screen.
//!
//! ```text
//! add:<title>     new todo
//! toggle:<n>      complete / reopen the n-th todo (1-based, display order)
//! remove:<n>      delete the n-th todo
//! clear           delete every todo
//! dark            toggle dark mode
//! dismiss         hide the banner
//! banner:<text>   show the banner with new text
//! ```

use crate::types::{ActionError, AppAction, AppEnvironment, AppState};
use std::str::FromStr;
use thiserror::Error;

/// A user interaction on the screen
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Submit the new-todo field
    Add(String),
    /// Tap a todo row
    Toggle(usize),
    /// Swipe a todo row away
    Remove(usize),
    /// Tap "clear all"
    Clear,
    /// Flip the theme switch
    Dark,
    /// Close the banner
    Dismiss,
    /// Show a banner message
    Banner(String),
}

/// Errors from parsing or resolving a command
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// The command word is not recognised
    #[error("Unknown command: {0}")]
    Unknown(String),

    /// A positional argument was not a positive number
    #[error("Invalid position '{0}', expected a number starting at 1")]
    InvalidPosition(String),

    /// No todo at that position in the current list
    #[error("No todo at position {0}")]
    NoSuchTodo(usize),

    /// The action itself was rejected
    #[error(transparent)]
    Action(#[from] ActionError),
}

fn parse_position(raw: &str) -> Result<usize, CommandError> {
    match raw.trim().parse::<usize>() {
        Ok(position) if position > 0 => Ok(position),
        _ => Err(CommandError::InvalidPosition(raw.to_string())),
    }
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let (word, argument) = match input.split_once(':') {
            Some((word, argument)) => (word.trim(), Some(argument)),
            None => (input.trim(), None),
        };

        match (word, argument) {
            ("add", Some(title)) => Ok(Self::Add(title.to_string())),
            ("toggle", Some(position)) => parse_position(position).map(Self::Toggle),
            ("remove", Some(position)) => parse_position(position).map(Self::Remove),
            ("clear", None) => Ok(Self::Clear),
            ("dark", None) => Ok(Self::Dark),
            ("dismiss", None) => Ok(Self::Dismiss),
            ("banner", Some(message)) => Ok(Self::Banner(message.to_string())),
            _ => Err(CommandError::Unknown(input.to_string())),
        }
    }
}

impl Command {
    /// Resolve the command against the current snapshot
    ///
    /// # Errors
    ///
    /// - [`CommandError::NoSuchTodo`] if a position is zero or past the end of the list
    /// - [`CommandError::Action`] if the todo title is blank
    pub fn into_action(self, state: &AppState, env: &AppEnvironment) -> Result<AppAction, CommandError> {
        let todo_at = |position: usize| {
            position
                .checked_sub(1)
                .and_then(|index| state.todos.at(index))
                .map(|todo| todo.id)
                .ok_or(CommandError::NoSuchTodo(position))
        };

        Ok(match self {
            Self::Add(title) => AppAction::add_todo(&title, env)?,
            Self::Toggle(position) => AppAction::ToggleTodo {
                id: todo_at(position)?,
            },
            Self::Remove(position) => AppAction::RemoveTodo {
                id: todo_at(position)?,
            },
            Self::Clear => AppAction::ClearTodos,
            Self::Dark => AppAction::ToggleDarkMode,
            Self::Dismiss => AppAction::DismissBanner,
            Self::Banner(message) => AppAction::show_banner(message),
        })
    }
}
