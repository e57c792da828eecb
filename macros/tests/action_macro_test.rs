//! Tests for #[derive(Action)] macro

use pocket_macros::Action;

#[derive(Action, Clone, Debug, PartialEq)]
enum ScreenAction {
    #[slice(ui)]
    ToggleDarkMode,

    #[slice(ui)]
    ShowBanner { message: String },

    #[slice(todos)]
    RemoveTodo(u32),

    Refresh,
}

#[test]
fn test_action_type_names_variants() {
    assert_eq!(ScreenAction::ToggleDarkMode.action_type(), "ToggleDarkMode");
    assert_eq!(
        ScreenAction::ShowBanner {
            message: "hi".to_string()
        }
        .action_type(),
        "ShowBanner"
    );
    assert_eq!(ScreenAction::RemoveTodo(3).action_type(), "RemoveTodo");
    assert_eq!(ScreenAction::Refresh.action_type(), "Refresh");
}

#[test]
fn test_slice_ownership() {
    assert_eq!(ScreenAction::ToggleDarkMode.slice(), Some("ui"));
    assert_eq!(ScreenAction::RemoveTodo(1).slice(), Some("todos"));
    assert_eq!(ScreenAction::Refresh.slice(), None);
}

#[test]
fn test_is_owned_by() {
    let action = ScreenAction::ShowBanner {
        message: "saved".to_string(),
    };
    assert!(action.is_owned_by("ui"));
    assert!(!action.is_owned_by("todos"));
    assert!(!ScreenAction::Refresh.is_owned_by("ui"));
}
