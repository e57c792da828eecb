//! Integration tests for the showcase store.
//!
//! These drive the full stack the way a view would: build actions from
//! commands or constructors, dispatch them into an [`AppStore`], and observe
//! snapshots through subscriptions.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)] // Test code can use unwrap/expect/panic

use pocket_core::environment::Clock;
use pocket_runtime::{StoreConfig, StoreError};
use pocket_testing::{Recorder, SequentialIds, SteppingClock, test_clock};
use proptest::prelude::*;
use showcase::selectors;
use showcase::{
    AppAction, AppEnvironment, AppReducer, AppState, AppStore, Command, ShowcaseConfig, TodoId, TodoRecord,
    new_store,
};
use std::sync::Arc;

fn create_test_env() -> AppEnvironment {
    let clock = SteppingClock::new(test_clock().now(), chrono::Duration::seconds(1));
    AppEnvironment::new(Arc::new(clock), Arc::new(SequentialIds::new()))
}

fn create_store() -> AppStore {
    new_store(&ShowcaseConfig::default(), create_test_env())
}

fn add(store: &AppStore, title: &str) -> TodoId {
    let action = AppAction::add_todo(title, store.environment()).unwrap();
    let AppAction::AddTodo { id, .. } = action else {
        unreachable!("add_todo builds AddTodo");
    };
    store.dispatch(action).unwrap();
    id
}

fn run(store: &AppStore, raw: &str) {
    let action = raw
        .parse::<Command>()
        .unwrap()
        .into_action(&store.state(), store.environment())
        .unwrap();
    store.dispatch(action).unwrap();
}

fn titles(state: &AppState) -> Vec<(String, bool)> {
    state
        .todos
        .items
        .iter()
        .map(|todo| (todo.title.clone(), todo.done))
        .collect()
}

#[test]
fn test_add_add_toggle_scenario() {
    let store = create_store();
    let a = add(&store, "A");
    add(&store, "B");
    store.dispatch(AppAction::ToggleTodo { id: a }).unwrap();

    assert_eq!(
        titles(&store.state()),
        vec![("B".to_string(), false), ("A".to_string(), true)]
    );
}

#[test]
fn test_commands_resolve_display_positions() {
    let store = create_store();
    run(&store, "add:first");
    run(&store, "add:second");
    run(&store, "add:third");

    // third, second, first
    run(&store, "toggle:1");
    assert_eq!(
        titles(&store.state()),
        vec![
            ("second".to_string(), false),
            ("first".to_string(), false),
            ("third".to_string(), true),
        ]
    );

    run(&store, "remove:2");
    assert_eq!(
        titles(&store.state()),
        vec![("second".to_string(), false), ("third".to_string(), true)]
    );
}

#[test]
fn test_add_prepends_onto_existing_actives() {
    let store = create_store();
    add(&store, "one");
    add(&store, "two");
    add(&store, "buy milk");

    let state = store.state();
    assert_eq!(state.todos.len(), 3);
    assert_eq!(state.todos.items[0].title, "buy milk");
    assert!(!state.todos.items[0].done);
}

#[test]
fn test_created_at_comes_from_clock() {
    let store = create_store();
    add(&store, "early");
    add(&store, "late");

    let state = store.state();
    assert!(state.todos.items[0].created_at > state.todos.items[1].created_at);
}

#[test]
fn test_unknown_ids_yield_new_but_equal_tree() {
    let store = create_store();
    add(&store, "A");
    add(&store, "B");
    let unknown = TodoId::from_uuid(SequentialIds::nth(1_000));

    for action in [
        AppAction::ToggleTodo { id: unknown },
        AppAction::RemoveTodo { id: unknown },
    ] {
        let before = store.state();
        store.dispatch(action).unwrap();
        let after = store.state();

        assert!(!Arc::ptr_eq(&before, &after));
        assert_eq!(*before, *after);
    }
}

#[test]
fn test_show_banner_sets_text_and_visibility() {
    let store = create_store();
    let recorder = Recorder::new();
    let _subscription = store.subscribe(recorder.listener());

    store.dispatch(AppAction::DismissBanner).unwrap();
    store.dispatch(AppAction::show_banner("x")).unwrap();

    let snapshots: Vec<AppState> = recorder.values();
    assert_eq!(snapshots.len(), 2);
    assert!(!snapshots[0].ui.banner_visible);
    assert!(snapshots[1].ui.banner_visible);
    assert_eq!(snapshots[1].ui.banner_message, "x");
}

#[test]
fn test_clear_is_idempotent() {
    let store = create_store();
    add(&store, "A");
    add(&store, "B");

    store.dispatch(AppAction::ClearTodos).unwrap();
    let once = store.state();
    store.dispatch(AppAction::ClearTodos).unwrap();
    let twice = store.state();

    assert!(once.todos.is_empty());
    assert_eq!(*once, *twice);
}

#[test]
fn test_slices_do_not_interfere() {
    let store = create_store();
    add(&store, "A");
    let todos_before = store.select(|state| state.todos.clone());

    store.dispatch(AppAction::ToggleDarkMode).unwrap();
    store.dispatch(AppAction::DismissBanner).unwrap();
    assert_eq!(store.select(|state| state.todos.clone()), todos_before);

    let ui_before = store.select(|state| state.ui.clone());
    store.dispatch(AppAction::ClearTodos).unwrap();
    assert_eq!(store.select(|state| state.ui.clone()), ui_before);
}

#[test]
fn test_every_dispatch_notifies_until_dropped() {
    let store = create_store();
    let recorder = Recorder::<AppState>::new();
    let subscription = store.subscribe(recorder.listener());

    add(&store, "A");
    store.dispatch(AppAction::ToggleDarkMode).unwrap();
    assert_eq!(recorder.len(), 2);
    assert_eq!(recorder.snapshots()[1], store.state());

    drop(subscription);
    store.dispatch(AppAction::ToggleDarkMode).unwrap();
    assert_eq!(recorder.len(), 2);
    assert_eq!(store.subscriber_count(), 0);
}

#[test]
fn test_dispatch_from_listener_is_rejected() {
    let store = Arc::new(create_store());
    let outcomes = Arc::new(std::sync::Mutex::new(Vec::new()));

    let inner_store = Arc::downgrade(&store);
    let inner_outcomes = Arc::clone(&outcomes);
    let _subscription = store.subscribe(move |_state| {
        if let Some(store) = inner_store.upgrade() {
            let outcome = store.dispatch(AppAction::ToggleDarkMode);
            inner_outcomes.lock().unwrap().push(outcome);
        }
    });

    store.dispatch(AppAction::DismissBanner).unwrap();

    assert_eq!(*outcomes.lock().unwrap(), vec![Err(StoreError::DispatchInProgress)]);
    assert!(!store.state().ui.dark_mode);
    assert!(!store.state().ui.banner_visible);
}

#[test]
fn test_config_seeds_initial_state() {
    let config = ShowcaseConfig {
        banner_message: "Hi".to_string(),
        dark_mode: true,
        ..ShowcaseConfig::default()
    };
    let store = new_store(&config, create_test_env());

    let screen = store.select(|state| {
        let model = selectors::screen(state);
        (model.theme, model.banner.map(str::to_string))
    });
    assert_eq!(screen, (selectors::Theme::Dark, Some("Hi".to_string())));
}

#[test]
fn test_screen_model_serializes() {
    let store = create_store();
    add(&store, "A");

    let json = store.select(|state| serde_json::to_value(selectors::screen(state)).unwrap());
    assert_eq!(json["theme"], "light");
    assert_eq!(json["summary"]["total"], 1);
    assert_eq!(json["todos"][0]["title"], "A");
    assert_eq!(json["todos"][0]["done"], false);
}

#[test]
fn test_store_with_custom_config() {
    let store = pocket_runtime::Store::with_config(
        AppState::default(),
        AppReducer::new(),
        create_test_env(),
        StoreConfig::default().with_max_chained_actions(1),
    );
    store.dispatch(AppAction::ToggleDarkMode).unwrap();
    assert!(store.state().ui.dark_mode);
}

#[derive(Clone, Debug)]
enum Op {
    Add(String),
    Toggle(usize),
    Remove(usize),
    ToggleUnknown,
    Clear,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => "[a-z]{1,8}".prop_map(Op::Add),
        5 => (0usize..16).prop_map(Op::Toggle),
        2 => (0usize..16).prop_map(Op::Remove),
        1 => Just(Op::ToggleUnknown),
        1 => Just(Op::Clear),
    ]
}

/// Stable partition of `before` with only `target` flipped
fn expected_after_toggle(before: &[TodoRecord], target: TodoId) -> Vec<TodoRecord> {
    let flipped: Vec<TodoRecord> = before
        .iter()
        .cloned()
        .map(|mut todo| {
            if todo.id == target {
                todo.done = !todo.done;
            }
            todo
        })
        .collect();

    flipped
        .iter()
        .filter(|todo| !todo.done)
        .chain(flipped.iter().filter(|todo| todo.done))
        .cloned()
        .collect()
}

proptest! {
    #[test]
    fn prop_toggle_is_a_stable_partition(ops in prop::collection::vec(op_strategy(), 1..40)) {
        let store = create_store();

        for op in ops {
            let before = store.state();
            match op {
                Op::Add(title) => {
                    add(&store, &title);
                },
                Op::Toggle(index) => {
                    let Some(target) = before.todos.at(index % before.todos.len().max(1)).map(|todo| todo.id) else {
                        continue;
                    };
                    store.dispatch(AppAction::ToggleTodo { id: target }).unwrap();
                    prop_assert_eq!(
                        &store.state().todos.items,
                        &expected_after_toggle(&before.todos.items, target)
                    );
                },
                Op::Remove(index) => {
                    if let Some(target) = before.todos.at(index % before.todos.len().max(1)).map(|todo| todo.id) {
                        store.dispatch(AppAction::RemoveTodo { id: target }).unwrap();
                        prop_assert!(store.state().todos.get(&target).is_none());
                    }
                },
                Op::ToggleUnknown => {
                    let unknown = TodoId::from_uuid(SequentialIds::nth(u64::MAX));
                    store.dispatch(AppAction::ToggleTodo { id: unknown }).unwrap();
                    prop_assert_eq!(&*store.state(), &*before);
                },
                Op::Clear => {
                    store.dispatch(AppAction::ClearTodos).unwrap();
                    prop_assert!(store.state().todos.is_empty());
                },
            }

            prop_assert!(selectors::is_partitioned(&store.state().todos));
        }
    }

    #[test]
    fn prop_show_banner_is_atomic(message in ".*", dismiss_first in any::<bool>()) {
        let store = create_store();
        if dismiss_first {
            store.dispatch(AppAction::DismissBanner).unwrap();
        }
        store.dispatch(AppAction::show_banner(message.clone())).unwrap();

        let ui = store.select(|state| state.ui.clone());
        prop_assert!(ui.banner_visible);
        prop_assert_eq!(ui.banner_message, message);
    }
}
