//! Terminal rendition of the showcase screen.
//!
//! Each command argument stands in for one user interaction. The screen is
//! re-rendered by a store subscriber after every state change, the same way a
//! view would be.
//!
//! ```text
//! showcase add:"Buy milk" add:"Write docs" toggle:2 dark
//! showcase --json dismiss
//! ```

use clap::Parser;
use showcase::selectors::{self, Theme};
use showcase::{AppEnvironment, AppState, Command, ShowcaseConfig, new_store};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Commands replayed when none are given
const DEMO_SCRIPT: &[&str] = &[
    "add:Buy milk",
    "add:Write docs",
    "toggle:2",
    "dark",
    "dismiss",
    "banner:All caught up",
];

#[derive(Parser, Debug)]
#[command(name = "showcase")]
#[command(about = "Drive the showcase screen store from the terminal", long_about = None)]
struct Args {
    /// Render each snapshot as JSON instead of text
    #[arg(long)]
    json: bool,

    /// Keep going after a command fails
    #[arg(long)]
    keep_going: bool,

    /// Commands: add:<title>, toggle:<n>, remove:<n>, clear, dark, dismiss, banner:<text>
    #[arg(value_name = "COMMAND")]
    commands: Vec<String>,
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "showcase=info,pocket_runtime=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

fn render_text(state: &AppState) -> String {
    let screen = selectors::screen(state);
    let mut out = String::new();

    let theme = match screen.theme {
        Theme::Light => "☀",
        Theme::Dark => "☾",
    };
    out.push_str(&format!("{theme} {} theme\n", screen.theme.name()));

    if let Some(banner) = screen.banner {
        out.push_str(&format!("[ {banner} ]\n"));
    }

    out.push_str(&format!(
        "Todos: {} active, {} done\n",
        screen.summary.active, screen.summary.completed
    ));
    for (position, todo) in screen.todos.iter().enumerate() {
        let status = if todo.done { "✓" } else { " " };
        out.push_str(&format!("  {}. [{status}] {}\n", position + 1, todo.title));
    }

    out
}

fn render_json(state: &AppState) -> Option<String> {
    match serde_json::to_string(&selectors::screen(state)) {
        Ok(json) => Some(json),
        Err(error) => {
            tracing::warn!(error = %error, "Failed to serialize screen");
            None
        },
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let args = Args::parse();
    let config = ShowcaseConfig::from_env();
    tracing::info!(
        dark_mode = config.dark_mode,
        max_chained_actions = config.max_chained_actions,
        "Starting showcase"
    );

    let store = new_store(&config, AppEnvironment::production());

    let json = args.json;
    let render = move |state: &AppState| {
        if json {
            if let Some(line) = render_json(state) {
                println!("{line}");
            }
        } else {
            println!("{}", render_text(state));
        }
    };

    render(store.state().as_ref());
    let _subscription = store.subscribe(move |state| render(state.as_ref()));

    let script: Vec<String> = if args.commands.is_empty() {
        DEMO_SCRIPT.iter().map(ToString::to_string).collect()
    } else {
        args.commands
    };

    for raw in &script {
        let outcome = raw
            .parse::<Command>()
            .and_then(|command| command.into_action(&store.state(), store.environment()))
            .map_err(Box::<dyn std::error::Error>::from)
            .and_then(|action| {
                tracing::info!(
                    command = %raw,
                    action = action.action_type(),
                    slice = action.slice().unwrap_or("none"),
                    "Dispatching"
                );
                store.dispatch(action).map_err(Into::into)
            });

        if let Err(error) = outcome {
            if !args.keep_going {
                return Err(error);
            }
            tracing::warn!(command = %raw, error = %error, "Command failed");
        }
    }

    let summary = store.select(|state| selectors::summary(&state.todos));
    tracing::info!(
        active = summary.active,
        completed = summary.completed,
        "Session finished"
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use showcase::types::UiState;

    #[test]
    fn text_view_shows_theme_banner_and_counts() {
        let state = AppState {
            ui: UiState::new("Welcome"),
            ..AppState::default()
        };
        let text = render_text(&state);
        assert!(text.contains("light theme"));
        assert!(text.contains("[ Welcome ]"));
        assert!(text.contains("0 active, 0 done"));
    }

    #[test]
    fn demo_script_parses() {
        for raw in DEMO_SCRIPT {
            assert!(raw.parse::<Command>().is_ok(), "{raw}");
        }
    }

    #[test]
    fn args_accept_commands() {
        let args = Args::parse_from(["showcase", "--json", "add:A", "toggle:1"]);
        assert!(args.json);
        assert_eq!(args.commands, vec!["add:A", "toggle:1"]);
    }
}
