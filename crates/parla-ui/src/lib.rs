use std::io::{BufRead, Write as _};
use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use parla_config::Config;
use parla_types::{AppEvent, UiEvent};
use tokio::sync::RwLock;

pub mod command;
pub mod render;
pub mod state;

use self::command::{Command, HELP};
use self::state::UiState;

const PROMPT: &str = "parla> ";

/// Line-oriented terminal front end.
///
/// Reads commands from stdin and forwards them to the app; prints every
/// session snapshot and notice the app sends back. Returns once the user
/// quits, the session ends, or the app side hangs up. At end of input the
/// session is asked to close after its pending translation, so piped input
/// still gets translated.
pub async fn ui_loop(
    app_to_ui_rx: AsyncReceiver<AppEvent>,
    ui_to_app_tx: AsyncSender<AppEvent>,
    config: Arc<RwLock<Config>>,
) -> anyhow::Result<()> {
    let mut state = UiState::new();
    let lines = spawn_stdin_reader();
    let mut input_open = true;

    {
        let config = config.read().await;
        tracing::debug!(
            "[UI] Starting terminal front end (max {} chars, interactive: {})",
            config.ui.max_input_chars,
            state.interactive
        );
    }

    loop {
        tokio::select! {
            line = lines.recv(), if input_open => {
                let Ok(line) = line else {
                    tracing::info!("[UI] stdin closed, waiting for pending work");
                    input_open = false;
                    ui_to_app_tx.send(AppEvent::UiEvent(UiEvent::EndOfInput)).await?;
                    continue;
                };

                match command::parse(&line, &state) {
                    Ok(Command::Send(events)) => {
                        for event in events {
                            ui_to_app_tx.send(AppEvent::UiEvent(event)).await?;
                        }
                    }
                    Ok(Command::Help) => {
                        println!("{HELP}");
                        prompt(&state);
                    }
                    Ok(Command::Quit) => {
                        ui_to_app_tx.send(AppEvent::UiEvent(UiEvent::Close)).await?;
                        break;
                    }
                    Err(e) => {
                        println!("{e}");
                        prompt(&state);
                    }
                }
            }
            event = app_to_ui_rx.recv() => {
                let Ok(event) = event else {
                    tracing::info!("[UI] App channel closed");
                    break;
                };
                if !handle_app_event(&mut state, event) {
                    break;
                }
            }
        }
    }

    tracing::info!("[UI] Front end stopped");
    Ok(())
}

/// Read stdin on a plain thread so a pending read never holds up runtime
/// shutdown; the channel closes at end of input
fn spawn_stdin_reader() -> AsyncReceiver<String> {
    let (line_tx, line_rx) = kanal::bounded::<String>(16);

    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            match line {
                Ok(line) => {
                    if line_tx.send(line).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    tracing::error!("[UI] Failed to read stdin: {}", e);
                    break;
                }
            }
        }
    });

    line_rx.to_async()
}

/// Show one app event; false once the session has ended
fn handle_app_event(state: &mut UiState, event: AppEvent) -> bool {
    match event {
        AppEvent::Render(view) => {
            if state.update(*view) {
                if let Some(view) = state.view() {
                    println!("\n{}", render::render(view));
                }
                prompt(state);
            }
        }
        AppEvent::Notice(message) => {
            println!("! {message}");
            prompt(state);
        }
        AppEvent::BackendReady => {
            println!("Type text to translate, :help for commands.");
            prompt(state);
        }
        AppEvent::SessionEnded => {
            tracing::info!("[UI] Session ended");
            return false;
        }
        _ => {
            // Backend-bound events, nothing to show
        }
    }
    true
}

fn prompt(state: &UiState) {
    if state.interactive {
        print!("{PROMPT}");
        let _ = std::io::stdout().flush();
    }
}
