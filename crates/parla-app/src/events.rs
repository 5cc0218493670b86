use std::collections::HashMap;
use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use parla_core::{Scheduler, Session, SessionSettings};
use parla_types::{AppEvent, Effect, PlaybackChannel};
use tokio_util::sync::CancellationToken;

use crate::services::Services;
use crate::state::AppState;
use crate::timers::TokioScheduler;

pub mod clipboard;
pub mod pronunciation;
pub mod speech;
pub mod translate;
pub mod voice_input;
pub mod word_lookup;

use clipboard::handle_clipboard_write;
use pronunciation::handle_play_audio;
use speech::{handle_speak, handle_stop_speaking};
use translate::handle_translate;
use voice_input::handle_voice_input;
use word_lookup::handle_word_lookup;

/// What effect handlers need to start work and report back
pub struct EffectContext {
    pub services: Services,
    /// Completions re-enter the event loop through here
    pub event_tx: AsyncSender<AppEvent>,
    pub app_to_ui_tx: AsyncSender<AppEvent>,
    /// Parent of every in-flight task, cancelled on teardown
    pub cancel: CancellationToken,
    pub playback: HashMap<PlaybackChannel, CancellationToken>,
    pub pronunciation: Option<CancellationToken>,
}

impl EffectContext {
    pub fn new(
        services: Services,
        event_tx: AsyncSender<AppEvent>,
        app_to_ui_tx: AsyncSender<AppEvent>,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            services,
            event_tx,
            app_to_ui_tx,
            cancel,
            playback: HashMap::new(),
            pronunciation: None,
        }
    }
}

/// App's main loop.
///
/// Owns the session: every inbound event goes through `Session::handle`, the
/// resulting effects are carried out, and a fresh snapshot goes to the UI.
/// Returns once the session is torn down, after a last snapshot and
/// `SessionEnded`.
pub async fn event_loop(
    state: Arc<AppState>,
    services: Services,
    ui_to_app_rx: AsyncReceiver<AppEvent>,
    ui_to_app_tx: AsyncSender<AppEvent>,
    app_to_ui_tx: AsyncSender<AppEvent>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let settings = {
        let config = state.config.read().await;
        SessionSettings::from(&*config)
    };

    let mut session = Session::new(settings, services.capabilities());
    let mut scheduler = TokioScheduler::new(ui_to_app_tx.clone(), cancel.child_token());
    let mut ctx = EffectContext::new(
        services,
        ui_to_app_tx,
        app_to_ui_tx.clone(),
        cancel.child_token(),
    );

    send_to_ui(&app_to_ui_tx, AppEvent::BackendReady).await;
    render(&app_to_ui_tx, &session).await;

    tracing::info!("[EVENT_LOOP] Starting main loop, waiting for events");
    loop {
        let event = tokio::select! {
            event = ui_to_app_rx.recv() => event?,
            _ = cancel.cancelled() => {
                tracing::info!("[EVENT_LOOP] Shutdown requested");
                AppEvent::Shutdown
            }
        };

        tracing::debug!(
            "[EVENT_LOOP] Event received: {:?}",
            std::mem::discriminant(&event)
        );

        let effects = session.handle(event);
        let torn_down = handle_effects(&mut ctx, &mut scheduler, effects).await;

        render(&app_to_ui_tx, &session).await;
        if torn_down {
            break;
        }
    }

    tracing::info!("[EVENT_LOOP] Session torn down, leaving main loop");
    send_to_ui(&app_to_ui_tx, AppEvent::SessionEnded).await;
    Ok(())
}

/// Carry out effects in order; true once the session asked for teardown
async fn handle_effects(
    ctx: &mut EffectContext,
    scheduler: &mut impl Scheduler,
    effects: Vec<Effect>,
) -> bool {
    let mut torn_down = false;

    for effect in effects {
        match effect {
            Effect::Schedule { token, delay } => scheduler.schedule(token, delay),
            Effect::Cancel(kind) => scheduler.cancel(kind),
            Effect::Translate {
                generation,
                request,
            } => handle_translate(ctx, generation, request),
            Effect::LookupWord { generation, word } => handle_word_lookup(ctx, generation, word),
            Effect::Speak {
                channel,
                generation,
                text,
                locale,
            } => handle_speak(ctx, channel, generation, text, locale),
            Effect::StopSpeaking(channel) => handle_stop_speaking(ctx, channel),
            Effect::PlayAudio(url) => handle_play_audio(ctx, url),
            Effect::StartRecognition { locale } => handle_voice_input(ctx, locale),
            Effect::WriteClipboard(text) => handle_clipboard_write(ctx, text),
            Effect::Notify(message) => {
                tracing::info!("Notice: {}", message);
                send_to_ui(&ctx.app_to_ui_tx, AppEvent::Notice(message)).await;
            }
            Effect::Teardown => {
                scheduler.cancel_all();
                ctx.cancel.cancel();
                ctx.playback.clear();
                ctx.pronunciation = None;
                torn_down = true;
            }
        }
    }

    torn_down
}

async fn render(app_to_ui_tx: &AsyncSender<AppEvent>, session: &Session) {
    send_to_ui(app_to_ui_tx, AppEvent::Render(Box::new(session.view()))).await;
}

async fn send_to_ui(app_to_ui_tx: &AsyncSender<AppEvent>, event: AppEvent) {
    if let Err(e) = app_to_ui_tx.send(event).await {
        tracing::debug!("[EVENT_LOOP] UI is gone: {}", e);
    }
}
