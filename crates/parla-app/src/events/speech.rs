use parla_core::speech::{Utterance, select_voice};
use parla_types::{AppEvent, PlaybackChannel};

use super::EffectContext;

/// Start speaking on `channel`, replacing whatever it was playing
pub fn handle_speak(
    ctx: &mut EffectContext,
    channel: PlaybackChannel,
    generation: u64,
    text: String,
    locale: String,
) {
    let Some(synthesizer) = ctx.services.synthesizer.get().cloned() else {
        tracing::warn!("Speak requested without a synthesizer");
        return;
    };

    let playback = ctx.cancel.child_token();
    if let Some(previous) = ctx.playback.insert(channel, playback.clone()) {
        previous.cancel();
    }

    let voice = select_voice(&synthesizer.voices(), &locale);
    if voice.is_none() {
        tracing::warn!("No configured voice for {}, using the engine default", locale);
    }
    let utterance = Utterance {
        text,
        locale,
        voice,
    };

    let event_tx = ctx.event_tx.clone();
    tokio::spawn(async move {
        tokio::select! {
            result = synthesizer.speak(utterance) => {
                if let Err(e) = result {
                    tracing::error!("Playback on {:?} failed: {}", channel, e);
                }
            }
            _ = playback.cancelled() => {
                tracing::debug!("Playback on {:?} stopped", channel);
            }
        }

        if let Err(e) = event_tx
            .send(AppEvent::PlaybackFinished { channel, generation })
            .await
        {
            tracing::debug!("Dropping playback completion: {}", e);
        }
    });
}

pub fn handle_stop_speaking(ctx: &mut EffectContext, channel: PlaybackChannel) {
    if let Some(playback) = ctx.playback.remove(&channel) {
        playback.cancel();
    }
}
